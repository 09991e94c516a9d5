//! Parser for maln assembly files.
//!
//! A maln file holds one assembly: the consensus sequence and every
//! fragment's alignment against it. The format is line oriented:
//!
//! ```text
//! >consensus_id
//! ACGTACGTACGT...          (consensus, wrapped over any number of lines)
//! #score 2 -1 -5 -2        (optional: match mismatch gap_open gap_extend)
//! @frag1	a	10	17	ACG-TACG	2:TT,5:A
//! @frag2	b	100	147	...
//! ```
//!
//! Fragment fields are tab separated: identifier, segment tag, first and
//! last covered consensus coordinate (0-based, inclusive), the gapped
//! sequence (one column per coordinate, `-` where the fragment shows a
//! deletion), and an optional comma-separated list of `offset:bases`
//! insertions keyed by column offset. Blank lines are ignored.

use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::align::ScoringMatrix;
use crate::core::Fragment;
use crate::parsing::ParseError;

/// An assembly with its fragments, as read from a maln file.
#[derive(Debug, Clone)]
pub struct MalnAssembly {
    pub id: String,
    /// Gap-free consensus sequence.
    pub consensus: Vec<u8>,
    /// Scoring for fragment realignment; the file's `#score` line if
    /// present, defaults otherwise.
    pub scoring: ScoringMatrix,
    /// Fragments in file order.
    pub fragments: Vec<Fragment>,
}

/// Read a maln file.
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, or
/// `ParseError::InvalidRecord`/`ParseError::InvalidFormat` on malformed
/// content.
pub fn read_maln(path: &Path) -> Result<MalnAssembly, ParseError> {
    let file = std::fs::File::open(path)?;
    read_maln_from(BufReader::new(file))
}

fn read_maln_from<R: BufRead>(reader: R) -> Result<MalnAssembly, ParseError> {
    let mut id = None;
    let mut consensus: Vec<u8> = Vec::new();
    let mut scoring = ScoringMatrix::dna_default();
    let mut fragments = Vec::new();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim_end();
        let lineno = index + 1;
        if line.is_empty() {
            continue;
        }

        match line.as_bytes()[0] {
            b'>' => {
                if id.is_some() {
                    return Err(ParseError::InvalidRecord {
                        line: lineno,
                        message: "more than one consensus record".to_string(),
                    });
                }
                let name = line[1..].split_whitespace().next().unwrap_or("");
                if name.is_empty() {
                    return Err(ParseError::InvalidRecord {
                        line: lineno,
                        message: "consensus record has no identifier".to_string(),
                    });
                }
                id = Some(name.to_string());
            }
            b'#' => scoring = parse_score_line(line, lineno)?,
            b'@' => fragments.push(parse_fragment_line(line, lineno)?),
            _ => {
                if id.is_none() {
                    return Err(ParseError::InvalidRecord {
                        line: lineno,
                        message: "sequence data before consensus header".to_string(),
                    });
                }
                consensus.extend_from_slice(line.as_bytes());
            }
        }
    }

    let id = id.ok_or_else(|| {
        ParseError::InvalidFormat("maln file has no consensus record".to_string())
    })?;
    if consensus.is_empty() {
        return Err(ParseError::InvalidFormat(format!(
            "consensus '{id}' has no sequence"
        )));
    }

    Ok(MalnAssembly {
        id,
        consensus,
        scoring,
        fragments,
    })
}

fn parse_score_line(line: &str, lineno: usize) -> Result<ScoringMatrix, ParseError> {
    let mut parts = line.split_whitespace();
    let tag = parts.next().unwrap_or("");
    if tag != "#score" {
        return Err(ParseError::InvalidRecord {
            line: lineno,
            message: format!("unknown directive '{tag}'"),
        });
    }

    let values: Vec<i32> = parts
        .map(str::parse)
        .collect::<Result<_, _>>()
        .map_err(|e| ParseError::InvalidRecord {
            line: lineno,
            message: format!("bad score value: {e}"),
        })?;
    let [match_score, mismatch, gap_open, gap_extend] = values[..] else {
        return Err(ParseError::InvalidRecord {
            line: lineno,
            message: format!("#score takes 4 values, got {}", values.len()),
        });
    };

    ScoringMatrix::new(match_score, mismatch, gap_open, gap_extend).map_err(|e| {
        ParseError::InvalidRecord {
            line: lineno,
            message: e.to_string(),
        }
    })
}

fn parse_fragment_line(line: &str, lineno: usize) -> Result<Fragment, ParseError> {
    let invalid = |message: String| ParseError::InvalidRecord {
        line: lineno,
        message,
    };

    let fields: Vec<&str> = line[1..].split('\t').collect();
    if fields.len() < 5 || fields.len() > 6 {
        return Err(invalid(format!(
            "fragment record has {} fields, expected 5 or 6",
            fields.len()
        )));
    }

    let id = fields[0].to_string();
    if id.is_empty() {
        return Err(invalid("fragment has no identifier".to_string()));
    }

    let mut segments = fields[1].chars();
    let segment = segments
        .next()
        .filter(|_| segments.next().is_none())
        .ok_or_else(|| invalid(format!("bad segment tag '{}'", fields[1])))?;

    let start: usize = fields[2]
        .parse()
        .map_err(|e| invalid(format!("bad start coordinate: {e}")))?;
    let end: usize = fields[3]
        .parse()
        .map_err(|e| invalid(format!("bad end coordinate: {e}")))?;
    if end < start {
        return Err(invalid(format!("end {end} precedes start {start}")));
    }

    let seq = fields[4].as_bytes().to_vec();
    if seq.len() != end - start + 1 {
        return Err(invalid(format!(
            "sequence spans {} columns but coordinates span {}",
            seq.len(),
            end - start + 1
        )));
    }

    let mut insertions = Vec::new();
    if let Some(&spec) = fields.get(5) {
        for item in spec.split(',').filter(|s| !s.is_empty()) {
            let (at, bases) = item
                .split_once(':')
                .ok_or_else(|| invalid(format!("bad insertion '{item}'")))?;
            let at: usize = at
                .parse()
                .map_err(|e| invalid(format!("bad insertion offset: {e}")))?;
            if at >= seq.len() {
                return Err(invalid(format!(
                    "insertion offset {at} outside the fragment"
                )));
            }
            if bases.is_empty() {
                return Err(invalid(format!("empty insertion at offset {at}")));
            }
            insertions.push((at, bases.as_bytes().to_vec()));
        }
        if !insertions.windows(2).all(|w| w[0].0 < w[1].0) {
            return Err(invalid("insertion offsets out of order".to_string()));
        }
    }

    Ok(Fragment {
        id,
        segment,
        start,
        end,
        seq,
        insertions,
    })
}
