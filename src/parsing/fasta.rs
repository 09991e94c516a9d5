//! Parser for the reference FASTA file using noodles.
//!
//! Reads the first record of the file; the candidate contaminant is a
//! single sequence. Supports both uncompressed and gzip compressed files
//! (`.fa`, `.fasta`, `.fna`, plus `.gz` variants).

use std::io::{BufRead, BufReader};
use std::path::Path;

use flate2::read::GzDecoder;
use noodles::fasta;

use crate::parsing::ParseError;

/// A named reference sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceSequence {
    pub id: String,
    pub sequence: Vec<u8>,
}

/// Check if the path is a gzipped file
fn is_gzipped(path: &Path) -> bool {
    path.to_string_lossy().to_lowercase().ends_with(".gz")
}

/// Read the first record of a FASTA file.
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, `ParseError::Noodles`
/// if parsing fails, or `ParseError::InvalidFormat` if the file holds no
/// records.
pub fn read_reference(path: &Path) -> Result<ReferenceSequence, ParseError> {
    let file = std::fs::File::open(path)?;
    if is_gzipped(path) {
        let reader = BufReader::new(GzDecoder::new(file));
        read_first_record(&mut fasta::io::Reader::new(reader))
    } else {
        let reader = BufReader::new(file);
        read_first_record(&mut fasta::io::Reader::new(reader))
    }
}

fn read_first_record<R: BufRead>(
    reader: &mut fasta::io::Reader<R>,
) -> Result<ReferenceSequence, ParseError> {
    for result in reader.records() {
        let record = result
            .map_err(|e| ParseError::Noodles(format!("Failed to parse FASTA record: {e}")))?;

        let id = String::from_utf8_lossy(record.name()).to_string();
        let sequence = record.sequence().as_ref().to_vec();
        if sequence.is_empty() {
            return Err(ParseError::InvalidFormat(format!(
                "reference sequence '{id}' is empty"
            )));
        }
        return Ok(ReferenceSequence { id, sequence });
    }

    Err(ParseError::InvalidFormat(
        "no sequences found in FASTA file".to_string(),
    ))
}
