//! Fragment-to-region realignment with free terminal gaps on both sides.
//!
//! A variant of global alignment where leading and trailing gaps in both
//! sequences are unpenalised (soft-clipping semantics): the fragment may
//! hang off either end of the lifted reference region and vice versa.
//!
//! Uses the three-matrix affine-gap formulation (Gotoh, 1982):
//!
//! - **H** — best score ending in a match/mismatch
//! - **E** — best score ending in a gap in the fragment (region consumed)
//! - **F** — best score ending in a gap in the region (fragment consumed)
//!
//! Initialisation zeroes the H borders (free leading gaps); traceback starts
//! from the best cell in the last row or last column (free trailing gaps)
//! and stops at either border. The result is a single immutable record —
//! gapped region, gapped fragment, and the region offset where the
//! alignment begins — with no stateful call protocol.

use crate::align::{AlignError, ScoringMatrix};

/// A local (free-ends) alignment of a fragment against a reference region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalAlignment {
    /// Region side of the alignment, with gaps.
    pub gapped_region: Vec<u8>,
    /// Fragment side of the alignment, with gaps.
    pub gapped_fragment: Vec<u8>,
    /// Offset into the region where the aligned part begins.
    pub region_start: usize,
    /// Offset into the fragment where the aligned part begins.
    pub fragment_start: usize,
    pub score: i32,
}

#[derive(Clone, Copy, PartialEq)]
enum State {
    Diag,
    GapInFragment,
    GapInRegion,
}

/// Align `fragment` against `region` with free terminal gaps on both sides.
///
/// # Errors
///
/// Returns [`AlignError::EmptyInput`] if either sequence is empty.
pub fn align_free_ends(
    region: &[u8],
    fragment: &[u8],
    scoring: &ScoringMatrix,
) -> Result<LocalAlignment, AlignError> {
    let m = fragment.len();
    let n = region.len();
    if m == 0 || n == 0 {
        return Err(AlignError::EmptyInput);
    }

    let gap_open = scoring.gap_open;
    let gap_extend = scoring.gap_extend;

    let rows = m + 1;
    let cols = n + 1;
    let idx = |i: usize, j: usize| i * cols + j;

    const NEG: i32 = i32::MIN / 2;
    let mut h = vec![NEG; rows * cols];
    let mut e = vec![NEG; rows * cols];
    let mut f = vec![NEG; rows * cols];

    // Free leading gaps: H borders are 0, E/F stay at the sentinel.
    for j in 0..cols {
        h[idx(0, j)] = 0;
    }
    for i in 0..rows {
        h[idx(i, 0)] = 0;
    }

    for i in 1..rows {
        for j in 1..cols {
            // E: gap in the fragment, consuming region[j-1].
            e[idx(i, j)] = (h[idx(i, j - 1)] + gap_open).max(e[idx(i, j - 1)] + gap_extend);

            // F: gap in the region, consuming fragment[i-1].
            f[idx(i, j)] = (h[idx(i - 1, j)] + gap_open).max(f[idx(i - 1, j)] + gap_extend);

            let diag = h[idx(i - 1, j - 1)] + scoring.score_pair(fragment[i - 1], region[j - 1]);
            h[idx(i, j)] = diag.max(e[idx(i, j)]).max(f[idx(i, j)]);
        }
    }

    // Best cell in the last row or last column.
    let mut best_score = NEG;
    let mut best_i = m;
    let mut best_j = n;
    for j in 0..cols {
        if h[idx(m, j)] > best_score {
            best_score = h[idx(m, j)];
            best_i = m;
            best_j = j;
        }
    }
    for i in 0..rows {
        if h[idx(i, n)] > best_score {
            best_score = h[idx(i, n)];
            best_i = i;
            best_j = n;
        }
    }

    // Traceback to either border.
    let mut gapped_region = Vec::with_capacity(m + n);
    let mut gapped_fragment = Vec::with_capacity(m + n);
    let mut i = best_i;
    let mut j = best_j;
    let mut state = State::Diag;

    while i > 0 && j > 0 {
        match state {
            State::Diag => {
                let cell = h[idx(i, j)];
                if cell == e[idx(i, j)] {
                    state = State::GapInFragment;
                } else if cell == f[idx(i, j)] {
                    state = State::GapInRegion;
                } else {
                    gapped_region.push(region[j - 1]);
                    gapped_fragment.push(fragment[i - 1]);
                    i -= 1;
                    j -= 1;
                }
            }
            State::GapInFragment => {
                gapped_region.push(region[j - 1]);
                gapped_fragment.push(b'-');
                let stay = e[idx(i, j)] == e[idx(i, j - 1)] + gap_extend;
                j -= 1;
                if !stay {
                    state = State::Diag;
                }
            }
            State::GapInRegion => {
                gapped_region.push(b'-');
                gapped_fragment.push(fragment[i - 1]);
                let stay = f[idx(i, j)] == f[idx(i - 1, j)] + gap_extend;
                i -= 1;
                if !stay {
                    state = State::Diag;
                }
            }
        }
    }

    gapped_region.reverse();
    gapped_fragment.reverse();

    Ok(LocalAlignment {
        gapped_region,
        gapped_fragment,
        region_start: j,
        fragment_start: i,
        score: best_score,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strip_gaps(s: &[u8]) -> Vec<u8> {
        s.iter().copied().filter(|&c| c != b'-').collect()
    }

    #[test]
    fn test_exact_substring() {
        let region = b"TTTTACGTACGTTTT";
        let fragment = b"ACGTACG";
        let aln = align_free_ends(region, fragment, &ScoringMatrix::dna_default()).unwrap();
        assert_eq!(aln.region_start, 4);
        assert_eq!(aln.fragment_start, 0);
        assert_eq!(aln.gapped_fragment, b"ACGTACG");
        assert_eq!(aln.gapped_region, b"ACGTACG");
        assert_eq!(aln.score, 7 * 2);
    }

    #[test]
    fn test_mismatch_in_middle() {
        let region = b"GGACGTACGTGG";
        let fragment = b"ACGAACGT";
        let aln = align_free_ends(region, fragment, &ScoringMatrix::dna_default()).unwrap();
        assert_eq!(aln.region_start, 2);
        assert_eq!(strip_gaps(&aln.gapped_fragment), fragment);
        // 7 matches, 1 mismatch
        assert_eq!(aln.score, 7 * 2 - 1);
    }

    #[test]
    fn test_gap_in_fragment() {
        let region = b"ACGTTTACGT";
        let fragment = b"ACGTACGT";
        let aln = align_free_ends(region, fragment, &ScoringMatrix::dna_default()).unwrap();
        assert_eq!(strip_gaps(&aln.gapped_fragment), fragment);
        assert_eq!(strip_gaps(&aln.gapped_region), region);
        assert_eq!(
            aln.gapped_fragment.iter().filter(|&&c| c == b'-').count(),
            2
        );
    }

    #[test]
    fn test_no_gap_vs_gap_columns() {
        let region = b"ACGTATTACGGA";
        let fragment = b"CGTACGG";
        let aln = align_free_ends(region, fragment, &ScoringMatrix::dna_default()).unwrap();
        assert!(!aln
            .gapped_region
            .iter()
            .zip(&aln.gapped_fragment)
            .any(|(&r, &f)| r == b'-' && f == b'-'));
    }

    #[test]
    fn test_empty_input() {
        let m = ScoringMatrix::dna_default();
        assert!(matches!(
            align_free_ends(b"", b"ACGT", &m),
            Err(AlignError::EmptyInput)
        ));
        assert!(matches!(
            align_free_ends(b"ACGT", b"", &m),
            Err(AlignError::EmptyInput)
        ));
    }
}
