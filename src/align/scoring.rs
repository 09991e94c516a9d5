//! Substitution scoring for the fragment realigner.

use thiserror::Error;

use crate::core::dna;

#[derive(Error, Debug)]
#[error("invalid scoring parameters: {0}")]
pub struct InvalidScoring(String);

/// Match/mismatch scoring with affine gap penalties.
///
/// Matching is IUPAC-aware: two symbols whose bitmasks intersect score as a
/// match, so ambiguity codes in the lifted reference region do not penalise
/// a fragment. A maln file may override the defaults with a `#score` line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoringMatrix {
    pub match_score: i32,
    pub mismatch_score: i32,
    pub gap_open: i32,
    pub gap_extend: i32,
}

impl ScoringMatrix {
    /// Create a scoring matrix.
    ///
    /// # Errors
    ///
    /// Returns an error unless `match_score` is positive and the penalty
    /// parameters are negative.
    pub fn new(
        match_score: i32,
        mismatch_score: i32,
        gap_open: i32,
        gap_extend: i32,
    ) -> Result<Self, InvalidScoring> {
        if match_score <= 0 {
            return Err(InvalidScoring("match score must be positive".into()));
        }
        if mismatch_score >= 0 {
            return Err(InvalidScoring("mismatch score must be negative".into()));
        }
        if gap_open >= 0 || gap_extend >= 0 {
            return Err(InvalidScoring("gap penalties must be negative".into()));
        }
        Ok(Self {
            match_score,
            mismatch_score,
            gap_open,
            gap_extend,
        })
    }

    /// Default nucleotide scoring: +2 match, -1 mismatch, -5 gap open,
    /// -2 gap extend.
    #[must_use]
    pub fn dna_default() -> Self {
        Self {
            match_score: 2,
            mismatch_score: -1,
            gap_open: -5,
            gap_extend: -2,
        }
    }

    /// Score a pair of symbols.
    #[must_use]
    pub fn score_pair(&self, a: u8, b: u8) -> i32 {
        if dna::matches(a, b) {
            self.match_score
        } else {
            self.mismatch_score
        }
    }
}

impl Default for ScoringMatrix {
    fn default() -> Self {
        Self::dna_default()
    }
}
