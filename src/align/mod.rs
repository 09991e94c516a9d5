//! Pairwise alignment engines.
//!
//! Two aligners with very different jobs:
//!
//! - [`myers`]: a bounded O(nd) edit-distance aligner for two long, *similar*
//!   sequences (the contaminant reference against the assembly consensus).
//!   Matching is IUPAC-bitmask aware, so ambiguity codes align cleanly.
//! - [`semi_global`]: a substitution-matrix dynamic-programming aligner with
//!   free terminal gaps on both sides, used to realign each short fragment
//!   against its lifted reference region.
//!
//! Both return gapped sequence pairs; removing the gaps reproduces the
//! inputs, and no column is ever gap-vs-gap.

pub mod myers;
pub mod scoring;
pub mod semi_global;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AlignError {
    /// The true edit distance exceeds the caller's budget. Not proof the
    /// sequences are unrelated; retry with a larger budget.
    #[error("edit distance exceeds the budget of {0} differences")]
    BudgetExceeded(usize),

    /// The requested budget would need more scratch memory than allowed.
    #[error("edit budget of {0} requires too large a scratch table")]
    BudgetTooLarge(usize),

    #[error("sequences must not be empty")]
    EmptyInput,
}

pub use myers::{EditAlignment, Mode};
pub use scoring::ScoringMatrix;
pub use semi_global::LocalAlignment;
