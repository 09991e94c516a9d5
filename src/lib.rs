//! # contam-check
//!
//! A library for quantifying contamination in assemblies of sequenced DNA
//! fragments, aimed at ancient-DNA work where a likely contaminant (say, a
//! modern human mitochondrion in a Neanderthal assembly) is known up front.
//!
//! The approach: align the candidate contaminant against the assembly
//! consensus, collect every *diagnostic position* where the two disagree,
//! then realign each fragment against the contaminant over the range it
//! covers. At each diagnostic position the fragment's base is checked for
//! consistency with either side; the votes classify the fragment as clean,
//! contaminant, conflicting, or nonsensical. The clean/contaminant counts
//! yield a contamination-rate estimate with a Wilson score interval.
//!
//! ## Example
//!
//! ```rust
//! use contam_check::align::myers::{self, Mode};
//! use contam_check::classify::{DiagnosticPositions, IndexOptions};
//!
//! // Align the contaminant reference against the assembly consensus...
//! let aln = myers::align(b"ACGTAGGT", b"ACGTAAGT", Mode::Global, 10).unwrap();
//! assert_eq!(aln.distance, 1);
//!
//! // ...and index the positions where they disagree.
//! let positions =
//!     DiagnosticPositions::build(&aln.gapped_a, &aln.gapped_b, &IndexOptions::default());
//! assert_eq!(positions.len(), 1);
//! ```
//!
//! ## Modules
//!
//! - [`core`]: sequence symbols, fragments, classifications
//! - [`align`]: the bounded edit-distance aligner and the fragment realigner
//! - [`classify`]: diagnostic positions, per-fragment voting, pair merging,
//!   run summary
//! - [`parsing`]: FASTA and maln file readers
//! - [`cli`]: command-line interface implementation

pub mod align;
pub mod classify;
pub mod cli;
pub mod core;
pub mod parsing;
