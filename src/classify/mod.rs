//! The fragment-classification pipeline.
//!
//! Consumes the global reference-vs-assembly alignment produced by
//! [`crate::align::myers`] and turns it into per-fragment verdicts and a
//! run-level contamination estimate:
//!
//! 1. [`diagnostic`] indexes the columns where the two references disagree.
//! 2. [`liftover`] maps assembly coordinate ranges into the reference frame.
//! 3. [`fragment`] realigns each fragment and votes per diagnostic column.
//! 4. [`pairing`] merges the two halves of paired fragments.
//! 5. [`summary`] tallies verdicts and estimates the contamination rate.

pub mod diagnostic;
pub mod fragment;
pub mod liftover;
pub mod pairing;
pub mod summary;

pub use diagnostic::{DiagnosticPositions, IndexOptions};
pub use fragment::{FragmentClassifier, FragmentReport};
pub use pairing::{PairMerger, Resolution, Tally};
pub use summary::{ContaminationEstimate, Summary};
