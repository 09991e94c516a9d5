//! Core data types for contamination classification.
//!
//! This module provides the fundamental types used throughout the library:
//!
//! - [`dna`]: IUPAC bitmask matching, ancient-DNA-aware consistency,
//!   transversion test
//! - [`Fragment`], [`SegmentRole`]: an assembled fragment and its pairing tag
//! - [`Classification`]: the per-fragment verdict and its merge rule
//! - [`Span`]: the assembly-coordinate restriction from `--span`
//!
//! ## Coordinates
//!
//! All coordinates are 0-based offsets into the *assembly consensus* with
//! gaps compressed away. Fragment `start`/`end` are inclusive; spans are
//! half-open. The command line speaks 1-based inclusive, converted at parse
//! time.

pub mod dna;
pub mod fragment;
pub mod types;

pub use fragment::{Fragment, SegmentRole};
pub use types::{Classification, Span};
