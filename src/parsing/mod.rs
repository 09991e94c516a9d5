//! Parsers for the two input files.
//!
//! - **FASTA files**: the candidate-contaminant reference sequence, read
//!   with noodles; gzip compression is detected from the extension.
//! - **maln files**: the assembly container with its consensus sequence,
//!   optional scoring overrides, and the per-fragment alignment records.

pub mod fasta;
pub mod maln;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("noodles error: {0}")]
    Noodles(String),

    #[error("invalid format: {0}")]
    InvalidFormat(String),

    #[error("invalid record at line {line}: {message}")]
    InvalidRecord { line: usize, message: String },
}

pub use fasta::ReferenceSequence;
pub use maln::MalnAssembly;
