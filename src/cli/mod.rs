//! Command-line interface for contam-check.
//!
//! A single flat command: read a maln assembly, align the candidate
//! contaminant against its consensus, and classify every fragment.
//!
//! ## Usage
//!
//! ```text
//! # Quantify contamination with the default reference
//! contam-check sample.maln
//!
//! # Ancient material, transversions only
//! contam-check -a -t -r neanderthal_mt.fna sample.maln
//!
//! # Restrict to a coordinate range, JSON output for scripting
//! contam-check -s 1000-5000 --format json sample.maln
//! ```

use std::path::PathBuf;

use clap::{ArgAction, Parser};

use crate::core::Span;

pub mod check;

#[derive(Parser)]
#[command(name = "contam-check")]
#[command(version)]
#[command(about = "Quantify contamination in an assembly of sequenced fragments")]
#[command(
    long_about = "contam-check reads a maln assembly and estimates how many of its fragments \
stem from a contaminating source.\n\nThe candidate contaminant is aligned against the assembly \
consensus; every position where the two disagree is diagnostic. Each fragment is then realigned \
against the contaminant at the positions it covers and votes for the side it is consistent with."
)]
pub struct Cli {
    /// FASTA file with the likely contaminant
    #[arg(short, long, default_value = "mt311.fna", value_name = "FILE")]
    pub reference: PathBuf,

    /// Treat DNA as ancient (i.e. likely deaminated)
    #[arg(short, long)]
    pub ancient: bool,

    /// Only transversions are diagnostic
    #[arg(short, long)]
    pub transversions: bool,

    /// Only look at the range from M to N (1-based, inclusive)
    #[arg(short, long, value_name = "M-N")]
    pub span: Option<Span>,

    /// Allow up to D differences between the references
    #[arg(short = 'd', long, default_value_t = 1000, value_name = "D")]
    pub maxd: usize,

    /// Count positions involving N as diagnostic
    #[arg(long)]
    pub include_n: bool,

    /// Increase verbosity (can be repeated, up to -vvvvvv)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,

    /// maln file with the assembly and its fragments
    #[arg(required = true)]
    pub maln: PathBuf,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}
