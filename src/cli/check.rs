//! The contamination check pipeline.

use anyhow::Context;
use serde::Serialize;
use tracing::{debug, warn};

use crate::align::myers::{self, Mode};
use crate::align::EditAlignment;
use crate::classify::fragment::{ColumnOutcome, FragmentReport};
use crate::classify::{
    DiagnosticPositions, FragmentClassifier, IndexOptions, PairMerger, Resolution, Summary, Tally,
};
use crate::cli::{Cli, OutputFormat};
use crate::core::{Classification, Fragment, Span};
use crate::parsing;

/// Width of one block of the verbose alignment dump.
const ALN_BLOCK_WIDTH: usize = 72;

/// One fragment's final, pair-merged verdict.
#[derive(Debug, Serialize)]
struct FragmentRow {
    id: String,
    classification: Classification,
    votes: usize,
}

/// Full machine-readable run report.
#[derive(Serialize)]
struct RunReport<'a> {
    reference: &'a str,
    assembly: &'a str,
    distance: usize,
    diagnostic_positions: usize,
    transversions: usize,
    fragments: &'a [FragmentRow],
    summary: &'a Summary,
    contamination: Option<crate::classify::ContaminationEstimate>,
}

/// Execute the check.
///
/// # Errors
///
/// Returns an error if either input cannot be read or the references cannot
/// be aligned within the edit budget.
pub fn run(cli: &Cli) -> anyhow::Result<()> {
    let verbose = cli.verbose;

    let reference = parsing::fasta::read_reference(&cli.reference)
        .with_context(|| format!("reading reference '{}'", cli.reference.display()))?;
    let maln = parsing::maln::read_maln(&cli.maln)
        .with_context(|| format!("reading maln file '{}'", cli.maln.display()))?;

    debug!(
        reference = %reference.id,
        assembly = %maln.id,
        fragments = maln.fragments.len(),
        "inputs loaded"
    );

    let global = myers::align(
        &reference.sequence,
        &maln.consensus,
        Mode::Global,
        cli.maxd,
    )
    .context("couldn't align references (try to increase --maxd)")?;

    if verbose >= 1 {
        println!(
            "{} total differences between reference and assembly.",
            global.distance
        );
    }
    if verbose >= 6 {
        print_alignment(&global.gapped_a, &global.gapped_b);
    }

    let positions = DiagnosticPositions::build(
        &global.gapped_a,
        &global.gapped_b,
        &IndexOptions {
            transversions_only: cli.transversions,
            include_n: cli.include_n,
            span: cli.span.unwrap_or_else(Span::all),
        },
    );

    if verbose >= 1 {
        println!(
            "{} diagnostic positions, {} of which are transversions.",
            positions.len(),
            positions.transversion_count()
        );
    }
    if verbose >= 3 {
        println!("{}", format_position_list(positions.iter()));
    }

    let classifier = FragmentClassifier::new(
        &positions,
        &global.gapped_a,
        &global.gapped_b,
        maln.scoring,
        cli.ancient,
        cli.include_n,
    );

    let mut merger = PairMerger::new();
    let mut summary = Summary::new();
    let mut rows = Vec::new();

    for fragment in &maln.fragments {
        if fragment.end >= maln.consensus.len() {
            warn!(
                id = %fragment.id,
                end = fragment.end,
                "fragment extends past the consensus, skipping"
            );
            continue;
        }
        let Some(role) = fragment.role() else {
            warn!(
                id = %fragment.id,
                tag = %fragment.segment,
                "don't know how to handle fragment type"
            );
            continue;
        };

        let report = classifier.classify(fragment);
        if verbose >= 3 {
            print_fragment_detail(fragment, &report, &maln.consensus, verbose);
        }

        let resolution = merger.resolve(&fragment.id, role, report.verdict, report.votes);
        let tally = match resolution {
            Resolution::Deferred => continue,
            Resolution::Final(tally) => tally,
            Resolution::MissingPair(tally) => {
                warn!(id = %fragment.id, "front half is missing its back");
                tally
            }
        };

        if verbose >= 2 {
            println!(
                "{} is {} ({} votes)",
                fragment.id, tally.classification, tally.votes
            );
        }
        record(&mut summary, &mut rows, &fragment.id, tally);
    }

    if merger.pending_count() > 0 {
        debug!(
            count = merger.pending_count(),
            "back halves never saw a front"
        );
    }

    match cli.format {
        OutputFormat::Text => print_text_summary(&summary),
        OutputFormat::Json => print_json_report(&reference.id, &maln.id, &global, &positions, &rows, &summary)?,
        OutputFormat::Tsv => print_tsv_report(&rows, &summary),
    }

    Ok(())
}

fn record(summary: &mut Summary, rows: &mut Vec<FragmentRow>, id: &str, tally: Tally) {
    summary.record(tally.classification);
    rows.push(FragmentRow {
        id: id.to_string(),
        classification: tally.classification,
        votes: tally.votes,
    });
}

fn format_position_list<'a>(
    positions: impl Iterator<Item = (usize, (u8, u8))> + 'a,
) -> String {
    positions
        .map(|(coord, (r, s))| format!("<{coord}:{},{}>", r as char, s as char))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Per-fragment verbose reporting, levels 3 to 5.
fn print_fragment_detail(
    fragment: &Fragment,
    report: &FragmentReport,
    consensus: &[u8],
    verbose: u8,
) {
    if report.overlapping.is_empty() {
        println!("{}/{}: no diagnostic positions", fragment.id, fragment.segment);
        return;
    }

    print!(
        "{}/{}: {} diagnostic positions",
        fragment.id,
        fragment.segment,
        report.overlapping.len()
    );
    if verbose >= 4 {
        print!(": {}", format_position_list(report.overlapping.iter().copied()));
    }
    println!();
    println!("range:  {}..{}", fragment.start, fragment.end);

    if verbose >= 5 {
        if let Some(detail) = &report.detail {
            let region = &consensus[fragment.start..=fragment.end];
            println!("raw read: {}", String::from_utf8_lossy(&detail.read));
            println!("lifted:   {}", String::from_utf8_lossy(&detail.lifted));
            println!("assembly: {}", String::from_utf8_lossy(region));
            println!();
            println!("aln.read: {}", String::from_utf8_lossy(&fragment.seq));
            println!("aln.assm: {}", String::from_utf8_lossy(region));
            println!("matches:  {}", match_line(&fragment.seq, region));
            println!();
            println!(
                "aln.read: {}",
                String::from_utf8_lossy(&detail.local.gapped_fragment)
            );
            println!(
                "aln.ref:  {}",
                String::from_utf8_lossy(&detail.local.gapped_region)
            );
            println!(
                "matches:  {}",
                match_line(&detail.local.gapped_fragment, &detail.local.gapped_region)
            );
            println!();
        }
    }

    if verbose >= 4 {
        for column in &report.columns {
            print!(
                "diagnostic pos.: {} {}/{} {}/{} ",
                column.coord,
                column.ref_base as char,
                column.frag_vs_ref as char,
                column.asm_base as char,
                column.frag_vs_asm as char
            );
            match column.outcome {
                ColumnOutcome::Disagreement => println!("in disagreement."),
                ColumnOutcome::Scored {
                    maybe_clean,
                    maybe_dirt,
                } => println!(
                    "{}consistent/{}consistent",
                    if maybe_dirt { "" } else { "in" },
                    if maybe_clean { "" } else { "in" }
                ),
            }
        }
    }
}

fn match_line(a: &[u8], b: &[u8]) -> String {
    a.iter()
        .zip(b)
        .map(|(&x, &y)| if x.eq_ignore_ascii_case(&y) { '*' } else { ' ' })
        .collect()
}

/// Dump a pairwise alignment in fixed-width blocks with a match line.
fn print_alignment(gapped_a: &[u8], gapped_b: &[u8]) {
    let len = gapped_a.len().min(gapped_b.len());
    for offset in (0..len).step_by(ALN_BLOCK_WIDTH) {
        let end = (offset + ALN_BLOCK_WIDTH).min(len);
        let a = &gapped_a[offset..end];
        let b = &gapped_b[offset..end];
        println!("ref:  {}", String::from_utf8_lossy(a));
        println!("asm:  {}", String::from_utf8_lossy(b));
        println!("      {}", match_line(a, b));
        println!();
    }
}

fn print_text_summary(summary: &Summary) {
    println!("\nSummary:");
    for classification in Classification::ALL {
        print!(
            "{:<12} fragments: {}",
            classification.to_string(),
            summary.count(classification)
        );
        if classification == Classification::Contaminant {
            if let Some(ci) = summary.contamination() {
                print!(
                    " ({:.1} .. {:.1} .. {:.1}%)",
                    ci.lower, ci.estimate, ci.upper
                );
            }
        }
        println!();
    }
}

fn print_json_report(
    reference: &str,
    assembly: &str,
    global: &EditAlignment,
    positions: &DiagnosticPositions,
    rows: &[FragmentRow],
    summary: &Summary,
) -> anyhow::Result<()> {
    let report = RunReport {
        reference,
        assembly,
        distance: global.distance,
        diagnostic_positions: positions.len(),
        transversions: positions.transversion_count(),
        fragments: rows,
        summary,
        contamination: summary.contamination(),
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn print_tsv_report(rows: &[FragmentRow], summary: &Summary) {
    println!("id\tclassification\tvotes");
    for row in rows {
        println!("{}\t{}\t{}", row.id, row.classification, row.votes);
    }
    if let Some(ci) = summary.contamination() {
        eprintln!(
            "contamination: {:.1} .. {:.1} .. {:.1}%",
            ci.lower, ci.estimate, ci.upper
        );
    }
}
