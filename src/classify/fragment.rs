//! Per-fragment classification against the diagnostic positions.
//!
//! Each fragment is judged independently: lift the contaminant-reference
//! region covering the fragment over to assembly coordinates, realign the
//! fragment's gap-free read against it, then vote at every diagnostic
//! column the fragment spans. The two local alignments (fragment vs
//! assembly from the maln file, fragment vs lifted reference computed here)
//! must agree on the fragment's base at a column for it to count; a
//! disagreement is treated as alignment noise, never as evidence.

use tracing::debug;

use crate::align::semi_global::align_free_ends;
use crate::align::{LocalAlignment, ScoringMatrix};
use crate::classify::diagnostic::{is_diagnostic, DiagnosticPositions};
use crate::classify::liftover::liftover;
use crate::core::dna;
use crate::core::{Classification, Fragment};

/// What happened at one diagnostic column of a fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnOutcome {
    /// The two local alignments disagree on the fragment's base; no vote.
    Disagreement,
    /// The column was scored against both references.
    Scored { maybe_clean: bool, maybe_dirt: bool },
}

/// One diagnostic column the fragment was walked over, for reporting.
#[derive(Debug, Clone, Copy)]
pub struct ColumnReport {
    pub coord: usize,
    pub ref_base: u8,
    pub frag_vs_ref: u8,
    pub asm_base: u8,
    pub frag_vs_asm: u8,
    pub outcome: ColumnOutcome,
}

/// Result of classifying one fragment.
#[derive(Debug, Clone)]
pub struct FragmentReport {
    pub verdict: Classification,
    /// Columns where exactly one reference was consistent with the read.
    pub votes: usize,
    /// Diagnostic positions overlapping the fragment's range.
    pub overlapping: Vec<(usize, (u8, u8))>,
    pub columns: Vec<ColumnReport>,
    /// The realignment inputs and result, when one was computed.
    pub detail: Option<RealignmentDetail>,
}

/// Intermediate sequences kept for verbose reporting.
#[derive(Debug, Clone)]
pub struct RealignmentDetail {
    /// The fragment's gap-free read.
    pub read: Vec<u8>,
    /// The reference region lifted over the fragment's coordinate range.
    pub lifted: Vec<u8>,
    pub local: LocalAlignment,
}

impl FragmentReport {
    fn trivial(overlapping: Vec<(usize, (u8, u8))>) -> Self {
        Self {
            verdict: Classification::Unclassified,
            votes: 0,
            overlapping,
            columns: Vec::new(),
            detail: None,
        }
    }
}

/// Classifies fragments against one reference-vs-assembly alignment.
pub struct FragmentClassifier<'a> {
    positions: &'a DiagnosticPositions,
    gapped_ref: &'a [u8],
    gapped_asm: &'a [u8],
    scoring: ScoringMatrix,
    adna: bool,
    include_n: bool,
}

impl<'a> FragmentClassifier<'a> {
    pub fn new(
        positions: &'a DiagnosticPositions,
        gapped_ref: &'a [u8],
        gapped_asm: &'a [u8],
        scoring: ScoringMatrix,
        adna: bool,
        include_n: bool,
    ) -> Self {
        Self {
            positions,
            gapped_ref,
            gapped_asm,
            scoring,
            adna,
            include_n,
        }
    }

    /// Classify one fragment and return its verdict with full column detail.
    #[must_use]
    pub fn classify(&self, fragment: &Fragment) -> FragmentReport {
        let overlapping: Vec<_> = self
            .positions
            .overlapping(fragment.start, fragment.end)
            .collect();
        if overlapping.is_empty() {
            return FragmentReport::trivial(overlapping);
        }

        let read = fragment.read_sequence();
        let lifted = liftover(
            self.gapped_ref,
            self.gapped_asm,
            fragment.start,
            fragment.end + 1,
        );

        let local = match align_free_ends(&lifted, &read, &self.scoring) {
            Ok(local) => local,
            Err(err) => {
                debug!(id = %fragment.id, %err, "fragment realignment skipped");
                return FragmentReport::trivial(overlapping);
            }
        };

        // Region offset -> fragment base, from the realignment. Offsets the
        // aligned part does not reach keep the gap symbol.
        let mut region_to_frag = vec![b'-'; lifted.len()];
        let mut r = local.region_start;
        for (&reg, &frg) in local.gapped_region.iter().zip(&local.gapped_fragment) {
            if reg != b'-' {
                region_to_frag[r] = frg;
                r += 1;
            }
        }

        // Walk the global alignment over the fragment's coordinate range,
        // tracking the assembly coordinate and the offset into the lifted
        // region in lock-step.
        let mut verdict = Classification::Unclassified;
        let mut votes = 0usize;
        let mut columns = Vec::new();

        let n = self.gapped_ref.len().min(self.gapped_asm.len());
        let mut col = 0usize;
        let mut coord = 0usize;
        while col < n && coord != fragment.start {
            if self.gapped_asm[col] != b'-' {
                coord += 1;
            }
            col += 1;
        }

        let mut region_off = 0usize;
        while col < n && coord <= fragment.end {
            let ref_base = self.gapped_ref[col];
            let asm_base = self.gapped_asm[col];

            if is_diagnostic(ref_base, asm_base, self.include_n) {
                let frag_vs_ref = region_to_frag.get(region_off).copied().unwrap_or(b'-');
                let frag_vs_asm = fragment.base_at(coord).unwrap_or(b'-');

                let outcome =
                    if frag_vs_ref.to_ascii_uppercase() != frag_vs_asm.to_ascii_uppercase() {
                        ColumnOutcome::Disagreement
                    } else {
                        let maybe_clean = dna::consistent(self.adna, asm_base, frag_vs_asm);
                        let maybe_dirt = dna::consistent(self.adna, ref_base, frag_vs_ref);
                        verdict = step(verdict, maybe_clean, maybe_dirt);
                        if maybe_clean != maybe_dirt {
                            votes += 1;
                        }
                        ColumnOutcome::Scored {
                            maybe_clean,
                            maybe_dirt,
                        }
                    };

                columns.push(ColumnReport {
                    coord,
                    ref_base,
                    frag_vs_ref,
                    asm_base,
                    frag_vs_asm,
                    outcome,
                });
            }

            if ref_base != b'-' {
                region_off += 1;
            }
            if asm_base != b'-' {
                coord += 1;
            }
            col += 1;
        }

        FragmentReport {
            verdict,
            votes,
            overlapping,
            columns,
            detail: Some(RealignmentDetail {
                read,
                lifted,
                local,
            }),
        }
    }
}

/// One step of the per-column state machine.
fn step(state: Classification, maybe_clean: bool, maybe_dirt: bool) -> Classification {
    use Classification::*;
    match (maybe_clean, maybe_dirt) {
        // Inconsistent with both references.
        (false, false) => Nonsensical,
        // Consistent with both: uninformative.
        (true, true) => state,
        (true, false) => match state {
            Unclassified => Clean,
            Contaminant => Conflicting,
            other => other,
        },
        (false, true) => match state {
            Unclassified => Contaminant,
            Clean => Conflicting,
            other => other,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::diagnostic::IndexOptions;

    fn classifier_fixture<'a>(
        positions: &'a DiagnosticPositions,
        gapped_ref: &'a [u8],
        gapped_asm: &'a [u8],
        adna: bool,
    ) -> FragmentClassifier<'a> {
        FragmentClassifier::new(
            positions,
            gapped_ref,
            gapped_asm,
            ScoringMatrix::dna_default(),
            adna,
            false,
        )
    }

    fn whole_fragment(start: usize, seq: &str) -> Fragment {
        Fragment {
            id: "frag1".to_string(),
            segment: 'a',
            start,
            end: start + seq.len() - 1,
            seq: seq.as_bytes().to_vec(),
            insertions: Vec::new(),
        }
    }

    #[test]
    fn test_state_machine_table() {
        use Classification::*;
        assert_eq!(step(Unclassified, true, false), Clean);
        assert_eq!(step(Unclassified, false, true), Contaminant);
        assert_eq!(step(Unclassified, false, false), Nonsensical);
        assert_eq!(step(Unclassified, true, true), Unclassified);
        assert_eq!(step(Clean, false, true), Conflicting);
        assert_eq!(step(Contaminant, true, false), Conflicting);
        assert_eq!(step(Clean, true, false), Clean);
        assert_eq!(step(Conflicting, true, false), Conflicting);
        assert_eq!(step(Nonsensical, true, false), Nonsensical);
        for state in Classification::ALL {
            assert_eq!(step(state, false, false), Nonsensical);
        }
    }

    #[test]
    fn test_identical_references_all_unclassified() {
        let gapped = b"ACGTACGTACGT";
        let positions = DiagnosticPositions::build(gapped, gapped, &IndexOptions::default());
        let cls = classifier_fixture(&positions, gapped, gapped, false);
        let report = cls.classify(&whole_fragment(2, "GTACG"));
        assert_eq!(report.verdict, Classification::Unclassified);
        assert_eq!(report.votes, 0);
        assert!(report.detail.is_none());
    }

    #[test]
    fn test_fragment_matching_assembly_is_clean() {
        // One diagnostic transition column at coordinate 5 (G in the
        // reference, A in the assembly).
        let gapped_ref = b"ACGTAGGTACGT";
        let gapped_asm = b"ACGTAAGTACGT";
        let positions =
            DiagnosticPositions::build(gapped_ref, gapped_asm, &IndexOptions::default());
        assert_eq!(positions.len(), 1);

        let cls = classifier_fixture(&positions, gapped_ref, gapped_asm, false);
        let report = cls.classify(&whole_fragment(2, "GTAAGTAC"));
        assert_eq!(report.verdict, Classification::Clean);
        assert_eq!(report.votes, 1);
    }

    #[test]
    fn test_fragment_matching_reference_is_contaminant() {
        let gapped_ref = b"ACGTAGGTACGT";
        let gapped_asm = b"ACGTAAGTACGT";
        let positions =
            DiagnosticPositions::build(gapped_ref, gapped_asm, &IndexOptions::default());

        let cls = classifier_fixture(&positions, gapped_ref, gapped_asm, false);
        // The fragment carries G at the diagnostic coordinate, and its
        // maln alignment against the assembly recorded that same G.
        let report = cls.classify(&whole_fragment(2, "GTAGGTAC"));
        assert_eq!(report.verdict, Classification::Contaminant);
        assert_eq!(report.votes, 1);
    }

    #[test]
    fn test_conflicting_fragment() {
        // Two diagnostic columns; the fragment sides with the assembly at
        // the first and with the reference at the second.
        let gapped_ref = b"AAGTAAAATTTT";
        let gapped_asm = b"AATTAAAACTTT";
        let positions =
            DiagnosticPositions::build(gapped_ref, gapped_asm, &IndexOptions::default());
        assert_eq!(positions.len(), 2);

        let cls = classifier_fixture(&positions, gapped_ref, gapped_asm, false);
        let report = cls.classify(&whole_fragment(0, "AATTAAAATTTT"));
        assert_eq!(report.verdict, Classification::Conflicting);
        assert_eq!(report.votes, 2);
    }

    #[test]
    fn test_nonsensical_fragment() {
        // Diagnostic column G/A; the fragment shows T, consistent with
        // neither reference.
        let gapped_ref = b"ACGTAGGTACGT";
        let gapped_asm = b"ACGTAAGTACGT";
        let positions =
            DiagnosticPositions::build(gapped_ref, gapped_asm, &IndexOptions::default());

        let cls = classifier_fixture(&positions, gapped_ref, gapped_asm, false);
        let report = cls.classify(&whole_fragment(2, "GTATGTAC"));
        assert_eq!(report.verdict, Classification::Nonsensical);
        // Consistent with neither side: no direction, no vote.
        assert_eq!(report.votes, 0);
    }

    #[test]
    fn test_ancient_damage_rescues_deaminated_read() {
        // Reference A, assembly G at the diagnostic column. The fragment
        // shows A, which plain matching calls contaminant. Under the
        // ancient transform the assembly's G also admits A, so the column
        // is consistent with both references and votes nothing.
        let gapped_ref = b"ACGTAAGTACGT";
        let gapped_asm = b"ACGTAGGTACGT";
        let positions =
            DiagnosticPositions::build(gapped_ref, gapped_asm, &IndexOptions::default());

        let strict = classifier_fixture(&positions, gapped_ref, gapped_asm, false);
        let report = strict.classify(&whole_fragment(2, "GTAAGTAC"));
        assert_eq!(report.verdict, Classification::Contaminant);
        assert_eq!(report.votes, 1);

        let adna = classifier_fixture(&positions, gapped_ref, gapped_asm, true);
        let report = adna.classify(&whole_fragment(2, "GTAAGTAC"));
        assert_eq!(report.verdict, Classification::Unclassified);
        assert_eq!(report.votes, 0);
    }

    #[test]
    fn test_fragment_gap_at_diagnostic_column_is_uninformative() {
        let gapped_ref = b"ACGTAGGTACGT";
        let gapped_asm = b"ACGTAAGTACGT";
        let positions =
            DiagnosticPositions::build(gapped_ref, gapped_asm, &IndexOptions::default());

        let cls = classifier_fixture(&positions, gapped_ref, gapped_asm, false);
        // The fragment does not cover the diagnostic coordinate (deletion).
        let report = cls.classify(&whole_fragment(2, "GTA-GTAC"));
        assert_eq!(report.verdict, Classification::Unclassified);
        assert_eq!(report.votes, 0);
    }

    #[test]
    fn test_vote_count_equals_directional_columns() {
        let gapped_ref = b"AAGTAAAATTTT";
        let gapped_asm = b"AATTAAAACTTT";
        let positions =
            DiagnosticPositions::build(gapped_ref, gapped_asm, &IndexOptions::default());

        let cls = classifier_fixture(&positions, gapped_ref, gapped_asm, false);
        let report = cls.classify(&whole_fragment(0, "AATTAAAACTTT"));
        let directional = report
            .columns
            .iter()
            .filter(|c| {
                matches!(
                    c.outcome,
                    ColumnOutcome::Scored {
                        maybe_clean,
                        maybe_dirt
                    } if maybe_clean != maybe_dirt
                )
            })
            .count();
        assert_eq!(report.votes, directional);
    }
}
