//! Diagnostic positions: assembly coordinates where the two references
//! disagree.
//!
//! Built from the global reference-vs-assembly alignment by walking both
//! gapped sequences in lock-step. The index is an ordered map keyed by
//! assembly coordinate (gap-compressed), which makes overlap queries a pair
//! of `BTreeMap` range bounds.

use std::collections::BTreeMap;
use std::ops::Bound;

use crate::core::dna;
use crate::core::Span;

/// Policy for which disagreeing columns count as diagnostic.
#[derive(Debug, Clone, Copy)]
pub struct IndexOptions {
    /// Only purine<->pyrimidine substitutions are diagnostic.
    pub transversions_only: bool,
    /// Count columns involving `N`. Off by default: in practice Ns produce
    /// noise and little in the way of usable results.
    pub include_n: bool,
    /// Restrict the index to this assembly-coordinate span.
    pub span: Span,
}

impl Default for IndexOptions {
    fn default() -> Self {
        Self {
            transversions_only: false,
            include_n: false,
            span: Span::all(),
        }
    }
}

/// A column where both references show a real base and the bases differ.
/// Gaps never qualify; Ns only under [`IndexOptions::include_n`].
#[must_use]
pub fn is_diagnostic(ref_base: u8, asm_base: u8, include_n: bool) -> bool {
    ref_base != asm_base
        && ref_base != b'-'
        && asm_base != b'-'
        && (include_n
            || (ref_base.to_ascii_uppercase() != b'N' && asm_base.to_ascii_uppercase() != b'N'))
}

/// Ordered map: assembly coordinate -> (reference base, assembly base).
#[derive(Debug, Clone, Default)]
pub struct DiagnosticPositions {
    map: BTreeMap<usize, (u8, u8)>,
}

impl DiagnosticPositions {
    /// Walk the gapped reference/assembly pair and collect diagnostic
    /// columns, keyed by the gap-compressed assembly coordinate.
    ///
    /// Stops early once the coordinate counter leaves the span or either
    /// sequence is exhausted.
    #[must_use]
    pub fn build(gapped_ref: &[u8], gapped_asm: &[u8], opts: &IndexOptions) -> Self {
        let mut map = BTreeMap::new();
        let mut coord = 0usize;

        for (&r, &s) in gapped_ref.iter().zip(gapped_asm) {
            if coord >= opts.span.to {
                break;
            }
            if opts.span.contains(coord)
                && is_diagnostic(r, s, opts.include_n)
                && (!opts.transversions_only || dna::is_transversion(r, s))
            {
                map.insert(coord, (r, s));
            }
            if s != b'-' {
                coord += 1;
            }
        }

        Self { map }
    }

    /// Diagnostic positions overlapping the inclusive coordinate range
    /// `[start, end]`, in increasing order.
    pub fn overlapping(
        &self,
        start: usize,
        end: usize,
    ) -> impl Iterator<Item = (usize, (u8, u8))> + '_ {
        self.map
            .range((Bound::Included(start), Bound::Included(end)))
            .map(|(&coord, &bases)| (coord, bases))
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, (u8, u8))> + '_ {
        self.map.iter().map(|(&coord, &bases)| (coord, bases))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// How many of the indexed positions are transversions.
    #[must_use]
    pub fn transversion_count(&self) -> usize {
        self.map
            .values()
            .filter(|&&(r, s)| dna::is_transversion(r, s))
            .count()
    }
}
