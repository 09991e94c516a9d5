//! Merging the two halves of paired fragments.
//!
//! Back halves arrive before their front halves and are cached by fragment
//! identifier; the front half picks its partner up, merges the two verdicts
//! and sums the votes. Whole fragments pass straight through.

use std::collections::HashMap;

use crate::core::{Classification, SegmentRole};

/// A pair-merged verdict ready for the summary tally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tally {
    pub classification: Classification,
    pub votes: usize,
}

/// What became of one fragment's verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// A back half, cached until its front arrives.
    Deferred,
    /// A final verdict for the tally.
    Final(Tally),
    /// A front half whose back was never seen; tallied on its own.
    MissingPair(Tally),
}

/// Caches back halves awaiting their fronts.
#[derive(Debug, Default)]
pub struct PairMerger {
    pending: HashMap<String, Tally>,
}

impl PairMerger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one fragment's verdict through the pairing cache.
    pub fn resolve(
        &mut self,
        id: &str,
        role: SegmentRole,
        classification: Classification,
        votes: usize,
    ) -> Resolution {
        let own = Tally {
            classification,
            votes,
        };
        match role {
            SegmentRole::Back => {
                self.pending.insert(id.to_string(), own);
                Resolution::Deferred
            }
            SegmentRole::Front => match self.pending.remove(id) {
                Some(back) => Resolution::Final(Tally {
                    classification: classification.merge(back.classification),
                    votes: votes + back.votes,
                }),
                None => Resolution::MissingPair(own),
            },
            SegmentRole::Whole => Resolution::Final(own),
        }
    }

    /// Back halves still waiting for a front.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }
}
