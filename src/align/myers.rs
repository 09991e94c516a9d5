//! Bounded O(nd) edit-distance alignment (Myers' diff algorithm).
//!
//! Searches D-paths in order of increasing edit distance `d`, keeping for
//! every diagonal `k = x - y` only the furthest-reaching endpoint at each
//! `d`. Match runs are extended greedily using IUPAC bitmask equality, so
//! ambiguity codes in either sequence align without cost. The search stops
//! at the first `d` whose wave satisfies the endpoint condition for the
//! requested [`Mode`], which is therefore minimal.
//!
//! The scratch table is O(max_edits²); callers must keep the budget within
//! reason (the reference-vs-assembly run exposes it as `--maxd`).

use crate::align::AlignError;
use crate::core::dna;

/// Endpoint requirements for [`align`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Both sequences must be consumed in full.
    Global,
    /// Only `b` must be consumed in full; a prefix of `a` may suffice.
    ConsumeB,
    /// Only `a` must be consumed in full; a prefix of `b` may suffice.
    ConsumeA,
}

/// A minimal-edit global alignment of two sequences.
///
/// Invariants: both gapped sequences have equal length, removing `-` from
/// `gapped_a` yields the consumed part of input `a` (likewise for `b`), and
/// no column is gap-vs-gap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditAlignment {
    pub distance: usize,
    pub gapped_a: Vec<u8>,
    pub gapped_b: Vec<u8>,
}

/// Ceiling on scratch cells (i32 each) the wave table may occupy.
const MAX_SCRATCH_CELLS: usize = 1 << 28;

/// Cells never written by any wave; chosen so that `+ 1` cannot make one
/// win a furthest-reach comparison.
const UNSET: i32 = i32::MIN / 2;

/// Furthest-reach table over diagonals `[-maxd, maxd]` and distances
/// `[0, maxd]`, stored as a flat arena indexed by `(k + maxd, d)`.
struct Wave {
    v: Vec<i32>,
    maxd: isize,
    cols: usize,
}

impl Wave {
    fn new(maxd: usize) -> Option<Self> {
        let cols = maxd + 1;
        let cells = (2 * maxd + 1).checked_mul(cols)?;
        if cells > MAX_SCRATCH_CELLS {
            return None;
        }
        Some(Self {
            v: vec![UNSET; cells],
            maxd: maxd as isize,
            cols,
        })
    }

    #[inline]
    fn get(&self, k: isize, d: isize) -> i32 {
        self.v[(k + self.maxd) as usize * self.cols + d as usize]
    }

    #[inline]
    fn set(&mut self, k: isize, d: isize, x: i32) {
        self.v[(k + self.maxd) as usize * self.cols + d as usize] = x;
    }
}

/// Align `a` against `b` with at most `max_edits` differences.
///
/// Returns the minimal-distance alignment satisfying `mode`, or
/// [`AlignError::BudgetExceeded`] if no alignment exists within the budget.
/// The distance is minimal regardless of how generous the budget was.
///
/// # Errors
///
/// `BudgetExceeded` when the true distance is larger than `max_edits`;
/// `BudgetTooLarge` when the scratch table for `max_edits` would be
/// unreasonably large.
pub fn align(
    a: &[u8],
    b: &[u8],
    mode: Mode,
    max_edits: usize,
) -> Result<EditAlignment, AlignError> {
    let len_a = a.len() as isize;
    let len_b = b.len() as isize;
    // A budget beyond len_a + len_b buys nothing.
    let maxd = max_edits.min(a.len() + b.len());
    let mut wave = Wave::new(maxd).ok_or(AlignError::BudgetTooLarge(max_edits))?;

    for d in 0..=maxd as isize {
        for k in (-d).max(-len_a)..=d.min(len_b) {
            // Furthest-reaching predecessor. The diagonal band is clamped to
            // the sequence lengths, so the boundary cases below can never
            // read outside what the previous wave wrote; clamp-induced holes
            // are covered by the UNSET sentinel losing every max().
            let mut x = if d == 0 {
                0
            } else if k == -d {
                wave.get(k + 1, d - 1)
            } else if k == -d + 1 {
                (wave.get(k, d - 1) + 1).max(wave.get(k + 1, d - 1))
            } else if k == d {
                wave.get(k - 1, d - 1) + 1
            } else if k == d - 1 {
                (wave.get(k, d - 1) + 1).max(wave.get(k - 1, d - 1) + 1)
            } else {
                (wave.get(k - 1, d - 1) + 1)
                    .max(wave.get(k, d - 1) + 1)
                    .max(wave.get(k + 1, d - 1))
            };

            let mut y = x as isize - k;
            debug_assert!(x >= 0 && y >= 0);
            while (x as isize) < len_b
                && y < len_a
                && dna::matches(b[x as usize], a[y as usize])
            {
                x += 1;
                y += 1;
            }
            wave.set(k, d, x);

            let done = match mode {
                Mode::Global => y == len_a && (x as isize) == len_b,
                Mode::ConsumeB => (x as isize) == len_b,
                Mode::ConsumeA => y == len_a,
            };
            if done {
                let (gapped_a, gapped_b) = backtrace(a, b, &wave, d, k, x, maxd);
                return Ok(EditAlignment {
                    distance: d as usize,
                    gapped_a,
                    gapped_b,
                });
            }
        }
    }

    Err(AlignError::BudgetExceeded(max_edits))
}

/// Reconstruct one optimal alignment from the terminal `(k, d)` endpoint.
///
/// Tie-break among equally scoring predecessors is fixed: same-diagonal
/// substitution first, then a gap in `a`, then a gap in `b`, and otherwise
/// the column must have been a match inside an extension run.
fn backtrace(
    a: &[u8],
    b: &[u8],
    wave: &Wave,
    d: isize,
    k: isize,
    x: i32,
    maxd: usize,
) -> (Vec<u8>, Vec<u8>) {
    let cap = a.len().max(b.len()) + maxd + 1;
    let mut out_a = Vec::with_capacity(cap);
    let mut out_b = Vec::with_capacity(cap);

    let (mut dd, mut k, mut x) = (d, k, x);
    let mut y = x as isize - k;

    while dd != 0 {
        if k != -dd && k != dd && x == wave.get(k, dd - 1) + 1 {
            // Substitution: consume one symbol of each.
            dd -= 1;
            x -= 1;
            y -= 1;
            out_b.push(b[x as usize]);
            out_a.push(a[y as usize]);
        } else if k > -dd + 1 && x == wave.get(k - 1, dd - 1) + 1 {
            // Gap in a: consume a symbol of b only.
            x -= 1;
            k -= 1;
            dd -= 1;
            out_b.push(b[x as usize]);
            out_a.push(b'-');
        } else if k < dd - 1 && x == wave.get(k + 1, dd - 1) {
            // Gap in b: consume a symbol of a only.
            k += 1;
            y -= 1;
            dd -= 1;
            out_b.push(b'-');
            out_a.push(a[y as usize]);
        } else {
            // A matching column inside a greedy extension run.
            x -= 1;
            y -= 1;
            out_b.push(b[x as usize]);
            out_a.push(a[y as usize]);
        }
    }

    // At d == 0 we are on diagonal 0; copy the common prefix.
    while x > 0 {
        x -= 1;
        y -= 1;
        out_b.push(b[x as usize]);
        out_a.push(a[y as usize]);
    }
    debug_assert_eq!(y, 0);

    out_a.reverse();
    out_b.reverse();
    (out_a, out_b)
}
