//! Coordinate lift-over through a shared pairwise alignment.

/// Map the coordinate range `[start, end)` in `gapped_y`'s frame to the
/// corresponding substring of `gapped_x`.
///
/// Both inputs are the two sides of one alignment. The coordinate counter
/// runs over `gapped_y`'s non-gap columns; every `gapped_x` symbol in a
/// column at or past `start` is collected until the counter reaches `end`
/// or either side is exhausted.
///
/// Linear in the alignment length. Fine at current data sizes; if this ever
/// runs once per range query over large alignments, precompute a
/// coordinate-to-column index instead.
#[must_use]
pub fn liftover(gapped_x: &[u8], gapped_y: &[u8], start: usize, end: usize) -> Vec<u8> {
    let mut out = Vec::new();
    let mut coord = 0usize;

    for (&x, &y) in gapped_x.iter().zip(gapped_y) {
        if coord >= end {
            break;
        }
        if x != b'-' && coord >= start {
            out.push(x);
        }
        if y != b'-' {
            coord += 1;
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gapless_alignment_is_a_slice() {
        let x = b"ACGTACGT";
        let y = b"ACGAACGA";
        assert_eq!(liftover(x, y, 2, 6), b"GTAC");
    }

    #[test]
    fn test_gap_in_x_shrinks_output() {
        // y coords:  01 234
        let x = b"AC-TA";
        let y = b"ACGTA";
        assert_eq!(liftover(x, y, 1, 4), b"CT");
    }

    #[test]
    fn test_gap_in_y_grows_output() {
        // A gap on the y side does not advance the coordinate, so the
        // inserted x symbols ride along with the current coordinate.
        let x = b"ACGTA";
        let y = b"AC-TA";
        assert_eq!(liftover(x, y, 1, 3), b"CGT");
    }

    #[test]
    fn test_full_range_reproduces_gap_free_x() {
        let x = b"AC-GTAC";
        let y = b"ACGT-AC";
        assert_eq!(liftover(x, y, 0, usize::MAX), b"ACGTAC");
    }

    #[test]
    fn test_empty_range() {
        assert_eq!(liftover(b"ACGT", b"ACGT", 2, 2), b"");
    }

    #[test]
    fn test_is_substring_of_gap_free_x() {
        let x = b"AAC-GGT-TACG";
        let y = b"A-CTGG-ATAC-";
        let full: Vec<u8> = x.iter().copied().filter(|&c| c != b'-').collect();
        let lifted = liftover(x, y, 2, 7);
        let found = full
            .windows(lifted.len())
            .any(|w| w == lifted.as_slice());
        assert!(found);
    }
}
