//! Nucleotide symbol handling: IUPAC bitmasks, ancient-DNA-aware consistency,
//! and the transversion test.
//!
//! Every base (including ambiguity codes) maps to a 4-bit mask over {A,C,G,T};
//! two symbols match when their masks intersect. This is what lets the edit
//! aligner treat `R` as "A or G" instead of a literal character.

/// Bitmask for a nucleotide symbol. Case-insensitive; `U` is treated as `T`.
/// Unknown symbols (including the gap `-`) map to 0 and therefore match nothing.
#[must_use]
pub fn bitmask(symbol: u8) -> u8 {
    match symbol.to_ascii_uppercase() {
        b'A' => 0b0001,
        b'C' => 0b0010,
        b'G' => 0b0100,
        b'T' | b'U' => 0b1000,
        b'M' => 0b0011, // A or C
        b'R' => 0b0101, // A or G
        b'W' => 0b1001, // A or T
        b'S' => 0b0110, // C or G
        b'Y' => 0b1010, // C or T
        b'K' => 0b1100, // G or T
        b'V' => 0b0111,
        b'H' => 0b1011,
        b'D' => 0b1101,
        b'B' => 0b1110,
        b'N' => 0b1111,
        _ => 0,
    }
}

/// Two symbols match when their bitmasks intersect.
#[must_use]
pub fn matches(a: u8, b: u8) -> bool {
    bitmask(a) & bitmask(b) != 0
}

/// Could `observed` plausibly have been read from template base `template`?
///
/// With `adna` set, a template `G` is widened to `R` and a `C` to `Y` before
/// the bitmask test, absorbing the C→T / G→A miscoding typical of deaminated
/// ancient DNA. A gap on either side is always consistent: a gap is an
/// unknown, not a mismatch.
#[must_use]
pub fn consistent(adna: bool, template: u8, observed: u8) -> bool {
    if template == b'-' || observed == b'-' {
        return true;
    }
    let template = if adna {
        match template.to_ascii_uppercase() {
            b'G' => b'R',
            b'C' => b'Y',
            _ => template,
        }
    } else {
        template
    };
    matches(template, observed)
}

fn purine(symbol: u8) -> Option<bool> {
    match symbol.to_ascii_uppercase() {
        b'A' | b'G' => Some(true),
        b'C' | b'T' | b'U' => Some(false),
        _ => None,
    }
}

/// Is the substitution `a` -> `b` a transversion (purine <-> pyrimidine)?
///
/// Returns false for transitions and for any symbol outside {A,C,G,T,U}.
#[must_use]
pub fn is_transversion(a: u8, b: u8) -> bool {
    match (purine(a), purine(b)) {
        (Some(x), Some(y)) => x != y,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bitmask_canonical_bases() {
        assert_eq!(bitmask(b'A'), 0b0001);
        assert_eq!(bitmask(b'c'), 0b0010);
        assert_eq!(bitmask(b'G'), 0b0100);
        assert_eq!(bitmask(b't'), 0b1000);
        assert_eq!(bitmask(b'U'), bitmask(b'T'));
    }

    #[test]
    fn test_bitmask_ambiguity_codes() {
        assert_eq!(bitmask(b'R'), bitmask(b'A') | bitmask(b'G'));
        assert_eq!(bitmask(b'Y'), bitmask(b'C') | bitmask(b'T'));
        assert_eq!(bitmask(b'N'), 0b1111);
        assert_eq!(bitmask(b'-'), 0);
        assert_eq!(bitmask(b'*'), 0);
    }

    #[test]
    fn test_matches_through_ambiguity() {
        assert!(matches(b'A', b'a'));
        assert!(matches(b'R', b'G'));
        assert!(matches(b'N', b'T'));
        assert!(!matches(b'A', b'C'));
        assert!(!matches(b'R', b'Y'));
        assert!(!matches(b'-', b'A'));
    }

    #[test]
    fn test_consistent_plain() {
        assert!(consistent(false, b'A', b'A'));
        assert!(!consistent(false, b'G', b'A'));
        assert!(!consistent(false, b'C', b'T'));
        assert!(consistent(false, b'R', b'A'));
    }

    #[test]
    fn test_consistent_ancient_damage() {
        // Deamination: G may be read as A, C may be read as T.
        assert!(consistent(true, b'G', b'A'));
        assert!(consistent(true, b'C', b'T'));
        // But not the reverse direction.
        assert!(!consistent(true, b'A', b'G'));
        assert!(!consistent(true, b'T', b'C'));
    }

    #[test]
    fn test_consistent_gap_is_unknown() {
        assert!(consistent(false, b'-', b'A'));
        assert!(consistent(false, b'A', b'-'));
        assert!(consistent(true, b'-', b'-'));
    }

    #[test]
    fn test_transversions() {
        assert!(is_transversion(b'A', b'C'));
        assert!(is_transversion(b'A', b'T'));
        assert!(is_transversion(b'g', b'c'));
        // Transitions.
        assert!(!is_transversion(b'A', b'G'));
        assert!(!is_transversion(b'C', b'T'));
        assert!(!is_transversion(b'C', b'U'));
        // Anything outside {A,C,G,T,U} is never a transversion.
        assert!(!is_transversion(b'N', b'A'));
        assert!(!is_transversion(b'A', b'R'));
        assert!(!is_transversion(b'-', b'C'));
    }
}
