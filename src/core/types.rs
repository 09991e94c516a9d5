use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Classification of a fragment against the two references.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    /// No informative diagnostic position seen.
    Unclassified,
    /// Consistent with the assembly only: endogenous.
    Clean,
    /// Consistent with the contaminant reference only.
    Contaminant,
    /// Informative columns voted both ways.
    Conflicting,
    /// Consistent with neither reference at some column.
    Nonsensical,
}

impl Classification {
    /// All variants, in tally/report order.
    pub const ALL: [Classification; 5] = [
        Self::Unclassified,
        Self::Clean,
        Self::Contaminant,
        Self::Conflicting,
        Self::Nonsensical,
    ];

    /// Merge the classifications of two halves of the same fragment.
    ///
    /// Commutative and associative: `Unclassified` is the identity,
    /// `Nonsensical` absorbs everything, and any other disagreement is
    /// `Conflicting`.
    #[must_use]
    pub fn merge(self, other: Self) -> Self {
        if self == other {
            return self;
        }
        if self == Self::Unclassified {
            return other;
        }
        if other == Self::Unclassified {
            return self;
        }
        if self == Self::Nonsensical || other == Self::Nonsensical {
            return Self::Nonsensical;
        }
        Self::Conflicting
    }
}

impl std::fmt::Display for Classification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unclassified => write!(f, "unclassified"),
            Self::Clean => write!(f, "clean"),
            Self::Contaminant => write!(f, "contaminant"),
            Self::Conflicting => write!(f, "conflicting"),
            Self::Nonsensical => write!(f, "nonsensical"),
        }
    }
}

/// A half-open assembly-coordinate range `[from, to)`, 0-based.
///
/// Parsed from the 1-based, inclusive `M-N` form used on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub from: usize,
    pub to: usize,
}

impl Span {
    /// The unrestricted span.
    #[must_use]
    pub fn all() -> Self {
        Self {
            from: 0,
            to: usize::MAX,
        }
    }

    #[must_use]
    pub fn contains(&self, coord: usize) -> bool {
        coord >= self.from && coord < self.to
    }
}

impl FromStr for Span {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (m, n) = s
            .split_once('-')
            .ok_or_else(|| format!("expected M-N, got '{s}'"))?;
        let m: usize = m
            .trim()
            .parse()
            .map_err(|_| format!("invalid span start '{m}'"))?;
        let n: usize = n
            .trim()
            .parse()
            .map_err(|_| format!("invalid span end '{n}'"))?;
        if m == 0 {
            return Err("span coordinates are 1-based".to_string());
        }
        if n < m {
            return Err(format!("span end {n} precedes start {m}"));
        }
        Ok(Self { from: m - 1, to: n })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Classification::*;

    #[test]
    fn test_merge_identity_and_absorption() {
        for c in Classification::ALL {
            assert_eq!(Unclassified.merge(c), c);
            assert_eq!(c.merge(Unclassified), c);
            assert_eq!(c.merge(c), c);
            assert_eq!(Nonsensical.merge(c), Nonsensical);
            assert_eq!(c.merge(Nonsensical), Nonsensical);
        }
    }

    #[test]
    fn test_merge_disagreement_conflicts() {
        assert_eq!(Clean.merge(Contaminant), Conflicting);
        assert_eq!(Contaminant.merge(Clean), Conflicting);
        assert_eq!(Clean.merge(Conflicting), Conflicting);
    }

    #[test]
    fn test_merge_commutative_associative() {
        for a in Classification::ALL {
            for b in Classification::ALL {
                assert_eq!(a.merge(b), b.merge(a));
                for c in Classification::ALL {
                    assert_eq!(a.merge(b).merge(c), a.merge(b.merge(c)));
                }
            }
        }
    }

    #[test]
    fn test_span_parse() {
        let span: Span = "100-200".parse().unwrap();
        assert_eq!(span, Span { from: 99, to: 200 });
        assert!(span.contains(99));
        assert!(span.contains(199));
        assert!(!span.contains(200));

        assert!("200".parse::<Span>().is_err());
        assert!("0-10".parse::<Span>().is_err());
        assert!("20-10".parse::<Span>().is_err());
        assert!("x-10".parse::<Span>().is_err());
    }
}
