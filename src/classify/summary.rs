//! Run-level tallies and the contamination-rate estimate.

use serde::Serialize;

use crate::core::Classification;

/// Wilson score interval at 95% confidence.
const Z: f64 = 1.96;

/// Contamination rate over the directional fragments, in percent.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ContaminationEstimate {
    pub lower: f64,
    /// Maximum-likelihood point estimate (contaminant / (clean + contaminant)).
    pub estimate: f64,
    pub upper: f64,
}

/// Per-classification fragment counts for one run.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct Summary {
    pub unclassified: usize,
    pub clean: usize,
    pub contaminant: usize,
    pub conflicting: usize,
    pub nonsensical: usize,
}

impl Summary {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, classification: Classification) {
        match classification {
            Classification::Unclassified => self.unclassified += 1,
            Classification::Clean => self.clean += 1,
            Classification::Contaminant => self.contaminant += 1,
            Classification::Conflicting => self.conflicting += 1,
            Classification::Nonsensical => self.nonsensical += 1,
        }
    }

    #[must_use]
    pub fn count(&self, classification: Classification) -> usize {
        match classification {
            Classification::Unclassified => self.unclassified,
            Classification::Clean => self.clean,
            Classification::Contaminant => self.contaminant,
            Classification::Conflicting => self.conflicting,
            Classification::Nonsensical => self.nonsensical,
        }
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.unclassified + self.clean + self.contaminant + self.conflicting + self.nonsensical
    }

    /// Wilson score interval for the contaminant fraction among the
    /// fragments that classified clean or contaminant. `None` when no
    /// fragment did.
    #[must_use]
    pub fn contamination(&self) -> Option<ContaminationEstimate> {
        let k = self.contaminant as f64;
        let n = (self.contaminant + self.clean) as f64;
        if n == 0.0 {
            return None;
        }

        let p = k / n;
        let center = p + 0.5 * Z * Z / n;
        let width = Z * (p * (1.0 - p) / n + 0.25 * Z * Z / (n * n)).sqrt();
        let denom = 1.0 + Z * Z / n;

        Some(ContaminationEstimate {
            lower: 100.0 * (center - width) / denom,
            estimate: 100.0 * p,
            upper: 100.0 * (center + width) / denom,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_and_total() {
        let mut s = Summary::new();
        s.record(Classification::Clean);
        s.record(Classification::Clean);
        s.record(Classification::Contaminant);
        s.record(Classification::Unclassified);
        assert_eq!(s.count(Classification::Clean), 2);
        assert_eq!(s.count(Classification::Contaminant), 1);
        assert_eq!(s.total(), 4);
    }

    #[test]
    fn test_no_directional_fragments_no_interval() {
        let mut s = Summary::new();
        s.record(Classification::Unclassified);
        s.record(Classification::Conflicting);
        assert!(s.contamination().is_none());
    }

    #[test]
    fn test_interval_brackets_estimate() {
        let mut s = Summary::new();
        for _ in 0..90 {
            s.record(Classification::Clean);
        }
        for _ in 0..10 {
            s.record(Classification::Contaminant);
        }
        let ci = s.contamination().unwrap();
        assert!((ci.estimate - 10.0).abs() < 1e-9);
        assert!(ci.lower < ci.estimate && ci.estimate < ci.upper);
        assert!(ci.lower > 0.0 && ci.upper < 100.0);
    }

    #[test]
    fn test_all_contaminant() {
        let mut s = Summary::new();
        for _ in 0..5 {
            s.record(Classification::Contaminant);
        }
        let ci = s.contamination().unwrap();
        assert!((ci.estimate - 100.0).abs() < 1e-9);
        assert!(ci.upper <= 100.0 + 1e-9);
        assert!(ci.lower < 100.0);
    }

    #[test]
    fn test_interval_narrows_with_more_data() {
        let mut small = Summary::new();
        let mut large = Summary::new();
        for _ in 0..9 {
            small.record(Classification::Clean);
        }
        small.record(Classification::Contaminant);
        for _ in 0..900 {
            large.record(Classification::Clean);
        }
        for _ in 0..100 {
            large.record(Classification::Contaminant);
        }
        let a = small.contamination().unwrap();
        let b = large.contamination().unwrap();
        assert!(b.upper - b.lower < a.upper - a.lower);
    }
}
