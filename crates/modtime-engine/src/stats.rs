use serde::Serialize;

/// Returns `sign(x) * sqrt(|x|)`.
///
/// The variance of an almost constant sample can come out slightly negative
/// from cancellation; this keeps the RMS defined in that case.
pub fn signed_sqrt(value: f64) -> f64 {
    if value >= 0.0 {
        value.sqrt()
    } else {
        -(-value).sqrt()
    }
}

/// Running statistics on a single variable.
///
/// Entries are only ever added; every derived quantity is computed from the
/// running count, total weight, weighted sum and weighted sum of squares.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Stats {
    n: usize,
    weights: f64,
    sum: f64,
    sum_sq: f64,
    min: Option<f64>,
    max: Option<f64>,
}

impl Stats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, value: f64) {
        self.add_weighted(value, 1.0);
    }

    pub fn add_weighted(&mut self, value: f64, weight: f64) {
        self.n += 1;
        self.weights += weight;
        self.sum += weight * value;
        self.sum_sq += weight * value * value;
        if self.min.is_none_or(|min| value < min) {
            self.min = Some(value);
        }
        if self.max.is_none_or(|max| value > max) {
            self.max = Some(value);
        }
    }

    /// Number of additions
    pub fn n(&self) -> usize {
        self.n
    }

    /// Total weight (matches `n` unless weights were given)
    pub fn weights(&self) -> f64 {
        self.weights
    }

    pub fn sum(&self) -> f64 {
        self.sum
    }

    pub fn sum_sq(&self) -> f64 {
        self.sum_sq
    }

    pub fn min(&self) -> Option<f64> {
        self.min
    }

    pub fn max(&self) -> Option<f64> {
        self.max
    }

    /// Weighted average, 0 with no entries.
    pub fn mean(&self) -> f64 {
        if self.weights != 0.0 {
            self.sum / self.weights
        } else {
            0.0
        }
    }

    /// Weighted average of the squares, 0 with no entries.
    pub fn mean_square(&self) -> f64 {
        if self.weights != 0.0 {
            self.sum_sq / self.weights
        } else {
            0.0
        }
    }

    /// Square of the RMS; may be slightly negative for near-constant samples.
    pub fn variance(&self) -> f64 {
        self.mean_square() - self.mean().powi(2)
    }

    pub fn rms(&self) -> f64 {
        signed_sqrt(self.variance())
    }

    /// Sample standard deviation, 0 with fewer than two entries.
    pub fn stddev(&self) -> f64 {
        if self.n < 2 {
            return 0.0;
        }
        let n = self.n as f64;
        self.rms() * (n / (n - 1.0)).sqrt()
    }

    pub fn stddev_population(&self) -> f64 {
        self.rms()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-12;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < EPSILON,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_empty_stats() {
        let stats = Stats::new();
        assert_eq!(stats.n(), 0);
        assert_eq!(stats.weights(), 0.0);
        assert_eq!(stats.min(), None);
        assert_eq!(stats.max(), None);
        assert_eq!(stats.mean(), 0.0);
        assert_eq!(stats.mean_square(), 0.0);
        assert_eq!(stats.rms(), 0.0);
        assert_eq!(stats.stddev(), 0.0);
    }

    #[test]
    fn test_single_entry_has_zero_stddev() {
        let mut stats = Stats::new();
        stats.add(4.5);
        assert_eq!(stats.n(), 1);
        assert_eq!(stats.mean(), 4.5);
        assert_eq!(stats.min(), Some(4.5));
        assert_eq!(stats.max(), Some(4.5));
        assert_eq!(stats.stddev(), 0.0);
    }

    #[test]
    fn test_mean_rms_and_stddev() {
        let mut stats = Stats::new();
        for value in [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0] {
            stats.add(value);
        }
        assert_eq!(stats.n(), 8);
        assert_close(stats.sum(), 40.0);
        assert_close(stats.mean(), 5.0);
        assert_close(stats.mean_square(), 29.0);
        assert_close(stats.variance(), 4.0);
        assert_close(stats.rms(), 2.0);
        assert_close(stats.stddev_population(), 2.0);
        assert_close(stats.stddev(), 2.0 * (8.0f64 / 7.0).sqrt());
        assert_eq!(stats.min(), Some(2.0));
        assert_eq!(stats.max(), Some(9.0));
    }

    #[test]
    fn test_weighted_mean_uses_total_weight() {
        let mut stats = Stats::new();
        stats.add_weighted(1.0, 3.0);
        stats.add_weighted(5.0, 1.0);
        assert_eq!(stats.n(), 2);
        assert_close(stats.weights(), 4.0);
        assert_close(stats.mean(), stats.sum() / stats.weights());
        assert_close(stats.mean(), 2.0);
    }

    #[test]
    fn test_rms_of_constant_sample_never_fails() {
        let mut stats = Stats::new();
        for _ in 0..1000 {
            stats.add(0.1);
        }
        // cancellation may leave a tiny negative variance; the signed root keeps it finite
        assert!(stats.variance() > -1e-9);
        assert!(stats.rms().is_finite());
        assert!(stats.rms().abs() < 1e-6);
        assert!(stats.stddev().is_finite());
    }

    #[test]
    fn test_signed_sqrt() {
        assert_eq!(signed_sqrt(9.0), 3.0);
        assert_eq!(signed_sqrt(-4.0), -2.0);
        assert_eq!(signed_sqrt(0.0), 0.0);
    }
}
