//! Distribution summaries for reporting
//!
//! Quantiles use linear interpolation between order statistics: for
//! quantile `q` over `n` sorted samples the position is `q * (n - 1)`.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Summary of one numeric sample set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DistributionSummary {
    /// Smallest sample
    pub min: f64,
    /// Largest sample
    pub max: f64,
    /// Arithmetic mean
    pub mean: f64,
    /// 0.5 quantile
    pub median: f64,
    /// 0.1 quantile
    pub p10: f64,
    /// 0.9 quantile
    pub p90: f64,
}

impl DistributionSummary {
    /// Summarize `samples`.
    ///
    /// # Errors
    ///
    /// Returns `Error::EmptySequence` if `samples` is empty.
    pub fn from_samples(samples: &[f64]) -> Result<Self> {
        if samples.is_empty() {
            return Err(Error::EmptySequence);
        }

        let mut sorted = samples.to_vec();
        sorted.sort_by(f64::total_cmp);

        #[allow(clippy::cast_precision_loss)]
        let mean = sorted.iter().sum::<f64>() / sorted.len() as f64;

        Ok(Self {
            min: sorted[0],
            max: sorted[sorted.len() - 1],
            mean,
            median: quantile(&sorted, 0.5),
            p10: quantile(&sorted, 0.1),
            p90: quantile(&sorted, 0.9),
        })
    }

    /// Summarize integer counts (token or message counts).
    ///
    /// # Errors
    ///
    /// Returns `Error::EmptySequence` if `counts` is empty.
    #[allow(clippy::cast_precision_loss)]
    pub fn from_counts(counts: &[usize]) -> Result<Self> {
        let samples: Vec<f64> = counts.iter().map(|&c| c as f64).collect();
        Self::from_samples(&samples)
    }
}

impl std::fmt::Display for DistributionSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "min / max: {}, {}\nmean / median: {}, {}\np10 / p90: {}, {}",
            self.min, self.max, self.mean, self.median, self.p10, self.p90
        )
    }
}

/// Linearly interpolated quantile of an ascending, non-empty slice.
///
/// `q` is clamped to `[0, 1]`.
///
/// # Panics
///
/// Panics if `sorted` is empty.
#[must_use]
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub fn quantile(sorted: &[f64], q: f64) -> f64 {
    assert!(!sorted.is_empty(), "quantile of empty slice");

    let position = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let fraction = position - lower as f64;

    sorted[lower] + (sorted[upper] - sorted[lower]) * fraction
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_empty_sequence_is_an_error() {
        assert!(matches!(
            DistributionSummary::from_samples(&[]),
            Err(Error::EmptySequence)
        ));
        assert!(matches!(
            DistributionSummary::from_counts(&[]),
            Err(Error::EmptySequence)
        ));
    }

    #[test]
    fn test_five_message_counts() {
        let summary = DistributionSummary::from_counts(&[2, 3, 4, 9, 2]).unwrap();
        // sorted: [2, 2, 3, 4, 9]
        assert!(approx_eq(summary.min, 2.0));
        assert!(approx_eq(summary.max, 9.0));
        assert!(approx_eq(summary.mean, 4.0));
        assert!(approx_eq(summary.median, 3.0));
        // 0.1 * 4 = 0.4 -> 2 + 0 * 0.4
        assert!(approx_eq(summary.p10, 2.0));
        // 0.9 * 4 = 3.6 -> 4 + 5 * 0.6
        assert!(approx_eq(summary.p90, 7.0));
    }

    #[test]
    fn test_single_sample() {
        let summary = DistributionSummary::from_samples(&[42.0]).unwrap();
        assert!(approx_eq(summary.min, 42.0));
        assert!(approx_eq(summary.p10, 42.0));
        assert!(approx_eq(summary.median, 42.0));
        assert!(approx_eq(summary.p90, 42.0));
    }

    #[test]
    fn test_quantile_interpolates() {
        let sorted = [10.0, 20.0, 30.0, 40.0];
        assert!(approx_eq(quantile(&sorted, 0.0), 10.0));
        assert!(approx_eq(quantile(&sorted, 1.0), 40.0));
        assert!(approx_eq(quantile(&sorted, 0.5), 25.0));
        assert!(approx_eq(quantile(&sorted, 0.1), 13.0));
    }

    #[test]
    fn test_display_labels() {
        let summary = DistributionSummary::from_counts(&[1, 2, 3]).unwrap();
        let text = summary.to_string();
        assert!(text.contains("min / max: 1, 3"));
        assert!(text.contains("p10 / p90"));
    }
}
