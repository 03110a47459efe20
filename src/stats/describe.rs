//! Descriptive statistics: means, sample standard deviations, quartiles.

use serde::Serialize;

/// Summary statistics for one numeric vector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Descriptives {
    pub n: usize,
    pub mean: f64,
    pub std_dev: f64,
}

pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation (n - 1 in the denominator). Zero for fewer
/// than two observations.
pub fn sample_std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let m = mean(values);
    let sum_sq: f64 = values.iter().map(|v| (v - m) * (v - m)).sum();
    (sum_sq / (values.len() - 1) as f64).sqrt()
}

pub fn describe(values: &[f64]) -> Descriptives {
    Descriptives {
        n: values.len(),
        mean: mean(values),
        std_dev: sample_std_dev(values),
    }
}

/// Five-number summary used by the box figure.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quartiles {
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

/// Quartiles by linear interpolation between order statistics. The input
/// must be non-empty.
pub fn quartiles(values: &[f64]) -> Quartiles {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).expect("non-finite value in quartiles"));

    Quartiles {
        min: sorted[0],
        q1: percentile(&sorted, 0.25),
        median: percentile(&sorted, 0.5),
        q3: percentile(&sorted, 0.75),
        max: sorted[sorted.len() - 1],
    }
}

fn percentile(sorted: &[f64], fraction: f64) -> f64 {
    let position = fraction * (sorted.len() - 1) as f64;
    let low = position.floor() as usize;
    let high = position.ceil() as usize;
    if low == high {
        sorted[low]
    } else {
        let weight = position - low as f64;
        sorted[low] * (1.0 - weight) + sorted[high] * weight
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_and_sd_of_known_vector() {
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert!((mean(&values) - 5.0).abs() < 1e-12);
        // Sample variance of this vector is 32/7.
        assert!((sample_std_dev(&values) - (32.0f64 / 7.0).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn sd_of_singleton_is_zero() {
        assert_eq!(sample_std_dev(&[3.0]), 0.0);
        assert_eq!(sample_std_dev(&[]), 0.0);
    }

    #[test]
    fn quartiles_interpolate() {
        let q = quartiles(&[1.0, 2.0, 3.0, 4.0]);
        assert_eq!(q.min, 1.0);
        assert!((q.q1 - 1.75).abs() < 1e-12);
        assert!((q.median - 2.5).abs() < 1e-12);
        assert!((q.q3 - 3.25).abs() < 1e-12);
        assert_eq!(q.max, 4.0);
    }
}
