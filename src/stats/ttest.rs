//! Paired-difference t-test with Cohen's d effect size.

use crate::core::{EdustatError, Result};
use crate::stats::describe::{mean, sample_std_dev};
use serde::Serialize;
use statrs::distribution::{ContinuousCDF, StudentsT};

/// Result of a paired t-test on (post - pre) differences.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PairedTTest {
    pub n: usize,
    /// Degrees of freedom, n - 1.
    pub df: usize,
    pub statistic: f64,
    /// Two-sided p-value.
    pub p_value: f64,
    /// Mean difference divided by the sample SD of the differences.
    pub cohens_d: f64,
    pub mean_difference: f64,
}

/// Run a paired t-test of `post` against `pre`.
///
/// The statistic is positive when `post` exceeds `pre` on average. Fails
/// with `Alignment` if the vectors differ in length or contain non-finite
/// values, and with `DegenerateInput` when n < 2 or the differences have
/// zero variance. Identical gains across every pair are therefore
/// rejected, never reported as an infinite statistic.
pub fn paired_t_test(post: &[f64], pre: &[f64]) -> Result<PairedTTest> {
    if post.len() != pre.len() {
        return Err(EdustatError::Alignment(format!(
            "paired vectors differ in length: {} vs {}",
            post.len(),
            pre.len()
        )));
    }
    if post.iter().chain(pre.iter()).any(|v| !v.is_finite()) {
        return Err(EdustatError::Alignment(
            "paired vectors contain non-finite values".to_string(),
        ));
    }

    let n = post.len();
    if n < 2 {
        return Err(EdustatError::DegenerateInput(format!(
            "paired t-test needs at least 2 pairs, got {n}"
        )));
    }

    let diffs: Vec<f64> = post.iter().zip(pre.iter()).map(|(a, b)| a - b).collect();
    let mean_diff = mean(&diffs);
    let sd_diff = sample_std_dev(&diffs);
    if sd_diff == 0.0 {
        return Err(EdustatError::DegenerateInput(
            "difference scores have zero variance".to_string(),
        ));
    }

    let statistic = mean_diff / (sd_diff / (n as f64).sqrt());
    let df = n - 1;
    let dist = StudentsT::new(0.0, 1.0, df as f64)
        .map_err(|e| EdustatError::DegenerateInput(e.to_string()))?;
    let p_value = (2.0 * (1.0 - dist.cdf(statistic.abs()))).clamp(0.0, 1.0);

    Ok(PairedTTest {
        n,
        df,
        statistic,
        p_value,
        cohens_d: mean_diff / sd_diff,
        mean_difference: mean_diff,
    })
}
