//! Friedman rank test for repeated measures.
//!
//! Non-parametric test across k related samples (here: the survey
//! checkpoints), yielding a chi-square statistic with k - 1 degrees of
//! freedom. Ties within a block get average ranks and the statistic is
//! tie-corrected.

use crate::core::{EdustatError, Result};
use serde::Serialize;
use statrs::distribution::{ChiSquared, ContinuousCDF};

/// Result of a Friedman test.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FriedmanTest {
    /// Number of subjects (blocks).
    pub n: usize,
    /// Number of related samples (treatments).
    pub k: usize,
    /// Degrees of freedom, k - 1.
    pub df: usize,
    pub statistic: f64,
    pub p_value: f64,
}

/// Run a Friedman test over `samples`, one equal-length vector per related
/// sample. Element `i` of every vector belongs to the same subject.
pub fn friedman_test(samples: &[Vec<f64>]) -> Result<FriedmanTest> {
    let k = samples.len();
    if k < 2 {
        return Err(EdustatError::DegenerateInput(format!(
            "Friedman test needs at least 2 related samples, got {k}"
        )));
    }

    let n = samples[0].len();
    if samples.iter().any(|s| s.len() != n) {
        return Err(EdustatError::Alignment(
            "Friedman samples differ in length".to_string(),
        ));
    }
    if n == 0 {
        return Err(EdustatError::EmptyCohort(
            "Friedman test received no subjects".to_string(),
        ));
    }

    // Rank within each subject, accumulating column rank sums and the tie
    // term sum(t^3 - t) per block.
    let mut rank_sums = vec![0.0_f64; k];
    let mut tie_term = 0.0_f64;
    for subject in 0..n {
        let block: Vec<f64> = samples.iter().map(|s| s[subject]).collect();
        let (ranks, ties) = average_ranks(&block)?;
        for (column, rank) in ranks.iter().enumerate() {
            rank_sums[column] += rank;
        }
        tie_term += ties;
    }

    let nf = n as f64;
    let kf = k as f64;
    let correction = 1.0 - tie_term / (nf * (kf * kf * kf - kf));
    if correction <= 0.0 {
        return Err(EdustatError::DegenerateInput(
            "all observations are tied within every subject".to_string(),
        ));
    }

    let rank_sum_sq: f64 = rank_sums.iter().map(|r| r * r).sum();
    let uncorrected = 12.0 / (nf * kf * (kf + 1.0)) * rank_sum_sq - 3.0 * nf * (kf + 1.0);
    let statistic = uncorrected / correction;

    let df = k - 1;
    let dist = ChiSquared::new(df as f64)
        .map_err(|e| EdustatError::DegenerateInput(e.to_string()))?;
    let p_value = (1.0 - dist.cdf(statistic)).clamp(0.0, 1.0);

    Ok(FriedmanTest {
        n,
        k,
        df,
        statistic,
        p_value,
    })
}

/// Average ranks of one block, plus its tie term sum(t^3 - t).
fn average_ranks(block: &[f64]) -> Result<(Vec<f64>, f64)> {
    if block.iter().any(|v| !v.is_finite()) {
        return Err(EdustatError::Alignment(
            "Friedman samples contain non-finite values".to_string(),
        ));
    }

    let mut order: Vec<usize> = (0..block.len()).collect();
    order.sort_by(|&a, &b| block[a].partial_cmp(&block[b]).expect("finite values"));

    let mut ranks = vec![0.0_f64; block.len()];
    let mut tie_term = 0.0_f64;
    let mut start = 0;
    while start < order.len() {
        let mut end = start;
        while end + 1 < order.len() && block[order[end + 1]] == block[order[start]] {
            end += 1;
        }
        // Tied values share the average of the ranks they span.
        let average = (start + end) as f64 / 2.0 + 1.0;
        for &index in &order[start..=end] {
            ranks[index] = average;
        }
        let tied = (end - start + 1) as f64;
        tie_term += tied * tied * tied - tied;
        start = end + 1;
    }

    Ok((ranks, tie_term))
}
