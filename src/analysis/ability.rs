//! Pretest/posttest ability comparison.
//!
//! Paired t-test on (posttest - pretest) with Cohen's d computed from the
//! difference scores, plus descriptives for both test administrations.

use crate::core::{Result, ScoreRecord};
use crate::stats::{describe, paired_t_test, Descriptives, PairedTTest};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct AbilityComparison {
    pub test: PairedTTest,
    pub pretest: Descriptives,
    pub posttest: Descriptives,
}

/// Compare posttest against pretest scores across all students.
pub fn compare_ability(scores: &[ScoreRecord]) -> Result<AbilityComparison> {
    let pre: Vec<f64> = scores.iter().map(|s| s.pretest_score).collect();
    let post: Vec<f64> = scores.iter().map(|s| s.posttest_score).collect();

    let test = paired_t_test(&post, &pre)?;
    log::info!(
        "ability comparison: t({}) = {:.3}, p = {:.4}, d = {:.3}",
        test.df,
        test.statistic,
        test.p_value,
        test.cohens_d
    );

    Ok(AbilityComparison {
        test,
        pretest: describe(&pre),
        posttest: describe(&post),
    })
}
