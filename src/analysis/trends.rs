//! Longitudinal trend analysis over the survey checkpoints.
//!
//! For each measured quantity (AI dependency, self-regulated learning):
//! average duplicate responses per student per checkpoint, restrict to
//! students present at every checkpoint, and run a Friedman rank test
//! across the aligned checkpoint vectors.

use crate::core::{EdustatError, Result, SurveyRecord};
use crate::stats::{describe, friedman_test, FriedmanTest};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Measure {
    AiDependency,
    SelfRegulation,
}

impl Measure {
    pub fn name(self) -> &'static str {
        match self {
            Measure::AiDependency => "AI dependency",
            Measure::SelfRegulation => "self-regulated learning",
        }
    }
}

impl fmt::Display for Measure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Mean and SD of one measure at one checkpoint, over the aligned cohort.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CheckpointStats {
    pub week: u32,
    pub mean: f64,
    pub std_dev: f64,
}

/// Trend test result for one measured quantity.
#[derive(Debug, Clone, Serialize)]
pub struct TrendResult {
    pub measure: Measure,
    pub checkpoints: Vec<CheckpointStats>,
    pub test: FriedmanTest,
}

#[derive(Debug, Clone, Serialize)]
pub struct TrendAnalysis {
    pub ai_dependency: TrendResult,
    pub self_regulation: TrendResult,
    /// Students present at every checkpoint.
    pub cohort_size: usize,
    /// Students excluded for missing at least one checkpoint.
    pub dropped_students: Vec<String>,
}

#[derive(Default)]
struct ResponseAccumulator {
    ai_sum: f64,
    srl_sum: f64,
    count: usize,
}

/// Run the trend analysis across the configured checkpoint weeks.
pub fn analyze_trends(surveys: &[SurveyRecord], checkpoints: &[u32]) -> Result<TrendAnalysis> {
    // Per-student, per-checkpoint mean of each measure. Survey rows from
    // weeks outside the checkpoint list are ignored.
    let mut per_student: BTreeMap<&str, BTreeMap<u32, ResponseAccumulator>> = BTreeMap::new();
    for row in surveys {
        if !checkpoints.contains(&row.week) {
            continue;
        }
        let slot = per_student
            .entry(row.student_id.as_str())
            .or_default()
            .entry(row.week)
            .or_default();
        slot.ai_sum += row.ai_dependency_score;
        slot.srl_sum += row.srl_score;
        slot.count += 1;
    }

    let (aligned, dropped): (Vec<_>, Vec<_>) = per_student
        .iter()
        .partition(|(_, weeks)| checkpoints.iter().all(|w| weeks.contains_key(w)));

    let dropped_students: Vec<String> = dropped.iter().map(|(id, _)| id.to_string()).collect();
    if !dropped_students.is_empty() {
        log::warn!(
            "trend analysis: dropping {} student(s) missing at least one checkpoint: {}",
            dropped_students.len(),
            dropped_students.join(", ")
        );
    }
    if aligned.is_empty() {
        return Err(EdustatError::EmptyCohort(
            "no student has survey responses at every checkpoint".to_string(),
        ));
    }
    log::info!("trend analysis: aligned cohort of {} student(s)", aligned.len());

    let ai_columns = checkpoint_columns(&aligned, checkpoints, |acc| acc.ai_sum / acc.count as f64);
    let srl_columns =
        checkpoint_columns(&aligned, checkpoints, |acc| acc.srl_sum / acc.count as f64);

    Ok(TrendAnalysis {
        ai_dependency: trend_result(Measure::AiDependency, checkpoints, ai_columns)?,
        self_regulation: trend_result(Measure::SelfRegulation, checkpoints, srl_columns)?,
        cohort_size: aligned.len(),
        dropped_students,
    })
}

/// One aligned vector per checkpoint, students in sorted-id order.
fn checkpoint_columns(
    aligned: &[(&&str, &BTreeMap<u32, ResponseAccumulator>)],
    checkpoints: &[u32],
    value: impl Fn(&ResponseAccumulator) -> f64,
) -> Vec<Vec<f64>> {
    checkpoints
        .iter()
        .map(|week| {
            aligned
                .iter()
                .map(|(_, weeks)| value(&weeks[week]))
                .collect()
        })
        .collect()
}

fn trend_result(
    measure: Measure,
    checkpoints: &[u32],
    columns: Vec<Vec<f64>>,
) -> Result<TrendResult> {
    let test = friedman_test(&columns)?;
    log::info!(
        "{measure}: chi2({}) = {:.3}, p = {:.4}",
        test.df,
        test.statistic,
        test.p_value
    );

    let stats = checkpoints
        .iter()
        .zip(columns.iter())
        .map(|(week, column)| {
            let d = describe(column);
            CheckpointStats {
                week: *week,
                mean: d.mean,
                std_dev: d.std_dev,
            }
        })
        .collect();

    Ok(TrendResult {
        measure,
        checkpoints: stats,
        test,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(id: &str, week: u32, ai: f64, srl: f64) -> SurveyRecord {
        SurveyRecord {
            student_id: id.to_string(),
            week,
            ai_dependency_score: ai,
            srl_score: srl,
        }
    }

    fn full_cohort() -> Vec<SurveyRecord> {
        let mut rows = Vec::new();
        for (i, id) in ["s01", "s02", "s03"].iter().enumerate() {
            let base = i as f64;
            rows.push(response(id, 6, 4.0 + base, 2.0 + base));
            rows.push(response(id, 12, 3.0 + base, 3.0 + base));
            rows.push(response(id, 17, 2.0 + base, 4.0 + base));
        }
        rows
    }

    #[test]
    fn aligned_vectors_cover_the_full_cohort() {
        let analysis = analyze_trends(&full_cohort(), &[6, 12, 17]).unwrap();
        assert_eq!(analysis.cohort_size, 3);
        assert!(analysis.dropped_students.is_empty());
        assert_eq!(analysis.ai_dependency.checkpoints.len(), 3);
        // AI dependency falls monotonically, SRL rises.
        assert!(analysis.ai_dependency.checkpoints[0].mean > analysis.ai_dependency.checkpoints[2].mean);
        assert!(analysis.self_regulation.checkpoints[0].mean < analysis.self_regulation.checkpoints[2].mean);
        assert!((0.0..=1.0).contains(&analysis.ai_dependency.test.p_value));
    }

    #[test]
    fn partial_students_are_dropped_entirely() {
        let mut rows = full_cohort();
        // s04 answers weeks 6 and 12 but misses week 17.
        rows.push(response("s04", 6, 5.0, 1.0));
        rows.push(response("s04", 12, 4.0, 2.0));

        let analysis = analyze_trends(&rows, &[6, 12, 17]).unwrap();
        assert_eq!(analysis.cohort_size, 3);
        assert_eq!(analysis.dropped_students, vec!["s04".to_string()]);
    }

    #[test]
    fn duplicate_responses_are_mean_aggregated() {
        let mut rows = full_cohort();
        // s01 answered week 6 twice; the 4.0 and 6.0 average to 5.0.
        rows.push(response("s01", 6, 6.0, 2.0));

        let analysis = analyze_trends(&rows, &[6, 12, 17]).unwrap();
        let week6 = &analysis.ai_dependency.checkpoints[0];
        // Cohort means at week 6: s01 = 5.0, s02 = 5.0, s03 = 6.0.
        assert!((week6.mean - 16.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn off_checkpoint_weeks_are_ignored() {
        let mut rows = full_cohort();
        rows.push(response("s01", 9, 100.0, 100.0));
        let analysis = analyze_trends(&rows, &[6, 12, 17]).unwrap();
        assert!(analysis.ai_dependency.checkpoints.iter().all(|c| c.mean < 10.0));
    }

    #[test]
    fn empty_alignment_is_an_empty_cohort() {
        // Every student misses some checkpoint.
        let rows = vec![
            response("s01", 6, 4.0, 2.0),
            response("s01", 12, 3.0, 3.0),
            response("s02", 12, 3.0, 3.0),
            response("s02", 17, 2.0, 4.0),
        ];
        let result = analyze_trends(&rows, &[6, 12, 17]);
        assert!(matches!(result, Err(EdustatError::EmptyCohort(_))));
    }
}
