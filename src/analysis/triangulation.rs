//! Cross-source correlation ("triangulation").
//!
//! Joins three per-student aggregates on the intersection of student ids:
//! posttest score, final-checkpoint self-regulation score, and lifetime
//! try-before-AI ratio. Produces the pairwise Pearson correlation matrix.

use crate::core::{EdustatError, InteractionRecord, Result, ScoreRecord, SurveyRecord};
use crate::stats::{correlation_matrix, CorrelationMatrix};
use serde::Serialize;
use std::collections::BTreeMap;

pub const POSTTEST_LABEL: &str = "posttest_score";
pub const SRL_LABEL: &str = "srl_score";
pub const TRY_RATIO_LABEL: &str = "try_before_ai_ratio";

#[derive(Debug, Clone, Serialize)]
pub struct Triangulation {
    pub matrix: CorrelationMatrix,
    /// Students present in all three sources.
    pub cohort_size: usize,
    /// Students excluded for missing from at least one source.
    pub dropped_students: Vec<String>,
}

/// Correlate outcome, self-regulation, and behavior per student.
pub fn triangulate(
    scores: &[ScoreRecord],
    surveys: &[SurveyRecord],
    interactions: &[InteractionRecord],
    final_checkpoint: u32,
) -> Result<Triangulation> {
    let posttest: BTreeMap<&str, f64> = scores
        .iter()
        .map(|s| (s.student_id.as_str(), s.posttest_score))
        .collect();
    let srl_final = final_srl_means(surveys, final_checkpoint);
    let try_ratio = lifetime_try_ratios(interactions);

    // Inner join on the intersection of the three id sets.
    let joined: Vec<&str> = posttest
        .keys()
        .filter(|id| srl_final.contains_key(**id) && try_ratio.contains_key(**id))
        .copied()
        .collect();

    let mut dropped: Vec<String> = posttest
        .keys()
        .chain(srl_final.keys())
        .chain(try_ratio.keys())
        .filter(|id| !joined.contains(*id))
        .map(|id| id.to_string())
        .collect();
    dropped.sort();
    dropped.dedup();
    if !dropped.is_empty() {
        log::warn!(
            "triangulation: dropping {} student(s) missing from at least one source: {}",
            dropped.len(),
            dropped.join(", ")
        );
    }

    if joined.is_empty() {
        return Err(EdustatError::EmptyCohort(
            "no student appears in all three data sources".to_string(),
        ));
    }
    log::info!("triangulation: joined cohort of {} student(s)", joined.len());

    let columns = [
        (
            POSTTEST_LABEL.to_string(),
            joined.iter().map(|id| posttest[id]).collect::<Vec<f64>>(),
        ),
        (
            SRL_LABEL.to_string(),
            joined.iter().map(|id| srl_final[id]).collect::<Vec<f64>>(),
        ),
        (
            TRY_RATIO_LABEL.to_string(),
            joined.iter().map(|id| try_ratio[id]).collect::<Vec<f64>>(),
        ),
    ];

    Ok(Triangulation {
        matrix: correlation_matrix(&columns)?,
        cohort_size: joined.len(),
        dropped_students: dropped,
    })
}

/// Mean self-regulation score per student at the final checkpoint week.
fn final_srl_means(surveys: &[SurveyRecord], final_checkpoint: u32) -> BTreeMap<&str, f64> {
    let mut sums: BTreeMap<&str, (f64, usize)> = BTreeMap::new();
    for row in surveys.iter().filter(|r| r.week == final_checkpoint) {
        let entry = sums.entry(row.student_id.as_str()).or_insert((0.0, 0));
        entry.0 += row.srl_score;
        entry.1 += 1;
    }
    sums.into_iter()
        .map(|(id, (sum, count))| (id, sum / count as f64))
        .collect()
}

/// Fraction of "yes" rows over all of each student's log rows, any week.
fn lifetime_try_ratios(interactions: &[InteractionRecord]) -> BTreeMap<&str, f64> {
    let mut counts: BTreeMap<&str, (usize, usize)> = BTreeMap::new();
    for row in interactions {
        let entry = counts.entry(row.student_id.as_str()).or_insert((0, 0));
        entry.0 += 1;
        if row.tried_before_ai.is_yes() {
            entry.1 += 1;
        }
    }
    counts
        .into_iter()
        .map(|(id, (total, yes))| (id, yes as f64 / total as f64))
        .collect()
}
