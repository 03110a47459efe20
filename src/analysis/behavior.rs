//! Behavioral pattern analysis over the AI-interaction log.
//!
//! Per-phase try-before-AI ratios with deltas between successive phases,
//! and the full-sample distribution of problem types.

use crate::core::{EdustatError, InteractionRecord, Result};
use crate::phase::{Phase, PhaseBoundaries};
use serde::Serialize;
use std::collections::BTreeMap;

/// Try-before-AI ratio for one phase. `percent` is `None` when the phase
/// has no log rows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PhaseRatio {
    pub phase: Phase,
    pub total_rows: usize,
    pub tried_first_rows: usize,
    pub percent: Option<f64>,
}

/// Change in the try-before-AI percentage between two successive phases.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PhaseDelta {
    pub from: Phase,
    pub to: Phase,
    pub change: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProblemTypeCount {
    pub problem_type: String,
    pub count: usize,
    pub percent: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct BehaviorAnalysis {
    /// Always in pedagogical order: orientation, transition, autonomous.
    pub phase_ratios: Vec<PhaseRatio>,
    pub deltas: Vec<PhaseDelta>,
    /// Ordered by descending count, then name.
    pub problem_types: Vec<ProblemTypeCount>,
}

/// Analyze interaction behavior, labeling each row with its phase.
pub fn analyze_behavior(
    interactions: &[InteractionRecord],
    phases: &PhaseBoundaries,
) -> Result<BehaviorAnalysis> {
    if interactions.is_empty() {
        return Err(EdustatError::EmptyCohort(
            "interaction log has no rows".to_string(),
        ));
    }

    let mut totals: BTreeMap<Phase, (usize, usize)> = BTreeMap::new();
    for row in interactions {
        let entry = totals.entry(phases.label(row.week)).or_insert((0, 0));
        entry.0 += 1;
        if row.tried_before_ai.is_yes() {
            entry.1 += 1;
        }
    }

    let phase_ratios: Vec<PhaseRatio> = Phase::all()
        .into_iter()
        .map(|phase| {
            let (total_rows, tried_first_rows) = totals.get(&phase).copied().unwrap_or((0, 0));
            let percent = (total_rows > 0)
                .then(|| tried_first_rows as f64 / total_rows as f64 * 100.0);
            PhaseRatio {
                phase,
                total_rows,
                tried_first_rows,
                percent,
            }
        })
        .collect();

    // Deltas only between successive phases that both have data.
    let deltas = phase_ratios
        .windows(2)
        .filter_map(|pair| {
            Some(PhaseDelta {
                from: pair[0].phase,
                to: pair[1].phase,
                change: pair[1].percent? - pair[0].percent?,
            })
        })
        .collect();

    Ok(BehaviorAnalysis {
        phase_ratios,
        deltas,
        problem_types: problem_type_distribution(interactions),
    })
}

fn problem_type_distribution(interactions: &[InteractionRecord]) -> Vec<ProblemTypeCount> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for row in interactions {
        *counts.entry(row.problem_type.as_str()).or_insert(0) += 1;
    }

    let total = interactions.len() as f64;
    let mut distribution: Vec<ProblemTypeCount> = counts
        .into_iter()
        .map(|(problem_type, count)| ProblemTypeCount {
            problem_type: problem_type.to_string(),
            count,
            percent: count as f64 / total * 100.0,
        })
        .collect();
    // Descending count; the BTreeMap already ordered names for ties.
    distribution.sort_by(|a, b| b.count.cmp(&a.count));
    distribution
}
