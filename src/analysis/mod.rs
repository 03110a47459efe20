//! The four analysis functions and the collected pipeline results.
//!
//! Each analysis is independent: it consumes the loaded tables, computes
//! its statistics, and returns a result struct. Failures in one analysis
//! never stop the others; the pipeline collects a result-or-error per
//! analysis and reports them together.

pub mod ability;
pub mod behavior;
pub mod triangulation;
pub mod trends;

pub use ability::{compare_ability, AbilityComparison};
pub use behavior::{analyze_behavior, BehaviorAnalysis, PhaseDelta, PhaseRatio, ProblemTypeCount};
pub use triangulation::{triangulate, Triangulation};
pub use trends::{analyze_trends, CheckpointStats, Measure, TrendAnalysis, TrendResult};

use crate::core::{EdustatError, Result};

/// Result-or-error for each of the four analyses.
#[derive(Debug)]
pub struct PipelineResults {
    pub ability: Result<AbilityComparison>,
    pub trends: Result<TrendAnalysis>,
    pub behavior: Result<BehaviorAnalysis>,
    pub triangulation: Result<Triangulation>,
}

impl PipelineResults {
    /// Failed analyses as (name, error) pairs, in pipeline order.
    pub fn failures(&self) -> Vec<(&'static str, &EdustatError)> {
        let mut failures = Vec::new();
        if let Err(e) = &self.ability {
            failures.push(("ability comparison", e));
        }
        if let Err(e) = &self.trends {
            failures.push(("longitudinal trends", e));
        }
        if let Err(e) = &self.behavior {
            failures.push(("behavioral patterns", e));
        }
        if let Err(e) = &self.triangulation {
            failures.push(("triangulation", e));
        }
        failures
    }

    pub fn all_succeeded(&self) -> bool {
        self.failures().is_empty()
    }
}
