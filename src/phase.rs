//! Pedagogical phase labeling.
//!
//! The semester is divided into three phases by week number. The thresholds
//! live in one place (`PhaseBoundaries`) so every analysis that groups by
//! phase agrees on the labeling.

use crate::core::{EdustatError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Pedagogical stage derived from the week number. The enum order is the
/// pedagogical order and is relied on for presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Orientation,
    Transition,
    Autonomous,
}

impl Phase {
    /// All phases in pedagogical order.
    pub fn all() -> [Phase; 3] {
        [Phase::Orientation, Phase::Transition, Phase::Autonomous]
    }

    pub fn name(self) -> &'static str {
        match self {
            Phase::Orientation => "orientation",
            Phase::Transition => "transition",
            Phase::Autonomous => "autonomous",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// One phase threshold: weeks up to and including `upper_week` belong to
/// `phase`, unless an earlier boundary claimed them first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseBoundary {
    pub upper_week: u32,
    pub phase: Phase,
}

/// The authoritative week-to-phase mapping. Boundaries are checked in
/// ascending order; weeks above every boundary get the fallback phase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseBoundaries {
    boundaries: Vec<PhaseBoundary>,
    fallback: Phase,
}

impl Default for PhaseBoundaries {
    fn default() -> Self {
        Self {
            boundaries: vec![
                PhaseBoundary {
                    upper_week: 6,
                    phase: Phase::Orientation,
                },
                PhaseBoundary {
                    upper_week: 12,
                    phase: Phase::Transition,
                },
            ],
            fallback: Phase::Autonomous,
        }
    }
}

impl PhaseBoundaries {
    /// Build a custom mapping. Boundaries must be strictly ascending in
    /// `upper_week`.
    pub fn new(boundaries: Vec<PhaseBoundary>, fallback: Phase) -> Result<Self> {
        for pair in boundaries.windows(2) {
            if pair[1].upper_week <= pair[0].upper_week {
                return Err(EdustatError::Config(format!(
                    "phase boundaries must be strictly ascending, got {} after {}",
                    pair[1].upper_week, pair[0].upper_week
                )));
            }
        }
        Ok(Self {
            boundaries,
            fallback,
        })
    }

    /// Label a week with its phase. Total over all week numbers.
    pub fn label(&self, week: u32) -> Phase {
        self.boundaries
            .iter()
            .find(|b| week <= b.upper_week)
            .map(|b| b.phase)
            .unwrap_or(self.fallback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_thresholds_match_the_study_design() {
        let phases = PhaseBoundaries::default();
        assert_eq!(phases.label(1), Phase::Orientation);
        assert_eq!(phases.label(6), Phase::Orientation);
        assert_eq!(phases.label(7), Phase::Transition);
        assert_eq!(phases.label(12), Phase::Transition);
        assert_eq!(phases.label(13), Phase::Autonomous);
        assert_eq!(phases.label(17), Phase::Autonomous);
    }

    #[test]
    fn labeling_is_monotone_in_the_pedagogical_order() {
        let phases = PhaseBoundaries::default();
        let mut previous = phases.label(0);
        for week in 1..40 {
            let current = phases.label(week);
            assert!(current >= previous, "phase regressed at week {week}");
            previous = current;
        }
    }

    #[test]
    fn custom_boundaries_apply() {
        let phases = PhaseBoundaries::new(
            vec![
                PhaseBoundary {
                    upper_week: 4,
                    phase: Phase::Orientation,
                },
                PhaseBoundary {
                    upper_week: 10,
                    phase: Phase::Transition,
                },
            ],
            Phase::Autonomous,
        )
        .unwrap();
        assert_eq!(phases.label(5), Phase::Transition);
        assert_eq!(phases.label(11), Phase::Autonomous);
    }

    #[test]
    fn descending_boundaries_are_rejected() {
        let result = PhaseBoundaries::new(
            vec![
                PhaseBoundary {
                    upper_week: 12,
                    phase: Phase::Orientation,
                },
                PhaseBoundary {
                    upper_week: 6,
                    phase: Phase::Transition,
                },
            ],
            Phase::Autonomous,
        );
        assert!(matches!(result, Err(EdustatError::Config(_))));
    }
}
