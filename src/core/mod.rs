//! Core data model: the three input tables and the records they contain.
//!
//! All records are immutable once loaded. Each run loads the tables once,
//! holds them in memory for the duration of the run, and discards them at
//! process exit.

pub mod errors;

pub use errors::{EdustatError, Result};

use serde::{Deserialize, Deserializer, Serialize};

/// One row of the pretest/posttest score table. One row per student.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub student_id: String,
    pub pretest_score: f64,
    pub posttest_score: f64,
}

/// One survey response at a checkpoint week. A student may have zero or
/// more responses per week; duplicates are mean-aggregated downstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurveyRecord {
    pub student_id: String,
    pub week: u32,
    pub ai_dependency_score: f64,
    pub srl_score: f64,
}

/// One AI-interaction log entry. Many rows per student-week.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionRecord {
    pub student_id: String,
    pub week: u32,
    pub tried_before_ai: TriedBeforeAi,
    pub problem_type: String,
}

/// Whether the student reported attempting the problem independently
/// before consulting the AI assistant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TriedBeforeAi {
    Yes,
    No,
}

impl TriedBeforeAi {
    pub fn is_yes(self) -> bool {
        matches!(self, TriedBeforeAi::Yes)
    }
}

// Accept "yes"/"no" in any letter case; the logs are hand-entered.
impl<'de> Deserialize<'de> for TriedBeforeAi {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        match raw.trim().to_ascii_lowercase().as_str() {
            "yes" => Ok(TriedBeforeAi::Yes),
            "no" => Ok(TriedBeforeAi::No),
            other => Err(serde::de::Error::custom(format!(
                "tried_before_ai must be \"yes\" or \"no\", got \"{other}\""
            ))),
        }
    }
}

/// The three loaded tables for one pipeline run.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub scores: Vec<ScoreRecord>,
    pub surveys: Vec<SurveyRecord>,
    pub interactions: Vec<InteractionRecord>,
}
