//! Pipeline configuration.
//!
//! The checkpoint weeks and phase thresholds were hard-coded in the original
//! study scripts; here they are explicit configuration so the analysis
//! generalizes beyond exactly three checkpoints. Loaded from an optional
//! `edustat.toml`, with every field defaulting to the study's values.

use crate::core::{EdustatError, Result};
use crate::phase::PhaseBoundaries;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "edustat.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Directory holding the three input CSV files.
    #[serde(default = "default_data_root")]
    pub data_root: PathBuf,

    /// Directory for the four PNG figures, created if absent.
    #[serde(default = "default_figures_dir")]
    pub figures_dir: PathBuf,

    /// Path of the plain-text summary report.
    #[serde(default = "default_report_path")]
    pub report_path: PathBuf,

    /// Survey collection weeks, ascending. The last one is the "final"
    /// checkpoint used by the triangulation step.
    #[serde(default = "default_checkpoints")]
    pub checkpoints: Vec<u32>,

    /// Week-to-phase thresholds.
    #[serde(default)]
    pub phases: PhaseBoundaries,

    #[serde(default = "default_scores_file")]
    pub scores_file: String,

    #[serde(default = "default_survey_file")]
    pub survey_file: String,

    #[serde(default = "default_interactions_file")]
    pub interactions_file: String,
}

fn default_data_root() -> PathBuf {
    PathBuf::from("data")
}

fn default_figures_dir() -> PathBuf {
    PathBuf::from("results/figures")
}

fn default_report_path() -> PathBuf {
    PathBuf::from("results/summary_stats.txt")
}

fn default_checkpoints() -> Vec<u32> {
    vec![6, 12, 17]
}

fn default_scores_file() -> String {
    "test_scores.csv".to_string()
}

fn default_survey_file() -> String {
    "survey_data.csv".to_string()
}

fn default_interactions_file() -> String {
    "interaction_log.csv".to_string()
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            data_root: default_data_root(),
            figures_dir: default_figures_dir(),
            report_path: default_report_path(),
            checkpoints: default_checkpoints(),
            phases: PhaseBoundaries::default(),
            scores_file: default_scores_file(),
            survey_file: default_survey_file(),
            interactions_file: default_interactions_file(),
        }
    }
}

impl AnalysisConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(EdustatError::MissingFile {
                path: path.to_path_buf(),
            });
        }
        let content = fs::read_to_string(path)?;
        let config: AnalysisConfig = toml::from_str(&content)
            .map_err(|e| EdustatError::Config(format!("{}: {e}", path.display())))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from an explicit path, from `edustat.toml` in the working
    /// directory if present, or fall back to the defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => {
                let local = Path::new(DEFAULT_CONFIG_FILE);
                if local.is_file() {
                    Self::from_file(local)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.checkpoints.len() < 2 {
            return Err(EdustatError::Config(format!(
                "at least 2 checkpoint weeks are required, got {}",
                self.checkpoints.len()
            )));
        }
        for pair in self.checkpoints.windows(2) {
            if pair[1] <= pair[0] {
                return Err(EdustatError::Config(format!(
                    "checkpoint weeks must be strictly ascending, got {} after {}",
                    pair[1], pair[0]
                )));
            }
        }
        Ok(())
    }

    /// The last checkpoint week, used for the final self-regulation score.
    pub fn final_checkpoint(&self) -> u32 {
        *self.checkpoints.last().expect("validated non-empty")
    }

    pub fn scores_path(&self) -> PathBuf {
        self.data_root.join(&self.scores_file)
    }

    pub fn survey_path(&self) -> PathBuf {
        self.data_root.join(&self.survey_file)
    }

    pub fn interactions_path(&self) -> PathBuf {
        self.data_root.join(&self.interactions_file)
    }

    /// Serialize to TOML, used by `edustat init`.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| EdustatError::Config(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_study_design() {
        let config = AnalysisConfig::default();
        assert_eq!(config.checkpoints, vec![6, 12, 17]);
        assert_eq!(config.final_checkpoint(), 17);
        assert_eq!(config.scores_path(), PathBuf::from("data/test_scores.csv"));
        config.validate().unwrap();
    }

    #[test]
    fn partial_toml_fills_in_defaults() {
        let config: AnalysisConfig = toml::from_str("checkpoints = [4, 9, 15]").unwrap();
        assert_eq!(config.checkpoints, vec![4, 9, 15]);
        assert_eq!(config.data_root, PathBuf::from("data"));
    }

    #[test]
    fn unsorted_checkpoints_are_rejected() {
        let config = AnalysisConfig {
            checkpoints: vec![12, 6, 17],
            ..AnalysisConfig::default()
        };
        assert!(matches!(config.validate(), Err(EdustatError::Config(_))));
    }

    #[test]
    fn too_few_checkpoints_are_rejected() {
        let config = AnalysisConfig {
            checkpoints: vec![17],
            ..AnalysisConfig::default()
        };
        assert!(matches!(config.validate(), Err(EdustatError::Config(_))));
    }

    #[test]
    fn round_trips_through_toml() {
        let config = AnalysisConfig::default();
        let text = config.to_toml().unwrap();
        let parsed: AnalysisConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }
}
