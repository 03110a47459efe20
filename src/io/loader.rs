//! CSV dataset loading with schema validation.
//!
//! Loading does parsing only: string to number, string to category. All
//! aggregation and alignment happens in the analysis functions.

use crate::config::AnalysisConfig;
use crate::core::{Dataset, EdustatError, InteractionRecord, Result, ScoreRecord, SurveyRecord};
use serde::de::DeserializeOwned;
use std::path::Path;

const SCORE_COLUMNS: &[&str] = &["student_id", "pretest_score", "posttest_score"];
const SURVEY_COLUMNS: &[&str] = &["student_id", "week", "ai_dependency_score", "srl_score"];
const INTERACTION_COLUMNS: &[&str] = &["student_id", "week", "tried_before_ai", "problem_type"];

/// Load the three input tables named by the configuration.
pub fn load_dataset(config: &AnalysisConfig) -> Result<Dataset> {
    let scores: Vec<ScoreRecord> = load_table(&config.scores_path(), SCORE_COLUMNS)?;
    let surveys: Vec<SurveyRecord> = load_table(&config.survey_path(), SURVEY_COLUMNS)?;
    let interactions: Vec<InteractionRecord> =
        load_table(&config.interactions_path(), INTERACTION_COLUMNS)?;

    log::info!(
        "loaded {} score rows, {} survey rows, {} interaction rows",
        scores.len(),
        surveys.len(),
        interactions.len()
    );

    Ok(Dataset {
        scores,
        surveys,
        interactions,
    })
}

/// Load one CSV table, checking that every required column is present
/// before deserializing rows.
pub fn load_table<T: DeserializeOwned>(path: &Path, required: &[&str]) -> Result<Vec<T>> {
    if !crate::io::file_exists(path) {
        return Err(EdustatError::MissingFile {
            path: path.to_path_buf(),
        });
    }

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)?;

    let headers = reader.headers()?.clone();
    for column in required {
        if !headers.iter().any(|h| h == *column) {
            return Err(EdustatError::schema(
                format!("missing required column `{column}`"),
                path,
            ));
        }
    }

    let mut rows = Vec::new();
    for record in reader.deserialize::<T>() {
        let row = record.map_err(|e| EdustatError::schema(e.to_string(), path))?;
        rows.push(row);
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::TriedBeforeAi;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn csv_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn loads_score_rows() {
        let file = csv_file(
            "student_id,pretest_score,posttest_score\n\
             s01,50,70\n\
             s02,60.5,80.5\n",
        );
        let rows: Vec<ScoreRecord> = load_table(file.path(), SCORE_COLUMNS).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].student_id, "s01");
        assert_eq!(rows[1].posttest_score, 80.5);
    }

    #[test]
    fn extra_columns_are_tolerated() {
        let file = csv_file(
            "student_id,cohort,pretest_score,posttest_score\n\
             s01,A,50,70\n",
        );
        let rows: Vec<ScoreRecord> = load_table(file.path(), SCORE_COLUMNS).unwrap();
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn missing_file_is_reported() {
        let result: Result<Vec<ScoreRecord>> =
            load_table(Path::new("/nonexistent/scores.csv"), SCORE_COLUMNS);
        assert!(matches!(result, Err(EdustatError::MissingFile { .. })));
    }

    #[test]
    fn missing_column_is_a_schema_error() {
        let file = csv_file("student_id,pretest_score\ns01,50\n");
        let result: Result<Vec<ScoreRecord>> = load_table(file.path(), SCORE_COLUMNS);
        match result {
            Err(EdustatError::Schema { message, .. }) => {
                assert!(message.contains("posttest_score"));
            }
            other => panic!("expected Schema error, got {other:?}"),
        }
    }

    #[test]
    fn unparseable_number_is_a_schema_error() {
        let file = csv_file(
            "student_id,pretest_score,posttest_score\n\
             s01,fifty,70\n",
        );
        let result: Result<Vec<ScoreRecord>> = load_table(file.path(), SCORE_COLUMNS);
        assert!(matches!(result, Err(EdustatError::Schema { .. })));
    }

    #[test]
    fn interaction_flags_parse_as_categories() {
        let file = csv_file(
            "student_id,week,tried_before_ai,problem_type\n\
             s01,3,yes,syntax\n\
             s01,14,No,logic\n",
        );
        let rows: Vec<InteractionRecord> = load_table(file.path(), INTERACTION_COLUMNS).unwrap();
        assert_eq!(rows[0].tried_before_ai, TriedBeforeAi::Yes);
        assert_eq!(rows[1].tried_before_ai, TriedBeforeAi::No);
        assert_eq!(rows[1].week, 14);
    }
}
