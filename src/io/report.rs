//! Summary report writers.
//!
//! The plain-text report is the canonical artifact: fixed section order,
//! fixed float precision, no timestamps, so re-running the pipeline on
//! unchanged input produces bit-identical bytes. A JSON writer renders the
//! same content for machine consumption.

use crate::analysis::{
    AbilityComparison, BehaviorAnalysis, PipelineResults, TrendAnalysis, TrendResult,
    Triangulation,
};
use crate::core::Result;
use serde::Serialize;
use std::io::Write;

const RULE: &str = "============================================================";

/// Writes the collected pipeline results in one format.
pub trait SummaryWriter {
    fn write_summary(&mut self, results: &PipelineResults) -> Result<()>;
}

/// Plain-text report writer.
pub struct ReportWriter<W: Write> {
    writer: W,
}

impl<W: Write> ReportWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    fn write_ability(&mut self, ability: &AbilityComparison) -> Result<()> {
        let test = &ability.test;
        writeln!(self.writer, "[1] Programming ability (pretest vs posttest)")?;
        writeln!(
            self.writer,
            "  paired t-test: t({}) = {:.3}, p = {:.4}",
            test.df, test.statistic, test.p_value
        )?;
        writeln!(self.writer, "  Cohen's d: {:.3}", test.cohens_d)?;
        writeln!(
            self.writer,
            "  pretest:  M = {:.2}, SD = {:.2}, n = {}",
            ability.pretest.mean, ability.pretest.std_dev, ability.pretest.n
        )?;
        writeln!(
            self.writer,
            "  posttest: M = {:.2}, SD = {:.2}, n = {}",
            ability.posttest.mean, ability.posttest.std_dev, ability.posttest.n
        )?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_trend(&mut self, result: &TrendResult) -> Result<()> {
        writeln!(
            self.writer,
            "  {} Friedman test: chi2({}) = {:.3}, p = {:.4}",
            result.measure, result.test.df, result.test.statistic, result.test.p_value
        )?;
        for checkpoint in &result.checkpoints {
            writeln!(
                self.writer,
                "    week {:>2}: M = {:.2}, SD = {:.2}",
                checkpoint.week, checkpoint.mean, checkpoint.std_dev
            )?;
        }
        Ok(())
    }

    fn write_trends(&mut self, trends: &TrendAnalysis) -> Result<()> {
        writeln!(self.writer, "[2] Longitudinal trends")?;
        self.write_trend(&trends.ai_dependency)?;
        self.write_trend(&trends.self_regulation)?;
        writeln!(
            self.writer,
            "  aligned cohort: {} student(s), {} dropped",
            trends.cohort_size,
            trends.dropped_students.len()
        )?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_behavior(&mut self, behavior: &BehaviorAnalysis) -> Result<()> {
        writeln!(self.writer, "[3] Interaction behavior")?;
        for ratio in &behavior.phase_ratios {
            match ratio.percent {
                Some(percent) => writeln!(
                    self.writer,
                    "  {} try-before-AI: {:.1}% ({} of {} interactions)",
                    ratio.phase, percent, ratio.tried_first_rows, ratio.total_rows
                )?,
                None => writeln!(
                    self.writer,
                    "  {} try-before-AI: no interactions recorded",
                    ratio.phase
                )?,
            }
        }
        for delta in &behavior.deltas {
            writeln!(
                self.writer,
                "  {} -> {}: {:+.1}%",
                delta.from, delta.to, delta.change
            )?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_triangulation(&mut self, triangulation: &Triangulation) -> Result<()> {
        writeln!(self.writer, "[4] Cross-source correlation")?;
        writeln!(
            self.writer,
            "  joined cohort: {} student(s), {} dropped",
            triangulation.cohort_size,
            triangulation.dropped_students.len()
        )?;
        for (row_label, row) in triangulation
            .matrix
            .labels
            .iter()
            .zip(triangulation.matrix.values.iter())
        {
            let cells: Vec<String> = row.iter().map(|v| format!("{v:>6.3}")).collect();
            writeln!(self.writer, "  {:<20} {}", row_label, cells.join(" "))?;
        }
        writeln!(self.writer)?;
        Ok(())
    }
}

impl<W: Write> SummaryWriter for ReportWriter<W> {
    fn write_summary(&mut self, results: &PipelineResults) -> Result<()> {
        writeln!(self.writer, "{RULE}")?;
        writeln!(self.writer, "Semester intervention summary statistics")?;
        writeln!(self.writer, "{RULE}")?;
        writeln!(self.writer)?;

        if let Ok(ability) = &results.ability {
            self.write_ability(ability)?;
        }
        if let Ok(trends) = &results.trends {
            self.write_trends(trends)?;
        }
        if let Ok(behavior) = &results.behavior {
            self.write_behavior(behavior)?;
        }
        if let Ok(triangulation) = &results.triangulation {
            self.write_triangulation(triangulation)?;
        }

        let failures = results.failures();
        if !failures.is_empty() {
            writeln!(self.writer, "[!] failed analyses")?;
            for (name, error) in failures {
                writeln!(self.writer, "  {name}: {error}")?;
            }
            writeln!(self.writer)?;
        }

        self.writer.flush()?;
        Ok(())
    }
}

/// Serializable view of the pipeline results.
#[derive(Serialize)]
pub struct SummaryView<'a> {
    pub ability: Option<&'a AbilityComparison>,
    pub trends: Option<&'a TrendAnalysis>,
    pub behavior: Option<&'a BehaviorAnalysis>,
    pub triangulation: Option<&'a Triangulation>,
    pub failures: Vec<FailureView>,
}

#[derive(Serialize)]
pub struct FailureView {
    pub analysis: &'static str,
    pub error: String,
}

impl<'a> From<&'a PipelineResults> for SummaryView<'a> {
    fn from(results: &'a PipelineResults) -> Self {
        Self {
            ability: results.ability.as_ref().ok(),
            trends: results.trends.as_ref().ok(),
            behavior: results.behavior.as_ref().ok(),
            triangulation: results.triangulation.as_ref().ok(),
            failures: results
                .failures()
                .into_iter()
                .map(|(analysis, error)| FailureView {
                    analysis,
                    error: error.to_string(),
                })
                .collect(),
        }
    }
}

/// JSON report writer.
pub struct JsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> SummaryWriter for JsonWriter<W> {
    fn write_summary(&mut self, results: &PipelineResults) -> Result<()> {
        let view = SummaryView::from(results);
        let json = serde_json::to_string_pretty(&view)
            .map_err(|e| crate::core::EdustatError::Config(e.to_string()))?;
        self.writer.write_all(json.as_bytes())?;
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{compare_ability, PipelineResults};
    use crate::core::{EdustatError, ScoreRecord};
    use pretty_assertions::assert_eq;

    fn sample_results() -> PipelineResults {
        let scores = vec![
            ScoreRecord {
                student_id: "s01".to_string(),
                pretest_score: 50.0,
                posttest_score: 70.0,
            },
            ScoreRecord {
                student_id: "s02".to_string(),
                pretest_score: 60.0,
                posttest_score: 82.0,
            },
        ];
        PipelineResults {
            ability: compare_ability(&scores),
            trends: Err(EdustatError::EmptyCohort("no aligned students".to_string())),
            behavior: Err(EdustatError::EmptyCohort(
                "interaction log has no rows".to_string(),
            )),
            triangulation: Err(EdustatError::ConstantColumn {
                column: "srl_score".to_string(),
            }),
        }
    }

    fn render_text(results: &PipelineResults) -> String {
        let mut buffer = Vec::new();
        ReportWriter::new(&mut buffer).write_summary(results).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn report_contains_sections_and_failures() {
        let text = render_text(&sample_results());
        assert!(text.contains("[1] Programming ability"));
        assert!(text.contains("paired t-test: t(1)"));
        assert!(text.contains("[!] failed analyses"));
        assert!(text.contains("triangulation: constant column"));
        // Failed sections are absent.
        assert!(!text.contains("[2] Longitudinal trends"));
    }

    #[test]
    fn report_is_deterministic() {
        let results = sample_results();
        assert_eq!(render_text(&results), render_text(&results));
    }

    #[test]
    fn json_summary_carries_failures() {
        let mut buffer = Vec::new();
        JsonWriter::new(&mut buffer)
            .write_summary(&sample_results())
            .unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buffer).unwrap();
        assert!(value["ability"].is_object());
        assert!(value["trends"].is_null());
        assert_eq!(value["failures"].as_array().unwrap().len(), 3);
    }
}
