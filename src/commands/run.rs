//! The `run` command: the whole pipeline, top to bottom.
//!
//! Load the three tables, run the four analyses independently, render a
//! figure per successful analysis, write the text report, and exit
//! non-zero if anything failed. The analyses are fault-isolated: one
//! failure never stops the others.

use crate::analysis::{
    analyze_behavior, analyze_trends, compare_ability, triangulate, PipelineResults,
};
use crate::cli::ConsoleFormat;
use crate::config::AnalysisConfig;
use crate::core::Dataset;
use crate::figures::{self, ABILITY_FIGURE, BEHAVIOR_FIGURE, HEATMAP_FIGURE, TRENDS_FIGURE};
use crate::io::{self, load_dataset, JsonWriter, ReportWriter, SummaryWriter};
use anyhow::{Context, Result};
use colored::Colorize;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

pub struct RunConfig {
    pub config: Option<PathBuf>,
    pub data_root: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub format: ConsoleFormat,
}

pub fn handle_run(run: RunConfig) -> Result<()> {
    let started = chrono::Utc::now();

    let mut config = AnalysisConfig::load(run.config.as_deref())?;
    if let Some(root) = run.data_root {
        config.data_root = root;
    }
    if let Some(out) = run.output_dir {
        config.figures_dir = out.join("figures");
        config.report_path = out.join("summary_stats.txt");
    }
    config.validate()?;

    let dataset = load_dataset(&config).context("failed to load input data")?;

    io::ensure_dir(&config.figures_dir)?;
    let results = run_analyses(&dataset, &config);

    if let Some(parent) = config.report_path.parent() {
        io::ensure_dir(parent)?;
    }
    let report_file = File::create(&config.report_path)?;
    ReportWriter::new(BufWriter::new(report_file)).write_summary(&results)?;
    log::info!("report written to {}", config.report_path.display());

    match run.format {
        ConsoleFormat::Text => print_summary(&results, &config, started),
        ConsoleFormat::Json => {
            JsonWriter::new(std::io::stdout().lock()).write_summary(&results)?;
        }
    }

    let failed = results.failures().len();
    if failed > 0 {
        anyhow::bail!("{failed} of 4 analyses failed");
    }
    Ok(())
}

/// Run the four analyses, each isolated from the others. A figure that
/// fails to render counts as a failure of its analysis.
pub fn run_analyses(dataset: &Dataset, config: &AnalysisConfig) -> PipelineResults {
    let ability = compare_ability(&dataset.scores).and_then(|result| {
        figures::ability::render(
            &result,
            &dataset.scores,
            &config.figures_dir.join(ABILITY_FIGURE),
        )?;
        Ok(result)
    });

    let trends = analyze_trends(&dataset.surveys, &config.checkpoints).and_then(|result| {
        figures::trends::render(&result, &config.figures_dir.join(TRENDS_FIGURE))?;
        Ok(result)
    });

    let behavior = analyze_behavior(&dataset.interactions, &config.phases).and_then(|result| {
        figures::behavior::render(&result, &config.figures_dir.join(BEHAVIOR_FIGURE))?;
        Ok(result)
    });

    let triangulation = triangulate(
        &dataset.scores,
        &dataset.surveys,
        &dataset.interactions,
        config.final_checkpoint(),
    )
    .and_then(|result| {
        figures::heatmap::render(&result.matrix, &config.figures_dir.join(HEATMAP_FIGURE))?;
        Ok(result)
    });

    PipelineResults {
        ability,
        trends,
        behavior,
        triangulation,
    }
}

fn print_summary(
    results: &PipelineResults,
    config: &AnalysisConfig,
    started: chrono::DateTime<chrono::Utc>,
) {
    println!("{}", "edustat analysis summary".bold());
    println!("started {}", started.format("%Y-%m-%d %H:%M:%S UTC"));
    println!();

    if let Ok(ability) = &results.ability {
        let test = &ability.test;
        println!(
            "{} ability: t({}) = {:.3}, p = {:.4}, d = {:.3}",
            "ok".green().bold(),
            test.df,
            test.statistic,
            test.p_value,
            test.cohens_d
        );
    }
    if let Ok(trends) = &results.trends {
        println!(
            "{} trends: AI dependency chi2 = {:.3} (p = {:.4}), SRL chi2 = {:.3} (p = {:.4})",
            "ok".green().bold(),
            trends.ai_dependency.test.statistic,
            trends.ai_dependency.test.p_value,
            trends.self_regulation.test.statistic,
            trends.self_regulation.test.p_value
        );
    }
    if let Ok(behavior) = &results.behavior {
        let ratios: Vec<String> = behavior
            .phase_ratios
            .iter()
            .map(|r| match r.percent {
                Some(p) => format!("{} {:.1}%", r.phase, p),
                None => format!("{} n/a", r.phase),
            })
            .collect();
        println!("{} behavior: {}", "ok".green().bold(), ratios.join(", "));
    }
    if let Ok(triangulation) = &results.triangulation {
        println!(
            "{} triangulation: {} student(s) joined",
            "ok".green().bold(),
            triangulation.cohort_size
        );
    }

    for (name, error) in results.failures() {
        println!("{} {name}: {error}", "failed".red().bold());
    }

    println!();
    println!("figures: {}", config.figures_dir.display());
    println!("report:  {}", config.report_path.display());
}
