//! End-to-end pipeline tests against the compiled binary.

use assert_cmd::Command;
use pretty_assertions::assert_eq;
use std::fs;
use std::path::Path;

fn write_scores(dir: &Path) {
    fs::write(
        dir.join("test_scores.csv"),
        "student_id,pretest_score,posttest_score\n\
         s01,45,68\n\
         s02,52,74\n\
         s03,58,71\n\
         s04,61,83\n\
         s05,49,66\n\
         s06,55,79\n",
    )
    .unwrap();
}

fn write_surveys(dir: &Path) {
    // s05 misses week 17 and must be dropped from the aligned cohort;
    // s06 has no surveys at all.
    fs::write(
        dir.join("survey_data.csv"),
        "student_id,week,ai_dependency_score,srl_score\n\
         s01,6,4.2,2.1\n\
         s01,12,3.5,2.9\n\
         s01,17,2.8,3.8\n\
         s02,6,4.5,2.4\n\
         s02,12,3.9,3.1\n\
         s02,17,3.1,4.0\n\
         s03,6,3.8,2.0\n\
         s03,12,3.2,3.3\n\
         s03,17,2.5,4.2\n\
         s04,6,4.0,2.6\n\
         s04,12,3.6,3.0\n\
         s04,17,3.0,3.9\n\
         s05,6,4.4,2.2\n\
         s05,12,3.8,2.8\n",
    )
    .unwrap();
}

fn write_interactions(dir: &Path) {
    fs::write(
        dir.join("interaction_log.csv"),
        "student_id,week,tried_before_ai,problem_type\n\
         s01,2,no,syntax\n\
         s01,5,no,syntax\n\
         s01,9,yes,logic\n\
         s01,15,no,concept\n\
         s02,3,no,concept\n\
         s02,8,yes,logic\n\
         s02,11,yes,syntax\n\
         s02,16,no,debugging\n\
         s03,4,yes,syntax\n\
         s03,10,yes,logic\n\
         s03,14,yes,concept\n\
         s03,17,no,syntax\n\
         s04,6,no,debugging\n\
         s04,12,yes,concept\n\
         s04,13,yes,logic\n\
         s05,7,yes,syntax\n\
         s06,16,yes,logic\n",
    )
    .unwrap();
}

fn write_full_dataset(dir: &Path) {
    write_scores(dir);
    write_surveys(dir);
    write_interactions(dir);
}

fn run_pipeline(data: &Path, out: &Path) -> assert_cmd::assert::Assert {
    Command::cargo_bin("edustat")
        .unwrap()
        .arg("run")
        .arg("--data-root")
        .arg(data)
        .arg("--output-dir")
        .arg(out)
        .assert()
}

#[test]
fn full_pipeline_writes_figures_and_report() {
    let tmp = tempfile::tempdir().unwrap();
    let data = tmp.path().join("data");
    let out = tmp.path().join("results");
    fs::create_dir_all(&data).unwrap();
    write_full_dataset(&data);

    run_pipeline(&data, &out).success();

    for figure in [
        "ability_comparison.png",
        "score_trends.png",
        "behavior_patterns.png",
        "correlation_heatmap.png",
    ] {
        let path = out.join("figures").join(figure);
        assert!(path.is_file(), "missing figure {figure}");
        assert!(fs::metadata(&path).unwrap().len() > 0);
    }

    let report = fs::read_to_string(out.join("summary_stats.txt")).unwrap();
    assert!(report.contains("[1] Programming ability"));
    assert!(report.contains("Cohen's d"));
    assert!(report.contains("[2] Longitudinal trends"));
    assert!(report.contains("AI dependency Friedman test"));
    assert!(report.contains("self-regulated learning Friedman test"));
    // Aligned cohort excludes s05 (missing week 17) and s06 (no surveys).
    assert!(report.contains("aligned cohort: 4 student(s), 2 dropped"));
    assert!(report.contains("[3] Interaction behavior"));
    assert!(report.contains("orientation try-before-AI"));
    assert!(report.contains("[4] Cross-source correlation"));
    assert!(!report.contains("[!] failed analyses"));
}

#[test]
fn rerunning_produces_bit_identical_report() {
    let tmp = tempfile::tempdir().unwrap();
    let data = tmp.path().join("data");
    let out = tmp.path().join("results");
    fs::create_dir_all(&data).unwrap();
    write_full_dataset(&data);

    run_pipeline(&data, &out).success();
    let first = fs::read(out.join("summary_stats.txt")).unwrap();

    run_pipeline(&data, &out).success();
    let second = fs::read(out.join("summary_stats.txt")).unwrap();

    assert_eq!(first, second);
}

#[test]
fn missing_input_file_aborts_the_run() {
    let tmp = tempfile::tempdir().unwrap();
    let data = tmp.path().join("data");
    let out = tmp.path().join("results");
    fs::create_dir_all(&data).unwrap();
    write_scores(&data);
    // Survey and interaction files are absent.

    run_pipeline(&data, &out).failure();
    assert!(!out.join("summary_stats.txt").exists());
}

#[test]
fn analysis_failures_are_isolated() {
    let tmp = tempfile::tempdir().unwrap();
    let data = tmp.path().join("data");
    let out = tmp.path().join("results");
    fs::create_dir_all(&data).unwrap();
    write_scores(&data);
    write_interactions(&data);
    // Valid schema but no survey rows: the two survey-driven analyses
    // fail while ability and behavior still complete.
    fs::write(
        data.join("survey_data.csv"),
        "student_id,week,ai_dependency_score,srl_score\n",
    )
    .unwrap();

    run_pipeline(&data, &out).failure();

    let report = fs::read_to_string(out.join("summary_stats.txt")).unwrap();
    assert!(report.contains("[1] Programming ability"));
    assert!(report.contains("[3] Interaction behavior"));
    assert!(!report.contains("[2] Longitudinal trends"));
    assert!(report.contains("[!] failed analyses"));
    assert!(report.contains("longitudinal trends: empty cohort"));
    assert!(report.contains("triangulation: empty cohort"));

    assert!(out.join("figures").join("ability_comparison.png").is_file());
    assert!(out.join("figures").join("behavior_patterns.png").is_file());
    assert!(!out.join("figures").join("score_trends.png").exists());
}

#[test]
fn json_console_summary_is_well_formed() {
    let tmp = tempfile::tempdir().unwrap();
    let data = tmp.path().join("data");
    let out = tmp.path().join("results");
    fs::create_dir_all(&data).unwrap();
    write_full_dataset(&data);

    let assert = Command::cargo_bin("edustat")
        .unwrap()
        .arg("run")
        .arg("--data-root")
        .arg(&data)
        .arg("--output-dir")
        .arg(&out)
        .arg("--format")
        .arg("json")
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert!(value["ability"]["test"]["statistic"].as_f64().unwrap() > 0.0);
    assert_eq!(value["trends"]["cohort_size"].as_u64().unwrap(), 4);
    assert!(value["failures"].as_array().unwrap().is_empty());
}
