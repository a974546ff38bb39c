use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::process::Command;
use tempfile::tempdir;

const SAMPLE_CSV: &str = "\
STATE,TempMean,DOMean,PHMean,BODMean
Uttarakhand,14,8.5,7.6,1.2
Bihar,26,6.75,7.9,
Bihar,24,,8.1,2.5
,30,5,7,3
";

#[test]
fn cli_shows_help() {
    let mut cmd = Command::cargo_bin("pollution-chart").unwrap();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("pollution-chart"));
}

#[test]
fn render_writes_chart_and_summary() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("rivers.csv");
    let out = dir.path().join("chart.svg");
    let summary = dir.path().join("summary.json");
    fs::write(&input, SAMPLE_CSV).unwrap();

    let mut cmd = Command::cargo_bin("pollution-chart").unwrap();
    cmd.arg("render")
        .arg("--input")
        .arg(&input)
        .arg("--out")
        .arg(&out)
        .arg("--summary")
        .arg(&summary);
    cmd.assert()
        .success()
        .stderr(predicate::str::contains("Skipped 1 row"))
        .stderr(predicate::str::contains("Wrote chart to"));

    assert!(fs::read_to_string(&out).unwrap().contains("Bihar"));

    let rows: serde_json::Value = serde_json::from_str(&fs::read_to_string(&summary).unwrap()).unwrap();
    let rows = rows.as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["STATE"], "Uttarakhand");
    assert_eq!(rows[1]["STATE"], "Bihar");
    assert_eq!(rows[1]["TempMean"], 25.0);
    assert_eq!(rows[1]["DOMean"], 6.75);
    assert_eq!(rows[1]["BODMean"], 2.5);
}

#[test]
fn stats_lists_every_state_and_parameter() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("rivers.csv");
    fs::write(&input, SAMPLE_CSV).unwrap();

    let mut cmd = Command::cargo_bin("pollution-chart").unwrap();
    cmd.args(["render", "--stats", "--params", "TempMean,BODMean", "--input"])
        .arg(&input);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Bihar • TempMean  count=2 missing=0  mean=25"))
        .stdout(predicate::str::contains("Bihar • BODMean  count=1 missing=1  mean=2.5"))
        .stdout(predicate::str::contains("DOMean").not());
}

#[test]
fn bad_parameter_list_fails() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("rivers.csv");
    fs::write(&input, SAMPLE_CSV).unwrap();

    let mut cmd = Command::cargo_bin("pollution-chart").unwrap();
    cmd.args(["render", "--params", "TempMean,TempMean", "--input"])
        .arg(&input);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("TempMean"));
}

#[test]
fn hover_on_unknown_bar_fails() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("rivers.csv");
    fs::write(&input, SAMPLE_CSV).unwrap();

    let mut cmd = Command::cargo_bin("pollution-chart").unwrap();
    cmd.args(["render", "--hover", "Kerala:TempMean", "--input"])
        .arg(&input);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Kerala"));
}
