use std::fs;

use serde_json::json;
use tempfile::TempDir;

use super::*;
use crate::model::AVERAGE_MARKER;

struct Workspace {
    dir: TempDir,
}

impl Workspace {
    fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("tempdir"),
        }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    fn write_json(&self, name: &str, value: Value) -> PathBuf {
        let path = self.path(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("fixture dir");
        }
        fs::write(&path, serde_json::to_vec(&value).expect("fixture json")).expect("fixture");
        path
    }

    fn args(&self) -> Cli {
        Cli {
            queries: self.path("queries.json"),
            ground_truth: self.path("ground_truth.json"),
            dirs: vec![self.dir.path().to_string_lossy().into_owned()],
            systems: Vec::new(),
            out: self.path("report.csv"),
            strict: false,
        }
    }
}

fn read_report(path: &Path) -> Vec<Vec<String>> {
    let mut reader = csv::Reader::from_path(path).expect("report opens");
    reader
        .records()
        .map(|record| {
            record
                .expect("record parses")
                .iter()
                .map(ToOwned::to_owned)
                .collect()
        })
        .collect()
}

#[test]
fn contact_fields_scenario_scores_partial_precision() {
    let ws = Workspace::new();
    ws.write_json("queries.json", json!(["Get customer contact fields"]));
    ws.write_json("ground_truth.json", json!([["email", "phone"]]));
    ws.write_json("results_Control.json", json!([["email", "address", "phone"]]));

    let outcome = run(ws.args()).expect("run succeeds");
    assert_eq!(
        outcome,
        RunOutcome::ReportWritten {
            path: ws.path("report.csv"),
            row_count: 2,
            system_count: 1,
        }
    );

    let rows = read_report(&ws.path("report.csv"));
    assert_eq!(
        rows[0],
        vec![
            "1",
            "Get customer contact fields",
            "Control",
            r#"["email","address","phone"]"#,
            r#"["email","phone"]"#,
            "0.6667",
            "1",
            "0.8",
        ]
    );
    assert_eq!(
        rows[1],
        vec!["", "AVERAGE", "Control", "", "", "0.6667", "1", "0.8"]
    );
}

#[test]
fn wrapped_shapes_score_like_plain_arrays() {
    let ws = Workspace::new();
    ws.write_json("queries.json", json!([{"question": "Order totals"}]));
    ws.write_json(
        "ground_truth.json",
        json!([{"fields": ["total", "currency"]}]),
    );
    ws.write_json(
        "results_Wrapped.json",
        json!([{"retrieved": ["total", "amount", "currency"]}]),
    );

    run(ws.args()).expect("run succeeds");
    let rows = read_report(&ws.path("report.csv"));
    assert_eq!(rows[0][1], "Order totals");
    assert_eq!(rows[0][3], r#"["total","amount","currency"]"#);
    assert_eq!(rows[0][4], r#"["total","currency"]"#);
    assert_eq!(&rows[0][5..], ["0.6667", "1", "0.8"]);
}

#[test]
fn strict_mode_rejects_query_ground_truth_mismatch_without_output() {
    let ws = Workspace::new();
    ws.write_json("queries.json", json!(["a", "b", "c"]));
    ws.write_json("ground_truth.json", json!([["x"], ["y"]]));
    ws.write_json("results_Control.json", json!([["x"], ["y"], ["z"]]));

    let mut args = ws.args();
    args.strict = true;
    let error = run(args).expect_err("strict mismatch should fail");
    assert!(
        error.to_string().contains("3 queries but 2 ground-truth entries"),
        "unexpected error: {error}"
    );
    assert!(!ws.path("report.csv").exists());
}

#[test]
fn strict_mode_rejects_short_system_results() {
    let ws = Workspace::new();
    ws.write_json("queries.json", json!(["a", "b"]));
    ws.write_json("ground_truth.json", json!([["x"], ["y"]]));
    ws.write_json("results_Alpha.json", json!([["x"], ["y"]]));
    ws.write_json("results_Beta.json", json!([["x"]]));

    let mut args = ws.args();
    args.strict = true;
    let error = run(args).expect_err("short system should fail");
    assert!(
        error.to_string().contains("system Beta has 1 results"),
        "unexpected error: {error}"
    );
    assert!(!ws.path("report.csv").exists());
}

#[test]
fn lenient_mode_truncates_to_shortest_input() {
    let ws = Workspace::new();
    ws.write_json("queries.json", json!(["a", "b", "c"]));
    ws.write_json("ground_truth.json", json!([["x"], ["y"]]));
    ws.write_json("results_Control.json", json!([["x"], ["y"], ["z"]]));

    run(ws.args()).expect("lenient run succeeds");
    let rows = read_report(&ws.path("report.csv"));
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0][0], "1");
    assert_eq!(rows[1][0], "2");
    assert_eq!(rows[2][1], AVERAGE_MARKER);
    assert_eq!(&rows[2][5..], ["1", "1", "1"]);
}

#[test]
fn no_discovered_systems_returns_outcome_without_report() {
    let ws = Workspace::new();
    ws.write_json("queries.json", json!(["a"]));
    ws.write_json("ground_truth.json", json!([["x"]]));

    let outcome = run(ws.args()).expect("discovery miss is not an error");
    assert_eq!(outcome, RunOutcome::NoSystemsDiscovered);
    assert!(!ws.path("report.csv").exists());
}

#[test]
fn filter_excluding_every_system_counts_as_no_systems() {
    let ws = Workspace::new();
    ws.write_json("queries.json", json!(["a"]));
    ws.write_json("ground_truth.json", json!([["x"]]));
    ws.write_json("results_Control.json", json!([["x"]]));

    let mut args = ws.args();
    args.systems = vec!["Variant".to_string()];
    assert_eq!(run(args).expect("run"), RunOutcome::NoSystemsDiscovered);
}

#[test]
fn detail_rows_precede_trailing_average_block() {
    let ws = Workspace::new();
    ws.write_json("queries.json", json!(["first", "second"]));
    ws.write_json("ground_truth.json", json!([["a"], ["b"]]));
    ws.write_json("results_Beta.json", json!([["a"], []]));
    ws.write_json("results_Alpha.json", json!([["a"], ["b"]]));

    run(ws.args()).expect("run succeeds");
    let rows = read_report(&ws.path("report.csv"));
    let order = rows
        .iter()
        .map(|row| (row[1].as_str(), row[2].as_str()))
        .collect::<Vec<_>>();
    assert_eq!(
        order,
        vec![
            ("first", "Alpha"),
            ("second", "Alpha"),
            ("first", "Beta"),
            ("second", "Beta"),
            ("AVERAGE", "Alpha"),
            ("AVERAGE", "Beta"),
        ]
    );
    assert_eq!(&rows[5][5..], ["0.5", "0.5", "0.5"]);
}

#[test]
fn results_are_discovered_across_search_directories() {
    let ws = Workspace::new();
    ws.write_json("queries.json", json!(["a"]));
    ws.write_json("ground_truth.json", json!([["x"]]));
    ws.write_json("runs/one/results_One.json", json!([["x"]]));
    ws.write_json("runs/two/results_Two.json", json!([["y"]]));

    let mut args = ws.args();
    args.dirs = vec![
        ws.path("runs/one").to_string_lossy().into_owned(),
        ws.path("runs/two").to_string_lossy().into_owned(),
    ];
    args.out = ws.path("reports/eval.csv");

    let outcome = run(args).expect("run succeeds");
    assert!(matches!(outcome, RunOutcome::ReportWritten { system_count: 2, .. }));
    let rows = read_report(&ws.path("reports/eval.csv"));
    assert_eq!(rows.len(), 4);
}

#[test]
fn empty_system_file_reports_zero_average() {
    let ws = Workspace::new();
    ws.write_json("queries.json", json!(["a"]));
    ws.write_json("ground_truth.json", json!([["x"]]));
    ws.write_json("results_Empty.json", json!([]));

    run(ws.args()).expect("run succeeds");
    let rows = read_report(&ws.path("report.csv"));
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0], vec!["", "AVERAGE", "Empty", "", "", "0", "0", "0"]);
}

#[test]
fn missing_queries_file_is_fatal() {
    let ws = Workspace::new();
    ws.write_json("ground_truth.json", json!([["x"]]));
    ws.write_json("results_Control.json", json!([["x"]]));

    let error = run(ws.args()).expect_err("missing queries should fail");
    assert!(error.to_string().contains("input file not found"));
    assert!(!ws.path("report.csv").exists());
}

#[test]
fn malformed_json_names_the_file() {
    let ws = Workspace::new();
    fs::write(ws.path("queries.json"), "[\"unterminated").expect("fixture");
    ws.write_json("ground_truth.json", json!([["x"]]));

    let error = run(ws.args()).expect_err("malformed json should fail");
    assert!(error.to_string().contains("failed to parse"));
    assert!(error.to_string().contains("queries.json"));
}

#[test]
fn empty_ground_truth_is_fatal() {
    let ws = Workspace::new();
    ws.write_json("queries.json", json!(["a"]));
    ws.write_json("ground_truth.json", json!([]));

    let error = run(ws.args()).expect_err("empty ground truth should fail");
    assert!(error.to_string().contains("ground-truth file contains no entries"));
}

#[test]
fn non_array_system_file_names_system_and_path() {
    let ws = Workspace::new();
    ws.write_json("queries.json", json!(["a"]));
    ws.write_json("ground_truth.json", json!([["x"]]));
    ws.write_json("results_Broken.json", json!({"retrieved": ["x"]}));

    let error = run(ws.args()).expect_err("object results should fail");
    let message = error.to_string();
    assert!(message.contains("system Broken"), "unexpected error: {message}");
    assert!(message.contains("results_Broken.json"), "unexpected error: {message}");
    assert!(!ws.path("report.csv").exists());
}

#[test]
fn loaded_inputs_are_normalized_once() {
    let ws = Workspace::new();
    let queries = ws.write_json("queries.json", json!(["plain", {"prompt": "wrapped"}, null]));
    let ground_truth = ws.write_json(
        "ground_truth.json",
        json!([["a"], {"expected": ["b"]}, {"unknown": ["c"]}]),
    );

    let inputs = load_inputs(&queries, &ground_truth).expect("inputs load");
    assert_eq!(inputs.queries, vec!["plain", "wrapped", ""]);
    assert_eq!(
        inputs.ground_truth,
        vec![vec![json!("a")], vec![json!("b")], Vec::<Value>::new()]
    );
    ensure_aligned_inputs(&inputs).expect("lengths match");
}
