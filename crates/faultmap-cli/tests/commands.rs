//! End-to-end tests for the command implementations.

use std::fs;
use std::path::PathBuf;

use faultmap_cli::cli::{BuildAliasArgs, ClassifyArgs, MatchArgs};
use faultmap_cli::commands::{run_build_alias, run_classify, run_match};

fn write_file(dir: &tempfile::TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

fn match_args(
    source: PathBuf,
    relation: PathBuf,
    config: PathBuf,
    output: Option<PathBuf>,
) -> MatchArgs {
    MatchArgs {
        source,
        relation,
        score: 60,
        config,
        output,
        force: false,
    }
}

#[test]
fn match_run_writes_the_projected_csv() {
    let dir = tempfile::tempdir().unwrap();
    let source = write_file(
        &dir,
        "faults.csv",
        "Area,Description\n\
         Line1,Pump A failed on high temp\n\
         Line1,Conveyor belt snapped in two\n",
    );
    let relation = write_file(
        &dir,
        "causes.csv",
        "Cause,Remedy\n\
         Valve B stuck closed,Free the stem\n\
         Pump A high temperature trip,Clean the cooler\n",
    );
    let config = write_file(
        &dir,
        "config.json",
        r#"{
            "source": { "text": ["Description"] },
            "relation": { "text": ["Cause"] },
            "output": [
                { "header": "Fault", "from": "source", "field": "Description" },
                { "header": "Cause", "from": "relation", "field": "Cause" },
                { "header": "Score", "from": "fuzz", "field": "score" }
            ]
        }"#,
    );
    let output = dir.path().join("out.csv");

    let result = run_match(&match_args(source, relation, config, Some(output.clone()))).unwrap();

    assert_eq!(result.source_rows, 2);
    assert_eq!(result.matched, 1);
    assert!(result.mean_score.is_some());

    let content = fs::read_to_string(&output).unwrap();
    let mut lines = content.lines();
    assert_eq!(lines.next(), Some("Fault,Cause,Score"));
    let row = lines.next().unwrap();
    assert!(row.starts_with("Pump A failed on high temp,"), "row: {row}");
    assert!(row.contains("Pump A high temperature trip"), "row: {row}");
}

#[test]
fn match_run_refuses_an_existing_output() {
    let dir = tempfile::tempdir().unwrap();
    let source = write_file(&dir, "faults.csv", "Description\nPump trip\n");
    let relation = write_file(&dir, "causes.csv", "Cause\nPump trip\n");
    let config = write_file(
        &dir,
        "config.json",
        r#"{ "source": { "text": ["Description"] }, "relation": { "text": ["Cause"] } }"#,
    );
    let output = write_file(&dir, "out.csv", "already here\n");

    let err = run_match(&match_args(source, relation, config, Some(output.clone()))).unwrap_err();
    assert!(err.to_string().contains("already exists"), "err: {err}");
    assert_eq!(fs::read_to_string(&output).unwrap(), "already here\n");
}

#[test]
fn match_run_reports_a_bad_filter_column() {
    let dir = tempfile::tempdir().unwrap();
    let source = write_file(&dir, "faults.csv", "Description\nPump trip\n");
    let relation = write_file(&dir, "causes.csv", "Cause\nPump trip\n");
    let config = write_file(
        &dir,
        "config.json",
        r#"{
            "source": { "filter": "Plant=North", "text": ["Description"] },
            "relation": { "text": ["Cause"] }
        }"#,
    );

    let err = run_match(&match_args(source, relation, config, None)).unwrap_err();
    assert!(err.to_string().contains("Plant"), "err: {err}");
}

#[test]
fn classify_run_counts_each_outcome() {
    let dir = tempfile::tempdir().unwrap();
    let csv = write_file(
        &dir,
        "records.csv",
        "Text\n\
         bearing seizure\n\
         electrical\n\
         zzzz qqqq\n",
    );
    let tree = write_file(
        &dir,
        "tree.json",
        r#"{ "Mechanical": ["Bearing", "Seal"], "Electrical": [] }"#,
    );
    let output = dir.path().join("classified.csv");

    let args = ClassifyArgs {
        csv,
        tree,
        alias: None,
        score: 50,
        column: "Text".to_string(),
        filter: None,
        test: false,
        output: Some(output.clone()),
        force: false,
    };
    let result = run_classify(&args).unwrap();

    assert_eq!(result.rows, 3);
    assert_eq!(result.classified, 1);
    assert_eq!(result.category_only, 1);
    assert_eq!(result.unclassified, 1);

    let content = fs::read_to_string(&output).unwrap();
    let mut lines = content.lines();
    assert_eq!(
        lines.next(),
        Some("text,category,category_score,cause,cause_score")
    );
    let row = lines.next().unwrap();
    assert!(row.starts_with("bearing seizure,Mechanical,"), "row: {row}");
    assert!(row.contains(",Bearing,"), "row: {row}");
}

#[test]
fn classify_run_applies_filter_and_alias() {
    let dir = tempfile::tempdir().unwrap();
    let csv = write_file(
        &dir,
        "records.csv",
        "Area,Text\n\
         Line1,brg seizure\n\
         Line2,bearing seizure\n",
    );
    let tree = write_file(&dir, "tree.yaml", "Mechanical:\n  - Bearing\n");
    let alias = write_file(&dir, "alias.yaml", "bearing:\n  - brg\n");
    let output = dir.path().join("classified.csv");

    let args = ClassifyArgs {
        csv,
        tree,
        alias: Some(alias),
        score: 50,
        column: "Text".to_string(),
        filter: Some("Area=Line1".to_string()),
        test: false,
        output: Some(output.clone()),
        force: false,
    };
    let result = run_classify(&args).unwrap();

    assert_eq!(result.rows, 1);
    assert_eq!(result.classified, 1);
    let content = fs::read_to_string(&output).unwrap();
    assert!(content.contains("bearing seizure"), "content: {content}");
}

#[test]
fn classify_run_rejects_a_missing_text_column() {
    let dir = tempfile::tempdir().unwrap();
    let csv = write_file(&dir, "records.csv", "Description\nbearing seizure\n");
    let tree = write_file(&dir, "tree.json", r#"{ "Mechanical": ["Bearing"] }"#);

    let args = ClassifyArgs {
        csv,
        tree,
        alias: None,
        score: 50,
        column: "Text".to_string(),
        filter: None,
        test: false,
        output: None,
        force: false,
    };
    let err = run_classify(&args).unwrap_err();
    assert!(err.to_string().contains("Text"), "err: {err}");
}

#[test]
fn build_alias_writes_the_skeleton() {
    let dir = tempfile::tempdir().unwrap();
    let tree = write_file(
        &dir,
        "tree.csv",
        "model,C1Name,C2Name\n\
         Press,Mechanical,Bearing\n\
         Press,Mechanical,Seal\n\
         Oven,Thermal,Overheat\n",
    );
    let output = dir.path().join("alias.yaml");

    let args = BuildAliasArgs {
        tree,
        model: Some("Press".to_string()),
        c1name: None,
        output: Some(output.clone()),
        force: false,
    };
    run_build_alias(&args).unwrap();

    let content = fs::read_to_string(&output).unwrap();
    assert!(content.contains("Press:"), "content: {content}");
    assert!(content.contains("Bearing:"), "content: {content}");
    assert!(content.contains("alias1"), "content: {content}");
    assert!(!content.contains("Oven"), "content: {content}");
}

#[test]
fn build_alias_reports_an_empty_selection() {
    let dir = tempfile::tempdir().unwrap();
    let tree = write_file(
        &dir,
        "tree.csv",
        "model,C1Name,C2Name\nPress,Mechanical,Bearing\n",
    );

    let args = BuildAliasArgs {
        tree,
        model: Some("Lathe".to_string()),
        c1name: None,
        output: None,
        force: false,
    };
    let err = run_build_alias(&args).unwrap_err();
    assert!(err.to_string().contains("Lathe"), "err: {err}");
}
