mod common;

use common::{FIXTURE_NOW, assert_success, fixture, run_cookoff, stdout};

#[test]
fn score_stdout_keeps_input_order() {
    let output = run_cookoff(&["score", &fixture("items.json"), "--now", FIXTURE_NOW]);
    assert_success(&output);

    let rows: Vec<serde_json::Value> = serde_json::from_str(&stdout(&output)).unwrap();
    let ids: Vec<&str> = rows.iter().map(|r| r["id"].as_str().unwrap()).collect();
    assert_eq!(ids, vec!["smoked-brisket", "ribs", "old-chili", "fresh-salsa"]);
    assert!(rows.iter().all(|r| r.as_object().unwrap().len() == 2));
}

#[test]
fn score_matches_rank() {
    let scored = run_cookoff(&["score", &fixture("items.json"), "--now", FIXTURE_NOW]);
    let ranked = run_cookoff(&[
        "rank",
        &fixture("items.json"),
        "--now",
        FIXTURE_NOW,
        "--format",
        "json",
    ]);
    assert_success(&scored);
    assert_success(&ranked);

    let scored: Vec<serde_json::Value> = serde_json::from_str(&stdout(&scored)).unwrap();
    let ranked: Vec<serde_json::Value> = serde_json::from_str(&stdout(&ranked)).unwrap();

    for row in &scored {
        let twin = ranked.iter().find(|r| r["id"] == row["id"]).unwrap();
        assert_eq!(row["trending_score"], twin["trending_score"]);
    }
}

#[test]
fn score_writes_output_file_and_event() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("scores.json");
    let events = dir.path().join("events.jsonl");

    let output = run_cookoff(&[
        "score",
        &fixture("items.yaml"),
        "--now",
        FIXTURE_NOW,
        "--output",
        out.to_str().unwrap(),
        "--events-file",
        events.to_str().unwrap(),
    ]);
    assert_success(&output);
    assert!(stdout(&output).is_empty());

    let rows: Vec<serde_json::Value> =
        serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(rows.len(), 2);

    let event: serde_json::Value =
        serde_json::from_str(std::fs::read_to_string(&events).unwrap().trim()).unwrap();
    assert_eq!(event["type"], "ScoresWritten");
    assert_eq!(event["rows"], 2);
}

#[test]
fn score_every_rejects_zero_period() {
    let output = run_cookoff(&["score", &fixture("items.json"), "--every", "0s"]);
    assert_eq!(output.status.code(), Some(64));
}
