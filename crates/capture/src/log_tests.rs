// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use super::*;
use rstest::rstest;
use std::path::PathBuf;

fn args(phase: &str) -> InvocationArgs {
    InvocationArgs {
        phase: phase.to_string(),
        binary: PathBuf::from("/usr/bin/terraform"),
        working_dir: PathBuf::from("/tmp/fixture"),
        args: vec![phase.to_string(), "-no-color".to_string()],
        attempt: 1,
    }
}

fn failure() -> InvocationOutcome {
    InvocationOutcome::Failure {
        exit_code: Some(1),
        message: "Error: Invalid reference".to_string(),
    }
}

#[test]
fn new_log_is_empty() {
    let log = CaptureLog::new();
    assert!(log.is_empty());
    assert_eq!(log.len(), 0);
}

#[test]
fn record_assigns_sequence_numbers() {
    let log = CaptureLog::new();
    log.record(args("init"), InvocationOutcome::Success { output_bytes: 10 });
    log.record(args("plan"), InvocationOutcome::Success { output_bytes: 20 });

    let records = log.records();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].seq, 0);
    assert_eq!(records[1].seq, 1);
    assert_eq!(records[1].args.phase, "plan");
}

#[test]
fn last_returns_tail_in_order() {
    let log = CaptureLog::new();
    for phase in ["init", "plan", "validate"] {
        log.record(args(phase), InvocationOutcome::Success { output_bytes: 0 });
    }

    let tail = log.last(2);
    let phases: Vec<_> = tail.iter().map(|r| r.args.phase.as_str()).collect();
    assert_eq!(phases, ["plan", "validate"]);
}

#[rstest]
#[case("init", 2)]
#[case("plan", 1)]
#[case("validate", 0)]
fn find_by_phase_filters(#[case] phase: &str, #[case] expected: usize) {
    let log = CaptureLog::new();
    log.record(args("init"), InvocationOutcome::Success { output_bytes: 0 });
    log.record(args("plan"), failure());
    log.record(args("init"), InvocationOutcome::Success { output_bytes: 0 });

    assert_eq!(log.find_by_phase(phase).len(), expected);
}

#[test]
fn failures_only_returns_failed_records() {
    let log = CaptureLog::new();
    log.record(args("init"), InvocationOutcome::Success { output_bytes: 5 });
    log.record(args("plan"), failure());

    let failures = log.failures();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].args.phase, "plan");
}

#[test]
fn clones_share_records() {
    let log = CaptureLog::new();
    let clone = log.clone();
    clone.record(args("init"), InvocationOutcome::Success { output_bytes: 0 });

    assert_eq!(log.len(), 1);
    log.clear();
    assert!(clone.is_empty());
}

#[test]
fn with_file_writes_jsonl() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("capture.jsonl");

    let log = CaptureLog::with_file(&path).unwrap();
    log.record(args("init"), InvocationOutcome::Success { output_bytes: 3 });
    log.record(args("plan"), failure());

    let content = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<_> = content.lines().collect();
    assert_eq!(lines.len(), 2);

    let second: InvocationRecord = serde_json::from_str(lines[1]).unwrap();
    assert_eq!(second.seq, 1);
    assert_eq!(second.outcome, failure());
}

#[test]
fn outcome_serializes_with_type_tag() {
    let json = serde_json::to_value(InvocationOutcome::Success { output_bytes: 7 }).unwrap();
    assert_eq!(json["type"], "success");
    assert_eq!(json["output_bytes"], 7);
}

#[test]
fn sequence_keeps_counting_after_clear() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("capture.jsonl");

    let log = CaptureLog::with_file(&path).unwrap();
    assert_eq!(log.record(args("init"), InvocationOutcome::Success { output_bytes: 0 }), 0);
    log.clear();
    assert_eq!(log.record(args("plan"), InvocationOutcome::Success { output_bytes: 0 }), 1);

    assert_eq!(log.records()[0].seq, 1);
    let seqs: Vec<u64> = std::fs::read_to_string(&path)
        .unwrap()
        .lines()
        .map(|l| serde_json::from_str::<InvocationRecord>(l).unwrap().seq)
        .collect();
    assert_eq!(seqs, [0, 1]);
}

#[test]
fn clones_draw_from_one_sequence() {
    let log = CaptureLog::new();
    let clone = log.clone();
    log.record(args("init"), InvocationOutcome::Success { output_bytes: 0 });
    clone.record(args("plan"), InvocationOutcome::Success { output_bytes: 0 });
    log.record(args("plan"), failure());

    let seqs: Vec<u64> = clone.records().iter().map(|r| r.seq).collect();
    assert_eq!(seqs, [0, 1, 2]);
}

#[test]
fn last_with_more_than_recorded_returns_everything() {
    let log = CaptureLog::new();
    log.record(args("init"), InvocationOutcome::Success { output_bytes: 0 });
    assert_eq!(log.last(5).len(), 1);
    assert!(CaptureLog::new().last(3).is_empty());
}
