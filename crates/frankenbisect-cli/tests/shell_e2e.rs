//! End-to-end reduction through a real shell-command oracle.

#![cfg(unix)]

use std::fs;
use std::time::Duration;

use frankenbisect_cli::{ShellOracle, read_line_items, write_line_items};
use frankenbisect_core::{BisectError, Bisector};

fn lines(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

/// Write a `/bin/sh` script that fails (exit 1) exactly when the candidate
/// file (available as `$f`) satisfies `condition`, and return the oracle
/// command string.
fn failing_when(dir: &tempfile::TempDir, condition: &str) -> String {
    let script = dir.path().join("check.sh");
    let body = format!("#!/bin/sh\nf=\"$1\"\nif {condition}; then exit 1; fi\nexit 0\n");
    fs::write(&script, body).expect("write check script");
    format!("sh {}", script.display())
}

#[test]
fn reduces_a_log_to_the_single_poison_line() {
    let dir = tempfile::tempdir().unwrap();
    let command = failing_when(&dir, "grep -q BOOM \"$f\"");
    let oracle = ShellOracle::new(&command).unwrap();

    let items = lines(&["setup", "warmup", "BOOM", "teardown", "cleanup"]);
    let reduced = Bisector::new().run(&oracle, &items).unwrap();
    assert_eq!(reduced, lines(&["BOOM"]));
}

#[test]
fn reduces_to_a_pair_straddling_the_split() {
    let dir = tempfile::tempdir().unwrap();
    // Fails only when both markers survive.
    let command = failing_when(&dir, "grep -q ALPHA \"$f\" && grep -q OMEGA \"$f\"");
    let oracle = ShellOracle::new(&command).unwrap();

    let items = lines(&["ALPHA", "two", "three", "four", "OMEGA"]);
    let reduced = Bisector::new().run(&oracle, &items).unwrap();
    assert_eq!(reduced, lines(&["ALPHA", "OMEGA"]));
}

#[test]
fn full_input_that_passes_is_reported_as_precondition_violation() {
    let dir = tempfile::tempdir().unwrap();
    let command = failing_when(&dir, "grep -q NEVER-PRESENT \"$f\"");
    let oracle = ShellOracle::new(&command).unwrap();

    let items = lines(&["a", "b", "c"]);
    let err = Bisector::new().run(&oracle, &items).unwrap_err();
    assert!(matches!(err, BisectError::FullInputSucceeded));
}

#[test]
fn oracle_timeout_aborts_the_reduction() {
    let dir = tempfile::tempdir().unwrap();
    let script = dir.path().join("slow.sh");
    fs::write(&script, "#!/bin/sh\nsleep 10\n").unwrap();
    let oracle = ShellOracle::new(&format!("sh {}", script.display()))
        .unwrap()
        .with_timeout(Duration::from_millis(100));

    let items = lines(&["a", "b", "c"]);
    let err = Bisector::new().run(&oracle, &items).unwrap_err();
    assert!(matches!(err, BisectError::OracleTimeout { .. }));
}

#[test]
fn file_items_round_trip_through_reduction() {
    let dir = tempfile::tempdir().unwrap();
    let input_path = dir.path().join("input.txt");
    fs::write(&input_path, "keep-me\nnoise-1\nnoise-2\nnoise-3\n").unwrap();

    let command = failing_when(&dir, "grep -q keep-me \"$f\"");
    let oracle = ShellOracle::new(&command).unwrap();

    let items = read_line_items(&input_path).unwrap();
    let reduced = Bisector::new().run(&oracle, &items).unwrap();
    assert_eq!(reduced, lines(&["keep-me"]));

    let output_path = write_line_items(&reduced).unwrap();
    assert_eq!(fs::read_to_string(&output_path).unwrap(), "keep-me\n");
    fs::remove_file(&output_path).unwrap();
}
