//! Shared integration-test harness for running the `cookoff` binary.

#![allow(dead_code)]

use std::path::PathBuf;
use std::process::{Command, Output};

/// Instant the fixtures are written against.
pub const FIXTURE_NOW: &str = "2025-06-01T12:00:00Z";

/// Environment variables that would leak host settings into a run.
const SCRUBBED_ENV: [&str; 10] = [
    "COOKOFF_CONFIG",
    "COOKOFF_COLOR",
    "COOKOFF_LOG_FORMAT",
    "COOKOFF_LOG_LEVEL",
    "COOKOFF_EVENTS_FILE",
    "COOKOFF_METRICS_PORT",
    "COOKOFF_TICK_INTERVAL_MS",
    "COOKOFF_CLOCK_SKEW_SECS",
    "COOKOFF_MAX_ITEMS",
    "COOKOFF_MAX_SNAPSHOT_SIZE",
];

/// Runs the binary to completion with a scrubbed environment.
#[allow(clippy::missing_panics_doc)]
pub fn run_cookoff(args: &[&str]) -> Output {
    run_cookoff_with_env(args, &[])
}

/// Runs the binary with extra environment variables.
#[allow(clippy::missing_panics_doc)]
pub fn run_cookoff_with_env(args: &[&str], env: &[(&str, &str)]) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_cookoff"));
    for var in SCRUBBED_ENV {
        cmd.env_remove(var);
    }
    cmd.env("NO_COLOR", "1").args(args).envs(env.iter().copied());
    cmd.output().expect("failed to run cookoff")
}

/// Absolute path to a file under `tests/fixtures/`.
#[allow(clippy::missing_panics_doc)]
pub fn fixture(name: &str) -> String {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
        .to_str()
        .expect("non-UTF-8 fixture path")
        .to_string()
}

/// Stdout as text.
pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

/// Stderr as text.
pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

/// Asserts a zero exit, showing stderr otherwise.
#[allow(clippy::missing_panics_doc)]
pub fn assert_success(output: &Output) {
    assert!(
        output.status.success(),
        "expected exit 0, got {:?}: {}",
        output.status.code(),
        stderr(output)
    );
}
