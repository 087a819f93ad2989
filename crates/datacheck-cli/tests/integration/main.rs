//! Integration tests for the datacheck CLI with real databases.
//!
//! These tests are behind the `integration-tests` feature flag and won't run
//! with regular `cargo test`:
//!
//! ```bash
//! TEST_POSTGRES_URL=postgres://... cargo test -p datacheck-cli --features integration-tests
//! ```

#![cfg(feature = "integration-tests")]

mod mysql;
mod postgres;

use std::process::{Command, Output};

/// Run the datacheck CLI with the given arguments and return the output.
pub fn run_cli(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_datacheck"))
        .args(args)
        .output()
        .expect("failed to execute datacheck CLI")
}

/// Statuses from the JSON report, in identifier order.
pub fn statuses(output: &Output) -> Vec<String> {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap_or_else(|e| {
        panic!(
            "Expected valid JSON output, but parsing failed: {}\nOutput was: {}",
            e, stdout
        )
    });

    json["results"]
        .as_array()
        .expect("results array")
        .iter()
        .map(|r| r["status"].as_str().expect("status").to_string())
        .collect()
}
