//! Common test utilities and helpers
//!
//! This module provides shared utilities for integration tests.

#![allow(dead_code)]

use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::TempDir;

/// Test project context
///
/// Creates a temporary directory for test projects and provides
/// utilities for setting up test scenarios.
pub struct TestProject {
    /// Temporary directory for the test project
    pub dir: TempDir,
}

impl TestProject {
    /// Create a new test project in a temporary directory
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Get the path to the test project directory
    pub fn path(&self) -> PathBuf {
        self.dir.path().to_path_buf()
    }

    /// Create a file in the test project
    pub fn create_file(&self, name: &str, content: &str) {
        let path = self.dir.path().join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        std::fs::write(path, content).expect("Failed to write file");
    }

    /// Create a directory in the test project
    pub fn create_dir(&self, name: &str) {
        let path = self.dir.path().join(name);
        std::fs::create_dir_all(path).expect("Failed to create directory");
    }

    /// Check if a file exists in the test project
    pub fn file_exists(&self, name: &str) -> bool {
        self.dir.path().join(name).exists()
    }

    /// Write `sygmare_manifest.json` from a JSON value
    pub fn write_manifest(&self, manifest: &serde_json::Value) {
        self.create_file(
            "sygmare_manifest.json",
            &serde_json::to_string_pretty(manifest).expect("Failed to serialize manifest"),
        );
    }

    /// Create a shell script component file
    pub fn create_script(&self, name: &str) {
        self.create_file(name, "#!/bin/sh\necho \"building\"\n");
    }

    /// Run the sygmare binary inside the project
    pub fn run(&self, args: &[&str]) -> Output {
        self.run_with_env(&[], args)
    }

    /// Run the sygmare binary with extra environment variables
    pub fn run_with_env(&self, envs: &[(&str, &str)], args: &[&str]) -> Output {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_sygmare"));
        cmd.current_dir(self.path())
            .env_remove("SYGMARE_CONFIG")
            .env_remove("SYGMARE_MANIFEST")
            .env_remove("RUST_LOG")
            .env("XDG_CONFIG_HOME", self.path().join(".config"))
            .envs(envs.iter().copied())
            .args(args);
        cmd.output().expect("Failed to execute sygmare")
    }

    /// Run the sygmare binary with `--json` and parse stdout
    pub fn run_json(&self, args: &[&str]) -> (Output, serde_json::Value) {
        let mut full = vec!["--json"];
        full.extend_from_slice(args);
        let output = self.run(&full);
        let value = serde_json::from_slice(&output.stdout).unwrap_or_else(|e| {
            panic!(
                "stdout is not JSON ({e}): {}\nstderr: {}",
                String::from_utf8_lossy(&output.stdout),
                String::from_utf8_lossy(&output.stderr)
            )
        });
        (output, value)
    }
}

impl Default for TestProject {
    fn default() -> Self {
        Self::new()
    }
}

/// Stdout as a string
pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// Stderr as a string
pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

/// Names of the records in a JSON build report, in order
pub fn record_names(report: &serde_json::Value) -> Vec<String> {
    report["records"]
        .as_array()
        .expect("records array")
        .iter()
        .map(|r| r["name"].as_str().expect("record name").to_string())
        .collect()
}
