//! Shared fixture for the CLI integration tests.
#![cfg(test)]
#![allow(dead_code)]

use assert_cmd::Command;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

pub const PEOPLE_CSV: &str = "name,age,city\nAlice,30,Paris\nBob,25,Berlin\nCara,41,Lisbon\n";

pub const PEOPLE_JSON: &str = r#"[
  {"name": "Alice", "age": 30, "city": "Paris"},
  {"name": "Bob", "age": 25, "city": "Berlin"}
]"#;

pub struct TestFixture {
    temp_dir: TempDir,
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

impl TestFixture {
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.temp_dir.path().join(name)
    }

    pub fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.path(name);
        fs::write(&path, content).expect("Failed to write fixture file");
        path
    }

    /// The binary with a hermetic environment: no user config, no terminal
    /// width hints, no color overrides.
    pub fn command(&self) -> Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("termtable");
        cmd.env("TERMTABLE_CONFIG", self.path("no-config.toml"))
            .env_remove("COLUMNS")
            .env_remove("NO_COLOR")
            .env_remove("RUST_LOG");
        cmd
    }
}
