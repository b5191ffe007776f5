//! Common test utilities for CLI integration tests.
//!
//! This module provides shared helpers for CLI testing, including:
//! - Test environment setup with a temporary directory
//! - Command builder helpers with a clean, prefixed environment

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Prefix used by tests so real environment variables never leak in.
#[allow(dead_code)]
pub const PREFIX: &str = "lcit";

/// Test environment with an isolated directory for configuration files.
pub struct TestEnv {
    /// Temporary directory (kept alive for the duration of the test)
    #[allow(dead_code)]
    temp_dir: TempDir,
    /// Path to the temporary directory
    pub temp_path: PathBuf,
}

#[allow(dead_code)]
impl TestEnv {
    /// Create a new test environment.
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let temp_path = temp_dir.path().to_path_buf();
        Self {
            temp_dir,
            temp_path,
        }
    }

    /// Get a bare command builder without a prefix.
    ///
    /// Variables that configure the CLI itself are removed so the host
    /// environment cannot change the outcome.
    pub fn command_bare(&self) -> Command {
        let mut cmd = Command::cargo_bin("layerconf").expect("Failed to find layerconf binary");
        cmd.env_remove("LAYERCONF_PREFIX")
            .env_remove("LAYERCONF_LOG_LEVEL");
        cmd
    }

    /// Get a command builder with the test prefix pre-configured.
    pub fn command(&self) -> Command {
        let mut cmd = self.command_bare();
        cmd.arg("--prefix").arg(PREFIX);
        cmd
    }

    /// Get the temp path.
    pub fn path(&self) -> &Path {
        &self.temp_path
    }

    /// Write a file under the temporary directory and return its path.
    pub fn write_file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.temp_path.join(name);
        std::fs::write(&path, content).expect("Failed to write test file");
        path
    }
}
