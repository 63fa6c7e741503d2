//! Common test utilities for navmenu integration tests
//!
//! A [`TestProject`] is a temporary directory holding definition, settings and icon
//! files, plus helpers to run the `navmenu` binary inside it.

// Allow dead code because these utilities are used across different test files
// and not all utilities are used in every test file
#![allow(dead_code)]

use anyhow::{Context, Result};
use navmenu::test_utils::{DefinitionFixture, SettingsFixture};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// Temporary working directory for one test.
pub struct TestProject {
    _temp_dir: TempDir, // Keep alive for RAII cleanup
    project_dir: PathBuf,
}

impl TestProject {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let project_dir = temp_dir.path().join("project");
        fs::create_dir_all(&project_dir)?;

        Ok(Self {
            _temp_dir: temp_dir,
            project_dir,
        })
    }

    pub fn project_path(&self) -> &Path {
        &self.project_dir
    }

    /// Write a file below the project directory, creating parent directories.
    pub fn write_file(&self, path: &str, content: &str) -> Result<PathBuf> {
        let file_path = self.project_dir.join(path);
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&file_path, content).with_context(|| format!("Failed to write {}", file_path.display()))?;
        Ok(file_path)
    }

    pub fn write_definition(&self, fixture: &DefinitionFixture) -> Result<PathBuf> {
        fixture.write_to(&self.project_dir)
    }

    pub fn write_settings(&self, fixture: &SettingsFixture) -> Result<PathBuf> {
        fixture.write_to(&self.project_dir)
    }

    /// Run navmenu in the project directory with colors disabled.
    pub fn run_navmenu(&self, args: &[&str]) -> Result<CommandOutput> {
        let output = Command::new(env!("CARGO_BIN_EXE_navmenu"))
            .args(args)
            .current_dir(&self.project_dir)
            .env("NO_COLOR", "1")
            .env_remove("RUST_LOG")
            .output()
            .context("Failed to run navmenu command")?;

        Ok(CommandOutput {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            success: output.status.success(),
            code: output.status.code(),
        })
    }
}

/// Captured result of a binary run.
#[derive(Debug)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    pub success: bool,
    pub code: Option<i32>,
}

impl CommandOutput {
    /// Assert the command succeeded, printing both streams otherwise.
    pub fn assert_success(&self) -> &Self {
        assert!(self.success, "command failed\nstdout:\n{}\nstderr:\n{}", self.stdout, self.stderr);
        self
    }

    pub fn assert_stdout_contains(&self, expected: &str) -> &Self {
        assert!(self.stdout.contains(expected), "expected stdout to contain '{expected}', got:\n{}", self.stdout);
        self
    }
}
