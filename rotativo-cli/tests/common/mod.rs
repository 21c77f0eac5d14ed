//! Common test utilities for CLI integration tests.
//!
//! This module provides shared helpers for CLI testing, including:
//! - Test environment setup with an isolated config directory
//! - Command builder helpers for common patterns
//! - Test data fixtures

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Test environment with an isolated config directory.
///
/// The config directory starts as a copy of the city documents bundled with
/// the app, so tests may add, break or remove tenants freely.
pub struct TestEnv {
    /// Temporary directory (kept alive for the duration of the test)
    #[allow(dead_code)]
    temp_dir: TempDir,
    /// Path to the city documents directory
    pub config_dir: PathBuf,
}

#[allow(dead_code)]
impl TestEnv {
    /// Create a new test environment seeded with the bundled cities.
    pub fn new() -> Self {
        let env = Self::empty();
        for entry in fs::read_dir(bundled_cities_dir()).expect("Failed to read bundled cities") {
            let path = entry.expect("Failed to read entry").path();
            if path.extension().is_some_and(|ext| ext == "json") {
                let name = path.file_name().expect("Entry has no file name");
                fs::copy(&path, env.config_dir.join(name)).expect("Failed to copy city");
            }
        }
        env
    }

    /// Create a test environment with an empty config directory.
    pub fn empty() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let config_dir = temp_dir.path().join("cities");
        fs::create_dir_all(&config_dir).expect("Failed to create config dir");

        Self {
            temp_dir,
            config_dir,
        }
    }

    /// Get a bare command builder without pre-configured flags.
    ///
    /// `ROTATIVO_*` variables of the calling environment are cleared so
    /// tests control every input.
    pub fn command_bare(&self) -> Command {
        let mut cmd = Command::cargo_bin("rotativo").expect("Failed to find rotativo binary");
        cmd.env_remove("ROTATIVO_TENANT")
            .env_remove("ROTATIVO_CONFIG_DIR")
            .env_remove("ROTATIVO_LOG_MODE")
            .env_remove("ROTATIVO_OUTPUT_FORMAT");
        cmd
    }

    /// Get a command builder with the config directory pre-configured.
    pub fn command(&self) -> Command {
        let mut cmd = self.command_bare();
        cmd.arg("--config-dir").arg(&self.config_dir);
        cmd
    }

    /// Get a command builder for `tenant`.
    pub fn tenant_command(&self, tenant: &str) -> Command {
        let mut cmd = self.command();
        cmd.arg("--tenant").arg(tenant);
        cmd
    }

    /// Write a city document into the config directory.
    pub fn write_city(&self, filename: &str, content: &str) -> PathBuf {
        let path = self.config_dir.join(filename);
        fs::write(&path, content).expect("Failed to write city document");
        path
    }

    /// Read a bundled city document as JSON.
    pub fn city_json(&self, tenant: &str) -> serde_json::Value {
        let text = fs::read_to_string(self.config_dir.join(format!("{tenant}.json")))
            .expect("Failed to read city document");
        serde_json::from_str(&text).expect("Invalid JSON in city document")
    }

    /// Get the config directory.
    pub fn path(&self) -> &Path {
        &self.config_dir
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

/// Path to the city documents bundled with the app.
pub fn bundled_cities_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("assets")
        .join("config")
        .join("cities")
}
