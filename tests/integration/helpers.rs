//! Shared helpers for integration tests

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Directory holding test fixtures.
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

/// Read a fixture file to a string.
pub fn load_fixture(name: &str) -> String {
    fs::read_to_string(fixtures_dir().join(name))
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", name, e))
}

/// A temporary config location; the file itself is only created on demand.
pub struct TestConfig {
    pub dir: TempDir,
}

impl TestConfig {
    /// Config path that does not exist yet (defaults apply).
    pub fn empty() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    /// Config file with the given TOML content.
    pub fn with(content: &str) -> Self {
        let config = Self::empty();
        fs::write(config.path(), content).expect("Failed to write config");
        config
    }

    pub fn path(&self) -> PathBuf {
        self.dir.path().join("config.toml")
    }

    /// The shalltell binary pointed at this config, without colors.
    pub fn command(&self) -> Command {
        shalltell_with_config(&self.path())
    }
}

/// The shalltell binary using `config` and no colors.
pub fn shalltell_with_config(config: &Path) -> Command {
    let mut cmd = Command::cargo_bin("shalltell").expect("binary should build");
    cmd.env("SHALLTELL_CONFIG", config)
        .env("NO_COLOR", "1")
        .env_remove("SHALLTELL_LOG");
    cmd
}
