//! Claude backend implementation.
//!
//! Invokes the Claude CLI with `--print --output-format json` and reads the
//! `result` field.

use super::{
    command_exists, extract_json_field, run_command, GenerationBackend, GenerationError,
    GenerationResult,
};
use std::process::Command;
use std::time::Duration;

/// Backend for Claude CLI.
///
/// Only text is produced, so no tool permissions are requested.
#[derive(Debug, Clone, Default)]
pub struct ClaudeBackend;

impl ClaudeBackend {
    /// Create a new Claude backend.
    pub fn new() -> Self {
        Self
    }

    /// Get the CLI command name.
    fn command() -> &'static str {
        "claude"
    }
}

impl GenerationBackend for ClaudeBackend {
    fn name(&self) -> &'static str {
        "Claude"
    }

    fn is_available(&self) -> bool {
        command_exists(Self::command())
    }

    fn generate(&self, prompt: &str, timeout: Duration) -> GenerationResult<String> {
        if !self.is_available() {
            return Err(GenerationError::NotAvailable(
                "claude CLI not found in PATH".to_string(),
            ));
        }

        let mut command = Command::new(Self::command());
        command
            .args(["--print", "--output-format", "json", "-p"])
            .arg(prompt);

        let output = run_command(self.name(), command, timeout)?;
        extract_json_field(self.name(), &output, "result")
    }
}
