//! Gemini backend implementation.
//!
//! Invokes the Gemini CLI with `--output-format json` and reads the
//! `response` field.

use super::{command_exists, extract_json_field, run_command, GenerationBackend, GenerationResult};
use std::process::Command;
use std::time::Duration;

/// Backend for Gemini CLI.
#[derive(Debug, Clone, Default)]
pub struct GeminiBackend;

impl GeminiBackend {
    /// Create a new Gemini backend.
    pub fn new() -> Self {
        Self
    }

    /// Get the CLI command name.
    fn command() -> &'static str {
        "gemini"
    }
}

impl GenerationBackend for GeminiBackend {
    fn name(&self) -> &'static str {
        "Gemini"
    }

    fn is_available(&self) -> bool {
        command_exists(Self::command())
    }

    fn generate(&self, prompt: &str, timeout: Duration) -> GenerationResult<String> {
        if !self.is_available() {
            return Err(super::GenerationError::NotAvailable(
                "gemini CLI not found in PATH".to_string(),
            ));
        }

        let mut command = Command::new(Self::command());
        command.args(["--output-format", "json", "-p"]).arg(prompt);

        let output = run_command(self.name(), command, timeout)?;
        extract_json_field(self.name(), &output, "response")
    }
}
