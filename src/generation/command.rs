//! User-configured generation command.
//!
//! The prompt is appended as the last argument and the plain stdout is the
//! answer. Useful for wrappers around HTTP APIs or for scripted tests.

use super::{command_exists, run_command, GenerationBackend, GenerationError, GenerationResult};
use std::process::Command;
use std::time::Duration;

/// Backend running an arbitrary argv.
#[derive(Debug, Clone, Default)]
pub struct CommandBackend {
    argv: Vec<String>,
}

impl CommandBackend {
    /// Create a backend from a program and its leading arguments.
    pub fn new(argv: Vec<String>) -> Self {
        Self { argv }
    }
}

impl GenerationBackend for CommandBackend {
    fn name(&self) -> &'static str {
        "Command"
    }

    fn is_available(&self) -> bool {
        self.argv
            .first()
            .map(|program| command_exists(program))
            .unwrap_or(false)
    }

    fn generate(&self, prompt: &str, timeout: Duration) -> GenerationResult<String> {
        let Some((program, args)) = self.argv.split_first() else {
            return Err(GenerationError::NotAvailable(
                "No generation command configured (set generation.command)".to_string(),
            ));
        };

        let mut command = Command::new(program);
        command.args(args).arg(prompt);

        run_command(self.name(), command, timeout)
    }
}
