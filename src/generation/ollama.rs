//! Ollama backend implementation.
//!
//! Runs a local model with `ollama run <model> <prompt>`; the answer is the
//! plain stdout.

use super::{command_exists, run_command, GenerationBackend, GenerationError, GenerationResult};
use std::process::Command;
use std::time::Duration;

/// Backend for a local Ollama model.
#[derive(Debug, Clone)]
pub struct OllamaBackend {
    model: String,
}

impl OllamaBackend {
    /// Create a backend for the given model tag.
    pub fn new(model: &str) -> Self {
        Self {
            model: model.to_string(),
        }
    }

    /// The model tag passed to `ollama run`.
    pub fn model(&self) -> &str {
        &self.model
    }

    fn command() -> &'static str {
        "ollama"
    }
}

impl GenerationBackend for OllamaBackend {
    fn name(&self) -> &'static str {
        "Ollama"
    }

    fn is_available(&self) -> bool {
        command_exists(Self::command())
    }

    fn generate(&self, prompt: &str, timeout: Duration) -> GenerationResult<String> {
        if !self.is_available() {
            return Err(GenerationError::NotAvailable(
                "ollama not found in PATH".to_string(),
            ));
        }

        let mut command = Command::new(Self::command());
        command
            .args(["run", &self.model])
            .arg(prompt)
            .env("NO_COLOR", "1");

        run_command(self.name(), command, timeout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ollama_backend_keeps_model() {
        let backend = OllamaBackend::new("llama3.2");
        assert_eq!(backend.name(), "Ollama");
        assert_eq!(backend.model(), "llama3.2");
    }
}
