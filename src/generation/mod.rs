//! Text generation through LLM command-line clients.
//!
//! Each backend wraps one installed CLI (Gemini, Claude, Ollama) or a
//! user-configured command, runs it non-interactively with a timeout and
//! returns the model's answer as plain text.
//!
//! Failures of any kind surface as [`GenerationError`]. Nothing here retries;
//! the only fallback is in [`select_backend`], which picks the first
//! installed client when the backend is `auto`.

mod claude;
mod command;
mod gemini;
mod ollama;

pub use claude::ClaudeBackend;
pub use command::CommandBackend;
pub use gemini::GeminiBackend;
pub use ollama::OllamaBackend;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::Path;
use std::process::{Child, Command, Output, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crate::config::GenerationConfig;

/// Errors that can occur while generating text.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("{0}")]
    NotAvailable(String),

    #[error("Generation timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    #[error("{backend} exited with code {code}: {stderr}")]
    ExitCode {
        backend: &'static str,
        code: i32,
        stderr: String,
    },

    #[error("{backend} is rate limited: {message}")]
    RateLimited {
        backend: &'static str,
        message: String,
    },

    #[error("{0} returned an empty response")]
    EmptyResponse(&'static str),

    #[error("Invalid response from {backend}: {message}")]
    InvalidResponse {
        backend: &'static str,
        message: String,
    },

    #[error("Failed to run generation command: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for generation operations.
pub type GenerationResult<T> = Result<T, GenerationError>;

/// A source of generated text.
pub trait GenerationBackend {
    /// Human-readable backend name.
    fn name(&self) -> &'static str;

    /// Whether the backend can be used on this system.
    ///
    /// Should be fast - typically checks if the binary exists.
    fn is_available(&self) -> bool;

    /// Generate a response for `prompt`, giving up after `timeout`.
    fn generate(&self, prompt: &str, timeout: Duration) -> GenerationResult<String>;
}

/// Which backend to use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// First installed of gemini, claude, ollama
    #[default]
    Auto,
    Gemini,
    Claude,
    Ollama,
    /// The command configured in `generation.command`
    Command,
}

/// Resolve a backend kind into a usable backend.
///
/// `Auto` tries Gemini, Claude and Ollama in that order and returns the
/// first one that is installed.
pub fn select_backend(
    kind: BackendKind,
    config: &GenerationConfig,
) -> GenerationResult<Box<dyn GenerationBackend>> {
    let backend: Box<dyn GenerationBackend> = match kind {
        BackendKind::Gemini => Box::new(GeminiBackend::new()),
        BackendKind::Claude => Box::new(ClaudeBackend::new()),
        BackendKind::Ollama => Box::new(OllamaBackend::new(&config.ollama_model)),
        BackendKind::Command => Box::new(CommandBackend::new(config.command.clone())),
        BackendKind::Auto => {
            let candidates: Vec<Box<dyn GenerationBackend>> = vec![
                Box::new(GeminiBackend::new()),
                Box::new(ClaudeBackend::new()),
                Box::new(OllamaBackend::new(&config.ollama_model)),
            ];
            return candidates
                .into_iter()
                .find(|b| {
                    let available = b.is_available();
                    tracing::debug!(backend = b.name(), available, "probing backend");
                    available
                })
                .ok_or_else(|| {
                    GenerationError::NotAvailable(
                        "No LLM client found in PATH. Install gemini, claude or ollama, \
                         or set generation.command in the config."
                            .to_string(),
                    )
                });
        }
    };
    Ok(backend)
}

/// Check whether an executable named `name` is on `PATH`.
pub(crate) fn command_exists(name: &str) -> bool {
    if name.contains(std::path::MAIN_SEPARATOR) {
        return Path::new(name).is_file();
    }
    std::env::var_os("PATH")
        .map(|paths| {
            std::env::split_paths(&paths).any(|dir| {
                let candidate = dir.join(name);
                candidate.is_file() || candidate.with_extension("exe").is_file()
            })
        })
        .unwrap_or(false)
}

/// Run a prepared command and return its trimmed stdout.
///
/// Handles spawning, the timeout, non-zero exits (with rate-limit detection
/// on stderr) and empty output.
pub(crate) fn run_command(
    backend: &'static str,
    mut command: Command,
    timeout: Duration,
) -> GenerationResult<String> {
    tracing::debug!(backend, ?timeout, "invoking generation command");

    let mut child = command
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()?;

    let output = match wait_with_timeout(&mut child, timeout) {
        Ok(output) => output,
        Err(e) if e.kind() == std::io::ErrorKind::TimedOut => {
            return Err(GenerationError::Timeout(timeout));
        }
        Err(e) => return Err(e.into()),
    };

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        if let Some(message) = parse_rate_limit_info(&stderr) {
            return Err(GenerationError::RateLimited { backend, message });
        }
        return Err(GenerationError::ExitCode {
            backend,
            code: output.status.code().unwrap_or(-1),
            stderr,
        });
    }

    let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if stdout.is_empty() {
        return Err(GenerationError::EmptyResponse(backend));
    }
    Ok(stdout)
}

/// Find a rate limit or quota message in CLI error output.
///
/// Returns the first matching line.
pub(crate) fn parse_rate_limit_info(stderr: &str) -> Option<String> {
    const NEEDLES: &[&str] = &["rate limit", "rate_limit", "quota", "429", "resource_exhausted"];

    stderr
        .lines()
        .find(|line| {
            let lower = line.to_lowercase();
            NEEDLES.iter().any(|n| lower.contains(n))
        })
        .map(|line| line.trim().to_string())
}

/// Pull a string field out of a CLI's JSON output.
///
/// Tolerates log noise before and after the JSON object.
pub(crate) fn extract_json_field(
    backend: &'static str,
    output: &str,
    field: &str,
) -> GenerationResult<String> {
    let invalid = |message: String| GenerationError::InvalidResponse { backend, message };

    let start = output
        .find('{')
        .ok_or_else(|| invalid("no JSON object in output".to_string()))?;
    let end = output
        .rfind('}')
        .filter(|&end| end > start)
        .ok_or_else(|| invalid("unterminated JSON object".to_string()))?;

    let value: serde_json::Value =
        serde_json::from_str(&output[start..=end]).map_err(|e| invalid(e.to_string()))?;

    let text = value
        .get(field)
        .and_then(|v| v.as_str())
        .ok_or_else(|| invalid(format!("missing \"{}\" field", field)))?;

    if text.trim().is_empty() {
        return Err(GenerationError::EmptyResponse(backend));
    }
    Ok(text.to_string())
}

/// Wait for child process with timeout, killing it when time runs out.
///
/// Both pipes are drained on reader threads while polling, so a child that
/// writes more than the pipe buffer can still run to completion.
fn wait_with_timeout(child: &mut Child, timeout: Duration) -> std::io::Result<Output> {
    let stdout = spawn_reader(child.stdout.take());
    let stderr = spawn_reader(child.stderr.take());

    let start = Instant::now();
    let poll_interval = Duration::from_millis(100);

    loop {
        match child.try_wait()? {
            Some(status) => {
                return Ok(Output {
                    status,
                    stdout: join_reader(stdout),
                    stderr: join_reader(stderr),
                });
            }
            None => {
                if start.elapsed() >= timeout {
                    let _ = child.kill();
                    let _ = child.wait();
                    // Readers are left detached: a grandchild may still hold
                    // the pipes open.
                    return Err(std::io::Error::new(
                        std::io::ErrorKind::TimedOut,
                        "Process timed out",
                    ));
                }
                thread::sleep(poll_interval);
            }
        }
    }
}

fn spawn_reader<R: Read + Send + 'static>(pipe: Option<R>) -> Option<JoinHandle<Vec<u8>>> {
    pipe.map(|mut pipe| {
        thread::spawn(move || {
            let mut buf = Vec::new();
            pipe.read_to_end(&mut buf).ok();
            buf
        })
    })
}

fn join_reader(handle: Option<JoinHandle<Vec<u8>>>) -> Vec<u8> {
    handle
        .and_then(|handle| handle.join().ok())
        .unwrap_or_default()
}
