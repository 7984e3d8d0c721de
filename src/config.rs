//! Configuration file handling.
//!
//! The config lives at `$SHALLTELL_CONFIG` when set, otherwise at
//! `<config dir>/shalltell/config.toml`. A missing file means defaults.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;
use toml_edit::DocumentMut;

use crate::generation::BackendKind;
use crate::playback::Pacing;
use crate::roster::{Character, Roster};

/// Environment variable overriding the config file location.
pub const CONFIG_ENV: &str = "SHALLTELL_CONFIG";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub generation: GenerationConfig,
    pub playback: PlaybackConfig,
    pub display: DisplayConfig,
    /// Custom cast; empty means the built-in studio cast
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub roster: Vec<Character>,
}

/// `[generation]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Backend used when `--backend` is not given
    pub backend: BackendKind,
    /// Seconds before a generation command is killed
    pub timeout_secs: u64,
    /// Model tag for the ollama backend
    pub ollama_model: String,
    /// Program and arguments for the command backend; the prompt is appended
    pub command: Vec<String>,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            backend: BackendKind::Auto,
            timeout_secs: 120,
            ollama_model: "llama3.2".to_string(),
            command: Vec::new(),
        }
    }
}

impl GenerationConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// `[playback]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Typewriter animation on interactive terminals
    pub animate: bool,
    /// Delay between revealed characters
    pub char_delay_ms: u64,
    /// Pause after a participant's line
    pub line_pause_ms: u64,
    /// Pause after a host's line
    pub host_pause_ms: u64,
    /// Prepend a locally written host opening line to the generated script
    pub synthesize_opening: bool,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            animate: true,
            char_delay_ms: 30,
            line_pause_ms: 1000,
            host_pause_ms: 2000,
            synthesize_opening: false,
        }
    }
}

impl PlaybackConfig {
    pub fn pacing(&self) -> Pacing {
        Pacing {
            char_delay: Duration::from_millis(self.char_delay_ms),
            line_pause: Duration::from_millis(self.line_pause_ms),
            host_pause: Duration::from_millis(self.host_pause_ms),
        }
    }
}

/// `[display]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Color theme: studio, classic or ocean
    pub theme: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            theme: "studio".to_string(),
        }
    }
}

impl Config {
    /// Path of the config file.
    pub fn config_path() -> Result<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return Ok(PathBuf::from(path));
        }
        let dir = dirs::config_dir().context("Could not determine config directory")?;
        Ok(dir.join("shalltell").join("config.toml"))
    }

    /// Load the config file, or defaults when it does not exist.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_toml(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))
    }

    /// Parse config from TOML text.
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Write the config file, creating its directory if needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml::to_string_pretty(self)?)
            .with_context(|| format!("Failed to write config file {}", path.display()))?;
        Ok(())
    }

    /// The configured cast, or the studio cast.
    pub fn roster(&self) -> Roster {
        Roster::from_config(&self.roster)
    }
}

/// Outcome of [`migrate_config`].
#[derive(Debug, Clone, Default)]
pub struct MigrateResult {
    /// Full updated file content
    pub content: String,
    /// Added fields as `section.key`
    pub added_fields: Vec<String>,
    /// Sections that were missing entirely
    pub sections_added: Vec<String>,
}

impl MigrateResult {
    pub fn has_changes(&self) -> bool {
        !self.added_fields.is_empty()
    }
}

/// Add fields missing from `content` using the current defaults.
///
/// Existing values, comments and ordering are preserved. Unknown keys are
/// left alone.
pub fn migrate_config(content: &str) -> Result<MigrateResult> {
    let defaults: DocumentMut = toml::to_string_pretty(&Config::default())?
        .parse()
        .context("Failed to build default config")?;
    let mut doc: DocumentMut = content.parse().context("Failed to parse config file")?;

    let mut result = MigrateResult::default();

    for (section, default_item) in defaults.iter() {
        let Some(default_table) = default_item.as_table() else {
            continue;
        };

        if let Some(table) = doc.get_mut(section).and_then(|item| item.as_table_mut()) {
            for (key, value) in default_table.iter() {
                if !table.contains_key(key) {
                    table.insert(key, value.clone());
                    result.added_fields.push(format!("{}.{}", section, key));
                }
            }
            continue;
        }

        if doc.contains_key(section) {
            // Present but not a table; leave the user's value alone
            continue;
        }

        doc.insert(section, default_item.clone());
        result.sections_added.push(section.to_string());
        result.added_fields.extend(
            default_table
                .iter()
                .map(|(key, _)| format!("{}.{}", section, key)),
        );
    }

    result.content = doc.to_string();
    Ok(result)
}
