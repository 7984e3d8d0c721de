//! Shall Tell Live - LLM-scripted character broadcasts in the terminal.
//!
//! A topic or pun goes in, an LLM command-line client writes a short script
//! for a fixed cast, and the script is played back line by line with a
//! typewriter effect.
//!
//! # Module Structure
//!
//! - [`roster`] - the cast: names, icons, personas, roles
//! - [`prompt`] - generation prompts per broadcast mode
//! - [`generation`] - LLM CLI backends with timeouts
//! - [`transcript`] - best-effort `Name: line` extraction
//! - [`playback`] - timed-step sequencer and display sinks
//! - [`session`] - one viewer's parse-then-play cycle
//! - [`config`] - TOML configuration
//! - [`theme`] - colors for CLI output
//! - [`cli`] - command-line definitions (shared with xtask)

pub mod cli;
pub mod config;
pub mod generation;
pub mod playback;
pub mod prompt;
pub mod roster;
pub mod session;
pub mod theme;
pub mod transcript;

pub use config::Config;
pub use roster::{Character, Role, Roster};
pub use session::{Session, SessionStatus};
pub use transcript::{parse_transcript, Transcript, Utterance};
