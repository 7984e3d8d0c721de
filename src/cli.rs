//! Command-line interface definitions.
//!
//! Lives in the library so xtask can generate the man page from it.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::generation::BackendKind;
use crate::prompt::Mode;

#[cfg(not(feature = "release"))]
const VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (", env!("VERGEN_GIT_SHA"), ")");

#[cfg(feature = "release")]
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Shall Tell Live - stage short LLM-scripted broadcasts with a fixed cast.
#[derive(Debug, Parser)]
#[command(name = "shalltell", version = VERSION, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Go live: the cast performs a script about your topic or pun
    Live {
        /// Topic or pun for the show
        input: String,

        /// Broadcast format
        #[arg(short, long, value_enum, default_value_t = Mode::PunRoast)]
        mode: Mode,

        /// LLM backend (defaults to generation.backend in the config)
        #[arg(short, long, value_enum)]
        backend: Option<BackendKind>,

        /// Print finished lines without the typewriter effect
        #[arg(long)]
        no_animate: bool,
    },

    /// Ask for five puns on a word and print the answer as is
    Pun {
        /// Word to build the puns around
        word: String,

        /// LLM backend (defaults to generation.backend in the config)
        #[arg(short, long, value_enum)]
        backend: Option<BackendKind>,
    },

    /// Play a script from a file ("-" reads stdin)
    Play {
        /// Script file in "Name: line" form
        file: PathBuf,

        /// Print finished lines without the typewriter effect
        #[arg(long)]
        no_animate: bool,
    },

    /// Extract the dialogue lines from a script ("-" reads stdin)
    Parse {
        /// Script file in "Name: line" form
        file: PathBuf,

        /// Print the lines as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the cast
    Roster {
        /// Print the cast as JSON
        #[arg(long)]
        json: bool,
    },

    /// Manage the configuration file
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Generate shell completions
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Show the current configuration as TOML
    Show,
    /// Open the configuration file in $EDITOR
    Edit,
    /// Add settings missing from the configuration file
    Migrate {
        /// Apply without asking
        #[arg(short, long)]
        yes: bool,
    },
}
