//! shalltell command-line entry point.

mod commands;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use shalltell::cli::{Cli, Commands, ConfigCommands};
use shalltell::theme::current_theme;

/// Environment variable holding the log filter (e.g. `debug`).
const LOG_ENV: &str = "SHALLTELL_LOG";

fn main() {
    init_tracing();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Live {
            input,
            mode,
            backend,
            no_animate,
        } => commands::live::handle(&input, mode, backend, no_animate),
        Commands::Pun { word, backend } => commands::pun::handle(&word, backend),
        Commands::Play { file, no_animate } => commands::play::handle(&file, no_animate),
        Commands::Parse { file, json } => commands::parse::handle(&file, json),
        Commands::Roster { json } => commands::roster::handle(json),
        Commands::Config(ConfigCommands::Show) => commands::config::handle_show(),
        Commands::Config(ConfigCommands::Edit) => commands::config::handle_edit(),
        Commands::Config(ConfigCommands::Migrate { yes }) => commands::config::handle_migrate(yes),
        Commands::Completions { shell } => commands::completions::handle(shell),
    };

    if let Err(e) = result {
        let theme = current_theme("studio");
        eprintln!("{}", theme.error_text(&format!("Error: {:#}", e)));
        std::process::exit(1);
    }
}

/// Log to stderr so stdout carries only the broadcast.
fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
