//! `live` subcommand: generate a script and broadcast it.

use anyhow::{bail, Context, Result};

use shalltell::generation::{select_backend, BackendKind};
use shalltell::prompt::Mode;
use shalltell::theme::current_theme;
use shalltell::{Config, Session};

use super::{pacing, run_playback, should_animate, OutputSink};

pub fn handle(
    input: &str,
    mode: Mode,
    backend: Option<BackendKind>,
    no_animate: bool,
) -> Result<()> {
    let input = input.trim();
    if input.is_empty() {
        bail!("Enter a topic or pun for the show");
    }

    let config = Config::load()?;
    let theme = current_theme(&config.display.theme);
    let backend = select_backend(
        backend.unwrap_or(config.generation.backend),
        &config.generation,
    )?;

    let animate = should_animate(&config, no_animate);
    let mut session = Session::new(config.roster(), pacing(&config, animate))
        .with_opening(config.playback.synthesize_opening)
        .with_timeout(config.generation.timeout());
    let mut sink = OutputSink::new(animate, theme.clone());

    println!("{}", theme.accent_text(mode.title()));
    eprintln!(
        "{}",
        theme.secondary_text(&format!(
            "The cast is entering the studio ({})...",
            backend.name()
        ))
    );

    session
        .submit(backend.as_ref(), mode, input, &mut sink)
        .context("Broadcast failed")?;

    run_playback(&mut session, &mut sink, &theme)
}
