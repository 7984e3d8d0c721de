//! `play` subcommand: broadcast a script that was written earlier.

use anyhow::Result;
use std::path::Path;

use shalltell::theme::current_theme;
use shalltell::{Config, Session};

use super::{pacing, read_script, run_playback, should_animate, OutputSink};

pub fn handle(file: &Path, no_animate: bool) -> Result<()> {
    let config = Config::load()?;
    let script = read_script(file)?;
    let theme = current_theme(&config.display.theme);

    let animate = should_animate(&config, no_animate);
    let mut session = Session::new(config.roster(), pacing(&config, animate));
    let mut sink = OutputSink::new(animate, theme.clone());

    let count = session.load_raw(&script, &mut sink);
    tracing::debug!(count, file = %file.display(), "loaded script");

    run_playback(&mut session, &mut sink, &theme)
}
