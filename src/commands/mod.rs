//! Subcommand handlers.

pub mod completions;
pub mod config;
pub mod live;
pub mod parse;
pub mod play;
pub mod pun;
pub mod roster;

use anyhow::{bail, Context, Result};
use std::io::{self, Read, Stdout};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use shalltell::playback::{DisplaySink, Pacing, PlainSink, PlaybackOutcome, TerminalSink};
use shalltell::theme::Theme;
use shalltell::{Config, Session, Utterance};

/// Read a script from `path`, or from stdin when the path is `-`.
pub fn read_script(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut content = String::new();
        io::stdin()
            .read_to_string(&mut content)
            .context("Failed to read script from stdin")?;
        return Ok(content);
    }
    if !path.exists() {
        bail!("File not found: {}", path.display());
    }
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

/// Whether to run the typewriter effect.
///
/// Only on an interactive stdout, and only when neither the config nor the
/// command line turned it off.
pub fn should_animate(config: &Config, no_animate: bool) -> bool {
    config.playback.animate && !no_animate && atty::is(atty::Stream::Stdout)
}

/// Pacing for this run; without animation every step is immediate.
pub fn pacing(config: &Config, animate: bool) -> Pacing {
    if animate {
        config.playback.pacing()
    } else {
        Pacing::instant()
    }
}

/// Install the Ctrl-C handler and return the cancel flag it raises.
///
/// A second Ctrl-C before playback notices the first exits immediately.
pub fn install_interrupt_handler() -> Result<Arc<AtomicBool>> {
    let cancel = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&cancel);
    ctrlc::set_handler(move || {
        if flag.swap(true, Ordering::SeqCst) {
            std::process::exit(130);
        }
    })
    .context("Failed to install Ctrl-C handler")?;
    Ok(cancel)
}

/// Stdout sink chosen at runtime.
pub enum OutputSink {
    Terminal(TerminalSink<Stdout>),
    Plain(PlainSink<Stdout>),
}

impl OutputSink {
    pub fn new(animate: bool, theme: Theme) -> Self {
        if animate {
            Self::Terminal(TerminalSink::new(io::stdout(), theme))
        } else {
            Self::Plain(PlainSink::new(io::stdout()))
        }
    }

    /// Fail if writing to stdout failed at any point.
    pub fn finish(&mut self) -> Result<()> {
        let error = match self {
            Self::Terminal(sink) => sink.take_error(),
            Self::Plain(sink) => sink.take_error(),
        };
        match error {
            Some(e) => Err(e).context("Failed to write broadcast output"),
            None => Ok(()),
        }
    }

    fn inner(&mut self) -> &mut dyn DisplaySink {
        match self {
            Self::Terminal(sink) => sink,
            Self::Plain(sink) => sink,
        }
    }
}

impl DisplaySink for OutputSink {
    fn show_partial(&mut self, utterance: &Utterance, prefix: &str) {
        self.inner().show_partial(utterance, prefix);
    }

    fn show_final(&mut self, utterance: &Utterance) {
        self.inner().show_final(utterance);
    }

    fn show_static(&mut self, utterance: &Utterance) {
        self.inner().show_static(utterance);
    }

    fn clear(&mut self) {
        self.inner().clear();
    }
}

/// Play whatever the session has loaded and report how it ended.
///
/// With nothing loaded, the session's empty-state message is shown instead.
pub fn run_playback(session: &mut Session, sink: &mut OutputSink, theme: &Theme) -> Result<()> {
    if session.transcript().is_empty() {
        if let Some(message) = session.empty_state_message() {
            eprintln!("{}", theme.secondary_text(&message));
        }
        return sink.finish();
    }

    let cancel = install_interrupt_handler()?;
    let outcome = session.play(sink, &cancel, std::thread::sleep);
    sink.finish()?;

    if outcome == PlaybackOutcome::Interrupted {
        eprintln!("{}", theme.secondary_text("Broadcast stopped."));
    }
    Ok(())
}
