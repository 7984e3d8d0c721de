//! Display sinks for playback output.
//!
//! A sink is where the sequencer's updates end up. The sequencer never
//! fails because of its sink, so sinks swallow output errors and keep the
//! first one for the caller to inspect afterwards.

use crossterm::{cursor, queue, style::Print, terminal};
use std::io::{self, Write};
use unicode_width::UnicodeWidthStr;

use crate::theme::Theme;
use crate::transcript::Utterance;

/// Cursor shown at the end of a line that is still being typed.
const TYPING_CURSOR: &str = "▌";

/// Receiver of playback updates.
pub trait DisplaySink {
    /// Show the first part of `utterance`'s text while it is being typed.
    fn show_partial(&mut self, utterance: &Utterance, prefix: &str);

    /// Show the complete text, ending the animation of this line.
    fn show_final(&mut self, utterance: &Utterance);

    /// Show a line that was already revealed earlier (redraw, no animation).
    fn show_static(&mut self, utterance: &Utterance);

    /// Remove everything this sink has shown.
    fn clear(&mut self);
}

/// Speaker label: `icon name:`, or `name:` when there is no icon.
fn label(utterance: &Utterance) -> String {
    if utterance.icon.is_empty() {
        format!("{}:", utterance.speaker)
    } else {
        format!("{} {}:", utterance.icon, utterance.speaker)
    }
}

/// Animated sink for interactive terminals.
///
/// Partial lines are redrawn in place; `clear` erases every row written
/// since the last clear that is still on screen.
pub struct TerminalSink<W: Write> {
    out: W,
    theme: Theme,
    width: usize,
    /// Rows occupied by the line currently being typed
    live_rows: u16,
    /// Rows of finished lines since the last clear
    printed_rows: u16,
    error: Option<io::Error>,
}

impl<W: Write> TerminalSink<W> {
    /// Create a sink writing to `out`, wrapping at the terminal width.
    pub fn new(out: W, theme: Theme) -> Self {
        let width = terminal_size::terminal_size()
            .map(|(terminal_size::Width(w), _)| w as usize)
            .unwrap_or(80);
        Self::with_width(out, theme, width)
    }

    /// Create a sink with an explicit line width.
    pub fn with_width(out: W, theme: Theme, width: usize) -> Self {
        Self {
            out,
            theme,
            width: width.max(1),
            live_rows: 0,
            printed_rows: 0,
            error: None,
        }
    }

    /// The first output error, if any occurred.
    pub fn take_error(&mut self) -> Option<io::Error> {
        self.error.take()
    }

    /// Consume the sink, returning the writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn rows_for(&self, plain: &str) -> u16 {
        let cols = plain.width().max(1);
        ((cols + self.width - 1) / self.width).min(u16::MAX as usize) as u16
    }

    fn record(&mut self, result: io::Result<()>) {
        if let Err(e) = result {
            tracing::debug!(error = %e, "terminal sink write failed");
            self.error.get_or_insert(e);
        }
    }

    /// Move to the start of the live line and erase it.
    fn erase_live(&mut self) -> io::Result<()> {
        if self.live_rows == 0 {
            return Ok(());
        }
        queue!(self.out, cursor::MoveToColumn(0))?;
        if self.live_rows > 1 {
            queue!(self.out, cursor::MoveUp(self.live_rows - 1))?;
        }
        queue!(self.out, terminal::Clear(terminal::ClearType::FromCursorDown))?;
        self.live_rows = 0;
        Ok(())
    }

    fn write_line(&mut self, utterance: &Utterance, text: &str, finished: bool) -> io::Result<()> {
        self.erase_live()?;

        let label = label(utterance);
        let tail = if finished { "" } else { TYPING_CURSOR };
        let rows = self.rows_for(&format!("{} {}{}", label, text, tail));
        let line = format!(
            "{} {}{}",
            self.theme.speaker_text(&utterance.speaker, &label),
            self.theme.primary_text(text),
            tail
        );

        queue!(self.out, Print(line))?;
        if finished {
            queue!(self.out, Print("\n"))?;
            self.printed_rows = self.printed_rows.saturating_add(rows);
        } else {
            self.live_rows = rows;
        }
        self.out.flush()
    }

    fn erase_all(&mut self) -> io::Result<()> {
        self.erase_live()?;
        if self.printed_rows > 0 {
            queue!(
                self.out,
                cursor::MoveUp(self.printed_rows),
                cursor::MoveToColumn(0),
                terminal::Clear(terminal::ClearType::FromCursorDown)
            )?;
            self.printed_rows = 0;
        }
        self.out.flush()
    }
}

impl<W: Write> DisplaySink for TerminalSink<W> {
    fn show_partial(&mut self, utterance: &Utterance, prefix: &str) {
        let result = self.write_line(utterance, prefix, false);
        self.record(result);
    }

    fn show_final(&mut self, utterance: &Utterance) {
        let result = self.write_line(utterance, &utterance.text, true);
        self.record(result);
    }

    fn show_static(&mut self, utterance: &Utterance) {
        let result = self.write_line(utterance, &utterance.text, true);
        self.record(result);
    }

    fn clear(&mut self) {
        let result = self.erase_all();
        self.record(result);
    }
}

/// Line-oriented sink for pipes and non-interactive output.
///
/// Only complete lines are written; partial updates and clears are ignored
/// because written output cannot be taken back.
pub struct PlainSink<W: Write> {
    out: W,
    error: Option<io::Error>,
}

impl<W: Write> PlainSink<W> {
    pub fn new(out: W) -> Self {
        Self { out, error: None }
    }

    /// The first output error, if any occurred.
    pub fn take_error(&mut self) -> Option<io::Error> {
        self.error.take()
    }

    /// Consume the sink, returning the writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_line(&mut self, utterance: &Utterance) {
        let result = writeln!(self.out, "{} {}", label(utterance), utterance.text)
            .and_then(|_| self.out.flush());
        if let Err(e) = result {
            self.error.get_or_insert(e);
        }
    }
}

impl<W: Write> DisplaySink for PlainSink<W> {
    fn show_partial(&mut self, _utterance: &Utterance, _prefix: &str) {}

    fn show_final(&mut self, utterance: &Utterance) {
        self.write_line(utterance);
    }

    fn show_static(&mut self, utterance: &Utterance) {
        self.write_line(utterance);
    }

    fn clear(&mut self) {}
}

/// A recorded sink call: speaker name plus text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkEvent {
    Partial(String, String),
    Final(String, String),
    Static(String, String),
    Clear,
}

/// Sink that records every call, for embedding and tests.
#[derive(Debug, Default)]
pub struct MemorySink {
    events: Vec<SinkEvent>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[SinkEvent] {
        &self.events
    }

    /// Speaker and text of every `show_final` call, in order.
    pub fn finals(&self) -> Vec<(&str, &str)> {
        self.events
            .iter()
            .filter_map(|e| match e {
                SinkEvent::Final(speaker, text) => Some((speaker.as_str(), text.as_str())),
                _ => None,
            })
            .collect()
    }

    /// What would be on screen: the lines shown since the last clear.
    ///
    /// A partial line is replaced by the next update for the same record.
    pub fn screen(&self) -> Vec<String> {
        let mut lines = Vec::new();
        let mut live = false;
        for event in &self.events {
            match event {
                SinkEvent::Clear => {
                    lines.clear();
                    live = false;
                }
                SinkEvent::Partial(speaker, text) => {
                    if live {
                        lines.pop();
                    }
                    lines.push(format!("{}: {}", speaker, text));
                    live = true;
                }
                SinkEvent::Final(speaker, text) | SinkEvent::Static(speaker, text) => {
                    if live {
                        lines.pop();
                    }
                    lines.push(format!("{}: {}", speaker, text));
                    live = false;
                }
            }
        }
        lines
    }
}

impl DisplaySink for MemorySink {
    fn show_partial(&mut self, utterance: &Utterance, prefix: &str) {
        self.events.push(SinkEvent::Partial(
            utterance.speaker.clone(),
            prefix.to_string(),
        ));
    }

    fn show_final(&mut self, utterance: &Utterance) {
        self.events.push(SinkEvent::Final(
            utterance.speaker.clone(),
            utterance.text.clone(),
        ));
    }

    fn show_static(&mut self, utterance: &Utterance) {
        self.events.push(SinkEvent::Static(
            utterance.speaker.clone(),
            utterance.text.clone(),
        ));
    }

    fn clear(&mut self) {
        self.events.push(SinkEvent::Clear);
    }
}
