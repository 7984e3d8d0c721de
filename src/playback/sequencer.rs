//! Transcript playback state machine.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use super::{DisplaySink, Pacing};
use crate::transcript::Transcript;

/// Observable sequencer state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequencerState {
    /// Nothing to play
    Idle,
    /// Animating the record at this index
    Revealing(usize),
    /// Every record has been revealed
    Settled,
}

/// Progress within the record being revealed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    /// `shown` characters of the text are on screen
    Typing { shown: usize },
    /// Full text shown, waiting out the post-line pause
    Pausing,
}

/// Plays one transcript at a time onto a display sink.
///
/// Starting a new transcript replaces the old one wholesale; nothing of the
/// previous transcript is shown afterwards.
#[derive(Debug)]
pub struct Sequencer {
    pacing: Pacing,
    transcript: Transcript,
    state: SequencerState,
    phase: Phase,
}

impl Sequencer {
    pub fn new(pacing: Pacing) -> Self {
        Self {
            pacing,
            transcript: Transcript::default(),
            state: SequencerState::Idle,
            phase: Phase::Typing { shown: 0 },
        }
    }

    pub fn state(&self) -> SequencerState {
        self.state
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn pacing(&self) -> Pacing {
        self.pacing
    }

    /// Replace the transcript and begin revealing it from the first record.
    ///
    /// Any playback in progress is abandoned. An empty transcript leaves the
    /// sequencer `Idle`.
    pub fn start(&mut self, transcript: Transcript, sink: &mut dyn DisplaySink) {
        sink.clear();
        tracing::info!(records = transcript.len(), "starting playback");

        self.state = if transcript.is_empty() {
            SequencerState::Idle
        } else {
            SequencerState::Revealing(0)
        };
        self.transcript = transcript;
        self.phase = Phase::Typing { shown: 0 };
    }

    /// Drop the transcript and clear the sink, from any state.
    pub fn reset(&mut self, sink: &mut dyn DisplaySink) {
        self.transcript = Transcript::default();
        self.state = SequencerState::Idle;
        self.phase = Phase::Typing { shown: 0 };
        sink.clear();
    }

    /// Perform one visible step.
    ///
    /// Returns the delay to wait before the next step, or `None` once there
    /// is nothing left to animate (`Idle` or `Settled`).
    pub fn step(&mut self, sink: &mut dyn DisplaySink) -> Option<Duration> {
        let SequencerState::Revealing(index) = self.state else {
            return None;
        };
        let Some(utterance) = self.transcript.get(index) else {
            self.state = SequencerState::Settled;
            return None;
        };

        match self.phase {
            Phase::Typing { shown } if shown < utterance.text.chars().count() => {
                let shown = shown + 1;
                sink.show_partial(utterance, char_prefix(&utterance.text, shown));
                self.phase = Phase::Typing { shown };
                Some(self.pacing.char_delay)
            }
            Phase::Typing { .. } => {
                sink.show_final(utterance);
                self.phase = Phase::Pausing;
                Some(self.pacing.pause_for(utterance.role))
            }
            Phase::Pausing => {
                if index + 1 < self.transcript.len() {
                    self.state = SequencerState::Revealing(index + 1);
                    self.phase = Phase::Typing { shown: 0 };
                    Some(Duration::ZERO)
                } else {
                    self.state = SequencerState::Settled;
                    None
                }
            }
        }
    }

    /// Redraw the current state without animating.
    ///
    /// Revealed records are shown in full via `show_static`; a record that
    /// is still being typed is shown at its current prefix.
    pub fn redraw(&self, sink: &mut dyn DisplaySink) {
        sink.clear();
        match self.state {
            SequencerState::Idle => {}
            SequencerState::Settled => {
                for utterance in &self.transcript {
                    sink.show_static(utterance);
                }
            }
            SequencerState::Revealing(index) => {
                let records = self.transcript.as_slice();
                for utterance in &records[..index.min(records.len())] {
                    sink.show_static(utterance);
                }
                if let Some(current) = records.get(index) {
                    match self.phase {
                        Phase::Typing { shown: 0 } => {}
                        Phase::Typing { shown } => {
                            sink.show_partial(current, char_prefix(&current.text, shown))
                        }
                        Phase::Pausing => sink.show_static(current),
                    }
                }
            }
        }
    }
}

/// How a call to [`play`] ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackOutcome {
    /// Every record was revealed
    Settled,
    /// The cancel flag was raised; the sequencer was reset
    Interrupted,
    /// There was nothing to play
    Idle,
}

/// Drive the sequencer until it settles or is cancelled.
///
/// The cancel flag is checked (and cleared) before every step, so a reset
/// takes effect at the next step boundary rather than mid-pause. `sleep` is
/// called with every non-zero delay.
pub fn play(
    sequencer: &mut Sequencer,
    sink: &mut dyn DisplaySink,
    cancel: &AtomicBool,
    mut sleep: impl FnMut(Duration),
) -> PlaybackOutcome {
    loop {
        if cancel.swap(false, Ordering::SeqCst) {
            tracing::info!("playback interrupted");
            sequencer.reset(sink);
            return PlaybackOutcome::Interrupted;
        }
        match sequencer.step(sink) {
            Some(delay) if !delay.is_zero() => sleep(delay),
            Some(_) => {}
            None => break,
        }
    }

    match sequencer.state() {
        SequencerState::Settled => PlaybackOutcome::Settled,
        _ => PlaybackOutcome::Idle,
    }
}

/// The first `count` characters of `text`.
fn char_prefix(text: &str, count: usize) -> &str {
    match text.char_indices().nth(count) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}
