//! Broadcast-style playback of a transcript.
//!
//! The [`Sequencer`] is a timed-step state machine: each call to
//! [`Sequencer::step`] performs one visible update on a [`DisplaySink`] and
//! returns how long to wait before the next one. [`play`] is the driver loop
//! that sleeps between steps and honors a cancel flag at every step boundary.
//!
//! # Module Structure
//!
//! - `sequencer` - `Sequencer`, `SequencerState` and the `play` driver
//! - `sink` - `DisplaySink` trait and the terminal, plain and in-memory sinks

mod sequencer;
pub mod sink;

pub use sequencer::{play, PlaybackOutcome, Sequencer, SequencerState};
pub use sink::{DisplaySink, MemorySink, PlainSink, SinkEvent, TerminalSink};

use std::time::Duration;

use crate::roster::Role;

/// Timing of the typewriter effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacing {
    /// Delay between revealed characters
    pub char_delay: Duration,
    /// Pause after a participant finishes a line
    pub line_pause: Duration,
    /// Pause after the host finishes a line
    pub host_pause: Duration,
}

impl Pacing {
    /// No delays at all; every step happens back to back.
    pub fn instant() -> Self {
        Self {
            char_delay: Duration::ZERO,
            line_pause: Duration::ZERO,
            host_pause: Duration::ZERO,
        }
    }

    /// Pause after a finished line spoken by someone with `role`.
    pub fn pause_for(&self, role: Role) -> Duration {
        match role {
            Role::Host => self.host_pause,
            Role::Participant => self.line_pause,
        }
    }
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            char_delay: Duration::from_millis(30),
            line_pause: Duration::from_millis(1000),
            host_pause: Duration::from_millis(2000),
        }
    }
}
