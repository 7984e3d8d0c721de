//! One viewer's broadcast session.
//!
//! A `Session` owns everything a generation cycle touches: the roster, the
//! sequencer (and with it the current transcript) and a status used to pick
//! the empty-state message. Each user action runs exactly one cycle; a new
//! submission replaces whatever was playing.

use std::sync::atomic::AtomicBool;
use std::time::Duration;

use crate::generation::{GenerationBackend, GenerationResult};
use crate::playback::{play, DisplaySink, Pacing, PlaybackOutcome, Sequencer, SequencerState};
use crate::prompt::{build_prompt, opening_line, Mode};
use crate::roster::Roster;
use crate::transcript::{parse_transcript, Transcript};

/// What the last user action led to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionStatus {
    /// Nothing submitted yet (or reset)
    NotStarted,
    /// Generation failed with this message
    Failed(String),
    /// Generation worked but no dialogue lines were found
    Empty,
    /// A transcript is loaded and not fully revealed
    Playing,
    /// The transcript has been fully revealed
    Settled,
}

/// Session-scoped broadcast state.
#[derive(Debug)]
pub struct Session {
    roster: Roster,
    sequencer: Sequencer,
    status: SessionStatus,
    synthesize_opening: bool,
    timeout: Duration,
}

impl Session {
    pub fn new(roster: Roster, pacing: Pacing) -> Self {
        Self {
            roster,
            sequencer: Sequencer::new(pacing),
            status: SessionStatus::NotStarted,
            synthesize_opening: false,
            timeout: Duration::from_secs(120),
        }
    }

    /// Prepend a locally written host line to every generated script.
    pub fn with_opening(mut self, enabled: bool) -> Self {
        self.synthesize_opening = enabled;
        self
    }

    /// Generation timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn status(&self) -> &SessionStatus {
        &self.status
    }

    pub fn state(&self) -> SequencerState {
        self.sequencer.state()
    }

    pub fn transcript(&self) -> &Transcript {
        self.sequencer.transcript()
    }

    /// Generate a script for `input` and start playing it.
    ///
    /// On failure the sequencer is reset to `Idle` and the error is returned
    /// for the caller to report; the parser and sequencer never see it.
    /// Returns the number of dialogue lines found.
    pub fn submit(
        &mut self,
        backend: &dyn GenerationBackend,
        mode: Mode,
        input: &str,
        sink: &mut dyn DisplaySink,
    ) -> GenerationResult<usize> {
        let prompt = build_prompt(mode, input, &self.roster);
        tracing::info!(backend = backend.name(), ?mode, "generating script");

        let generated = match backend.generate(&prompt, self.timeout) {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(error = %e, "generation failed");
                self.sequencer.reset(sink);
                self.status = SessionStatus::Failed(e.to_string());
                return Err(e);
            }
        };

        let raw = match opening_line(mode, input, &self.roster) {
            Some(opening) if self.synthesize_opening => format!("{}\n{}", opening, generated),
            _ => generated,
        };
        Ok(self.load_raw(&raw, sink))
    }

    /// Parse an already generated script and start playing it.
    ///
    /// Returns the number of dialogue lines found.
    pub fn load_raw(&mut self, raw: &str, sink: &mut dyn DisplaySink) -> usize {
        let transcript = parse_transcript(raw, &self.roster);
        let count = transcript.len();
        if count == 0 {
            tracing::warn!("no dialogue lines in generated text");
        }
        self.sequencer.start(transcript, sink);
        self.status = if count == 0 {
            SessionStatus::Empty
        } else {
            SessionStatus::Playing
        };
        count
    }

    /// Play the loaded transcript to the end, or until `cancel` is raised.
    pub fn play(
        &mut self,
        sink: &mut dyn DisplaySink,
        cancel: &AtomicBool,
        sleep: impl FnMut(Duration),
    ) -> PlaybackOutcome {
        let outcome = play(&mut self.sequencer, sink, cancel, sleep);
        match outcome {
            PlaybackOutcome::Settled => self.status = SessionStatus::Settled,
            PlaybackOutcome::Interrupted => self.status = SessionStatus::NotStarted,
            PlaybackOutcome::Idle => {}
        }
        outcome
    }

    /// Redraw without animation.
    pub fn redraw(&self, sink: &mut dyn DisplaySink) {
        self.sequencer.redraw(sink);
    }

    /// Discard the transcript and clear the sink.
    pub fn reset(&mut self, sink: &mut dyn DisplaySink) {
        self.sequencer.reset(sink);
        self.status = SessionStatus::NotStarted;
    }

    /// Message to show when there is nothing on screen.
    ///
    /// The sequencer is `Idle` in all three cases; only the session knows
    /// why.
    pub fn empty_state_message(&self) -> Option<String> {
        match &self.status {
            SessionStatus::NotStarted => {
                Some("Enter a topic and start the broadcast.".to_string())
            }
            SessionStatus::Empty => {
                Some("The studio went quiet: no lines from the cast this time.".to_string())
            }
            SessionStatus::Failed(message) => Some(format!("Broadcast failed: {}", message)),
            SessionStatus::Playing | SessionStatus::Settled => None,
        }
    }
}
