//! Transcripts extracted from generated text.
//!
//! A transcript is the ordered list of lines spoken in one generation cycle.
//! It is produced by [`parse_transcript`] and consumed by the playback
//! sequencer. Transcripts live for one cycle and are never stored.
//!
//! # Module Structure
//!
//! - [`parser`] - best-effort `Name: line` extraction

mod parser;

pub use parser::parse_transcript;

use serde::Serialize;

use crate::roster::{Character, Role};

/// One spoken line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Utterance {
    /// Roster name of the speaker
    pub speaker: String,
    /// What was said, trimmed
    pub text: String,
    /// Speaker icon, copied from the roster
    pub icon: String,
    /// Speaker role, copied from the roster
    pub role: Role,
}

impl Utterance {
    /// Create an utterance spoken by `character`.
    pub fn new(character: &Character, text: impl Into<String>) -> Self {
        Self {
            speaker: character.name.clone(),
            text: text.into(),
            icon: character.icon.clone(),
            role: character.role,
        }
    }
}

/// Ordered sequence of utterances; position is the only identity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Transcript {
    utterances: Vec<Utterance>,
}

impl Transcript {
    pub fn new(utterances: Vec<Utterance>) -> Self {
        Self { utterances }
    }

    pub fn len(&self) -> usize {
        self.utterances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.utterances.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Utterance> {
        self.utterances.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Utterance> {
        self.utterances.iter()
    }

    pub fn as_slice(&self) -> &[Utterance] {
        &self.utterances
    }
}

impl<'a> IntoIterator for &'a Transcript {
    type Item = &'a Utterance;
    type IntoIter = std::slice::Iter<'a, Utterance>;

    fn into_iter(self) -> Self::IntoIter {
        self.utterances.iter()
    }
}

impl FromIterator<Utterance> for Transcript {
    fn from_iter<I: IntoIterator<Item = Utterance>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
