//! Best-effort `Name: line` extraction from model output.
//!
//! Model output has no enforced grammar, so anything that does not look like
//! a line spoken by a roster member is dropped rather than reported.

use super::{Transcript, Utterance};
use crate::roster::Roster;

/// Emphasis marker a markdown-producing model wraps names and lines in.
const EMPHASIS: char = '*';

/// Parse raw generated text into a transcript.
///
/// Lines are kept when they contain a `:` and the part before the first
/// colon, with emphasis markers and surrounding whitespace removed, is an
/// exact roster name. Everything after the first colon is the line, so
/// colons inside the dialogue survive. Never fails: text without any
/// matching line yields an empty transcript.
///
/// # Arguments
/// * `raw` - The complete model response (optionally with caller-added lines)
/// * `roster` - The valid speakers
pub fn parse_transcript(raw: &str, roster: &Roster) -> Transcript {
    raw.lines()
        .filter_map(|line| parse_line(line, roster))
        .collect()
}

/// Parse a single line, returning `None` for non-dialogue lines.
fn parse_line(line: &str, roster: &Roster) -> Option<Utterance> {
    let (candidate, remainder) = line.split_once(':')?;

    let name = clean_speaker(candidate);
    let Some(character) = roster.get(&name) else {
        tracing::trace!(line, "dropping line without a known speaker");
        return None;
    };

    Some(Utterance::new(character, clean_text(remainder)))
}

/// Remove emphasis markers anywhere in the name, then trim.
fn clean_speaker(candidate: &str) -> String {
    candidate
        .chars()
        .filter(|&c| c != EMPHASIS)
        .collect::<String>()
        .trim()
        .to_string()
}

/// Trim whitespace and the closing emphasis left over from `**Name:**`.
///
/// Leading markers are only removed when they stand alone, so an emphasized
/// stage direction such as `*sighs* fine` is kept intact.
fn clean_text(remainder: &str) -> String {
    let text = remainder.trim();
    let unmarked = text.trim_start_matches(EMPHASIS);
    if unmarked.is_empty() || unmarked.starts_with(char::is_whitespace) {
        unmarked.trim().to_string()
    } else {
        text.to_string()
    }
}
