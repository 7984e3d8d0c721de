//! Generation prompts for each broadcast mode.
//!
//! The wording here is show content. The one structural requirement is that
//! the model is told to answer in `Name: line` form using roster names, so
//! the transcript parser can pick the lines out.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::roster::Roster;

/// Broadcast format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Mode {
    /// The cast judges and scores the user's pun
    #[default]
    PunRoast,
    /// The cast holds a strategy meeting about the user's topic
    StrategyMeeting,
}

impl Mode {
    /// Title shown above the broadcast.
    pub fn title(&self) -> &'static str {
        match self {
            Self::PunRoast => "🏆 Pun Public Execution",
            Self::StrategyMeeting => "💬 Strategy & Top 10 News Meeting",
        }
    }

    fn task(&self, input: &str) -> String {
        match self {
            Self::PunRoast => format!(
                "A viewer submitted this pun: \"{input}\". Stage a live show where the cast \
                 reacts to it, each judge gives a score out of 10 with one reason, and the host \
                 announces the verdict at the end."
            ),
            Self::StrategyMeeting => format!(
                "Topic: \"{input}\". Stage a lively meeting where the cast discusses the topic, \
                 proposes concrete ideas, and the host wraps up with a short summary."
            ),
        }
    }
}

/// Build the generation prompt for a broadcast.
///
/// Every roster member is listed with their persona, one per line, and the
/// model is asked to answer only with `Name: line` dialogue.
pub fn build_prompt(mode: Mode, input: &str, roster: &Roster) -> String {
    let cast = roster
        .iter()
        .map(|c| format!("- {}: {}", c.name, c.persona))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "{task}\n\
         Write it as a script. Use exactly one line per turn in the form \"Name: line\", \
         with the names spelled exactly as below. No narration, no headings.\n\
         Cast:\n{cast}",
        task = mode.task(input),
    )
}

/// Prompt for the simple pun generator.
pub fn pun_prompt(word: &str) -> String {
    format!(
        "Come up with five funny puns using the word \"{word}\" and list them as bullet points."
    )
}

/// A locally written opening line for the host.
///
/// Returns `None` when the roster has no host. The line is already in
/// `Name: line` form so it can be prepended to the generated text; line
/// breaks in `input` are folded into spaces so it stays a single line.
pub fn opening_line(mode: Mode, input: &str, roster: &Roster) -> Option<String> {
    let host = roster.host()?;
    let input = input.split_whitespace().collect::<Vec<_>>().join(" ");
    let line = match mode {
        Mode::PunRoast => format!("We're live! Tonight's pun on the chopping block: \"{input}\"."),
        Mode::StrategyMeeting => format!("We're live! Today's agenda: \"{input}\"."),
    };
    Some(format!("{}: {}", host.name, line))
}
