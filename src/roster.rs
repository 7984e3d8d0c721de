//! Character roster for a broadcast.
//!
//! The roster is the fixed, ordered cast of a show. It serves two purposes:
//! listing the characters (with their persona) in the generation prompt, and
//! deciding which `Name:` prefixes in the model output are real speakers.

use serde::{Deserialize, Serialize};

/// What part a character plays in the show.
///
/// Hosts open and close segments and get a longer pause after each line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Runs the show
    Host,
    /// Regular cast member
    #[default]
    Participant,
}

/// One member of the cast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    /// Display name, matched exactly against speaker prefixes
    pub name: String,
    /// Short icon shown next to the name (usually an emoji)
    #[serde(default)]
    pub icon: String,
    /// Persona description handed to the model
    #[serde(default)]
    pub persona: String,
    /// Part played in the show
    #[serde(default)]
    pub role: Role,
}

impl Character {
    /// Create a participant with the given name, icon and persona.
    pub fn new(
        name: impl Into<String>,
        icon: impl Into<String>,
        persona: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            icon: icon.into(),
            persona: persona.into(),
            role: Role::Participant,
        }
    }

    /// Mark this character as the host.
    pub fn host(mut self) -> Self {
        self.role = Role::Host;
        self
    }

    /// Whether this character hosts the show.
    pub fn is_host(&self) -> bool {
        self.role == Role::Host
    }
}

/// Ordered set of valid speakers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Roster {
    characters: Vec<Character>,
}

impl Roster {
    /// Build a roster from characters, keeping their order.
    pub fn new(characters: Vec<Character>) -> Self {
        Self { characters }
    }

    /// The built-in studio cast: one host and six mentors.
    pub fn studio() -> Self {
        Self::new(vec![
            Character::new("Host", "🤖", "Runs the show and keeps things moving.").host(),
            Character::new("Kind Mentor", "🌈", "Praises everything, unconditionally."),
            Character::new("Tsundere Coach", "💢", "Harsh on the surface, secretly supportive."),
            Character::new("Big Sister", "👩‍💼", "Calm, mature and reassuring."),
            Character::new("Logic Coach", "🧐", "Breaks everything down with cold logic."),
            Character::new("Gyaru Teacher", "✨", "Upbeat, slangy, all vibes."),
            Character::new("Sharp-Tongued Master", "🍶", "Blunt veteran with a venomous wit."),
        ])
    }

    /// Look up a character by exact name.
    ///
    /// When a name appears twice, the first entry wins.
    pub fn get(&self, name: &str) -> Option<&Character> {
        self.characters.iter().find(|c| c.name == name)
    }

    /// Whether `name` is a speaker in this roster.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// The first character with the host role, if any.
    pub fn host(&self) -> Option<&Character> {
        self.characters.iter().find(|c| c.is_host())
    }

    /// Iterate over characters in roster order.
    pub fn iter(&self) -> impl Iterator<Item = &Character> {
        self.characters.iter()
    }

    pub fn len(&self) -> usize {
        self.characters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }

    /// Use `characters` as the roster, or the studio cast when none are given.
    pub fn from_config(characters: &[Character]) -> Self {
        if characters.is_empty() {
            Self::studio()
        } else {
            Self::new(characters.to_vec())
        }
    }
}

impl Default for Roster {
    fn default() -> Self {
        Self::studio()
    }
}
