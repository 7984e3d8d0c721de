//! Theme configuration for CLI output
//!
//! Centralizes all color definitions for easy customization and renders
//! them as ANSI escape codes. Speakers get a stable color from a palette.

use crossterm::style::Color;

/// Theme configuration.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Primary text color (used for most content)
    pub text_primary: Color,
    /// Secondary/dimmed text color
    pub text_secondary: Color,
    /// Accent color for titles and highlights
    pub accent: Color,
    /// Error/warning color
    pub error: Color,
    /// Success color
    pub success: Color,
    /// Speaker label colors, picked per speaker name
    pub speakers: Vec<Color>,
    /// When false, all helpers return the text unchanged
    pub colored: bool,
}

impl Default for Theme {
    fn default() -> Self {
        Self::studio()
    }
}

impl Theme {
    /// Studio theme - gray text, green accent, bright speaker labels.
    pub fn studio() -> Self {
        Self {
            text_primary: Color::Grey,
            text_secondary: Color::DarkGrey,
            accent: Color::Green,
            error: Color::Red,
            success: Color::Green,
            speakers: vec![
                Color::Yellow,
                Color::Magenta,
                Color::Cyan,
                Color::Blue,
                Color::Green,
                Color::Red,
            ],
            colored: true,
        }
    }

    /// Classic terminal theme - white text.
    pub fn classic() -> Self {
        Self {
            text_primary: Color::White,
            text_secondary: Color::DarkGrey,
            accent: Color::Yellow,
            error: Color::Red,
            success: Color::Green,
            speakers: vec![Color::White],
            colored: true,
        }
    }

    /// Cyan/blue theme.
    pub fn ocean() -> Self {
        Self {
            text_primary: Color::Cyan,
            text_secondary: Color::DarkGrey,
            accent: Color::DarkCyan,
            error: Color::Red,
            success: Color::Green,
            speakers: vec![Color::Cyan, Color::Blue, Color::DarkCyan],
            colored: true,
        }
    }

    /// Look up a theme by its config name.
    pub fn by_name(name: &str) -> Option<Self> {
        match name {
            "studio" => Some(Self::studio()),
            "classic" => Some(Self::classic()),
            "ocean" => Some(Self::ocean()),
            _ => None,
        }
    }

    /// Disable colors.
    pub fn without_color(mut self) -> Self {
        self.colored = false;
        self
    }

    /// Color for a speaker label; the same name always gets the same color.
    pub fn speaker_color(&self, name: &str) -> Color {
        if self.speakers.is_empty() {
            return self.accent;
        }
        let hash = name
            .chars()
            .fold(0usize, |acc, c| acc.wrapping_mul(31).wrapping_add(c as usize));
        self.speakers[hash % self.speakers.len()]
    }

    // ANSI color helpers for CLI output

    fn paint(&self, color: Color, text: &str) -> String {
        if !self.colored {
            return text.to_string();
        }
        format!("{}{}{}", color_to_ansi(color), text, ANSI_RESET)
    }

    /// Format a speaker label in that speaker's color.
    pub fn speaker_text(&self, name: &str, text: &str) -> String {
        self.paint(self.speaker_color(name), text)
    }

    /// Format text with the accent color (for CLI output).
    pub fn accent_text(&self, text: &str) -> String {
        self.paint(self.accent, text)
    }

    /// Format text with the primary color (for CLI output).
    pub fn primary_text(&self, text: &str) -> String {
        self.paint(self.text_primary, text)
    }

    /// Format text with the secondary color (for CLI output).
    pub fn secondary_text(&self, text: &str) -> String {
        self.paint(self.text_secondary, text)
    }

    /// Format text with the error color (for CLI output).
    pub fn error_text(&self, text: &str) -> String {
        self.paint(self.error, text)
    }

    /// Format text with the success color (for CLI output).
    pub fn success_text(&self, text: &str) -> String {
        self.paint(self.success, text)
    }
}

/// ANSI reset sequence
const ANSI_RESET: &str = "\x1b[0m";

/// Convert a crossterm Color to an ANSI escape code.
fn color_to_ansi(color: Color) -> &'static str {
    match color {
        Color::Black => "\x1b[30m",
        Color::DarkRed => "\x1b[31m",
        Color::DarkGreen => "\x1b[32m",
        Color::DarkYellow => "\x1b[33m",
        Color::DarkBlue => "\x1b[34m",
        Color::DarkMagenta => "\x1b[35m",
        Color::DarkCyan => "\x1b[36m",
        Color::Grey => "\x1b[37m",
        Color::DarkGrey => "\x1b[90m",
        Color::Red => "\x1b[91m",
        Color::Green => "\x1b[92m",
        Color::Yellow => "\x1b[93m",
        Color::Blue => "\x1b[94m",
        Color::Magenta => "\x1b[95m",
        Color::Cyan => "\x1b[96m",
        Color::White => "\x1b[97m",
        Color::Reset => "\x1b[0m",
        // For RGB and indexed colors, fall back to reset (no color)
        _ => "",
    }
}

/// Theme for the given config name, honoring `NO_COLOR`.
///
/// Unknown names fall back to the default theme.
pub fn current_theme(name: &str) -> Theme {
    let theme = Theme::by_name(name).unwrap_or_else(|| {
        tracing::warn!(theme = name, "unknown theme, using default");
        Theme::default()
    });
    if std::env::var_os("NO_COLOR").is_some() {
        theme.without_color()
    } else {
        theme
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_theme_is_studio() {
        let theme = Theme::default();
        assert_eq!(theme.text_primary, Color::Grey);
        assert_eq!(theme.accent, Color::Green);
    }

    #[test]
    fn themes_resolve_by_name() {
        assert_eq!(Theme::by_name("classic").unwrap().text_primary, Color::White);
        assert_eq!(Theme::by_name("ocean").unwrap().text_primary, Color::Cyan);
        assert!(Theme::by_name("neon").is_none());
    }

    #[test]
    fn speaker_color_is_stable() {
        let theme = Theme::studio();
        assert_eq!(theme.speaker_color("Host"), theme.speaker_color("Host"));
        assert!(theme.speakers.contains(&theme.speaker_color("Logic Coach")));
    }

    #[test]
    fn ansi_text_helpers_wrap_with_color_codes() {
        let theme = Theme::studio();

        let accent = theme.accent_text("test");
        assert!(accent.starts_with("\x1b[92m"));
        assert!(accent.ends_with("\x1b[0m"));
        assert!(accent.contains("test"));

        let primary = theme.primary_text("hello");
        assert!(primary.starts_with("\x1b[37m"));
        assert!(primary.ends_with("\x1b[0m"));
    }

    #[test]
    fn uncolored_theme_returns_plain_text() {
        let theme = Theme::studio().without_color();
        assert_eq!(theme.error_text("oops"), "oops");
        assert_eq!(theme.speaker_text("Host", "Host:"), "Host:");
    }

    #[test]
    fn color_to_ansi_maps_standard_colors() {
        assert_eq!(color_to_ansi(Color::Green), "\x1b[92m");
        assert_eq!(color_to_ansi(Color::DarkRed), "\x1b[31m");
        assert_eq!(color_to_ansi(Color::Grey), "\x1b[37m");
        assert_eq!(color_to_ansi(Color::DarkGrey), "\x1b[90m");
        assert_eq!(color_to_ansi(Color::Reset), "\x1b[0m");
    }
}
