//! `roster` subcommand: list the cast.

use anyhow::Result;

use shalltell::theme::current_theme;
use shalltell::Config;

pub fn handle(json: bool) -> Result<()> {
    let config = Config::load()?;
    let roster = config.roster();

    if json {
        let characters: Vec<_> = roster.iter().collect();
        println!("{}", serde_json::to_string_pretty(&characters)?);
        return Ok(());
    }

    let theme = current_theme(&config.display.theme);
    for character in roster.iter() {
        let role = if character.is_host() { " (host)" } else { "" };
        println!(
            "{} {}{}  {}",
            character.icon,
            theme.speaker_text(&character.name, &character.name),
            role,
            theme.secondary_text(&character.persona)
        );
    }
    Ok(())
}
