//! `parse` subcommand: show which lines of a script are dialogue.

use anyhow::Result;
use std::path::Path;

use shalltell::{parse_transcript, Config};

use super::read_script;

pub fn handle(file: &Path, json: bool) -> Result<()> {
    let config = Config::load()?;
    let script = read_script(file)?;
    let transcript = parse_transcript(&script, &config.roster());

    if json {
        println!("{}", serde_json::to_string_pretty(&transcript)?);
        return Ok(());
    }

    for utterance in &transcript {
        println!("{}: {}", utterance.speaker, utterance.text);
    }
    Ok(())
}
