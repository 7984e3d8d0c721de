//! `pun` subcommand: the simple pun generator.
//!
//! No cast and no playback; the model's answer is printed as is.

use anyhow::{bail, Context, Result};

use shalltell::generation::{select_backend, BackendKind};
use shalltell::prompt::pun_prompt;
use shalltell::theme::current_theme;
use shalltell::Config;

pub fn handle(word: &str, backend: Option<BackendKind>) -> Result<()> {
    let word = word.trim();
    if word.is_empty() {
        bail!("Enter a word to build the puns around");
    }

    let config = Config::load()?;
    let theme = current_theme(&config.display.theme);
    let backend = select_backend(
        backend.unwrap_or(config.generation.backend),
        &config.generation,
    )?;

    eprintln!("{}", theme.secondary_text("Writing puns..."));
    let answer = backend
        .generate(&pun_prompt(word), config.generation.timeout())
        .context("Pun generation failed")?;

    println!("{}", theme.success_text(&format!("Results for \"{}\":", word)));
    println!("{}", answer);
    Ok(())
}
