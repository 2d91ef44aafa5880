use std::path::Path;

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use squadcal_core::roster::load_roster;

use crate::render::Render;

pub fn run(file: &Path) -> Result<()> {
    let athletes = load_roster(file)
        .with_context(|| format!("Could not load roster from {}", file.display()))?;

    if athletes.is_empty() {
        println!("{}", "No athletes found".dimmed());
        return Ok(());
    }

    for athlete in &athletes {
        println!("{}", athlete.render());
    }

    Ok(())
}
