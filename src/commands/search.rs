//! Search command - find titles and ids

use anyhow::Result;
use colored::*;

use crate::engine::Engine;
use crate::ui;

pub fn run(engine: &Engine, query: &str, limit: usize) -> Result<()> {
	let matches = engine.search_titles(query, limit);

	if matches.is_empty() {
		ui::warn(&format!("No titles match \"{}\"", query));
		return Ok(());
	}

	ui::header("Titles");
	for entry in &matches {
		let year = entry.year().map(|y| format!(" ({})", y)).unwrap_or_default();
		println!(
			"  {} {}{} {}",
			format!("{:>8}", entry.id).bright_magenta(),
			entry.title.bright_white(),
			year.dimmed(),
			format!("{} votes", entry.vote_count).dimmed(),
		);
	}
	println!();
	ui::success(&format!("Found {} titles", matches.len()));

	Ok(())
}
