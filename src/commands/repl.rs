//! REPL mode - interactive recommendation session

use anyhow::Result;
use colored::Colorize;
use std::io::{self, BufRead, Write};

use crate::config;
use crate::engine::{Engine, MovieRef};
use crate::poster::Poster;
use crate::ui;

/// One parsed line of input
#[derive(Debug, PartialEq)]
pub enum Input {
	Blend(MovieRef, MovieRef),
	Find(String),
	Top(String),
	Help,
	Exit,
	Empty,
	Invalid(String),
}

pub fn parse(line: &str) -> Input {
	let line = line.trim();
	match line {
		"" => return Input::Empty,
		"exit" | "quit" | "q" => return Input::Exit,
		"help" | "?" => return Input::Help,
		_ => {}
	}

	if let Some(query) = line.strip_prefix("find ") {
		return Input::Find(query.trim().to_string());
	}
	if let Some(n) = line.strip_prefix("top ") {
		return Input::Top(n.trim().to_string());
	}

	let Some((first, second)) = line.split_once('+') else {
		return Input::Invalid("expected <movie> + <movie>".to_string());
	};

	match (first.parse::<MovieRef>(), second.parse::<MovieRef>()) {
		(Ok(a), Ok(b)) => Input::Blend(a, b),
		(Err(e), _) | (_, Err(e)) => Input::Invalid(e),
	}
}

pub fn run(engine: &Engine, top_n: usize) -> Result<()> {
	ui::info("Starting interactive session");
	ui::info("Type '<movie> + <movie>', or 'help'");
	ui::success(&format!("Loaded {} movies", engine.catalog().len()));
	println!();

	let mut top_n = top_n;
	let stdin = io::stdin();
	let mut lines = stdin.lock().lines();

	loop {
		print!("{} ", "mixer>".bright_magenta().bold());
		io::stdout().flush()?;

		let Some(line) = lines.next() else {
			break;
		};

		match parse(&line?) {
			Input::Empty => continue,
			Input::Exit => {
				ui::info("Goodbye!");
				break;
			}
			Input::Help => show_help(),
			Input::Invalid(msg) => ui::warn(&msg),
			Input::Top(raw) => match config::parse_count("top_n", &raw) {
				Ok(n) => {
					top_n = n as usize;
					ui::success(&format!("Showing {} recommendations", top_n));
				}
				Err(e) => ui::error(&e.to_string()),
			},
			Input::Find(query) => {
				for entry in engine.search_titles(&query, 10) {
					println!("  {} {}", format!("{:>8}", entry.id).bright_magenta(), entry.title);
				}
			}
			Input::Blend(a, b) => {
				if let Err(e) = blend_once(engine, &a, &b, top_n) {
					ui::error(&e.to_string());
				}
			}
		}

		println!();
	}

	Ok(())
}

fn blend_once(engine: &Engine, first: &MovieRef, second: &MovieRef, top_n: usize) -> Result<()> {
	let start = std::time::Instant::now();
	let a = engine.resolve(first)?;
	let b = engine.resolve(second)?;
	let results = engine.recommend(a.id, b.id, top_n)?;

	if results.is_empty() {
		ui::warn("No similar movies found");
		return Ok(());
	}

	let posters = vec![Poster::Unavailable; results.len()];
	super::recommend::print_results(&results, &posters);
	println!(
		"\n{} {} in {}ms",
		"✓".bright_green().bold(),
		format!("{} + {}", a.title, b.title).bright_white(),
		start.elapsed().as_millis()
	);

	Ok(())
}

fn show_help() {
	println!("{}", "REPL Commands:".bright_magenta().bold());
	println!("  {}  Blend two movies (ids or titles)", "<a> + <b>".dimmed());
	println!("  {}  List titles containing text", "find <text>".dimmed());
	println!("  {}      Change number of results", "top <n>".dimmed());
	println!("  {}         Show this help message", "help".dimmed());
	println!("  {}         Exit", "exit".dimmed());
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_blends() {
		assert_eq!(
			parse("Heat + 862"),
			Input::Blend(MovieRef::Title("Heat".into()), MovieRef::Id(862))
		);
		assert!(matches!(parse("Heat +"), Input::Invalid(_)));
		assert!(matches!(parse("Heat"), Input::Invalid(_)));
	}

	#[test]
	fn parses_commands() {
		assert_eq!(parse("  "), Input::Empty);
		assert_eq!(parse("q"), Input::Exit);
		assert_eq!(parse("find toy"), Input::Find("toy".into()));
		assert_eq!(parse("top 5"), Input::Top("5".into()));
		assert_eq!(parse("help"), Input::Help);
	}
}
