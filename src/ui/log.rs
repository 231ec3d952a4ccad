//! Unified logging system

use chrono::Local;
use colored::*;
use std::sync::atomic::{AtomicBool, Ordering};

static VERBOSE: AtomicBool = AtomicBool::new(false);
static QUIET: AtomicBool = AtomicBool::new(false);

const LOGO: &str = r#"
    __  ____
   /  |/  (_)  _____  _____
  / /|_/ / / |/_/ _ \/ ___/
 / /  / / />  </  __/ /
/_/  /_/_/_/|_|\___/_/      "#;

const SLOGANS: &[&str] = &[
	"Two movies walk into a bar...",
	"The soft intersection of your taste",
	"Element-wise minimum, maximum fun",
	"Heat + Toy Story = ?",
	"No popcorn was harmed",
	"Cosine similarity, but make it cinema",
	"We watched the credits so you don't have to",
	"Because scrolling for an hour is a genre too",
];

pub fn random_slogan() -> &'static str {
	SLOGANS[rand::random_range(0..SLOGANS.len())]
}

pub fn print_logo() {
	if Log::is_quiet() {
		return;
	}
	println!("{}", LOGO.bright_magenta().bold());
	println!("{}", random_slogan().dimmed().italic());
}

pub struct Log;

impl Log {
	pub fn set_verbose(enabled: bool) {
		VERBOSE.store(enabled, Ordering::Relaxed);
	}

	pub fn is_verbose() -> bool {
		VERBOSE.load(Ordering::Relaxed)
	}

	/// Suppress everything but errors (machine-readable output)
	pub fn set_quiet(enabled: bool) {
		QUIET.store(enabled, Ordering::Relaxed);
	}

	pub fn is_quiet() -> bool {
		QUIET.load(Ordering::Relaxed)
	}
}

pub fn info(msg: &str) {
	if !Log::is_quiet() {
		println!("{} {}", "ℹ".bright_blue().bold(), msg.bright_white());
	}
}

pub fn success(msg: &str) {
	if !Log::is_quiet() {
		println!("{} {}", "✓".bright_green().bold(), msg.bright_white());
	}
}

pub fn warn(msg: &str) {
	if !Log::is_quiet() {
		println!("{} {}", "⚠".bright_yellow().bold(), msg.bright_white());
	}
}

pub fn error(msg: &str) {
	eprintln!("{} {}", "✗".bright_red().bold(), msg.bright_white());
}

pub fn debug(msg: &str) {
	if Log::is_verbose() {
		let time = Local::now().format("%H:%M:%S%.3f").to_string();
		eprintln!("{} {} {}", "⚙".bright_black().bold(), time.dimmed(), msg.dimmed());
	}
}

pub fn header(text: &str) {
	if !Log::is_quiet() {
		println!("\n{}", text.bright_magenta().bold());
	}
}

/// Clickable text (OSC 8 terminal hyperlink)
pub fn link(text: &str, url: &str) -> String {
	format!("\x1b]8;;{}\x1b\\{}\x1b]8;;\x1b\\", url, text)
}

/// Shorten long text on a char boundary
pub fn truncate(text: &str, max_chars: usize) -> String {
	if text.chars().count() <= max_chars {
		return text.to_string();
	}
	let cut: String = text.chars().take(max_chars.saturating_sub(3)).collect();
	format!("{}...", cut.trim_end())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn truncate_respects_char_boundaries() {
		assert_eq!(truncate("short", 10), "short");
		assert_eq!(truncate("Amélie and the long title", 10), "Amélie...");
	}

	#[test]
	fn link_wraps_text() {
		let l = link("Heat", "https://example.org/p.jpg");
		assert!(l.contains("https://example.org/p.jpg"));
		assert!(l.contains("Heat"));
	}
}
