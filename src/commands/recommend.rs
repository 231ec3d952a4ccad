//! Recommend command - blend two movies

use anyhow::Result;
use colored::*;
use serde::Serialize;
use std::time::Instant;

use crate::config::EXPLAIN_TERMS;
use crate::core::Recommendation;
use crate::engine::{Engine, MovieRef};
use crate::poster::{Poster, PosterLookup};
use crate::ui;

pub struct Options<'a> {
	pub top_n: usize,
	pub json: bool,
	pub posters: Option<&'a dyn PosterLookup>,
	pub open_first: bool,
	pub explain: bool,
}

#[derive(Serialize)]
struct JsonResult<'a> {
	rank: usize,
	#[serde(flatten)]
	recommendation: &'a Recommendation<'a>,
	poster: Option<&'a str>,
}

#[derive(Serialize)]
struct JsonOutput<'a> {
	first: i64,
	second: i64,
	results: Vec<JsonResult<'a>>,
}

pub fn run(engine: &Engine, first: &MovieRef, second: &MovieRef, opts: &Options) -> Result<()> {
	let start = Instant::now();

	let a = engine.resolve(first)?;
	let b = engine.resolve(second)?;

	ui::info(&format!(
		"Blending {} + {}",
		a.title.bright_cyan(),
		b.title.bright_cyan()
	));

	let results = engine.recommend(a.id, b.id, opts.top_n)?;

	// Posters are fetched after ranking; failures only lose the image
	let posters: Vec<Poster> = match opts.posters {
		Some(lookup) => results.iter().map(|r| lookup.poster(r.entry.id)).collect(),
		None => vec![Poster::Unavailable; results.len()],
	};

	if opts.json {
		let output = JsonOutput {
			first: a.id,
			second: b.id,
			results: results
				.iter()
				.zip(&posters)
				.enumerate()
				.map(|(i, (recommendation, poster))| JsonResult {
					rank: i + 1,
					recommendation,
					poster: poster.url(),
				})
				.collect(),
		};
		println!("{}", serde_json::to_string_pretty(&output)?);
		return Ok(());
	}

	if opts.explain {
		let shared = engine.recommender().explain(a.id, b.id, EXPLAIN_TERMS)?;
		if shared.is_empty() {
			ui::warn("These movies share no genres or keywords");
		} else {
			let terms: Vec<String> = shared
				.iter()
				.map(|(term, weight)| format!("{} {}", term.yellow(), format!("{:.2}", weight).dimmed()))
				.collect();
			ui::info(&format!("Shared features: {}", terms.join(", ")));
		}
	}

	if results.is_empty() {
		ui::warn("No similar movies found");
		return Ok(());
	}

	ui::header("Recommendations");
	print_results(&results, &posters);

	println!();
	ui::success(&format!(
		"Ranked {} movies in {}ms",
		engine.catalog().len(),
		start.elapsed().as_millis()
	));

	if opts.open_first {
		match posters.first().and_then(Poster::url) {
			Some(url) => {
				if let Err(e) = open::that(url) {
					ui::warn(&format!("Failed to open: {}", e));
				}
			}
			None => ui::warn("No poster available to open"),
		}
	}

	Ok(())
}

pub fn print_results(results: &[Recommendation], posters: &[Poster]) {
	for (i, rec) in results.iter().enumerate() {
		let entry = rec.entry;
		let title = match posters.get(i).and_then(Poster::url) {
			Some(url) => ui::link(&entry.title, url),
			None => entry.title.clone(),
		};
		let year = entry.year().map(|y| format!(" ({})", y)).unwrap_or_default();
		let percentage = (rec.score * 100.0).round() as u32;

		println!(
			"{}. {}{} {} {}",
			format!("{:2}", i + 1).bright_magenta().bold(),
			title.bright_white(),
			year.dimmed(),
			format!("★ {:.1}", entry.vote_average).yellow(),
			format!("{}%", percentage).dimmed(),
		);

		if !entry.genres.is_empty() {
			println!("    {}", entry.genres_display().italic().dimmed());
		}
		if ui::Log::is_verbose() && !entry.overview.is_empty() {
			println!("    {}", ui::truncate(&entry.overview, 100).dimmed());
		}
	}
}
