//! Stats command - catalog and vocabulary summary

use anyhow::Result;
use colored::*;
use std::collections::HashMap;

use crate::core::{Catalog, VectorSpace};
use crate::engine::Engine;
use crate::ui;

pub struct TermCount {
	pub name: String,
	pub count: usize,
}

pub struct StatsResult {
	pub movies: usize,
	pub vocabulary: usize,
	pub featureless: usize,
	pub top_genres: Vec<TermCount>,
	pub top_terms: Vec<TermCount>,
}

/// Genre frequencies and document frequencies of vocabulary terms
pub fn calculate(catalog: &Catalog, space: &VectorSpace, limit: usize) -> StatsResult {
	let mut genres: HashMap<&str, usize> = HashMap::new();
	for entry in catalog.entries() {
		for genre in &entry.genres {
			*genres.entry(genre.as_str()).or_insert(0) += 1;
		}
	}

	let mut doc_freq = vec![0usize; space.dimensions()];
	for row in space.rows() {
		for &(col, _) in row.as_slice() {
			doc_freq[col] += 1;
		}
	}

	let top_genres = rank(genres.into_iter().map(|(n, c)| (n.to_string(), c)).collect(), limit);
	let top_terms = rank(
		doc_freq
			.into_iter()
			.enumerate()
			.filter_map(|(col, c)| space.term(col).map(|t| (t.to_string(), c)))
			.collect(),
		limit,
	);

	StatsResult {
		movies: catalog.len(),
		vocabulary: space.dimensions(),
		featureless: space.rows().iter().filter(|r| r.is_zero()).count(),
		top_genres,
		top_terms,
	}
}

fn rank(mut counts: Vec<(String, usize)>, limit: usize) -> Vec<TermCount> {
	counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
	counts
		.into_iter()
		.take(limit)
		.map(|(name, count)| TermCount { name, count })
		.collect()
}

pub fn run(engine: &Engine, limit: usize) -> Result<()> {
	let stats = calculate(engine.catalog(), engine.space(), limit);
	let report = engine.report();

	ui::header("Catalog");
	println!("  {} {}", "Movies:".bright_magenta(), stats.movies);
	println!("  {} {}", "Below vote floor:".yellow(), report.below_vote_floor);
	if report.dropped() > 0 {
		println!(
			"  {} {} ({} bad ids, {} duplicates, {} bad votes, {} malformed)",
			"Dropped:".red(),
			report.dropped(),
			report.missing_ids,
			report.duplicate_ids,
			report.bad_vote_counts,
			report.malformed_rows
		);
	}
	if report.keywords_skipped() > 0 {
		println!(
			"  {} {} ({} bad ids, {} duplicates, {} malformed)",
			"Keyword rows skipped:".yellow(),
			report.keywords_skipped(),
			report.keyword_missing_ids,
			report.keyword_duplicate_ids,
			report.keyword_malformed_rows
		);
	}
	println!("  {} {}", "Vocabulary:".bright_magenta(), stats.vocabulary);
	if stats.featureless > 0 {
		println!("  {} {}", "Without features:".yellow(), stats.featureless);
	}

	print_counts("Top genres", &stats.top_genres);
	print_counts("Most common terms", &stats.top_terms);
	println!();

	Ok(())
}

fn print_counts(title: &str, counts: &[TermCount]) {
	if counts.is_empty() {
		return;
	}
	ui::header(title);
	for c in counts {
		println!("  {:>6} {}", c.count.to_string().bright_magenta(), c.name);
	}
}
