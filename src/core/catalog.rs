//! Filtered, deduplicated movie catalog

use serde::Serialize;
use std::collections::HashMap;

use super::features;

/// A single movie eligible for recommendation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogEntry {
	pub id: i64,
	pub title: String,
	pub vote_count: u32,
	pub vote_average: f32,
	pub genres: Vec<String>,
	pub keywords: Vec<String>,
	/// Genre terms then keyword terms, space separated (vectorizer input)
	#[serde(skip)]
	pub combined_features: String,
	pub overview: String,
	pub release_date: Option<String>,
	pub poster_path: Option<String>,
}

/// Raw fields for one movie before normalization
#[derive(Debug, Clone, Default)]
pub struct RawMovie {
	pub id: i64,
	pub title: String,
	pub vote_count: u32,
	pub vote_average: f32,
	pub genres_raw: String,
	pub keywords_raw: String,
	pub overview: String,
	pub release_date: Option<String>,
	pub poster_path: Option<String>,
}

impl CatalogEntry {
	/// Parse genre/keyword fields and derive `combined_features`
	pub fn from_raw(raw: RawMovie) -> Self {
		let genres = features::parse_terms(&raw.genres_raw);
		let keywords = features::parse_terms(&raw.keywords_raw);
		let combined_features = features::combine(&genres, &keywords);

		Self {
			id: raw.id,
			title: raw.title,
			vote_count: raw.vote_count,
			vote_average: raw.vote_average,
			genres,
			keywords,
			combined_features,
			overview: raw.overview,
			release_date: raw.release_date,
			poster_path: raw.poster_path,
		}
	}

	/// Release year, when the date starts with one
	pub fn year(&self) -> Option<&str> {
		let date = self.release_date.as_deref()?;
		let year = date.get(..4)?;
		year.chars().all(|c| c.is_ascii_digit()).then_some(year)
	}

	pub fn genres_display(&self) -> String {
		self.genres.join(", ")
	}
}

/// Immutable ordered catalog; position `i` is row `i` of the vector space
#[derive(Debug, Default)]
pub struct Catalog {
	entries: Vec<CatalogEntry>,
	positions: HashMap<i64, usize>,
}

impl Catalog {
	/// Build from entries in source order. Later duplicates of an id are
	/// dropped; the returned count says how many.
	pub fn build(entries: impl IntoIterator<Item = CatalogEntry>) -> (Self, usize) {
		let mut kept = Vec::new();
		let mut positions = HashMap::new();
		let mut duplicates = 0;

		for entry in entries {
			if positions.contains_key(&entry.id) {
				crate::ui::debug(&format!("Dropping duplicate id {} ({})", entry.id, entry.title));
				duplicates += 1;
				continue;
			}
			positions.insert(entry.id, kept.len());
			kept.push(entry);
		}

		(Self { entries: kept, positions }, duplicates)
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	pub fn entries(&self) -> &[CatalogEntry] {
		&self.entries
	}

	pub fn get(&self, position: usize) -> Option<&CatalogEntry> {
		self.entries.get(position)
	}

	pub fn position(&self, id: i64) -> Option<usize> {
		self.positions.get(&id).copied()
	}

	pub fn by_id(&self, id: i64) -> Option<&CatalogEntry> {
		self.position(id).and_then(|p| self.entries.get(p))
	}

	pub fn contains(&self, id: i64) -> bool {
		self.positions.contains_key(&id)
	}

	/// First entry whose title matches exactly, ignoring case
	pub fn find_title(&self, title: &str) -> Option<&CatalogEntry> {
		let needle = title.trim().to_lowercase();
		self.entries.iter().find(|e| e.title.to_lowercase() == needle)
	}

	/// Entries whose title contains `query`, exact matches first, then by votes
	pub fn search_titles(&self, query: &str, limit: usize) -> Vec<&CatalogEntry> {
		let needle = query.trim().to_lowercase();
		if needle.is_empty() {
			return Vec::new();
		}

		let mut matches: Vec<&CatalogEntry> = self
			.entries
			.iter()
			.filter(|e| e.title.to_lowercase().contains(&needle))
			.collect();

		matches.sort_by_key(|e| (e.title.to_lowercase() != needle, std::cmp::Reverse(e.vote_count)));
		matches.truncate(limit);
		matches
	}

	/// Iterator over `combined_features` in catalog order
	pub fn documents(&self) -> impl Iterator<Item = &str> {
		self.entries.iter().map(|e| e.combined_features.as_str())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn raw(id: i64, title: &str, genres: &str) -> RawMovie {
		RawMovie {
			id,
			title: title.to_string(),
			vote_count: 1500,
			genres_raw: genres.to_string(),
			..Default::default()
		}
	}

	#[test]
	fn from_raw_derives_combined_features() {
		let mut movie = raw(1, "Alien", "[{'id': 27, 'name': 'Horror'}]");
		movie.keywords_raw = "[{'id': 9, 'name': 'Space'}]".to_string();
		let entry = CatalogEntry::from_raw(movie);
		assert_eq!(entry.genres, vec!["horror"]);
		assert_eq!(entry.keywords, vec!["space"]);
		assert_eq!(entry.combined_features, "horror space");
	}

	#[test]
	fn empty_fields_are_tolerated() {
		let entry = CatalogEntry::from_raw(raw(2, "Blank", "[]"));
		assert!(entry.combined_features.is_empty());
	}

	#[test]
	fn build_keeps_first_occurrence() {
		let entries = vec![
			CatalogEntry::from_raw(raw(7, "First", "Drama")),
			CatalogEntry::from_raw(raw(8, "Other", "Comedy")),
			CatalogEntry::from_raw(raw(7, "Second", "Action")),
		];
		let (catalog, duplicates) = Catalog::build(entries);
		assert_eq!(duplicates, 1);
		assert_eq!(catalog.len(), 2);
		assert_eq!(catalog.by_id(7).unwrap().title, "First");
		assert_eq!(catalog.position(8), Some(1));
	}

	#[test]
	fn title_lookup_is_case_insensitive() {
		let (catalog, _) = Catalog::build(vec![
			CatalogEntry::from_raw(raw(1, "The Matrix", "Action")),
			CatalogEntry::from_raw(raw(2, "The Matrix Reloaded", "Action")),
		]);
		assert_eq!(catalog.find_title("the matrix").unwrap().id, 1);
		assert!(catalog.find_title("matrix").is_none());

		let found = catalog.search_titles("MATRIX", 10);
		assert_eq!(found.len(), 2);
		assert!(catalog.search_titles("  ", 10).is_empty());
	}

	#[test]
	fn year_requires_leading_digits() {
		let mut entry = CatalogEntry::from_raw(raw(1, "Heat", "Crime"));
		entry.release_date = Some("1995-12-15".to_string());
		assert_eq!(entry.year(), Some("1995"));
		entry.release_date = Some("soon".to_string());
		assert_eq!(entry.year(), None);
	}
}
