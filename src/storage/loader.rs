//! Catalog loading: movies + keywords join, vote floor, dedup

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::path::Path;

use super::source::{clean_id, field, read_text, reader, Columns};
use crate::core::{Catalog, CatalogEntry, RawMovie};
use crate::error::{MixerError, Result};

/// Recoverable data-integrity problems; the offending row or field is dropped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Issue {
	MalformedRow,
	MissingId,
	BadVoteCount,
	DuplicateId,
}

/// What happened while building the catalog
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LoadReport {
	pub movie_rows: usize,
	pub keyword_rows: usize,
	pub below_vote_floor: usize,
	pub malformed_rows: usize,
	pub missing_ids: usize,
	pub bad_vote_counts: usize,
	pub duplicate_ids: usize,
	pub retained: usize,
	/// Keyword rows skipped; these never drop a movie
	pub keyword_malformed_rows: usize,
	pub keyword_missing_ids: usize,
	pub keyword_duplicate_ids: usize,
}

impl LoadReport {
	pub fn record(&mut self, issue: Issue) {
		match issue {
			Issue::MalformedRow => self.malformed_rows += 1,
			Issue::MissingId => self.missing_ids += 1,
			Issue::BadVoteCount => self.bad_vote_counts += 1,
			Issue::DuplicateId => self.duplicate_ids += 1,
		}
	}

	/// Keyword table problems, kept apart from movie rows
	pub fn record_keyword(&mut self, issue: Issue) {
		match issue {
			Issue::MalformedRow => self.keyword_malformed_rows += 1,
			Issue::MissingId => self.keyword_missing_ids += 1,
			Issue::DuplicateId => self.keyword_duplicate_ids += 1,
			Issue::BadVoteCount => {}
		}
	}

	/// Movie rows dropped for integrity reasons (not the vote floor)
	pub fn dropped(&self) -> usize {
		self.malformed_rows + self.missing_ids + self.bad_vote_counts + self.duplicate_ids
	}

	/// Keyword rows skipped
	pub fn keywords_skipped(&self) -> usize {
		self.keyword_malformed_rows + self.keyword_missing_ids + self.keyword_duplicate_ids
	}
}

/// Keyword table: id → raw keyword text, first occurrence wins
pub fn load_keywords(path: &Path, report: &mut LoadReport) -> Result<HashMap<i64, String>> {
	let text = read_text(path)?;
	let mut rdr = reader(&text);
	let columns = Columns::read(&mut rdr, path)?;
	let id_col = columns.required("id", path)?;
	let kw_col = columns.required("keywords", path)?;

	let mut keywords = HashMap::new();

	for record in rdr.records() {
		report.keyword_rows += 1;
		let Ok(record) = record else {
			report.record_keyword(Issue::MalformedRow);
			continue;
		};
		let Some(id) = field(&record, Some(id_col)).and_then(clean_id) else {
			report.record_keyword(Issue::MissingId);
			continue;
		};
		let raw = field(&record, Some(kw_col)).unwrap_or("[]");
		match keywords.entry(id) {
			Entry::Occupied(_) => report.record_keyword(Issue::DuplicateId),
			Entry::Vacant(slot) => {
				slot.insert(raw.to_string());
			}
		}
	}

	Ok(keywords)
}

/// Load, join, filter and deduplicate the catalog
pub fn load_catalog(movies_path: &Path, keywords_path: &Path, min_vote_count: u32) -> Result<(Catalog, LoadReport)> {
	let mut report = LoadReport::default();
	let keywords = load_keywords(keywords_path, &mut report)?;
	crate::ui::debug(&format!("Loaded keywords for {} movies", keywords.len()));

	let text = read_text(movies_path)?;
	let mut rdr = reader(&text);
	let columns = Columns::read(&mut rdr, movies_path)?;

	let id_col = columns.required("id", movies_path)?;
	let votes_col = columns.required("vote_count", movies_path)?;
	let title_col = columns.optional("title");
	let average_col = columns.optional("vote_average");
	let genres_col = columns.optional("genres");
	let own_keywords_col = columns.optional("keywords");
	let overview_col = columns.optional("overview");
	let release_col = columns.optional("release_date");
	let poster_col = columns.optional("poster_path");

	let mut entries = Vec::new();

	for record in rdr.records() {
		report.movie_rows += 1;
		let Ok(record) = record else {
			report.record(Issue::MalformedRow);
			continue;
		};

		let Some(vote_count) = field(&record, Some(votes_col)).and_then(parse_votes) else {
			report.record(Issue::BadVoteCount);
			continue;
		};
		if vote_count < min_vote_count {
			report.below_vote_floor += 1;
			continue;
		}

		let Some(id) = field(&record, Some(id_col)).and_then(clean_id) else {
			report.record(Issue::MissingId);
			continue;
		};

		let keywords_raw = keywords
			.get(&id)
			.map(String::as_str)
			.or_else(|| field(&record, own_keywords_col))
			.unwrap_or("[]");

		entries.push(CatalogEntry::from_raw(RawMovie {
			id,
			title: field(&record, title_col).unwrap_or_default().to_string(),
			vote_count,
			vote_average: field(&record, average_col)
				.and_then(|v| v.parse::<f32>().ok())
				.filter(|v| v.is_finite())
				.unwrap_or(0.0),
			genres_raw: field(&record, genres_col).unwrap_or("[]").to_string(),
			keywords_raw: keywords_raw.to_string(),
			overview: field(&record, overview_col).unwrap_or_default().to_string(),
			release_date: field(&record, release_col).map(str::to_string),
			poster_path: field(&record, poster_col).map(str::to_string),
		}));
	}

	let (catalog, duplicates) = Catalog::build(entries);
	for _ in 0..duplicates {
		report.record(Issue::DuplicateId);
	}
	report.retained = catalog.len();

	if catalog.is_empty() {
		return Err(MixerError::EmptyCatalog { min_vote_count });
	}

	Ok((catalog, report))
}

/// Vote counts may be written as floats (`"5415.0"`)
fn parse_votes(raw: &str) -> Option<u32> {
	let value: f64 = raw.parse().ok()?;
	(value.is_finite() && value >= 0.0).then(|| value.min(u32::MAX as f64) as u32)
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::io::Write;
	use tempfile::NamedTempFile;

	fn write(contents: &str) -> NamedTempFile {
		let mut file = NamedTempFile::new().unwrap();
		file.write_all(contents.as_bytes()).unwrap();
		file
	}

	const MOVIES: &str = "\
id,title,vote_count,vote_average,genres,overview,release_date
862,Toy Story,5415.0,7.7,\"[{'id': 16, 'name': 'Animation'}]\",Toys come alive,1995-10-30
8844,Jumanji,2413,6.9,\"[{'id': 12, 'name': 'Adventure'}]\",A board game,1995-12-15
15602,Grumpier Old Men,92,6.5,\"[{'id': 10749, 'name': 'Romance'}]\",Fishing,1995-12-22
1997-08-20,Broken Row,3000,5.0,[],Shifted columns,
862,Toy Story Again,4000,7.0,[],Duplicate,1995-10-30
949,Heat,lots,7.7,[],Bad votes,1995-12-15
";

	const KEYWORDS: &str = "\
id,keywords
862,\"[{'id': 931, 'name': 'jealousy'}, {'id': 4290, 'name': 'toy'}]\"
862,\"[{'id': 1, 'name': 'ignored'}]\"
8844,
";

	#[test]
	fn loads_filters_and_joins() {
		let movies = write(MOVIES);
		let keywords = write(KEYWORDS);
		let (catalog, report) = load_catalog(movies.path(), keywords.path(), 1000).unwrap();

		assert_eq!(catalog.len(), 2);
		let toy = catalog.by_id(862).unwrap();
		assert_eq!(toy.title, "Toy Story");
		assert_eq!(toy.vote_count, 5415);
		assert_eq!(toy.combined_features, "animation jealousy toy");
		assert_eq!(catalog.by_id(8844).unwrap().combined_features, "adventure");

		assert_eq!(report.movie_rows, 6);
		assert_eq!(report.below_vote_floor, 1);
		assert_eq!(report.missing_ids, 1);
		assert_eq!(report.bad_vote_counts, 1);
		assert_eq!(report.duplicate_ids, 1);
		assert_eq!(report.retained, 2);
		assert_eq!(report.keyword_duplicate_ids, 1);
		assert_eq!(report.dropped(), 3);
	}

	#[test]
	fn keyword_problems_do_not_count_as_dropped_movies() {
		let movies = write("id,title,vote_count,genres\n1,Heat,2000,Crime\n");
		let keywords = write("id,keywords\nx,heist\ny,bank\n1,robbery\n1,ignored\n");
		let (catalog, report) = load_catalog(movies.path(), keywords.path(), 1000).unwrap();

		assert_eq!(catalog.by_id(1).unwrap().combined_features, "crime robbery");
		assert_eq!(report.keyword_rows, 4);
		assert_eq!(report.keyword_missing_ids, 2);
		assert_eq!(report.keyword_duplicate_ids, 1);
		assert_eq!(report.keywords_skipped(), 3);
		assert_eq!(report.missing_ids, 0);
		assert_eq!(report.duplicate_ids, 0);
		assert_eq!(report.dropped(), 0);
		assert_eq!(report.retained, 1);
	}

	#[test]
	fn vote_floor_is_configurable() {
		let movies = write(MOVIES);
		let keywords = write(KEYWORDS);
		let (catalog, _) = load_catalog(movies.path(), keywords.path(), 0).unwrap();
		assert!(catalog.contains(15602));
	}

	#[test]
	fn empty_catalog_is_an_error() {
		let movies = write(MOVIES);
		let keywords = write(KEYWORDS);
		let err = load_catalog(movies.path(), keywords.path(), 1_000_000).unwrap_err();
		assert!(matches!(err, MixerError::EmptyCatalog { min_vote_count: 1_000_000 }));
	}

	#[test]
	fn own_keywords_column_is_a_fallback() {
		let movies = write("id,title,vote_count,genres,keywords\n5,Heist,2000,Crime,\"Bank, Vault\"\n");
		let keywords = write("id,keywords\n");
		let (catalog, _) = load_catalog(movies.path(), keywords.path(), 1000).unwrap();
		assert_eq!(catalog.by_id(5).unwrap().combined_features, "crime bank vault");
	}

	#[test]
	fn missing_required_column_is_an_error() {
		let movies = write("id,title\n1,Heat\n");
		let keywords = write("id,keywords\n");
		let err = load_catalog(movies.path(), keywords.path(), 0).unwrap_err();
		assert!(matches!(err, MixerError::MissingColumn { column: "vote_count", .. }));
	}
}
