//! One-time engine initialization: load, normalize, fit
//!
//! An `Engine` is built once and then only read. Queries borrow it, so many
//! callers may share one instance.

use std::path::Path;
use std::str::FromStr;
use std::time::Instant;

use crate::config::Settings;
use crate::core::{Catalog, CatalogEntry, Recommendation, Recommender, VectorSpace};
use crate::error::{MixerError, Result};
use crate::storage::{self, LoadReport};

/// A movie given by id or by title
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MovieRef {
	Id(i64),
	Title(String),
}

impl FromStr for MovieRef {
	type Err = String;

	fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
		let s = s.trim();
		if s.is_empty() {
			return Err("movie reference is empty".to_string());
		}
		Ok(match s.parse::<i64>() {
			Ok(id) => MovieRef::Id(id),
			Err(_) => MovieRef::Title(s.to_string()),
		})
	}
}

impl std::fmt::Display for MovieRef {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			MovieRef::Id(id) => write!(f, "#{}", id),
			MovieRef::Title(title) => write!(f, "\"{}\"", title),
		}
	}
}

pub struct Engine {
	catalog: Catalog,
	space: VectorSpace,
	report: LoadReport,
}

impl Engine {
	/// Load the catalog from disk and fit the vector space
	pub fn init(settings: &Settings) -> Result<Self> {
		Self::load(&settings.movies_path, &settings.keywords_path, settings.min_vote_count)
	}

	pub fn load(movies: &Path, keywords: &Path, min_vote_count: u32) -> Result<Self> {
		let start = Instant::now();
		crate::ui::debug(&format!(
			"Loading {} + {} (min votes {})",
			movies.display(),
			keywords.display(),
			min_vote_count
		));

		let (catalog, report) = storage::load_catalog(movies, keywords, min_vote_count)?;
		crate::ui::debug(&format!(
			"Catalog: {} retained, {} below vote floor, {} dropped",
			report.retained,
			report.below_vote_floor,
			report.dropped()
		));

		let engine = Self::from_catalog(catalog, report);
		crate::ui::debug(&format!("Engine ready in {}ms", start.elapsed().as_millis()));
		Ok(engine)
	}

	/// Fit over an already-built catalog
	pub fn from_catalog(catalog: Catalog, report: LoadReport) -> Self {
		let space = VectorSpace::fit(catalog.documents());
		crate::ui::debug(&format!(
			"Fitted {} terms over {} movies",
			space.dimensions(),
			space.len()
		));
		Self { catalog, space, report }
	}

	pub fn catalog(&self) -> &Catalog {
		&self.catalog
	}

	pub fn space(&self) -> &VectorSpace {
		&self.space
	}

	pub fn report(&self) -> &LoadReport {
		&self.report
	}

	pub fn recommender(&self) -> Recommender<'_> {
		Recommender::new(&self.catalog, &self.space)
	}

	pub fn recommend(&self, first: i64, second: i64, top_n: usize) -> Result<Vec<Recommendation<'_>>> {
		self.recommender().recommend(first, second, top_n)
	}

	/// Resolve an id or title to a catalog entry. A number that is not a
	/// known id is tried as a title ("300", "1917").
	pub fn resolve(&self, movie: &MovieRef) -> Result<&CatalogEntry> {
		match movie {
			MovieRef::Id(id) => self
				.catalog
				.by_id(*id)
				.or_else(|| self.catalog.find_title(&id.to_string()))
				.ok_or(MixerError::UnknownMovie { id: *id }),
			MovieRef::Title(title) => self
				.catalog
				.find_title(title)
				.ok_or_else(|| MixerError::UnknownTitle { title: title.clone() }),
		}
	}

	pub fn search_titles(&self, query: &str, limit: usize) -> Vec<&CatalogEntry> {
		self.catalog.search_titles(query, limit)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::core::RawMovie;

	fn engine() -> Engine {
		let (catalog, _) = Catalog::build(
			[(10, "Alien", "horror, scifi"), (20, "Aliens", "action, scifi"), (30, "Heat", "crime")]
				.into_iter()
				.map(|(id, title, genres)| {
					CatalogEntry::from_raw(RawMovie {
						id,
						title: title.to_string(),
						vote_count: 1000,
						genres_raw: genres.to_string(),
						..Default::default()
					})
				}),
		);
		Engine::from_catalog(catalog, LoadReport::default())
	}

	#[test]
	fn movie_refs_parse() {
		assert_eq!("862".parse::<MovieRef>().unwrap(), MovieRef::Id(862));
		assert_eq!(" Heat ".parse::<MovieRef>().unwrap(), MovieRef::Title("Heat".into()));
		assert!("".parse::<MovieRef>().is_err());
	}

	#[test]
	fn resolves_ids_and_titles() {
		let engine = engine();
		assert_eq!(engine.resolve(&MovieRef::Id(30)).unwrap().title, "Heat");
		assert_eq!(engine.resolve(&MovieRef::Title("aliens".into())).unwrap().id, 20);
		assert!(matches!(engine.resolve(&MovieRef::Id(1)), Err(MixerError::UnknownMovie { id: 1 })));
		assert!(engine.resolve(&MovieRef::Title("Predator".into())).unwrap_err().is_unknown_movie());
	}

	#[test]
	fn numeric_titles_resolve_when_not_an_id() {
		let (catalog, _) = Catalog::build([(1271, "300"), (530915, "1917"), (2012, "Heat")].into_iter().map(
			|(id, title)| {
				CatalogEntry::from_raw(RawMovie {
					id,
					title: title.to_string(),
					vote_count: 1000,
					..Default::default()
				})
			},
		));
		let engine = Engine::from_catalog(catalog, LoadReport::default());

		assert_eq!(engine.resolve(&"300".parse().unwrap()).unwrap().id, 1271);
		assert_eq!(engine.resolve(&"1917".parse().unwrap()).unwrap().id, 530915);
		// a matching id wins over a numeric title
		assert_eq!(engine.resolve(&"2012".parse().unwrap()).unwrap().title, "Heat");
		assert!(matches!(engine.resolve(&"21".parse().unwrap()), Err(MixerError::UnknownMovie { id: 21 })));
	}

	#[test]
	fn recommend_through_engine() {
		let engine = engine();
		let results = engine.recommend(10, 20, 3).unwrap();
		assert_eq!(results.len(), 1);
		assert_eq!(results[0].entry.id, 30);
	}
}
