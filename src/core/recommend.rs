//! Hybrid recommendations from two movies
//!
//! The hybrid vector is the element-wise minimum of both movies' TF-IDF rows,
//! a soft intersection: a term only counts as much as its weakest signal.
//! Every catalog row is scored by cosine similarity against it.

use serde::Serialize;

use super::catalog::{Catalog, CatalogEntry};
use super::vector::{SparseVector, VectorSpace};
use crate::error::{MixerError, Result};

/// One ranked result
#[derive(Debug, Clone, Serialize)]
pub struct Recommendation<'a> {
	pub entry: &'a CatalogEntry,
	pub score: f64,
}

/// Ranks a fitted catalog; holds no mutable state
pub struct Recommender<'a> {
	catalog: &'a Catalog,
	space: &'a VectorSpace,
}

impl<'a> Recommender<'a> {
	pub fn new(catalog: &'a Catalog, space: &'a VectorSpace) -> Self {
		debug_assert_eq!(catalog.len(), space.len());
		Self { catalog, space }
	}

	fn resolve(&self, id: i64) -> Result<usize> {
		self.catalog.position(id).ok_or(MixerError::UnknownMovie { id })
	}

	/// Element-wise minimum of both movies' vectors
	pub fn hybrid(&self, first: i64, second: i64) -> Result<SparseVector> {
		let a = self.resolve(first)?;
		let b = self.resolve(second)?;
		Ok(self.row(a).minimum(self.row(b)))
	}

	fn row(&self, position: usize) -> &SparseVector {
		static ZERO: SparseVector = SparseVector::empty();
		self.space.row(position).unwrap_or(&ZERO)
	}

	/// Top `top_n` movies closest to the blend of `first` and `second`,
	/// excluding both. Ties keep catalog order.
	pub fn recommend(&self, first: i64, second: i64, top_n: usize) -> Result<Vec<Recommendation<'a>>> {
		let a = self.resolve(first)?;
		let b = self.resolve(second)?;

		if top_n == 0 {
			return Ok(Vec::new());
		}

		let hybrid = self.row(a).minimum(self.row(b));
		if hybrid.is_zero() {
			crate::ui::debug("Movies share no weighted features; every score is 0");
		}

		let mut scored: Vec<(usize, f64)> = self
			.space
			.rows()
			.iter()
			.enumerate()
			.map(|(pos, row)| (pos, hybrid.cosine(row)))
			.collect();

		// sort_by is stable, so equal scores stay in catalog order
		scored.sort_by(|x, y| y.1.total_cmp(&x.1));

		Ok(scored
			.into_iter()
			.filter(|&(pos, _)| pos != a && pos != b)
			.take(top_n)
			.filter_map(|(pos, score)| {
				self.catalog.get(pos).map(|entry| Recommendation { entry, score })
			})
			.collect())
	}

	/// Strongest shared terms of the hybrid vector
	pub fn explain(&self, first: i64, second: i64, limit: usize) -> Result<Vec<(String, f64)>> {
		let hybrid = self.hybrid(first, second)?;
		Ok(self
			.space
			.top_terms(&hybrid, limit)
			.into_iter()
			.map(|(t, w)| (t.to_string(), w))
			.collect())
	}
}
