//! TF-IDF vector space over catalog feature text
//!
//! Rows are sparse, L2-normalized and aligned with catalog positions.
//! Columns are ordered lexicographically by term so fitting is reproducible.

use regex::Regex;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::LazyLock;

use super::stopwords::is_stop_word;

static TOKEN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?u)\b\w\w+\b").expect("valid token pattern"));

/// Sparse weight vector: `(column, weight)` pairs sorted by column
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector(Vec<(usize, f64)>);

impl SparseVector {
	pub const fn empty() -> Self {
		Self(Vec::new())
	}

	pub fn new(mut pairs: Vec<(usize, f64)>) -> Self {
		pairs.retain(|&(_, w)| w != 0.0);
		pairs.sort_by_key(|&(col, _)| col);
		Self(pairs)
	}

	pub fn as_slice(&self) -> &[(usize, f64)] {
		&self.0
	}

	pub fn is_zero(&self) -> bool {
		self.0.is_empty()
	}

	/// Weight at a column (zero when absent)
	pub fn get(&self, column: usize) -> f64 {
		self.0
			.binary_search_by_key(&column, |&(col, _)| col)
			.map(|i| self.0[i].1)
			.unwrap_or(0.0)
	}

	pub fn norm(&self) -> f64 {
		self.0.iter().map(|(_, w)| w * w).sum::<f64>().sqrt()
	}

	pub fn dot(&self, other: &Self) -> f64 {
		let (mut i, mut j, mut sum) = (0, 0, 0.0);
		while i < self.0.len() && j < other.0.len() {
			let (a, b) = (self.0[i], other.0[j]);
			match a.0.cmp(&b.0) {
				std::cmp::Ordering::Less => i += 1,
				std::cmp::Ordering::Greater => j += 1,
				std::cmp::Ordering::Equal => {
					sum += a.1 * b.1;
					i += 1;
					j += 1;
				}
			}
		}
		sum
	}

	/// Element-wise minimum. Columns missing on either side are zero there,
	/// so only shared columns survive.
	pub fn minimum(&self, other: &Self) -> Self {
		let (mut i, mut j) = (0, 0);
		let mut out = Vec::new();
		while i < self.0.len() && j < other.0.len() {
			let (a, b) = (self.0[i], other.0[j]);
			match a.0.cmp(&b.0) {
				std::cmp::Ordering::Less => i += 1,
				std::cmp::Ordering::Greater => j += 1,
				std::cmp::Ordering::Equal => {
					out.push((a.0, a.1.min(b.1)));
					i += 1;
					j += 1;
				}
			}
		}
		Self::new(out)
	}

	/// Cosine similarity clamped to [0, 1]; zero when either side has no magnitude
	pub fn cosine(&self, other: &Self) -> f64 {
		let denom = self.norm() * other.norm();
		if denom <= 0.0 {
			return 0.0;
		}
		(self.dot(other) / denom).clamp(0.0, 1.0)
	}
}

/// Split text into lower-cased vocabulary tokens (stop words removed)
pub fn tokenize(text: &str) -> Vec<String> {
	let lowered = text.to_lowercase();
	TOKEN
		.find_iter(&lowered)
		.map(|m| m.as_str())
		.filter(|t| !is_stop_word(t))
		.map(str::to_string)
		.collect()
}

/// Fitted vocabulary and per-entry weight rows
#[derive(Debug, Default)]
pub struct VectorSpace {
	terms: Vec<String>,
	idf: Vec<f64>,
	rows: Vec<SparseVector>,
}

impl VectorSpace {
	/// Fit on documents in catalog order. Empty input yields an empty space.
	pub fn fit<'a>(documents: impl IntoIterator<Item = &'a str>) -> Self {
		let tokenized: Vec<Vec<String>> = documents.into_iter().map(tokenize).collect();
		let n_docs = tokenized.len();

		let vocabulary: BTreeSet<&str> = tokenized.iter().flatten().map(String::as_str).collect();
		let columns: BTreeMap<&str, usize> = vocabulary.iter().enumerate().map(|(i, t)| (*t, i)).collect();

		let mut df = vec![0usize; columns.len()];
		for tokens in &tokenized {
			let unique: BTreeSet<usize> = tokens.iter().map(|t| columns[t.as_str()]).collect();
			for col in unique {
				df[col] += 1;
			}
		}

		let idf: Vec<f64> = df
			.iter()
			.map(|&d| (((1 + n_docs) as f64 / (1 + d) as f64).ln() + 1.0))
			.collect();

		let rows = tokenized
			.iter()
			.map(|tokens| {
				let mut counts: BTreeMap<usize, u32> = BTreeMap::new();
				for token in tokens {
					*counts.entry(columns[token.as_str()]).or_insert(0) += 1;
				}
				let weights: Vec<(usize, f64)> = counts
					.into_iter()
					.map(|(col, tf)| (col, tf as f64 * idf[col]))
					.collect();
				l2_normalize(weights)
			})
			.collect();

		let terms = vocabulary.into_iter().map(str::to_string).collect();

		Self { terms, idf, rows }
	}

	pub fn dimensions(&self) -> usize {
		self.terms.len()
	}

	pub fn len(&self) -> usize {
		self.rows.len()
	}

	pub fn is_empty(&self) -> bool {
		self.rows.is_empty()
	}

	pub fn row(&self, position: usize) -> Option<&SparseVector> {
		self.rows.get(position)
	}

	pub fn rows(&self) -> &[SparseVector] {
		&self.rows
	}

	pub fn term(&self, column: usize) -> Option<&str> {
		self.terms.get(column).map(String::as_str)
	}

	pub fn column(&self, term: &str) -> Option<usize> {
		self.terms.binary_search_by(|t| t.as_str().cmp(term)).ok()
	}

	pub fn idf(&self, column: usize) -> Option<f64> {
		self.idf.get(column).copied()
	}

	/// Strongest terms of a vector, ties broken by column order
	pub fn top_terms(&self, vector: &SparseVector, limit: usize) -> Vec<(&str, f64)> {
		let mut weighted: Vec<(usize, f64)> = vector.as_slice().to_vec();
		weighted.sort_by(|a, b| b.1.total_cmp(&a.1));
		weighted
			.into_iter()
			.take(limit)
			.filter_map(|(col, w)| self.term(col).map(|t| (t, w)))
			.collect()
	}
}

fn l2_normalize(weights: Vec<(usize, f64)>) -> SparseVector {
	let norm: f64 = weights.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
	if norm > 0.0 {
		SparseVector::new(weights.into_iter().map(|(c, w)| (c, w / norm)).collect())
	} else {
		SparseVector::new(weights)
	}
}
