//! Core recommendation engine

pub mod catalog;
pub mod features;
pub mod recommend;
pub mod stopwords;
pub mod vector;

pub use catalog::{Catalog, CatalogEntry, RawMovie};
pub use recommend::{Recommendation, Recommender};
pub use vector::{SparseVector, VectorSpace};
