//! Catalog source: CSV files on disk

pub mod loader;
pub mod source;

pub use loader::{load_catalog, load_keywords, Issue, LoadReport};
