//! Library error type

use std::path::PathBuf;

/// Errors surfaced to callers of the engine
#[derive(thiserror::Error, Debug)]
pub enum MixerError {
	#[error("movie not recognized: id {id} is not in the catalog")]
	UnknownMovie { id: i64 },

	#[error("movie not recognized: no title matches \"{title}\"")]
	UnknownTitle { title: String },

	#[error("catalog is empty: no movies with at least {min_vote_count} votes")]
	EmptyCatalog { min_vote_count: u32 },

	#[error("invalid configuration: {0}")]
	InvalidConfig(String),

	#[error("failed to read {path}: {source}")]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("{path} has no '{column}' column")]
	MissingColumn { path: PathBuf, column: &'static str },

	#[error("failed to parse {path}: {source}")]
	Csv {
		path: PathBuf,
		#[source]
		source: csv::Error,
	},
}

impl MixerError {
	/// True when the failure is about an unrecognized movie reference
	pub fn is_unknown_movie(&self) -> bool {
		matches!(self, Self::UnknownMovie { .. } | Self::UnknownTitle { .. })
	}
}

pub type Result<T> = std::result::Result<T, MixerError>;
