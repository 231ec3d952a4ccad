//! Application configuration and constants

use std::path::PathBuf;
use std::sync::OnceLock;

use crate::error::{MixerError, Result};

static CUSTOM_ASSETS_DIR: OnceLock<PathBuf> = OnceLock::new();
static CUSTOM_MOVIES: OnceLock<PathBuf> = OnceLock::new();
static CUSTOM_KEYWORDS: OnceLock<PathBuf> = OnceLock::new();

// === Data Files ===
pub const ASSETS_DIR: &str = "assets";
pub const MOVIES_FILE: &str = "movies.csv";
pub const KEYWORDS_FILE: &str = "keywords.csv";

// === Recommendation Defaults ===
pub const DEFAULT_MIN_VOTE_COUNT: u32 = 1000;
pub const DEFAULT_TOP_N: usize = 3;
pub const EXPLAIN_TERMS: usize = 5;

// === Environment ===
pub const ENV_ASSETS_DIR: &str = "MIXER_ASSETS_DIR";
pub const ENV_MIN_VOTES: &str = "MIXER_MIN_VOTES";
pub const ENV_TOP_N: &str = "MIXER_TOP_N";
pub const ENV_TMDB_TOKEN: &str = "TMDB_TOKEN";

// === TMDB ===
pub const TMDB_API_URL: &str = "https://api.themoviedb.org/3";
pub const POSTER_SIZE: &str = "w500";
pub const HTTP_TIMEOUT_SECS: u64 = 10;
pub const HTTP_ATTEMPTS: u32 = 2;

pub fn set_assets_dir(path: PathBuf) {
	let _ = CUSTOM_ASSETS_DIR.set(path);
}

pub fn set_movies_file(path: PathBuf) {
	let _ = CUSTOM_MOVIES.set(path);
}

pub fn set_keywords_file(path: PathBuf) {
	let _ = CUSTOM_KEYWORDS.set(path);
}

/// Load `.env` from the working directory, if present
pub fn load_env() {
	match dotenvy::dotenv() {
		Ok(path) => crate::ui::debug(&format!("Loaded environment from {}", path.display())),
		Err(_) => crate::ui::debug("No .env file found"),
	}
}

/// Get assets directory (custom, MIXER_ASSETS_DIR, or ./assets)
pub fn assets_dir() -> PathBuf {
	if let Some(custom) = CUSTOM_ASSETS_DIR.get() {
		crate::ui::debug(&format!("Using custom assets dir: {}", custom.display()));
		return custom.clone();
	}

	if let Ok(env_path) = std::env::var(ENV_ASSETS_DIR) {
		let path = PathBuf::from(&env_path);
		if path.is_dir() {
			crate::ui::debug(&format!("Using {}: {}", ENV_ASSETS_DIR, env_path));
			return path;
		}
		crate::ui::warn(&format!("{} is not a directory: {}", ENV_ASSETS_DIR, env_path));
	}

	PathBuf::from(ASSETS_DIR)
}

pub fn movies_path() -> PathBuf {
	if let Some(custom) = CUSTOM_MOVIES.get() {
		return custom.clone();
	}
	assets_dir().join(MOVIES_FILE)
}

pub fn keywords_path() -> PathBuf {
	if let Some(custom) = CUSTOM_KEYWORDS.get() {
		return custom.clone();
	}
	assets_dir().join(KEYWORDS_FILE)
}

/// TMDB bearer token, ignoring blank values
pub fn tmdb_token() -> Option<String> {
	std::env::var(ENV_TMDB_TOKEN)
		.ok()
		.map(|t| t.trim().to_string())
		.filter(|t| !t.is_empty())
}

/// Validate a count supplied as text (flag or environment variable)
pub fn parse_count(name: &str, raw: &str) -> Result<u64> {
	let value: i64 = raw
		.trim()
		.parse()
		.map_err(|_| MixerError::InvalidConfig(format!("{} must be an integer, got '{}'", name, raw)))?;
	if value < 0 {
		return Err(MixerError::InvalidConfig(format!(
			"{} must be non-negative, got {}",
			name, value
		)));
	}
	Ok(value as u64)
}

/// Engine and query settings resolved from flags, environment and defaults
#[derive(Debug, Clone)]
pub struct Settings {
	pub movies_path: PathBuf,
	pub keywords_path: PathBuf,
	pub min_vote_count: u32,
	pub top_n: usize,
}

impl Settings {
	/// Resolve settings; explicit values win over the environment
	pub fn resolve(min_vote_count: Option<&str>, top_n: Option<&str>) -> Result<Self> {
		let top_n = match top_n.map(str::to_string).or_else(|| std::env::var(ENV_TOP_N).ok()) {
			Some(raw) => parse_count("top_n", &raw)? as usize,
			None => DEFAULT_TOP_N,
		};

		Ok(Self { top_n, ..Self::for_catalog(min_vote_count)? })
	}

	/// Resolve only what loading the catalog needs; `top_n` stays at its default
	pub fn for_catalog(min_vote_count: Option<&str>) -> Result<Self> {
		let min_vote_count = match min_vote_count.map(str::to_string).or_else(|| std::env::var(ENV_MIN_VOTES).ok()) {
			Some(raw) => {
				let value = parse_count("min_vote_count", &raw)?;
				u32::try_from(value).map_err(|_| {
					MixerError::InvalidConfig(format!("min_vote_count is too large: {}", value))
				})?
			}
			None => DEFAULT_MIN_VOTE_COUNT,
		};

		Ok(Self {
			movies_path: movies_path(),
			keywords_path: keywords_path(),
			min_vote_count,
			top_n: DEFAULT_TOP_N,
		})
	}
}

impl Default for Settings {
	fn default() -> Self {
		Self {
			movies_path: PathBuf::from(ASSETS_DIR).join(MOVIES_FILE),
			keywords_path: PathBuf::from(ASSETS_DIR).join(KEYWORDS_FILE),
			min_vote_count: DEFAULT_MIN_VOTE_COUNT,
			top_n: DEFAULT_TOP_N,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parse_count_accepts_non_negative() {
		assert_eq!(parse_count("top_n", "0").unwrap(), 0);
		assert_eq!(parse_count("top_n", " 12 ").unwrap(), 12);
	}

	#[test]
	fn parse_count_rejects_negative_and_garbage() {
		assert!(matches!(parse_count("top_n", "-1"), Err(MixerError::InvalidConfig(_))));
		assert!(matches!(parse_count("top_n", "three"), Err(MixerError::InvalidConfig(_))));
		assert!(matches!(parse_count("top_n", "1.5"), Err(MixerError::InvalidConfig(_))));
	}

	#[test]
	fn explicit_values_override_defaults() {
		let settings = Settings::resolve(Some("50"), Some("7")).unwrap();
		assert_eq!(settings.min_vote_count, 50);
		assert_eq!(settings.top_n, 7);

		let catalog_only = Settings::for_catalog(Some("50")).unwrap();
		assert_eq!(catalog_only.min_vote_count, 50);
		assert_eq!(catalog_only.top_n, DEFAULT_TOP_N);
	}

	#[test]
	fn defaults_match_documented_values() {
		let settings = Settings::default();
		assert_eq!(settings.min_vote_count, 1000);
		assert_eq!(settings.top_n, 3);
		assert!(settings.movies_path.ends_with("movies.csv"));
	}
}
