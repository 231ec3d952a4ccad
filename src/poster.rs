//! Best-effort poster lookup via TMDB
//!
//! Lookups never fail: any problem (no token, network, bad status, no posters)
//! turns into `Poster::Unavailable`.

use reqwest::blocking::Client;
use serde::Deserialize;
use std::sync::OnceLock;
use std::time::Duration;

use crate::config;

/// Display-ready poster reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Poster {
	Url(String),
	Unavailable,
}

impl Poster {
	pub fn url(&self) -> Option<&str> {
		match self {
			Poster::Url(url) => Some(url),
			Poster::Unavailable => None,
		}
	}
}

pub trait PosterLookup {
	fn poster(&self, movie_id: i64) -> Poster;
}

/// Used when no TMDB token is configured
pub struct NoPosters;

impl PosterLookup for NoPosters {
	fn poster(&self, _movie_id: i64) -> Poster {
		Poster::Unavailable
	}
}

#[derive(Deserialize)]
struct ConfigurationResponse {
	images: ImagesConfig,
}

#[derive(Deserialize)]
struct ImagesConfig {
	secure_base_url: String,
}

#[derive(Deserialize)]
struct ImagesResponse {
	#[serde(default)]
	posters: Vec<PosterImage>,
}

#[derive(Deserialize)]
struct PosterImage {
	file_path: String,
}

/// TMDB-backed lookup; the image base URL is fetched once per process
pub struct TmdbPosters {
	client: Client,
	token: String,
	api_url: String,
	size: String,
	base_url: OnceLock<Option<String>>,
}

impl TmdbPosters {
	pub fn new(token: String) -> Option<Self> {
		let client = Client::builder()
			.timeout(Duration::from_secs(config::HTTP_TIMEOUT_SECS))
			.build()
			.map_err(|e| crate::ui::debug(&format!("HTTP client unavailable: {}", e)))
			.ok()?;

		Some(Self {
			client,
			token,
			api_url: config::TMDB_API_URL.to_string(),
			size: config::POSTER_SIZE.to_string(),
			base_url: OnceLock::new(),
		})
	}

	pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
		self.api_url = api_url.into();
		self
	}

	pub fn with_size(mut self, size: impl Into<String>) -> Self {
		self.size = size.into();
		self
	}

	/// Pick TMDB when a token is configured, otherwise no posters
	pub fn from_env() -> Box<dyn PosterLookup> {
		match config::tmdb_token().and_then(TmdbPosters::new) {
			Some(tmdb) => Box::new(tmdb),
			None => {
				crate::ui::debug(&format!("{} not set, posters disabled", config::ENV_TMDB_TOKEN));
				Box::new(NoPosters)
			}
		}
	}

	fn get_json<T: for<'de> Deserialize<'de>>(&self, url: &str) -> Option<T> {
		for attempt in 1..=config::HTTP_ATTEMPTS {
			let response = self
				.client
				.get(url)
				.bearer_auth(&self.token)
				.header("accept", "application/json")
				.send();

			match response {
				Ok(resp) if resp.status().is_success() => {
					return resp
						.json::<T>()
						.map_err(|e| crate::ui::debug(&format!("Bad TMDB payload from {}: {}", url, e)))
						.ok();
				}
				Ok(resp) => {
					crate::ui::debug(&format!("TMDB returned {} for {}", resp.status(), url));
					return None;
				}
				Err(e) => {
					crate::ui::debug(&format!(
						"TMDB request failed (attempt {}/{}): {}",
						attempt,
						config::HTTP_ATTEMPTS,
						e
					));
				}
			}
		}
		None
	}

	fn base_url(&self) -> Option<&str> {
		self.base_url
			.get_or_init(|| {
				let url = format!("{}/configuration", self.api_url);
				self.get_json::<ConfigurationResponse>(&url)
					.map(|c| c.images.secure_base_url)
			})
			.as_deref()
	}
}

impl PosterLookup for TmdbPosters {
	fn poster(&self, movie_id: i64) -> Poster {
		let Some(base_url) = self.base_url() else {
			return Poster::Unavailable;
		};

		let url = format!("{}/movie/{}/images?language=en", self.api_url, movie_id);
		self.get_json::<ImagesResponse>(&url)
			.and_then(|images| images.posters.into_iter().next())
			.map(|p| Poster::Url(poster_url(base_url, &self.size, &p.file_path)))
			.unwrap_or(Poster::Unavailable)
	}
}

/// `{base}{size}{path}`
pub fn poster_url(base_url: &str, size: &str, file_path: &str) -> String {
	format!("{}{}{}", base_url, size, file_path)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn poster_url_joins_parts() {
		assert_eq!(
			poster_url("https://image.tmdb.org/t/p/", "w500", "/abc.jpg"),
			"https://image.tmdb.org/t/p/w500/abc.jpg"
		);
	}

	#[test]
	fn no_posters_is_always_unavailable() {
		assert_eq!(NoPosters.poster(862), Poster::Unavailable);
		assert_eq!(Poster::Unavailable.url(), None);
	}

	#[test]
	fn unreachable_api_degrades_to_unavailable() {
		let tmdb = TmdbPosters::new("token".to_string())
			.unwrap()
			.with_api_url("http://127.0.0.1:9");
		assert_eq!(tmdb.poster(862), Poster::Unavailable);
		assert_eq!(tmdb.poster(863), Poster::Unavailable);
	}

	#[test]
	fn payloads_decode() {
		let images: ImagesResponse = serde_json::from_str(r#"{"id": 1, "backdrops": []}"#).unwrap();
		assert!(images.posters.is_empty());
		let config: ConfigurationResponse = serde_json::from_str(
			r#"{"images": {"secure_base_url": "https://x/", "poster_sizes": ["w92"]}}"#,
		)
		.unwrap();
		assert_eq!(config.images.secure_base_url, "https://x/");
	}
}
