//! Tolerant genre/keyword field decoding
//!
//! Raw fields come either as plain comma separated terms (`"Action, Sci-Fi"`)
//! or as serialized lists of tagged entries (`[{'id': 28, 'name': 'Action'}]`).
//! Python-literal quoting is repaired before JSON decoding. Anything that
//! still fails to decode yields no terms for that field.

use serde::Deserialize;

#[derive(Deserialize)]
#[serde(untagged)]
enum RawTerm {
	Tagged { name: String },
	Plain(String),
}

/// Extract lower-cased terms from a raw field. Never fails.
pub fn parse_terms(raw: &str) -> Vec<String> {
	let raw = raw.trim();
	if is_blank(raw) {
		return Vec::new();
	}

	let terms: Vec<String> = if raw.starts_with('[') || raw.starts_with('{') {
		decode_list(raw).unwrap_or_default()
	} else {
		raw.split([',', '|']).map(str::to_string).collect()
	};

	terms
		.into_iter()
		.map(|t| t.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase())
		.filter(|t| !t.is_empty())
		.collect()
}

/// Build the vectorizer input: genre terms then keyword terms
pub fn normalize(raw_genres: &str, raw_keywords: &str) -> String {
	combine(&parse_terms(raw_genres), &parse_terms(raw_keywords))
}

/// Join already-parsed term lists into `combined_features`
pub fn combine(genres: &[String], keywords: &[String]) -> String {
	genres
		.iter()
		.chain(keywords.iter())
		.map(String::as_str)
		.collect::<Vec<_>>()
		.join(" ")
}

fn is_blank(raw: &str) -> bool {
	raw.is_empty() || raw == "[]" || raw.eq_ignore_ascii_case("nan") || raw == "None"
}

fn decode_list(raw: &str) -> Option<Vec<String>> {
	let parsed = serde_json::from_str::<Vec<RawTerm>>(raw)
		.or_else(|_| serde_json::from_str::<Vec<RawTerm>>(&repair_literal(raw)))
		.ok()?;

	Some(
		parsed
			.into_iter()
			.map(|term| match term {
				RawTerm::Tagged { name } => name,
				RawTerm::Plain(name) => name,
			})
			.collect(),
	)
}

#[derive(Clone, Copy, PartialEq)]
enum Quote {
	None,
	Single,
	Double,
}

/// Rewrite Python literal syntax into JSON: single-quoted strings become
/// double-quoted, and `None`/`True`/`False` become their JSON spelling.
fn repair_literal(raw: &str) -> String {
	let mut out = String::with_capacity(raw.len() + 8);
	let mut chars = raw.chars().peekable();
	let mut quote = Quote::None;

	while let Some(c) = chars.next() {
		match quote {
			Quote::None => match c {
				'\'' => {
					out.push('"');
					quote = Quote::Single;
				}
				'"' => {
					out.push('"');
					quote = Quote::Double;
				}
				c if c.is_ascii_alphabetic() => {
					let mut word = String::from(c);
					while let Some(&next) = chars.peek() {
						if !next.is_ascii_alphanumeric() && next != '_' {
							break;
						}
						word.push(next);
						chars.next();
					}
					out.push_str(match word.as_str() {
						"None" => "null",
						"True" => "true",
						"False" => "false",
						other => other,
					});
				}
				_ => out.push(c),
			},
			Quote::Single => match c {
				'\\' => match chars.next() {
					Some('\'') => out.push('\''),
					Some(next) => {
						out.push('\\');
						out.push(next);
					}
					None => out.push('\\'),
				},
				'"' => out.push_str("\\\""),
				'\'' => {
					out.push('"');
					quote = Quote::None;
				}
				_ => out.push(c),
			},
			Quote::Double => match c {
				'\\' => {
					out.push('\\');
					if let Some(next) = chars.next() {
						out.push(next);
					}
				}
				'"' => {
					out.push('"');
					quote = Quote::None;
				}
				_ => out.push(c),
			},
		}
	}

	out
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_python_literal_genres() {
		let raw = "[{'id': 16, 'name': 'Animation'}, {'id': 35, 'name': 'Comedy'}]";
		assert_eq!(parse_terms(raw), vec!["animation", "comedy"]);
	}

	#[test]
	fn parses_json_keywords() {
		let raw = r#"[{"id": 931, "name": "Jealousy"}, {"id": 4290, "name": "Toy"}]"#;
		assert_eq!(parse_terms(raw), vec!["jealousy", "toy"]);
	}

	#[test]
	fn keeps_apostrophes_inside_double_quotes() {
		let raw = r#"[{'id': 1, 'name': "children's book"}, {'id': 2, 'name': 'boy\'s life'}]"#;
		assert_eq!(parse_terms(raw), vec!["children's book", "boy's life"]);
	}

	#[test]
	fn repairs_python_constants() {
		let raw = "[{'id': None, 'name': 'Heist', 'adult': False}]";
		assert_eq!(parse_terms(raw), vec!["heist"]);
	}

	#[test]
	fn plain_term_lists_are_accepted() {
		assert_eq!(parse_terms("Action, SciFi"), vec!["action", "scifi"]);
		assert_eq!(parse_terms("['Drama', 'War']"), vec!["drama", "war"]);
	}

	#[test]
	fn malformed_input_degrades_to_empty() {
		assert!(parse_terms("[{'id': 1, 'name': 'Open'").is_empty());
		assert!(parse_terms("[{'id': 1}]").is_empty());
		assert!(parse_terms("[1, 2, 3]").is_empty());
		assert!(parse_terms("{'name': 'Solo'}").is_empty());
		assert!(parse_terms("[]").is_empty());
		assert!(parse_terms("NaN").is_empty());
		assert!(parse_terms("   ").is_empty());
	}

	#[test]
	fn normalize_puts_genres_before_keywords() {
		let combined = normalize(
			"[{'id': 878, 'name': 'Science Fiction'}]",
			"[{'id': 1, 'name': 'Space Travel'}, {'id': 2, 'name': 'Robot'}]",
		);
		assert_eq!(combined, "science fiction space travel robot");
	}

	#[test]
	fn normalize_failure_is_field_local() {
		assert_eq!(normalize("[{'id': 18, 'name': 'Drama'}]", "[{broken"), "drama");
		assert_eq!(normalize("[{'name': 1}]", "Heist, Bank"), "heist bank");
		assert_eq!(normalize("", ""), "");
	}
}
