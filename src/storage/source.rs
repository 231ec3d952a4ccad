//! Raw file access with encoding fallback

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::error::{MixerError, Result};

/// Read a text file as UTF-8, falling back to Latin-1
pub fn read_text(path: &Path) -> Result<String> {
	let bytes = fs::read(path).map_err(|source| MixerError::Io {
		path: path.to_path_buf(),
		source,
	})?;

	match String::from_utf8(bytes) {
		Ok(text) => Ok(text),
		Err(e) => {
			crate::ui::debug(&format!("{} is not UTF-8, decoding as Latin-1", path.display()));
			Ok(e.into_bytes().iter().map(|&b| b as char).collect())
		}
	}
}

/// CSV reader over decoded text, tolerant of ragged rows
pub fn reader(text: &str) -> csv::Reader<&[u8]> {
	csv::ReaderBuilder::new()
		.flexible(true)
		.from_reader(text.as_bytes())
}

/// Header name → column index
pub struct Columns(HashMap<String, usize>);

impl Columns {
	pub fn read(reader: &mut csv::Reader<&[u8]>, path: &Path) -> Result<Self> {
		let headers = reader.headers().map_err(|source| MixerError::Csv {
			path: path.to_path_buf(),
			source,
		})?;

		Ok(Self(
			headers
				.iter()
				.enumerate()
				.map(|(i, h)| (h.trim().to_lowercase(), i))
				.collect(),
		))
	}

	pub fn optional(&self, name: &str) -> Option<usize> {
		self.0.get(name).copied()
	}

	pub fn required(&self, name: &'static str, path: &Path) -> Result<usize> {
		self.optional(name).ok_or_else(|| MixerError::MissingColumn {
			path: path.to_path_buf(),
			column: name,
		})
	}
}

/// Numeric id coercion: `"862"` and `"862.0"` are accepted, anything else is not
pub fn clean_id(raw: &str) -> Option<i64> {
	let raw = raw.trim();
	if let Ok(id) = raw.parse::<i64>() {
		return Some(id);
	}
	let value: f64 = raw.parse().ok()?;
	(value.is_finite() && value.fract() == 0.0 && value.abs() < i64::MAX as f64).then_some(value as i64)
}

/// Field value at `column`, trimmed; `None` when absent or blank
pub fn field<'r>(record: &'r csv::StringRecord, column: Option<usize>) -> Option<&'r str> {
	column
		.and_then(|c| record.get(c))
		.map(str::trim)
		.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::io::Write;

	#[test]
	fn clean_id_coerces_numeric_text() {
		assert_eq!(clean_id("862"), Some(862));
		assert_eq!(clean_id(" 862.0 "), Some(862));
		assert_eq!(clean_id("1997-08-20"), None);
		assert_eq!(clean_id("12.5"), None);
		assert_eq!(clean_id(""), None);
		assert_eq!(clean_id("NaN"), None);
	}

	#[test]
	fn latin1_files_are_decoded() {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		file.write_all(b"id,title\n1,Am\xe9lie\n").unwrap();
		let text = read_text(file.path()).unwrap();
		assert!(text.contains("Amélie"));
	}

	#[test]
	fn missing_files_report_path() {
		let err = read_text(Path::new("/definitely/not/here.csv")).unwrap_err();
		assert!(matches!(err, MixerError::Io { .. }));
		assert!(err.to_string().contains("here.csv"));
	}

	#[test]
	fn columns_are_case_insensitive() {
		let text = "ID, Title ,vote_count\n1,Heat,10\n";
		let mut rdr = reader(text);
		let columns = Columns::read(&mut rdr, Path::new("movies.csv")).unwrap();
		assert_eq!(columns.optional("id"), Some(0));
		assert_eq!(columns.optional("title"), Some(1));
		assert!(matches!(
			columns.required("genres", Path::new("movies.csv")),
			Err(MixerError::MissingColumn { column: "genres", .. })
		));
	}
}
