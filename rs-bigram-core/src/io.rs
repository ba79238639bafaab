use std::fs::{self, File};
use std::io::Read;
use std::path::Path;

use crate::error::{ModelError, Result};

/// Wraps an `std::io::Error` with the path that produced it.
fn with_path<P: AsRef<Path>>(path: P) -> impl FnOnce(std::io::Error) -> ModelError {
	let path = path.as_ref().to_path_buf();
	move |source| ModelError::Io { path, source }
}

/// Reads a UTF-8 text file and returns all its lines as a `Vec<String>`.
///
/// - Reads the entire file into memory
/// - Splits on `\n` / `\r\n`
/// - Invalid UTF-8 is reported as an `InvalidData` I/O error
pub(crate) fn read_file<P: AsRef<Path>>(filename: P) -> Result<Vec<String>> {
	let mut contents = String::new();
	File::open(&filename)
		.and_then(|mut file| file.read_to_string(&mut contents))
		.map_err(with_path(&filename))?;
	Ok(contents.lines().map(str::to_owned).collect())
}

/// Reads a whole binary file.
pub(crate) fn read_bytes<P: AsRef<Path>>(filename: P) -> Result<Vec<u8>> {
	fs::read(&filename).map_err(with_path(&filename))
}

/// Writes a whole binary file, replacing any previous content.
pub(crate) fn write_bytes<P: AsRef<Path>>(filename: P, bytes: &[u8]) -> Result<()> {
	fs::write(&filename, bytes).map_err(with_path(&filename))
}

/// Extracts the base filename without extension.
///
/// Examples:
/// - `"./data/book.txt"` → `"book"`
/// - `"book.txt"` → `"book"`
/// - `"/"` → `"/"` (no stem, the whole path is kept)
pub(crate) fn get_filename<P: AsRef<Path>>(input_path: P) -> String {
	let path = input_path.as_ref();
	match path.file_stem() {
		Some(stem) => stem.to_string_lossy().to_string(),
		None => path.to_string_lossy().to_string(),
	}
}
