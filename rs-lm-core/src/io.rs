use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::error::Result;

/// Reads a whole corpus from `reader` and decodes it as UTF-8.
///
/// - Buffers the entire stream in memory before decoding
/// - Keeps line endings and every other character untouched
pub(crate) fn read_corpus<R: Read>(reader: R) -> Result<String> {
	let mut bytes = Vec::new();
	BufReader::new(reader).read_to_end(&mut bytes)?;
	Ok(String::from_utf8(bytes)?)
}

/// Reads a corpus file.
///
/// Example:
/// `data/shakespeare.txt` → the full text, newlines included
pub(crate) fn read_corpus_file<P: AsRef<Path>>(filename: P) -> Result<String> {
	read_corpus(File::open(filename)?)
}

/// Reads a small text file (configuration) into a `String`.
pub(crate) fn read_text_file<P: AsRef<Path>>(filename: P) -> Result<String> {
	Ok(std::fs::read_to_string(filename)?)
}
