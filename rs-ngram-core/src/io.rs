use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::{ModelError, Result};
use crate::model::estimate::Token;

/// Reads a text file and returns all its lines as a `Vec<String>`.
///
/// - Reads the entire file into memory
/// - Splits on `\n` / `\r\n`
pub(crate) fn read_file<P: AsRef<Path>>(filename: P) -> std::io::Result<Vec<String>> {
	let mut contents = String::new();
	File::open(filename)?.read_to_string(&mut contents)?;
	Ok(contents.lines().map(str::to_owned).collect())
}

/// Parses a corpus where every non-empty line is one token stream.
///
/// Tokens are unsigned integers separated by whitespace. Lines are
/// numbered from 1 in errors.
///
/// Example:
/// `"1 2 3\n\n4 5"` → `[[1, 2, 3], [4, 5]]`
pub fn parse_corpus<S: AsRef<str>>(lines: &[S]) -> Result<Vec<Vec<Token>>> {
	let mut streams = Vec::new();
	for (number, line) in lines.iter().enumerate() {
		let line = line.as_ref().trim();
		if line.is_empty() {
			continue;
		}
		let stream = line
			.split_whitespace()
			.map(|token| {
				token.parse::<Token>().map_err(|_| ModelError::Parse { line: number + 1, token: token.to_owned() })
			})
			.collect::<Result<Vec<Token>>>()?;
		streams.push(stream);
	}
	Ok(streams)
}

/// Loads a corpus file, one token stream per line.
pub fn read_corpus<P: AsRef<Path>>(filename: P) -> Result<Vec<Vec<Token>>> {
	let lines = read_file(filename)?;
	parse_corpus(lines.as_slice())
}
