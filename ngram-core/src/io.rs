use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use log::debug;

use crate::error::Result;
use crate::model::symbol::Symbol;

/// Reads a text file and returns all its lines as a `Vec<String>`.
///
/// - Reads the entire file into memory
/// - Splits on `\n` / `\r\n`
pub(crate) fn read_file<P: AsRef<Path>>(filename: P) -> io::Result<Vec<String>> {
	let mut contents = String::new();
	File::open(filename)?.read_to_string(&mut contents)?;
	Ok(contents.lines().map(str::to_owned).collect())
}

/// Splits one corpus line into symbols.
///
/// Returns `None` for blank lines.
pub fn parse_line<T: Symbol>(line: &str) -> Result<Option<Vec<T>>> {
	let tokens = line
		.split_whitespace()
		.map(T::parse)
		.collect::<Result<Vec<T>>>()?;
	Ok(if tokens.is_empty() { None } else { Some(tokens) })
}

/// Reads a corpus file: one sequence per line, symbols separated by
/// whitespace. Blank lines are skipped.
///
/// Word corpora need no special syntax; note corpora write each note as
/// `PITCH:DURATION` (e.g. `C4:4 E4:8 G4:-4 $::$`).
pub fn read_corpus<T: Symbol, P: AsRef<Path>>(filename: P) -> Result<Vec<Vec<T>>> {
	let lines = read_file(&filename)?;
	let mut sequences = Vec::with_capacity(lines.len());
	for line in &lines {
		if let Some(sequence) = parse_line(line)? {
			sequences.push(sequence);
		}
	}
	debug!(
		"Read {} sequences ({} blank lines) from {}",
		sequences.len(),
		lines.len() - sequences.len(),
		filename.as_ref().display()
	);
	Ok(sequences)
}

/// Builds an output path based on an input path and a new extension.
///
/// Example:
/// `data/input.txt` + `"bin"` → `data/input.bin`
pub(crate) fn build_output_path<P: AsRef<Path>>(
	input_path: P,
	output_extension: &str,
) -> io::Result<PathBuf> {
	let input_path = input_path.as_ref();

	let parent = input_path.parent().unwrap_or_else(|| Path::new("."));
	let file_stem = input_path
		.file_stem()
		.ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "Input path has no filename"))?;

	let mut output = PathBuf::from(parent);
	output.push(file_stem);
	output.set_extension(output_extension);

	Ok(output)
}
