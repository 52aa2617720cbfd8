use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// Reads a whole text file into a `String`.
pub fn read_file<P: AsRef<Path>>(filename: P) -> io::Result<String> {
	let mut contents = String::new();
	File::open(filename)?.read_to_string(&mut contents)?;
	Ok(contents)
}

/// Reads every file in order and concatenates their contents.
///
/// Contents are joined as-is, without any separator: the last word of a
/// file and the first word of the next one fuse if no whitespace sits
/// between them.
pub fn read_sources<P: AsRef<Path>>(paths: &[P]) -> io::Result<String> {
	let mut text = String::new();
	for path in paths {
		text.push_str(&read_file(path)?);
	}
	Ok(text)
}

/// Reads each file into its own `String`, keeping them separate.
pub fn read_each<P: AsRef<Path>>(paths: &[P]) -> io::Result<Vec<String>> {
	paths.iter().map(read_file).collect()
}

/// Reads all of standard input.
pub fn read_stdin() -> io::Result<String> {
	let mut contents = String::new();
	io::stdin().read_to_string(&mut contents)?;
	Ok(contents)
}
