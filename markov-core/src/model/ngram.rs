use std::borrow::Borrow;
use std::fmt;

/// A fixed-length, ordered window of tokens.
///
/// Used as the key of the transition table and as the walk cursor.
/// An `NGram` is never mutated: advancing the cursor builds a new one
/// (see [`NGram::shift`]).
///
/// # Invariants
/// - Equality is exact and case-sensitive over every position
/// - Hashing matches the hash of the underlying `[String]`, so a table
///   keyed by `NGram` can be queried with a borrowed window
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NGram(Vec<String>);

impl NGram {
	pub fn new<I, S>(tokens: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self(tokens.into_iter().map(Into::into).collect())
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	pub fn tokens(&self) -> &[String] {
		&self.0
	}

	pub fn first(&self) -> Option<&str> {
		self.0.first().map(String::as_str)
	}

	/// Returns the next window: drops the first token and appends `next`.
	///
	/// The length is preserved. An empty window stays empty.
	pub fn shift(&self, next: &str) -> NGram {
		if self.0.is_empty() {
			return self.clone();
		}
		let mut tokens = Vec::with_capacity(self.0.len());
		tokens.extend(self.0[1..].iter().cloned());
		tokens.push(next.to_owned());
		NGram(tokens)
	}

	/// Whether the first token begins with an uppercase character.
	pub fn starts_capitalized(&self) -> bool {
		self.first()
			.and_then(|token| token.chars().next())
			.is_some_and(char::is_uppercase)
	}
}

impl Borrow<[String]> for NGram {
	fn borrow(&self) -> &[String] {
		&self.0
	}
}

impl fmt::Display for NGram {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0.join(" "))
	}
}
