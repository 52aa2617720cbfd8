use rand::Rng;
use rand::seq::IndexedRandom;

use super::ngram::NGram;
use crate::error::MarkovError;

/// Represents a state of the transition table.
///
/// A `State` corresponds to one n-gram (`key`) and stores every token
/// observed right after it, in order of appearance.
///
/// Conceptually, this is a node in a Markov chain whose outgoing edges are
/// weighted by multiplicity: a successor seen `k` times appears `k` times
/// in the list and is `k` times as likely to be picked.
///
/// ## Invariants
/// - All successors belong to the same `key`
/// - The list is append-only
#[derive(Clone, Debug, PartialEq)]
pub struct State {
	/// The n-gram this state belongs to.
	key: NGram,
	/// Successor tokens, duplicates preserved.
	/// Example: ["mary", "juanita", "mary"]
	successors: Vec<String>,
}

impl State {
	/// Creates a new empty state for the given key.
	pub fn new(key: NGram) -> Self {
		Self {
			key,
			successors: Vec::new(),
		}
	}

	pub fn key(&self) -> &NGram {
		&self.key
	}

	pub fn successors(&self) -> &[String] {
		&self.successors
	}

	pub fn len(&self) -> usize {
		self.successors.len()
	}

	pub fn is_empty(&self) -> bool {
		self.successors.is_empty()
	}

	/// Records one occurrence of `token` following this key.
	pub fn add_successor(&mut self, token: &str) {
		self.successors.push(token.to_owned());
	}

	/// Picks the next token uniformly from the successor list.
	///
	/// Sampling is with replacement over the list, which makes it
	/// frequency-weighted over distinct tokens.
	///
	/// Returns `None` if the state has no successors.
	pub fn predict<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&str> {
		self.successors.choose(rng).map(String::as_str)
	}

	/// Merges another state into this one.
	///
	/// `other`'s successors are appended after ours.
	///
	/// # Errors
	/// Returns an error if the keys do not match.
	pub fn merge(&mut self, other: &Self) -> Result<(), MarkovError> {
		if self.key != other.key {
			return Err(MarkovError::KeyMismatch);
		}
		self.successors.extend(other.successors.iter().cloned());
		Ok(())
	}
}
