use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::mpsc;
use std::thread;

use log::debug;

use super::ngram::NGram;
use super::state::State;
use crate::error::MarkovError;

/// Transition table of a word-level Markov chain of order `n`.
///
/// Maps every window of `n` consecutive tokens seen in the input to the
/// list of tokens observed immediately after it.
///
/// # Responsibilities
/// - Build the table from a token sequence or raw text
/// - Answer successor lookups for the walker
/// - Merge with another table of the same order
///
/// # Invariants
/// - `n` is always >= 1
/// - Every key has exactly `n` tokens
/// - Successor lists are only appended to, never reordered or truncated
#[derive(Clone, Debug)]
pub struct Chain {
	/// Order of the chain (number of tokens per key).
	n: usize,

	/// Mapping from a key to its successors.
	states: HashMap<NGram, State>,
}

/// Builds the transition table for `tokens` with windows of width `n`.
///
/// For every start index `i` such that `tokens[i + n]` exists, the token
/// `tokens[i + n]` is appended to the entry of `tokens[i..i + n]`.
///
/// When `tokens.len() <= n` no window has a follower and the returned
/// chain is empty; callers must not hand it to the walker.
///
/// # Errors
/// Returns `InvalidOrder` if `n == 0`.
///
/// # Example
/// ```
/// use markov_core::build_chains;
///
/// let tokens = ["hi", "there", "mary", "hi", "there", "juanita"];
/// let chain = build_chains(&tokens, 2).unwrap();
/// let successors = chain.get(&["hi".to_owned(), "there".to_owned()]).unwrap();
/// assert_eq!(successors.successors(), ["mary", "juanita"]);
/// ```
pub fn build_chains<S: AsRef<str>>(tokens: &[S], n: usize) -> Result<Chain, MarkovError> {
	let mut chain = Chain::new(n)?;
	chain.add_tokens(tokens);
	Ok(chain)
}

impl Chain {
	/// Creates an empty chain of order `n`.
	///
	/// # Errors
	/// Returns an error if `n < 1`.
	pub fn new(n: usize) -> Result<Self, MarkovError> {
		if n < 1 {
			return Err(MarkovError::InvalidOrder);
		}
		Ok(Self { n, states: HashMap::new() })
	}

	/// Splits `text` on whitespace and builds the table from the tokens.
	///
	/// Tokens are used verbatim: no case folding, punctuation stays attached.
	pub fn from_text(text: &str, n: usize) -> Result<Self, MarkovError> {
		let tokens: Vec<&str> = text.split_whitespace().collect();
		build_chains(&tokens, n)
	}

	/// Builds one chain per text on worker threads and merges them.
	///
	/// Texts are independent: no window spans two of them.
	///
	/// # Notes
	/// - Texts are split into chunks (based on CPU cores * factor).
	/// - Each thread builds a partial chain and sends it over an MPSC channel,
	///   tagged with its chunk index.
	/// - Partial chains are merged in chunk order, so successor lists follow
	///   the order of `texts` whatever order the threads finish in.
	pub fn build_parallel<S>(texts: &[S], n: usize) -> Result<Self, MarkovError>
	where
		S: AsRef<str> + Sync,
	{
		let mut final_chain = Chain::new(n)?;
		if texts.is_empty() {
			return Ok(final_chain);
		}

		let cpus = num_cpus::get();
		let factor = 8;
		let chunks = cpus * factor;
		let chunk_size = texts.len().div_ceil(chunks);

		let (tx, rx) = mpsc::channel();
		thread::scope(|scope| {
			for (index, chunk) in texts.chunks(chunk_size).enumerate() {
				let tx = tx.clone();
				scope.spawn(move || {
					let mut partial = Chain { n, states: HashMap::new() };
					for text in chunk {
						let tokens: Vec<&str> = text.as_ref().split_whitespace().collect();
						partial.add_tokens(&tokens);
					}
					// The receiver outlives the scope, send cannot fail
					let _ = tx.send((index, partial));
				});
			}
		});
		drop(tx);

		let mut partials: Vec<(usize, Chain)> = rx.iter().collect();
		partials.sort_by_key(|(index, _)| *index);
		for (_, partial) in &partials {
			final_chain.merge(partial)?;
		}

		debug!(
			"built order-{} chain from {} texts: {} keys, {} successors",
			n,
			texts.len(),
			final_chain.len(),
			final_chain.successor_count()
		);
		Ok(final_chain)
	}

	/// Slides a window of width `n` over `tokens` and records every follower.
	///
	/// # Notes
	/// - Tokens shorter than `n + 1` contribute nothing.
	/// - Windows are looked up by borrowed slice; a key is allocated only
	///   the first time a window is seen.
	pub fn add_tokens<S: AsRef<str>>(&mut self, tokens: &[S]) {
		if tokens.len() <= self.n {
			debug!(
				"insufficient input: {} tokens for order {}, nothing recorded",
				tokens.len(),
				self.n
			);
			return;
		}

		let words: Vec<String> = tokens.iter().map(|t| t.as_ref().to_owned()).collect();
		for i in 0..words.len() - self.n {
			let window = &words[i..i + self.n];
			let next = &words[i + self.n];
			match self.states.get_mut(window) {
				Some(state) => state.add_successor(next),
				None => {
					let key = NGram::new(window.iter().cloned());
					let mut state = State::new(key.clone());
					state.add_successor(next);
					self.states.insert(key, state);
				}
			}
		}
	}

	pub fn order(&self) -> usize {
		self.n
	}

	/// Number of distinct keys.
	pub fn len(&self) -> usize {
		self.states.len()
	}

	pub fn is_empty(&self) -> bool {
		self.states.is_empty()
	}

	/// Total number of recorded transitions, duplicates included.
	pub fn successor_count(&self) -> usize {
		self.states.values().map(State::len).sum()
	}

	/// Looks up the successors of a window.
	pub fn get(&self, window: &[String]) -> Option<&State> {
		self.states.get(window)
	}

	pub fn contains(&self, window: &[String]) -> bool {
		self.states.contains_key(window)
	}

	/// Iterator over all keys, in arbitrary order.
	pub fn keys(&self) -> impl Iterator<Item = &NGram> {
		self.states.keys()
	}

	/// Merges another chain into this one.
	///
	/// # Behavior
	/// - Keys present in both: `other`'s successors are appended to ours.
	/// - Keys only in `other`: cloned in.
	///
	/// # Errors
	/// Returns an error if the orders differ.
	pub fn merge(&mut self, other: &Self) -> Result<(), MarkovError> {
		if self.n != other.n {
			return Err(MarkovError::OrderMismatch { expected: self.n, got: other.n });
		}

		for (key, state) in &other.states {
			match self.states.entry(key.clone()) {
				Entry::Occupied(mut existing) => existing.get_mut().merge(state)?,
				Entry::Vacant(slot) => {
					slot.insert(state.clone());
				}
			}
		}

		Ok(())
	}

	#[cfg(test)]
	pub(crate) fn insert_state(&mut self, state: State) {
		self.states.insert(state.key().clone(), state);
	}
}
