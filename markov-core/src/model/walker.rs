use std::cell::Cell;

use log::warn;
use rand::Rng;
use rand::seq::IndexedRandom;

use super::chain::Chain;
use super::ngram::NGram;
use super::state::State;
use super::walk_input::{StartSeed, WalkInput};
use crate::error::MarkovError;

/// Randomized walk over a [`Chain`].
///
/// # Responsibilities
/// - Pick a starting key according to the `StartSeed`
/// - Repeatedly sample a successor and slide the cursor
/// - Stop on the first key without successors, or at the output bound
///
/// The chain is only borrowed; any number of walks can be run from the
/// same walker.
#[derive(Debug)]
pub struct Walker<'a> {
	chain: &'a Chain,
	/// All keys, sorted so that seeded walks are reproducible.
	keys: Vec<&'a NGram>,
	/// Keys whose first token starts with an uppercase character.
	capitalized: Vec<&'a NGram>,
	/// Whether the capitalized-start fallback was already reported.
	warned_fallback: Cell<bool>,
}

/// Generates one text from `chain` with the default [`WalkInput`].
///
/// # Errors
/// Returns `EmptyModel` if the chain has no key.
pub fn generate_text(chain: &Chain) -> Result<String, MarkovError> {
	Walker::new(chain)?.generate(&WalkInput::default(), &mut rand::rng())
}

impl<'a> Walker<'a> {
	/// Prepares a walker over `chain`.
	///
	/// The capitalized candidate keys are collected once here, so start
	/// selection never has to reject and redraw.
	///
	/// # Errors
	/// Returns `EmptyModel` if the chain has no key.
	pub fn new(chain: &'a Chain) -> Result<Self, MarkovError> {
		if chain.is_empty() {
			return Err(MarkovError::EmptyModel);
		}

		let mut keys: Vec<&NGram> = chain.keys().collect();
		keys.sort();
		let capitalized = keys.iter().copied().filter(|key| key.starts_capitalized()).collect();

		Ok(Self {
			chain,
			keys,
			capitalized,
			warned_fallback: Cell::new(false),
		})
	}

	/// Number of keys eligible for a capitalized start.
	pub fn capitalized_starts(&self) -> usize {
		self.capitalized.len()
	}

	/// Chooses the first key of a walk.
	///
	/// # Behavior
	/// - `Capitalized`: uniform over capitalized keys. When there is none,
	///   falls back to any key and logs a warning (once per walker).
	/// - `Random`: uniform over all keys.
	/// - `Custom`: the given window, which must be a key of the chain.
	fn select_start<R: Rng + ?Sized>(&self, seed: &StartSeed, rng: &mut R) -> Result<&'a NGram, MarkovError> {
		let candidates = match seed {
			StartSeed::Capitalized if !self.capitalized.is_empty() => &self.capitalized,
			StartSeed::Capitalized => {
				if !self.warned_fallback.replace(true) {
					warn!(
						"no key starts with an uppercase letter, starting from an arbitrary key ({} keys)",
						self.keys.len()
					);
				}
				&self.keys
			}
			StartSeed::Random => &self.keys,
			StartSeed::Custom(tokens) => {
				let order = self.chain.order();
				if tokens.len() != order {
					return Err(MarkovError::InvalidSeedLength { expected: order, got: tokens.len() });
				}
				return self
					.chain
					.get(tokens)
					.map(State::key)
					.ok_or_else(|| MarkovError::UnknownSeed(tokens.join(" ")));
			}
		};

		// Walker::new guarantees at least one key
		candidates.choose(rng).copied().ok_or(MarkovError::EmptyModel)
	}

	/// Walks the chain and returns the generated tokens.
	///
	/// The output starts with the start key's tokens, then one sampled
	/// successor per step. The walk ends on the first cursor that has no
	/// recorded successor, or once `max_tokens` tokens were produced.
	///
	/// # Errors
	/// - `InvalidMaxTokens` if the bound is smaller than the model order
	/// - `InvalidSeedLength` / `UnknownSeed` for an unusable custom seed
	pub fn walk<R: Rng + ?Sized>(&self, input: &WalkInput, rng: &mut R) -> Result<Vec<String>, MarkovError> {
		let order = self.chain.order();
		if let Some(max) = input.max_tokens() {
			if max < order {
				return Err(MarkovError::InvalidMaxTokens { max, order });
			}
		}

		let mut cursor = self.select_start(&input.start_seed, rng)?.clone();
		let mut output: Vec<String> = cursor.tokens().to_vec();

		loop {
			let next = match self.chain.get(cursor.tokens()).and_then(|state| state.predict(rng)) {
				Some(next) => next,
				None => break,
			};

			if input.max_tokens().is_some_and(|max| output.len() >= max) {
				warn!("walk stopped at the {} token limit before reaching a final key", output.len());
				break;
			}

			output.push(next.to_owned());
			cursor = cursor.shift(next);
		}

		Ok(output)
	}

	/// Walks the chain and joins the tokens with single spaces.
	pub fn generate<R: Rng + ?Sized>(&self, input: &WalkInput, rng: &mut R) -> Result<String, MarkovError> {
		Ok(self.walk(input, rng)?.join(" "))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::model::chain::build_chains;
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	fn tokens(text: &str) -> Vec<String> {
		text.split_whitespace().map(str::to_owned).collect()
	}

	#[test]
	fn empty_chain_is_refused() {
		let chain = build_chains(&["a", "b"], 2).unwrap();
		assert!(matches!(Walker::new(&chain), Err(MarkovError::EmptyModel)));
		assert!(matches!(generate_text(&chain), Err(MarkovError::EmptyModel)));
	}

	#[test]
	fn single_path_is_deterministic() {
		let chain = build_chains(&["Hi", "there", "Mary"], 2).unwrap();
		for _ in 0..20 {
			assert_eq!(generate_text(&chain).unwrap(), "Hi there Mary");
		}
	}

	#[test]
	fn empty_successor_list_ends_the_walk() {
		let mut chain = build_chains(&["Hi", "there", "Mary"], 2).unwrap();
		chain.insert_state(State::new(NGram::new(["there", "Mary"])));

		let walker = Walker::new(&chain).unwrap();
		let input = WalkInput::new(StartSeed::Custom(tokens("Hi there")));
		let text = walker.generate(&input, &mut StdRng::seed_from_u64(3)).unwrap();
		assert_eq!(text, "Hi there Mary");
	}

	#[test]
	fn capitalized_start_is_preferred() {
		let chain = build_chains(&tokens("one two Three four five six seven"), 2).unwrap();
		let walker = Walker::new(&chain).unwrap();
		assert_eq!(walker.capitalized_starts(), 1);

		let mut rng = StdRng::seed_from_u64(11);
		for _ in 0..20 {
			let text = walker.generate(&WalkInput::default(), &mut rng).unwrap();
			assert_eq!(text, "Three four five six seven");
		}
	}

	#[test]
	fn falls_back_when_nothing_is_capitalized() {
		let chain = build_chains(&tokens("all lower case words here"), 2).unwrap();
		let walker = Walker::new(&chain).unwrap();
		assert_eq!(walker.capitalized_starts(), 0);

		let text = walker.generate(&WalkInput::default(), &mut StdRng::seed_from_u64(5)).unwrap();
		assert!(text.ends_with("words here"), "unexpected text: {text}");
	}

	#[test]
	fn custom_seed_must_match_order_and_exist() {
		let chain = build_chains(&tokens("A b c d"), 2).unwrap();
		let walker = Walker::new(&chain).unwrap();
		let mut rng = StdRng::seed_from_u64(0);

		let short = WalkInput::new(StartSeed::Custom(tokens("A")));
		assert!(matches!(
			walker.walk(&short, &mut rng),
			Err(MarkovError::InvalidSeedLength { expected: 2, got: 1 })
		));

		let unknown = WalkInput::new(StartSeed::Custom(tokens("x y")));
		assert!(matches!(walker.walk(&unknown, &mut rng), Err(MarkovError::UnknownSeed(_))));

		let good = WalkInput::new(StartSeed::Custom(tokens("b c")));
		assert_eq!(walker.generate(&good, &mut rng).unwrap(), "b c d");
	}

	#[test]
	fn cycle_without_final_key_stops_at_bound() {
		// the final window "a b" also occurs earlier, so every cursor has successors
		let chain = build_chains(&tokens("a b a b"), 2).unwrap();
		let walker = Walker::new(&chain).unwrap();

		let mut input = WalkInput::new(StartSeed::Random);
		input.set_max_tokens(Some(7)).unwrap();
		let output = walker.walk(&input, &mut StdRng::seed_from_u64(9)).unwrap();
		assert_eq!(output.len(), 7);
	}

	#[test]
	fn bound_below_order_is_rejected() {
		let chain = build_chains(&tokens("A b c d"), 3).unwrap();
		let walker = Walker::new(&chain).unwrap();

		let mut input = WalkInput::default();
		input.set_max_tokens(Some(2)).unwrap();
		assert!(matches!(
			walker.walk(&input, &mut StdRng::seed_from_u64(0)),
			Err(MarkovError::InvalidMaxTokens { max: 2, order: 3 })
		));
	}

	#[test]
	fn bound_equal_to_order_returns_start_key() {
		let chain = build_chains(&tokens("A b c d"), 2).unwrap();
		let walker = Walker::new(&chain).unwrap();

		let mut input = WalkInput::default();
		input.set_max_tokens(Some(2)).unwrap();
		assert_eq!(walker.walk(&input, &mut StdRng::seed_from_u64(0)).unwrap(), tokens("A b"));
	}

	#[test]
	fn same_seed_same_text() {
		let text = "The cat sat. The dog sat. The cat ran. A dog ran far.";
		let chain = build_chains(&tokens(text), 1).unwrap();
		let walker = Walker::new(&chain).unwrap();

		let a = walker.generate(&WalkInput::default(), &mut StdRng::seed_from_u64(77)).unwrap();
		let b = walker.generate(&WalkInput::default(), &mut StdRng::seed_from_u64(77)).unwrap();
		assert_eq!(a, b);
	}
}
