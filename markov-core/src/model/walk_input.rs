use crate::error::MarkovError;

/// Default upper bound on the number of tokens in a generated text.
pub const DEFAULT_MAX_TOKENS: usize = 10_000;

/// Strategy used to select the starting key of a walk.
///
/// # Variants
/// - `Capitalized`: a random key whose first token starts with an uppercase
///   character, so the text opens on a plausible sentence start. Falls back
///   to `Random` when the model has no such key.
/// - `Random`: any key, uniformly.
/// - `Custom(tokens)`: start from exactly this window.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum StartSeed {
	#[default]
	Capitalized,
	Random,
	Custom(Vec<String>),
}

impl StartSeed {
	/// Parses `"capitalized"`, `"random"` or `"custom:<tokens>"`.
	///
	/// Custom tokens are split on whitespace.
	pub fn parse(s: &str) -> Result<Self, MarkovError> {
		const CUSTOM: &str = "custom:";

		if s.eq_ignore_ascii_case("capitalized") {
			return Ok(StartSeed::Capitalized);
		}
		if s.eq_ignore_ascii_case("random") {
			return Ok(StartSeed::Random);
		}
		if s.get(..CUSTOM.len()).is_some_and(|prefix| prefix.eq_ignore_ascii_case(CUSTOM)) {
			let tokens: Vec<String> = s[CUSTOM.len()..].split_whitespace().map(str::to_owned).collect();
			if !tokens.is_empty() {
				return Ok(StartSeed::Custom(tokens));
			}
		}
		Err(MarkovError::InvalidSeed(s.to_owned()))
	}
}

/// Input parameters for a walk.
///
/// # Invariants
/// - `max_tokens`, when set, is at least 1; the walker additionally
///   requires it to be >= the model order
#[derive(Clone, Debug, PartialEq)]
pub struct WalkInput {
	/// How the first key is chosen.
	pub start_seed: StartSeed,

	/// Maximum number of tokens in the output, start key included.
	/// `None` walks until a key without successors is reached.
	max_tokens: Option<usize>,
}

impl Default for WalkInput {
	fn default() -> Self {
		Self {
			start_seed: StartSeed::default(),
			max_tokens: Some(DEFAULT_MAX_TOKENS),
		}
	}
}

impl WalkInput {
	pub fn new(start_seed: StartSeed) -> Self {
		Self { start_seed, ..Self::default() }
	}

	/// Returns the current output bound.
	pub fn max_tokens(&self) -> Option<usize> {
		self.max_tokens
	}

	/// Sets the output bound.
	///
	/// The bound is checked against the model order when a walk starts.
	///
	/// # Errors
	/// Returns `ZeroMaxTokens` for `Some(0)`.
	pub fn set_max_tokens(&mut self, max_tokens: Option<usize>) -> Result<(), MarkovError> {
		if max_tokens == Some(0) {
			return Err(MarkovError::ZeroMaxTokens);
		}
		self.max_tokens = max_tokens;
		Ok(())
	}
}
