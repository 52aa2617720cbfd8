use thiserror::Error;

/// Errors reported by chain construction and text generation.
///
/// A lookup miss during the walk is not an error: it is how a walk ends.
#[derive(Debug, Error)]
pub enum MarkovError {
	/// The n-gram order must be at least 1.
	#[error("n-gram order must be >= 1")]
	InvalidOrder,

	/// The walker was handed a table without any key.
	#[error("cannot generate text from an empty model (input needs more than n tokens)")]
	EmptyModel,

	#[error("n-gram order mismatch: expected {expected}, got {got}")]
	OrderMismatch { expected: usize, got: usize },

	#[error("cannot merge successor lists of different keys")]
	KeyMismatch,

	#[error("start seed has {got} tokens, model order is {expected}")]
	InvalidSeedLength { expected: usize, got: usize },

	#[error("start seed '{0}' is not a key of the model")]
	UnknownSeed(String),

	#[error("max tokens must be at least 1")]
	ZeroMaxTokens,

	#[error("max tokens ({max}) must be >= model order ({order})")]
	InvalidMaxTokens { max: usize, order: usize },

	/// Unparseable start seed description.
	#[error("invalid start seed '{0}': expected 'capitalized', 'random' or 'custom:<tokens>'")]
	InvalidSeed(String),

	#[error(transparent)]
	Io(#[from] std::io::Error),
}
