//! Top-level module for the Markov chain model.
//!
//! - Fixed-length word windows (`NGram`)
//! - Successor lists per window (`State`)
//! - The transition table and its builder (`Chain`)
//! - Walk configuration (`WalkInput`)
//! - The randomized walk producing text (`Walker`)

/// Immutable fixed-length token window used as a table key.
pub mod ngram;

/// Successor list attached to a single key.
///
/// Supports uniform sampling over the list and merging.
pub mod state;

/// Transition table (`n`-gram → successors).
///
/// Handles construction from tokens or raw text, parallel construction
/// from independent texts, and merging.
pub mod chain;

/// Walk configuration: start policy and output bound.
pub mod walk_input;

/// Randomized walk over a `Chain`.
pub mod walker;
