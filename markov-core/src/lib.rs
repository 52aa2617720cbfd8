//! Word-level Markov chain text generation library.
//!
//! This crate provides:
//! - A fixed-order transition table built from a token stream (`Chain`)
//! - A randomized walk over that table producing new text (`Walker`)
//! - Walk configuration (start policy, output bound)
//! - I/O helpers used by callers to gather input text
//!
//! The two entry points are [`build_chains`] and [`generate_text`].

/// Transition table, n-gram keys and text generation.
pub mod model;

/// Error type shared by the whole crate.
pub mod error;

/// I/O utilities (file and stdin loading).
pub mod io;

pub use error::MarkovError;
pub use model::chain::{build_chains, Chain};
pub use model::walker::{generate_text, Walker};
