//! Property tests over arbitrary token sequences.

use markov_core::model::walk_input::{StartSeed, WalkInput};
use markov_core::{build_chains, Walker};
use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Small vocabulary so that windows repeat and lists get duplicates.
fn token() -> impl Strategy<Value = String> {
	prop::sample::select(vec!["the", "The", "cat", "sat", "on", "mat.", "A", "dog"]).prop_map(str::to_owned)
}

fn tokens() -> impl Strategy<Value = Vec<String>> {
	prop::collection::vec(token(), 0..40)
}

proptest! {
	/// Every key has exactly n tokens.
	#[test]
	fn prop_keys_have_order_length(words in tokens(), n in 1usize..5) {
		let chain = build_chains(&words, n).unwrap();
		for key in chain.keys() {
			prop_assert_eq!(key.len(), n);
		}
	}

	/// Every window with a follower records that follower.
	#[test]
	fn prop_every_window_records_its_follower(words in tokens(), n in 1usize..5) {
		let chain = build_chains(&words, n).unwrap();
		for i in 0..words.len().saturating_sub(n) {
			let state = chain.get(&words[i..i + n]);
			prop_assert!(state.is_some(), "missing key at {}", i);
			prop_assert!(state.unwrap().successors().contains(&words[i + n]));
		}
	}

	/// The table is empty iff there are at most n tokens.
	#[test]
	fn prop_empty_iff_insufficient_input(words in tokens(), n in 1usize..5) {
		let chain = build_chains(&words, n).unwrap();
		prop_assert_eq!(chain.is_empty(), words.len() <= n);
	}

	/// Total transitions equal the number of windows with a follower.
	#[test]
	fn prop_successor_count_matches_windows(words in tokens(), n in 1usize..5) {
		let chain = build_chains(&words, n).unwrap();
		prop_assert_eq!(chain.successor_count(), words.len().saturating_sub(n));
	}

	/// Generated output is a valid walk and never shorter than n.
	#[test]
	fn prop_generation_is_a_valid_walk(words in tokens(), n in 1usize..4, seed in any::<u64>()) {
		let chain = build_chains(&words, n).unwrap();
		prop_assume!(!chain.is_empty());

		let walker = Walker::new(&chain).unwrap();
		let mut input = WalkInput::new(StartSeed::Capitalized);
		input.set_max_tokens(Some(200)).unwrap();
		let output = walker.walk(&input, &mut StdRng::seed_from_u64(seed)).unwrap();

		prop_assert!(output.len() >= n);
		prop_assert!(output.len() <= 200);
		prop_assert!(chain.contains(&output[..n]), "start is not a key");
		for i in n..output.len() {
			let state = chain.get(&output[i - n..i]);
			prop_assert!(state.is_some(), "cursor at {} is not a key", i);
			prop_assert!(state.unwrap().successors().contains(&output[i]));
		}
		// a walk that stopped early stopped on a key without successors
		if output.len() < 200 {
			prop_assert!(chain.get(&output[output.len() - n..]).is_none());
		}
	}
}
