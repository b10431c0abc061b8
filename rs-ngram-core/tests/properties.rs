//! Property-based tests of the backoff model.
//!
//! Properties covered:
//! 1. Learning then forgetting a stream restores the counter
//! 2. Estimates stay within [0, 1], zero confidence means zero probability
//! 3. Predictions only carry tokens with some confidence
//! 4. Token-wise learning and forgetting cancel out
//! 5. Caching never changes what a successor lookup returns

use std::collections::HashSet;

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rs_ngram_core::counting::Counter;
use rs_ngram_core::model::smoothing::SmootherKind;
use rs_ngram_core::{NGramModel, RunConfig, Token};

fn stream_strategy() -> impl Strategy<Value = Vec<Token>> {
	prop::collection::vec(0u32..12, 0..40)
}

fn kind_strategy() -> impl Strategy<Value = SmootherKind> {
	prop::sample::select(SmootherKind::ALL.to_vec())
}

/// Skewed stream over tokens 0..6, reproducible from `seed`.
fn random_stream(seed: u64, len: usize) -> Vec<Token> {
	let mut rng = StdRng::seed_from_u64(seed);
	(0..len).map(|_| rng.random_range(1.0f64..64.0).log2() as Token).collect()
}

proptest! {
	#![proptest_config(ProptestConfig::with_cases(64))]

	#[test]
	fn prop_learn_forget_is_inverse(
		base in stream_strategy(),
		stream in stream_strategy(),
		order in 1usize..6,
	) {
		let mut model = NGramModel::new(RunConfig::new(order, 10).unwrap());
		model.learn(&base);
		let count = model.counter().count();
		let successors = model.counter().successor_count();

		model.learn(&stream);
		model.forget(&stream);
		prop_assert_eq!(model.counter().count(), count);
		prop_assert_eq!(model.counter().successor_count(), successors);
	}

	#[test]
	fn prop_estimates_in_range(
		training in stream_strategy(),
		query in prop::collection::vec(0u32..16, 1..20),
		order in 1usize..6,
		kind in kind_strategy(),
	) {
		let mut model = NGramModel::with_smoother(RunConfig::new(order, 10).unwrap(), kind.build());
		model.learn(&training);
		for estimate in model.model(&query).unwrap() {
			prop_assert!((0.0..=1.0).contains(&estimate.probability));
			prop_assert!((0.0..=1.0).contains(&estimate.confidence));
			if estimate.confidence == 0.0 {
				prop_assert_eq!(estimate.probability, 0.0);
			}
		}
	}

	// Candidates are successors of observed windows, hence observed tokens,
	// so scoring one in place always finds at least its unigram.
	#[test]
	fn prop_predictions_have_confidence(
		training in stream_strategy(),
		query in prop::collection::vec(0u32..12, 1..10),
		kind in kind_strategy(),
	) {
		let mut model = NGramModel::with_smoother(RunConfig::new(3, 5).unwrap(), kind.build());
		model.learn(&training);
		let last = query.len() - 1;
		for estimate in model.predict_token(&query, last).unwrap().values() {
			prop_assert!(estimate.confidence > 0.0);
		}
	}

	#[test]
	fn prop_token_learn_forget_is_inverse(stream in prop::collection::vec(0u32..8, 1..30)) {
		let config = RunConfig::new(3, 10).unwrap();
		let mut model = NGramModel::new(config);
		for index in 0..stream.len() {
			model.learn_token(&stream, index).unwrap();
		}
		for index in (0..stream.len()).rev() {
			model.forget_token(&stream, index).unwrap();
		}
		prop_assert_eq!(model.counter().count(), 0);
	}
}

#[test]
fn cached_and_uncached_lookups_agree() {
	let mut model = NGramModel::new(RunConfig::new(2, 10).unwrap());
	// Context [0] gets more than a thousand distinct successors
	let wide: Vec<Token> = (1..=1500).flat_map(|next| [0, next]).collect();
	model.learn(&wide);
	model.learn(&random_stream(7, 2000));

	let uncached = model.counter().top_successors(&[0], 10);
	let first = model.lookup_top_successors(&[0], 10);
	let second = model.lookup_top_successors(&[0], 10);
	assert_eq!(model.cache_len(), 1);
	assert_eq!(first, uncached);
	assert_eq!(second, uncached);

	model.forget(&random_stream(7, 2000));
	assert_eq!(model.lookup_top_successors(&[0], 10), model.counter().top_successors(&[0], 10));
}

#[test]
fn larger_corpus_round_trip() {
	let mut model = NGramModel::new(RunConfig::default());
	let streams: Vec<Vec<Token>> = (0..20).map(|seed| random_stream(seed, 500)).collect();
	for stream in &streams {
		model.learn(stream);
	}
	assert_eq!(model.counter().count(), 20 * 500);

	let predictions = model.predict_token(&streams[0], 250).unwrap();
	assert!(!predictions.is_empty());
	assert!(predictions.len() <= RunConfig::default().order() * RunConfig::default().prediction_cutoff());

	for stream in &streams {
		model.forget(stream);
	}
	assert_eq!(model.counter().count(), 0);
	assert_eq!(model.counter().successor_count(), 0);
}

#[test]
fn scenario_from_small_stream() {
	let stream = [1, 2, 3, 1, 2, 4];
	let mut model = NGramModel::new(RunConfig::new(2, 10).unwrap());
	model.learn(&stream);

	let three = model.model_token(&[1, 2, 3], 2).unwrap();
	let four = model.model_token(&[1, 2, 4], 2).unwrap();
	let unseen = model.model_token(&[1, 2, 5], 2).unwrap();
	assert!(three.probability > unseen.probability);
	assert!(four.probability > unseen.probability);
	assert!(three.confidence > 0.0);

	// The window ending at [1, 2] proposes what followed it: 3 and 4
	let predictions = model.predict_token(&[1, 2], 1).unwrap();
	let mut candidates: Vec<Token> = predictions.keys().copied().collect();
	candidates.sort_unstable();
	assert_eq!(candidates, vec![3, 4]);

	let mut trigram = NGramModel::new(RunConfig::new(3, 10).unwrap());
	trigram.learn(&stream);
	assert_eq!(trigram.counter().successor_count_of(&[1, 2]), 2);
	trigram.forget(&stream);
	assert_eq!(trigram.counter().successor_count_of(&[1, 2]), 0);
}

#[test]
fn candidates_are_successors_of_the_window_suffixes() {
	let mut model = NGramModel::new(RunConfig::new(3, 4).unwrap());
	let corpus: Vec<Token> = random_stream(3, 400);
	model.learn(&corpus);

	for index in [0usize, 1, 2, 57, 199, 399] {
		let window = &corpus[(index + 1).saturating_sub(3)..=index];
		let expected: HashSet<Token> = (0..window.len())
			.flat_map(|start| model.counter().top_successors(&window[start..], 4))
			.collect();
		let predictions = model.predict_token(&corpus, index).unwrap();
		let keys: HashSet<Token> = predictions.keys().copied().collect();
		assert_eq!(keys, expected, "index {}", index);
	}
}
