//! Scoring a model against held-out token streams.

use std::collections::HashMap;

use log::debug;

use crate::counting::Counter;
use crate::error::Result;
use crate::model::estimate::{Estimate, Token};
use crate::model::ngram_model::NGramModel;

/// Probability used in place of 0 when computing entropy.
pub const MIN_PROBABILITY: f64 = 1e-6;

/// Aggregate scores over a set of streams.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Evaluation {
	/// Number of positions scored.
	pub tokens: usize,
	/// Mean cross-entropy, in bits per token.
	pub entropy: f64,
	/// Mean reciprocal rank of each token among the candidates proposed
	/// at the position before it.
	pub mrr: f64,
}

/// Orders predictions by descending probability, ties by ascending token.
pub fn rank_predictions(predictions: &HashMap<Token, Estimate>) -> Vec<(Token, Estimate)> {
	let mut ranked: Vec<(Token, Estimate)> = predictions.iter().map(|(token, estimate)| (*token, *estimate)).collect();
	ranked.sort_by(|a, b| b.1.probability.total_cmp(&a.1.probability).then(a.0.cmp(&b.0)));
	ranked
}

/// Mean of `-log2(p)` over `estimates`, in bits.
///
/// Probabilities below `MIN_PROBABILITY` are raised to it. An empty slice
/// has an entropy of 0.
pub fn entropy(estimates: &[Estimate]) -> f64 {
	if estimates.is_empty() {
		return 0.0;
	}
	let total: f64 = estimates.iter().map(|estimate| -estimate.probability.max(MIN_PROBABILITY).log2()).sum();
	total / estimates.len() as f64
}

/// `1 / rank` of `actual` among the ranked predictions, 0 if absent.
pub fn reciprocal_rank(predictions: &HashMap<Token, Estimate>, actual: Token) -> f64 {
	rank_predictions(predictions)
		.iter()
		.position(|(token, _)| *token == actual)
		.map_or(0.0, |rank| 1.0 / (rank + 1) as f64)
}

/// Mean of the given reciprocal ranks, 0 when there are none.
pub fn mrr(reciprocal_ranks: &[f64]) -> f64 {
	if reciprocal_ranks.is_empty() {
		return 0.0;
	}
	reciprocal_ranks.iter().sum::<f64>() / reciprocal_ranks.len() as f64
}

/// Scores every position of every stream, without training on them.
///
/// Entropy covers every token. The candidates proposed at a position are
/// the successors of the window ending there, so they are ranked against
/// the token that follows; the first token of a stream has no rank.
pub fn evaluate<C: Counter>(model: &mut NGramModel<C>, streams: &[Vec<Token>]) -> Result<Evaluation> {
	let mut estimates = Vec::new();
	let mut ranks = Vec::new();
	for stream in streams {
		estimates.extend(model.model(stream)?);
		for (index, predictions) in model.predict(stream)?.iter().enumerate() {
			if let Some(next) = stream.get(index + 1) {
				ranks.push(reciprocal_rank(predictions, *next));
			}
		}
	}

	let evaluation = Evaluation { tokens: estimates.len(), entropy: entropy(&estimates), mrr: mrr(&ranks) };
	debug!("evaluated {} tokens: {:?}", evaluation.tokens, evaluation);
	Ok(evaluation)
}
