use std::collections::HashMap;

use crate::model::estimate::Token;

/// Successor table of a single context.
///
/// A `State` corresponds to one context sequence and stores every token
/// observed right after it, with its number of observations.
///
/// Conceptually, this is a node in a Markov chain where outgoing edges
/// are weighted by their number of observations.
///
/// ## Responsibilities:
/// - Accumulate successor occurrences during learning
/// - Release successor occurrences during forgetting
/// - Rank successors by frequency
///
/// ## Invariants
/// - Each successor occurrence count is strictly positive
/// - `total` is the sum of all successor occurrence counts
#[derive(Clone, Debug, Default)]
pub struct State {
	/// Outgoing transitions indexed by the next token.
	/// Example: { 12 => 42, 7 => 3 }
	successors: HashMap<Token, u64>,
	/// Sum of all successor occurrences.
	total: u64,
}

impl State {
	/// Creates a new empty state.
	pub fn new() -> Self {
		Self::default()
	}

	/// Records an occurrence of `next`.
	pub fn add(&mut self, next: Token) {
		*self.successors.entry(next).or_insert(0) += 1;
		self.total += 1;
	}

	/// Releases an occurrence of `next`.
	///
	/// Saturates at zero: removing a successor that was never added is a
	/// no-op. A successor reaching zero is dropped from the table.
	///
	/// Returns `true` if an occurrence was actually released.
	pub fn remove(&mut self, next: Token) -> bool {
		let Some(occurrence) = self.successors.get_mut(&next) else {
			return false;
		};
		*occurrence -= 1;
		if *occurrence == 0 {
			self.successors.remove(&next);
		}
		self.total -= 1;
		true
	}

	/// Occurrences of `next` after this context.
	pub fn count(&self, next: Token) -> u64 {
		self.successors.get(&next).copied().unwrap_or(0)
	}

	/// Sum of all successor occurrences.
	pub fn total(&self) -> u64 {
		self.total
	}

	/// Number of distinct successors.
	pub fn distinct(&self) -> usize {
		self.successors.len()
	}

	/// Whether no successor is left.
	pub fn is_empty(&self) -> bool {
		self.successors.is_empty()
	}

	/// Returns the `limit` most frequent successors.
	///
	/// Ordered by descending occurrence count; ties are broken by ascending
	/// token id so the result is deterministic.
	pub fn top(&self, limit: usize) -> Vec<Token> {
		let mut ranked: Vec<(Token, u64)> = self.successors.iter().map(|(token, count)| (*token, *count)).collect();
		ranked.sort_unstable_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
		ranked.into_iter().take(limit).map(|(token, _)| token).collect()
	}
}
