//! Frequency counting over token sequences.
//!
//! A counter is a multiset of sequences, fed through aggressive updates:
//! adding a sequence also adds every one of its prefixes, so the count of
//! any context length can be read back without walking the others.

use crate::model::estimate::Token;

/// Hash-based counter keyed by context sequence.
pub mod map_counter;

/// Successor table of a single context.
pub mod state;

pub use map_counter::MapCounter;

/// Frequency store consumed by the n-gram models.
///
/// # Invariants
/// - Counts never go negative: removing a sequence that is not currently
///   counted changes nothing, not even its prefixes
/// - `add_aggressive` followed by `remove_aggressive` of the same sequence
///   restores every count, including `count()` and `successor_count()`
pub trait Counter {
	/// Adds `sequence` and all of its non-empty prefixes.
	fn add_aggressive(&mut self, sequence: &[Token]);

	/// Removes `sequence` and all of its non-empty prefixes, or nothing if
	/// `sequence` is not counted.
	fn remove_aggressive(&mut self, sequence: &[Token]);

	/// Total number of tokens counted (occurrences of the empty context).
	fn count(&self) -> u64;

	/// Number of distinct tokens counted (successors of the empty context).
	fn successor_count(&self) -> usize;

	/// Number of distinct tokens observed right after `context`.
	fn successor_count_of(&self, context: &[Token]) -> usize;

	/// Occurrences of `sequence`. The empty sequence counts every token.
	fn sequence_count(&self, sequence: &[Token]) -> u64;

	/// Occurrences of `context` followed by any token.
	fn context_count(&self, context: &[Token]) -> u64;

	/// The `limit` most frequent successors of `context`, most frequent first.
	fn top_successors(&self, context: &[Token], limit: usize) -> Vec<Token>;
}
