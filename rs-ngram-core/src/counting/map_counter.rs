use std::collections::HashMap;

use log::trace;

use super::Counter;
use super::state::State;
use crate::model::estimate::Token;

/// Counter storing one successor table per observed context.
///
/// The empty context holds the unigram table, so its total is the number
/// of tokens counted and its size is the vocabulary size.
///
/// # Invariants
/// - Every stored `State` is non-empty
/// - As long as removals mirror earlier additions, `context + [t]` has a
///   table only if `context` has `t` as a successor
#[derive(Clone, Debug, Default)]
pub struct MapCounter {
	/// Mapping from a context to the tokens observed after it
	states: HashMap<Vec<Token>, State>,
}

impl MapCounter {
	/// Creates an empty counter.
	pub fn new() -> Self {
		Self::default()
	}

	/// Number of distinct contexts with at least one successor.
	pub fn contexts(&self) -> usize {
		self.states.len()
	}

	/// Whether nothing has been counted.
	pub fn is_empty(&self) -> bool {
		self.states.is_empty()
	}
}

impl Counter for MapCounter {
	fn add_aggressive(&mut self, sequence: &[Token]) {
		trace!("add {:?}", sequence);
		for (length, next) in sequence.iter().enumerate() {
			self.states.entry(sequence[..length].to_vec()).or_default().add(*next);
		}
	}

	fn remove_aggressive(&mut self, sequence: &[Token]) {
		if self.sequence_count(sequence) == 0 {
			trace!("ignore removal of uncounted {:?}", sequence);
			return;
		}
		trace!("remove {:?}", sequence);
		// Every prefix was counted at least as often as the whole sequence
		for (length, next) in sequence.iter().enumerate() {
			let context = &sequence[..length];
			if let Some(state) = self.states.get_mut(context) {
				state.remove(*next);
				if state.is_empty() {
					self.states.remove(context);
				}
			}
		}
	}

	fn count(&self) -> u64 {
		self.context_count(&[])
	}

	fn successor_count(&self) -> usize {
		self.successor_count_of(&[])
	}

	fn successor_count_of(&self, context: &[Token]) -> usize {
		self.states.get(context).map_or(0, State::distinct)
	}

	fn sequence_count(&self, sequence: &[Token]) -> u64 {
		match sequence.split_last() {
			None => self.count(),
			Some((next, context)) => self.states.get(context).map_or(0, |state| state.count(*next)),
		}
	}

	fn context_count(&self, context: &[Token]) -> u64 {
		self.states.get(context).map_or(0, State::total)
	}

	fn top_successors(&self, context: &[Token], limit: usize) -> Vec<Token> {
		self.states.get(context).map(|state| state.top(limit)).unwrap_or_default()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn aggressive_add_counts_prefixes() {
		let mut counter = MapCounter::new();
		counter.add_aggressive(&[1, 2, 3]);
		counter.add_aggressive(&[1, 2, 4]);

		assert_eq!(counter.count(), 2);
		assert_eq!(counter.successor_count(), 1);
		assert_eq!(counter.sequence_count(&[1]), 2);
		assert_eq!(counter.sequence_count(&[1, 2]), 2);
		assert_eq!(counter.sequence_count(&[1, 2, 3]), 1);
		assert_eq!(counter.context_count(&[1, 2]), 2);
		assert_eq!(counter.successor_count_of(&[1, 2]), 2);
		assert_eq!(counter.top_successors(&[1, 2], 10), vec![3, 4]);
	}

	#[test]
	fn remove_restores_empty_state() {
		let mut counter = MapCounter::new();
		counter.add_aggressive(&[5, 6]);
		counter.remove_aggressive(&[5, 6]);
		assert!(counter.is_empty());
		assert_eq!(counter.count(), 0);
		assert_eq!(counter.successor_count(), 0);
	}

	#[test]
	fn uncounted_removal_is_ignored() {
		let mut counter = MapCounter::new();
		counter.add_aggressive(&[1, 2]);
		counter.remove_aggressive(&[1, 3]);
		assert_eq!(counter.count(), 1);
		assert_eq!(counter.sequence_count(&[1]), 1);
		assert_eq!(counter.sequence_count(&[1, 2]), 1);
		assert_eq!(counter.context_count(&[1]), 1);

		counter.remove_aggressive(&[7, 8]);
		assert_eq!(counter.count(), 1);
		assert_eq!(counter.contexts(), 2);

		counter.remove_aggressive(&[1, 2]);
		counter.remove_aggressive(&[1, 2]);
		assert!(counter.is_empty());
		assert_eq!(counter.count(), 0);
	}

	#[test]
	fn unknown_context() {
		let counter = MapCounter::new();
		assert_eq!(counter.context_count(&[42]), 0);
		assert_eq!(counter.successor_count_of(&[42]), 0);
		assert!(counter.top_successors(&[42], 5).is_empty());
	}
}
