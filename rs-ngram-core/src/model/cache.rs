use std::collections::HashMap;

use log::debug;

use crate::counting::Counter;
use crate::model::estimate::Token;

/// Contexts with at most this many distinct successors are recomputed on
/// every lookup instead of being cached.
pub const CACHE_THRESHOLD: usize = 1000;

/// Snapshot of a counter's aggregate counts.
///
/// Any change made through aggressive updates moves the total count, so
/// comparing fingerprints tells whether cached successors may be stale.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Fingerprint {
	count: u64,
	successor_count: usize,
}

impl Fingerprint {
	/// Takes the fingerprint of `counter` as it is now.
	pub fn of<C: Counter + ?Sized>(counter: &C) -> Self {
		Self { count: counter.count(), successor_count: counter.successor_count() }
	}
}

/// Cached top successors of one context.
#[derive(Clone, Debug)]
pub struct CacheEntry {
	/// Fingerprint of the counter when `successors` was computed.
	pub fingerprint: Fingerprint,
	/// Most frequent successors, most frequent first.
	pub successors: Vec<Token>,
}

/// Memoized top-successor lookups for expensive contexts.
///
/// # Invariants
/// - An entry is only served while its fingerprint matches the counter's
/// - Finding one stale entry clears the whole cache: the fingerprint is a
///   global signal, so every other entry is stale too
#[derive(Clone, Debug, Default)]
pub struct SuccessorCache {
	entries: HashMap<Vec<Token>, CacheEntry>,
}

impl SuccessorCache {
	/// Creates an empty cache.
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns the `limit` most frequent successors of `context`.
	///
	/// Serves the cached list when it is still fresh. Otherwise recomputes it
	/// from `counter`, and stores it if `context` has more than
	/// `CACHE_THRESHOLD` distinct successors.
	pub fn top_successors<C: Counter + ?Sized>(&mut self, counter: &C, context: &[Token], limit: usize) -> Vec<Token> {
		let fingerprint = Fingerprint::of(counter);
		if let Some(entry) = self.entries.get(context) {
			if entry.fingerprint == fingerprint {
				return entry.successors.clone();
			}
			debug!("counter changed, dropping {} cached contexts", self.entries.len());
			self.clear();
		}

		let successors = counter.top_successors(context, limit);
		if counter.successor_count_of(context) > CACHE_THRESHOLD {
			self.entries.insert(context.to_vec(), CacheEntry { fingerprint, successors: successors.clone() });
		}
		successors
	}

	/// Cached entry of `context`, fresh or not.
	pub fn get(&self, context: &[Token]) -> Option<&CacheEntry> {
		self.entries.get(context)
	}

	/// Number of cached contexts.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Drops every cached context.
	pub fn clear(&mut self) {
		self.entries.clear();
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::counting::MapCounter;

	/// Context `[0]` followed by `CACHE_THRESHOLD + 1` distinct tokens.
	fn wide_counter() -> MapCounter {
		let mut counter = MapCounter::new();
		for next in 1..=(CACHE_THRESHOLD as Token + 1) {
			counter.add_aggressive(&[0, next]);
		}
		counter.add_aggressive(&[0, 7]);
		counter
	}

	#[test]
	fn narrow_contexts_are_not_cached() {
		let mut counter = MapCounter::new();
		counter.add_aggressive(&[1, 2]);
		let mut cache = SuccessorCache::new();
		assert_eq!(cache.top_successors(&counter, &[1], 5), vec![2]);
		assert!(cache.is_empty());
	}

	#[test]
	fn wide_contexts_are_cached() {
		let counter = wide_counter();
		let mut cache = SuccessorCache::new();
		let uncached = counter.top_successors(&[0], 3);
		let first = cache.top_successors(&counter, &[0], 3);
		assert_eq!(cache.len(), 1);
		let second = cache.top_successors(&counter, &[0], 3);
		assert_eq!(first, uncached);
		assert_eq!(second, uncached);
		assert_eq!(first, vec![7, 1, 2]);
	}

	#[test]
	fn stale_entry_clears_everything() {
		let mut counter = wide_counter();
		for next in 1..=(CACHE_THRESHOLD as Token + 1) {
			counter.add_aggressive(&[5, next]);
		}
		let mut cache = SuccessorCache::new();
		cache.top_successors(&counter, &[0], 3);
		cache.top_successors(&counter, &[5], 3);
		assert_eq!(cache.len(), 2);

		counter.add_aggressive(&[0, 2]);
		counter.add_aggressive(&[0, 2]);
		let fresh = cache.top_successors(&counter, &[0], 3);
		assert_eq!(fresh, vec![2, 7, 1]);
		assert_eq!(cache.len(), 1);
		assert!(cache.get(&[5]).is_none());
		assert_eq!(cache.get(&[0]).map(|entry| entry.fingerprint), Some(Fingerprint::of(&counter)));
	}
}
