use std::collections::{HashMap, HashSet};

use log::{trace, warn};

use super::cache::SuccessorCache;
use super::estimate::{Estimate, Token};
use super::smoothing::{JelinekMercer, Smoother, SmootherKind, build_smoother};
use crate::config::RunConfig;
use crate::counting::{Counter, MapCounter};
use crate::error::Result;
use crate::sequencing::{sequence_at, sequence_forward};

/// Backoff n-gram model over integer token streams.
///
/// The `NGramModel` counts every window of up to `order` tokens seen during
/// training and estimates a token by blending the answers of a `Smoother`
/// over every context length, longest first.
///
/// # Responsibilities
/// - Learn and forget whole streams or single positions
/// - Estimate the probability (and confidence) of the token at a position
/// - Propose and score candidate tokens for a position
/// - Memoize top-successor lookups of expensive contexts
///
/// # Concurrency
/// Prediction refreshes the successor cache, so it takes `&mut self` like
/// learning does. To share one model between threads, wrap it in a `Mutex`:
/// the lock then covers the cache check-clear-recompute-store sequence and
/// every counter update as a whole.
///
/// # Invariants
/// - Every window fed to the counter is at most `config.order()` long
/// - Learning then forgetting the same stream restores the counter
/// - Returned estimates have probability and confidence within `[0, 1]`
#[derive(Debug)]
pub struct NGramModel<C: Counter = MapCounter> {
	/// Order and prediction cutoff, fixed at construction
	config: RunConfig,

	/// Windows (and all their prefixes) observed so far
	counter: C,

	/// Per-context-length estimation strategy
	smoother: Box<dyn Smoother>,

	/// Top successors of contexts too wide to recompute cheaply
	cache: SuccessorCache,
}

impl NGramModel<MapCounter> {
	/// Creates an empty model smoothed with Jelinek–Mercer.
	pub fn new(config: RunConfig) -> Self {
		Self::with_smoother(config, Box::new(JelinekMercer::default()))
	}

	/// Creates an empty model with the given smoothing strategy.
	pub fn with_smoother(config: RunConfig, smoother: Box<dyn Smoother>) -> Self {
		Self::with_counter(config, MapCounter::new(), smoother)
	}

	/// Creates an empty model with the strategy registered under `name`.
	///
	/// # Errors
	/// Returns `UnknownSmoother` if no strategy is registered under `name`.
	pub fn from_name(config: RunConfig, name: &str) -> Result<Self> {
		Ok(Self::with_smoother(config, build_smoother(name)?))
	}

	/// Creates an empty model with the strategy registered under `name`,
	/// falling back to Jelinek–Mercer (with a warning) if the name is unknown.
	pub fn standard(config: RunConfig, name: &str) -> Self {
		match Self::from_name(config, name) {
			Ok(model) => model,
			Err(error) => {
				warn!("{}, falling back to {}", error, SmootherKind::default());
				Self::new(config)
			}
		}
	}
}

impl<C: Counter> NGramModel<C> {
	/// Wraps an existing, possibly pre-populated, counter.
	pub fn with_counter(config: RunConfig, counter: C, smoother: Box<dyn Smoother>) -> Self {
		Self { config, counter, smoother, cache: SuccessorCache::new() }
	}

	/// Counts every window of `stream` along with all of its prefixes.
	pub fn learn(&mut self, stream: &[Token]) {
		trace!("learn {} tokens", stream.len());
		for window in sequence_forward(stream, self.config.order()) {
			self.counter.add_aggressive(window);
		}
	}

	/// Counts the window ending at `index`.
	///
	/// The window is only committed once it is complete: when it reached
	/// `order` tokens, or when `index` is the last position of `stream`.
	///
	/// # Errors
	/// Returns `IndexOutOfBounds` if `index >= stream.len()`.
	pub fn learn_token(&mut self, stream: &[Token], index: usize) -> Result<()> {
		if let Some(window) = self.committed_window(stream, index)? {
			self.counter.add_aggressive(window);
		}
		Ok(())
	}

	/// Exact inverse of `learn`.
	pub fn forget(&mut self, stream: &[Token]) {
		trace!("forget {} tokens", stream.len());
		for window in sequence_forward(stream, self.config.order()) {
			self.counter.remove_aggressive(window);
		}
	}

	/// Exact inverse of `learn_token`.
	///
	/// # Errors
	/// Returns `IndexOutOfBounds` if `index >= stream.len()`.
	pub fn forget_token(&mut self, stream: &[Token], index: usize) -> Result<()> {
		if let Some(window) = self.committed_window(stream, index)? {
			self.counter.remove_aggressive(window);
		}
		Ok(())
	}

	/// Window ending at `index`, if `learn_token` / `forget_token` should apply it.
	fn committed_window<'a>(&self, stream: &'a [Token], index: usize) -> Result<Option<&'a [Token]>> {
		let window = sequence_at(stream, index, self.config.order())?;
		if window.len() == self.config.order() || index == stream.len() - 1 {
			Ok(Some(window))
		} else {
			trace!("window at {} is still growing, skipped", index);
			Ok(None)
		}
	}

	/// Estimates the token at `index` given the tokens before it.
	///
	/// The returned probability is normalized to sum to 1 over candidate
	/// tokens; the confidence is left as accumulated. `(0, 0)` means no
	/// context length knew anything about this position.
	///
	/// # Errors
	/// Returns `IndexOutOfBounds` if `index >= stream.len()`.
	pub fn model_token(&self, stream: &[Token], index: usize) -> Result<Estimate> {
		let window = sequence_at(stream, index, self.config.order())?;
		Ok(self.model_window(window))
	}

	/// Blends the smoother's answer for every suffix of `window`, longest first.
	fn model_window(&self, window: &[Token]) -> Estimate {
		(0..window.len())
			.map(|start| self.smoother.estimate(&self.counter, &window[start..]))
			.fold(Estimate::ZERO, Estimate::blend)
			.normalized()
	}

	/// Proposes and scores candidates at `index`.
	///
	/// Candidates are the top `prediction_cutoff` successors of every suffix
	/// of the window ending at `index` (that token included), longest first,
	/// deduplicated. Each one is scored as if it stood at `index`; `stream`
	/// itself is never modified.
	///
	/// The returned map carries no ordering, see `evaluation::rank_predictions`.
	///
	/// # Errors
	/// Returns `IndexOutOfBounds` if `index >= stream.len()`.
	pub fn predict_token(&mut self, stream: &[Token], index: usize) -> Result<HashMap<Token, Estimate>> {
		let window = sequence_at(stream, index, self.config.order())?;
		let limit = self.config.prediction_cutoff();

		let mut candidates: HashSet<Token> = HashSet::new();
		for start in 0..window.len() {
			candidates.extend(self.lookup_top_successors(&window[start..], limit));
		}

		let mut substituted = window.to_vec();
		let last = substituted.len() - 1;
		let mut predictions = HashMap::with_capacity(candidates.len());
		for candidate in candidates {
			substituted[last] = candidate;
			predictions.insert(candidate, self.model_window(&substituted));
		}
		Ok(predictions)
	}

	/// Returns the `limit` most frequent successors of `context`.
	///
	/// Wide contexts are served from the cache while the counter is
	/// unchanged; caching never changes the returned value.
	pub fn lookup_top_successors(&mut self, context: &[Token], limit: usize) -> Vec<Token> {
		self.cache.top_successors(&self.counter, context, limit)
	}

	/// Estimates every token of `stream`.
	pub fn model(&self, stream: &[Token]) -> Result<Vec<Estimate>> {
		(0..stream.len()).map(|index| self.model_token(stream, index)).collect()
	}

	/// Predicts every position of `stream`.
	pub fn predict(&mut self, stream: &[Token]) -> Result<Vec<HashMap<Token, Estimate>>> {
		(0..stream.len()).map(|index| self.predict_token(stream, index)).collect()
	}

	/// Returns the run configuration.
	pub fn config(&self) -> &RunConfig {
		&self.config
	}

	/// Returns the underlying counter.
	pub fn counter(&self) -> &C {
		&self.counter
	}

	/// Consumes the model and returns its counter.
	pub fn into_counter(self) -> C {
		self.counter
	}

	/// Registry name of the smoothing strategy in use.
	pub fn smoother_name(&self) -> &'static str {
		self.smoother.name()
	}

	/// Number of contexts currently memoized.
	pub fn cache_len(&self) -> usize {
		self.cache.len()
	}
}
