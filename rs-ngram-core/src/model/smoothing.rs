//! Per-context-length smoothing strategies.
//!
//! A smoother looks at one window of a fixed length (context followed by
//! the target token) and says how likely the target is and how much that
//! context length should be trusted. The backoff models blend these
//! answers across lengths and never look at the formula itself.

use std::fmt;
use std::str::FromStr;

use crate::counting::Counter;
use crate::error::{ModelError, Result};
use crate::model::estimate::{Estimate, Token};

/// Default interpolation weight of the Jelinek–Mercer smoother.
pub const DEFAULT_LAMBDA: f64 = 0.5;

/// Default discount of the absolute discounting smoother.
pub const DEFAULT_DISCOUNT: f64 = 0.75;

/// Probability and confidence of the last token of a window.
///
/// Strategies are stateless with respect to the counter, so a model can be
/// moved across threads (or shared behind a `Mutex`) with its strategy.
pub trait Smoother: fmt::Debug + Send + Sync {
	/// Estimates `sequence[len - 1]` given `sequence[..len - 1]`.
	///
	/// Returns `Estimate::ZERO` when the context was never observed, or
	/// when `sequence` is a single token that was never observed.
	fn estimate(&self, counter: &dyn Counter, sequence: &[Token]) -> Estimate;

	/// Registry name of the strategy.
	fn name(&self) -> &'static str;
}

/// Splits a window into its counts: `(count(window), count(context), N1+(context))`.
///
/// Returns `None` for an empty window, an unseen context, or a single
/// out-of-vocabulary token (the empty context is always "seen" once
/// anything was counted, so a bare unigram needs its own evidence).
fn window_counts(counter: &dyn Counter, sequence: &[Token]) -> Option<(u64, u64, usize)> {
	let (_, context) = sequence.split_last()?;
	let context_count = counter.context_count(context);
	if context_count == 0 {
		return None;
	}
	let count = counter.sequence_count(sequence);
	if context.is_empty() && count == 0 {
		return None;
	}
	Some((count, context_count, counter.successor_count_of(context)))
}

/// Linear interpolation with a fixed weight per context length.
///
/// Probability is the maximum likelihood estimate, confidence is `lambda`.
#[derive(Clone, Copy, Debug)]
pub struct JelinekMercer {
	lambda: f64,
}

impl JelinekMercer {
	/// # Errors
	/// Returns `InvalidConfig` if `lambda` is not within `(0, 1]`.
	pub fn new(lambda: f64) -> Result<Self> {
		if !(lambda > 0.0 && lambda <= 1.0) {
			return Err(ModelError::InvalidConfig(format!("lambda must be within (0, 1], got {}", lambda)));
		}
		Ok(Self { lambda })
	}
}

impl Default for JelinekMercer {
	fn default() -> Self {
		Self { lambda: DEFAULT_LAMBDA }
	}
}

impl Smoother for JelinekMercer {
	fn estimate(&self, counter: &dyn Counter, sequence: &[Token]) -> Estimate {
		match window_counts(counter, sequence) {
			Some((count, context_count, _)) => Estimate::new(count as f64 / context_count as f64, self.lambda),
			None => Estimate::ZERO,
		}
	}

	fn name(&self) -> &'static str {
		"jm"
	}
}

/// Witten–Bell smoothing.
///
/// Trusts a context in proportion to how often it was seen relative to how
/// many different tokens followed it: `c / (c + N1+)`.
#[derive(Clone, Copy, Debug, Default)]
pub struct WittenBell;

impl Smoother for WittenBell {
	fn estimate(&self, counter: &dyn Counter, sequence: &[Token]) -> Estimate {
		match window_counts(counter, sequence) {
			Some((count, context_count, distinct)) => {
				let context_count = context_count as f64;
				Estimate::new(count as f64 / context_count, context_count / (context_count + distinct as f64))
			}
			None => Estimate::ZERO,
		}
	}

	fn name(&self) -> &'static str {
		"wb"
	}
}

/// Absolute discounting.
///
/// Subtracts a fixed `discount` from every observed count and hands the
/// freed mass `discount * N1+ / c` over to shorter contexts.
#[derive(Clone, Copy, Debug)]
pub struct AbsoluteDiscounting {
	discount: f64,
}

impl AbsoluteDiscounting {
	/// # Errors
	/// Returns `InvalidConfig` if `discount` is not within `(0, 1)`.
	pub fn new(discount: f64) -> Result<Self> {
		if !(discount > 0.0 && discount < 1.0) {
			return Err(ModelError::InvalidConfig(format!("discount must be within (0, 1), got {}", discount)));
		}
		Ok(Self { discount })
	}
}

impl Default for AbsoluteDiscounting {
	fn default() -> Self {
		Self { discount: DEFAULT_DISCOUNT }
	}
}

impl Smoother for AbsoluteDiscounting {
	fn estimate(&self, counter: &dyn Counter, sequence: &[Token]) -> Estimate {
		match window_counts(counter, sequence) {
			Some((count, context_count, distinct)) => {
				let context_count = context_count as f64;
				let discounted = (count as f64 - self.discount).max(0.0);
				Estimate::new(discounted / context_count, 1.0 - self.discount * distinct as f64 / context_count)
			}
			None => Estimate::ZERO,
		}
	}

	fn name(&self) -> &'static str {
		"ad"
	}
}

/// Names under which smoothing strategies can be selected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SmootherKind {
	#[default]
	JelinekMercer,
	WittenBell,
	AbsoluteDiscounting,
}

impl SmootherKind {
	/// Every registered strategy.
	pub const ALL: [SmootherKind; 3] = [SmootherKind::JelinekMercer, SmootherKind::WittenBell, SmootherKind::AbsoluteDiscounting];

	/// Builds the strategy with its default parameters.
	pub fn build(self) -> Box<dyn Smoother> {
		match self {
			SmootherKind::JelinekMercer => Box::new(JelinekMercer::default()),
			SmootherKind::WittenBell => Box::new(WittenBell),
			SmootherKind::AbsoluteDiscounting => Box::new(AbsoluteDiscounting::default()),
		}
	}

	/// Short registry name.
	pub fn name(self) -> &'static str {
		match self {
			SmootherKind::JelinekMercer => "jm",
			SmootherKind::WittenBell => "wb",
			SmootherKind::AbsoluteDiscounting => "ad",
		}
	}
}

impl FromStr for SmootherKind {
	type Err = ModelError;

	/// Accepts the short name or the full name, case-insensitive.
	fn from_str(name: &str) -> Result<Self> {
		match name.trim().to_lowercase().replace(['-', '_', ' '], "").as_str() {
			"jm" | "jelinekmercer" => Ok(SmootherKind::JelinekMercer),
			"wb" | "wittenbell" => Ok(SmootherKind::WittenBell),
			"ad" | "absolutediscounting" => Ok(SmootherKind::AbsoluteDiscounting),
			_ => Err(ModelError::UnknownSmoother(name.to_owned())),
		}
	}
}

impl fmt::Display for SmootherKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

/// Looks up a strategy by name and builds it.
///
/// # Errors
/// Returns `UnknownSmoother` if no strategy is registered under `name`.
pub fn build_smoother(name: &str) -> Result<Box<dyn Smoother>> {
	Ok(name.parse::<SmootherKind>()?.build())
}
