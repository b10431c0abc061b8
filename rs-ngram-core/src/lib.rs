//! Backoff n-gram language modeling over integer token streams.
//!
//! This crate provides an incrementally trainable token model including:
//! - Aggressive (prefix-inclusive) frequency counting
//! - Confidence-weighted backoff across context lengths
//! - Pluggable smoothing strategies selectable by name
//! - Top-K next-token prediction with a memoized successor lookup
//! - Entropy and MRR scoring of held-out streams

/// Backoff models, estimates, smoothing strategies and the successor cache.
pub mod model;

/// Frequency counting over token sequences.
pub mod counting;

/// Sliding windows over token streams.
pub mod sequencing;

/// Run configuration (order, prediction cutoff).
pub mod config;

/// Scoring helpers: ranking, entropy, reciprocal rank.
pub mod evaluation;

/// Corpus loading.
pub mod io;

/// Crate error type.
pub mod error;

pub use config::RunConfig;
pub use counting::{Counter, MapCounter};
pub use error::{ModelError, Result};
pub use model::estimate::{Estimate, Token};
pub use model::ngram_model::NGramModel;
pub use model::smoothing::{Smoother, SmootherKind};
