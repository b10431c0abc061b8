//! Top-level module for the backoff n-gram models.
//!
//! This module provides:
//! - Token and estimate types (`Token`, `Estimate`)
//! - Pluggable per-length smoothing strategies (`Smoother`)
//! - Memoized top-successor lookups (`SuccessorCache`)
//! - The backoff model itself (`NGramModel`)

/// Token identifiers and probability/confidence pairs.
pub mod estimate;

/// Smoothing strategies for a single context length, and their registry.
///
/// Each strategy turns the counts of one window into an `Estimate`;
/// strategies are selected by instance or by name.
pub mod smoothing;

/// Top-successor cache with fingerprint-based invalidation.
pub mod cache;

/// Backoff n-gram model (`order >= 1`).
///
/// Handles stream ingestion and removal, confidence-weighted backoff
/// estimation and top-K next-token prediction.
pub mod ngram_model;
