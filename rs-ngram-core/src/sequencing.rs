//! Sliding windows over token streams.
//!
//! Every window handed to a counter or a smoother comes from here, so
//! training and estimation always see the same slices for the same order.

use crate::error::{ModelError, Result};
use crate::model::estimate::Token;

/// Returns the window starting at each position of `stream`.
///
/// Each window is `min(order, remaining)` tokens long: full length in the
/// body of the stream, shrinking over the last `order - 1` positions.
///
/// Example (order 3):
/// `[1, 2, 3, 4]` → `[1, 2, 3]`, `[2, 3, 4]`, `[3, 4]`, `[4]`
pub fn sequence_forward(stream: &[Token], order: usize) -> impl Iterator<Item = &[Token]> {
	(0..stream.len()).map(move |start| {
		let end = stream.len().min(start + order);
		&stream[start..end]
	})
}

/// Returns the window ending at `index`, at most `order` tokens long.
///
/// The window is shorter than `order` only near the start of the stream.
///
/// # Errors
/// Returns `IndexOutOfBounds` if `index >= stream.len()`.
pub fn sequence_at(stream: &[Token], index: usize, order: usize) -> Result<&[Token]> {
	if index >= stream.len() {
		return Err(ModelError::IndexOutOfBounds { index, len: stream.len() });
	}
	let start = (index + 1).saturating_sub(order);
	Ok(&stream[start..=index])
}
