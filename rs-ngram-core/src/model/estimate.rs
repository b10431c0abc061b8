/// Integer identifier of a discrete unit (a lexeme, a character, ...).
pub type Token = u32;

/// A probability paired with the confidence placed in it.
///
/// Confidence expresses how much of the total probability mass the
/// estimate accounts for; an estimate with confidence 0 contributes nothing
/// when blended.
///
/// # Invariants
/// - `probability` and `confidence` are both within `[0, 1]`
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Estimate {
	pub probability: f64,
	pub confidence: f64,
}

impl Estimate {
	/// No probability, no confidence.
	pub const ZERO: Estimate = Estimate { probability: 0.0, confidence: 0.0 };

	/// Creates an estimate, clamping both values into `[0, 1]`.
	pub fn new(probability: f64, confidence: f64) -> Self {
		Self { probability: probability.clamp(0.0, 1.0), confidence: confidence.clamp(0.0, 1.0) }
	}

	/// Blends a shorter-context estimate into this aggregate.
	///
	/// Confidence combines as a probabilistic union, so the estimate blended
	/// first dominates and later ones only fill the remaining `1 - confidence`.
	/// Probability gains `other`'s mass weighted by the confidence it injects
	/// into that remaining gap.
	pub fn blend(self, other: Estimate) -> Estimate {
		Estimate {
			probability: self.probability + other.probability * other.confidence * (1.0 - self.confidence),
			confidence: self.confidence + other.confidence - self.confidence * other.confidence,
		}
	}

	/// Rescales the probability from "sums to confidence" to "sums to 1".
	///
	/// Confidence is left untouched. A zero-confidence estimate becomes `ZERO`.
	pub fn normalized(self) -> Estimate {
		if self.confidence > 0.0 {
			Estimate { probability: (self.probability / self.confidence).min(1.0), confidence: self.confidence }
		} else {
			Estimate::ZERO
		}
	}
}

impl Default for Estimate {
	fn default() -> Self {
		Estimate::ZERO
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn blend_into_zero_takes_weighted_mass() {
		let blended = Estimate::ZERO.blend(Estimate::new(0.8, 0.5));
		assert!((blended.probability - 0.4).abs() < 1e-12);
		assert!((blended.confidence - 0.5).abs() < 1e-12);
	}

	#[test]
	fn longer_context_dominates() {
		let blended = Estimate::ZERO.blend(Estimate::new(1.0, 0.5)).blend(Estimate::new(0.0, 0.5));
		assert!((blended.probability - 0.5).abs() < 1e-12);
		assert!((blended.confidence - 0.75).abs() < 1e-12);

		let normalized = blended.normalized();
		assert!((normalized.probability - 2.0 / 3.0).abs() < 1e-12);
		assert!((normalized.confidence - 0.75).abs() < 1e-12);
	}

	#[test]
	fn zero_confidence_normalizes_to_zero() {
		assert_eq!(Estimate { probability: 0.3, confidence: 0.0 }.normalized(), Estimate::ZERO);
	}

	#[test]
	fn new_clamps() {
		assert_eq!(Estimate::new(1.5, -0.2), Estimate { probability: 1.0, confidence: 0.0 });
	}
}
