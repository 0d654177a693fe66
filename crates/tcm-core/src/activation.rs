//! Activation Calculation
//!
//! Retrieval is cued by context. A probe context is compared with the
//! context every item was studied in:
//!
//! ```text
//! a_i = p · c_i
//! ```
//!
//! Where:
//! - `p` = probe context (end of list, or a reinstated study context)
//! - `c_i` = snapshot bound to the item at position `i`
//!
//! The raw dot product is used rather than cosine similarity, so the
//! unnormalized context magnitudes show through. Probing at the end of
//! the list produces recency; reinstating a study context produces
//! contiguity, because neighbors share the most context with it.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::error::{Result, TcmError};
use crate::history::EncodingRecord;

// ============================================================================
// Vector Math
// ============================================================================

/// Dot product of two vectors.
///
/// # Errors
///
/// Returns [`TcmError::DimensionMismatch`] if the vectors have different
/// lengths.
#[inline]
pub fn dot(a: &[f64], b: &[f64]) -> Result<f64> {
	if a.len() != b.len() {
		return Err(TcmError::DimensionMismatch {
			expected: a.len(),
			got: b.len(),
		});
	}
	Ok(dot_unchecked(a, b))
}

/// Lengths must already match.
#[inline]
fn dot_unchecked(a: &[f64], b: &[f64]) -> f64 {
	a.iter()
		.zip(b.iter())
		.fold(0.0, |acc, (&ai, &bi)| ai.mul_add(bi, acc))
}

/// Euclidean length of a vector.
///
/// Useful for showing how far the unnormalized context has grown or shrunk.
#[inline]
#[must_use]
pub fn magnitude(v: &[f64]) -> f64 {
	dot_unchecked(v, v).sqrt()
}

// ============================================================================
// Activation Profile
// ============================================================================

/// Activation of one studied item under the current probe.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ActivationEntry {
	/// Item index
	pub item: usize,
	/// Serial position of the record
	pub position: usize,
	/// `p · c_i`
	pub activation: f64,
}

/// Activations for every record, in serial-position order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ActivationProfile {
	/// Position whose context served as the probe
	pub probe_position: usize,
	/// One entry per record, ordered by position
	pub entries: Vec<ActivationEntry>,
}

/// Compute the activation of every record against `probe`.
///
/// Output order follows `records`. The record the probe came from is
/// included, so its self-activation is visible alongside the others.
///
/// # Errors
///
/// Returns [`TcmError::DimensionMismatch`] if any snapshot differs in
/// length from `probe`.
pub fn activate(probe: &[f64], records: &[EncodingRecord]) -> Result<Vec<ActivationEntry>> {
	records
		.iter()
		.map(|record| {
			Ok(ActivationEntry {
				item: record.item,
				position: record.position,
				activation: dot(probe, &record.snapshot)?,
			})
		})
		.collect()
}

impl ActivationProfile {
	/// Bare activation values in position order.
	#[must_use]
	pub fn activations(&self) -> Vec<f64> {
		self.entries.iter().map(|e| e.activation).collect()
	}

	/// Entry at a serial position.
	#[must_use]
	pub fn get(&self, position: usize) -> Option<&ActivationEntry> {
		self.entries.get(position)
	}

	/// Number of entries.
	#[must_use]
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Whether the profile has no entries.
	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// The `k` most active entries, strongest first.
	///
	/// Ties keep serial-position order.
	#[must_use]
	pub fn strongest(&self, k: usize) -> SmallVec<[ActivationEntry; 16]> {
		let mut ranked: SmallVec<[ActivationEntry; 16]> = self.entries.iter().cloned().collect();
		ranked.sort_by(|a, b| {
			b.activation
				.partial_cmp(&a.activation)
				.unwrap_or(std::cmp::Ordering::Equal)
		});
		ranked.truncate(k);
		ranked
	}

	/// Activations keyed by lag from the probe position.
	///
	/// Lag is `position - probe_position`: negative lags precede the
	/// probe, positive lags follow it.
	#[must_use]
	#[allow(clippy::cast_possible_wrap)]
	pub fn by_lag(&self) -> Vec<(i64, f64)> {
		let probe = self.probe_position as i64;
		self.entries
			.iter()
			.map(|e| (e.position as i64 - probe, e.activation))
			.collect()
	}

	/// Recall probabilities under the Luce choice rule.
	///
	/// `P(i) = e^(a_i/τ) / Σ e^(a_j/τ)`
	///
	/// Lower `τ` (temperature) sharpens the competition toward the most
	/// active item.
	///
	/// # Errors
	///
	/// Returns [`TcmError::InvalidParameter`] if `temperature` is not a
	/// finite positive number.
	pub fn choice_probabilities(&self, temperature: f64) -> Result<Vec<f64>> {
		if !(temperature.is_finite() && temperature > 0.0) {
			return Err(TcmError::InvalidParameter {
				name: "temperature",
				value: temperature.to_string(),
				expected: "a finite value > 0",
			});
		}

		// Shift by the max so the exponentials cannot overflow
		let max = self
			.entries
			.iter()
			.map(|e| e.activation)
			.fold(f64::NEG_INFINITY, f64::max);

		let weights: Vec<f64> = self
			.entries
			.iter()
			.map(|e| ((e.activation - max) / temperature).exp())
			.collect();
		let total: f64 = weights.iter().sum();

		Ok(weights.into_iter().map(|w| w / total).collect())
	}
}
