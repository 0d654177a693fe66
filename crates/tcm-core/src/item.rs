//! Item Space
//!
//! The fixed set of N distinguishable study items. Each item is
//! presented to the context as a one-hot vector:
//!
//! ```text
//! f_i[j] = 1 if j == i, else 0
//! ```
//!
//! Labels exist for display only and play no part in the model.

use serde::{Deserialize, Serialize};

use crate::error::{Result, TcmError};

/// Fixed enumeration of study items.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemSpace {
	labels: Vec<String>,
}

impl ItemSpace {
	/// Create a space of `item_count` items labelled `Item 1` .. `Item N`.
	///
	/// # Errors
	///
	/// Returns [`TcmError::InvalidParameter`] if `item_count` is zero.
	pub fn new(item_count: usize) -> Result<Self> {
		if item_count == 0 {
			return Err(empty_space(item_count));
		}
		Ok(Self {
			labels: (1..=item_count).map(|i| format!("Item {i}")).collect(),
		})
	}

	/// Create a space whose size and labels come from `labels`.
	///
	/// # Errors
	///
	/// Returns [`TcmError::InvalidParameter`] if `labels` is empty.
	pub fn with_labels(labels: Vec<String>) -> Result<Self> {
		if labels.is_empty() {
			return Err(empty_space(0));
		}
		Ok(Self { labels })
	}

	/// Number of items (N), which is also the context dimension.
	#[inline]
	#[must_use]
	pub fn len(&self) -> usize {
		self.labels.len()
	}

	/// Always false; a space holds at least one item.
	#[inline]
	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.labels.is_empty()
	}

	/// Human-readable label of an item.
	///
	/// # Errors
	///
	/// Returns [`TcmError::IndexOutOfRange`] if `index >= len()`.
	pub fn label(&self, index: usize) -> Result<&str> {
		self.labels
			.get(index)
			.map(String::as_str)
			.ok_or_else(|| TcmError::index_out_of_range(index, self.len()))
	}

	/// All labels in item order.
	#[must_use]
	pub fn labels(&self) -> &[String] {
		&self.labels
	}

	/// Check that `index` names an item.
	///
	/// # Errors
	///
	/// Returns [`TcmError::IndexOutOfRange`] if `index >= len()`.
	pub fn check(&self, index: usize) -> Result<usize> {
		if index < self.len() {
			Ok(index)
		} else {
			Err(TcmError::index_out_of_range(index, self.len()))
		}
	}

	/// One-hot vector for an item.
	///
	/// # Errors
	///
	/// Returns [`TcmError::IndexOutOfRange`] if `index >= len()`.
	pub fn vector_for(&self, index: usize) -> Result<Vec<f64>> {
		let index = self.check(index)?;
		let mut vector = vec![0.0; self.len()];
		vector[index] = 1.0;
		Ok(vector)
	}
}

/// Convert a signed index from a host into a position in `0..len`.
///
/// Hosts such as JavaScript hand over plain numbers; negative values
/// and values past the end are both reported as out of range.
///
/// # Errors
///
/// Returns [`TcmError::IndexOutOfRange`] if `raw` is negative or `>= len`.
pub fn checked_index(raw: i64, len: usize) -> Result<usize> {
	usize::try_from(raw)
		.ok()
		.filter(|&index| index < len)
		.ok_or(TcmError::IndexOutOfRange { index: raw, len })
}

fn empty_space(item_count: usize) -> TcmError {
	TcmError::InvalidParameter {
		name: "item_count",
		value: item_count.to_string(),
		expected: "at least one item",
	}
}
