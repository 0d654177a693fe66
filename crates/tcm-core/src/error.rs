//! Error types for simulation operations.

/// Errors that can occur while configuring or driving a simulation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TcmError {
	/// A parameter lies outside its permitted range.
	#[error("Invalid parameter `{name}`: {value} (expected {expected})")]
	InvalidParameter {
		/// Parameter name
		name: &'static str,
		/// Rejected value, rendered for display
		value: String,
		/// Description of the permitted range
		expected: &'static str,
	},

	/// An item index, recall position, or history lookup is out of bounds.
	#[error("Index {index} out of range (valid: 0..{len})")]
	IndexOutOfRange {
		/// Requested index
		index: i64,
		/// Number of valid indices
		len: usize,
	},

	/// A history append arrived at a non-contiguous position.
	#[error("Non-contiguous history append: expected position {expected}, got {got}")]
	InvalidState {
		/// Next contiguous position
		expected: usize,
		/// Position supplied by the caller
		got: usize,
	},

	/// Activations were requested before any item was presented.
	#[error("No items have been presented yet")]
	EmptyHistory,

	/// A vector of the wrong dimension reached the drift rule.
	#[error("Dimension mismatch: expected {expected}, got {got}")]
	DimensionMismatch {
		/// Simulation dimension (item count)
		expected: usize,
		/// Dimension of the supplied vector
		got: usize,
	},
}

impl TcmError {
	pub(crate) fn index_out_of_range(index: usize, len: usize) -> Self {
		Self::IndexOutOfRange {
			index: i64::try_from(index).unwrap_or(i64::MAX),
			len,
		}
	}

	/// Check if the error was caused by bad input from the caller
	/// (the host may prompt again).
	#[must_use]
	pub const fn is_caller_error(&self) -> bool {
		matches!(
			self,
			Self::InvalidParameter { .. } | Self::IndexOutOfRange { .. } | Self::EmptyHistory
		)
	}

	/// Check if the error points at an orchestration bug rather than bad input.
	#[must_use]
	pub const fn is_internal(&self) -> bool {
		matches!(self, Self::InvalidState { .. } | Self::DimensionMismatch { .. })
	}
}

/// Result type alias for simulation operations.
pub type Result<T> = std::result::Result<T, TcmError>;
