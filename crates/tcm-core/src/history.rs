//! Encoding History
//!
//! One record per presentation: which item was studied, the context it
//! was bound to, and its serial position. Positions run `0, 1, 2, ...`
//! without gaps, and a snapshot is frozen the moment it is written.

use serde::{Deserialize, Serialize};

use crate::error::{Result, TcmError};

/// A single studied item bound to its context.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EncodingRecord {
	/// Item index
	pub item: usize,
	/// Context at the moment of presentation
	pub snapshot: Vec<f64>,
	/// Serial position (0-based)
	pub position: usize,
}

/// Append-only log of encoding records in temporal order.
///
/// A deserialized history must already be contiguous from position 0
/// with snapshots of one shared dimension.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawHistory")]
pub struct EncodingHistory {
	records: Vec<EncodingRecord>,
}

#[derive(Deserialize)]
struct RawHistory {
	records: Vec<EncodingRecord>,
}

impl TryFrom<RawHistory> for EncodingHistory {
	type Error = TcmError;

	fn try_from(raw: RawHistory) -> Result<Self> {
		let mut history = Self::new();
		for record in raw.records {
			if let Some(first) = history.records.first() {
				if record.snapshot.len() != first.snapshot.len() {
					return Err(TcmError::DimensionMismatch {
						expected: first.snapshot.len(),
						got: record.snapshot.len(),
					});
				}
			}
			history.append(record.item, &record.snapshot, record.position)?;
		}
		Ok(history)
	}
}

impl EncodingHistory {
	/// Empty history.
	#[must_use]
	pub const fn new() -> Self {
		Self {
			records: Vec::new(),
		}
	}

	/// Number of records.
	#[inline]
	#[must_use]
	pub fn len(&self) -> usize {
		self.records.len()
	}

	/// Whether no item has been presented.
	#[inline]
	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.records.is_empty()
	}

	/// Position the next append must use.
	#[inline]
	#[must_use]
	pub fn next_position(&self) -> usize {
		self.records.len()
	}

	/// Store a copy of `snapshot` for `item` at `position`.
	///
	/// # Errors
	///
	/// Returns [`TcmError::InvalidState`] unless `position` equals
	/// [`next_position`](Self::next_position).
	pub fn append(&mut self, item: usize, snapshot: &[f64], position: usize) -> Result<()> {
		let expected = self.next_position();
		if position != expected {
			return Err(TcmError::InvalidState {
				expected,
				got: position,
			});
		}

		self.records.push(EncodingRecord {
			item,
			snapshot: snapshot.to_vec(),
			position,
		});
		Ok(())
	}

	/// Record at `position`.
	///
	/// # Errors
	///
	/// Returns [`TcmError::IndexOutOfRange`] if no such record exists.
	pub fn get(&self, position: usize) -> Result<&EncodingRecord> {
		self.records
			.get(position)
			.ok_or_else(|| TcmError::index_out_of_range(position, self.len()))
	}

	/// Most recent record, or `None` before the first presentation.
	#[must_use]
	pub fn latest(&self) -> Option<&EncodingRecord> {
		self.records.last()
	}

	/// All records in position order.
	#[must_use]
	pub fn all(&self) -> &[EncodingRecord] {
		&self.records
	}

	/// Drop every record; the next append starts at position 0.
	pub fn clear(&mut self) {
		self.records.clear();
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_append_contiguous() {
		let mut history = EncodingHistory::new();
		history.append(3, &[0.8, 0.0], 0).unwrap();
		history.append(1, &[0.48, 0.8], 1).unwrap();

		assert_eq!(history.len(), 2);
		let positions: Vec<usize> = history.all().iter().map(|r| r.position).collect();
		assert_eq!(positions, vec![0, 1]);
		assert_eq!(history.get(0).unwrap().item, 3);
		assert_eq!(history.latest().unwrap().item, 1);
	}

	#[test]
	fn test_append_gap_rejected() {
		let mut history = EncodingHistory::new();
		history.append(0, &[1.0], 0).unwrap();

		assert!(matches!(
			history.append(0, &[1.0], 2),
			Err(TcmError::InvalidState { expected: 1, got: 2 })
		));
		assert!(history.append(0, &[1.0], 0).is_err());
		assert_eq!(history.len(), 1);
	}

	#[test]
	fn test_snapshot_is_copied() {
		let mut history = EncodingHistory::new();
		let mut context = vec![0.8, 0.0];
		history.append(0, &context, 0).unwrap();

		context[0] = 0.0;
		context[1] = 9.0;
		assert_eq!(history.get(0).unwrap().snapshot, vec![0.8, 0.0]);
	}

	#[test]
	fn test_get_out_of_range() {
		let history = EncodingHistory::new();
		assert!(matches!(
			history.get(0),
			Err(TcmError::IndexOutOfRange { index: 0, len: 0 })
		));
		assert!(history.latest().is_none());
	}

	#[test]
	fn test_deserialize_contiguous() {
		let mut history: EncodingHistory = serde_json::from_str(
			r#"{ "records": [
				{ "item": 2, "snapshot": [0.0, 0.0, 0.8], "position": 0 },
				{ "item": 0, "snapshot": [0.8, 0.0, 0.48], "position": 1 }
			] }"#,
		)
		.unwrap();
		assert_eq!(history.len(), 2);
		assert_eq!(history.get(1).unwrap().item, 0);

		history.append(1, &[0.48, 0.8, 0.288], 2).unwrap();
		let json = serde_json::to_string(&history).unwrap();
		assert_eq!(serde_json::from_str::<EncodingHistory>(&json).unwrap(), history);
	}

	#[test]
	fn test_deserialize_rejects_gaps() {
		let result = serde_json::from_str::<EncodingHistory>(
			r#"{ "records": [{ "item": 0, "snapshot": [1.0], "position": 5 }] }"#,
		);
		assert!(result.unwrap_err().to_string().contains("expected position 0"));

		let result = serde_json::from_str::<EncodingHistory>(
			r#"{ "records": [
				{ "item": 0, "snapshot": [1.0], "position": 0 },
				{ "item": 0, "snapshot": [1.0], "position": 0 }
			] }"#,
		);
		assert!(result.is_err());
	}

	#[test]
	fn test_deserialize_rejects_mixed_dimensions() {
		let result = serde_json::from_str::<EncodingHistory>(
			r#"{ "records": [
				{ "item": 0, "snapshot": [1.0, 0.0], "position": 0 },
				{ "item": 1, "snapshot": [0.6], "position": 1 }
			] }"#,
		);
		assert!(result.unwrap_err().to_string().contains("Dimension mismatch"));
	}

	#[test]
	fn test_clear_restarts_positions() {
		let mut history = EncodingHistory::new();
		history.append(0, &[1.0], 0).unwrap();
		history.append(0, &[1.0], 1).unwrap();
		history.clear();

		assert!(history.is_empty());
		assert_eq!(history.next_position(), 0);
		history.append(0, &[1.0], 0).unwrap();
	}
}
