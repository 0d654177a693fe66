//! Property-based tests using proptest
//!
//! Arbitrary item counts, drift coefficients, and presentation orders must
//! never change a vector's dimension or leave gaps in the serial positions.

#![allow(clippy::unwrap_used)]

use proptest::prelude::*;
use tcm_core::{ProbeMode, Simulation, TcmError};

// ============================================================================
// Strategies
// ============================================================================

/// Item count, `ρ`, `β`, and a presentation order drawn from that item space.
fn run_strategy() -> impl Strategy<Value = (usize, f64, f64, Vec<usize>)> {
	(1usize..=32).prop_flat_map(|n| {
		(
			Just(n),
			0.0f64..=1.0,
			0.0f64..=1.0,
			prop::collection::vec(0..n, 0..64),
		)
	})
}

// ============================================================================
// Dimension and Contiguity
// ============================================================================

proptest! {
	#[test]
	fn test_every_vector_has_item_dimension((n, rho, beta, order) in run_strategy()) {
		let mut sim = Simulation::configure(n, rho, beta).unwrap();

		for &item in &order {
			let context = sim.present_item(item).unwrap();
			prop_assert_eq!(context.len(), n);
			prop_assert_eq!(sim.current_context().len(), n);
		}

		for record in sim.history().all() {
			prop_assert_eq!(record.snapshot.len(), n);
		}
	}

	#[test]
	fn test_positions_stay_contiguous((n, rho, beta, order) in run_strategy()) {
		let mut sim = Simulation::configure(n, rho, beta).unwrap();
		let final_context = sim.present_sequence(&order).unwrap();

		prop_assert_eq!(final_context.len(), n);
		prop_assert_eq!(sim.history().len(), order.len());
		prop_assert_eq!(sim.history().next_position(), order.len());

		for (expected, record) in sim.history().all().iter().enumerate() {
			prop_assert_eq!(record.position, expected);
			prop_assert_eq!(record.item, order[expected]);
		}
	}

	#[test]
	fn test_profiles_cover_every_record((n, rho, beta, order) in run_strategy()) {
		let mut sim = Simulation::configure(n, rho, beta).unwrap();
		let _ = sim.present_sequence(&order).unwrap();

		if order.is_empty() {
			prop_assert!(matches!(sim.current_activations(), Err(TcmError::EmptyHistory)));
		} else {
			let recency = sim.current_activations().unwrap();
			prop_assert_eq!(recency.len(), order.len());
			prop_assert_eq!(recency.probe_position, order.len() - 1);

			let anchor = order.len() / 2;
			let contiguity = sim.recall(anchor).unwrap();
			prop_assert_eq!(contiguity.len(), order.len());
			prop_assert_eq!(sim.probe_mode(), ProbeMode::Reinstated(anchor));
			for (expected, entry) in contiguity.entries.iter().enumerate() {
				prop_assert_eq!(entry.position, expected);
			}
		}
	}

	#[test]
	fn test_out_of_range_item_changes_nothing(
		(n, rho, beta, order) in run_strategy(),
		overshoot in 0usize..8,
	) {
		let mut sim = Simulation::configure(n, rho, beta).unwrap();
		let _ = sim.present_sequence(&order).unwrap();
		let context_before = sim.current_context().to_vec();

		let mut bad_order = order.clone();
		bad_order.push(n + overshoot);

		let is_out_of_range = matches!(
			sim.present_sequence(&bad_order),
			Err(TcmError::IndexOutOfRange { .. })
		);
		prop_assert!(is_out_of_range);
		prop_assert!(sim.present_item(n + overshoot).is_err());
		prop_assert_eq!(sim.current_context(), context_before.as_slice());
		prop_assert_eq!(sim.history().len(), order.len());
	}
}
