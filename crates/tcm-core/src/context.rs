//! Context Drift
//!
//! The running mental context. Each presentation blends the decayed
//! previous context with the presented item:
//!
//! ```text
//! c_t = ρ · c_{t-1} + β · f_t
//! ```
//!
//! Where:
//! - `ρ` (rho) = how much of the old context survives (decay)
//! - `β` (beta) = how strongly the new item enters context
//! - `f_t` = one-hot vector of the presented item
//!
//! The context is deliberately left unnormalized, so its length grows
//! and shrinks with ρ and β. Canonical TCM rescales ρ to keep `‖c‖ = 1`;
//! here the raw blend stays visible.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::{Result, TcmError};

/// Drift coefficients, each constrained to `[0, 1]`.
///
/// Deserialization goes through [`SimulationParameters::new`], so
/// out-of-range values are rejected there too.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawParameters")]
pub struct SimulationParameters {
	/// `ρ` - decay of the previous context
	pub rho: f64,
	/// `β` - strength of the incoming item
	pub beta: f64,
}

impl Default for SimulationParameters {
	fn default() -> Self {
		Self {
			rho: 0.6,
			beta: 0.8,
		}
	}
}

impl SimulationParameters {
	/// Build validated parameters.
	///
	/// # Errors
	///
	/// Returns [`TcmError::InvalidParameter`] if either value lies outside
	/// `[0, 1]` or is NaN.
	pub fn new(rho: f64, beta: f64) -> Result<Self> {
		let params = Self { rho, beta };
		params.validate()?;
		Ok(params)
	}

	/// Check both coefficients. Values are rejected, never clamped.
	///
	/// # Errors
	///
	/// Returns [`TcmError::InvalidParameter`] naming the first bad value.
	pub fn validate(&self) -> Result<()> {
		check_unit("rho", self.rho)?;
		check_unit("beta", self.beta)
	}
}

#[derive(Deserialize)]
struct RawParameters {
	rho: f64,
	beta: f64,
}

impl TryFrom<RawParameters> for SimulationParameters {
	type Error = TcmError;

	fn try_from(raw: RawParameters) -> Result<Self> {
		Self::new(raw.rho, raw.beta)
	}
}

fn check_unit(name: &'static str, value: f64) -> Result<()> {
	if (0.0..=1.0).contains(&value) {
		Ok(())
	} else {
		Err(TcmError::InvalidParameter {
			name,
			value: value.to_string(),
			expected: "a value in [0, 1]",
		})
	}
}

/// Current context vector plus the active drift parameters.
///
/// Serializable for display; it is only ever built through [`ContextState::new`].
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ContextState {
	current: Vec<f64>,
	params: SimulationParameters,
}

impl ContextState {
	/// Zero context of dimension `dimension`.
	///
	/// # Errors
	///
	/// Returns [`TcmError::InvalidParameter`] if `params` are out of range.
	pub fn new(dimension: usize, params: SimulationParameters) -> Result<Self> {
		params.validate()?;
		Ok(Self {
			current: vec![0.0; dimension],
			params,
		})
	}

	/// Context dimension (item count).
	#[inline]
	#[must_use]
	pub fn dimension(&self) -> usize {
		self.current.len()
	}

	/// The current context.
	#[must_use]
	pub fn current(&self) -> &[f64] {
		&self.current
	}

	/// Active drift parameters.
	#[must_use]
	pub const fn parameters(&self) -> SimulationParameters {
		self.params
	}

	/// Apply one drift step and return the new context.
	///
	/// `new[j] = ρ · old[j] + β · item[j]`
	///
	/// The result is a fresh vector; the previous context and any copy
	/// taken from it are untouched.
	///
	/// # Errors
	///
	/// Returns [`TcmError::DimensionMismatch`] if `item_vector` does not
	/// have the context dimension. Nothing is mutated in that case.
	pub fn update(&mut self, item_vector: &[f64]) -> Result<Vec<f64>> {
		if item_vector.len() != self.dimension() {
			return Err(TcmError::DimensionMismatch {
				expected: self.dimension(),
				got: item_vector.len(),
			});
		}

		let SimulationParameters { rho, beta } = self.params;
		let next: Vec<f64> = self
			.current
			.iter()
			.zip(item_vector)
			.map(|(&old, &input)| rho.mul_add(old, beta * input))
			.collect();

		trace!(rho, beta, "context drift");
		self.current.clone_from(&next);
		Ok(next)
	}

	/// Replace the drift parameters.
	///
	/// # Errors
	///
	/// Returns [`TcmError::InvalidParameter`] if either value is out of
	/// range; the previous parameters stay active.
	pub fn set_parameters(&mut self, rho: f64, beta: f64) -> Result<()> {
		self.params = SimulationParameters::new(rho, beta)?;
		Ok(())
	}

	/// Return to the zero context.
	pub fn reset(&mut self) {
		self.current.fill(0.0);
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn one_hot(index: usize, n: usize) -> Vec<f64> {
		let mut v = vec![0.0; n];
		v[index] = 1.0;
		v
	}

	fn assert_close(actual: &[f64], expected: &[f64]) {
		assert_eq!(actual.len(), expected.len());
		for (a, e) in actual.iter().zip(expected) {
			assert!((a - e).abs() < 1e-12, "{actual:?} != {expected:?}");
		}
	}

	#[test]
	fn test_drift_update() {
		let mut ctx = ContextState::new(6, SimulationParameters::new(0.6, 0.8).unwrap()).unwrap();

		let first = ctx.update(&one_hot(0, 6)).unwrap();
		assert_close(&first, &[0.8, 0.0, 0.0, 0.0, 0.0, 0.0]);

		let second = ctx.update(&one_hot(1, 6)).unwrap();
		assert_close(&second, &[0.48, 0.8, 0.0, 0.0, 0.0, 0.0]);
		assert_close(ctx.current(), &second);

		// The earlier result is an independent vector
		assert_close(&first, &[0.8, 0.0, 0.0, 0.0, 0.0, 0.0]);
	}

	#[test]
	fn test_no_normalization() {
		let mut ctx = ContextState::new(2, SimulationParameters::new(1.0, 1.0).unwrap()).unwrap();
		let _ = ctx.update(&one_hot(0, 2)).unwrap();
		let c = ctx.update(&one_hot(0, 2)).unwrap();
		// Magnitude is allowed to exceed 1
		assert_close(&c, &[2.0, 0.0]);
	}

	#[test]
	fn test_dimension_mismatch() {
		let mut ctx = ContextState::new(3, SimulationParameters::default()).unwrap();
		let result = ctx.update(&[1.0, 0.0]);
		assert!(matches!(
			result,
			Err(TcmError::DimensionMismatch { expected: 3, got: 2 })
		));
		assert_close(ctx.current(), &[0.0, 0.0, 0.0]);
	}

	#[test]
	fn test_parameter_validation() {
		assert!(SimulationParameters::new(0.0, 1.0).is_ok());
		assert!(SimulationParameters::new(1.0, 0.0).is_ok());
		assert!(matches!(
			SimulationParameters::new(-0.1, 0.5),
			Err(TcmError::InvalidParameter { name: "rho", .. })
		));
		assert!(matches!(
			SimulationParameters::new(0.5, 1.01),
			Err(TcmError::InvalidParameter { name: "beta", .. })
		));
		assert!(SimulationParameters::new(f64::NAN, 0.5).is_err());
	}

	#[test]
	fn test_parameters_deserialize_validated() {
		let params: SimulationParameters =
			serde_json::from_str(r#"{ "rho": 0.25, "beta": 1.0 }"#).unwrap();
		assert_eq!(params, SimulationParameters { rho: 0.25, beta: 1.0 });

		let err = serde_json::from_str::<SimulationParameters>(r#"{ "rho": 7.0, "beta": -3.0 }"#)
			.unwrap_err();
		assert!(err.to_string().contains("rho"));
		assert!(serde_json::from_str::<SimulationParameters>(r#"{ "rho": 0.5, "beta": 1.5 }"#).is_err());
	}

	#[test]
	fn test_set_parameters_rejects_without_change() {
		let mut ctx = ContextState::new(3, SimulationParameters::default()).unwrap();
		assert!(ctx.set_parameters(0.5, 2.0).is_err());
		assert_eq!(ctx.parameters(), SimulationParameters::default());

		ctx.set_parameters(0.9, 0.1).unwrap();
		assert_eq!(ctx.parameters(), SimulationParameters { rho: 0.9, beta: 0.1 });
	}

	#[test]
	fn test_reset() {
		let mut ctx = ContextState::new(3, SimulationParameters::default()).unwrap();
		let _ = ctx.update(&one_hot(1, 3)).unwrap();
		ctx.reset();
		assert_close(ctx.current(), &[0.0, 0.0, 0.0]);
		assert_eq!(ctx.dimension(), 3);
	}
}
