//! Simulation
//!
//! Ties the pieces together for one study-test run:
//!
//! 1. Present items: one-hot input → context drift → snapshot appended
//! 2. Choose a probe: end of list, or a reinstated study context
//! 3. Compute the activation of every studied item under that probe
//!
//! A `Simulation` exclusively owns its context and history. Every failing
//! call is validated before anything is mutated.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::activation::{activate, ActivationProfile};
use crate::context::{ContextState, SimulationParameters};
use crate::error::{Result, TcmError};
use crate::history::EncodingHistory;
use crate::item::ItemSpace;

// ============================================================================
// Configuration
// ============================================================================

/// Everything needed to start a simulation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
	/// Number of study items (N)
	pub item_count: usize,
	/// Drift coefficients
	#[serde(default)]
	pub parameters: SimulationParameters,
	/// Display labels, one per item (default: `Item 1` .. `Item N`)
	#[serde(default)]
	pub labels: Option<Vec<String>>,
}

impl Default for SimulationConfig {
	fn default() -> Self {
		Self {
			item_count: 6,
			parameters: SimulationParameters::default(),
			labels: None,
		}
	}
}

// ============================================================================
// Probe & State
// ============================================================================

/// Where in time retrieval is anchored.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProbeMode {
	/// Probe with the most recent context.
	#[default]
	EndOfList,
	/// Probe with the context stored at this serial position.
	Reinstated(usize),
}

/// Coarse phase of a run, derived from history and probe mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SimulationState {
	/// Nothing presented yet.
	Idle,
	/// At least one item presented, probing at end of list.
	Presenting,
	/// Probe anchored at a recalled position.
	Reinstated(usize),
}

// ============================================================================
// Simulation
// ============================================================================

/// One TCM study-test run.
#[derive(Clone, Debug)]
pub struct Simulation {
	items: ItemSpace,
	context: ContextState,
	history: EncodingHistory,
	probe: ProbeMode,
}

impl Simulation {
	/// Start a simulation over `item_count` items with drift `rho`/`beta`.
	///
	/// # Errors
	///
	/// Returns [`TcmError::InvalidParameter`] if `item_count` is zero or a
	/// coefficient lies outside `[0, 1]`.
	pub fn configure(item_count: usize, rho: f64, beta: f64) -> Result<Self> {
		let params = SimulationParameters::new(rho, beta)?;
		Self::with_items(ItemSpace::new(item_count)?, params)
	}

	/// Start a simulation from a [`SimulationConfig`].
	///
	/// # Errors
	///
	/// Returns [`TcmError::InvalidParameter`] if the count, coefficients, or
	/// number of labels are invalid.
	pub fn from_config(config: SimulationConfig) -> Result<Self> {
		config.parameters.validate()?;
		let items = match config.labels {
			Some(labels) if labels.len() != config.item_count => {
				return Err(TcmError::InvalidParameter {
					name: "labels",
					value: labels.len().to_string(),
					expected: "exactly one label per item",
				});
			}
			Some(labels) => ItemSpace::with_labels(labels)?,
			None => ItemSpace::new(config.item_count)?,
		};
		Self::with_items(items, config.parameters)
	}

	fn with_items(items: ItemSpace, params: SimulationParameters) -> Result<Self> {
		let context = ContextState::new(items.len(), params)?;
		debug!(
			item_count = items.len(),
			rho = params.rho,
			beta = params.beta,
			"simulation configured"
		);
		Ok(Self {
			items,
			context,
			history: EncodingHistory::new(),
			probe: ProbeMode::EndOfList,
		})
	}

	/// The study items.
	#[must_use]
	pub const fn item_space(&self) -> &ItemSpace {
		&self.items
	}

	/// Active drift coefficients.
	#[must_use]
	pub const fn parameters(&self) -> SimulationParameters {
		self.context.parameters()
	}

	/// The current (most recent) context.
	#[must_use]
	pub fn current_context(&self) -> &[f64] {
		self.context.current()
	}

	/// Everything studied so far.
	#[must_use]
	pub const fn history(&self) -> &EncodingHistory {
		&self.history
	}

	/// Current probe anchor.
	#[must_use]
	pub const fn probe_mode(&self) -> ProbeMode {
		self.probe
	}

	/// Current phase of the run.
	#[must_use]
	pub fn state(&self) -> SimulationState {
		match self.probe {
			_ if self.history.is_empty() => SimulationState::Idle,
			ProbeMode::EndOfList => SimulationState::Presenting,
			ProbeMode::Reinstated(position) => SimulationState::Reinstated(position),
		}
	}

	/// Present an item and return the updated context.
	///
	/// The probe mode is left as it is: presenting while reinstated keeps
	/// the probe anchored at the recalled position.
	///
	/// # Errors
	///
	/// Returns [`TcmError::IndexOutOfRange`] if `index` is not an item.
	#[instrument(skip(self), fields(position = self.history.next_position()))]
	pub fn present_item(&mut self, index: usize) -> Result<Vec<f64>> {
		let input = self.items.vector_for(index)?;
		let position = self.history.next_position();
		let context = self.context.update(&input)?;

		if let Err(err) = self.history.append(index, &context, position) {
			warn!(%err, "history out of step with context");
			return Err(err);
		}

		debug!(item = index, position, "item presented");
		Ok(context)
	}

	/// Present several items in order and return the final context.
	///
	/// Every index is checked first; on error nothing is presented.
	///
	/// # Errors
	///
	/// Returns [`TcmError::IndexOutOfRange`] for the first invalid index.
	pub fn present_sequence(&mut self, indices: &[usize]) -> Result<Vec<f64>> {
		for &index in indices {
			let _ = self.items.check(index)?;
		}
		for &index in indices {
			let _ = self.present_item(index)?;
		}
		Ok(self.context.current().to_vec())
	}

	/// Reinstate the context studied at `position` and return the
	/// resulting activation profile.
	///
	/// Neither the context nor the history changes.
	///
	/// # Errors
	///
	/// Returns [`TcmError::IndexOutOfRange`] if nothing was studied at
	/// `position`.
	#[instrument(skip(self))]
	pub fn recall(&mut self, position: usize) -> Result<ActivationProfile> {
		let _ = self.history.get(position)?;
		self.probe = ProbeMode::Reinstated(position);
		debug!(position, "context reinstated");
		self.current_activations()
	}

	/// Anchor the probe back at the end of the list.
	pub fn reset_to_end_of_list(&mut self) {
		if self.probe != ProbeMode::EndOfList {
			debug!("probe returned to end of list");
		}
		self.probe = ProbeMode::EndOfList;
	}

	/// Clear context and history and return to the initial state.
	#[instrument(skip(self), fields(cleared = self.history.len()))]
	pub fn reset_all(&mut self) {
		self.context.reset();
		self.history.clear();
		self.probe = ProbeMode::EndOfList;
		debug!("simulation reset");
	}

	/// Activation of every studied item under the current probe.
	///
	/// # Errors
	///
	/// Returns [`TcmError::EmptyHistory`] if no item has been presented.
	pub fn current_activations(&self) -> Result<ActivationProfile> {
		let source = match self.probe {
			ProbeMode::EndOfList => self.history.latest().ok_or(TcmError::EmptyHistory)?,
			ProbeMode::Reinstated(position) => self.history.get(position)?,
		};

		Ok(ActivationProfile {
			probe_position: source.position,
			entries: activate(&source.snapshot, self.history.all())?,
		})
	}

	/// Change the drift coefficients for subsequent presentations.
	///
	/// # Errors
	///
	/// Returns [`TcmError::InvalidParameter`] if either value lies outside
	/// `[0, 1]`; the previous coefficients stay active.
	pub fn set_parameters(&mut self, rho: f64, beta: f64) -> Result<()> {
		if let Err(err) = self.context.set_parameters(rho, beta) {
			warn!(rho, beta, "rejected parameter change");
			return Err(err);
		}
		debug!(rho, beta, "parameters updated");
		Ok(())
	}
}
