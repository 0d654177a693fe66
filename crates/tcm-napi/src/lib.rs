//! Node.js bindings for the tcm-core simulation engine.
//!
//! Exposes a stateful `TcmSimulation` class so a JavaScript presentation
//! layer (sliders, charts, step navigation) can drive one study-test run.

// napi-rs requires owned types at the FFI boundary - can't use references
#![allow(clippy::needless_pass_by_value)]
// List positions and item indices will never exceed u32::MAX in practice
#![allow(clippy::cast_possible_truncation)]

use napi::bindgen_prelude::*;
use napi_derive::napi;

use tcm_core::{
	checked_index, ActivationProfile, ProbeMode, Simulation, SimulationConfig,
	SimulationParameters, TcmError,
};

// ============================================================================
// JS Types
// ============================================================================

/// Activation of one studied item.
#[napi(object)]
pub struct JsActivationEntry {
	/// Item index
	pub item: u32,
	/// Item label
	pub label: String,
	/// Serial position
	pub position: u32,
	/// Dot product of probe and stored context
	pub activation: f64,
}

/// Activation profile in serial-position order.
#[napi(object)]
pub struct JsActivationProfile {
	/// Position whose context served as the probe
	pub probe_position: u32,
	/// One entry per studied item
	pub entries: Vec<JsActivationEntry>,
}

/// A studied item and the context it was bound to.
#[napi(object)]
pub struct JsEncodingRecord {
	/// Item index
	pub item: u32,
	/// Item label
	pub label: String,
	/// Serial position
	pub position: u32,
	/// Context snapshot
	pub snapshot: Vec<f64>,
}

/// Current probe anchor.
#[napi(object)]
pub struct JsProbeMode {
	/// `"endOfList"` or `"reinstated"`
	pub mode: String,
	/// Reinstated position, if any
	pub position: Option<u32>,
}

/// Drift coefficients.
#[napi(object)]
pub struct JsParameters {
	/// Decay of the previous context
	pub rho: f64,
	/// Strength of the incoming item
	pub beta: f64,
}

fn to_napi_error(err: TcmError) -> Error {
	let status = if err.is_caller_error() {
		Status::InvalidArg
	} else {
		Status::GenericFailure
	};
	Error::new(status, err.to_string())
}

// ============================================================================
// Simulation Class
// ============================================================================

/// One temporal context simulation.
#[napi]
pub struct TcmSimulation {
	inner: Simulation,
}

#[napi]
impl TcmSimulation {
	/// Create a simulation over `itemCount` items.
	///
	/// # Arguments
	///
	/// * `item_count` - Number of study items (must be > 0)
	/// * `rho` - Context decay in [0, 1]
	/// * `beta` - Input strength in [0, 1]
	/// * `labels` - Optional display label per item
	#[napi(constructor)]
	pub fn new(item_count: u32, rho: f64, beta: f64, labels: Option<Vec<String>>) -> Result<Self> {
		let config = SimulationConfig {
			item_count: item_count as usize,
			parameters: SimulationParameters { rho, beta },
			labels,
		};
		let inner = Simulation::from_config(config).map_err(to_napi_error)?;
		Ok(Self { inner })
	}

	/// Present an item and return the new context.
	#[napi]
	pub fn present_item(&mut self, index: i64) -> Result<Vec<f64>> {
		let index = checked_index(index, self.inner.item_space().len()).map_err(to_napi_error)?;
		self.inner.present_item(index).map_err(to_napi_error)
	}

	/// Present several items in order and return the final context.
	///
	/// Nothing is presented if any index is invalid.
	#[napi]
	pub fn present_sequence(&mut self, indices: Vec<i64>) -> Result<Vec<f64>> {
		let item_count = self.inner.item_space().len();
		let indices = indices
			.into_iter()
			.map(|raw| checked_index(raw, item_count))
			.collect::<tcm_core::Result<Vec<usize>>>()
			.map_err(to_napi_error)?;
		self.inner.present_sequence(&indices).map_err(to_napi_error)
	}

	/// Reinstate the context studied at `position` and return activations.
	#[napi]
	pub fn recall(&mut self, position: i64) -> Result<JsActivationProfile> {
		let position =
			checked_index(position, self.inner.history().len()).map_err(to_napi_error)?;
		let profile = self.inner.recall(position).map_err(to_napi_error)?;
		self.to_js_profile(profile)
	}

	/// Probe at the end of the list again (history is kept).
	#[napi]
	pub fn reset_to_end_of_list(&mut self) {
		self.inner.reset_to_end_of_list();
	}

	/// Clear context and history.
	#[napi]
	pub fn reset_all(&mut self) {
		self.inner.reset_all();
	}

	/// Activations under the current probe.
	#[napi]
	pub fn current_activations(&self) -> Result<JsActivationProfile> {
		let profile = self.inner.current_activations().map_err(to_napi_error)?;
		self.to_js_profile(profile)
	}

	/// Recall probabilities under the Luce choice rule.
	#[napi]
	pub fn choice_probabilities(&self, temperature: f64) -> Result<Vec<f64>> {
		self.inner
			.current_activations()
			.and_then(|profile| profile.choice_probabilities(temperature))
			.map_err(to_napi_error)
	}

	/// Change drift coefficients for later presentations.
	#[napi]
	pub fn set_parameters(&mut self, rho: f64, beta: f64) -> Result<()> {
		self.inner.set_parameters(rho, beta).map_err(to_napi_error)
	}

	/// Active drift coefficients.
	#[napi]
	pub fn parameters(&self) -> JsParameters {
		let SimulationParameters { rho, beta } = self.inner.parameters();
		JsParameters { rho, beta }
	}

	/// The current context vector.
	#[napi]
	pub fn current_context(&self) -> Vec<f64> {
		self.inner.current_context().to_vec()
	}

	/// Every studied item in serial-position order.
	#[napi]
	pub fn history(&self) -> Result<Vec<JsEncodingRecord>> {
		self.inner
			.history()
			.all()
			.iter()
			.map(|record| {
				Ok(JsEncodingRecord {
					item: record.item as u32,
					label: self.label(record.item)?,
					position: record.position as u32,
					snapshot: record.snapshot.clone(),
				})
			})
			.collect()
	}

	/// Current probe anchor.
	#[napi]
	pub fn probe_mode(&self) -> JsProbeMode {
		match self.inner.probe_mode() {
			ProbeMode::EndOfList => JsProbeMode {
				mode: "endOfList".to_string(),
				position: None,
			},
			ProbeMode::Reinstated(position) => JsProbeMode {
				mode: "reinstated".to_string(),
				position: Some(position as u32),
			},
		}
	}
}

impl TcmSimulation {
	fn label(&self, item: usize) -> Result<String> {
		self.inner
			.item_space()
			.label(item)
			.map(str::to_string)
			.map_err(to_napi_error)
	}

	fn to_js_profile(&self, profile: ActivationProfile) -> Result<JsActivationProfile> {
		let entries = profile
			.entries
			.into_iter()
			.map(|entry| {
				Ok(JsActivationEntry {
					item: entry.item as u32,
					label: self.label(entry.item)?,
					position: entry.position as u32,
					activation: entry.activation,
				})
			})
			.collect::<Result<Vec<_>>>()?;

		Ok(JsActivationProfile {
			probe_position: profile.probe_position as u32,
			entries,
		})
	}
}

/// Dot product of two vectors of equal length.
#[napi]
pub fn dot(a: Vec<f64>, b: Vec<f64>) -> Result<f64> {
	tcm_core::dot(&a, &b).map_err(to_napi_error)
}

/// Euclidean length of a vector.
#[napi]
pub fn magnitude(v: Vec<f64>) -> f64 {
	tcm_core::magnitude(&v)
}
