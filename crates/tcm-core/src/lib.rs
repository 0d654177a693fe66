//! # TCM Core
//!
//! Simulation engine for the Temporal Context Model (TCM) of episodic memory.
//!
//! ## Why Temporal Context?
//!
//! In free recall people do not retrieve a studied list at random. Two
//! regularities dominate:
//!
//! - **Recency** - the last few items come out first and most often
//! - **Contiguity** - recalling one item brings up its neighbors from the list
//!
//! TCM explains both with a single idea: a slowly drifting internal context.
//! Every item is bound to the context that was active when it was studied,
//! and the current context acts as the retrieval cue.
//!
//! ## Core Concepts
//!
//! ### Drift
//!
//! Each presented item pushes the context a step further:
//! ```text
//! c_t = ρ · c_{t-1} + β · f_t
//! ```
//!
//! ### Encoding
//!
//! The context after each presentation is stored with the item as an
//! immutable snapshot, in serial-position order.
//!
//! ### Activation
//!
//! A probe context is compared with every snapshot:
//! ```text
//! a_i = p · c_i
//! ```
//! Probing with the end-of-list context gives recency; reinstating the
//! context of a recalled item gives contiguity.
//!
//! ## Example
//!
//! ```rust
//! use tcm_core::Simulation;
//!
//! let mut sim = Simulation::configure(6, 0.6, 0.8)?;
//! sim.present_sequence(&[0, 1, 2, 3, 4, 5])?;
//!
//! // End-of-list probe: recency
//! let profile = sim.current_activations()?;
//! assert_eq!(profile.strongest(1)[0].position, 5);
//!
//! // Reinstate the third item: its neighbors light up
//! let profile = sim.recall(2)?;
//! let a = profile.activations();
//! assert!(a[1] > a[0] && a[3] > a[5]);
//! # Ok::<(), tcm_core::TcmError>(())
//! ```
//!
//! ## References
//!
//! - Howard, M. W., & Kahana, M. J. (2002). *A distributed representation of
//!   temporal context* - The original TCM
//! - Kahana, M. J. (2012). *Foundations of Human Memory* - Memory models

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod activation;
pub mod context;
pub mod error;
pub mod history;
pub mod item;
pub mod simulation;

pub use activation::{activate, dot, magnitude, ActivationEntry, ActivationProfile};
pub use context::{ContextState, SimulationParameters};
pub use error::{Result, TcmError};
pub use history::{EncodingHistory, EncodingRecord};
pub use item::{checked_index, ItemSpace};
pub use simulation::{ProbeMode, Simulation, SimulationConfig, SimulationState};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
