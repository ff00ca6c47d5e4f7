//! Simulation and component configuration.
//!
//! Every field has a default, so a page only needs to override what it wants to
//! change. Overrides are read as JSON (see [`GraphConfig::from_json`]).

use serde::Deserialize;

/// Physics parameters for the layout simulation.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
	/// Target separation of linked nodes.
	pub link_distance: f64,
	/// Many-body strength. Negative values repel.
	pub charge_strength: f64,
	/// Collision radius of each node.
	pub collide_radius: f64,
	/// The simulation stops once alpha falls below this.
	pub alpha_min: f64,
	/// Fraction of the remaining distance to the alpha target covered each tick.
	pub alpha_decay: f64,
	/// Fraction of velocity lost each tick.
	pub velocity_decay: f64,
	/// Alpha target held while at least one node is being dragged.
	pub drag_alpha_target: f64,
}

impl Default for SimulationConfig {
	fn default() -> Self {
		let alpha_min: f64 = 0.001;
		Self {
			link_distance: 100.0,
			charge_strength: -1000.0,
			collide_radius: 50.0,
			alpha_min,
			// Cools from 1.0 to alpha_min in 300 ticks.
			alpha_decay: 1.0 - alpha_min.powf(1.0 / 300.0),
			velocity_decay: 0.4,
			drag_alpha_target: 0.3,
		}
	}
}

/// Top-level configuration for the graph page.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
	/// Relative URL of the dataset.
	pub data_url: String,
	/// Pixel offset of the info panel from the clicked node.
	pub info_offset: f64,
	/// Name of a built-in theme.
	pub theme: String,
	pub simulation: SimulationConfig,
}

impl Default for GraphConfig {
	fn default() -> Self {
		Self {
			data_url: "miserables.json".to_string(),
			info_offset: 20.0,
			theme: "default".to_string(),
			simulation: SimulationConfig::default(),
		}
	}
}

impl GraphConfig {
	/// Parse a (possibly partial) JSON override on top of the defaults.
	pub fn from_json(json: &str) -> serde_json::Result<Self> {
		serde_json::from_str(json)
	}
}
