//! Force simulation driving the node layout.
//!
//! The simulation owns node positions and velocities. Each [`Simulation::step`]
//! cools alpha toward its target, lets every registered [`Force`] adjust
//! velocities, then integrates positions. Pinned nodes ignore physics and sit
//! at their pinned coordinates.

use std::f64::consts::PI;

use log::debug;

use super::config::SimulationConfig;
use super::forces::{CenterForce, CollideForce, Force, LinkForce, ManyBodyForce};

const INITIAL_RADIUS: f64 = 10.0;

/// A node as seen by the physics engine.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SimNode {
	pub index: usize,
	pub x: f64,
	pub y: f64,
	pub vx: f64,
	pub vy: f64,
	/// Pinned x coordinate. While set, the node does not move horizontally.
	pub fx: Option<f64>,
	/// Pinned y coordinate.
	pub fy: Option<f64>,
}

impl SimNode {
	pub fn pin(&mut self, x: f64, y: f64) {
		self.fx = Some(x);
		self.fy = Some(y);
	}

	pub fn unpin(&mut self) {
		self.fx = None;
		self.fy = None;
	}

	pub fn is_pinned(&self) -> bool {
		self.fx.is_some() || self.fy.is_some()
	}
}

/// A link resolved to node indices.
#[derive(Clone, Debug, PartialEq)]
pub struct SimLink {
	pub index: usize,
	pub source: usize,
	pub target: usize,
	pub value: f64,
}

/// Iterative force-directed layout with alpha cooling.
pub struct Simulation {
	nodes: Vec<SimNode>,
	forces: Vec<(&'static str, Box<dyn Force>)>,
	alpha: f64,
	alpha_min: f64,
	alpha_decay: f64,
	alpha_target: f64,
	velocity_decay: f64,
	running: bool,
}

impl Simulation {
	/// Create a simulation for `count` nodes with no forces, placed on a
	/// phyllotaxis spiral around the origin.
	pub fn new(count: usize, config: &SimulationConfig) -> Self {
		let golden_angle = PI * (3.0 - 5.0_f64.sqrt());
		let nodes = (0..count)
			.map(|index| {
				let radius = INITIAL_RADIUS * (0.5 + index as f64).sqrt();
				let angle = index as f64 * golden_angle;
				SimNode {
					index,
					x: radius * angle.cos(),
					y: radius * angle.sin(),
					..SimNode::default()
				}
			})
			.collect();

		Self {
			nodes,
			forces: Vec::new(),
			alpha: 1.0,
			alpha_min: config.alpha_min,
			alpha_decay: config.alpha_decay,
			alpha_target: 0.0,
			velocity_decay: config.velocity_decay,
			running: true,
		}
	}

	/// Create a simulation with the standard link, charge, center and collide
	/// forces, centered on `(center_x, center_y)`.
	pub fn with_default_forces(
		count: usize,
		links: Vec<SimLink>,
		center_x: f64,
		center_y: f64,
		config: &SimulationConfig,
	) -> Self {
		let mut simulation = Self::new(count, config);
		simulation.set_force("link", LinkForce::new(links, config.link_distance));
		simulation.set_force("charge", ManyBodyForce::new(config.charge_strength));
		simulation.set_force("center", CenterForce::new(center_x, center_y));
		simulation.set_force("collision", CollideForce::new(config.collide_radius));
		simulation
	}

	/// Register a force under `name`, replacing any force with the same name.
	pub fn set_force(&mut self, name: &'static str, force: impl Force + 'static) {
		let mut force: Box<dyn Force> = Box::new(force);
		force.initialize(&self.nodes);
		match self.forces.iter_mut().find(|(n, _)| *n == name) {
			Some(slot) => slot.1 = force,
			None => self.forces.push((name, force)),
		}
	}

	/// Advance the layout by one step, regardless of whether the simulation is
	/// running.
	pub fn step(&mut self) {
		self.alpha += (self.alpha_target - self.alpha) * self.alpha_decay;

		for (_, force) in &mut self.forces {
			force.apply(&mut self.nodes, self.alpha);
		}

		let retain = 1.0 - self.velocity_decay;
		for node in &mut self.nodes {
			match node.fx {
				Some(fx) => {
					node.x = fx;
					node.vx = 0.0;
				}
				None => {
					node.vx *= retain;
					node.x += node.vx;
				}
			}
			match node.fy {
				Some(fy) => {
					node.y = fy;
					node.vy = 0.0;
				}
				None => {
					node.vy *= retain;
					node.y += node.vy;
				}
			}
		}
	}

	/// Timer callback. Steps the layout if running and stops once alpha has
	/// cooled below `alpha_min`. Returns whether a step was taken.
	pub fn tick(&mut self) -> bool {
		if !self.running {
			return false;
		}
		self.step();
		if self.alpha < self.alpha_min {
			self.running = false;
			debug!("avatar-graph: simulation settled");
		}
		true
	}

	/// Resume ticking after the simulation has settled.
	pub fn restart(&mut self) {
		self.running = true;
	}

	pub fn is_running(&self) -> bool {
		self.running
	}

	pub fn alpha(&self) -> f64 {
		self.alpha
	}

	pub fn set_alpha(&mut self, alpha: f64) {
		self.alpha = alpha;
	}

	pub fn alpha_target(&self) -> f64 {
		self.alpha_target
	}

	pub fn set_alpha_target(&mut self, target: f64) {
		self.alpha_target = target;
	}

	pub fn nodes(&self) -> &[SimNode] {
		&self.nodes
	}

	pub fn node(&self, index: usize) -> Option<&SimNode> {
		self.nodes.get(index)
	}

	pub fn node_mut(&mut self, index: usize) -> Option<&mut SimNode> {
		self.nodes.get_mut(index)
	}
}
