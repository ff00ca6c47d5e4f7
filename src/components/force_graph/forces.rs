//! Forces acting on simulation nodes.
//!
//! A [`Force`] reads node positions and nudges velocities (or, for centering,
//! positions directly). Forces are registered by name on the
//! [`Simulation`](super::simulation::Simulation) and applied in registration
//! order each step.

use super::simulation::{SimLink, SimNode};

/// Squared distance below which many-body repulsion stops growing.
const DISTANCE_MIN2: f64 = 1.0;

/// A pluggable physics force.
pub trait Force {
	/// Called whenever the force is attached to a simulation.
	fn initialize(&mut self, _nodes: &[SimNode]) {}

	/// Apply the force for one step at the given alpha.
	fn apply(&mut self, nodes: &mut [SimNode], alpha: f64);
}

/// Deterministic source of tiny displacements used when two nodes coincide.
///
/// Linear congruential generator, so layouts are reproducible across runs.
#[derive(Clone, Debug)]
pub struct Jiggle {
	state: u32,
}

impl Default for Jiggle {
	fn default() -> Self {
		Self { state: 1 }
	}
}

impl Jiggle {
	fn next_unit(&mut self) -> f64 {
		self.state = self.state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
		self.state as f64 / 4_294_967_296.0
	}

	/// A value in `(-5e-7, 5e-7)`.
	pub fn next(&mut self) -> f64 {
		(self.next_unit() - 0.5) * 1e-6
	}
}

/// Spring force pulling linked nodes toward a target distance.
///
/// Each link's strength is `1 / min(degree(source), degree(target))`, so
/// heavily connected nodes are not yanked around by each of their links. The
/// correction is split between the endpoints in proportion to their degree.
pub struct LinkForce {
	links: Vec<SimLink>,
	distance: f64,
	iterations: usize,
	strengths: Vec<f64>,
	bias: Vec<f64>,
	jiggle: Jiggle,
}

impl LinkForce {
	pub fn new(links: Vec<SimLink>, distance: f64) -> Self {
		Self {
			links,
			distance,
			iterations: 1,
			strengths: Vec::new(),
			bias: Vec::new(),
			jiggle: Jiggle::default(),
		}
	}

}

impl Force for LinkForce {
	fn initialize(&mut self, nodes: &[SimNode]) {
		self.links
			.retain(|link| link.source < nodes.len() && link.target < nodes.len());

		let mut degree = vec![0usize; nodes.len()];
		for link in &self.links {
			degree[link.source] += 1;
			degree[link.target] += 1;
		}

		self.strengths = self
			.links
			.iter()
			.map(|link| 1.0 / degree[link.source].min(degree[link.target]) as f64)
			.collect();
		self.bias = self
			.links
			.iter()
			.map(|link| {
				let source = degree[link.source] as f64;
				source / (source + degree[link.target] as f64)
			})
			.collect();
	}

	fn apply(&mut self, nodes: &mut [SimNode], alpha: f64) {
		for _ in 0..self.iterations {
			for (i, link) in self.links.iter().enumerate() {
				let (source, target) = (&nodes[link.source], &nodes[link.target]);
				let mut x = target.x + target.vx - source.x - source.vx;
				let mut y = target.y + target.vy - source.y - source.vy;
				if x == 0.0 {
					x = self.jiggle.next();
				}
				if y == 0.0 {
					y = self.jiggle.next();
				}

				let l = (x * x + y * y).sqrt();
				let l = (l - self.distance) / l * alpha * self.strengths[i];
				x *= l;
				y *= l;

				let b = self.bias[i];
				let target = &mut nodes[link.target];
				target.vx -= x * b;
				target.vy -= y * b;
				let source = &mut nodes[link.source];
				source.vx += x * (1.0 - b);
				source.vy += y * (1.0 - b);
			}
		}
	}
}

/// Pairwise charge between all nodes. Negative strength repels.
///
/// Computed exactly over all pairs; the graphs this renders are small enough
/// that a spatial tree would cost more than it saves.
pub struct ManyBodyForce {
	strength: f64,
	jiggle: Jiggle,
}

impl ManyBodyForce {
	pub fn new(strength: f64) -> Self {
		Self {
			strength,
			jiggle: Jiggle::default(),
		}
	}
}

impl Force for ManyBodyForce {
	fn apply(&mut self, nodes: &mut [SimNode], alpha: f64) {
		for i in 0..nodes.len() {
			let (xi, yi) = (nodes[i].x, nodes[i].y);
			let (mut dvx, mut dvy) = (0.0, 0.0);

			for (j, other) in nodes.iter().enumerate() {
				if i == j {
					continue;
				}
				let mut x = other.x - xi;
				let mut y = other.y - yi;
				if x == 0.0 {
					x = self.jiggle.next();
				}
				if y == 0.0 {
					y = self.jiggle.next();
				}

				let mut l = x * x + y * y;
				if l < DISTANCE_MIN2 {
					l = (DISTANCE_MIN2 * l).sqrt();
				}
				let w = self.strength * alpha / l;
				dvx += x * w;
				dvy += y * w;
			}

			nodes[i].vx += dvx;
			nodes[i].vy += dvy;
		}
	}
}

/// Translates all nodes so their centroid sits on a fixed point.
///
/// Moves positions rather than velocities and ignores alpha, so it never adds
/// energy to the layout.
pub struct CenterForce {
	x: f64,
	y: f64,
	strength: f64,
}

impl CenterForce {
	pub fn new(x: f64, y: f64) -> Self {
		Self { x, y, strength: 1.0 }
	}
}

impl Force for CenterForce {
	fn apply(&mut self, nodes: &mut [SimNode], _alpha: f64) {
		if nodes.is_empty() {
			return;
		}
		let n = nodes.len() as f64;
		let sx = (nodes.iter().map(|node| node.x).sum::<f64>() / n - self.x) * self.strength;
		let sy = (nodes.iter().map(|node| node.y).sum::<f64>() / n - self.y) * self.strength;
		for node in nodes {
			node.x -= sx;
			node.y -= sy;
		}
	}
}

/// Treats nodes as circles of a fixed radius and pushes overlapping pairs apart.
pub struct CollideForce {
	radius: f64,
	strength: f64,
	iterations: usize,
	jiggle: Jiggle,
}

impl CollideForce {
	pub fn new(radius: f64) -> Self {
		Self {
			radius,
			strength: 1.0,
			iterations: 1,
			jiggle: Jiggle::default(),
		}
	}
}

impl Force for CollideForce {
	fn apply(&mut self, nodes: &mut [SimNode], _alpha: f64) {
		let (ri, rj) = (self.radius, self.radius);
		let r = ri + rj;
		// Share of the correction taken by the first node of a pair.
		let share = rj * rj / (ri * ri + rj * rj);

		for _ in 0..self.iterations {
			for i in 0..nodes.len() {
				let xi = nodes[i].x + nodes[i].vx;
				let yi = nodes[i].y + nodes[i].vy;

				for j in (i + 1)..nodes.len() {
					let mut x = xi - nodes[j].x - nodes[j].vx;
					let mut y = yi - nodes[j].y - nodes[j].vy;
					let mut l = x * x + y * y;
					if l >= r * r {
						continue;
					}

					if x == 0.0 {
						x = self.jiggle.next();
						l += x * x;
					}
					if y == 0.0 {
						y = self.jiggle.next();
						l += y * y;
					}
					let l = l.sqrt();
					let l = (r - l) / l * self.strength;
					x *= l;
					y *= l;

					nodes[i].vx += x * share;
					nodes[i].vy += y * share;
					nodes[j].vx -= x * (1.0 - share);
					nodes[j].vy -= y * (1.0 - share);
				}
			}
		}
	}
}
