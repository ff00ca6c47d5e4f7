//! Graph state and interaction handling.
//!
//! [`GraphState`] is the renderer's model: it owns the physics simulation, the
//! scene geometry derived from it, drag tracking, and the info panel. The
//! component forwards DOM events to its methods and publishes the scene and
//! panel to the view after each change.

use std::collections::HashMap;

use log::{debug, warn};

use super::config::GraphConfig;
use super::drag::{self, DragTracker};
use super::forces::CenterForce;
use super::info::InfoPanel;
use super::scene::Scene;
use super::simulation::{SimLink, Simulation};
use super::types::{GraphData, GraphNode};

/// Resolve links to node indices. Links naming unknown nodes are dropped.
pub fn resolve_links(data: &GraphData) -> Vec<SimLink> {
	let id_to_idx: HashMap<&str, usize> = data
		.nodes
		.iter()
		.enumerate()
		.map(|(i, node)| (node.id.as_str(), i))
		.collect();

	let mut links = Vec::with_capacity(data.links.len());
	for link in &data.links {
		match (
			id_to_idx.get(link.source.as_str()),
			id_to_idx.get(link.target.as_str()),
		) {
			(Some(&source), Some(&target)) => links.push(SimLink {
				index: links.len(),
				source,
				target,
				value: link.value,
			}),
			_ => warn!(
				"avatar-graph: skipping link {} -> {}: unknown node",
				link.source, link.target
			),
		}
	}
	links
}

/// Core graph state combining physics simulation with interaction tracking.
///
/// Created once when the component mounts, then mutated by the animation loop
/// and by pointer events.
pub struct GraphState {
	pub simulation: Simulation,
	pub scene: Scene,
	pub info: InfoPanel,
	pub drag: DragTracker,
	nodes: Vec<GraphNode>,
	config: GraphConfig,
}

impl GraphState {
	pub fn new(data: &GraphData, width: f64, height: f64, config: &GraphConfig) -> Self {
		let links = resolve_links(data);
		let scene = Scene::new(width, height, &data.nodes, &links);
		let simulation = Simulation::with_default_forces(
			data.nodes.len(),
			links,
			width / 2.0,
			height / 2.0,
			&config.simulation,
		);

		let mut state = Self {
			simulation,
			scene,
			info: InfoPanel::default(),
			drag: DragTracker::default(),
			nodes: data.nodes.clone(),
			config: config.clone(),
		};
		state.scene.sync(state.simulation.nodes());
		state
	}

	/// Advance the simulation by one tick and sync the scene.
	/// Returns whether anything moved.
	pub fn tick(&mut self) -> bool {
		if !self.simulation.tick() {
			return false;
		}
		self.scene.sync(self.simulation.nodes());
		true
	}

	pub fn drag_start(&mut self, pointer: i32, node: usize, x: f64, y: f64) {
		let Some(sim_node) = self.simulation.node(node) else {
			return;
		};
		let node_pos = (sim_node.x, sim_node.y);
		let event = self.drag.begin(pointer, node, node_pos, (x, y));
		drag::apply(&event, &mut self.simulation, self.config.simulation.drag_alpha_target);
		debug!(
			"avatar-graph: drag start on {}",
			self.nodes.get(node).map_or("?", |n| n.id.as_str())
		);
	}

	pub fn drag_move(&mut self, pointer: i32, x: f64, y: f64) {
		if let Some(event) = self.drag.motion(pointer, (x, y)) {
			drag::apply(&event, &mut self.simulation, self.config.simulation.drag_alpha_target);
		}
	}

	pub fn drag_end(&mut self, pointer: i32) {
		if let Some(event) = self.drag.finish(pointer) {
			drag::apply(&event, &mut self.simulation, self.config.simulation.drag_alpha_target);
			debug!("avatar-graph: drag end, {} still active", event.active);
		}
	}

	/// End every gesture in progress, e.g. when the pointer leaves the surface.
	pub fn drag_cancel_all(&mut self) {
		while let Some(pointer) = self.drag.first_pointer() {
			self.drag_end(pointer);
		}
	}

	/// Any new press forgets a pending click suppression.
	pub fn pointer_down(&mut self) {
		self.drag.clear_click_suppression();
	}

	/// Show the info panel for `node`, unless this click ends a drag.
	pub fn click_node(&mut self, node: usize) {
		if self.drag.take_click_suppression() {
			return;
		}
		let (Some(meta), Some(sim_node)) = (self.nodes.get(node), self.simulation.node(node))
		else {
			return;
		};
		self.info.show(
			&meta.id,
			meta.info.as_deref(),
			sim_node.x,
			sim_node.y,
			self.config.info_offset,
		);
		debug!("avatar-graph: showing {:?}", self.info.text());
	}

	/// Hide the info panel when the click landed outside every node group.
	pub fn click_background(&mut self, inside_node: bool) {
		if self.drag.take_click_suppression() {
			return;
		}
		if !inside_node {
			self.info.hide();
		}
	}

	/// Follow a new surface size: re-center the layout and let it settle again.
	pub fn resize(&mut self, width: f64, height: f64) {
		self.scene.resize(width, height);
		self.simulation
			.set_force("center", CenterForce::new(width / 2.0, height / 2.0));
		self.simulation.set_alpha(self.config.simulation.drag_alpha_target);
		self.simulation.restart();
		debug!("avatar-graph: resized to {width}x{height}");
	}

	pub fn node_count(&self) -> usize {
		self.nodes.len()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::force_graph::drag::MOUSE_POINTER;
	use crate::components::force_graph::types::parse_graph_data;

	fn example() -> GraphData {
		parse_graph_data(
			r#"{
				"nodes": [
					{"id": "A", "image": "a.png", "info": "Alpha"},
					{"id": "B", "image": "b.png"}
				],
				"links": [{"source": "A", "target": "B", "value": 4}]
			}"#,
		)
		.unwrap()
	}

	fn state() -> GraphState {
		GraphState::new(&example(), 800.0, 600.0, &GraphConfig::default())
	}

	fn assert_scene_matches_simulation(state: &GraphState) {
		let nodes = state.simulation.nodes();
		for (group, node) in state.scene.nodes.iter().zip(nodes) {
			assert_eq!((group.x, group.y), (node.x, node.y));
			assert_eq!(group.transform(), format!("translate({}, {})", node.x, node.y));
		}
		for line in &state.scene.lines {
			let (s, t) = (&nodes[line.source], &nodes[line.target]);
			assert_eq!((line.x1, line.y1, line.x2, line.y2), (s.x, s.y, t.x, t.y));
		}
	}

	#[test]
	fn example_dataset_builds_expected_scene() {
		let state = state();
		assert_eq!(state.scene.lines.len(), 1);
		assert_eq!(state.scene.lines[0].stroke_width, 2.0);
		assert_eq!(state.scene.nodes.len(), 2);
		assert_eq!(state.scene.nodes[0].id, "A");
		assert_eq!(state.scene.nodes[1].id, "B");
		assert_eq!(state.node_count(), 2);
	}

	#[test]
	fn unresolved_links_are_skipped() {
		let mut data = example();
		data.links.push(crate::components::force_graph::types::GraphLink {
			source: "A".into(),
			target: "Z".into(),
			value: 1.0,
		});
		let links = resolve_links(&data);
		assert_eq!(links.len(), 1);
		assert_eq!((links[0].source, links[0].target), (0, 1));

		let state = GraphState::new(&data, 800.0, 600.0, &GraphConfig::default());
		assert_eq!(state.scene.lines.len(), 1);
	}

	#[test]
	fn scene_tracks_simulation_every_tick() {
		let mut state = state();
		for _ in 0..50 {
			assert!(state.tick());
			assert_scene_matches_simulation(&state);
		}
	}

	#[test]
	fn tick_reports_rest() {
		let mut state = state();
		while state.tick() {}
		assert!(!state.simulation.is_running());
		assert!(!state.tick());
	}

	#[test]
	fn drag_and_release_returns_node_to_physics() {
		let mut state = state();
		let (x, y) = (state.scene.nodes[0].x, state.scene.nodes[0].y);
		state.drag_start(MOUSE_POINTER, 0, x, y);
		state.drag_move(MOUSE_POINTER, 300.0, 250.0);
		state.tick();

		assert_eq!((state.scene.nodes[0].x, state.scene.nodes[0].y), (300.0, 250.0));
		assert!(state.simulation.node(0).unwrap().is_pinned());

		state.drag_end(MOUSE_POINTER);
		assert!(!state.simulation.node(0).unwrap().is_pinned());
		assert_eq!(state.simulation.alpha_target(), 0.0);
	}

	#[test]
	fn drag_restarts_settled_simulation() {
		let mut state = state();
		while state.tick() {}
		state.drag_start(MOUSE_POINTER, 1, 0.0, 0.0);
		assert!(state.simulation.is_running());
		assert!(state.tick());
	}

	#[test]
	fn cancel_all_releases_every_gesture() {
		let mut state = state();
		state.drag_start(1, 0, 0.0, 0.0);
		state.drag_start(2, 1, 0.0, 0.0);
		state.drag_cancel_all();

		assert!(!state.drag.is_dragging());
		assert!(state.simulation.nodes().iter().all(|n| !n.is_pinned()));
		assert_eq!(state.simulation.alpha_target(), 0.0);
	}

	#[test]
	fn clicking_node_shows_its_info() {
		let mut state = state();
		state.tick();
		state.click_node(0);

		let node = state.simulation.node(0).unwrap();
		assert!(state.info.visible);
		assert_eq!(state.info.node_id, "A");
		assert_eq!(state.info.info, "Alpha");
		assert_eq!((state.info.left, state.info.top), (node.x + 20.0, node.y + 20.0));

		state.click_node(1);
		assert_eq!(state.info.node_id, "B");
		assert!(state.info.text().contains("No additional info available."));
	}

	#[test]
	fn background_click_hides_panel() {
		let mut state = state();
		state.click_node(0);
		state.click_background(true);
		assert!(state.info.visible);

		state.click_background(false);
		assert!(!state.info.visible);
	}

	#[test]
	fn click_ending_a_drag_is_ignored() {
		let mut state = state();
		state.drag_start(MOUSE_POINTER, 0, 0.0, 0.0);
		state.drag_move(MOUSE_POINTER, 10.0, 10.0);
		state.drag_end(MOUSE_POINTER);
		state.click_node(0);
		assert!(!state.info.visible);

		state.pointer_down();
		state.click_node(0);
		assert!(state.info.visible);
	}

	#[test]
	fn resize_recenters_and_reheats() {
		let mut state = state();
		while state.tick() {}
		state.resize(1000.0, 400.0);

		assert_eq!(state.scene.view_box(), "0 0 1000 400");
		assert!(state.simulation.is_running());
		while state.tick() {}

		let nodes = state.simulation.nodes();
		let cx = nodes.iter().map(|n| n.x).sum::<f64>() / nodes.len() as f64;
		let cy = nodes.iter().map(|n| n.y).sum::<f64>() / nodes.len() as f64;
		assert!((cx - 500.0).abs() < 1e-3);
		assert!((cy - 200.0).abs() < 1e-3);
	}
}
