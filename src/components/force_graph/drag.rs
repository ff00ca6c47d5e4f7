//! Drag gesture tracking.
//!
//! [`DragTracker`] turns raw pointer input (mouse or individual touches) into
//! start/drag/end [`DragEvent`]s, and [`apply`] feeds those events into the
//! simulation: pin the node while it is held, reheat the layout while any
//! gesture is active, and hand the node back to physics on release.

use super::simulation::Simulation;

/// Pointer id used for the mouse. Touch gestures use their touch identifier.
pub const MOUSE_POINTER: i32 = -1;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragPhase {
	Start,
	Drag,
	End,
}

/// One step of a drag gesture.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragEvent {
	pub phase: DragPhase,
	/// Index of the dragged node.
	pub node: usize,
	/// Drag position: the pointer plus the grab offset recorded at start.
	pub x: f64,
	pub y: f64,
	/// Number of other gestures active when this event fired.
	pub active: usize,
}

#[derive(Clone, Debug)]
struct Gesture {
	pointer: i32,
	node: usize,
	dx: f64,
	dy: f64,
	x: f64,
	y: f64,
	moved: bool,
}

/// Tracks in-progress drag gestures, keyed by pointer id.
#[derive(Clone, Debug, Default)]
pub struct DragTracker {
	gestures: Vec<Gesture>,
	suppress_click: bool,
}

impl DragTracker {
	/// Begin a gesture on `node`, currently at `node_pos`, grabbed at `pointer_pos`.
	///
	/// A gesture already registered for the same pointer is replaced.
	pub fn begin(
		&mut self,
		pointer: i32,
		node: usize,
		node_pos: (f64, f64),
		pointer_pos: (f64, f64),
	) -> DragEvent {
		self.gestures.retain(|g| g.pointer != pointer);
		self.suppress_click = false;

		let active = self.gestures.len();
		self.gestures.push(Gesture {
			pointer,
			node,
			dx: node_pos.0 - pointer_pos.0,
			dy: node_pos.1 - pointer_pos.1,
			x: node_pos.0,
			y: node_pos.1,
			moved: false,
		});

		DragEvent {
			phase: DragPhase::Start,
			node,
			x: node_pos.0,
			y: node_pos.1,
			active,
		}
	}

	/// Pointer moved. Returns `None` if the pointer is not dragging anything.
	pub fn motion(&mut self, pointer: i32, pointer_pos: (f64, f64)) -> Option<DragEvent> {
		let active = self.gestures.len();
		let gesture = self.gestures.iter_mut().find(|g| g.pointer == pointer)?;
		gesture.x = pointer_pos.0 + gesture.dx;
		gesture.y = pointer_pos.1 + gesture.dy;
		gesture.moved = true;

		Some(DragEvent {
			phase: DragPhase::Drag,
			node: gesture.node,
			x: gesture.x,
			y: gesture.y,
			active,
		})
	}

	/// Pointer released. Returns `None` if the pointer was not dragging anything.
	pub fn finish(&mut self, pointer: i32) -> Option<DragEvent> {
		let pos = self.gestures.iter().position(|g| g.pointer == pointer)?;
		let gesture = self.gestures.remove(pos);
		if gesture.moved {
			self.suppress_click = true;
		}

		Some(DragEvent {
			phase: DragPhase::End,
			node: gesture.node,
			x: gesture.x,
			y: gesture.y,
			active: self.gestures.len(),
		})
	}

	pub fn is_dragging(&self) -> bool {
		!self.gestures.is_empty()
	}

	/// Pointer id of the oldest gesture still in progress.
	pub fn first_pointer(&self) -> Option<i32> {
		self.gestures.first().map(|g| g.pointer)
	}

	/// Whether the click fired at the end of a moved drag should be ignored.
	/// Reading the flag clears it.
	pub fn take_click_suppression(&mut self) -> bool {
		std::mem::take(&mut self.suppress_click)
	}

	pub fn clear_click_suppression(&mut self) {
		self.suppress_click = false;
	}
}

/// Apply a drag event to the simulation.
pub fn apply(event: &DragEvent, simulation: &mut Simulation, alpha_target: f64) {
	match event.phase {
		DragPhase::Start => {
			if event.active == 0 {
				simulation.set_alpha_target(alpha_target);
				simulation.restart();
			}
			if let Some(node) = simulation.node_mut(event.node) {
				let (x, y) = (node.x, node.y);
				node.pin(x, y);
			}
		}
		DragPhase::Drag => {
			if let Some(node) = simulation.node_mut(event.node) {
				node.pin(event.x, event.y);
			}
		}
		DragPhase::End => {
			if event.active == 0 {
				simulation.set_alpha_target(0.0);
			}
			if let Some(node) = simulation.node_mut(event.node) {
				node.unpin();
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::force_graph::config::SimulationConfig;

	fn settled_simulation() -> Simulation {
		let mut simulation = Simulation::new(3, &SimulationConfig::default());
		while simulation.tick() {}
		simulation
	}

	fn position(simulation: &Simulation, node: usize) -> (f64, f64) {
		let node = simulation.node(node).unwrap();
		(node.x, node.y)
	}

	#[test]
	fn start_pins_node_and_reheats() {
		let mut simulation = settled_simulation();
		let mut tracker = DragTracker::default();
		let pos = position(&simulation, 1);

		let event = tracker.begin(MOUSE_POINTER, 1, pos, pos);
		assert_eq!(event.active, 0);
		apply(&event, &mut simulation, 0.3);

		let node = simulation.node(1).unwrap();
		assert_eq!((node.fx, node.fy), (Some(pos.0), Some(pos.1)));
		assert!(simulation.is_running());
		assert_eq!(simulation.alpha_target(), 0.3);
	}

	#[test]
	fn holding_keeps_pin_on_pointer() {
		let mut simulation = settled_simulation();
		let mut tracker = DragTracker::default();
		let pos = position(&simulation, 0);
		apply(&tracker.begin(MOUSE_POINTER, 0, pos, pos), &mut simulation, 0.3);

		for step in 1..=5 {
			let pointer = (pos.0 + step as f64 * 10.0, pos.1 - step as f64);
			let event = tracker.motion(MOUSE_POINTER, pointer).unwrap();
			apply(&event, &mut simulation, 0.3);
			simulation.tick();

			let node = simulation.node(0).unwrap();
			assert_eq!((node.fx, node.fy), (Some(pointer.0), Some(pointer.1)));
			assert_eq!((node.x, node.y), pointer);
		}
	}

	#[test]
	fn grab_offset_is_preserved() {
		let mut tracker = DragTracker::default();
		tracker.begin(MOUSE_POINTER, 0, (100.0, 100.0), (110.0, 95.0));
		let event = tracker.motion(MOUSE_POINTER, (210.0, 195.0)).unwrap();
		assert_eq!((event.x, event.y), (200.0, 200.0));
	}

	#[test]
	fn release_unpins_and_cools() {
		let mut simulation = settled_simulation();
		let mut tracker = DragTracker::default();
		let pos = position(&simulation, 2);
		apply(&tracker.begin(MOUSE_POINTER, 2, pos, pos), &mut simulation, 0.3);
		apply(
			&tracker.motion(MOUSE_POINTER, (0.0, 0.0)).unwrap(),
			&mut simulation,
			0.3,
		);

		let event = tracker.finish(MOUSE_POINTER).unwrap();
		assert_eq!(event.active, 0);
		apply(&event, &mut simulation, 0.3);

		assert!(!simulation.node(2).unwrap().is_pinned());
		assert_eq!(simulation.alpha_target(), 0.0);
		assert!(!tracker.is_dragging());
	}

	#[test]
	fn concurrent_gestures_keep_simulation_warm() {
		let mut simulation = settled_simulation();
		let mut tracker = DragTracker::default();
		let (a, b) = (position(&simulation, 0), position(&simulation, 1));

		apply(&tracker.begin(1, 0, a, a), &mut simulation, 0.3);
		let second = tracker.begin(2, 1, b, b);
		assert_eq!(second.active, 1);
		apply(&second, &mut simulation, 0.3);
		let held: Vec<usize> = tracker.gestures.iter().map(|g| g.node).collect();
		assert_eq!(held, vec![0, 1]);

		let first_end = tracker.finish(1).unwrap();
		assert_eq!(first_end.active, 1);
		apply(&first_end, &mut simulation, 0.3);
		assert_eq!(simulation.alpha_target(), 0.3);
		assert!(simulation.node(1).unwrap().is_pinned());

		apply(&tracker.finish(2).unwrap(), &mut simulation, 0.3);
		assert_eq!(simulation.alpha_target(), 0.0);
	}

	#[test]
	fn unknown_pointer_is_ignored() {
		let mut tracker = DragTracker::default();
		assert!(tracker.motion(7, (1.0, 1.0)).is_none());
		assert!(tracker.finish(7).is_none());
	}

	#[test]
	fn moved_drag_suppresses_one_click() {
		let mut tracker = DragTracker::default();
		tracker.begin(MOUSE_POINTER, 0, (0.0, 0.0), (0.0, 0.0));
		tracker.motion(MOUSE_POINTER, (5.0, 5.0));
		tracker.finish(MOUSE_POINTER);

		assert!(tracker.take_click_suppression());
		assert!(!tracker.take_click_suppression());
	}

	#[test]
	fn press_without_motion_allows_click() {
		let mut tracker = DragTracker::default();
		tracker.begin(MOUSE_POINTER, 0, (0.0, 0.0), (0.0, 0.0));
		tracker.finish(MOUSE_POINTER);
		assert!(!tracker.take_click_suppression());
	}
}
