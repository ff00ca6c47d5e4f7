//! Geometry of the rendered scene.
//!
//! The scene mirrors the SVG the component draws: one line per link and one
//! group per node. It is rebuilt from the simulation after every step, so the
//! view only has to read it.

use super::simulation::{SimLink, SimNode};
use super::types::GraphNode;

/// A rendered link.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LinkLine {
	pub source: usize,
	pub target: usize,
	pub x1: f64,
	pub y1: f64,
	pub x2: f64,
	pub y2: f64,
	pub stroke_width: f64,
}

/// A rendered node: avatar image, ring and tooltip, translated to the node's
/// position.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NodeGroup {
	pub id: String,
	pub image: String,
	/// Element id of the circular clip path. Unique per node.
	pub clip_id: String,
	pub x: f64,
	pub y: f64,
}

impl NodeGroup {
	pub fn transform(&self) -> String {
		format!("translate({}, {})", self.x, self.y)
	}

	pub fn clip_url(&self) -> String {
		format!("url(#{})", self.clip_id)
	}
}

/// Build a clip path id for a node. Characters that are not valid in a URL
/// fragment are replaced, and the index keeps sanitized ids unique.
fn clip_id(index: usize, id: &str) -> String {
	let safe: String = id
		.chars()
		.map(|c| {
			if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
				c
			} else {
				'-'
			}
		})
		.collect();
	format!("clip-{index}-{safe}")
}

/// All rendered elements plus the surface size.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scene {
	pub width: f64,
	pub height: f64,
	pub lines: Vec<LinkLine>,
	pub nodes: Vec<NodeGroup>,
}

impl Scene {
	pub fn new(width: f64, height: f64, nodes: &[GraphNode], links: &[SimLink]) -> Self {
		Self {
			width,
			height,
			lines: links
				.iter()
				.map(|link| LinkLine {
					source: link.source,
					target: link.target,
					stroke_width: link.value.sqrt(),
					..LinkLine::default()
				})
				.collect(),
			nodes: nodes
				.iter()
				.enumerate()
				.map(|(i, node)| NodeGroup {
					id: node.id.clone(),
					image: node.image.clone(),
					clip_id: clip_id(i, &node.id),
					..NodeGroup::default()
				})
				.collect(),
		}
	}

	/// Copy current simulation positions onto lines and node groups.
	pub fn sync(&mut self, nodes: &[SimNode]) {
		for line in &mut self.lines {
			if let (Some(source), Some(target)) = (nodes.get(line.source), nodes.get(line.target)) {
				line.x1 = source.x;
				line.y1 = source.y;
				line.x2 = target.x;
				line.y2 = target.y;
			}
		}
		for (group, node) in self.nodes.iter_mut().zip(nodes) {
			group.x = node.x;
			group.y = node.y;
		}
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}

	pub fn view_box(&self) -> String {
		format!("0 0 {} {}", self.width, self.height)
	}

	/// Surface units per displayed CSS pixel on each axis, given the size the
	/// SVG is actually drawn at. An undrawn surface maps one to one.
	pub fn display_scale(&self, shown_width: f64, shown_height: f64) -> (f64, f64) {
		let ratio = |surface: f64, shown: f64| if shown > 0.0 { surface / shown } else { 1.0 };
		(ratio(self.width, shown_width), ratio(self.height, shown_height))
	}
}
