//! State of the node info overlay.

/// Shown when a node has no info text.
pub const INFO_FALLBACK: &str = "No additional info available.";

/// The floating panel that describes the last clicked node.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct InfoPanel {
	pub visible: bool,
	/// Left edge, in surface pixels.
	pub left: f64,
	/// Top edge, in surface pixels.
	pub top: f64,
	pub node_id: String,
	pub info: String,
}

impl InfoPanel {
	/// Show the panel for a node at `(x, y)`, nudged by `offset` so it does not
	/// cover the node.
	pub fn show(&mut self, node_id: &str, info: Option<&str>, x: f64, y: f64, offset: f64) {
		self.visible = true;
		self.left = x + offset;
		self.top = y + offset;
		self.node_id = node_id.to_string();
		self.info = info
			.filter(|text| !text.is_empty())
			.unwrap_or(INFO_FALLBACK)
			.to_string();
	}

	pub fn hide(&mut self) {
		self.visible = false;
	}

	/// Panel contents as plain text.
	pub fn text(&self) -> String {
		format!("ID: {}\nInfo: {}", self.node_id, self.info)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn starts_hidden() {
		assert!(!InfoPanel::default().visible);
	}

	#[test]
	fn show_places_panel_next_to_node() {
		let mut panel = InfoPanel::default();
		panel.show("Valjean", Some("Ex-convict"), 120.0, 80.0, 20.0);

		assert!(panel.visible);
		assert_eq!((panel.left, panel.top), (140.0, 100.0));
		assert_eq!(panel.text(), "ID: Valjean\nInfo: Ex-convict");
	}

	#[test]
	fn missing_or_empty_info_falls_back() {
		let mut panel = InfoPanel::default();
		panel.show("A", None, 0.0, 0.0, 20.0);
		assert_eq!(panel.info, INFO_FALLBACK);

		panel.show("B", Some(""), 0.0, 0.0, 20.0);
		assert_eq!(panel.info, INFO_FALLBACK);
		assert_eq!(panel.node_id, "B");
	}

	#[test]
	fn hide_keeps_last_contents() {
		let mut panel = InfoPanel::default();
		panel.show("A", Some("x"), 0.0, 0.0, 20.0);
		panel.hide();
		assert!(!panel.visible);
		assert_eq!(panel.node_id, "A");
	}
}
