//! Graph data structures for input to the force graph component.

use serde::Deserialize;

/// A node in the graph, drawn as a circular avatar.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct GraphNode {
	/// Unique identifier for this node. Used to reference nodes in links.
	pub id: String,
	/// Image URL shown inside the avatar circle.
	pub image: String,
	/// Free text shown in the info panel when the node is clicked.
	#[serde(default)]
	pub info: Option<String>,
}

/// An edge between two nodes.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct GraphLink {
	/// Source node ID.
	pub source: String,
	/// Target node ID.
	pub target: String,
	/// Link weight. Only affects the rendered stroke width (`sqrt(value)`).
	#[serde(default = "default_link_value")]
	pub value: f64,
}

fn default_link_value() -> f64 {
	1.0
}

/// Complete graph data: nodes and links.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct GraphData {
	pub nodes: Vec<GraphNode>,
	pub links: Vec<GraphLink>,
}

/// Parse a `{ nodes: [...], links: [...] }` JSON document.
pub fn parse_graph_data(json: &str) -> serde_json::Result<GraphData> {
	serde_json::from_str(json)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_nodes_and_links() {
		let data = parse_graph_data(
			r#"{
				"nodes": [
					{"id": "A", "image": "a.png", "info": "first"},
					{"id": "B", "image": "b.png"}
				],
				"links": [{"source": "A", "target": "B", "value": 4}]
			}"#,
		)
		.unwrap();

		assert_eq!(data.nodes.len(), 2);
		assert_eq!(data.nodes[0].info.as_deref(), Some("first"));
		assert_eq!(data.nodes[1].info, None);
		assert_eq!(data.links[0].source, "A");
		assert_eq!(data.links[0].value, 4.0);
	}

	#[test]
	fn missing_link_value_defaults_to_one() {
		let data = parse_graph_data(
			r#"{"nodes": [], "links": [{"source": "A", "target": "B"}]}"#,
		)
		.unwrap();
		assert_eq!(data.links[0].value, 1.0);
	}

	#[test]
	fn ignores_unknown_fields() {
		let data = parse_graph_data(
			r#"{"nodes": [{"id": "A", "image": "a.png", "group": 3}], "links": []}"#,
		)
		.unwrap();
		assert_eq!(data.nodes[0].id, "A");
	}

	#[test]
	fn rejects_malformed_documents() {
		assert!(parse_graph_data(r#"{"nodes": "#).is_err());
		assert!(parse_graph_data(r#"{"nodes": [{"image": "a.png"}], "links": []}"#).is_err());
	}
}
