//! Force-directed avatar graph component.
//!
//! Renders an interactive force-directed graph as SVG with:
//! - Physics-based node positioning (link springs, charge, centering, collision)
//! - Circular avatar images for nodes, weighted lines for links
//! - Node dragging with mouse or touch
//! - Click-to-inspect info panel
//!
//! # Example
//!
//! ```ignore
//! use avatar_graph::{ForceGraphSvg, GraphData, GraphLink, GraphNode};
//!
//! let data = GraphData {
//!     nodes: vec![
//!         GraphNode { id: "A".into(), image: "a.png".into(), info: None },
//!         GraphNode { id: "B".into(), image: "b.png".into(), info: Some("Node B".into()) },
//!     ],
//!     links: vec![
//!         GraphLink { source: "A".into(), target: "B".into(), value: 4.0 },
//!     ],
//! };
//!
//! view! { <ForceGraphSvg data=Signal::derive(move || data.clone()) fullscreen=true /> }
//! ```

mod component;
pub mod config;
pub mod drag;
pub mod forces;
mod info;
mod render;
mod scene;
pub mod simulation;
mod state;
pub mod theme;
mod types;

pub use component::ForceGraphSvg;
pub use config::{GraphConfig, SimulationConfig};
pub use theme::Theme;
pub use types::{GraphData, GraphLink, GraphNode, parse_graph_data};
