//! avatar-graph: Interactive force-directed avatar graph.
//!
//! This crate provides a WASM-based graph visualization component that lays
//! out a node-link dataset with a force simulation, draws nodes as circular
//! avatars, and lets the user drag nodes and click them for details.

use anyhow::{Context, anyhow, bail};
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_meta::*;
use log::{Level, error, info, warn};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{HtmlScriptElement, Response, Window};

pub mod components;

pub use components::force_graph::{
	ForceGraphSvg, GraphConfig, GraphData, GraphLink, GraphNode, parse_graph_data,
};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("avatar-graph: logging initialized");
}

fn js_error(value: JsValue) -> anyhow::Error {
	anyhow!("{:?}", value)
}

/// Text of the `<script>` element with the given id, if present.
fn script_text(id: &str) -> Option<String> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id(id)?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	script.text().ok()
}

/// Load configuration overrides from a script element with id="graph-config".
/// Falls back to defaults when absent or invalid.
fn load_config() -> GraphConfig {
	let Some(json_text) = script_text("graph-config") else {
		return GraphConfig::default();
	};
	match GraphConfig::from_json(&json_text) {
		Ok(config) => config,
		Err(e) => {
			warn!("avatar-graph: ignoring invalid config: {}", e);
			GraphConfig::default()
		}
	}
}

/// Load graph data embedded in a script element with id="graph-data".
/// Expected format: JSON with { nodes: [...], links: [...] }
fn load_inline_graph_data() -> Option<GraphData> {
	let json_text = script_text("graph-data")?;

	match parse_graph_data(&json_text) {
		Ok(data) => {
			info!(
				"avatar-graph: loaded {} nodes, {} links from page",
				data.nodes.len(),
				data.links.len()
			);
			Some(data)
		}
		Err(e) => {
			warn!("avatar-graph: failed to parse inline graph data: {}", e);
			None
		}
	}
}

/// Fetch and parse the dataset at `url`, relative to the page.
pub async fn fetch_graph_data(url: &str) -> anyhow::Result<GraphData> {
	let window = web_sys::window().context("no global window")?;
	let response: Response = JsFuture::from(window.fetch_with_str(url))
		.await
		.map_err(js_error)
		.with_context(|| format!("fetching {url}"))?
		.dyn_into()
		.map_err(js_error)?;
	if !response.ok() {
		bail!("fetching {url}: HTTP {}", response.status());
	}

	let text: js_sys::JsString = JsFuture::from(response.text().map_err(js_error)?)
		.await
		.map_err(js_error)
		.with_context(|| format!("reading {url}"))?
		.dyn_into()
		.map_err(js_error)?;
	let data = parse_graph_data(&String::from(text)).with_context(|| format!("parsing {url}"))?;

	info!(
		"avatar-graph: loaded {} nodes, {} links from {}",
		data.nodes.len(),
		data.links.len(),
		url
	);
	Ok(data)
}

/// Main application component.
/// Loads the dataset (inline or fetched) and renders the graph once it arrives.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let config = load_config();
	let (graph, set_graph) = signal(None::<GraphData>);

	match load_inline_graph_data() {
		Some(data) => set_graph.set(Some(data)),
		None => {
			let url = config.data_url.clone();
			spawn_local(async move {
				match fetch_graph_data(&url).await {
					Ok(data) => set_graph.set(Some(data)),
					Err(e) => error!("avatar-graph: {:#}", e),
				}
			});
		}
	}

	view! {
		<Html attr:lang="en" attr:dir="ltr" />
		<Title text="Character Graph" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<main class="fullscreen-graph">
			{move || {
				graph
					.get()
					.map(|data| {
						let config = config.clone();
						view! {
							<ForceGraphSvg
								data=Signal::derive(move || data.clone())
								config=config
								fullscreen=true
							/>
						}
					})
			}}
		</main>
	}
}
