//! Leptos component wrapping the force-directed graph SVG.
//!
//! The component builds the graph state once, renders the scene as SVG and
//! wires up mouse/touch handlers for node dragging and click-to-inspect. An
//! animation loop runs via `requestAnimationFrame`, ticking the simulation and
//! publishing the updated scene each frame until the layout settles.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::{info, warn};
use wasm_bindgen::prelude::*;
use web_sys::{Element, MouseEvent, TouchEvent, Window};

use super::config::GraphConfig;
use super::drag::MOUSE_POINTER;
use super::info::InfoPanel;
use super::render;
use super::scene::Scene;
use super::state::GraphState;
use super::theme::Theme;
use super::types::GraphData;

type Host = NodeRef<leptos::html::Div>;
type Surface = NodeRef<leptos::svg::Svg>;

fn viewport_size() -> Option<(f64, f64)> {
	let window: Window = web_sys::window()?;
	Some((
		window.inner_width().ok()?.as_f64()?,
		window.inner_height().ok()?.as_f64()?,
	))
}

/// Top-left corner of the drawn SVG and its surface-units-per-pixel scale.
fn surface_frame(svg: &Surface, scene: RwSignal<Scene>) -> Option<((f64, f64), (f64, f64))> {
	let svg = svg.get()?;
	let rect = svg.get_bounding_client_rect();
	let scale = scene.with_untracked(|s| s.display_scale(rect.width(), rect.height()));
	Some(((rect.left(), rect.top()), scale))
}

/// Convert client coordinates to surface coordinates, undoing any scaling of
/// the SVG to fit its container.
fn local_point(
	svg: &Surface,
	scene: RwSignal<Scene>,
	client_x: i32,
	client_y: i32,
) -> Option<(f64, f64)> {
	let ((left, top), (sx, sy)) = surface_frame(svg, scene)?;
	Some((
		(client_x as f64 - left) * sx,
		(client_y as f64 - top) * sy,
	))
}

/// Apply `f` to every touch that changed in this event, in surface coordinates.
fn for_each_changed_touch(
	svg: &Surface,
	scene: RwSignal<Scene>,
	ev: &TouchEvent,
	mut f: impl FnMut(i32, f64, f64),
) {
	let touches = ev.changed_touches();
	for i in 0..touches.length() {
		if let Some(touch) = touches.get(i) {
			if let Some((x, y)) = local_point(svg, scene, touch.client_x(), touch.client_y()) {
				f(touch.identifier(), x, y);
			}
		}
	}
}

/// Publish the info panel if it changed. The panel sits in the host div, so
/// its surface position is converted back to displayed pixels.
fn publish_panel(
	panel: RwSignal<InfoPanel>,
	svg: &Surface,
	scene: RwSignal<Scene>,
	state: &GraphState,
) {
	let mut shown = state.info.clone();
	if let Some((_, (sx, sy))) = surface_frame(svg, scene) {
		shown.left /= sx;
		shown.top /= sy;
	}
	if panel.with_untracked(|p| *p != shown) {
		panel.set(shown);
	}
}

/// Renders an interactive force-directed avatar graph as SVG.
///
/// The surface takes its size from the viewport when the graph is built;
/// explicit `width`/`height` override it. With `fullscreen = true` the surface
/// also follows window resizes.
#[component]
pub fn ForceGraphSvg(
	#[prop(into)] data: Signal<GraphData>,
	#[prop(optional)] config: GraphConfig,
	#[prop(default = false)] fullscreen: bool,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
) -> impl IntoView {
	let (w, h) = match (width, height) {
		(Some(w), Some(h)) => (w, h),
		_ => {
			let (vw, vh) = viewport_size().unwrap_or((800.0, 600.0));
			(width.unwrap_or(vw), height.unwrap_or(vh))
		}
	};
	let theme = Theme::by_name(&config.theme).unwrap_or_else(|| {
		warn!("avatar-graph: unknown theme {:?}, using default", config.theme);
		Theme::default()
	});

	let graph = GraphState::new(&data.get_untracked(), w, h, &config);
	info!(
		"avatar-graph: rendering {} nodes, {} links at {}x{}",
		graph.node_count(),
		graph.scene.lines.len(),
		w,
		h
	);
	let scene = RwSignal::new(graph.scene.clone());
	let panel = RwSignal::new(graph.info.clone());

	let host_ref: Host = NodeRef::new();
	let svg_ref: Surface = NodeRef::new();
	let state = Rc::new(RefCell::new(graph));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let (state_init, animate_init, resize_cb_init) =
		(state.clone(), animate.clone(), resize_cb.clone());

	Effect::new(move |_| {
		if host_ref.get().is_none() || animate_init.borrow().is_some() {
			return;
		}
		let Some(window) = web_sys::window() else {
			return;
		};

		if fullscreen {
			let state_resize = state_init.clone();
			*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
				let Some((nw, nh)) = viewport_size() else {
					return;
				};
				let mut s = state_resize.borrow_mut();
				s.resize(nw, nh);
				scene.set(s.scene.clone());
			}));
			if let Some(ref cb) = *resize_cb_init.borrow() {
				let _ =
					window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			}
		}

		let (state_anim, animate_inner) = (state_init.clone(), animate_init.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			let moved = state_anim.borrow_mut().tick();
			if moved {
				scene.set(state_anim.borrow().scene.clone());
			}
			if let Some(ref cb) = *animate_inner.borrow() {
				if let Some(window) = web_sys::window() {
					let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
				}
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	// Node handlers
	let state_press = state.clone();
	let on_press = move |idx: usize, ev: MouseEvent| {
		if ev.button() != 0 {
			return;
		}
		ev.prevent_default();
		if let Some((x, y)) = local_point(&svg_ref, scene, ev.client_x(), ev.client_y()) {
			state_press
				.borrow_mut()
				.drag_start(MOUSE_POINTER, idx, x, y);
		}
	};

	let state_touch = state.clone();
	let on_touch = move |idx: usize, ev: TouchEvent| {
		let mut s = state_touch.borrow_mut();
		for_each_changed_touch(&svg_ref, scene, &ev, |id, x, y| s.drag_start(id, idx, x, y));
	};

	let state_select = state.clone();
	let on_select = move |idx: usize| {
		let mut s = state_select.borrow_mut();
		s.click_node(idx);
		publish_panel(panel, &svg_ref, scene, &s);
	};

	// Surface handlers
	let state_bg = state.clone();
	let on_background_click = move |ev: MouseEvent| {
		let inside_node = ev
			.target()
			.and_then(|t| t.dyn_into::<Element>().ok())
			.and_then(|el| el.closest("g.node").ok().flatten())
			.is_some();
		let mut s = state_bg.borrow_mut();
		s.click_background(inside_node);
		publish_panel(panel, &svg_ref, scene, &s);
	};

	let state_md = state.clone();
	let on_mousedown = move |_: MouseEvent| {
		state_md.borrow_mut().pointer_down();
	};

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let mut s = state_mm.borrow_mut();
		if !s.drag.is_dragging() {
			return;
		}
		if let Some((x, y)) = local_point(&svg_ref, scene, ev.client_x(), ev.client_y()) {
			s.drag_move(MOUSE_POINTER, x, y);
		}
	};

	let state_mu = state.clone();
	let on_mouseup = move |_: MouseEvent| {
		state_mu.borrow_mut().drag_end(MOUSE_POINTER);
	};

	let state_ml = state.clone();
	let on_mouseleave = move |_: MouseEvent| {
		state_ml.borrow_mut().drag_cancel_all();
	};

	let state_ts = state.clone();
	let on_touchstart = move |_: TouchEvent| {
		state_ts.borrow_mut().pointer_down();
	};

	let state_tm = state.clone();
	let on_touchmove = move |ev: TouchEvent| {
		let mut s = state_tm.borrow_mut();
		if !s.drag.is_dragging() {
			return;
		}
		ev.prevent_default();
		for_each_changed_touch(&svg_ref, scene, &ev, |id, x, y| s.drag_move(id, x, y));
	};

	let state_te = state.clone();
	let on_touchend = move |ev: TouchEvent| {
		let mut s = state_te.borrow_mut();
		for_each_changed_touch(&svg_ref, scene, &ev, |id, _, _| s.drag_end(id));
	};

	let state_tc = state.clone();
	let on_touchcancel = move |ev: TouchEvent| {
		let mut s = state_tc.borrow_mut();
		for_each_changed_touch(&svg_ref, scene, &ev, |id, _, _| s.drag_end(id));
	};

	let host_style = if fullscreen {
		"position: relative; width: 100vw; height: 100vh; overflow: hidden;"
	} else {
		"position: relative;"
	};

	view! {
		<div
			node_ref=host_ref
			class="force-graph"
			style=host_style
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			on:touchstart=on_touchstart
			on:touchmove=on_touchmove
			on:touchend=on_touchend
			on:touchcancel=on_touchcancel
		>
			<svg
				node_ref=svg_ref
				width=move || scene.with(|s| s.width.to_string())
				height=move || scene.with(|s| s.height.to_string())
				viewBox=move || scene.with(Scene::view_box)
				style="max-width: 100%; height: auto; display: block;"
				on:click=on_background_click
			>
				{render::link_layer(scene, &theme)}
				{render::node_layer(scene, &theme, on_press, on_touch, on_select)}
			</svg>
			{render::info_box(panel, &theme)}
		</div>
	}
}
