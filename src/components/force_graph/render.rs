//! SVG rendering for the force graph.
//!
//! The scene is drawn in layers, bottom to top:
//! 1. Link lines
//! 2. Avatar node groups (clip path, image, ring, tooltip)
//! 3. The HTML info box, positioned over the SVG
//!
//! Element structure is static once built; only positions are reactive, read
//! from the `Scene` signal that the animation loop updates.

use leptos::prelude::*;
use web_sys::{MouseEvent, TouchEvent};

use super::info::InfoPanel;
use super::scene::{LinkLine, NodeGroup, Scene};
use super::theme::Theme;

fn line_attr(
	scene: RwSignal<Scene>,
	index: usize,
	get: fn(&LinkLine) -> f64,
) -> impl Fn() -> String + Send + Sync + Copy + 'static {
	move || scene.with(|s| s.lines.get(index).map_or(0.0, get)).to_string()
}

/// One `<line>` per link inside a group carrying the shared stroke.
pub fn link_layer(scene: RwSignal<Scene>, theme: &Theme) -> impl IntoView + use<> {
	let widths: Vec<String> = scene.with_untracked(|s| {
		s.lines
			.iter()
			.map(|line| line.stroke_width.to_string())
			.collect()
	});

	let lines = widths
		.into_iter()
		.enumerate()
		.map(|(i, width)| {
			view! {
				<line
					x1=line_attr(scene, i, |l| l.x1)
					y1=line_attr(scene, i, |l| l.y1)
					x2=line_attr(scene, i, |l| l.x2)
					y2=line_attr(scene, i, |l| l.y2)
					stroke-width=width
				/>
			}
		})
		.collect_view();

	let stroke = theme.link.color.to_css();
	let opacity = theme.link.opacity.to_string();
	view! {
		<g class="links" stroke=stroke stroke-opacity=opacity>
			{lines}
		</g>
	}
}

/// One `<g class="node">` per node: a circular clip path, the clipped avatar
/// image, a ring and a tooltip, translated to the node's position.
pub fn node_layer<P, T, S>(
	scene: RwSignal<Scene>,
	theme: &Theme,
	on_press: P,
	on_touch: T,
	on_select: S,
) -> impl IntoView + use<P, T, S>
where
	P: Fn(usize, MouseEvent) + Clone + 'static,
	T: Fn(usize, TouchEvent) + Clone + 'static,
	S: Fn(usize) + Clone + 'static,
{
	let groups: Vec<NodeGroup> = scene.with_untracked(|s| s.nodes.clone());
	let radius = theme.node.radius;
	let (offset, size, r) = (
		(-radius).to_string(),
		(radius * 2.0).to_string(),
		radius.to_string(),
	);
	let ring_color = theme.node.ring_color.to_css();
	let ring_width = theme.node.ring_width.to_string();

	let nodes = groups
		.into_iter()
		.enumerate()
		.map(|(i, group)| {
			let (on_press, on_touch, on_select) =
				(on_press.clone(), on_touch.clone(), on_select.clone());
			let transform = move || {
				scene.with(|s| s.nodes.get(i).map(NodeGroup::transform).unwrap_or_default())
			};
			let clip_url = group.clip_url();

			view! {
				<g
					class="node"
					transform=transform
					style="cursor: grab; touch-action: none;"
					on:mousedown=move |ev: MouseEvent| on_press(i, ev)
					on:touchstart=move |ev: TouchEvent| on_touch(i, ev)
					on:click=move |_: MouseEvent| on_select(i)
				>
					<defs>
						<clipPath id=group.clip_id>
							<circle cx="0" cy="0" r=r.clone() />
						</clipPath>
					</defs>
					<image
						x=offset.clone()
						y=offset.clone()
						width=size.clone()
						height=size.clone()
						href=group.image
						clip-path=clip_url
					/>
					<circle
						r=r.clone()
						fill="transparent"
						stroke=ring_color.clone()
						stroke-width=ring_width.clone()
					/>
					<title>{group.id}</title>
				</g>
			}
		})
		.collect_view();

	let stroke = theme.node.stroke.to_css();
	let stroke_width = theme.node.stroke_width.to_string();
	view! {
		<g class="nodes" stroke=stroke stroke-width=stroke_width>
			{nodes}
		</g>
	}
}

/// Floating panel with the clicked node's id and info text.
pub fn info_box(panel: RwSignal<InfoPanel>, theme: &Theme) -> impl IntoView + use<> {
	let style = theme.info_box.clone();
	view! {
		<div
			class="info-box"
			style=move || panel.with(|p| style.to_css(p.left, p.top, p.visible))
		>
			<strong>"ID:"</strong>
			" "
			{move || panel.with(|p| p.node_id.clone())}
			<br />
			<strong>"Info:"</strong>
			" "
			{move || panel.with(|p| p.info.clone())}
		</div>
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	/// Layer views must not borrow from the theme: the component drops it
	/// before the views are mounted.
	fn outlives_theme<A, V: 'static>(_: fn(A, &Theme) -> V) {}

	#[test]
	fn layers_do_not_borrow_the_theme() {
		outlives_theme(link_layer);
		outlives_theme(info_box);

		type Press = fn(usize, MouseEvent);
		type Touch = fn(usize, TouchEvent);
		type Select = fn(usize);
		fn nodes(scene: RwSignal<Scene>, theme: &Theme) -> impl IntoView + use<> {
			node_layer::<Press, Touch, Select>(scene, theme, |_, _| {}, |_, _| {}, |_| {})
		}
		outlives_theme(nodes);
	}
}
