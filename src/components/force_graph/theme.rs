//! Visual theming for the force graph.
//!
//! Colors and stroke settings for links, avatar nodes and the info box.

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	pub r: u8,
	pub g: u8,
	pub b: u8,
	pub a: f64,
}

impl Color {
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}
}

/// Link line style.
#[derive(Clone, Debug)]
pub struct LinkStyle {
	pub color: Color,
	pub opacity: f64,
}

/// Avatar node style.
#[derive(Clone, Debug)]
pub struct NodeStyle {
	/// Radius of the avatar circle. The image is a square of twice this size.
	pub radius: f64,
	/// Stroke inherited by everything in the node layer.
	pub stroke: Color,
	pub stroke_width: f64,
	/// Ring drawn around the avatar.
	pub ring_color: Color,
	pub ring_width: f64,
}

/// Info box style.
#[derive(Clone, Debug)]
pub struct InfoBoxStyle {
	pub background: Color,
	pub border: Color,
	/// Padding in pixels.
	pub padding: f64,
	/// Corner radius in pixels.
	pub radius: f64,
	pub shadow: Color,
}

impl InfoBoxStyle {
	/// Inline CSS for the box at the given position.
	pub fn to_css(&self, left: f64, top: f64, visible: bool) -> String {
		format!(
			"position: absolute; display: {}; left: {}px; top: {}px; background: {}; \
			 border: 1px solid {}; padding: {}px; border-radius: {}px; \
			 box-shadow: 0 4px 8px {};",
			if visible { "block" } else { "none" },
			left,
			top,
			self.background.to_css(),
			self.border.to_css(),
			self.padding,
			self.radius,
			self.shadow.to_css(),
		)
	}
}

/// Complete visual theme.
#[derive(Clone, Debug)]
pub struct Theme {
	pub name: &'static str,
	pub link: LinkStyle,
	pub node: NodeStyle,
	pub info_box: InfoBoxStyle,
}

impl Theme {
	/// Grey links and white-ringed avatars on the page background (default)
	pub fn default_theme() -> Self {
		Self {
			name: "default",
			link: LinkStyle {
				color: Color::rgb(0x99, 0x99, 0x99),
				opacity: 0.6,
			},
			node: NodeStyle {
				radius: 30.0,
				stroke: Color::rgb(255, 255, 255),
				stroke_width: 1.5,
				ring_color: Color::rgb(255, 255, 255),
				ring_width: 2.0,
			},
			info_box: InfoBoxStyle {
				background: Color::rgba(255, 255, 255, 0.8),
				border: Color::rgb(0xcc, 0xcc, 0xcc),
				padding: 10.0,
				radius: 5.0,
				shadow: Color::rgba(0, 0, 0, 0.2),
			},
		}
	}

	/// Light links and rings for dark page backgrounds
	pub fn midnight() -> Self {
		let mut theme = Self::default_theme();
		theme.name = "midnight";
		theme.link.color = Color::rgb(140, 160, 180);
		theme.link.opacity = 0.5;
		theme.node.stroke = Color::rgb(22, 27, 34);
		theme.node.ring_color = Color::rgb(129, 161, 193);
		theme.info_box.background = Color::rgba(30, 35, 42, 0.9);
		theme.info_box.border = Color::rgb(60, 66, 75);
		theme
	}

	/// Look up a built-in theme by name.
	pub fn by_name(name: &str) -> Option<Self> {
		match name {
			"default" => Some(Self::default_theme()),
			"midnight" => Some(Self::midnight()),
			_ => None,
		}
	}
}

impl Default for Theme {
	fn default() -> Self {
		Self::default_theme()
	}
}
