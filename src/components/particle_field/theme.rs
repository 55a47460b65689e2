//! Visual theming for the particle field.
//!
//! Entity colors are hue-driven (each particle carries a cycling hue), so the
//! theme fixes everything except the hue: saturation/lightness per entity kind,
//! the background, and the glow effect.

/// Opaque RGB color, used for flat fills.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	pub r: u8,
	pub g: u8,
	pub b: u8,
}

impl Color {
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b }
	}

	pub fn to_css(self) -> String {
		format!("rgb({}, {}, {})", self.r, self.g, self.b)
	}
}

/// HSL color with alpha. Hue in degrees, saturation/lightness in percent.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hsla {
	pub h: f64,
	pub s: f64,
	pub l: f64,
	pub a: f64,
}

impl Hsla {
	pub const fn new(h: f64, s: f64, l: f64, a: f64) -> Self {
		Self { h, s, l, a }
	}

	/// Alpha is clamped to `[0, 1]` so a fading entity never renders negative.
	pub fn with_alpha(self, a: f64) -> Self {
		Self {
			a: a.clamp(0.0, 1.0),
			..self
		}
	}

	pub fn to_css(self) -> String {
		format!("hsla({}, {}%, {}%, {})", self.h, self.s, self.l, self.a)
	}
}

/// Saturation and lightness pair; combined with an entity hue to get a color.
#[derive(Clone, Copy, Debug)]
pub struct Tone {
	pub saturation: f64,
	pub lightness: f64,
}

impl Tone {
	pub const fn new(saturation: f64, lightness: f64) -> Self {
		Self {
			saturation,
			lightness,
		}
	}

	pub fn at(self, hue: f64, alpha: f64) -> Hsla {
		Hsla::new(hue, self.saturation, self.lightness, 1.0).with_alpha(alpha)
	}
}

/// Ambient and firework particle body style.
#[derive(Clone, Debug)]
pub struct ParticleStyle {
	/// Gradient center tone.
	pub core: Tone,
	/// Gradient edge tone.
	pub rim: Tone,
	/// Hue offset of the rim relative to the core.
	pub rim_hue_shift: f64,
	/// Trail segment tone.
	pub trail: Tone,
	pub trail_width: f64,
	/// Shadow blur radius for the glow (0 disables it).
	pub glow_blur: f64,
	/// Glow is only drawn on surfaces wider than this.
	pub glow_min_width: f64,
}

/// Complete visual theme.
#[derive(Clone, Debug)]
pub struct FieldTheme {
	pub background: Color,
	pub particle: ParticleStyle,
	pub dust: Tone,
	pub dust_alpha: f64,
	pub ripple: Tone,
	pub link: Tone,
}

impl FieldTheme {
	/// Aurora: saturated hue-cycling on deep indigo (default)
	pub fn default_theme() -> Self {
		Self {
			background: Color::rgb(23, 23, 54),
			particle: ParticleStyle {
				core: Tone::new(80.0, 60.0),
				rim: Tone::new(80.0, 30.0),
				rim_hue_shift: 30.0,
				trail: Tone::new(80.0, 60.0),
				trail_width: 1.5,
				glow_blur: 10.0,
				glow_min_width: 900.0,
			},
			dust: Tone::new(30.0, 70.0),
			dust_alpha: 0.3,
			ripple: Tone::new(80.0, 60.0),
			link: Tone::new(80.0, 60.0),
		}
	}

	/// Darker, desaturated variant
	pub fn midnight() -> Self {
		Self {
			background: Color::rgb(14, 16, 26),
			particle: ParticleStyle {
				core: Tone::new(55.0, 55.0),
				rim: Tone::new(55.0, 25.0),
				rim_hue_shift: 20.0,
				trail: Tone::new(45.0, 50.0),
				trail_width: 1.2,
				glow_blur: 8.0,
				glow_min_width: 900.0,
			},
			dust: Tone::new(20.0, 60.0),
			dust_alpha: 0.2,
			ripple: Tone::new(50.0, 55.0),
			link: Tone::new(50.0, 50.0),
		}
	}

	/// No glow, thin trails; cheapest to draw
	pub fn minimal() -> Self {
		Self {
			background: Color::rgb(25, 28, 35),
			particle: ParticleStyle {
				core: Tone::new(60.0, 65.0),
				rim: Tone::new(60.0, 40.0),
				rim_hue_shift: 0.0,
				trail: Tone::new(40.0, 60.0),
				trail_width: 1.0,
				glow_blur: 0.0,
				glow_min_width: f64::INFINITY,
			},
			dust: Tone::new(10.0, 70.0),
			dust_alpha: 0.15,
			ripple: Tone::new(60.0, 60.0),
			link: Tone::new(60.0, 60.0),
		}
	}

	/// Glow blur for a surface of the given width.
	pub fn glow_for_width(&self, width: f64) -> f64 {
		if width > self.particle.glow_min_width {
			self.particle.glow_blur
		} else {
			0.0
		}
	}
}

impl Default for FieldTheme {
	fn default() -> Self {
		Self::default_theme()
	}
}
