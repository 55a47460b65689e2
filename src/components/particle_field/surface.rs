//! Drawing primitives the engine renders through.
//!
//! The engine never touches the DOM directly; it issues these calls against a
//! [`Surface`]. The browser implementation wraps a 2d canvas context (see
//! `render.rs`), tests use [`RecordingSurface`].

use super::theme::{Color, Hsla};

/// A 2d drawing target.
pub trait Surface {
	/// Paint the whole surface with a flat color.
	fn fill_background(&mut self, color: Color, width: f64, height: f64);

	/// Filled disc with a radial gradient from `inner` (center) to `outer`
	/// (edge), optionally glowing with a shadow of the given blur.
	fn fill_orb(&mut self, x: f64, y: f64, radius: f64, inner: Hsla, outer: Hsla, glow: f64);

	/// Filled disc with a flat color.
	fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Hsla);

	/// Circle outline.
	fn stroke_circle(&mut self, x: f64, y: f64, radius: f64, width: f64, color: Hsla);

	/// Straight line segment.
	fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), width: f64, color: Hsla);
}

/// One captured draw call.
#[cfg(test)]
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCall {
	Background,
	Orb { x: f64, y: f64, radius: f64, alpha: f64 },
	Circle { x: f64, y: f64, alpha: f64 },
	Ring { x: f64, y: f64, radius: f64, alpha: f64 },
	Line { from: (f64, f64), to: (f64, f64), alpha: f64 },
}

/// Headless surface that records every call, for assertions in tests.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingSurface {
	pub calls: Vec<DrawCall>,
}

#[cfg(test)]
impl RecordingSurface {
	pub fn lines(&self) -> impl Iterator<Item = &DrawCall> {
		self.calls
			.iter()
			.filter(|c| matches!(c, DrawCall::Line { .. }))
	}

	pub fn clear(&mut self) {
		self.calls.clear();
	}
}

#[cfg(test)]
impl Surface for RecordingSurface {
	fn fill_background(&mut self, _color: Color, _width: f64, _height: f64) {
		self.calls.push(DrawCall::Background);
	}

	fn fill_orb(&mut self, x: f64, y: f64, radius: f64, inner: Hsla, _outer: Hsla, _glow: f64) {
		self.calls.push(DrawCall::Orb {
			x,
			y,
			radius,
			alpha: inner.a,
		});
	}

	fn fill_circle(&mut self, x: f64, y: f64, _radius: f64, color: Hsla) {
		self.calls.push(DrawCall::Circle {
			x,
			y,
			alpha: color.a,
		});
	}

	fn stroke_circle(&mut self, x: f64, y: f64, radius: f64, _width: f64, color: Hsla) {
		self.calls.push(DrawCall::Ring {
			x,
			y,
			radius,
			alpha: color.a,
		});
	}

	fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), _width: f64, color: Hsla) {
		self.calls.push(DrawCall::Line {
			from,
			to,
			alpha: color.a,
		});
	}
}
