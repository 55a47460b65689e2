//! Canvas 2d implementation of [`Surface`].

use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::surface::Surface;
use super::theme::{Color, Hsla};

/// Draws onto an HTML canvas through its 2d context.
pub struct CanvasSurface<'a> {
	ctx: &'a CanvasRenderingContext2d,
}

impl<'a> CanvasSurface<'a> {
	pub fn new(ctx: &'a CanvasRenderingContext2d) -> Self {
		Self { ctx }
	}

	fn circle_path(&self, x: f64, y: f64, radius: f64) {
		self.ctx.begin_path();
		let _ = self.ctx.arc(x, y, radius.max(0.0), 0.0, PI * 2.0);
	}
}

impl Surface for CanvasSurface<'_> {
	fn fill_background(&mut self, color: Color, width: f64, height: f64) {
		self.ctx.set_fill_style_str(&color.to_css());
		self.ctx.fill_rect(0.0, 0.0, width, height);
	}

	fn fill_orb(&mut self, x: f64, y: f64, radius: f64, inner: Hsla, outer: Hsla, glow: f64) {
		let ctx = self.ctx;
		match ctx.create_radial_gradient(x, y, 0.0, x, y, radius.max(0.0)) {
			Ok(gradient) => {
				let _ = gradient.add_color_stop(0.0, &inner.to_css());
				let _ = gradient.add_color_stop(1.0, &outer.to_css());
				#[allow(deprecated)]
				ctx.set_fill_style(&gradient);
			}
			Err(_) => ctx.set_fill_style_str(&inner.to_css()),
		}

		if glow > 0.0 {
			ctx.set_shadow_blur(glow);
			ctx.set_shadow_color(&inner.with_alpha(1.0).to_css());
		}
		self.circle_path(x, y, radius);
		ctx.fill();
		if glow > 0.0 {
			ctx.set_shadow_blur(0.0);
		}
	}

	fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Hsla) {
		self.ctx.set_fill_style_str(&color.to_css());
		self.circle_path(x, y, radius);
		self.ctx.fill();
	}

	fn stroke_circle(&mut self, x: f64, y: f64, radius: f64, width: f64, color: Hsla) {
		self.ctx.set_stroke_style_str(&color.to_css());
		self.ctx.set_line_width(width);
		self.circle_path(x, y, radius);
		self.ctx.stroke();
	}

	fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), width: f64, color: Hsla) {
		self.ctx.set_stroke_style_str(&color.to_css());
		self.ctx.set_line_width(width);
		self.ctx.begin_path();
		self.ctx.move_to(from.0, from.1);
		self.ctx.line_to(to.0, to.1);
		self.ctx.stroke();
	}
}
