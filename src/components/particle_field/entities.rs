//! Entity kinds living in the particle field.
//!
//! Each kind has its own typed pool in the engine. They share the [`Entity`]
//! capability (update, draw, expiry) so the frame loop can step every pool the
//! same way without inspecting what it holds.

use std::collections::VecDeque;

use rand::{Rng, RngCore};

use super::config::{AmbientConfig, DustConfig, FieldConfig, FireworkConfig, RippleConfig};
use super::surface::Surface;
use super::theme::FieldTheme;

/// Per-frame environment handed to every entity.
#[derive(Clone, Copy, Debug)]
pub struct FrameContext<'a> {
	pub width: f64,
	pub height: f64,
	pub cursor: Option<(f64, f64)>,
	pub auto_drift: bool,
	pub frame: u64,
	pub config: &'a FieldConfig,
	pub theme: &'a FieldTheme,
}

/// Capability shared by all pooled entities.
pub trait Entity {
	/// Advance one frame.
	fn update(&mut self, ctx: &FrameContext<'_>, rng: &mut dyn RngCore);

	fn draw(&self, ctx: &FrameContext<'_>, surface: &mut dyn Surface);

	/// Expired entities are evicted from their pool and not drawn again.
	fn is_expired(&self) -> bool {
		false
	}
}

/// Wrap `value` into `[0, extent)`.
pub(crate) fn wrap(value: f64, extent: f64) -> f64 {
	let r = value.rem_euclid(extent);
	// rem_euclid rounds up to `extent` for tiny negative inputs
	if r >= extent { 0.0 } else { r }
}

/// A remembered position, drawn as part of a fading tail.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrailSample {
	pub x: f64,
	pub y: f64,
	pub hue: f64,
	pub alpha: f64,
}

/// Kinematic and visual state shared by ambient and firework particles.
#[derive(Clone, Debug)]
pub struct Body {
	pub x: f64,
	pub y: f64,
	pub vx: f64,
	pub vy: f64,
	pub size: f64,
	/// +1 while growing, -1 while shrinking.
	pub size_dir: f64,
	pub hue: f64,
	pub trail: VecDeque<TrailSample>,
}

impl Body {
	fn spawn(x: f64, y: f64, vx: f64, vy: f64, size: f64, rng: &mut dyn RngCore) -> Self {
		Self {
			x,
			y,
			vx,
			vy,
			size,
			size_dir: if rng.random_bool(0.5) { 1.0 } else { -1.0 },
			hue: rng.random::<f64>() * 360.0,
			trail: VecDeque::new(),
		}
	}

	fn integrate(&mut self) {
		self.x += self.vx;
		self.y += self.vy;
	}

	fn pulse_size(&mut self, cfg: &AmbientConfig) {
		let (min, max) = cfg.size_range;
		self.size += self.size_dir * cfg.size_step;
		if self.size >= max {
			self.size = max;
			self.size_dir = -1.0;
		} else if self.size <= min {
			self.size = min;
			self.size_dir = 1.0;
		}
	}

	fn cycle_hue(&mut self, step: f64) {
		self.hue = wrap(self.hue + step, 360.0);
	}

	fn sample_trail(&mut self, frame: u64, alpha: f64, cfg: &AmbientConfig) {
		if frame % cfg.trail_interval.max(1) != 0 {
			return;
		}
		if self.vx.abs() <= cfg.trail_min_speed && self.vy.abs() <= cfg.trail_min_speed {
			return;
		}
		self.trail.push_back(TrailSample {
			x: self.x,
			y: self.y,
			hue: self.hue,
			alpha,
		});
		while self.trail.len() > cfg.trail_length {
			self.trail.pop_front();
		}
	}

	fn draw(&self, alpha: f64, ctx: &FrameContext<'_>, surface: &mut dyn Surface) {
		let style = &ctx.theme.particle;
		surface.fill_orb(
			self.x,
			self.y,
			self.size,
			style.core.at(self.hue, alpha),
			style.rim.at(self.hue + style.rim_hue_shift, alpha),
			ctx.theme.glow_for_width(ctx.width),
		);

		for (a, b) in self.trail.iter().zip(self.trail.iter().skip(1)) {
			surface.stroke_line(
				(a.x, a.y),
				(b.x, b.y),
				style.trail_width,
				style.trail.at(a.hue, a.alpha),
			);
		}
	}
}

/// Persistent background particle, attracted to the cursor.
#[derive(Clone, Debug)]
pub struct AmbientParticle {
	pub body: Body,
}

impl AmbientParticle {
	pub fn spawn(x: f64, y: f64, cfg: &AmbientConfig, rng: &mut dyn RngCore) -> Self {
		let angle = rng.random::<f64>() * std::f64::consts::TAU;
		let speed = rng.random_range(cfg.initial_speed.0..cfg.initial_speed.1);
		let size = rng.random_range(cfg.size_range.0..cfg.size_range.1);
		Self {
			body: Body::spawn(
				x,
				y,
				angle.cos() * speed,
				angle.sin() * speed,
				size,
				rng,
			),
		}
	}

	fn steer(&mut self, ctx: &FrameContext<'_>, rng: &mut dyn RngCore) {
		let cfg = &ctx.config.ambient;
		let b = &mut self.body;
		match ctx.cursor {
			Some((cx, cy)) => {
				let (dx, dy) = (cx - b.x, cy - b.y);
				let dist_sq = dx * dx + dy * dy;
				let radius_sq = cfg.attraction_radius * cfg.attraction_radius;
				if dist_sq > 0.0 && dist_sq < radius_sq {
					let force = (radius_sq - dist_sq) / radius_sq * cfg.attraction_strength;
					let dist = dist_sq.sqrt();
					b.vx += dx / dist * force;
					b.vy += dy / dist * force;
				}
			}
			None if ctx.auto_drift => {
				b.vx += (rng.random::<f64>() - 0.5) * cfg.drift_jitter;
				b.vy += (rng.random::<f64>() - 0.5) * cfg.drift_jitter;
			}
			None => {}
		}

		let damping = if ctx.cursor.is_some() {
			cfg.cursor_damping
		} else {
			cfg.idle_damping
		};
		b.vx *= damping;
		b.vy *= damping;
	}

	/// Inelastic bounce; the particle is put back on the edge it crossed.
	fn bounce(&mut self, width: f64, height: f64, restitution: f64) {
		let b = &mut self.body;
		let max_x = (width - 1.0).max(0.0);
		if b.x <= 0.0 {
			b.x = 0.0;
			b.vx = b.vx.abs() * restitution;
		} else if b.x >= max_x {
			b.x = max_x;
			b.vx = -b.vx.abs() * restitution;
		}

		if b.y < 0.0 {
			b.y = 0.0;
			b.vy = b.vy.abs() * restitution;
		} else if b.y > height {
			b.y = height;
			b.vy = -b.vy.abs() * restitution;
		}
	}
}

impl Entity for AmbientParticle {
	fn update(&mut self, ctx: &FrameContext<'_>, rng: &mut dyn RngCore) {
		let cfg = &ctx.config.ambient;
		self.steer(ctx, rng);
		self.body.integrate();
		self.bounce(ctx.width, ctx.height, cfg.restitution);
		self.body.pulse_size(cfg);
		self.body.cycle_hue(cfg.hue_step);
		self.body.sample_trail(ctx.frame, 1.0, cfg);
	}

	fn draw(&self, ctx: &FrameContext<'_>, surface: &mut dyn Surface) {
		self.body.draw(1.0, ctx, surface);
	}
}

/// Short-lived particle thrown out by a click.
#[derive(Clone, Debug)]
pub struct FireworkParticle {
	pub body: Body,
	pub alpha: f64,
}

impl FireworkParticle {
	/// Launch from `(x, y)` in a uniformly random direction.
	pub fn launch(x: f64, y: f64, cfg: &FireworkConfig, rng: &mut dyn RngCore) -> Self {
		let angle = rng.random::<f64>() * std::f64::consts::TAU;
		let speed = rng.random_range(cfg.speed.0..cfg.speed.1);
		let size = rng.random_range(cfg.size.0..cfg.size.1);
		Self {
			body: Body::spawn(
				x,
				y,
				angle.cos() * speed,
				angle.sin() * speed,
				size,
				rng,
			),
			alpha: 1.0,
		}
	}
}

impl Entity for FireworkParticle {
	fn update(&mut self, ctx: &FrameContext<'_>, _rng: &mut dyn RngCore) {
		let cfg = &ctx.config.ambient;
		self.body.integrate();
		self.alpha -= ctx.config.firework.alpha_decay;
		self.body.pulse_size(cfg);
		self.body.cycle_hue(cfg.hue_step);
		self.body.sample_trail(ctx.frame, self.alpha, cfg);
	}

	fn draw(&self, ctx: &FrameContext<'_>, surface: &mut dyn Surface) {
		self.body.draw(self.alpha, ctx, surface);
	}

	fn is_expired(&self) -> bool {
		self.alpha <= 0.0
	}
}

/// Faint background speck drifting with toroidal wraparound.
#[derive(Clone, Debug)]
pub struct DustParticle {
	pub x: f64,
	pub y: f64,
	pub vx: f64,
	pub vy: f64,
	pub size: f64,
	pub hue: f64,
}

impl DustParticle {
	pub fn scatter(width: f64, height: f64, cfg: &DustConfig, rng: &mut dyn RngCore) -> Self {
		Self {
			x: rng.random::<f64>() * width,
			y: rng.random::<f64>() * height,
			vx: (rng.random::<f64>() - 0.5) * cfg.speed,
			vy: (rng.random::<f64>() - 0.5) * cfg.speed,
			size: rng.random_range(cfg.size_range.0..cfg.size_range.1),
			hue: rng.random::<f64>() * 360.0,
		}
	}
}

impl Entity for DustParticle {
	fn update(&mut self, ctx: &FrameContext<'_>, _rng: &mut dyn RngCore) {
		if ctx.width > 0.0 {
			self.x = wrap(self.x + self.vx, ctx.width);
		}
		if ctx.height > 0.0 {
			self.y = wrap(self.y + self.vy, ctx.height);
		}
		self.hue = wrap(self.hue + ctx.config.dust.hue_step, 360.0);
	}

	fn draw(&self, ctx: &FrameContext<'_>, surface: &mut dyn Surface) {
		surface.fill_circle(
			self.x,
			self.y,
			self.size,
			ctx.theme.dust.at(self.hue, ctx.theme.dust_alpha),
		);
	}
}

/// Expanding, fading ring.
#[derive(Clone, Debug)]
pub struct Ripple {
	pub x: f64,
	pub y: f64,
	pub radius: f64,
	pub max_radius: f64,
	pub alpha: f64,
	pub hue: f64,
}

impl Ripple {
	pub fn new(x: f64, y: f64, hue: f64, max_radius: f64, cfg: &RippleConfig) -> Self {
		Self {
			x,
			y,
			radius: 0.0,
			max_radius,
			alpha: cfg.initial_alpha,
			hue,
		}
	}
}

impl Entity for Ripple {
	fn update(&mut self, ctx: &FrameContext<'_>, _rng: &mut dyn RngCore) {
		let cfg = &ctx.config.ripple;
		self.radius += cfg.growth;
		self.alpha -= cfg.alpha_decay;
		self.hue = wrap(self.hue + cfg.hue_step, 360.0);
	}

	fn draw(&self, ctx: &FrameContext<'_>, surface: &mut dyn Surface) {
		surface.stroke_circle(
			self.x,
			self.y,
			self.radius,
			ctx.config.ripple.line_width,
			ctx.theme.ripple.at(self.hue, self.alpha),
		);
	}

	fn is_expired(&self) -> bool {
		self.alpha <= 0.0
	}
}
