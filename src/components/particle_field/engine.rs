//! Particle field simulation state.
//!
//! [`ParticleEngine`] owns every entity pool, the cursor and the frame counter.
//! It is created once when the canvas mounts, stepped by the animation loop
//! through [`ParticleEngine::tick`], and mutated between ticks by pointer and
//! resize events. All input goes through engine methods; nothing else touches
//! the pools or the cursor.

use log::debug;
use rand::{Rng, RngCore, SeedableRng};
use rand_pcg::Pcg64Mcg;

use super::config::FieldConfig;
use super::connector::{SpatialGrid, draw_links};
use super::entities::{
	AmbientParticle, DustParticle, Entity, FireworkParticle, FrameContext, Ripple,
};
use super::surface::Surface;
use super::theme::FieldTheme;

/// Last known pointer position, in surface coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Cursor {
	position: Option<(f64, f64)>,
}

impl Cursor {
	pub fn position(&self) -> Option<(f64, f64)> {
		self.position
	}

	fn set(&mut self, x: f64, y: f64) {
		self.position = Some((x, y));
	}

	fn clear(&mut self) {
		self.position = None;
	}
}

/// Update, draw and evict every entity of a pool, back to front so that
/// removal never skips an entity.
///
/// Expired entities are evicted before drawing, so a faded entity is never
/// drawn with a negative alpha.
fn step_pool<E: Entity>(
	pool: &mut Vec<E>,
	ctx: &FrameContext<'_>,
	rng: &mut dyn RngCore,
	surface: &mut dyn Surface,
) {
	for i in (0..pool.len()).rev() {
		pool[i].update(ctx, rng);
		if pool[i].is_expired() {
			pool.remove(i);
		} else {
			pool[i].draw(ctx, surface);
		}
	}
}

/// The particle field: entity pools plus the state that drives them.
pub struct ParticleEngine {
	config: FieldConfig,
	theme: FieldTheme,
	width: f64,
	height: f64,
	ambient: Vec<AmbientParticle>,
	dust: Vec<DustParticle>,
	move_ripples: Vec<Ripple>,
	click_ripples: Vec<Ripple>,
	fireworks: Vec<FireworkParticle>,
	grid: SpatialGrid,
	cursor: Cursor,
	auto_drift: bool,
	frame: u64,
	alive: bool,
	rng: Pcg64Mcg,
}

impl ParticleEngine {
	/// Create an engine for a `width` x `height` surface with populated pools.
	pub fn new(config: FieldConfig, theme: FieldTheme, width: f64, height: f64, seed: u64) -> Self {
		let mut engine = Self {
			config,
			theme,
			width,
			height,
			ambient: Vec::new(),
			dust: Vec::new(),
			move_ripples: Vec::new(),
			click_ripples: Vec::new(),
			fireworks: Vec::new(),
			grid: SpatialGrid::default(),
			cursor: Cursor::default(),
			auto_drift: true,
			frame: 0,
			alive: true,
			rng: Pcg64Mcg::seed_from_u64(seed),
		};
		engine.populate();
		engine
	}

	/// Rebuild the ambient and dust pools from scratch and drop all transient
	/// entities.
	fn populate(&mut self) {
		let budget = self.config.budget.count_for(self.width, self.height);
		let rng: &mut dyn RngCore = &mut self.rng;

		self.ambient = (0..budget)
			.map(|_| {
				let (x, y) = (
					rng.random::<f64>() * self.width,
					rng.random::<f64>() * self.height,
				);
				AmbientParticle::spawn(x, y, &self.config.ambient, rng)
			})
			.collect();
		self.dust = (0..self.config.dust.count)
			.map(|_| DustParticle::scatter(self.width, self.height, &self.config.dust, rng))
			.collect();
		self.move_ripples.clear();
		self.click_ripples.clear();
		self.fireworks.clear();

		debug!(
			"particle-field: populated {}x{} with {} ambient, {} dust",
			self.width,
			self.height,
			self.ambient.len(),
			self.dust.len()
		);
	}

	/// Match a new surface size. Pools are rebuilt, not rescaled.
	pub fn resize(&mut self, width: f64, height: f64) {
		if !self.alive {
			return;
		}
		self.width = width;
		self.height = height;
		self.populate();
	}

	/// Advance one frame and draw it onto `surface`.
	///
	/// Returns whether another tick should be scheduled; `false` once the
	/// engine has been destroyed.
	pub fn tick(&mut self, surface: &mut dyn Surface) -> bool {
		if !self.alive {
			return false;
		}

		surface.fill_background(self.theme.background, self.width, self.height);

		let ctx = FrameContext {
			width: self.width,
			height: self.height,
			cursor: self.cursor.position(),
			auto_drift: self.auto_drift,
			frame: self.frame,
			config: &self.config,
			theme: &self.theme,
		};
		let rng: &mut dyn RngCore = &mut self.rng;

		step_pool(&mut self.dust, &ctx, rng, surface);
		step_pool(&mut self.ambient, &ctx, rng, surface);
		step_pool(&mut self.move_ripples, &ctx, rng, surface);
		step_pool(&mut self.click_ripples, &ctx, rng, surface);
		step_pool(&mut self.fireworks, &ctx, rng, surface);

		let links = self.grid.links(&self.ambient, &self.config.connector);
		draw_links(
			&links,
			&self.ambient,
			&self.config.connector,
			self.theme.link,
			surface,
		);

		self.frame += 1;
		true
	}

	/// Pointer moved over the surface.
	pub fn pointer_move(&mut self, x: f64, y: f64) {
		if !self.alive {
			return;
		}
		self.cursor.set(x, y);
		self.move_ripples.push(Ripple::new(
			x,
			y,
			0.0,
			self.config.ripple.move_max_radius,
			&self.config.ripple,
		));
		self.auto_drift = false;
	}

	/// Pointer left the surface.
	pub fn pointer_leave(&mut self) {
		if !self.alive {
			return;
		}
		self.cursor.clear();
		self.auto_drift = true;
	}

	/// Click: one large ripple plus a firework burst, all at `(x, y)`.
	pub fn click(&mut self, x: f64, y: f64) {
		if !self.alive {
			return;
		}
		self.click_ripples.push(Ripple::new(
			x,
			y,
			0.0,
			self.config.ripple.click_max_radius,
			&self.config.ripple,
		));
		let rng: &mut dyn RngCore = &mut self.rng;
		for _ in 0..self.config.firework.burst_size {
			self.fireworks
				.push(FireworkParticle::launch(x, y, &self.config.firework, rng));
		}
	}

	/// Stop the engine. Subsequent ticks and inputs are ignored and all pools
	/// are released.
	pub fn destroy(&mut self) {
		if !self.alive {
			return;
		}
		self.alive = false;
		self.cursor.clear();
		self.ambient = Vec::new();
		self.dust = Vec::new();
		self.move_ripples = Vec::new();
		self.click_ripples = Vec::new();
		self.fireworks = Vec::new();
		self.grid = SpatialGrid::default();
		debug!("particle-field: engine destroyed after {} frames", self.frame);
	}

	pub fn is_alive(&self) -> bool {
		self.alive
	}

	pub fn size(&self) -> (f64, f64) {
		(self.width, self.height)
	}

	pub fn frame(&self) -> u64 {
		self.frame
	}

	pub fn cursor(&self) -> Cursor {
		self.cursor
	}

	pub fn auto_drift(&self) -> bool {
		self.auto_drift
	}

	pub fn ambient(&self) -> &[AmbientParticle] {
		&self.ambient
	}

	pub fn dust(&self) -> &[DustParticle] {
		&self.dust
	}

	pub fn move_ripples(&self) -> &[Ripple] {
		&self.move_ripples
	}

	pub fn click_ripples(&self) -> &[Ripple] {
		&self.click_ripples
	}

	pub fn fireworks(&self) -> &[FireworkParticle] {
		&self.fireworks
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::particle_field::surface::{DrawCall, RecordingSurface};

	fn engine(width: f64, height: f64) -> ParticleEngine {
		ParticleEngine::new(FieldConfig::default(), FieldTheme::default(), width, height, 42)
	}

	fn run(engine: &mut ParticleEngine, frames: usize) -> RecordingSurface {
		let mut surface = RecordingSurface::default();
		for _ in 0..frames {
			surface.clear();
			engine.tick(&mut surface);
		}
		surface
	}

	#[test]
	fn new_engine_sizes_pools_from_budget() {
		let e = engine(400.0, 150.0);
		assert_eq!(e.ambient().len(), 40);
		assert_eq!(e.dust().len(), 200);
		assert!(e.auto_drift());
		assert_eq!(e.cursor().position(), None);

		let e = engine(1920.0, 1080.0);
		assert_eq!(e.ambient().len(), 130);
	}

	#[test]
	fn resize_replaces_pools_and_clears_transients() {
		let mut e = engine(1920.0, 1080.0);
		e.click(100.0, 100.0);
		e.pointer_move(50.0, 50.0);
		run(&mut e, 3);

		e.resize(400.0, 150.0);
		assert_eq!(e.size(), (400.0, 150.0));
		assert_eq!(e.ambient().len(), 40);
		assert_eq!(e.dust().len(), 200);
		assert!(e.fireworks().is_empty());
		assert!(e.click_ripples().is_empty());
		assert!(e.move_ripples().is_empty());
		assert!(
			e.ambient()
				.iter()
				.all(|p| p.body.x <= 400.0 && p.body.y <= 150.0)
		);
	}

	#[test]
	fn click_spawns_ripple_and_burst_at_point() {
		let mut e = engine(800.0, 600.0);
		e.click(120.0, 80.0);

		assert_eq!(e.click_ripples().len(), 1);
		let ripple = &e.click_ripples()[0];
		assert_eq!((ripple.x, ripple.y, ripple.radius), (120.0, 80.0, 0.0));
		assert_eq!(ripple.max_radius, 60.0);

		assert_eq!(e.fireworks().len(), 15);
		for f in e.fireworks() {
			assert_eq!((f.body.x, f.body.y), (120.0, 80.0));
			let speed = f.body.vx.hypot(f.body.vy);
			assert!((1.0..3.0).contains(&speed), "speed {speed}");
		}
	}

	#[test]
	fn pointer_move_sets_cursor_and_disables_drift() {
		let mut e = engine(800.0, 600.0);
		e.pointer_move(10.0, 20.0);
		assert_eq!(e.cursor().position(), Some((10.0, 20.0)));
		assert!(!e.auto_drift());
		assert_eq!(e.move_ripples().len(), 1);
		assert_eq!(e.move_ripples()[0].max_radius, 30.0);

		e.pointer_leave();
		assert_eq!(e.cursor().position(), None);
		assert!(e.auto_drift());
	}

	#[test]
	fn invariants_hold_over_many_ticks() {
		let mut e = engine(800.0, 600.0);
		for i in 0..400 {
			if i % 50 == 0 {
				e.click(400.0, 300.0);
			}
			if i % 7 == 0 {
				e.pointer_move(300.0 + i as f64 % 200.0, 250.0);
			}
			if i % 90 == 0 {
				e.pointer_leave();
			}
			run(&mut e, 1);

			for p in e.ambient() {
				assert!((1.0..=4.0).contains(&p.body.size));
				assert!((0.0..360.0).contains(&p.body.hue));
				assert!(p.body.trail.len() <= 15);
				assert!(p.body.x >= 0.0 && p.body.x <= 799.0);
				assert!(p.body.y >= 0.0 && p.body.y <= 600.0);
			}
			for d in e.dust() {
				assert!((0.0..800.0).contains(&d.x) && (0.0..600.0).contains(&d.y));
			}
			assert!(e.fireworks().iter().all(|f| f.alpha > 0.0));
			assert!(e.click_ripples().iter().all(|r| r.alpha > 0.0));
			assert!(e.move_ripples().iter().all(|r| r.alpha > 0.0));
		}
		assert_eq!(e.frame(), 400);
	}

	#[test]
	fn faded_entities_are_never_drawn_negative() {
		let mut e = engine(800.0, 600.0);
		e.click(400.0, 300.0);
		let mut surface = RecordingSurface::default();
		for _ in 0..80 {
			e.tick(&mut surface);
		}
		assert!(e.fireworks().is_empty());
		assert!(e.click_ripples().is_empty());
		for call in &surface.calls {
			match *call {
				DrawCall::Orb { alpha, .. }
				| DrawCall::Circle { alpha, .. }
				| DrawCall::Ring { alpha, .. }
				| DrawCall::Line { alpha, .. } => assert!(alpha >= 0.0),
				DrawCall::Background => {}
			}
		}
	}

	#[test]
	fn fireworks_removed_after_fifty_frames() {
		let mut e = engine(800.0, 600.0);
		e.click(400.0, 300.0);
		run(&mut e, 48);
		assert_eq!(e.fireworks().len(), 15);
		run(&mut e, 3);
		assert!(e.fireworks().is_empty());
	}

	#[test]
	fn frame_starts_with_background_then_pools() {
		let mut e = engine(800.0, 600.0);
		let surface = run(&mut e, 1);
		assert_eq!(surface.calls[0], DrawCall::Background);
		let dust_draws = surface.calls[1..=200]
			.iter()
			.filter(|c| matches!(c, DrawCall::Circle { .. }))
			.count();
		assert_eq!(dust_draws, 200);
	}

	#[test]
	fn destroyed_engine_stops_and_ignores_input() {
		let mut e = engine(800.0, 600.0);
		run(&mut e, 2);
		e.destroy();

		let mut surface = RecordingSurface::default();
		assert!(!e.tick(&mut surface));
		assert!(surface.calls.is_empty());
		assert_eq!(e.frame(), 2);

		e.pointer_move(10.0, 10.0);
		e.click(10.0, 10.0);
		e.resize(100.0, 100.0);
		assert!(e.move_ripples().is_empty());
		assert!(e.fireworks().is_empty());
		assert_eq!(e.cursor().position(), None);
		assert_eq!(e.size(), (800.0, 600.0));
		assert!(!e.is_alive());
	}

	#[test]
	fn separate_engines_do_not_interfere() {
		let mut a = engine(800.0, 600.0);
		let b = engine(800.0, 600.0);
		a.pointer_move(1.0, 1.0);
		run(&mut a, 5);
		assert_eq!(b.frame(), 0);
		assert_eq!(b.cursor().position(), None);
		assert!(b.move_ripples().is_empty());
	}
}
