//! Simulation tuning for the particle field.
//!
//! Every constant the engine uses lives here so the behavior of each entity
//! kind can be read (and tuned) in one place. [`FieldConfig::default`] gives the
//! hero-banner look; tests build variants with struct update syntax.

/// Step-function particle budget keyed on surface size.
///
/// Smaller surfaces get fewer ambient particles. The height table and the
/// width table are consulted independently; the first threshold each dimension
/// falls under yields a count, and the smaller of the matches wins. When
/// neither dimension matches, `default_count` is used.
#[derive(Clone, Debug)]
pub struct ParticleBudget {
	/// `(max_height_exclusive, count)` pairs, ascending.
	pub by_height: Vec<(f64, usize)>,
	/// `(max_width_exclusive, count)` pairs, ascending.
	pub by_width: Vec<(f64, usize)>,
	pub default_count: usize,
}

impl ParticleBudget {
	/// Number of ambient particles for a `width` x `height` surface.
	pub fn count_for(&self, width: f64, height: f64) -> usize {
		let first_match = |table: &[(f64, usize)], dim: f64| {
			table
				.iter()
				.find(|&&(threshold, _)| dim < threshold)
				.map(|&(_, count)| count)
		};

		match (
			first_match(&self.by_height, height),
			first_match(&self.by_width, width),
		) {
			(Some(h), Some(w)) => h.min(w),
			(Some(h), None) => h,
			(None, Some(w)) => w.min(self.default_count),
			(None, None) => self.default_count,
		}
	}
}

impl Default for ParticleBudget {
	fn default() -> Self {
		Self {
			by_height: vec![
				(200.0, 40),
				(300.0, 60),
				(400.0, 70),
				(500.0, 90),
				(600.0, 110),
			],
			by_width: vec![
				(450.0, 40),
				(600.0, 50),
				(900.0, 70),
				(1200.0, 90),
				(1600.0, 110),
			],
			default_count: 130,
		}
	}
}

/// Ambient particle motion.
#[derive(Clone, Debug)]
pub struct AmbientConfig {
	/// Cursor attraction radius in surface units.
	pub attraction_radius: f64,
	/// Peak attraction added to velocity per frame (at zero distance).
	pub attraction_strength: f64,
	/// Velocity damping while a cursor is present.
	pub cursor_damping: f64,
	/// Velocity damping while idle.
	pub idle_damping: f64,
	/// Full width of the uniform jitter applied during autonomous drift.
	pub drift_jitter: f64,
	/// Velocity kept (and inverted) when bouncing off an edge.
	pub restitution: f64,
	/// Initial speed range `[min, max)`.
	pub initial_speed: (f64, f64),
	/// Size oscillation bounds.
	pub size_range: (f64, f64),
	pub size_step: f64,
	/// Hue advance in degrees per frame.
	pub hue_step: f64,
	pub trail_length: usize,
	/// A trail sample is taken every `trail_interval` frames.
	pub trail_interval: u64,
	/// Minimum per-axis speed for a trail sample to be taken.
	pub trail_min_speed: f64,
}

impl Default for AmbientConfig {
	fn default() -> Self {
		Self {
			attraction_radius: 150.0,
			attraction_strength: 0.1,
			cursor_damping: 0.99,
			idle_damping: 0.998,
			drift_jitter: 0.03,
			restitution: 0.9,
			initial_speed: (0.3, 0.8),
			size_range: (1.0, 4.0),
			size_step: 0.1,
			hue_step: 0.3,
			trail_length: 15,
			trail_interval: 2,
			trail_min_speed: 0.1,
		}
	}
}

/// Background dust texture.
#[derive(Clone, Debug)]
pub struct DustConfig {
	pub count: usize,
	pub size_range: (f64, f64),
	/// Full width of the uniform per-axis velocity range, centred on zero.
	pub speed: f64,
	pub hue_step: f64,
}

impl Default for DustConfig {
	fn default() -> Self {
		Self {
			count: 200,
			size_range: (0.5, 2.0),
			speed: 0.05,
			hue_step: 0.1,
		}
	}
}

/// Expanding rings spawned by pointer movement and clicks.
#[derive(Clone, Debug)]
pub struct RippleConfig {
	pub growth: f64,
	pub initial_alpha: f64,
	pub alpha_decay: f64,
	pub hue_step: f64,
	pub line_width: f64,
	pub move_max_radius: f64,
	pub click_max_radius: f64,
}

impl Default for RippleConfig {
	fn default() -> Self {
		Self {
			growth: 1.5,
			initial_alpha: 0.5,
			alpha_decay: 0.01,
			hue_step: 5.0,
			line_width: 2.0,
			move_max_radius: 30.0,
			click_max_radius: 60.0,
		}
	}
}

/// Click bursts.
#[derive(Clone, Debug)]
pub struct FireworkConfig {
	pub burst_size: usize,
	/// Launch speed range `[min, max)`.
	pub speed: (f64, f64),
	/// Initial size range `[min, max)`.
	pub size: (f64, f64),
	pub alpha_decay: f64,
}

impl Default for FireworkConfig {
	fn default() -> Self {
		Self {
			burst_size: 15,
			speed: (1.0, 3.0),
			size: (2.0, 4.0),
			alpha_decay: 0.02,
		}
	}
}

/// Neighbor links between ambient particles.
#[derive(Clone, Debug)]
pub struct ConnectorConfig {
	/// Side length of a spatial grid cell.
	pub cell_size: f64,
	/// Particles closer than this are linked.
	pub link_distance: f64,
	pub line_width: f64,
	/// Emit each pair once instead of once per endpoint.
	///
	/// Off by default: double-stroking is what gives links their brightness.
	pub dedupe: bool,
}

impl ConnectorConfig {
	pub fn link_distance_sq(&self) -> f64 {
		self.link_distance * self.link_distance
	}
}

impl Default for ConnectorConfig {
	fn default() -> Self {
		Self {
			cell_size: 120.0,
			link_distance: 100.0,
			line_width: 1.5,
			dedupe: false,
		}
	}
}

/// Complete simulation configuration.
#[derive(Clone, Debug, Default)]
pub struct FieldConfig {
	pub budget: ParticleBudget,
	pub ambient: AmbientConfig,
	pub dust: DustConfig,
	pub ripple: RippleConfig,
	pub firework: FireworkConfig,
	pub connector: ConnectorConfig,
}
