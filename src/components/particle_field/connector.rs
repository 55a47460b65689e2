//! Neighbor links between ambient particles.
//!
//! Particles are bucketed into a uniform grid of square cells each frame. A
//! particle only looks at the 3x3 block of cells around its own, which bounds
//! the candidate set as long as the cell size is at least the link distance.

use std::collections::HashMap;

use super::config::ConnectorConfig;
use super::entities::AmbientParticle;
use super::surface::Surface;
use super::theme::Tone;

/// A line to draw between two ambient particles.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Link {
	pub from: usize,
	pub to: usize,
	pub hue: f64,
	/// Falls off linearly from 1 at distance 0 to 0 at the link distance.
	pub alpha: f64,
}

/// Reusable cell buckets, cleared and refilled every frame.
#[derive(Debug, Default)]
pub struct SpatialGrid {
	cells: HashMap<(i64, i64), Vec<usize>>,
}

impl SpatialGrid {
	fn cell_of(x: f64, y: f64, cell_size: f64) -> (i64, i64) {
		((x / cell_size).floor() as i64, (y / cell_size).floor() as i64)
	}

	fn rebuild(&mut self, particles: &[AmbientParticle], cell_size: f64) {
		for bucket in self.cells.values_mut() {
			bucket.clear();
		}
		for (idx, p) in particles.iter().enumerate() {
			self.cells
				.entry(Self::cell_of(p.body.x, p.body.y, cell_size))
				.or_default()
				.push(idx);
		}
		self.cells.retain(|_, bucket| !bucket.is_empty());
	}

	/// Find every link among `particles`.
	///
	/// Without `dedupe`, each linked pair appears twice (once per endpoint).
	pub fn links(&mut self, particles: &[AmbientParticle], cfg: &ConnectorConfig) -> Vec<Link> {
		self.rebuild(particles, cfg.cell_size);

		let max_sq = cfg.link_distance_sq();
		let mut links = Vec::new();
		for (idx, p) in particles.iter().enumerate() {
			let (cx, cy) = Self::cell_of(p.body.x, p.body.y, cfg.cell_size);
			for gx in cx - 1..=cx + 1 {
				for gy in cy - 1..=cy + 1 {
					let Some(bucket) = self.cells.get(&(gx, gy)) else {
						continue;
					};
					for &other in bucket {
						if other == idx || (cfg.dedupe && other < idx) {
							continue;
						}
						let n = &particles[other];
						let (dx, dy) = (n.body.x - p.body.x, n.body.y - p.body.y);
						let dist_sq = dx * dx + dy * dy;
						if dist_sq < max_sq {
							links.push(Link {
								from: idx,
								to: other,
								hue: (p.body.hue + n.body.hue) / 2.0,
								alpha: 1.0 - dist_sq.sqrt() / cfg.link_distance,
							});
						}
					}
				}
			}
		}
		links
	}
}

/// Stroke every link.
pub fn draw_links(
	links: &[Link],
	particles: &[AmbientParticle],
	cfg: &ConnectorConfig,
	tone: Tone,
	surface: &mut dyn Surface,
) {
	for link in links {
		let (a, b) = (&particles[link.from].body, &particles[link.to].body);
		surface.stroke_line(
			(a.x, a.y),
			(b.x, b.y),
			cfg.line_width,
			tone.at(link.hue, link.alpha),
		);
	}
}

#[cfg(test)]
mod tests {
	use std::collections::VecDeque;

	use super::*;
	use crate::components::particle_field::entities::Body;

	fn at(x: f64, y: f64, hue: f64) -> AmbientParticle {
		AmbientParticle {
			body: Body {
				x,
				y,
				vx: 0.0,
				vy: 0.0,
				size: 2.0,
				size_dir: 1.0,
				hue,
				trail: VecDeque::new(),
			},
		}
	}

	#[test]
	fn close_pair_linked_from_both_ends() {
		let particles = vec![at(10.0, 10.0, 100.0), at(70.0, 10.0, 200.0)];
		let links = SpatialGrid::default().links(&particles, &ConnectorConfig::default());

		assert_eq!(links.len(), 2);
		assert_eq!((links[0].from, links[0].to), (0, 1));
		assert_eq!((links[1].from, links[1].to), (1, 0));
		assert_eq!(links[0].hue, 150.0);
		assert!((links[0].alpha - 0.4).abs() < 1e-12);
	}

	#[test]
	fn dedupe_emits_each_pair_once() {
		let particles = vec![at(10.0, 10.0, 0.0), at(70.0, 10.0, 0.0), at(40.0, 50.0, 0.0)];
		let cfg = ConnectorConfig {
			dedupe: true,
			..Default::default()
		};
		let links = SpatialGrid::default().links(&particles, &cfg);

		assert_eq!(links.len(), 3);
		assert!(links.iter().all(|l| l.from < l.to));
	}

	#[test]
	fn distant_pair_not_linked() {
		let particles = vec![at(10.0, 10.0, 0.0), at(210.0, 10.0, 0.0)];
		let links = SpatialGrid::default().links(&particles, &ConnectorConfig::default());
		assert!(links.is_empty());
	}

	#[test]
	fn pair_across_cell_boundary_is_linked() {
		// Cells 0 and 1 along x; 20 units apart.
		let particles = vec![at(110.0, 5.0, 0.0), at(130.0, 5.0, 0.0)];
		let links = SpatialGrid::default().links(&particles, &ConnectorConfig::default());
		assert_eq!(links.len(), 2);
	}

	#[test]
	fn exactly_link_distance_is_excluded() {
		let particles = vec![at(0.0, 0.0, 0.0), at(100.0, 0.0, 0.0)];
		let links = SpatialGrid::default().links(&particles, &ConnectorConfig::default());
		assert!(links.is_empty());
	}

	#[test]
	fn grid_reused_across_frames() {
		let mut grid = SpatialGrid::default();
		let cfg = ConnectorConfig::default();
		let first = vec![at(10.0, 10.0, 0.0), at(20.0, 10.0, 0.0)];
		assert_eq!(grid.links(&first, &cfg).len(), 2);

		let second = vec![at(500.0, 500.0, 0.0)];
		assert!(grid.links(&second, &cfg).is_empty());
	}

	#[test]
	fn negative_coordinates_bucket_below_zero() {
		assert_eq!(SpatialGrid::cell_of(-1.0, 5.0, 120.0), (-1, 0));
		let particles = vec![at(-5.0, 0.0, 0.0), at(5.0, 0.0, 0.0)];
		let links = SpatialGrid::default().links(&particles, &ConnectorConfig::default());
		assert_eq!(links.len(), 2);
	}

	#[test]
	fn draws_one_line_per_link() {
		use crate::components::particle_field::surface::RecordingSurface;

		let particles = vec![at(10.0, 10.0, 0.0), at(20.0, 10.0, 0.0)];
		let cfg = ConnectorConfig::default();
		let links = SpatialGrid::default().links(&particles, &cfg);
		let mut surface = RecordingSurface::default();
		draw_links(&links, &particles, &cfg, Tone::new(80.0, 60.0), &mut surface);
		assert_eq!(surface.lines().count(), 2);
	}
}
