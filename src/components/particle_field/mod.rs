//! Interactive particle field for the hero banner.
//!
//! Renders a continuously animated field on an HTML canvas with:
//! - Ambient particles that drift on their own and are pulled toward the cursor
//! - A dust layer that wraps around the edges
//! - Ripples on pointer movement, ripple-plus-firework bursts on click
//! - Grid-bucketed links between nearby ambient particles
//!
//! The simulation ([`ParticleEngine`]) is independent of the DOM; it draws
//! through the [`Surface`] trait, implemented for the canvas in `render.rs`.
//!
//! # Example
//!
//! ```ignore
//! view! {
//!     <div style="position: relative; height: 60vh;">
//!         <ParticleField />
//!     </div>
//! }
//! ```

mod component;
pub mod config;
mod connector;
mod engine;
mod entities;
mod frame_loop;
mod render;
mod surface;
pub mod theme;

pub use component::ParticleField;
pub use config::FieldConfig;
pub use connector::{Link, SpatialGrid};
pub use engine::{Cursor, ParticleEngine};
pub use entities::{AmbientParticle, DustParticle, FireworkParticle, Ripple, TrailSample};
pub use frame_loop::{FrameLoop, FrameTask};
pub use surface::Surface;
pub use theme::FieldTheme;
