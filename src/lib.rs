//! particle-kanban: a kanban board under an interactive particle hero.
//!
//! The hero banner is a canvas-backed particle simulation reacting to the
//! pointer; the board below it keeps work items in status columns persisted
//! to browser storage.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info};

pub mod components;

pub use components::board::{KanbanBoard, ToastQueue, Toaster, WorkItemPanel};
pub use components::particle_field::{FieldConfig, FieldTheme, ParticleEngine, ParticleField};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("particle-kanban: logging initialized");
}

/// Main application component: particle hero on top, board below.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();
	provide_context(ToastQueue::new());

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="dark" />
		<Title text="Interactive Particle Kanban" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<div class="hero" style="position: relative; height: 60vh; overflow: hidden;">
			<ParticleField />
			<div class="hero-overlay">
				<h1>"Interactive Particle Kanban"</h1>
				<p class="subtitle">"Move your cursor to attract particles. Click to launch fireworks."</p>
			</div>
		</div>
		<main class="board-container">
			<KanbanBoard />
		</main>
		<Toaster />
	}
}
