//! Leptos component wrapping the particle field canvas.
//!
//! The component sizes a canvas, builds a [`ParticleEngine`] for it and drives
//! the engine from a [`FrameLoop`]. Pointer events on the canvas and window
//! resizes are forwarded to the engine. Unmounting stops the loop, detaches
//! the resize listener and destroys the engine.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::ev;
use leptos::prelude::*;
use log::{debug, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent};

use super::config::FieldConfig;
use super::engine::ParticleEngine;
use super::frame_loop::{FrameLoop, FrameTask};
use super::render::CanvasSurface;
use super::theme::FieldTheme;

type SharedEngine = Rc<RefCell<Option<ParticleEngine>>>;

/// Pixel size the canvas should take: the viewport when `fullscreen`,
/// otherwise the parent element.
fn surface_size(canvas: &HtmlCanvasElement, fullscreen: bool) -> Option<(f64, f64)> {
	if fullscreen {
		let window = web_sys::window()?;
		Some((
			window.inner_width().ok()?.as_f64()?,
			window.inner_height().ok()?.as_f64()?,
		))
	} else {
		let parent = canvas.parent_element()?;
		Some((parent.client_width() as f64, parent.client_height() as f64))
	}
}

fn context_2d(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
	canvas.get_context("2d").ok().flatten()?.dyn_into().ok()
}

/// Client coordinates of `ev` converted to canvas-local coordinates.
fn local_point(canvas_ref: NodeRef<leptos::html::Canvas>, ev: &MouseEvent) -> Option<(f64, f64)> {
	let canvas = canvas_ref.get_untracked()?;
	let rect = canvas.get_bounding_client_rect();
	Some((
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	))
}

/// Animated particle field drawn on a canvas.
///
/// Fills its parent element by default; set `fullscreen = true` to size the
/// canvas to the viewport instead. `config` and `theme` fall back to their
/// defaults.
#[component]
pub fn ParticleField(
	#[prop(optional)] config: Option<FieldConfig>,
	#[prop(optional)] theme: Option<FieldTheme>,
	#[prop(default = false)] fullscreen: bool,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let engine: SharedEngine = Rc::new(RefCell::new(None));
	let frame_loop = FrameLoop::new();
	let task = StoredValue::new_local(None::<FrameTask>);
	let engine_slot = StoredValue::new_local(engine.clone());
	let (engine_init, loop_init) = (engine.clone(), frame_loop.clone());

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let Some((w, h)) = surface_size(&canvas, fullscreen) else {
			warn!("particle-field: no surface to size against; animation disabled");
			return;
		};
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let Some(ctx) = context_2d(&canvas) else {
			warn!("particle-field: 2d context unavailable; animation disabled");
			return;
		};

		let seed = (js_sys::Math::random() * u64::MAX as f64) as u64;
		let field = ParticleEngine::new(
			config.clone().unwrap_or_default(),
			theme.clone().unwrap_or_default(),
			w,
			h,
			seed,
		);
		info!(
			"particle-field: mounted {}x{} with {} ambient particles",
			w,
			h,
			field.ambient().len()
		);
		*engine_init.borrow_mut() = Some(field);

		let engine_anim = engine_init.clone();
		let started = loop_init.start(move || {
			let mut surface = CanvasSurface::new(&ctx);
			match engine_anim.borrow_mut().as_mut() {
				Some(field) => field.tick(&mut surface),
				None => false,
			}
		});
		if started.is_none() {
			warn!("particle-field: no window to animate in");
		}
		task.set_value(started);
	});

	let engine_rs = engine.clone();
	let resize_handle = window_event_listener(ev::resize, move |_| {
		let Some(canvas) = canvas_ref.get_untracked() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let Some((w, h)) = surface_size(&canvas, fullscreen) else {
			return;
		};
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);
		if let Some(field) = engine_rs.borrow_mut().as_mut() {
			field.resize(w, h);
			debug!("particle-field: resized to {}x{}", w, h);
		}
	});

	let loop_cleanup = frame_loop.clone();
	on_cleanup(move || {
		loop_cleanup.stop();
		resize_handle.remove();
		task.try_update_value(|t| t.take());
		engine_slot.try_with_value(|engine| {
			if let Some(field) = engine.borrow_mut().as_mut() {
				field.destroy();
			}
		});
	});

	let engine_mm = engine.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some((x, y)) = local_point(canvas_ref, &ev) else {
			return;
		};
		if let Some(field) = engine_mm.borrow_mut().as_mut() {
			field.pointer_move(x, y);
		}
	};

	let engine_ml = engine.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(field) = engine_ml.borrow_mut().as_mut() {
			field.pointer_leave();
		}
	};

	let engine_ck = engine;
	let on_click = move |ev: MouseEvent| {
		let Some((x, y)) = local_point(canvas_ref, &ev) else {
			return;
		};
		if let Some(field) = engine_ck.borrow_mut().as_mut() {
			field.click(x, y);
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="particle-field-canvas"
			on:mousemove=on_mousemove
			on:mouseleave=on_mouseleave
			on:click=on_click
			style="display: block; position: absolute; inset: 0; width: 100%; height: 100%;"
		/>
	}
}
