//! Cancellable `requestAnimationFrame` loop.
//!
//! [`FrameLoop`] is the control handle: it is `Send + Sync`, so it can be
//! stopped from a reactive cleanup. [`FrameTask`] owns the JS closure and must
//! be kept alive for as long as the loop should run; dropping it releases the
//! closure.

use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicI32, Ordering};

use log::warn;
use wasm_bindgen::prelude::*;

/// Request ids handed out by the browser are non-zero.
const NO_FRAME: i32 = 0;

type FrameSlot = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// Arms and cancels frame requests.
trait Scheduler {
	/// Request the next frame. Returns the request id, or `None` if no frame
	/// could be scheduled.
	fn request(&self) -> Option<i32>;

	fn cancel(&self, id: i32);
}

/// Schedules the closure held in a [`FrameSlot`] on the browser window.
#[derive(Clone, Default)]
struct WindowScheduler {
	slot: Weak<RefCell<Option<Closure<dyn FnMut()>>>>,
}

impl Scheduler for WindowScheduler {
	fn request(&self) -> Option<i32> {
		let window = web_sys::window()?;
		let slot = self.slot.upgrade()?;
		let cb = slot.borrow();
		let cb = cb.as_ref()?;
		window
			.request_animation_frame(cb.as_ref().unchecked_ref())
			.ok()
	}

	fn cancel(&self, id: i32) {
		if let Some(window) = web_sys::window() {
			let _ = window.cancel_animation_frame(id);
		}
	}
}

/// Owner of the per-frame closure.
pub struct FrameTask {
	_closure: FrameSlot,
}

/// Control handle for an animation loop.
#[derive(Clone, Debug)]
pub struct FrameLoop {
	running: Arc<AtomicBool>,
	pending: Arc<AtomicI32>,
}

impl Default for FrameLoop {
	fn default() -> Self {
		Self::new()
	}
}

impl FrameLoop {
	pub fn new() -> Self {
		Self {
			running: Arc::new(AtomicBool::new(true)),
			pending: Arc::new(AtomicI32::new(NO_FRAME)),
		}
	}

	pub fn is_running(&self) -> bool {
		self.running.load(Ordering::SeqCst)
	}

	/// Id of the frame request currently armed, if any.
	pub fn pending_frame(&self) -> Option<i32> {
		match self.pending.load(Ordering::SeqCst) {
			NO_FRAME => None,
			id => Some(id),
		}
	}

	/// Stop the loop and cancel the armed frame request. No further frame runs.
	pub fn stop(&self) {
		self.stop_with(&WindowScheduler::default());
	}

	fn stop_with(&self, scheduler: &impl Scheduler) {
		self.running.store(false, Ordering::SeqCst);
		let id = self.pending.swap(NO_FRAME, Ordering::SeqCst);
		if id != NO_FRAME {
			scheduler.cancel(id);
		}
	}

	/// Run one frame. Returns whether the next frame should be requested.
	fn run_frame<F: FnMut() -> bool>(&self, step: &mut F) -> bool {
		self.pending.store(NO_FRAME, Ordering::SeqCst);
		if !self.is_running() {
			return false;
		}
		if step() {
			self.is_running()
		} else {
			self.running.store(false, Ordering::SeqCst);
			false
		}
	}

	fn arm(&self, scheduler: &impl Scheduler) {
		match scheduler.request() {
			Some(id) => self.pending.store(id, Ordering::SeqCst),
			None => {
				warn!("particle-field: requestAnimationFrame unavailable; loop stopped");
				self.running.store(false, Ordering::SeqCst);
			}
		}
	}

	/// Body of every scheduled frame: run `step`, then re-arm if still running.
	fn advance<F: FnMut() -> bool>(&self, step: &mut F, scheduler: &impl Scheduler) {
		if self.run_frame(step) {
			self.arm(scheduler);
		}
	}

	/// Start calling `step` once per display frame until it returns `false` or
	/// [`FrameLoop::stop`] is called.
	///
	/// Returns `None` when there is no window to schedule frames on.
	pub fn start(&self, mut step: impl FnMut() -> bool + 'static) -> Option<FrameTask> {
		web_sys::window()?;
		let slot: FrameSlot = Rc::new(RefCell::new(None));
		let scheduler = WindowScheduler {
			slot: Rc::downgrade(&slot),
		};
		let (this, frame_scheduler) = (self.clone(), scheduler.clone());

		*slot.borrow_mut() = Some(Closure::new(move || {
			this.advance(&mut step, &frame_scheduler);
		}));

		self.arm(&scheduler);
		Some(FrameTask { _closure: slot })
	}
}
