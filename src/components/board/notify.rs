//! Transient user notifications (toasts).

use std::time::Duration;

use leptos::prelude::*;

/// How long a toast stays on screen.
const TOAST_TTL: Duration = Duration::from_millis(3500);

/// Severity of a notification.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
	Success,
	Error,
}

impl NoticeKind {
	fn css_class(self) -> &'static str {
		match self {
			NoticeKind::Success => "toast toast-success",
			NoticeKind::Error => "toast toast-error",
		}
	}
}

/// Sink for user-facing feedback messages.
pub trait Notifier {
	fn notify(&self, message: &str, kind: NoticeKind);
}

/// A toast currently on screen.
#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
	pub id: u64,
	pub message: String,
	pub kind: NoticeKind,
}

/// Signal-backed toast list; each toast removes itself after [`TOAST_TTL`].
#[derive(Clone, Copy, Debug)]
pub struct ToastQueue {
	toasts: RwSignal<Vec<Toast>>,
	next_id: StoredValue<u64>,
}

impl Default for ToastQueue {
	fn default() -> Self {
		Self::new()
	}
}

impl ToastQueue {
	pub fn new() -> Self {
		Self {
			toasts: RwSignal::new(Vec::new()),
			next_id: StoredValue::new(0),
		}
	}

	pub fn toasts(&self) -> Vec<Toast> {
		self.toasts.get()
	}

	pub fn dismiss(&self, id: u64) {
		self.toasts.update(|toasts| toasts.retain(|t| t.id != id));
	}

	/// Show a toast until it is dismissed. Returns its id.
	fn push(&self, message: &str, kind: NoticeKind) -> u64 {
		let id = self.next_id.get_value();
		self.next_id.set_value(id + 1);
		self.toasts.update(|toasts| {
			toasts.push(Toast {
				id,
				message: message.to_string(),
				kind,
			})
		});
		id
	}
}

impl Notifier for ToastQueue {
	fn notify(&self, message: &str, kind: NoticeKind) {
		let id = self.push(message, kind);
		let queue = *self;
		set_timeout(move || queue.dismiss(id), TOAST_TTL);
	}
}

/// Renders the toasts of the [`ToastQueue`] found in context.
#[component]
pub fn Toaster() -> impl IntoView {
	let queue = use_context::<ToastQueue>().unwrap_or_default();

	view! {
		<div class="toaster" role="status">
			{move || {
				queue
					.toasts()
					.into_iter()
					.map(|toast| {
						let id = toast.id;
						view! {
							<div class=toast.kind.css_class() on:click=move |_| queue.dismiss(id)>
								{toast.message}
							</div>
						}
					})
					.collect_view()
			}}
		</div>
	}
}

/// Captures notifications for assertions.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingNotifier {
	pub notices: std::cell::RefCell<Vec<(String, NoticeKind)>>,
}

#[cfg(test)]
impl Notifier for RecordingNotifier {
	fn notify(&self, message: &str, kind: NoticeKind) {
		self.notices.borrow_mut().push((message.to_string(), kind));
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn ids_increase_and_dismiss_removes_only_that_toast() {
		let owner = Owner::new();
		owner.with(|| {
			let queue = ToastQueue::new();
			let first = queue.push("saved", NoticeKind::Success);
			let second = queue.push("failed", NoticeKind::Error);
			assert_eq!((first, second), (0, 1));

			queue.dismiss(first);
			assert_eq!(
				queue.toasts.get_untracked(),
				[Toast {
					id: 1,
					message: "failed".into(),
					kind: NoticeKind::Error,
				}]
			);

			// Dismissed ids are not reused.
			assert_eq!(queue.push("again", NoticeKind::Success), 2);
			queue.dismiss(42);
			assert_eq!(queue.toasts.get_untracked().len(), 2);
		});
	}

	#[test]
	fn queues_are_independent() {
		let owner = Owner::new();
		owner.with(|| {
			let (a, b) = (ToastQueue::new(), ToastQueue::new());
			a.push("only a", NoticeKind::Success);
			assert_eq!(b.push("b", NoticeKind::Success), 0);
			assert_eq!(a.toasts.get_untracked().len(), 1);
		});
	}
}
