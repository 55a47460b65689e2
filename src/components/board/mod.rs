//! Kanban board: work items grouped into status columns.
//!
//! State transitions live in [`BoardState`]; [`actions::apply`] wraps them
//! with persistence through a [`KeyValueStore`] and feedback through a
//! [`Notifier`]. The Leptos components only build [`BoardAction`]s.

pub mod actions;
mod component;
mod notify;
mod panel;
mod state;
mod store;
mod types;

pub use actions::BoardAction;
pub use component::KanbanBoard;
pub use notify::{NoticeKind, Notifier, Toast, ToastQueue, Toaster};
pub use panel::WorkItemPanel;
pub use state::{BOARD_KEY, BoardError, BoardState};
pub use store::{AnyStore, BrowserStore, KeyValueStore, MemoryStore, StorageError};
pub use types::{
	Column, DEFAULT_COLUMN, DraftError, Priority, WorkItem, WorkItemDraft, WorkItemKind,
	initial_columns,
};
