//! Board mutations with persistence and user feedback.
//!
//! UI handlers build a [`BoardAction`] and hand it to [`apply`], which updates
//! the state, writes the columns back to the store and reports the outcome
//! through a [`Notifier`].

use log::{info, warn};

use super::notify::{NoticeKind, Notifier};
use super::state::{BOARD_KEY, BoardError, BoardState};
use super::store::KeyValueStore;
use super::types::{WorkItemDraft, initial_columns};

/// A requested board change.
#[derive(Clone, Debug, PartialEq)]
pub enum BoardAction {
	Create {
		column_id: String,
		draft: WorkItemDraft,
		id: String,
	},
	Update {
		item_id: String,
		draft: WorkItemDraft,
	},
	Delete {
		item_id: String,
	},
	Move {
		item_id: String,
		column_id: String,
	},
}

/// Load the persisted board, or the empty default board.
pub fn load(store: &impl KeyValueStore) -> BoardState {
	let board = BoardState::from_columns(store.get(BOARD_KEY, initial_columns()));
	info!(
		"board: loaded {} items across {} columns",
		board.item_count(),
		board.columns.len()
	);
	board
}

/// Apply `action` to `board`. Returns whether the board changed.
///
/// A rejected action leaves the board untouched and is reported as an error.
/// A failed write keeps the in-memory change and is reported as an error.
pub fn apply(
	board: &mut BoardState,
	action: BoardAction,
	store: &impl KeyValueStore,
	notifier: &impl Notifier,
) -> bool {
	let outcome: Result<&'static str, BoardError> = match action {
		BoardAction::Create {
			column_id,
			draft,
			id,
		} => board
			.create(&column_id, draft, id)
			.map(|_| "Work item created"),
		BoardAction::Update { item_id, draft } => {
			board.update(&item_id, draft).map(|_| "Work item updated")
		}
		BoardAction::Delete { item_id } => board.delete(&item_id).map(|_| "Work item deleted"),
		BoardAction::Move { item_id, column_id } => board
			.move_item(&item_id, &column_id)
			.map(|_| "Work item moved"),
	};

	match outcome {
		Ok(message) => {
			match store.set(BOARD_KEY, &board.columns) {
				Ok(()) => notifier.notify(message, NoticeKind::Success),
				Err(e) => {
					warn!("board: failed to persist: {e}");
					notifier.notify(&format!("Change not saved: {e}"), NoticeKind::Error);
				}
			}
			true
		}
		Err(e) => {
			notifier.notify(&format!("Could not save work item: {e}"), NoticeKind::Error);
			false
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::board::notify::RecordingNotifier;
	use crate::components::board::store::{MemoryStore, StorageError};
	use crate::components::board::types::Column;

	fn draft(title: &str) -> WorkItemDraft {
		WorkItemDraft {
			title: title.into(),
			description: "desc".into(),
			..Default::default()
		}
	}

	struct ReadOnlyStore;

	impl KeyValueStore for ReadOnlyStore {
		fn get_raw(&self, _key: &str) -> Option<String> {
			None
		}

		fn set_raw(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
			Err(StorageError::Backend("quota exceeded".into()))
		}
	}

	#[test]
	fn load_defaults_on_empty_store() {
		let board = load(&MemoryStore::default());
		assert_eq!(board, BoardState::default());
	}

	#[test]
	fn create_persists_and_notifies() {
		let (store, notifier) = (MemoryStore::default(), RecordingNotifier::default());
		let mut board = load(&store);

		let changed = apply(
			&mut board,
			BoardAction::Create {
				column_id: "backlog".into(),
				draft: draft("first"),
				id: "100".into(),
			},
			&store,
			&notifier,
		);
		assert!(changed);

		let persisted: Vec<Column> = store.get(BOARD_KEY, Vec::new());
		assert_eq!(persisted, board.columns);
		assert_eq!(load(&store).item_count(), 1);
		assert_eq!(
			notifier.notices.borrow().as_slice(),
			[("Work item created".to_string(), NoticeKind::Success)]
		);
	}

	#[test]
	fn invalid_action_reports_error_and_keeps_board() {
		let (store, notifier) = (MemoryStore::default(), RecordingNotifier::default());
		let mut board = load(&store);

		let changed = apply(
			&mut board,
			BoardAction::Delete {
				item_id: "ghost".into(),
			},
			&store,
			&notifier,
		);
		assert!(!changed);
		assert_eq!(board, BoardState::default());
		assert_eq!(store.get_raw(BOARD_KEY), None);
		let notices = notifier.notices.borrow();
		assert_eq!(notices.len(), 1);
		assert_eq!(notices[0].1, NoticeKind::Error);
	}

	#[test]
	fn failed_write_keeps_change_and_reports_error() {
		let notifier = RecordingNotifier::default();
		let mut board = BoardState::default();

		let changed = apply(
			&mut board,
			BoardAction::Create {
				column_id: "done".into(),
				draft: draft("x"),
				id: "1".into(),
			},
			&ReadOnlyStore,
			&notifier,
		);
		assert!(changed);
		assert_eq!(board.item_count(), 1);
		let notices = notifier.notices.borrow();
		assert_eq!(notices[0].1, NoticeKind::Error);
		assert!(notices[0].0.contains("quota exceeded"));
	}

	#[test]
	fn full_lifecycle_through_actions() {
		let (store, notifier) = (MemoryStore::default(), RecordingNotifier::default());
		let mut board = load(&store);
		let actions = [
			BoardAction::Create {
				column_id: "backlog".into(),
				draft: draft("a"),
				id: "1".into(),
			},
			BoardAction::Update {
				item_id: "1".into(),
				draft: draft("a2"),
			},
			BoardAction::Move {
				item_id: "1".into(),
				column_id: "review".into(),
			},
		];
		for action in actions {
			assert!(apply(&mut board, action, &store, &notifier));
		}

		let reloaded = load(&store);
		let (column, item) = reloaded.find("1").expect("item persisted");
		assert_eq!((column, item.title.as_str()), ("review", "a2"));

		assert!(apply(
			&mut board,
			BoardAction::Delete {
				item_id: "1".into()
			},
			&store,
			&notifier,
		));
		assert_eq!(load(&store).item_count(), 0);
	}
}
