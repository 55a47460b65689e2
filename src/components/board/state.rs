//! Board state transitions.
//!
//! Every operation is a rewrite of the column list keyed by item id; there is
//! no ordering logic beyond "append to the target column".

use log::debug;
use thiserror::Error;

use super::types::{Column, DraftError, WorkItem, WorkItemDraft, initial_columns};

/// Storage key the board is persisted under.
pub const BOARD_KEY: &str = "kanban-columns";

/// Board operation errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BoardError {
	#[error("no column named {0:?}")]
	UnknownColumn(String),
	#[error("no work item with id {0:?}")]
	UnknownItem(String),
	#[error("invalid work item: {0}")]
	Invalid(#[from] DraftError),
}

/// All columns and their items.
#[derive(Clone, Debug, PartialEq)]
pub struct BoardState {
	pub columns: Vec<Column>,
}

impl Default for BoardState {
	fn default() -> Self {
		Self {
			columns: initial_columns(),
		}
	}
}

impl BoardState {
	pub fn from_columns(columns: Vec<Column>) -> Self {
		Self { columns }
	}

	pub fn item_count(&self) -> usize {
		self.columns.iter().map(|c| c.items.len()).sum()
	}

	pub fn column(&self, column_id: &str) -> Option<&Column> {
		self.columns.iter().find(|c| c.id == column_id)
	}

	/// The item with `item_id` and the id of the column holding it.
	pub fn find(&self, item_id: &str) -> Option<(&str, &WorkItem)> {
		self.columns.iter().find_map(|c| {
			c.items
				.iter()
				.find(|i| i.id == item_id)
				.map(|i| (c.id.as_str(), i))
		})
	}

	fn find_mut(&mut self, item_id: &str) -> Option<&mut WorkItem> {
		self.columns
			.iter_mut()
			.flat_map(|c| c.items.iter_mut())
			.find(|i| i.id == item_id)
	}

	/// Validate `draft` and append it to `column_id` under `id`.
	pub fn create(
		&mut self,
		column_id: &str,
		draft: WorkItemDraft,
		id: String,
	) -> Result<&WorkItem, BoardError> {
		let draft = draft.validate()?;
		let column = self
			.columns
			.iter_mut()
			.find(|c| c.id == column_id)
			.ok_or_else(|| BoardError::UnknownColumn(column_id.to_string()))?;
		debug!("board: create {id} in {column_id}");
		let pos = column.items.len();
		column.items.push(draft.into_item(id));
		Ok(&column.items[pos])
	}

	/// Replace the editable fields of an existing item; it stays in its column.
	pub fn update(&mut self, item_id: &str, draft: WorkItemDraft) -> Result<&WorkItem, BoardError> {
		let draft = draft.validate()?;
		let item = self
			.find_mut(item_id)
			.ok_or_else(|| BoardError::UnknownItem(item_id.to_string()))?;
		debug!("board: update {item_id}");
		*item = draft.into_item(item.id.clone());
		Ok(item)
	}

	/// Remove an item wherever it is.
	pub fn delete(&mut self, item_id: &str) -> Result<WorkItem, BoardError> {
		for column in &mut self.columns {
			if let Some(pos) = column.items.iter().position(|i| i.id == item_id) {
				debug!("board: delete {item_id} from {}", column.id);
				return Ok(column.items.remove(pos));
			}
		}
		Err(BoardError::UnknownItem(item_id.to_string()))
	}

	/// Move an item to the end of another column.
	pub fn move_item(&mut self, item_id: &str, column_id: &str) -> Result<(), BoardError> {
		if self.column(column_id).is_none() {
			return Err(BoardError::UnknownColumn(column_id.to_string()));
		}
		let item = self.delete(item_id)?;
		if let Some(column) = self.columns.iter_mut().find(|c| c.id == column_id) {
			column.items.push(item);
		}
		debug!("board: moved {item_id} to {column_id}");
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::board::types::{Priority, WorkItemKind};

	fn draft(title: &str) -> WorkItemDraft {
		WorkItemDraft {
			title: title.into(),
			description: format!("{title} details"),
			..Default::default()
		}
	}

	#[test]
	fn default_board_has_four_empty_columns() {
		let board = BoardState::default();
		let ids: Vec<_> = board.columns.iter().map(|c| c.id.as_str()).collect();
		assert_eq!(ids, ["backlog", "in-progress", "review", "done"]);
		assert_eq!(board.item_count(), 0);
	}

	#[test]
	fn create_appends_to_target_column() {
		let mut board = BoardState::default();
		board.create("review", draft("a"), "1".into()).expect("create");
		board.create("review", draft("b"), "2".into()).expect("create");

		let review = board.column("review").expect("column");
		let titles: Vec<_> = review.items.iter().map(|i| i.title.as_str()).collect();
		assert_eq!(titles, ["a", "b"]);
		assert_eq!(board.find("2").map(|(col, _)| col), Some("review"));
	}

	#[test]
	fn create_rejects_unknown_column_and_invalid_draft() {
		let mut board = BoardState::default();
		assert_eq!(
			board.create("nowhere", draft("a"), "1".into()).err(),
			Some(BoardError::UnknownColumn("nowhere".into()))
		);
		assert_eq!(
			board.create("backlog", WorkItemDraft::default(), "1".into()).err(),
			Some(BoardError::Invalid(DraftError::MissingTitle))
		);
		assert_eq!(board.item_count(), 0);
	}

	#[test]
	fn update_rewrites_fields_in_place() {
		let mut board = BoardState::default();
		board.create("done", draft("a"), "1".into()).expect("create");
		let edited = WorkItemDraft {
			priority: Priority::High,
			kind: WorkItemKind::Research,
			assignee: "sam".into(),
			..draft("renamed")
		};

		let item = board.update("1", edited).expect("update");
		assert_eq!(item.id, "1");
		assert_eq!(item.title, "renamed");
		assert_eq!(item.priority, Priority::High);
		assert_eq!(board.find("1").map(|(col, _)| col), Some("done"));
		assert_eq!(
			board.update("missing", draft("x")).err(),
			Some(BoardError::UnknownItem("missing".into()))
		);
	}

	#[test]
	fn delete_removes_from_any_column() {
		let mut board = BoardState::default();
		board.create("backlog", draft("a"), "1".into()).expect("create");
		board.create("done", draft("b"), "2".into()).expect("create");

		let removed = board.delete("2").expect("delete");
		assert_eq!(removed.title, "b");
		assert_eq!(board.item_count(), 1);
		assert!(board.delete("2").is_err());
	}

	#[test]
	fn move_item_between_columns() {
		let mut board = BoardState::default();
		board.create("backlog", draft("a"), "1".into()).expect("create");

		board.move_item("1", "in-progress").expect("move");
		assert_eq!(board.find("1").map(|(col, _)| col), Some("in-progress"));
		assert!(board.column("backlog").expect("column").items.is_empty());

		assert_eq!(
			board.move_item("1", "archive"),
			Err(BoardError::UnknownColumn("archive".into()))
		);
		assert_eq!(board.find("1").map(|(col, _)| col), Some("in-progress"));
	}
}
