//! Work-item data model.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Work item priority.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
	Low,
	#[default]
	Medium,
	High,
}

impl Priority {
	pub const ALL: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::High];

	pub fn as_str(self) -> &'static str {
		match self {
			Priority::Low => "low",
			Priority::Medium => "medium",
			Priority::High => "high",
		}
	}

	pub fn parse(value: &str) -> Option<Self> {
		Self::ALL.into_iter().find(|p| p.as_str() == value)
	}

	/// Badge CSS class.
	pub fn badge_class(self) -> &'static str {
		match self {
			Priority::Low => "badge badge-low",
			Priority::Medium => "badge badge-medium",
			Priority::High => "badge badge-high",
		}
	}
}

/// Kind of work an item represents.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkItemKind {
	Research,
	#[default]
	Design,
	Prototype,
	Testing,
}

impl WorkItemKind {
	pub const ALL: [WorkItemKind; 4] = [
		WorkItemKind::Research,
		WorkItemKind::Design,
		WorkItemKind::Prototype,
		WorkItemKind::Testing,
	];

	pub fn as_str(self) -> &'static str {
		match self {
			WorkItemKind::Research => "research",
			WorkItemKind::Design => "design",
			WorkItemKind::Prototype => "prototype",
			WorkItemKind::Testing => "testing",
		}
	}

	pub fn parse(value: &str) -> Option<Self> {
		Self::ALL.into_iter().find(|k| k.as_str() == value)
	}

	pub fn badge_class(self) -> &'static str {
		match self {
			WorkItemKind::Research => "badge badge-research",
			WorkItemKind::Design => "badge badge-design",
			WorkItemKind::Prototype => "badge badge-prototype",
			WorkItemKind::Testing => "badge badge-testing",
		}
	}
}

impl fmt::Display for Priority {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl fmt::Display for WorkItemKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// A card on the board.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WorkItem {
	pub id: String,
	pub title: String,
	pub description: String,
	/// Empty when unassigned.
	#[serde(default)]
	pub assignee: String,
	#[serde(default)]
	pub priority: Priority,
	#[serde(rename = "type", default)]
	pub kind: WorkItemKind,
}

/// A status column and the items in it, in display order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Column {
	pub id: String,
	pub title: String,
	#[serde(default)]
	pub items: Vec<WorkItem>,
}

impl Column {
	pub fn new(id: &str, title: &str) -> Self {
		Self {
			id: id.to_string(),
			title: title.to_string(),
			items: Vec::new(),
		}
	}
}

/// Column a newly created item lands in when none is given.
pub const DEFAULT_COLUMN: &str = "backlog";

/// The empty board: Backlog, In Progress, Review, Done.
pub fn initial_columns() -> Vec<Column> {
	vec![
		Column::new("backlog", "Backlog"),
		Column::new("in-progress", "In Progress"),
		Column::new("review", "Review"),
		Column::new("done", "Done"),
	]
}

/// Why a draft was rejected.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum DraftError {
	#[error("title is required")]
	MissingTitle,
	#[error("description is required")]
	MissingDescription,
}

/// Editable fields of a work item, as filled in by the side panel.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WorkItemDraft {
	pub title: String,
	pub description: String,
	pub assignee: String,
	pub priority: Priority,
	pub kind: WorkItemKind,
}

impl WorkItemDraft {
	/// Prefill from an existing item.
	pub fn from_item(item: &WorkItem) -> Self {
		Self {
			title: item.title.clone(),
			description: item.description.clone(),
			assignee: item.assignee.clone(),
			priority: item.priority,
			kind: item.kind,
		}
	}

	/// Trim text fields and check required ones.
	pub fn validate(self) -> Result<Self, DraftError> {
		let draft = Self {
			title: self.title.trim().to_string(),
			description: self.description.trim().to_string(),
			assignee: self.assignee.trim().to_string(),
			..self
		};
		if draft.title.is_empty() {
			return Err(DraftError::MissingTitle);
		}
		if draft.description.is_empty() {
			return Err(DraftError::MissingDescription);
		}
		Ok(draft)
	}

	pub fn into_item(self, id: String) -> WorkItem {
		WorkItem {
			id,
			title: self.title,
			description: self.description,
			assignee: self.assignee,
			priority: self.priority,
			kind: self.kind,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn draft_defaults_match_new_item_form() {
		let d = WorkItemDraft::default();
		assert_eq!(d.priority, Priority::Medium);
		assert_eq!(d.kind, WorkItemKind::Design);
	}

	#[test]
	fn validate_trims_and_requires_fields() {
		let d = WorkItemDraft {
			title: "  Wire up canvas ".into(),
			description: " resize handling ".into(),
			..Default::default()
		};
		let d = d.validate().expect("valid draft");
		assert_eq!(d.title, "Wire up canvas");
		assert_eq!(d.description, "resize handling");

		let blank = WorkItemDraft {
			title: "   ".into(),
			description: "x".into(),
			..Default::default()
		};
		assert_eq!(blank.validate(), Err(DraftError::MissingTitle));

		let no_desc = WorkItemDraft {
			title: "x".into(),
			..Default::default()
		};
		assert_eq!(no_desc.validate(), Err(DraftError::MissingDescription));
	}

	#[test]
	fn work_item_json_uses_type_key() {
		let item = WorkItemDraft {
			title: "t".into(),
			description: "d".into(),
			priority: Priority::High,
			kind: WorkItemKind::Testing,
			..Default::default()
		}
		.into_item("1".into());
		let json = serde_json::to_value(&item).expect("serialize");
		assert_eq!(json["type"], "testing");
		assert_eq!(json["priority"], "high");

		let back: WorkItem = serde_json::from_value(json).expect("deserialize");
		assert_eq!(back, item);
	}

	#[test]
	fn missing_optional_fields_default() {
		let item: WorkItem =
			serde_json::from_str(r#"{"id":"9","title":"a","description":"b"}"#).expect("parse");
		assert_eq!(item.assignee, "");
		assert_eq!(item.priority, Priority::Medium);
		assert_eq!(item.kind, WorkItemKind::Design);
	}

	#[test]
	fn parse_round_trips_labels() {
		for p in Priority::ALL {
			assert_eq!(Priority::parse(p.as_str()), Some(p));
		}
		assert_eq!(WorkItemKind::parse("prototype"), Some(WorkItemKind::Prototype));
		assert_eq!(WorkItemKind::parse("bogus"), None);
	}
}
