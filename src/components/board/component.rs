//! Leptos components for the kanban board.

use leptos::prelude::*;

use super::actions::{self, BoardAction};
use super::notify::ToastQueue;
use super::panel::WorkItemPanel;
use super::store::AnyStore;
use super::types::{Column, DEFAULT_COLUMN, WorkItem, WorkItemDraft};

/// Millisecond timestamp id for a new item.
fn next_item_id() -> String {
	format!("{}", js_sys::Date::now() as u64)
}

/// Board of status columns backed by browser storage.
///
/// Uses the [`ToastQueue`] from context for feedback when one is provided.
#[component]
pub fn KanbanBoard() -> impl IntoView {
	let toasts = use_context::<ToastQueue>().unwrap_or_default();
	let store = StoredValue::new_local(AnyStore::open());
	let board = RwSignal::new(store.with_value(|s| actions::load(s)));

	let panel_open = RwSignal::new(false);
	let editing = RwSignal::new(None::<WorkItem>);
	let target_column = RwSignal::new(DEFAULT_COLUMN.to_string());

	let dispatch = move |action: BoardAction| {
		let mut next = board.get_untracked();
		if store.with_value(|s| actions::apply(&mut next, action, s, &toasts)) {
			board.set(next);
		}
	};

	let on_add = Callback::new(move |column_id: String| {
		editing.set(None);
		target_column.set(column_id);
		panel_open.set(true);
	});
	let on_edit = Callback::new(move |item: WorkItem| {
		editing.set(Some(item));
		panel_open.set(true);
	});
	let on_delete = Callback::new(move |item_id: String| dispatch(BoardAction::Delete { item_id }));
	let on_move = Callback::new(move |(item_id, column_id): (String, String)| {
		dispatch(BoardAction::Move { item_id, column_id })
	});
	let on_save = Callback::new(move |draft: WorkItemDraft| {
		let action = match editing.get_untracked() {
			Some(item) => BoardAction::Update {
				item_id: item.id,
				draft,
			},
			None => BoardAction::Create {
				column_id: target_column.get_untracked(),
				draft,
				id: next_item_id(),
			},
		};
		dispatch(action);
	});

	view! {
		<section class="board">
			<header class="board-header">
				<h2>"Project Board"</h2>
				<p class="subtitle">"Track and manage your team's workflow"</p>
			</header>
			<div class="board-columns">
				{move || {
					let columns = board.get().columns;
					let next_ids: Vec<Option<String>> = columns
						.iter()
						.skip(1)
						.map(|c| Some(c.id.clone()))
						.chain(std::iter::once(None))
						.collect();
					columns
						.into_iter()
						.zip(next_ids)
						.map(|(column, next_column)| {
							view! {
								<BoardColumn
									column=column
									next_column=next_column
									on_add=on_add
									on_edit=on_edit
									on_delete=on_delete
									on_move=on_move
								/>
							}
						})
						.collect_view()
				}}
			</div>
			<WorkItemPanel open=panel_open editing=editing on_save=on_save />
		</section>
	}
}

/// One status column.
#[component]
fn BoardColumn(
	column: Column,
	next_column: Option<String>,
	on_add: Callback<String>,
	on_edit: Callback<WorkItem>,
	on_delete: Callback<String>,
	on_move: Callback<(String, String)>,
) -> impl IntoView {
	let count = column.items.len();
	let (add_id, empty_add_id) = (column.id.clone(), column.id.clone());

	let items = if column.items.is_empty() {
		view! {
			<div class="column-empty">
				<p>"No items yet"</p>
				<button class="ghost-button" on:click=move |_| on_add.run(empty_add_id.clone())>
					"Add first item"
				</button>
			</div>
		}
		.into_any()
	} else {
		column
			.items
			.into_iter()
			.map(|item| {
				view! {
					<WorkItemCard
						item=item
						next_column=next_column.clone()
						on_edit=on_edit
						on_delete=on_delete
						on_move=on_move
					/>
				}
			})
			.collect_view()
			.into_any()
	};

	view! {
		<div class="board-column">
			<header class="column-header">
				<h3>{column.title}</h3>
				<span class="column-count">{count}</span>
				<button class="icon-button" title="Add item" on:click=move |_| on_add.run(add_id.clone())>
					"+"
				</button>
			</header>
			<div class="column-items">{items}</div>
		</div>
	}
}

/// A single work item card.
#[component]
fn WorkItemCard(
	item: WorkItem,
	next_column: Option<String>,
	on_edit: Callback<WorkItem>,
	on_delete: Callback<String>,
	on_move: Callback<(String, String)>,
) -> impl IntoView {
	let edit_item = item.clone();
	let delete_id = item.id.clone();
	let advance = next_column.map(|column_id| {
		let item_id = item.id.clone();
		view! {
			<button
				class="icon-button"
				title="Move to next column"
				on:click=move |_| on_move.run((item_id.clone(), column_id.clone()))
			>
				"→"
			</button>
		}
	});
	let assignee = (!item.assignee.is_empty())
		.then(|| view! { <div class="card-assignee">{item.assignee.clone()}</div> });

	view! {
		<article class="card">
			<h4 class="card-title">{item.title.clone()}</h4>
			<p class="card-description">{item.description.clone()}</p>
			<div class="card-badges">
				<span class=item.priority.badge_class()>{item.priority.as_str()}</span>
				<span class=item.kind.badge_class()>{item.kind.as_str()}</span>
			</div>
			{assignee}
			<div class="card-actions">
				<button
					class="icon-button"
					title="Edit"
					on:click=move |_| on_edit.run(edit_item.clone())
				>
					"Edit"
				</button>
				<button
					class="icon-button danger"
					title="Delete"
					on:click=move |_| on_delete.run(delete_id.clone())
				>
					"Delete"
				</button>
				{advance}
			</div>
		</article>
	}
}
