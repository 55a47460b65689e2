//! Slide-in side panel for creating and editing work items.

use leptos::ev::SubmitEvent;
use leptos::prelude::*;

use super::types::{Priority, WorkItem, WorkItemDraft, WorkItemKind};

/// Form panel. Shows `editing` when set, an empty draft otherwise; on a valid
/// submit, hands the draft to `on_save` and closes.
#[component]
pub fn WorkItemPanel(
	open: RwSignal<bool>,
	editing: RwSignal<Option<WorkItem>>,
	on_save: Callback<WorkItemDraft>,
) -> impl IntoView {
	let title = RwSignal::new(String::new());
	let description = RwSignal::new(String::new());
	let assignee = RwSignal::new(String::new());
	let priority = RwSignal::new(Priority::default());
	let kind = RwSignal::new(WorkItemKind::default());
	let error = RwSignal::new(None::<String>);

	// Reset the form each time the panel opens or the edited item changes.
	Effect::new(move |_| {
		let _ = open.get();
		let draft = editing
			.get()
			.map(|item| WorkItemDraft::from_item(&item))
			.unwrap_or_default();
		title.set(draft.title);
		description.set(draft.description);
		assignee.set(draft.assignee);
		priority.set(draft.priority);
		kind.set(draft.kind);
		error.set(None);
	});

	let on_submit = move |ev: SubmitEvent| {
		ev.prevent_default();
		let draft = WorkItemDraft {
			title: title.get_untracked(),
			description: description.get_untracked(),
			assignee: assignee.get_untracked(),
			priority: priority.get_untracked(),
			kind: kind.get_untracked(),
		};
		match draft.validate() {
			Ok(draft) => {
				on_save.run(draft);
				open.set(false);
			}
			Err(e) => error.set(Some(e.to_string())),
		}
	};

	view! {
		<aside class=move || if open.get() { "side-panel open" } else { "side-panel" }>
			<header class="side-panel-header">
				<h3>
					{move || {
						if editing.with(Option::is_some) { "Edit Work Item" } else { "Create Work Item" }
					}}
				</h3>
				<button class="icon-button" title="Close" on:click=move |_| open.set(false)>
					"×"
				</button>
			</header>
			<form class="side-panel-form" on:submit=on_submit>
				<label for="wi-title">"Title"</label>
				<input
					id="wi-title"
					type="text"
					placeholder="Enter work item title"
					prop:value=move || title.get()
					on:input=move |ev| title.set(event_target_value(&ev))
				/>

				<label for="wi-description">"Description"</label>
				<textarea
					id="wi-description"
					rows="4"
					placeholder="Describe the work item"
					prop:value=move || description.get()
					on:input=move |ev| description.set(event_target_value(&ev))
				></textarea>

				<label for="wi-assignee">"Assignee"</label>
				<input
					id="wi-assignee"
					type="text"
					placeholder="Who is working on this?"
					prop:value=move || assignee.get()
					on:input=move |ev| assignee.set(event_target_value(&ev))
				/>

				<label for="wi-priority">"Priority"</label>
				<select
					id="wi-priority"
					on:change=move |ev| {
						if let Some(p) = Priority::parse(&event_target_value(&ev)) {
							priority.set(p);
						}
					}
				>
					{Priority::ALL
						.into_iter()
						.map(|p| {
							view! {
								<option value=p.as_str() prop:selected=move || priority.get() == p>
									{p.as_str()}
								</option>
							}
						})
						.collect_view()}
				</select>

				<label for="wi-type">"Type"</label>
				<select
					id="wi-type"
					on:change=move |ev| {
						if let Some(k) = WorkItemKind::parse(&event_target_value(&ev)) {
							kind.set(k);
						}
					}
				>
					{WorkItemKind::ALL
						.into_iter()
						.map(|k| {
							view! {
								<option value=k.as_str() prop:selected=move || kind.get() == k>
									{k.as_str()}
								</option>
							}
						})
						.collect_view()}
				</select>

				{move || error.get().map(|e| view! { <p class="form-error">{e}</p> })}

				<div class="side-panel-actions">
					<button type="button" class="ghost-button" on:click=move |_| open.set(false)>
						"Cancel"
					</button>
					<button type="submit" class="primary-button">
						{move || if editing.with(Option::is_some) { "Update" } else { "Create" }}
					</button>
				</div>
			</form>
		</aside>
	}
}
