//! Task Item Component
//!
//! One row of the task list: completion checkbox, inline edit, delete.

use leptos::prelude::*;
use leptos::task::spawn_local;
use taskflow_client::{TaskDraft, TaskList, TaskManager};

use crate::components::DeleteConfirmButton;
use crate::context::use_app_context;
use crate::store::SignalCell;

/// Renders the task with `id` from the shared list
#[component]
pub fn TaskItem(id: String, tasks: RwSignal<TaskList>) -> impl IntoView {
    let ctx = use_app_context();
    let task_id = StoredValue::new(id.clone());
    let task = Memo::new(move |_| tasks.with(|list| list.get(&id).cloned()));

    let is_completed = move || task.with(|t| t.as_ref().is_some_and(|t| t.is_completed));
    let title = move || task.with(|t| t.as_ref().map(|t| t.title.clone()).unwrap_or_default());
    let description = move || task.with(|t| t.as_ref().and_then(|t| t.description.clone()));

    let (editing, set_editing) = signal(false);
    let (edit_title, set_edit_title) = signal(String::new());
    let (edit_description, set_edit_description) = signal(String::new());

    let toggling = move || task_id.with_value(|id| tasks.with(|list| list.is_toggling(id)));

    let toggle = move |_| {
        let manager = TaskManager::new(ctx.client());
        let id = task_id.get_value();
        spawn_local(async move {
            let _ = manager.toggle(&SignalCell(tasks), &id).await;
        });
    };

    let start_edit = move |_| {
        set_edit_title.set(title());
        set_edit_description.set(description().unwrap_or_default());
        set_editing.set(true);
    };

    let save_edit = move |_| {
        let Ok(draft) = TaskDraft::new(&edit_title.get_untracked(), &edit_description.get_untracked()) else {
            return;
        };
        set_editing.set(false);
        let manager = TaskManager::new(ctx.client());
        let id = task_id.get_value();
        spawn_local(async move {
            let _ = manager.update(&SignalCell(tasks), &id, &draft).await;
        });
    };

    let delete = Callback::new(move |_: ()| {
        let manager = TaskManager::new(ctx.client());
        let id = task_id.get_value();
        spawn_local(async move {
            let _ = manager.delete(&SignalCell(tasks), &id).await;
        });
    });

    let row_class = move || if is_completed() { "task-item completed" } else { "task-item" };

    view! {
        <li class=row_class>
            <Show
                when=move || editing.get()
                fallback=move || view! {
                    <button
                        class=move || if is_completed() { "task-check checked" } else { "task-check" }
                        title=move || if is_completed() { "Mark as not done" } else { "Mark as done" }
                        disabled=toggling
                        on:click=toggle
                    >
                        {move || if is_completed() { "✓" } else { "" }}
                    </button>
                    <div class="task-body">
                        <span class="task-title">{title}</span>
                        {move || description().map(|text| view! {
                            <p class="task-description">{text}</p>
                        })}
                    </div>
                    <div class="task-actions">
                        <button class="edit-btn" title="Edit task" on:click=start_edit>"✎"</button>
                        <DeleteConfirmButton
                            button_class="delete-btn"
                            title="Delete task"
                            prompt="Delete?"
                            on_confirm=delete
                        />
                    </div>
                }
            >
                <div class="task-edit">
                    <input
                        type="text"
                        class="task-title-input"
                        prop:value=move || edit_title.get()
                        on:input=move |ev| set_edit_title.set(event_target_value(&ev))
                    />
                    <textarea
                        class="task-description-input"
                        rows="2"
                        placeholder="Description (optional)"
                        prop:value=move || edit_description.get()
                        on:input=move |ev| set_edit_description.set(event_target_value(&ev))
                    ></textarea>
                    <div class="task-edit-actions">
                        <button
                            class="primary-btn"
                            disabled=move || edit_title.with(|t| t.trim().is_empty())
                            on:click=save_edit
                        >
                            "Save"
                        </button>
                        <button class="secondary-btn" on:click=move |_| set_editing.set(false)>
                            "Cancel"
                        </button>
                    </div>
                </div>
            </Show>
        </li>
    }
}
