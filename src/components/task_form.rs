//! Task Form Component
//!
//! Form for creating new tasks with an optional description.

use leptos::prelude::*;
use leptos::task::spawn_local;
use taskflow_client::{TaskDraft, TaskList, TaskManager};

use crate::context::use_app_context;
use crate::store::SignalCell;

/// Create a task. Fields clear only once the server has accepted it.
#[component]
pub fn TaskForm(tasks: RwSignal<TaskList>) -> impl IntoView {
    let ctx = use_app_context();

    let (title, set_title) = signal(String::new());
    let (description, set_description) = signal(String::new());
    let (show_description, set_show_description) = signal(false);
    let adding = move || tasks.with(|list| list.adding);

    let create_task = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if adding() {
            return;
        }
        let Ok(draft) = TaskDraft::new(&title.get_untracked(), &description.get_untracked()) else {
            return;
        };
        let manager = TaskManager::new(ctx.client());
        spawn_local(async move {
            if manager.create(&SignalCell(tasks), &draft).await.is_ok() {
                set_title.set(String::new());
                set_description.set(String::new());
                set_show_description.set(false);
            }
        });
    };

    view! {
        <form class="task-form" on:submit=create_task>
            <div class="task-form-row">
                <input
                    type="text"
                    class="task-title-input"
                    placeholder="What needs to be done?"
                    prop:value=move || title.get()
                    on:input=move |ev| set_title.set(event_target_value(&ev))
                    disabled=adding
                />
                <button
                    type="submit"
                    class="primary-btn"
                    disabled=move || adding() || title.with(|t| t.trim().is_empty())
                >
                    {move || if adding() { "Adding..." } else { "Add" }}
                </button>
            </div>

            <Show
                when=move || show_description.get()
                fallback=move || view! {
                    <button
                        type="button"
                        class="link-btn"
                        on:click=move |_| set_show_description.set(true)
                    >
                        "+ Add description"
                    </button>
                }
            >
                <textarea
                    class="task-description-input"
                    rows="2"
                    placeholder="Add a description (optional)"
                    prop:value=move || description.get()
                    on:input=move |ev| set_description.set(event_target_value(&ev))
                    disabled=adding
                ></textarea>
                <button
                    type="button"
                    class="link-btn muted"
                    on:click=move |_| {
                        set_show_description.set(false);
                        set_description.set(String::new());
                    }
                >
                    "Remove description"
                </button>
            </Show>
        </form>
    }
}
