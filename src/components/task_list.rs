//! Task List View
//!
//! Owns the page's `TaskList` signal: progress, the create form, rows,
//! and the error banner. Reloads whenever `AppContext::reload` fires,
//! which includes the assistant changing tasks from the chat panel.

use leptos::prelude::*;
use leptos::task::spawn_local;
use taskflow_client::{TaskList, TaskManager};
use tracing::debug;

use crate::components::{ErrorBanner, TaskEmpty, TaskForm, TaskItem};
use crate::context::use_app_context;
use crate::store::SignalCell;

#[component]
pub fn TaskListView() -> impl IntoView {
    let ctx = use_app_context();
    let tasks = RwSignal::new(TaskList::new());

    // Load on mount and on every reload request
    Effect::new(move |_| {
        let trigger = ctx.reload_trigger.get();
        debug!(trigger, "loading tasks");
        let manager = TaskManager::new(ctx.client());
        spawn_local(async move {
            let _ = manager.refresh(&SignalCell(tasks)).await;
        });
    });

    // Spinner only before the first listing; later refreshes swap in place
    let first_load = move || tasks.with(|list| list.loading && list.is_empty());
    let task_ids = move || {
        tasks.with(|list| list.tasks().iter().map(|t| t.id.clone()).collect::<Vec<_>>())
    };

    view! {
        <section class="task-panel">
            <div class="progress-card">
                <div class="progress-header">
                    <span class="progress-label">"Progress"</span>
                    <span class="progress-count">
                        {move || tasks.with(|list| format!("{} of {} completed", list.completed_count(), list.len()))}
                    </span>
                </div>
                <div class="progress-track">
                    <div
                        class="progress-fill"
                        style=move || format!("width: {:.0}%", tasks.with(|list| list.progress_percent()))
                    ></div>
                </div>
            </div>

            <TaskForm tasks=tasks />

            <ErrorBanner
                message=Signal::derive(move || tasks.with(|list| list.error.clone()))
                on_dismiss=Callback::new(move |_: ()| tasks.update(|list| list.dismiss_error()))
            />

            <Show
                when=move || !first_load()
                fallback=|| view! { <div class="loading-spinner" aria-label="Loading tasks"></div> }
            >
                <Show when=move || !tasks.with(|list| list.is_empty()) fallback=|| view! { <TaskEmpty /> }>
                    <ul class="task-list">
                        <For
                            each=task_ids
                            key=|id| id.clone()
                            children=move |id| view! { <TaskItem id=id tasks=tasks /> }
                        />
                    </ul>
                </Show>
            </Show>
        </section>
    }
}
