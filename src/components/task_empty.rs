//! Empty Task List Placeholder

use leptos::prelude::*;

#[component]
pub fn TaskEmpty() -> impl IntoView {
    view! {
        <div class="task-empty">
            <span class="task-empty-icon">"☐"</span>
            <h3>"No tasks yet"</h3>
            <p>"Add one above, or ask the assistant to do it for you."</p>
        </div>
    }
}
