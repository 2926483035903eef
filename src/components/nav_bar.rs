//! Navigation Bar Component

use leptos::prelude::*;

use crate::context::use_app_context;

/// Brand plus sign-out, shown above the dashboard
#[component]
pub fn NavBar() -> impl IntoView {
    let ctx = use_app_context();

    view! {
        <nav class="navbar">
            <div class="navbar-brand">
                <span class="navbar-logo">"✓"</span>
                <span class="navbar-title">"TaskFlow"</span>
            </div>
            <div class="navbar-controls">
                <button class="navbar-btn sign-out" title="Sign out" on:click=move |_| ctx.sign_out()>
                    "Sign out"
                </button>
            </div>
        </nav>
    }
}
