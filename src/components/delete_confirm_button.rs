//! Delete Confirm Button Component
//!
//! Destructive actions (a task, a whole conversation) go through this:
//! the first click only asks, the second one commits.

use leptos::prelude::*;

/// × button that turns into an inline yes/no prompt
///
/// `on_confirm` runs only on the ✓ click; ✗ puts the × back.
#[component]
pub fn DeleteConfirmButton(
    #[prop(into)] button_class: String,
    /// Tooltip of the × button
    #[prop(into)]
    title: String,
    /// Question shown while confirming
    #[prop(into)]
    prompt: String,
    #[prop(into)] on_confirm: Callback<()>,
) -> impl IntoView {
    let (asking, set_asking) = signal(false);

    move || {
        if asking.get() {
            view! {
                <span class="delete-confirm">
                    <span class="delete-confirm-text">{prompt.clone()}</span>
                    <button
                        class="confirm-btn"
                        title="Yes, delete"
                        on:click=move |ev| {
                            ev.stop_propagation();
                            set_asking.set(false);
                            on_confirm.run(());
                        }
                    >
                        "✓"
                    </button>
                    <button
                        class="cancel-btn"
                        title="Keep it"
                        on:click=move |ev| {
                            ev.stop_propagation();
                            set_asking.set(false);
                        }
                    >
                        "✗"
                    </button>
                </span>
            }
            .into_any()
        } else {
            view! {
                <button
                    class=button_class.clone()
                    title=title.clone()
                    on:click=move |ev| {
                        ev.stop_propagation();
                        set_asking.set(true);
                    }
                >
                    "×"
                </button>
            }
            .into_any()
        }
    }
}
