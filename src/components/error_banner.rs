//! Error Banner Component

use leptos::prelude::*;

/// Renders `message` when present. The × only appears with `on_dismiss`.
#[component]
pub fn ErrorBanner(
    #[prop(into)] message: Signal<Option<String>>,
    #[prop(optional)] on_dismiss: Option<Callback<()>>,
) -> impl IntoView {
    move || {
        message.get().map(|text| {
            view! {
                <div class="error-banner" role="alert">
                    <span class="error-icon">"!"</span>
                    <span class="error-text">{text}</span>
                    {on_dismiss.map(|dismiss| view! {
                        <button class="error-dismiss" title="Dismiss" on:click=move |_| dismiss.run(())>
                            "×"
                        </button>
                    })}
                </div>
            }
        })
    }
}
