//! Login Form Component

use leptos::prelude::*;
use leptos::task::spawn_local;
use taskflow_client::validate_login;

use crate::components::ErrorBanner;
use crate::context::{use_app_context, Page};

/// Email/password sign-in
#[component]
pub fn LoginForm(
    /// Arrived here straight from a sign-up that issued no token
    registered: bool,
) -> impl IntoView {
    let ctx = use_app_context();

    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (error, set_error) = signal::<Option<String>>(None);
    let (loading, set_loading) = signal(false);

    let sign_in = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if loading.get_untracked() {
            return;
        }
        let email = email.get_untracked();
        let password = password.get_untracked();
        if let Err(e) = validate_login(&email, &password) {
            set_error.set(Some(e.to_string()));
            return;
        }

        set_error.set(None);
        set_loading.set(true);
        let client = ctx.client();
        spawn_local(async move {
            let result = client.sign_in(&email, &password).await;
            set_loading.set(false);
            match result {
                Ok(()) => ctx.navigate(Page::Dashboard),
                Err(e) => set_error.set(Some(e.to_string())),
            }
        });
    };

    view! {
        <form class="auth-form" on:submit=sign_in>
            <Show when=move || registered>
                <div class="notice-banner">"Account created. Please sign in."</div>
            </Show>
            <ErrorBanner message=Signal::derive(move || error.get()) />

            <label class="field">
                <span class="field-label">"Email"</span>
                <input
                    type="email"
                    placeholder="you@example.com"
                    autocomplete="email"
                    prop:value=move || email.get()
                    on:input=move |ev| set_email.set(event_target_value(&ev))
                    disabled=move || loading.get()
                />
            </label>
            <label class="field">
                <span class="field-label">"Password"</span>
                <input
                    type="password"
                    placeholder="••••••••"
                    autocomplete="current-password"
                    prop:value=move || password.get()
                    on:input=move |ev| set_password.set(event_target_value(&ev))
                    disabled=move || loading.get()
                />
            </label>

            <button type="submit" class="primary-btn" disabled=move || loading.get()>
                {move || if loading.get() { "Signing in..." } else { "Sign in" }}
            </button>

            <p class="auth-switch">
                "Don't have an account? "
                <button type="button" class="link-btn" on:click=move |_| ctx.navigate(Page::Signup)>
                    "Sign up"
                </button>
            </p>
        </form>
    }
}
