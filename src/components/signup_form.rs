//! Signup Form Component

use leptos::prelude::*;
use leptos::task::spawn_local;
use taskflow_client::{validate_signup, MIN_PASSWORD_LEN};
use tracing::info;

use crate::components::ErrorBanner;
use crate::context::{use_app_context, Page};

/// Account creation. Goes straight to the dashboard when the backend issues
/// a token, otherwise to the login screen with a notice.
#[component]
pub fn SignupForm() -> impl IntoView {
    let ctx = use_app_context();

    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (confirm, set_confirm) = signal(String::new());
    let (error, set_error) = signal::<Option<String>>(None);
    let (loading, set_loading) = signal(false);

    let sign_up = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if loading.get_untracked() {
            return;
        }
        let email = email.get_untracked();
        let password = password.get_untracked();
        let confirm = confirm.get_untracked();
        if let Err(e) = validate_signup(&email, &password, &confirm) {
            set_error.set(Some(e.to_string()));
            return;
        }

        set_error.set(None);
        set_loading.set(true);
        let client = ctx.client();
        spawn_local(async move {
            let result = client.sign_up(&email, &password, &confirm).await;
            set_loading.set(false);
            match result {
                Ok(true) => ctx.navigate(Page::Dashboard),
                Ok(false) => {
                    info!("account created without token, continuing to login");
                    ctx.navigate(Page::Login { registered: true });
                }
                Err(e) => set_error.set(Some(e.to_string())),
            }
        });
    };

    let password_hint = format!("At least {} characters", MIN_PASSWORD_LEN);

    view! {
        <form class="auth-form" on:submit=sign_up>
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
                    placeholder=password_hint
                    autocomplete="new-password"
                    prop:value=move || password.get()
                    on:input=move |ev| set_password.set(event_target_value(&ev))
                    disabled=move || loading.get()
                />
            </label>
            <label class="field">
                <span class="field-label">"Confirm password"</span>
                <input
                    type="password"
                    placeholder="Repeat your password"
                    autocomplete="new-password"
                    prop:value=move || confirm.get()
                    on:input=move |ev| set_confirm.set(event_target_value(&ev))
                    disabled=move || loading.get()
                />
            </label>

            <button type="submit" class="primary-btn" disabled=move || loading.get()>
                {move || if loading.get() { "Creating account..." } else { "Create account" }}
            </button>

            <p class="auth-switch">
                "Already have an account? "
                <button
                    type="button"
                    class="link-btn"
                    on:click=move |_| ctx.navigate(Page::Login { registered: false })
                >
                    "Sign in"
                </button>
            </p>
        </form>
    }
}
