//! Chat Message Bubble

use leptos::prelude::*;
use taskflow_client::Message;

use crate::markdown::render_markdown;

/// User text is shown as-is; assistant replies render as markdown with a
/// footer counting the tool actions they performed.
#[component]
pub fn ChatMessage(message: Message) -> impl IntoView {
    let is_user = message.is_user();
    let row_class = if is_user { "chat-row user" } else { "chat-row assistant" };
    let actions = if is_user { None } else { message.actions_label() };
    let time = message.time_label();

    let body = if is_user {
        view! { <p class="chat-text">{message.content}</p> }.into_any()
    } else {
        let html = render_markdown(&message.content);
        view! { <div class="chat-text markdown-body" inner_html=html></div> }.into_any()
    };

    view! {
        <div class=row_class>
            <div class="chat-bubble">
                {body}
                {actions.map(|label| view! {
                    <div class="chat-actions">
                        <span class="chat-actions-icon">"⚡"</span>
                        <span>{label}</span>
                    </div>
                })}
                <span class="chat-time">{time}</span>
            </div>
        </div>
    }
}
