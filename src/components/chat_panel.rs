//! Chat Panel Component
//!
//! Floating assistant panel. Messages go to the backend agent; when a reply
//! reports tool calls the controller broadcasts a tasks-changed event that
//! the app turns into a task list reload.

use leptos::html::Div;
use leptos::prelude::*;
use leptos::task::spawn_local;
use taskflow_client::{ChatController, ChatState};

use crate::components::{ChatMessage, DeleteConfirmButton, ErrorBanner};
use crate::context::use_app_context;
use crate::store::SignalCell;

const GREETING: &str = "Hi! I can add, complete, update and delete tasks for you. Try \"Add buy milk to my list\".";

#[component]
pub fn ChatPanel() -> impl IntoView {
    let ctx = use_app_context();

    let initial = match ctx.conversation_id.get_untracked() {
        Some(id) => ChatState::with_conversation(id),
        None => ChatState::new(),
    };
    let chat = RwSignal::new(initial);
    let (open, set_open) = signal(false);
    let messages_ref = NodeRef::<Div>::new();

    let controller = move || ChatController::new(ctx.client(), ctx.events());

    // Resume a conversation started earlier in this session
    if let Some(id) = ctx.conversation_id.get_untracked() {
        let controller = controller();
        spawn_local(async move {
            let _ = controller.load_history(&SignalCell(chat), &id).await;
        });
    }

    // Keep the newest message in view
    Effect::new(move |_| {
        let _ = chat.with(|c| (c.messages().len(), c.is_sending()));
        let _ = open.get();
        if let Some(el) = messages_ref.get() {
            el.set_scroll_top(el.scroll_height());
        }
    });

    let send = move || {
        let controller = controller();
        spawn_local(async move {
            let outcome = controller.send(&SignalCell(chat)).await;
            if let Some(id) = outcome.and_then(|o| o.conversation_created) {
                ctx.set_conversation(Some(id));
            }
        });
    };

    // Local only; the old conversation stays on the server
    let new_conversation = move |_| {
        controller().start_new_conversation(&SignalCell(chat));
        ctx.set_conversation(None);
    };

    let delete_conversation = Callback::new(move |_: ()| {
        let controller = controller();
        spawn_local(async move {
            if controller.delete_conversation(&SignalCell(chat)).await.is_ok() {
                ctx.set_conversation(None);
            }
        });
    });
    let has_conversation = move || chat.with(|c| c.conversation_id().is_some());

    let sending = move || chat.with(|c| c.is_sending());
    let show_greeting = move || chat.with(|c| c.messages().is_empty() && !c.is_sending());

    view! {
        <Show when=move || open.get()>
            <aside class="chat-panel">
                <header class="chat-header">
                    <div class="chat-header-title">
                        <span class="chat-avatar">"✦"</span>
                        <div>
                            <h3>"Task Assistant"</h3>
                            <span class="chat-subtitle">"Manage tasks in plain language"</span>
                        </div>
                    </div>
                    <div class="chat-header-controls">
                        <Show when=move || has_conversation() && !sending()>
                            <DeleteConfirmButton
                                button_class="chat-header-btn"
                                title="Delete this conversation"
                                prompt="Delete conversation?"
                                on_confirm=delete_conversation
                            />
                        </Show>
                        <button
                            class="chat-header-btn"
                            title="New conversation"
                            disabled=sending
                            on:click=new_conversation
                        >
                            "+"
                        </button>
                        <button class="chat-header-btn" title="Close" on:click=move |_| set_open.set(false)>
                            "✕"
                        </button>
                    </div>
                </header>

                <div class="chat-messages" node_ref=messages_ref>
                    <Show when=show_greeting>
                        <div class="chat-row assistant">
                            <div class="chat-bubble greeting">{GREETING}</div>
                        </div>
                    </Show>
                    <For
                        each=move || chat.with(|c| c.messages().to_vec())
                        key=|message| message.id.clone()
                        children=|message| view! { <ChatMessage message=message /> }
                    />
                    <Show when=sending>
                        <div class="chat-row assistant">
                            <div class="chat-bubble typing-indicator" aria-label="Assistant is typing">
                                <span></span>
                                <span></span>
                                <span></span>
                            </div>
                        </div>
                    </Show>
                </div>

                <ErrorBanner
                    message=Signal::derive(move || chat.with(|c| c.error().map(str::to_string)))
                    on_dismiss=Callback::new(move |_: ()| chat.update(|c| c.dismiss_error()))
                />

                <form
                    class="chat-input-row"
                    on:submit=move |ev: web_sys::SubmitEvent| {
                        ev.prevent_default();
                        send();
                    }
                >
                    <input
                        type="text"
                        class="chat-input"
                        placeholder="Ask me to manage your tasks..."
                        prop:value=move || chat.with(|c| c.input.clone())
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            chat.update(|c| c.input = value);
                        }
                        disabled=sending
                    />
                    <button
                        type="submit"
                        class="chat-send-btn"
                        title="Send"
                        disabled=move || !chat.with(|c| c.can_send())
                    >
                        "➤"
                    </button>
                </form>
            </aside>
        </Show>

        <button
            class=move || if open.get() { "chat-toggle open" } else { "chat-toggle" }
            title=move || if open.get() { "Close assistant" } else { "Open assistant" }
            on:click=move |_| set_open.update(|o| *o = !*o)
        >
            {move || if open.get() { "✕" } else { "💬" }}
        </button>
    }
}
