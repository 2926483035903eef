//! Chat Panel State Machine
//!
//! One conversation at a time: `Idle -> Sending -> Idle | Failed`.
//! A send optimistically appends the user's message under a temporary id and
//! clears the input. On failure that message is removed and the typed text is
//! put back; on success the assistant reply is appended and, if the assistant
//! ran any tools, a tasks-changed event goes out.

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::api::ApiClient;
use crate::error::{ApiResult, ValidationError};
use crate::events::TaskEvents;
use crate::models::{ChatResponse, Message, Role};
use crate::state::StateCell;
use crate::validation::validate_chat_message;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ChatStatus {
    #[default]
    Idle,
    Sending,
    Failed(String),
}

/// Transcript, input box and status of the chat panel
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChatState {
    messages: Vec<Message>,
    /// Contents of the input box
    pub input: String,
    status: ChatStatus,
    conversation_id: Option<String>,
    next_local_id: u64,
}

/// A send that has been applied locally and awaits the server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSend {
    pub temp_id: String,
    /// Trimmed text that goes over the wire
    pub message: String,
    /// Input exactly as typed, restored on failure
    pub typed: String,
    pub conversation_id: Option<String>,
}

/// What a completed send means for the rest of the page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SendOutcome {
    /// Set when this send started a new conversation
    pub conversation_created: Option<String>,
    /// The assistant ran tools, so the task list is stale
    pub tasks_changed: bool,
}

impl ChatState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Continue an existing conversation
    pub fn with_conversation(conversation_id: impl Into<String>) -> Self {
        Self {
            conversation_id: Some(conversation_id.into()),
            ..Self::default()
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn status(&self) -> &ChatStatus {
        &self.status
    }

    pub fn is_sending(&self) -> bool {
        self.status == ChatStatus::Sending
    }

    pub fn error(&self) -> Option<&str> {
        match &self.status {
            ChatStatus::Failed(detail) => Some(detail.as_str()),
            _ => None,
        }
    }

    pub fn conversation_id(&self) -> Option<&str> {
        self.conversation_id.as_deref()
    }

    /// Whether the send button should be enabled
    pub fn can_send(&self) -> bool {
        !self.is_sending() && !self.input.trim().is_empty()
    }

    pub fn dismiss_error(&mut self) {
        if matches!(self.status, ChatStatus::Failed(_)) {
            self.status = ChatStatus::Idle;
        }
    }

    /// Apply the optimistic half of a send.
    ///
    /// Returns `None`, changing nothing, while a send is in flight or when the
    /// input is blank. An overlong message fails without a request.
    pub fn begin_send(&mut self) -> Option<PendingSend> {
        if self.is_sending() {
            return None;
        }
        let message = match validate_chat_message(&self.input) {
            Ok(message) => message.to_string(),
            Err(ValidationError::EmptyMessage) => return None,
            Err(e) => {
                self.status = ChatStatus::Failed(e.to_string());
                return None;
            }
        };

        let temp_id = self.local_id("temp");
        self.messages.push(Message {
            id: temp_id.clone(),
            role: Role::User,
            content: message.clone(),
            tool_calls: None,
            created_at: now(),
        });
        let typed = std::mem::take(&mut self.input);
        self.status = ChatStatus::Sending;

        Some(PendingSend {
            temp_id,
            message,
            typed,
            conversation_id: self.conversation_id.clone(),
        })
    }

    /// Apply the server's answer to a pending send
    pub fn finish_send(&mut self, pending: PendingSend, result: &ApiResult<ChatResponse>) -> SendOutcome {
        match result {
            Ok(response) => {
                let mut outcome = SendOutcome::default();
                if self.conversation_id.is_none() {
                    self.conversation_id = Some(response.conversation_id.clone());
                    outcome.conversation_created = Some(response.conversation_id.clone());
                }

                let id = self.local_id("response");
                self.messages.push(Message {
                    id,
                    role: Role::Assistant,
                    content: response.response.clone(),
                    tool_calls: (!response.tool_calls.is_empty()).then(|| response.tool_calls.clone()),
                    created_at: now(),
                });
                outcome.tasks_changed = !response.tool_calls.is_empty();
                self.status = ChatStatus::Idle;
                outcome
            }
            Err(e) => {
                self.messages.retain(|m| m.id != pending.temp_id);
                self.input = pending.typed;
                self.status = ChatStatus::Failed(e.detail());
                SendOutcome::default()
            }
        }
    }

    /// Replace the transcript with history loaded from the server
    pub fn load_history(&mut self, conversation_id: &str, messages: Vec<Message>) {
        self.conversation_id = Some(conversation_id.to_string());
        self.messages = messages;
    }

    pub fn fail(&mut self, detail: String) {
        self.status = ChatStatus::Failed(detail);
    }

    /// Forget the conversation and transcript, keeping typed input
    pub fn reset(&mut self) {
        let input = std::mem::take(&mut self.input);
        *self = Self {
            input,
            next_local_id: self.next_local_id,
            ..Self::default()
        };
    }

    fn local_id(&mut self, prefix: &str) -> String {
        self.next_local_id += 1;
        format!("{}-{}", prefix, self.next_local_id)
    }
}

fn now() -> String {
    Utc::now().to_rfc3339()
}

/// Drives [`ChatState`] against the backend
#[derive(Debug, Clone)]
pub struct ChatController {
    client: ApiClient,
    events: TaskEvents,
}

impl ChatController {
    pub fn new(client: ApiClient, events: TaskEvents) -> Self {
        Self { client, events }
    }

    /// Send whatever is in the input box.
    ///
    /// `None` means nothing was sent (blank input, already sending, too long).
    pub async fn send(&self, state: &impl StateCell<ChatState>) -> Option<SendOutcome> {
        let pending = state.update(ChatState::begin_send)?;
        debug!(
            conversation_id = pending.conversation_id.as_deref().unwrap_or("-"),
            "sending chat message"
        );

        let result = self
            .client
            .send_message(&pending.message, pending.conversation_id.as_deref())
            .await;
        if let Err(e) = &result {
            warn!(detail = %e.detail(), "chat message failed");
        }

        let outcome = state.update(|chat| chat.finish_send(pending, &result));
        if let Some(id) = &outcome.conversation_created {
            info!(conversation_id = %id, "conversation started");
        }
        if outcome.tasks_changed {
            self.events.notify();
        }
        Some(outcome)
    }

    /// One-shot history fetch, capped at the configured message count
    pub async fn load_history(&self, state: &impl StateCell<ChatState>, conversation_id: &str) -> ApiResult<()> {
        let limit = self.client.config().effective_history_limit();
        match self.client.get_conversation(conversation_id, limit).await {
            Ok(detail) => {
                debug!(conversation_id, count = detail.messages.len(), has_more = detail.has_more, "history loaded");
                state.update(|chat| chat.load_history(conversation_id, detail.messages));
                Ok(())
            }
            Err(e) => {
                state.update(|chat| chat.fail(e.detail()));
                Err(e)
            }
        }
    }

    /// Start afresh locally. The previous conversation stays on the server.
    pub fn start_new_conversation(&self, state: &impl StateCell<ChatState>) {
        state.update(ChatState::reset);
    }

    /// Delete the current conversation on the server, then start afresh.
    /// On failure the transcript is kept and the error shown.
    pub async fn delete_conversation(&self, state: &impl StateCell<ChatState>) -> ApiResult<()> {
        let current = state.with(|chat| chat.conversation_id.clone());
        if let Some(id) = current {
            if let Err(e) = self.client.delete_conversation(&id).await {
                state.update(|chat| chat.fail(e.detail()));
                return Err(e);
            }
            info!(conversation_id = %id, "conversation deleted");
        }
        state.update(ChatState::reset);
        Ok(())
    }
}
