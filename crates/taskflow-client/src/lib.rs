//! TaskFlow Client Core
//!
//! Everything the web app does that is not rendering:
//! - api: HTTP wrapper and per-domain endpoint bindings
//! - session: access token lifecycle and storage
//! - tasks: task list state and the optimistic toggle
//! - chat: chat panel state machine
//! - events: the "tasks changed" broadcast
//!
//! Builds for `wasm32-unknown-unknown` (reqwest uses `fetch` there) and
//! natively, which is where the tests run.

mod api;
mod chat;
mod config;
mod error;
mod events;
mod models;
mod session;
mod state;
mod tasks;
mod validation;

#[cfg(test)]
mod tests;

pub use api::ApiClient;
pub use chat::{ChatController, ChatState, ChatStatus, PendingSend, SendOutcome};
pub use config::ClientConfig;
pub use error::{ApiError, ApiResult, ClientError, ErrorResponse, ValidationError};
pub use events::{TaskEvents, TaskEventsSubscription, TasksChanged};
pub use models::*;
pub use session::{MemoryTokenStore, Session, TokenStore};
pub use state::StateCell;
pub use tasks::{TaskList, TaskManager, TaskMutation};
pub use validation::{
    validate_chat_message, validate_login, validate_signup, TaskDraft, MAX_CHAT_MESSAGE_LEN,
    MIN_PASSWORD_LEN,
};
