//! Application Context
//!
//! Shared state provided via Leptos Context API.

use std::sync::Arc;

use leptos::prelude::*;
use taskflow_client::{ApiClient, ClientConfig, Session, TaskEvents};
use tracing::info;

use crate::storage::LocalStorageTokenStore;

/// Top-level screens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    /// `registered` shows the "account created" notice after sign-up
    Login { registered: bool },
    Signup,
    Dashboard,
}

/// App-wide handles and signals provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    client: StoredValue<ApiClient>,
    events: StoredValue<TaskEvents>,
    /// Trigger to reload tasks from backend - read
    pub reload_trigger: ReadSignal<u32>,
    /// Trigger to reload tasks from backend - write
    set_reload_trigger: WriteSignal<u32>,
    /// Current screen - read
    pub page: ReadSignal<Page>,
    /// Current screen - write
    set_page: WriteSignal<Page>,
    /// Conversation the chat panel continues - read
    pub conversation_id: ReadSignal<Option<String>>,
    /// Conversation the chat panel continues - write
    set_conversation_id: WriteSignal<Option<String>>,
}

impl AppContext {
    /// Build the client from build-time config and the persisted token
    pub fn new() -> Self {
        let config = ClientConfig::from_build_env();
        let session = Session::init(Arc::new(LocalStorageTokenStore), &config.token_key);
        info!(api_url = %config.api_url, authenticated = session.is_authenticated(), "client ready");

        let client = ApiClient::new(config, session);
        let start = if client.check_auth() {
            Page::Dashboard
        } else {
            Page::Login { registered: false }
        };

        let (reload_trigger, set_reload_trigger) = signal(0u32);
        let (page, set_page) = signal(start);
        let (conversation_id, set_conversation_id) = signal::<Option<String>>(None);

        Self {
            client: StoredValue::new(client),
            events: StoredValue::new(TaskEvents::new()),
            reload_trigger,
            set_reload_trigger,
            page,
            set_page,
            conversation_id,
            set_conversation_id,
        }
    }

    pub fn client(&self) -> ApiClient {
        self.client.get_value()
    }

    pub fn events(&self) -> TaskEvents {
        self.events.get_value()
    }

    /// Trigger a reload of tasks
    pub fn reload(&self) {
        self.set_reload_trigger.update(|v| *v += 1);
    }

    /// Switch screens. The dashboard requires a token; without one this
    /// lands on the login screen instead.
    pub fn navigate(&self, page: Page) {
        let page = match page {
            Page::Dashboard if !self.client().check_auth() => Page::Login { registered: false },
            other => other,
        };
        self.set_page.set(page);
    }

    pub fn set_conversation(&self, id: Option<String>) {
        self.set_conversation_id.set(id);
    }

    /// Drop the token and any conversation, back to login
    pub fn sign_out(&self) {
        self.client().sign_out();
        self.set_conversation_id.set(None);
        self.set_page.set(Page::Login { registered: false });
    }
}

/// Get the app context
pub fn use_app_context() -> AppContext {
    use_context::<AppContext>().expect("AppContext should be provided")
}
