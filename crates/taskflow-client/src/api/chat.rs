//! Chat Endpoints

use super::{segment, ApiClient};
use crate::error::ApiResult;
use crate::models::{ChatRequest, ChatResponse, ConversationDetailResponse, ConversationListResponse};

impl ApiClient {
    /// Send a message; without a conversation id the server starts a new one
    pub async fn send_message(&self, message: &str, conversation_id: Option<&str>) -> ApiResult<ChatResponse> {
        self.post("/api/chat", &ChatRequest { message, conversation_id }).await
    }

    pub async fn list_conversations(&self) -> ApiResult<ConversationListResponse> {
        self.get("/api/chat/conversations").await
    }

    /// One conversation with at most `limit` of its messages
    pub async fn get_conversation(&self, conversation_id: &str, limit: u32) -> ApiResult<ConversationDetailResponse> {
        self.get(&format!(
            "/api/chat/conversations/{}?limit={}",
            segment(conversation_id),
            limit
        ))
        .await
    }

    pub async fn delete_conversation(&self, conversation_id: &str) -> ApiResult<()> {
        self.delete(&format!("/api/chat/conversations/{}", segment(conversation_id)))
            .await
    }
}
