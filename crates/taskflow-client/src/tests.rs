//! End-to-end Flow Tests
//!
//! Task manager and chat controller against a mock backend.

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::time::Duration;

    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::api::test_support::authed_client_for;
    use crate::{
        ApiError, ChatController, ChatState, TaskDraft, TaskEvents, TaskList, TaskManager,
    };

    fn task_json(id: &str, title: &str, done: bool) -> serde_json::Value {
        serde_json::json!({
            "id": id,
            "title": title,
            "description": null,
            "is_completed": done,
            "user_id": "u1",
            "created_at": "2025-01-01T10:00:00",
            "updated_at": "2025-01-01T10:00:00"
        })
    }

    async fn setup_tasks(server: &MockServer, tasks: Vec<serde_json::Value>) -> (TaskManager, RefCell<TaskList>) {
        let total = tasks.len();
        Mock::given(method("GET"))
            .and(path("/api/tasks"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "tasks": tasks,
                "total": total
            })))
            .mount(server)
            .await;

        let manager = TaskManager::new(authed_client_for(server, "tok"));
        let state = RefCell::new(TaskList::new());
        manager.refresh(&state).await.expect("Failed to load tasks");
        (manager, state)
    }

    fn completed(state: &RefCell<TaskList>, id: &str) -> bool {
        state.borrow().get(id).expect("task missing").is_completed
    }

    // ========================
    // Tasks
    // ========================

    #[tokio::test]
    async fn test_refresh_loads_in_server_order() {
        let server = MockServer::start().await;
        let (_, state) = setup_tasks(
            &server,
            vec![task_json("t2", "Second", false), task_json("t1", "First", true)],
        )
        .await;

        let list = state.borrow();
        assert!(!list.loading);
        assert_eq!(list.tasks()[0].id, "t2");
        assert_eq!(list.completed_count(), 1);
    }

    #[tokio::test]
    async fn test_create_prepends_buy_milk() {
        let server = MockServer::start().await;
        let (manager, state) = setup_tasks(&server, vec![task_json("t0", "Existing", false)]).await;

        Mock::given(method("POST"))
            .and(path("/api/tasks"))
            .and(body_json(serde_json::json!({"title": "Buy milk", "description": null})))
            .respond_with(ResponseTemplate::new(201).set_body_json(task_json("t1", "Buy milk", false)))
            .expect(1)
            .mount(&server)
            .await;

        let draft = TaskDraft::new("Buy milk", "").unwrap();
        let created = manager.create(&state, &draft).await.unwrap();
        assert_eq!(created.id, "t1");

        let list = state.borrow();
        assert_eq!(list.len(), 2);
        assert_eq!(list.tasks()[0].title, "Buy milk");
        assert_eq!(list.tasks()[1].id, "t0");
        assert!(!list.adding);
    }

    #[tokio::test]
    async fn test_create_failure_leaves_list_and_reports() {
        let server = MockServer::start().await;
        let (manager, state) = setup_tasks(&server, vec![task_json("t0", "Existing", false)]).await;

        Mock::given(method("POST"))
            .and(path("/api/tasks"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({"detail": "Title too long"})))
            .mount(&server)
            .await;

        let draft = TaskDraft::new("x", "").unwrap();
        assert!(manager.create(&state, &draft).await.is_err());

        let list = state.borrow();
        assert_eq!(list.len(), 1);
        assert_eq!(list.error.as_deref(), Some("Title too long"));
        assert!(!list.adding);
    }

    #[tokio::test]
    async fn test_toggle_failure_rolls_back() {
        let server = MockServer::start().await;
        let (manager, state) = setup_tasks(&server, vec![task_json("t1", "Buy milk", false)]).await;

        Mock::given(method("PATCH"))
            .and(path("/api/tasks/t1/toggle"))
            .respond_with(ResponseTemplate::new(500).set_body_json(serde_json::json!({"detail": "Database unavailable"})))
            .mount(&server)
            .await;

        let err = manager.toggle(&state, "t1").await.unwrap_err();
        assert_eq!(err.status_code(), Some(500));
        assert!(!completed(&state, "t1"));
        assert_eq!(state.borrow().error.as_deref(), Some("Database unavailable"));
    }

    #[tokio::test]
    async fn test_double_toggle_returns_to_original() {
        let server = MockServer::start().await;
        let (manager, state) = setup_tasks(&server, vec![task_json("t1", "Buy milk", true)]).await;

        Mock::given(method("PATCH"))
            .and(path("/api/tasks/t1/toggle"))
            .respond_with(ResponseTemplate::new(200).set_body_json(task_json("t1", "Buy milk", false)))
            .expect(2)
            .mount(&server)
            .await;

        assert!(manager.toggle(&state, "t1").await.unwrap());
        assert!(!completed(&state, "t1"));
        assert!(manager.toggle(&state, "t1").await.unwrap());
        assert!(completed(&state, "t1"));
    }

    #[tokio::test]
    async fn test_toggle_while_pending_is_ignored() {
        let server = MockServer::start().await;
        let (manager, state) = setup_tasks(&server, vec![task_json("t1", "Buy milk", false)]).await;

        // Only the first click may reach the server
        Mock::given(method("PATCH"))
            .and(path("/api/tasks/t1/toggle"))
            .respond_with(
                ResponseTemplate::new(500)
                    .set_body_json(serde_json::json!({"detail": "Database unavailable"}))
                    .set_delay(Duration::from_millis(300)),
            )
            .expect(1)
            .mount(&server)
            .await;

        let first = manager.toggle(&state, "t1");
        let second = async {
            tokio::time::sleep(Duration::from_millis(50)).await;
            let pending = state.borrow().is_toggling("t1");
            let optimistic = completed(&state, "t1");
            (pending, optimistic, manager.toggle(&state, "t1").await)
        };
        let (first, (pending, optimistic, second)) = tokio::join!(first, second);

        assert!(pending);
        assert!(optimistic);
        assert!(!second.unwrap());
        assert_eq!(first.unwrap_err().status_code(), Some(500));

        // Server never flipped, and neither does the settled local copy
        let list = state.borrow();
        assert!(!list.get("t1").unwrap().is_completed);
        assert!(!list.is_toggling("t1"));
        assert_eq!(list.error.as_deref(), Some("Database unavailable"));
    }

    #[tokio::test]
    async fn test_refresh_keeps_unread_error() {
        let server = MockServer::start().await;
        let (manager, state) = setup_tasks(&server, vec![task_json("t1", "Buy milk", false)]).await;

        Mock::given(method("DELETE"))
            .and(path("/api/tasks/t1"))
            .respond_with(ResponseTemplate::new(403).set_body_json(serde_json::json!({"detail": "Not allowed"})))
            .mount(&server)
            .await;

        assert!(manager.delete(&state, "t1").await.is_err());
        // e.g. the assistant changed tasks meanwhile
        manager.refresh(&state).await.unwrap();

        let list = state.borrow();
        assert_eq!(list.len(), 1);
        assert_eq!(list.error.as_deref(), Some("Not allowed"));
    }

    #[tokio::test]
    async fn test_update_replaces_with_server_copy() {
        let server = MockServer::start().await;
        let (manager, state) = setup_tasks(&server, vec![task_json("t1", "Buy milk", false)]).await;

        let mut updated = task_json("t1", "Buy oat milk", false);
        updated["description"] = serde_json::json!("2 litres");
        Mock::given(method("PUT"))
            .and(path("/api/tasks/t1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(updated))
            .mount(&server)
            .await;

        let draft = TaskDraft::new("Buy oat milk", "2 litres").unwrap();
        manager.update(&state, "t1", &draft).await.unwrap();

        let list = state.borrow();
        let task = list.get("t1").unwrap();
        assert_eq!(task.title, "Buy oat milk");
        assert_eq!(task.description.as_deref(), Some("2 litres"));
    }

    #[tokio::test]
    async fn test_delete_only_after_confirmation() {
        let server = MockServer::start().await;
        let (manager, state) = setup_tasks(
            &server,
            vec![task_json("t1", "Keep", false), task_json("t2", "Drop", false)],
        )
        .await;

        Mock::given(method("DELETE"))
            .and(path("/api/tasks/t1"))
            .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({"detail": "Task not found"})))
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/api/tasks/t2"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        assert!(manager.delete(&state, "t1").await.is_err());
        assert_eq!(state.borrow().len(), 2);

        manager.delete(&state, "t2").await.unwrap();
        let list = state.borrow();
        assert_eq!(list.len(), 1);
        assert!(list.get("t2").is_none());
    }

    #[tokio::test]
    async fn test_refresh_failure_keeps_cached_tasks() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/tasks"))
            .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({"detail": "Not authenticated"})))
            .mount(&server)
            .await;

        let manager = TaskManager::new(authed_client_for(&server, "expired"));
        let mut cached = TaskList::new();
        cached.replace_all(vec![serde_json::from_value(task_json("t1", "Cached", false)).unwrap()]);
        let state = RefCell::new(cached);

        let err = manager.refresh(&state).await.unwrap_err();
        assert_eq!(err.status_code(), Some(401));
        let list = state.borrow();
        assert_eq!(list.len(), 1);
        assert!(!list.loading);
        assert_eq!(list.error.as_deref(), Some("Not authenticated"));
    }

    // ========================
    // Chat
    // ========================

    fn chat_reply(tools: usize) -> serde_json::Value {
        let tool_calls: Vec<_> = (0..tools)
            .map(|_| serde_json::json!({"tool": "add_task", "arguments": {}, "result": {}}))
            .collect();
        serde_json::json!({
            "response": "Added it",
            "conversation_id": "c1",
            "tool_calls": tool_calls
        })
    }

    #[tokio::test]
    async fn test_chat_tool_calls_signal_once() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .respond_with(ResponseTemplate::new(200).set_body_json(chat_reply(3)))
            .mount(&server)
            .await;

        let events = TaskEvents::new();
        let mut sub = events.subscribe();
        let controller = ChatController::new(authed_client_for(&server, "tok"), events);
        let state = RefCell::new(ChatState::new());
        state.borrow_mut().input = "add milk and eggs".to_string();

        let outcome = controller.send(&state).await.unwrap();
        assert!(outcome.tasks_changed);
        assert_eq!(outcome.conversation_created.as_deref(), Some("c1"));
        assert_eq!(sub.drain_pending(), 1);

        let chat = state.borrow();
        assert_eq!(chat.messages().len(), 2);
        assert_eq!(chat.messages()[1].actions_label().as_deref(), Some("3 actions performed"));
    }

    #[tokio::test]
    async fn test_chat_without_tools_does_not_signal() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .respond_with(ResponseTemplate::new(200).set_body_json(chat_reply(0)))
            .mount(&server)
            .await;

        let events = TaskEvents::new();
        let mut sub = events.subscribe();
        let controller = ChatController::new(authed_client_for(&server, "tok"), events);
        let state = RefCell::new(ChatState::new());
        state.borrow_mut().input = "hello".to_string();

        let outcome = controller.send(&state).await.unwrap();
        assert!(!outcome.tasks_changed);
        assert_eq!(sub.drain_pending(), 0);
    }

    #[tokio::test]
    async fn test_chat_blank_input_sends_nothing() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(chat_reply(0)))
            .expect(0)
            .mount(&server)
            .await;

        let controller = ChatController::new(authed_client_for(&server, "tok"), TaskEvents::new());
        let state = RefCell::new(ChatState::new());
        state.borrow_mut().input = "   ".to_string();

        assert_eq!(controller.send(&state).await, None);
        assert!(state.borrow().messages().is_empty());
    }

    #[tokio::test]
    async fn test_chat_failure_restores_input() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .respond_with(ResponseTemplate::new(503).set_body_json(serde_json::json!({"detail": "Assistant unavailable"})))
            .mount(&server)
            .await;

        let events = TaskEvents::new();
        let mut sub = events.subscribe();
        let controller = ChatController::new(authed_client_for(&server, "tok"), events);
        let state = RefCell::new(ChatState::new());
        state.borrow_mut().input = "delete everything".to_string();

        let outcome = controller.send(&state).await.unwrap();
        assert!(!outcome.tasks_changed);
        assert_eq!(sub.drain_pending(), 0);

        let chat = state.borrow();
        assert!(chat.messages().is_empty());
        assert_eq!(chat.input, "delete everything");
        assert_eq!(chat.error(), Some("Assistant unavailable"));
        assert_eq!(chat.conversation_id(), None);
    }

    #[tokio::test]
    async fn test_chat_load_history() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/chat/conversations/c1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "conversation": {
                    "id": "c1",
                    "title": null,
                    "created_at": "2025-01-01T10:00:00",
                    "updated_at": "2025-01-01T10:00:00",
                    "message_count": 1
                },
                "messages": [{"id": "m1", "role": "user", "content": "hi", "created_at": "2025-01-01T10:00:00"}],
                "has_more": false
            })))
            .mount(&server)
            .await;

        let controller = ChatController::new(authed_client_for(&server, "tok"), TaskEvents::new());
        let state = RefCell::new(ChatState::new());
        controller.load_history(&state, "c1").await.unwrap();

        let chat = state.borrow();
        assert_eq!(chat.conversation_id(), Some("c1"));
        assert_eq!(chat.messages()[0].content, "hi");
    }

    #[tokio::test]
    async fn test_chat_load_history_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/chat/conversations/gone"))
            .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({"detail": "Conversation not found"})))
            .mount(&server)
            .await;

        let controller = ChatController::new(authed_client_for(&server, "tok"), TaskEvents::new());
        let state = RefCell::new(ChatState::new());
        let err = controller.load_history(&state, "gone").await.unwrap_err();

        assert!(matches!(err, ApiError::Status { status_code: 404, .. }));
        assert_eq!(state.borrow().error(), Some("Conversation not found"));
    }

    #[tokio::test]
    async fn test_new_conversation_keeps_server_copy() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .respond_with(ResponseTemplate::new(204))
            .expect(0)
            .mount(&server)
            .await;

        let controller = ChatController::new(authed_client_for(&server, "tok"), TaskEvents::new());
        let state = RefCell::new(ChatState::with_conversation("c1"));
        controller.start_new_conversation(&state);

        let chat = state.borrow();
        assert_eq!(chat.conversation_id(), None);
        assert!(chat.messages().is_empty());
    }

    #[tokio::test]
    async fn test_delete_conversation_then_reset() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/chat/conversations/c1"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let controller = ChatController::new(authed_client_for(&server, "tok"), TaskEvents::new());
        let state = RefCell::new(ChatState::with_conversation("c1"));
        controller.delete_conversation(&state).await.unwrap();
        assert_eq!(state.borrow().conversation_id(), None);

        // Nothing left to delete
        controller.delete_conversation(&state).await.unwrap();
    }

    #[tokio::test]
    async fn test_delete_conversation_failure_keeps_transcript() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/chat/conversations/c1"))
            .respond_with(ResponseTemplate::new(500).set_body_json(serde_json::json!({"detail": "Try again later"})))
            .mount(&server)
            .await;

        let controller = ChatController::new(authed_client_for(&server, "tok"), TaskEvents::new());
        let state = RefCell::new(ChatState::with_conversation("c1"));
        assert!(controller.delete_conversation(&state).await.is_err());

        let chat = state.borrow();
        assert_eq!(chat.conversation_id(), Some("c1"));
        assert_eq!(chat.error(), Some("Try again later"));
    }
}
