//! Task Endpoints

use super::{segment, ApiClient};
use crate::error::ApiResult;
use crate::models::{Task, TaskCreate, TaskListResponse, TaskUpdate};

impl ApiClient {
    /// All tasks of the signed-in user, in server order
    pub async fn list_tasks(&self) -> ApiResult<Vec<Task>> {
        let response: TaskListResponse = self.get("/api/tasks").await?;
        Ok(response.tasks)
    }

    pub async fn create_task(&self, title: &str, description: Option<&str>) -> ApiResult<Task> {
        self.post("/api/tasks", &TaskCreate { title, description }).await
    }

    pub async fn update_task(&self, id: &str, title: &str, description: Option<&str>) -> ApiResult<Task> {
        self.put(&format!("/api/tasks/{}", segment(id)), &TaskUpdate { title, description })
            .await
    }

    pub async fn toggle_task(&self, id: &str) -> ApiResult<Task> {
        self.patch(&format!("/api/tasks/{}/toggle", segment(id))).await
    }

    pub async fn delete_task(&self, id: &str) -> ApiResult<()> {
        self.delete(&format!("/api/tasks/{}", segment(id))).await
    }
}
