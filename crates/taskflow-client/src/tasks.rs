//! Task List Manager
//!
//! `TaskList` is the page-local copy of the user's tasks. `TaskManager` runs
//! the backend calls and reconciles that copy:
//! - create/update/delete touch local state only after the server confirms
//! - toggle is optimistic and rolled back if the request fails; one toggle
//!   per task may be in flight, further clicks are ignored until it settles

use std::collections::HashSet;

use tracing::{debug, warn};

use crate::api::ApiClient;
use crate::error::ApiResult;
use crate::models::Task;
use crate::state::StateCell;
use crate::validation::TaskDraft;

/// Locally cached tasks plus the view flags the list renders from
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskList {
    tasks: Vec<Task>,
    /// Initial/refresh fetch in flight
    pub loading: bool,
    /// Create request in flight (disables the form)
    pub adding: bool,
    /// Last request error, until dismissed
    pub error: Option<String>,
    /// Tasks with a toggle request in flight
    toggling: HashSet<String>,
}

impl TaskList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn completed_count(&self) -> usize {
        self.tasks.iter().filter(|t| t.is_completed).count()
    }

    /// Share of completed tasks, 0.0 for an empty list
    pub fn progress_percent(&self) -> f64 {
        if self.tasks.is_empty() {
            0.0
        } else {
            self.completed_count() as f64 / self.tasks.len() as f64 * 100.0
        }
    }

    /// Replace everything with a fresh server listing
    pub fn replace_all(&mut self, tasks: Vec<Task>) {
        self.tasks = tasks;
    }

    /// Newly created tasks go on top
    pub fn prepend(&mut self, task: Task) {
        self.tasks.insert(0, task);
    }

    /// Swap in the server's representation; returns false if the id is gone
    pub fn replace(&mut self, task: Task) -> bool {
        match self.tasks.iter_mut().find(|t| t.id == task.id) {
            Some(slot) => {
                *slot = task;
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        self.tasks.len() != before
    }

    /// Apply a mutation and return the one that undoes it.
    ///
    /// `None` when the target task is not in the list; nothing changed then.
    pub fn apply(&mut self, mutation: &TaskMutation) -> Option<TaskMutation> {
        match mutation {
            TaskMutation::SetCompleted { id, completed } => {
                let task = self.tasks.iter_mut().find(|t| t.id == *id)?;
                let previous = task.is_completed;
                task.is_completed = *completed;
                Some(TaskMutation::SetCompleted {
                    id: id.clone(),
                    completed: previous,
                })
            }
        }
    }

    /// Whether a toggle of `id` is awaiting the server
    pub fn is_toggling(&self, id: &str) -> bool {
        self.toggling.contains(id)
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }
}

/// A speculative local change to a task
///
/// Carries absolute values rather than "flip", so its inverse restores the
/// exact prior state even if the field stops being binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskMutation {
    SetCompleted { id: String, completed: bool },
}

impl TaskMutation {
    /// The mutation a toggle click performs on the current list
    pub fn toggle(list: &TaskList, id: &str) -> Option<Self> {
        list.get(id).map(|task| TaskMutation::SetCompleted {
            id: id.to_string(),
            completed: !task.is_completed,
        })
    }
}

/// Runs task operations against the backend and reconciles local state
#[derive(Debug, Clone)]
pub struct TaskManager {
    client: ApiClient,
}

impl TaskManager {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Fetch the whole list, replacing local state. Also the response to a
    /// tasks-changed signal: no merge, whatever the server says wins.
    ///
    /// A banner from an earlier failure stays up until dismissed; background
    /// refreshes must not swallow it.
    pub async fn refresh(&self, state: &impl StateCell<TaskList>) -> ApiResult<()> {
        state.update(|list| list.loading = true);

        let result = self.client.list_tasks().await;
        state.update(|list| {
            list.loading = false;
            match &result {
                Ok(tasks) => {
                    debug!(count = tasks.len(), "tasks loaded");
                    list.replace_all(tasks.clone());
                }
                Err(e) => list.error = Some(e.detail()),
            }
        });
        result.map(|_| ())
    }

    /// Create on the server, then prepend the returned task
    pub async fn create(&self, state: &impl StateCell<TaskList>, draft: &TaskDraft) -> ApiResult<Task> {
        state.update(|list| {
            list.adding = true;
            list.error = None;
        });

        let result = self
            .client
            .create_task(&draft.title, draft.description.as_deref())
            .await;
        state.update(|list| {
            list.adding = false;
            match &result {
                Ok(task) => list.prepend(task.clone()),
                Err(e) => list.error = Some(e.detail()),
            }
        });
        result
    }

    /// Optimistically flip completion, roll back if the server refuses.
    ///
    /// While a toggle of `id` is in flight another one is a no-op returning
    /// `Ok(false)`, so a rollback can never overwrite a later acknowledged
    /// flip. `Ok(true)` means the server accepted this toggle. The local
    /// state is not reconciled with the server's reply on success; the next
    /// refresh does that.
    pub async fn toggle(&self, state: &impl StateCell<TaskList>, id: &str) -> ApiResult<bool> {
        let started = state.update(|list| {
            if list.is_toggling(id) {
                return None;
            }
            let mutation = TaskMutation::toggle(list, id)?;
            let undo = list.apply(&mutation)?;
            list.toggling.insert(id.to_string());
            Some(undo)
        });
        let Some(undo) = started else {
            debug!(task_id = id, "toggle ignored, one already pending or task unknown");
            return Ok(false);
        };

        let result = self.client.toggle_task(id).await;
        state.update(|list| {
            list.toggling.remove(id);
            if let Err(e) = &result {
                warn!(task_id = id, detail = %e.detail(), "toggle failed, rolling back");
                list.apply(&undo);
                list.error = Some(e.detail());
            }
        });
        result.map(|_| true)
    }

    pub async fn update(&self, state: &impl StateCell<TaskList>, id: &str, draft: &TaskDraft) -> ApiResult<Task> {
        let result = self
            .client
            .update_task(id, &draft.title, draft.description.as_deref())
            .await;
        state.update(|list| match &result {
            Ok(task) => {
                list.replace(task.clone());
            }
            Err(e) => list.error = Some(e.detail()),
        });
        result
    }

    pub async fn delete(&self, state: &impl StateCell<TaskList>, id: &str) -> ApiResult<()> {
        let result = self.client.delete_task(id).await;
        state.update(|list| match &result {
            Ok(()) => {
                list.remove(id);
            }
            Err(e) => list.error = Some(e.detail()),
        });
        result
    }
}
