//! CRUD operations for the `/items/tasks` collection.
//!
//! Error policy per operation kind: reads swallow failures and substitute
//! an empty result (the page renders an empty list instead of erroring);
//! writes propagate so the page can show a failure message.

use todozen_core::todo::{CreateTodo, Todo, TodoStatus, UpdateTodo};

use crate::api::{decode, DirectusApi};
use crate::error::DirectusError;

const TASKS: &str = "/items/tasks";

fn task_endpoint(id: i64) -> String {
    format!("{TASKS}/{id}")
}

/// Server-side search and status filter for the task list.
///
/// Search and filter are resolved by the backend via query parameters;
/// there is no client-side fallback path. A failed filtered read yields
/// the empty list like any other failed read.
#[derive(Debug, Clone, Default)]
pub struct TodoQuery {
    pub search: Option<String>,
    pub status: Option<TodoStatus>,
}

impl TodoQuery {
    /// Query string pairs for the list endpoint. Blank search terms are
    /// dropped so `/items/tasks` is hit bare when nothing is selected.
    fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(term) = self.search.as_deref() {
            let term = term.trim();
            if !term.is_empty() {
                pairs.push(("search", term.to_string()));
            }
        }
        if let Some(status) = self.status {
            pairs.push(("filter[status][_eq]", status.as_str().to_string()));
        }
        pairs
    }
}

/// Task operations against the backend.
#[derive(Debug, Clone)]
pub struct TodosService {
    api: DirectusApi,
}

impl TodosService {
    pub fn new(api: DirectusApi) -> Self {
        Self { api }
    }

    /// Fetch the task list, optionally searched and filtered server-side.
    ///
    /// Any failure yields the empty list.
    pub async fn list(&self, token: &str, query: &TodoQuery) -> Vec<Todo> {
        let result = self.api.get(TASKS, Some(token), &query.to_pairs()).await;
        match result.and_then(decode::<Option<Vec<Todo>>>) {
            Ok(todos) => todos.unwrap_or_default(),
            Err(err) => {
                tracing::debug!(error = %err, "Task list fetch failed, substituting empty list");
                Vec::new()
            }
        }
    }

    /// Fetch a single task. Any failure yields `None`.
    pub async fn get(&self, token: &str, id: i64) -> Option<Todo> {
        let result = self.api.get(&task_endpoint(id), Some(token), &[]).await;
        match result.and_then(decode::<Option<Todo>>) {
            Ok(todo) => todo,
            Err(err) => {
                tracing::debug!(id, error = %err, "Task fetch failed");
                None
            }
        }
    }

    /// Create a new task. Failures propagate.
    pub async fn create(&self, token: &str, input: &CreateTodo) -> Result<Todo, DirectusError> {
        let body = serde_json::to_value(input).map_err(|e| DirectusError::Decode(e.to_string()))?;
        let data = self.api.post(TASKS, Some(token), &body).await?;
        decode(data)
    }

    /// Partially update a task. Only populated fields are sent. Failures
    /// propagate.
    pub async fn update(
        &self,
        token: &str,
        id: i64,
        input: &UpdateTodo,
    ) -> Result<Todo, DirectusError> {
        let body = serde_json::to_value(input).map_err(|e| DirectusError::Decode(e.to_string()))?;
        let data = self.api.patch(&task_endpoint(id), Some(token), &body).await?;
        decode(data)
    }

    /// Mark a task completed: a single PATCH carrying only the status.
    pub async fn mark_completed(&self, token: &str, id: i64) -> Result<Todo, DirectusError> {
        self.update(token, id, &UpdateTodo::status_only(TodoStatus::Completed))
            .await
    }

    /// Delete a task. Failures propagate.
    pub async fn delete(&self, token: &str, id: i64) -> Result<(), DirectusError> {
        self.api.delete(&task_endpoint(id), Some(token)).await
    }
}
