use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::debug;

use common::types::{Todo, TodoUpdate};

use crate::errors::ServiceError;

struct TodoState {
    todos: Vec<Todo>,
    next_id: u64,
}

/// In-memory todo collection plus the next-id counter.
///
/// All process-lifetime state lives here; one lock covers every
/// read-modify-write so the store is safe to share across request handlers.
/// Ids are strictly increasing and never reused, even after deletion.
#[derive(Clone)]
pub struct TodoStore {
    inner: Arc<RwLock<TodoState>>,
}

impl Default for TodoStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TodoStore {
    pub fn new() -> Self {
        Self { inner: Arc::new(RwLock::new(TodoState { todos: Vec::new(), next_id: 1 })) }
    }

    /// List all todos in insertion order.
    pub async fn list(&self) -> Vec<Todo> {
        let state = self.inner.read().await;
        state.todos.clone()
    }

    /// Create a todo from a raw title. The title is trimmed; an empty result
    /// fails validation without touching the collection or the counter.
    pub async fn create(&self, title: &str) -> Result<Todo, ServiceError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(ServiceError::validation("title is required"));
        }

        let mut state = self.inner.write().await;
        let todo = Todo { id: state.next_id, title: title.to_string(), completed: false };
        state.next_id += 1;
        state.todos.push(todo.clone());
        debug!(id = todo.id, "todo created");
        Ok(todo)
    }

    /// Apply an update to the todo with the given id.
    ///
    /// Validation short-circuits before any mutation: an empty trimmed title
    /// leaves the completed flag from the same request unapplied too.
    pub async fn update(&self, id: u64, update: TodoUpdate) -> Result<Todo, ServiceError> {
        let mut state = self.inner.write().await;
        let todo = state
            .todos
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| ServiceError::not_found("todo"))?;

        let title = match update.title {
            Some(raw) => {
                let trimmed = raw.trim();
                if trimmed.is_empty() {
                    return Err(ServiceError::validation("title cannot be empty"));
                }
                Some(trimmed.to_string())
            }
            None => None,
        };

        if let Some(title) = title {
            todo.title = title;
        }
        if let Some(completed) = update.completed {
            todo.completed = completed;
        }
        debug!(id, "todo updated");
        Ok(todo.clone())
    }

    /// Remove the todo with the given id. Fails when no todo matched.
    pub async fn delete(&self, id: u64) -> Result<(), ServiceError> {
        let mut state = self.inner.write().await;
        let before = state.todos.len();
        state.todos.retain(|t| t.id != id);
        if state.todos.len() == before {
            return Err(ServiceError::not_found("todo"));
        }
        debug!(id, "todo deleted");
        Ok(())
    }
}
