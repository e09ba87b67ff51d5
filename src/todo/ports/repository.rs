//! Repository port for task persistence and live query subscriptions.

use crate::todo::domain::Task;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::watch;

/// Result type for task store operations.
pub type TaskStoreResult<T> = Result<T, TaskStoreError>;

/// Live subscription to a list-shaped query.
///
/// The receiver is seeded with the current result at subscribe time and
/// receives a fresh snapshot after every store mutation. Dropping the
/// receiver cancels the subscription.
pub type TaskListWatch = watch::Receiver<Vec<Task>>;

/// Live subscription to a point lookup by task identifier.
pub type TaskWatch = watch::Receiver<Option<Task>>;

/// Task persistence contract.
///
/// Reads are long-lived subscriptions delivering values asynchronously;
/// only the subscribe call itself can fail. Writes mutate the table and
/// re-emit on every affected subscription before returning.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores a task, ignoring the write when its identifier already
    /// exists. A task with id 0 receives a fresh store-assigned identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::Persistence`] when the store is
    /// unreachable.
    async fn insert(&self, task: &Task) -> TaskStoreResult<()>;

    /// Overwrites the stored task with the same identifier. A no-op when no
    /// such task exists.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::Persistence`] when the store is
    /// unreachable.
    async fn replace(&self, task: &Task) -> TaskStoreResult<()>;

    /// Deletes the stored task matching every field of `task`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::Persistence`] when the store is
    /// unreachable.
    async fn delete(&self, task: &Task) -> TaskStoreResult<()>;

    /// Deletes every stored task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::Persistence`] when the store is
    /// unreachable.
    async fn delete_all(&self) -> TaskStoreResult<()>;

    /// Subscribes to the full task list ordered by id ascending.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::Persistence`] when the initial read fails.
    async fn watch_all(&self) -> TaskStoreResult<TaskListWatch>;

    /// Subscribes to the task with the given identifier.
    ///
    /// Emits `None` while no such task exists.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::Persistence`] when the initial read fails.
    async fn watch_task(&self, id: i64) -> TaskStoreResult<TaskWatch>;

    /// Subscribes to tasks whose title or description matches the `%…%`
    /// pattern, case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::Persistence`] when the initial read fails.
    async fn watch_search(&self, pattern: &str) -> TaskStoreResult<TaskListWatch>;

    /// Subscribes to the task list ordered by ascending priority rank
    /// (Low=1 .. High=3), stable within a bucket.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::Persistence`] when the initial read fails.
    async fn watch_sorted_ascending(&self) -> TaskStoreResult<TaskListWatch>;

    /// Subscribes to the task list ordered by descending priority rank
    /// (High=3 .. Low=1), stable within a bucket.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::Persistence`] when the initial read fails.
    async fn watch_sorted_descending(&self) -> TaskStoreResult<TaskListWatch>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskStoreError {
    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskStoreError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
