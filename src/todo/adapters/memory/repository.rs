//! Thread-safe in-memory task repository.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use crate::todo::adapters::feed::TaskFeed;
use crate::todo::domain::Task;
use crate::todo::ports::{
    TaskListWatch, TaskRepository, TaskStoreError, TaskStoreResult, TaskWatch,
};

/// In-memory task repository with the same live-query behaviour as the
/// SQLite adapter.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    state: Arc<RwLock<InMemoryTaskState>>,
    feed: Arc<TaskFeed>,
}

#[derive(Debug, Default)]
struct InMemoryTaskState {
    tasks: BTreeMap<i64, Task>,
    next_id: i64,
}

impl InMemoryTaskState {
    /// Full table contents in ascending id order.
    fn snapshot(&self) -> Vec<Task> {
        self.tasks.values().cloned().collect()
    }
}

fn lock_poisoned(err: impl std::fmt::Display) -> TaskStoreError {
    TaskStoreError::persistence(std::io::Error::other(err.to_string()))
}

impl InMemoryTaskRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read_snapshot(&self) -> TaskStoreResult<Vec<Task>> {
        let state = self.state.read().map_err(lock_poisoned)?;
        Ok(state.snapshot())
    }
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn insert(&self, task: &Task) -> TaskStoreResult<()> {
        let snapshot = {
            let mut state = self.state.write().map_err(lock_poisoned)?;
            if task.id() == 0 {
                state.next_id += 1;
                let id = state.next_id;
                let stored =
                    Task::persisted(id, task.title(), task.description(), task.priority());
                state.tasks.insert(id, stored);
            } else if !state.tasks.contains_key(&task.id()) {
                state.next_id = state.next_id.max(task.id());
                state.tasks.insert(task.id(), task.clone());
            }
            state.snapshot()
        };
        self.feed.broadcast(&snapshot)
    }

    async fn replace(&self, task: &Task) -> TaskStoreResult<()> {
        let snapshot = {
            let mut state = self.state.write().map_err(lock_poisoned)?;
            if state.tasks.contains_key(&task.id()) {
                state.tasks.insert(task.id(), task.clone());
            }
            state.snapshot()
        };
        self.feed.broadcast(&snapshot)
    }

    async fn delete(&self, task: &Task) -> TaskStoreResult<()> {
        let snapshot = {
            let mut state = self.state.write().map_err(lock_poisoned)?;
            let matches_row = state.tasks.get(&task.id()).is_some_and(|stored| stored == task);
            if matches_row {
                state.tasks.remove(&task.id());
            }
            state.snapshot()
        };
        self.feed.broadcast(&snapshot)
    }

    async fn delete_all(&self) -> TaskStoreResult<()> {
        let snapshot = {
            let mut state = self.state.write().map_err(lock_poisoned)?;
            state.tasks.clear();
            state.snapshot()
        };
        self.feed.broadcast(&snapshot)
    }

    async fn watch_all(&self) -> TaskStoreResult<TaskListWatch> {
        let snapshot = self.read_snapshot()?;
        Ok(self.feed.subscribe_all(&snapshot))
    }

    async fn watch_task(&self, id: i64) -> TaskStoreResult<TaskWatch> {
        let snapshot = self.read_snapshot()?;
        self.feed.subscribe_point(id, &snapshot)
    }

    async fn watch_search(&self, pattern: &str) -> TaskStoreResult<TaskListWatch> {
        let snapshot = self.read_snapshot()?;
        self.feed.subscribe_search(pattern, &snapshot)
    }

    async fn watch_sorted_ascending(&self) -> TaskStoreResult<TaskListWatch> {
        let snapshot = self.read_snapshot()?;
        Ok(self.feed.subscribe_ascending(&snapshot))
    }

    async fn watch_sorted_descending(&self) -> TaskStoreResult<TaskListWatch> {
        let snapshot = self.read_snapshot()?;
        Ok(self.feed.subscribe_descending(&snapshot))
    }
}
