//! Live-query broadcast hub shared by the repository adapters.
//!
//! Every query the repository port exposes is derivable from the full table
//! snapshot in id order, so adapters publish that one snapshot after each
//! mutation and the feed re-derives and re-emits each active subscription.
//! Subscriptions whose receivers are gone are pruned on the next broadcast.

use crate::todo::domain::{
    Task, matches_search, sorted_by_rank_ascending, sorted_by_rank_descending,
};
use crate::todo::ports::{TaskListWatch, TaskStoreError, TaskStoreResult, TaskWatch};
use std::collections::HashMap;
use std::sync::Mutex;
use tokio::sync::watch;

/// Fan-out point for the live query subscriptions of one repository.
#[derive(Debug)]
pub(crate) struct TaskFeed {
    all: watch::Sender<Vec<Task>>,
    ascending: watch::Sender<Vec<Task>>,
    descending: watch::Sender<Vec<Task>>,
    points: Mutex<HashMap<i64, watch::Sender<Option<Task>>>>,
    searches: Mutex<HashMap<String, watch::Sender<Vec<Task>>>>,
}

/// Updates a watch channel only when the derived value actually changed,
/// so subscribers are not woken by no-op broadcasts.
fn seed<T: PartialEq>(sender: &watch::Sender<T>, value: T) {
    sender.send_if_modified(|current| {
        if *current == value {
            false
        } else {
            *current = value;
            true
        }
    });
}

fn lock_poisoned(err: impl std::fmt::Display) -> TaskStoreError {
    TaskStoreError::persistence(std::io::Error::other(err.to_string()))
}

impl Default for TaskFeed {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskFeed {
    /// Creates a feed with no subscribers.
    pub(crate) fn new() -> Self {
        let (all, _) = watch::channel(Vec::new());
        let (ascending, _) = watch::channel(Vec::new());
        let (descending, _) = watch::channel(Vec::new());
        Self {
            all,
            ascending,
            descending,
            points: Mutex::new(HashMap::new()),
            searches: Mutex::new(HashMap::new()),
        }
    }

    /// Subscribes to the full list, seeded with the current snapshot.
    pub(crate) fn subscribe_all(&self, snapshot: &[Task]) -> TaskListWatch {
        seed(&self.all, snapshot.to_vec());
        self.all.subscribe()
    }

    /// Subscribes to the ascending-rank list.
    pub(crate) fn subscribe_ascending(&self, snapshot: &[Task]) -> TaskListWatch {
        seed(&self.ascending, sorted_by_rank_ascending(snapshot));
        self.ascending.subscribe()
    }

    /// Subscribes to the descending-rank list.
    pub(crate) fn subscribe_descending(&self, snapshot: &[Task]) -> TaskListWatch {
        seed(&self.descending, sorted_by_rank_descending(snapshot));
        self.descending.subscribe()
    }

    /// Subscribes to the task with the given id.
    ///
    /// # Errors
    ///
    /// Returns a persistence error when the subscription registry lock is
    /// poisoned.
    pub(crate) fn subscribe_point(&self, id: i64, snapshot: &[Task]) -> TaskStoreResult<TaskWatch> {
        let current = snapshot.iter().find(|task| task.id() == id).cloned();
        let mut points = self.points.lock().map_err(lock_poisoned)?;
        if let Some(sender) = points.get(&id)
            && !sender.is_closed()
        {
            seed(sender, current);
            return Ok(sender.subscribe());
        }
        let (sender, receiver) = watch::channel(current);
        points.insert(id, sender);
        Ok(receiver)
    }

    /// Subscribes to the tasks matching a `%…%` pattern.
    ///
    /// # Errors
    ///
    /// Returns a persistence error when the subscription registry lock is
    /// poisoned.
    pub(crate) fn subscribe_search(
        &self,
        pattern: &str,
        snapshot: &[Task],
    ) -> TaskStoreResult<TaskListWatch> {
        let current = filter_search(snapshot, pattern);
        let mut searches = self.searches.lock().map_err(lock_poisoned)?;
        if let Some(sender) = searches.get(pattern)
            && !sender.is_closed()
        {
            seed(sender, current);
            return Ok(sender.subscribe());
        }
        let (sender, receiver) = watch::channel(current);
        searches.insert(pattern.to_owned(), sender);
        Ok(receiver)
    }

    /// Re-derives and re-emits every live subscription from a fresh
    /// full-table snapshot.
    ///
    /// # Errors
    ///
    /// Returns a persistence error when a subscription registry lock is
    /// poisoned.
    pub(crate) fn broadcast(&self, snapshot: &[Task]) -> TaskStoreResult<()> {
        seed(&self.all, snapshot.to_vec());
        seed(&self.ascending, sorted_by_rank_ascending(snapshot));
        seed(&self.descending, sorted_by_rank_descending(snapshot));

        let mut points = self.points.lock().map_err(lock_poisoned)?;
        points.retain(|_, sender| !sender.is_closed());
        for (id, sender) in points.iter() {
            let current = snapshot.iter().find(|task| task.id() == *id).cloned();
            seed(sender, current);
        }
        drop(points);

        let mut searches = self.searches.lock().map_err(lock_poisoned)?;
        searches.retain(|_, sender| !sender.is_closed());
        for (pattern, sender) in searches.iter() {
            seed(sender, filter_search(snapshot, pattern));
        }
        Ok(())
    }
}

fn filter_search(snapshot: &[Task], pattern: &str) -> Vec<Task> {
    snapshot
        .iter()
        .filter(|task| matches_search(task, pattern))
        .cloned()
        .collect()
}
