//! Task aggregate and the pure list-shaping helpers shared by adapters.

use super::Priority;
use serde::{Deserialize, Serialize};

/// Maximum number of characters accepted for a task title.
///
/// Enforced on every buffer mutation, not just at submit time.
pub const MAX_TITLE_LENGTH: usize = 20;

/// Sentinel task identifier meaning "create a new task".
///
/// Distinct from `0`, which marks a task value that has not been persisted
/// yet; the store assigns a real identifier on insert.
pub const NEW_TASK_ID: i64 = -1;

/// A user-created to-do item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: i64,
    title: String,
    description: String,
    priority: Priority,
}

impl Task {
    /// Creates a not-yet-persisted task (id 0).
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        priority: Priority,
    ) -> Self {
        Self {
            id: 0,
            title: title.into(),
            description: description.into(),
            priority,
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn persisted(
        id: i64,
        title: impl Into<String>,
        description: impl Into<String>,
        priority: Priority,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            description: description.into(),
            priority,
        }
    }

    /// Returns the task identifier (0 when not yet persisted).
    #[must_use]
    pub const fn id(&self) -> i64 {
        self.id
    }

    /// Returns the task title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the task description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the task priority.
    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.priority
    }
}

/// Returns tasks ordered by ascending priority rank (Low before High).
///
/// The sort is stable: ties within a priority bucket preserve the input
/// order. Unranked tasks sort before ranked ones, matching the embedded
/// store's NULL-first `ORDER BY CASE` behaviour.
#[must_use]
pub fn sorted_by_rank_ascending(tasks: &[Task]) -> Vec<Task> {
    let mut sorted = tasks.to_vec();
    sorted.sort_by_key(|task| task.priority().rank().unwrap_or(0));
    sorted
}

/// Returns tasks ordered by descending priority rank (High before Low).
///
/// Stable within a bucket; unranked tasks sort first, as in
/// [`sorted_by_rank_ascending`].
#[must_use]
pub fn sorted_by_rank_descending(tasks: &[Task]) -> Vec<Task> {
    let mut sorted = tasks.to_vec();
    sorted.sort_by_key(|task| task.priority().rank().map_or(0, |rank| 4 - rank));
    sorted
}

/// Reports whether a task matches a `%needle%` search pattern.
///
/// The surrounding wildcards are stripped and the remaining needle is
/// matched case-insensitively as a substring of the title or the
/// description, mirroring SQL `LIKE` over ASCII. An empty needle matches
/// every task.
#[must_use]
pub fn matches_search(task: &Task, pattern: &str) -> bool {
    let needle = pattern.trim_matches('%').to_lowercase();
    task.title().to_lowercase().contains(&needle)
        || task.description().to_lowercase().contains(&needle)
}
