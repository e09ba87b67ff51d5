//! Pending-edit buffer backing the create/edit task form.

use super::{MAX_TITLE_LENGTH, Priority, Task};

/// The coordinator's single mutable working copy of at most one task.
///
/// Holds the form fields for the task being created or edited. The title
/// stays under [`MAX_TITLE_LENGTH`] characters; the invariant is enforced on
/// every mutation through [`EditBuffer::set_title`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditBuffer {
    id: i64,
    title: String,
    description: String,
    priority: Priority,
}

impl Default for EditBuffer {
    fn default() -> Self {
        Self {
            id: 0,
            title: String::new(),
            description: String::new(),
            priority: Priority::Low,
        }
    }
}

impl EditBuffer {
    /// Returns the identifier of the task being edited (0 for a new task).
    #[must_use]
    pub const fn id(&self) -> i64 {
        self.id
    }

    /// Returns the buffered title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the buffered description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the buffered priority.
    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.priority
    }

    /// Resets the buffer to the blank-creation-form defaults.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Copies a loaded task's fields into the buffer.
    pub fn load(&mut self, task: &Task) {
        self.id = task.id();
        self.title = task.title().to_owned();
        self.description = task.description().to_owned();
        self.priority = task.priority();
    }

    /// Sets the title when it fits under [`MAX_TITLE_LENGTH`] characters.
    ///
    /// Longer titles are silently ignored; this is a truncation guard, not a
    /// validation failure.
    pub fn set_title(&mut self, title: &str) {
        if title.chars().count() < MAX_TITLE_LENGTH {
            self.title = title.to_owned();
        }
    }

    /// Sets the description unconditionally.
    pub fn set_description(&mut self, description: &str) {
        self.description = description.to_owned();
    }

    /// Sets the priority unconditionally.
    pub const fn set_priority(&mut self, priority: Priority) {
        self.priority = priority;
    }

    /// Returns true when both title and description are non-empty.
    ///
    /// Gates navigation away from the edit form on add/update.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.title.is_empty() && !self.description.is_empty()
    }

    /// Builds a fresh, unpersisted task from the buffered fields.
    #[must_use]
    pub fn as_new_task(&self) -> Task {
        Task::new(self.title.clone(), self.description.clone(), self.priority)
    }

    /// Builds a task carrying the buffered identifier, for update/delete.
    #[must_use]
    pub fn as_existing_task(&self) -> Task {
        Task::persisted(
            self.id,
            self.title.clone(),
            self.description.clone(),
            self.priority,
        )
    }
}
