//! Diesel schema for task persistence.

diesel::table! {
    /// Persisted to-do tasks.
    todo_tasks (id) {
        /// Store-assigned task identifier.
        id -> BigInt,
        /// Bounded-length task title.
        title -> Text,
        /// Free-text task description.
        description -> Text,
        /// Canonical priority name.
        priority -> Text,
    }
}
