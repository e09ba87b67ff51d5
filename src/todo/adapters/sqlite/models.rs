//! Diesel row models for task persistence.

use super::schema::todo_tasks;
use diesel::prelude::*;

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = todo_tasks)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TaskRow {
    /// Store-assigned task identifier.
    pub id: i64,
    /// Task title.
    pub title: String,
    /// Task description.
    pub description: String,
    /// Canonical priority name.
    pub priority: String,
}

/// Insert model for new task records; the store assigns the id.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = todo_tasks)]
pub struct NewTaskRow {
    /// Task title.
    pub title: String,
    /// Task description.
    pub description: String,
    /// Canonical priority name.
    pub priority: String,
}
