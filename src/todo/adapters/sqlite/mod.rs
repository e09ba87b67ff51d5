//! SQLite adapter for task persistence (Diesel, r2d2 pool).

mod models;
mod repository;
mod schema;

pub use repository::{SqliteTaskRepository, TaskSqlitePool};
