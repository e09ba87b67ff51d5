//! Orchestration services for to-do task management.

mod coordinator;

pub use coordinator::TaskListCoordinator;
