//! To-do task management for Tickoff.
//!
//! This module implements the full task list lifecycle: creating tasks from
//! the pending-edit buffer, updating and deleting persisted tasks, substring
//! search over title and description, priority-ranked sorting, and a
//! persisted sort preference. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - The task list coordinator in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
