//! Tickoff: a local to-do task management core.
//!
//! This crate provides the storage-facing and state-coordination logic of a
//! single-user to-do list: short text tasks with a three-level priority tag,
//! persisted in an embedded relational store, searched by substring, and
//! sorted by priority rank with the last-chosen sort persisted as a
//! preference.
//!
//! # Architecture
//!
//! Tickoff follows hexagonal architecture principles:
//!
//! - **Domain**: Pure task/priority/edit-buffer types with no infrastructure
//!   dependencies
//! - **Ports**: Abstract trait interfaces for task and preference storage
//! - **Adapters**: Concrete implementations of ports (in-memory, SQLite,
//!   preference files)
//! - **Services**: The task list coordinator that presentation layers bind to
//!
//! # Modules
//!
//! - [`todo`]: Task model, storage contracts, and the list coordinator

pub mod todo;
