//! Unit tests for the to-do module.
//!
//! Organised by layer:
//! - `domain_tests`: priority parsing/ranking, edit buffer invariants,
//!   list shaping
//! - `envelope_tests`: query-state envelope accessors
//! - `memory_repository_tests`: in-memory adapter contract behaviour
//! - `coordinator_tests`: coordinator state transitions end to end

mod memory_repository_tests;
