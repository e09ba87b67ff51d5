//! Adapter implementations of the to-do storage ports.

pub mod fs;
pub mod memory;
pub mod sqlite;

mod feed;
