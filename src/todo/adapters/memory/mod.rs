//! In-memory adapters for tests and lightweight embedding.

mod preferences;
mod repository;

pub use preferences::InMemoryPreferenceStore;
pub use repository::InMemoryTaskRepository;
