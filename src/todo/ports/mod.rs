//! Port contracts for to-do storage collaborators.

mod preferences;
mod repository;

pub use preferences::{
    PreferenceStore, PreferenceStoreError, PreferenceStoreResult, SORT_STATE_KEY, SortStateWatch,
};
pub use repository::{TaskListWatch, TaskRepository, TaskStoreError, TaskStoreResult, TaskWatch};
