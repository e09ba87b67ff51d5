//! Preference-store port holding the persisted sort preference.

use crate::todo::domain::Priority;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::watch;

/// Key under which the sort preference is stored.
pub const SORT_STATE_KEY: &str = "sort_state";

/// Result type for preference store operations.
pub type PreferenceStoreResult<T> = Result<T, PreferenceStoreError>;

/// Live subscription to the raw persisted sort-state string.
pub type SortStateWatch = watch::Receiver<String>;

/// Durable single key-value slot for the last-chosen sort preference.
#[async_trait]
pub trait PreferenceStore: Send + Sync {
    /// Persists the priority's canonical name under [`SORT_STATE_KEY`].
    ///
    /// # Errors
    ///
    /// Returns [`PreferenceStoreError::Storage`] when the write fails.
    async fn persist_sort_state(&self, priority: Priority) -> PreferenceStoreResult<()>;

    /// Subscribes to the stored sort-state string.
    ///
    /// Emits `"NONE"` when the slot is absent or unreadable; interpretation
    /// of the string is the caller's concern.
    ///
    /// # Errors
    ///
    /// Returns [`PreferenceStoreError::Storage`] when subscribing fails.
    async fn watch_sort_state(&self) -> PreferenceStoreResult<SortStateWatch>;
}

/// Errors returned by preference store implementations.
#[derive(Debug, Clone, Error)]
pub enum PreferenceStoreError {
    /// Storage-layer failure.
    #[error("preference storage error: {0}")]
    Storage(Arc<dyn std::error::Error + Send + Sync>),
}

impl PreferenceStoreError {
    /// Wraps a storage error.
    pub fn storage(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Storage(Arc::new(err))
    }
}
