//! In-memory preference store.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::watch;

use crate::todo::domain::Priority;
use crate::todo::ports::{PreferenceStore, PreferenceStoreResult, SortStateWatch};

/// Volatile preference slot, seeded with the `"NONE"` default.
#[derive(Debug, Clone)]
pub struct InMemoryPreferenceStore {
    sort_state: Arc<watch::Sender<String>>,
}

impl Default for InMemoryPreferenceStore {
    fn default() -> Self {
        let (sort_state, _) = watch::channel(Priority::None.as_str().to_owned());
        Self {
            sort_state: Arc::new(sort_state),
        }
    }
}

impl InMemoryPreferenceStore {
    /// Creates a store holding the default sort state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrites the stored string verbatim, as an external writer could.
    ///
    /// Lets tests and embedders exercise the unrecognised-value path.
    pub fn set_raw(&self, value: &str) {
        self.sort_state.send_replace(value.to_owned());
    }
}

#[async_trait]
impl PreferenceStore for InMemoryPreferenceStore {
    async fn persist_sort_state(&self, priority: Priority) -> PreferenceStoreResult<()> {
        self.sort_state.send_replace(priority.as_str().to_owned());
        Ok(())
    }

    async fn watch_sort_state(&self) -> PreferenceStoreResult<SortStateWatch> {
        Ok(self.sort_state.subscribe())
    }
}
