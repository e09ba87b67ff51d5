//! File-backed preference store.

use async_trait::async_trait;
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::watch;

use crate::todo::domain::Priority;
use crate::todo::ports::{
    PreferenceStore, PreferenceStoreError, PreferenceStoreResult, SortStateWatch,
};

/// Name of the preference document inside the store directory.
const PREFERENCES_FILE: &str = "preferences.json";

/// On-disk shape of the preference document.
#[derive(Debug, Serialize, Deserialize)]
struct PreferenceDoc {
    sort_state: String,
}

/// Preference store persisting a JSON document in a capability directory.
///
/// Reads fall back to the `"NONE"` default when the document is absent or
/// unreadable. The live subscription reflects writes made through this
/// store instance; external edits are picked up on the next open.
#[derive(Debug, Clone)]
pub struct FilePreferenceStore {
    dir: Arc<Dir>,
    sort_state: Arc<watch::Sender<String>>,
}

impl FilePreferenceStore {
    /// Opens the store rooted at `path`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns [`PreferenceStoreError::Storage`] when the directory cannot
    /// be opened.
    pub fn open(path: &str) -> PreferenceStoreResult<Self> {
        std::fs::create_dir_all(path).map_err(PreferenceStoreError::storage)?;
        let dir =
            Dir::open_ambient_dir(path, ambient_authority()).map_err(PreferenceStoreError::storage)?;
        let initial = read_sort_state(&dir);
        let (sort_state, _) = watch::channel(initial);
        Ok(Self {
            dir: Arc::new(dir),
            sort_state: Arc::new(sort_state),
        })
    }
}

/// Reads the persisted sort state, defaulting to `"NONE"` on any failure.
fn read_sort_state(dir: &Dir) -> String {
    dir.read_to_string(PREFERENCES_FILE)
        .ok()
        .and_then(|contents| serde_json::from_str::<PreferenceDoc>(&contents).ok())
        .map_or_else(|| Priority::None.as_str().to_owned(), |doc| doc.sort_state)
}

#[async_trait]
impl PreferenceStore for FilePreferenceStore {
    async fn persist_sort_state(&self, priority: Priority) -> PreferenceStoreResult<()> {
        let value = priority.as_str().to_owned();
        let contents = serde_json::to_string_pretty(&PreferenceDoc {
            sort_state: value.clone(),
        })
        .map_err(PreferenceStoreError::storage)?;

        let dir = Arc::clone(&self.dir);
        tokio::task::spawn_blocking(move || dir.write(PREFERENCES_FILE, contents))
            .await
            .map_err(PreferenceStoreError::storage)?
            .map_err(PreferenceStoreError::storage)?;

        self.sort_state.send_replace(value);
        Ok(())
    }

    async fn watch_sort_state(&self) -> PreferenceStoreResult<SortStateWatch> {
        Ok(self.sort_state.subscribe())
    }
}
