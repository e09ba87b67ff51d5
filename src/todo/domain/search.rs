//! Search bar view-state selector.

use serde::{Deserialize, Serialize};

/// Mutually exclusive search/sort view selector for the task list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SearchBarState {
    /// Search bar hidden; the list shows the sort-selected data.
    Closed,
    /// Search bar visible; the list still shows the sort-selected data.
    Opened,
    /// A search ran; the list shows the live search-query results.
    Triggered,
}
