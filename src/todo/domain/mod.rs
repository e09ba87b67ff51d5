//! Domain model for to-do task management.
//!
//! The task domain models user-created to-do items with a bounded-length
//! title, a free-text description, and a three-level priority tag, plus the
//! view-state values the list coordinator exposes: the pending-edit buffer,
//! the pending store action, the search bar mode, and the query-state
//! envelope wrapping asynchronous reads. All infrastructure concerns stay
//! outside of the domain boundary.

mod action;
mod buffer;
mod envelope;
mod error;
mod priority;
mod search;
mod task;

pub use action::PendingAction;
pub use buffer::EditBuffer;
pub use envelope::{QueryError, QueryState};
pub use error::{ParsePendingActionError, ParsePriorityError};
pub use priority::Priority;
pub use search::SearchBarState;
pub use task::{
    MAX_TITLE_LENGTH, NEW_TASK_ID, Task, matches_search, sorted_by_rank_ascending,
    sorted_by_rank_descending,
};
