//! The pending store mutation selected by a user intent.

use super::ParsePendingActionError;
use serde::{Deserialize, Serialize};

/// The single next store mutation the coordinator intends to perform.
///
/// Set by an intent handler, consumed and reset to
/// [`PendingAction::NoAction`] immediately after being acted on. At most one
/// pending action is outstanding at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PendingAction {
    /// Insert a new task built from the edit buffer.
    Add,
    /// Replace the stored task matching the buffer's identifier.
    Update,
    /// Delete the stored task matching the buffer's full row.
    Delete,
    /// Clear the whole task table.
    DeleteAll,
    /// Re-insert the last deleted task from the edit buffer.
    Undo,
    /// Nothing to do.
    NoAction,
}

impl PendingAction {
    /// Returns the canonical tag used in route arguments.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Add => "ADD",
            Self::Update => "UPDATE",
            Self::Delete => "DELETE",
            Self::DeleteAll => "DELETE_ALL",
            Self::Undo => "UNDO",
            Self::NoAction => "NO_ACTION",
        }
    }

    /// Parses a route tag, treating a missing or empty tag as
    /// [`PendingAction::NoAction`].
    ///
    /// # Errors
    ///
    /// Returns [`ParsePendingActionError`] when a non-empty tag is not a
    /// recognised action name.
    pub fn from_tag(tag: Option<&str>) -> Result<Self, ParsePendingActionError> {
        match tag {
            None | Some("") => Ok(Self::NoAction),
            Some(value) => Self::try_from(value),
        }
    }
}

impl TryFrom<&str> for PendingAction {
    type Error = ParsePendingActionError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_uppercase();
        match normalized.as_str() {
            "ADD" => Ok(Self::Add),
            "UPDATE" => Ok(Self::Update),
            "DELETE" => Ok(Self::Delete),
            "DELETE_ALL" => Ok(Self::DeleteAll),
            "UNDO" => Ok(Self::Undo),
            "NO_ACTION" => Ok(Self::NoAction),
            _ => Err(ParsePendingActionError(value.to_owned())),
        }
    }
}
