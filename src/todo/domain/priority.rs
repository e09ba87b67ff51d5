//! Task priority tag and its sort rank.

use super::ParsePriorityError;
use serde::{Deserialize, Serialize};

/// Priority assigned to a task.
///
/// [`Priority::None`] carries a double duty inherited from the data model:
/// on a task it means "no priority assigned", and as a sort preference it
/// means "no sort applied, natural id order".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Priority {
    /// Task should be handled first.
    High,
    /// Task has ordinary urgency.
    Medium,
    /// Task can wait.
    Low,
    /// No priority assigned (or, as a preference, no sort applied).
    None,
}

impl Priority {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::High => "HIGH",
            Self::Medium => "MEDIUM",
            Self::Low => "LOW",
            Self::None => "NONE",
        }
    }

    /// Returns the ordinal sort rank (Low=1, Medium=2, High=3).
    ///
    /// [`Priority::None`] is unranked and yields `None`.
    #[must_use]
    pub const fn rank(self) -> Option<u8> {
        match self {
            Self::Low => Some(1),
            Self::Medium => Some(2),
            Self::High => Some(3),
            Self::None => None,
        }
    }
}

impl TryFrom<&str> for Priority {
    type Error = ParsePriorityError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_uppercase();
        match normalized.as_str() {
            "HIGH" => Ok(Self::High),
            "MEDIUM" => Ok(Self::Medium),
            "LOW" => Ok(Self::Low),
            "NONE" => Ok(Self::None),
            _ => Err(ParsePriorityError(value.to_owned())),
        }
    }
}
