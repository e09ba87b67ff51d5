//! Error types for domain value parsing.

use thiserror::Error;

/// Error returned while parsing priority names from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown priority: {0}")]
pub struct ParsePriorityError(pub String);

/// Error returned while parsing pending-action tags from route arguments.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown pending action: {0}")]
pub struct ParsePendingActionError(pub String);
