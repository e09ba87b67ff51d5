//! Query-state envelope wrapping asynchronous store reads.

use std::sync::Arc;
use thiserror::Error;

/// Cloneable wrapper around the error behind a failed query.
#[derive(Debug, Clone, Error)]
#[error("query failed: {0}")]
pub struct QueryError(Arc<dyn std::error::Error + Send + Sync>);

impl QueryError {
    /// Wraps an underlying error.
    pub fn new(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self(Arc::new(err))
    }
}

/// Current state of an asynchronous store read.
///
/// Exactly one variant holds at any time, so "no data yet" and "confirmed
/// empty" stay distinguishable for the presentation layer.
#[derive(Debug, Clone)]
pub enum QueryState<T> {
    /// No read has been started.
    Idle,
    /// A read is in progress; no value has arrived yet.
    Loading,
    /// The latest emission from the live read.
    Ready(T),
    /// The read failed; no further emissions will arrive.
    Failed(QueryError),
}

impl<T> QueryState<T> {
    /// Returns true when no read has been started.
    #[must_use]
    pub const fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// Returns true while a read is in progress.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Returns true once a value has arrived.
    #[must_use]
    pub const fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    /// Returns true when the read failed.
    #[must_use]
    pub const fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    /// Returns the carried value, if any.
    #[must_use]
    pub const fn value(&self) -> Option<&T> {
        match self {
            Self::Ready(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the carried error, if any.
    #[must_use]
    pub const fn error(&self) -> Option<&QueryError> {
        match self {
            Self::Failed(err) => Some(err),
            _ => None,
        }
    }
}
