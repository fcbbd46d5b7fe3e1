//! Error types for execution queue domain values.

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors returned while constructing domain queue values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum QueueDomainError {
    /// The service order identifier is zero or exceeds the persisted range.
    #[error("invalid service order id {0}, expected a positive integer up to i64::MAX")]
    InvalidServiceOrderId(u64),

    /// The mechanic identifier is zero or exceeds the persisted range.
    #[error("invalid mechanic id {0}, expected a positive integer up to i64::MAX")]
    InvalidMechanicId(u64),

    /// The latest mutation time precedes the creation time.
    #[error("updated_at {updated_at} precedes created_at {created_at}")]
    UpdatedBeforeCreated {
        /// Creation timestamp of the rejected record.
        created_at: DateTime<Utc>,
        /// Mutation timestamp of the rejected record.
        updated_at: DateTime<Utc>,
    },
}

/// Error returned while parsing an execution status from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown execution status: {0}")]
pub struct ParseStatusError(pub String);

/// Error returned while parsing a priority from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown priority: {0}")]
pub struct ParsePriorityError(pub String);
