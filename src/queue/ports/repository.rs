//! Repository port for execution queue persistence and indexed lookup.

use crate::queue::domain::{ExecutionQueueRecord, ExecutionStatus, RecordId, ServiceOrderId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for execution queue repository operations.
pub type QueueRepositoryResult<T> = Result<T, QueueRepositoryError>;

/// Execution queue persistence contract.
///
/// Every listing is returned in queue order: priority descending, then
/// creation time ascending (see [`crate::queue::domain::queue_order`]).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ExecutionQueueRepository: Send + Sync {
    /// Stores a new record.
    ///
    /// The uniqueness check and the insert happen atomically: of two
    /// concurrent inserts for the same service order exactly one succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`QueueRepositoryError::DuplicateKey`] when a record for the
    /// service order already exists, or [`QueueRepositoryError::DuplicateRecord`]
    /// when the record identifier is already taken.
    async fn store(&self, record: &ExecutionQueueRecord) -> QueueRepositoryResult<()>;

    /// Replaces the stored record for the record's service order.
    ///
    /// # Errors
    ///
    /// Returns [`QueueRepositoryError::NotFound`] when no record exists for
    /// the service order.
    async fn update(&self, record: &ExecutionQueueRecord) -> QueueRepositoryResult<()>;

    /// Finds the record tracking a service order.
    ///
    /// Returns `None` when the service order is not queued.
    async fn find_by_service_order(
        &self,
        service_order_id: ServiceOrderId,
    ) -> QueueRepositoryResult<Option<ExecutionQueueRecord>>;

    /// Returns every record whose status equals `status`, in queue order.
    async fn list_by_status(
        &self,
        status: ExecutionStatus,
    ) -> QueueRepositoryResult<Vec<ExecutionQueueRecord>>;

    /// Returns every record in queue order.
    async fn list_ordered(&self) -> QueueRepositoryResult<Vec<ExecutionQueueRecord>>;

    /// Returns the first [`ExecutionStatus::Awaiting`] record in queue order.
    ///
    /// The record is not claimed; its status is left unchanged.
    async fn next_awaiting(&self) -> QueueRepositoryResult<Option<ExecutionQueueRecord>>;

    /// Deletes the record tracking a service order.
    ///
    /// # Errors
    ///
    /// Returns [`QueueRepositoryError::NotFound`] when no record exists for
    /// the service order.
    async fn remove(&self, service_order_id: ServiceOrderId) -> QueueRepositoryResult<()>;
}

/// Errors returned by execution queue repository implementations.
#[derive(Debug, Clone, Error)]
pub enum QueueRepositoryError {
    /// A record with the same internal identifier already exists.
    #[error("duplicate record identifier: {0}")]
    DuplicateRecord(RecordId),

    /// The service order already has a record in the queue.
    #[error("duplicate key: service order {0} is already queued")]
    DuplicateKey(ServiceOrderId),

    /// The service order has no record in the queue.
    #[error("service order {0} not found in the execution queue")]
    NotFound(ServiceOrderId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl QueueRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
