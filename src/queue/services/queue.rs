//! Service layer for execution queue creation, lookup, and mutation.

use crate::queue::{
    domain::{
        ExecutionQueueRecord, ExecutionStatus, Priority, QueueDomainError, RecordPatch,
        ServiceOrderId,
    },
    ports::{ExecutionQueueRepository, QueueRepositoryError},
    seed::seed_records,
};
use futures::stream::{self, BoxStream, StreamExt};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Request payload for queueing a service order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreateRecordRequest {
    service_order_id: u64,
    priority: Priority,
}

impl CreateRecordRequest {
    /// Creates a request with [`Priority::Normal`].
    #[must_use]
    pub const fn new(service_order_id: u64) -> Self {
        Self {
            service_order_id,
            priority: Priority::Normal,
        }
    }

    /// Sets the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }
}

/// Service-level errors for execution queue operations.
#[derive(Debug, Error)]
pub enum QueueServiceError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] QueueDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] QueueRepositoryError),
    /// No awaiting record is queued.
    #[error("the execution queue has no awaiting records")]
    Empty,
}

/// Result type for execution queue service operations.
pub type QueueServiceResult<T> = Result<T, QueueServiceError>;

/// Execution queue access service.
///
/// Owns the clock that stamps `created_at` and `updated_at`; the repository
/// is passed in explicitly rather than reached through global state.
#[derive(Clone)]
pub struct ExecutionQueueService<R, C>
where
    R: ExecutionQueueRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> ExecutionQueueService<R, C>
where
    R: ExecutionQueueRepository + 'static,
    C: Clock + Send + Sync,
{
    /// Creates a new execution queue service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Queues a service order in [`ExecutionStatus::Awaiting`].
    ///
    /// # Errors
    ///
    /// Returns [`QueueServiceError::Domain`] for an invalid identifier and
    /// [`QueueRepositoryError::DuplicateKey`] (wrapped) when the service order
    /// is already queued.
    pub async fn create(
        &self,
        request: CreateRecordRequest,
    ) -> QueueServiceResult<ExecutionQueueRecord> {
        let service_order_id = ServiceOrderId::new(request.service_order_id)?;
        let record = ExecutionQueueRecord::new(service_order_id, request.priority, &*self.clock);
        self.repository.store(&record).await?;
        info!(%service_order_id, priority = %request.priority, "queued service order");
        Ok(record)
    }

    /// Stores a fully formed record as-is.
    ///
    /// Timestamps and status are taken from the record, not the clock.
    ///
    /// # Errors
    ///
    /// Returns [`QueueRepositoryError::DuplicateKey`] (wrapped) when the
    /// service order is already queued.
    pub async fn create_record(
        &self,
        record: ExecutionQueueRecord,
    ) -> QueueServiceResult<ExecutionQueueRecord> {
        self.repository.store(&record).await?;
        debug!(
            service_order_id = %record.service_order_id(),
            status = %record.status(),
            "stored prepared queue record"
        );
        Ok(record)
    }

    /// Returns the record tracking a service order.
    ///
    /// # Errors
    ///
    /// Returns [`QueueRepositoryError::NotFound`] (wrapped) when the service
    /// order is not queued.
    pub async fn get(
        &self,
        service_order_id: ServiceOrderId,
    ) -> QueueServiceResult<ExecutionQueueRecord> {
        self.repository
            .find_by_service_order(service_order_id)
            .await?
            .ok_or(QueueServiceError::Repository(QueueRepositoryError::NotFound(
                service_order_id,
            )))
    }

    /// Streams the records with the given status in queue order.
    ///
    /// Nothing is read until the stream is first polled. A repository
    /// failure is yielded as the single item of the stream.
    pub fn list_by_status(
        &self,
        status: ExecutionStatus,
    ) -> BoxStream<'static, QueueServiceResult<ExecutionQueueRecord>> {
        let repository = Arc::clone(&self.repository);
        stream::once(async move { repository.list_by_status(status).await })
            .flat_map(|result| match result {
                Ok(records) => {
                    stream::iter(records.into_iter().map(Ok::<_, QueueServiceError>)).left_stream()
                }
                Err(err) => {
                    stream::iter(std::iter::once(Err(QueueServiceError::from(err)))).right_stream()
                }
            })
            .boxed()
    }

    /// Returns every queued record, highest priority and oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`QueueServiceError::Repository`] when the lookup fails.
    pub async fn list_ordered(&self) -> QueueServiceResult<Vec<ExecutionQueueRecord>> {
        Ok(self.repository.list_ordered().await?)
    }

    /// Returns the awaiting record that should be worked on next.
    ///
    /// The record is only inspected, not claimed.
    ///
    /// # Errors
    ///
    /// Returns [`QueueServiceError::Empty`] when no record is awaiting.
    pub async fn next_in_queue(&self) -> QueueServiceResult<ExecutionQueueRecord> {
        let next = self.repository.next_awaiting().await?;
        next.ok_or(QueueServiceError::Empty)
    }

    /// Applies a patch to a queued record and refreshes `updated_at`.
    ///
    /// # Errors
    ///
    /// Returns [`QueueRepositoryError::NotFound`] (wrapped) when the service
    /// order is not queued.
    pub async fn update(
        &self,
        service_order_id: ServiceOrderId,
        patch: RecordPatch,
    ) -> QueueServiceResult<ExecutionQueueRecord> {
        let mut record = self.get(service_order_id).await?;
        record.apply(patch, &*self.clock);
        self.repository.update(&record).await?;
        debug!(%service_order_id, status = %record.status(), "updated queue record");
        Ok(record)
    }

    /// Removes a service order from the queue.
    ///
    /// # Errors
    ///
    /// Returns [`QueueRepositoryError::NotFound`] (wrapped) when the service
    /// order is not queued.
    pub async fn remove(&self, service_order_id: ServiceOrderId) -> QueueServiceResult<()> {
        self.repository.remove(service_order_id).await?;
        info!(%service_order_id, "removed service order from the queue");
        Ok(())
    }

    /// Stores the seed records whose service orders are not queued yet.
    ///
    /// Returns only the records inserted by this call. Service orders that
    /// are already queued are left untouched, so repeating the seed fills in
    /// whatever an interrupted run missed.
    ///
    /// # Errors
    ///
    /// Returns [`QueueServiceError`] when a seed record cannot be stored for
    /// any reason other than its service order being queued already.
    pub async fn seed(&self) -> QueueServiceResult<Vec<ExecutionQueueRecord>> {
        let mut stored = Vec::new();
        for record in seed_records(&*self.clock)? {
            match self.create_record(record).await {
                Ok(created) => stored.push(created),
                Err(QueueServiceError::Repository(QueueRepositoryError::DuplicateKey(
                    service_order_id,
                ))) => {
                    debug!(%service_order_id, "seed record already queued; skipping");
                }
                Err(err) => return Err(err),
            }
        }
        info!(count = stored.len(), "seeded execution queue");
        Ok(stored)
    }
}
