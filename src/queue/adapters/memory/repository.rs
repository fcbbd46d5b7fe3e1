//! In-memory repository for the execution queue.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::queue::{
    domain::{ExecutionQueueRecord, ExecutionStatus, RecordId, ServiceOrderId, queue_order},
    ports::{ExecutionQueueRepository, QueueRepositoryError, QueueRepositoryResult},
};

/// Thread-safe in-memory execution queue repository.
///
/// A single write lock covers the uniqueness check and the insert, so
/// concurrent duplicate inserts cannot both succeed.
#[derive(Debug, Clone, Default)]
pub struct InMemoryExecutionQueueRepository {
    state: Arc<RwLock<InMemoryQueueState>>,
}

#[derive(Debug, Default)]
struct InMemoryQueueState {
    records: HashMap<RecordId, ExecutionQueueRecord>,
    service_order_index: HashMap<ServiceOrderId, RecordId>,
    status_index: HashMap<ExecutionStatus, Vec<RecordId>>,
}

impl InMemoryExecutionQueueRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(err: impl std::fmt::Display) -> QueueRepositoryError {
    QueueRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

fn index_status(state: &mut InMemoryQueueState, record: &ExecutionQueueRecord) {
    state
        .status_index
        .entry(record.status())
        .or_default()
        .push(record.id());
}

/// Removes a record ID from the status index, cleaning up the entry if empty.
fn remove_from_status_index(
    index: &mut HashMap<ExecutionStatus, Vec<RecordId>>,
    record_id: RecordId,
    status: ExecutionStatus,
) {
    if let Some(ids) = index.get_mut(&status) {
        ids.retain(|id| *id != record_id);
        if ids.is_empty() {
            index.remove(&status);
        }
    }
}

fn sorted(mut records: Vec<ExecutionQueueRecord>) -> Vec<ExecutionQueueRecord> {
    records.sort_by(queue_order);
    records
}

fn records_with_status(
    state: &InMemoryQueueState,
    status: ExecutionStatus,
) -> Vec<ExecutionQueueRecord> {
    let records: Vec<ExecutionQueueRecord> = state
        .status_index
        .get(&status)
        .map(|ids| {
            ids.iter()
                .filter_map(|id| state.records.get(id).cloned())
                .collect()
        })
        .unwrap_or_default();
    sorted(records)
}

#[async_trait]
impl ExecutionQueueRepository for InMemoryExecutionQueueRepository {
    async fn store(&self, record: &ExecutionQueueRecord) -> QueueRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        if state.service_order_index.contains_key(&record.service_order_id()) {
            return Err(QueueRepositoryError::DuplicateKey(record.service_order_id()));
        }
        if state.records.contains_key(&record.id()) {
            return Err(QueueRepositoryError::DuplicateRecord(record.id()));
        }

        state
            .service_order_index
            .insert(record.service_order_id(), record.id());
        index_status(&mut state, record);
        state.records.insert(record.id(), record.clone());
        Ok(())
    }

    async fn update(&self, record: &ExecutionQueueRecord) -> QueueRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        let service_order_id = record.service_order_id();
        let stored_id = *state
            .service_order_index
            .get(&service_order_id)
            .ok_or(QueueRepositoryError::NotFound(service_order_id))?;
        let old_status = state
            .records
            .get(&stored_id)
            .map(ExecutionQueueRecord::status)
            .ok_or(QueueRepositoryError::NotFound(service_order_id))?;

        // The stored identifier is kept whatever id the caller passes.
        let updated = record.clone().with_id(stored_id);
        remove_from_status_index(&mut state.status_index, stored_id, old_status);
        index_status(&mut state, &updated);
        state.records.insert(stored_id, updated);
        Ok(())
    }

    async fn find_by_service_order(
        &self,
        service_order_id: ServiceOrderId,
    ) -> QueueRepositoryResult<Option<ExecutionQueueRecord>> {
        let state = self.state.read().map_err(lock_error)?;
        let record = state
            .service_order_index
            .get(&service_order_id)
            .and_then(|record_id| state.records.get(record_id))
            .cloned();
        Ok(record)
    }

    async fn list_by_status(
        &self,
        status: ExecutionStatus,
    ) -> QueueRepositoryResult<Vec<ExecutionQueueRecord>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(records_with_status(&state, status))
    }

    async fn list_ordered(&self) -> QueueRepositoryResult<Vec<ExecutionQueueRecord>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(sorted(state.records.values().cloned().collect()))
    }

    async fn next_awaiting(&self) -> QueueRepositoryResult<Option<ExecutionQueueRecord>> {
        let state = self.state.read().map_err(lock_error)?;
        let next = state
            .status_index
            .get(&ExecutionStatus::Awaiting)
            .into_iter()
            .flatten()
            .filter_map(|id| state.records.get(id))
            .min_by(|left, right| queue_order(left, right))
            .cloned();
        Ok(next)
    }

    async fn remove(&self, service_order_id: ServiceOrderId) -> QueueRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        let record_id = state
            .service_order_index
            .remove(&service_order_id)
            .ok_or(QueueRepositoryError::NotFound(service_order_id))?;
        if let Some(record) = state.records.remove(&record_id) {
            remove_from_status_index(&mut state.status_index, record_id, record.status());
        }
        Ok(())
    }
}
