//! `PostgreSQL` repository implementation for execution queue storage.

use super::{
    models::{NewQueueRecordRow, QueueRecordChangeset, QueueRecordRow},
    schema::execution_queue,
};
use crate::queue::{
    domain::{
        ExecutionQueueRecord, ExecutionStatus, MechanicId, PersistedRecordData, Priority,
        RecordId, ServiceOrderId,
    },
    ports::{ExecutionQueueRepository, QueueRepositoryError, QueueRepositoryResult},
};
use async_trait::async_trait;
use diesel::connection::SimpleConnection;
use diesel::pg::{Pg, PgConnection};
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool, PoolError};
use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind, Error as DieselError};
use tracing::{debug, info, warn};

/// `PostgreSQL` connection pool type used by queue adapters.
pub type QueuePgPool = Pool<ConnectionManager<PgConnection>>;

/// SQL creating the `execution_queue` table and its indexes.
///
/// Every statement is idempotent, so it can run on each start-up.
pub const CREATE_EXECUTION_QUEUE_SQL: &str =
    include_str!("../../../../migrations/2026-10-01-000000_create_execution_queue/up.sql");

const SERVICE_ORDER_UNIQUE_INDEX: &str = "idx_execution_queue_service_order_id";

/// Builds a connection pool for the given database URL.
///
/// Establishes the initial connections eagerly, so this blocks until the
/// database answers or the pool's connection timeout elapses.
///
/// # Errors
///
/// Returns [`PoolError`] when no connection can be established.
pub fn build_pool(database_url: &str, max_size: u32) -> Result<QueuePgPool, PoolError> {
    let manager = ConnectionManager::<PgConnection>::new(database_url);
    Pool::builder().max_size(max_size).build(manager)
}

/// `PostgreSQL`-backed execution queue repository.
#[derive(Debug, Clone)]
pub struct PostgresExecutionQueueRepository {
    pool: QueuePgPool,
}

impl PostgresExecutionQueueRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: QueuePgPool) -> Self {
        Self { pool }
    }

    /// Creates the queue table and indexes when they do not exist yet.
    ///
    /// # Errors
    ///
    /// Returns [`QueueRepositoryError::Persistence`] when the schema
    /// statements fail.
    pub async fn ensure_schema(&self) -> QueueRepositoryResult<()> {
        self.run_blocking(|connection| {
            connection
                .batch_execute(CREATE_EXECUTION_QUEUE_SQL)
                .map_err(QueueRepositoryError::persistence)?;
            info!("execution queue schema is in place");
            Ok(())
        })
        .await
    }

    async fn run_blocking<F, T>(&self, f: F) -> QueueRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> QueueRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(QueueRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(QueueRepositoryError::persistence)?
    }
}

#[async_trait]
impl ExecutionQueueRepository for PostgresExecutionQueueRepository {
    async fn store(&self, record: &ExecutionQueueRecord) -> QueueRepositoryResult<()> {
        let record_id = record.id();
        let service_order_id = record.service_order_id();
        let new_row = to_new_row(record)?;

        self.run_blocking(move |connection| {
            diesel::insert_into(execution_queue::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, ref info)
                        if is_service_order_unique_violation(info.as_ref()) =>
                    {
                        warn!(%service_order_id, "rejected duplicate service order");
                        QueueRepositoryError::DuplicateKey(service_order_id)
                    }
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        QueueRepositoryError::DuplicateRecord(record_id)
                    }
                    _ => QueueRepositoryError::persistence(err),
                })?;
            info!(%service_order_id, %record_id, "stored execution queue record");
            Ok(())
        })
        .await
    }

    async fn update(&self, record: &ExecutionQueueRecord) -> QueueRepositoryResult<()> {
        let service_order_id = record.service_order_id();
        let key = to_column_id(service_order_id.value())?;
        let changeset = to_changeset(record)?;

        self.run_blocking(move |connection| {
            let updated_count = diesel::update(
                execution_queue::table.filter(execution_queue::service_order_id.eq(key)),
            )
            .set(&changeset)
            .execute(connection)
            .map_err(QueueRepositoryError::persistence)?;

            if updated_count == 0 {
                return Err(QueueRepositoryError::NotFound(service_order_id));
            }
            debug!(%service_order_id, "updated execution queue record");
            Ok(())
        })
        .await
    }

    async fn find_by_service_order(
        &self,
        service_order_id: ServiceOrderId,
    ) -> QueueRepositoryResult<Option<ExecutionQueueRecord>> {
        let key = to_column_id(service_order_id.value())?;
        self.run_blocking(move |connection| {
            let row = queue_ordered()
                .filter(execution_queue::service_order_id.eq(key))
                .first::<QueueRecordRow>(connection)
                .optional()
                .map_err(QueueRepositoryError::persistence)?;
            row.map(row_to_record).transpose()
        })
        .await
    }

    async fn list_by_status(
        &self,
        status: ExecutionStatus,
    ) -> QueueRepositoryResult<Vec<ExecutionQueueRecord>> {
        self.run_blocking(move |connection| {
            let rows = queue_ordered()
                .filter(execution_queue::status.eq(status.as_str()))
                .load::<QueueRecordRow>(connection)
                .map_err(QueueRepositoryError::persistence)?;
            debug!(%status, count = rows.len(), "listed execution queue records by status");
            rows.into_iter().map(row_to_record).collect()
        })
        .await
    }

    async fn list_ordered(&self) -> QueueRepositoryResult<Vec<ExecutionQueueRecord>> {
        self.run_blocking(move |connection| {
            let rows = queue_ordered()
                .load::<QueueRecordRow>(connection)
                .map_err(QueueRepositoryError::persistence)?;
            rows.into_iter().map(row_to_record).collect()
        })
        .await
    }

    async fn next_awaiting(&self) -> QueueRepositoryResult<Option<ExecutionQueueRecord>> {
        self.run_blocking(move |connection| {
            let row = queue_ordered()
                .filter(execution_queue::status.eq(ExecutionStatus::Awaiting.as_str()))
                .first::<QueueRecordRow>(connection)
                .optional()
                .map_err(QueueRepositoryError::persistence)?;
            row.map(row_to_record).transpose()
        })
        .await
    }

    async fn remove(&self, service_order_id: ServiceOrderId) -> QueueRepositoryResult<()> {
        let key = to_column_id(service_order_id.value())?;
        self.run_blocking(move |connection| {
            let deleted_count = diesel::delete(
                execution_queue::table.filter(execution_queue::service_order_id.eq(key)),
            )
            .execute(connection)
            .map_err(QueueRepositoryError::persistence)?;

            if deleted_count == 0 {
                return Err(QueueRepositoryError::NotFound(service_order_id));
            }
            info!(%service_order_id, "removed execution queue record");
            Ok(())
        })
        .await
    }
}

/// Base query sorted by the compound priority index.
fn queue_ordered<'a>() -> execution_queue::BoxedQuery<'a, Pg> {
    execution_queue::table
        .order((
            execution_queue::priority.desc(),
            execution_queue::created_at.asc(),
            execution_queue::service_order_id.asc(),
        ))
        .into_boxed()
}

fn to_column_id(value: u64) -> QueueRepositoryResult<i64> {
    i64::try_from(value).map_err(QueueRepositoryError::persistence)
}

fn to_new_row(record: &ExecutionQueueRecord) -> QueueRepositoryResult<NewQueueRecordRow> {
    Ok(NewQueueRecordRow {
        id: record.id().into_inner(),
        service_order_id: to_column_id(record.service_order_id().value())?,
        status: record.status().as_str().to_owned(),
        priority: record.priority().rank(),
        assigned_mechanic_id: record
            .assigned_mechanic_id()
            .map(|mechanic| to_column_id(mechanic.value()))
            .transpose()?,
        diagnosis: record.diagnosis().map(str::to_owned),
        repair_notes: record.repair_notes().map(str::to_owned),
        diagnosis_started_at: record.diagnosis_started_at(),
        diagnosis_finished_at: record.diagnosis_finished_at(),
        repair_started_at: record.repair_started_at(),
        repair_finished_at: record.repair_finished_at(),
        created_at: record.created_at(),
        updated_at: record.updated_at(),
    })
}

fn to_changeset(record: &ExecutionQueueRecord) -> QueueRepositoryResult<QueueRecordChangeset> {
    let NewQueueRecordRow {
        status,
        priority,
        assigned_mechanic_id,
        diagnosis,
        repair_notes,
        diagnosis_started_at,
        diagnosis_finished_at,
        repair_started_at,
        repair_finished_at,
        updated_at,
        ..
    } = to_new_row(record)?;

    Ok(QueueRecordChangeset {
        status,
        priority,
        assigned_mechanic_id,
        diagnosis,
        repair_notes,
        diagnosis_started_at,
        diagnosis_finished_at,
        repair_started_at,
        repair_finished_at,
        updated_at,
    })
}

fn row_to_record(row: QueueRecordRow) -> QueueRepositoryResult<ExecutionQueueRecord> {
    let QueueRecordRow {
        id,
        service_order_id,
        status,
        priority,
        assigned_mechanic_id,
        diagnosis,
        repair_notes,
        diagnosis_started_at,
        diagnosis_finished_at,
        repair_started_at,
        repair_finished_at,
        created_at,
        updated_at,
    } = row;

    let parsed_service_order = u64::try_from(service_order_id)
        .map_err(QueueRepositoryError::persistence)
        .and_then(|value| {
            ServiceOrderId::new(value).map_err(QueueRepositoryError::persistence)
        })?;
    let parsed_mechanic = assigned_mechanic_id
        .map(|value| {
            u64::try_from(value)
                .map_err(QueueRepositoryError::persistence)
                .and_then(|raw| MechanicId::new(raw).map_err(QueueRepositoryError::persistence))
        })
        .transpose()?;
    let parsed_status =
        ExecutionStatus::try_from(status.as_str()).map_err(QueueRepositoryError::persistence)?;
    let parsed_priority =
        Priority::from_rank(priority).map_err(QueueRepositoryError::persistence)?;

    let data = PersistedRecordData {
        id: RecordId::from_uuid(id),
        service_order_id: parsed_service_order,
        status: parsed_status,
        priority: parsed_priority,
        assigned_mechanic_id: parsed_mechanic,
        diagnosis,
        repair_notes,
        diagnosis_started_at,
        diagnosis_finished_at,
        repair_started_at,
        repair_finished_at,
        created_at,
        updated_at,
    };
    ExecutionQueueRecord::from_persisted(data).map_err(QueueRepositoryError::persistence)
}

fn is_service_order_unique_violation(info: &dyn DatabaseErrorInformation) -> bool {
    info.constraint_name()
        .is_some_and(|name| name == SERVICE_ORDER_UNIQUE_INDEX)
}
