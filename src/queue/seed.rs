//! Example records for local development and test fixtures.

use crate::queue::domain::{
    ExecutionQueueRecord, ExecutionStatus, MechanicId, PersistedRecordData, Priority,
    QueueDomainError, RecordId, ServiceOrderId,
};
use chrono::{DateTime, TimeDelta, Utc};
use mockable::Clock;

/// Diagnosis text carried by the in-repair seed record.
pub const SEED_DIAGNOSIS: &str = "engine problem identified";

/// Builds the three seed records relative to the clock's current time.
///
/// 1. Service order 1: awaiting, normal priority, nothing assigned.
/// 2. Service order 2: in diagnosis, high priority, mechanic 1, diagnosis
///    started now.
/// 3. Service order 3: in repair, urgent priority, mechanic 2, diagnosed
///    between 24 and 12 hours ago, repair started now, created 24 hours ago.
///
/// # Errors
///
/// Returns [`QueueDomainError`] if a seed identifier or timestamp fails
/// validation.
pub fn seed_records(clock: &impl Clock) -> Result<Vec<ExecutionQueueRecord>, QueueDomainError> {
    let now = clock.utc();
    let one_day_ago = now - TimeDelta::hours(24);
    let half_day_ago = now - TimeDelta::hours(12);

    let awaiting = blank(ServiceOrderId::new(1)?, Priority::Normal, now);

    let in_diagnosis = PersistedRecordData {
        status: ExecutionStatus::InDiagnosis,
        assigned_mechanic_id: Some(MechanicId::new(1)?),
        diagnosis_started_at: Some(now),
        ..blank(ServiceOrderId::new(2)?, Priority::High, now)
    };

    let in_repair = PersistedRecordData {
        status: ExecutionStatus::InRepair,
        assigned_mechanic_id: Some(MechanicId::new(2)?),
        diagnosis: Some(SEED_DIAGNOSIS.to_owned()),
        diagnosis_started_at: Some(one_day_ago),
        diagnosis_finished_at: Some(half_day_ago),
        repair_started_at: Some(now),
        created_at: one_day_ago,
        ..blank(ServiceOrderId::new(3)?, Priority::Urgent, now)
    };

    [awaiting, in_diagnosis, in_repair]
        .into_iter()
        .map(ExecutionQueueRecord::from_persisted)
        .collect()
}

fn blank(
    service_order_id: ServiceOrderId,
    priority: Priority,
    now: DateTime<Utc>,
) -> PersistedRecordData {
    PersistedRecordData {
        id: RecordId::new(),
        service_order_id,
        status: ExecutionStatus::Awaiting,
        priority,
        assigned_mechanic_id: None,
        diagnosis: None,
        repair_notes: None,
        diagnosis_started_at: None,
        diagnosis_finished_at: None,
        repair_started_at: None,
        repair_finished_at: None,
        created_at: now,
        updated_at: now,
    }
}
