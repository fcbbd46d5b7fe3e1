//! Execution queue record aggregate.

use super::{
    ExecutionStatus, MechanicId, Priority, QueueDomainError, RecordId, RecordPatch,
    ServiceOrderId,
};
use chrono::{DateTime, SubsecRound, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Fractional-second digits kept on every timestamp, matching `TIMESTAMPTZ`.
const TIMESTAMP_PRECISION: u16 = 6;

/// One service order's place in the execution queue.
///
/// Timestamps are held at microsecond precision so a record reads back from
/// storage exactly as it was written, and `updated_at` never precedes
/// `created_at`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PersistedRecordData")]
pub struct ExecutionQueueRecord {
    id: RecordId,
    service_order_id: ServiceOrderId,
    status: ExecutionStatus,
    priority: Priority,
    assigned_mechanic_id: Option<MechanicId>,
    diagnosis: Option<String>,
    repair_notes: Option<String>,
    diagnosis_started_at: Option<DateTime<Utc>>,
    diagnosis_finished_at: Option<DateTime<Utc>>,
    repair_started_at: Option<DateTime<Utc>>,
    repair_finished_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted queue record.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PersistedRecordData {
    /// Persisted record identifier.
    pub id: RecordId,
    /// Service order tracked by the record.
    pub service_order_id: ServiceOrderId,
    /// Persisted execution status.
    pub status: ExecutionStatus,
    /// Persisted priority.
    pub priority: Priority,
    /// Assigned mechanic, if any.
    pub assigned_mechanic_id: Option<MechanicId>,
    /// Diagnosis text, if any.
    pub diagnosis: Option<String>,
    /// Repair notes, if any.
    pub repair_notes: Option<String>,
    /// Diagnosis start time, if any.
    pub diagnosis_started_at: Option<DateTime<Utc>>,
    /// Diagnosis finish time, if any.
    pub diagnosis_finished_at: Option<DateTime<Utc>>,
    /// Repair start time, if any.
    pub repair_started_at: Option<DateTime<Utc>>,
    /// Repair finish time, if any.
    pub repair_finished_at: Option<DateTime<Utc>>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest mutation timestamp.
    pub updated_at: DateTime<Utc>,
}

impl ExecutionQueueRecord {
    /// Creates a record for a service order entering the queue.
    ///
    /// New records start in [`ExecutionStatus::Awaiting`] with every optional
    /// field unset.
    #[must_use]
    pub fn new(service_order_id: ServiceOrderId, priority: Priority, clock: &impl Clock) -> Self {
        let timestamp = stamp(clock);
        Self {
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
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a record from persisted storage.
    ///
    /// Timestamps are truncated to microseconds.
    ///
    /// # Errors
    ///
    /// Returns [`QueueDomainError::UpdatedBeforeCreated`] when `updated_at`
    /// precedes `created_at`.
    pub fn from_persisted(data: PersistedRecordData) -> Result<Self, QueueDomainError> {
        let created_at = truncate(data.created_at);
        let updated_at = truncate(data.updated_at);
        if updated_at < created_at {
            return Err(QueueDomainError::UpdatedBeforeCreated {
                created_at,
                updated_at,
            });
        }
        Ok(Self {
            id: data.id,
            service_order_id: data.service_order_id,
            status: data.status,
            priority: data.priority,
            assigned_mechanic_id: data.assigned_mechanic_id,
            diagnosis: data.diagnosis,
            repair_notes: data.repair_notes,
            diagnosis_started_at: data.diagnosis_started_at.map(truncate),
            diagnosis_finished_at: data.diagnosis_finished_at.map(truncate),
            repair_started_at: data.repair_started_at.map(truncate),
            repair_finished_at: data.repair_finished_at.map(truncate),
            created_at,
            updated_at,
        })
    }

    /// Returns the same record under another identifier.
    #[must_use]
    pub(crate) const fn with_id(mut self, id: RecordId) -> Self {
        self.id = id;
        self
    }

    /// Returns the internal record identifier.
    #[must_use]
    pub const fn id(&self) -> RecordId {
        self.id
    }

    /// Returns the tracked service order.
    #[must_use]
    pub const fn service_order_id(&self) -> ServiceOrderId {
        self.service_order_id
    }

    /// Returns the execution status.
    #[must_use]
    pub const fn status(&self) -> ExecutionStatus {
        self.status
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.priority
    }

    /// Returns the assigned mechanic, if any.
    #[must_use]
    pub const fn assigned_mechanic_id(&self) -> Option<MechanicId> {
        self.assigned_mechanic_id
    }

    /// Returns the diagnosis text, if any.
    #[must_use]
    pub fn diagnosis(&self) -> Option<&str> {
        self.diagnosis.as_deref()
    }

    /// Returns the repair notes, if any.
    #[must_use]
    pub fn repair_notes(&self) -> Option<&str> {
        self.repair_notes.as_deref()
    }

    /// Returns the diagnosis start time, if any.
    #[must_use]
    pub const fn diagnosis_started_at(&self) -> Option<DateTime<Utc>> {
        self.diagnosis_started_at
    }

    /// Returns the diagnosis finish time, if any.
    #[must_use]
    pub const fn diagnosis_finished_at(&self) -> Option<DateTime<Utc>> {
        self.diagnosis_finished_at
    }

    /// Returns the repair start time, if any.
    #[must_use]
    pub const fn repair_started_at(&self) -> Option<DateTime<Utc>> {
        self.repair_started_at
    }

    /// Returns the repair finish time, if any.
    #[must_use]
    pub const fn repair_finished_at(&self) -> Option<DateTime<Utc>> {
        self.repair_finished_at
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest mutation timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Applies a patch and refreshes `updated_at`.
    ///
    /// An empty patch still counts as a mutation and refreshes the timestamp.
    pub fn apply(&mut self, patch: RecordPatch, clock: &impl Clock) {
        let RecordPatch {
            status,
            priority,
            assigned_mechanic_id,
            diagnosis,
            repair_notes,
            diagnosis_started_at,
            diagnosis_finished_at,
            repair_started_at,
            repair_finished_at,
        } = patch;

        if let Some(value) = status {
            self.status = value;
        }
        if let Some(value) = priority {
            self.priority = value;
        }
        if let Some(value) = assigned_mechanic_id {
            self.assigned_mechanic_id = value;
        }
        if let Some(value) = diagnosis {
            self.diagnosis = value;
        }
        if let Some(value) = repair_notes {
            self.repair_notes = value;
        }
        if let Some(value) = diagnosis_started_at {
            self.diagnosis_started_at = value.map(truncate);
        }
        if let Some(value) = diagnosis_finished_at {
            self.diagnosis_finished_at = value.map(truncate);
        }
        if let Some(value) = repair_started_at {
            self.repair_started_at = value.map(truncate);
        }
        if let Some(value) = repair_finished_at {
            self.repair_finished_at = value.map(truncate);
        }
        self.touch(clock);
    }

    /// Updates `updated_at`, never letting it precede `created_at`.
    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = stamp(clock).max(self.created_at);
    }
}

impl TryFrom<PersistedRecordData> for ExecutionQueueRecord {
    type Error = QueueDomainError;

    fn try_from(data: PersistedRecordData) -> Result<Self, Self::Error> {
        Self::from_persisted(data)
    }
}

fn truncate(timestamp: DateTime<Utc>) -> DateTime<Utc> {
    timestamp.trunc_subsecs(TIMESTAMP_PRECISION)
}

fn stamp(clock: &impl Clock) -> DateTime<Utc> {
    truncate(clock.utc())
}

/// Queue consumption order: higher priority first, then oldest first.
///
/// Records with equal priority and creation time fall back to the service
/// order id so that the order is total.
#[must_use]
pub fn queue_order(left: &ExecutionQueueRecord, right: &ExecutionQueueRecord) -> Ordering {
    right
        .priority
        .cmp(&left.priority)
        .then_with(|| left.created_at.cmp(&right.created_at))
        .then_with(|| left.service_order_id.cmp(&right.service_order_id))
}
