//! Diesel row models for execution queue persistence.

use super::schema::execution_queue;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for execution queue records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = execution_queue)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct QueueRecordRow {
    /// Internal record identifier.
    pub id: uuid::Uuid,
    /// Tracked service order.
    pub service_order_id: i64,
    /// Execution status label.
    pub status: String,
    /// Priority rank.
    pub priority: i16,
    /// Assigned mechanic.
    pub assigned_mechanic_id: Option<i64>,
    /// Diagnosis text.
    pub diagnosis: Option<String>,
    /// Repair notes.
    pub repair_notes: Option<String>,
    /// Diagnosis start time.
    pub diagnosis_started_at: Option<DateTime<Utc>>,
    /// Diagnosis finish time.
    pub diagnosis_finished_at: Option<DateTime<Utc>>,
    /// Repair start time.
    pub repair_started_at: Option<DateTime<Utc>>,
    /// Repair finish time.
    pub repair_finished_at: Option<DateTime<Utc>>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for execution queue records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = execution_queue)]
pub struct NewQueueRecordRow {
    /// Internal record identifier.
    pub id: uuid::Uuid,
    /// Tracked service order.
    pub service_order_id: i64,
    /// Execution status label.
    pub status: String,
    /// Priority rank.
    pub priority: i16,
    /// Assigned mechanic.
    pub assigned_mechanic_id: Option<i64>,
    /// Diagnosis text.
    pub diagnosis: Option<String>,
    /// Repair notes.
    pub repair_notes: Option<String>,
    /// Diagnosis start time.
    pub diagnosis_started_at: Option<DateTime<Utc>>,
    /// Diagnosis finish time.
    pub diagnosis_finished_at: Option<DateTime<Utc>>,
    /// Repair start time.
    pub repair_started_at: Option<DateTime<Utc>>,
    /// Repair finish time.
    pub repair_finished_at: Option<DateTime<Utc>>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Changeset for updating the mutable columns of a record.
///
/// `None` values are written as `NULL` so that cleared fields persist.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = execution_queue)]
#[diesel(treat_none_as_null = true)]
pub struct QueueRecordChangeset {
    /// Execution status label.
    pub status: String,
    /// Priority rank.
    pub priority: i16,
    /// Assigned mechanic.
    pub assigned_mechanic_id: Option<i64>,
    /// Diagnosis text.
    pub diagnosis: Option<String>,
    /// Repair notes.
    pub repair_notes: Option<String>,
    /// Diagnosis start time.
    pub diagnosis_started_at: Option<DateTime<Utc>>,
    /// Diagnosis finish time.
    pub diagnosis_finished_at: Option<DateTime<Utc>>,
    /// Repair start time.
    pub repair_started_at: Option<DateTime<Utc>>,
    /// Repair finish time.
    pub repair_finished_at: Option<DateTime<Utc>>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}
