//! Partial updates applied to stored queue records.

use super::{ExecutionStatus, MechanicId, Priority};
use chrono::{DateTime, Utc};

/// Set of field changes for an existing queue record.
///
/// Each field is left untouched unless the matching `with_*` method was
/// called. Nullable fields take an `Option` so that callers can clear them
/// (`with_diagnosis(None)`) as well as set them. The creation timestamp is
/// not patchable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordPatch {
    pub(super) status: Option<ExecutionStatus>,
    pub(super) priority: Option<Priority>,
    pub(super) assigned_mechanic_id: Option<Option<MechanicId>>,
    pub(super) diagnosis: Option<Option<String>>,
    pub(super) repair_notes: Option<Option<String>>,
    pub(super) diagnosis_started_at: Option<Option<DateTime<Utc>>>,
    pub(super) diagnosis_finished_at: Option<Option<DateTime<Utc>>>,
    pub(super) repair_started_at: Option<Option<DateTime<Utc>>>,
    pub(super) repair_finished_at: Option<Option<DateTime<Utc>>>,
}

impl RecordPatch {
    /// Creates an empty patch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the execution status.
    #[must_use]
    pub fn with_status(mut self, status: ExecutionStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Sets the priority.
    #[must_use]
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Sets or clears the assigned mechanic.
    #[must_use]
    pub fn with_assigned_mechanic(mut self, mechanic: Option<MechanicId>) -> Self {
        self.assigned_mechanic_id = Some(mechanic);
        self
    }

    /// Sets or clears the diagnosis text.
    #[must_use]
    pub fn with_diagnosis(mut self, diagnosis: Option<String>) -> Self {
        self.diagnosis = Some(diagnosis);
        self
    }

    /// Sets or clears the repair notes.
    #[must_use]
    pub fn with_repair_notes(mut self, notes: Option<String>) -> Self {
        self.repair_notes = Some(notes);
        self
    }

    /// Sets or clears the diagnosis start time.
    #[must_use]
    pub fn with_diagnosis_started_at(mut self, at: Option<DateTime<Utc>>) -> Self {
        self.diagnosis_started_at = Some(at);
        self
    }

    /// Sets or clears the diagnosis finish time.
    #[must_use]
    pub fn with_diagnosis_finished_at(mut self, at: Option<DateTime<Utc>>) -> Self {
        self.diagnosis_finished_at = Some(at);
        self
    }

    /// Sets or clears the repair start time.
    #[must_use]
    pub fn with_repair_started_at(mut self, at: Option<DateTime<Utc>>) -> Self {
        self.repair_started_at = Some(at);
        self
    }

    /// Sets or clears the repair finish time.
    #[must_use]
    pub fn with_repair_finished_at(mut self, at: Option<DateTime<Utc>>) -> Self {
        self.repair_finished_at = Some(at);
        self
    }

    /// Returns `true` when the patch changes no field.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.status.is_none()
            && self.priority.is_none()
            && self.assigned_mechanic_id.is_none()
            && self.diagnosis.is_none()
            && self.repair_notes.is_none()
            && self.diagnosis_started_at.is_none()
            && self.diagnosis_finished_at.is_none()
            && self.repair_started_at.is_none()
            && self.repair_finished_at.is_none()
    }
}
