//! Diesel schema for execution queue persistence.

diesel::table! {
    /// Service-order execution records.
    execution_queue (id) {
        /// Internal record identifier.
        id -> Uuid,
        /// Tracked service order, unique across the table.
        service_order_id -> Int8,
        /// Execution status label.
        #[max_length = 32]
        status -> Varchar,
        /// Priority rank, higher is more urgent.
        priority -> Int2,
        /// Assigned mechanic.
        assigned_mechanic_id -> Nullable<Int8>,
        /// Diagnosis text.
        diagnosis -> Nullable<Text>,
        /// Repair notes.
        repair_notes -> Nullable<Text>,
        /// Diagnosis start time.
        diagnosis_started_at -> Nullable<Timestamptz>,
        /// Diagnosis finish time.
        diagnosis_finished_at -> Nullable<Timestamptz>,
        /// Repair start time.
        repair_started_at -> Nullable<Timestamptz>,
        /// Repair finish time.
        repair_finished_at -> Nullable<Timestamptz>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}
