//! Domain model for the service-order execution queue.
//!
//! Records are plain structured values: the domain enumerates statuses and
//! priorities but does not validate transitions between them. Ordering of
//! queue consumption (priority first, oldest first) is defined here so that
//! every adapter sorts the same way.

mod error;
mod ids;
mod patch;
mod priority;
mod record;
mod status;

pub use error::{ParsePriorityError, ParseStatusError, QueueDomainError};
pub use ids::{MechanicId, RecordId, ServiceOrderId};
pub use patch::RecordPatch;
pub use priority::Priority;
pub use record::{ExecutionQueueRecord, PersistedRecordData, queue_order};
pub use status::ExecutionStatus;
