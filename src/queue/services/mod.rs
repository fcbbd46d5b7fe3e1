//! Application services for execution queue access.

mod queue;

pub use queue::{
    CreateRecordRequest, ExecutionQueueService, QueueServiceError, QueueServiceResult,
};
