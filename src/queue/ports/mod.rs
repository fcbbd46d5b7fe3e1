//! Port contracts for execution queue storage.
//!
//! Ports define infrastructure-agnostic interfaces used by queue services.

pub mod repository;

pub use repository::{ExecutionQueueRepository, QueueRepositoryError, QueueRepositoryResult};

#[cfg(test)]
pub use repository::MockExecutionQueueRepository;
