//! In-memory adapters for tests and local development.

mod repository;

pub use repository::InMemoryExecutionQueueRepository;
