//! `PostgreSQL` adapters for execution queue persistence.

mod models;
mod repository;
mod schema;

pub use repository::{
    CREATE_EXECUTION_QUEUE_SQL, PostgresExecutionQueueRepository, QueuePgPool, build_pool,
};
