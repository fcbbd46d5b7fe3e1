//! Execution queue for workshop service orders.
//!
//! This crate tracks each service order while it waits for, and moves
//! through, diagnosis and repair. Records are kept unique per service order
//! and served in priority order so the most urgent, longest-waiting work is
//! picked up first.
//!
//! # Architecture
//!
//! The queue follows hexagonal architecture principles:
//!
//! - **Domain**: Pure record, status, and priority types
//! - **Ports**: The repository contract the services depend on
//! - **Adapters**: In-memory and `PostgreSQL` repository implementations
//!
//! # Modules
//!
//! - [`config`]: Environment-driven runtime configuration
//! - [`queue`]: Execution queue records, storage, and access services

pub mod config;
pub mod queue;
