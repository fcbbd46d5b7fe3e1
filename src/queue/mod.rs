//! Service-order execution queue.
//!
//! Stores one record per service order, tracks its diagnosis and repair
//! phases, and serves records in priority order (most urgent first, oldest
//! first within a priority). The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Access services in [`services`]
//! - Development fixtures in [`seed`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod seed;
pub mod services;
