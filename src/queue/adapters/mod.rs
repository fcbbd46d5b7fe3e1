//! Adapter implementations of the execution queue repository port.

pub mod memory;
pub mod postgres;
