//! Step definitions for execution queue behaviour scenarios.

pub mod then;
pub mod when;
