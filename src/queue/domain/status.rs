//! Execution status of a queued service order.

use super::ParseStatusError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Current phase of a service order's execution.
///
/// Values are data only; which transitions are legal is decided by the
/// workflow that drives the queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExecutionStatus {
    /// Waiting for a mechanic to pick the order up.
    Awaiting,
    /// A mechanic is diagnosing the vehicle.
    InDiagnosis,
    /// The repair is under way.
    InRepair,
    /// The repair has been completed.
    Finished,
}

impl ExecutionStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Awaiting => "AWAITING",
            Self::InDiagnosis => "IN_DIAGNOSIS",
            Self::InRepair => "IN_REPAIR",
            Self::Finished => "FINISHED",
        }
    }
}

impl fmt::Display for ExecutionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ExecutionStatus {
    type Error = ParseStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_uppercase();
        match normalized.as_str() {
            "AWAITING" => Ok(Self::Awaiting),
            "IN_DIAGNOSIS" => Ok(Self::InDiagnosis),
            "IN_REPAIR" => Ok(Self::InRepair),
            "FINISHED" => Ok(Self::Finished),
            _ => Err(ParseStatusError(value.to_owned())),
        }
    }
}
