//! Queue priority classes.

use super::ParsePriorityError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse urgency classification of a service order.
///
/// Variants are declared in ascending urgency, so the derived [`Ord`] gives
/// `Low < Normal < High < Urgent`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Priority {
    /// Can wait behind everything else.
    Low,
    /// Default priority for new orders.
    #[default]
    Normal,
    /// Served before normal orders.
    High,
    /// Served first.
    Urgent,
}

impl Priority {
    /// Returns the canonical label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Normal => "NORMAL",
            Self::High => "HIGH",
            Self::Urgent => "URGENT",
        }
    }

    /// Returns the numeric rank stored in the database.
    ///
    /// Higher ranks are more urgent; a descending index on the rank column
    /// yields the queue order.
    #[must_use]
    pub const fn rank(self) -> i16 {
        match self {
            Self::Low => 0,
            Self::Normal => 1,
            Self::High => 2,
            Self::Urgent => 3,
        }
    }

    /// Parses a stored rank.
    ///
    /// # Errors
    ///
    /// Returns [`ParsePriorityError`] when the rank is outside `0..=3`.
    pub fn from_rank(rank: i16) -> Result<Self, ParsePriorityError> {
        match rank {
            0 => Ok(Self::Low),
            1 => Ok(Self::Normal),
            2 => Ok(Self::High),
            3 => Ok(Self::Urgent),
            other => Err(ParsePriorityError(other.to_string())),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Priority {
    type Error = ParsePriorityError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_uppercase();
        match normalized.as_str() {
            "LOW" => Ok(Self::Low),
            "NORMAL" => Ok(Self::Normal),
            "HIGH" => Ok(Self::High),
            "URGENT" => Ok(Self::Urgent),
            _ => Err(ParsePriorityError(value.to_owned())),
        }
    }
}
