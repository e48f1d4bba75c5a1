//! Kind and lifecycle-status enums for donation requests.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The kind of goods a donation request covers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DonationKind {
    Food,
    Clothes,
}

impl DonationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Food => "food",
            Self::Clothes => "clothes",
        }
    }
}

impl fmt::Display for DonationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DonationKind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "food" => Ok(Self::Food),
            "clothes" => Ok(Self::Clothes),
            other => Err(UnknownKind(other.to_string())),
        }
    }
}

/// Error returned when parsing an unrecognised donation kind.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownKind(pub String);

impl fmt::Display for UnknownKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown donation kind: {}", self.0)
    }
}

impl std::error::Error for UnknownKind {}

/// Lifecycle status of a donation request.
///
/// Transitions are strictly forward-only:
///
/// ```text
/// pending ──claim──► picked ──verify──► completed   [terminal]
/// pending ──reject─────────────────────► rejected   [terminal]
/// picked  ──reject─────────────────────► rejected   [terminal]
/// ```
///
/// No transition ever revisits a prior state, and nothing leaves a terminal
/// state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DonationStatus {
    /// Listed and waiting for a pickup agent.
    Pending,
    /// Claimed by a pickup agent; handoff code outstanding.
    Picked,
    /// Handoff verified; goods delivered.
    Completed,
    /// Withdrawn or refused before completion.
    Rejected,
}

impl DonationStatus {
    /// Whether this status admits no further transitions.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Rejected)
    }

    /// Whether a record in this status carries a live handoff code.
    ///
    /// The otp and its expiry are non-null exactly while this holds.
    pub fn holds_code(&self) -> bool {
        matches!(self, Self::Pending | Self::Picked)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Picked => "picked",
            Self::Completed => "completed",
            Self::Rejected => "rejected",
        }
    }
}

impl fmt::Display for DonationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
