//! The donation-request entity and its kind-specific payloads.
//!
//! Food and clothing requests share one record shape and one id space; the
//! payload enum is the kind discriminator. Lookup by id is therefore a single
//! operation, never a try-one-collection-then-the-other probe.

use crate::id::{DonationId, UserId};
use crate::status::{DonationKind, DonationStatus};
use crate::time::Timestamp;
use serde::{Deserialize, Serialize};

/// Details of a food donation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoodDetails {
    pub food_type: String,
    pub quantity: u32,
    /// Asking price in minor currency units; 0 for free donations.
    pub price: u64,
    /// Who is offering the food (restaurant, household, caterer, ...).
    pub provider_type: String,
}

/// Details of a clothing donation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClothesDetails {
    pub cloth_type: String,
    pub quantity: u32,
    pub condition: String,
}

/// Kind-specific payload of a donation request, fixed at creation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum DonationPayload {
    Food(FoodDetails),
    Clothes(ClothesDetails),
}

impl DonationPayload {
    pub fn kind(&self) -> DonationKind {
        match self {
            Self::Food(_) => DonationKind::Food,
            Self::Clothes(_) => DonationKind::Clothes,
        }
    }

    /// Number of units offered, whichever the kind.
    pub fn quantity(&self) -> u32 {
        match self {
            Self::Food(f) => f.quantity,
            Self::Clothes(c) => c.quantity,
        }
    }
}

/// A single donation request tracked through its lifecycle.
///
/// `otp` and `otp_expiry` are `Some` exactly while the status
/// [`holds_code`](DonationStatus::holds_code); both are cleared on entering a
/// terminal state. `claimant` is set once, by the winning claim, and never
/// changes afterwards. Records are never deleted — terminal records persist
/// for audit and status queries.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DonationRecord {
    pub id: DonationId,
    pub requester: UserId,
    pub claimant: Option<UserId>,
    pub payload: DonationPayload,
    pub location: String,
    pub status: DonationStatus,
    /// Handoff code, exchanged out of band and compared as plaintext.
    pub otp: Option<String>,
    pub otp_expiry: Option<Timestamp>,
    pub rejection_reason: Option<String>,
    pub created_at: Timestamp,
}

impl DonationRecord {
    pub fn kind(&self) -> DonationKind {
        self.payload.kind()
    }

    /// Whether the record satisfies the otp-nullability invariant.
    pub fn code_fields_consistent(&self) -> bool {
        let expect_code = self.status.holds_code();
        self.otp.is_some() == expect_code && self.otp_expiry.is_some() == expect_code
    }
}
