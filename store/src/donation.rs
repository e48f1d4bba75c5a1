//! Donation record storage trait.

use crate::StoreError;
use goodhaul_types::{
    DonationId, DonationKind, DonationPayload, DonationRecord, DonationStatus, Timestamp, UserId,
};
use serde::{Deserialize, Serialize};

/// Field values for a record about to be inserted.
///
/// The backend allocates the id; everything else is provided by the caller.
/// New records always start in [`DonationStatus::Pending`] with a live code.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NewDonation {
    pub requester: UserId,
    pub payload: DonationPayload,
    pub location: String,
    pub otp: String,
    pub otp_expiry: Timestamp,
    pub created_at: Timestamp,
}

/// How a conditional update treats the stored code fields.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OtpPatch {
    /// Leave otp and otp_expiry untouched.
    Keep,
    /// Replace both with a fresh issuance.
    Set { otp: String, expiry: Timestamp },
    /// Null both out (entering a terminal state).
    Clear,
}

/// The field changes a conditional update applies once the status check
/// passes.
///
/// `claimant` and `rejection_reason` are write-once: `Some` sets the field,
/// `None` leaves it as stored. Neither is ever cleared.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DonationPatch {
    pub status: DonationStatus,
    pub claimant: Option<UserId>,
    pub otp: OtpPatch,
    pub rejection_reason: Option<String>,
}

/// Result of a conditional update.
#[derive(Clone, Debug)]
pub enum CasOutcome {
    /// The status check passed and the patch was applied; carries the record
    /// as written.
    Updated(DonationRecord),
    /// The record exists but its status differed from the expectation; no
    /// fields changed. Carries the status actually observed.
    StatusMismatch(DonationStatus),
    /// No record with that id.
    NotFound,
}

/// Trait for donation record storage.
///
/// All donation kinds share a single id space; `get` never needs a kind.
/// Backends must make `update_if_status` atomic per record — two concurrent
/// calls with the same expectation must never both observe it satisfied.
pub trait DonationStore: Send + Sync {
    /// Insert a new pending record, allocating its id.
    fn insert(&self, donation: NewDonation) -> Result<DonationRecord, StoreError>;

    /// Fetch a record by id, whatever its kind.
    fn get(&self, id: DonationId) -> Result<Option<DonationRecord>, StoreError>;

    /// All pending records of one kind, newest first.
    fn list_pending(&self, kind: DonationKind) -> Result<Vec<DonationRecord>, StoreError>;

    /// Every record created by `requester`, newest first, any status.
    fn list_by_requester(&self, requester: UserId) -> Result<Vec<DonationRecord>, StoreError>;

    /// Every record claimed by `claimant`, newest first, any status.
    fn list_by_claimant(&self, claimant: UserId) -> Result<Vec<DonationRecord>, StoreError>;

    /// Atomically apply `patch` to the record iff its current status equals
    /// `expected`.
    ///
    /// This is the compare-and-swap every lifecycle transition rides on: the
    /// status read and the write happen in one indivisible step.
    fn update_if_status(
        &self,
        id: DonationId,
        expected: DonationStatus,
        patch: DonationPatch,
    ) -> Result<CasOutcome, StoreError>;

    /// Total number of records, across all kinds and statuses.
    fn donation_count(&self) -> Result<u64, StoreError>;
}
