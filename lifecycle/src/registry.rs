//! Donation registry — creation, listings, reject, and code reissue.

use crate::error::LifecycleError;
use goodhaul_otp::CodeIssuer;
use goodhaul_store::{CasOutcome, DonationPatch, DonationStore, NewDonation, OtpPatch};
use goodhaul_types::{
    DonationId, DonationKind, DonationPayload, DonationRecord, DonationStatus, Timestamp, UserId,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// A request to create a donation.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CreateDonation {
    pub requester: UserId,
    pub location: String,
    pub payload: DonationPayload,
}

/// The outcome of a successful creation: the allocated id and the handoff
/// code the requester will hand to the pickup agent in person.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CreatedDonation {
    pub id: DonationId,
    pub otp: String,
}

/// Owns donation-request records: creation, listings, the reject path, and
/// code reissue. Claim and verification have their own components.
pub struct DonationRegistry {
    store: Arc<dyn DonationStore>,
    issuer: Arc<dyn CodeIssuer>,
}

impl DonationRegistry {
    pub fn new(store: Arc<dyn DonationStore>, issuer: Arc<dyn CodeIssuer>) -> Self {
        Self { store, issuer }
    }

    /// Validate the request, issue a handoff code, and insert a pending
    /// record. Returns the id and the code.
    pub fn create(
        &self,
        request: CreateDonation,
        now: Timestamp,
    ) -> Result<CreatedDonation, LifecycleError> {
        validate(&request)?;

        let issued = self.issuer.issue(now);
        let record = self.store.insert(NewDonation {
            requester: request.requester,
            payload: request.payload,
            location: request.location,
            otp: issued.code.clone(),
            otp_expiry: issued.expires_at,
            created_at: now,
        })?;
        tracing::info!(id = %record.id, kind = %record.kind(), "donation created");

        Ok(CreatedDonation {
            id: record.id,
            otp: issued.code,
        })
    }

    /// Pending records of one kind, newest first. A finite snapshot,
    /// recomputed per call.
    pub fn list_pending(&self, kind: DonationKind) -> Result<Vec<DonationRecord>, LifecycleError> {
        Ok(self.store.list_pending(kind)?)
    }

    /// Fetch a record by id, whatever its kind.
    pub fn get(&self, id: DonationId) -> Result<DonationRecord, LifecycleError> {
        self.store.get(id)?.ok_or(LifecycleError::NotFound)
    }

    /// Every record created by `requester`, newest first.
    pub fn list_by_requester(
        &self,
        requester: UserId,
    ) -> Result<Vec<DonationRecord>, LifecycleError> {
        Ok(self.store.list_by_requester(requester)?)
    }

    /// Every record claimed by `claimant`, newest first.
    pub fn list_by_claimant(&self, claimant: UserId) -> Result<Vec<DonationRecord>, LifecycleError> {
        Ok(self.store.list_by_claimant(claimant)?)
    }

    /// Total records tracked, across all kinds and statuses. For telemetry.
    pub fn donation_count(&self) -> Result<u64, LifecycleError> {
        Ok(self.store.donation_count()?)
    }

    /// Move a pending or picked record to rejected, clearing its code and
    /// recording the reason. Rejecting a terminal record is a no-op failure.
    pub fn reject(&self, id: DonationId, reason: &str) -> Result<(), LifecycleError> {
        let record = self.get(id)?;
        self.update_following_status(id, record.status, |_| DonationPatch {
            status: DonationStatus::Rejected,
            claimant: None,
            otp: OtpPatch::Clear,
            rejection_reason: Some(reason.to_string()),
        })?;
        tracing::info!(%id, reason, "donation rejected");
        Ok(())
    }

    /// Replace the handoff code of a live (pending or picked) record.
    ///
    /// The previous issuance instant is derived from the stored expiry, so
    /// the reissue cooldown holds across restarts without an extra field.
    pub fn reissue(&self, id: DonationId, now: Timestamp) -> Result<String, LifecycleError> {
        let record = self.get(id)?;
        if record.status.is_terminal() {
            return Err(LifecycleError::AlreadyTerminal);
        }
        let expiry = record.otp_expiry.ok_or_else(|| {
            LifecycleError::Corrupt(format!(
                "donation {} is {} but holds no code expiry",
                id, record.status
            ))
        })?;

        let issued_at =
            Timestamp::new(expiry.as_secs().saturating_sub(self.issuer.ttl_secs()));
        let fresh = self.issuer.reissue(issued_at, now)?;

        let code = fresh.code.clone();
        self.update_following_status(id, record.status, move |current| DonationPatch {
            status: current,
            claimant: None,
            otp: OtpPatch::Set {
                otp: fresh.code.clone(),
                expiry: fresh.expires_at,
            },
            rejection_reason: None,
        })?;
        tracing::info!(%id, "handoff code reissued");
        Ok(code)
    }

    /// Apply a patch built from the current status.
    ///
    /// Status only ever moves forward, so when the conditional write loses to
    /// a concurrent transition the observed status can be followed at most
    /// once (pending→picked) before the record is terminal.
    fn update_following_status<F>(
        &self,
        id: DonationId,
        observed: DonationStatus,
        make_patch: F,
    ) -> Result<DonationRecord, LifecycleError>
    where
        F: Fn(DonationStatus) -> DonationPatch,
    {
        let mut expected = observed;
        for _ in 0..2 {
            if expected.is_terminal() {
                return Err(LifecycleError::AlreadyTerminal);
            }
            match self.store.update_if_status(id, expected, make_patch(expected))? {
                CasOutcome::Updated(record) => return Ok(record),
                CasOutcome::StatusMismatch(actual) => expected = actual,
                CasOutcome::NotFound => return Err(LifecycleError::NotFound),
            }
        }
        Err(LifecycleError::AlreadyTerminal)
    }
}

fn validate(request: &CreateDonation) -> Result<(), LifecycleError> {
    fn required(field: &str, value: &str) -> Result<(), LifecycleError> {
        if value.trim().is_empty() {
            return Err(LifecycleError::Validation(format!(
                "{field} must not be empty"
            )));
        }
        Ok(())
    }

    required("location", &request.location)?;
    match &request.payload {
        DonationPayload::Food(food) => {
            required("food_type", &food.food_type)?;
            required("provider_type", &food.provider_type)?;
            if food.quantity == 0 {
                return Err(LifecycleError::Validation(
                    "quantity must be positive".to_string(),
                ));
            }
        }
        DonationPayload::Clothes(clothes) => {
            required("cloth_type", &clothes.cloth_type)?;
            required("condition", &clothes.condition)?;
            if clothes.quantity == 0 {
                return Err(LifecycleError::Validation(
                    "quantity must be positive".to_string(),
                ));
            }
        }
    }
    Ok(())
}
