//! Handoff verification — the picked→completed transition.

use crate::error::LifecycleError;
use goodhaul_store::{CasOutcome, DonationPatch, DonationStore, OtpPatch};
use goodhaul_types::{DonationId, DonationKind, DonationStatus, Timestamp, UserId};
use std::sync::Arc;

/// Validates claimant identity, state, expiry, and code, then completes the
/// request.
pub struct HandoffVerifier {
    store: Arc<dyn DonationStore>,
}

impl HandoffVerifier {
    pub fn new(store: Arc<dyn DonationStore>) -> Self {
        Self { store }
    }

    /// Verify a presented handoff code and complete the donation.
    ///
    /// The guard order is part of the contract. Identity and state are
    /// checked before anything about the code, so an unauthorized caller
    /// learns only `NotAllowed` — never whether the code expired or matched.
    /// An expired or mismatched code leaves the record picked: the code is
    /// not consumed, and a reissue or retry can still succeed.
    ///
    /// Returns the donation kind so the caller can route downstream effects
    /// without a second lookup.
    pub fn verify(
        &self,
        id: DonationId,
        claimant: UserId,
        presented_code: &str,
        now: Timestamp,
    ) -> Result<DonationKind, LifecycleError> {
        let record = self.store.get(id)?.ok_or(LifecycleError::NotFound)?;

        if record.status != DonationStatus::Picked || record.claimant != Some(claimant) {
            return Err(LifecycleError::NotAllowed);
        }

        let expiry = record.otp_expiry.ok_or_else(|| {
            LifecycleError::Corrupt(format!("donation {id} is picked but holds no code expiry"))
        })?;
        if expiry.is_past(now) {
            return Err(LifecycleError::Expired);
        }

        let otp = record.otp.as_deref().ok_or_else(|| {
            LifecycleError::Corrupt(format!("donation {id} is picked but holds no code"))
        })?;
        if otp != presented_code {
            return Err(LifecycleError::InvalidCode);
        }

        let patch = DonationPatch {
            status: DonationStatus::Completed,
            claimant: None,
            otp: OtpPatch::Clear,
            rejection_reason: None,
        };
        match self.store.update_if_status(id, DonationStatus::Picked, patch)? {
            CasOutcome::Updated(updated) => {
                tracing::info!(%id, %claimant, kind = %updated.kind(), "handoff verified");
                Ok(updated.kind())
            }
            // Lost the write to a concurrent verify or reject; the record is
            // no longer ours to complete.
            CasOutcome::StatusMismatch(_) => Err(LifecycleError::NotAllowed),
            CasOutcome::NotFound => Err(LifecycleError::NotFound),
        }
    }
}
