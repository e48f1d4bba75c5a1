//! Claim coordination — the atomically contested pending→picked transition.

use crate::error::LifecycleError;
use goodhaul_store::{CasOutcome, DonationPatch, DonationStore, OtpPatch};
use goodhaul_types::{DonationId, DonationStatus, UserId};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// The outcome of a winning claim: the handoff code, returned so the caller
/// can deliver it to the claimant out of band.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ClaimedDonation {
    pub otp: String,
}

/// Moves a pending record to picked, assigning the claimant.
pub struct ClaimCoordinator {
    store: Arc<dyn DonationStore>,
}

impl ClaimCoordinator {
    pub fn new(store: Arc<dyn DonationStore>) -> Self {
        Self { store }
    }

    /// Claim a pending donation for `claimant`.
    ///
    /// This is a single conditional write, never a read followed by a write:
    /// of N concurrent claims on one record, the store lets exactly one
    /// observe `pending`, and every other caller gets
    /// [`LifecycleError::AlreadyClaimed`] — including claims on records that
    /// were picked or closed long ago.
    pub fn claim(
        &self,
        id: DonationId,
        claimant: UserId,
    ) -> Result<ClaimedDonation, LifecycleError> {
        let patch = DonationPatch {
            status: DonationStatus::Picked,
            claimant: Some(claimant),
            otp: OtpPatch::Keep,
            rejection_reason: None,
        };
        match self.store.update_if_status(id, DonationStatus::Pending, patch)? {
            CasOutcome::Updated(record) => {
                let otp = record.otp.ok_or_else(|| {
                    LifecycleError::Corrupt(format!(
                        "donation {id} picked without a handoff code"
                    ))
                })?;
                tracing::info!(%id, %claimant, "donation claimed");
                Ok(ClaimedDonation { otp })
            }
            CasOutcome::StatusMismatch(_) => Err(LifecycleError::AlreadyClaimed),
            CasOutcome::NotFound => Err(LifecycleError::NotFound),
        }
    }
}
