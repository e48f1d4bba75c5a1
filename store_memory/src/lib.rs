//! In-memory reference backend for the goodhaul storage traits.
//!
//! One mutex guards the whole map, so every
//! [`update_if_status`](DonationStore::update_if_status) call is a single
//! critical section — the status check and the write cannot interleave with
//! another caller's. That is the entire concurrency story the lifecycle
//! engine relies on; heavier backends provide the same guarantee with a
//! conditional `UPDATE ... WHERE status = ?` or a document-level CAS.

use goodhaul_store::{
    CasOutcome, DonationPatch, DonationStore, NewDonation, OtpPatch, StoreError,
};
use goodhaul_types::{DonationId, DonationKind, DonationRecord, DonationStatus, UserId};
use std::collections::BTreeMap;
use std::sync::Mutex;

struct Inner {
    next_id: u64,
    records: BTreeMap<u64, DonationRecord>,
}

/// A thread-safe in-memory donation store.
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                next_id: 1,
                records: BTreeMap::new(),
            }),
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Inner>, StoreError> {
        self.inner
            .lock()
            .map_err(|_| StoreError::Backend("store mutex poisoned".to_string()))
    }

    /// Newest-first ordering: created_at descending, id descending as the
    /// tie-break for records created in the same second.
    fn sorted_newest_first(mut records: Vec<DonationRecord>) -> Vec<DonationRecord> {
        records.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then(b.id.as_u64().cmp(&a.id.as_u64()))
        });
        records
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DonationStore for MemoryStore {
    fn insert(&self, donation: NewDonation) -> Result<DonationRecord, StoreError> {
        let mut inner = self.lock()?;
        let id = DonationId::new(inner.next_id);
        inner.next_id += 1;

        let record = DonationRecord {
            id,
            requester: donation.requester,
            claimant: None,
            payload: donation.payload,
            location: donation.location,
            status: DonationStatus::Pending,
            otp: Some(donation.otp),
            otp_expiry: Some(donation.otp_expiry),
            rejection_reason: None,
            created_at: donation.created_at,
        };
        inner.records.insert(id.as_u64(), record.clone());
        Ok(record)
    }

    fn get(&self, id: DonationId) -> Result<Option<DonationRecord>, StoreError> {
        Ok(self.lock()?.records.get(&id.as_u64()).cloned())
    }

    fn list_pending(&self, kind: DonationKind) -> Result<Vec<DonationRecord>, StoreError> {
        let inner = self.lock()?;
        let matching = inner
            .records
            .values()
            .filter(|r| r.status == DonationStatus::Pending && r.kind() == kind)
            .cloned()
            .collect();
        Ok(Self::sorted_newest_first(matching))
    }

    fn list_by_requester(&self, requester: UserId) -> Result<Vec<DonationRecord>, StoreError> {
        let inner = self.lock()?;
        let matching = inner
            .records
            .values()
            .filter(|r| r.requester == requester)
            .cloned()
            .collect();
        Ok(Self::sorted_newest_first(matching))
    }

    fn list_by_claimant(&self, claimant: UserId) -> Result<Vec<DonationRecord>, StoreError> {
        let inner = self.lock()?;
        let matching = inner
            .records
            .values()
            .filter(|r| r.claimant == Some(claimant))
            .cloned()
            .collect();
        Ok(Self::sorted_newest_first(matching))
    }

    fn update_if_status(
        &self,
        id: DonationId,
        expected: DonationStatus,
        patch: DonationPatch,
    ) -> Result<CasOutcome, StoreError> {
        let mut inner = self.lock()?;
        let record = match inner.records.get_mut(&id.as_u64()) {
            Some(record) => record,
            None => return Ok(CasOutcome::NotFound),
        };
        if record.status != expected {
            return Ok(CasOutcome::StatusMismatch(record.status));
        }

        record.status = patch.status;
        if let Some(claimant) = patch.claimant {
            record.claimant = Some(claimant);
        }
        match patch.otp {
            OtpPatch::Keep => {}
            OtpPatch::Set { otp, expiry } => {
                record.otp = Some(otp);
                record.otp_expiry = Some(expiry);
            }
            OtpPatch::Clear => {
                record.otp = None;
                record.otp_expiry = None;
            }
        }
        if let Some(reason) = patch.rejection_reason {
            record.rejection_reason = Some(reason);
        }
        Ok(CasOutcome::Updated(record.clone()))
    }

    fn donation_count(&self) -> Result<u64, StoreError> {
        Ok(self.lock()?.records.len() as u64)
    }
}
