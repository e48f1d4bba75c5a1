//! Read-only status projection.

use crate::error::LifecycleError;
use goodhaul_store::DonationStore;
use goodhaul_types::{DonationId, DonationStatus};
use std::sync::Arc;

/// Answers status lookups at any point in a donation's life. Pure read, no
/// side effects, same unified id space as the registry.
pub struct StatusQuery {
    store: Arc<dyn DonationStore>,
}

impl StatusQuery {
    pub fn new(store: Arc<dyn DonationStore>) -> Self {
        Self { store }
    }

    pub fn check_status(&self, id: DonationId) -> Result<DonationStatus, LifecycleError> {
        self.store
            .get(id)?
            .map(|record| record.status)
            .ok_or(LifecycleError::NotFound)
    }
}
