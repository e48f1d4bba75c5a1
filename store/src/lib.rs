//! Abstract storage traits for the goodhaul donation-handoff service.
//!
//! Every storage backend (in-memory, SQL, document store) implements these
//! traits. The rest of the codebase depends only on the traits; correctness
//! of concurrent lifecycle transitions is delegated entirely to the backend's
//! [`update_if_status`](DonationStore::update_if_status) compare-and-swap.

pub mod donation;
pub mod error;

pub use donation::{CasOutcome, DonationPatch, DonationStore, NewDonation, OtpPatch};
pub use error::StoreError;
