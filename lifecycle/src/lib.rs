//! Donation lifecycle engine.
//!
//! Coordinates the handoff of donated goods between a requester and a pickup
//! agent. A request moves through a strictly forward state machine:
//!
//! ```text
//! pending ──claim──► picked ──verify──► completed   [terminal]
//! pending ──reject─────────────────────► rejected   [terminal]
//! picked  ──reject─────────────────────► rejected   [terminal]
//! ```
//!
//! The engine holds no locks of its own. Every transition rides on the
//! store's per-record compare-and-swap
//! ([`DonationStore::update_if_status`](goodhaul_store::DonationStore::update_if_status)),
//! so N concurrent claims on one request resolve to exactly one winner
//! without the engine ever reading-then-writing.
//!
//! Each component owns one transition:
//! [`DonationRegistry`] creates, lists, rejects, and reissues codes;
//! [`ClaimCoordinator`] moves pending→picked; [`HandoffVerifier`] moves
//! picked→completed; [`StatusQuery`] is a pure read.

pub mod claim;
pub mod error;
pub mod registry;
pub mod status;
pub mod verify;

pub use claim::{ClaimCoordinator, ClaimedDonation};
pub use error::LifecycleError;
pub use registry::{CreateDonation, CreatedDonation, DonationRegistry};
pub use status::StatusQuery;
pub use verify::HandoffVerifier;
