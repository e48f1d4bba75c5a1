//! REST API for the goodhaul donation-handoff service.
//!
//! Exposes the lifecycle operations over HTTP:
//! - donation creation and pending listings
//! - claim, verify, reject, reissue
//! - status checks and per-identity histories
//!
//! Handoff codes are returned only to the parties that own them (the
//! requester at creation, the claimant at claim); listings and record
//! lookups serve summaries without the code fields.

pub mod error;
pub mod handlers;
pub mod server;

pub use error::{ApiError, RpcError};
pub use server::{router, RpcServer, ServiceState};
