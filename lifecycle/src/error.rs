//! Error taxonomy of the lifecycle engine.
//!
//! Every expected condition is a typed variant returned to the caller; only
//! storage faults and invariant breaches are internal errors, and even those
//! surface as values rather than panics.

use goodhaul_otp::OtpError;
use goodhaul_store::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error("invalid request: {0}")]
    Validation(String),

    #[error("donation not found")]
    NotFound,

    #[error("donation already claimed")]
    AlreadyClaimed,

    #[error("handoff not permitted for this caller")]
    NotAllowed,

    #[error("handoff code has expired")]
    Expired,

    #[error("handoff code does not match")]
    InvalidCode,

    #[error("donation already reached a terminal state")]
    AlreadyTerminal,

    #[error("code reissued too soon, retry in {retry_in_secs}s")]
    TooSoon { retry_in_secs: u64 },

    #[error("storage error: {0}")]
    Storage(String),

    #[error("corrupt record: {0}")]
    Corrupt(String),
}

impl From<StoreError> for LifecycleError {
    fn from(e: StoreError) -> Self {
        Self::Storage(e.to_string())
    }
}

impl From<OtpError> for LifecycleError {
    fn from(e: OtpError) -> Self {
        match e {
            OtpError::TooSoon { retry_in_secs } => Self::TooSoon { retry_in_secs },
        }
    }
}
