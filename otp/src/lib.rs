//! Handoff-code issuance.
//!
//! A handoff code is a short secret exchanged out of band to confirm the
//! physical transfer of donated goods. Codes are 6 characters from a
//! confusable-reduced alphabet (no `I`, `O`, `0`, `1`) and expire after a
//! fixed TTL. Issuance sits behind the [`CodeIssuer`] trait so tests can
//! substitute a deterministic issuer.

pub mod error;
pub mod issuer;

pub use error::OtpError;
pub use issuer::{HandoffCode, RandomIssuer, CODE_ALPHABET, CODE_LENGTH};

use goodhaul_types::Timestamp;

/// Trait for issuing handoff codes.
pub trait CodeIssuer: Send + Sync {
    /// Issue a fresh code expiring `ttl` seconds after `now`.
    fn issue(&self, now: Timestamp) -> HandoffCode;

    /// Seconds a freshly issued code stays valid.
    fn ttl_secs(&self) -> u64;

    /// Minimum seconds between issuances for the same request.
    fn cooldown_secs(&self) -> u64;

    /// Re-issue a code for a request whose previous code was issued at
    /// `issued_at`.
    ///
    /// Inside the cooldown window this fails with [`OtpError::TooSoon`]
    /// carrying the seconds remaining; otherwise it behaves like
    /// [`issue`](Self::issue).
    fn reissue(&self, issued_at: Timestamp, now: Timestamp) -> Result<HandoffCode, OtpError> {
        let next_allowed = issued_at.plus_secs(self.cooldown_secs());
        if now < next_allowed {
            return Err(OtpError::TooSoon {
                retry_in_secs: next_allowed.as_secs().saturating_sub(now.as_secs()),
            });
        }
        Ok(self.issue(now))
    }
}
