//! Handoff parameters — the tunable values of the code-exchange flow.

use serde::{Deserialize, Serialize};

/// Parameters governing handoff-code issuance.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct HandoffParams {
    /// Seconds a freshly issued code stays valid.
    pub otp_ttl_secs: u64,

    /// Minimum seconds between two issuances for the same request.
    pub reissue_cooldown_secs: u64,
}

impl HandoffParams {
    /// Canonical TTL: one hour.
    pub const DEFAULT_TTL_SECS: u64 = 3600;

    /// Canonical reissue cooldown: thirty seconds.
    pub const DEFAULT_COOLDOWN_SECS: u64 = 30;
}

impl Default for HandoffParams {
    fn default() -> Self {
        Self {
            otp_ttl_secs: Self::DEFAULT_TTL_SECS,
            reissue_cooldown_secs: Self::DEFAULT_COOLDOWN_SECS,
        }
    }
}
