//! Nullable code issuer — deterministic handoff codes.

use goodhaul_otp::{CodeIssuer, HandoffCode};
use goodhaul_types::{HandoffParams, Timestamp};
use std::sync::Mutex;

/// A deterministic code issuer for testing.
///
/// Returns pre-configured codes in order, cycling when exhausted.
pub struct NullIssuer {
    codes: Vec<String>,
    index: Mutex<usize>,
    params: HandoffParams,
}

impl NullIssuer {
    /// Create with a sequence of codes and the canonical TTL/cooldown.
    pub fn new(codes: Vec<&str>) -> Self {
        Self::with_params(codes, HandoffParams::default())
    }

    /// Create with a single code that every call will return.
    pub fn constant(code: &str) -> Self {
        Self::new(vec![code])
    }

    pub fn with_params(codes: Vec<&str>, params: HandoffParams) -> Self {
        assert!(!codes.is_empty(), "at least one code required");
        Self {
            codes: codes.into_iter().map(str::to_string).collect(),
            index: Mutex::new(0),
            params,
        }
    }
}

impl CodeIssuer for NullIssuer {
    fn issue(&self, now: Timestamp) -> HandoffCode {
        let mut idx = self.index.lock().unwrap();
        let code = self.codes[*idx % self.codes.len()].clone();
        *idx += 1;
        HandoffCode {
            code,
            expires_at: now.plus_secs(self.params.otp_ttl_secs),
        }
    }

    fn ttl_secs(&self) -> u64 {
        self.params.otp_ttl_secs
    }

    fn cooldown_secs(&self) -> u64 {
        self.params.reissue_cooldown_secs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_cycle_in_order() {
        let issuer = NullIssuer::new(vec!["AAAAAA", "BBBBBB"]);
        let now = Timestamp::new(1000);
        assert_eq!(issuer.issue(now).code, "AAAAAA");
        assert_eq!(issuer.issue(now).code, "BBBBBB");
        assert_eq!(issuer.issue(now).code, "AAAAAA");
    }

    #[test]
    fn test_constant_issuer_repeats() {
        let issuer = NullIssuer::constant("AB12CD");
        let issued = issuer.issue(Timestamp::new(500));
        assert_eq!(issued.code, "AB12CD");
        assert_eq!(issued.expires_at, Timestamp::new(500 + 3600));
    }
}
