//! Random handoff-code generation.

use crate::CodeIssuer;
use goodhaul_types::{HandoffParams, Timestamp};
use rand::Rng;

/// Characters a handoff code may contain.
///
/// Visually ambiguous characters (`I`, `O`, `0`, `1`) are excluded so codes
/// survive being read aloud or copied from a cracked phone screen.
pub const CODE_ALPHABET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";

/// Fixed length of every handoff code.
pub const CODE_LENGTH: usize = 6;

/// A freshly issued handoff code and its expiry instant.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HandoffCode {
    pub code: String,
    pub expires_at: Timestamp,
}

/// Issues uniformly random codes from [`CODE_ALPHABET`].
#[derive(Clone, Debug)]
pub struct RandomIssuer {
    params: HandoffParams,
}

impl RandomIssuer {
    pub fn new(params: HandoffParams) -> Self {
        Self { params }
    }
}

impl Default for RandomIssuer {
    fn default() -> Self {
        Self::new(HandoffParams::default())
    }
}

impl CodeIssuer for RandomIssuer {
    fn issue(&self, now: Timestamp) -> HandoffCode {
        let mut rng = rand::thread_rng();
        let code = (0..CODE_LENGTH)
            .map(|_| CODE_ALPHABET[rng.gen_range(0..CODE_ALPHABET.len())] as char)
            .collect();
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
