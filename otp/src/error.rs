use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum OtpError {
    #[error("code reissued too soon, retry in {retry_in_secs}s")]
    TooSoon { retry_in_secs: u64 },
}
