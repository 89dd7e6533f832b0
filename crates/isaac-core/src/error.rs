//! Error types for decoding

use thiserror::Error;

/// Result type for decode operations
pub type DecodeResult<T> = Result<T, DecodeError>;

/// Errors raised while turning encoded ledger values into reals
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("Malformed field element {input:?}: {reason}")]
    MalformedFieldElement { input: String, reason: &'static str },

    #[error("Malformed angle encoding: {0}")]
    MalformedAngleEncoding(&'static str),

    #[error("Malformed decimal {input:?}: {reason}")]
    MalformedReal { input: String, reason: &'static str },
}

impl DecodeError {
    pub fn felt(input: impl Into<String>, reason: &'static str) -> Self {
        Self::MalformedFieldElement { input: input.into(), reason }
    }

    pub fn real(input: impl Into<String>, reason: &'static str) -> Self {
        Self::MalformedReal { input: input.into(), reason }
    }
}
