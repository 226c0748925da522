use thiserror::Error;

/// Error type for JWT operations.
///
/// `Malformed`, `SignatureInvalid` and `Expired` are verification outcomes and
/// are meant for diagnostics only. Callers facing untrusted clients should
/// collapse them into a single unauthorized response.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum JwtError {
    #[error("Signing secret is not configured")]
    MissingSigningKey,

    #[error("Signing secret too short: minimum {min} bytes, got {actual}")]
    WeakSigningKey { min: usize, actual: usize },

    #[error("Token lifetime must be at least one second and within range, got {0} seconds")]
    InvalidTtl(i64),

    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Token is malformed: {0}")]
    Malformed(String),

    #[error("Token signature is invalid")]
    SignatureInvalid,

    #[error("Token is expired")]
    Expired,
}

impl JwtError {
    /// Short, stable label for log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            JwtError::MissingSigningKey => "missing_signing_key",
            JwtError::WeakSigningKey { .. } => "weak_signing_key",
            JwtError::InvalidTtl(_) => "invalid_ttl",
            JwtError::EncodingFailed(_) => "encoding_failed",
            JwtError::Malformed(_) => "malformed",
            JwtError::SignatureInvalid => "signature_invalid",
            JwtError::Expired => "expired",
        }
    }
}
