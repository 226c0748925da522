use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::errors::JwtError;

/// Claims carried by an access token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (opaque account identifier)
    pub sub: String,

    /// Expiration time (Unix timestamp, seconds)
    pub exp: i64,

    /// Issued at (Unix timestamp, seconds)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
}

impl Claims {
    /// Create claims for a subject that expire `ttl` after `issued_at`.
    ///
    /// # Arguments
    /// * `subject` - Subject identifier
    /// * `issued_at` - Issuance instant
    /// * `ttl` - Token lifetime
    ///
    /// # Returns
    /// Claims with sub, exp and iat set
    ///
    /// # Errors
    /// * `InvalidTtl` - Expiration falls outside the representable time range
    pub fn for_subject(
        subject: impl ToString,
        issued_at: DateTime<Utc>,
        ttl: Duration,
    ) -> Result<Self, JwtError> {
        let expiration = issued_at
            .checked_add_signed(ttl)
            .ok_or(JwtError::InvalidTtl(ttl.num_seconds()))?;

        Ok(Self {
            sub: subject.to_string(),
            exp: expiration.timestamp(),
            iat: Some(issued_at.timestamp()),
        })
    }

    /// Check if token is expired. A token is dead from the `exp` second onward.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        current_timestamp >= self.exp
    }
}
