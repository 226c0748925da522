use std::sync::Arc;

use chrono::Duration;
use jsonwebtoken::encode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;

use super::claims::Claims;
use super::errors::JwtError;
use super::secret::SigningSecret;
use crate::clock::Clock;
use crate::clock::SystemClock;

/// Mints signed, time-bounded access tokens.
///
/// Output is the compact JWS form `header.claims.signature`, each segment
/// base64url encoded, signed with HS256.
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    header: Header,
    clock: Arc<dyn Clock>,
}

impl TokenIssuer {
    /// Create an issuer that reads the wall clock.
    pub fn new(secret: &SigningSecret) -> Self {
        Self::with_clock(secret, Arc::new(SystemClock))
    }

    pub fn with_clock(secret: &SigningSecret, clock: Arc<dyn Clock>) -> Self {
        Self {
            encoding_key: secret.encoding_key().clone(),
            header: Header::new(Algorithm::HS256),
            clock,
        }
    }

    /// Issue a token asserting `subject` that expires `ttl` from now.
    ///
    /// # Arguments
    /// * `subject` - Subject identifier placed in `sub`
    /// * `ttl` - Token lifetime, at least one second
    ///
    /// # Returns
    /// Encoded token string
    ///
    /// # Errors
    /// * `InvalidTtl` - ttl is under one second or overflows the expiration
    /// * `EncodingFailed` - Token encoding failed
    pub fn issue(&self, subject: &str, ttl: Duration) -> Result<String, JwtError> {
        // exp has whole-second resolution; anything shorter is expired on arrival.
        if ttl < Duration::seconds(1) {
            return Err(JwtError::InvalidTtl(ttl.num_seconds()));
        }

        let claims = Claims::for_subject(subject, self.clock.now(), ttl)?;

        encode(&self.header, &claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }
}
