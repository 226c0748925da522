use std::sync::Arc;

use jsonwebtoken::decode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::errors::JwtError;
use super::secret::SigningSecret;
use crate::clock::Clock;
use crate::clock::SystemClock;

/// Checks token structure, signature and expiry.
///
/// Signature comparison is constant time (HMAC verification in `ring`).
/// Expiry is evaluated against the injected clock with zero leeway.
pub struct TokenVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
    clock: Arc<dyn Clock>,
}

impl TokenVerifier {
    /// Create a verifier that reads the wall clock.
    pub fn new(secret: &SigningSecret) -> Self {
        Self::with_clock(secret, Arc::new(SystemClock))
    }

    pub fn with_clock(secret: &SigningSecret, clock: Arc<dyn Clock>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is checked against our own clock below.
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            decoding_key: secret.decoding_key().clone(),
            validation,
            clock,
        }
    }

    /// Verify a token and return its claims.
    ///
    /// # Arguments
    /// * `token` - Encoded token string
    ///
    /// # Returns
    /// Decoded claims; `sub` is the verified subject
    ///
    /// # Errors
    /// * `Malformed` - Wrong structure, bad encoding, unexpected algorithm or missing claims
    /// * `SignatureInvalid` - Signature does not match header and claims
    /// * `Expired` - Current time is at or past `exp`
    pub fn verify(&self, token: &str) -> Result<Claims, JwtError> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature => JwtError::SignatureInvalid,
                ErrorKind::ExpiredSignature => JwtError::Expired,
                _ => JwtError::Malformed(e.to_string()),
            })?;

        if token_data.claims.is_expired(self.clock.now().timestamp()) {
            return Err(JwtError::Expired);
        }

        Ok(token_data.claims)
    }
}
