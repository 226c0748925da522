use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;

use super::errors::JwtError;

/// HMAC signing secret shared by the token issuer and verifier.
///
/// Validated once at construction so a misconfigured process fails at start-up
/// instead of on its first request.
#[derive(Clone)]
pub struct SigningSecret {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl SigningSecret {
    /// Minimum secret length for HS256 (256 bits).
    pub const MIN_LENGTH: usize = 32;

    /// Build a signing secret from raw bytes.
    ///
    /// # Errors
    /// * `MissingSigningKey` - Secret is empty
    /// * `WeakSigningKey` - Secret is shorter than 32 bytes
    pub fn new(secret: &[u8]) -> Result<Self, JwtError> {
        if secret.is_empty() {
            return Err(JwtError::MissingSigningKey);
        }
        if secret.len() < Self::MIN_LENGTH {
            return Err(JwtError::WeakSigningKey {
                min: Self::MIN_LENGTH,
                actual: secret.len(),
            });
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
        })
    }

    pub(crate) fn encoding_key(&self) -> &EncodingKey {
        &self.encoding_key
    }

    pub(crate) fn decoding_key(&self) -> &DecodingKey {
        &self.decoding_key
    }
}
