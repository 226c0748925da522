use std::sync::Arc;

use chrono::Duration;

use crate::clock::Clock;
use crate::clock::SystemClock;
use crate::jwt::Claims;
use crate::jwt::JwtError;
use crate::jwt::SigningSecret;
use crate::jwt::TokenIssuer;
use crate::jwt::TokenVerifier;

/// Token authority combining issuance and verification under one secret.
///
/// Holds the fixed access-token lifetime. There is no refresh path: once a
/// token expires the subject has to log in again.
pub struct Authenticator {
    issuer: TokenIssuer,
    verifier: TokenVerifier,
    token_ttl: Duration,
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `jwt_secret` - Secret key for JWT signing
    /// * `token_ttl` - Lifetime of every issued token
    ///
    /// # Returns
    /// Configured Authenticator instance
    ///
    /// # Errors
    /// * `MissingSigningKey` / `WeakSigningKey` - Secret is empty or too short
    /// * `InvalidTtl` - Lifetime is under one second or overflows the expiration
    pub fn new(jwt_secret: &[u8], token_ttl: Duration) -> Result<Self, JwtError> {
        Self::with_clock(jwt_secret, token_ttl, Arc::new(SystemClock))
    }

    /// Same as [`Authenticator::new`] with an explicit clock.
    pub fn with_clock(
        jwt_secret: &[u8],
        token_ttl: Duration,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, JwtError> {
        let secret = SigningSecret::new(jwt_secret)?;

        // exp has whole-second resolution and must stay representable.
        let representable = clock.now().checked_add_signed(token_ttl).is_some();
        if token_ttl < Duration::seconds(1) || !representable {
            return Err(JwtError::InvalidTtl(token_ttl.num_seconds()));
        }

        Ok(Self {
            issuer: TokenIssuer::with_clock(&secret, Arc::clone(&clock)),
            verifier: TokenVerifier::with_clock(&secret, clock),
            token_ttl,
        })
    }

    /// Issue an access token for a subject with the configured lifetime.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token generation failed
    pub fn issue_token(&self, subject: &str) -> Result<String, JwtError> {
        self.issuer.issue(subject, self.token_ttl)
    }

    /// Validate and decode an access token.
    ///
    /// # Errors
    /// * `Malformed`, `SignatureInvalid`, `Expired` - Token is not acceptable
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        self.verifier.verify(token)
    }
}
