//! Authentication utilities library
//!
//! Provides reusable authentication infrastructure:
//! - Password hashing (Argon2id, configurable work factor)
//! - Signed access token issuance and verification (HS256 JWT)
//! - A pluggable clock so expiry can be driven deterministically
//!
//! Services define their own storage and transport and adapt these building blocks.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! let is_valid = hasher.verify("my_password", &hash).unwrap();
//! assert!(is_valid);
//! ```
//!
//! ## Tokens
//! ```
//! use auth::{SigningSecret, TokenIssuer, TokenVerifier};
//! use chrono::Duration;
//!
//! let secret = SigningSecret::new(b"secret_key_at_least_32_bytes_long!").unwrap();
//! let issuer = TokenIssuer::new(&secret);
//! let verifier = TokenVerifier::new(&secret);
//!
//! let token = issuer.issue("user123", Duration::minutes(15)).unwrap();
//! let claims = verifier.verify(&token).unwrap();
//! assert_eq!(claims.sub, "user123");
//! ```
//!
//! ## Authenticator
//! ```
//! use auth::Authenticator;
//! use chrono::Duration;
//!
//! let auth = Authenticator::new(b"secret_key_at_least_32_bytes_long!", Duration::hours(1)).unwrap();
//! let token = auth.issue_token("user123").unwrap();
//! let claims = auth.validate_token(&token).unwrap();
//! assert_eq!(claims.sub, "user123");
//! ```

pub mod authenticator;
pub mod clock;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::Authenticator;
pub use clock::Clock;
pub use clock::ManualClock;
pub use clock::SystemClock;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::SigningSecret;
pub use jwt::TokenIssuer;
pub use jwt::TokenVerifier;
pub use password::HashingParams;
pub use password::PasswordError;
pub use password::PasswordHasher;
