use async_trait::async_trait;

use crate::domain::account::errors::AccountError;
use crate::domain::account::models::AccountId;
use crate::domain::account::models::Credential;
use crate::domain::account::models::EmailAddress;
use crate::domain::account::models::LoginCommand;
use crate::domain::account::models::RegisterCommand;

/// Port for account domain service operations.
#[async_trait]
pub trait AccountServicePort: Send + Sync + 'static {
    /// Register a new account.
    ///
    /// # Arguments
    /// * `command` - Validated email and plaintext password
    ///
    /// # Returns
    /// Stored credential
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `Hashing` / `HashingTimeout` - Password could not be hashed
    /// * `DatabaseError` - Store operation failed
    async fn register(&self, command: RegisterCommand) -> Result<Credential, AccountError>;

    /// Exchange credentials for an access token.
    ///
    /// Unknown email and wrong password both yield `InvalidCredentials`.
    ///
    /// # Returns
    /// Signed access token
    ///
    /// # Errors
    /// * `InvalidCredentials` - Email unknown or password mismatch
    /// * `Hashing` / `HashingTimeout` / `Token` / `DatabaseError` - Infrastructure failure
    async fn login(&self, command: LoginCommand) -> Result<String, AccountError>;

    /// Retrieve an account by identifier.
    ///
    /// # Errors
    /// * `NotFound` - Account does not exist
    /// * `DatabaseError` - Store operation failed
    async fn get_account(&self, id: &AccountId) -> Result<Credential, AccountError>;
}

/// Durable credential storage.
///
/// Implementations must make `create_atomic` a single compare-and-insert:
/// two concurrent calls for the same email leave exactly one record.
#[async_trait]
pub trait CredentialStore: Send + Sync + 'static {
    /// Insert a credential unless its email is already taken.
    ///
    /// # Arguments
    /// * `credential` - Credential to persist
    ///
    /// # Returns
    /// Stored credential
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - A credential with this email exists
    /// * `DatabaseError` - Store operation failed
    async fn create_atomic(&self, credential: Credential) -> Result<Credential, AccountError>;

    /// Retrieve credential by email address.
    ///
    /// # Returns
    /// Optional credential (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Store operation failed
    async fn find_by_email(&self, email: &EmailAddress)
        -> Result<Option<Credential>, AccountError>;

    /// Retrieve credential by identifier.
    ///
    /// # Returns
    /// Optional credential (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Store operation failed
    async fn find_by_id(&self, id: &AccountId) -> Result<Option<Credential>, AccountError>;
}
