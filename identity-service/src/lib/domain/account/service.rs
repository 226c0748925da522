use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;
use chrono::Utc;

use crate::domain::account::errors::AccountError;
use crate::domain::account::hashing::HashingPool;
use crate::domain::account::models::AccountId;
use crate::domain::account::models::Credential;
use crate::domain::account::models::LoginCommand;
use crate::domain::account::models::RegisterCommand;
use crate::domain::account::ports::AccountServicePort;
use crate::domain::account::ports::CredentialStore;

/// Domain service implementation for registration and login.
///
/// Concrete implementation of AccountServicePort with dependency injection.
pub struct AccountService<CS>
where
    CS: CredentialStore,
{
    store: Arc<CS>,
    hashing: Arc<HashingPool>,
    authenticator: Arc<Authenticator>,
}

impl<CS> AccountService<CS>
where
    CS: CredentialStore,
{
    /// Create a new account service with injected dependencies.
    ///
    /// # Arguments
    /// * `store` - Credential persistence implementation
    /// * `hashing` - Bounded password hashing pool
    /// * `authenticator` - Token issuer holding the signing secret and ttl
    pub fn new(
        store: Arc<CS>,
        hashing: Arc<HashingPool>,
        authenticator: Arc<Authenticator>,
    ) -> Self {
        Self {
            store,
            hashing,
            authenticator,
        }
    }
}

#[async_trait]
impl<CS> AccountServicePort for AccountService<CS>
where
    CS: CredentialStore,
{
    async fn register(&self, command: RegisterCommand) -> Result<Credential, AccountError> {
        let password_hash = self.hashing.hash(&command.password).await?;

        let credential = Credential {
            id: AccountId::new(),
            email: command.email,
            password_hash,
            created_at: Utc::now(),
        };

        let created = self.store.create_atomic(credential).await?;
        tracing::info!(account_id = %created.id, "Account registered");

        Ok(created)
    }

    async fn login(&self, command: LoginCommand) -> Result<String, AccountError> {
        let credential = self.store.find_by_email(&command.email).await?;

        // Always run a verification, even for unknown emails, so both failure
        // paths take comparable time.
        let verified = self
            .hashing
            .verify(
                &command.password,
                credential.as_ref().map(|c| c.password_hash.as_str()),
            )
            .await?;

        let credential = match credential {
            Some(credential) if verified => credential,
            Some(credential) => {
                tracing::info!(account_id = %credential.id, reason = "password_mismatch", "Login rejected");
                return Err(AccountError::InvalidCredentials);
            }
            None => {
                tracing::info!(reason = "unknown_email", "Login rejected");
                return Err(AccountError::InvalidCredentials);
            }
        };

        let token = self
            .authenticator
            .issue_token(&credential.id.to_string())?;
        tracing::info!(account_id = %credential.id, "Login succeeded");

        Ok(token)
    }

    async fn get_account(&self, id: &AccountId) -> Result<Credential, AccountError> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or(AccountError::NotFound(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration as StdDuration;

    use auth::HashingParams;
    use auth::PasswordHasher;
    use chrono::Duration;
    use mockall::mock;

    use super::*;
    use crate::domain::account::models::EmailAddress;
    use crate::domain::account::models::Password;
    use crate::outbound::repositories::InMemoryCredentialStore;

    const SECRET: &[u8] = b"test_secret_key_at_least_32_bytes!";

    mock! {
        pub TestCredentialStore {}

        #[async_trait]
        impl CredentialStore for TestCredentialStore {
            async fn create_atomic(&self, credential: Credential) -> Result<Credential, AccountError>;
            async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<Credential>, AccountError>;
            async fn find_by_id(&self, id: &AccountId) -> Result<Option<Credential>, AccountError>;
        }
    }

    fn hashing() -> Arc<HashingPool> {
        let hasher = PasswordHasher::with_params(HashingParams {
            memory_kib: 8,
            iterations: 1,
            parallelism: 1,
        })
        .unwrap();
        Arc::new(HashingPool::new(hasher, 2, StdDuration::from_secs(10)).unwrap())
    }

    fn authenticator() -> Arc<Authenticator> {
        Arc::new(Authenticator::new(SECRET, Duration::hours(1)).unwrap())
    }

    fn service<CS: CredentialStore>(store: CS) -> AccountService<CS> {
        AccountService::new(Arc::new(store), hashing(), authenticator())
    }

    fn email(raw: &str) -> EmailAddress {
        EmailAddress::new(raw.to_string()).unwrap()
    }

    fn password(raw: &str) -> Password {
        Password::new(raw.to_string()).unwrap()
    }

    async fn stored_credential(raw_password: &str) -> Credential {
        Credential {
            id: AccountId::new(),
            email: email("a@b.com"),
            password_hash: hashing().hash(&password(raw_password)).await.unwrap(),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_register_success() {
        let mut store = MockTestCredentialStore::new();

        store
            .expect_create_atomic()
            .withf(|credential| {
                credential.email.as_str() == "a@b.com"
                    && credential.password_hash.starts_with("$argon2id")
                    && !credential.password_hash.contains("pw123456")
            })
            .times(1)
            .returning(|credential| Ok(credential));

        let service = service(store);

        let command = RegisterCommand::new(email("a@b.com"), password("pw123456"));
        let credential = service.register(command).await.unwrap();

        assert_eq!(credential.email.as_str(), "a@b.com");
    }

    #[tokio::test]
    async fn test_register_duplicate_email() {
        let mut store = MockTestCredentialStore::new();

        store.expect_create_atomic().times(1).returning(|credential| {
            Err(AccountError::EmailAlreadyExists(
                credential.email.as_str().to_string(),
            ))
        });

        let service = service(store);

        let command = RegisterCommand::new(email("a@b.com"), password("pw123456"));
        let result = service.register(command).await;

        assert!(matches!(result, Err(AccountError::EmailAlreadyExists(_))));
    }

    #[tokio::test]
    async fn test_login_success_issues_token_for_account() {
        let credential = stored_credential("pw123456").await;
        let account_id = credential.id;

        let mut store = MockTestCredentialStore::new();
        store
            .expect_find_by_email()
            .withf(|email| email.as_str() == "a@b.com")
            .times(1)
            .returning(move |_| Ok(Some(credential.clone())));

        let authenticator = authenticator();
        let service = AccountService::new(Arc::new(store), hashing(), Arc::clone(&authenticator));

        let token = service
            .login(LoginCommand::new(email("a@b.com"), password("pw123456")))
            .await
            .unwrap();

        let claims = authenticator.validate_token(&token).unwrap();
        assert_eq!(claims.sub, account_id.to_string());
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let credential = stored_credential("pw123456").await;

        let mut store = MockTestCredentialStore::new();
        store
            .expect_find_by_email()
            .times(1)
            .returning(move |_| Ok(Some(credential.clone())));

        let service = service(store);

        let result = service
            .login(LoginCommand::new(email("a@b.com"), password("wrong-password")))
            .await;

        assert!(matches!(result, Err(AccountError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_login_unknown_email() {
        let mut store = MockTestCredentialStore::new();
        store
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(None));

        let service = service(store);

        let result = service
            .login(LoginCommand::new(email("nobody@b.com"), password("pw123456")))
            .await;

        assert!(matches!(result, Err(AccountError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_login_failures_are_indistinguishable() {
        let credential = stored_credential("pw123456").await;

        let mut store = MockTestCredentialStore::new();
        store
            .expect_find_by_email()
            .returning(move |email| {
                if email.as_str() == "a@b.com" {
                    Ok(Some(credential.clone()))
                } else {
                    Ok(None)
                }
            });

        let service = service(store);

        let wrong_password = service
            .login(LoginCommand::new(email("a@b.com"), password("nope")))
            .await
            .unwrap_err();
        let unknown_email = service
            .login(LoginCommand::new(email("x@b.com"), password("pw123456")))
            .await
            .unwrap_err();

        assert_eq!(wrong_password.to_string(), unknown_email.to_string());
    }

    #[tokio::test]
    async fn test_login_store_failure() {
        let mut store = MockTestCredentialStore::new();
        store
            .expect_find_by_email()
            .times(1)
            .returning(|_| Err(AccountError::DatabaseError("connection reset".to_string())));

        let service = service(store);

        let result = service
            .login(LoginCommand::new(email("a@b.com"), password("pw123456")))
            .await;

        assert!(matches!(result, Err(AccountError::DatabaseError(_))));
    }

    #[tokio::test]
    async fn test_get_account_success() {
        let credential = stored_credential("pw123456").await;
        let account_id = credential.id;

        let mut store = MockTestCredentialStore::new();
        store
            .expect_find_by_id()
            .withf(move |id| *id == account_id)
            .times(1)
            .returning(move |_| Ok(Some(credential.clone())));

        let service = service(store);

        let account = service.get_account(&account_id).await.unwrap();
        assert_eq!(account.id, account_id);
    }

    #[tokio::test]
    async fn test_get_account_not_found() {
        let mut store = MockTestCredentialStore::new();
        store.expect_find_by_id().times(1).returning(|_| Ok(None));

        let service = service(store);

        let result = service.get_account(&AccountId::new()).await;
        assert!(matches!(result, Err(AccountError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_concurrent_registration_same_email() {
        let store = Arc::new(InMemoryCredentialStore::new());
        let service = Arc::new(AccountService::new(
            Arc::clone(&store),
            hashing(),
            authenticator(),
        ));

        let first = {
            let service = Arc::clone(&service);
            tokio::spawn(async move {
                service
                    .register(RegisterCommand::new(email("a@b.com"), password("pw-one")))
                    .await
            })
        };
        let second = {
            let service = Arc::clone(&service);
            tokio::spawn(async move {
                service
                    .register(RegisterCommand::new(email("A@B.com"), password("pw-two")))
                    .await
            })
        };

        let results = [first.await.unwrap(), second.await.unwrap()];

        assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
        assert_eq!(
            results
                .iter()
                .filter(|r| matches!(r, Err(AccountError::EmailAlreadyExists(_))))
                .count(),
            1
        );
        assert_eq!(store.len().await, 1);
    }
}
