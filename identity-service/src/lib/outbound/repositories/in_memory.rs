use std::collections::hash_map::Entry;
use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::account::errors::AccountError;
use crate::domain::account::models::AccountId;
use crate::domain::account::models::Credential;
use crate::domain::account::models::EmailAddress;
use crate::domain::account::ports::CredentialStore;

/// Process-local credential store keyed by email.
///
/// Check and insert happen under one write lock.
#[derive(Default)]
pub struct InMemoryCredentialStore {
    credentials: RwLock<HashMap<EmailAddress, Credential>>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.credentials.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.credentials.read().await.is_empty()
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn create_atomic(&self, credential: Credential) -> Result<Credential, AccountError> {
        let mut credentials = self.credentials.write().await;

        match credentials.entry(credential.email.clone()) {
            Entry::Occupied(_) => Err(AccountError::EmailAlreadyExists(
                credential.email.as_str().to_string(),
            )),
            Entry::Vacant(slot) => {
                slot.insert(credential.clone());
                Ok(credential)
            }
        }
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<Credential>, AccountError> {
        Ok(self.credentials.read().await.get(email).cloned())
    }

    async fn find_by_id(&self, id: &AccountId) -> Result<Option<Credential>, AccountError> {
        Ok(self
            .credentials
            .read()
            .await
            .values()
            .find(|credential| credential.id == *id)
            .cloned())
    }
}
