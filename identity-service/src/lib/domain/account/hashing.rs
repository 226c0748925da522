use std::sync::Arc;
use std::time::Duration;

use auth::PasswordError;
use auth::PasswordHasher;
use tokio::sync::Semaphore;

use crate::domain::account::errors::AccountError;
use crate::domain::account::models::Password;

const DECOY_PASSWORD: &str = "decoy-password-never-assigned";

/// Runs Argon2 work on the blocking thread pool.
///
/// At most `workers` operations run at once so hashing never starves the
/// async runtime. Every operation is bounded by `timeout`; a timed-out hash
/// has no effect because nothing is persisted until the caller gets the result.
pub struct HashingPool {
    hasher: Arc<PasswordHasher>,
    permits: Arc<Semaphore>,
    timeout: Duration,
    decoy_hash: String,
}

impl HashingPool {
    /// Create a pool around a configured hasher.
    ///
    /// Computes a decoy hash up front so logins for unknown emails cost the
    /// same as logins with a wrong password.
    ///
    /// # Arguments
    /// * `hasher` - Hasher carrying the configured work factor
    /// * `workers` - Maximum concurrent operations, clamped to at least one
    /// * `timeout` - Deadline for a single operation, queueing included
    ///
    /// # Errors
    /// * `HashingFailed` - Decoy hash could not be computed
    pub fn new(
        hasher: PasswordHasher,
        workers: usize,
        timeout: Duration,
    ) -> Result<Self, PasswordError> {
        let decoy_hash = hasher.hash(DECOY_PASSWORD)?;

        Ok(Self {
            hasher: Arc::new(hasher),
            permits: Arc::new(Semaphore::new(workers.max(1))),
            timeout,
            decoy_hash,
        })
    }

    /// Number of workers matching the available cores.
    pub fn default_workers() -> usize {
        std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1)
    }

    /// Hash a password.
    ///
    /// # Errors
    /// * `Hashing` - Argon2 failed
    /// * `HashingTimeout` - Deadline exceeded
    pub async fn hash(&self, password: &Password) -> Result<String, AccountError> {
        let password = password.expose().to_owned();
        self.run(move |hasher| hasher.hash(&password)).await
    }

    /// Verify a password against a stored hash.
    ///
    /// With no stored hash the password is checked against the decoy and the
    /// result is always `false`.
    ///
    /// # Errors
    /// * `Hashing` - Stored hash is corrupt
    /// * `HashingTimeout` - Deadline exceeded
    pub async fn verify(
        &self,
        password: &Password,
        stored_hash: Option<&str>,
    ) -> Result<bool, AccountError> {
        let password = password.expose().to_owned();

        match stored_hash {
            Some(hash) => {
                let hash = hash.to_owned();
                self.run(move |hasher| hasher.verify(&password, &hash))
                    .await
            }
            None => {
                let hash = self.decoy_hash.clone();
                self.run(move |hasher| hasher.verify(&password, &hash))
                    .await
                    .map(|_| false)
            }
        }
    }

    async fn run<T, F>(&self, job: F) -> Result<T, AccountError>
    where
        T: Send + 'static,
        F: FnOnce(&PasswordHasher) -> Result<T, PasswordError> + Send + 'static,
    {
        let hasher = Arc::clone(&self.hasher);
        let permits = Arc::clone(&self.permits);

        let work = async move {
            let permit = permits
                .acquire_owned()
                .await
                .map_err(|e| AccountError::Unknown(format!("Hashing pool closed: {}", e)))?;

            // The permit moves into the blocking task so a caller that gives up
            // early does not free a slot that is still busy.
            tokio::task::spawn_blocking(move || {
                let _permit = permit;
                job(hasher.as_ref())
            })
            .await
            .map_err(|e| AccountError::Unknown(format!("Hashing task failed: {}", e)))?
            .map_err(AccountError::from)
        };

        match tokio::time::timeout(self.timeout, work).await {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!(
                    timeout_ms = self.timeout.as_millis() as u64,
                    "Password hashing timed out"
                );
                Err(AccountError::HashingTimeout)
            }
        }
    }
}
