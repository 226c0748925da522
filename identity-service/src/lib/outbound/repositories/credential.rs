use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::account::errors::AccountError;
use crate::domain::account::models::AccountId;
use crate::domain::account::models::Credential;
use crate::domain::account::models::EmailAddress;
use crate::domain::account::ports::CredentialStore;

pub struct PostgresCredentialStore {
    pool: PgPool,
}

impl PostgresCredentialStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct CredentialRow {
    id: Uuid,
    email: String,
    password_hash: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<CredentialRow> for Credential {
    type Error = AccountError;

    fn try_from(row: CredentialRow) -> Result<Self, Self::Error> {
        Ok(Credential {
            id: AccountId(row.id),
            // A stored email that no longer parses is a data fault, not caller input.
            email: EmailAddress::new(row.email).map_err(|e| {
                AccountError::DatabaseError(format!("Corrupt email for {}: {}", row.id, e))
            })?,
            password_hash: row.password_hash,
            created_at: row.created_at,
        })
    }
}

#[async_trait]
impl CredentialStore for PostgresCredentialStore {
    async fn create_atomic(&self, credential: Credential) -> Result<Credential, AccountError> {
        // Single statement: the unique constraint decides the race, not a prior SELECT.
        let inserted: Option<(Uuid,)> = sqlx::query_as(
            r#"
            INSERT INTO credentials (id, email, password_hash, created_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (email) DO NOTHING
            RETURNING id
            "#,
        )
        .bind(credential.id.0)
        .bind(credential.email.as_str())
        .bind(&credential.password_hash)
        .bind(credential.created_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AccountError::DatabaseError(e.to_string()))?;

        match inserted {
            Some(_) => Ok(credential),
            None => Err(AccountError::EmailAlreadyExists(
                credential.email.as_str().to_string(),
            )),
        }
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<Credential>, AccountError> {
        let row: Option<CredentialRow> = sqlx::query_as(
            r#"
            SELECT id, email, password_hash, created_at
            FROM credentials
            WHERE email = $1
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AccountError::DatabaseError(e.to_string()))?;

        row.map(Credential::try_from).transpose()
    }

    async fn find_by_id(&self, id: &AccountId) -> Result<Option<Credential>, AccountError> {
        let row: Option<CredentialRow> = sqlx::query_as(
            r#"
            SELECT id, email, password_hash, created_at
            FROM credentials
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AccountError::DatabaseError(e.to_string()))?;

        row.map(Credential::try_from).transpose()
    }
}
