use axum::extract::State;
use axum::http::StatusCode;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::account::models::AccountId;
use crate::domain::account::models::AuthContext;
use crate::domain::account::models::Credential;
use crate::inbound::http::router::AppState;

/// Account of the verified token subject.
pub async fn me(
    State(state): State<AppState>,
    context: AuthContext,
) -> Result<ApiSuccess<AccountData>, ApiError> {
    let account_id = AccountId::from_string(&context.subject_id).map_err(|e| {
        tracing::warn!(error = %e, "Token subject is not an account id");
        ApiError::unauthorized()
    })?;

    state
        .account_service
        .get_account(&account_id)
        .await
        .map_err(ApiError::from)
        .map(|credential| ApiSuccess::new(StatusCode::OK, (&credential).into()))
}

/// Public view of an account. Never carries the password hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountData {
    pub id: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl From<&Credential> for AccountData {
    fn from(credential: &Credential) -> Self {
        Self {
            id: credential.id.to_string(),
            email: credential.email.as_str().to_string(),
            created_at: credential.created_at,
        }
    }
}
