use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::account::models::EmailAddress;
use crate::domain::account::models::LoginCommand;
use crate::domain::account::models::Password;
use crate::inbound::http::router::AppState;

/// Every failure, including an unreadable body, answers `401 Invalid credentials`.
pub async fn login(
    State(state): State<AppState>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<ApiSuccess<LoginResponseData>, ApiError> {
    let command = body
        .ok()
        .and_then(|Json(body)| body.into_command())
        .ok_or_else(ApiError::invalid_credentials)?;

    let token = state
        .account_service
        .login(command)
        .await
        .map_err(ApiError::from)?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        LoginResponseData {
            message: "Login successful".to_string(),
            token,
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequest {
    email: Option<String>,
    password: Option<String>,
}

impl LoginRequest {
    fn into_command(self) -> Option<LoginCommand> {
        let email = EmailAddress::new(self.email?).ok()?;
        let password = Password::new(self.password?).ok()?;
        Some(LoginCommand::new(email, password))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResponseData {
    pub message: String,
    pub token: String,
}
