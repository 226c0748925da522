use auth::Authenticator;
use auth::JwtError;
use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::extract::Request;
use axum::extract::State;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;

use crate::domain::account::models::AuthContext;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

/// Why the gate turned a request away. Logged, never returned to the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    MissingHeader,
    InvalidHeader,
    WrongScheme,
    Token(JwtError),
}

impl Rejection {
    pub fn reason(&self) -> &'static str {
        match self {
            Rejection::MissingHeader => "missing_header",
            Rejection::InvalidHeader => "invalid_header",
            Rejection::WrongScheme => "wrong_scheme",
            Rejection::Token(e) => e.kind(),
        }
    }
}

/// Authorization gate for protected routes.
///
/// Evaluated fresh per request: Unauthenticated -> TokenExtracted (well-formed
/// `Bearer <token>` header) -> Authorized (token verified). Any failed step is a
/// terminal rejection answered with the same `401 Unauthorized` body, and the
/// request is not forwarded. On success the verified [`AuthContext`] is attached
/// to the request for downstream handlers.
pub async fn authorize(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    match authorize_request(req.headers(), &state.authenticator) {
        Ok(context) => {
            tracing::debug!(subject_id = %context.subject_id, "Request authorized");
            req.extensions_mut().insert(context);
            Ok(next.run(req).await)
        }
        Err(rejection) => {
            tracing::warn!(
                reason = rejection.reason(),
                method = %req.method(),
                uri = %req.uri(),
                "Request rejected by authorization gate"
            );
            Err(ApiError::unauthorized())
        }
    }
}

/// Run the gate's transitions against a set of request headers.
pub fn authorize_request(
    headers: &HeaderMap,
    authenticator: &Authenticator,
) -> Result<AuthContext, Rejection> {
    let token = extract_bearer_token(headers)?;

    let claims = authenticator
        .validate_token(token)
        .map_err(Rejection::Token)?;

    Ok(AuthContext {
        subject_id: claims.sub,
    })
}

fn extract_bearer_token(headers: &HeaderMap) -> Result<&str, Rejection> {
    let mut values = headers.get_all(AUTHORIZATION).iter();
    let auth_header = values.next().ok_or(Rejection::MissingHeader)?;
    if values.next().is_some() {
        return Err(Rejection::InvalidHeader);
    }

    let auth_str = auth_header
        .to_str()
        .map_err(|_| Rejection::InvalidHeader)?;

    let (scheme, token) = auth_str.split_once(' ').ok_or(Rejection::WrongScheme)?;
    if !scheme.eq_ignore_ascii_case("Bearer") {
        return Err(Rejection::WrongScheme);
    }
    if token.is_empty() || token.contains(char::is_whitespace) {
        return Err(Rejection::InvalidHeader);
    }

    Ok(token)
}

/// Handlers behind the gate take `AuthContext` as a parameter. Outside the gate
/// the extension is absent and extraction fails closed.
#[async_trait]
impl<S> FromRequestParts<S> for AuthContext
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthContext>()
            .cloned()
            .ok_or_else(ApiError::unauthorized)
    }
}
