//! Auth API endpoints
//!
//! REST surface owned by the core:
//! - POST /register - Create an account, returns an access token
//! - POST /login - Verify credentials, returns access + refresh tokens
//! - GET / - Liveness probe

use axum::{
    Json, Router,
    extract::{ConnectInfo, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Serialize;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use crate::core::auth::jwt::TokenPair;
use crate::core::auth::service::{
    AuthError, AuthenticationService, LoginRequest, RegisterRequest, RegisterResponse,
    RegistrationService,
};
use crate::core::validation::FieldError;

/// API state containing both auth services
#[derive(Clone)]
pub struct ApiState {
    pub registration: RegistrationService,
    pub authentication: AuthenticationService,
}

/// Body for single-message failures: `{"message": "..."}`
#[derive(Debug, Serialize)]
struct MessageBody {
    message: String,
}

/// Body for field-level validation failures: `{"errors": [...]}`
#[derive(Debug, Serialize)]
struct ErrorsBody {
    errors: Vec<FieldError>,
}

/// Convert AuthError to an HTTP response
impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        match self {
            AuthError::Validation(errors) => {
                (StatusCode::BAD_REQUEST, Json(ErrorsBody { errors })).into_response()
            }
            AuthError::RateLimited => (
                StatusCode::TOO_MANY_REQUESTS,
                Json(MessageBody {
                    message: AuthError::RateLimited.to_string(),
                }),
            )
                .into_response(),
            AuthError::Internal(detail) => {
                // Detail stays server-side; the caller only sees the generic
                // message.
                tracing::error!(error = %detail, "internal error during auth request");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(MessageBody {
                        message: "Server error".to_string(),
                    }),
                )
                    .into_response()
            }
            other => (
                StatusCode::BAD_REQUEST,
                Json(MessageBody {
                    message: other.to_string(),
                }),
            )
                .into_response(),
        }
    }
}

/// Create the auth API router
pub fn auth_router(state: ApiState) -> Router {
    let state = Arc::new(state);

    Router::new()
        .route("/", get(health_handler))
        .route("/register", post(register_handler))
        .route("/login", post(login_handler))
        .with_state(state)
}

/// GET /
async fn health_handler() -> &'static str {
    "API is running..."
}

/// POST /register
async fn register_handler(
    State(state): State<Arc<ApiState>>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), AuthError> {
    tracing::info!(email = %request.email, "registration attempt");

    let response = state.registration.register(request).await?;

    tracing::info!("account registered");

    Ok((StatusCode::CREATED, Json(response)))
}

/// POST /login
async fn login_handler(
    State(state): State<Arc<ApiState>>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    Json(request): Json<LoginRequest>,
) -> Result<Json<TokenPair>, AuthError> {
    let client_key = client_key(&headers, addr);

    tracing::info!(email = %request.email, client = %client_key, "login attempt");

    let tokens = state.authentication.login(request, &client_key).await?;

    tracing::info!(client = %client_key, "login succeeded");

    Ok(Json(tokens))
}

/// Client identity used to key the login rate limiter.
///
/// Behind a proxy the peer address is the proxy's, so forwarding headers win
/// when they carry a parseable IP; otherwise the socket address is used.
fn client_key(headers: &HeaderMap, addr: SocketAddr) -> String {
    // X-Forwarded-For: first IP in the chain
    if let Some(ip) = headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.split(',').next())
        .and_then(|s| s.trim().parse::<IpAddr>().ok())
    {
        return ip.to_string();
    }

    if let Some(ip) = headers
        .get("x-real-ip")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.trim().parse::<IpAddr>().ok())
    {
        return ip.to_string();
    }

    addr.ip().to_string()
}
