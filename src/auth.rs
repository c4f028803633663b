//! # Authentication and Identity
//!
//! This module provides gateway bearer authentication and forwarded-identity
//! header validation for protected API endpoints. The identity provider
//! itself is external; the gateway in front of this service authenticates
//! with a shared bearer token and forwards the verified user identity in
//! `X-User-Id` / `X-User-Email` headers.

use std::sync::Arc;

use axum::{
    extract::{FromRef, FromRequestParts, Request, State},
    http::{HeaderMap, header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::Response,
};
use serde::{Deserialize, Serialize};
use subtle::ConstantTimeEq;
use utoipa::IntoParams;

use crate::config::AppConfig;
use crate::error::{ApiError, unauthorized, unauthorized_with_trace_id, validation_error};
use crate::server::AppState;
use crate::telemetry::TraceContext;

/// Verified identity forwarded by the gateway for the current request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Identity {
    /// Opaque identity-provider user id
    pub user_id: String,
    /// Primary email address, if the user has one verified
    pub email: Option<String>,
}

impl Identity {
    /// The user's email normalized for comparison and storage, if present
    /// and non-empty.
    pub fn normalized_email(&self) -> Option<String> {
        self.email
            .as_deref()
            .map(normalize_email)
            .filter(|email| !email.is_empty())
    }
}

/// Normalize an email address for comparison and storage: trim + lowercase.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

impl FromRef<AppState> for Arc<AppConfig> {
    fn from_ref(app_state: &AppState) -> Self {
        Arc::clone(&app_state.config)
    }
}

/// Authentication middleware that validates the gateway bearer token and the
/// forwarded identity headers.
pub async fn auth_middleware(
    State(config): State<Arc<AppConfig>>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let headers = request.headers().clone();

    // Extract trace_id from request context for consistent error responses
    let trace_id = request
        .extensions()
        .get::<TraceContext>()
        .map(|ctx| ctx.trace_id.clone());

    let token = extract_bearer_token_with_trace_id(&headers, trace_id.clone())?;
    validate_token(&config, token)?;

    let identity = extract_identity_with_trace_id(&headers, trace_id)?;
    tracing::info!(user_id = %identity.user_id, "Authenticated gateway request");

    let mut request = request;
    request.extensions_mut().insert(identity);

    Ok(next.run(request).await)
}

fn extract_bearer_token_with_trace_id(
    headers: &HeaderMap,
    trace_id: Option<String>,
) -> Result<&str, ApiError> {
    let trace_id_clone = trace_id.clone();

    headers
        .get(AUTHORIZATION)
        .ok_or_else(|| {
            if let Some(trace_id_val) = trace_id_clone {
                unauthorized_with_trace_id(Some("Missing Authorization header"), trace_id_val)
            } else {
                unauthorized(Some("Missing Authorization header"))
            }
        })
        .and_then(|value| {
            let trace_id_clone2 = trace_id.clone();
            value.to_str().map_err(|_| {
                if let Some(trace_id_val) = trace_id_clone2 {
                    unauthorized_with_trace_id(Some("Invalid Authorization header"), trace_id_val)
                } else {
                    unauthorized(Some("Invalid Authorization header"))
                }
            })
        })
        .and_then(|header| {
            header.strip_prefix("Bearer ").ok_or_else(|| {
                if let Some(trace_id_val) = trace_id {
                    unauthorized_with_trace_id(
                        Some("Authorization header must use Bearer scheme"),
                        trace_id_val,
                    )
                } else {
                    unauthorized(Some("Authorization header must use Bearer scheme"))
                }
            })
        })
}

fn validate_token(config: &AppConfig, token: &str) -> Result<(), ApiError> {
    let is_valid = config
        .gateway_tokens
        .iter()
        .any(|configured| ConstantTimeEq::ct_eq(token.as_bytes(), configured.as_bytes()).into());

    if is_valid {
        Ok(())
    } else {
        Err(unauthorized(Some("Invalid bearer token")))
    }
}

fn extract_identity_with_trace_id(
    headers: &HeaderMap,
    trace_id: Option<String>,
) -> Result<Identity, ApiError> {
    // A request without a forwarded user id is the API equivalent of a
    // signed-out session.
    let user_id = headers
        .get("X-User-Id")
        .ok_or_else(|| {
            if let Some(trace_id_val) = trace_id {
                unauthorized_with_trace_id(Some("Missing X-User-Id header"), trace_id_val)
            } else {
                unauthorized(Some("Missing X-User-Id header"))
            }
        })?
        .to_str()
        .map_err(|_| unauthorized(Some("Invalid X-User-Id header")))?
        .trim()
        .to_string();

    if user_id.is_empty() {
        return Err(unauthorized(Some("Missing X-User-Id header")));
    }

    let email = match headers.get("X-User-Email") {
        Some(value) => {
            let email = value.to_str().map_err(|_| {
                validation_error(
                    "Invalid email header",
                    serde_json::json!({ "X-User-Email": "Header must be valid UTF-8" }),
                )
            })?;
            let trimmed = email.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        None => None,
    };

    Ok(Identity { user_id, email })
}

/// OpenAPI header parameters for the forwarded identity
#[derive(Debug, Serialize, Deserialize, IntoParams, utoipa::ToSchema)]
#[into_params(parameter_in = Header)]
pub struct IdentityHeaders {
    /// Identity-provider user id of the signed-in user
    #[serde(rename = "X-User-Id")]
    #[param(rename = "X-User-Id", value_type = String)]
    pub user_id: String,
    /// Primary email address of the signed-in user (optional)
    #[serde(rename = "X-User-Email")]
    #[param(rename = "X-User-Email", value_type = Option<String>)]
    pub email: Option<String>,
}

impl<S> FromRequestParts<S> for Identity
where
    Arc<AppConfig>: FromRef<S>,
    S: Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Identity>()
            .cloned()
            .ok_or_else(|| unauthorized(Some("Identity context missing")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        Extension, Router,
        body::Body,
        http::{Request, StatusCode},
        routing::get,
    };
    use sea_orm::DatabaseConnection;
    use tower::ServiceExt;

    fn create_test_config() -> Arc<AppConfig> {
        Arc::new(AppConfig {
            gateway_tokens: vec!["test-token-123".to_string()],
            ..Default::default()
        })
    }

    async fn run_middleware(config: Arc<AppConfig>, request: Request<Body>) -> Response {
        async fn handler(Extension(identity): Extension<Identity>) -> String {
            identity.normalized_email().unwrap_or_default()
        }

        Router::new()
            .route("/test", get(handler))
            .layer(axum::middleware::from_fn_with_state(
                Arc::clone(&config),
                auth_middleware,
            ))
            .with_state(AppState {
                config,
                db: DatabaseConnection::default(),
            })
            .oneshot(request)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn missing_auth_header_returns_401() {
        let config = create_test_config();
        let request = Request::builder()
            .uri("/test")
            .header("X-User-Id", "user_1")
            .body(Body::empty())
            .unwrap();

        let response = run_middleware(config, request).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn invalid_auth_scheme_returns_401() {
        let config = create_test_config();
        let request = Request::builder()
            .uri("/test")
            .header("Authorization", "Basic dGVzdDoxMjM=")
            .header("X-User-Id", "user_1")
            .body(Body::empty())
            .unwrap();

        let response = run_middleware(config, request).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn invalid_token_returns_401() {
        let config = create_test_config();
        let request = Request::builder()
            .uri("/test")
            .header("Authorization", "Bearer wrong-token")
            .header("X-User-Id", "user_1")
            .body(Body::empty())
            .unwrap();

        let response = run_middleware(config, request).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn missing_user_header_returns_401() {
        let config = create_test_config();
        let request = Request::builder()
            .uri("/test")
            .header("Authorization", "Bearer test-token-123")
            .body(Body::empty())
            .unwrap();

        let response = run_middleware(config, request).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn valid_request_passes_through_and_normalizes_email() {
        let config = create_test_config();
        let request = Request::builder()
            .uri("/test")
            .header("Authorization", "Bearer test-token-123")
            .header("X-User-Id", "user_1")
            .header("X-User-Email", "  Alice@Example.COM ")
            .body(Body::empty())
            .unwrap();

        let response = run_middleware(config, request).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(String::from_utf8_lossy(&body), "alice@example.com");
    }

    #[tokio::test]
    async fn email_header_is_optional() {
        let config = create_test_config();
        let request = Request::builder()
            .uri("/test")
            .header("Authorization", "Bearer test-token-123")
            .header("X-User-Id", "user_1")
            .body(Body::empty())
            .unwrap();

        let response = run_middleware(config, request).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn multiple_tokens_supported() {
        let config = Arc::new(AppConfig {
            gateway_tokens: vec![
                "token-one".to_string(),
                "token-two".to_string(),
                "token-three".to_string(),
            ],
            ..Default::default()
        });

        for candidate in ["token-one", "token-two", "token-three"] {
            let request = Request::builder()
                .uri("/test")
                .header("Authorization", format!("Bearer {}", candidate))
                .header("X-User-Id", "user_1")
                .body(Body::empty())
                .unwrap();

            let response = run_middleware(Arc::clone(&config), request).await;
            assert_eq!(response.status(), StatusCode::OK);
        }
    }

    #[test]
    fn normalize_email_trims_and_lowercases() {
        assert_eq!(normalize_email("  Bob@X.COM "), "bob@x.com");
        assert_eq!(normalize_email("plain@x.com"), "plain@x.com");
    }
}
