//! 로그인 endpoint.
//!
//! 정적 자격증명을 검증하고 RS256 서명된 Bearer 토큰을 발급합니다.

use std::sync::Arc;

use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};
use utoipa::ToSchema;

use crate::auth::TokenResponse;
use crate::error::{ApiErrorResponse, AuthError};
use crate::state::AppState;

/// 로그인 요청.
///
/// 어느 필드든 누락되면 잘못된 자격증명으로 처리됩니다.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct LoginRequest {
    #[serde(default)]
    #[schema(example = "student")]
    pub username: Option<String>,
    #[serde(default)]
    #[schema(example = "student123")]
    pub password: Option<String>,
}

/// 로그인 - 토큰 발급.
///
/// POST /auth/login
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "토큰 발급 성공", body = TokenResponse),
        (status = 401, description = "잘못된 자격증명 (invalid_credentials)", body = ApiErrorResponse)
    ),
    security(())
)]
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, AuthError> {
    let (Some(username), Some(password)) =
        (request.username.as_deref(), request.password.as_deref())
    else {
        warn!("Login rejected: username or password missing");
        return Err(AuthError::InvalidCredentials);
    };

    if !state.credentials.is_valid(username, password) {
        warn!(username, "Login rejected: invalid credentials");
        return Err(AuthError::InvalidCredentials);
    }

    let token = state.issuer.issue(username).map_err(|e| {
        error!(username, error = %e, "Failed to sign access token");
        AuthError::Issuance(e.to_string())
    })?;

    info!(subject = username, expires_in = token.expires_in, "Access token issued");

    Ok(Json(token))
}

/// 인증 라우터 생성.
pub fn auth_router() -> Router<Arc<AppState>> {
    Router::new().route("/login", post(login))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{header::CONTENT_TYPE, Request, StatusCode},
    };
    use tower::ServiceExt;

    use crate::state::create_test_state;

    fn app() -> (Router, Arc<AppState>) {
        let state = Arc::new(create_test_state());
        let router = Router::new()
            .route("/auth/login", post(login))
            .with_state(state.clone());
        (router, state)
    }

    fn login_request(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/auth/login")
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn error_code(response: axum::response::Response) -> String {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let error: ApiErrorResponse = serde_json::from_slice(&body).unwrap();
        error.error
    }

    #[tokio::test]
    async fn test_login_success() {
        let (app, state) = app();

        let response = app
            .oneshot(login_request(r#"{"username":"student","password":"student123"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let token: TokenResponse = serde_json::from_slice(&body).unwrap();

        assert_eq!(token.token_type, "Bearer");
        assert_eq!(token.expires_in, 3600);

        let claims = state.verifier.verify(&token.access_token).unwrap();
        assert_eq!(claims.sub, "student");
        assert_eq!(claims.scope, "blueprints.read blueprints.write");
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let (app, _) = app();

        let response = app
            .oneshot(login_request(r#"{"username":"student","password":"nope"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(error_code(response).await, "invalid_credentials");
    }

    #[tokio::test]
    async fn test_login_missing_fields() {
        for body in [r#"{}"#, r#"{"username":"student"}"#, r#"{"password":"student123"}"#] {
            let (app, _) = app();
            let response = app.oneshot(login_request(body)).await.unwrap();

            assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "body: {}", body);
            assert_eq!(error_code(response).await, "invalid_credentials");
        }
    }
}
