//! API 에러 응답 타입.
//!
//! 모든 실패는 안정적인 기계 판독용 코드(`error`)를 가진 JSON 본문으로 응답합니다.
//!
//! ```json
//! { "error": "insufficient_scope", "message": "required scope: blueprints.write" }
//! ```

use axum::{
    http::{header::WWW_AUTHENTICATE, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::auth::Scope;

/// 에러 응답 본문.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiErrorResponse {
    /// 에러 코드 (예: "invalid_credentials", "token_expired")
    pub error: String,
    /// 사람이 읽을 수 있는 에러 메시지
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ApiErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: Some(message.into()),
        }
    }
}

/// 인증/인가 실패.
///
/// 모든 변형은 재시도 대상이 아니며 즉시 HTTP 응답으로 전달됩니다.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("invalid username or password")]
    InvalidCredentials,
    #[error("bearer token is missing")]
    MissingToken,
    #[error("token signature could not be verified")]
    InvalidSignature,
    #[error("token has expired")]
    TokenExpired,
    #[error("required scope: {required}")]
    InsufficientScope { required: Scope },
    #[error("token could not be issued: {0}")]
    Issuance(String),
}

impl AuthError {
    /// 응답 본문의 `error` 코드.
    pub fn code(&self) -> &'static str {
        match self {
            AuthError::InvalidCredentials => "invalid_credentials",
            AuthError::MissingToken => "missing_token",
            AuthError::InvalidSignature => "invalid_signature",
            AuthError::TokenExpired => "token_expired",
            AuthError::InsufficientScope { .. } => "insufficient_scope",
            AuthError::Issuance(_) => "internal_error",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AuthError::InsufficientScope { .. } => StatusCode::FORBIDDEN,
            AuthError::Issuance(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::UNAUTHORIZED,
        }
    }

    /// RFC 6750 `WWW-Authenticate` 챌린지 값. 로그인/내부 에러에는 없습니다.
    fn challenge(&self) -> Option<String> {
        match self {
            AuthError::MissingToken => Some("Bearer".to_string()),
            AuthError::InvalidSignature | AuthError::TokenExpired => Some(format!(
                "Bearer error=\"invalid_token\", error_description=\"{}\"",
                self
            )),
            AuthError::InsufficientScope { required } => Some(format!(
                "Bearer error=\"insufficient_scope\", scope=\"{}\"",
                required
            )),
            AuthError::InvalidCredentials | AuthError::Issuance(_) => None,
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(ApiErrorResponse::new(self.code(), self.to_string()));

        let mut response = (status, body).into_response();
        if let Some(value) = self.challenge().and_then(|c| HeaderValue::from_str(&c).ok()) {
            response.headers_mut().insert(WWW_AUTHENTICATE, value);
        }
        response
    }
}
