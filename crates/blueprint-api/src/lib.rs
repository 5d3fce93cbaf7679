//! Blueprints REST API 서버.
//!
//! 이 크레이트는 다음을 제공합니다:
//! - Axum 기반 REST API (블루프린트 CRUD)
//! - 정적 자격증명 기반 로그인 및 RS256 JWT 발급
//! - 엔드포인트별 스코프 검증
//! - OpenAPI 문서 및 Swagger UI
//!
//! # 모듈 구성
//!
//! - [`auth`]: 자격증명 저장소, 토큰 발급/검증, 인가 추출기
//! - [`routes`]: REST API 엔드포인트
//! - [`state`]: 애플리케이션 공유 상태 (AppState)
//! - [`error`]: 에러 코드와 응답 본문
//! - [`openapi`]: OpenAPI 문서 및 Swagger UI

pub mod auth;
pub mod error;
pub mod openapi;
pub mod routes;
pub mod state;

use std::sync::Arc;

use axum::Router;
use tower_http::trace::TraceLayer;

pub use auth::{
    authorize, has_scope, Claims, CredentialStore, InMemoryCredentialStore, KeyPairConfig,
    Principal, ReadAccess, Scope, TokenIssuer, TokenResponse, TokenVerifier, WriteAccess,
};
pub use error::{ApiErrorResponse, AuthError};
pub use routes::create_api_router;
pub use state::AppState;

#[cfg(any(test, feature = "test-utils"))]
pub use state::create_test_state;

/// API 라우터, Swagger UI, 요청 추적 레이어를 조합한 애플리케이션 라우터.
///
/// CORS는 배포 환경에 따라 달라지므로 바이너리에서 추가합니다.
pub fn create_app(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(create_api_router().with_state(state))
        .merge(openapi::swagger_ui_router())
        .layer(TraceLayer::new_for_http())
}
