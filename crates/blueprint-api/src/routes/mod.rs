//! API 라우트.
//!
//! # 라우트 구조
//!
//! - `/health` - 헬스 체크 (공개)
//! - `/auth/login` - 토큰 발급 (공개)
//! - `/api/blueprints` - 블루프린트 CRUD (Bearer 토큰 + 스코프 필요)

pub mod auth;
pub mod blueprints;
pub mod health;

pub use auth::{auth_router, LoginRequest};
pub use blueprints::{
    blueprints_router, BlueprintDetail, BlueprintInput, BlueprintSummary, DeletedBlueprint,
    UpdatedBlueprint,
};
pub use health::{health_router, HealthResponse};

use axum::Router;
use std::sync::Arc;

use crate::state::AppState;

/// 전체 API 라우터 생성.
pub fn create_api_router() -> Router<Arc<AppState>> {
    Router::new()
        .nest("/health", health_router())
        .nest("/auth", auth_router())
        .nest("/api/blueprints", blueprints_router())
}
