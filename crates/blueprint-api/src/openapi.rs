//! OpenAPI 문서화 설정.
//!
//! utoipa로 OpenAPI 3.0 스펙을 생성하고 `/swagger-ui`에서 제공합니다.
//! 보호된 엔드포인트는 `bearer-jwt` 보안 스킴과 요구 스코프로 표시됩니다.

use axum::Router;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::auth::TokenResponse;
use crate::error::ApiErrorResponse;
use crate::routes::{
    BlueprintDetail, BlueprintInput, BlueprintSummary, DeletedBlueprint, HealthResponse,
    LoginRequest, UpdatedBlueprint,
};

/// Blueprints API 문서.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Blueprints API",
        description = r#"
# Blueprints REST API

RS256 JWT Bearer 토큰으로 보호되는 블루프린트 CRUD API입니다.

## 인증

1. `POST /auth/login`으로 토큰을 발급받습니다 (예: `student` / `student123`).
2. `Authorization: Bearer <token>` 헤더를 포함해 호출합니다.

## 스코프

- `blueprints.read`: 목록/단건 조회
- `blueprints.write`: 생성/수정/삭제
"#,
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "로컬 개발 서버"),
    ),
    tags(
        (name = "health", description = "헬스 체크"),
        (name = "auth", description = "인증 - JWT Bearer 토큰 발급 (RS256)"),
        (name = "blueprints", description = "블루프린트 CRUD - blueprints.read / blueprints.write 스코프 필요")
    ),
    components(
        schemas(
            HealthResponse,
            ApiErrorResponse,
            LoginRequest,
            TokenResponse,
            BlueprintSummary,
            BlueprintDetail,
            BlueprintInput,
            UpdatedBlueprint,
            DeletedBlueprint,
        )
    ),
    paths(
        crate::routes::health::health_check,
        crate::routes::auth::login,
        crate::routes::blueprints::list_blueprints,
        crate::routes::blueprints::get_blueprint,
        crate::routes::blueprints::create_blueprint,
        crate::routes::blueprints::update_blueprint,
        crate::routes::blueprints::delete_blueprint,
    ),
    modifiers(&BearerSecurity)
)]
pub struct ApiDoc;

/// `bearer-jwt` 보안 스킴 등록.
struct BearerSecurity;

impl Modify for BearerSecurity {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer-jwt",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

/// Swagger UI 라우터 생성.
///
/// - `/swagger-ui` - Swagger UI 대화형 문서
/// - `/api-docs/openapi.json` - OpenAPI JSON 스펙
pub fn swagger_ui_router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    SwaggerUi::new("/swagger-ui")
        .url("/api-docs/openapi.json", ApiDoc::openapi())
        .into()
}
