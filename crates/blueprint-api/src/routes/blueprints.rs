//! 블루프린트 CRUD endpoint.
//!
//! 저장소 없이 고정 값 또는 입력을 그대로 돌려줍니다. 각 핸들러는 추출기로
//! 요구 스코프를 선언합니다 (조회: `blueprints.read`, 변경: `blueprints.write`).

use std::sync::Arc;

use axum::{extract::Path, routing::get, Json, Router};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::auth::{ReadAccess, WriteAccess};
use crate::error::ApiErrorResponse;
use crate::state::AppState;

/// 목록 항목.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct BlueprintSummary {
    pub id: String,
    pub name: String,
}

/// 단건 조회 결과.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct BlueprintDetail {
    pub id: String,
    pub name: String,
    pub status: String,
}

/// 생성/수정 요청 본문.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct BlueprintInput {
    /// 미지정 시 기본 이름 사용
    #[serde(default)]
    pub name: Option<String>,
}

/// 수정 결과.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UpdatedBlueprint {
    pub id: String,
    pub name: String,
    /// 항상 "true"
    pub updated: String,
}

/// 삭제 결과.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DeletedBlueprint {
    pub id: String,
    /// 항상 "true"
    pub deleted: String,
}

const DEFAULT_CREATE_NAME: &str = "nuevo";
const DEFAULT_UPDATE_NAME: &str = "actualizado";

/// 블루프린트 목록 조회.
///
/// GET /api/blueprints
#[utoipa::path(
    get,
    path = "/api/blueprints",
    tag = "blueprints",
    responses(
        (status = 200, description = "블루프린트 목록", body = [BlueprintSummary]),
        (status = 401, description = "토큰 누락/무효/만료", body = ApiErrorResponse),
        (status = 403, description = "스코프 부족", body = ApiErrorResponse)
    ),
    security(("bearer-jwt" = ["blueprints.read"]))
)]
pub async fn list_blueprints(ReadAccess(_principal): ReadAccess) -> Json<Vec<BlueprintSummary>> {
    Json(vec![
        BlueprintSummary {
            id: "b1".to_string(),
            name: "Casa de campo".to_string(),
        },
        BlueprintSummary {
            id: "b2".to_string(),
            name: "Edificio urbano".to_string(),
        },
    ])
}

/// 블루프린트 단건 조회.
///
/// GET /api/blueprints/{id}
#[utoipa::path(
    get,
    path = "/api/blueprints/{id}",
    tag = "blueprints",
    params(("id" = String, Path, description = "블루프린트 ID")),
    responses(
        (status = 200, description = "블루프린트", body = BlueprintDetail),
        (status = 401, description = "토큰 누락/무효/만료", body = ApiErrorResponse),
        (status = 403, description = "스코프 부족", body = ApiErrorResponse)
    ),
    security(("bearer-jwt" = ["blueprints.read"]))
)]
pub async fn get_blueprint(
    ReadAccess(_principal): ReadAccess,
    Path(id): Path<String>,
) -> Json<BlueprintDetail> {
    Json(BlueprintDetail {
        name: format!("Blueprint {}", id),
        id,
        status: "activo".to_string(),
    })
}

/// 블루프린트 생성.
///
/// POST /api/blueprints
#[utoipa::path(
    post,
    path = "/api/blueprints",
    tag = "blueprints",
    request_body = BlueprintInput,
    responses(
        (status = 200, description = "생성된 블루프린트", body = BlueprintSummary),
        (status = 401, description = "토큰 누락/무효/만료", body = ApiErrorResponse),
        (status = 403, description = "스코프 부족", body = ApiErrorResponse)
    ),
    security(("bearer-jwt" = ["blueprints.write"]))
)]
pub async fn create_blueprint(
    WriteAccess(_principal): WriteAccess,
    Json(input): Json<BlueprintInput>,
) -> Json<BlueprintSummary> {
    Json(BlueprintSummary {
        id: "new".to_string(),
        name: input
            .name
            .unwrap_or_else(|| DEFAULT_CREATE_NAME.to_string()),
    })
}

/// 블루프린트 수정.
///
/// PUT /api/blueprints/{id}
#[utoipa::path(
    put,
    path = "/api/blueprints/{id}",
    tag = "blueprints",
    params(("id" = String, Path, description = "블루프린트 ID")),
    request_body = BlueprintInput,
    responses(
        (status = 200, description = "수정된 블루프린트", body = UpdatedBlueprint),
        (status = 401, description = "토큰 누락/무효/만료", body = ApiErrorResponse),
        (status = 403, description = "스코프 부족", body = ApiErrorResponse)
    ),
    security(("bearer-jwt" = ["blueprints.write"]))
)]
pub async fn update_blueprint(
    WriteAccess(_principal): WriteAccess,
    Path(id): Path<String>,
    Json(input): Json<BlueprintInput>,
) -> Json<UpdatedBlueprint> {
    Json(UpdatedBlueprint {
        id,
        name: input
            .name
            .unwrap_or_else(|| DEFAULT_UPDATE_NAME.to_string()),
        updated: "true".to_string(),
    })
}

/// 블루프린트 삭제.
///
/// DELETE /api/blueprints/{id}
#[utoipa::path(
    delete,
    path = "/api/blueprints/{id}",
    tag = "blueprints",
    params(("id" = String, Path, description = "블루프린트 ID")),
    responses(
        (status = 200, description = "삭제 결과", body = DeletedBlueprint),
        (status = 401, description = "토큰 누락/무효/만료", body = ApiErrorResponse),
        (status = 403, description = "스코프 부족", body = ApiErrorResponse)
    ),
    security(("bearer-jwt" = ["blueprints.write"]))
)]
pub async fn delete_blueprint(
    WriteAccess(_principal): WriteAccess,
    Path(id): Path<String>,
) -> Json<DeletedBlueprint> {
    Json(DeletedBlueprint {
        id,
        deleted: "true".to_string(),
    })
}

/// 블루프린트 라우터 생성.
pub fn blueprints_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_blueprints).post(create_blueprint))
        .route(
            "/{id}",
            get(get_blueprint)
                .put(update_blueprint)
                .delete(delete_blueprint),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{
            header::{AUTHORIZATION, CONTENT_TYPE},
            Request, StatusCode,
        },
    };
    use chrono::Utc;
    use tower::ServiceExt;

    use crate::auth::Claims;
    use crate::state::create_test_state;

    fn app_with_token(scope: Option<&str>) -> (Router, String) {
        let state = Arc::new(create_test_state());
        let token = match scope {
            None => state.issuer.issue("student").unwrap().access_token,
            Some(scope) => {
                let claims = Claims::new("blueprints-api", "student", scope, Utc::now().timestamp(), 300);
                state.issuer.sign(&claims).unwrap()
            }
        };
        let router = Router::new()
            .nest("/api/blueprints", blueprints_router())
            .with_state(state);
        (router, token)
    }

    fn request(method: &str, uri: &str, token: &str, body: Option<&str>) -> Request<Body> {
        let builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(AUTHORIZATION, format!("Bearer {}", token));
        match body {
            Some(body) => builder
                .header(CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        }
    }

    async fn json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn test_list_blueprints() {
        let (app, token) = app_with_token(None);

        let response = app
            .oneshot(request("GET", "/api/blueprints", &token, None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let list: Vec<BlueprintSummary> = json(response).await;
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].id, "b1");
        assert_eq!(list[0].name, "Casa de campo");
        assert_eq!(list[1].id, "b2");
        assert_eq!(list[1].name, "Edificio urbano");
    }

    #[tokio::test]
    async fn test_get_blueprint_echoes_id() {
        let (app, token) = app_with_token(None);

        let response = app
            .oneshot(request("GET", "/api/blueprints/b7", &token, None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let detail: BlueprintDetail = json(response).await;
        assert_eq!(detail.id, "b7");
        assert_eq!(detail.name, "Blueprint b7");
        assert_eq!(detail.status, "activo");
    }

    #[tokio::test]
    async fn test_create_blueprint_with_and_without_name() {
        let (app, token) = app_with_token(None);

        let response = app
            .clone()
            .oneshot(request("POST", "/api/blueprints", &token, Some(r#"{"name":"Torre"}"#)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let created: BlueprintSummary = json(response).await;
        assert_eq!(created.id, "new");
        assert_eq!(created.name, "Torre");

        let response = app
            .oneshot(request("POST", "/api/blueprints", &token, Some("{}")))
            .await
            .unwrap();
        let created: BlueprintSummary = json(response).await;
        assert_eq!(created.name, "nuevo");
    }

    #[tokio::test]
    async fn test_update_blueprint() {
        let (app, token) = app_with_token(None);

        let response = app
            .clone()
            .oneshot(request("PUT", "/api/blueprints/b1", &token, Some(r#"{"name":"Casa"}"#)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let updated: UpdatedBlueprint = json(response).await;
        assert_eq!(updated.id, "b1");
        assert_eq!(updated.name, "Casa");
        assert_eq!(updated.updated, "true");

        let response = app
            .oneshot(request("PUT", "/api/blueprints/b2", &token, Some("{}")))
            .await
            .unwrap();
        let updated: UpdatedBlueprint = json(response).await;
        assert_eq!(updated.name, "actualizado");
    }

    #[tokio::test]
    async fn test_delete_blueprint() {
        let (app, token) = app_with_token(None);

        let response = app
            .oneshot(request("DELETE", "/api/blueprints/b2", &token, None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let deleted: DeletedBlueprint = json(response).await;
        assert_eq!(deleted.id, "b2");
        assert_eq!(deleted.deleted, "true");
    }

    #[tokio::test]
    async fn test_read_only_token_cannot_write() {
        let (app, token) = app_with_token(Some("blueprints.read"));

        let response = app
            .clone()
            .oneshot(request("GET", "/api/blueprints", &token, None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .oneshot(request("DELETE", "/api/blueprints/b1", &token, None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        let error: ApiErrorResponse = json(response).await;
        assert_eq!(error.error, "insufficient_scope");
    }

    #[tokio::test]
    async fn test_write_only_token_cannot_read() {
        let (app, token) = app_with_token(Some("blueprints.write"));

        let response = app
            .oneshot(request("GET", "/api/blueprints/b1", &token, None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_missing_token() {
        let (app, _) = app_with_token(None);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/blueprints")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let error: ApiErrorResponse = json(response).await;
        assert_eq!(error.error, "missing_token");
    }
}
