//! Axum용 인가 게이트.
//!
//! 요청마다 독립적으로 Bearer 토큰을 추출하고 서명·만료·스코프를 검증합니다.
//! 검증 결과는 캐시하지 않습니다.

use std::collections::BTreeSet;
use std::sync::Arc;

use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};
use tracing::debug;

use super::{has_scope, Scope, TokenVerifier};
use crate::error::AuthError;
use crate::state::AppState;

/// 인가를 통과한 요청의 주체.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    /// 토큰의 `sub` (사용자 이름)
    pub subject: String,
    /// 토큰에 부여된 스코프
    pub scopes: BTreeSet<String>,
}

/// `Authorization` 헤더에서 Bearer 토큰을 추출.
///
/// 스킴은 대소문자를 구분하지 않습니다. 다른 스킴이거나 토큰이 비어 있으면 `None`.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }

    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

/// 요청 헤더를 `required` 스코프에 대해 평가.
///
/// 1. 토큰 추출 (`missing_token`)
/// 2. 서명 검증 (`invalid_signature`)
/// 3. 만료 확인 (`token_expired`)
/// 4. 스코프 확인 (`insufficient_scope`)
pub fn authorize(
    verifier: &TokenVerifier,
    headers: &HeaderMap,
    required: Scope,
) -> Result<Principal, AuthError> {
    let token = bearer_token(headers).ok_or(AuthError::MissingToken)?;
    let claims = verifier.verify(token)?;

    if !has_scope(&claims.scope, required) {
        return Err(AuthError::InsufficientScope { required });
    }

    Ok(Principal {
        scopes: claims.scopes(),
        subject: claims.sub,
    })
}

fn authorize_parts<S>(parts: &Parts, state: &S, required: Scope) -> Result<Principal, AuthError>
where
    Arc<AppState>: FromRef<S>,
{
    let app = Arc::<AppState>::from_ref(state);

    authorize(&app.verifier, &parts.headers, required)
        .inspect(|principal| {
            debug!(subject = %principal.subject, scope = %required, "Request authorized");
        })
        .inspect_err(|e| {
            debug!(code = e.code(), scope = %required, path = %parts.uri.path(), "Request rejected");
        })
}

/// `blueprints.read` 스코프를 요구하는 추출기.
///
/// ```rust,ignore
/// async fn list(ReadAccess(principal): ReadAccess) -> impl IntoResponse { ... }
/// ```
#[derive(Debug, Clone)]
pub struct ReadAccess(pub Principal);

impl<S> FromRequestParts<S> for ReadAccess
where
    Arc<AppState>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        authorize_parts(parts, state, Scope::BlueprintsRead).map(ReadAccess)
    }
}

/// `blueprints.write` 스코프를 요구하는 추출기.
#[derive(Debug, Clone)]
pub struct WriteAccess(pub Principal);

impl<S> FromRequestParts<S> for WriteAccess
where
    Arc<AppState>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        authorize_parts(parts, state, Scope::BlueprintsWrite).map(WriteAccess)
    }
}
