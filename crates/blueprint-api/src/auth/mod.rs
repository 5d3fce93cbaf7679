//! 인증 및 권한 부여.
//!
//! RS256 JWT 발급과 스코프 기반 접근 제어를 제공합니다.
//!
//! # 구성 요소
//!
//! - [`CredentialStore`]: 정적 사용자/비밀번호 검증
//! - [`TokenIssuer`]: 개인 키로 토큰 서명
//! - [`TokenVerifier`]: 공개 키로 토큰 검증
//! - [`ReadAccess`] / [`WriteAccess`]: 핸들러별 요구 스코프를 강제하는 추출기
//!
//! # 사용 예시
//!
//! ```rust,ignore
//! async fn create(WriteAccess(principal): WriteAccess) -> impl IntoResponse {
//!     format!("Hello, {}!", principal.subject)
//! }
//! ```

mod credentials;
mod jwt;
mod keys;
mod middleware;
mod scopes;

pub use credentials::{CredentialStore, InMemoryCredentialStore};
pub use jwt::{Claims, JwtError, TokenIssuer, TokenResponse, TokenVerifier};
#[cfg(any(test, feature = "test-utils"))]
pub use keys::dev_key_pair;
pub use keys::KeyPairConfig;
pub use middleware::{authorize, bearer_token, Principal, ReadAccess, WriteAccess};
pub use scopes::{has_scope, parse_scopes, Scope, GRANTED_SCOPES};
