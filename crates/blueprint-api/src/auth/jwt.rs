//! JWT 토큰 발급 및 검증.
//!
//! RS256으로 서명합니다. 발급은 개인 키, 검증은 공개 키만 사용합니다.

use std::collections::BTreeSet;

use chrono::Utc;
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::keys::KeyPairConfig;
use super::scopes::{parse_scopes, GRANTED_SCOPES};
use crate::error::AuthError;

/// JWT Access Token 페이로드.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Issuer
    #[serde(default)]
    pub iss: String,
    /// Subject - 로그인한 사용자 이름
    pub sub: String,
    /// Issued At (Unix timestamp)
    pub iat: i64,
    /// Expiration (Unix timestamp)
    pub exp: i64,
    /// 공백으로 구분된 부여 스코프
    #[serde(default)]
    pub scope: String,
    /// JWT ID - 토큰 고유 식별자
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jti: Option<String>,
}

impl Claims {
    /// 새로운 Claims 생성.
    ///
    /// # Arguments
    ///
    /// * `issuer` - `iss` 값
    /// * `subject` - 사용자 이름
    /// * `scope` - 공백 구분 스코프 문자열
    /// * `issued_at` - 발급 시각 (Unix timestamp)
    /// * `ttl_seconds` - 유효 기간 (초)
    pub fn new(
        issuer: impl Into<String>,
        subject: impl Into<String>,
        scope: impl Into<String>,
        issued_at: i64,
        ttl_seconds: i64,
    ) -> Self {
        Self {
            iss: issuer.into(),
            sub: subject.into(),
            iat: issued_at,
            exp: issued_at + ttl_seconds,
            scope: scope.into(),
            jti: Some(uuid::Uuid::new_v4().to_string()),
        }
    }

    /// `now` 시점에 만료되었는지 확인. `now >= exp`이면 만료입니다.
    pub fn is_expired_at(&self, now: i64) -> bool {
        now >= self.exp
    }

    pub fn scopes(&self) -> BTreeSet<String> {
        parse_scopes(&self.scope)
    }
}

/// 로그인 성공 응답.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TokenResponse {
    /// 서명된 JWT
    pub access_token: String,
    /// 토큰 타입 (항상 "Bearer")
    pub token_type: String,
    /// 만료까지 남은 시간 (초)
    pub expires_in: i64,
}

/// 키 로드/서명 에러.
#[derive(Debug, thiserror::Error)]
pub enum JwtError {
    #[error("잘못된 RSA 키: {0}")]
    InvalidKey(#[source] jsonwebtoken::errors::Error),
    #[error("토큰 인코딩 실패: {0}")]
    EncodingError(#[from] jsonwebtoken::errors::Error),
}

/// 토큰 발급기.
///
/// 자격증명 검증이 끝난 사용자에게만 호출해야 합니다.
#[derive(Clone)]
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    issuer: String,
    ttl_seconds: i64,
}

impl TokenIssuer {
    pub fn new(keys: &KeyPairConfig) -> Result<Self, JwtError> {
        let encoding_key =
            EncodingKey::from_rsa_pem(&keys.private_key_pem).map_err(JwtError::InvalidKey)?;

        Ok(Self {
            encoding_key,
            issuer: keys.issuer.clone(),
            ttl_seconds: keys.token_ttl_seconds,
        })
    }

    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    pub fn ttl_seconds(&self) -> i64 {
        self.ttl_seconds
    }

    /// 현재 시각 기준으로 토큰 발급.
    pub fn issue(&self, username: &str) -> Result<TokenResponse, JwtError> {
        self.issue_at(username, Utc::now().timestamp())
    }

    /// `now` 기준으로 토큰 발급.
    pub fn issue_at(&self, username: &str, now: i64) -> Result<TokenResponse, JwtError> {
        let claims = Claims::new(&self.issuer, username, GRANTED_SCOPES, now, self.ttl_seconds);

        Ok(TokenResponse {
            access_token: self.sign(&claims)?,
            token_type: "Bearer".to_string(),
            expires_in: self.ttl_seconds,
        })
    }

    /// 임의의 Claims를 RS256으로 서명.
    pub fn sign(&self, claims: &Claims) -> Result<String, JwtError> {
        encode(&Header::new(Algorithm::RS256), claims, &self.encoding_key).map_err(JwtError::from)
    }
}

impl std::fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("issuer", &self.issuer)
            .field("ttl_seconds", &self.ttl_seconds)
            .finish_non_exhaustive()
    }
}

/// 토큰 검증기.
///
/// 서명과 만료만 확인합니다. `iss`/`aud`는 검사하지 않으며 스코프 확인은
/// 인가 단계에서 수행합니다.
#[derive(Clone)]
pub struct TokenVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenVerifier {
    pub fn new(keys: &KeyPairConfig) -> Result<Self, JwtError> {
        let decoding_key =
            DecodingKey::from_rsa_pem(&keys.public_key_pem).map_err(JwtError::InvalidKey)?;

        let mut validation = Validation::new(Algorithm::RS256);
        // 만료는 verify_at에서 leeway 없이 직접 확인
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.validate_nbf = false;

        Ok(Self {
            decoding_key,
            validation,
        })
    }

    /// 현재 시각 기준 검증.
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        self.verify_at(token, Utc::now().timestamp())
    }

    /// `now` 기준 검증. 서명을 먼저 확인한 뒤 만료를 확인합니다.
    pub fn verify_at(&self, token: &str, now: i64) -> Result<Claims, AuthError> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::InvalidSignature,
            })?;

        if token_data.claims.is_expired_at(now) {
            return Err(AuthError::TokenExpired);
        }

        Ok(token_data.claims)
    }
}

impl std::fmt::Debug for TokenVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenVerifier")
            .field("algorithms", &self.validation.algorithms)
            .finish_non_exhaustive()
    }
}
