//! RSA 키 쌍 설정.
//!
//! 기동 시 한 번 생성되어 [`TokenIssuer`](super::TokenIssuer)와
//! [`TokenVerifier`](super::TokenVerifier)에 참조로 전달됩니다.

use blueprint_core::{CoreError, CoreResult, SecurityConfig};

/// 토큰 서명/검증에 사용하는 키 쌍과 발급 파라미터.
#[derive(Clone)]
pub struct KeyPairConfig {
    /// PEM 형식 공개 키 (검증 전용)
    pub public_key_pem: Vec<u8>,
    /// PEM 형식 개인 키 (발급 전용)
    pub private_key_pem: Vec<u8>,
    /// `iss` 클레임 값
    pub issuer: String,
    /// 토큰 유효 기간 (초)
    pub token_ttl_seconds: i64,
}

impl KeyPairConfig {
    /// PEM 바이트에서 직접 생성.
    pub fn from_pem(
        public_key_pem: impl Into<Vec<u8>>,
        private_key_pem: impl Into<Vec<u8>>,
        issuer: impl Into<String>,
        token_ttl_seconds: i64,
    ) -> Self {
        Self {
            public_key_pem: public_key_pem.into(),
            private_key_pem: private_key_pem.into(),
            issuer: issuer.into(),
            token_ttl_seconds,
        }
    }

    /// 보안 설정에 지정된 경로에서 키 파일을 읽습니다.
    pub fn load(security: &SecurityConfig) -> CoreResult<Self> {
        let public_key_pem = read_pem(&security.public_key_path)?;
        let private_key_pem = read_pem(&security.private_key_path)?;

        Ok(Self::from_pem(
            public_key_pem,
            private_key_pem,
            security.issuer.clone(),
            security.effective_ttl(),
        ))
    }
}

impl std::fmt::Debug for KeyPairConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyPairConfig")
            .field("issuer", &self.issuer)
            .field("token_ttl_seconds", &self.token_ttl_seconds)
            .field("private_key_pem", &"<redacted>")
            .finish_non_exhaustive()
    }
}

/// 저장소에 포함된 개발용 키 쌍 (테스트 전용).
#[cfg(any(test, feature = "test-utils"))]
pub fn dev_key_pair() -> KeyPairConfig {
    KeyPairConfig::from_pem(
        include_bytes!("../../../../keys/public.pem").to_vec(),
        include_bytes!("../../../../keys/private.pem").to_vec(),
        "blueprints-api",
        blueprint_core::DEFAULT_TOKEN_TTL_SECS,
    )
}

fn read_pem(path: &str) -> CoreResult<Vec<u8>> {
    let bytes = std::fs::read(path).map_err(|e| CoreError::io(path, e))?;
    if !bytes.starts_with(b"-----BEGIN") {
        return Err(CoreError::KeyMaterial(format!("{} is not a PEM file", path)));
    }
    Ok(bytes)
}
