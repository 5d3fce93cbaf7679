//! 모든 핸들러에서 공유되는 애플리케이션 상태.
//!
//! 기동 시 한 번 구성된 뒤 변경되지 않으므로 잠금 없이 `Arc`로 공유합니다.

use std::sync::Arc;

use blueprint_core::AppConfig;
use tracing::info;

use crate::auth::{
    CredentialStore, InMemoryCredentialStore, JwtError, KeyPairConfig, TokenIssuer, TokenVerifier,
};

/// 애플리케이션 공유 상태.
#[derive(Clone)]
pub struct AppState {
    /// 자격증명 저장소
    pub credentials: Arc<dyn CredentialStore>,

    /// 토큰 발급기 (개인 키)
    pub issuer: TokenIssuer,

    /// 토큰 검증기 (공개 키)
    pub verifier: TokenVerifier,

    /// 서버 시작 시간 (업타임 계산용)
    pub started_at: chrono::DateTime<chrono::Utc>,

    /// API 버전
    pub version: String,
}

impl AppState {
    /// 새로운 AppState 생성.
    ///
    /// # 인자
    /// * `credentials` - 자격증명 저장소
    /// * `keys` - 키 쌍 설정 (발급기는 개인 키, 검증기는 공개 키만 사용)
    pub fn new(
        credentials: Arc<dyn CredentialStore>,
        keys: &KeyPairConfig,
    ) -> Result<Self, JwtError> {
        Ok(Self {
            credentials,
            issuer: TokenIssuer::new(keys)?,
            verifier: TokenVerifier::new(keys)?,
            started_at: chrono::Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        })
    }

    /// 설정에서 상태를 구성합니다. 설정을 검증한 뒤 키 파일을 읽습니다.
    pub fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        config.validate()?;
        let keys = KeyPairConfig::load(&config.security)?;
        let credentials = InMemoryCredentialStore::new(config.users.iter().cloned());

        info!(
            issuer = %keys.issuer,
            token_ttl_seconds = keys.token_ttl_seconds,
            users = credentials.len(),
            "Key pair and credential store loaded"
        );

        Ok(Self::new(Arc::new(credentials), &keys)?)
    }

    /// 서버 업타임 (초).
    pub fn uptime_secs(&self) -> i64 {
        (chrono::Utc::now() - self.started_at).num_seconds()
    }
}

/// 개발용 키 쌍과 `student / student123` 사용자로 구성한 테스트 상태.
#[cfg(any(test, feature = "test-utils"))]
pub fn create_test_state() -> AppState {
    let credentials = InMemoryCredentialStore::new(AppConfig::default().users);
    AppState::new(Arc::new(credentials), &crate::auth::dev_key_pair())
        .expect("development key pair must be valid")
}
