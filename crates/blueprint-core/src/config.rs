//! 설정 관리.
//!
//! 기본값 → TOML 파일 → 환경 변수 순서로 설정을 병합합니다.
//! 환경 변수는 `BLUEPRINTS__` 접두사와 `__` 구분자를 사용합니다
//! (예: `BLUEPRINTS__SECURITY__TOKEN_TTL_SECONDS=600`).

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::net::SocketAddr;
use std::path::Path;

use crate::error::{CoreError, CoreResult};

/// 토큰 TTL 미설정 시 사용하는 기본값 (초).
pub const DEFAULT_TOKEN_TTL_SECS: i64 = 3600;

/// 애플리케이션 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// 서버 설정
    pub server: ServerConfig,
    /// 토큰 서명/검증 설정
    pub security: SecurityConfig,
    /// 로깅 설정
    pub logging: LoggingConfig,
    /// 정적 자격증명 목록
    #[serde(default = "default_users")]
    pub users: Vec<UserCredential>,
}

/// 서버 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// 바인딩할 호스트
    pub host: String,
    /// 리스닝할 포트
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

impl ServerConfig {
    /// 소켓 주소 반환.
    ///
    /// # Errors
    /// `host:port` 형식이 유효하지 않으면 `AddrParseError`를 반환합니다.
    pub fn socket_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.host, self.port).parse()
    }
}

/// 토큰 서명 키 및 발급 설정.
///
/// 개인 키는 토큰 발급에만, 공개 키는 토큰 검증에만 사용됩니다.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SecurityConfig {
    /// `iss` 클레임 값
    pub issuer: String,
    /// 토큰 유효 기간 (초). 미설정 시 [`DEFAULT_TOKEN_TTL_SECS`]
    #[serde(default)]
    pub token_ttl_seconds: Option<i64>,
    /// PEM 형식 RSA 공개 키 경로
    pub public_key_path: String,
    /// PEM 형식 RSA 개인 키 경로
    pub private_key_path: String,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            issuer: "blueprints-api".to_string(),
            token_ttl_seconds: None,
            public_key_path: "keys/public.pem".to_string(),
            private_key_path: "keys/private.pem".to_string(),
        }
    }
}

impl SecurityConfig {
    /// 실제 적용되는 토큰 TTL (초).
    pub fn effective_ttl(&self) -> i64 {
        self.token_ttl_seconds.unwrap_or(DEFAULT_TOKEN_TTL_SECS)
    }
}

/// 로깅 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// 로그 레벨
    pub level: String,
    /// 로그 형식 (pretty, json, compact)
    pub format: String,
    /// 파일명과 줄 번호 포함 여부
    #[serde(default)]
    pub with_file: bool,
    /// 대상(모듈 경로) 포함 여부
    #[serde(default = "default_with_target")]
    pub with_target: bool,
}

fn default_with_target() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
            with_file: false,
            with_target: true,
        }
    }
}

/// 로그인 가능한 사용자 자격증명.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct UserCredential {
    pub username: String,
    pub password: String,
}

impl UserCredential {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

fn default_users() -> Vec<UserCredential> {
    vec![UserCredential::new("student", "student123")]
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            security: SecurityConfig::default(),
            logging: LoggingConfig::default(),
            users: default_users(),
        }
    }
}

impl AppConfig {
    /// 파일과 환경 변수에서 설정을 로드합니다.
    ///
    /// 파일이 없으면 기본값과 환경 변수만 사용합니다.
    pub fn load<P: AsRef<Path>>(path: P) -> CoreResult<Self> {
        let builder = Self::builder()?
            .add_source(config::File::from(path.as_ref()).required(false))
            .add_source(env_source());

        Self::finish(builder)
    }

    /// 기본 경로에서 설정을 로드합니다.
    pub fn load_default() -> CoreResult<Self> {
        Self::load("config/default.toml")
    }

    /// TOML 문자열에서 설정을 로드합니다 (환경 변수 미적용).
    pub fn from_toml_str(toml: &str) -> CoreResult<Self> {
        let builder = Self::builder()?
            .add_source(config::File::from_str(toml, config::FileFormat::Toml));

        Self::finish(builder)
    }

    fn builder() -> CoreResult<config::ConfigBuilder<config::builder::DefaultState>> {
        let server = ServerConfig::default();
        let security = SecurityConfig::default();
        let logging = LoggingConfig::default();

        let builder = config::Config::builder()
            .set_default("server.host", server.host)?
            .set_default("server.port", i64::from(server.port))?
            .set_default("security.issuer", security.issuer)?
            .set_default("security.public_key_path", security.public_key_path)?
            .set_default("security.private_key_path", security.private_key_path)?
            .set_default("logging.level", logging.level)?
            .set_default("logging.format", logging.format)?;

        Ok(builder)
    }

    fn finish(builder: config::ConfigBuilder<config::builder::DefaultState>) -> CoreResult<Self> {
        let config: Self = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// 설정 값의 유효성을 검사합니다.
    pub fn validate(&self) -> CoreResult<()> {
        if self.security.issuer.trim().is_empty() {
            return Err(CoreError::Config("security.issuer must not be empty".into()));
        }

        if let Some(ttl) = self.security.token_ttl_seconds {
            if ttl <= 0 {
                return Err(CoreError::Config(format!(
                    "security.token_ttl_seconds must be positive, got {}",
                    ttl
                )));
            }
        }

        if self.users.is_empty() {
            return Err(CoreError::Config("at least one user must be configured".into()));
        }

        if let Some(user) = self
            .users
            .iter()
            .find(|u| u.username.is_empty() || u.password.is_empty())
        {
            return Err(CoreError::Config(format!(
                "user entry '{}' has an empty username or password",
                user.username
            )));
        }

        let mut seen = HashSet::new();
        if let Some(user) = self.users.iter().find(|u| !seen.insert(u.username.as_str())) {
            return Err(CoreError::Config(format!(
                "user '{}' is configured more than once",
                user.username
            )));
        }

        Ok(())
    }
}

fn env_source() -> config::Environment {
    config::Environment::with_prefix("BLUEPRINTS")
        .separator("__")
        .try_parsing(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_file() {
        let config = AppConfig::from_toml_str("").unwrap();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.security.issuer, "blueprints-api");
        assert_eq!(config.security.token_ttl_seconds, None);
        assert_eq!(config.security.effective_ttl(), 3600);
        assert_eq!(
            config.users,
            vec![UserCredential::new("student", "student123")]
        );
    }

    #[test]
    fn test_toml_overrides() {
        let config = AppConfig::from_toml_str(
            r#"
            [server]
            port = 9000

            [security]
            issuer = "https://issuer.example"
            token_ttl_seconds = 120

            [[users]]
            username = "alice"
            password = "secret"

            [[users]]
            username = "bob"
            password = "hunter2"
            "#,
        )
        .unwrap();

        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.security.issuer, "https://issuer.example");
        assert_eq!(config.security.effective_ttl(), 120);
        assert_eq!(config.security.public_key_path, "keys/public.pem");
        assert_eq!(config.users.len(), 2);
        assert_eq!(config.users[1].username, "bob");
    }

    #[test]
    fn test_non_positive_ttl_rejected() {
        let result = AppConfig::from_toml_str(
            r#"
            [security]
            token_ttl_seconds = 0
            "#,
        );
        assert!(matches!(result, Err(CoreError::Config(_))));
    }

    #[test]
    fn test_empty_user_list_rejected() {
        let mut config = AppConfig::default();
        config.users.clear();
        assert!(config.validate().is_err());

        config.users.push(UserCredential::new("ghost", ""));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_duplicate_username_rejected() {
        let result = AppConfig::from_toml_str(
            r#"
            [[users]]
            username = "student"
            password = "student123"

            [[users]]
            username = "student"
            password = "other"
            "#,
        );
        assert!(matches!(result, Err(CoreError::Config(msg)) if msg.contains("student")));
    }

    #[test]
    fn test_logging_section_flags() {
        let config = AppConfig::from_toml_str("").unwrap();
        assert!(!config.logging.with_file);
        assert!(config.logging.with_target);

        let config = AppConfig::from_toml_str(
            r#"
            [logging]
            level = "debug"
            format = "json"
            with_file = true
            with_target = false
            "#,
        )
        .unwrap();
        assert!(config.logging.with_file);
        assert!(!config.logging.with_target);
    }

    #[test]
    fn test_socket_addr() {
        let server = ServerConfig::default();
        assert_eq!(server.socket_addr().unwrap().port(), 8080);

        let bad = ServerConfig {
            host: "not a host".to_string(),
            port: 1,
        };
        assert!(bad.socket_addr().is_err());
    }
}
