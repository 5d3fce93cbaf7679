//! 서비스 공통 에러 타입.

use thiserror::Error;

/// 설정 및 기동 단계의 에러.
#[derive(Debug, Error)]
pub enum CoreError {
    /// 설정 값 오류
    #[error("설정 에러: {0}")]
    Config(String),

    /// 설정 소스 로드/역직렬화 실패
    #[error("설정 로드 실패: {0}")]
    ConfigSource(#[from] config::ConfigError),

    /// 파일 읽기 실패
    #[error("파일을 읽을 수 없습니다 ({path}): {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// 키 형식 오류
    #[error("키 형식 에러: {0}")]
    KeyMaterial(String),
}

impl CoreError {
    /// 경로 정보를 포함한 IO 에러 생성.
    pub fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// 기동 단계 작업을 위한 Result 타입.
pub type CoreResult<T> = Result<T, CoreError>;
