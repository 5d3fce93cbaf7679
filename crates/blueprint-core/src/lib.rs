//! # Blueprint Core
//!
//! blueprints 서비스 전반에서 사용하는 기반 타입을 제공합니다:
//! - 설정 관리 (파일 + 환경 변수)
//! - 로깅 인프라
//! - 기동 단계 에러 타입

pub mod config;
pub mod error;
pub mod logging;

pub use config::*;
pub use error::*;
pub use logging::*;
