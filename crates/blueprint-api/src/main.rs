//! Blueprints API 서버.
//!
//! 설정을 로드하고 키 쌍을 읽은 뒤 Axum 서버를 시작합니다.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::{info, warn};

use blueprint_api::{create_app, AppState};
use blueprint_core::{init_logging, AppConfig, LogConfig};

/// 설정 파일 경로.
///
/// `BLUEPRINTS_CONFIG` 환경 변수로 변경할 수 있습니다.
fn config_path() -> String {
    std::env::var("BLUEPRINTS_CONFIG").unwrap_or_else(|_| "config/default.toml".to_string())
}

/// CORS 미들웨어 구성.
///
/// `CORS_ORIGINS`(쉼표 구분)가 설정되어 있으면 해당 origin만 허용하고,
/// 없으면 모든 origin을 허용합니다.
fn cors_layer() -> CorsLayer {
    let allow_origin = match std::env::var("CORS_ORIGINS") {
        Ok(origins) if !origins.is_empty() => {
            let origins: Vec<_> = origins
                .split(',')
                .filter_map(|s| s.trim().parse().ok())
                .collect();

            if origins.is_empty() {
                warn!("CORS_ORIGINS is set but contains no valid origins, allowing any");
                AllowOrigin::any()
            } else {
                info!("CORS configured with {} allowed origins", origins.len());
                AllowOrigin::list(origins)
            }
        }
        _ => {
            warn!("CORS_ORIGINS not set, allowing any origin (development mode)");
            AllowOrigin::any()
        }
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([
            axum::http::Method::GET,
            axum::http::Method::POST,
            axum::http::Method::PUT,
            axum::http::Method::DELETE,
            axum::http::Method::OPTIONS,
        ])
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            axum::http::header::AUTHORIZATION,
            axum::http::header::ACCEPT,
        ])
        .max_age(Duration::from_secs(3600))
}

/// OpenAPI 스펙 내보내기.
///
/// `--export-openapi` 플래그 또는 `EXPORT_OPENAPI=1`이면 JSON을 출력하고 `true`를 반환합니다.
fn handle_export_openapi() -> anyhow::Result<bool> {
    use blueprint_api::openapi::ApiDoc;
    use utoipa::OpenApi as _;

    let export_flag = std::env::args().any(|arg| arg == "--export-openapi");
    let export_env = std::env::var("EXPORT_OPENAPI")
        .map(|v| v == "1" || v == "true")
        .unwrap_or(false);

    if !(export_flag || export_env) {
        return Ok(false);
    }

    println!("{}", serde_json::to_string_pretty(&ApiDoc::openapi())?);
    Ok(true)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    if handle_export_openapi()? {
        return Ok(());
    }

    let path = config_path();
    let config = AppConfig::load(&path).with_context(|| format!("failed to load {}", path))?;

    init_logging(LogConfig::from(&config.logging))
        .map_err(|e| anyhow::anyhow!("failed to initialize logging: {}", e))?;

    info!(config = %path, "Starting Blueprints API server...");

    let addr = config
        .server
        .socket_addr()
        .with_context(|| format!("invalid bind address {}:{}", config.server.host, config.server.port))?;

    let state = Arc::new(AppState::from_config(&config).context("failed to build application state")?);
    info!(version = %state.version, "Application state initialized");

    let app = create_app(state).layer(cors_layer());

    info!(%addr, "API server listening");
    info!("Swagger UI available at http://{}/swagger-ui", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped gracefully");

    Ok(())
}

/// Ctrl+C 또는 SIGTERM 대기.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            warn!("Received Ctrl+C, initiating graceful shutdown...");
        }
        _ = terminate => {
            warn!("Received SIGTERM, initiating graceful shutdown...");
        }
    }
}
