//! 월별 수익률 히트맵 대시보드 서버 진입점.
//!
//! ```text
//! HEATMAP_CONFIG=config/default.toml heatmap-api
//! HEATMAP__SERVER__PORT=8080 HEATMAP__DATA__DATA_DIR=./data heatmap-api
//! ```

use std::sync::Arc;

use anyhow::Context;
use tracing::{info, warn};

use heatmap_api::{create_router, AppState};
use heatmap_core::{init_logging, AppConfig, LogConfig, DEFAULT_CONFIG_PATH};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env 파일 로드 (있는 경우)
    let _ = dotenvy::dotenv();

    let config_path =
        std::env::var("HEATMAP_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    let config = AppConfig::load(&config_path)
        .with_context(|| format!("설정 로드 실패: {}", config_path))?;

    init_logging(LogConfig::from_settings(&config.logging))
        .map_err(|e| anyhow::anyhow!("로깅 초기화 실패: {}", e))?;

    info!(
        config = %config_path,
        default_symbol = %config.dashboard.default_symbol,
        fill_policy = %config.dashboard.fill_policy,
        "Starting returns heatmap dashboard"
    );

    let provider = heatmap_data::create_provider(&config.data).context("가격 제공자 생성 실패")?;
    let state = Arc::new(AppState::new(provider, config.dashboard.clone()));
    let app = create_router(state, &config.server);

    let addr = config.server.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("바인딩 실패: {}", addr))?;

    info!(%addr, "Dashboard listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped gracefully");
    Ok(())
}

/// Ctrl+C 또는 SIGTERM 대기.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
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
