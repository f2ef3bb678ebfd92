use std::sync::Arc;

use axum::{
    Router,
    extract::State,
    http::{StatusCode, header},
    response::IntoResponse,
    routing::get,
};
use countdown_api::{HttpApi, RegistryAdapter};
use countdown_core::TimerRegistry;
use countdown_observe::logger_init;
use countdown_prometheus::PrometheusMetrics;
use tracing::{error, info};

mod config;
use config::ServerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1) Config + logger
    let cfg = ServerConfig::from_env()?;
    logger_init(&cfg.logger)?;
    info!(format = %cfg.logger.format, level = %cfg.logger.level, "logger initialized");

    // 2) Registry with metrics
    let metrics = PrometheusMetrics::new()?;
    let registry = TimerRegistry::with_config(cfg.registry).with_metrics(Arc::new(metrics.clone()));
    if registry.spawn_reaper()?.is_some() {
        info!(retention = ?cfg.registry.retention, "timer eviction enabled");
    }

    // 3) HTTP
    let api = HttpApi::new(Arc::new(RegistryAdapter::new(registry.clone()))).router();
    let app = Router::new()
        .route("/metrics", get(metrics_handler))
        .with_state(metrics)
        .merge(api);

    let listener = tokio::net::TcpListener::bind(cfg.addr).await?;
    info!(addr = %cfg.addr, "timer server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                error!(error = %e, "failed to listen for ctrl-c");
            }
            info!("shutting down...");
        })
        .await?;

    registry.shutdown();
    Ok(())
}

/// GET /metrics
async fn metrics_handler(State(metrics): State<PrometheusMetrics>) -> impl IntoResponse {
    match metrics.encode_text() {
        Ok(body) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            body,
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "failed to encode metrics");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
