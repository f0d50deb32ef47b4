use axum::routing::get;
use axum::Router;
use axum_prometheus::{metrics_exporter_prometheus::PrometheusHandle, PrometheusMetricLayer};
use eyre::Report;
use http::{HeaderValue, Method};
use loanhub_core::app_state::AppState;
use loanhub_core::services::PaymentService;
use std::env;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};

pub fn build_cors() -> Result<CorsLayer, Report> {
    let origins = env::var("CORS_ORIGINS").unwrap_or_else(|_| "http://localhost:3000".into());

    let allowed_origins = origins
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<HeaderValue>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| eyre::eyre!("Invalid CORS origin: {}", e))?;

    Ok(CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any)
        .allow_origin(allowed_origins))
}

/// Loads `.env` if present. Returns its path so it can be logged once
/// the subscriber is installed.
pub fn load_env() -> Option<PathBuf> {
    dotenvy::dotenv().ok()
}

pub fn log_env_source(env_file: Option<&Path>) {
    match env_file {
        Some(path) => info!(path = %path.display(), "Loaded .env file"),
        None => info!("No .env file found, using system environment"),
    }
}

pub fn build_router(
    state: Arc<AppState>,
    metric_layer: PrometheusMetricLayer<'static>,
    metric_handle: PrometheusHandle,
) -> Result<Router, Report> {
    let cors = build_cors()?;

    Ok(loanhub_api::app::create_router(state)
        .route(
            "/metrics",
            get(move || async move { metric_handle.render() }),
        )
        .layer(metric_layer)
        .layer(cors))
}

/// Registers the callback URL with PesaPal when no IPN id is configured.
/// On failure the first order registers it instead, and the id is reused after that.
pub async fn initialize_system(state: &AppState) {
    if state.ipn_id().is_some() {
        info!("Using configured PesaPal IPN id");
        return;
    }

    if let Err(e) = PaymentService::register_ipn(state).await {
        warn!(
            error = %e,
            "Failed to register PesaPal IPN. The first order will register it."
        );
    }
}
