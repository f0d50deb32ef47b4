mod observability;

pub mod utility;

pub use loanhub_primitives::error::ApiError;

use crate::utility::logging::setup_logging;
use crate::utility::server::serve;
use crate::utility::tasks::{build_router, initialize_system, load_env, log_env_source};
use eyre::Report;
use loanhub_core::app_state::AppState;
use loanhub_primitives::models::app_config::AppConfig;
use tracing::info;

pub async fn run() -> Result<(), Report> {
    // 1. load environment variables
    let env_file = load_env();

    // 2. initialize logging first (so we can log everything else)
    setup_logging();
    log_env_source(env_file.as_deref());

    info!("Starting LoanHub payment service...");

    // 3. load configuration
    let config = AppConfig::from_env()?;

    // 4. build application state
    let state = AppState::new(config)?;

    // 5. register the PesaPal IPN if none is configured
    initialize_system(&state).await;

    // 6. initialize metrics
    let (metric_layer, metric_handle) = observability::metrics::setup_metrics();

    // 7. build axum router
    let app = build_router(state, metric_layer, metric_handle)?;

    // 8. start HTTP server
    serve(app).await?;

    info!("LoanHub payment service shut down gracefully");
    Ok(())
}
