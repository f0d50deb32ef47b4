use std::env;
use std::io::{stdout, IsTerminal};
use tracing_subscriber::EnvFilter;

const DEFAULT_DIRECTIVES: &str = "info,loanhub=debug,loanhub_core=debug,tower_http=info";

/// Installs the global subscriber; a second call is a no-op.
pub fn setup_logging() {
    let directives = env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_DIRECTIVES.to_string());
    let env_filter = EnvFilter::try_new(&directives).unwrap_or_else(|_| EnvFilter::new("info"));

    // JSON for log shippers, pretty output for humans
    let installed = if stdout().is_terminal() {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_ansi(true)
            .with_target(true)
            .try_init()
    } else {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(env_filter)
            .with_ansi(false)
            .with_target(true)
            .with_current_span(true)
            .try_init()
    };

    if installed.is_ok() {
        tracing::info!(directives = %directives, "Logging initialized");
    }
}
