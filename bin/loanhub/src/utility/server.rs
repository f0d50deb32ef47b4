use crate::utility::shutdown::shutdown_signal;
use axum::Router;
use eyre::{eyre, Report};
use std::net::SocketAddr;
use tokio::net::TcpListener;

pub fn bind_address() -> Result<SocketAddr, Report> {
    let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());
    let port = std::env::var("PORT").unwrap_or_else(|_| "8080".into());

    format!("{host}:{port}")
        .parse()
        .map_err(|e| eyre!("Invalid bind address {}:{}: {}", host, port, e))
}

pub async fn serve(router: Router) -> Result<(), Report> {
    let listener = TcpListener::bind(bind_address()?).await?;
    let addr = listener.local_addr()?;

    tracing::info!(%addr, "Server listening");
    tracing::info!("Swagger UI: http://{}/swagger-ui/", addr);

    axum::serve(
        listener,
        router.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    Ok(())
}
