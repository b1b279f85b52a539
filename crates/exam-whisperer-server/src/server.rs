use crate::error::ServerError;
use crate::routes::router;
use crate::state::AppState;
use log::{info, warn};
use std::net::SocketAddr;
use tokio::net::TcpListener;

/// Bind `bind:port` and serve until Ctrl-C.
pub async fn serve(state: AppState, bind: &str, port: u16) -> Result<(), ServerError> {
    let addr: SocketAddr = format!("{bind}:{port}").parse()?;
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Bind { addr, source })?;
    info!("exam whisperer listening (addr={addr})");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(ServerError::Serve)?;
    info!("exam whisperer stopped (addr={addr})");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!("failed to listen for shutdown signal: {err}");
        std::future::pending::<()>().await;
    }
}
