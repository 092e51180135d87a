//! Route table and server entry point for the dashboard proxy.

use std::net::SocketAddr;

use axum::{
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;

use super::handlers;
use crate::client::PipedriveClient;
use crate::error::Result;

/// Build the dashboard proxy router around a shared client.
pub fn router(client: PipedriveClient) -> Router {
    Router::new()
        // Deal routes
        .route("/api/deals", get(handlers::list_deals))
        .route("/api/deals/all", get(handlers::all_deals))
        .route("/api/deals/simple", get(handlers::simple_deals))
        // Person routes
        .route("/api/persons", get(handlers::list_persons))
        .route("/api/persons/all", get(handlers::all_persons))
        // Search and exploration
        .route("/api/search", get(handlers::search))
        .route("/api/explore", get(handlers::explore))
        // Operational routes
        .route("/api/status", get(handlers::status))
        .route("/api/webhook", post(handlers::webhook))
        .route("/api/sync", post(handlers::sync))
        .with_state(client)
}

/// Run the dashboard proxy until the process is stopped.
///
/// # Errors
///
/// Returns an error if the listen address cannot be bound.
pub async fn serve(client: PipedriveClient, addr: SocketAddr) -> Result<()> {
    let app = router(client);

    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "dashboard proxy listening");

    axum::serve(listener, app).await?;

    Ok(())
}
