//! Dashboard HTTP proxy.
//!
//! A thin axum service that fronts the upstream API for browsers and
//! dashboards: each route calls the client, reshapes the result into
//! the dashboard's JSON envelope, and maps upstream failures to 500s.
//! No state is kept beyond the shared client.
//!
//! # Example
//!
//! ```ignore
//! use pipeview::server;
//! use pipeview::PipedriveClient;
//!
//! let client = PipedriveClient::from_env()?;
//! server::serve(client, "127.0.0.1:3000".parse()?).await?;
//! ```

mod handlers;
mod router;

pub use router::{router, serve};
