//! Mock Pipedrive API server for E2E testing.
//!
//! This module provides an in-memory mock server that simulates the
//! upstream CRM API for integration and end-to-end testing. Unlike
//! wiremock which mocks at the HTTP level per-test, this server
//! maintains state across requests, enabling realistic workflow
//! testing, including real `start`/`limit` pagination with the
//! `more_items_in_collection` flag.
//!
//! # Example
//!
//! ```ignore
//! use pipeview::mock_server::MockServer;
//! use pipeview::{Deal, Get, PipedriveClient};
//!
//! #[tokio::test]
//! async fn test_workflow() {
//!     let server = MockServer::start().await;
//!     let client = PipedriveClient::new("test-token", server.url()).unwrap();
//!
//!     // Server comes with default fixtures
//!     let deal = Deal::get(&client, 1).await.unwrap();
//!     assert_eq!(deal.title, "Website relaunch");
//!
//!     server.shutdown().await;
//! }
//! ```

mod fixtures;
mod handlers;
mod server;
mod state;

pub use fixtures::Fixtures;
pub use server::MockServer;
pub use state::MockState;
