//! Pipedrive API client and dashboard library.
//!
//! A Rust library for browsing a Pipedrive CRM account using a
//! trait-based architecture where each operation (Get, List, Search,
//! Create, Update) is defined as a trait that entity types implement.
//! On top of the client sit the dashboard surfaces: an aggregate
//! summary, a raw endpoint explorer, and an HTTP proxy for UIs.
//!
//! # Quick Start
//!
//! ```no_run
//! use pipeview::{Deal, Get, List, Person, PipedriveClient};
//!
//! #[tokio::main]
//! async fn main() -> pipeview::Result<()> {
//!     // Create client from environment variables
//!     let client = PipedriveClient::from_env()?;
//!
//!     // Get a deal by ID
//!     let deal = Deal::get(&client, 42).await?;
//!     println!("Deal: {}", deal.title);
//!
//!     // List one page of persons
//!     let page = Person::list_page(&client, &Default::default(), 0, 50).await?;
//!     println!("Fetched {} persons", page.len());
//!
//!     // Fetch every deal, tolerating partial failure
//!     let collected = Deal::collect_all(&client, &Default::default()).await;
//!     println!(
//!         "{} deals in {} requests ({} errors)",
//!         collected.len(),
//!         collected.requests,
//!         collected.errors
//!     );
//!
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! The library is organized around operation traits:
//!
//! - [`Get`] - Fetch a single entity by ID
//! - [`List`] - Fetch paginated collections, page by page or whole
//! - [`Search`] - Term search over a collection
//! - [`Create`] / [`Update`] - Write operations
//!
//! Each entity type (like [`Deal`] or [`Person`]) implements the
//! traits that are supported by its API endpoints.
//!
//! Collections are paginated with `start`/`limit` offsets; the
//! upstream envelope carries a `more_items_in_collection` flag that
//! drives the whole-collection loops in [`List`].
//!
//! # Configuration
//!
//! The client reads configuration from environment variables:
//!
//! - `PIPEDRIVE_API_TOKEN` (required) - Your Pipedrive API token
//! - `PIPEDRIVE_API_URL` (optional) - Base URL (defaults to `https://api.pipedrive.com/v1`)

mod client;
mod error;
mod models;
mod pagination;
mod traits;

pub mod cli;
pub mod explorer;
pub mod output;
pub mod server;
pub mod summary;

#[cfg(feature = "test-server")]
pub mod mock_server;

// Re-export core types
pub use client::PipedriveClient;
pub use error::{PipedriveError, Result};
pub use pagination::{Collected, Envelope, Page, PageInfo, PageParams};

// Re-export traits
pub use traits::{Create, Get, List, Search, Update, DEFAULT_PAGE_SIZE};

// Re-export models
pub use models::{
    // Deal types
    Deal,
    DealCreateParams,
    DealListQuery,
    DealStatus,
    DealStatusFilter,
    DealUpdateParams,
    TimelineQuery,
    // Person types
    ContactValue,
    Person,
    PersonCreateParams,
    PersonListQuery,
    // Organization types
    Organization,
    OrganizationListQuery,
    // Activity types
    Activity,
    ActivityListQuery,
    // Account configuration
    Pipeline,
    Stage,
};

// Re-export convenience functions
pub use models::{get_deals_timeline, get_pipelines, get_stages};

// Re-export dashboard aggregation
pub use summary::DealSummary;
