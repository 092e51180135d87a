//! Search trait for term lookups.

use async_trait::async_trait;

use crate::client::PipedriveClient;
use crate::error::Result;

/// Find entities matching a search term.
///
/// Implement this trait for entity types that have an upstream
/// `/{collection}/search` endpoint.
///
/// # Example
///
/// ```ignore
/// use pipeview::{PipedriveClient, Deal, Search};
///
/// let client = PipedriveClient::from_env()?;
/// let hits = Deal::search(&client, "roadmap").await?;
/// ```
#[async_trait]
pub trait Search: Sized + Send {
    /// Search for entities matching `term`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    async fn search(client: &PipedriveClient, term: &str) -> Result<Vec<Self>>;
}
