//! Get trait for fetching single entities.

use async_trait::async_trait;

use crate::client::PipedriveClient;
use crate::error::Result;

/// Fetch a single entity by ID.
///
/// Implement this trait for entity types that can be fetched individually
/// by their numeric Pipedrive ID.
///
/// # Example
///
/// ```ignore
/// use pipeview::{PipedriveClient, Deal, Get};
///
/// let client = PipedriveClient::from_env()?;
/// let deal = Deal::get(&client, 42).await?;
/// ```
#[async_trait]
pub trait Get: Sized {
    /// The ID type for this entity.
    type Id;

    /// Fetch the entity by ID.
    ///
    /// # Arguments
    ///
    /// * `client` - The Pipedrive API client
    /// * `id` - The entity identifier
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found or the request fails.
    async fn get(client: &PipedriveClient, id: Self::Id) -> Result<Self>;
}
