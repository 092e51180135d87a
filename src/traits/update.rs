//! Update trait for modifying entities.

use async_trait::async_trait;

use crate::client::PipedriveClient;
use crate::error::Result;

/// Update an existing entity.
///
/// Implement this trait for entity types that can be modified
/// after creation.
///
/// # Example
///
/// ```ignore
/// use pipeview::{PipedriveClient, Deal, DealUpdateParams, Update};
///
/// let client = PipedriveClient::from_env()?;
/// let updated = Deal::update(
///     &client,
///     42,
///     DealUpdateParams {
///         title: Some("Renewed contract".to_string()),
///         ..Default::default()
///     },
/// ).await?;
/// ```
#[async_trait]
pub trait Update: Sized {
    /// The ID type for this entity.
    type Id;

    /// Parameters for the update.
    type Params;

    /// Update the entity and return the updated version.
    ///
    /// # Arguments
    ///
    /// * `client` - The Pipedrive API client
    /// * `id` - The entity identifier
    /// * `params` - Update parameters
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found or the request fails.
    async fn update(client: &PipedriveClient, id: Self::Id, params: Self::Params) -> Result<Self>;
}
