//! Create trait for adding new entities.

use async_trait::async_trait;

use crate::client::PipedriveClient;
use crate::error::Result;

/// Create a new entity.
///
/// # Example
///
/// ```ignore
/// use pipeview::{PipedriveClient, Deal, DealCreateParams, Create};
///
/// let client = PipedriveClient::from_env()?;
/// let deal = Deal::create(
///     &client,
///     DealCreateParams {
///         title: "New contract".to_string(),
///         ..Default::default()
///     },
/// ).await?;
/// ```
#[async_trait]
pub trait Create: Sized {
    /// Parameters for the new entity.
    type Params;

    /// Create the entity and return the stored version.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    async fn create(client: &PipedriveClient, params: Self::Params) -> Result<Self>;
}
