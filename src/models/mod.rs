//! Pipedrive API model types.

mod activity;
mod deal;
mod organization;
mod person;
mod pipeline;
pub(crate) mod timestamp;

pub use activity::*;
pub use deal::*;
pub use organization::*;
pub use person::*;
pub use pipeline::*;

use serde::de::DeserializeOwned;

use crate::client::PipedriveClient;
use crate::error::{PipedriveError, Result};
use crate::pagination::Envelope;

/// Fetch an unpaginated collection endpoint and unwrap the envelope.
///
/// Relation endpoints (`deals/{id}/activities` and friends) and the
/// account-config endpoints return their whole payload in one envelope.
pub(crate) async fn fetch_collection<T: DeserializeOwned>(
    client: &PipedriveClient,
    path: &str,
) -> Result<Vec<T>> {
    let response = client.get(path).await?;
    let envelope: Envelope<Vec<T>> = response.json().await.map_err(PipedriveError::HttpError)?;
    Ok(envelope.data.unwrap_or_default())
}
