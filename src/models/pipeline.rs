//! Pipeline and stage models.
//!
//! Account configuration rather than record data: pipelines are the
//! sales funnels, stages their ordered steps.

use serde::{Deserialize, Serialize};

use crate::client::PipedriveClient;
use crate::error::Result;
use crate::models::fetch_collection;

/// A sales pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pipeline {
    /// Numeric pipeline ID.
    pub id: u64,

    /// Pipeline name.
    pub name: String,

    /// Whether the pipeline is active.
    #[serde(default)]
    pub active: bool,

    /// Display order among pipelines.
    #[serde(default)]
    pub order_nr: Option<u32>,
}

/// A stage within a pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Stage {
    /// Numeric stage ID.
    pub id: u64,

    /// Stage name.
    pub name: String,

    /// Pipeline this stage belongs to.
    #[serde(default)]
    pub pipeline_id: Option<u64>,

    /// Display order within the pipeline.
    #[serde(default)]
    pub order_nr: Option<u32>,
}

/// Fetch all pipelines for the account.
#[tracing::instrument(skip(client))]
pub async fn get_pipelines(client: &PipedriveClient) -> Result<Vec<Pipeline>> {
    fetch_collection(client, "pipelines").await
}

/// Fetch stages, either globally or for one pipeline.
#[tracing::instrument(skip(client))]
pub async fn get_stages(
    client: &PipedriveClient,
    pipeline_id: Option<u64>,
) -> Result<Vec<Stage>> {
    let path = match pipeline_id {
        Some(id) => format!("pipelines/{id}/stages"),
        None => "stages".to_string(),
    };
    fetch_collection(client, &path).await
}
