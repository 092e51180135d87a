//! Organization model and trait implementations.

use async_trait::async_trait;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::client::PipedriveClient;
use crate::error::{PipedriveError, Result};
use crate::models::{fetch_collection, Deal, Person};
use crate::pagination::{Envelope, Page};
use crate::traits::{Get, List};

/// A Pipedrive organization (company).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Organization {
    /// Numeric organization ID.
    pub id: u64,

    /// Company name.
    pub name: String,

    /// Number of linked persons.
    #[serde(default)]
    pub people_count: Option<u64>,

    /// Number of open deals.
    #[serde(default)]
    pub open_deals_count: Option<u64>,

    /// When the organization was created.
    #[serde(default, with = "crate::models::timestamp::option")]
    pub add_time: Option<NaiveDateTime>,
}

impl Organization {
    /// Get the deals linked to this organization.
    pub async fn deals(&self, client: &PipedriveClient) -> Result<Vec<Deal>> {
        fetch_collection(client, &format!("organizations/{}/deals", self.id)).await
    }

    /// Get the persons linked to this organization.
    pub async fn persons(&self, client: &PipedriveClient) -> Result<Vec<Person>> {
        fetch_collection(client, &format!("organizations/{}/persons", self.id)).await
    }
}

/// Query parameters for listing organizations.
#[derive(Debug, Clone, Default, Serialize)]
pub struct OrganizationListQuery {
    /// Sort order (e.g., "name ASC").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
}

#[async_trait]
impl Get for Organization {
    type Id = u64;

    #[tracing::instrument(skip(client))]
    async fn get(client: &PipedriveClient, id: u64) -> Result<Self> {
        let response = client.get(&format!("organizations/{id}")).await?;
        let envelope: Envelope<Organization> =
            response.json().await.map_err(PipedriveError::HttpError)?;

        envelope.data.ok_or(PipedriveError::NotFound {
            entity_type: "organization",
            id: id.to_string(),
        })
    }
}

#[async_trait]
impl List for Organization {
    type Query = OrganizationListQuery;

    #[tracing::instrument(skip(client))]
    async fn list_page(
        client: &PipedriveClient,
        query: &Self::Query,
        start: u32,
        limit: u32,
    ) -> Result<Page<Self>> {
        #[derive(Serialize)]
        struct RequestParams<'a> {
            #[serde(flatten)]
            query: &'a OrganizationListQuery,
            start: u32,
            limit: u32,
        }

        let params = RequestParams {
            query,
            start,
            limit,
        };

        let response = client.get_with_query("organizations", &params).await?;
        let envelope: Envelope<Vec<Organization>> =
            response.json().await.map_err(PipedriveError::HttpError)?;

        Ok(envelope.into_page(start, limit))
    }
}
