//! Deal model and trait implementations.

use async_trait::async_trait;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::client::PipedriveClient;
use crate::error::{PipedriveError, Result};
use crate::models::{fetch_collection, Activity, Person};
use crate::pagination::{Envelope, Page};
use crate::traits::{Create, Get, List, Search, Update};

/// A Pipedrive deal.
///
/// Deals are the sales opportunities moving through pipeline stages.
/// The upstream flattens the linked person/organization/stage into
/// `*_name` display fields, which is what dashboards render.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Deal {
    /// Numeric deal ID.
    pub id: u64,

    /// Deal title.
    pub title: String,

    /// Monetary value of the deal.
    #[serde(default)]
    pub value: f64,

    /// Currency code for `value` (e.g., "EUR").
    #[serde(default)]
    pub currency: Option<String>,

    /// Deal status.
    #[serde(default)]
    pub status: DealStatus,

    /// ID of the pipeline stage this deal sits in.
    #[serde(default)]
    pub stage_id: Option<u64>,

    /// Display name of the pipeline stage.
    #[serde(default)]
    pub stage_name: Option<String>,

    /// Display name of the linked person.
    #[serde(default)]
    pub person_name: Option<String>,

    /// Display name of the linked organization.
    #[serde(default)]
    pub org_name: Option<String>,

    /// When the deal was created.
    #[serde(default, with = "crate::models::timestamp::option")]
    pub add_time: Option<NaiveDateTime>,

    /// When the deal was last modified.
    #[serde(default, with = "crate::models::timestamp::option")]
    pub update_time: Option<NaiveDateTime>,
}

/// Status of a deal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DealStatus {
    /// Still in progress.
    #[default]
    Open,
    /// Closed and won.
    Won,
    /// Closed and lost.
    Lost,
    /// Soft-deleted upstream.
    Deleted,
}

impl std::fmt::Display for DealStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            DealStatus::Open => "open",
            DealStatus::Won => "won",
            DealStatus::Lost => "lost",
            DealStatus::Deleted => "deleted",
        };
        f.write_str(s)
    }
}

/// Status filter for listing deals.
///
/// Unlike [`DealStatus`] this includes the upstream's
/// `all_not_deleted` pseudo-status, the listing default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DealStatusFilter {
    Open,
    Won,
    Lost,
    Deleted,
    #[default]
    AllNotDeleted,
}

impl From<DealStatus> for DealStatusFilter {
    fn from(status: DealStatus) -> Self {
        match status {
            DealStatus::Open => DealStatusFilter::Open,
            DealStatus::Won => DealStatusFilter::Won,
            DealStatus::Lost => DealStatusFilter::Lost,
            DealStatus::Deleted => DealStatusFilter::Deleted,
        }
    }
}

impl Deal {
    /// Whether the deal is still in play.
    pub fn is_open(&self) -> bool {
        self.status == DealStatus::Open
    }

    /// Currency code, defaulting when the upstream omits it.
    pub fn currency_or_default(&self) -> &str {
        self.currency.as_deref().unwrap_or("EUR")
    }

    /// Get the activities attached to this deal.
    pub async fn activities(&self, client: &PipedriveClient) -> Result<Vec<Activity>> {
        fetch_collection(client, &format!("deals/{}/activities", self.id)).await
    }

    /// Get the persons participating in this deal.
    pub async fn persons(&self, client: &PipedriveClient) -> Result<Vec<Person>> {
        fetch_collection(client, &format!("deals/{}/persons", self.id)).await
    }
}

/// Query parameters for listing deals.
///
/// Defaults to the `all_not_deleted` status filter, mirroring how the
/// upstream dashboard endpoints are normally queried.
#[derive(Debug, Clone, Serialize)]
pub struct DealListQuery {
    /// Filter by deal status.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<DealStatusFilter>,

    /// Sort order (e.g., "add_time DESC").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
}

impl Default for DealListQuery {
    fn default() -> Self {
        Self {
            status: Some(DealStatusFilter::AllNotDeleted),
            sort: None,
        }
    }
}

/// Parameters for creating a deal.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DealCreateParams {
    /// Deal title.
    pub title: String,

    /// Monetary value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,

    /// Currency code for `value`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,

    /// Person to link the deal to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub person_id: Option<u64>,

    /// Stage to place the deal in.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stage_id: Option<u64>,
}

/// Parameters for updating a deal. All fields optional.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DealUpdateParams {
    /// New title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// New value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,

    /// New currency.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,

    /// New status.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<DealStatus>,

    /// Move to a different stage.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stage_id: Option<u64>,
}

/// Query parameters for the deals timeline statistics endpoint.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TimelineQuery {
    /// Period start (YYYY-MM-DD).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,

    /// Period end (YYYY-MM-DD).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,

    /// Restrict to one account user.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<u64>,
}

/// Fetch deal timeline statistics as raw JSON.
///
/// The timeline payload is a nested report structure; dashboards render
/// it as-is rather than through a typed model.
#[tracing::instrument(skip(client))]
pub async fn get_deals_timeline(
    client: &PipedriveClient,
    query: &TimelineQuery,
) -> Result<serde_json::Value> {
    let response = client.get_with_query("deals/timeline", query).await?;
    let value = response.json().await.map_err(PipedriveError::HttpError)?;
    Ok(value)
}

#[async_trait]
impl Get for Deal {
    type Id = u64;

    #[tracing::instrument(skip(client))]
    async fn get(client: &PipedriveClient, id: u64) -> Result<Self> {
        let response = client.get(&format!("deals/{id}")).await?;
        let envelope: Envelope<Deal> =
            response.json().await.map_err(PipedriveError::HttpError)?;

        envelope.data.ok_or(PipedriveError::NotFound {
            entity_type: "deal",
            id: id.to_string(),
        })
    }
}

#[async_trait]
impl List for Deal {
    type Query = DealListQuery;

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
            query: &'a DealListQuery,
            start: u32,
            limit: u32,
        }

        let params = RequestParams {
            query,
            start,
            limit,
        };

        let response = client.get_with_query("deals", &params).await?;
        let envelope: Envelope<Vec<Deal>> =
            response.json().await.map_err(PipedriveError::HttpError)?;

        Ok(envelope.into_page(start, limit))
    }
}

#[async_trait]
impl Search for Deal {
    #[tracing::instrument(skip(client))]
    async fn search(client: &PipedriveClient, term: &str) -> Result<Vec<Self>> {
        let response = client
            .get_with_query("deals/search", &[("term", term)])
            .await?;
        let envelope: Envelope<Vec<Deal>> =
            response.json().await.map_err(PipedriveError::HttpError)?;

        Ok(envelope.data.unwrap_or_default())
    }
}

#[async_trait]
impl Create for Deal {
    type Params = DealCreateParams;

    #[tracing::instrument(skip(client, params))]
    async fn create(client: &PipedriveClient, params: Self::Params) -> Result<Self> {
        let response = client.post("deals", &params).await?;
        let envelope: Envelope<Deal> =
            response.json().await.map_err(PipedriveError::HttpError)?;

        envelope.data.ok_or(PipedriveError::ApiError {
            message: "deal creation returned no data".to_string(),
            status_code: None,
        })
    }
}

#[async_trait]
impl Update for Deal {
    type Id = u64;
    type Params = DealUpdateParams;

    #[tracing::instrument(skip(client, params))]
    async fn update(client: &PipedriveClient, id: u64, params: Self::Params) -> Result<Self> {
        let response = client.put(&format!("deals/{id}"), &params).await?;
        let envelope: Envelope<Deal> =
            response.json().await.map_err(PipedriveError::HttpError)?;

        envelope.data.ok_or(PipedriveError::NotFound {
            entity_type: "deal",
            id: id.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deal_deserialize_full() {
        let deal: Deal = serde_json::from_value(serde_json::json!({
            "id": 17,
            "title": "Annual license",
            "value": 4200.0,
            "currency": "EUR",
            "status": "open",
            "stage_id": 2,
            "stage_name": "Negotiation",
            "person_name": "Ada Lovelace",
            "org_name": "Analytical Engines Ltd",
            "add_time": "2024-02-12 08:00:00",
            "update_time": "2024-03-01 12:30:00"
        }))
        .unwrap();

        assert_eq!(deal.id, 17);
        assert_eq!(deal.status, DealStatus::Open);
        assert!(deal.is_open());
        assert_eq!(deal.currency_or_default(), "EUR");
        assert!(deal.add_time.is_some());
    }

    #[test]
    fn test_deal_deserialize_minimal() {
        // Upstream omits most fields on sparse records
        let deal: Deal =
            serde_json::from_value(serde_json::json!({ "id": 1, "title": "Bare" })).unwrap();

        assert_eq!(deal.value, 0.0);
        assert_eq!(deal.status, DealStatus::Open);
        assert!(deal.stage_name.is_none());
        assert!(deal.add_time.is_none());
    }

    #[test]
    fn test_status_filter_serializes_snake_case() {
        let query = DealListQuery::default();
        let json = serde_json::to_value(&query).unwrap();
        assert_eq!(json["status"], "all_not_deleted");

        let query = DealListQuery {
            status: Some(DealStatusFilter::Won),
            sort: Some("value DESC".to_string()),
        };
        let json = serde_json::to_value(&query).unwrap();
        assert_eq!(json["status"], "won");
        assert_eq!(json["sort"], "value DESC");
    }

    #[test]
    fn test_update_params_skip_unset_fields() {
        let params = DealUpdateParams {
            title: Some("Renamed".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_value(&params).unwrap();
        assert_eq!(json.as_object().unwrap().len(), 1);
        assert_eq!(json["title"], "Renamed");
    }
}
