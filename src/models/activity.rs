//! Activity model and trait implementations.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::client::PipedriveClient;
use crate::error::{PipedriveError, Result};
use crate::pagination::{Envelope, Page};
use crate::traits::{Get, List};

/// A Pipedrive activity (call, meeting, task...).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Activity {
    /// Numeric activity ID.
    pub id: u64,

    /// Short description of the activity.
    #[serde(default)]
    pub subject: Option<String>,

    /// Activity type key (e.g., "call", "meeting").
    #[serde(rename = "type", default)]
    pub activity_type: Option<String>,

    /// Date the activity is due.
    #[serde(default)]
    pub due_date: Option<NaiveDate>,

    /// Whether the activity has been completed.
    #[serde(default)]
    pub done: bool,

    /// Display name of the linked person.
    #[serde(default)]
    pub person_name: Option<String>,

    /// Title of the linked deal.
    #[serde(default)]
    pub deal_title: Option<String>,
}

/// Query parameters for listing activities.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ActivityListQuery {
    /// Filter by completion: 0 for pending, 1 for done.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub done: Option<u8>,

    /// Filter by activity type key.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub activity_type: Option<String>,
}

#[async_trait]
impl Get for Activity {
    type Id = u64;

    #[tracing::instrument(skip(client))]
    async fn get(client: &PipedriveClient, id: u64) -> Result<Self> {
        let response = client.get(&format!("activities/{id}")).await?;
        let envelope: Envelope<Activity> =
            response.json().await.map_err(PipedriveError::HttpError)?;

        envelope.data.ok_or(PipedriveError::NotFound {
            entity_type: "activity",
            id: id.to_string(),
        })
    }
}

#[async_trait]
impl List for Activity {
    type Query = ActivityListQuery;

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
            query: &'a ActivityListQuery,
            start: u32,
            limit: u32,
        }

        let params = RequestParams {
            query,
            start,
            limit,
        };

        let response = client.get_with_query("activities", &params).await?;
        let envelope: Envelope<Vec<Activity>> =
            response.json().await.map_err(PipedriveError::HttpError)?;

        Ok(envelope.into_page(start, limit))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_activity_type_field_rename() {
        let activity: Activity = serde_json::from_value(serde_json::json!({
            "id": 9,
            "subject": "Kickoff call",
            "type": "call",
            "due_date": "2024-04-01",
            "done": false
        }))
        .unwrap();

        assert_eq!(activity.activity_type.as_deref(), Some("call"));
        assert_eq!(
            activity.due_date.unwrap().to_string(),
            "2024-04-01".to_string()
        );
    }

    #[test]
    fn test_activity_query_serializes_type_key() {
        let query = ActivityListQuery {
            done: Some(1),
            activity_type: Some("meeting".to_string()),
        };
        let json = serde_json::to_value(&query).unwrap();
        assert_eq!(json["done"], 1);
        assert_eq!(json["type"], "meeting");
    }
}
