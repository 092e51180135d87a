//! Person model and trait implementations.

use async_trait::async_trait;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::client::PipedriveClient;
use crate::error::{PipedriveError, Result};
use crate::models::{fetch_collection, Activity, Deal};
use crate::pagination::{Envelope, Page};
use crate::traits::{Create, Get, List, Search};

/// A Pipedrive person (contact).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Person {
    /// Numeric person ID.
    pub id: u64,

    /// Full display name.
    pub name: String,

    /// Email addresses; at most one is flagged primary.
    #[serde(default)]
    pub email: Vec<ContactValue>,

    /// Phone numbers; at most one is flagged primary.
    #[serde(default)]
    pub phone: Vec<ContactValue>,

    /// Display name of the linked organization.
    #[serde(default)]
    pub org_name: Option<String>,

    /// When the person was created.
    #[serde(default, with = "crate::models::timestamp::option")]
    pub add_time: Option<NaiveDateTime>,
}

/// One entry in a person's email or phone list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactValue {
    /// The address or number.
    pub value: String,
    /// Whether this is the preferred entry.
    #[serde(default)]
    pub primary: bool,
}

impl Person {
    /// The primary email address, falling back to the first one.
    pub fn primary_email(&self) -> Option<&str> {
        self.email
            .iter()
            .find(|e| e.primary)
            .or_else(|| self.email.first())
            .map(|e| e.value.as_str())
    }

    /// The primary phone number, falling back to the first one.
    pub fn primary_phone(&self) -> Option<&str> {
        self.phone
            .iter()
            .find(|p| p.primary)
            .or_else(|| self.phone.first())
            .map(|p| p.value.as_str())
    }

    /// Get the deals linked to this person.
    pub async fn deals(&self, client: &PipedriveClient) -> Result<Vec<Deal>> {
        fetch_collection(client, &format!("persons/{}/deals", self.id)).await
    }

    /// Get the activities linked to this person.
    pub async fn activities(&self, client: &PipedriveClient) -> Result<Vec<Activity>> {
        fetch_collection(client, &format!("persons/{}/activities", self.id)).await
    }
}

/// Query parameters for listing persons.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PersonListQuery {
    /// Sort order (e.g., "name ASC").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
}

/// Parameters for creating a person.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PersonCreateParams {
    /// Full name.
    pub name: String,

    /// Email address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Phone number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

#[async_trait]
impl Get for Person {
    type Id = u64;

    #[tracing::instrument(skip(client))]
    async fn get(client: &PipedriveClient, id: u64) -> Result<Self> {
        let response = client.get(&format!("persons/{id}")).await?;
        let envelope: Envelope<Person> =
            response.json().await.map_err(PipedriveError::HttpError)?;

        envelope.data.ok_or(PipedriveError::NotFound {
            entity_type: "person",
            id: id.to_string(),
        })
    }
}

#[async_trait]
impl List for Person {
    type Query = PersonListQuery;

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
            query: &'a PersonListQuery,
            start: u32,
            limit: u32,
        }

        let params = RequestParams {
            query,
            start,
            limit,
        };

        let response = client.get_with_query("persons", &params).await?;
        let envelope: Envelope<Vec<Person>> =
            response.json().await.map_err(PipedriveError::HttpError)?;

        Ok(envelope.into_page(start, limit))
    }
}

#[async_trait]
impl Search for Person {
    #[tracing::instrument(skip(client))]
    async fn search(client: &PipedriveClient, term: &str) -> Result<Vec<Self>> {
        let response = client
            .get_with_query("persons/search", &[("term", term)])
            .await?;
        let envelope: Envelope<Vec<Person>> =
            response.json().await.map_err(PipedriveError::HttpError)?;

        Ok(envelope.data.unwrap_or_default())
    }
}

#[async_trait]
impl Create for Person {
    type Params = PersonCreateParams;

    #[tracing::instrument(skip(client, params))]
    async fn create(client: &PipedriveClient, params: Self::Params) -> Result<Self> {
        let response = client.post("persons", &params).await?;
        let envelope: Envelope<Person> =
            response.json().await.map_err(PipedriveError::HttpError)?;

        envelope.data.ok_or(PipedriveError::ApiError {
            message: "person creation returned no data".to_string(),
            status_code: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn person_with_contacts() -> Person {
        serde_json::from_value(serde_json::json!({
            "id": 3,
            "name": "Grace Hopper",
            "email": [
                { "value": "old@example.com", "primary": false },
                { "value": "grace@example.com", "primary": true }
            ],
            "phone": [
                { "value": "+1 555 0100" }
            ],
            "org_name": "Navy"
        }))
        .unwrap()
    }

    #[test]
    fn test_primary_email_prefers_flagged_entry() {
        let person = person_with_contacts();
        assert_eq!(person.primary_email(), Some("grace@example.com"));
    }

    #[test]
    fn test_primary_phone_falls_back_to_first() {
        let person = person_with_contacts();
        assert_eq!(person.primary_phone(), Some("+1 555 0100"));
    }

    #[test]
    fn test_no_contacts() {
        let person: Person =
            serde_json::from_value(serde_json::json!({ "id": 4, "name": "Nobody" })).unwrap();
        assert!(person.primary_email().is_none());
        assert!(person.primary_phone().is_none());
    }
}
