//! Raw exploration of the upstream endpoint catalog.
//!
//! The explorer exposes a closed set of browsable endpoints and returns
//! their responses as raw JSON for display, without going through the
//! typed models. Useful for poking at an account's data shape, custom
//! fields included.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::client::PipedriveClient;
use crate::error::{PipedriveError, Result};
use crate::pagination::PageParams;

/// Page size used when browsing main-data endpoints.
const EXPLORE_LIMIT: u32 = 5;

/// A browsable upstream endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Endpoint {
    // Main data
    Deals,
    Persons,
    Organizations,
    Activities,
    Products,
    Notes,
    Files,
    // Account configuration
    Pipelines,
    Stages,
    Users,
    // Relations (need an entity ID)
    DealActivities,
    DealPersons,
    PersonDeals,
    PersonActivities,
    OrgDeals,
    OrgPersons,
    // Statistics
    DealsTimeline,
    ActivitiesStats,
    // Custom field schemas
    DealFields,
    PersonFields,
    OrgFields,
    ActivityFields,
}

/// Catalog grouping, mirroring how the endpoints are presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Main,
    Config,
    Relations,
    Stats,
    Fields,
}

impl Category {
    /// Human-readable group title.
    pub fn title(&self) -> &'static str {
        match self {
            Category::Main => "Main data",
            Category::Config => "Account configuration",
            Category::Relations => "Relations",
            Category::Stats => "Statistics",
            Category::Fields => "Custom fields",
        }
    }
}

impl Endpoint {
    /// Every endpoint in catalog order.
    pub const ALL: [Endpoint; 22] = [
        Endpoint::Deals,
        Endpoint::Persons,
        Endpoint::Organizations,
        Endpoint::Activities,
        Endpoint::Products,
        Endpoint::Notes,
        Endpoint::Files,
        Endpoint::Pipelines,
        Endpoint::Stages,
        Endpoint::Users,
        Endpoint::DealActivities,
        Endpoint::DealPersons,
        Endpoint::PersonDeals,
        Endpoint::PersonActivities,
        Endpoint::OrgDeals,
        Endpoint::OrgPersons,
        Endpoint::DealsTimeline,
        Endpoint::ActivitiesStats,
        Endpoint::DealFields,
        Endpoint::PersonFields,
        Endpoint::OrgFields,
        Endpoint::ActivityFields,
    ];

    /// The catalog key, as accepted by the explore surfaces.
    pub fn key(&self) -> &'static str {
        match self {
            Endpoint::Deals => "deals",
            Endpoint::Persons => "persons",
            Endpoint::Organizations => "organizations",
            Endpoint::Activities => "activities",
            Endpoint::Products => "products",
            Endpoint::Notes => "notes",
            Endpoint::Files => "files",
            Endpoint::Pipelines => "pipelines",
            Endpoint::Stages => "stages",
            Endpoint::Users => "users",
            Endpoint::DealActivities => "deal-activities",
            Endpoint::DealPersons => "deal-persons",
            Endpoint::PersonDeals => "person-deals",
            Endpoint::PersonActivities => "person-activities",
            Endpoint::OrgDeals => "org-deals",
            Endpoint::OrgPersons => "org-persons",
            Endpoint::DealsTimeline => "deals-timeline",
            Endpoint::ActivitiesStats => "activities-stats",
            Endpoint::DealFields => "deal-fields",
            Endpoint::PersonFields => "person-fields",
            Endpoint::OrgFields => "org-fields",
            Endpoint::ActivityFields => "activity-fields",
        }
    }

    /// Short description for catalog listings.
    pub fn description(&self) -> &'static str {
        match self {
            Endpoint::Deals => "All deals",
            Endpoint::Persons => "All contacts",
            Endpoint::Organizations => "All companies",
            Endpoint::Activities => "All activities",
            Endpoint::Products => "All products",
            Endpoint::Notes => "All notes",
            Endpoint::Files => "All files",
            Endpoint::Pipelines => "Sales funnels",
            Endpoint::Stages => "Funnel stages",
            Endpoint::Users => "Account users",
            Endpoint::DealActivities => "Activities of a deal",
            Endpoint::DealPersons => "Contacts of a deal",
            Endpoint::PersonDeals => "Deals of a contact",
            Endpoint::PersonActivities => "Activities of a contact",
            Endpoint::OrgDeals => "Deals of a company",
            Endpoint::OrgPersons => "Contacts of a company",
            Endpoint::DealsTimeline => "Deal timeline report",
            Endpoint::ActivitiesStats => "Activity statistics",
            Endpoint::DealFields => "Custom deal fields",
            Endpoint::PersonFields => "Custom contact fields",
            Endpoint::OrgFields => "Custom company fields",
            Endpoint::ActivityFields => "Custom activity fields",
        }
    }

    /// Which catalog group this endpoint belongs to.
    pub fn category(&self) -> Category {
        match self {
            Endpoint::Deals
            | Endpoint::Persons
            | Endpoint::Organizations
            | Endpoint::Activities
            | Endpoint::Products
            | Endpoint::Notes
            | Endpoint::Files => Category::Main,
            Endpoint::Pipelines | Endpoint::Stages | Endpoint::Users => Category::Config,
            Endpoint::DealActivities
            | Endpoint::DealPersons
            | Endpoint::PersonDeals
            | Endpoint::PersonActivities
            | Endpoint::OrgDeals
            | Endpoint::OrgPersons => Category::Relations,
            Endpoint::DealsTimeline | Endpoint::ActivitiesStats => Category::Stats,
            Endpoint::DealFields
            | Endpoint::PersonFields
            | Endpoint::OrgFields
            | Endpoint::ActivityFields => Category::Fields,
        }
    }

    /// Whether this endpoint needs an entity ID.
    pub fn needs_id(&self) -> bool {
        self.category() == Category::Relations
    }

    /// Look an endpoint up by its catalog key.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|e| e.key() == key)
    }

    /// Upstream path for this endpoint.
    fn path(&self, id: Option<u64>) -> Result<String> {
        let id = || {
            id.ok_or_else(|| {
                PipedriveError::InvalidRequest(format!("id required for {}", self.key()))
            })
        };

        Ok(match self {
            Endpoint::Deals => "deals".to_string(),
            Endpoint::Persons => "persons".to_string(),
            Endpoint::Organizations => "organizations".to_string(),
            Endpoint::Activities => "activities".to_string(),
            Endpoint::Products => "products".to_string(),
            Endpoint::Notes => "notes".to_string(),
            Endpoint::Files => "files".to_string(),
            Endpoint::Pipelines => "pipelines".to_string(),
            Endpoint::Stages => "stages".to_string(),
            Endpoint::Users => "users".to_string(),
            Endpoint::DealActivities => format!("deals/{}/activities", id()?),
            Endpoint::DealPersons => format!("deals/{}/persons", id()?),
            Endpoint::PersonDeals => format!("persons/{}/deals", id()?),
            Endpoint::PersonActivities => format!("persons/{}/activities", id()?),
            Endpoint::OrgDeals => format!("organizations/{}/deals", id()?),
            Endpoint::OrgPersons => format!("organizations/{}/persons", id()?),
            Endpoint::DealsTimeline => "deals/timeline".to_string(),
            Endpoint::ActivitiesStats => "activities/statistics".to_string(),
            Endpoint::DealFields => "dealFields".to_string(),
            Endpoint::PersonFields => "personFields".to_string(),
            Endpoint::OrgFields => "organizationFields".to_string(),
            Endpoint::ActivityFields => "activityFields".to_string(),
        })
    }
}

/// Fetch an endpoint from the catalog and return the raw response JSON.
///
/// Main-data endpoints are browsed with a small page (limit 5); the
/// rest are fetched as-is. Relation endpoints require `id`.
///
/// # Errors
///
/// Returns [`PipedriveError::InvalidRequest`] when a relation endpoint
/// is called without an ID, or the underlying request error.
#[tracing::instrument(skip(client))]
pub async fn explore(
    client: &PipedriveClient,
    endpoint: Endpoint,
    id: Option<u64>,
) -> Result<serde_json::Value> {
    let path = endpoint.path(id)?;

    let response = if endpoint.category() == Category::Main {
        let params = PageParams {
            start: None,
            limit: Some(EXPLORE_LIMIT),
        };
        client.get_with_query(&path, &params).await?
    } else {
        client.get(&path).await?
    };

    let value = response.json().await.map_err(PipedriveError::HttpError)?;
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_round_trip() {
        for endpoint in Endpoint::ALL {
            assert_eq!(Endpoint::from_key(endpoint.key()), Some(endpoint));
        }
        assert_eq!(Endpoint::from_key("nonsense"), None);
    }

    #[test]
    fn test_relations_need_id() {
        assert!(Endpoint::DealActivities.needs_id());
        assert!(Endpoint::OrgPersons.needs_id());
        assert!(!Endpoint::Deals.needs_id());
        assert!(!Endpoint::DealsTimeline.needs_id());
    }

    #[test]
    fn test_relation_path_without_id_is_error() {
        let err = Endpoint::PersonDeals.path(None).unwrap_err();
        assert!(matches!(err, PipedriveError::InvalidRequest(_)));
    }

    #[test]
    fn test_paths() {
        assert_eq!(Endpoint::Deals.path(None).unwrap(), "deals");
        assert_eq!(
            Endpoint::DealActivities.path(Some(7)).unwrap(),
            "deals/7/activities"
        );
        assert_eq!(Endpoint::DealFields.path(None).unwrap(), "dealFields");
        assert_eq!(
            Endpoint::ActivitiesStats.path(None).unwrap(),
            "activities/statistics"
        );
    }

    #[test]
    fn test_serde_keys_match_catalog_keys() {
        let json = serde_json::to_value(Endpoint::OrgDeals).unwrap();
        assert_eq!(json, "org-deals");

        let endpoint: Endpoint = serde_json::from_value(serde_json::json!("deals-timeline")).unwrap();
        assert_eq!(endpoint, Endpoint::DealsTimeline);
    }
}
