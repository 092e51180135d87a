//! Mock server state management.
//!
//! Provides the in-memory data store for the mock Pipedrive API server.

use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::{Activity, Deal, DealStatus, Organization, Person, Pipeline, Stage};

/// Shared state for the mock server.
///
/// This struct holds all the mock data that the server will serve.
/// It's wrapped in `Arc<RwLock<_>>` for concurrent access. Collections
/// are keyed by ID in ordered maps so pagination is deterministic.
#[derive(Debug, Default)]
pub struct MockState {
    /// Deals indexed by ID.
    pub deals: BTreeMap<u64, Deal>,

    /// Persons indexed by ID.
    pub persons: BTreeMap<u64, Person>,

    /// Organizations indexed by ID.
    pub organizations: BTreeMap<u64, Organization>,

    /// Activities indexed by ID.
    pub activities: BTreeMap<u64, Activity>,

    /// Sales pipelines.
    pub pipelines: Vec<Pipeline>,

    /// Pipeline stages.
    pub stages: Vec<Stage>,
}

impl MockState {
    /// Create a new empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create state wrapped in Arc<RwLock> for sharing.
    pub fn shared(self) -> Arc<RwLock<Self>> {
        Arc::new(RwLock::new(self))
    }

    /// Add a deal to the state.
    pub fn with_deal(mut self, deal: Deal) -> Self {
        self.deals.insert(deal.id, deal);
        self
    }

    /// Add a person to the state.
    pub fn with_person(mut self, person: Person) -> Self {
        self.persons.insert(person.id, person);
        self
    }

    /// Add an organization to the state.
    pub fn with_organization(mut self, org: Organization) -> Self {
        self.organizations.insert(org.id, org);
        self
    }

    /// Add an activity to the state.
    pub fn with_activity(mut self, activity: Activity) -> Self {
        self.activities.insert(activity.id, activity);
        self
    }

    /// Add a pipeline to the state.
    pub fn with_pipeline(mut self, pipeline: Pipeline) -> Self {
        self.pipelines.push(pipeline);
        self
    }

    /// Add a stage to the state.
    pub fn with_stage(mut self, stage: Stage) -> Self {
        self.stages.push(stage);
        self
    }

    /// Get a deal by ID.
    pub fn get_deal(&self, id: u64) -> Option<&Deal> {
        self.deals.get(&id)
    }

    /// Get a person by ID.
    pub fn get_person(&self, id: u64) -> Option<&Person> {
        self.persons.get(&id)
    }

    /// Get an organization by ID.
    pub fn get_organization(&self, id: u64) -> Option<&Organization> {
        self.organizations.get(&id)
    }

    /// Get an activity by ID.
    pub fn get_activity(&self, id: u64) -> Option<&Activity> {
        self.activities.get(&id)
    }

    /// List deals, applying the upstream status filter semantics.
    ///
    /// `None` and `all_not_deleted` both exclude deleted deals; a
    /// concrete status matches exactly.
    pub fn list_deals(&self, status: Option<&str>) -> Vec<&Deal> {
        self.deals
            .values()
            .filter(|d| match status {
                None | Some("all_not_deleted") => d.status != DealStatus::Deleted,
                Some("open") => d.status == DealStatus::Open,
                Some("won") => d.status == DealStatus::Won,
                Some("lost") => d.status == DealStatus::Lost,
                Some("deleted") => d.status == DealStatus::Deleted,
                Some(_) => true,
            })
            .collect()
    }

    /// List all persons.
    pub fn list_persons(&self) -> Vec<&Person> {
        self.persons.values().collect()
    }

    /// List all organizations.
    pub fn list_organizations(&self) -> Vec<&Organization> {
        self.organizations.values().collect()
    }

    /// List all activities.
    pub fn list_activities(&self) -> Vec<&Activity> {
        self.activities.values().collect()
    }

    /// Deals whose title contains the term, case-insensitively.
    pub fn search_deals(&self, term: &str) -> Vec<&Deal> {
        let term = term.to_lowercase();
        self.deals
            .values()
            .filter(|d| d.title.to_lowercase().contains(&term))
            .collect()
    }

    /// Persons whose name contains the term, case-insensitively.
    pub fn search_persons(&self, term: &str) -> Vec<&Person> {
        let term = term.to_lowercase();
        self.persons
            .values()
            .filter(|p| p.name.to_lowercase().contains(&term))
            .collect()
    }

    /// Activities linked to a deal (matched on the deal title).
    pub fn deal_activities(&self, deal_id: u64) -> Vec<&Activity> {
        let Some(deal) = self.get_deal(deal_id) else {
            return vec![];
        };
        self.activities
            .values()
            .filter(|a| a.deal_title.as_deref() == Some(deal.title.as_str()))
            .collect()
    }

    /// Persons participating in a deal (matched on the person name).
    pub fn deal_persons(&self, deal_id: u64) -> Vec<&Person> {
        let Some(deal) = self.get_deal(deal_id) else {
            return vec![];
        };
        self.persons
            .values()
            .filter(|p| deal.person_name.as_deref() == Some(p.name.as_str()))
            .collect()
    }

    /// Deals linked to a person (matched on the person name).
    pub fn person_deals(&self, person_id: u64) -> Vec<&Deal> {
        let Some(person) = self.get_person(person_id) else {
            return vec![];
        };
        self.deals
            .values()
            .filter(|d| d.person_name.as_deref() == Some(person.name.as_str()))
            .collect()
    }

    /// Activities linked to a person (matched on the person name).
    pub fn person_activities(&self, person_id: u64) -> Vec<&Activity> {
        let Some(person) = self.get_person(person_id) else {
            return vec![];
        };
        self.activities
            .values()
            .filter(|a| a.person_name.as_deref() == Some(person.name.as_str()))
            .collect()
    }

    /// Deals linked to an organization (matched on the org name).
    pub fn organization_deals(&self, org_id: u64) -> Vec<&Deal> {
        let Some(org) = self.get_organization(org_id) else {
            return vec![];
        };
        self.deals
            .values()
            .filter(|d| d.org_name.as_deref() == Some(org.name.as_str()))
            .collect()
    }

    /// Persons linked to an organization (matched on the org name).
    pub fn organization_persons(&self, org_id: u64) -> Vec<&Person> {
        let Some(org) = self.get_organization(org_id) else {
            return vec![];
        };
        self.persons
            .values()
            .filter(|p| p.org_name.as_deref() == Some(org.name.as_str()))
            .collect()
    }

    /// Stages belonging to one pipeline.
    pub fn pipeline_stages(&self, pipeline_id: u64) -> Vec<&Stage> {
        self.stages
            .iter()
            .filter(|s| s.pipeline_id == Some(pipeline_id))
            .collect()
    }

    /// Insert a new deal with the next free ID and return it.
    pub fn create_deal(
        &mut self,
        title: String,
        value: Option<f64>,
        currency: Option<String>,
    ) -> &Deal {
        let id = self.deals.keys().next_back().copied().unwrap_or(0) + 1;
        let deal = Deal {
            id,
            title,
            value: value.unwrap_or(0.0),
            currency,
            status: DealStatus::Open,
            stage_id: None,
            stage_name: None,
            person_name: None,
            org_name: None,
            add_time: None,
            update_time: None,
        };
        self.deals.insert(id, deal);
        &self.deals[&id]
    }

    /// Update a deal and return the updated version.
    pub fn update_deal(
        &mut self,
        id: u64,
        title: Option<String>,
        value: Option<f64>,
        status: Option<DealStatus>,
    ) -> Option<&Deal> {
        let deal = self.deals.get_mut(&id)?;
        if let Some(t) = title {
            deal.title = t;
        }
        if let Some(v) = value {
            deal.value = v;
        }
        if let Some(s) = status {
            deal.status = s;
        }
        self.deals.get(&id)
    }

    /// Insert a new person with the next free ID and return it.
    pub fn create_person(
        &mut self,
        name: String,
        email: Option<String>,
        phone: Option<String>,
    ) -> &Person {
        let id = self.persons.keys().next_back().copied().unwrap_or(0) + 1;
        let person = Person {
            id,
            name,
            email: email
                .map(|value| {
                    vec![crate::ContactValue {
                        value,
                        primary: true,
                    }]
                })
                .unwrap_or_default(),
            phone: phone
                .map(|value| {
                    vec![crate::ContactValue {
                        value,
                        primary: true,
                    }]
                })
                .unwrap_or_default(),
            org_name: None,
            add_time: None,
        };
        self.persons.insert(id, person);
        &self.persons[&id]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock_server::Fixtures;

    #[test]
    fn test_state_add_and_get_deal() {
        let state = MockState::new().with_deal(Fixtures::minimal_deal(1, "Test Deal"));

        let deal = state.get_deal(1);
        assert!(deal.is_some());
        assert_eq!(deal.unwrap().title, "Test Deal");
    }

    #[test]
    fn test_state_list_deals_with_status_filter() {
        let state = MockState::new()
            .with_deal(Fixtures::deal_with_status(1, "Alpha", DealStatus::Open))
            .with_deal(Fixtures::deal_with_status(2, "Beta", DealStatus::Won))
            .with_deal(Fixtures::deal_with_status(3, "Gamma", DealStatus::Deleted));

        // Default excludes deleted
        assert_eq!(state.list_deals(None).len(), 2);
        assert_eq!(state.list_deals(Some("all_not_deleted")).len(), 2);
        assert_eq!(state.list_deals(Some("won")).len(), 1);
        assert_eq!(state.list_deals(Some("deleted")).len(), 1);
    }

    #[test]
    fn test_state_search_is_case_insensitive() {
        let state = MockState::new()
            .with_deal(Fixtures::minimal_deal(1, "Website relaunch"))
            .with_deal(Fixtures::minimal_deal(2, "Support contract"));

        let hits = state.search_deals("WEBSITE");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, 1);
    }

    #[test]
    fn test_state_create_deal_assigns_next_id() {
        let mut state = MockState::new().with_deal(Fixtures::minimal_deal(7, "Existing"));

        let created = state.create_deal("Fresh".to_string(), Some(10.0), None);
        assert_eq!(created.id, 8);
        assert_eq!(state.deals.len(), 2);
    }

    #[test]
    fn test_state_update_deal() {
        let mut state = MockState::new().with_deal(Fixtures::minimal_deal(1, "Original"));

        let updated = state.update_deal(1, Some("Renamed".to_string()), Some(99.0), None);
        assert!(updated.is_some());
        let deal = updated.unwrap();
        assert_eq!(deal.title, "Renamed");
        assert_eq!(deal.value, 99.0);

        assert!(state.update_deal(404, None, None, None).is_none());
    }
}
