//! Test data fixtures for the mock server.
//!
//! Provides factory functions for creating realistic test data.

use chrono::NaiveDate;

use crate::{
    Activity, ContactValue, Deal, DealStatus, Organization, Person, Pipeline, Stage,
};

/// Collection of fixture factories for test data.
pub struct Fixtures;

impl Fixtures {
    // =========================================================================
    // Deal Fixtures
    // =========================================================================

    /// Create a minimal open deal.
    pub fn minimal_deal(id: u64, title: &str) -> Deal {
        Deal {
            id,
            title: title.to_string(),
            value: 0.0,
            currency: None,
            status: DealStatus::Open,
            stage_id: None,
            stage_name: None,
            person_name: None,
            org_name: None,
            add_time: None,
            update_time: None,
        }
    }

    /// Create a deal with a specific status.
    pub fn deal_with_status(id: u64, title: &str, status: DealStatus) -> Deal {
        let mut deal = Self::minimal_deal(id, title);
        deal.status = status;
        deal
    }

    /// Create a fully populated deal.
    pub fn rich_deal(
        id: u64,
        title: &str,
        value: f64,
        currency: &str,
        status: DealStatus,
        person: &str,
        org: &str,
    ) -> Deal {
        let mut deal = Self::minimal_deal(id, title);
        deal.value = value;
        deal.currency = Some(currency.to_string());
        deal.status = status;
        deal.stage_id = Some(1);
        deal.stage_name = Some("Qualified".to_string());
        deal.person_name = Some(person.to_string());
        deal.org_name = Some(org.to_string());
        deal.add_time = NaiveDate::from_ymd_opt(2024, 1, 10)
            .and_then(|d| d.and_hms_opt(9, 0, 0))
            .map(|t| t + chrono::Duration::hours(id as i64));
        deal
    }

    // =========================================================================
    // Person Fixtures
    // =========================================================================

    /// Create a minimal person.
    pub fn minimal_person(id: u64, name: &str) -> Person {
        Person {
            id,
            name: name.to_string(),
            email: vec![],
            phone: vec![],
            org_name: None,
            add_time: None,
        }
    }

    /// Create a person with contact details and an organization.
    pub fn rich_person(id: u64, name: &str, email: &str, org: &str) -> Person {
        let mut person = Self::minimal_person(id, name);
        person.email = vec![ContactValue {
            value: email.to_string(),
            primary: true,
        }];
        person.phone = vec![ContactValue {
            value: format!("+49 30 5550{id:03}"),
            primary: true,
        }];
        person.org_name = Some(org.to_string());
        person
    }

    // =========================================================================
    // Organization and Activity Fixtures
    // =========================================================================

    /// Create an organization.
    pub fn organization(id: u64, name: &str) -> Organization {
        Organization {
            id,
            name: name.to_string(),
            people_count: None,
            open_deals_count: None,
            add_time: None,
        }
    }

    /// Create an activity linked to a person and a deal.
    pub fn activity(id: u64, subject: &str, person: &str, deal_title: &str) -> Activity {
        Activity {
            id,
            subject: Some(subject.to_string()),
            activity_type: Some("call".to_string()),
            due_date: NaiveDate::from_ymd_opt(2024, 4, 1),
            done: false,
            person_name: Some(person.to_string()),
            deal_title: Some(deal_title.to_string()),
        }
    }

    /// Create a pipeline.
    pub fn pipeline(id: u64, name: &str) -> Pipeline {
        Pipeline {
            id,
            name: name.to_string(),
            active: true,
            order_nr: Some(id as u32),
        }
    }

    /// Create a stage within a pipeline.
    pub fn stage(id: u64, name: &str, pipeline_id: u64, order_nr: u32) -> Stage {
        Stage {
            id,
            name: name.to_string(),
            pipeline_id: Some(pipeline_id),
            order_nr: Some(order_nr),
        }
    }

    // =========================================================================
    // Scenarios
    // =========================================================================

    /// The default scenario served by `MockServer::start`.
    ///
    /// A small account: three organizations' worth of deals in various
    /// states, linked persons, and a handful of activities.
    pub fn default_scenario() -> DefaultScenario {
        let deals = vec![
            Self::rich_deal(
                1,
                "Website relaunch",
                12000.0,
                "EUR",
                DealStatus::Open,
                "Ada Lovelace",
                "Analytical Engines Ltd",
            ),
            Self::rich_deal(
                2,
                "Annual support",
                4800.0,
                "EUR",
                DealStatus::Won,
                "Grace Hopper",
                "Flowmatic GmbH",
            ),
            Self::rich_deal(
                3,
                "Hardware refresh",
                22000.0,
                "USD",
                DealStatus::Lost,
                "Ada Lovelace",
                "Analytical Engines Ltd",
            ),
            Self::rich_deal(
                4,
                "Training package",
                1500.0,
                "EUR",
                DealStatus::Open,
                "Grace Hopper",
                "Flowmatic GmbH",
            ),
        ];

        let persons = vec![
            Self::rich_person(1, "Ada Lovelace", "ada@example.com", "Analytical Engines Ltd"),
            Self::rich_person(2, "Grace Hopper", "grace@example.com", "Flowmatic GmbH"),
        ];

        let organizations = vec![
            Self::organization(1, "Analytical Engines Ltd"),
            Self::organization(2, "Flowmatic GmbH"),
        ];

        let activities = vec![
            Self::activity(1, "Kickoff call", "Ada Lovelace", "Website relaunch"),
            Self::activity(2, "Contract review", "Grace Hopper", "Annual support"),
            Self::activity(3, "Follow-up", "Ada Lovelace", "Website relaunch"),
        ];

        let pipelines = vec![Self::pipeline(1, "Default")];

        let stages = vec![
            Self::stage(1, "Qualified", 1, 1),
            Self::stage(2, "Negotiation", 1, 2),
            Self::stage(3, "Closing", 1, 3),
        ];

        DefaultScenario {
            deals,
            persons,
            organizations,
            activities,
            pipelines,
            stages,
        }
    }
}

/// Data for the default test scenario.
pub struct DefaultScenario {
    pub deals: Vec<Deal>,
    pub persons: Vec<Person>,
    pub organizations: Vec<Organization>,
    pub activities: Vec<Activity>,
    pub pipelines: Vec<Pipeline>,
    pub stages: Vec<Stage>,
}
