//! E2E tests using the mock Pipedrive server.
//!
//! These tests exercise full workflows against the mock server,
//! testing realistic scenarios rather than individual endpoints.

#![cfg(feature = "test-server")]

use pipeview::explorer::{self, Endpoint};
use pipeview::mock_server::{Fixtures, MockServer, MockState};
use pipeview::{
    get_deals_timeline, get_pipelines, get_stages, Create, Deal, DealCreateParams,
    DealListQuery, DealStatus, DealStatusFilter, DealSummary, DealUpdateParams, Get, List,
    Person, PersonCreateParams, PipedriveClient, PipedriveError, Search, TimelineQuery, Update,
};

// =============================================================================
// Server Lifecycle Tests
// =============================================================================

#[tokio::test]
async fn test_server_starts_on_random_port() {
    let server1 = MockServer::start().await;
    let server2 = MockServer::start().await;

    // Both servers should have different URLs
    assert_ne!(server1.url(), server2.url());

    server1.shutdown().await;
    server2.shutdown().await;
}

#[tokio::test]
async fn test_server_shutdown_is_clean() {
    let server = MockServer::start().await;
    let url = server.url().to_string();

    server.shutdown().await;

    // After shutdown, server should not respond
    let client = reqwest::Client::new();
    let result = client.get(format!("{}/health", url)).send().await;

    assert!(result.is_err());
}

// =============================================================================
// Deal Workflow Tests
// =============================================================================

#[tokio::test]
async fn test_list_and_get_deal_workflow() {
    let server = MockServer::start().await;
    let client = PipedriveClient::new("test-token", server.url()).unwrap();

    // Step 1: List one page of deals
    let page = Deal::list_page(&client, &DealListQuery::default(), 0, 20)
        .await
        .expect("Failed to list deals");

    assert!(!page.items.is_empty(), "Expected at least one deal");

    // Step 2: Get the first deal by its ID
    let first_deal = &page.items[0];
    let deal = Deal::get(&client, first_deal.id)
        .await
        .expect("Failed to get deal");

    assert_eq!(deal.id, first_deal.id);
    assert_eq!(deal.title, first_deal.title);

    server.shutdown().await;
}

#[tokio::test]
async fn test_status_filter_is_applied_upstream() {
    let server = MockServer::start().await;
    let client = PipedriveClient::new("test-token", server.url()).unwrap();

    let query = DealListQuery {
        status: Some(DealStatusFilter::Won),
        sort: None,
    };
    let page = Deal::list_page(&client, &query, 0, 20)
        .await
        .expect("Failed to list deals");

    assert!(!page.items.is_empty());
    assert!(page.items.iter().all(|d| d.status == DealStatus::Won));

    // The default filter excludes deleted deals
    let all = Deal::list_page(&client, &DealListQuery::default(), 0, 20)
        .await
        .expect("Failed to list deals");
    assert!(all.items.iter().all(|d| d.status != DealStatus::Deleted));

    server.shutdown().await;
}

#[tokio::test]
async fn test_create_and_update_deal_workflow() {
    let server = MockServer::start().await;
    let client = PipedriveClient::new("test-token", server.url()).unwrap();

    // Step 1: Create a deal
    let created = Deal::create(
        &client,
        DealCreateParams {
            title: "Expansion deal".to_string(),
            value: Some(7500.0),
            currency: Some("EUR".to_string()),
            ..Default::default()
        },
    )
    .await
    .expect("Failed to create deal");

    assert_eq!(created.title, "Expansion deal");
    assert_eq!(created.status, DealStatus::Open);

    // Step 2: Mark it won
    let updated = Deal::update(
        &client,
        created.id,
        DealUpdateParams {
            status: Some(DealStatus::Won),
            ..Default::default()
        },
    )
    .await
    .expect("Failed to update deal");

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.status, DealStatus::Won);

    // Step 3: The change is visible on a fresh fetch
    let fetched = Deal::get(&client, created.id)
        .await
        .expect("Failed to get deal");
    assert_eq!(fetched.status, DealStatus::Won);

    server.shutdown().await;
}

#[tokio::test]
async fn test_get_missing_deal_is_not_found() {
    let server = MockServer::start().await;
    let client = PipedriveClient::new("test-token", server.url()).unwrap();

    let err = Deal::get(&client, 9999).await.unwrap_err();

    assert!(matches!(
        err,
        PipedriveError::ApiError {
            status_code: Some(404),
            ..
        }
    ));

    server.shutdown().await;
}

// =============================================================================
// Pagination Tests
// =============================================================================

/// State with enough deals to force the loops across several pages.
fn large_state(count: u64) -> MockState {
    let mut state = MockState::new();
    for id in 1..=count {
        state = state.with_deal(Fixtures::minimal_deal(id, &format!("Deal {id}")));
    }
    state
}

#[tokio::test]
async fn test_page_by_page_follows_more_flag() {
    let server = MockServer::with_state(large_state(5)).await;
    let client = PipedriveClient::new("test-token", server.url()).unwrap();

    let mut start = 0;
    let mut fetched = Vec::new();

    loop {
        let page = Deal::list_page(&client, &DealListQuery::default(), start, 2)
            .await
            .expect("Failed to list deals");
        let more = page.more;
        start = page.next_start();
        fetched.extend(page.items);

        if !more {
            break;
        }
    }

    assert_eq!(fetched.len(), 5);
    assert_eq!(fetched[0].id, 1);
    assert_eq!(fetched[4].id, 5);

    server.shutdown().await;
}

#[tokio::test]
async fn test_list_all_crosses_page_boundary() {
    // More deals than one max-size page
    let server = MockServer::with_state(large_state(130)).await;
    let client = PipedriveClient::new("test-token", server.url()).unwrap();

    let deals = Deal::list_all(&client, &DealListQuery::default())
        .await
        .expect("Failed to list all deals");

    assert_eq!(deals.len(), 130);

    server.shutdown().await;
}

#[tokio::test]
async fn test_collect_all_against_healthy_upstream() {
    let server = MockServer::with_state(large_state(130)).await;
    let client = PipedriveClient::new("test-token", server.url()).unwrap();

    let collected = Deal::collect_all(&client, &DealListQuery::default()).await;

    assert_eq!(collected.len(), 130);
    assert_eq!(collected.requests, 2);
    assert!(collected.is_complete());

    server.shutdown().await;
}

// =============================================================================
// Search Tests
// =============================================================================

#[tokio::test]
async fn test_search_deals_and_persons() {
    let server = MockServer::start().await;
    let client = PipedriveClient::new("test-token", server.url()).unwrap();

    let hits = Deal::search(&client, "website")
        .await
        .expect("Failed to search deals");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].title, "Website relaunch");

    let hits = Person::search(&client, "lovelace")
        .await
        .expect("Failed to search persons");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].name, "Ada Lovelace");

    // No match comes back empty, not as an error
    let hits = Deal::search(&client, "no such deal")
        .await
        .expect("Failed to search deals");
    assert!(hits.is_empty());

    server.shutdown().await;
}

// =============================================================================
// Relation Tests
// =============================================================================

#[tokio::test]
async fn test_deal_relations() {
    let server = MockServer::start().await;
    let client = PipedriveClient::new("test-token", server.url()).unwrap();

    let deal = Deal::get(&client, 1).await.expect("Failed to get deal");

    let activities = deal
        .activities(&client)
        .await
        .expect("Failed to get activities");
    assert_eq!(activities.len(), 2);

    let persons = deal.persons(&client).await.expect("Failed to get persons");
    assert_eq!(persons.len(), 1);
    assert_eq!(persons[0].name, "Ada Lovelace");

    server.shutdown().await;
}

#[tokio::test]
async fn test_person_and_org_relations() {
    let server = MockServer::start().await;
    let client = PipedriveClient::new("test-token", server.url()).unwrap();

    let person = Person::get(&client, 1).await.expect("Failed to get person");
    let deals = person.deals(&client).await.expect("Failed to get deals");
    assert_eq!(deals.len(), 2);

    let org = pipeview::Organization::get(&client, 2)
        .await
        .expect("Failed to get organization");
    let members = org.persons(&client).await.expect("Failed to get persons");
    assert_eq!(members.len(), 1);
    assert_eq!(members[0].name, "Grace Hopper");

    server.shutdown().await;
}

// =============================================================================
// Account Configuration Tests
// =============================================================================

#[tokio::test]
async fn test_pipelines_and_stages() {
    let server = MockServer::start().await;
    let client = PipedriveClient::new("test-token", server.url()).unwrap();

    let pipelines = get_pipelines(&client).await.expect("Failed to get pipelines");
    assert_eq!(pipelines.len(), 1);
    assert_eq!(pipelines[0].name, "Default");

    // Global stage listing
    let stages = get_stages(&client, None).await.expect("Failed to get stages");
    assert_eq!(stages.len(), 3);

    // Scoped to one pipeline
    let scoped = get_stages(&client, Some(pipelines[0].id))
        .await
        .expect("Failed to get stages");
    assert_eq!(scoped.len(), 3);
    assert!(scoped.iter().all(|s| s.pipeline_id == Some(1)));

    server.shutdown().await;
}

#[tokio::test]
async fn test_deals_timeline() {
    let server = MockServer::start().await;
    let client = PipedriveClient::new("test-token", server.url()).unwrap();

    let value = get_deals_timeline(&client, &TimelineQuery::default())
        .await
        .expect("Failed to get timeline");

    assert_eq!(value["success"], true);
    assert!(value["data"].is_array());

    server.shutdown().await;
}

// =============================================================================
// Explorer Tests
// =============================================================================

#[tokio::test]
async fn test_explore_main_and_relation_endpoints() {
    let server = MockServer::start().await;
    let client = PipedriveClient::new("test-token", server.url()).unwrap();

    let value = explorer::explore(&client, Endpoint::Deals, None)
        .await
        .expect("Failed to explore deals");
    assert_eq!(value["success"], true);

    let value = explorer::explore(&client, Endpoint::DealActivities, Some(1))
        .await
        .expect("Failed to explore deal activities");
    assert_eq!(value["data"].as_array().map(|a| a.len()), Some(2));

    server.shutdown().await;
}

#[tokio::test]
async fn test_explore_relation_without_id_fails_before_request() {
    let server = MockServer::start().await;
    let client = PipedriveClient::new("test-token", server.url()).unwrap();

    let err = explorer::explore(&client, Endpoint::PersonDeals, None)
        .await
        .unwrap_err();

    assert!(matches!(err, PipedriveError::InvalidRequest(_)));

    server.shutdown().await;
}

// =============================================================================
// Dashboard Workflow Tests
// =============================================================================

#[tokio::test]
async fn test_collect_and_summarize_workflow() {
    let server = MockServer::start().await;
    let client = PipedriveClient::new("test-token", server.url()).unwrap();

    // The dashboard path: collect everything, then aggregate in memory
    let collected = Deal::collect_all(&client, &DealListQuery::default()).await;
    assert!(collected.is_complete());

    let summary = DealSummary::from_deals(&collected.items);
    assert_eq!(summary.total, 4);
    assert_eq!(summary.open, 2);
    assert_eq!(summary.won, 1);
    assert_eq!(summary.lost, 1);
    assert_eq!(summary.value_by_currency["EUR"], 18300.0);
    assert_eq!(summary.value_by_currency["USD"], 22000.0);

    server.shutdown().await;
}

#[tokio::test]
async fn test_state_mutation_is_visible_to_client() {
    let server = MockServer::start_empty().await;
    let client = PipedriveClient::new("test-token", server.url()).unwrap();

    // Nothing there yet
    let page = Deal::list_page(&client, &DealListQuery::default(), 0, 10)
        .await
        .expect("Failed to list deals");
    assert!(page.is_empty());

    // Add a deal behind the server's back
    {
        let state = server.state();
        let mut state = state.write().await;
        state.deals.insert(1, Fixtures::minimal_deal(1, "Injected"));
    }

    let page = Deal::list_page(&client, &DealListQuery::default(), 0, 10)
        .await
        .expect("Failed to list deals");
    assert_eq!(page.len(), 1);
    assert_eq!(page.items[0].title, "Injected");

    server.shutdown().await;
}

#[tokio::test]
async fn test_create_person_workflow() {
    let server = MockServer::start_empty().await;
    let client = PipedriveClient::new("test-token", server.url()).unwrap();

    let person = Person::create(
        &client,
        PersonCreateParams {
            name: "Margaret Hamilton".to_string(),
            email: Some("margaret@example.com".to_string()),
            phone: None,
        },
    )
    .await
    .expect("Failed to create person");

    assert_eq!(person.primary_email(), Some("margaret@example.com"));

    let fetched = Person::get(&client, person.id)
        .await
        .expect("Failed to get person");
    assert_eq!(fetched.name, "Margaret Hamilton");

    server.shutdown().await;
}
