//! Execution tests for the write operations (create, update).
//!
//! Uses wiremock to mock the upstream API and verify request bodies.

use pipeview::{
    Create, Deal, DealCreateParams, DealStatus, DealUpdateParams, Person, PersonCreateParams,
    PipedriveClient, Update,
};
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_create_deal_posts_params() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/deals"))
        .and(query_param("api_token", "test-token"))
        .and(body_partial_json(serde_json::json!({
            "title": "New contract",
            "value": 5000.0,
            "currency": "EUR"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "data": {
                "id": 90,
                "title": "New contract",
                "value": 5000.0,
                "currency": "EUR",
                "status": "open"
            }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = PipedriveClient::new("test-token", &mock_server.uri()).unwrap();
    let deal = Deal::create(
        &client,
        DealCreateParams {
            title: "New contract".to_string(),
            value: Some(5000.0),
            currency: Some("EUR".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    assert_eq!(deal.id, 90);
    assert_eq!(deal.title, "New contract");
}

#[tokio::test]
async fn test_update_deal_puts_only_set_fields() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/deals/90"))
        .and(body_partial_json(serde_json::json!({ "status": "won" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "data": {
                "id": 90,
                "title": "New contract",
                "value": 5000.0,
                "currency": "EUR",
                "status": "won"
            }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = PipedriveClient::new("test-token", &mock_server.uri()).unwrap();
    let deal = Deal::update(
        &client,
        90,
        DealUpdateParams {
            status: Some(DealStatus::Won),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    assert_eq!(deal.status, DealStatus::Won);
}

#[tokio::test]
async fn test_create_person() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/persons"))
        .and(body_partial_json(serde_json::json!({
            "name": "Grace Hopper",
            "email": "grace@example.com"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "data": {
                "id": 12,
                "name": "Grace Hopper",
                "email": [{ "value": "grace@example.com", "primary": true }]
            }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = PipedriveClient::new("test-token", &mock_server.uri()).unwrap();
    let person = Person::create(
        &client,
        PersonCreateParams {
            name: "Grace Hopper".to_string(),
            email: Some("grace@example.com".to_string()),
            phone: None,
        },
    )
    .await
    .unwrap();

    assert_eq!(person.id, 12);
    assert_eq!(person.primary_email(), Some("grace@example.com"));
}
