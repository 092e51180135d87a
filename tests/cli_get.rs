//! Execution tests for single-entity fetches.
//!
//! Uses wiremock to mock the upstream API and test actual execution flow.

use pipeview::{Deal, Get, Person, PipedriveClient, PipedriveError};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_get_deal_unwraps_envelope() {
    let mock_server = MockServer::start().await;

    let body = serde_json::json!({
        "success": true,
        "data": {
            "id": 42,
            "title": "Test Deal",
            "value": 1000.0,
            "currency": "EUR",
            "status": "open"
        }
    });

    Mock::given(method("GET"))
        .and(path("/deals/42"))
        .and(query_param("api_token", "test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = PipedriveClient::new("test-token", &mock_server.uri()).unwrap();
    let deal = Deal::get(&client, 42).await.unwrap();

    assert_eq!(deal.id, 42);
    assert_eq!(deal.title, "Test Deal");
    assert!(deal.is_open());
}

#[tokio::test]
async fn test_get_deal_null_data_is_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/deals/7"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "success": true, "data": null })),
        )
        .mount(&mock_server)
        .await;

    let client = PipedriveClient::new("test-token", &mock_server.uri()).unwrap();
    let result = Deal::get(&client, 7).await;

    assert!(matches!(
        result,
        Err(PipedriveError::NotFound {
            entity_type: "deal",
            ..
        })
    ));
}

#[tokio::test]
async fn test_get_deal_http_error_carries_upstream_message() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/deals/9"))
        .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
            "success": false,
            "error": "Deal not found",
            "error_info": "Check the ID"
        })))
        .mount(&mock_server)
        .await;

    let client = PipedriveClient::new("test-token", &mock_server.uri()).unwrap();
    let err = Deal::get(&client, 9).await.unwrap_err();

    match err {
        PipedriveError::ApiError {
            message,
            status_code,
        } => {
            assert!(message.contains("Deal not found"));
            assert!(message.contains("Check the ID"));
            assert_eq!(status_code, Some(404));
        }
        other => panic!("Expected ApiError, got {other:?}"),
    }
}

#[tokio::test]
async fn test_get_person_contact_helpers() {
    let mock_server = MockServer::start().await;

    let body = serde_json::json!({
        "success": true,
        "data": {
            "id": 3,
            "name": "Ada Lovelace",
            "email": [
                { "value": "backup@example.com", "primary": false },
                { "value": "ada@example.com", "primary": true }
            ],
            "phone": [{ "value": "+44 20 5550 100", "primary": true }],
            "org_name": "Analytical Engines Ltd"
        }
    });

    Mock::given(method("GET"))
        .and(path("/persons/3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&mock_server)
        .await;

    let client = PipedriveClient::new("test-token", &mock_server.uri()).unwrap();
    let person = Person::get(&client, 3).await.unwrap();

    assert_eq!(person.primary_email(), Some("ada@example.com"));
    assert_eq!(person.primary_phone(), Some("+44 20 5550 100"));
    assert_eq!(person.org_name.as_deref(), Some("Analytical Engines Ltd"));
}

#[tokio::test]
async fn test_rate_limit_is_typed() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/deals/1"))
        .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "30"))
        .mount(&mock_server)
        .await;

    let client = PipedriveClient::new("test-token", &mock_server.uri()).unwrap();
    let err = Deal::get(&client, 1).await.unwrap_err();

    assert!(matches!(
        err,
        PipedriveError::RateLimited {
            retry_after_secs: Some(30)
        }
    ));
}
