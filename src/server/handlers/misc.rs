//! Search, exploration, and operational proxy handlers.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use super::{bad_request, lenient_u64, upstream_error};
use crate::client::PipedriveClient;
use crate::error::PipedriveError;
use crate::explorer::{self, Endpoint};
use crate::models::{Deal, DealListQuery, Person, PersonListQuery};
use crate::traits::{List, Search as _, DEFAULT_PAGE_SIZE};

/// Query parameters for the search route.
#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    pub term: Option<String>,
    /// "deals" (default) or "persons".
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

/// GET /api/search — term search over deals or persons.
pub async fn search(
    State(client): State<PipedriveClient>,
    Query(query): Query<SearchQuery>,
) -> impl IntoResponse {
    let term = match query.term.as_deref() {
        Some(t) if !t.trim().is_empty() => t.to_string(),
        _ => return bad_request("Search term is required").into_response(),
    };
    let kind = query.kind.unwrap_or_else(|| "deals".to_string());

    let data = match kind.as_str() {
        "persons" => Person::search(&client, &term)
            .await
            .map(|hits| serde_json::to_value(hits).unwrap_or(Value::Null)),
        _ => Deal::search(&client, &term)
            .await
            .map(|hits| serde_json::to_value(hits).unwrap_or(Value::Null)),
    };

    match data {
        Ok(data) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "data": data,
                "term": term,
                "type": kind,
            })),
        )
            .into_response(),
        Err(e) => upstream_error("Search failed", &e).into_response(),
    }
}

/// Query parameters for the explore route.
#[derive(Debug, Default, Deserialize)]
pub struct ExploreQuery {
    pub endpoint: Option<String>,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub id: Option<u64>,
}

/// GET /api/explore — raw passthrough for the endpoint catalog.
pub async fn explore(
    State(client): State<PipedriveClient>,
    Query(query): Query<ExploreQuery>,
) -> impl IntoResponse {
    let endpoint = match query.endpoint.as_deref().and_then(Endpoint::from_key) {
        Some(e) => e,
        None => return bad_request("Invalid endpoint").into_response(),
    };

    match explorer::explore(&client, endpoint, query.id).await {
        Ok(value) => (StatusCode::OK, Json(value)).into_response(),
        Err(PipedriveError::InvalidRequest(msg)) => bad_request(&msg).into_response(),
        Err(e) => upstream_error("Exploration failed", &e).into_response(),
    }
}

/// GET /api/status — upstream connectivity probe.
///
/// Issues one limit-1 deals request and reports what came back.
pub async fn status(State(client): State<PipedriveClient>) -> impl IntoResponse {
    match Deal::list_page(&client, &DealListQuery::default(), 0, 1).await {
        Ok(page) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "message": "API connection successful",
                "deals_count": page.len(),
                "has_pagination": true,
                "pagination": page.info(),
            })),
        )
            .into_response(),
        Err(e) => upstream_error("Failed to connect to Pipedrive API", &e).into_response(),
    }
}

/// POST /api/webhook — receive an upstream event.
///
/// The upstream expects a fast acknowledgment; the payload is logged
/// and nothing else happens to it.
pub async fn webhook(Json(payload): Json<Value>) -> impl IntoResponse {
    tracing::info!(event = %payload, "webhook received");
    (StatusCode::OK, Json(json!({ "received": true })))
}

/// POST /api/sync — pull first pages of deals and persons, report counts.
pub async fn sync(State(client): State<PipedriveClient>) -> impl IntoResponse {
    let deals = Deal::list_page(&client, &DealListQuery::default(), 0, DEFAULT_PAGE_SIZE).await;
    let persons =
        Person::list_page(&client, &PersonListQuery::default(), 0, DEFAULT_PAGE_SIZE).await;

    match (deals, persons) {
        (Ok(deals), Ok(persons)) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "synced": {
                    "deals": deals.len(),
                    "persons": persons.len(),
                },
            })),
        )
            .into_response(),
        (Err(e), _) | (_, Err(e)) => upstream_error("Sync failed", &e).into_response(),
    }
}
