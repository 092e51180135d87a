//! Deal endpoint handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use tokio::sync::RwLock;

use super::{collection_envelope, item_envelope, not_found, plain_envelope};
use crate::mock_server::state::MockState;
use crate::models::DealStatus;

/// Query parameters for listing deals.
#[derive(Debug, Default, Deserialize)]
pub struct ListDealsQuery {
    pub start: Option<u32>,
    pub limit: Option<u32>,
    pub status: Option<String>,
    #[allow(dead_code)] // Accepted but the mock serves ID order
    pub sort: Option<String>,
}

/// Query parameters for searching deals.
#[derive(Debug, Deserialize)]
pub struct SearchDealsQuery {
    pub term: String,
}

/// Body for creating a deal.
#[derive(Debug, Deserialize)]
pub struct CreateDealBody {
    pub title: String,
    pub value: Option<f64>,
    pub currency: Option<String>,
}

/// Body for updating a deal.
#[derive(Debug, Deserialize)]
pub struct UpdateDealBody {
    pub title: Option<String>,
    pub value: Option<f64>,
    pub status: Option<DealStatus>,
}

/// GET /deals
pub async fn list_deals(
    State(state): State<Arc<RwLock<MockState>>>,
    Query(query): Query<ListDealsQuery>,
) -> impl IntoResponse {
    let state = state.read().await;

    let start = query.start.unwrap_or(0);
    let limit = query.limit.unwrap_or(100);
    let deals = state.list_deals(query.status.as_deref());

    collection_envelope(&deals, start, limit)
}

/// GET /deals/{id}
pub async fn get_deal(
    State(state): State<Arc<RwLock<MockState>>>,
    Path(id): Path<u64>,
) -> impl IntoResponse {
    let state = state.read().await;

    match state.get_deal(id) {
        Some(deal) => item_envelope(deal).into_response(),
        None => not_found("deal", id).into_response(),
    }
}

/// GET /deals/search
pub async fn search_deals(
    State(state): State<Arc<RwLock<MockState>>>,
    Query(query): Query<SearchDealsQuery>,
) -> impl IntoResponse {
    let state = state.read().await;
    plain_envelope(&state.search_deals(&query.term))
}

/// GET /deals/timeline
pub async fn deals_timeline(
    State(state): State<Arc<RwLock<MockState>>>,
) -> impl IntoResponse {
    let state = state.read().await;

    // A skeletal report: deal count grouped into one period
    let deals = state.list_deals(None);
    Json(serde_json::json!({
        "success": true,
        "data": [{
            "period_start": "2024-01-01",
            "period_end": "2024-12-31",
            "deals_count": deals.len(),
        }]
    }))
}

/// POST /deals
pub async fn create_deal(
    State(state): State<Arc<RwLock<MockState>>>,
    Json(body): Json<CreateDealBody>,
) -> impl IntoResponse {
    let mut state = state.write().await;

    let deal = state.create_deal(body.title, body.value, body.currency);
    item_envelope(deal)
}

/// PUT /deals/{id}
pub async fn update_deal(
    State(state): State<Arc<RwLock<MockState>>>,
    Path(id): Path<u64>,
    Json(body): Json<UpdateDealBody>,
) -> impl IntoResponse {
    let mut state = state.write().await;

    match state.update_deal(id, body.title, body.value, body.status) {
        Some(deal) => item_envelope(deal).into_response(),
        None => not_found("deal", id).into_response(),
    }
}

/// GET /deals/{id}/activities
pub async fn deal_activities(
    State(state): State<Arc<RwLock<MockState>>>,
    Path(id): Path<u64>,
) -> impl IntoResponse {
    let state = state.read().await;
    plain_envelope(&state.deal_activities(id))
}

/// GET /deals/{id}/persons
pub async fn deal_persons(
    State(state): State<Arc<RwLock<MockState>>>,
    Path(id): Path<u64>,
) -> impl IntoResponse {
    let state = state.read().await;
    plain_envelope(&state.deal_persons(id))
}
