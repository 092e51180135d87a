//! Person endpoint handlers.

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

/// Query parameters for listing persons.
#[derive(Debug, Default, Deserialize)]
pub struct ListPersonsQuery {
    pub start: Option<u32>,
    pub limit: Option<u32>,
    #[allow(dead_code)] // Accepted but the mock serves ID order
    pub sort: Option<String>,
}

/// Query parameters for searching persons.
#[derive(Debug, Deserialize)]
pub struct SearchPersonsQuery {
    pub term: String,
}

/// Body for creating a person.
#[derive(Debug, Deserialize)]
pub struct CreatePersonBody {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// GET /persons
pub async fn list_persons(
    State(state): State<Arc<RwLock<MockState>>>,
    Query(query): Query<ListPersonsQuery>,
) -> impl IntoResponse {
    let state = state.read().await;

    let start = query.start.unwrap_or(0);
    let limit = query.limit.unwrap_or(100);

    collection_envelope(&state.list_persons(), start, limit)
}

/// GET /persons/{id}
pub async fn get_person(
    State(state): State<Arc<RwLock<MockState>>>,
    Path(id): Path<u64>,
) -> impl IntoResponse {
    let state = state.read().await;

    match state.get_person(id) {
        Some(person) => item_envelope(person).into_response(),
        None => not_found("person", id).into_response(),
    }
}

/// GET /persons/search
pub async fn search_persons(
    State(state): State<Arc<RwLock<MockState>>>,
    Query(query): Query<SearchPersonsQuery>,
) -> impl IntoResponse {
    let state = state.read().await;
    plain_envelope(&state.search_persons(&query.term))
}

/// POST /persons
pub async fn create_person(
    State(state): State<Arc<RwLock<MockState>>>,
    Json(body): Json<CreatePersonBody>,
) -> impl IntoResponse {
    let mut state = state.write().await;

    let person = state.create_person(body.name, body.email, body.phone);
    item_envelope(person)
}

/// GET /persons/{id}/deals
pub async fn person_deals(
    State(state): State<Arc<RwLock<MockState>>>,
    Path(id): Path<u64>,
) -> impl IntoResponse {
    let state = state.read().await;
    plain_envelope(&state.person_deals(id))
}

/// GET /persons/{id}/activities
pub async fn person_activities(
    State(state): State<Arc<RwLock<MockState>>>,
    Path(id): Path<u64>,
) -> impl IntoResponse {
    let state = state.read().await;
    plain_envelope(&state.person_activities(id))
}
