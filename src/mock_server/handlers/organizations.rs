//! Organization endpoint handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
};
use serde::Deserialize;
use tokio::sync::RwLock;

use super::{collection_envelope, item_envelope, not_found, plain_envelope};
use crate::mock_server::state::MockState;

/// Query parameters for listing organizations.
#[derive(Debug, Default, Deserialize)]
pub struct ListOrganizationsQuery {
    pub start: Option<u32>,
    pub limit: Option<u32>,
    #[allow(dead_code)] // Accepted but the mock serves ID order
    pub sort: Option<String>,
}

/// GET /organizations
pub async fn list_organizations(
    State(state): State<Arc<RwLock<MockState>>>,
    Query(query): Query<ListOrganizationsQuery>,
) -> impl IntoResponse {
    let state = state.read().await;

    let start = query.start.unwrap_or(0);
    let limit = query.limit.unwrap_or(100);

    collection_envelope(&state.list_organizations(), start, limit)
}

/// GET /organizations/{id}
pub async fn get_organization(
    State(state): State<Arc<RwLock<MockState>>>,
    Path(id): Path<u64>,
) -> impl IntoResponse {
    let state = state.read().await;

    match state.get_organization(id) {
        Some(org) => item_envelope(org).into_response(),
        None => not_found("organization", id).into_response(),
    }
}

/// GET /organizations/{id}/deals
pub async fn organization_deals(
    State(state): State<Arc<RwLock<MockState>>>,
    Path(id): Path<u64>,
) -> impl IntoResponse {
    let state = state.read().await;
    plain_envelope(&state.organization_deals(id))
}

/// GET /organizations/{id}/persons
pub async fn organization_persons(
    State(state): State<Arc<RwLock<MockState>>>,
    Path(id): Path<u64>,
) -> impl IntoResponse {
    let state = state.read().await;
    plain_envelope(&state.organization_persons(id))
}
