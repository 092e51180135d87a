//! Activity endpoint handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
};
use serde::Deserialize;
use tokio::sync::RwLock;

use super::{collection_envelope, item_envelope, not_found};
use crate::mock_server::state::MockState;

/// Query parameters for listing activities.
#[derive(Debug, Default, Deserialize)]
pub struct ListActivitiesQuery {
    pub start: Option<u32>,
    pub limit: Option<u32>,
    pub done: Option<u8>,
    #[serde(rename = "type")]
    pub activity_type: Option<String>,
}

/// GET /activities
pub async fn list_activities(
    State(state): State<Arc<RwLock<MockState>>>,
    Query(query): Query<ListActivitiesQuery>,
) -> impl IntoResponse {
    let state = state.read().await;

    let start = query.start.unwrap_or(0);
    let limit = query.limit.unwrap_or(100);

    let activities: Vec<_> = state
        .list_activities()
        .into_iter()
        .filter(|a| match query.done {
            Some(done) => a.done == (done == 1),
            None => true,
        })
        .filter(|a| match query.activity_type.as_deref() {
            Some(kind) => a.activity_type.as_deref() == Some(kind),
            None => true,
        })
        .collect();

    collection_envelope(&activities, start, limit)
}

/// GET /activities/{id}
pub async fn get_activity(
    State(state): State<Arc<RwLock<MockState>>>,
    Path(id): Path<u64>,
) -> impl IntoResponse {
    let state = state.read().await;

    match state.get_activity(id) {
        Some(activity) => item_envelope(activity).into_response(),
        None => not_found("activity", id).into_response(),
    }
}
