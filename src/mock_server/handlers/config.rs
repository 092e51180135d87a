//! Pipeline and stage endpoint handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    response::IntoResponse,
};
use tokio::sync::RwLock;

use super::plain_envelope;
use crate::mock_server::state::MockState;

/// GET /pipelines
pub async fn list_pipelines(
    State(state): State<Arc<RwLock<MockState>>>,
) -> impl IntoResponse {
    let state = state.read().await;
    let pipelines: Vec<_> = state.pipelines.iter().collect();
    plain_envelope(&pipelines)
}

/// GET /stages
pub async fn list_stages(State(state): State<Arc<RwLock<MockState>>>) -> impl IntoResponse {
    let state = state.read().await;
    let stages: Vec<_> = state.stages.iter().collect();
    plain_envelope(&stages)
}

/// GET /pipelines/{id}/stages
pub async fn pipeline_stages(
    State(state): State<Arc<RwLock<MockState>>>,
    Path(id): Path<u64>,
) -> impl IntoResponse {
    let state = state.read().await;
    plain_envelope(&state.pipeline_stages(id))
}
