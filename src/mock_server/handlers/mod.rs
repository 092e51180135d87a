//! HTTP request handlers for the mock server.

pub mod activities;
pub mod config;
pub mod deals;
pub mod organizations;
pub mod persons;

pub use activities::*;
pub use config::*;
pub use deals::*;
pub use organizations::*;
pub use persons::*;

use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use serde_json::{json, Value};

/// Build the upstream collection envelope with `start`/`limit`
/// pagination applied over the full item list.
pub(super) fn collection_envelope<T: Serialize>(
    items: &[&T],
    start: u32,
    limit: u32,
) -> Json<Value> {
    let total = items.len();
    let from = start as usize;
    let to = from.saturating_add(limit as usize).min(total);

    let page: Vec<&T> = if from < total {
        items[from..to].to_vec()
    } else {
        vec![]
    };
    let more = to < total;

    Json(json!({
        "success": true,
        "data": page,
        "additional_data": {
            "pagination": {
                "start": start,
                "limit": limit,
                "more_items_in_collection": more
            }
        }
    }))
}

/// Build the envelope for an unpaginated collection (relations, config).
pub(super) fn plain_envelope<T: Serialize>(items: &[&T]) -> Json<Value> {
    Json(json!({ "success": true, "data": items }))
}

/// Build the envelope for a single entity.
pub(super) fn item_envelope<T: Serialize>(item: &T) -> Json<Value> {
    Json(json!({ "success": true, "data": item }))
}

/// The upstream's 404 shape.
pub(super) fn not_found(entity: &str, id: u64) -> (StatusCode, Json<Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "success": false,
            "error": format!("{entity} not found"),
            "error_info": format!("No {entity} with id {id}")
        })),
    )
}
