//! Dashboard proxy endpoint handlers.

mod deals;
mod misc;
mod persons;

pub use deals::{all_deals, list_deals, simple_deals};
pub use misc::{explore, search, status, sync, webhook};
pub use persons::{all_persons, list_persons};

use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Deserializer};
use serde_json::{json, Value};

use crate::error::PipedriveError;
use crate::models::DealStatusFilter;

/// Parse an optional numeric query value, treating malformed input as
/// absent. The original dashboard routes parse with fallback rather
/// than rejecting the request.
pub(super) fn lenient_u32<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(|s| s.parse().ok()))
}

/// Like [`lenient_u32`] for 64-bit IDs.
pub(super) fn lenient_u64<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(|s| s.parse().ok()))
}

/// Parse an optional status filter, treating unknown values as absent
/// so the route falls back to its default filter.
pub(super) fn lenient_status<'de, D>(
    deserializer: D,
) -> Result<Option<DealStatusFilter>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(|s| match s.as_str() {
        "open" => Some(DealStatusFilter::Open),
        "won" => Some(DealStatusFilter::Won),
        "lost" => Some(DealStatusFilter::Lost),
        "deleted" => Some(DealStatusFilter::Deleted),
        "all_not_deleted" => Some(DealStatusFilter::AllNotDeleted),
        _ => None,
    }))
}

/// Map an upstream failure to the dashboard's 500 payload.
pub(super) fn upstream_error(context: &str, err: &PipedriveError) -> (StatusCode, Json<Value>) {
    tracing::error!(error = %err, "{context}");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({
            "success": false,
            "error": context,
            "details": err.to_string(),
        })),
    )
}

/// A 400 with the dashboard's error shape.
pub(super) fn bad_request(message: &str) -> (StatusCode, Json<Value>) {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({ "error": message })),
    )
}
