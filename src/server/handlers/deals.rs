//! Deal proxy handlers.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use super::{lenient_status, lenient_u32, upstream_error};
use crate::client::PipedriveClient;
use crate::models::{Deal, DealListQuery, DealStatusFilter};
use crate::traits::{List, DEFAULT_PAGE_SIZE};

/// Query parameters accepted by the deal routes.
///
/// Malformed values fall back to the route defaults instead of
/// failing the request.
#[derive(Debug, Default, Deserialize)]
pub struct DealsQuery {
    #[serde(default, deserialize_with = "lenient_status")]
    pub status: Option<DealStatusFilter>,
    pub sort: Option<String>,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub start: Option<u32>,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub limit: Option<u32>,
}

impl DealsQuery {
    fn filter(&self) -> DealListQuery {
        DealListQuery {
            status: Some(self.status.unwrap_or_default()),
            sort: self.sort.clone(),
        }
    }
}

/// GET /api/deals — one page of deals.
pub async fn list_deals(
    State(client): State<PipedriveClient>,
    Query(query): Query<DealsQuery>,
) -> impl IntoResponse {
    let start = query.start.unwrap_or(0);
    let limit = query.limit.unwrap_or(50);

    match Deal::list_page(&client, &query.filter(), start, limit).await {
        Ok(page) => {
            let pagination = page.info();
            (
                StatusCode::OK,
                Json(json!({
                    "success": true,
                    "data": page.items,
                    "pagination": pagination,
                })),
            )
                .into_response()
        }
        Err(e) => upstream_error("Failed to fetch deals", &e).into_response(),
    }
}

/// GET /api/deals/all — whole collection, best effort.
///
/// Runs the tolerant pagination loop and reports how much work it took;
/// partial results come back as a success with a nonzero error count.
pub async fn all_deals(
    State(client): State<PipedriveClient>,
    Query(query): Query<DealsQuery>,
) -> impl IntoResponse {
    let collected = Deal::collect_all(&client, &query.filter()).await;

    let message = format!(
        "Loaded {} deals in {} requests",
        collected.len(),
        collected.requests
    );
    (
        StatusCode::OK,
        Json(json!({
            "success": true,
            "data": collected.items,
            "total": collected.items.len(),
            "requests": collected.requests,
            "errors": collected.errors,
            "message": message,
        })),
    )
}

/// GET /api/deals/simple — one max-size page, no loop.
pub async fn simple_deals(
    State(client): State<PipedriveClient>,
    Query(query): Query<DealsQuery>,
) -> impl IntoResponse {
    match Deal::list_page(&client, &query.filter(), 0, DEFAULT_PAGE_SIZE).await {
        Ok(page) => {
            let pagination = page.info();
            let total = page.len();
            let message = format!("Loaded {total} deals (max {DEFAULT_PAGE_SIZE} per request)");
            (
                StatusCode::OK,
                Json(json!({
                    "success": true,
                    "data": page.items,
                    "total": total,
                    "pagination": pagination,
                    "message": message,
                })),
            )
                .into_response()
        }
        Err(e) => upstream_error("Failed to fetch deals", &e).into_response(),
    }
}
