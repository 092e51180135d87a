//! Person proxy handlers.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use super::{lenient_u32, upstream_error};
use crate::client::PipedriveClient;
use crate::models::{Person, PersonListQuery};
use crate::traits::{List, DEFAULT_PAGE_SIZE};

/// Query parameters accepted by the person routes.
///
/// Malformed values fall back to the route defaults instead of
/// failing the request.
#[derive(Debug, Default, Deserialize)]
pub struct PersonsQuery {
    pub sort: Option<String>,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub start: Option<u32>,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub limit: Option<u32>,
}

/// GET /api/persons — one page of persons.
pub async fn list_persons(
    State(client): State<PipedriveClient>,
    Query(query): Query<PersonsQuery>,
) -> impl IntoResponse {
    let filter = PersonListQuery { sort: query.sort };
    let start = query.start.unwrap_or(0);
    let limit = query.limit.unwrap_or(50);

    match Person::list_page(&client, &filter, start, limit).await {
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
        Err(e) => upstream_error("Failed to fetch persons", &e).into_response(),
    }
}

/// GET /api/persons/all — one max-size page.
///
/// Persons ship as a single limit-100 page rather than the tolerant
/// loop; callers that need everything use the library's `collect_all`.
pub async fn all_persons(
    State(client): State<PipedriveClient>,
    Query(query): Query<PersonsQuery>,
) -> impl IntoResponse {
    let filter = PersonListQuery { sort: query.sort };

    match Person::list_page(&client, &filter, 0, DEFAULT_PAGE_SIZE).await {
        Ok(page) => {
            let pagination = page.info();
            let total = page.len();
            (
                StatusCode::OK,
                Json(json!({
                    "success": true,
                    "data": page.items,
                    "total": total,
                    "pagination": pagination,
                    "message": "Persons loaded (single page)",
                })),
            )
                .into_response()
        }
        Err(e) => upstream_error("Failed to fetch persons", &e).into_response(),
    }
}
