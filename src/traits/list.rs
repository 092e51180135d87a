//! List trait for fetching collections of entities.

use std::time::Duration;

use async_trait::async_trait;

use crate::client::PipedriveClient;
use crate::error::Result;
use crate::pagination::{Collected, Page};

/// Default page size for list operations (the upstream per-request maximum).
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// Maximum pages the strict loop will fetch (safety limit).
const MAX_REQUESTS: u32 = 50;

/// Request cap for the best-effort loop.
const COLLECT_MAX_REQUESTS: u32 = 10;

/// Error cap for the best-effort loop.
const COLLECT_MAX_ERRORS: u32 = 3;

/// Pause between page fetches so the upstream is not hammered.
const PAGE_DELAY: Duration = Duration::from_millis(100);

/// List/filter entities with pagination support.
///
/// Implement this trait for entity types that can be listed with
/// optional filtering and `start`/`limit` pagination.
///
/// # Example
///
/// ```ignore
/// use pipeview::{PipedriveClient, Deal, List};
///
/// let client = PipedriveClient::from_env()?;
///
/// // Fetch a single page
/// let page = Deal::list_page(&client, &Default::default(), 0, 50).await?;
///
/// // Fetch everything, failing on the first error
/// let all_deals = Deal::list_all(&client, &Default::default()).await?;
///
/// // Fetch everything, keeping whatever succeeds
/// let collected = Deal::collect_all(&client, &Default::default()).await;
/// println!("{} deals in {} requests", collected.len(), collected.requests);
/// ```
#[async_trait]
pub trait List: Sized + Send {
    /// Query parameters for filtering.
    type Query: Default + Send + Sync;

    /// List entities matching the query (single page).
    ///
    /// # Arguments
    ///
    /// * `client` - The Pipedrive API client
    /// * `query` - Query parameters for filtering
    /// * `start` - Offset of the first item to return
    /// * `limit` - Number of items per page (max 100)
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    async fn list_page(
        client: &PipedriveClient,
        query: &Self::Query,
        start: u32,
        limit: u32,
    ) -> Result<Page<Self>>;

    /// List all entities matching the query (fetches all pages).
    ///
    /// Pages are fetched until the upstream reports no more items.
    /// The first failed request aborts the whole fetch.
    ///
    /// # Errors
    ///
    /// Returns an error if any page request fails.
    async fn list_all(client: &PipedriveClient, query: &Self::Query) -> Result<Vec<Self>> {
        let mut all_items = Vec::new();
        let mut start = 0;
        let mut requests = 0;

        loop {
            let page = Self::list_page(client, query, start, DEFAULT_PAGE_SIZE).await?;
            let more = page.more;
            start = page.next_start();
            all_items.extend(page.items);
            requests += 1;

            if !more {
                break;
            }

            // Safety limit to prevent infinite loops
            if requests >= MAX_REQUESTS {
                tracing::warn!(
                    "Reached pagination limit of {} requests, stopping",
                    MAX_REQUESTS
                );
                break;
            }

            tokio::time::sleep(PAGE_DELAY).await;
        }

        Ok(all_items)
    }

    /// Fetch the whole collection, tolerating partial failure.
    ///
    /// The loop stops when the upstream reports no more items, after
    /// 10 successful requests, or after 3 failed ones. A failed page
    /// is retried at the same offset. Whatever was fetched before
    /// stopping is always returned.
    async fn collect_all(client: &PipedriveClient, query: &Self::Query) -> Collected<Self> {
        let mut items = Vec::new();
        let mut start = 0;
        let mut requests = 0;
        let mut errors = 0;
        let mut more = true;

        while more && requests < COLLECT_MAX_REQUESTS && errors < COLLECT_MAX_ERRORS {
            match Self::list_page(client, query, start, DEFAULT_PAGE_SIZE).await {
                Ok(page) => {
                    tracing::debug!(start, fetched = page.len(), "fetched page");
                    more = page.more;
                    start = page.next_start();
                    items.extend(page.items);
                    requests += 1;

                    if more {
                        tokio::time::sleep(PAGE_DELAY).await;
                    }
                }
                Err(e) => {
                    errors += 1;
                    tracing::warn!(start, error = %e, "page fetch failed, retrying");
                }
            }
        }

        Collected {
            items,
            requests,
            errors,
        }
    }
}
