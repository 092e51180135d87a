//! Pagination utilities for Pipedrive API responses.
//!
//! Pipedrive wraps every response in an envelope with a `success` flag
//! and optional `additional_data.pagination` block. Collections are
//! paginated with `start`/`limit` offsets and a
//! `more_items_in_collection` flag.

use serde::{Deserialize, Serialize};

/// The Pipedrive response envelope.
///
/// `data` is `null` for empty results, so it decodes as an `Option`.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    /// Whether the upstream considered the request successful.
    #[serde(default)]
    pub success: bool,
    /// The payload. Absent or `null` when there is nothing to return.
    pub data: Option<T>,
    /// Pagination and other response metadata.
    #[serde(default)]
    pub additional_data: Option<AdditionalData>,
}

impl<T> Envelope<Vec<T>> {
    /// Decode a collection envelope into a [`Page`].
    ///
    /// `start` and `limit` are the requested values, used as a fallback
    /// when the envelope omits its pagination block.
    pub fn into_page(self, start: u32, limit: u32) -> Page<T> {
        let info = self.additional_data.and_then(|a| a.pagination);
        let more = info.map(|p| p.more_items_in_collection).unwrap_or(false);
        let (start, limit) = info.map(|p| (p.start, p.limit)).unwrap_or((start, limit));
        Page::new(self.data.unwrap_or_default(), start, limit, more)
    }
}

/// Response metadata alongside the payload.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct AdditionalData {
    /// Pagination block, present on collection endpoints.
    #[serde(default)]
    pub pagination: Option<PageInfo>,
}

/// Upstream pagination block.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PageInfo {
    /// Offset of the first item on this page.
    pub start: u32,
    /// Requested page size.
    pub limit: u32,
    /// Whether another page exists after this one.
    #[serde(default)]
    pub more_items_in_collection: bool,
}

/// A decoded page of results.
#[derive(Debug, Clone, Serialize)]
#[serde(bound = "T: Serialize")]
pub struct Page<T> {
    /// The items on this page.
    pub items: Vec<T>,
    /// Offset of the first item on this page.
    pub start: u32,
    /// Page size that was requested.
    pub limit: u32,
    /// Whether there are more items after this page.
    pub more: bool,
}

impl<T> Page<T> {
    /// Create a new page from items and pagination info.
    #[must_use]
    pub fn new(items: Vec<T>, start: u32, limit: u32, more: bool) -> Self {
        Self {
            items,
            start,
            limit,
            more,
        }
    }

    /// Offset to request for the page after this one.
    ///
    /// Advances by `limit` regardless of how many items came back,
    /// which is how the upstream expects offsets to move.
    #[must_use]
    pub fn next_start(&self) -> u32 {
        self.start + self.limit
    }

    /// Map the items to a different type.
    #[must_use]
    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            start: self.start,
            limit: self.limit,
            more: self.more,
        }
    }

    /// Returns true if this page has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the number of items on this page.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns an iterator over the items in this page.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// The pagination block to echo back to dashboard callers.
    #[must_use]
    pub fn info(&self) -> PageInfo {
        PageInfo {
            start: self.start,
            limit: self.limit,
            more_items_in_collection: self.more,
        }
    }
}

impl<T> IntoIterator for Page<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Page<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Query parameters for paginated requests.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct PageParams {
    /// Offset of the first item to return.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<u32>,
    /// Number of items per page (upstream maximum is 100).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

impl PageParams {
    /// Create pagination params for a specific offset.
    #[must_use]
    pub fn at(start: u32, limit: u32) -> Self {
        Self {
            start: Some(start),
            limit: Some(limit),
        }
    }
}

/// The outcome of a best-effort whole-collection fetch.
///
/// Aggregation loops stop on the upstream "more data" flag, a request
/// cap, or an error cap, and always hand back whatever was fetched
/// before stopping.
#[derive(Debug, Clone, Serialize)]
#[serde(bound = "T: Serialize")]
pub struct Collected<T> {
    /// Everything fetched before the loop stopped.
    pub items: Vec<T>,
    /// Number of upstream requests made.
    pub requests: u32,
    /// Number of failed requests that were tolerated.
    pub errors: u32,
}

impl<T> Collected<T> {
    /// Returns the number of collected items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if nothing was collected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether every request in the loop succeeded.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.errors == 0
    }
}
