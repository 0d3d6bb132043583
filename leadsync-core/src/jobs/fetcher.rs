//! Page-by-page accumulation over a paginated provider search.
//!
//! The loop keeps requesting consecutive pages until it holds at least the
//! requested number of records or the provider returns an empty page, then
//! truncates to exactly the requested number. Pages are fetched one after
//! another; the provider's own page order is preserved.

use crate::error::{ProviderError, Result};
use async_trait::async_trait;
use serde_json::Value;

/// One page of raw provider records.
#[async_trait]
pub trait PageSource: Send + Sync {
    async fn fetch_page(&self, page: u32, per_page: u32) -> Result<Vec<Value>>;
}

/// Records gathered before the loop stopped, plus the error that stopped it
/// if it did not finish cleanly.
#[derive(Debug)]
pub struct PartialFetch<T> {
    pub records: Vec<T>,
    pub pages_fetched: u32,
    pub failure: Option<ProviderError>,
}

impl<T> PartialFetch<T> {
    pub fn is_complete(&self) -> bool {
        self.failure.is_none()
    }

    /// Drops the partial records if a page failed.
    pub fn into_result(self) -> Result<Vec<T>> {
        match self.failure {
            Some(err) => Err(err),
            None => Ok(self.records),
        }
    }
}

/// Fetches up to `total` records. Any page failure discards everything
/// accumulated so far and returns the error.
pub async fn fetch_paginated<S, T, F>(
    source: &S,
    start_page: u32,
    per_page: u32,
    total: usize,
    normalize: F,
) -> Result<Vec<T>>
where
    S: PageSource + ?Sized,
    F: Fn(&Value) -> T,
{
    fetch_paginated_partial(source, start_page, per_page, total, normalize)
        .await
        .into_result()
}

/// Same loop as [`fetch_paginated`], but a page failure keeps the records
/// already fetched alongside the error.
pub async fn fetch_paginated_partial<S, T, F>(
    source: &S,
    start_page: u32,
    per_page: u32,
    total: usize,
    normalize: F,
) -> PartialFetch<T>
where
    S: PageSource + ?Sized,
    F: Fn(&Value) -> T,
{
    let per_page = per_page.max(1);
    let mut page = start_page.max(1);
    let mut records: Vec<T> = Vec::new();
    let mut pages_fetched = 0u32;

    while records.len() < total {
        match source.fetch_page(page, per_page).await {
            Ok(raw) => {
                pages_fetched += 1;
                if raw.is_empty() {
                    tracing::debug!("Page {} was empty, stopping with {} records", page, records.len());
                    break;
                }
                records.extend(raw.iter().map(&normalize));
                tracing::debug!(
                    page,
                    received = raw.len(),
                    accumulated = records.len(),
                    total,
                    "Fetched page"
                );
                page = page.saturating_add(1);
            }
            Err(err) => {
                tracing::warn!("Fetching page {} failed after {} records: {}", page, records.len(), err);
                records.truncate(total);
                return PartialFetch {
                    records,
                    pages_fetched,
                    failure: Some(err),
                };
            }
        }
    }

    records.truncate(total);
    PartialFetch {
        records,
        pages_fetched,
        failure: None,
    }
}
