//! Search aggregation
//!
//! Combines locally administered books with external provider results into
//! one ordered, de-duplicated list.

use std::collections::HashSet;

use super::client::SearchProvider;
use super::types::SearchResultItem;
use crate::error::ApiError;
use crate::store::BookStore;

/// Run an aggregated catalog search.
///
/// Local title matches come first, in store order; external results follow
/// in provider order. An external result is dropped when its content-hash
/// identifier collides with a local record's id. A provider failure aborts
/// the whole search; it does not degrade to local-only results.
pub async fn aggregate_search<B, P>(
    books: &B,
    provider: &P,
    query: &str,
) -> Result<Vec<SearchResultItem>, ApiError>
where
    B: BookStore + ?Sized,
    P: SearchProvider + ?Sized,
{
    let local = books.find_by_title_containing(query)?;
    let local_ids: HashSet<&str> = local.iter().map(|b| b.id.as_str()).collect();

    let mut results: Vec<SearchResultItem> =
        local.iter().map(SearchResultItem::from_local).collect();

    let external = provider.search(query).await?;
    results.extend(
        external
            .into_iter()
            .filter(|book| !local_ids.contains(book.md5.as_str()))
            .map(SearchResultItem::from_external),
    );

    Ok(results)
}
