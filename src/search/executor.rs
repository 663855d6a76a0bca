// src/search/executor.rs
use chrono::{DateTime, Utc};

use crate::errors::SearchError;
use crate::store::{ListingRecord, ListingScan, ListingsStore, PageBound};

use super::criteria::SearchCriteria;
use super::cursor::CursorKey;
use super::filter::build_predicates;

/// Issue the single range scan for one attempt.
///
/// Asks for `page_size + 1` rows so the caller can tell whether another
/// page exists without a second round trip. No retries here; store failure
/// surfaces as [`SearchError::StoreUnavailable`].
pub async fn fetch_page<S: ListingsStore>(
    store: &S,
    criteria: &SearchCriteria,
) -> Result<Vec<ListingRecord>, SearchError> {
    let scan = ListingScan {
        groups: build_predicates(criteria),
        before: criteria.cursor.as_ref().and_then(page_bound),
        limit: criteria.page_size + 1,
    };
    store.scan(&scan).await
}

/// A cursor key whose timestamp does not parse is treated as absent, the
/// same policy the codec applies to undecodable tokens.
fn page_bound(key: &CursorKey) -> Option<PageBound> {
    let created_at = DateTime::parse_from_rfc3339(&key.created_at)
        .ok()?
        .with_timezone(&Utc);
    Some(PageBound {
        created_at,
        id: key.id.clone(),
    })
}
