// src/search/mod.rs
//! The public job search engine: filter composition, keyset pagination,
//! one-shot profile-boost relaxation, result assembly.

pub mod assembler;
pub mod criteria;
pub mod cursor;
pub mod executor;
pub mod filter;

pub use assembler::SearchOutcome;
pub use criteria::{RawSearchParams, SearchCriteria};

use tracing::info;

use crate::errors::SearchError;
use crate::store::{EmployerDirectory, ListingsStore};

/// Run one search request end to end.
///
/// The profile role boost is a soft preference: when it was attached, the
/// caller typed no free-text query, no cursor was supplied, and the strict
/// attempt came back empty, the engine retries exactly once without the
/// boost. An empty relaxed result is a final "no jobs" answer.
pub async fn execute_search<S, E>(
    store: &S,
    employers: &E,
    params: &RawSearchParams,
) -> Result<SearchOutcome, SearchError>
where
    S: ListingsStore,
    E: EmployerDirectory,
{
    let strict = SearchCriteria::from_params(params);
    let rows = executor::fetch_page(store, &strict).await?;

    let relax = rows.is_empty()
        && strict.has_role_boost()
        && strict.text.is_none()
        && strict.cursor.is_none();

    if relax {
        info!("Strict search returned no rows on first page, retrying without role boost");
        let relaxed = strict.without_role_boost();
        let relaxed_rows = executor::fetch_page(store, &relaxed).await?;
        return Ok(assembler::assemble(employers, &relaxed, relaxed_rows, true).await);
    }

    Ok(assembler::assemble(employers, &strict, rows, false).await)
}
