// src/search/assembler.rs
use std::collections::HashMap;

use tracing::warn;

use crate::store::{EmployerDirectory, EmployerLite, ListingRecord};

use super::criteria::SearchCriteria;
use super::cursor::{self, CursorKey};

/// The assembled page handed back to the caller.
#[derive(Debug)]
pub struct SearchOutcome {
    pub jobs: Vec<ListingRecord>,
    pub clients_by_id: HashMap<String, EmployerLite>,
    pub next_cursor: Option<String>,
    pub used_profile_fallback: bool,
}

/// Turn the chosen attempt's raw rows into a page.
///
/// The `page_size + 1`-th row, when present, only signals that another page
/// exists; it is never returned. Employer resolution is best-effort: a
/// failed lookup degrades to an empty map rather than failing the request.
pub async fn assemble<E: EmployerDirectory>(
    employers: &E,
    criteria: &SearchCriteria,
    mut rows: Vec<ListingRecord>,
    used_profile_fallback: bool,
) -> SearchOutcome {
    let page_size = criteria.page_size as usize;
    let has_more = rows.len() > page_size;
    rows.truncate(page_size);

    let next_cursor = if has_more {
        rows.last().map(|last| {
            cursor::encode(&CursorKey {
                created_at: last.created_at.to_rfc3339(),
                id: last.id.clone(),
            })
        })
    } else {
        None
    };

    let client_ids = distinct_client_ids(&rows);
    let clients_by_id = match employers.fetch_by_ids(&client_ids).await {
        Ok(map) => map,
        Err(e) => {
            warn!("Employer lookup failed, returning page without employers: {}", e);
            HashMap::new()
        }
    };

    SearchOutcome {
        jobs: rows,
        clients_by_id,
        next_cursor,
        used_profile_fallback,
    }
}

fn distinct_client_ids(rows: &[ListingRecord]) -> Vec<String> {
    let mut ids: Vec<String> = Vec::new();
    for row in rows {
        if !ids.contains(&row.client_id) {
            ids.push(row.client_id.clone());
        }
    }
    ids
}
