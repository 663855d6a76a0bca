// src/web/handlers/search_handlers.rs
use rocket::serde::json::Json;
use rocket::State;
use tracing::{error, info};

use crate::search;
use crate::store::PostgresStore;
use crate::web::types::{ErrorResponse, SearchQueryParams, SearchResponse};

pub async fn search_jobs_handler(
    params: SearchQueryParams,
    store: &State<PostgresStore>,
) -> Result<Json<SearchResponse>, Json<ErrorResponse>> {
    let raw = params.into();

    match search::execute_search(store.inner(), store.inner(), &raw).await {
        Ok(outcome) => {
            info!(
                "Search returned {} jobs (fallback: {})",
                outcome.jobs.len(),
                outcome.used_profile_fallback
            );
            Ok(Json(outcome.into()))
        }
        Err(e) => {
            error!("Job search failed: {}", e);
            Err(Json(ErrorResponse::new(
                "Job search is temporarily unavailable",
            )))
        }
    }
}
