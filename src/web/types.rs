// src/web/types.rs
use std::collections::HashMap;

use rocket::form::FromForm;
use rocket::serde::Serialize;

use crate::search::{RawSearchParams, SearchOutcome};
use crate::store::{EmployerLite, ListingRecord};

/// Query string of `GET /api/jobs/search`. Every field is optional; the
/// engine treats absence as "no constraint".
#[derive(Debug, FromForm)]
pub struct SearchQueryParams {
    pub text: Option<String>,
    pub location: Option<String>,
    pub skills: Option<String>,
    #[field(name = "jobType")]
    pub job_type: Option<String>,
    pub shift: Option<String>,
    pub dept: Option<String>,
    pub role: Option<String>,
    pub exp: Option<String>,
    #[field(name = "salaryMin")]
    pub salary_min: Option<String>,
    #[field(name = "salaryMax")]
    pub salary_max: Option<String>,
    pub sort: Option<String>,
    pub cursor: Option<String>,
    pub limit: Option<String>,
    pub role_terms: Option<String>,
    #[field(name = "profileRoleFilter")]
    pub profile_role_filter: Option<String>,
}

impl From<SearchQueryParams> for RawSearchParams {
    fn from(params: SearchQueryParams) -> Self {
        Self {
            text: params.text,
            location: params.location,
            skills: params.skills,
            job_type: params.job_type,
            shift: params.shift,
            dept: params.dept,
            role: params.role,
            exp: params.exp,
            salary_min: params.salary_min,
            salary_max: params.salary_max,
            sort: params.sort,
            cursor: params.cursor,
            limit: params.limit,
            role_terms: params.role_terms,
            profile_role_filter: params.profile_role_filter,
        }
    }
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct SearchResponse {
    pub jobs: Vec<ListingRecord>,
    #[serde(rename = "clientsById")]
    pub clients_by_id: HashMap<String, EmployerLite>,
    #[serde(rename = "nextCursor")]
    pub next_cursor: Option<String>,
    #[serde(rename = "usedProfileFallback")]
    pub used_profile_fallback: bool,
}

impl From<SearchOutcome> for SearchResponse {
    fn from(outcome: SearchOutcome) -> Self {
        Self {
            jobs: outcome.jobs,
            clients_by_id: outcome.clients_by_id,
            next_cursor: outcome.next_cursor,
            used_profile_fallback: outcome.used_profile_fallback,
        }
    }
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
