// src/store/mod.rs
//! Listings store and employer directory collaborators.
//!
//! The engine only ever talks to these traits; the PostgreSQL
//! implementations live in [`postgres`].

pub mod postgres;

pub use postgres::PostgresStore;

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

use crate::errors::SearchError;
use crate::search::filter::PredicateGroup;

/// One job posting row, immutable for the duration of a request.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ListingRecord {
    pub id: String,
    pub client_id: String,
    pub title: String,
    pub client_name: Option<String>,
    pub industry: Option<String>,
    pub dept_category: Option<String>,
    pub role_category: Option<String>,
    pub sub_category: Option<String>,
    pub city: Option<String>,
    pub location: Option<String>,
    pub job_type: Option<String>,
    pub shift: Option<String>,
    pub must_have_skills: Vec<String>,
    pub nice_to_have_skills: Vec<String>,
    pub min_experience: Option<i32>,
    pub max_experience: Option<i32>,
    pub salary_min: Option<i64>,
    pub salary_max: Option<i64>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// Minimal employer projection resolved after the page is fixed.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct EmployerLite {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub logo_url: Option<String>,
}

/// Typed keyset bound: only rows strictly before this `(created_at, id)`
/// pair under the descending pagination order.
#[derive(Debug, Clone)]
pub struct PageBound {
    pub created_at: DateTime<Utc>,
    pub id: String,
}

/// One ordered, limited range scan over open listings.
#[derive(Debug, Clone)]
pub struct ListingScan {
    /// AND-of-OR-groups filter; an empty list scans everything open.
    pub groups: Vec<PredicateGroup>,
    pub before: Option<PageBound>,
    pub limit: i64,
}

#[async_trait]
pub trait ListingsStore: Send + Sync {
    /// Execute the scan, ordered by `(created_at DESC, id DESC)`, returning
    /// at most `limit` rows. Only `open` listings are visible.
    async fn scan(&self, scan: &ListingScan) -> Result<Vec<ListingRecord>, SearchError>;
}

#[async_trait]
pub trait EmployerDirectory: Send + Sync {
    /// Fetch whatever subset of the requested employer ids exists.
    async fn fetch_by_ids(
        &self,
        ids: &[String],
    ) -> Result<HashMap<String, EmployerLite>, SearchError>;
}
