//! Engine-level tests running the full search flow against in-memory
//! store collaborators that interpret the composed predicate groups.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use uuid::Uuid;

use job_search::errors::SearchError;
use job_search::search::cursor::{self, CursorKey};
use job_search::search::filter::{Cmp, Column, Predicate, PredicateGroup};
use job_search::search::{execute_search, RawSearchParams};
use job_search::store::{
    EmployerDirectory, EmployerLite, ListingRecord, ListingScan, ListingsStore, PageBound,
};

struct InMemoryListings {
    rows: Vec<ListingRecord>,
    scans: AtomicUsize,
}

impl InMemoryListings {
    fn new(rows: Vec<ListingRecord>) -> Self {
        Self {
            rows,
            scans: AtomicUsize::new(0),
        }
    }

    fn scan_count(&self) -> usize {
        self.scans.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ListingsStore for InMemoryListings {
    async fn scan(&self, scan: &ListingScan) -> Result<Vec<ListingRecord>, SearchError> {
        self.scans.fetch_add(1, Ordering::SeqCst);
        let mut hits: Vec<ListingRecord> = self
            .rows
            .iter()
            .filter(|row| row.status == "open")
            .filter(|row| scan.groups.iter().all(|group| group_matches(group, row)))
            .filter(|row| before_bound(scan.before.as_ref(), row))
            .cloned()
            .collect();
        hits.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        hits.truncate(scan.limit as usize);
        Ok(hits)
    }
}

fn group_matches(group: &PredicateGroup, row: &ListingRecord) -> bool {
    group.0.iter().any(|atom| atom_matches(atom, row))
}

fn atom_matches(atom: &Predicate, row: &ListingRecord) -> bool {
    match atom {
        Predicate::Contains(column, needle) => text_value(row, *column)
            .is_some_and(|v| v.to_lowercase().contains(&needle.to_lowercase())),
        Predicate::Equals(column, value) => text_value(row, *column) == Some(value.as_str()),
        Predicate::Bound(column, Cmp::AtMost, bound) => {
            num_value(row, *column).is_some_and(|v| v <= *bound)
        }
        Predicate::Bound(column, Cmp::AtLeast, bound) => {
            num_value(row, *column).is_some_and(|v| v >= *bound)
        }
        Predicate::SkillsAny(terms) => terms
            .iter()
            .any(|t| row.must_have_skills.contains(t) || row.nice_to_have_skills.contains(t)),
    }
}

fn text_value(row: &ListingRecord, column: Column) -> Option<&str> {
    match column {
        Column::Title => Some(row.title.as_str()),
        Column::ClientName => row.client_name.as_deref(),
        Column::Industry => row.industry.as_deref(),
        Column::DeptCategory => row.dept_category.as_deref(),
        Column::RoleCategory => row.role_category.as_deref(),
        Column::SubCategory => row.sub_category.as_deref(),
        Column::City => row.city.as_deref(),
        Column::Location => row.location.as_deref(),
        Column::JobType => row.job_type.as_deref(),
        Column::Shift => row.shift.as_deref(),
        _ => None,
    }
}

fn num_value(row: &ListingRecord, column: Column) -> Option<f64> {
    match column {
        Column::MinExperience => row.min_experience.map(f64::from),
        Column::MaxExperience => row.max_experience.map(f64::from),
        Column::SalaryMin => row.salary_min.map(|v| v as f64),
        Column::SalaryMax => row.salary_max.map(|v| v as f64),
        _ => None,
    }
}

fn before_bound(bound: Option<&PageBound>, row: &ListingRecord) -> bool {
    match bound {
        None => true,
        Some(b) => {
            row.created_at < b.created_at || (row.created_at == b.created_at && row.id < b.id)
        }
    }
}

struct StaticEmployers;

#[async_trait]
impl EmployerDirectory for StaticEmployers {
    async fn fetch_by_ids(
        &self,
        ids: &[String],
    ) -> Result<HashMap<String, EmployerLite>, SearchError> {
        Ok(ids
            .iter()
            .map(|id| {
                (
                    id.clone(),
                    EmployerLite {
                        id: id.clone(),
                        name: format!("Employer {}", id),
                        slug: format!("employer-{}", id),
                        logo_url: None,
                    },
                )
            })
            .collect())
    }
}

struct FailingEmployers;

#[async_trait]
impl EmployerDirectory for FailingEmployers {
    async fn fetch_by_ids(
        &self,
        _ids: &[String],
    ) -> Result<HashMap<String, EmployerLite>, SearchError> {
        Err(SearchError::EmployerLookupFailed(
            "directory offline".to_string(),
        ))
    }
}

fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap()
}

fn listing(n: u32) -> ListingRecord {
    ListingRecord {
        id: format!("job-{:03}", n),
        client_id: Uuid::new_v4().to_string(),
        title: format!("Warehouse Operative {}", n),
        client_name: Some("Acme Logistics".to_string()),
        industry: Some("Logistics".to_string()),
        dept_category: Some("Operations".to_string()),
        role_category: Some("Warehouse".to_string()),
        sub_category: None,
        city: Some("Leeds".to_string()),
        location: Some("Leeds, UK".to_string()),
        job_type: Some("full_time".to_string()),
        shift: Some("day".to_string()),
        must_have_skills: vec!["forklift".to_string()],
        nice_to_have_skills: Vec::new(),
        min_experience: Some(0),
        max_experience: Some(2),
        salary_min: Some(22000),
        salary_max: Some(28000),
        status: "open".to_string(),
        created_at: base_time() + Duration::minutes(i64::from(n)),
    }
}

fn params_with(f: impl FnOnce(&mut RawSearchParams)) -> RawSearchParams {
    let mut params = RawSearchParams::default();
    f(&mut params);
    params
}

#[tokio::test]
async fn empty_strict_first_page_retries_without_role_boost() {
    let store = InMemoryListings::new(vec![listing(1), listing(2)]);
    let params = params_with(|p| {
        p.role_terms = Some("Dispatcher".to_string());
        p.profile_role_filter = Some("true".to_string());
    });

    let outcome = execute_search(&store, &StaticEmployers, &params)
        .await
        .expect("search should succeed");

    assert_eq!(store.scan_count(), 2);
    assert!(outcome.used_profile_fallback);
    assert_eq!(outcome.jobs.len(), 2);
}

#[tokio::test]
async fn free_text_query_suppresses_the_fallback() {
    let store = InMemoryListings::new(vec![listing(1), listing(2)]);
    let params = params_with(|p| {
        p.text = Some("quantum".to_string());
        p.role_terms = Some("Dispatcher".to_string());
        p.profile_role_filter = Some("true".to_string());
    });

    let outcome = execute_search(&store, &StaticEmployers, &params)
        .await
        .expect("search should succeed");

    assert_eq!(store.scan_count(), 1);
    assert!(!outcome.used_profile_fallback);
    assert!(outcome.jobs.is_empty());
}

#[tokio::test]
async fn cursor_suppresses_the_fallback() {
    let store = InMemoryListings::new(vec![listing(1), listing(2)]);
    let before_everything = cursor::encode(&CursorKey {
        created_at: (base_time() - Duration::days(1)).to_rfc3339(),
        id: "a".to_string(),
    });
    let params = params_with(|p| {
        p.cursor = Some(before_everything);
        p.role_terms = Some("Dispatcher".to_string());
        p.profile_role_filter = Some("true".to_string());
    });

    let outcome = execute_search(&store, &StaticEmployers, &params)
        .await
        .expect("search should succeed");

    assert_eq!(store.scan_count(), 1);
    assert!(!outcome.used_profile_fallback);
    assert!(outcome.jobs.is_empty());
}

#[tokio::test]
async fn empty_relaxed_result_is_final_and_still_flagged() {
    let mut closed = listing(1);
    closed.status = "closed".to_string();
    let store = InMemoryListings::new(vec![closed]);
    let params = params_with(|p| {
        p.role_terms = Some("Dispatcher".to_string());
        p.profile_role_filter = Some("true".to_string());
    });

    let outcome = execute_search(&store, &StaticEmployers, &params)
        .await
        .expect("search should succeed");

    assert_eq!(store.scan_count(), 2);
    assert!(outcome.used_profile_fallback);
    assert!(outcome.jobs.is_empty());
    assert_eq!(outcome.next_cursor, None);
}

#[tokio::test]
async fn pagination_walk_is_gapless_and_strictly_decreasing() {
    // Pairs share a timestamp so the id tiebreak is exercised.
    let rows: Vec<ListingRecord> = (0..25)
        .map(|n| {
            let mut row = listing(n);
            row.created_at = base_time() + Duration::minutes(i64::from(n / 2));
            row
        })
        .collect();
    let store = InMemoryListings::new(rows);

    let mut seen: Vec<(DateTime<Utc>, String)> = Vec::new();
    let mut page_sizes = Vec::new();
    let mut next_cursor: Option<String> = None;

    loop {
        let cursor_param = next_cursor.clone();
        let params = params_with(|p| {
            p.limit = Some("10".to_string());
            p.cursor = cursor_param;
        });
        let outcome = execute_search(&store, &StaticEmployers, &params)
            .await
            .expect("search should succeed");

        page_sizes.push(outcome.jobs.len());
        for job in &outcome.jobs {
            seen.push((job.created_at, job.id.clone()));
        }

        match outcome.next_cursor {
            Some(token) => next_cursor = Some(token),
            None => break,
        }
    }

    assert_eq!(page_sizes, vec![10, 10, 5]);
    assert_eq!(seen.len(), 25);
    for pair in seen.windows(2) {
        assert!(
            pair[0] > pair[1],
            "rows must strictly decrease under (created_at, id): {:?}",
            pair
        );
    }
}

#[tokio::test]
async fn salary_filter_is_an_overlap_test() {
    let mut overlapping = listing(1);
    overlapping.salary_min = Some(20000);
    overlapping.salary_max = Some(40000);
    let mut below_floor = listing(2);
    below_floor.salary_min = Some(15000);
    below_floor.salary_max = Some(25000);
    let store = InMemoryListings::new(vec![overlapping, below_floor]);

    let params = params_with(|p| {
        p.salary_min = Some("30000".to_string());
        p.salary_max = Some("50000".to_string());
    });
    let outcome = execute_search(&store, &StaticEmployers, &params)
        .await
        .expect("search should succeed");

    assert_eq!(outcome.jobs.len(), 1);
    assert_eq!(outcome.jobs[0].id, "job-001");
}

#[tokio::test]
async fn experience_bucket_bounds_both_ends() {
    let mut junior = listing(1);
    junior.min_experience = Some(0);
    junior.max_experience = Some(3);
    let mut senior = listing(2);
    senior.min_experience = Some(3);
    senior.max_experience = Some(6);
    let store = InMemoryListings::new(vec![junior, senior]);

    let params = params_with(|p| p.exp = Some("1_2".to_string()));
    let outcome = execute_search(&store, &StaticEmployers, &params)
        .await
        .expect("search should succeed");

    assert_eq!(outcome.jobs.len(), 1);
    assert_eq!(outcome.jobs[0].id, "job-001");
}

#[tokio::test]
async fn skill_terms_match_either_skill_set() {
    let mut backend = listing(1);
    backend.must_have_skills = vec!["rust".to_string()];
    backend.nice_to_have_skills = vec!["sql".to_string()];
    let mut frontend = listing(2);
    frontend.must_have_skills = vec!["css".to_string()];
    frontend.nice_to_have_skills = vec!["Node.js".to_string()];
    let store = InMemoryListings::new(vec![backend, frontend]);

    let params = params_with(|p| p.skills = Some("Node.js,crane".to_string()));
    let outcome = execute_search(&store, &StaticEmployers, &params)
        .await
        .expect("search should succeed");

    assert_eq!(outcome.jobs.len(), 1);
    assert_eq!(outcome.jobs[0].id, "job-002");
}

#[tokio::test]
async fn failed_employer_lookup_degrades_to_empty_map() {
    let store = InMemoryListings::new(vec![listing(1), listing(2)]);
    let outcome = execute_search(&store, &FailingEmployers, &RawSearchParams::default())
        .await
        .expect("search should succeed");

    assert_eq!(outcome.jobs.len(), 2);
    assert!(outcome.clients_by_id.is_empty());
}

#[tokio::test]
async fn page_employers_are_resolved_once_per_distinct_id() {
    let mut first = listing(1);
    first.client_id = "acme".to_string();
    let mut second = listing(2);
    second.client_id = "acme".to_string();
    let mut third = listing(3);
    third.client_id = "globex".to_string();
    let store = InMemoryListings::new(vec![first, second, third]);

    let outcome = execute_search(&store, &StaticEmployers, &RawSearchParams::default())
        .await
        .expect("search should succeed");

    assert_eq!(outcome.jobs.len(), 3);
    assert_eq!(outcome.clients_by_id.len(), 2);
    assert!(outcome.clients_by_id.contains_key("acme"));
    assert!(outcome.clients_by_id.contains_key("globex"));
}
