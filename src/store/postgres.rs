// src/store/postgres.rs
use std::collections::HashMap;

use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::info;

use crate::errors::SearchError;
use crate::search::filter::{render_array_literal, Cmp, Predicate, PredicateGroup};

use super::{EmployerDirectory, EmployerLite, ListingRecord, ListingScan, ListingsStore};

const LISTING_COLUMNS: &str = "id, client_id, title, client_name, industry, dept_category, \
     role_category, sub_category, city, location, job_type, shift, must_have_skills, \
     nice_to_have_skills, min_experience, max_experience, salary_min, salary_max, status, \
     created_at";

/// PostgreSQL implementation of both store collaborators.
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect to the listings database.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await
            .context("Failed to connect to PostgreSQL database")?;

        info!("Database connection pool initialized");
        Ok(Self::new(pool))
    }

    /// Get the database pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Run database migrations
    pub async fn migrate(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS listings (
                id TEXT PRIMARY KEY,
                client_id TEXT NOT NULL,
                title TEXT NOT NULL,
                client_name TEXT,
                industry TEXT,
                dept_category TEXT,
                role_category TEXT,
                sub_category TEXT,
                city TEXT,
                location TEXT,
                job_type TEXT,
                shift TEXT,
                must_have_skills TEXT[] NOT NULL DEFAULT '{}',
                nice_to_have_skills TEXT[] NOT NULL DEFAULT '{}',
                min_experience INTEGER,
                max_experience INTEGER,
                salary_min BIGINT,
                salary_max BIGINT,
                status TEXT NOT NULL DEFAULT 'open',
                created_at TIMESTAMPTZ NOT NULL DEFAULT now()
            );
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS clients (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                slug TEXT NOT NULL,
                logo_url TEXT
            );
            "#,
        )
        .execute(&self.pool)
        .await?;

        // Keyset pagination order
        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_listings_created_at_id
            ON listings (created_at DESC, id DESC);
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_listings_status
            ON listings (status);
            "#,
        )
        .execute(&self.pool)
        .await?;

        info!("Database migrations completed");
        Ok(())
    }
}

fn push_scan<'a>(builder: &mut QueryBuilder<'a, Postgres>, scan: &'a ListingScan) {
    for group in &scan.groups {
        builder.push(" AND (");
        for (i, atom) in group.0.iter().enumerate() {
            if i > 0 {
                builder.push(" OR ");
            }
            push_atom(builder, atom);
        }
        builder.push(")");
    }

    if let Some(bound) = &scan.before {
        builder
            .push(" AND (created_at < ")
            .push_bind(bound.created_at)
            .push(" OR (created_at = ")
            .push_bind(bound.created_at)
            .push(" AND id < ")
            .push_bind(&bound.id)
            .push("))");
    }

    builder
        .push(" ORDER BY created_at DESC, id DESC LIMIT ")
        .push_bind(scan.limit);
}

fn push_atom<'a>(builder: &mut QueryBuilder<'a, Postgres>, atom: &'a Predicate) {
    match atom {
        Predicate::Contains(column, needle) => {
            builder
                .push(column.name())
                .push(" ILIKE ")
                .push_bind(format!("%{}%", escape_like(needle)));
        }
        Predicate::Equals(column, value) => {
            builder.push(column.name()).push(" = ").push_bind(value);
        }
        Predicate::Bound(column, cmp, value) => {
            let op = match cmp {
                Cmp::AtMost => " <= ",
                Cmp::AtLeast => " >= ",
            };
            builder.push(column.name()).push(op).push_bind(*value);
        }
        Predicate::SkillsAny(terms) => {
            let literal = render_array_literal(terms);
            builder
                .push("(must_have_skills && CAST(")
                .push_bind(literal.clone())
                .push(" AS text[]) OR nice_to_have_skills && CAST(")
                .push_bind(literal)
                .push(" AS text[]))");
        }
    }
}

/// Escape ILIKE metacharacters so a needle only ever matches literally.
fn escape_like(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[async_trait]
impl ListingsStore for PostgresStore {
    async fn scan(&self, scan: &ListingScan) -> Result<Vec<ListingRecord>, SearchError> {
        let mut builder = QueryBuilder::new(format!(
            "SELECT {} FROM listings WHERE status = 'open'",
            LISTING_COLUMNS
        ));
        push_scan(&mut builder, scan);

        builder
            .build_query_as::<ListingRecord>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| SearchError::StoreUnavailable(e.to_string()))
    }
}

#[async_trait]
impl EmployerDirectory for PostgresStore {
    async fn fetch_by_ids(
        &self,
        ids: &[String],
    ) -> Result<HashMap<String, EmployerLite>, SearchError> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let employers = sqlx::query_as::<_, EmployerLite>(
            "SELECT id, name, slug, logo_url FROM clients WHERE id = ANY($1)",
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| SearchError::EmployerLookupFailed(e.to_string()))?;

        Ok(employers.into_iter().map(|c| (c.id.clone(), c)).collect())
    }
}
