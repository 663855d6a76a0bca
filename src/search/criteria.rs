// src/search/criteria.rs
use super::cursor::{self, CursorKey};

pub const MIN_PAGE_SIZE: i64 = 10;
pub const MAX_PAGE_SIZE: i64 = 50;
pub const DEFAULT_PAGE_SIZE: i64 = 30;
pub const MAX_SKILL_TERMS: usize = 12;

/// Sentinel meaning "this categorical filter is unset".
const ANY: &str = "any";

/// Raw request parameters, exactly as the caller supplied them.
///
/// Everything is an optional string; all coercion happens once, in
/// [`SearchCriteria::from_params`].
#[derive(Debug, Default, Clone)]
pub struct RawSearchParams {
    pub text: Option<String>,
    pub location: Option<String>,
    pub skills: Option<String>,
    pub job_type: Option<String>,
    pub shift: Option<String>,
    pub dept: Option<String>,
    pub role: Option<String>,
    pub exp: Option<String>,
    pub salary_min: Option<String>,
    pub salary_max: Option<String>,
    pub sort: Option<String>,
    pub cursor: Option<String>,
    pub limit: Option<String>,
    pub role_terms: Option<String>,
    pub profile_role_filter: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExperienceBand {
    Fresher,
    OneToTwo,
    ThreeToFive,
    FivePlus,
    Any,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortMode {
    Recent,
    Relevant,
}

/// Validated, immutable search intent for one request.
///
/// Two criteria can be derived from one request: the strict form, and a
/// relaxed form with the role boost removed (see [`Self::without_role_boost`]).
#[derive(Debug, Clone)]
pub struct SearchCriteria {
    pub text: Option<String>,
    pub location: Option<String>,
    pub skills: Vec<String>,
    pub job_type: Option<String>,
    pub shift: Option<String>,
    pub dept_category: Option<String>,
    pub role_category: Option<String>,
    pub experience: ExperienceBand,
    pub salary_min: Option<f64>,
    pub salary_max: Option<f64>,
    pub sort: SortMode,
    pub cursor: Option<CursorKey>,
    pub page_size: i64,
    pub role_boost: Vec<String>,
}

impl SearchCriteria {
    pub fn from_params(params: &RawSearchParams) -> Self {
        let mut skills = split_terms(params.skills.as_deref());
        skills.truncate(MAX_SKILL_TERMS);

        let role_boost = if bool_flag(params.profile_role_filter.as_deref()) {
            split_terms(params.role_terms.as_deref())
        } else {
            Vec::new()
        };

        Self {
            text: non_blank(params.text.as_deref()),
            location: non_blank(params.location.as_deref()),
            skills,
            job_type: categorical(params.job_type.as_deref()),
            shift: categorical(params.shift.as_deref()),
            dept_category: categorical(params.dept.as_deref()),
            role_category: categorical(params.role.as_deref()),
            experience: experience_band(params.exp.as_deref()),
            salary_min: parse_salary(params.salary_min.as_deref()),
            salary_max: parse_salary(params.salary_max.as_deref()),
            sort: sort_mode(params.sort.as_deref()),
            cursor: cursor::decode(params.cursor.as_deref()),
            page_size: page_size(params.limit.as_deref()),
            role_boost,
        }
    }

    pub fn has_role_boost(&self) -> bool {
        !self.role_boost.is_empty()
    }

    /// The relaxed form used by the fallback attempt: identical criteria
    /// with the profile-derived role boost dropped.
    pub fn without_role_boost(&self) -> Self {
        let mut relaxed = self.clone();
        relaxed.role_boost = Vec::new();
        relaxed
    }
}

fn non_blank(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn categorical(raw: Option<&str>) -> Option<String> {
    non_blank(raw).filter(|v| !v.eq_ignore_ascii_case(ANY))
}

/// Split a comma-separated parameter into trimmed, deduplicated terms.
fn split_terms(raw: Option<&str>) -> Vec<String> {
    let mut terms: Vec<String> = Vec::new();
    if let Some(raw) = raw {
        for term in raw.split(',') {
            let term = term.trim();
            if !term.is_empty() && !terms.iter().any(|t| t == term) {
                terms.push(term.to_string());
            }
        }
    }
    terms
}

fn experience_band(raw: Option<&str>) -> ExperienceBand {
    match raw.map(str::trim) {
        Some("fresher") => ExperienceBand::Fresher,
        Some("1_2") => ExperienceBand::OneToTwo,
        Some("3_5") => ExperienceBand::ThreeToFive,
        Some("5_plus") => ExperienceBand::FivePlus,
        _ => ExperienceBand::Any,
    }
}

/// Requested salary bounds apply only when they parse to a finite, non-zero
/// number; anything else means "no bound".
fn parse_salary(raw: Option<&str>) -> Option<f64> {
    raw.and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite() && *v != 0.0)
}

fn sort_mode(raw: Option<&str>) -> SortMode {
    match raw.map(str::trim) {
        Some("relevant") => SortMode::Relevant,
        _ => SortMode::Recent,
    }
}

fn page_size(raw: Option<&str>) -> i64 {
    raw.and_then(|s| s.trim().parse::<i64>().ok())
        .map(|n| n.clamp(MIN_PAGE_SIZE, MAX_PAGE_SIZE))
        .unwrap_or(DEFAULT_PAGE_SIZE)
}

fn bool_flag(raw: Option<&str>) -> bool {
    matches!(
        raw.map(str::trim),
        Some(v) if v.eq_ignore_ascii_case("true")
            || v == "1"
            || v.eq_ignore_ascii_case("yes")
    )
}
