// src/search/filter.rs
//! Structured filter predicates.
//!
//! A [`PredicateGroup`] is a list of atoms OR'd together; the groups of one
//! scan are AND'd. Keeping the shape typed means the store client renders
//! every group the same way and the skill-term escaping rule lives in
//! exactly one function.

use super::criteria::{ExperienceBand, SearchCriteria};

/// Columns addressable by filter atoms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Title,
    ClientName,
    Industry,
    DeptCategory,
    RoleCategory,
    SubCategory,
    City,
    Location,
    JobType,
    Shift,
    MinExperience,
    MaxExperience,
    SalaryMin,
    SalaryMax,
}

impl Column {
    pub fn name(self) -> &'static str {
        match self {
            Column::Title => "title",
            Column::ClientName => "client_name",
            Column::Industry => "industry",
            Column::DeptCategory => "dept_category",
            Column::RoleCategory => "role_category",
            Column::SubCategory => "sub_category",
            Column::City => "city",
            Column::Location => "location",
            Column::JobType => "job_type",
            Column::Shift => "shift",
            Column::MinExperience => "min_experience",
            Column::MaxExperience => "max_experience",
            Column::SalaryMin => "salary_min",
            Column::SalaryMax => "salary_max",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cmp {
    AtMost,
    AtLeast,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// Case-insensitive substring match on a text column.
    Contains(Column, String),
    /// Exact equality on a categorical column.
    Equals(Column, String),
    /// Numeric bound on a numeric column.
    Bound(Column, Cmp, f64),
    /// At least one of the terms appears in either of the listing's two
    /// skill sets.
    SkillsAny(Vec<String>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct PredicateGroup(pub Vec<Predicate>);

impl PredicateGroup {
    fn single(atom: Predicate) -> Self {
        Self(vec![atom])
    }
}

/// Columns the free-text query fans out over.
const TEXT_SEARCH_COLUMNS: [Column; 8] = [
    Column::Title,
    Column::ClientName,
    Column::Industry,
    Column::DeptCategory,
    Column::RoleCategory,
    Column::SubCategory,
    Column::City,
    Column::Location,
];

/// Columns the profile role boost fans out over.
const ROLE_BOOST_COLUMNS: [Column; 5] = [
    Column::Title,
    Column::Industry,
    Column::DeptCategory,
    Column::RoleCategory,
    Column::SubCategory,
];

/// Translate criteria into the AND-of-OR-groups predicate set.
///
/// A listing must satisfy every group; within a group a match on any atom
/// suffices. Absent criteria contribute no group.
pub fn build_predicates(criteria: &SearchCriteria) -> Vec<PredicateGroup> {
    let mut groups = Vec::new();

    if let Some(text) = &criteria.text {
        groups.push(PredicateGroup(
            TEXT_SEARCH_COLUMNS
                .iter()
                .map(|&col| Predicate::Contains(col, text.clone()))
                .collect(),
        ));
    }

    if let Some(location) = &criteria.location {
        groups.push(PredicateGroup(vec![
            Predicate::Contains(Column::City, location.clone()),
            Predicate::Contains(Column::Location, location.clone()),
        ]));
    }

    if !criteria.skills.is_empty() {
        groups.push(PredicateGroup::single(Predicate::SkillsAny(
            criteria.skills.clone(),
        )));
    }

    match criteria.experience {
        ExperienceBand::Fresher => {
            groups.push(PredicateGroup::single(Predicate::Bound(
                Column::MaxExperience,
                Cmp::AtMost,
                0.0,
            )));
        }
        ExperienceBand::OneToTwo => {
            groups.push(PredicateGroup::single(Predicate::Bound(
                Column::MinExperience,
                Cmp::AtMost,
                2.0,
            )));
            groups.push(PredicateGroup::single(Predicate::Bound(
                Column::MaxExperience,
                Cmp::AtLeast,
                1.0,
            )));
        }
        ExperienceBand::ThreeToFive => {
            groups.push(PredicateGroup::single(Predicate::Bound(
                Column::MinExperience,
                Cmp::AtMost,
                5.0,
            )));
            groups.push(PredicateGroup::single(Predicate::Bound(
                Column::MaxExperience,
                Cmp::AtLeast,
                3.0,
            )));
        }
        ExperienceBand::FivePlus => {
            groups.push(PredicateGroup::single(Predicate::Bound(
                Column::MaxExperience,
                Cmp::AtLeast,
                5.0,
            )));
        }
        ExperienceBand::Any => {}
    }

    for (column, value) in [
        (Column::JobType, &criteria.job_type),
        (Column::Shift, &criteria.shift),
        (Column::DeptCategory, &criteria.dept_category),
        (Column::RoleCategory, &criteria.role_category),
    ] {
        if let Some(value) = value {
            groups.push(PredicateGroup::single(Predicate::Equals(
                column,
                value.clone(),
            )));
        }
    }

    // Overlap test: the listing's ceiling must reach the seeker's floor,
    // and the listing's floor must not exceed the seeker's ceiling.
    if let Some(min) = criteria.salary_min {
        groups.push(PredicateGroup::single(Predicate::Bound(
            Column::SalaryMax,
            Cmp::AtLeast,
            min,
        )));
    }
    if let Some(max) = criteria.salary_max {
        groups.push(PredicateGroup::single(Predicate::Bound(
            Column::SalaryMin,
            Cmp::AtMost,
            max,
        )));
    }

    if !criteria.role_boost.is_empty() {
        let mut atoms = Vec::with_capacity(criteria.role_boost.len() * ROLE_BOOST_COLUMNS.len());
        for term in &criteria.role_boost {
            for &col in &ROLE_BOOST_COLUMNS {
                atoms.push(Predicate::Contains(col, term.clone()));
            }
        }
        groups.push(PredicateGroup(atoms));
    }

    groups
}

/// Quote one term for embedding in a `{...}` array literal.
///
/// Plain tokens (`[A-Za-z0-9_+./-]+`) embed as-is; anything else is wrapped
/// in double quotes with `\` and `"` backslash-escaped.
pub fn quote_array_term(term: &str) -> String {
    let plain = !term.is_empty()
        && term
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '+' | '.' | '/' | '-'));
    if plain {
        return term.to_string();
    }
    let mut quoted = String::with_capacity(term.len() + 2);
    quoted.push('"');
    for c in term.chars() {
        if c == '\\' || c == '"' {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('"');
    quoted
}

/// Render the terms of a skills atom as one array literal.
pub fn render_array_literal(terms: &[String]) -> String {
    let inner = terms
        .iter()
        .map(|t| quote_array_term(t))
        .collect::<Vec<_>>()
        .join(",");
    format!("{{{}}}", inner)
}
