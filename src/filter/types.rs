use chrono::NaiveDateTime;
use serde::Serialize;
use std::collections::BTreeSet;
use std::ops::RangeInclusive;

/// Scalar value a constraint compares against. Also the bound SQL parameter type.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(untagged)]
pub enum FilterValue {
    Text(String),
    Int(i64),
    Timestamp(NaiveDateTime),
}

impl FilterValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FilterValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        FilterValue::Text(value.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        FilterValue::Text(value)
    }
}

impl From<i64> for FilterValue {
    fn from(value: i64) -> Self {
        FilterValue::Int(value)
    }
}

impl From<NaiveDateTime> for FilterValue {
    fn from(value: NaiveDateTime) -> Self {
        FilterValue::Timestamp(value)
    }
}

/// Inclusive timestamp range; an open side is unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct DateRange {
    pub gte: Option<NaiveDateTime>,
    pub lte: Option<NaiveDateTime>,
}

impl DateRange {
    pub fn contains(&self, at: NaiveDateTime) -> bool {
        self.gte.map_or(true, |g| at >= g) && self.lte.map_or(true, |l| at <= l)
    }
}

impl From<RangeInclusive<NaiveDateTime>> for DateRange {
    fn from(range: RangeInclusive<NaiveDateTime>) -> Self {
        let (gte, lte) = range.into_inner();
        DateRange { gte: Some(gte), lte: Some(lte) }
    }
}

/// Constraint on a single field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Constraint {
    Eq(FilterValue),
    In(BTreeSet<FilterValue>),
    Range(DateRange),
    NotNull,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn to_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SqlResult {
    pub query: String,
    pub params: Vec<FilterValue>,
}
