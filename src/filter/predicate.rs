use serde::Serialize;
use std::collections::BTreeMap;

use super::types::{Constraint, FilterValue};

/// Anything a predicate can be evaluated against in memory.
pub trait FilterTarget {
    /// Current value of `column`, or `None` when it is NULL or unknown.
    fn field_value(&self, column: &str) -> Option<FilterValue>;
}

/// Field constraints sent to the store, keyed by column name.
///
/// A predicate built with [`Predicate::nothing`] matches no row regardless of its
/// constraints; it is how authorization failures produce empty result sets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Predicate {
    constraints: BTreeMap<String, Constraint>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    nothing: bool,
}

impl Predicate {
    pub fn new() -> Self {
        Self::default()
    }

    /// A predicate guaranteed to match zero rows.
    pub fn nothing() -> Self {
        Self { constraints: BTreeMap::new(), nothing: true }
    }

    pub fn is_nothing(&self) -> bool {
        self.nothing
    }

    pub fn is_empty(&self) -> bool {
        !self.nothing && self.constraints.is_empty()
    }

    pub fn with(mut self, field: impl Into<String>, constraint: Constraint) -> Self {
        self.set(field, constraint);
        self
    }

    /// Insert or replace the constraint on `field`.
    pub fn set(&mut self, field: impl Into<String>, constraint: Constraint) {
        self.constraints.insert(field.into(), constraint);
    }

    pub fn get(&self, field: &str) -> Option<&Constraint> {
        self.constraints.get(field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Constraint)> {
        self.constraints.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn matches<T: FilterTarget + ?Sized>(&self, target: &T) -> bool {
        if self.nothing {
            return false;
        }
        self.constraints.iter().all(|(field, constraint)| {
            let value = target.field_value(field);
            match (constraint, value) {
                (_, None) => false,
                (Constraint::NotNull, Some(_)) => true,
                (Constraint::Eq(expected), Some(v)) => v == *expected,
                (Constraint::In(set), Some(v)) => set.contains(&v),
                (Constraint::Range(range), Some(FilterValue::Timestamp(at))) => range.contains(at),
                (Constraint::Range(_), Some(_)) => false,
            }
        })
    }
}
