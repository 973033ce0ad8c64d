use serde::Deserialize;

use crate::filter::fields;
use crate::filter::{Constraint, DateRange, FilterError, Predicate};
use crate::semaforo::calendar::{end_of_day, parse_day, start_of_day};

/// Page size ceiling when the deployment configures no `max_limit`.
pub const HARD_MAX_LIMIT: i64 = 10_000;

/// Dropdown value meaning "do not filter on this field".
const SENTINELS: [&str; 2] = ["Todos", "All"];

/// Query-string filters shared by every agenda endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgendaFilters {
    pub executante: Option<String>,
    pub status: Option<String>,
    pub complexidade: Option<String>,
    pub tipo: Option<String>,
    pub pasta: Option<String>,

    pub data_inicio_from: Option<String>,
    pub data_inicio_to: Option<String>,
    pub conclusao_prevista_from: Option<String>,
    pub conclusao_prevista_to: Option<String>,
    pub conclusao_efetiva_from: Option<String>,
    pub conclusao_efetiva_to: Option<String>,
    pub prazo_fatal_from: Option<String>,
    pub prazo_fatal_to: Option<String>,

    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl AgendaFilters {
    /// Equality and date-range constraints for everything except the deadline pair.
    pub fn base_predicate(&self) -> Result<Predicate, FilterError> {
        let mut predicate = Predicate::new();

        let equalities = [
            (fields::EXECUTOR, &self.executante),
            (fields::STATUS, &self.status),
            (fields::LABEL, &self.complexidade),
            (fields::SUBTYPE, &self.tipo),
            (fields::FOLDER, &self.pasta),
        ];
        for (column, value) in equalities {
            if let Some(value) = meaningful(value) {
                predicate.set(column, Constraint::Eq(value.into()));
            }
        }

        let ranges = [
            (fields::START_DATE, ("dataInicioFrom", &self.data_inicio_from), ("dataInicioTo", &self.data_inicio_to)),
            (
                fields::EXPECTED_END_DATE,
                ("conclusaoPrevistaFrom", &self.conclusao_prevista_from),
                ("conclusaoPrevistaTo", &self.conclusao_prevista_to),
            ),
            (
                fields::ACTUAL_END_DATE,
                ("conclusaoEfetivaFrom", &self.conclusao_efetiva_from),
                ("conclusaoEfetivaTo", &self.conclusao_efetiva_to),
            ),
        ];
        for (column, from, to) in ranges {
            if let Some(range) = day_range(from, to)? {
                predicate.set(column, Constraint::Range(range));
            }
        }

        Ok(predicate)
    }

    /// Raw `prazoFatalFrom` / `prazoFatalTo` values, blanks dropped.
    pub fn deadline_pair(&self) -> (Option<&str>, Option<&str>) {
        (non_blank(&self.prazo_fatal_from), non_blank(&self.prazo_fatal_to))
    }

    /// The deadline pair as a literal day range, for requests that are not a bucket.
    pub fn deadline_range(&self) -> Result<Option<DateRange>, FilterError> {
        day_range(("prazoFatalFrom", &self.prazo_fatal_from), ("prazoFatalTo", &self.prazo_fatal_to))
    }

    /// Requested page; `limit` falls back to `default_limit` and never exceeds
    /// `max_limit`, or [`HARD_MAX_LIMIT`] when there is none.
    pub fn pagination(&self, default_limit: i64, max_limit: Option<i64>) -> Pagination {
        let ceiling = max_limit.unwrap_or(HARD_MAX_LIMIT).clamp(1, HARD_MAX_LIMIT);
        let limit = self.limit.filter(|l| *l > 0).unwrap_or(default_limit);
        Pagination {
            page: self.page.unwrap_or(1).max(1),
            limit: limit.clamp(1, ceiling),
        }
    }
}

/// 1-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: i64,
    pub limit: i64,
}

impl Pagination {
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn meaningful(value: &Option<String>) -> Option<&str> {
    non_blank(value).filter(|v| !SENTINELS.contains(v))
}

/// `from` counts from local midnight, `to` through the last millisecond of its day.
fn day_range(
    (from_name, from): (&str, &Option<String>),
    (to_name, to): (&str, &Option<String>),
) -> Result<Option<DateRange>, FilterError> {
    let parse = |name: &str, raw: &str| {
        parse_day(raw).ok_or_else(|| FilterError::InvalidDate { field: name.to_string(), value: raw.to_string() })
    };

    let gte = non_blank(from).map(|raw| parse(from_name, raw)).transpose()?.map(start_of_day);
    let lte = non_blank(to).map(|raw| parse(to_name, raw)).transpose()?.map(end_of_day);

    if gte.is_none() && lte.is_none() {
        return Ok(None);
    }
    Ok(Some(DateRange { gte, lte }))
}
