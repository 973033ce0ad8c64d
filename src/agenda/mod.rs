//! Request orchestration for the agenda dashboard: parse filters, detect and
//! widen a deadline bucket, scope to the caller, fetch, then re-filter exactly.

pub mod aggregate;
pub mod filters;
pub mod metrics;
pub mod pipeline;

use chrono::NaiveDate;

pub use aggregate::{
    count_by_dimension, summarize_buckets, BucketCount, BucketSummary, Dimension, DimensionChart, DimensionCount,
    DateRanges, FilterOptions, PageInfo, TaskPage,
};
pub use filters::{AgendaFilters, Pagination};
pub use metrics::{collect_metrics, AgendaMetrics};
pub use pipeline::{AgendaPlan, Caller};

/// Source of "today" for a request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Clock {
    #[default]
    System,
    Fixed(NaiveDate),
}

impl Clock {
    pub fn today(&self) -> NaiveDate {
        match self {
            Clock::System => crate::semaforo::calendar::today(),
            Clock::Fixed(day) => *day,
        }
    }
}
