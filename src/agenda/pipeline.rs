use chrono::NaiveDate;
use tracing::debug;

use super::filters::{AgendaFilters, Pagination};
use crate::database::{AgendaStore, DatabaseError, TaskRecord};
use crate::filter::fields;
use crate::filter::{Constraint, FilterError, Predicate, SortDirection, TaskQuery};
use crate::permissions::{scope_with, AnonymousAccess, PermissionProfile};
use crate::semaforo::{detect_bucket, retain_bucket, widen_range_for_bucket, Bucket};

/// Who is asking and under which null-profile policy.
#[derive(Debug, Clone, Copy)]
pub struct Caller<'a> {
    pub profile: Option<&'a PermissionProfile>,
    pub anonymous: AnonymousAccess,
}

/// Store predicate for one request, plus the bucket whose exact membership
/// still has to be enforced after the fetch.
#[derive(Debug, Clone, PartialEq)]
pub struct AgendaPlan {
    pub predicate: Predicate,
    pub bucket: Option<Bucket>,
}

impl AgendaPlan {
    /// Filters, bucket detection, widening and scoping, in that order.
    pub fn build(today: NaiveDate, filters: &AgendaFilters, caller: Caller<'_>) -> Result<Self, FilterError> {
        let mut predicate = filters.base_predicate()?;

        let (from, to) = filters.deadline_pair();
        let bucket = detect_bucket(today, from, to);
        match bucket {
            Some(bucket) => {
                debug!(%bucket, "deadline filter selects a bucket, widening");
                predicate.set(fields::DEADLINE, Constraint::Range(widen_range_for_bucket(today, bucket).into()));
            }
            None => {
                if let Some(range) = filters.deadline_range()? {
                    predicate.set(fields::DEADLINE, Constraint::Range(range));
                }
            }
        }

        let predicate = scope_with(caller.profile, predicate, caller.anonymous);
        Ok(Self { predicate, bucket })
    }

    /// Same as [`AgendaPlan::build`] but ignoring the deadline pair and keeping only
    /// rows that have a deadline at all. Used by the bucket summary.
    pub fn build_for_summary(filters: &AgendaFilters, caller: Caller<'_>) -> Result<Self, FilterError> {
        let predicate = scope_with(caller.profile, filters.base_predicate()?, caller.anonymous)
            .with(fields::DEADLINE, Constraint::NotNull);
        Ok(Self { predicate, bucket: None })
    }

    /// Filters and scoping only. The headline metrics set their own date
    /// constraints, so the deadline pair is ignored here too.
    pub fn build_for_metrics(filters: &AgendaFilters, caller: Caller<'_>) -> Result<Self, FilterError> {
        let predicate = scope_with(caller.profile, filters.base_predicate()?, caller.anonymous);
        Ok(Self { predicate, bucket: None })
    }

    /// Every matching row, newest first, re-filtered to the detected bucket.
    ///
    /// An empty `columns` fetches the full record. The deadline column is added
    /// to a narrower projection whenever a bucket has to be re-checked.
    pub async fn fetch(
        &self,
        store: &dyn AgendaStore,
        today: NaiveDate,
        columns: &[&str],
    ) -> Result<Vec<TaskRecord>, DatabaseError> {
        let mut projection = columns.to_vec();
        if self.bucket.is_some() && !projection.is_empty() && !projection.contains(&fields::DEADLINE) {
            projection.push(fields::DEADLINE);
        }

        let query = TaskQuery::new(self.predicate.clone())
            .select(&projection)?
            .order_by(fields::ID, SortDirection::Desc)?;
        let rows = store.find_tasks(&query).await?;

        Ok(self.refilter(today, rows))
    }

    /// One page of full records and the total number of matches.
    ///
    /// Without a bucket the store paginates and counts. With one, the loose
    /// candidate set is fetched whole so the count reflects the exact bucket.
    pub async fn fetch_page(
        &self,
        store: &dyn AgendaStore,
        today: NaiveDate,
        pagination: Pagination,
    ) -> Result<(Vec<TaskRecord>, i64), DatabaseError> {
        if self.bucket.is_some() {
            let rows = self.fetch(store, today, &[]).await?;
            let total = rows.len() as i64;
            let page = rows
                .into_iter()
                .skip(pagination.offset().max(0) as usize)
                .take(pagination.limit.max(0) as usize)
                .collect();
            return Ok((page, total));
        }

        let total = store.count_tasks(&self.predicate).await?;
        let query = TaskQuery::new(self.predicate.clone())
            .order_by(fields::ID, SortDirection::Desc)?
            .limit(pagination.limit, Some(pagination.offset()))?;
        let rows = store.find_tasks(&query).await?;
        Ok((rows, total))
    }

    fn refilter(&self, today: NaiveDate, rows: Vec<TaskRecord>) -> Vec<TaskRecord> {
        let Some(bucket) = self.bucket else { return rows };
        let fetched = rows.len();
        let kept = retain_bucket(today, rows, bucket);
        debug!(%bucket, fetched, kept = kept.len(), "re-filtered rows to exact bucket");
        kept
    }
}
