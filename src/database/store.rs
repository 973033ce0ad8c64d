use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Serialize;

use crate::database::manager::DatabaseError;
use crate::database::models::{TaskRecord, UserPermissionRow};
use crate::filter::{Predicate, TaskQuery};

/// Earliest and latest value of a date column; both `None` when no row has one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DateBounds {
    pub min: Option<NaiveDate>,
    pub max: Option<NaiveDate>,
}

/// Storage the agenda endpoints read from.
#[async_trait]
pub trait AgendaStore: Send + Sync {
    /// Rows matching the query, honouring its projection, order and paging.
    async fn find_tasks(&self, query: &TaskQuery) -> Result<Vec<TaskRecord>, DatabaseError>;

    async fn count_tasks(&self, predicate: &Predicate) -> Result<i64, DatabaseError>;

    /// Sorted distinct non-empty values of a text column among matching rows.
    async fn distinct_values(&self, column: &str, predicate: &Predicate) -> Result<Vec<String>, DatabaseError>;

    /// Bounds of a date column among matching rows.
    async fn date_bounds(&self, column: &str, predicate: &Predicate) -> Result<DateBounds, DatabaseError>;

    async fn find_user_permissions(&self, user_id: &str) -> Result<Option<UserPermissionRow>, DatabaseError>;

    async fn health_check(&self) -> Result<(), DatabaseError>;
}
