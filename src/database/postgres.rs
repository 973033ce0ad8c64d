use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{self, postgres::PgArguments, PgPool, Row};

use crate::database::manager::{DatabaseError, DatabaseManager};
use crate::database::models::{TaskRecord, UserPermissionRow};
use crate::database::store::{AgendaStore, DateBounds};
use crate::filter::{FilterValue, Predicate, SqlResult, TaskQuery};

/// [`AgendaStore`] backed by the portal's Postgres database.
#[derive(Clone)]
pub struct PgAgendaStore {
    pool: PgPool,
    log_sql: bool,
}

impl PgAgendaStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool, log_sql: false }
    }

    /// Emit each generated statement as a `debug!` event.
    pub fn with_sql_logging(mut self, enabled: bool) -> Self {
        self.log_sql = enabled;
        self
    }

    fn trace(&self, operation: &'static str, sql: &SqlResult) {
        if self.log_sql {
            tracing::debug!(sql = %sql.query, params = sql.params.len(), "{}", operation);
        }
    }
}

#[async_trait]
impl AgendaStore for PgAgendaStore {
    async fn find_tasks(&self, query: &TaskQuery) -> Result<Vec<TaskRecord>, DatabaseError> {
        let sql_result = query.to_sql()?;
        self.trace("find_tasks", &sql_result);
        let mut q = sqlx::query_as::<_, TaskRecord>(&sql_result.query);
        for p in sql_result.params.iter() {
            q = bind_param_query_as(q, p);
        }
        Ok(q.fetch_all(&self.pool).await?)
    }

    async fn count_tasks(&self, predicate: &Predicate) -> Result<i64, DatabaseError> {
        let sql_result = TaskQuery::new(predicate.clone()).to_count_sql()?;
        self.trace("count_tasks", &sql_result);
        let mut q = sqlx::query(&sql_result.query);
        for p in sql_result.params.iter() {
            q = bind_param_query(q, p);
        }
        let row = q.fetch_one(&self.pool).await?;
        let count: i64 = row.try_get("count")?;
        Ok(count)
    }

    async fn distinct_values(&self, column: &str, predicate: &Predicate) -> Result<Vec<String>, DatabaseError> {
        let sql_result = TaskQuery::new(predicate.clone()).to_distinct_sql(column)?;
        self.trace("distinct_values", &sql_result);
        let mut q = sqlx::query(&sql_result.query);
        for p in sql_result.params.iter() {
            q = bind_param_query(q, p);
        }
        let rows = q.fetch_all(&self.pool).await?;
        rows.iter()
            .map(|row| row.try_get::<String, _>("value").map_err(DatabaseError::from))
            .collect()
    }

    async fn date_bounds(&self, column: &str, predicate: &Predicate) -> Result<DateBounds, DatabaseError> {
        let sql_result = TaskQuery::new(predicate.clone()).to_bounds_sql(column)?;
        self.trace("date_bounds", &sql_result);
        let mut q = sqlx::query(&sql_result.query);
        for p in sql_result.params.iter() {
            q = bind_param_query(q, p);
        }
        let row = q.fetch_one(&self.pool).await?;
        Ok(DateBounds {
            min: row.try_get::<Option<NaiveDate>, _>("min")?,
            max: row.try_get::<Option<NaiveDate>, _>("max")?,
        })
    }

    async fn find_user_permissions(&self, user_id: &str) -> Result<Option<UserPermissionRow>, DatabaseError> {
        let row = sqlx::query_as::<_, UserPermissionRow>(
            "SELECT id::text AS id, role, ativo, paginas_autorizadas, executantes_autorizados
             FROM usuarios
             WHERE id::text = $1"
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn health_check(&self) -> Result<(), DatabaseError> {
        DatabaseManager::health_check(&self.pool).await
    }
}

fn bind_param_query<'q>(
    q: sqlx::query::Query<'q, sqlx::Postgres, PgArguments>,
    v: &'q FilterValue,
) -> sqlx::query::Query<'q, sqlx::Postgres, PgArguments> {
    match v {
        FilterValue::Text(s) => q.bind(s.as_str()),
        FilterValue::Int(i) => q.bind(*i),
        FilterValue::Timestamp(t) => q.bind(*t),
    }
}

fn bind_param_query_as<'q, O>(
    q: sqlx::query::QueryAs<'q, sqlx::Postgres, O, PgArguments>,
    v: &'q FilterValue,
) -> sqlx::query::QueryAs<'q, sqlx::Postgres, O, PgArguments>
where
    O: for<'r> sqlx::FromRow<'r, sqlx::postgres::PgRow>,
{
    match v {
        FilterValue::Text(s) => q.bind(s.as_str()),
        FilterValue::Int(i) => q.bind(*i),
        FilterValue::Timestamp(t) => q.bind(*t),
    }
}
