use super::error::FilterError;
use super::fields;
use super::filter_where::{validate_column, FilterWhere};
use super::predicate::Predicate;
use super::types::{Constraint, SortDirection, SqlResult};

/// A SELECT over `agenda_base`: projection, predicate, ordering and paging.
#[derive(Debug, Clone)]
pub struct TaskQuery {
    table_name: String,
    select_columns: Vec<String>,
    predicate: Predicate,
    order: Vec<(String, SortDirection)>,
    limit: Option<i64>,
    offset: Option<i64>,
}

impl TaskQuery {
    pub fn new(predicate: Predicate) -> Self {
        Self {
            table_name: fields::TABLE.to_string(),
            select_columns: vec![],
            predicate,
            order: vec![],
            limit: None,
            offset: None,
        }
    }

    /// Restrict the projection. An empty list selects every known column.
    pub fn select(mut self, columns: &[&str]) -> Result<Self, FilterError> {
        for column in columns {
            validate_column(column)?;
        }
        self.select_columns = columns.iter().map(|c| c.to_string()).collect();
        Ok(self)
    }

    pub fn order_by(mut self, column: &str, direction: SortDirection) -> Result<Self, FilterError> {
        validate_column(column)?;
        self.order.push((column.to_string(), direction));
        Ok(self)
    }

    /// Page the result. Capping is the caller's job; the limit is used as given.
    pub fn limit(mut self, limit: i64, offset: Option<i64>) -> Result<Self, FilterError> {
        if limit < 0 { return Err(FilterError::InvalidLimit("Limit must be non-negative".to_string())); }
        if let Some(off) = offset { if off < 0 { return Err(FilterError::InvalidOffset("Offset must be non-negative".to_string())); } }

        self.limit = Some(limit);
        self.offset = offset;
        Ok(self)
    }

    pub fn predicate(&self) -> &Predicate {
        &self.predicate
    }

    pub fn columns(&self) -> &[String] {
        &self.select_columns
    }

    pub fn ordering(&self) -> &[(String, SortDirection)] {
        &self.order
    }

    pub fn page(&self) -> (Option<i64>, Option<i64>) {
        (self.limit, self.offset)
    }

    pub fn to_sql(&self) -> Result<SqlResult, FilterError> {
        let (where_clause, params) = FilterWhere::generate(&self.predicate, 0)?;

        let query = [
            format!("SELECT {}", self.build_select_clause()),
            format!("FROM \"{}\"", self.table_name),
            format!("WHERE {}", where_clause),
            self.build_order_clause(),
            self.build_limit_clause(),
        ].into_iter().filter(|s| !s.is_empty()).collect::<Vec<_>>().join(" ");

        Ok(SqlResult { query, params })
    }

    pub fn to_count_sql(&self) -> Result<SqlResult, FilterError> {
        let (where_clause, params) = FilterWhere::generate(&self.predicate, 0)?;
        let query = format!("SELECT COUNT(*) AS count FROM \"{}\" WHERE {}", self.table_name, where_clause);
        Ok(SqlResult { query, params })
    }

    /// Distinct non-empty text values of `column` among matching rows.
    pub fn to_distinct_sql(&self, column: &str) -> Result<SqlResult, FilterError> {
        validate_column(column)?;
        let predicate = if self.predicate.is_nothing() {
            self.predicate.clone()
        } else {
            self.predicate.clone().with(column, Constraint::NotNull)
        };
        let (where_clause, params) = FilterWhere::generate(&predicate, 0)?;
        let query = format!(
            "SELECT DISTINCT \"{col}\" AS value FROM \"{table}\" WHERE {where_clause} AND \"{col}\" <> '' ORDER BY \"{col}\"",
            col = column,
            table = self.table_name,
            where_clause = where_clause,
        );
        Ok(SqlResult { query, params })
    }

    /// Earliest and latest value of a date column among matching rows.
    pub fn to_bounds_sql(&self, column: &str) -> Result<SqlResult, FilterError> {
        validate_column(column)?;
        if !fields::DATES.contains(&column) {
            return Err(FilterError::InvalidColumn(format!("Not a date column: {}", column)));
        }
        let predicate = self.predicate.clone().with(column, Constraint::NotNull);
        let (where_clause, params) = FilterWhere::generate(&predicate, 0)?;
        let query = format!(
            "SELECT MIN(\"{col}\") AS min, MAX(\"{col}\") AS max FROM \"{table}\" WHERE {where_clause}",
            col = column,
            table = self.table_name,
            where_clause = where_clause,
        );
        Ok(SqlResult { query, params })
    }

    fn build_select_clause(&self) -> String {
        let columns: Vec<&str> = if self.select_columns.is_empty() {
            fields::ALL.to_vec()
        } else {
            self.select_columns.iter().map(String::as_str).collect()
        };
        columns.iter().map(|c| format!("\"{}\"", c)).collect::<Vec<_>>().join(", ")
    }

    fn build_order_clause(&self) -> String {
        if self.order.is_empty() { return String::new(); }
        let parts: Vec<String> = self.order
            .iter()
            .map(|(column, sort)| format!("\"{}\" {}", column, sort.to_sql()))
            .collect();
        format!("ORDER BY {}", parts.join(", "))
    }

    fn build_limit_clause(&self) -> String {
        match (self.limit, self.offset) {
            (Some(l), Some(o)) => format!("LIMIT {} OFFSET {}", l, o),
            (Some(l), None) => format!("LIMIT {}", l),
            _ => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_projected_ordered_page() {
        let q = TaskQuery::new(Predicate::new().with("status", Constraint::Eq("Pendente".into())))
            .select(&["id_legalone", "prazo_fatal_data"]).unwrap()
            .order_by("id_legalone", SortDirection::Desc).unwrap()
            .limit(10, Some(20)).unwrap();

        let sql = q.to_sql().unwrap();
        assert_eq!(
            sql.query,
            "SELECT \"id_legalone\", \"prazo_fatal_data\" FROM \"agenda_base\" WHERE \"status\" = $1 ORDER BY \"id_legalone\" DESC LIMIT 10 OFFSET 20"
        );
        assert_eq!(sql.params.len(), 1);
    }

    #[test]
    fn default_projection_lists_known_columns() {
        let sql = TaskQuery::new(Predicate::new()).to_sql().unwrap();
        assert!(sql.query.starts_with("SELECT \"id_legalone\", \"compromisso_tarefa\""));
        assert!(sql.query.ends_with("FROM \"agenda_base\" WHERE 1=1"));
    }

    #[test]
    fn counts_with_same_predicate() {
        let sql = TaskQuery::new(Predicate::nothing()).to_count_sql().unwrap();
        assert_eq!(sql.query, "SELECT COUNT(*) AS count FROM \"agenda_base\" WHERE 1=0");
    }

    #[test]
    fn distinct_skips_null_and_blank() {
        let sql = TaskQuery::new(Predicate::new()).to_distinct_sql("status").unwrap();
        assert_eq!(
            sql.query,
            "SELECT DISTINCT \"status\" AS value FROM \"agenda_base\" WHERE \"status\" IS NOT NULL AND \"status\" <> '' ORDER BY \"status\""
        );
    }

    #[test]
    fn limit_is_rendered_as_given() {
        let sql = TaskQuery::new(Predicate::new()).limit(5000, None).unwrap().to_sql().unwrap();
        assert!(sql.query.ends_with("LIMIT 5000"));
    }

    #[test]
    fn bounds_only_for_date_columns() {
        let sql = TaskQuery::new(Predicate::new().with("executante", Constraint::Eq("Ana".into())))
            .to_bounds_sql("inicio_data")
            .unwrap();
        assert_eq!(
            sql.query,
            "SELECT MIN(\"inicio_data\") AS min, MAX(\"inicio_data\") AS max FROM \"agenda_base\" WHERE \"executante\" = $1 AND \"inicio_data\" IS NOT NULL"
        );
        assert!(matches!(TaskQuery::new(Predicate::new()).to_bounds_sql("status"), Err(FilterError::InvalidColumn(_))));
    }

    #[test]
    fn rejects_negative_paging() {
        assert!(matches!(TaskQuery::new(Predicate::new()).limit(-1, None), Err(FilterError::InvalidLimit(_))));
        assert!(matches!(TaskQuery::new(Predicate::new()).limit(5, Some(-2)), Err(FilterError::InvalidOffset(_))));
    }
}
