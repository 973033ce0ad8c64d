use super::error::FilterError;
use super::fields;
use super::predicate::Predicate;
use super::types::{Constraint, FilterValue};

/// Renders a [`Predicate`] as a parameterised SQL WHERE clause.
pub struct FilterWhere {
    param_values: Vec<FilterValue>,
    param_index: usize,
}

impl FilterWhere {
    pub fn new(starting_param_index: usize) -> Self {
        Self {
            param_values: vec![],
            param_index: starting_param_index,
        }
    }

    pub fn generate(predicate: &Predicate, starting_param_index: usize) -> Result<(String, Vec<FilterValue>), FilterError> {
        let mut filter_where = Self::new(starting_param_index);
        filter_where.build(predicate)
    }

    fn build(&mut self, predicate: &Predicate) -> Result<(String, Vec<FilterValue>), FilterError> {
        if predicate.is_nothing() {
            return Ok(("1=0".to_string(), vec![]));
        }

        let mut sql_conditions = vec![];
        for (column, constraint) in predicate.iter() {
            validate_column(column)?;
            sql_conditions.push(self.build_sql_condition(column, constraint));
        }

        let where_clause = if sql_conditions.is_empty() { "1=1".to_string() } else { sql_conditions.join(" AND ") };
        Ok((where_clause, std::mem::take(&mut self.param_values)))
    }

    fn build_sql_condition(&mut self, column: &str, constraint: &Constraint) -> String {
        let quoted_column = format!("\"{}\"", column);
        match constraint {
            Constraint::Eq(value) => format!("{} = {}", quoted_column, self.param(value.clone())),
            Constraint::In(values) => {
                if values.is_empty() {
                    return "1=0".to_string();
                }
                let params: Vec<String> = values.iter().map(|v| self.param(v.clone())).collect();
                format!("{} IN ({})", quoted_column, params.join(", "))
            }
            Constraint::Range(range) => {
                let mut parts = vec![format!("{} IS NOT NULL", quoted_column)];
                if let Some(gte) = range.gte {
                    parts.push(format!("{} >= {}", quoted_column, self.param(gte.into())));
                }
                if let Some(lte) = range.lte {
                    parts.push(format!("{} <= {}", quoted_column, self.param(lte.into())));
                }
                parts.join(" AND ")
            }
            Constraint::NotNull => format!("{} IS NOT NULL", quoted_column),
        }
    }

    fn param(&mut self, value: FilterValue) -> String {
        self.param_values.push(value);
        self.param_index += 1;
        format!("${}", self.param_index)
    }
}

pub(crate) fn validate_column(column: &str) -> Result<(), FilterError> {
    let mut chars = column.chars();
    let valid = match chars.next() {
        Some(first) => (first.is_ascii_alphabetic() || first == '_') && chars.all(|c| c.is_ascii_alphanumeric() || c == '_'),
        None => false,
    };
    if !valid {
        return Err(FilterError::InvalidColumn(format!("Invalid column name format: {}", column)));
    }
    if !fields::ALL.contains(&column) {
        return Err(FilterError::InvalidColumn(format!("Unknown column: {}", column)));
    }
    Ok(())
}
