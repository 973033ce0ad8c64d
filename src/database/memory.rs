use async_trait::async_trait;
use std::cmp::Ordering;
use std::collections::{BTreeSet, HashMap};
use std::sync::RwLock;

use crate::database::manager::DatabaseError;
use crate::database::models::{TaskRecord, UserPermissionRow};
use crate::database::store::{AgendaStore, DateBounds};
use crate::filter::{FilterTarget, FilterValue, Predicate, SortDirection, TaskQuery};

/// In-process [`AgendaStore`] used by tests and the CLI fixtures.
///
/// Evaluates predicates with [`Predicate::matches`], so it has to agree with the
/// SQL that `FilterWhere` renders for the same predicate.
#[derive(Default)]
pub struct MemoryStore {
    tasks: RwLock<Vec<TaskRecord>>,
    users: RwLock<HashMap<String, UserPermissionRow>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tasks(tasks: Vec<TaskRecord>) -> Self {
        Self { tasks: RwLock::new(tasks), ..Default::default() }
    }

    pub fn insert_user(&self, row: UserPermissionRow) -> Result<(), DatabaseError> {
        self.users.write().map_err(poisoned)?.insert(row.id.clone(), row);
        Ok(())
    }

    fn matching(&self, predicate: &Predicate) -> Result<Vec<TaskRecord>, DatabaseError> {
        let tasks = self.tasks.read().map_err(poisoned)?;
        Ok(tasks.iter().filter(|t| predicate.matches(*t)).cloned().collect())
    }
}

fn poisoned<T>(_: T) -> DatabaseError {
    DatabaseError::Unavailable("memory store lock poisoned".to_string())
}

fn compare(a: &TaskRecord, b: &TaskRecord, ordering: &[(String, SortDirection)]) -> Ordering {
    for (column, direction) in ordering {
        // NULLs sort last ascending, first descending, like Postgres
        let ord = match (a.field_value(column), b.field_value(column)) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Greater,
            (Some(_), None) => Ordering::Less,
            (Some(x), Some(y)) => x.cmp(&y),
        };
        let ord = match direction {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        };
        if ord != Ordering::Equal {
            return ord;
        }
    }
    Ordering::Equal
}

/// Blank out the columns a projection leaves unselected.
fn project(task: TaskRecord, columns: &[String]) -> TaskRecord {
    if columns.is_empty() {
        return task;
    }
    let keep = |name: &str| columns.iter().any(|c| c == name);
    TaskRecord {
        id_legalone: task.id_legalone,
        compromisso_tarefa: task.compromisso_tarefa.filter(|_| keep("compromisso_tarefa")),
        tipo: task.tipo.filter(|_| keep("tipo")),
        subtipo: task.subtipo.filter(|_| keep("subtipo")),
        etiqueta: task.etiqueta.filter(|_| keep("etiqueta")),
        inicio_data: task.inicio_data.filter(|_| keep("inicio_data")),
        conclusao_prevista_data: task.conclusao_prevista_data.filter(|_| keep("conclusao_prevista_data")),
        conclusao_efetiva_data: task.conclusao_efetiva_data.filter(|_| keep("conclusao_efetiva_data")),
        prazo_fatal_data: task.prazo_fatal_data.filter(|_| keep("prazo_fatal_data")),
        pasta_proc: task.pasta_proc.filter(|_| keep("pasta_proc")),
        numero_cnj: task.numero_cnj.filter(|_| keep("numero_cnj")),
        executante: task.executante.filter(|_| keep("executante")),
        descricao: task.descricao.filter(|_| keep("descricao")),
        status: task.status.filter(|_| keep("status")),
        link: task.link.filter(|_| keep("link")),
    }
}

#[async_trait]
impl AgendaStore for MemoryStore {
    async fn find_tasks(&self, query: &TaskQuery) -> Result<Vec<TaskRecord>, DatabaseError> {
        let mut rows = self.matching(query.predicate())?;
        rows.sort_by(|a, b| compare(a, b, query.ordering()));

        let (limit, offset) = query.page();
        let offset = offset.unwrap_or(0).max(0) as usize;
        let limit = limit.map_or(usize::MAX, |l| l.max(0) as usize);

        Ok(rows
            .into_iter()
            .skip(offset)
            .take(limit)
            .map(|t| project(t, query.columns()))
            .collect())
    }

    async fn count_tasks(&self, predicate: &Predicate) -> Result<i64, DatabaseError> {
        Ok(self.matching(predicate)?.len() as i64)
    }

    async fn distinct_values(&self, column: &str, predicate: &Predicate) -> Result<Vec<String>, DatabaseError> {
        // same column validation as the SQL path
        TaskQuery::new(Predicate::new()).to_distinct_sql(column)?;
        let values: BTreeSet<String> = self
            .matching(predicate)?
            .iter()
            .filter_map(|t| t.text(column).map(str::to_string))
            .filter(|v| !v.is_empty())
            .collect();
        Ok(values.into_iter().collect())
    }

    async fn date_bounds(&self, column: &str, predicate: &Predicate) -> Result<DateBounds, DatabaseError> {
        TaskQuery::new(Predicate::new()).to_bounds_sql(column)?;
        let days: Vec<_> = self
            .matching(predicate)?
            .iter()
            .filter_map(|t| match t.field_value(column) {
                Some(FilterValue::Timestamp(at)) => Some(at.date()),
                _ => None,
            })
            .collect();
        Ok(DateBounds {
            min: days.iter().min().copied(),
            max: days.iter().max().copied(),
        })
    }

    async fn find_user_permissions(&self, user_id: &str) -> Result<Option<UserPermissionRow>, DatabaseError> {
        Ok(self.users.read().map_err(poisoned)?.get(user_id).cloned())
    }

    async fn health_check(&self) -> Result<(), DatabaseError> {
        let _tasks = self.tasks.read().map_err(poisoned)?;
        Ok(())
    }
}
