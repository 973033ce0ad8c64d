use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeSet;

use crate::database::{AgendaStore, DatabaseError};
use crate::filter::{fields, Constraint, DateRange, Predicate, TaskQuery};
use crate::semaforo::calendar::{end_of_day, start_of_day};

/// `compromisso_tarefa` value of appointments.
pub const APPOINTMENT: &str = "Compromisso";
/// `compromisso_tarefa` value of plain tasks.
pub const TASK: &str = "Tarefa";

/// Headline counters of the agenda dashboard. Each one counts distinct tasks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AgendaMetrics {
    pub compromissos: i64,
    pub tarefas: i64,
    /// Tasks starting today.
    pub hoje: i64,
    /// Tasks whose fatal deadline is today.
    pub fatal: i64,
}

/// Count every metric over `base`, which must already be scoped to the caller.
///
/// Each metric overrides whatever `base` says about its own column.
pub async fn collect_metrics(
    store: &dyn AgendaStore,
    today: NaiveDate,
    base: &Predicate,
) -> Result<AgendaMetrics, DatabaseError> {
    let whole_day = || Constraint::Range(DateRange { gte: Some(start_of_day(today)), lte: Some(end_of_day(today)) });

    let (compromissos, tarefas, hoje, fatal) = tokio::try_join!(
        distinct_ids(store, base.clone().with(fields::KIND, Constraint::Eq(APPOINTMENT.into()))),
        distinct_ids(store, base.clone().with(fields::KIND, Constraint::Eq(TASK.into()))),
        distinct_ids(store, base.clone().with(fields::START_DATE, whole_day())),
        distinct_ids(store, base.clone().with(fields::DEADLINE, whole_day())),
    )?;

    Ok(AgendaMetrics { compromissos, tarefas, hoje, fatal })
}

async fn distinct_ids(store: &dyn AgendaStore, predicate: Predicate) -> Result<i64, DatabaseError> {
    let query = TaskQuery::new(predicate).select(&[fields::ID])?;
    let rows = store.find_tasks(&query).await?;
    Ok(rows.iter().map(|t| t.id_legalone).collect::<BTreeSet<_>>().len() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::{MemoryStore, TaskRecord};
    use crate::semaforo::calendar::parse_day;

    fn task(id: i64, kind: &str, start: Option<&str>, deadline: Option<&str>) -> TaskRecord {
        TaskRecord {
            compromisso_tarefa: Some(kind.to_string()),
            inicio_data: start.and_then(parse_day),
            prazo_fatal_data: deadline.and_then(parse_day),
            executante: Some(if id % 2 == 0 { "Bia" } else { "Ana" }.to_string()),
            ..TaskRecord::new(id)
        }
    }

    fn store() -> MemoryStore {
        MemoryStore::with_tasks(vec![
            task(1, APPOINTMENT, Some("2025-06-10"), Some("2025-06-10")),
            task(1, APPOINTMENT, Some("2025-06-10"), Some("2025-06-10")),
            task(2, TASK, Some("2025-06-10"), Some("2025-06-11")),
            task(3, TASK, Some("2025-06-09"), None),
            task(4, APPOINTMENT, None, Some("2025-06-10")),
        ])
    }

    #[tokio::test]
    async fn counts_distinct_tasks_per_metric() {
        let today = parse_day("2025-06-10").unwrap();
        let metrics = collect_metrics(&store(), today, &Predicate::new()).await.unwrap();
        assert_eq!(metrics, AgendaMetrics { compromissos: 2, tarefas: 2, hoje: 2, fatal: 2 });
    }

    #[tokio::test]
    async fn metrics_respect_base_and_override_their_column() {
        let today = parse_day("2025-06-10").unwrap();
        let ana = Predicate::new()
            .with(fields::EXECUTOR, Constraint::Eq("Ana".into()))
            .with(fields::KIND, Constraint::Eq(TASK.into()));
        let metrics = collect_metrics(&store(), today, &ana).await.unwrap();
        assert_eq!(metrics, AgendaMetrics { compromissos: 1, tarefas: 1, hoje: 0, fatal: 0 });

        let denied = collect_metrics(&store(), today, &Predicate::nothing()).await.unwrap();
        assert_eq!(denied, AgendaMetrics::default());
    }
}
