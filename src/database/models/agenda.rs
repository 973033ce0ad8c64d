use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::filter::fields;
use crate::filter::{FilterTarget, FilterValue};
use crate::permissions::ExecutorOf;
use crate::semaforo::calendar::start_of_day;
use crate::semaforo::Deadline;

/// A row of `agenda_base`. Columns left out of a projection come back as `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, FromRow)]
pub struct TaskRecord {
    pub id_legalone: i64,
    #[sqlx(default)]
    pub compromisso_tarefa: Option<String>,
    #[sqlx(default)]
    pub tipo: Option<String>,
    #[sqlx(default)]
    pub subtipo: Option<String>,
    #[sqlx(default)]
    pub etiqueta: Option<String>,
    #[sqlx(default)]
    pub inicio_data: Option<NaiveDate>,
    #[sqlx(default)]
    pub conclusao_prevista_data: Option<NaiveDate>,
    #[sqlx(default)]
    pub conclusao_efetiva_data: Option<NaiveDate>,
    #[sqlx(default)]
    pub prazo_fatal_data: Option<NaiveDate>,
    #[sqlx(default)]
    pub pasta_proc: Option<String>,
    #[sqlx(default)]
    pub numero_cnj: Option<String>,
    #[sqlx(default)]
    pub executante: Option<String>,
    #[sqlx(default)]
    pub descricao: Option<String>,
    #[sqlx(default)]
    pub status: Option<String>,
    #[sqlx(default)]
    pub link: Option<String>,
}

impl TaskRecord {
    pub fn new(id_legalone: i64) -> Self {
        Self { id_legalone, ..Default::default() }
    }

    /// Text value of a grouping column.
    pub fn text(&self, column: &str) -> Option<&str> {
        match column {
            fields::KIND => self.compromisso_tarefa.as_deref(),
            fields::TYPE => self.tipo.as_deref(),
            fields::SUBTYPE => self.subtipo.as_deref(),
            fields::LABEL => self.etiqueta.as_deref(),
            fields::FOLDER => self.pasta_proc.as_deref(),
            fields::CNJ_NUMBER => self.numero_cnj.as_deref(),
            fields::EXECUTOR => self.executante.as_deref(),
            fields::DESCRIPTION => self.descricao.as_deref(),
            fields::STATUS => self.status.as_deref(),
            fields::LINK => self.link.as_deref(),
            _ => None,
        }
    }

    fn date(&self, column: &str) -> Option<NaiveDate> {
        match column {
            fields::START_DATE => self.inicio_data,
            fields::EXPECTED_END_DATE => self.conclusao_prevista_data,
            fields::ACTUAL_END_DATE => self.conclusao_efetiva_data,
            fields::DEADLINE => self.prazo_fatal_data,
            _ => None,
        }
    }
}

impl FilterTarget for TaskRecord {
    fn field_value(&self, column: &str) -> Option<FilterValue> {
        if column == fields::ID {
            return Some(FilterValue::Int(self.id_legalone));
        }
        if let Some(day) = self.date(column) {
            return Some(FilterValue::Timestamp(start_of_day(day)));
        }
        self.text(column).map(FilterValue::from)
    }
}

impl Deadline for TaskRecord {
    fn deadline(&self) -> Option<NaiveDate> {
        self.prazo_fatal_data
    }
}

impl ExecutorOf for TaskRecord {
    fn executor(&self) -> Option<&str> {
        self.executante.as_deref()
    }
}
