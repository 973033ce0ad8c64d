use chrono::NaiveDate;
use serde::Serialize;
use std::collections::{BTreeSet, HashMap};

use super::filters::Pagination;
use crate::database::{DateBounds, TaskRecord};
use crate::filter::fields;
use crate::semaforo::{classify, Bucket};

/// Group label for rows with no value in the charted column.
pub const BLANK_LABEL: &str = "(Em branco)";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BucketCount {
    pub categoria: &'static str,
    pub quantidade: i64,
    pub cor: &'static str,
    pub ordem: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BucketSummary {
    pub dados: Vec<BucketCount>,
    pub total: i64,
}

/// Count distinct record ids per bucket, always listing all five in display order.
pub fn summarize_buckets(today: NaiveDate, rows: &[TaskRecord]) -> BucketSummary {
    let mut ids: HashMap<Bucket, BTreeSet<i64>> = HashMap::new();
    for row in rows {
        if let Some(bucket) = classify(today, row.prazo_fatal_data) {
            ids.entry(bucket).or_default().insert(row.id_legalone);
        }
    }

    let dados: Vec<BucketCount> = Bucket::ALL
        .iter()
        .map(|bucket| {
            let display = bucket.display();
            BucketCount {
                categoria: display.label,
                quantidade: ids.get(bucket).map_or(0, |set| set.len() as i64),
                cor: display.color,
                ordem: display.order,
            }
        })
        .collect();
    let total = dados.iter().map(|c| c.quantidade).sum();

    BucketSummary { dados, total }
}

/// Chartable dimensions, keyed by their path segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    Status,
    Executor,
    Type,
    Complexity,
    Folder,
}

impl Dimension {
    pub fn from_path(segment: &str) -> Option<Self> {
        match segment {
            "status" => Some(Dimension::Status),
            "executante" => Some(Dimension::Executor),
            "tipo" => Some(Dimension::Type),
            "complexidade" => Some(Dimension::Complexity),
            "pasta" => Some(Dimension::Folder),
            _ => None,
        }
    }

    pub fn column(self) -> &'static str {
        match self {
            Dimension::Status => fields::STATUS,
            Dimension::Executor => fields::EXECUTOR,
            Dimension::Type => fields::SUBTYPE,
            Dimension::Complexity => fields::LABEL,
            Dimension::Folder => fields::FOLDER,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DimensionCount {
    pub valor: String,
    pub quantidade: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DimensionChart {
    pub dados: Vec<DimensionCount>,
}

/// Distinct record ids per value of `dimension`, largest group first.
pub fn count_by_dimension(rows: &[TaskRecord], dimension: Dimension) -> DimensionChart {
    let mut groups: HashMap<String, BTreeSet<i64>> = HashMap::new();
    for row in rows {
        let value = row
            .text(dimension.column())
            .filter(|v| !v.is_empty())
            .unwrap_or(BLANK_LABEL);
        groups.entry(value.to_string()).or_default().insert(row.id_legalone);
    }

    let mut dados: Vec<DimensionCount> = groups
        .into_iter()
        .map(|(valor, ids)| DimensionCount { valor, quantidade: ids.len() as i64 })
        .collect();
    dados.sort_by(|a, b| b.quantidade.cmp(&a.quantidade).then_with(|| a.valor.cmp(&b.valor)));

    DimensionChart { dados }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageInfo {
    pub total: i64,
    pub page: i64,
    pub limit: i64,
    #[serde(rename = "totalPages")]
    pub total_pages: i64,
}

impl PageInfo {
    pub fn new(total: i64, pagination: Pagination) -> Self {
        let total_pages = if pagination.limit > 0 {
            total.max(0).saturating_add(pagination.limit - 1) / pagination.limit
        } else {
            0
        };
        Self { total, page: pagination.page, limit: pagination.limit, total_pages }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskPage {
    pub dados: Vec<TaskRecord>,
    pub paginacao: PageInfo,
}

/// Dropdown choices for the agenda filter bar.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterOptions {
    pub executantes: Vec<String>,
    pub status: Vec<String>,
    pub complexidades: Vec<String>,
    pub tipos: Vec<String>,
    pub pastas: Vec<String>,
    pub ranges: DateRanges,
}

/// Span of each date column, used to bound the date pickers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRanges {
    pub data_inicio: DateBounds,
    pub conclusao_prevista: DateBounds,
    pub conclusao_efetiva: DateBounds,
    pub prazo_fatal: DateBounds,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::semaforo::calendar::parse_day;

    fn row(id: i64, deadline: Option<&str>, status: Option<&str>) -> TaskRecord {
        TaskRecord {
            prazo_fatal_data: deadline.and_then(parse_day),
            status: status.map(String::from),
            ..TaskRecord::new(id)
        }
    }

    #[test]
    fn summary_lists_every_bucket_in_order() {
        let today = parse_day("2025-06-10").unwrap();
        let rows = vec![
            row(1, Some("2025-06-10"), None),
            row(1, Some("2025-06-10"), None),
            row(2, Some("2025-06-11"), None),
            row(3, Some("2025-06-09"), None),
            row(4, None, None),
            row(5, Some("2025-06-16"), None),
        ];
        let summary = summarize_buckets(today, &rows);

        let labels: Vec<&str> = summary.dados.iter().map(|c| c.categoria).collect();
        assert_eq!(labels, vec!["Possível perda", "Crítico", "Atenção", "Próximo", "Normal"]);
        let counts: Vec<i64> = summary.dados.iter().map(|c| c.quantidade).collect();
        assert_eq!(counts, vec![0, 1, 1, 0, 1]);
        assert_eq!(summary.total, 3);
        assert_eq!(summary.dados[1].cor, "#ef4444");
    }

    #[test]
    fn chart_groups_blanks_and_sorts() {
        let rows = vec![
            row(1, None, Some("Pendente")),
            row(2, None, Some("Cumprido")),
            row(3, None, Some("Pendente")),
            row(4, None, None),
            row(5, None, Some("")),
            row(5, None, Some("")),
        ];
        let chart = count_by_dimension(&rows, Dimension::Status);
        assert_eq!(
            chart.dados,
            vec![
                DimensionCount { valor: BLANK_LABEL.to_string(), quantidade: 2 },
                DimensionCount { valor: "Pendente".to_string(), quantidade: 2 },
                DimensionCount { valor: "Cumprido".to_string(), quantidade: 1 },
            ]
        );
    }

    #[test]
    fn dimensions_map_to_columns() {
        assert_eq!(Dimension::from_path("tipo").map(Dimension::column), Some(fields::SUBTYPE));
        assert_eq!(Dimension::from_path("complexidade").map(Dimension::column), Some(fields::LABEL));
        assert_eq!(Dimension::from_path("pasta").map(Dimension::column), Some(fields::FOLDER));
        assert_eq!(Dimension::from_path("cliente"), None);
    }

    #[test]
    fn page_info_rounds_up() {
        let info = PageInfo::new(201, Pagination { page: 1, limit: 100 });
        assert_eq!(info.total_pages, 3);
        assert_eq!(PageInfo::new(0, Pagination { page: 1, limit: 100 }).total_pages, 0);

        let json = serde_json::to_value(info).unwrap();
        assert_eq!(json["totalPages"], 3);
    }

    #[test]
    fn page_info_survives_extreme_limits() {
        let info = PageInfo::new(10, Pagination { page: 1, limit: i64::MAX });
        assert_eq!(info.total_pages, 1);
        assert_eq!(PageInfo::new(i64::MAX, Pagination { page: 1, limit: 2 }).total_pages, i64::MAX / 2);
    }
}
