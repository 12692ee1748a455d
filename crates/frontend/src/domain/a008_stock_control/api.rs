//! Загрузка ресурсов и расходников для матрицы остатков и запись Control de Stock

use crate::domain::a002_resource::api::fetch_resources;
use crate::domain::a003_consumable::api::fetch_consumables;
use crate::shared::api_error::ApiError;
use crate::shared::bulk_save::run_all;
use crate::shared::config::config;
use crate::shared::http::put_json;
use contracts::domain::a002_resource::Resource;
use contracts::domain::a003_consumable::Consumable;
use contracts::domain::a008_stock_control::{RecordWrite, WritePlan};
use contracts::shared::list_query::ListQuery;
use contracts::shared::save_report::SaveReport;
use futures::future::try_join;
use std::collections::BTreeSet;

/// Ресурсы и расходники одной выборкой, параллельно
pub async fn fetch_sources() -> Result<(Vec<Resource>, Vec<Consumable>), ApiError> {
    let query = ListQuery::new(1, config().lists.search_window);
    let ((resources, _), (consumables, _)) =
        try_join(fetch_resources(&query), fetch_consumables(&query)).await?;
    Ok((resources, consumables))
}

fn write_label(write: &RecordWrite) -> String {
    format!("{} {}", write.kind.label(), write.record_id)
}

/// Один PUT на запись; все записи параллельно.
/// Строки без загруженной записи идут в отчёт как неудачные.
pub async fn save_plan(plan: &WritePlan) -> SaveReport {
    let jobs = plan
        .writes
        .iter()
        .map(|write| {
            let path = write.path.clone();
            let body = write.body();
            (write_label(write), async move { put_json(&path, &body).await })
        })
        .collect();
    let mut report = run_all(jobs).await;
    plan.record_skipped(&mut report);
    report
}

/// Строки, вошедшие в успешно записанные записи
pub fn saved_rows(plan: &WritePlan, report: &SaveReport) -> BTreeSet<String> {
    plan.writes
        .iter()
        .filter(|write| report.succeeded.contains(&write_label(write)))
        .flat_map(|write| write.row_ids.iter().cloned())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a008_stock_control::{ControlStock, ItemKind};
    use futures::executor::block_on;

    fn write(kind: ItemKind, record_id: &str, rows: &[&str]) -> RecordWrite {
        RecordWrite {
            kind,
            record_id: record_id.to_string(),
            path: kind.item_path(record_id),
            control_stock: ControlStock::default(),
            row_ids: rows.iter().map(|r| r.to_string()).collect(),
        }
    }

    #[test]
    fn test_only_rows_of_saved_records_settle() {
        let plan = WritePlan {
            writes: vec![
                write(ItemKind::Resource, "r1", &["r1-a", "r1-b"]),
                write(ItemKind::Consumable, "c9", &["c9-a"]),
            ],
            skipped: Vec::new(),
        };
        let mut report = SaveReport::new();
        report.record("recurso r1", Ok(()));
        report.record("consumible c9", Err("HTTP 500".to_string()));

        let rows = saved_rows(&plan, &report);
        assert_eq!(rows.into_iter().collect::<Vec<_>>(), vec!["r1-a", "r1-b"]);
    }

    #[test]
    fn test_plan_with_only_missing_rows_reports_failures() {
        let plan = WritePlan {
            writes: Vec::new(),
            skipped: vec!["r1-0-La Paz".to_string()],
        };
        let report = block_on(save_plan(&plan));
        assert!(!report.is_empty());
        assert_eq!(report.failed.len(), 1);
        assert!(saved_rows(&plan, &report).is_empty());
    }
}
