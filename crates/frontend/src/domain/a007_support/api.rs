use crate::shared::api_error::ApiError;
use crate::shared::http::{get_json, post_json};
use crate::shared::list_edit::save_patches;
use contracts::domain::a007_support::{Support, SupportFilters, SupportPatch, SupportStatus};
use contracts::domain::common::{ApiRecord, BulkRequest};
use contracts::shared::list_query::{ListPayload, ListQuery, Pagination};
use contracts::shared::save_report::SaveReport;
use std::collections::BTreeMap;

pub async fn fetch_supports(
    filters: &SupportFilters,
    page: usize,
    limit: usize,
) -> Result<(Vec<Support>, Pagination), ApiError> {
    let query = filters
        .query_params()
        .into_iter()
        .fold(ListQuery::new(page, limit), |q, (name, value)| q.param(name, value));
    let payload: ListPayload<Support> = get_json(&Support::collection_path(), &query.pairs()).await?;
    Ok(payload.into_parts())
}

/// PUT полной записи: правка накладывается на загруженную версию.
/// Записи, которых нет среди загруженных, считаются неудачными.
pub async fn save_supports(changes: BTreeMap<String, SupportPatch>, loaded: &[Support]) -> SaveReport {
    let mut missing = Vec::new();
    let mut records = BTreeMap::new();
    for (id, patch) in changes {
        match loaded.iter().find(|s| s.id == id) {
            Some(base) => {
                records.insert(id, base.with_patch(&patch));
            }
            None => missing.push(id),
        }
    }

    let mut report = save_patches(records, Support::item_path).await;
    for id in missing {
        report.record(id, Err("registro no cargado".to_string()));
    }
    report
}

pub async fn set_status(ids: Vec<String>, status: SupportStatus) -> Result<(), ApiError> {
    post_json(&Support::bulk_path(), &BulkRequest::update(ids, SupportPatch::status(status))).await
}

pub async fn delete_supports(ids: Vec<String>) -> Result<(), ApiError> {
    post_json(&Support::bulk_path(), &BulkRequest::delete(ids)).await
}
