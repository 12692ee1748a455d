use crate::shared::api_error::ApiError;
use crate::shared::http::{get_json, post_json};
use contracts::domain::a003_consumable::Consumable;
use contracts::domain::common::{ApiRecord, BulkRequest};
use contracts::shared::list_query::{ListPayload, ListQuery, Pagination};

pub async fn fetch_consumables(query: &ListQuery) -> Result<(Vec<Consumable>, Pagination), ApiError> {
    let payload: ListPayload<Consumable> =
        get_json(&Consumable::collection_path(), &query.pairs()).await?;
    Ok(payload.into_parts())
}

pub async fn delete_consumables(ids: Vec<String>) -> Result<(), ApiError> {
    post_json(&Consumable::bulk_path(), &BulkRequest::delete(ids)).await
}
