use crate::shared::api_error::ApiError;
use crate::shared::http::{get_json, post_json};
use contracts::domain::a002_resource::Resource;
use contracts::domain::common::{ApiRecord, BulkRequest};
use contracts::shared::list_query::{ListPayload, ListQuery, Pagination};

pub async fn fetch_resources(query: &ListQuery) -> Result<(Vec<Resource>, Pagination), ApiError> {
    let payload: ListPayload<Resource> = get_json(&Resource::collection_path(), &query.pairs()).await?;
    Ok(payload.into_parts())
}

pub async fn delete_resources(ids: Vec<String>) -> Result<(), ApiError> {
    post_json(&Resource::bulk_path(), &BulkRequest::delete(ids)).await
}
