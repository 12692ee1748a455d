use crate::shared::api_error::ApiError;
use crate::shared::http::{get_json, post_json, put_json};
use contracts::domain::a001_product::{Product, ProductPatch};
use contracts::domain::common::{ApiRecord, BulkRequest};
use contracts::shared::list_query::{ListPayload, ListQuery, Pagination};

pub async fn fetch_products(query: &ListQuery) -> Result<(Vec<Product>, Pagination), ApiError> {
    let payload: ListPayload<Product> = get_json(&Product::collection_path(), &query.pairs()).await?;
    Ok(payload.into_parts())
}

pub async fn update_product(id: &str, patch: &ProductPatch) -> Result<(), ApiError> {
    put_json(&Product::item_path(id), patch).await
}

pub async fn delete_products(ids: Vec<String>) -> Result<(), ApiError> {
    post_json(&Product::bulk_path(), &BulkRequest::delete(ids)).await
}
