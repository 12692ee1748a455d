use crate::shared::api_error::ApiError;
use crate::shared::http::{get_json, post_json};
use contracts::domain::a004_contact::{Contact, ContactFilters, SalesOwner, SalesOwnersResponse};
use contracts::domain::common::{ApiRecord, BulkRequest};
use contracts::shared::list_query::{ListPayload, ListQuery, Pagination};

pub async fn fetch_contacts(
    filters: &ContactFilters,
    page: usize,
    limit: usize,
) -> Result<(Vec<Contact>, Pagination), ApiError> {
    let query = filters
        .query_params()
        .into_iter()
        .fold(ListQuery::new(page, limit), |q, (name, value)| q.param(name, value));
    let payload: ListPayload<Contact> = get_json(&Contact::collection_path(), &query.pairs()).await?;
    Ok(payload.into_parts())
}

/// Комерсанты для назначения контактам
pub async fn fetch_sales_owners() -> Result<Vec<SalesOwner>, ApiError> {
    let response: SalesOwnersResponse = get_json("/api/public/comerciales", &[]).await?;
    Ok(response.users)
}

pub async fn delete_contacts(ids: Vec<String>) -> Result<(), ApiError> {
    post_json(&Contact::bulk_path(), &BulkRequest::delete(ids)).await
}
