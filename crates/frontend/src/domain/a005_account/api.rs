use crate::shared::api_error::ApiError;
use crate::shared::config::config;
use crate::shared::http::get_json;
use contracts::domain::a005_account::{sort_accounts, Account};
use contracts::domain::common::ApiRecord;
use contracts::shared::list_query::{ListPayload, ListQuery};

/// План счетов целиком, в порядке дерева
pub async fn fetch_accounts() -> Result<Vec<Account>, ApiError> {
    let query = ListQuery::new(1, config().lists.search_window);
    let payload: ListPayload<Account> = get_json(&Account::collection_path(), &query.pairs()).await?;
    let (mut items, _) = payload.into_parts();
    sort_accounts(&mut items);
    Ok(items)
}
