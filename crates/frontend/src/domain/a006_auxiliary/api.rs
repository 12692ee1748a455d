use crate::shared::api_error::ApiError;
use crate::shared::config::config;
use crate::shared::http::get_json;
use contracts::domain::a006_auxiliary::Auxiliary;
use contracts::domain::common::ApiRecord;
use contracts::shared::list_query::{ListPayload, ListQuery};

pub async fn fetch_auxiliaries() -> Result<Vec<Auxiliary>, ApiError> {
    let query = ListQuery::new(1, config().lists.search_window);
    let payload: ListPayload<Auxiliary> =
        get_json(&Auxiliary::collection_path(), &query.pairs()).await?;
    Ok(payload.into_parts().0)
}
