use crate::shared::api_error::ApiError;
use crate::shared::http::get_json;
use contracts::system::permissions::{PermissionMatrix, PermissionsResponse};

/// Матрица прав текущего пользователя
pub async fn fetch_permissions() -> Result<PermissionMatrix, ApiError> {
    let response: PermissionsResponse = get_json("/api/permisos", &[]).await?;
    Ok(response.permisos)
}
