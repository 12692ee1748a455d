//! Тонкая обёртка над gloo-net для REST API панели.
//! Все функции принимают путь "/api/..." и возвращают `ApiError`.

use super::api_error::ApiError;
use super::api_utils::{api_url, with_query};
use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

fn no_cache(builder: RequestBuilder) -> RequestBuilder {
    builder
        .header("Cache-Control", "no-cache, no-store, must-revalidate")
        .header("Pragma", "no-cache")
}

async fn checked(result: Result<Response, gloo_net::Error>) -> Result<Response, ApiError> {
    let response = result.map_err(|e| ApiError::Network(e.to_string()))?;
    if response.ok() {
        return Ok(response);
    }
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    Err(ApiError::from_response(status, &body))
}

pub async fn get_json<T: DeserializeOwned>(
    path: &str,
    params: &[(String, String)],
) -> Result<T, ApiError> {
    let url = with_query(&api_url(path), params);
    log::debug!("GET {}", url);
    let response = checked(no_cache(Request::get(&url)).send().await).await?;
    response
        .json::<T>()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}

async fn send_with_body<B: Serialize>(builder: RequestBuilder, body: &B) -> Result<Response, ApiError> {
    let request = builder
        .json(body)
        .map_err(|e| ApiError::Decode(e.to_string()))?;
    checked(request.send().await).await
}

pub async fn put_json<B: Serialize>(path: &str, body: &B) -> Result<(), ApiError> {
    log::debug!("PUT {}", path);
    send_with_body(Request::put(&api_url(path)), body).await?;
    Ok(())
}

pub async fn patch_json<B: Serialize>(path: &str, body: &B) -> Result<(), ApiError> {
    log::debug!("PATCH {}", path);
    send_with_body(Request::patch(&api_url(path)), body).await?;
    Ok(())
}

pub async fn post_json<B: Serialize>(path: &str, body: &B) -> Result<(), ApiError> {
    log::debug!("POST {}", path);
    send_with_body(Request::post(&api_url(path)), body).await?;
    Ok(())
}

pub async fn delete(path: &str) -> Result<(), ApiError> {
    log::debug!("DELETE {}", path);
    checked(Request::delete(&api_url(path)).send().await).await?;
    Ok(())
}
