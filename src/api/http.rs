//! HTTP Wrapper
//!
//! Thin layer over `gloo-net` shared by every resource module:
//! base URL, JSON headers, bearer token, error normalization and 204 handling.

use gloo_net::http::{Method, RequestBuilder};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config;
use crate::error::{ApiError, ApiResult};

/// Characters left unescaped in form-urlencoded query components
const QUERY_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'*')
    .remove(b'-')
    .remove(b'.')
    .remove(b'_');

// ========================
// Token Storage
// ========================

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

pub fn load_token() -> Option<String> {
    local_storage()?
        .get_item(config::TOKEN_STORAGE_KEY)
        .ok()
        .flatten()
        .filter(|t| !t.is_empty())
}

pub fn store_token(token: &str) {
    if let Some(storage) = local_storage() {
        let _ = storage.set_item(config::TOKEN_STORAGE_KEY, token);
    }
}

pub fn clear_token() {
    if let Some(storage) = local_storage() {
        let _ = storage.remove_item(config::TOKEN_STORAGE_KEY);
    }
}

/// Broadcast a 401 so the auth context can drop its state
fn notify_unauthorized() {
    let Some(win) = web_sys::window() else { return };
    if let Ok(event) = web_sys::CustomEvent::new(config::UNAUTHORIZED_EVENT) {
        let _ = win.dispatch_event(&event);
    }
}

// ========================
// URL Helpers
// ========================

/// Join the configured base with an API path
pub fn endpoint_url(base: &str, path: &str) -> String {
    if base.is_empty() {
        path.to_string()
    } else {
        format!("{}{}", base, path)
    }
}

/// `application/x-www-form-urlencoded` component: spaces become `+`
pub fn form_encode(raw: &str) -> String {
    utf8_percent_encode(raw, QUERY_ENCODE_SET).to_string().replace("%20", "+")
}

/// Ordered query parameters. Absent values are skipped, lists repeat their key.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, key: &str, value: impl ToString) -> &mut Self {
        self.pairs.push((key.to_string(), value.to_string()));
        self
    }

    pub fn push_opt<T: ToString>(&mut self, key: &str, value: Option<T>) -> &mut Self {
        if let Some(v) = value {
            self.push(key, v);
        }
        self
    }

    pub fn push_all<T: ToString>(&mut self, key: &str, values: impl IntoIterator<Item = T>) -> &mut Self {
        for v in values {
            self.push(key, v);
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// `""` when empty, otherwise `?k=v&...`
    pub fn to_query_string(&self) -> String {
        if self.pairs.is_empty() {
            return String::new();
        }
        let joined = self
            .pairs
            .iter()
            .map(|(k, v)| format!("{}={}", form_encode(k), form_encode(v)))
            .collect::<Vec<_>>()
            .join("&");
        format!("?{}", joined)
    }
}

// ========================
// Requests
// ========================

async fn send(method: Method, path: &str, body: Option<String>) -> ApiResult<gloo_net::http::Response> {
    let url = endpoint_url(&config::api_base_url(), path);
    let method_name = method.to_string();

    let mut builder = RequestBuilder::new(&url)
        .method(method)
        .header("Content-Type", "application/json");
    if let Some(token) = load_token() {
        builder = builder.header("Authorization", &format!("Bearer {}", token));
    }

    let request = match body {
        Some(text) => builder.body(text),
        None => builder.build(),
    }
    .map_err(|e| ApiError::Encode(e.to_string()))?;

    let response = request
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;

    if !response.ok() {
        let status = response.status();
        let text = response.text().await.unwrap_or_default();
        if status == 401 {
            clear_token();
            notify_unauthorized();
        }
        let err = ApiError::from_response(status, &text, &response.status_text());
        log::warn!("[API] {} {} -> {}", method_name, path, err);
        return Err(err);
    }

    Ok(response)
}

async fn decode<T: DeserializeOwned>(response: gloo_net::http::Response) -> ApiResult<T> {
    if response.status() == 204 {
        return serde_json::from_value(serde_json::Value::Null).map_err(|e| ApiError::Decode(e.to_string()));
    }
    response.json::<T>().await.map_err(|e| ApiError::Decode(e.to_string()))
}

/// Request without a body
pub async fn request<T: DeserializeOwned>(method: Method, path: &str) -> ApiResult<T> {
    let response = send(method, path, None).await?;
    decode(response).await
}

/// Request with a JSON body
pub async fn request_json<B: Serialize, T: DeserializeOwned>(method: Method, path: &str, body: &B) -> ApiResult<T> {
    let text = serde_json::to_string(body).map_err(|e| ApiError::Encode(e.to_string()))?;
    let response = send(method, path, Some(text)).await?;
    decode(response).await
}

/// Request whose response body is ignored
pub async fn request_unit(method: Method, path: &str) -> ApiResult<()> {
    send(method, path, None).await.map(|_| ())
}

/// JSON-body request whose response body is ignored
pub async fn request_json_unit<B: Serialize>(method: Method, path: &str, body: &B) -> ApiResult<()> {
    let text = serde_json::to_string(body).map_err(|e| ApiError::Encode(e.to_string()))?;
    send(method, path, Some(text)).await.map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_url() {
        assert_eq!(endpoint_url("", "/api/v1/users"), "/api/v1/users");
        assert_eq!(endpoint_url("http://h:9180", "/api/v1/users"), "http://h:9180/api/v1/users");
    }

    #[test]
    fn test_query_string_empty() {
        let params = QueryParams::new();
        assert!(params.is_empty());
        assert_eq!(params.to_query_string(), "");
    }

    #[test]
    fn test_query_string_skips_absent_and_repeats_lists() {
        let mut params = QueryParams::new();
        params
            .push("page", 1)
            .push_opt::<u32>("size", None)
            .push_opt("query", Some("two words"))
            .push_all("id", [3, 7]);
        assert_eq!(params.to_query_string(), "?page=1&query=two+words&id=3&id=7");
    }

    #[test]
    fn test_query_string_encodes_keys() {
        let mut params = QueryParams::new();
        params.push("metadata.tags", "a&b");
        assert_eq!(params.to_query_string(), "?metadata.tags=a%26b");
    }

    #[test]
    fn test_form_encode_matches_url_search_params() {
        assert_eq!(form_encode("a b+c"), "a+b%2Bc");
        assert_eq!(form_encode("100% ~ok*"), "100%25+%7Eok*");
        assert_eq!(form_encode("/documents/5/edit"), "%2Fdocuments%2F5%2Fedit");
    }
}
