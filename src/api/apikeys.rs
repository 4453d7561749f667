//! API Keys API
//!
//! Machine credentials; super admin only.

use gloo_net::http::Method;

use super::http::{request, request_json, request_unit, QueryParams};
use super::API_PREFIX;
use crate::error::ApiResult;
use crate::models::{
    ApiKey, ApiKeyList, ApiKeyStats, CreateApiKeyPayload, CreateApiKeyResponse, MessageResponse,
    UpdateApiKeyPayload,
};

fn key_path(id: i64) -> String {
    format!("{}/api-keys/{}", API_PREFIX, id)
}

/// `include_deleted` is only sent when true
pub fn list_path(user_id: Option<i64>, include_deleted: bool) -> String {
    let mut params = QueryParams::new();
    params
        .push_opt("user_id", user_id)
        .push_opt("include_deleted", include_deleted.then_some(true));
    format!("{}/api-keys{}", API_PREFIX, params.to_query_string())
}

pub async fn list(user_id: Option<i64>, include_deleted: bool) -> ApiResult<ApiKeyList> {
    request(Method::GET, &list_path(user_id, include_deleted)).await
}

pub async fn get(id: i64) -> ApiResult<ApiKey> {
    request(Method::GET, &key_path(id)).await
}

pub async fn create(payload: &CreateApiKeyPayload) -> ApiResult<CreateApiKeyResponse> {
    request_json(Method::POST, &format!("{}/api-keys", API_PREFIX), payload).await
}

pub async fn update(id: i64, payload: &UpdateApiKeyPayload) -> ApiResult<ApiKey> {
    request_json(Method::PATCH, &key_path(id), payload).await
}

/// Soft delete
pub async fn revoke(id: i64) -> ApiResult<MessageResponse> {
    request(Method::POST, &format!("{}/revoke", key_path(id))).await
}

/// Permanent delete
pub async fn delete(id: i64) -> ApiResult<()> {
    request_unit(Method::DELETE, &key_path(id)).await
}

pub async fn stats() -> ApiResult<ApiKeyStats> {
    request(Method::GET, &format!("{}/api-keys/stats", API_PREFIX)).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_path() {
        assert_eq!(list_path(None, false), "/api/v1/api-keys");
        assert_eq!(list_path(Some(3), false), "/api/v1/api-keys?user_id=3");
        assert_eq!(list_path(Some(3), true), "/api/v1/api-keys?user_id=3&include_deleted=true");
    }
}
