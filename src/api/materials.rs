//! Materials API
//!
//! Standalone question/content units that live outside the tree.

use gloo_net::http::Method;

use super::http::{request, request_json, request_unit, QueryParams};
use super::API_PREFIX;
use crate::error::ApiResult;
use crate::models::{Material, MaterialCreatePayload, MaterialUpdatePayload, MaterialsPage};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MaterialListParams {
    pub page: Option<u32>,
    pub size: Option<u32>,
    pub resource_type: Option<String>,
    pub question_type: Option<String>,
    pub tags: Vec<String>,
}

pub fn materials_path(params: &MaterialListParams) -> String {
    let mut query = QueryParams::new();
    query
        .push_opt("page", params.page)
        .push_opt("size", params.size)
        .push_opt("resource_type", params.resource_type.as_deref())
        .push_opt("question_type", params.question_type.as_deref())
        .push_all("tags", &params.tags);
    format!("{}/materials{}", API_PREFIX, query.to_query_string())
}

pub async fn list(params: &MaterialListParams) -> ApiResult<MaterialsPage> {
    request(Method::GET, &materials_path(params)).await
}

pub async fn get(id: i64) -> ApiResult<Material> {
    request(Method::GET, &format!("{}/materials/{}", API_PREFIX, id)).await
}

pub async fn create(payload: &MaterialCreatePayload) -> ApiResult<Material> {
    request_json(Method::POST, &format!("{}/materials", API_PREFIX), payload).await
}

pub async fn update(id: i64, payload: &MaterialUpdatePayload) -> ApiResult<Material> {
    request_json(Method::PUT, &format!("{}/materials/{}", API_PREFIX, id), payload).await
}

pub async fn delete(id: i64) -> ApiResult<()> {
    request_unit(Method::DELETE, &format!("{}/materials/{}", API_PREFIX, id)).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_materials_path() {
        assert_eq!(materials_path(&MaterialListParams::default()), "/api/v1/materials");

        let params = MaterialListParams {
            page: Some(2),
            resource_type: Some("question".to_string()),
            tags: vec!["grammar".to_string(), "unit 1".to_string()],
            ..Default::default()
        };
        assert_eq!(
            materials_path(&params),
            "/api/v1/materials?page=2&resource_type=question&tags=grammar&tags=unit+1"
        );
    }
}
