//! Relationships API
//!
//! Bindings between category nodes and documents.

use gloo_net::http::Method;

use super::http::{request, request_unit, QueryParams};
use super::API_PREFIX;
use crate::error::ApiResult;
use crate::models::Relationship;

pub fn relationships_path(node_id: Option<i64>, document_id: Option<i64>) -> String {
    let mut params = QueryParams::new();
    params.push_opt("node_id", node_id).push_opt("document_id", document_id);
    format!("{}/relationships{}", API_PREFIX, params.to_query_string())
}

pub async fn list(node_id: Option<i64>, document_id: Option<i64>) -> ApiResult<Vec<Relationship>> {
    request(Method::GET, &relationships_path(node_id, document_id)).await
}

pub async fn bind(node_id: i64, document_id: i64) -> ApiResult<Relationship> {
    request(Method::POST, &relationships_path(Some(node_id), Some(document_id))).await
}

pub async fn unbind(node_id: i64, document_id: i64) -> ApiResult<()> {
    request_unit(Method::DELETE, &relationships_path(Some(node_id), Some(document_id))).await
}

/// Documents bound to a node
pub async fn node_materials(node_id: i64) -> ApiResult<Vec<Relationship>> {
    list(Some(node_id), None).await
}

/// Nodes a document is bound to
pub async fn material_nodes(document_id: i64) -> ApiResult<Vec<Relationship>> {
    list(None, Some(document_id)).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relationships_path() {
        assert_eq!(relationships_path(None, None), "/api/v1/relationships");
        assert_eq!(relationships_path(Some(4), None), "/api/v1/relationships?node_id=4");
        assert_eq!(
            relationships_path(Some(4), Some(9)),
            "/api/v1/relationships?node_id=4&document_id=9"
        );
    }
}
