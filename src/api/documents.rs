//! Documents API
//!
//! Listing with metadata filters, CRUD, ordering inside a node,
//! trash and version history.

use gloo_net::http::Method;

use super::http::{request, request_json, request_unit, QueryParams};
use super::API_PREFIX;
use crate::error::ApiResult;
use crate::models::{
    Document, DocumentCreatePayload, DocumentReorderPayload, DocumentTrashPage, DocumentUpdatePayload,
    DocumentVersionsPage, DocumentsPage,
};

/// Value of a `metadata.<key>` filter
#[derive(Debug, Clone, PartialEq)]
pub enum MetadataValue {
    Text(String),
    Number(f64),
    Flag(bool),
    List(Vec<String>),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentListParams {
    pub page: Option<u32>,
    pub size: Option<u32>,
    pub query: Option<String>,
    pub doc_type: Option<String>,
    pub ids: Vec<i64>,
    pub include_deleted: Option<bool>,
    pub include_descendants: Option<bool>,
    pub tags: Vec<String>,
    /// Flattened into `metadata.<key>` pairs, in order
    pub metadata: Vec<(String, MetadataValue)>,
}

pub fn build_document_query(params: &DocumentListParams) -> String {
    let mut query = QueryParams::new();
    query
        .push_opt("page", params.page)
        .push_opt("size", params.size)
        .push_opt("query", params.query.as_deref())
        .push_opt("type", params.doc_type.as_deref())
        .push_all("id", &params.ids)
        .push_opt("include_deleted", params.include_deleted)
        .push_opt("include_descendants", params.include_descendants)
        .push_all("tags", &params.tags);

    for (key, value) in &params.metadata {
        let name = format!("metadata.{}", key);
        match value {
            MetadataValue::Text(text) => query.push(&name, text),
            MetadataValue::Number(n) => query.push(&name, n),
            MetadataValue::Flag(b) => query.push(&name, b),
            MetadataValue::List(items) => query.push_all(&name, items),
        };
    }
    query.to_query_string()
}

pub fn list_path(params: &DocumentListParams) -> String {
    format!("{}/documents{}", API_PREFIX, build_document_query(params))
}

pub fn node_documents_path(node_id: i64, params: &DocumentListParams) -> String {
    format!(
        "{}/nodes/{}/subtree-documents{}",
        API_PREFIX,
        node_id,
        build_document_query(params)
    )
}

fn document_path(id: i64) -> String {
    format!("{}/documents/{}", API_PREFIX, id)
}

pub fn trash_path(page: Option<u32>, size: Option<u32>, query: Option<&str>) -> String {
    let mut params = QueryParams::new();
    params
        .push_opt("page", page)
        .push_opt("size", size)
        .push_opt("query", query);
    format!("{}/documents/trash{}", API_PREFIX, params.to_query_string())
}

pub fn versions_path(id: i64, page: Option<u32>, size: Option<u32>) -> String {
    let mut params = QueryParams::new();
    params.push_opt("page", page).push_opt("size", size);
    format!("{}/versions{}", document_path(id), params.to_query_string())
}

pub async fn list(params: &DocumentListParams) -> ApiResult<DocumentsPage> {
    request(Method::GET, &list_path(params)).await
}

pub async fn detail(id: i64) -> ApiResult<Document> {
    request(Method::GET, &document_path(id)).await
}

/// Documents bound to a node (and its descendants when requested)
pub async fn node_documents(node_id: i64, params: &DocumentListParams) -> ApiResult<Vec<Document>> {
    request(Method::GET, &node_documents_path(node_id, params)).await
}

pub async fn create(payload: &DocumentCreatePayload) -> ApiResult<Document> {
    request_json(Method::POST, &format!("{}/documents", API_PREFIX), payload).await
}

pub async fn update(id: i64, payload: &DocumentUpdatePayload) -> ApiResult<Document> {
    request_json(Method::PUT, &document_path(id), payload).await
}

pub async fn reorder(payload: &DocumentReorderPayload) -> ApiResult<Vec<Document>> {
    request_json(Method::POST, &format!("{}/documents/reorder", API_PREFIX), payload).await
}

pub async fn bind(node_id: i64, doc_id: i64) -> ApiResult<()> {
    request_unit(Method::POST, &format!("{}/nodes/{}/bind/{}", API_PREFIX, node_id, doc_id)).await
}

/// Soft delete
pub async fn delete(id: i64) -> ApiResult<()> {
    request_unit(Method::DELETE, &document_path(id)).await
}

pub async fn restore(id: i64) -> ApiResult<Document> {
    request(Method::POST, &format!("{}/restore", document_path(id))).await
}

pub async fn purge(id: i64) -> ApiResult<()> {
    request_unit(Method::DELETE, &format!("{}/purge", document_path(id))).await
}

pub async fn trash(page: Option<u32>, size: Option<u32>, query: Option<&str>) -> ApiResult<DocumentTrashPage> {
    request(Method::GET, &trash_path(page, size, query)).await
}

pub async fn versions(id: i64, page: Option<u32>, size: Option<u32>) -> ApiResult<DocumentVersionsPage> {
    request(Method::GET, &versions_path(id, page, size)).await
}

pub async fn restore_version(id: i64, version_number: i64) -> ApiResult<Document> {
    request(
        Method::POST,
        &format!("{}/versions/{}/restore", document_path(id), version_number),
    )
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ContentFormat;
    use crate::models::DocumentContent;

    fn node_params() -> DocumentListParams {
        DocumentListParams {
            include_descendants: Some(true),
            ..Default::default()
        }
    }

    #[test]
    fn test_node_documents_type_filter() {
        let params = DocumentListParams {
            doc_type: Some("overview".to_string()),
            ..node_params()
        };
        assert_eq!(
            node_documents_path(100, &params),
            "/api/v1/nodes/100/subtree-documents?type=overview&include_descendants=true"
        );
    }

    #[test]
    fn test_node_documents_query_filter() {
        let params = DocumentListParams {
            query: Some("search term".to_string()),
            include_descendants: Some(false),
            ..Default::default()
        };
        assert_eq!(
            node_documents_path(100, &params),
            "/api/v1/nodes/100/subtree-documents?query=search+term&include_descendants=false"
        );
    }

    #[test]
    fn test_node_documents_repeated_ids() {
        let params = DocumentListParams {
            ids: vec![123, 456],
            ..node_params()
        };
        assert_eq!(
            node_documents_path(100, &params),
            "/api/v1/nodes/100/subtree-documents?id=123&id=456&include_descendants=true"
        );
    }

    #[test]
    fn test_metadata_flattening() {
        let params = DocumentListParams {
            size: Some(100),
            tags: vec!["grammar".to_string()],
            metadata: vec![
                ("difficulty".to_string(), MetadataValue::Number(3.0)),
                ("score".to_string(), MetadataValue::Number(2.5)),
                ("published".to_string(), MetadataValue::Flag(false)),
                ("source".to_string(), MetadataValue::Text("internal".to_string())),
                (
                    "tags".to_string(),
                    MetadataValue::List(vec!["a".to_string(), "b".to_string()]),
                ),
            ],
            ..Default::default()
        };
        assert_eq!(
            list_path(&params),
            "/api/v1/documents?size=100&tags=grammar&metadata.difficulty=3&metadata.score=2.5\
             &metadata.published=false&metadata.source=internal&metadata.tags=a&metadata.tags=b"
        );
    }

    #[test]
    fn test_empty_params_have_no_query() {
        assert_eq!(list_path(&DocumentListParams::default()), "/api/v1/documents");
    }

    #[test]
    fn test_trash_and_versions_paths() {
        assert_eq!(trash_path(None, None, None), "/api/v1/documents/trash");
        assert_eq!(trash_path(Some(1), Some(20), Some("x")), "/api/v1/documents/trash?page=1&size=20&query=x");
        assert_eq!(versions_path(7, Some(1), None), "/api/v1/documents/7/versions?page=1");
    }

    #[test]
    fn test_create_payload_shape() {
        let content = DocumentContent {
            format: ContentFormat::Html,
            data: "<p>Test</p>".to_string(),
        };
        let payload = DocumentCreatePayload {
            title: "Test Document".to_string(),
            doc_type: Some("overview".to_string()),
            position: Some(1),
            content: Some(content.to_value()),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            serde_json::json!({
                "title": "Test Document",
                "type": "overview",
                "position": 1,
                "content": {"format": "html", "data": "<p>Test</p>"}
            })
        );

        let minimal = DocumentCreatePayload {
            title: "Bare".to_string(),
            ..Default::default()
        };
        assert_eq!(serde_json::to_value(&minimal).unwrap(), serde_json::json!({"title": "Bare"}));
    }

    #[test]
    fn test_reorder_payload_shape() {
        let payload = DocumentReorderPayload {
            node_id: 1,
            ordered_ids: vec![3, 1, 2],
        };
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            serde_json::json!({"node_id": 1, "ordered_ids": [3, 1, 2]})
        );
    }
}
