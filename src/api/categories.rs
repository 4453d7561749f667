//! Categories API
//!
//! Tree reads, single-node mutations, and the bulk endpoints behind
//! multi-select copy/cut/paste and delete.

use gloo_net::http::Method;

use super::http::{request, request_json, request_json_unit, request_unit};
use super::API_PREFIX;
use crate::error::ApiResult;
use crate::models::{
    Category, CategoryBulkCheckPayload, CategoryBulkCheckResponse, CategoryBulkIdsPayload, CategoryBulkItems,
    CategoryBulkTransferPayload, CategoryCreatePayload, CategoryMovePayload, CategoryReorderPayload,
    CategoryRepositionPayload, CategoryRepositionResult, CategoryUpdatePayload,
};

fn categories_path(suffix: &str) -> String {
    format!("{}/categories{}", API_PREFIX, suffix)
}

fn category_path(id: i64) -> String {
    categories_path(&format!("/{}", id))
}

pub fn tree_path(include_deleted: bool) -> String {
    if include_deleted {
        categories_path("/tree?include_deleted=true")
    } else {
        categories_path("/tree")
    }
}

pub async fn tree(include_deleted: bool) -> ApiResult<Vec<Category>> {
    request(Method::GET, &tree_path(include_deleted)).await
}

pub async fn create(payload: &CategoryCreatePayload) -> ApiResult<Category> {
    request_json(Method::POST, &categories_path(""), payload).await
}

pub async fn update(id: i64, payload: &CategoryUpdatePayload) -> ApiResult<Category> {
    request_json(Method::PATCH, &category_path(id), payload).await
}

/// Soft delete
pub async fn delete(id: i64) -> ApiResult<()> {
    request_unit(Method::DELETE, &category_path(id)).await
}

pub async fn restore(id: i64) -> ApiResult<Category> {
    request(Method::POST, &format!("{}/restore", category_path(id))).await
}

pub async fn purge(id: i64) -> ApiResult<()> {
    request_unit(Method::DELETE, &format!("{}/purge", category_path(id))).await
}

pub async fn move_to(id: i64, payload: &CategoryMovePayload) -> ApiResult<Category> {
    request_json(Method::PATCH, &format!("{}/move", category_path(id)), payload).await
}

pub async fn reorder(payload: &CategoryReorderPayload) -> ApiResult<Vec<Category>> {
    request_json(Method::POST, &categories_path("/reorder"), payload).await
}

/// Move and reorder in one call
pub async fn reposition(id: i64, payload: &CategoryRepositionPayload) -> ApiResult<CategoryRepositionResult> {
    request_json(Method::PATCH, &format!("{}/reposition", category_path(id)), payload).await
}

pub async fn trash() -> ApiResult<Vec<Category>> {
    request(Method::GET, &categories_path("/trash")).await
}

pub async fn bulk_restore(ids: Vec<i64>) -> ApiResult<()> {
    request_json_unit(Method::POST, &categories_path("/bulk/restore"), &CategoryBulkIdsPayload { ids }).await
}

pub async fn bulk_delete(ids: Vec<i64>) -> ApiResult<()> {
    request_json_unit(Method::POST, &categories_path("/bulk/delete"), &CategoryBulkIdsPayload { ids }).await
}

pub async fn bulk_purge(ids: Vec<i64>) -> ApiResult<()> {
    request_json_unit(Method::POST, &categories_path("/bulk/purge"), &CategoryBulkIdsPayload { ids }).await
}

/// Dependency summary shown before a delete
pub async fn bulk_check(payload: &CategoryBulkCheckPayload) -> ApiResult<CategoryBulkCheckResponse> {
    request_json(Method::POST, &categories_path("/bulk/check"), payload).await
}

pub async fn bulk_copy(payload: &CategoryBulkTransferPayload) -> ApiResult<CategoryBulkItems> {
    request_json(Method::POST, &categories_path("/bulk/copy"), payload).await
}

pub async fn bulk_move(payload: &CategoryBulkTransferPayload) -> ApiResult<CategoryBulkItems> {
    request_json(Method::POST, &categories_path("/bulk/move"), payload).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tree_path() {
        assert_eq!(tree_path(false), "/api/v1/categories/tree");
        assert_eq!(tree_path(true), "/api/v1/categories/tree?include_deleted=true");
    }

    #[test]
    fn test_bulk_transfer_body() {
        let payload = CategoryBulkTransferPayload {
            source_ids: vec![4, 5],
            target_parent_id: None,
            insert_before_id: None,
            insert_after_id: Some(9),
        };
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            serde_json::json!({"source_ids": [4, 5], "target_parent_id": null, "insert_after_id": 9})
        );
    }
}
