//! Frontend Models
//!
//! Data structures matching backend entities and request payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ========================
// Categories
// ========================

/// Category tree node (matches backend)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub parent_id: Option<i64>,
    #[serde(default)]
    pub position: i32,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
    #[serde(default)]
    pub deleted_at: Option<String>,
    #[serde(default)]
    pub children: Vec<Category>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryCreatePayload {
    pub name: String,
    pub parent_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryUpdatePayload {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryMovePayload {
    pub new_parent_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryReorderPayload {
    pub parent_id: Option<i64>,
    pub ordered_ids: Vec<i64>,
}

/// Move + reorder in one call.
/// `new_parent_id` is omitted when the parent stays; `Some(None)` moves to the root.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryRepositionPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_parent_id: Option<Option<i64>>,
    pub ordered_ids: Vec<i64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CategoryRepositionResult {
    pub category: Category,
    #[serde(default)]
    pub siblings: Vec<Category>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryBulkIdsPayload {
    pub ids: Vec<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryBulkCheckPayload {
    pub ids: Vec<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_descendants: Option<bool>,
}

/// Delete-preview row
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CategoryDependencySummary {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub has_children: bool,
    #[serde(default)]
    pub document_count: i64,
    #[serde(default)]
    pub include_descendants: bool,
    #[serde(default)]
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CategoryBulkCheckResponse {
    #[serde(default)]
    pub items: Vec<CategoryDependencySummary>,
}

/// Copy or move a set of nodes under `target_parent_id`, optionally next to an anchor
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryBulkTransferPayload {
    pub source_ids: Vec<i64>,
    pub target_parent_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insert_before_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insert_after_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CategoryBulkItems {
    #[serde(default)]
    pub items: Vec<Category>,
}

// ========================
// Documents
// ========================

/// Storage format of a document body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentFormat {
    Html,
    Yaml,
}

impl ContentFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentFormat::Html => "html",
            ContentFormat::Yaml => "yaml",
        }
    }
}

/// `{format, data}` body stored in `Document::content`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentContent {
    pub format: ContentFormat,
    pub data: String,
}

impl DocumentContent {
    pub fn to_value(&self) -> Value {
        serde_json::json!({ "format": self.format.as_str(), "data": self.data })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: i64,
    pub title: String,
    #[serde(rename = "type", default)]
    pub doc_type: Option<String>,
    #[serde(default)]
    pub position: i32,
    #[serde(default)]
    pub content: Option<Value>,
    #[serde(default)]
    pub metadata: Map<String, Value>,
    #[serde(default)]
    pub created_by: String,
    #[serde(default)]
    pub updated_by: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
    #[serde(default)]
    pub deleted_at: Option<String>,
}

impl Document {
    /// Typed body, `None` when content is missing or not `{format, data}`
    pub fn content_body(&self) -> Option<DocumentContent> {
        self.content
            .as_ref()
            .and_then(|v| serde_json::from_value(v.clone()).ok())
    }

    pub fn type_name(&self) -> &str {
        self.doc_type.as_deref().unwrap_or("")
    }

    /// `metadata.difficulty` as a number, if present
    pub fn difficulty(&self) -> Option<f64> {
        self.metadata.get("difficulty").and_then(Value::as_f64)
    }

    /// `metadata.tags` as strings
    pub fn tags(&self) -> Vec<String> {
        match self.metadata.get("tags") {
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(|v| v.as_str().map(str::to_string))
                .collect(),
            _ => Vec::new(),
        }
    }

    /// `metadata.references`; malformed entries are skipped
    pub fn references(&self) -> Vec<DocumentReference> {
        match self.metadata.get("references") {
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(|v| serde_json::from_value(v.clone()).ok())
                .collect(),
            _ => Vec::new(),
        }
    }
}

/// Link from one document to another, kept in `metadata.references`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentReference {
    pub document_id: i64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub added_at: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct DocumentCreatePayload {
    pub title: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub doc_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Map<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct DocumentUpdatePayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub doc_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Map<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DocumentsPage {
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub size: u32,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub items: Vec<Document>,
}

/// Trash listing shares the page shape
pub type DocumentTrashPage = DocumentsPage;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentReorderPayload {
    pub node_id: i64,
    pub ordered_ids: Vec<i64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DocumentVersion {
    pub document_id: i64,
    pub version_number: i64,
    pub title: String,
    #[serde(rename = "type", default)]
    pub doc_type: Option<String>,
    #[serde(default)]
    pub metadata: Option<Map<String, Value>>,
    #[serde(default)]
    pub content: Option<Value>,
    #[serde(default)]
    pub created_by: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub change_message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DocumentVersionsPage {
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub size: u32,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub versions: Vec<DocumentVersion>,
}

// ========================
// Materials
// ========================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionOption {
    pub label: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_correct: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlankConfig {
    pub index: i32,
    #[serde(default)]
    pub acceptable_answers: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MaterialMetadata {
    /// question | overview | dictation | reference
    pub resource_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<QuestionOption>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blanks: Option<Vec<BlankConfig>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Material {
    pub id: i64,
    pub title: String,
    #[serde(rename = "type", default)]
    pub material_type: Option<String>,
    #[serde(default)]
    pub position: i32,
    #[serde(default)]
    pub content: Option<Value>,
    #[serde(default)]
    pub metadata: MaterialMetadata,
    #[serde(default)]
    pub created_by: String,
    #[serde(default)]
    pub updated_by: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
    #[serde(default)]
    pub deleted_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MaterialCreatePayload {
    pub title: String,
    pub metadata: MaterialMetadata,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct MaterialUpdatePayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Map<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MaterialsPage {
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub size: u32,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub items: Vec<Material>,
}

/// Node ↔ document binding
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Relationship {
    pub node_id: i64,
    pub document_id: i64,
    #[serde(default)]
    pub created_by: String,
}

// ========================
// Users & Auth
// ========================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    SuperAdmin,
    CourseAdmin,
    Proofreader,
}

impl UserRole {
    pub const ALL: [UserRole; 3] = [UserRole::SuperAdmin, UserRole::CourseAdmin, UserRole::Proofreader];

    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::SuperAdmin => "super_admin",
            UserRole::CourseAdmin => "course_admin",
            UserRole::Proofreader => "proofreader",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.as_str() == raw)
    }

    pub fn label(&self) -> &'static str {
        match self {
            UserRole::SuperAdmin => "Super admin",
            UserRole::CourseAdmin => "Course admin",
            UserRole::Proofreader => "Proofreader",
        }
    }

    /// Badge colour
    pub fn color(&self) -> &'static str {
        match self {
            UserRole::SuperAdmin => "#cf1322",
            UserRole::CourseAdmin => "#1677ff",
            UserRole::Proofreader => "#389e0d",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub display_name: Option<String>,
    pub role: UserRole,
    #[serde(default)]
    pub created_at: String,
}

impl User {
    /// Display name when set, otherwise the username
    pub fn shown_name(&self) -> &str {
        match self.display_name.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => &self.username,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: User,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChangePasswordPayload {
    pub old_password: String,
    pub new_password: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct InitStatus {
    pub initialized: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateUserPayload {
    pub username: String,
    pub password: String,
    pub role: UserRole,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UsersList {
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub total: u64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UserCourses {
    #[serde(default)]
    pub course_ids: Vec<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GrantCoursePayload {
    pub root_node_id: i64,
}

// ========================
// API Keys
// ========================

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ApiKeyUser {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ApiKey {
    pub id: i64,
    pub name: String,
    pub key_prefix: String,
    pub user_id: i64,
    #[serde(default)]
    pub user: Option<ApiKeyUser>,
    #[serde(default)]
    pub scopes: Option<String>,
    #[serde(default)]
    pub expires_at: Option<String>,
    #[serde(default)]
    pub last_used_at: Option<String>,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
    #[serde(default)]
    pub deleted_at: Option<String>,
    #[serde(default)]
    pub created_by_id: i64,
    #[serde(default)]
    pub created_by: Option<ApiKeyUser>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiKeyStatus {
    Active,
    Expired,
    Revoked,
}

impl ApiKeyStatus {
    pub fn label(&self) -> &'static str {
        match self {
            ApiKeyStatus::Active => "Active",
            ApiKeyStatus::Expired => "Expired",
            ApiKeyStatus::Revoked => "Revoked",
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            ApiKeyStatus::Active => "status-active",
            ApiKeyStatus::Expired => "status-expired",
            ApiKeyStatus::Revoked => "status-revoked",
        }
    }
}

impl ApiKey {
    /// Revoked beats expired; an unparseable expiry counts as no expiry
    pub fn status_at(&self, now: DateTime<Utc>) -> ApiKeyStatus {
        if self.deleted_at.is_some() {
            return ApiKeyStatus::Revoked;
        }
        let expired = self
            .expires_at
            .as_deref()
            .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
            .map(|at| at.with_timezone(&Utc) < now)
            .unwrap_or(false);
        if expired {
            ApiKeyStatus::Expired
        } else {
            ApiKeyStatus::Active
        }
    }
}

/// Deployment environment baked into a new key's prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiKeyEnvironment {
    Dev,
    Test,
    Prod,
}

impl ApiKeyEnvironment {
    pub const ALL: [ApiKeyEnvironment; 3] = [ApiKeyEnvironment::Dev, ApiKeyEnvironment::Test, ApiKeyEnvironment::Prod];

    pub fn as_str(&self) -> &'static str {
        match self {
            ApiKeyEnvironment::Dev => "dev",
            ApiKeyEnvironment::Test => "test",
            ApiKeyEnvironment::Prod => "prod",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|e| e.as_str() == raw)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateApiKeyPayload {
    pub name: String,
    pub user_id: i64,
    pub environment: ApiKeyEnvironment,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<String>,
}

/// Create response; `api_key` is the only time the full secret is visible
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CreateApiKeyResponse {
    pub api_key: String,
    pub key_prefix: String,
    pub key_info: ApiKey,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpdateApiKeyPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// `Some(None)` clears the expiry
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<Option<String>>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ApiKeyList {
    #[serde(default)]
    pub api_keys: Vec<ApiKey>,
    #[serde(default)]
    pub total: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
pub struct ApiKeyStats {
    pub total: u64,
    pub active: u64,
    pub expired: u64,
    pub revoked: u64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: String,
}

// ========================
// Courses
// ========================

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Course {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CoursesList {
    #[serde(default)]
    pub courses: Vec<Course>,
    #[serde(default)]
    pub total: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateCoursePayload {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn make_key(expires_at: Option<&str>, deleted_at: Option<&str>) -> ApiKey {
        ApiKey {
            id: 1,
            name: "ci".to_string(),
            key_prefix: "ydms_dev_ab".to_string(),
            user_id: 2,
            user: None,
            scopes: None,
            expires_at: expires_at.map(str::to_string),
            last_used_at: None,
            created_at: String::new(),
            updated_at: String::new(),
            deleted_at: deleted_at.map(str::to_string),
            created_by_id: 1,
            created_by: None,
        }
    }

    #[test]
    fn test_api_key_status() {
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap();
        assert_eq!(make_key(None, None).status_at(now), ApiKeyStatus::Active);
        assert_eq!(make_key(Some("2026-01-01T00:00:00Z"), None).status_at(now), ApiKeyStatus::Active);
        assert_eq!(make_key(Some("2025-01-01T00:00:00Z"), None).status_at(now), ApiKeyStatus::Expired);
        assert_eq!(
            make_key(Some("2025-01-01T00:00:00Z"), Some("2025-02-01T00:00:00Z")).status_at(now),
            ApiKeyStatus::Revoked
        );
    }

    #[test]
    fn test_document_deserialize_defaults() {
        let doc: Document = serde_json::from_value(serde_json::json!({
            "id": 5,
            "title": "Unit 1",
            "type": "dictation",
            "content": {"format": "yaml", "data": "word: x"},
            "metadata": {"difficulty": 3, "tags": ["a", 1, "b"]}
        }))
        .unwrap();
        assert_eq!(doc.type_name(), "dictation");
        assert_eq!(doc.position, 0);
        assert_eq!(doc.difficulty(), Some(3.0));
        assert_eq!(doc.tags(), vec!["a".to_string(), "b".to_string()]);
        let body = doc.content_body().unwrap();
        assert_eq!(body.format, ContentFormat::Yaml);
        assert_eq!(body.data, "word: x");
    }

    #[test]
    fn test_reposition_payload_parent_encoding() {
        let keep = CategoryRepositionPayload { new_parent_id: None, ordered_ids: vec![1, 2] };
        assert_eq!(serde_json::to_value(&keep).unwrap(), serde_json::json!({"ordered_ids": [1, 2]}));

        let to_root = CategoryRepositionPayload { new_parent_id: Some(None), ordered_ids: vec![3] };
        assert_eq!(
            serde_json::to_value(&to_root).unwrap(),
            serde_json::json!({"new_parent_id": null, "ordered_ids": [3]})
        );
    }

    #[test]
    fn test_user_role_round_trip_names() {
        for role in UserRole::ALL {
            assert_eq!(UserRole::parse(role.as_str()), Some(role));
        }
        let user: User = serde_json::from_value(serde_json::json!({
            "id": 1, "username": "root", "role": "super_admin", "display_name": " "
        }))
        .unwrap();
        assert_eq!(user.role, UserRole::SuperAdmin);
        assert_eq!(user.shown_name(), "root");
    }
}
