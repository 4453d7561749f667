//! Document Editor Draft
//!
//! Form state of the editor page and the payloads it produces.

use serde_json::{Map, Value};

use crate::api::documents::MetadataValue;
use crate::forms::FieldResult;
use crate::materials::parse_tags;
use crate::models::{Document, DocumentContent, DocumentCreatePayload, DocumentReference, DocumentUpdatePayload};

use super::filter::{sanitize_metadata_input, MetadataInput, MetadataValueType};
use super::preview::format_number;
use super::templates::{format_for_type, initial_content, DOCUMENT_TYPES};

/// Keys with their own editor fields; free-form rows never write them
pub const RESERVED_METADATA_KEYS: [&str; 3] = ["difficulty", "tags", "references"];

fn is_reserved(key: &str) -> bool {
    RESERVED_METADATA_KEYS.contains(&key)
}

/// Row for a stored value, `None` for objects and mixed arrays
fn metadata_row(key: &str, value: &Value) -> Option<MetadataInput> {
    let (value_type, value) = match value {
        Value::Bool(b) => (MetadataValueType::Flag, b.to_string()),
        Value::Number(n) => (MetadataValueType::Number, format_number(n.as_f64()?)),
        Value::String(text) => (MetadataValueType::Text, text.clone()),
        Value::Array(items) => {
            let texts: Option<Vec<&str>> = items.iter().map(Value::as_str).collect();
            (MetadataValueType::List, texts?.join(", "))
        }
        _ => return None,
    };
    Some(MetadataInput {
        key: key.to_string(),
        value_type,
        value,
    })
}

fn metadata_json(value: MetadataValue) -> Value {
    match value {
        MetadataValue::Text(text) => Value::from(text),
        MetadataValue::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => Value::from(n as i64),
        MetadataValue::Number(n) => Value::from(n),
        MetadataValue::Flag(b) => Value::from(b),
        MetadataValue::List(items) => Value::from(items),
    }
}

/// Editor route of a saved document
pub fn editor_route(doc_id: i64) -> String {
    format!("/documents/{}/edit", doc_id)
}

/// Shown when a new document was saved but not bound to its category
pub fn bind_failure_message(node_id: i64, err: &impl std::fmt::Display) -> String {
    format!("Document saved, but binding to category #{} failed: {}", node_id, err)
}

#[derive(Debug, Clone, PartialEq)]
pub struct DocumentDraft {
    pub title: String,
    pub doc_type: String,
    pub content: String,
    /// Raw difficulty input, blank for none
    pub difficulty: String,
    /// Comma-separated
    pub tags: String,
    /// The body was typed by hand rather than filled from a template
    pub content_edited: bool,
    /// Free-form metadata outside the reserved keys
    pub extra_metadata: Vec<MetadataInput>,
    pub references: Vec<DocumentReference>,
}

impl Default for DocumentDraft {
    fn default() -> Self {
        let doc_type = DOCUMENT_TYPES[0].value;
        Self {
            title: String::new(),
            doc_type: doc_type.to_string(),
            content: initial_content(doc_type).data,
            difficulty: String::new(),
            tags: String::new(),
            content_edited: false,
            extra_metadata: Vec::new(),
            references: Vec::new(),
        }
    }
}

impl DocumentDraft {
    pub fn from_document(doc: &Document) -> Self {
        Self {
            title: doc.title.clone(),
            doc_type: doc.type_name().to_string(),
            content: doc.content_body().map(|c| c.data).unwrap_or_default(),
            difficulty: doc
                .difficulty()
                .map(crate::documents::preview::format_number)
                .unwrap_or_default(),
            tags: doc.tags().join(", "),
            content_edited: true,
            extra_metadata: doc
                .metadata
                .iter()
                .filter(|(key, _)| !is_reserved(key))
                .filter_map(|(key, value)| metadata_row(key, value))
                .collect(),
            references: doc.references(),
        }
    }

    /// Add a reference to another document; `own_id` is the document being edited
    pub fn add_reference(&mut self, reference: DocumentReference, own_id: Option<i64>) -> FieldResult<()> {
        if own_id == Some(reference.document_id) {
            return Err("A document cannot reference itself");
        }
        if self.references.iter().any(|r| r.document_id == reference.document_id) {
            return Err("That document is already referenced");
        }
        self.references.push(reference);
        Ok(())
    }

    pub fn remove_reference(&mut self, document_id: i64) {
        self.references.retain(|r| r.document_id != document_id);
    }

    /// New documents pick up the template of the chosen type until the body is edited
    pub fn change_type(&mut self, next: &str) {
        self.doc_type = next.to_string();
        if !self.content_edited {
            self.content = initial_content(next).data;
        }
    }

    pub fn edit_content(&mut self, content: String) {
        self.content = content;
        self.content_edited = true;
    }

    fn body(&self) -> Value {
        DocumentContent {
            format: format_for_type(&self.doc_type),
            data: self.content.clone(),
        }
        .to_value()
    }

    fn title(&self) -> FieldResult<String> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err("Title is required");
        }
        Ok(title.to_string())
    }

    /// Merge the form into the existing metadata; blank inputs remove the key.
    /// Stored values no row can show are carried over untouched.
    pub fn metadata(&self, base: &Map<String, Value>) -> FieldResult<Map<String, Value>> {
        let mut out = base.clone();
        out.retain(|key, value| is_reserved(key) || metadata_row(key, value).is_none());
        for row in &self.extra_metadata {
            if is_reserved(row.key.trim()) {
                continue;
            }
            if row.value_type == MetadataValueType::Number
                && !row.value.trim().is_empty()
                && row.value.trim().parse::<f64>().is_err()
            {
                return Err("Metadata number values must be numeric");
            }
            if let Some((key, value)) = sanitize_metadata_input(row) {
                out.insert(key, metadata_json(value));
            }
        }

        let raw = self.difficulty.trim();
        if raw.is_empty() {
            out.remove("difficulty");
        } else {
            let value = raw
                .parse::<f64>()
                .ok()
                .filter(|d| (1.0..=5.0).contains(d))
                .ok_or("Difficulty must be a number from 1 to 5")?;
            out.insert("difficulty".to_string(), Value::from(value));
        }

        let tags = parse_tags(&self.tags);
        if tags.is_empty() {
            out.remove("tags");
        } else {
            out.insert("tags".to_string(), Value::from(tags));
        }

        if self.references.is_empty() {
            out.remove("references");
        } else {
            let references = serde_json::to_value(&self.references).map_err(|_| "Invalid references")?;
            out.insert("references".to_string(), references);
        }
        Ok(out)
    }

    pub fn to_create_payload(&self) -> FieldResult<DocumentCreatePayload> {
        Ok(DocumentCreatePayload {
            title: self.title()?,
            doc_type: Some(self.doc_type.clone()),
            position: None,
            metadata: Some(self.metadata(&Map::new())?),
            content: Some(self.body()),
        })
    }

    pub fn to_update_payload(&self, original: &Document) -> FieldResult<DocumentUpdatePayload> {
        Ok(DocumentUpdatePayload {
            title: Some(self.title()?),
            doc_type: Some(self.doc_type.clone()),
            position: None,
            metadata: Some(self.metadata(&original.metadata)?),
            content: Some(self.body()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn make_doc() -> Document {
        let mut metadata = Map::new();
        metadata.insert("difficulty".to_string(), json!(3));
        metadata.insert("tags".to_string(), json!(["a", "b"]));
        metadata.insert("source".to_string(), json!("import"));
        metadata.insert("layout".to_string(), json!({ "columns": 2 }));
        metadata.insert(
            "references".to_string(),
            json!([{ "document_id": 4, "title": "Glossary", "added_at": "2024-01-01T00:00:00Z" }]),
        );
        Document {
            id: 9,
            title: "Chapter 1".to_string(),
            doc_type: Some("essay".to_string()),
            position: 1,
            content: Some(json!({ "format": "yaml", "data": "title: x" })),
            metadata,
            created_by: String::new(),
            updated_by: String::new(),
            created_at: String::new(),
            updated_at: String::new(),
            deleted_at: None,
        }
    }

    #[test]
    fn test_from_document() {
        let draft = DocumentDraft::from_document(&make_doc());
        assert_eq!(draft.doc_type, "essay");
        assert_eq!(draft.content, "title: x");
        assert_eq!(draft.difficulty, "3");
        assert_eq!(draft.tags, "a, b");
        assert!(draft.content_edited);
    }

    fn make_reference(document_id: i64) -> DocumentReference {
        DocumentReference {
            document_id,
            title: format!("Doc {}", document_id),
            added_at: "2024-02-02T00:00:00Z".to_string(),
        }
    }

    fn row(key: &str, value_type: MetadataValueType, value: &str) -> MetadataInput {
        MetadataInput {
            key: key.to_string(),
            value_type,
            value: value.to_string(),
        }
    }

    #[test]
    fn test_from_document_splits_metadata() {
        let draft = DocumentDraft::from_document(&make_doc());
        assert_eq!(draft.extra_metadata, vec![row("source", MetadataValueType::Text, "import")]);
        assert_eq!(draft.references.len(), 1);
        assert_eq!(draft.references[0].document_id, 4);
        assert_eq!(draft.references[0].title, "Glossary");
    }

    #[test]
    fn test_metadata_rows_merge() {
        let doc = make_doc();
        let mut draft = DocumentDraft::from_document(&doc);
        draft.extra_metadata = vec![
            row("grade", MetadataValueType::Number, "7"),
            row("public", MetadataValueType::Flag, "false"),
            row("skills", MetadataValueType::List, "read, write, read"),
            row("  ", MetadataValueType::Text, "ignored"),
            row("tags", MetadataValueType::Text, "ignored"),
        ];
        let metadata = draft.metadata(&doc.metadata).unwrap();
        assert_eq!(metadata.get("grade"), Some(&json!(7)));
        assert_eq!(metadata.get("public"), Some(&json!(false)));
        assert_eq!(metadata.get("skills"), Some(&json!(["read", "write"])));
        assert_eq!(metadata.get("tags"), Some(&json!(["a", "b"])));
        // removed row drops its key, values no row can show survive
        assert_eq!(metadata.get("source"), None);
        assert_eq!(metadata.get("layout"), Some(&json!({ "columns": 2 })));

        draft.extra_metadata = vec![row("grade", MetadataValueType::Number, "seven")];
        assert_eq!(
            draft.metadata(&doc.metadata).unwrap_err(),
            "Metadata number values must be numeric"
        );
    }

    #[test]
    fn test_references() {
        let mut draft = DocumentDraft::from_document(&make_doc());
        assert!(draft.add_reference(make_reference(9), Some(9)).is_err());
        assert!(draft.add_reference(make_reference(4), Some(9)).is_err());
        draft.add_reference(make_reference(5), Some(9)).unwrap();

        let metadata = draft.metadata(&Map::new()).unwrap();
        let ids: Vec<i64> = metadata["references"]
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r["document_id"].as_i64().unwrap())
            .collect();
        assert_eq!(ids, vec![4, 5]);

        draft.remove_reference(4);
        draft.remove_reference(5);
        let metadata = draft.metadata(&make_doc().metadata).unwrap();
        assert_eq!(metadata.get("references"), None);
    }

    #[test]
    fn test_pending_references_sent_on_create() {
        let mut draft = DocumentDraft {
            title: "Draft".to_string(),
            ..DocumentDraft::default()
        };
        draft.add_reference(make_reference(12), None).unwrap();
        let metadata = draft.to_create_payload().unwrap().metadata.unwrap();
        assert_eq!(metadata["references"][0]["document_id"], json!(12));
        assert_eq!(metadata["references"][0]["title"], json!("Doc 12"));
    }

    #[test]
    fn test_change_type_follows_template_until_edited() {
        let mut draft = DocumentDraft::default();
        draft.change_type("essay");
        assert_eq!(draft.content, initial_content("essay").data);

        draft.edit_content("custom".to_string());
        draft.change_type("dictation");
        assert_eq!(draft.doc_type, "dictation");
        assert_eq!(draft.content, "custom");
    }

    #[test]
    fn test_update_payload_keeps_other_metadata() {
        let doc = make_doc();
        let mut draft = DocumentDraft::from_document(&doc);
        draft.difficulty = String::new();
        draft.tags = "x, x, y".to_string();
        let payload = draft.to_update_payload(&doc).unwrap();
        let metadata = payload.metadata.unwrap();
        assert_eq!(metadata.get("source"), Some(&json!("import")));
        assert_eq!(metadata.get("difficulty"), None);
        assert_eq!(metadata.get("tags"), Some(&json!(["x", "y"])));
        assert_eq!(payload.content, Some(json!({ "format": "yaml", "data": "title: x" })));
    }

    #[test]
    fn test_created_document_route_and_bind_failure() {
        assert_eq!(editor_route(31), "/documents/31/edit");
        assert_eq!(
            bind_failure_message(7, &"forbidden"),
            "Document saved, but binding to category #7 failed: forbidden"
        );
    }

    #[test]
    fn test_validation() {
        let mut draft = DocumentDraft::default();
        assert_eq!(draft.to_create_payload().unwrap_err(), "Title is required");

        draft.title = "  New  ".to_string();
        draft.difficulty = "7".to_string();
        assert!(draft.to_create_payload().is_err());

        draft.difficulty = "4.5".to_string();
        let payload = draft.to_create_payload().unwrap();
        assert_eq!(payload.title, "New");
        assert_eq!(payload.doc_type.as_deref(), Some("overview"));
        assert_eq!(payload.metadata.unwrap().get("difficulty"), Some(&json!(4.5)));
    }
}
