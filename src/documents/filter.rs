//! Document Filters
//!
//! Turns the filter form into list parameters and applies the
//! client-side id filter.

use crate::api::documents::{DocumentListParams, MetadataValue};
use crate::config;
use crate::models::Document;

/// Value kind selected for a metadata filter row
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MetadataValueType {
    #[default]
    Text,
    Number,
    Flag,
    List,
}

impl MetadataValueType {
    pub const ALL: [MetadataValueType; 4] = [
        MetadataValueType::Text,
        MetadataValueType::Number,
        MetadataValueType::Flag,
        MetadataValueType::List,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MetadataValueType::Text => "string",
            MetadataValueType::Number => "number",
            MetadataValueType::Flag => "boolean",
            MetadataValueType::List => "string[]",
        }
    }

    pub fn parse(raw: &str) -> Self {
        match raw {
            "number" => MetadataValueType::Number,
            "boolean" => MetadataValueType::Flag,
            "string[]" => MetadataValueType::List,
            _ => MetadataValueType::Text,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MetadataValueType::Text => "Text",
            MetadataValueType::Number => "Number",
            MetadataValueType::Flag => "Boolean",
            MetadataValueType::List => "Text list",
        }
    }
}

/// One metadata row as typed in the form.
/// List values are entered comma-separated.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetadataInput {
    pub key: String,
    pub value_type: MetadataValueType,
    pub value: String,
}

impl MetadataInput {
    /// Switch the value type, keeping what still makes sense of the old value
    pub fn change_type(&mut self, next: MetadataValueType) {
        if next == MetadataValueType::Flag {
            self.value = if self.value == "false" { "false" } else { "true" }.to_string();
        } else if self.value_type == MetadataValueType::Flag {
            self.value.clear();
        }
        self.value_type = next;
    }
}

/// Submitted filter form
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentFilterForm {
    pub doc_id: String,
    pub query: String,
    pub doc_type: Option<String>,
    pub metadata: Vec<MetadataInput>,
}

pub fn sanitize_metadata_input(input: &MetadataInput) -> Option<(String, MetadataValue)> {
    let key = input.key.trim();
    if key.is_empty() {
        return None;
    }
    let value = match input.value_type {
        MetadataValueType::Text => {
            let text = input.value.trim();
            if text.is_empty() {
                return None;
            }
            MetadataValue::Text(text.to_string())
        }
        MetadataValueType::Number => MetadataValue::Number(input.value.trim().parse::<f64>().ok()?),
        MetadataValueType::Flag => match input.value.as_str() {
            "true" => MetadataValue::Flag(true),
            "false" => MetadataValue::Flag(false),
            _ => return None,
        },
        MetadataValueType::List => {
            let mut items: Vec<String> = Vec::new();
            for item in input.value.split(',').map(str::trim).filter(|s| !s.is_empty()) {
                if !items.iter().any(|existing| existing == item) {
                    items.push(item.to_string());
                }
            }
            if items.is_empty() {
                return None;
            }
            MetadataValue::List(items)
        }
    };
    Some((key.to_string(), value))
}

/// Drop incomplete rows; a repeated key keeps its first slot and the last value
pub fn sanitize_metadata_filters(inputs: &[MetadataInput]) -> Vec<(String, MetadataValue)> {
    let mut out: Vec<(String, MetadataValue)> = Vec::new();
    for (key, value) in inputs.iter().filter_map(sanitize_metadata_input) {
        match out.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => out.push((key, value)),
        }
    }
    out
}

/// Numeric id from the id box; blank or non-numeric means no filter
pub fn parse_doc_id(raw: &str) -> Option<i64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<i64>().ok()
}

/// Parameters for the node documents query
pub fn node_query_params(form: &DocumentFilterForm, include_descendants: bool) -> DocumentListParams {
    let query = form.query.trim();
    DocumentListParams {
        query: (!query.is_empty()).then(|| query.to_string()),
        doc_type: form.doc_type.clone().filter(|t| !t.is_empty()),
        ids: parse_doc_id(&form.doc_id).into_iter().collect(),
        metadata: sanitize_metadata_filters(&form.metadata),
        size: Some(config::NODE_DOCUMENTS_PAGE_SIZE),
        include_descendants: Some(include_descendants),
        ..Default::default()
    }
}

/// Exact id match on the client, then order by position
pub fn filter_documents_by_id(documents: &[Document], doc_id: &str) -> Vec<Document> {
    let mut out: Vec<Document> = match parse_doc_id(doc_id) {
        Some(id) => documents.iter().filter(|d| d.id == id).cloned().collect(),
        None => documents.to_vec(),
    };
    sort_by_position(&mut out);
    out
}

pub fn sort_by_position(documents: &mut [Document]) {
    documents.sort_by_key(|d| d.position);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::documents::node_documents_path;

    fn make_doc(id: i64, title: &str, position: i32) -> Document {
        Document {
            id,
            title: title.to_string(),
            doc_type: Some("overview".to_string()),
            position,
            content: None,
            metadata: Default::default(),
            created_by: "user1".to_string(),
            updated_by: "user1".to_string(),
            created_at: "2024-01-01T00:00:00Z".to_string(),
            updated_at: "2024-01-01T00:00:00Z".to_string(),
            deleted_at: None,
        }
    }

    fn sample_docs() -> Vec<Document> {
        vec![
            make_doc(123, "Special Document", 3),
            make_doc(1, "Document A", 1),
            make_doc(2, "Document B", 2),
        ]
    }

    fn filter_row(key: &str, value_type: MetadataValueType, value: &str) -> MetadataInput {
        MetadataInput {
            key: key.to_string(),
            value_type,
            value: value.to_string(),
        }
    }

    #[test]
    fn test_blank_id_keeps_all_sorted() {
        let ids: Vec<i64> = filter_documents_by_id(&sample_docs(), "").iter().map(|d| d.id).collect();
        assert_eq!(ids, vec![1, 2, 123]);
    }

    #[test]
    fn test_exact_id_match() {
        let hits = filter_documents_by_id(&sample_docs(), "123");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "Special Document");
        assert!(filter_documents_by_id(&sample_docs(), "999").is_empty());
    }

    #[test]
    fn test_id_whitespace_and_garbage() {
        let hits = filter_documents_by_id(&sample_docs(), " 2 ");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, 2);
        assert_eq!(filter_documents_by_id(&sample_docs(), "not-a-number").len(), 3);
    }

    #[test]
    fn test_sanitize_metadata_filters() {
        let rows = vec![
            filter_row("  ", MetadataValueType::Text, "ignored"),
            filter_row(" source ", MetadataValueType::Text, "  internal "),
            filter_row("empty", MetadataValueType::Text, "   "),
            filter_row("difficulty", MetadataValueType::Number, " 3 "),
            filter_row("bad", MetadataValueType::Number, "abc"),
            filter_row("published", MetadataValueType::Flag, "false"),
            filter_row("maybe", MetadataValueType::Flag, "yes"),
            filter_row("tags", MetadataValueType::List, "a, b,,a , "),
            filter_row("none", MetadataValueType::List, " , "),
        ];
        assert_eq!(
            sanitize_metadata_filters(&rows),
            vec![
                ("source".to_string(), MetadataValue::Text("internal".to_string())),
                ("difficulty".to_string(), MetadataValue::Number(3.0)),
                ("published".to_string(), MetadataValue::Flag(false)),
                (
                    "tags".to_string(),
                    MetadataValue::List(vec!["a".to_string(), "b".to_string()])
                ),
            ]
        );
    }

    #[test]
    fn test_repeated_key_keeps_last_value() {
        let rows = vec![
            filter_row("level", MetadataValueType::Text, "one"),
            filter_row("other", MetadataValueType::Text, "x"),
            filter_row("level", MetadataValueType::Number, "2"),
        ];
        assert_eq!(
            sanitize_metadata_filters(&rows),
            vec![
                ("level".to_string(), MetadataValue::Number(2.0)),
                ("other".to_string(), MetadataValue::Text("x".to_string())),
            ]
        );
    }

    #[test]
    fn test_node_query_params() {
        let form = DocumentFilterForm {
            doc_id: " 42 ".to_string(),
            query: "  trimmed query  ".to_string(),
            doc_type: Some("dictation".to_string()),
            metadata: vec![filter_row("difficulty", MetadataValueType::Number, "4")],
        };
        let params = node_query_params(&form, true);
        assert_eq!(
            node_documents_path(5, &params),
            "/api/v1/nodes/5/subtree-documents?size=100&query=trimmed+query&type=dictation&id=42\
             &include_descendants=true&metadata.difficulty=4"
        );
    }

    #[test]
    fn test_node_query_params_empty_form() {
        let params = node_query_params(&DocumentFilterForm::default(), false);
        assert_eq!(
            node_documents_path(5, &params),
            "/api/v1/nodes/5/subtree-documents?size=100&include_descendants=false"
        );
    }

    #[test]
    fn test_value_type_round_trip_names() {
        for kind in MetadataValueType::ALL {
            assert_eq!(MetadataValueType::parse(kind.as_str()), kind);
        }
        assert_eq!(MetadataValueType::parse("unknown"), MetadataValueType::Text);
    }

    #[test]
    fn test_change_type_resets_value() {
        let mut row = MetadataInput {
            key: "level".to_string(),
            value_type: MetadataValueType::Text,
            value: "x".to_string(),
        };
        row.change_type(MetadataValueType::Flag);
        assert_eq!(row.value, "true");
        row.value = "false".to_string();
        row.change_type(MetadataValueType::Flag);
        assert_eq!(row.value, "false");
        row.change_type(MetadataValueType::Number);
        assert_eq!(row.value, "");
        row.value = "a, b".to_string();
        row.change_type(MetadataValueType::List);
        assert_eq!(row.value, "a, b");
    }
}
