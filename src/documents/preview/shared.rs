//! Preview Model & Helpers
//!
//! Plugins turn document content into a `PreviewDoc`; one component
//! renders every `PreviewDoc`.

use serde::Deserialize;
use serde_yaml::Value;

/// Coloured tag shown under the title
#[derive(Debug, Clone, PartialEq)]
pub struct Badge {
    pub label: String,
    pub color: &'static str,
}

/// Label/value row in a facts grid
#[derive(Debug, Clone, PartialEq)]
pub struct Fact {
    pub label: String,
    pub value: String,
}

impl Fact {
    pub fn new(label: &str, value: impl Into<String>) -> Self {
        Self {
            label: label.to_string(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChoiceRow {
    pub key: String,
    pub content: String,
    pub correct: bool,
}

/// Numbered sub-entry (question, blank, detail)
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewItem {
    pub heading: String,
    pub note: Option<String>,
    pub sections: Vec<Section>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SectionBody {
    Text(String),
    /// Monospace answer text
    Code(String),
    Markdown(String),
    /// Trusted inline fragment
    Html(String),
    /// Full HTML page rendered in a sandboxed frame
    Frame(String),
    List(Vec<String>),
    Facts(Vec<Fact>),
    Choices(Vec<ChoiceRow>),
    Items(Vec<PreviewItem>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub title: String,
    pub body: SectionBody,
}

impl Section {
    pub fn new(title: &str, body: SectionBody) -> Self {
        Self {
            title: title.to_string(),
            body,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PreviewDoc {
    pub title: String,
    pub badges: Vec<Badge>,
    pub tags: Vec<String>,
    pub sections: Vec<Section>,
}

impl PreviewDoc {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn section(mut self, title: &str, body: SectionBody) -> Self {
        self.sections.push(Section::new(title, body));
        self
    }

    /// Add a section only when `body` is present
    pub fn section_opt(self, title: &str, body: Option<SectionBody>) -> Self {
        match body {
            Some(body) => self.section(title, body),
            None => self,
        }
    }
}

/// Outcome of rendering a document's content
#[derive(Debug, Clone, PartialEq)]
pub enum PreviewResult {
    Empty,
    Error(String),
    Component(PreviewDoc),
    /// Pretty-printed dump of whatever was parsed
    Fallback(String),
}

pub fn difficulty_color(difficulty: f64) -> &'static str {
    if difficulty >= 4.0 {
        "red"
    } else if difficulty >= 3.0 {
        "orange"
    } else {
        "green"
    }
}

pub fn difficulty_badge(difficulty: Option<f64>) -> Badge {
    match difficulty {
        Some(d) => Badge {
            label: format!("Difficulty: {}/5", format_number(d)),
            color: difficulty_color(d),
        },
        None => Badge {
            label: "Difficulty: -".to_string(),
            color: "default",
        },
    }
}

/// `3` rather than `3.0`
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

/// `"-"` for a missing number
pub fn render_number(value: Option<f64>, suffix: Option<&str>) -> String {
    match (value, suffix) {
        (None, _) => "-".to_string(),
        (Some(v), Some(s)) => format!("{} {}", format_number(v), s),
        (Some(v), None) => format_number(v),
    }
}

pub fn text_or_dash(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => "-".to_string(),
    }
}

/// Remove anything that looks like a tag, then trim
pub fn strip_html_tags(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut rest = value;
    while let Some(start) = rest.find('<') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];
        match tail[1..].find('>') {
            Some(end) if end > 0 => rest = &tail[end + 2..],
            _ => {
                out.push('<');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out.trim().to_string()
}

pub fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

// ========================
// YAML helpers
// ========================

/// Parse every `---` separated document
pub fn load_all(content: &str) -> Result<Vec<Value>, String> {
    let mut docs = Vec::new();
    for document in serde_yaml::Deserializer::from_str(content) {
        let value = Value::deserialize(document).map_err(|e| e.to_string())?;
        docs.push(value);
    }
    Ok(docs)
}

/// JSON-style dump for the fallback view
pub fn pretty_dump(value: &Value) -> String {
    serde_json::to_string_pretty(value)
        .or_else(|_| serde_yaml::to_string(value))
        .unwrap_or_default()
}

/// Field of a mapping by string key
pub fn field<'a>(value: &'a Value, key: &str) -> Option<&'a Value> {
    value.as_mapping()?.get(key)
}

pub fn field_str(value: &Value, key: &str) -> Option<String> {
    field(value, key)?.as_str().map(str::to_string)
}

/// Number, or a string holding one
pub fn field_number(value: &Value, key: &str) -> Option<f64> {
    match field(value, key)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) if !s.trim().is_empty() => s.trim().parse().ok(),
        _ => None,
    }
}

/// Non-null scalar as display text
pub fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// List of non-blank scalars, `None` when nothing survives
pub fn field_string_list(value: &Value, key: &str) -> Option<Vec<String>> {
    let items: Vec<String> = field(value, key)?
        .as_sequence()?
        .iter()
        .filter_map(scalar_text)
        .filter(|s| !s.trim().is_empty())
        .collect();
    (!items.is_empty()).then_some(items)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difficulty_badge() {
        assert_eq!(difficulty_badge(Some(4.0)).color, "red");
        assert_eq!(difficulty_badge(Some(3.0)).color, "orange");
        assert_eq!(difficulty_badge(Some(2.5)).color, "green");
        assert_eq!(difficulty_badge(Some(5.0)).label, "Difficulty: 5/5");
        assert_eq!(difficulty_badge(None).label, "Difficulty: -");
    }

    #[test]
    fn test_render_number() {
        assert_eq!(render_number(None, Some("pts")), "-");
        assert_eq!(render_number(Some(60.0), Some("s")), "60 s");
        assert_eq!(render_number(Some(1.5), None), "1.5");
    }

    #[test]
    fn test_strip_html_tags() {
        assert_eq!(strip_html_tags("  <p>Title <b>bold</b></p> "), "Title bold");
        assert_eq!(strip_html_tags("a < b"), "a < b");
        assert_eq!(strip_html_tags("<>x"), "<>x");
    }

    #[test]
    fn test_load_all() {
        let docs = load_all("id: 1\n---\ntitle: x\n").unwrap();
        assert_eq!(docs.len(), 2);
        assert_eq!(field_number(&docs[0], "id"), Some(1.0));
        assert_eq!(field_str(&docs[1], "title").as_deref(), Some("x"));
        assert!(load_all("a: [1, 2").is_err());
    }

    #[test]
    fn test_field_helpers() {
        let value: Value = serde_yaml::from_str("id: ' 12 '\nsource: [a, 3, null, '  ', true]\n").unwrap();
        assert_eq!(field_number(&value, "id"), Some(12.0));
        assert_eq!(
            field_string_list(&value, "source"),
            Some(vec!["a".to_string(), "3".to_string(), "true".to_string()])
        );
        assert_eq!(field_string_list(&value, "missing"), None);
    }

    #[test]
    fn test_pretty_dump() {
        let value: Value = serde_yaml::from_str("a: 1").unwrap();
        assert_eq!(pretty_dump(&value), "{\n  \"a\": 1\n}");
    }
}
