//! HTML overview types: plain `overview` and the front-matter
//! `chapter_overview_v1` / `knowledge_overview_v1`.

use serde_yaml::Value;

use super::shared::*;

const FENCE: &str = "---";

/// Split a leading `---` YAML block from the HTML body.
/// Without a closed block the whole content is the body.
pub fn parse_front_matter(content: &str) -> (Option<Value>, String) {
    let trimmed = content.trim_start();
    let Some(after_open) = trimmed.strip_prefix(FENCE) else {
        return (None, content.to_string());
    };
    let Some(first_break) = after_open.find('\n') else {
        return (None, content.to_string());
    };
    if !after_open[..first_break].trim().is_empty() {
        return (None, content.to_string());
    }
    let rest = &after_open[first_break + 1..];

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == FENCE {
            let yaml = &rest[..offset];
            let body = rest[offset + line.len()..].trim_start_matches(['\r', '\n']);
            let meta = serde_yaml::from_str::<Value>(yaml).ok().filter(Value::is_mapping);
            return (meta, body.to_string());
        }
        offset += line.len();
    }
    (None, content.to_string())
}

fn meta_facts(meta: &Value) -> Option<Vec<Fact>> {
    let mapping = meta.as_mapping()?;
    let mut facts = Vec::new();
    if let Some(id) = field_number(meta, "id") {
        facts.push(Fact::new("ID", render_number(Some(id), None)));
    }
    if let Some(doc_type) = field_str(meta, "doc_type") {
        facts.push(Fact::new("Document type", doc_type));
    }
    if let Some(data_type) = field_str(meta, "data_type") {
        facts.push(Fact::new("Data type", data_type));
    }
    for (key, value) in mapping {
        let Some(key) = key.as_str() else { continue };
        if matches!(key, "id" | "doc_type" | "data_type") || value.is_null() {
            continue;
        }
        let shown = scalar_text(value).unwrap_or_else(|| pretty_dump(value));
        facts.push(Fact::new(key, shown));
    }
    (!facts.is_empty()).then_some(facts)
}

fn render_front_matter(content: &str, title: &str) -> PreviewResult {
    if content.trim().is_empty() {
        return PreviewResult::Empty;
    }
    let (meta, body) = parse_front_matter(content);
    let facts = meta.as_ref().and_then(meta_facts);
    if facts.is_none() && body.trim().is_empty() {
        return PreviewResult::Fallback(content.to_string());
    }
    PreviewResult::Component(
        PreviewDoc::new(title)
            .section_opt("Metadata", facts.map(SectionBody::Facts))
            .section_opt("Content", (!body.trim().is_empty()).then_some(SectionBody::Frame(body))),
    )
}

pub fn render_chapter_overview_v1(content: &str) -> PreviewResult {
    render_front_matter(content, "Chapter overview")
}

pub fn render_knowledge_overview_v1(content: &str) -> PreviewResult {
    render_front_matter(content, "Knowledge overview")
}

pub fn render_overview(content: &str) -> PreviewResult {
    if content.trim().is_empty() {
        return PreviewResult::Empty;
    }
    PreviewResult::Component(PreviewDoc::new("Overview").section("Content", SectionBody::Frame(content.to_string())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_front_matter() {
        let (meta, body) = parse_front_matter("---\nid: 5\ndoc_type: chapter_overview_v1\n---\n<h1>Hi</h1>\n");
        let meta = meta.unwrap();
        assert_eq!(field_number(&meta, "id"), Some(5.0));
        assert_eq!(body, "<h1>Hi</h1>\n");
    }

    #[test]
    fn test_no_front_matter() {
        let (meta, body) = parse_front_matter("<p>plain</p>");
        assert!(meta.is_none());
        assert_eq!(body, "<p>plain</p>");

        let (meta, body) = parse_front_matter("---\nid: 1\n<p>never closed</p>");
        assert!(meta.is_none());
        assert_eq!(body, "---\nid: 1\n<p>never closed</p>");
    }

    #[test]
    fn test_invalid_front_matter_yaml_is_ignored() {
        let (meta, body) = parse_front_matter("---\nid: [1\n---\n<p>x</p>");
        assert!(meta.is_none());
        assert_eq!(body, "<p>x</p>");
    }

    #[test]
    fn test_chapter_overview_facts_keep_extra_keys() {
        let result = render_chapter_overview_v1("---\nid: '8'\ndata_type: chapter\ntheme: blue\n---\n<p>x</p>");
        let PreviewResult::Component(doc) = result else {
            panic!("expected component");
        };
        assert_eq!(doc.title, "Chapter overview");
        assert_eq!(
            doc.sections[0].body,
            SectionBody::Facts(vec![
                Fact::new("ID", "8"),
                Fact::new("Data type", "chapter"),
                Fact::new("theme", "blue"),
            ])
        );
        assert_eq!(doc.sections[1].body, SectionBody::Frame("<p>x</p>".to_string()));
    }

    #[test]
    fn test_front_matter_without_anything_falls_back() {
        let content = "---\n---\n   ";
        assert_eq!(
            render_knowledge_overview_v1(content),
            PreviewResult::Fallback(content.to_string())
        );
        assert_eq!(render_knowledge_overview_v1("  "), PreviewResult::Empty);
    }

    #[test]
    fn test_plain_overview() {
        assert_eq!(render_overview(""), PreviewResult::Empty);
        let PreviewResult::Component(doc) = render_overview("<div>x</div>") else {
            panic!("expected component");
        };
        assert_eq!(doc.sections[0].body, SectionBody::Frame("<div>x</div>".to_string()));
    }
}
