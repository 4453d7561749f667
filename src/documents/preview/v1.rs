//! Two-document YAML question types (`*_v1`).
//!
//! Content is `meta --- body`; a single document is treated as the body.
//! Both halves are read leniently: wrong-typed fields are dropped,
//! and the preview only falls back when neither half yields anything.

use serde_yaml::Value;

use super::shared::*;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct V1Meta {
    pub id: Option<f64>,
    pub doc_type: Option<String>,
    pub question_type: Option<String>,
    pub data_type: Option<String>,
    pub source: Vec<String>,
}

impl V1Meta {
    fn from_value(value: Option<&Value>) -> Option<Self> {
        let value = value.filter(|v| v.is_mapping())?;
        let meta = V1Meta {
            id: field_number(value, "id"),
            doc_type: field_str(value, "doc_type"),
            question_type: field_str(value, "question_type"),
            data_type: field_str(value, "data_type"),
            source: field_string_list(value, "source").unwrap_or_default(),
        };
        (meta != V1Meta::default()).then_some(meta)
    }

    fn facts(&self, second: (&str, Option<&str>)) -> SectionBody {
        let source = if self.source.is_empty() {
            "-".to_string()
        } else {
            self.source.join(", ")
        };
        SectionBody::Facts(vec![
            Fact::new("ID", render_number(self.id, None)),
            Fact::new("Document type", text_or_dash(self.doc_type.as_deref())),
            Fact::new(second.0, text_or_dash(second.1)),
            Fact::new("Source", source),
        ])
    }
}

/// `(meta, body)` halves of the parsed content
fn split_documents(content: &str) -> Result<(Option<Value>, Option<Value>, Value), PreviewResult> {
    if content.trim().is_empty() {
        return Err(PreviewResult::Empty);
    }
    let docs = load_all(content).map_err(PreviewResult::Error)?;
    let raw = match docs.len() {
        0 => return Err(PreviewResult::Empty),
        1 => docs[0].clone(),
        _ => Value::Sequence(docs.clone()),
    };
    let two_part = docs.len() > 1;
    let mut iter = docs.into_iter();
    let (meta, body) = if two_part {
        let meta = iter.next();
        (meta, iter.next())
    } else {
        (None, iter.next())
    };
    Ok((meta, body, raw))
}

/// Mapping entries as a list, skipping anything that is not a mapping
fn mapping_items(value: &Value, key: &str) -> Vec<Value> {
    field(value, key)
        .and_then(Value::as_sequence)
        .map(|items| items.iter().filter(|v| v.is_mapping()).cloned().collect())
        .unwrap_or_default()
}

fn html_section(value: Option<String>) -> Option<SectionBody> {
    non_empty(value).map(SectionBody::Html)
}

// ========================
// dictation_v1
// ========================

pub fn render_dictation_v1(content: &str) -> PreviewResult {
    let (meta_doc, body_doc, raw) = match split_documents(content) {
        Ok(parts) => parts,
        Err(result) => return result,
    };
    let meta = V1Meta::from_value(meta_doc.as_ref());
    let body = body_doc.filter(Value::is_mapping);

    let details: Vec<PreviewItem> = body
        .as_ref()
        .map(|b| mapping_items(b, "details"))
        .unwrap_or_default()
        .iter()
        .filter_map(|item| {
            let no = field(item, "no").and_then(scalar_text);
            let question = field_str(item, "question");
            let answer = field_str(item, "answer");
            let kind = field_str(item, "type");
            let km_point = field_str(item, "km_point");
            if no.is_none() && question.is_none() && answer.is_none() && kind.is_none() && km_point.is_none() {
                return None;
            }
            let mut heading = match no {
                Some(no) => format!("Item {}", no),
                None => "Item".to_string(),
            };
            if let Some(kind) = non_empty(kind) {
                heading = format!("{} ({})", heading, kind);
            }
            let mut sections = Vec::new();
            if let Some(q) = html_section(question) {
                sections.push(Section::new("Question", q));
            }
            if let Some(a) = html_section(answer) {
                sections.push(Section::new("Answer", a));
            }
            Some(PreviewItem {
                heading,
                note: non_empty(km_point).map(|k| format!("Knowledge point: {}", k)),
                sections,
            })
        })
        .collect();
    let study_time = body
        .as_ref()
        .and_then(|b| field(b, "study_time"))
        .filter(|v| !v.is_null())
        .map(|v| scalar_text(v).unwrap_or_else(|| pretty_dump(v)));

    if meta.is_none() && details.is_empty() && study_time.is_none() {
        return PreviewResult::Fallback(pretty_dump(&raw));
    }

    let title = meta
        .as_ref()
        .and_then(|m| non_empty(m.question_type.clone()))
        .unwrap_or_else(|| "Dictation".to_string());
    let facts = meta
        .as_ref()
        .map(|m| m.facts(("Question type", m.question_type.as_deref())));
    PreviewResult::Component(
        PreviewDoc::new(title)
            .section_opt("Metadata", facts)
            .section_opt("Study time", study_time.map(SectionBody::Text))
            .section_opt("Items", (!details.is_empty()).then_some(SectionBody::Items(details))),
    )
}

// ========================
// comprehensive_choice_v1
// ========================

pub fn render_comprehensive_choice_v1(content: &str) -> PreviewResult {
    let (meta_doc, body_doc, raw) = match split_documents(content) {
        Ok(parts) => parts,
        Err(result) => return result,
    };
    let meta = V1Meta::from_value(meta_doc.as_ref());
    let body = body_doc.filter(Value::is_mapping);

    let stem = body.as_ref().and_then(|b| field_str(b, "title"));
    let analysis = body.as_ref().and_then(|b| field_str(b, "analysis"));
    let sub_questions: Vec<PreviewItem> = body
        .as_ref()
        .map(|b| mapping_items(b, "sub_questions"))
        .unwrap_or_default()
        .iter()
        .filter_map(|item| {
            let answer = field_str(item, "answer");
            let choices: Vec<ChoiceRow> = mapping_items(item, "options")
                .iter()
                .filter_map(|o| {
                    let key = field_str(o, "key");
                    let content = field_str(o, "content");
                    if key.is_none() && content.is_none() {
                        return None;
                    }
                    Some(ChoiceRow {
                        correct: key.is_some() && key == answer,
                        key: key.unwrap_or_default(),
                        content: content.unwrap_or_else(|| "Option".to_string()),
                    })
                })
                .collect();
            if choices.is_empty() && answer.is_none() {
                return None;
            }
            Some((choices, answer))
        })
        .enumerate()
        .map(|(i, (choices, answer))| {
            let mut sections = Vec::new();
            if !choices.is_empty() {
                sections.push(Section::new("Options", SectionBody::Choices(choices)));
            }
            if let Some(answer) = non_empty(answer) {
                sections.push(Section::new("Correct answer", SectionBody::Code(answer)));
            }
            PreviewItem {
                heading: format!("Sub-question {}", i + 1),
                note: None,
                sections,
            }
        })
        .collect();

    let has_body = stem.is_some() || analysis.is_some() || !sub_questions.is_empty();
    if meta.is_none() && !has_body {
        return PreviewResult::Fallback(pretty_dump(&raw));
    }

    let title = stem
        .as_deref()
        .map(strip_html_tags)
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| "Comprehensive choice".to_string());
    let facts = meta.as_ref().map(|m| m.facts(("Data type", m.data_type.as_deref())));
    PreviewResult::Component(
        PreviewDoc::new(title)
            .section_opt("Metadata", facts)
            .section_opt("Stem", html_section(stem))
            .section_opt(
                "Sub-questions",
                (!sub_questions.is_empty()).then_some(SectionBody::Items(sub_questions)),
            )
            .section_opt("Analysis", html_section(analysis)),
    )
}

// ========================
// case_analysis_v1
// ========================

pub fn render_case_analysis_v1(content: &str) -> PreviewResult {
    let (meta_doc, body_doc, raw) = match split_documents(content) {
        Ok(parts) => parts,
        Err(result) => return result,
    };
    let meta = V1Meta::from_value(meta_doc.as_ref());
    let body = body_doc.filter(Value::is_mapping);

    let stem = body.as_ref().and_then(|b| field_str(b, "title"));
    let analysis = body.as_ref().and_then(|b| field_str(b, "analysis"));
    let details: Vec<PreviewItem> = body
        .as_ref()
        .map(|b| mapping_items(b, "details"))
        .unwrap_or_default()
        .iter()
        .enumerate()
        .filter_map(|(i, item)| {
            let no = field(item, "no").and_then(scalar_text);
            let question = field_str(item, "question");
            let answer = field_str(item, "answer");
            let score = field_number(item, "score");
            let kind = field_str(item, "type");
            if no.is_none() && question.is_none() && answer.is_none() && score.is_none() && kind.is_none() {
                return None;
            }
            let mut heading = format!("Part {}", no.unwrap_or_else(|| (i + 1).to_string()));
            if let Some(kind) = non_empty(kind) {
                heading = format!("{} ({})", heading, kind);
            }
            let mut sections = Vec::new();
            if let Some(q) = html_section(question) {
                sections.push(Section::new("Question", q));
            }
            if let Some(a) = html_section(answer) {
                sections.push(Section::new("Reference answer", a));
            }
            Some(PreviewItem {
                heading,
                note: score.map(|s| render_number(Some(s), Some("pts"))),
                sections,
            })
        })
        .collect();

    let has_body = stem.is_some() || analysis.is_some() || !details.is_empty();
    if meta.is_none() && !has_body {
        return PreviewResult::Fallback(pretty_dump(&raw));
    }

    let title = stem
        .as_deref()
        .map(strip_html_tags)
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| "Case analysis".to_string());
    let facts = meta.as_ref().map(|m| m.facts(("Data type", m.data_type.as_deref())));
    PreviewResult::Component(
        PreviewDoc::new(title)
            .section_opt("Metadata", facts)
            .section_opt("Case", html_section(stem))
            .section_opt("Analysis", html_section(analysis))
            .section_opt("Parts", (!details.is_empty()).then_some(SectionBody::Items(details))),
    )
}

// ========================
// essay_v1
// ========================

pub fn render_essay_v1(content: &str) -> PreviewResult {
    let (meta_doc, body_doc, raw) = match split_documents(content) {
        Ok(parts) => parts,
        Err(result) => return result,
    };
    let meta = V1Meta::from_value(meta_doc.as_ref());
    let body = body_doc.filter(Value::is_mapping);
    let text = |key: &str| body.as_ref().and_then(|b| field_str(b, key));

    let title = text("title");
    let question = text("content");
    let analysis = text("analysis");
    let digest = text("digest");
    let sample = text("sample");
    let theme_id = body.as_ref().and_then(|b| field_number(b, "theme_id"));

    let has_body = [&title, &question, &analysis, &digest, &sample]
        .iter()
        .any(|v| v.is_some())
        || theme_id.is_some();
    if meta.is_none() && !has_body {
        return PreviewResult::Fallback(pretty_dump(&raw));
    }

    let heading = title
        .as_deref()
        .map(strip_html_tags)
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| "Essay".to_string());
    let facts = meta.as_ref().map(|m| m.facts(("Data type", m.data_type.as_deref())));
    PreviewResult::Component(
        PreviewDoc::new(heading)
            .section_opt("Metadata", facts)
            .section_opt("Question", html_section(question))
            .section_opt("Analysis", html_section(analysis))
            .section_opt("Key points", html_section(digest))
            .section_opt("Sample essay", html_section(sample))
            .section_opt(
                "Theme",
                theme_id.map(|id| SectionBody::Text(render_number(Some(id), None))),
            ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn component(result: PreviewResult) -> PreviewDoc {
        match result {
            PreviewResult::Component(doc) => doc,
            other => panic!("expected component, got {:?}", other),
        }
    }

    const DICTATION: &str = "id: '17'\ndoc_type: dictation_v1\nquestion_type: Word dictation\nsource: [Book 1, 2024]\n---\n\
        details:\n  - no: 1\n    question: <b>apple</b>\n    answer: apple\n    km_point: fruit\n  - junk\n  - {}\n";

    #[test]
    fn test_dictation_v1_meta_and_body() {
        let doc = component(render_dictation_v1(DICTATION));
        assert_eq!(doc.title, "Word dictation");
        assert_eq!(
            doc.sections[0].body,
            SectionBody::Facts(vec![
                Fact::new("ID", "17"),
                Fact::new("Document type", "dictation_v1"),
                Fact::new("Question type", "Word dictation"),
                Fact::new("Source", "Book 1, 2024"),
            ])
        );
        let items = doc.sections.iter().find(|s| s.title == "Items").unwrap();
        let SectionBody::Items(items) = &items.body else {
            panic!("expected items");
        };
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].heading, "Item 1");
        assert_eq!(items[0].note.as_deref(), Some("Knowledge point: fruit"));
        assert_eq!(items[0].sections[0].body, SectionBody::Html("<b>apple</b>".to_string()));
    }

    #[test]
    fn test_single_document_is_body() {
        let doc = component(render_dictation_v1("details:\n  - question: q\n"));
        assert_eq!(doc.title, "Dictation");
        assert!(doc.sections.iter().all(|s| s.title != "Metadata"));
    }

    #[test]
    fn test_nothing_recognised_falls_back() {
        let result = render_dictation_v1("unrelated: true\n");
        assert_eq!(result, PreviewResult::Fallback("{\n  \"unrelated\": true\n}".to_string()));
        assert!(matches!(render_essay_v1("- 1\n- 2\n"), PreviewResult::Fallback(_)));
        assert!(matches!(render_case_analysis_v1("a: 1\n---\nb: 2\n"), PreviewResult::Fallback(_)));
    }

    #[test]
    fn test_empty_and_error() {
        assert_eq!(render_essay_v1(" "), PreviewResult::Empty);
        assert!(matches!(render_comprehensive_choice_v1("a: [1\n"), PreviewResult::Error(_)));
    }

    #[test]
    fn test_choice_v1_marks_answer() {
        let doc = component(render_comprehensive_choice_v1(
            "doc_type: comprehensive_choice_v1\n---\ntitle: <p>Pick one</p>\nsub_questions:\n  - options:\n      - {key: A, content: first}\n      - {key: B, content: second}\n    answer: B\n",
        ));
        assert_eq!(doc.title, "Pick one");
        let subs = doc.sections.iter().find(|s| s.title == "Sub-questions").unwrap();
        let SectionBody::Items(items) = &subs.body else {
            panic!("expected items");
        };
        let SectionBody::Choices(choices) = &items[0].sections[0].body else {
            panic!("expected choices");
        };
        assert!(!choices[0].correct);
        assert!(choices[1].correct);
        assert_eq!(items[0].sections[1].body, SectionBody::Code("B".to_string()));
    }

    #[test]
    fn test_case_analysis_v1_scores() {
        let doc = component(render_case_analysis_v1(
            "title: Case <i>one</i>\ndetails:\n  - question: Why?\n    score: 5\n    type: short\n",
        ));
        assert_eq!(doc.title, "Case one");
        let parts = doc.sections.iter().find(|s| s.title == "Parts").unwrap();
        let SectionBody::Items(items) = &parts.body else {
            panic!("expected items");
        };
        assert_eq!(items[0].heading, "Part 1 (short)");
        assert_eq!(items[0].note.as_deref(), Some("5 pts"));
    }

    #[test]
    fn test_essay_v1_sections() {
        let doc = component(render_essay_v1("id: 3\n---\ncontent: <p>Write</p>\ntheme_id: 12\n"));
        assert_eq!(doc.title, "Essay");
        let titles: Vec<&str> = doc.sections.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["Metadata", "Question", "Theme"]);
    }
}
