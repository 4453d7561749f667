//! Document Types & Templates
//!
//! Known document types, their content format, and the starter content
//! placed in the editor when a document is created.

use crate::models::{ContentFormat, DocumentContent};

pub struct DocumentTypeInfo {
    pub value: &'static str,
    pub label: &'static str,
    pub format: ContentFormat,
}

pub const DOCUMENT_TYPES: &[DocumentTypeInfo] = &[
    DocumentTypeInfo { value: "overview", label: "Overview", format: ContentFormat::Html },
    DocumentTypeInfo { value: "dictation", label: "Dictation", format: ContentFormat::Yaml },
    DocumentTypeInfo { value: "comprehensive_choice", label: "Comprehensive choice", format: ContentFormat::Yaml },
    DocumentTypeInfo { value: "case_analysis", label: "Case analysis", format: ContentFormat::Yaml },
    DocumentTypeInfo { value: "essay", label: "Essay", format: ContentFormat::Yaml },
    DocumentTypeInfo { value: "dictation_v1", label: "Dictation (v1)", format: ContentFormat::Yaml },
    DocumentTypeInfo { value: "comprehensive_choice_v1", label: "Comprehensive choice (v1)", format: ContentFormat::Yaml },
    DocumentTypeInfo { value: "case_analysis_v1", label: "Case analysis (v1)", format: ContentFormat::Yaml },
    DocumentTypeInfo { value: "essay_v1", label: "Essay (v1)", format: ContentFormat::Yaml },
    DocumentTypeInfo { value: "chapter_overview_v1", label: "Chapter overview (v1)", format: ContentFormat::Html },
    DocumentTypeInfo { value: "knowledge_overview_v1", label: "Knowledge overview (v1)", format: ContentFormat::Html },
];

pub fn type_info(doc_type: &str) -> Option<&'static DocumentTypeInfo> {
    DOCUMENT_TYPES.iter().find(|t| t.value == doc_type)
}

/// Display label, falling back to the raw type name
pub fn type_label(doc_type: &str) -> &str {
    type_info(doc_type).map(|t| t.label).unwrap_or(doc_type)
}

/// Overview-family types store HTML, everything else YAML
pub fn format_for_type(doc_type: &str) -> ContentFormat {
    match type_info(doc_type) {
        Some(info) => info.format,
        None if doc_type.ends_with("overview") || doc_type.ends_with("overview_v1") => ContentFormat::Html,
        None => ContentFormat::Yaml,
    }
}

const OVERVIEW_TEMPLATE: &str = r#"<div class="overview">
  <h2>Overview</h2>

  <section class="description">
    <h3>Description</h3>
    <p>Describe the purpose and background of this unit...</p>
  </section>

  <section class="knowledge-points">
    <h3>Knowledge points</h3>
    <ul>
      <li>Point 1</li>
      <li>Point 2</li>
      <li>Point 3</li>
    </ul>
  </section>

  <section class="difficulty">
    <h3>Difficulty</h3>
    <p>Medium</p>
  </section>

  <section class="notes">
    <h3>Notes</h3>
    <p>Anything else worth mentioning...</p>
  </section>
</div>"#;

const DICTATION_TEMPLATE: &str = r#"title: "Dictation title"
type: "word"  # word, phrase, sentence, paragraph
content:
  text: "Text to write down"
  pinyin: "ni hao shi jie"  # optional pronunciation hint
hints:
  - "Hint 1: give some of the letters"
  - "Hint 2: explain the meaning"
answer_key: "Reference answer (separate variants with /)"
difficulty: 3  # 1-5
time_limit: 60  # seconds
tags:
  - "vocabulary"
  - "basics"
points: 5"#;

const COMPREHENSIVE_CHOICE_TEMPLATE: &str = r#"title: "Comprehensive choice title"
description: "Background material for the question"
stem: "Stem: ____ is one of the most ____ ____ languages."
# Each ____ in the stem maps to one blank below, in order

blanks:
  - blank_id: 1
    position: 0
    question: "Blank 1: pick the subject"
    options:
      - id: A
        content: "Python"
        is_correct: true
      - id: B
        content: "Java"
        is_correct: false
      - id: C
        content: "C++"
        is_correct: false
      - id: D
        content: "JavaScript"
        is_correct: false

  - blank_id: 2
    position: 1
    question: "Blank 2: pick the adjective"
    options:
      - id: A
        content: "popular"
        is_correct: true
      - id: B
        content: "complex"
        is_correct: false
      - id: C
        content: "simple"
        is_correct: false
      - id: D
        content: "powerful"
        is_correct: false

  - blank_id: 3
    position: 2
    question: "Blank 3: pick the noun"
    options:
      - id: A
        content: "programming"
        is_correct: true
      - id: B
        content: "scripting"
        is_correct: false
      - id: C
        content: "development"
        is_correct: false
      - id: D
        content: "application"
        is_correct: false

correct_answer: "A-A-A"
explanation: |
  Explanation:
  1. Why blank 1 is A...
  2. Why blank 2 is A...
  3. Why blank 3 is A...

difficulty: 3  # 1-5
points: 15
tags:
  - "comprehensive choice"
  - "knowledge point""#;

const CASE_ANALYSIS_TEMPLATE: &str = r#"title: "Case analysis title"
case_background: |
  **Background**
  A company ran into the following situation while rolling out a project:

  1. Project background...
  2. Current problems...
  3. Relevant data...

questions:
  - question_id: 1
    content: "Question 1: identify the main problems in this case. (10 points)"
    points: 10
    reference_answer: |
      The main problems are:
      1. Problem one
      2. Problem two
      3. Problem three
    grading_criteria:
      - "Problem one identified: 3 points"
      - "Problem two identified: 3 points"
      - "Problem three identified: 4 points"

  - question_id: 2
    content: "Question 2: propose a solution. (15 points)"
    points: 15
    reference_answer: |
      Suggested measures:
      1. Measure one...
      2. Measure two...
    grading_criteria:
      - "Relevance of the plan: 10 points"
      - "Feasibility of the plan: 5 points"

total_points: 25
difficulty: 4  # 1-5
time_limit: 45  # minutes
tags:
  - "case analysis"
  - "applied""#;

const ESSAY_TEMPLATE: &str = r#"title: "Essay title"
topic: "Discuss the following topic"
description: |
  Describe the theme, background and expectations...

requirements: |
  1. Clear thesis
  2. Sufficient evidence
  3. Clear structure
  4. Fluent language

word_limit:
  min: 800
  max: 1200

outline_suggestion:
  - "1. Introduction"
  - "2. Analysis"
  - "3. Evidence"
  - "4. Recommendations"
  - "5. Conclusion"

grading_criteria:
  - criterion: "Thesis"
    points: 20
    description: "Is the thesis clear and valuable"
  - criterion: "Evidence"
    points: 30
    description: "Is the evidence sufficient and accurate"
  - criterion: "Logic"
    points: 20
    description: "Is the reasoning sound"
  - criterion: "Structure"
    points: 15
    description: "Is the structure complete"
  - criterion: "Language"
    points: 15
    description: "Is the language fluent"

total_points: 100
difficulty: 5  # 1-5
time_limit: 120  # minutes
tags:
  - "essay"
  - "writing"

reference_materials:
  - "Reference 1"
  - "Further reading""#;

/// Starter content for a type, `None` when the type has no template
pub fn template_for(doc_type: &str) -> Option<DocumentContent> {
    let data = match doc_type {
        "overview" => OVERVIEW_TEMPLATE,
        "dictation" => DICTATION_TEMPLATE,
        "comprehensive_choice" => COMPREHENSIVE_CHOICE_TEMPLATE,
        "case_analysis" => CASE_ANALYSIS_TEMPLATE,
        "essay" => ESSAY_TEMPLATE,
        _ => return None,
    };
    Some(DocumentContent {
        format: format_for_type(doc_type),
        data: data.to_string(),
    })
}

/// Template data, or empty content in the type's format
pub fn initial_content(doc_type: &str) -> DocumentContent {
    template_for(doc_type).unwrap_or_else(|| DocumentContent {
        format: format_for_type(doc_type),
        data: String::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_formats() {
        assert_eq!(format_for_type("overview"), ContentFormat::Html);
        assert_eq!(format_for_type("chapter_overview_v1"), ContentFormat::Html);
        assert_eq!(format_for_type("dictation_v1"), ContentFormat::Yaml);
        assert_eq!(format_for_type("unit_overview"), ContentFormat::Html);
        assert_eq!(format_for_type("anything_else"), ContentFormat::Yaml);
    }

    #[test]
    fn test_template_for_known_types() {
        let overview = template_for("overview").unwrap();
        assert_eq!(overview.format, ContentFormat::Html);
        assert!(overview.data.starts_with("<div class=\"overview\">"));

        for doc_type in ["dictation", "comprehensive_choice", "case_analysis", "essay"] {
            let content = template_for(doc_type).unwrap();
            assert_eq!(content.format, ContentFormat::Yaml);
            let parsed: serde_yaml::Value = serde_yaml::from_str(&content.data).unwrap();
            assert!(parsed.is_mapping(), "{} template should be a mapping", doc_type);
        }
    }

    #[test]
    fn test_missing_template() {
        assert!(template_for("essay_v1").is_none());
        let content = initial_content("knowledge_overview_v1");
        assert_eq!(content.format, ContentFormat::Html);
        assert!(content.data.is_empty());
    }

    #[test]
    fn test_type_label() {
        assert_eq!(type_label("case_analysis"), "Case analysis");
        assert_eq!(type_label("custom"), "custom");
    }
}
