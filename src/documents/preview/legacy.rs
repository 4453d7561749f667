//! Single-document YAML question types:
//! `dictation`, `comprehensive_choice`, `case_analysis`, `essay`.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_yaml::Value;

use super::shared::*;

#[derive(Debug, Default, Deserialize)]
struct DictationBody {
    text: Option<String>,
    pinyin: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct Dictation {
    title: Option<String>,
    #[serde(rename = "type")]
    kind: Option<String>,
    difficulty: Option<f64>,
    points: Option<f64>,
    time_limit: Option<f64>,
    content: Option<DictationBody>,
    hints: Option<Vec<String>>,
    answer_key: Option<String>,
    tags: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct ChoiceOption {
    id: Option<String>,
    content: Option<String>,
    is_correct: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct ChoiceBlank {
    blank_id: Option<f64>,
    question: Option<String>,
    options: Option<Vec<ChoiceOption>>,
}

#[derive(Debug, Default, Deserialize)]
struct ComprehensiveChoice {
    title: Option<String>,
    description: Option<String>,
    stem: Option<String>,
    blanks: Option<Vec<ChoiceBlank>>,
    correct_answer: Option<String>,
    explanation: Option<String>,
    difficulty: Option<f64>,
    points: Option<f64>,
    tags: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct CaseQuestion {
    question_id: Option<f64>,
    content: Option<String>,
    points: Option<f64>,
    reference_answer: Option<String>,
    grading_criteria: Option<Vec<String>>,
}

#[derive(Debug, Default, Deserialize)]
struct CaseAnalysis {
    title: Option<String>,
    case_background: Option<String>,
    questions: Option<Vec<CaseQuestion>>,
    difficulty: Option<f64>,
    total_points: Option<f64>,
    time_limit: Option<f64>,
    tags: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct WordLimit {
    min: Option<f64>,
    max: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct EssayCriterion {
    criterion: Option<String>,
    points: Option<f64>,
    description: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct Essay {
    title: Option<String>,
    topic: Option<String>,
    description: Option<String>,
    requirements: Option<String>,
    word_limit: Option<WordLimit>,
    outline_suggestion: Option<Vec<String>>,
    grading_criteria: Option<Vec<EssayCriterion>>,
    reference_materials: Option<Vec<String>>,
    difficulty: Option<f64>,
    total_points: Option<f64>,
    time_limit: Option<f64>,
    tags: Option<Vec<String>>,
}

/// Parse one YAML document and check it against `T`.
/// Anything that is not a mapping of the right shape falls back to a dump.
fn parse_typed<T: DeserializeOwned>(content: &str) -> Result<T, PreviewResult> {
    if content.trim().is_empty() {
        return Err(PreviewResult::Empty);
    }
    let value: Value = serde_yaml::from_str(content).map_err(|e| PreviewResult::Error(e.to_string()))?;
    if !value.is_mapping() {
        return Err(PreviewResult::Fallback(pretty_dump(&value)));
    }
    serde_yaml::from_value(value.clone()).map_err(|_| PreviewResult::Fallback(pretty_dump(&value)))
}

fn dictation_kind_label(kind: Option<&str>) -> String {
    match kind {
        Some("word") => "Word".to_string(),
        Some("phrase") => "Phrase".to_string(),
        Some("sentence") => "Sentence".to_string(),
        Some("paragraph") => "Paragraph".to_string(),
        other => text_or_dash(other),
    }
}

fn list_body(items: Option<Vec<String>>) -> Option<SectionBody> {
    items.filter(|v| !v.is_empty()).map(SectionBody::List)
}

pub fn render_dictation(content: &str) -> PreviewResult {
    let data: Dictation = match parse_typed(content) {
        Ok(data) => data,
        Err(result) => return result,
    };
    let body = data.content.unwrap_or_default();
    let hints = data.hints.filter(|h| !h.is_empty()).map(|hints| {
        SectionBody::List(
            hints
                .iter()
                .enumerate()
                .map(|(i, hint)| format!("Hint {}: {}", i + 1, hint))
                .collect(),
        )
    });

    let mut text = non_empty(body.text).unwrap_or_else(|| "No text yet".to_string());
    if let Some(pinyin) = non_empty(body.pinyin) {
        text = format!("{}\nPronunciation: {}", text, pinyin);
    }

    let mut doc = PreviewDoc::new(non_empty(data.title).unwrap_or_else(|| "Dictation".to_string()))
        .section(
            "Question info",
            SectionBody::Facts(vec![
                Fact::new("Type", dictation_kind_label(data.kind.as_deref())),
                Fact::new("Points", render_number(data.points, Some("pts"))),
                Fact::new("Time limit", render_number(data.time_limit, Some("s"))),
            ]),
        )
        .section("Text", SectionBody::Text(text))
        .section_opt("Hints", hints)
        .section(
            "Answer key",
            SectionBody::Code(non_empty(data.answer_key).unwrap_or_else(|| "No answer yet".to_string())),
        );
    doc.badges.push(difficulty_badge(data.difficulty));
    doc.tags = data.tags.unwrap_or_default();
    PreviewResult::Component(doc)
}

pub fn render_comprehensive_choice(content: &str) -> PreviewResult {
    let data: ComprehensiveChoice = match parse_typed(content) {
        Ok(data) => data,
        Err(result) => return result,
    };

    let blanks: Vec<PreviewItem> = data
        .blanks
        .unwrap_or_default()
        .into_iter()
        .enumerate()
        .map(|(i, blank)| {
            let number = blank.blank_id.map(format_number).unwrap_or_else(|| (i + 1).to_string());
            let mut sections = Vec::new();
            if let Some(question) = non_empty(blank.question) {
                sections.push(Section::new("Question", SectionBody::Text(question)));
            }
            let choices: Vec<ChoiceRow> = blank
                .options
                .unwrap_or_default()
                .into_iter()
                .map(|o| ChoiceRow {
                    key: o.id.unwrap_or_default(),
                    content: o.content.unwrap_or_default(),
                    correct: o.is_correct.unwrap_or(false),
                })
                .collect();
            if !choices.is_empty() {
                sections.push(Section::new("Options", SectionBody::Choices(choices)));
            }
            PreviewItem {
                heading: format!("Blank {}", number),
                note: None,
                sections,
            }
        })
        .collect();

    let mut doc = PreviewDoc::new(non_empty(data.title).unwrap_or_else(|| "Comprehensive choice".to_string()))
        .section_opt("Description", non_empty(data.description).map(SectionBody::Text))
        .section_opt("Stem", non_empty(data.stem).map(SectionBody::Text))
        .section_opt("Blanks", (!blanks.is_empty()).then_some(SectionBody::Items(blanks)))
        .section(
            "Answer",
            SectionBody::Facts(vec![
                Fact::new("Correct answer", text_or_dash(data.correct_answer.as_deref())),
                Fact::new("Points", render_number(data.points, Some("pts"))),
            ]),
        )
        .section_opt("Explanation", non_empty(data.explanation).map(SectionBody::Markdown));
    doc.badges.push(difficulty_badge(data.difficulty));
    doc.tags = data.tags.unwrap_or_default();
    PreviewResult::Component(doc)
}

pub fn render_case_analysis(content: &str) -> PreviewResult {
    let data: CaseAnalysis = match parse_typed(content) {
        Ok(data) => data,
        Err(result) => return result,
    };

    let questions: Vec<PreviewItem> = data
        .questions
        .unwrap_or_default()
        .into_iter()
        .enumerate()
        .map(|(i, q)| {
            let number = q.question_id.map(format_number).unwrap_or_else(|| (i + 1).to_string());
            let mut sections = Vec::new();
            if let Some(text) = non_empty(q.content) {
                sections.push(Section::new("Question", SectionBody::Text(text)));
            }
            if let Some(answer) = non_empty(q.reference_answer) {
                sections.push(Section::new("Reference answer", SectionBody::Markdown(answer)));
            }
            if let Some(criteria) = list_body(q.grading_criteria) {
                sections.push(Section::new("Grading criteria", criteria));
            }
            PreviewItem {
                heading: format!("Question {}", number),
                note: q.points.map(|p| render_number(Some(p), Some("pts"))),
                sections,
            }
        })
        .collect();

    let mut doc = PreviewDoc::new(non_empty(data.title).unwrap_or_else(|| "Case analysis".to_string()))
        .section(
            "Question info",
            SectionBody::Facts(vec![
                Fact::new("Total points", render_number(data.total_points, Some("pts"))),
                Fact::new("Time limit", render_number(data.time_limit, Some("min"))),
            ]),
        )
        .section_opt("Background", non_empty(data.case_background).map(SectionBody::Markdown))
        .section_opt("Questions", (!questions.is_empty()).then_some(SectionBody::Items(questions)));
    doc.badges.push(difficulty_badge(data.difficulty));
    doc.tags = data.tags.unwrap_or_default();
    PreviewResult::Component(doc)
}

pub fn render_essay(content: &str) -> PreviewResult {
    let data: Essay = match parse_typed(content) {
        Ok(data) => data,
        Err(result) => return result,
    };

    let word_limit = match data.word_limit {
        Some(WordLimit { min: None, max: None }) | None => "-".to_string(),
        Some(limit) => format!(
            "{} - {} words",
            render_number(limit.min, None),
            render_number(limit.max, None)
        ),
    };

    let criteria: Vec<Fact> = data
        .grading_criteria
        .unwrap_or_default()
        .into_iter()
        .map(|c| {
            let points = render_number(c.points, Some("pts"));
            let value = match non_empty(c.description) {
                Some(desc) => format!("{} · {}", points, desc),
                None => points,
            };
            Fact::new(&text_or_dash(c.criterion.as_deref()), value)
        })
        .collect();

    let mut doc = PreviewDoc::new(non_empty(data.title).unwrap_or_else(|| "Essay".to_string()))
        .section(
            "Question info",
            SectionBody::Facts(vec![
                Fact::new("Word limit", word_limit),
                Fact::new("Total points", render_number(data.total_points, Some("pts"))),
                Fact::new("Time limit", render_number(data.time_limit, Some("min"))),
            ]),
        )
        .section_opt("Topic", non_empty(data.topic).map(SectionBody::Text))
        .section_opt("Description", non_empty(data.description).map(SectionBody::Markdown))
        .section_opt("Requirements", non_empty(data.requirements).map(SectionBody::Markdown))
        .section_opt("Suggested outline", list_body(data.outline_suggestion))
        .section_opt("Grading criteria", (!criteria.is_empty()).then_some(SectionBody::Facts(criteria)))
        .section_opt("Reference materials", list_body(data.reference_materials));
    doc.badges.push(difficulty_badge(data.difficulty));
    doc.tags = data.tags.unwrap_or_default();
    PreviewResult::Component(doc)
}
