//! Material Forms
//!
//! Labels for material/question types and the draft edited in the
//! material form.

use serde_json::Value;

use crate::forms::FieldResult;
use crate::models::{Material, MaterialCreatePayload, MaterialMetadata, MaterialUpdatePayload};

/// `(value, label, badge colour)`
pub const MATERIAL_TYPES: &[(&str, &str, &str)] = &[
    ("question", "Question", "blue"),
    ("overview", "Overview", "green"),
    ("dictation", "Dictation", "orange"),
    ("reference", "Reference", "purple"),
];

pub const QUESTION_TYPES: &[(&str, &str)] = &[
    ("single_choice", "Single choice"),
    ("multi_choice", "Multiple choice"),
    ("multi_blank_choice", "Multi-blank choice"),
    ("fill_blank", "Fill in the blank"),
    ("essay", "Essay"),
];

pub fn material_type_label(value: &str) -> &str {
    MATERIAL_TYPES
        .iter()
        .find(|(v, _, _)| *v == value)
        .map(|(_, label, _)| *label)
        .unwrap_or(value)
}

pub fn material_type_color(value: &str) -> &'static str {
    MATERIAL_TYPES
        .iter()
        .find(|(v, _, _)| *v == value)
        .map(|(_, _, color)| *color)
        .unwrap_or("default")
}

pub fn question_type_label(value: &str) -> &str {
    QUESTION_TYPES
        .iter()
        .find(|(v, _)| *v == value)
        .map(|(_, label)| *label)
        .unwrap_or(value)
}

/// Comma separated, trimmed, blanks and repeats dropped
pub fn parse_tags(raw: &str) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for tag in raw.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        if !tags.iter().any(|t| t == tag) {
            tags.push(tag.to_string());
        }
    }
    tags
}

/// Text fields of the material form
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MaterialDraft {
    pub title: String,
    pub resource_type: String,
    pub question_type: String,
    pub difficulty: String,
    pub tags: String,
    pub analysis: String,
}

impl MaterialDraft {
    pub fn new() -> Self {
        Self {
            resource_type: "question".to_string(),
            ..Default::default()
        }
    }

    pub fn from_material(material: &Material) -> Self {
        let meta = &material.metadata;
        Self {
            title: material.title.clone(),
            resource_type: meta.resource_type.clone(),
            question_type: meta.question_type.clone().unwrap_or_default(),
            difficulty: meta.difficulty.map(|d| d.to_string()).unwrap_or_default(),
            tags: meta.tags.as_deref().map(|t| t.join(", ")).unwrap_or_default(),
            analysis: meta.analysis.clone().unwrap_or_default(),
        }
    }

    /// Metadata from the draft; options, blanks and answer carry over from `base`
    pub fn metadata(&self, base: Option<&MaterialMetadata>) -> FieldResult<MaterialMetadata> {
        if self.resource_type.trim().is_empty() {
            return Err("Choose a material type");
        }
        let difficulty = match self.difficulty.trim() {
            "" => None,
            raw => {
                let value: f64 = raw.parse().map_err(|_| "Difficulty must be a number")?;
                if !(1.0..=5.0).contains(&value) {
                    return Err("Difficulty must be between 1 and 5");
                }
                Some(value)
            }
        };
        let is_question = self.resource_type == "question";
        let tags = parse_tags(&self.tags);
        let analysis = self.analysis.trim();
        let base = base.cloned().unwrap_or_default();
        Ok(MaterialMetadata {
            resource_type: self.resource_type.clone(),
            question_type: (is_question && !self.question_type.is_empty()).then(|| self.question_type.clone()),
            difficulty,
            tags: (!tags.is_empty()).then_some(tags),
            analysis: (!analysis.is_empty()).then(|| analysis.to_string()),
            ..base
        })
    }

    fn title(&self) -> FieldResult<String> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err("Enter a title");
        }
        Ok(title.to_string())
    }

    pub fn to_create_payload(&self) -> FieldResult<MaterialCreatePayload> {
        Ok(MaterialCreatePayload {
            title: self.title()?,
            metadata: self.metadata(None)?,
            content: None,
        })
    }

    pub fn to_update_payload(&self, original: &Material) -> FieldResult<MaterialUpdatePayload> {
        let metadata = self.metadata(Some(&original.metadata))?;
        let metadata = match serde_json::to_value(metadata) {
            Ok(Value::Object(map)) => map,
            _ => return Err("Invalid metadata"),
        };
        Ok(MaterialUpdatePayload {
            title: Some(self.title()?),
            metadata: Some(metadata),
            content: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::QuestionOption;

    #[test]
    fn test_parse_tags() {
        assert_eq!(parse_tags(" a, b ,,a, c"), vec!["a", "b", "c"]);
        assert!(parse_tags("  ").is_empty());
    }

    #[test]
    fn test_labels_fall_back_to_value() {
        assert_eq!(material_type_label("reference"), "Reference");
        assert_eq!(material_type_label("poster"), "poster");
        assert_eq!(material_type_color("poster"), "default");
        assert_eq!(question_type_label("fill_blank"), "Fill in the blank");
    }

    #[test]
    fn test_create_payload() {
        let draft = MaterialDraft {
            title: "  Verbs ".to_string(),
            resource_type: "question".to_string(),
            question_type: "single_choice".to_string(),
            difficulty: "3".to_string(),
            tags: "grammar, unit 1".to_string(),
            analysis: String::new(),
        };
        let payload = draft.to_create_payload().unwrap();
        assert_eq!(payload.title, "Verbs");
        assert_eq!(payload.metadata.difficulty, Some(3.0));
        assert_eq!(payload.metadata.question_type.as_deref(), Some("single_choice"));
        assert_eq!(
            payload.metadata.tags,
            Some(vec!["grammar".to_string(), "unit 1".to_string()])
        );
        assert_eq!(payload.metadata.analysis, None);
    }

    #[test]
    fn test_question_type_only_for_questions() {
        let draft = MaterialDraft {
            title: "Intro".to_string(),
            resource_type: "overview".to_string(),
            question_type: "essay".to_string(),
            ..Default::default()
        };
        assert_eq!(draft.metadata(None).unwrap().question_type, None);
    }

    #[test]
    fn test_invalid_drafts() {
        let mut draft = MaterialDraft::new();
        assert_eq!(draft.to_create_payload(), Err("Enter a title"));
        draft.title = "x".to_string();
        draft.difficulty = "9".to_string();
        assert_eq!(draft.to_create_payload(), Err("Difficulty must be between 1 and 5"));
        draft.difficulty = "hard".to_string();
        assert_eq!(draft.to_create_payload(), Err("Difficulty must be a number"));
    }

    #[test]
    fn test_update_keeps_options() {
        let original: Material = serde_json::from_value(serde_json::json!({
            "id": 3,
            "title": "Q",
            "metadata": {"resource_type": "question", "question_type": "single_choice", "difficulty": 2}
        }))
        .unwrap();
        let mut original = original;
        original.metadata.options = Some(vec![QuestionOption {
            label: "A".to_string(),
            content: "yes".to_string(),
            is_correct: Some(true),
        }]);

        let mut draft = MaterialDraft::from_material(&original);
        assert_eq!(draft.difficulty, "2");
        draft.title = "Q2".to_string();
        let payload = draft.to_update_payload(&original).unwrap();
        let metadata = payload.metadata.unwrap();
        assert_eq!(payload.title.as_deref(), Some("Q2"));
        assert_eq!(metadata["options"][0]["label"], "A");
        assert_eq!(metadata["question_type"], "single_choice");
    }
}
