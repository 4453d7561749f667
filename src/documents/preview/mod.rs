//! Document Preview Registry
//!
//! Maps a document type to the plugin that renders its content.
//! Unregistered types get a generic YAML dump.

mod legacy;
mod overview;
mod shared;
mod v1;

use std::collections::HashMap;
use std::sync::OnceLock;

pub use overview::parse_front_matter;
pub use shared::*;

pub type PreviewPlugin = fn(&str) -> PreviewResult;

#[derive(Default)]
pub struct PreviewRegistry {
    plugins: HashMap<String, PreviewPlugin>,
}

impl PreviewRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Later registrations replace earlier ones
    pub fn register(&mut self, doc_type: &str, plugin: PreviewPlugin) {
        self.plugins.insert(doc_type.to_string(), plugin);
    }

    pub fn resolve(&self, doc_type: Option<&str>) -> Option<PreviewPlugin> {
        self.plugins.get(doc_type?).copied()
    }

    /// Sorted type names
    pub fn registered_types(&self) -> Vec<String> {
        let mut types: Vec<String> = self.plugins.keys().cloned().collect();
        types.sort();
        types
    }

    pub fn render(&self, content: &str, doc_type: Option<&str>) -> PreviewResult {
        match self.resolve(doc_type) {
            Some(plugin) => plugin(content),
            None => render_generic(content),
        }
    }

    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register("overview", overview::render_overview);
        registry.register("dictation", legacy::render_dictation);
        registry.register("comprehensive_choice", legacy::render_comprehensive_choice);
        registry.register("case_analysis", legacy::render_case_analysis);
        registry.register("essay", legacy::render_essay);
        registry.register("dictation_v1", v1::render_dictation_v1);
        registry.register("comprehensive_choice_v1", v1::render_comprehensive_choice_v1);
        registry.register("case_analysis_v1", v1::render_case_analysis_v1);
        registry.register("essay_v1", v1::render_essay_v1);
        registry.register("chapter_overview_v1", overview::render_chapter_overview_v1);
        registry.register("knowledge_overview_v1", overview::render_knowledge_overview_v1);
        registry
    }
}

static BUILTIN: OnceLock<PreviewRegistry> = OnceLock::new();

pub fn builtin_registry() -> &'static PreviewRegistry {
    BUILTIN.get_or_init(PreviewRegistry::with_builtins)
}

/// Render with the built-in plugins
pub fn render_preview(content: &str, doc_type: Option<&str>) -> PreviewResult {
    builtin_registry().render(content, doc_type)
}

/// Parse as YAML and dump whatever comes out
fn render_generic(content: &str) -> PreviewResult {
    if content.trim().is_empty() {
        return PreviewResult::Empty;
    }
    match load_all(content) {
        Err(message) => PreviewResult::Error(message),
        Ok(docs) if docs.len() == 1 => PreviewResult::Fallback(pretty_dump(&docs[0])),
        Ok(docs) => PreviewResult::Fallback(pretty_dump(&serde_yaml::Value::Sequence(docs))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_types() {
        assert_eq!(
            builtin_registry().registered_types(),
            vec![
                "case_analysis",
                "case_analysis_v1",
                "chapter_overview_v1",
                "comprehensive_choice",
                "comprehensive_choice_v1",
                "dictation",
                "dictation_v1",
                "essay",
                "essay_v1",
                "knowledge_overview_v1",
                "overview",
            ]
        );
    }

    #[test]
    fn test_unregistered_type_dumps_yaml() {
        assert_eq!(
            render_preview("a: 1\n", Some("mystery")),
            PreviewResult::Fallback("{\n  \"a\": 1\n}".to_string())
        );
        assert_eq!(render_preview("   ", None), PreviewResult::Empty);
        assert!(matches!(render_preview("a: [1", None), PreviewResult::Error(_)));
    }

    #[test]
    fn test_resolve() {
        let registry = builtin_registry();
        assert!(registry.resolve(None).is_none());
        assert!(registry.resolve(Some("")).is_none());
        assert!(registry.resolve(Some("essay")).is_some());
    }

    #[test]
    fn test_register_replaces() {
        fn always_empty(_: &str) -> PreviewResult {
            PreviewResult::Empty
        }
        let mut registry = PreviewRegistry::with_builtins();
        registry.register("essay", always_empty);
        assert_eq!(registry.render("title: x", Some("essay")), PreviewResult::Empty);
        assert_eq!(registry.registered_types().len(), 11);
    }

    #[test]
    fn test_dispatch_by_type() {
        assert!(matches!(
            render_preview("title: Spell", Some("dictation")),
            PreviewResult::Component(_)
        ));
        assert!(matches!(
            render_preview("<p>hi</p>", Some("overview")),
            PreviewResult::Component(_)
        ));
    }
}
