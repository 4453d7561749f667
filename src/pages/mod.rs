//! Routed pages

mod console;
mod document_editor;
mod initialize;
mod login;

pub use console::{ConsolePage, RequireAuth};
pub use document_editor::DocumentEditorPage;
pub use initialize::InitializePage;
pub use login::LoginPage;
