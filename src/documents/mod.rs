//! Document panel logic: filters, templates, ordering and previews.

pub mod editor;
pub mod filter;
pub mod preview;
pub mod reorder;
pub mod templates;
