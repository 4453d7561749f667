//! Category Tree State
//!
//! Pure state machines behind the category tree: multi-select,
//! copy/cut/paste, drag planning, context menu, the detail card
//! and sider sizing.
//! Components own the signals; these modules own the rules.

pub mod clipboard;
pub mod context_menu;
pub mod detail;
pub mod drag;
pub mod selection;
pub mod sider;
