//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity.

use std::collections::HashSet;

use leptos::prelude::*;
use reactive_stores::Store;

use crate::categories::clipboard::{after_paste, ClipboardMode, TreeClipboard};
use crate::categories::context_menu::ContextMenuState;
use crate::categories::selection::{ClickModifiers, TreeSelection};
use crate::models::{Category, Document};
use crate::tree::{build_lookups, CategoryLookups};

/// Global application state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// Category tree as returned by the server
    pub categories: Vec<Category>,
    /// Indexes over `categories`, rebuilt on every load
    pub lookups: CategoryLookups,
    pub selection: TreeSelection,
    pub clipboard: Option<TreeClipboard>,
    /// Expanded node ids
    pub expanded: HashSet<i64>,
    pub context_menu: ContextMenuState,
    /// Documents of the selected node, sorted by position
    pub documents: Vec<Document>,
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

/// Keep only the sources still in the tree; drop the clipboard when none survive
pub fn prune_clipboard(clipboard: Option<TreeClipboard>, lookups: &CategoryLookups) -> Option<TreeClipboard> {
    let mut clip = clipboard?;
    clip.source_ids.retain(|id| lookups.contains(*id));
    (!clip.source_ids.is_empty()).then_some(clip)
}

// ========================
// Store Helper Functions
// ========================

/// Replace the tree and reconcile everything that points into it
pub fn store_set_tree(store: &AppStore, roots: Vec<Category>) {
    let lookups = build_lookups(&roots);
    store.selection().write().reconcile(&lookups);
    let clipboard = prune_clipboard(store.clipboard().get_untracked(), &lookups);
    store.clipboard().set(clipboard);
    store.expanded().write().retain(|id| lookups.contains(*id));
    if store.context_menu().get_untracked().is_stale(&lookups) {
        store.context_menu().write().close();
    }
    store.categories().set(roots);
    store.lookups().set(lookups);
}

/// Apply a row click to the selection
pub fn store_click_node(store: &AppStore, id: i64, parent: Option<i64>, mods: ClickModifiers) {
    let lookups = store.lookups().get_untracked();
    store.selection().write().click(id, parent, mods, &lookups);
}

pub fn store_select_only(store: &AppStore, id: i64, parent: Option<i64>) {
    store.selection().write().select_only(id, parent);
}

pub fn store_clear_selection(store: &AppStore) {
    store.selection().write().clear();
}

/// Copy/cut the current selection. False when nothing is selected.
pub fn store_set_clipboard(store: &AppStore, mode: ClipboardMode) -> bool {
    let clip = TreeClipboard::from_selection(mode, &store.selection().read_untracked());
    match clip {
        Some(clip) => {
            store.clipboard().set(Some(clip));
            true
        }
        None => false,
    }
}

pub fn store_clear_clipboard(store: &AppStore) {
    store.clipboard().set(None);
}

/// Settle clipboard and selection once a paste went through
pub fn store_after_paste(store: &AppStore, mode: ClipboardMode) {
    let (clipboard, selection) = after_paste(
        mode,
        store.clipboard().get_untracked(),
        store.selection().get_untracked(),
    );
    store.clipboard().set(clipboard);
    store.selection().set(selection);
}

pub fn store_toggle_expanded(store: &AppStore, id: i64) {
    let field = store.expanded();
    let mut expanded = field.write();
    if !expanded.remove(&id) {
        expanded.insert(id);
    }
}

/// Expand every id, e.g. the ancestors of a search hit
pub fn store_expand_all(store: &AppStore, ids: impl IntoIterator<Item = i64>) {
    store.expanded().write().extend(ids);
}

pub fn store_open_menu(store: &AppStore, id: i64, parent: Option<i64>, x: i32, y: i32) {
    store.selection().write().focus_for_menu(id, parent);
    store.context_menu().set(ContextMenuState::open_at(id, parent, x, y));
}

pub fn store_close_menu(store: &AppStore) {
    if store.context_menu().get_untracked().open {
        store.context_menu().write().close();
    }
}

pub fn store_set_documents(store: &AppStore, documents: Vec<Document>) {
    store.documents().set(documents);
}

/// Remove a document by ID
pub fn store_remove_document(store: &AppStore, doc_id: i64) {
    store.documents().write().retain(|doc| doc.id != doc_id);
}

/// The node whose documents are shown: exactly one selected node
pub fn selected_node(store: &AppStore) -> Option<i64> {
    store.selection().read().single()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_category(id: i64, children: Vec<Category>) -> Category {
        Category {
            id,
            name: format!("Node {}", id),
            slug: String::new(),
            path: String::new(),
            parent_id: None,
            position: id as i32,
            created_at: String::new(),
            updated_at: String::new(),
            deleted_at: None,
            children,
        }
    }

    #[test]
    fn test_prune_clipboard_keeps_survivors() {
        let lookups = build_lookups(&[make_category(1, vec![make_category(2, vec![])])]);
        let clip = TreeClipboard {
            mode: ClipboardMode::Cut,
            source_ids: vec![2, 9],
            parent_id: Some(1),
        };
        let pruned = prune_clipboard(Some(clip), &lookups).unwrap();
        assert_eq!(pruned.source_ids, vec![2]);
        assert_eq!(pruned.mode, ClipboardMode::Cut);
    }

    #[test]
    fn test_prune_clipboard_drops_when_empty() {
        let lookups = build_lookups(&[make_category(1, vec![])]);
        let clip = TreeClipboard {
            mode: ClipboardMode::Copy,
            source_ids: vec![7],
            parent_id: None,
        };
        assert_eq!(prune_clipboard(Some(clip), &lookups), None);
        assert_eq!(prune_clipboard(None, &lookups), None);
    }
}
