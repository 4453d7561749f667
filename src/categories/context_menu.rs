//! Tree Context Menu
//!
//! Open/close state and the entries shown for a right-clicked node.

use crate::tree::CategoryLookups;

use super::clipboard::{ClipboardMode, TreeClipboard};
use super::selection::TreeSelection;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ContextMenuState {
    pub open: bool,
    pub node_id: Option<i64>,
    pub parent_id: Option<i64>,
    pub x: i32,
    pub y: i32,
}

impl ContextMenuState {
    pub fn open_at(node_id: i64, parent_id: Option<i64>, x: i32, y: i32) -> Self {
        Self {
            open: true,
            node_id: Some(node_id),
            parent_id,
            x,
            y,
        }
    }

    /// Returns false when already closed
    pub fn close(&mut self) -> bool {
        if !self.open {
            return false;
        }
        self.open = false;
        true
    }

    /// Menu must close once its node has left the tree
    pub fn is_stale(&self, lookups: &CategoryLookups) -> bool {
        self.open && !self.node_id.is_some_and(|id| lookups.contains(id))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    AddDocument(i64),
    CreateChild(i64),
    Rename(i64),
    CopySelection,
    CutSelection,
    DeleteSelection,
    PasteAsChild(i64),
    PasteBefore(i64),
    PasteAfter(i64),
    ClearClipboard,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MenuEntry {
    pub action: MenuAction,
    pub label: &'static str,
    pub disabled: bool,
    /// Draw a separator above this entry
    pub divider_before: bool,
}

impl MenuEntry {
    fn new(action: MenuAction, label: &'static str, disabled: bool) -> Self {
        Self {
            action,
            label,
            disabled,
            divider_before: false,
        }
    }

    fn after_divider(mut self) -> Self {
        self.divider_before = true;
        self
    }
}

/// Everything the menu depends on
pub struct MenuInputs<'a> {
    pub state: &'a ContextMenuState,
    pub selection: &'a TreeSelection,
    pub clipboard: Option<&'a TreeClipboard>,
    pub lookups: &'a CategoryLookups,
    pub is_mutating: bool,
    pub can_manage_tree: bool,
    pub can_create_document: bool,
}

/// Ids the selection actions apply to: the selection if it holds the node, else the node alone
pub fn resolved_selection(state: &ContextMenuState, selection: &TreeSelection) -> Vec<i64> {
    match state.node_id {
        Some(id) if selection.contains(id) => selection.selected_ids.clone(),
        Some(id) => vec![id],
        None => Vec::new(),
    }
}

pub fn menu_entries(input: &MenuInputs<'_>) -> Vec<MenuEntry> {
    let mut items = Vec::new();
    let node_id = match input.state.node_id {
        Some(id) if input.state.open => id,
        _ => {
            if input.clipboard.is_some() && input.can_manage_tree {
                items.push(MenuEntry::new(MenuAction::ClearClipboard, "Clear clipboard", false));
            }
            return items;
        }
    };

    if input.can_create_document {
        items.push(MenuEntry::new(MenuAction::AddDocument(node_id), "Add document", false));
    }
    if !input.can_manage_tree {
        return items;
    }

    let ids = resolved_selection(input.state, input.selection);
    if ids.len() == 1 {
        items.push(MenuEntry::new(MenuAction::CreateChild(ids[0]), "New child category", input.is_mutating));
        items.push(MenuEntry::new(MenuAction::Rename(ids[0]), "Rename", input.is_mutating));
    }
    if !ids.is_empty() {
        items.push(MenuEntry::new(MenuAction::CopySelection, "Copy selection", input.is_mutating));
        items.push(MenuEntry::new(MenuAction::CutSelection, "Cut selection", input.is_mutating));
        items.push(MenuEntry::new(MenuAction::DeleteSelection, "Delete", input.is_mutating));
    }

    if let Some(clip) = input.clipboard {
        let cut = clip.mode == ClipboardMode::Cut;
        let into_source = !clip.is_valid_target(node_id, input.lookups);
        let parent_in_source = input
            .state
            .parent_id
            .is_some_and(|p| !clip.is_valid_target(p, input.lookups));
        let gap_blocked = input.is_mutating || clip.contains(node_id) || parent_in_source;

        items.push(
            MenuEntry::new(
                MenuAction::PasteAsChild(node_id),
                if cut { "Move here as child" } else { "Paste as child" },
                input.is_mutating || into_source,
            )
            .after_divider(),
        );
        items.push(MenuEntry::new(
            MenuAction::PasteBefore(node_id),
            if cut { "Move before" } else { "Paste before" },
            gap_blocked,
        ));
        items.push(MenuEntry::new(
            MenuAction::PasteAfter(node_id),
            if cut { "Move after" } else { "Paste after" },
            gap_blocked,
        ));
        items.push(MenuEntry::new(MenuAction::ClearClipboard, "Clear clipboard", false).after_divider());
    }

    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;
    use crate::tree::build_lookups;

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

    fn lookups() -> CategoryLookups {
        build_lookups(&[
            make_category(1, vec![make_category(3, vec![]), make_category(4, vec![])]),
            make_category(2, vec![]),
        ])
    }

    fn actions(entries: &[MenuEntry]) -> Vec<MenuAction> {
        entries.iter().map(|e| e.action).collect()
    }

    #[test]
    fn test_state_open_close_stale() {
        let lk = lookups();
        let mut state = ContextMenuState::open_at(3, Some(1), 10, 20);
        assert!(!state.is_stale(&lk));
        state.node_id = Some(99);
        assert!(state.is_stale(&lk));
        assert!(state.close());
        assert!(!state.close());
        assert!(!state.is_stale(&lk));
    }

    #[test]
    fn test_single_node_menu() {
        let lk = lookups();
        let state = ContextMenuState::open_at(3, Some(1), 0, 0);
        let mut selection = TreeSelection::default();
        selection.select_only(3, Some(1));
        let entries = menu_entries(&MenuInputs {
            state: &state,
            selection: &selection,
            clipboard: None,
            lookups: &lk,
            is_mutating: false,
            can_manage_tree: true,
            can_create_document: true,
        });
        assert_eq!(
            actions(&entries),
            vec![
                MenuAction::AddDocument(3),
                MenuAction::CreateChild(3),
                MenuAction::Rename(3),
                MenuAction::CopySelection,
                MenuAction::CutSelection,
                MenuAction::DeleteSelection,
            ]
        );
    }

    #[test]
    fn test_multi_selection_hides_single_actions() {
        let lk = lookups();
        let state = ContextMenuState::open_at(3, Some(1), 0, 0);
        let selection = TreeSelection {
            selected_ids: vec![3, 4],
            parent: Some(Some(1)),
            last_selected: Some(4),
        };
        let entries = menu_entries(&MenuInputs {
            state: &state,
            selection: &selection,
            clipboard: None,
            lookups: &lk,
            is_mutating: true,
            can_manage_tree: true,
            can_create_document: false,
        });
        assert_eq!(
            actions(&entries),
            vec![MenuAction::CopySelection, MenuAction::CutSelection, MenuAction::DeleteSelection]
        );
        assert!(entries.iter().all(|e| e.disabled));
    }

    #[test]
    fn test_paste_entries_disabled_inside_source() {
        let lk = lookups();
        let clip = TreeClipboard {
            mode: ClipboardMode::Cut,
            source_ids: vec![1],
            parent_id: None,
        };
        let state = ContextMenuState::open_at(3, Some(1), 0, 0);
        let entries = menu_entries(&MenuInputs {
            state: &state,
            selection: &TreeSelection::default(),
            clipboard: Some(&clip),
            lookups: &lk,
            is_mutating: false,
            can_manage_tree: true,
            can_create_document: true,
        });
        let paste: Vec<&MenuEntry> = entries
            .iter()
            .filter(|e| matches!(e.action, MenuAction::PasteAsChild(_) | MenuAction::PasteBefore(_) | MenuAction::PasteAfter(_)))
            .collect();
        assert_eq!(paste.len(), 3);
        assert!(paste.iter().all(|e| e.disabled));
        assert_eq!(paste[0].label, "Move here as child");
        assert!(paste[0].divider_before);
        assert_eq!(entries.last().map(|e| e.action), Some(MenuAction::ClearClipboard));
    }

    #[test]
    fn test_read_only_role_gets_no_tree_actions() {
        let lk = lookups();
        let state = ContextMenuState::open_at(2, None, 0, 0);
        let entries = menu_entries(&MenuInputs {
            state: &state,
            selection: &TreeSelection::default(),
            clipboard: None,
            lookups: &lk,
            is_mutating: false,
            can_manage_tree: false,
            can_create_document: false,
        });
        assert!(entries.is_empty());
    }
}
