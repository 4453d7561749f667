//! Tree Clipboard
//!
//! Copy/cut a sibling selection and validate paste targets before
//! the bulk copy/move request goes out.

use std::fmt;

use crate::models::CategoryBulkTransferPayload;
use crate::tree::CategoryLookups;

use super::selection::TreeSelection;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipboardMode {
    Copy,
    Cut,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TreeClipboard {
    pub mode: ClipboardMode,
    pub source_ids: Vec<i64>,
    pub parent_id: Option<i64>,
}

impl TreeClipboard {
    /// `None` when nothing is selected
    pub fn from_selection(mode: ClipboardMode, selection: &TreeSelection) -> Option<Self> {
        let parent = selection.parent?;
        if selection.is_empty() {
            return None;
        }
        Some(Self {
            mode,
            source_ids: selection.selected_ids.clone(),
            parent_id: parent,
        })
    }

    pub fn contains(&self, id: i64) -> bool {
        self.source_ids.contains(&id)
    }

    /// Rendered dimmed while waiting for a paste
    pub fn is_cut(&self, id: i64) -> bool {
        self.mode == ClipboardMode::Cut && self.contains(id)
    }

    /// Neither a source nor below one
    pub fn is_valid_target(&self, node_id: i64, lookups: &CategoryLookups) -> bool {
        !lookups.is_descendant_or_self(node_id, &self.source_ids)
    }
}

/// Where the clipboard lands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasteTarget {
    Root,
    AsChild(i64),
    Before(i64),
    After(i64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasteRejection {
    /// Another tree mutation is in flight; the paste is dropped silently
    Busy,
    EmptyClipboard,
    IntoSource,
    SourceAnchor,
    UnknownNode,
}

impl fmt::Display for PasteRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            PasteRejection::Busy => "Another change is still in progress",
            PasteRejection::EmptyClipboard => "Clipboard is empty",
            PasteRejection::IntoSource => "Cannot paste into a copied node or its descendants",
            PasteRejection::SourceAnchor => "Cannot use a copied node as the insert position",
            PasteRejection::UnknownNode => "Target node no longer exists",
        };
        f.write_str(msg)
    }
}

/// Build the bulk request for a paste, or say why it is refused
pub fn plan_paste(
    clipboard: Option<&TreeClipboard>,
    target: PasteTarget,
    lookups: &CategoryLookups,
) -> Result<CategoryBulkTransferPayload, PasteRejection> {
    let clip = clipboard.ok_or(PasteRejection::EmptyClipboard)?;
    let sources = &clip.source_ids;
    if sources.is_empty() {
        return Err(PasteRejection::EmptyClipboard);
    }

    let (target_parent_id, insert_before_id, insert_after_id) = match target {
        PasteTarget::Root => (None, None, None),
        PasteTarget::AsChild(node) => {
            if !lookups.contains(node) {
                return Err(PasteRejection::UnknownNode);
            }
            (Some(node), None, None)
        }
        PasteTarget::Before(anchor) | PasteTarget::After(anchor) => {
            let parent = lookups.parent_of(anchor).ok_or(PasteRejection::UnknownNode)?;
            if sources.contains(&anchor) {
                return Err(PasteRejection::SourceAnchor);
            }
            if matches!(target, PasteTarget::Before(_)) {
                (parent, Some(anchor), None)
            } else {
                (parent, None, Some(anchor))
            }
        }
    };

    if let Some(parent) = target_parent_id {
        if lookups.is_descendant_or_self(parent, sources) {
            return Err(PasteRejection::IntoSource);
        }
    }

    Ok(CategoryBulkTransferPayload {
        source_ids: sources.clone(),
        target_parent_id,
        insert_before_id,
        insert_after_id,
    })
}

/// A paste as the tree panel runs it: ignored while `busy`, otherwise planned
/// against the clipboard and tagged with its mode
pub fn prepare_paste(
    busy: bool,
    clipboard: Option<&TreeClipboard>,
    target: PasteTarget,
    lookups: &CategoryLookups,
) -> Result<(ClipboardMode, CategoryBulkTransferPayload), PasteRejection> {
    if busy {
        return Err(PasteRejection::Busy);
    }
    let payload = plan_paste(clipboard, target, lookups)?;
    let mode = clipboard.map(|c| c.mode).ok_or(PasteRejection::EmptyClipboard)?;
    Ok((mode, payload))
}

/// Clipboard and selection after a successful paste.
/// A copy stays on the clipboard; a cut clears it along with the selection.
pub fn after_paste(
    mode: ClipboardMode,
    clipboard: Option<TreeClipboard>,
    mut selection: TreeSelection,
) -> (Option<TreeClipboard>, TreeSelection) {
    match mode {
        ClipboardMode::Copy => (clipboard, selection),
        ClipboardMode::Cut => {
            selection.clear();
            (None, selection)
        }
    }
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

    /// 1 ─ 3 ─ 5
    ///   └ 4
    /// 2
    fn lookups() -> CategoryLookups {
        build_lookups(&[
            make_category(1, vec![make_category(3, vec![make_category(5, vec![])]), make_category(4, vec![])]),
            make_category(2, vec![]),
        ])
    }

    fn clip(mode: ClipboardMode, ids: &[i64], parent: Option<i64>) -> TreeClipboard {
        TreeClipboard {
            mode,
            source_ids: ids.to_vec(),
            parent_id: parent,
        }
    }

    #[test]
    fn test_from_selection_requires_nodes() {
        assert_eq!(TreeClipboard::from_selection(ClipboardMode::Copy, &TreeSelection::default()), None);

        let mut selection = TreeSelection::default();
        selection.select_only(3, Some(1));
        let c = TreeClipboard::from_selection(ClipboardMode::Cut, &selection).unwrap();
        assert_eq!(c.source_ids, vec![3]);
        assert_eq!(c.parent_id, Some(1));
        assert!(c.is_cut(3));
        assert!(!c.is_cut(4));
    }

    #[test]
    fn test_valid_target() {
        let lk = lookups();
        let c = clip(ClipboardMode::Copy, &[3], Some(1));
        assert!(!c.is_valid_target(3, &lk));
        assert!(!c.is_valid_target(5, &lk));
        assert!(c.is_valid_target(4, &lk));
        assert!(c.is_valid_target(1, &lk));
    }

    #[test]
    fn test_paste_as_child() {
        let lk = lookups();
        let c = clip(ClipboardMode::Copy, &[3], Some(1));
        let payload = plan_paste(Some(&c), PasteTarget::AsChild(2), &lk).unwrap();
        assert_eq!(payload.source_ids, vec![3]);
        assert_eq!(payload.target_parent_id, Some(2));
        assert_eq!(plan_paste(Some(&c), PasteTarget::AsChild(5), &lk), Err(PasteRejection::IntoSource));
        assert_eq!(plan_paste(Some(&c), PasteTarget::AsChild(3), &lk), Err(PasteRejection::IntoSource));
    }

    #[test]
    fn test_paste_before_after() {
        let lk = lookups();
        let c = clip(ClipboardMode::Cut, &[2], None);
        let before = plan_paste(Some(&c), PasteTarget::Before(4), &lk).unwrap();
        assert_eq!(before.target_parent_id, Some(1));
        assert_eq!(before.insert_before_id, Some(4));
        assert_eq!(before.insert_after_id, None);

        let after = plan_paste(Some(&c), PasteTarget::After(1), &lk).unwrap();
        assert_eq!(after.target_parent_id, None);
        assert_eq!(after.insert_after_id, Some(1));

        assert_eq!(plan_paste(Some(&c), PasteTarget::After(2), &lk), Err(PasteRejection::SourceAnchor));
    }

    #[test]
    fn test_paste_next_to_own_descendant_rejected() {
        let lk = lookups();
        let c = clip(ClipboardMode::Cut, &[1], None);
        assert_eq!(plan_paste(Some(&c), PasteTarget::Before(5), &lk), Err(PasteRejection::IntoSource));
    }

    #[test]
    fn test_paste_ignored_while_busy() {
        let lk = lookups();
        let c = clip(ClipboardMode::Copy, &[3], Some(1));
        assert_eq!(prepare_paste(true, Some(&c), PasteTarget::AsChild(2), &lk), Err(PasteRejection::Busy));

        let (mode, payload) = prepare_paste(false, Some(&c), PasteTarget::AsChild(2), &lk).unwrap();
        assert_eq!(mode, ClipboardMode::Copy);
        assert_eq!(payload.target_parent_id, Some(2));
        assert_eq!(prepare_paste(false, None, PasteTarget::Root, &lk), Err(PasteRejection::EmptyClipboard));
    }

    #[test]
    fn test_copy_stays_on_clipboard_after_paste() {
        let c = clip(ClipboardMode::Copy, &[3, 4], Some(1));
        let mut selection = TreeSelection::default();
        selection.select_only(3, Some(1));

        let (clipboard, kept) = after_paste(ClipboardMode::Copy, Some(c.clone()), selection.clone());
        assert_eq!(clipboard, Some(c));
        assert_eq!(kept, selection);
    }

    #[test]
    fn test_cut_clears_clipboard_and_selection_after_paste() {
        let c = clip(ClipboardMode::Cut, &[3], Some(1));
        let mut selection = TreeSelection::default();
        selection.select_only(3, Some(1));

        let (clipboard, cleared) = after_paste(ClipboardMode::Cut, Some(c), selection);
        assert_eq!(clipboard, None);
        assert!(cleared.is_empty());
        assert_eq!(cleared.parent, None);
    }

    #[test]
    fn test_paste_without_clipboard() {
        let lk = lookups();
        assert_eq!(plan_paste(None, PasteTarget::Root, &lk), Err(PasteRejection::EmptyClipboard));
        assert_eq!(plan_paste(Some(&clip(ClipboardMode::Copy, &[2], None)), PasteTarget::AsChild(77), &lk), Err(PasteRejection::UnknownNode));
    }
}
