//! Sibling Multi-Select
//!
//! Selection is restricted to children of one parent.

use crate::tree::CategoryLookups;

/// Keyboard modifiers held during a click
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClickModifiers {
    pub shift: bool,
    /// Ctrl on Windows/Linux, Cmd on macOS
    pub toggle: bool,
}

impl ClickModifiers {
    pub fn from_mouse(ev: &web_sys::MouseEvent) -> Self {
        Self {
            shift: ev.shift_key(),
            toggle: ev.ctrl_key() || ev.meta_key(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TreeSelection {
    pub selected_ids: Vec<i64>,
    /// `Some(parent)` only while `selected_ids` is non-empty
    pub parent: Option<Option<i64>>,
    /// Anchor for shift-ranges
    pub last_selected: Option<i64>,
}

impl TreeSelection {
    pub fn is_empty(&self) -> bool {
        self.selected_ids.is_empty()
    }

    pub fn contains(&self, id: i64) -> bool {
        self.selected_ids.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.selected_ids.len()
    }

    /// The single selected node, if exactly one
    pub fn single(&self) -> Option<i64> {
        match self.selected_ids.as_slice() {
            [only] => Some(*only),
            _ => None,
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn select_only(&mut self, id: i64, parent: Option<i64>) {
        self.selected_ids = vec![id];
        self.parent = Some(parent);
        self.last_selected = Some(id);
    }

    /// Apply a row click
    pub fn click(&mut self, id: i64, parent: Option<i64>, mods: ClickModifiers, lookups: &CategoryLookups) {
        let other_parent = self.parent.is_some_and(|p| p != parent);
        if other_parent || self.is_empty() || (!mods.shift && !mods.toggle) {
            self.select_only(id, parent);
            return;
        }

        if mods.shift {
            let order = lookups.children_of(parent);
            let anchor = self.last_selected.and_then(|a| order.iter().position(|x| *x == a));
            let current = order.iter().position(|x| *x == id);
            if let (Some(a), Some(c)) = (anchor, current) {
                let (start, end) = (a.min(c), a.max(c));
                let mut next = self.selected_ids.clone();
                for sibling in &order[start..=end] {
                    if !next.contains(sibling) {
                        next.push(*sibling);
                    }
                }
                next.sort_by_key(|x| order.iter().position(|o| o == x).unwrap_or(usize::MAX));
                self.selected_ids = next;
            } else {
                self.select_only(id, parent);
                return;
            }
        } else if self.contains(id) {
            self.selected_ids.retain(|x| *x != id);
        } else {
            self.selected_ids.push(id);
        }

        if self.selected_ids.is_empty() {
            self.clear();
        } else {
            self.parent = Some(parent);
            self.last_selected = Some(id);
        }
    }

    /// Right-click keeps a selection that already holds the node
    pub fn focus_for_menu(&mut self, id: i64, parent: Option<i64>) {
        if !self.contains(id) {
            self.select_only(id, parent);
        } else if self.parent != Some(parent) {
            self.parent = Some(parent);
        }
    }

    /// Drop vanished ids after a tree refresh
    pub fn reconcile(&mut self, lookups: &CategoryLookups) {
        let kept: Vec<i64> = self
            .selected_ids
            .iter()
            .copied()
            .filter(|id| lookups.contains(*id))
            .collect();
        let parent = kept.first().and_then(|first| lookups.parent_of(*first));
        if kept.len() == self.selected_ids.len() && (kept.is_empty() || parent == self.parent) {
            return;
        }
        if kept.is_empty() {
            self.clear();
            return;
        }
        self.last_selected = kept.last().copied();
        self.parent = parent;
        self.selected_ids = kept;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;
    use crate::tree::build_lookups;

    fn make_category(id: i64, position: i32, children: Vec<Category>) -> Category {
        Category {
            id,
            name: format!("Node {}", id),
            slug: String::new(),
            path: String::new(),
            parent_id: None,
            position,
            created_at: String::new(),
            updated_at: String::new(),
            deleted_at: None,
            children,
        }
    }

    /// Root 1 with children 10..=14, root 2 with child 20
    fn lookups() -> CategoryLookups {
        let kids = (0..5).map(|i| make_category(10 + i, i as i32, vec![])).collect();
        build_lookups(&[
            make_category(1, 0, kids),
            make_category(2, 1, vec![make_category(20, 0, vec![])]),
        ])
    }

    const PLAIN: ClickModifiers = ClickModifiers { shift: false, toggle: false };
    const SHIFT: ClickModifiers = ClickModifiers { shift: true, toggle: false };
    const TOGGLE: ClickModifiers = ClickModifiers { shift: false, toggle: true };

    #[test]
    fn test_plain_click_selects_single() {
        let lk = lookups();
        let mut sel = TreeSelection::default();
        sel.click(11, Some(1), PLAIN, &lk);
        sel.click(12, Some(1), PLAIN, &lk);
        assert_eq!(sel.selected_ids, vec![12]);
        assert_eq!(sel.parent, Some(Some(1)));
        assert_eq!(sel.last_selected, Some(12));
    }

    #[test]
    fn test_shift_selects_inclusive_range() {
        let lk = lookups();
        let mut sel = TreeSelection::default();
        sel.click(13, Some(1), PLAIN, &lk);
        sel.click(11, Some(1), SHIFT, &lk);
        assert_eq!(sel.selected_ids, vec![11, 12, 13]);
        assert_eq!(sel.last_selected, Some(11));
    }

    #[test]
    fn test_toggle_adds_and_removes() {
        let lk = lookups();
        let mut sel = TreeSelection::default();
        sel.click(10, Some(1), PLAIN, &lk);
        sel.click(14, Some(1), TOGGLE, &lk);
        assert_eq!(sel.selected_ids, vec![10, 14]);
        sel.click(10, Some(1), TOGGLE, &lk);
        assert_eq!(sel.selected_ids, vec![14]);
        sel.click(14, Some(1), TOGGLE, &lk);
        assert!(sel.is_empty());
        assert_eq!(sel.parent, None);
    }

    #[test]
    fn test_other_parent_resets() {
        let lk = lookups();
        let mut sel = TreeSelection::default();
        sel.click(10, Some(1), PLAIN, &lk);
        sel.click(11, Some(1), TOGGLE, &lk);
        sel.click(20, Some(2), TOGGLE, &lk);
        assert_eq!(sel.selected_ids, vec![20]);
        assert_eq!(sel.parent, Some(Some(2)));
    }

    #[test]
    fn test_focus_for_menu() {
        let lk = lookups();
        let mut sel = TreeSelection::default();
        sel.click(10, Some(1), PLAIN, &lk);
        sel.click(11, Some(1), TOGGLE, &lk);
        sel.focus_for_menu(11, Some(1));
        assert_eq!(sel.selected_ids, vec![10, 11]);
        sel.focus_for_menu(2, None);
        assert_eq!(sel.selected_ids, vec![2]);
        assert_eq!(sel.parent, Some(None));
    }

    #[test]
    fn test_reconcile_drops_vanished() {
        let lk = lookups();
        let mut sel = TreeSelection {
            selected_ids: vec![99, 12, 13],
            parent: Some(Some(1)),
            last_selected: Some(99),
        };
        sel.reconcile(&lk);
        assert_eq!(sel.selected_ids, vec![12, 13]);
        assert_eq!(sel.parent, Some(Some(1)));
        assert_eq!(sel.last_selected, Some(13));

        let mut gone = TreeSelection {
            selected_ids: vec![98, 99],
            parent: Some(None),
            last_selected: Some(99),
        };
        gone.reconcile(&lk);
        assert_eq!(gone, TreeSelection::default());
    }
}
