//! Tree Utilities
//!
//! Lookups over the nested category tree and helpers for rendering it
//! as a flat, indented row list.

use crate::models::Category;
use std::collections::{HashMap, HashSet};

/// Sort siblings by position, then name
pub fn sort_categories(nodes: &mut [Category]) {
    nodes.sort_by(|a, b| a.position.cmp(&b.position).then_with(|| a.name.cmp(&b.name)));
}

fn sorted_refs(nodes: &[Category]) -> Vec<&Category> {
    let mut refs: Vec<&Category> = nodes.iter().collect();
    refs.sort_by(|a, b| a.position.cmp(&b.position).then_with(|| a.name.cmp(&b.name)));
    refs
}

/// Flat indexes over the nested tree
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryLookups {
    /// Nodes with `children` stripped
    by_id: HashMap<i64, Category>,
    /// Sorted child ids per parent (`None` = root)
    parent_to_children: HashMap<Option<i64>, Vec<i64>>,
    /// Structural parent of each node
    parent_of: HashMap<i64, Option<i64>>,
}

pub fn build_lookups(roots: &[Category]) -> CategoryLookups {
    fn walk(nodes: &[Category], parent: Option<i64>, out: &mut CategoryLookups) {
        let sorted = sorted_refs(nodes);
        out.parent_to_children
            .insert(parent, sorted.iter().map(|n| n.id).collect());
        for node in sorted {
            let mut flat = node.clone();
            flat.children = Vec::new();
            out.by_id.insert(node.id, flat);
            out.parent_of.insert(node.id, parent);
            if !node.children.is_empty() {
                walk(&node.children, Some(node.id), out);
            }
        }
    }

    let mut lookups = CategoryLookups::default();
    walk(roots, None, &mut lookups);
    lookups
}

impl CategoryLookups {
    pub fn get(&self, id: i64) -> Option<&Category> {
        self.by_id.get(&id)
    }

    pub fn contains(&self, id: i64) -> bool {
        self.by_id.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    /// Sorted child ids, empty for leaves and unknown parents
    pub fn children_of(&self, parent: Option<i64>) -> &[i64] {
        self.parent_to_children
            .get(&parent)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// `None` for unknown ids, `Some(None)` for roots
    pub fn parent_of(&self, id: i64) -> Option<Option<i64>> {
        self.parent_of.get(&id).copied()
    }

    pub fn has_children(&self, id: i64) -> bool {
        !self.children_of(Some(id)).is_empty()
    }

    /// True when `id` equals or sits below any of `ancestors`
    pub fn is_descendant_or_self(&self, id: i64, ancestors: &[i64]) -> bool {
        let mut seen = HashSet::new();
        let mut current = Some(id);
        while let Some(node) = current {
            if ancestors.contains(&node) {
                return true;
            }
            if !seen.insert(node) {
                return false;
            }
            current = self.parent_of(node).flatten();
        }
        false
    }

    /// Root-first chain ending at `id`
    pub fn breadcrumb(&self, id: i64) -> Vec<Category> {
        let mut path = Vec::new();
        let mut seen = HashSet::new();
        let mut current = Some(id);
        while let Some(node_id) = current {
            if !seen.insert(node_id) {
                break;
            }
            let Some(node) = self.get(node_id) else { break };
            path.push(node.clone());
            current = self.parent_of(node_id).flatten();
        }
        path.reverse();
        path
    }

    /// First id that still has children; such nodes cannot be deleted
    pub fn first_with_children(&self, ids: &[i64]) -> Option<i64> {
        ids.iter().copied().find(|id| self.has_children(*id))
    }

    /// Ids of every node below `id`
    pub fn descendants(&self, id: i64) -> Vec<i64> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(node) = stack.pop() {
            for child in self.children_of(Some(node)) {
                out.push(*child);
                stack.push(*child);
            }
        }
        out
    }
}

/// One visible row of the rendered tree
#[derive(Debug, Clone, PartialEq)]
pub struct TreeRow {
    pub id: i64,
    pub name: String,
    pub parent_id: Option<i64>,
    pub depth: usize,
    pub has_children: bool,
    pub expanded: bool,
}

/// Depth-first rows in display order.
/// `visible` restricts output to a search result; children are emitted only for expanded nodes.
pub fn flatten_tree(
    lookups: &CategoryLookups,
    expanded: &HashSet<i64>,
    visible: Option<&HashSet<i64>>,
) -> Vec<TreeRow> {
    fn collect(
        parent: Option<i64>,
        depth: usize,
        lookups: &CategoryLookups,
        expanded: &HashSet<i64>,
        visible: Option<&HashSet<i64>>,
        result: &mut Vec<TreeRow>,
    ) {
        for id in lookups.children_of(parent) {
            if visible.is_some_and(|v| !v.contains(id)) {
                continue;
            }
            let Some(node) = lookups.get(*id) else { continue };
            let has_children = match visible {
                Some(v) => lookups.children_of(Some(*id)).iter().any(|c| v.contains(c)),
                None => lookups.has_children(*id),
            };
            let is_expanded = has_children && expanded.contains(id);
            result.push(TreeRow {
                id: *id,
                name: node.name.clone(),
                parent_id: parent,
                depth,
                has_children,
                expanded: is_expanded,
            });
            if is_expanded {
                collect(Some(*id), depth + 1, lookups, expanded, visible, result);
            }
        }
    }

    let mut result = Vec::new();
    collect(None, 0, lookups, expanded, visible, &mut result);
    result
}

/// Case-insensitive name search.
/// Returns matching nodes plus their ancestors; `None` when the search is blank.
pub fn filter_tree(roots: &[Category], search: &str) -> Option<HashSet<i64>> {
    let needle = search.trim().to_lowercase();
    if needle.is_empty() {
        return None;
    }

    fn visit(nodes: &[Category], needle: &str, matched: &mut HashSet<i64>) -> bool {
        let mut any = false;
        for node in nodes {
            let child_hit = visit(&node.children, needle, matched);
            if child_hit || node.name.to_lowercase().contains(needle) {
                matched.insert(node.id);
                any = true;
            }
        }
        any
    }

    let mut matched = HashSet::new();
    visit(roots, &needle, &mut matched);
    Some(matched)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_category(id: i64, name: &str, position: i32, children: Vec<Category>) -> Category {
        Category {
            id,
            name: name.to_string(),
            slug: format!("c{}", id),
            path: String::new(),
            parent_id: None,
            position,
            created_at: String::new(),
            updated_at: String::new(),
            deleted_at: None,
            children,
        }
    }

    /// 1 Math
    ///   3 Algebra
    ///     5 Linear
    ///   4 Geometry
    /// 2 English
    fn sample_tree() -> Vec<Category> {
        vec![
            make_category(2, "English", 1, vec![]),
            make_category(
                1,
                "Math",
                0,
                vec![
                    make_category(4, "Geometry", 1, vec![]),
                    make_category(3, "Algebra", 0, vec![make_category(5, "Linear", 0, vec![])]),
                ],
            ),
        ]
    }

    #[test]
    fn test_sort_categories_by_position_then_name() {
        let mut nodes = vec![
            make_category(1, "b", 1, vec![]),
            make_category(2, "c", 0, vec![]),
            make_category(3, "a", 1, vec![]),
        ];
        sort_categories(&mut nodes);
        let ids: Vec<i64> = nodes.iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }

    #[test]
    fn test_build_lookups() {
        let lookups = build_lookups(&sample_tree());
        assert_eq!(lookups.len(), 5);
        assert_eq!(lookups.children_of(None), &[1, 2]);
        assert_eq!(lookups.children_of(Some(1)), &[3, 4]);
        assert_eq!(lookups.parent_of(5), Some(Some(3)));
        assert_eq!(lookups.parent_of(1), Some(None));
        assert_eq!(lookups.parent_of(99), None);
        assert!(lookups.has_children(3));
        assert!(!lookups.has_children(4));
        assert!(lookups.get(1).unwrap().children.is_empty());
    }

    #[test]
    fn test_is_descendant_or_self() {
        let lookups = build_lookups(&sample_tree());
        assert!(lookups.is_descendant_or_self(5, &[1]));
        assert!(lookups.is_descendant_or_self(3, &[3]));
        assert!(!lookups.is_descendant_or_self(2, &[1]));
        assert!(!lookups.is_descendant_or_self(1, &[5]));
        assert!(!lookups.is_descendant_or_self(42, &[1]));
    }

    #[test]
    fn test_breadcrumb_and_descendants() {
        let lookups = build_lookups(&sample_tree());
        let names: Vec<String> = lookups.breadcrumb(5).into_iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["Math", "Algebra", "Linear"]);
        let mut below = lookups.descendants(1);
        below.sort();
        assert_eq!(below, vec![3, 4, 5]);
    }

    #[test]
    fn test_flatten_tree_respects_expanded() {
        let lookups = build_lookups(&sample_tree());
        let collapsed = flatten_tree(&lookups, &HashSet::new(), None);
        let ids: Vec<i64> = collapsed.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2]);
        assert!(collapsed[0].has_children);
        assert!(!collapsed[0].expanded);

        let expanded: HashSet<i64> = [1, 3].into_iter().collect();
        let rows = flatten_tree(&lookups, &expanded, None);
        let shape: Vec<(i64, usize)> = rows.iter().map(|r| (r.id, r.depth)).collect();
        assert_eq!(shape, vec![(1, 0), (3, 1), (5, 2), (4, 1), (2, 0)]);
        assert_eq!(rows[2].parent_id, Some(3));
    }

    #[test]
    fn test_filter_tree_keeps_ancestors() {
        let roots = sample_tree();
        assert_eq!(filter_tree(&roots, "   "), None);

        let matched = filter_tree(&roots, "LIN").unwrap();
        let mut ids: Vec<i64> = matched.iter().copied().collect();
        ids.sort();
        assert_eq!(ids, vec![1, 3, 5]);

        let lookups = build_lookups(&roots);
        let rows = flatten_tree(&lookups, &matched, Some(&matched));
        let ids: Vec<i64> = rows.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 3, 5]);
    }

    #[test]
    fn test_filter_tree_no_match() {
        let matched = filter_tree(&sample_tree(), "history").unwrap();
        assert!(matched.is_empty());
    }

    #[test]
    fn test_first_with_children() {
        let lookups = build_lookups(&sample_tree());
        assert_eq!(lookups.first_with_children(&[4, 2]), None);
        assert_eq!(lookups.first_with_children(&[4, 3, 1]), Some(3));
        assert_eq!(lookups.first_with_children(&[]), None);
    }
}
