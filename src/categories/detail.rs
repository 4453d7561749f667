//! Category Detail
//!
//! What the detail card under the tree shows for the current selection.

use crate::forms::format_timestamp;
use crate::models::Category;
use crate::tree::CategoryLookups;

use super::selection::TreeSelection;

#[derive(Debug, Clone, PartialEq)]
pub enum CategoryDetail {
    Empty,
    /// More than one node selected
    Many(usize),
    Node {
        name: String,
        deleted: bool,
        fields: Vec<(&'static str, String)>,
    },
}

impl CategoryDetail {
    pub fn for_selection(selection: &TreeSelection, lookups: &CategoryLookups) -> Self {
        match selection.selected_ids.len() {
            0 => CategoryDetail::Empty,
            1 => selection
                .single()
                .and_then(|id| lookups.get(id))
                .map(Self::for_node)
                .unwrap_or(CategoryDetail::Empty),
            n => CategoryDetail::Many(n),
        }
    }

    fn for_node(node: &Category) -> Self {
        let mut fields = vec![
            ("ID", node.id.to_string()),
            ("Path", if node.path.is_empty() { "-".to_string() } else { node.path.clone() }),
            ("Parent", node.parent_id.map(|p| p.to_string()).unwrap_or_else(|| "root".to_string())),
            ("Position", node.position.to_string()),
            ("Created", format_timestamp(Some(node.created_at.as_str()))),
            ("Updated", format_timestamp(Some(node.updated_at.as_str()))),
        ];
        if let Some(deleted_at) = &node.deleted_at {
            fields.push(("Deleted", format_timestamp(Some(deleted_at.as_str()))));
        }
        CategoryDetail::Node {
            name: node.name.clone(),
            deleted: node.deleted_at.is_some(),
            fields,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::build_lookups;

    fn make_category(id: i64, parent_id: Option<i64>, children: Vec<Category>) -> Category {
        Category {
            id,
            name: format!("Node {}", id),
            slug: String::new(),
            path: format!("node-{}", id),
            parent_id,
            position: 2,
            created_at: String::new(),
            updated_at: String::new(),
            deleted_at: None,
            children,
        }
    }

    fn select(ids: &[i64]) -> TreeSelection {
        TreeSelection {
            selected_ids: ids.to_vec(),
            parent: (!ids.is_empty()).then_some(None),
            last_selected: ids.last().copied(),
        }
    }

    #[test]
    fn test_detail_follows_selection_size() {
        let lookups = build_lookups(&[make_category(1, None, vec![make_category(3, Some(1), vec![])])]);
        assert_eq!(CategoryDetail::for_selection(&select(&[]), &lookups), CategoryDetail::Empty);
        assert_eq!(CategoryDetail::for_selection(&select(&[1, 3]), &lookups), CategoryDetail::Many(2));
        assert_eq!(CategoryDetail::for_selection(&select(&[99]), &lookups), CategoryDetail::Empty);

        let CategoryDetail::Node { name, deleted, fields } = CategoryDetail::for_selection(&select(&[3]), &lookups)
        else {
            panic!("expected a single node");
        };
        assert_eq!(name, "Node 3");
        assert!(!deleted);
        assert_eq!(fields[0], ("ID", "3".to_string()));
        assert_eq!(fields[1], ("Path", "node-3".to_string()));
        assert_eq!(fields[2], ("Parent", "1".to_string()));
        assert_eq!(fields[3], ("Position", "2".to_string()));
        assert_eq!(fields.len(), 6);
    }

    #[test]
    fn test_root_and_deleted_node() {
        let mut node = make_category(1, None, vec![]);
        node.deleted_at = Some("2024-03-01T08:00:00Z".to_string());
        let CategoryDetail::Node { deleted, fields, .. } = CategoryDetail::for_node(&node) else {
            panic!("expected a node");
        };
        assert!(deleted);
        assert_eq!(fields[2], ("Parent", "root".to_string()));
        assert_eq!(fields.last().map(|f| f.0), Some("Deleted"));
    }
}
