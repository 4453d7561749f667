//! Drag Planning
//!
//! Turns a drop on the tree into one `reposition` request.

use std::fmt;

use leptos_dragdrop::DropTarget;

use crate::models::CategoryRepositionPayload;
use crate::tree::CategoryLookups;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragError {
    UnknownNode,
    IntoOwnSubtree,
}

impl fmt::Display for DragError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DragError::UnknownNode => f.write_str("Dragged node is missing, refresh and retry"),
            DragError::IntoOwnSubtree => f.write_str("Cannot move a node into its own subtree"),
        }
    }
}

/// Result of planning a drop
#[derive(Debug, Clone, PartialEq)]
pub enum DragPlan {
    /// Nothing changes; skip the request
    Unchanged,
    Reposition {
        node_id: i64,
        payload: CategoryRepositionPayload,
    },
}

pub fn plan_drop(dragged: i64, target: DropTarget, lookups: &CategoryLookups) -> Result<DragPlan, DragError> {
    let source_parent = lookups.parent_of(dragged).ok_or(DragError::UnknownNode)?;
    let anchor = target.anchor();
    if anchor == dragged {
        return Ok(DragPlan::Unchanged);
    }
    let anchor_parent = lookups.parent_of(anchor).ok_or(DragError::UnknownNode)?;

    let target_parent = match target {
        DropTarget::Inside(id) => Some(id),
        DropTarget::Gap { .. } => anchor_parent,
    };
    if let Some(parent) = target_parent {
        if lookups.is_descendant_or_self(parent, &[dragged]) {
            return Err(DragError::IntoOwnSubtree);
        }
    }

    let baseline = lookups.children_of(target_parent);
    let mut ordered: Vec<i64> = baseline.iter().copied().filter(|id| *id != dragged).collect();

    let insert_at = match target {
        DropTarget::Inside(id) if Some(id) == source_parent => 0,
        DropTarget::Inside(_) => ordered.len(),
        DropTarget::Gap { anchor_id, after } => match ordered.iter().position(|id| *id == anchor_id) {
            Some(index) => index + usize::from(after),
            None => ordered.len(),
        },
    };
    ordered.insert(insert_at, dragged);

    let same_parent = source_parent == target_parent;
    if same_parent && ordered.as_slice() == baseline {
        return Ok(DragPlan::Unchanged);
    }

    Ok(DragPlan::Reposition {
        node_id: dragged,
        payload: CategoryRepositionPayload {
            new_parent_id: if same_parent { None } else { Some(target_parent) },
            ordered_ids: ordered,
        },
    })
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

    /// 1 ─ 10, 11, 12
    /// 2 ─ 20
    fn lookups() -> CategoryLookups {
        build_lookups(&[
            make_category(
                1,
                0,
                vec![make_category(10, 0, vec![]), make_category(11, 1, vec![]), make_category(12, 2, vec![])],
            ),
            make_category(2, 1, vec![make_category(20, 0, vec![])]),
        ])
    }

    fn reposition(plan: DragPlan) -> (i64, CategoryRepositionPayload) {
        match plan {
            DragPlan::Reposition { node_id, payload } => (node_id, payload),
            DragPlan::Unchanged => panic!("expected a reposition"),
        }
    }

    #[test]
    fn test_gap_after_within_parent() {
        let (id, payload) = reposition(plan_drop(10, DropTarget::Gap { anchor_id: 12, after: true }, &lookups()).unwrap());
        assert_eq!(id, 10);
        assert_eq!(payload.ordered_ids, vec![11, 12, 10]);
        assert_eq!(payload.new_parent_id, None);
    }

    #[test]
    fn test_gap_before_within_parent() {
        let (_, payload) = reposition(plan_drop(12, DropTarget::Gap { anchor_id: 10, after: false }, &lookups()).unwrap());
        assert_eq!(payload.ordered_ids, vec![12, 10, 11]);
    }

    #[test]
    fn test_unchanged_order_is_skipped() {
        let plan = plan_drop(11, DropTarget::Gap { anchor_id: 10, after: true }, &lookups()).unwrap();
        assert_eq!(plan, DragPlan::Unchanged);
        assert_eq!(plan_drop(11, DropTarget::Inside(11), &lookups()).unwrap(), DragPlan::Unchanged);
    }

    #[test]
    fn test_inside_other_parent_appends() {
        let (_, payload) = reposition(plan_drop(10, DropTarget::Inside(2), &lookups()).unwrap());
        assert_eq!(payload.ordered_ids, vec![20, 10]);
        assert_eq!(payload.new_parent_id, Some(Some(2)));
    }

    #[test]
    fn test_inside_own_parent_moves_to_top() {
        let (_, payload) = reposition(plan_drop(12, DropTarget::Inside(1), &lookups()).unwrap());
        assert_eq!(payload.ordered_ids, vec![12, 10, 11]);
        assert_eq!(payload.new_parent_id, None);
    }

    #[test]
    fn test_gap_at_root_sends_null_parent() {
        let (_, payload) = reposition(plan_drop(20, DropTarget::Gap { anchor_id: 1, after: true }, &lookups()).unwrap());
        assert_eq!(payload.ordered_ids, vec![1, 20, 2]);
        assert_eq!(payload.new_parent_id, Some(None));
    }

    #[test]
    fn test_into_own_subtree_rejected() {
        assert_eq!(plan_drop(1, DropTarget::Inside(11), &lookups()), Err(DragError::IntoOwnSubtree));
        assert_eq!(plan_drop(1, DropTarget::Gap { anchor_id: 12, after: false }, &lookups()), Err(DragError::IntoOwnSubtree));
    }

    #[test]
    fn test_unknown_node() {
        assert_eq!(plan_drop(99, DropTarget::Inside(1), &lookups()), Err(DragError::UnknownNode));
    }
}
