//! Reorder Modal State
//!
//! Working order for the documents of one node.

use crate::models::{Document, DocumentReorderPayload};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReorderState {
    items: Vec<Document>,
}

impl ReorderState {
    /// Start from the documents sorted by position
    pub fn new(documents: &[Document]) -> Self {
        let mut items = documents.to_vec();
        items.sort_by_key(|d| d.position);
        Self { items }
    }

    pub fn items(&self) -> &[Document] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Swap with the previous row. Returns false at the top.
    pub fn move_up(&mut self, index: usize) -> bool {
        if index == 0 || index >= self.items.len() {
            return false;
        }
        self.items.swap(index - 1, index);
        true
    }

    /// Swap with the next row. Returns false at the bottom.
    pub fn move_down(&mut self, index: usize) -> bool {
        if index + 1 >= self.items.len() {
            return false;
        }
        self.items.swap(index, index + 1);
        true
    }

    pub fn ordered_ids(&self) -> Vec<i64> {
        self.items.iter().map(|d| d.id).collect()
    }

    pub fn payload(&self, node_id: i64) -> DocumentReorderPayload {
        DocumentReorderPayload {
            node_id,
            ordered_ids: self.ordered_ids(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_doc(id: i64, position: i32) -> Document {
        Document {
            id,
            title: format!("Document {}", id),
            doc_type: None,
            position,
            content: None,
            metadata: Default::default(),
            created_by: "user1".to_string(),
            updated_by: "user1".to_string(),
            created_at: String::new(),
            updated_at: String::new(),
            deleted_at: None,
        }
    }

    fn sample() -> ReorderState {
        ReorderState::new(&[make_doc(1, 1), make_doc(2, 2), make_doc(3, 3)])
    }

    #[test]
    fn test_confirm_without_changes() {
        assert_eq!(sample().ordered_ids(), vec![1, 2, 3]);
    }

    #[test]
    fn test_initial_order_by_position() {
        let state = ReorderState::new(&[make_doc(3, 3), make_doc(1, 1), make_doc(2, 2)]);
        assert_eq!(state.ordered_ids(), vec![1, 2, 3]);
    }

    #[test]
    fn test_move_down_then_up() {
        let mut state = sample();
        assert!(state.move_down(0));
        assert_eq!(state.ordered_ids(), vec![2, 1, 3]);
        assert!(state.move_up(2));
        assert_eq!(state.ordered_ids(), vec![2, 3, 1]);
    }

    #[test]
    fn test_edges_are_noops() {
        let mut state = sample();
        assert!(!state.move_up(0));
        assert!(!state.move_down(2));
        assert!(!state.move_up(7));
        assert_eq!(state.ordered_ids(), vec![1, 2, 3]);
    }

    #[test]
    fn test_payload() {
        let mut state = sample();
        state.move_up(1);
        let payload = state.payload(9);
        assert_eq!(payload.node_id, 9);
        assert_eq!(payload.ordered_ids, vec![2, 1, 3]);
    }
}
