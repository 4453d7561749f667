//! Leptos DragDrop Utilities
//!
//! Mouse-event drag-and-drop for tree rows.
//! A movement threshold separates clicks from drags, and the pointer's
//! vertical position inside a row picks between "gap before", "inside"
//! and "gap after".

use leptos::prelude::*;
use wasm_bindgen::JsCast;

/// Where a dragged row would land
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DropTarget {
    /// Become the last child of the row
    Inside(i64),
    /// Land next to the anchor row, under the anchor's parent
    Gap { anchor_id: i64, after: bool },
}

impl DropTarget {
    /// Row the pointer is over
    pub fn anchor(&self) -> i64 {
        match self {
            DropTarget::Inside(id) => *id,
            DropTarget::Gap { anchor_id, .. } => *anchor_id,
        }
    }
}

/// Movement threshold in pixels to start dragging
const DRAG_THRESHOLD_PX: i32 = 5;

/// Share of the row height (top and bottom) that counts as a gap
const GAP_BAND: f64 = 0.25;

/// Pick the drop target from the pointer offset inside a row of `height` px
pub fn target_for_offset(row_id: i64, offset_y: f64, height: f64) -> DropTarget {
    if height <= 0.0 {
        return DropTarget::Inside(row_id);
    }
    let ratio = offset_y / height;
    if ratio < GAP_BAND {
        DropTarget::Gap { anchor_id: row_id, after: false }
    } else if ratio > 1.0 - GAP_BAND {
        DropTarget::Gap { anchor_id: row_id, after: true }
    } else {
        DropTarget::Inside(row_id)
    }
}

/// True once the pointer has moved far enough from the press point
pub fn exceeds_threshold(start: (i32, i32), current: (i32, i32)) -> bool {
    (current.0 - start.0).abs() > DRAG_THRESHOLD_PX || (current.1 - start.1).abs() > DRAG_THRESHOLD_PX
}

/// DnD state signals
#[derive(Clone, Copy)]
pub struct DndSignals {
    pub dragging_id: RwSignal<Option<i64>>,
    pub drop_target: RwSignal<Option<DropTarget>>,
    /// Set briefly after a drop so the trailing click is ignored
    pub drag_just_ended: RwSignal<bool>,
    /// Row pressed but not yet dragged
    pub pending_id: RwSignal<Option<i64>>,
    pub start_pos: RwSignal<(i32, i32)>,
}

pub fn create_dnd_signals() -> DndSignals {
    DndSignals {
        dragging_id: RwSignal::new(None),
        drop_target: RwSignal::new(None),
        drag_just_ended: RwSignal::new(false),
        pending_id: RwSignal::new(None),
        start_pos: RwSignal::new((0, 0)),
    }
}

/// End drag operation
pub fn end_drag(dnd: &DndSignals) {
    let was_dragging = dnd.dragging_id.get_untracked().is_some();
    dnd.dragging_id.set(None);
    dnd.drop_target.set(None);
    dnd.pending_id.set(None);
    if !was_dragging {
        return;
    }
    dnd.drag_just_ended.set(true);

    if let Some(win) = web_sys::window() {
        let flag = dnd.drag_just_ended;
        let cb = wasm_bindgen::closure::Closure::<dyn FnMut()>::new(move || {
            flag.set(false);
        });
        let _ = win.set_timeout_with_callback_and_timeout_and_arguments_0(cb.as_ref().unchecked_ref(), 100);
        cb.forget();
    }
}

/// Mousedown handler for a draggable row
pub fn make_on_mousedown(dnd: DndSignals, row_id: i64) -> impl Fn(web_sys::MouseEvent) + Copy + 'static {
    move |ev: web_sys::MouseEvent| {
        if ev.button() != 0 {
            return;
        }
        if let Some(target) = ev.target() {
            if target.dyn_ref::<web_sys::HtmlInputElement>().is_some() {
                return;
            }
            if target.dyn_ref::<web_sys::HtmlButtonElement>().is_some() {
                return;
            }
        }
        dnd.pending_id.set(Some(row_id));
        dnd.start_pos.set((ev.client_x(), ev.client_y()));
    }
}

/// Mousemove handler for a row: tracks the band under the pointer
pub fn make_on_row_mousemove(dnd: DndSignals, row_id: i64) -> impl Fn(web_sys::MouseEvent) + Copy + 'static {
    move |ev: web_sys::MouseEvent| {
        let Some(dragging) = dnd.dragging_id.get_untracked() else { return };
        if dragging == row_id {
            dnd.drop_target.set(None);
            return;
        }
        let Some(el) = ev
            .current_target()
            .and_then(|t| t.dyn_into::<web_sys::Element>().ok())
        else {
            return;
        };
        let rect = el.get_bounding_client_rect();
        let offset = ev.client_y() as f64 - rect.top();
        let next = target_for_offset(row_id, offset, rect.height());
        if dnd.drop_target.get_untracked() != Some(next) {
            dnd.drop_target.set(Some(next));
        }
    }
}

/// Mouseleave handler
pub fn make_on_mouseleave(dnd: DndSignals) -> impl Fn(web_sys::MouseEvent) + Copy + 'static {
    move |_ev: web_sys::MouseEvent| {
        if dnd.dragging_id.get_untracked().is_some() {
            dnd.drop_target.set(None);
        }
    }
}

fn bind_global_mousemove(dnd: DndSignals) {
    use wasm_bindgen::closure::Closure;

    let on_mousemove = Closure::<dyn FnMut(web_sys::MouseEvent)>::new(move |ev: web_sys::MouseEvent| {
        let Some(pending) = dnd.pending_id.get_untracked() else { return };
        if dnd.dragging_id.get_untracked().is_some() {
            return;
        }
        if exceeds_threshold(dnd.start_pos.get_untracked(), (ev.client_x(), ev.client_y())) {
            log::debug!("[DND] drag start id={}", pending);
            dnd.dragging_id.set(Some(pending));
        }
    });

    if let Some(doc) = web_sys::window().and_then(|w| w.document()) {
        let _ = doc.add_event_listener_with_callback("mousemove", on_mousemove.as_ref().unchecked_ref());
    }
    on_mousemove.forget();
}

fn bind_global_escape(dnd: DndSignals) {
    use wasm_bindgen::closure::Closure;

    let on_keydown = Closure::<dyn FnMut(web_sys::KeyboardEvent)>::new(move |ev: web_sys::KeyboardEvent| {
        if ev.key() == "Escape" && dnd.dragging_id.get_untracked().is_some() {
            log::debug!("[DND] drag cancelled");
            end_drag(&dnd);
        }
    });

    if let Some(doc) = web_sys::window().and_then(|w| w.document()) {
        let _ = doc.add_event_listener_with_callback("keydown", on_keydown.as_ref().unchecked_ref());
    }
    on_keydown.forget();
}

/// Bind the document-level listeners. `on_drop` receives the dragged id and the target.
pub fn bind_global_mouseup<F>(dnd: DndSignals, on_drop: F)
where
    F: Fn(i64, DropTarget) + Clone + 'static,
{
    use wasm_bindgen::closure::Closure;

    let on_mouseup = Closure::<dyn FnMut(web_sys::MouseEvent)>::new(move |_ev: web_sys::MouseEvent| {
        let dragging = dnd.dragging_id.get_untracked();
        let target = dnd.drop_target.get_untracked();
        end_drag(&dnd);
        if let (Some(dragged), Some(target)) = (dragging, target) {
            on_drop(dragged, target);
        }
    });

    if let Some(doc) = web_sys::window().and_then(|w| w.document()) {
        let _ = doc.add_event_listener_with_callback("mouseup", on_mouseup.as_ref().unchecked_ref());
    }
    on_mouseup.forget();

    bind_global_mousemove(dnd);
    bind_global_escape(dnd);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_for_offset_bands() {
        assert_eq!(target_for_offset(7, 2.0, 32.0), DropTarget::Gap { anchor_id: 7, after: false });
        assert_eq!(target_for_offset(7, 16.0, 32.0), DropTarget::Inside(7));
        assert_eq!(target_for_offset(7, 30.0, 32.0), DropTarget::Gap { anchor_id: 7, after: true });
    }

    #[test]
    fn test_target_for_offset_zero_height() {
        assert_eq!(target_for_offset(3, 0.0, 0.0), DropTarget::Inside(3));
    }

    #[test]
    fn test_threshold() {
        assert!(!exceeds_threshold((10, 10), (14, 15)));
        assert!(exceeds_threshold((10, 10), (16, 10)));
        assert!(exceeds_threshold((10, 10), (10, 3)));
    }

    #[test]
    fn test_anchor() {
        assert_eq!(DropTarget::Inside(4).anchor(), 4);
        assert_eq!(DropTarget::Gap { anchor_id: 9, after: true }.anchor(), 9);
    }
}
