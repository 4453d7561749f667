//! Resizable Sider
//!
//! Left column holding the category tree, followed by its drag handle.
//! Width is clamped against the parent layout. Width and collapsed state
//! persist in local storage.

use leptos::html;
use leptos::prelude::*;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

use crate::categories::sider::{clamp_width, load_collapsed, load_width, save_collapsed, save_width};

const COLLAPSED_WIDTH: u32 = 28;

#[component]
pub fn ResizableSider(children: Children) -> impl IntoView {
    let width = RwSignal::new(load_width());
    let collapsed = RwSignal::new(load_collapsed());
    let resizing = RwSignal::new(false);
    let sider_ref = NodeRef::<html::Aside>::new();

    // Document-level listeners so the drag keeps working off the handle
    if let Some(doc) = web_sys::window().and_then(|w| w.document()) {
        let on_mousemove = Closure::<dyn FnMut(web_sys::MouseEvent)>::new(move |ev: web_sys::MouseEvent| {
            if !resizing.get_untracked() {
                return;
            }
            let Some(layout) = sider_ref.get_untracked().and_then(|el| el.parent_element()) else { return };
            let rect = layout.get_bounding_client_rect();
            let candidate = ev.client_x() as f64 - rect.left();
            width.set(clamp_width(candidate, Some(rect.width())));
        });
        let _ = doc.add_event_listener_with_callback("mousemove", on_mousemove.as_ref().unchecked_ref());
        on_mousemove.forget();

        let on_mouseup = Closure::<dyn FnMut(web_sys::MouseEvent)>::new(move |_ev: web_sys::MouseEvent| {
            if resizing.get_untracked() {
                resizing.set(false);
                save_width(width.get_untracked());
            }
        });
        let _ = doc.add_event_listener_with_callback("mouseup", on_mouseup.as_ref().unchecked_ref());
        on_mouseup.forget();
    }

    let toggle = move |_| {
        let next = !collapsed.get_untracked();
        collapsed.set(next);
        save_collapsed(next);
    };

    let style = move || {
        if collapsed.get() {
            format!("width: {}px;", COLLAPSED_WIDTH)
        } else {
            format!("width: {}px;", width.get())
        }
    };

    view! {
        <aside
            class="sider"
            node_ref=sider_ref
            class:collapsed=move || collapsed.get()
            class:resizing=move || resizing.get()
            style=style
        >
            <button
                class="sider-collapse"
                title=move || if collapsed.get() { "Expand" } else { "Collapse" }
                on:click=toggle
            >
                {move || if collapsed.get() { "»" } else { "«" }}
            </button>
            <div class="sider-content" class:hidden=move || collapsed.get()>
                {children()}
            </div>
        </aside>
        <Show when=move || !collapsed.get()>
            <div
                class="sider-handle"
                on:mousedown=move |ev| {
                    ev.prevent_default();
                    resizing.set(true);
                }
            ></div>
        </Show>
    }
}
