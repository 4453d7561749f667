//! Modal & Drawer Shells
//!
//! Overlay containers; callers mount them inside `<Show>`.

use leptos::prelude::*;

/// Centered dialog with a title bar and a close button
#[component]
pub fn Modal(
    #[prop(into)] title: String,
    #[prop(into)] on_close: Callback<()>,
    #[prop(optional)] width: Option<u32>,
    children: Children,
) -> impl IntoView {
    let style = format!("width: {}px;", width.unwrap_or(520));
    view! {
        <div class="modal-mask" on:mousedown=move |_| on_close.run(())>
            <div class="modal" style=style on:mousedown=|ev| ev.stop_propagation()>
                <div class="modal-header">
                    <span class="modal-title">{title}</span>
                    <button class="modal-close" on:click=move |_| on_close.run(())>"×"</button>
                </div>
                <div class="modal-body">{children()}</div>
            </div>
        </div>
    }
}

/// Right-side panel
#[component]
pub fn Drawer(
    #[prop(into)] title: String,
    #[prop(into)] on_close: Callback<()>,
    #[prop(optional)] width: Option<u32>,
    children: Children,
) -> impl IntoView {
    let style = format!("width: {}px;", width.unwrap_or(720));
    view! {
        <div class="drawer-mask" on:mousedown=move |_| on_close.run(())>
            <aside class="drawer" style=style on:mousedown=|ev| ev.stop_propagation()>
                <div class="drawer-header">
                    <span class="drawer-title">{title}</span>
                    <button class="drawer-close" on:click=move |_| on_close.run(())>"×"</button>
                </div>
                <div class="drawer-body">{children()}</div>
            </aside>
        </div>
    }
}

/// Inline spinner with a caption
#[component]
pub fn Spinner(#[prop(optional, into)] label: Option<String>) -> impl IntoView {
    view! {
        <div class="spinner-wrap">
            <span class="spinner"></span>
            <span class="spinner-label">{label.unwrap_or_else(|| "Loading...".to_string())}</span>
        </div>
    }
}
