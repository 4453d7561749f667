//! Tree Toolbar
//!
//! Search box and the category actions above the tree.

use leptos::prelude::*;

use crate::auth::use_auth;
use crate::context::use_app_context;
use crate::store::{selected_node, use_app_store, AppStateStoreFields};

#[component]
pub fn TreeToolbar(
    search: RwSignal<String>,
    #[prop(into)] loading: Signal<bool>,
    #[prop(into)] on_refresh: Callback<()>,
    #[prop(into)] on_create_root: Callback<()>,
    #[prop(into)] on_create_child: Callback<()>,
    #[prop(into)] on_rename: Callback<()>,
    #[prop(into)] on_delete: Callback<()>,
    #[prop(into)] on_open_trash: Callback<()>,
) -> impl IntoView {
    let store = use_app_store();
    let ctx = use_app_context();
    let auth = use_auth();

    let can_manage = move || auth.get().permissions().manage_tree;
    let busy = move || ctx.is_mutating.get();
    let has_single = move || selected_node(&store).is_some();
    let has_any = move || !store.selection().read().is_empty();

    view! {
        <div class="tree-toolbar">
            <input
                type="search"
                class="tree-search"
                placeholder="Search categories"
                prop:value=move || search.get()
                on:input=move |ev| search.set(event_target_value(&ev))
            />
            <button
                class="icon-btn"
                title="Refresh"
                disabled=move || loading.get()
                on:click=move |_| on_refresh.run(())
            >
                "⟳"
            </button>
            <Show when=can_manage>
                <button
                    class="icon-btn primary"
                    title="New root category"
                    disabled=busy
                    on:click=move |_| on_create_root.run(())
                >
                    "+"
                </button>
                <button
                    class="icon-btn"
                    title="New child category"
                    disabled=move || busy() || !has_single()
                    on:click=move |_| on_create_child.run(())
                >
                    "⊞"
                </button>
                <button
                    class="icon-btn"
                    title="Rename"
                    disabled=move || busy() || !has_single()
                    on:click=move |_| on_rename.run(())
                >
                    "✎"
                </button>
                <button
                    class="icon-btn danger"
                    title="Delete"
                    disabled=move || busy() || !has_any()
                    on:click=move |_| on_delete.run(())
                >
                    "🗑"
                </button>
                <button class="icon-btn" title="Recycle bin" on:click=move |_| on_open_trash.run(())>
                    "♻"
                </button>
            </Show>
            <label class="tree-switch" title="Show documents of the whole subtree">
                <input
                    type="checkbox"
                    prop:checked=move || ctx.include_descendants.get()
                    on:change=move |ev| ctx.include_descendants.set(event_target_checked(&ev))
                />
                "Include subtree"
            </label>
        </div>
    }
}
