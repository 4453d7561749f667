//! Category Tree Panel
//!
//! Loads the tree, renders the visible rows and wires selection,
//! drag-and-drop, the context menu and clipboard paste.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_dragdrop::*;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

use crate::api;
use crate::auth::use_auth;
use crate::categories::clipboard::{prepare_paste, ClipboardMode, PasteRejection, PasteTarget};
use crate::categories::context_menu::MenuAction;
use crate::categories::drag::{plan_drop, DragPlan};
use crate::categories::selection::ClickModifiers;
use crate::components::{
    CategoryFormMode, CategoryFormModal, CategoryTrashModal, DeletePreviewModal, TreeContextMenu, TreeToolbar,
};
use crate::config::drag_debug_enabled;
use crate::context::use_app_context;
use crate::models::{CategoryBulkCheckPayload, CategoryDependencySummary};
use crate::store::{
    selected_node, store_after_paste, store_clear_clipboard, store_clear_selection, store_click_node, store_close_menu,
    store_expand_all, store_open_menu, store_set_clipboard, store_set_tree, store_toggle_expanded, use_app_store,
    AppStateStoreFields, AppStore,
};
use crate::toast::use_toast;
use crate::tree::{filter_tree, flatten_tree};

/// Close the context menu on Escape or a mousedown outside it
fn bind_menu_dismiss(store: AppStore) {
    let Some(doc) = web_sys::window().and_then(|w| w.document()) else { return };

    let on_keydown = Closure::<dyn FnMut(web_sys::KeyboardEvent)>::new(move |ev: web_sys::KeyboardEvent| {
        if ev.key() == "Escape" {
            store_close_menu(&store);
        }
    });
    let _ = doc.add_event_listener_with_callback("keydown", on_keydown.as_ref().unchecked_ref());
    on_keydown.forget();

    let on_mousedown = Closure::<dyn FnMut(web_sys::MouseEvent)>::new(move |ev: web_sys::MouseEvent| {
        let inside_menu = ev
            .target()
            .and_then(|t| t.dyn_into::<web_sys::Element>().ok())
            .and_then(|el| el.closest(".context-menu").ok().flatten())
            .is_some();
        if !inside_menu {
            store_close_menu(&store);
        }
    });
    let _ = doc.add_event_listener_with_callback("mousedown", on_mousedown.as_ref().unchecked_ref());
    on_mousedown.forget();
}

#[component]
pub fn CategoryTreePanel() -> impl IntoView {
    let store = use_app_store();
    let ctx = use_app_context();
    let auth = use_auth();
    let toast = use_toast();

    let search = RwSignal::new(String::new());
    let (loading, set_loading) = signal(false);
    let form_mode = RwSignal::new(None::<CategoryFormMode>);
    let show_trash = RwSignal::new(false);
    let delete_preview = RwSignal::new(None::<Vec<CategoryDependencySummary>>);

    let can_manage = move || auth.get().permissions().manage_tree;

    // Load on every tree version bump
    Effect::new(move |_| {
        let version = ctx.tree_version.get();
        set_loading.set(true);
        spawn_local(async move {
            match api::categories::tree(false).await {
                Ok(roots) => {
                    log::debug!("[API] category tree v{} loaded, {} roots", version, roots.len());
                    store_set_tree(&store, roots);
                }
                Err(err) => toast.error(format!("Failed to load categories: {}", err)),
            }
            set_loading.set(false);
        });
    });

    // Search keeps matches plus ancestors and opens them
    let visible = Memo::new(move |_| {
        let term = search.get();
        filter_tree(&store.categories().read(), &term)
    });
    Effect::new(move |_| {
        if let Some(ids) = visible.get() {
            store_expand_all(&store, ids);
        }
    });

    let rows = Memo::new(move |_| {
        let visible = visible.get();
        let expanded = store.expanded().get();
        flatten_tree(&store.lookups().read(), &expanded, visible.as_ref())
    });

    // Drag and drop
    let dnd = create_dnd_signals();
    bind_global_mouseup(dnd, move |dragged, target| {
        if drag_debug_enabled() {
            log::debug!("[DND] drop dragged={} target={:?}", dragged, target);
        }
        if !auth.get_untracked().permissions().manage_tree {
            return;
        }
        let plan = store.lookups().with_untracked(|lookups| plan_drop(dragged, target, lookups));
        let (node_id, payload) = match plan {
            Ok(DragPlan::Unchanged) => return,
            Ok(DragPlan::Reposition { node_id, payload }) => (node_id, payload),
            Err(err) => {
                toast.warning(err.to_string());
                return;
            }
        };
        if !ctx.begin_mutation() {
            return;
        }
        spawn_local(async move {
            let result = api::categories::reposition(node_id, &payload).await;
            ctx.end_mutation();
            match result {
                Ok(_) => {
                    log::debug!("[DND] reposition done id={}", node_id);
                    if let DropTarget::Inside(parent) = target {
                        store_expand_all(&store, [parent]);
                    }
                    toast.success("Category moved");
                    ctx.reload_all();
                }
                Err(err) => {
                    toast.error(format!("Move failed: {}", err));
                    ctx.reload_tree();
                }
            }
        });
    });

    bind_menu_dismiss(store);

    let request_delete = move || {
        let ids = store.selection().get_untracked().selected_ids;
        if ids.is_empty() {
            toast.warning("Select the categories to delete first");
            return;
        }
        let blocked = store
            .lookups()
            .with_untracked(|l| l.first_with_children(&ids).and_then(|id| l.get(id).map(|c| c.name.clone())));
        if let Some(name) = blocked {
            toast.warning(format!("\"{}\" has child categories, move or delete them first", name));
            return;
        }
        spawn_local(async move {
            let payload = CategoryBulkCheckPayload {
                ids,
                include_descendants: Some(false),
            };
            match api::categories::bulk_check(&payload).await {
                Ok(resp) => delete_preview.set(Some(resp.items)),
                Err(err) => toast.error(format!("Failed to check dependencies: {}", err)),
            }
        });
    };

    let confirm_delete = move |ids: Vec<i64>| {
        if !ctx.begin_mutation() {
            return;
        }
        spawn_local(async move {
            let result = match ids.as_slice() {
                [only] => api::categories::delete(*only).await,
                _ => api::categories::bulk_delete(ids.clone()).await,
            };
            ctx.end_mutation();
            match result {
                Ok(()) => {
                    delete_preview.set(None);
                    store_clear_selection(&store);
                    toast.success("Moved to the recycle bin");
                    ctx.reload_all();
                }
                Err(err) => toast.error(err.to_string()),
            }
        });
    };

    let paste = move |target: PasteTarget| {
        let clipboard = store.clipboard().get_untracked();
        let plan = store.lookups().with_untracked(|lookups| {
            prepare_paste(ctx.is_mutating.get_untracked(), clipboard.as_ref(), target, lookups)
        });
        let (mode, payload) = match plan {
            Ok(plan) => plan,
            Err(PasteRejection::Busy) => return,
            Err(reason) => {
                toast.warning(reason.to_string());
                return;
            }
        };
        if !ctx.begin_mutation() {
            return;
        }
        spawn_local(async move {
            let result = match mode {
                ClipboardMode::Copy => api::categories::bulk_copy(&payload).await,
                ClipboardMode::Cut => api::categories::bulk_move(&payload).await,
            };
            ctx.end_mutation();
            match result {
                Ok(resp) => {
                    if let Some(parent) = payload.target_parent_id {
                        store_expand_all(&store, [parent]);
                    }
                    store_after_paste(&store, mode);
                    let verb = match mode {
                        ClipboardMode::Copy => "Copied",
                        ClipboardMode::Cut => "Moved",
                    };
                    toast.success(format!("{} {} categories", verb, resp.items.len()));
                    ctx.reload_all();
                }
                Err(err) => toast.error(err.to_string()),
            }
        });
    };

    let on_action = move |action: MenuAction| {
        store_close_menu(&store);
        match action {
            MenuAction::AddDocument(node) => ctx.navigate(format!("/documents/new?node_id={}", node)),
            MenuAction::CreateChild(node) => form_mode.set(Some(CategoryFormMode::CreateChild(node))),
            MenuAction::Rename(node) => form_mode.set(Some(CategoryFormMode::Rename(node))),
            MenuAction::CopySelection | MenuAction::CutSelection => {
                let mode = if action == MenuAction::CutSelection {
                    ClipboardMode::Cut
                } else {
                    ClipboardMode::Copy
                };
                if store_set_clipboard(&store, mode) {
                    toast.info(if mode == ClipboardMode::Cut { "Cut to clipboard" } else { "Copied to clipboard" });
                } else {
                    toast.warning("Nothing selected");
                }
            }
            MenuAction::DeleteSelection => request_delete(),
            MenuAction::PasteAsChild(node) => paste(PasteTarget::AsChild(node)),
            MenuAction::PasteBefore(node) => paste(PasteTarget::Before(node)),
            MenuAction::PasteAfter(node) => paste(PasteTarget::After(node)),
            MenuAction::ClearClipboard => store_clear_clipboard(&store),
        }
    };

    view! {
        <div class="category-panel">
            <TreeToolbar
                search=search
                loading=loading
                on_refresh=move |_| ctx.reload_tree()
                on_create_root=move |_| form_mode.set(Some(CategoryFormMode::CreateRoot))
                on_create_child=move |_| {
                    if let Some(id) = selected_node(&store) {
                        form_mode.set(Some(CategoryFormMode::CreateChild(id)));
                    }
                }
                on_rename=move |_| {
                    if let Some(id) = selected_node(&store) {
                        form_mode.set(Some(CategoryFormMode::Rename(id)));
                    }
                }
                on_delete=move |_| request_delete()
                on_open_trash=move |_| show_trash.set(true)
            />
            <Show when=move || can_manage() && store.clipboard().read().is_some()>
                <div class="clipboard-bar">
                    <span>
                        {move || {
                            store
                                .clipboard()
                                .read()
                                .as_ref()
                                .map(|c| {
                                    let verb = if c.mode == ClipboardMode::Cut { "cut" } else { "copied" };
                                    format!("{} node(s) {}", c.source_ids.len(), verb)
                                })
                                .unwrap_or_default()
                        }}
                    </span>
                    <button
                        class="link-btn"
                        disabled=move || ctx.is_mutating.get()
                        on:click=move |_| paste(PasteTarget::Root)
                    >
                        "Paste at root"
                    </button>
                    <button class="link-btn" on:click=move |_| store_clear_clipboard(&store)>"Clear"</button>
                </div>
            </Show>
            <div
                class="tree-view"
                class:loading=move || loading.get()
                on:contextmenu=|ev| ev.prevent_default()
            >
                <Show
                    when=move || !rows.read().is_empty()
                    fallback=move || {
                        view! {
                            <div class="empty">
                                {move || if search.read().trim().is_empty() { "No categories yet" } else { "No matches" }}
                            </div>
                        }
                    }
                >
                    <For
                        each=move || rows.get()
                        key=|row| (row.id, row.depth, row.name.clone(), row.expanded, row.has_children, row.parent_id)
                        children=move |row| {
                            let id = row.id;
                            let parent = row.parent_id;

                            let on_mousedown = make_on_mousedown(dnd, id);
                            let on_mousemove = make_on_row_mousemove(dnd, id);
                            let on_mouseleave = make_on_mouseleave(dnd);

                            let row_class = move || {
                                let mut c = String::from("tree-row");
                                if store.selection().read().contains(id) {
                                    c.push_str(" selected");
                                }
                                if store.clipboard().read().as_ref().is_some_and(|clip| clip.is_cut(id)) {
                                    c.push_str(" cut");
                                }
                                if dnd.dragging_id.get() == Some(id) {
                                    c.push_str(" dragging");
                                }
                                match dnd.drop_target.get() {
                                    Some(DropTarget::Inside(t)) if t == id => c.push_str(" drop-inside"),
                                    Some(DropTarget::Gap { anchor_id, after: false }) if anchor_id == id => {
                                        c.push_str(" drop-before")
                                    }
                                    Some(DropTarget::Gap { anchor_id, after: true }) if anchor_id == id => {
                                        c.push_str(" drop-after")
                                    }
                                    _ => {}
                                }
                                c
                            };

                            view! {
                                <div
                                    class=row_class
                                    style=format!("padding-left: {}px;", 8 + row.depth * 18)
                                    on:mousedown=move |ev| {
                                        if auth.get_untracked().permissions().manage_tree {
                                            on_mousedown(ev);
                                        }
                                    }
                                    on:mousemove=on_mousemove
                                    on:mouseleave=on_mouseleave
                                    on:click=move |ev| {
                                        if dnd.drag_just_ended.get_untracked() {
                                            return;
                                        }
                                        store_close_menu(&store);
                                        store_click_node(&store, id, parent, ClickModifiers::from_mouse(&ev));
                                    }
                                    on:contextmenu=move |ev| {
                                        ev.prevent_default();
                                        ev.stop_propagation();
                                        store_open_menu(&store, id, parent, ev.client_x(), ev.client_y());
                                    }
                                >
                                    {if row.has_children {
                                        view! {
                                            <button
                                                class="tree-toggle"
                                                on:click=move |ev| {
                                                    ev.stop_propagation();
                                                    store_toggle_expanded(&store, id);
                                                }
                                            >
                                                {if row.expanded { "▾" } else { "▸" }}
                                            </button>
                                        }
                                            .into_any()
                                    } else {
                                        view! { <span class="tree-toggle-placeholder"></span> }.into_any()
                                    }}
                                    <span class="tree-label" title=row.name.clone()>{row.name.clone()}</span>
                                </div>
                            }
                        }
                    />
                </Show>
            </div>

            <TreeContextMenu on_action=on_action />

            {move || {
                form_mode
                    .get()
                    .map(|mode| view! { <CategoryFormModal mode=mode on_close=move |_| form_mode.set(None) /> })
            }}
            <Show when=move || show_trash.get()>
                <CategoryTrashModal on_close=move |_| show_trash.set(false) />
            </Show>
            {move || {
                delete_preview
                    .get()
                    .map(|items| {
                        view! {
                            <DeletePreviewModal
                                items=items
                                busy=ctx.is_mutating
                                on_confirm=confirm_delete
                                on_close=move |_| delete_preview.set(None)
                            />
                        }
                    })
            }}
        </div>
    }
}
