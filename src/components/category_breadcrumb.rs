//! Category Breadcrumb
//!
//! Root-first path of the selected node. Each segment opens a list of
//! its siblings for quick jumps.

use leptos::prelude::*;

use crate::store::{selected_node, store_close_menu, store_expand_all, store_select_only, use_app_store, AppStateStoreFields};

#[component]
pub fn CategoryBreadcrumb() -> impl IntoView {
    let store = use_app_store();
    let open_segment = RwSignal::new(None::<usize>);

    let jump = move |id: i64| {
        let lookups = store.lookups().get_untracked();
        let parent = lookups.parent_of(id).flatten();
        let ancestors: Vec<i64> = lookups.breadcrumb(id).iter().map(|c| c.id).filter(|x| *x != id).collect();
        store_expand_all(&store, ancestors);
        store_select_only(&store, id, parent);
        store_close_menu(&store);
        open_segment.set(None);
    };

    let path = move || {
        selected_node(&store)
            .map(|id| store.lookups().read().breadcrumb(id))
            .unwrap_or_default()
    };

    view! {
        <div class="breadcrumb">
            <Show
                when=move || !path().is_empty()
                fallback=|| view! { <span class="muted">"Select a category on the left to see its documents"</span> }
            >
                <span class="breadcrumb-home">"⌂"</span>
                {move || {
                    path()
                        .into_iter()
                        .enumerate()
                        .map(|(index, node)| {
                            let node_id = node.id;
                            let siblings: Vec<(i64, String)> = {
                                let lookups = store.lookups().read();
                                lookups
                                    .children_of(node.parent_id)
                                    .iter()
                                    .filter_map(|id| lookups.get(*id).map(|c| (c.id, c.name.clone())))
                                    .collect()
                            };
                            view! {
                                <span class="breadcrumb-sep">"/"</span>
                                <span class="breadcrumb-item">
                                    <a on:click=move |_| jump(node_id)>{node.name.clone()}</a>
                                    <button
                                        class="breadcrumb-more"
                                        on:click=move |_| {
                                            open_segment.update(|s| {
                                                *s = if *s == Some(index) { None } else { Some(index) };
                                            })
                                        }
                                    >
                                        "▾"
                                    </button>
                                    <Show when=move || open_segment.get() == Some(index)>
                                        <ul class="breadcrumb-menu">
                                            {siblings
                                                .iter()
                                                .cloned()
                                                .map(|(id, name)| {
                                                    view! {
                                                        <li class:active=id == node_id on:click=move |_| jump(id)>
                                                            {name}
                                                        </li>
                                                    }
                                                })
                                                .collect_view()}
                                        </ul>
                                    </Show>
                                </span>
                            }
                        })
                        .collect_view()
                }}
            </Show>
        </div>
    }
}
