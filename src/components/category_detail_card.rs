//! Category Detail Card
//!
//! Collapsible summary of the selected node, shown under the tree.

use leptos::prelude::*;

use crate::categories::detail::CategoryDetail;
use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn CategoryDetailCard() -> impl IntoView {
    let store = use_app_store();
    let open = RwSignal::new(true);

    let detail = Memo::new(move |_| {
        let selection = store.selection().get();
        store.lookups().with(|lookups| CategoryDetail::for_selection(&selection, lookups))
    });

    view! {
        <section class="category-detail">
            <button class="category-detail-toggle" on:click=move |_| open.update(|o| *o = !*o)>
                {move || if open.get() { "▾ Details" } else { "▸ Details" }}
            </button>
            <Show when=move || open.get()>
                {move || match detail.get() {
                    CategoryDetail::Empty => {
                        view! { <p class="muted">"Select a node to see its details."</p> }.into_any()
                    }
                    CategoryDetail::Many(count) => {
                        view! {
                            <p class="muted">
                                {format!("{} nodes selected. Select a single node to see its details.", count)}
                            </p>
                        }
                            .into_any()
                    }
                    CategoryDetail::Node { name, deleted, fields } => {
                        view! {
                            <div class="category-detail-body">
                                <h4>
                                    {name}
                                    {deleted.then(|| view! { <span class="tag danger">"Deleted"</span> })}
                                </h4>
                                <dl>
                                    {fields
                                        .into_iter()
                                        .map(|(label, value)| view! {
                                            <dt>{label}</dt>
                                            <dd>{value}</dd>
                                        })
                                        .collect_view()}
                                </dl>
                            </div>
                        }
                            .into_any()
                    }
                }}
            </Show>
        </section>
    }
}
