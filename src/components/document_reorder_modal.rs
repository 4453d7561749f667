//! Document Reorder Modal
//!
//! Move documents of a node up or down, then save the order.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::components::Modal;
use crate::context::use_app_context;
use crate::documents::reorder::ReorderState;
use crate::store::{use_app_store, AppStateStoreFields};
use crate::toast::use_toast;

#[component]
pub fn DocumentReorderModal(node_id: i64, #[prop(into)] on_close: Callback<()>) -> impl IntoView {
    let store = use_app_store();
    let ctx = use_app_context();
    let toast = use_toast();

    let state = RwSignal::new(ReorderState::new(&store.documents().get_untracked()));
    let (saving, set_saving) = signal(false);

    let save = move |_| {
        let payload = state.with_untracked(|s| s.payload(node_id));
        set_saving.set(true);
        spawn_local(async move {
            match api::documents::reorder(&payload).await {
                Ok(_) => {
                    toast.success("Order saved");
                    ctx.reload_documents();
                    on_close.run(());
                }
                Err(err) => toast.error(format!("Failed to save order: {}", err)),
            }
            set_saving.set(false);
        });
    };

    view! {
        <Modal title="Reorder documents" on_close=on_close width=640>
            <ol class="reorder-list">
                {move || {
                    let count = state.with(|s| s.len());
                    state
                        .with(|s| s.items().to_vec())
                        .into_iter()
                        .enumerate()
                        .map(|(index, doc)| {
                            view! {
                                <li class="reorder-row">
                                    <span class="muted">{format!("#{}", doc.id)}</span>
                                    <span class="reorder-title">{doc.title}</span>
                                    <button
                                        class="icon-btn"
                                        title="Move up"
                                        disabled=index == 0
                                        on:click=move |_| {
                                            state.update(|s| {
                                                s.move_up(index);
                                            })
                                        }
                                    >
                                        "↑"
                                    </button>
                                    <button
                                        class="icon-btn"
                                        title="Move down"
                                        disabled=index + 1 == count
                                        on:click=move |_| {
                                            state.update(|s| {
                                                s.move_down(index);
                                            })
                                        }
                                    >
                                        "↓"
                                    </button>
                                </li>
                            }
                        })
                        .collect_view()
                }}
            </ol>
            <div class="modal-footer">
                <button class="btn" on:click=move |_| on_close.run(())>"Cancel"</button>
                <button class="btn primary" disabled=move || saving.get() on:click=save>
                    {move || if saving.get() { "Saving..." } else { "Save order" }}
                </button>
            </div>
        </Modal>
    }
}
