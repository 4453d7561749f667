//! Delete Preview
//!
//! Shows what a category delete will affect before it is sent.

use leptos::prelude::*;

use crate::components::Modal;
use crate::models::CategoryDependencySummary;

#[component]
pub fn DeletePreviewModal(
    items: Vec<CategoryDependencySummary>,
    #[prop(into)] busy: Signal<bool>,
    #[prop(into)] on_confirm: Callback<Vec<i64>>,
    #[prop(into)] on_close: Callback<()>,
) -> impl IntoView {
    let ids: Vec<i64> = items.iter().map(|i| i.id).collect();
    let total_documents: i64 = items.iter().map(|i| i.document_count).sum();
    let title = format!("Delete {} categor{}", items.len(), if items.len() == 1 { "y" } else { "ies" });

    view! {
        <Modal title=title on_close=on_close width=560>
            <p class="hint">
                {format!(
                    "{} bound document(s) will be unlinked. Deleted categories go to the recycle bin.",
                    total_documents,
                )}
            </p>
            <ul class="preview-list">
                {items
                    .into_iter()
                    .map(|item| {
                        view! {
                            <li>
                                <strong>{item.name}</strong>
                                <code class="muted">{item.path}</code>
                                <span class="muted">{format!("{} document(s)", item.document_count)}</span>
                                {item
                                    .warnings
                                    .into_iter()
                                    .map(|w| view! { <div class="warning">{w}</div> })
                                    .collect_view()}
                            </li>
                        }
                    })
                    .collect_view()}
            </ul>
            <div class="modal-footer">
                <button class="btn" on:click=move |_| on_close.run(())>"Cancel"</button>
                <button
                    class="btn danger"
                    disabled=move || busy.get()
                    on:click=move |_| on_confirm.run(ids.clone())
                >
                    "Delete"
                </button>
            </div>
        </Modal>
    }
}
