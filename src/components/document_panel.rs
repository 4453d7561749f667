//! Document Panel
//!
//! Filter form and table for the documents of the selected node.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::auth::use_auth;
use crate::components::{
    DeleteConfirmButton, DocumentHistoryDrawer, DocumentReorderModal, DocumentTrashDrawer, MetadataRows, Spinner,
};
use crate::context::use_app_context;
use crate::documents::filter::{
    filter_documents_by_id, node_query_params, DocumentFilterForm, MetadataInput,
};
use crate::documents::templates::{type_label, DOCUMENT_TYPES};
use crate::forms::format_timestamp;
use crate::store::{selected_node, store_remove_document, store_set_documents, use_app_store, AppStateStoreFields};
use crate::toast::use_toast;

#[component]
pub fn DocumentPanel() -> impl IntoView {
    let store = use_app_store();
    let ctx = use_app_context();
    let auth = use_auth();
    let toast = use_toast();

    let form = RwSignal::new(DocumentFilterForm::default());
    let applied = RwSignal::new(DocumentFilterForm::default());
    let (loading, set_loading) = signal(false);
    let history_doc = RwSignal::new(None::<i64>);
    let show_trash = RwSignal::new(false);
    let show_reorder = RwSignal::new(false);

    let permissions = move || auth.get().permissions();
    let node = Memo::new(move |_| selected_node(&store));

    Effect::new(move |_| {
        let _ = ctx.docs_version.get();
        let include_descendants = ctx.include_descendants.get();
        let filters = applied.get();
        let Some(node_id) = node.get() else {
            store_set_documents(&store, Vec::new());
            return;
        };
        set_loading.set(true);
        spawn_local(async move {
            let params = node_query_params(&filters, include_descendants);
            match api::documents::node_documents(node_id, &params).await {
                Ok(docs) => {
                    log::debug!("[API] node {} documents: {}", node_id, docs.len());
                    store_set_documents(&store, filter_documents_by_id(&docs, &filters.doc_id));
                }
                Err(err) => {
                    store_set_documents(&store, Vec::new());
                    toast.error(format!("Failed to load documents: {}", err));
                }
            }
            set_loading.set(false);
        });
    });

    let delete_document = move |id: i64| {
        spawn_local(async move {
            match api::documents::delete(id).await {
                Ok(()) => {
                    store_remove_document(&store, id);
                    toast.success("Document moved to the recycle bin");
                }
                Err(err) => toast.error(err.to_string()),
            }
        });
    };

    let add_document = move |_| match node.get_untracked() {
        Some(id) => ctx.navigate(format!("/documents/new?node_id={}", id)),
        None => ctx.navigate("/documents/new"),
    };

    view! {
        <section class="document-panel">
            <form
                class="filter-form"
                on:submit=move |ev| {
                    ev.prevent_default();
                    applied.set(form.get_untracked());
                }
            >
                <input
                    class="form-input narrow"
                    placeholder="Document ID"
                    prop:value=move || form.read().doc_id.clone()
                    on:input=move |ev| form.update(|f| f.doc_id = event_target_value(&ev))
                />
                <input
                    class="form-input"
                    placeholder="Search title or content"
                    prop:value=move || form.read().query.clone()
                    on:input=move |ev| form.update(|f| f.query = event_target_value(&ev))
                />
                <select
                    class="form-select"
                    prop:value=move || form.read().doc_type.clone().unwrap_or_default()
                    on:change=move |ev| {
                        let value = event_target_value(&ev);
                        form.update(|f| f.doc_type = (!value.is_empty()).then_some(value));
                    }
                >
                    <option value="">"All types"</option>
                    {DOCUMENT_TYPES
                        .iter()
                        .map(|t| view! { <option value=t.value>{t.label}</option> })
                        .collect_view()}
                </select>
                <button type="submit" class="btn primary">"Filter"</button>
                <button
                    type="button"
                    class="btn"
                    on:click=move |_| {
                        form.set(DocumentFilterForm::default());
                        applied.set(DocumentFilterForm::default());
                    }
                >
                    "Reset"
                </button>
                <MetadataRows
                    rows=Signal::derive(move || form.read().metadata.clone())
                    on_change={move |rows: Vec<MetadataInput>| form.update(|f| f.metadata = rows)}
                    add_label="+ Metadata filter"
                />
            </form>

            <div class="table-toolbar">
                <span class="muted">
                    {move || format!("{} document(s)", store.documents().read().len())}
                </span>
                <div class="spacer"></div>
                <Show when=move || permissions().delete_documents>
                    <button class="btn" on:click=move |_| show_trash.set(true)>"Recycle bin"</button>
                </Show>
                <Show when=move || permissions().edit_documents>
                    <button
                        class="btn"
                        disabled=move || node.get().is_none() || store.documents().read().len() <= 1
                        on:click=move |_| show_reorder.set(true)
                    >
                        "Reorder"
                    </button>
                </Show>
                <Show when=move || permissions().create_documents>
                    <button class="btn primary" on:click=add_document>"Add document"</button>
                </Show>
            </div>

            <Show when=move || node.get().is_some() fallback=|| view! { <div class="empty">"No category selected"</div> }>
                <Show when=move || !loading.get() fallback=|| view! { <Spinner /> }>
                    <table class="data-table">
                        <thead>
                            <tr>
                                <th>"ID"</th>
                                <th>"Title"</th>
                                <th>"Type"</th>
                                <th>"Position"</th>
                                <th>"Updated"</th>
                                <th>"Actions"</th>
                            </tr>
                        </thead>
                        <tbody>
                            <For
                                each=move || store.documents().get()
                                key=|d| (d.id, d.updated_at.clone(), d.position)
                                children=move |doc| {
                                    let id = doc.id;
                                    let doc_type = doc.type_name().to_string();
                                    view! {
                                        <tr>
                                            <td>{id}</td>
                                            <td>{doc.title.clone()}</td>
                                            <td><span class="tag">{type_label(&doc_type).to_string()}</span></td>
                                            <td>{doc.position}</td>
                                            <td>{format_timestamp(Some(doc.updated_at.as_str()))}</td>
                                            <td class="actions">
                                                <button
                                                    class="link-btn"
                                                    on:click=move |_| ctx.navigate(format!("/documents/{}/edit", id))
                                                >
                                                    {move || if permissions().edit_documents { "Edit" } else { "View" }}
                                                </button>
                                                <button class="link-btn" on:click=move |_| history_doc.set(Some(id))>
                                                    "History"
                                                </button>
                                                <Show when=move || permissions().delete_documents>
                                                    <DeleteConfirmButton
                                                        label="Delete"
                                                        prompt="Move this document to the recycle bin?"
                                                        on_confirm=move |_| delete_document(id)
                                                    />
                                                </Show>
                                            </td>
                                        </tr>
                                    }
                                }
                            />
                        </tbody>
                    </table>
                    <Show when=move || store.documents().read().is_empty()>
                        <div class="empty">"No documents"</div>
                    </Show>
                </Show>
            </Show>

            {move || {
                history_doc
                    .get()
                    .map(|id| view! { <DocumentHistoryDrawer doc_id=id on_close=move |_| history_doc.set(None) /> })
            }}
            <Show when=move || show_trash.get()>
                <DocumentTrashDrawer on_close=move |_| show_trash.set(false) />
            </Show>
            {move || {
                match (show_reorder.get(), node.get()) {
                    (true, Some(node_id)) => {
                        Some(
                            view! {
                                <DocumentReorderModal node_id=node_id on_close=move |_| show_reorder.set(false) />
                            },
                        )
                    }
                    _ => None,
                }
            }}
        </section>
    }
}
