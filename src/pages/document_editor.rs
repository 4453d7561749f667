//! Document editor page for `/documents/new` and `/documents/:doc_id/edit`.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::{use_params_map, use_query_map};

use crate::api;
use crate::auth::use_auth;
use crate::components::{MetadataRows, PreviewView, Spinner};
use crate::context::use_app_context;
use crate::documents::editor::{bind_failure_message, editor_route, DocumentDraft};
use crate::documents::filter::{parse_doc_id, MetadataInput};
use crate::documents::preview::render_preview;
use crate::documents::templates::{format_for_type, DOCUMENT_TYPES};
use crate::models::{Document, DocumentReference};
use crate::store::{use_app_store, AppStateStoreFields};
use crate::toast::use_toast;

/// Categories a saved document is bound to
#[component]
fn BoundNodes(doc_id: i64, #[prop(into)] editable: Signal<bool>) -> impl IntoView {
    let store = use_app_store();
    let toast = use_toast();
    let (nodes, set_nodes) = signal(Vec::<i64>::new());
    let (bump, set_bump) = signal(0u32);
    let new_node = RwSignal::new(String::new());

    Effect::new(move |_| {
        let _ = bump.get();
        spawn_local(async move {
            match api::relationships::list(None, Some(doc_id)).await {
                Ok(list) => set_nodes.set(list.into_iter().map(|r| r.node_id).collect()),
                Err(err) => toast.error(format!("Failed to load bindings: {}", err)),
            }
        });
    });

    let node_label = move |id: i64| {
        store
            .lookups()
            .with(|l| l.get(id).map(|c| format!("{} ({})", c.name, c.path)))
            .unwrap_or_else(|| format!("#{}", id))
    };

    let bind = move |_| {
        let Ok(node_id) = new_node.get_untracked().trim().parse::<i64>() else {
            toast.warning("Enter a category id");
            return;
        };
        spawn_local(async move {
            match api::relationships::bind(node_id, doc_id).await {
                Ok(_) => {
                    new_node.set(String::new());
                    set_bump.update(|v| *v += 1);
                    toast.success("Bound");
                }
                Err(err) => toast.error(err.to_string()),
            }
        });
    };

    let unbind = move |node_id: i64| {
        spawn_local(async move {
            match api::relationships::unbind(node_id, doc_id).await {
                Ok(()) => {
                    set_bump.update(|v| *v += 1);
                    toast.success("Unbound");
                }
                Err(err) => toast.error(err.to_string()),
            }
        });
    };

    view! {
        <section class="bound-nodes">
            <h4>"Categories"</h4>
            <ul>
                <For
                    each=move || nodes.get()
                    key=|id| *id
                    children=move |id| {
                        view! {
                            <li>
                                <span>{move || node_label(id)}</span>
                                <Show when=move || editable.get()>
                                    <button class="link-btn" on:click=move |_| unbind(id)>"Unbind"</button>
                                </Show>
                            </li>
                        }
                    }
                />
            </ul>
            <Show when=move || editable.get()>
                <div class="inline-form">
                    <input
                        class="form-input narrow"
                        placeholder="Category id"
                        prop:value=move || new_node.get()
                        on:input=move |ev| new_node.set(event_target_value(&ev))
                    />
                    <button class="btn" on:click=bind>"Bind"</button>
                </div>
            </Show>
        </section>
    }
}

/// Links to other documents, kept in the draft until saved
#[component]
fn DocumentReferences(
    draft: RwSignal<DocumentDraft>,
    #[prop(into)] own_id: Signal<Option<i64>>,
    #[prop(into)] editable: Signal<bool>,
) -> impl IntoView {
    let toast = use_toast();
    let new_ref = RwSignal::new(String::new());
    let (adding, set_adding) = signal(false);

    let add = move |_| {
        let Some(target) = parse_doc_id(&new_ref.get_untracked()) else {
            toast.warning("Enter a document id");
            return;
        };
        set_adding.set(true);
        spawn_local(async move {
            match api::documents::detail(target).await {
                Ok(doc) => {
                    let reference = DocumentReference {
                        document_id: doc.id,
                        title: doc.title,
                        added_at: chrono::Utc::now().to_rfc3339(),
                    };
                    let mut added = Ok(());
                    draft.update(|d| added = d.add_reference(reference, own_id.get_untracked()));
                    match added {
                        Ok(()) => new_ref.set(String::new()),
                        Err(msg) => toast.warning(msg),
                    }
                }
                Err(err) => toast.error(format!("Failed to load document #{}: {}", target, err)),
            }
            set_adding.set(false);
        });
    };

    view! {
        <section class="document-references">
            <h4>"References"</h4>
            <Show
                when=move || !draft.read().references.is_empty()
                fallback=|| view! { <p class="muted">"No references."</p> }
            >
                <ul>
                    <For
                        each=move || draft.read().references.clone()
                        key=|r| r.document_id
                        children=move |r| {
                            let id = r.document_id;
                            view! {
                                <li>
                                    <span>{format!("#{} {}", id, r.title)}</span>
                                    <Show when=move || editable.get()>
                                        <button
                                            type="button"
                                            class="link-btn"
                                            on:click=move |_| draft.update(|d| d.remove_reference(id))
                                        >
                                            "Remove"
                                        </button>
                                    </Show>
                                </li>
                            }
                        }
                    />
                </ul>
            </Show>
            <Show when=move || editable.get()>
                <div class="inline-form">
                    <input
                        class="form-input narrow"
                        placeholder="Document id"
                        prop:value=move || new_ref.get()
                        on:input=move |ev| new_ref.set(event_target_value(&ev))
                    />
                    <button type="button" class="btn" disabled=move || adding.get() on:click=add>
                        "Add reference"
                    </button>
                </div>
            </Show>
        </section>
    }
}

#[component]
pub fn DocumentEditorPage() -> impl IntoView {
    let ctx = use_app_context();
    let auth = use_auth();
    let toast = use_toast();
    let params = use_params_map();
    let query = use_query_map();

    let doc_id = Memo::new(move |_| params.read().get("doc_id").and_then(|v| v.parse::<i64>().ok()));
    let node_id = Memo::new(move |_| query.read().get("node_id").and_then(|v| v.parse::<i64>().ok()));

    let draft = RwSignal::new(DocumentDraft::default());
    let original = RwSignal::new(None::<Document>);
    let (loading, set_loading) = signal(false);
    let (saving, set_saving) = signal(false);
    let (error, set_error) = signal(None::<&'static str>);

    Effect::new(move |_| {
        let Some(id) = doc_id.get() else {
            original.set(None);
            draft.set(DocumentDraft::default());
            return;
        };
        set_loading.set(true);
        spawn_local(async move {
            match api::documents::detail(id).await {
                Ok(doc) => {
                    draft.set(DocumentDraft::from_document(&doc));
                    original.set(Some(doc));
                }
                Err(err) => toast.error(format!("Failed to load document: {}", err)),
            }
            set_loading.set(false);
        });
    });

    let editable = Signal::derive(move || {
        let permissions = auth.get().permissions();
        if doc_id.get().is_some() {
            permissions.edit_documents
        } else {
            permissions.create_documents
        }
    });

    let preview = move || {
        let (content, doc_type) = draft.with(|d| (d.content.clone(), d.doc_type.clone()));
        render_preview(&content, Some(&doc_type))
    };

    let save = move || {
        let current = draft.get_untracked();
        let existing = original.get_untracked();
        let target_node = node_id.get_untracked();
        let result = match &existing {
            Some(doc) => current.to_update_payload(doc).map(|p| (None, Some(p))),
            None => current.to_create_payload().map(|p| (Some(p), None)),
        };
        let (create, update) = match result {
            Ok(payloads) => payloads,
            Err(msg) => {
                set_error.set(Some(msg));
                return;
            }
        };
        set_error.set(None);
        set_saving.set(true);
        spawn_local(async move {
            match (existing, create, update) {
                (Some(doc), _, Some(payload)) => match api::documents::update(doc.id, &payload).await {
                    Ok(doc) => {
                        toast.success("Document saved");
                        ctx.reload_documents();
                        draft.set(DocumentDraft::from_document(&doc));
                        original.set(Some(doc));
                    }
                    Err(err) => toast.error(format!("Save failed: {}", err)),
                },
                (_, Some(payload), _) => match api::documents::create(&payload).await {
                    Ok(doc) => {
                        toast.success("Document saved");
                        if let Some(node) = target_node {
                            if let Err(err) = api::documents::bind(node, doc.id).await {
                                log::warn!("[EDITOR] bind {} to node {} failed: {}", doc.id, node, err);
                                toast.error(bind_failure_message(node, &err));
                            }
                        }
                        ctx.reload_documents();
                        ctx.navigate(editor_route(doc.id));
                    }
                    Err(err) => toast.error(format!("Save failed: {}", err)),
                },
                _ => {}
            }
            set_saving.set(false);
        });
    };

    view! {
        <div class="editor-page">
            <header class="editor-header">
                <button class="btn" on:click=move |_| ctx.navigate("/")>"← Back"</button>
                <h2>
                    {move || match doc_id.get() {
                        Some(id) => format!("Document #{}", id),
                        None => "New document".to_string(),
                    }}
                </h2>
                {move || node_id.get().map(|id| view! { <span class="muted">{format!("Category #{}", id)}</span> })}
                <div class="spacer"></div>
                <Show when=move || editable.get()>
                    <button class="btn primary" disabled=move || saving.get() on:click=move |_| save()>
                        {move || if saving.get() { "Saving..." } else { "Save" }}
                    </button>
                </Show>
            </header>
            {move || error.get().map(|msg| view! { <div class="form-error">{msg}</div> })}
            <Show when=move || !loading.get() fallback=|| view! { <Spinner label="Loading document" /> }>
                <div class="editor-body">
                    <div class="editor-form">
                        <label class="form-label">"Title"</label>
                        <input
                            class="form-input"
                            prop:value=move || draft.read().title.clone()
                            prop:readonly=move || !editable.get()
                            on:input=move |ev| draft.update(|d| d.title = event_target_value(&ev))
                        />
                        <label class="form-label">"Type"</label>
                        <select
                            class="form-select"
                            prop:value=move || draft.read().doc_type.clone()
                            prop:disabled=move || !editable.get()
                            on:change=move |ev| {
                                let next = event_target_value(&ev);
                                draft.update(|d| d.change_type(&next));
                            }
                        >
                            {DOCUMENT_TYPES
                                .iter()
                                .map(|t| view! { <option value=t.value>{t.label}</option> })
                                .collect_view()}
                        </select>
                        <div class="form-row">
                            <div>
                                <label class="form-label">"Difficulty (1-5)"</label>
                                <input
                                    class="form-input narrow"
                                    type="number"
                                    min="1"
                                    max="5"
                                    prop:value=move || draft.read().difficulty.clone()
                                    prop:readonly=move || !editable.get()
                                    on:input=move |ev| draft.update(|d| d.difficulty = event_target_value(&ev))
                                />
                            </div>
                            <div>
                                <label class="form-label">"Tags"</label>
                                <input
                                    class="form-input"
                                    placeholder="Comma-separated"
                                    prop:value=move || draft.read().tags.clone()
                                    prop:readonly=move || !editable.get()
                                    on:input=move |ev| draft.update(|d| d.tags = event_target_value(&ev))
                                />
                            </div>
                        </div>
                        <label class="form-label">
                            {move || format!("Content ({})", format_for_type(&draft.read().doc_type).as_str())}
                        </label>
                        <textarea
                            class="form-textarea code"
                            rows="28"
                            spellcheck="false"
                            prop:value=move || draft.read().content.clone()
                            prop:readonly=move || !editable.get()
                            on:input=move |ev| draft.update(|d| d.edit_content(event_target_value(&ev)))
                        ></textarea>
                        <label class="form-label">"Metadata"</label>
                        <MetadataRows
                            rows=Signal::derive(move || draft.read().extra_metadata.clone())
                            on_change={move |rows: Vec<MetadataInput>| {
                                if editable.get_untracked() {
                                    draft.update(|d| d.extra_metadata = rows);
                                }
                            }}
                            add_label="+ Metadata field"
                        />
                        <DocumentReferences draft=draft own_id=doc_id editable=editable />
                        {move || doc_id.get().map(|id| view! { <BoundNodes doc_id=id editable=editable /> })}
                    </div>
                    <div class="editor-preview">{move || view! { <PreviewView result=preview() /> }}</div>
                </div>
            </Show>
        </div>
    }
}
