//! Material Library
//!
//! Paged material list with type/tag filters, create and edit through
//! `MaterialDraft`, and binding materials to the selected category.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::api::materials::MaterialListParams;
use crate::auth::use_auth;
use crate::components::{DeleteConfirmButton, Drawer, Modal, Spinner};
use crate::forms::format_timestamp;
use crate::materials::{
    material_type_color, material_type_label, parse_tags, question_type_label, MaterialDraft, MATERIAL_TYPES,
    QUESTION_TYPES,
};
use crate::models::Material;
use crate::store::{selected_node, use_app_store};
use crate::toast::use_toast;

const MATERIALS_PAGE_SIZE: u32 = 20;

#[component]
fn MaterialFormModal(
    original: Option<Material>,
    #[prop(into)] on_saved: Callback<()>,
    #[prop(into)] on_close: Callback<()>,
) -> impl IntoView {
    let toast = use_toast();
    let draft = RwSignal::new(original.as_ref().map(MaterialDraft::from_material).unwrap_or_else(MaterialDraft::new));
    let title = match &original {
        Some(m) => format!("Edit material #{}", m.id),
        None => "New material".to_string(),
    };
    let (error, set_error) = signal(None::<&'static str>);
    let (saving, set_saving) = signal(false);

    let submit = move |_| {
        let current = draft.get_untracked();
        let original = original.clone();
        let request = match &original {
            Some(m) => current.to_update_payload(m).map(|p| (None, Some((m.id, p)))),
            None => current.to_create_payload().map(|p| (Some(p), None)),
        };
        let (create, update) = match request {
            Ok(r) => r,
            Err(msg) => {
                set_error.set(Some(msg));
                return;
            }
        };
        set_error.set(None);
        set_saving.set(true);
        spawn_local(async move {
            let result = match (create, update) {
                (Some(payload), _) => api::materials::create(&payload).await,
                (_, Some((id, payload))) => api::materials::update(id, &payload).await,
                _ => {
                    set_saving.set(false);
                    return;
                }
            };
            set_saving.set(false);
            match result {
                Ok(material) => {
                    toast.success(format!("Saved \"{}\"", material.title));
                    on_saved.run(());
                    on_close.run(());
                }
                Err(err) => toast.error(err.to_string()),
            }
        });
    };

    view! {
        <Modal title=title on_close=on_close width=520>
            <div class="form-vertical">
                <label class="form-label">"Title"</label>
                <input
                    class="form-input"
                    prop:value=move || draft.read().title.clone()
                    on:input=move |ev| draft.update(|d| d.title = event_target_value(&ev))
                />
                <label class="form-label">"Type"</label>
                <select
                    class="form-select"
                    prop:value=move || draft.read().resource_type.clone()
                    on:change=move |ev| draft.update(|d| d.resource_type = event_target_value(&ev))
                >
                    {MATERIAL_TYPES
                        .iter()
                        .map(|(value, label, _)| view! { <option value=*value>{*label}</option> })
                        .collect_view()}
                </select>
                <Show when=move || draft.read().resource_type == "question">
                    <label class="form-label">"Question type"</label>
                    <select
                        class="form-select"
                        prop:value=move || draft.read().question_type.clone()
                        on:change=move |ev| draft.update(|d| d.question_type = event_target_value(&ev))
                    >
                        <option value="">"-"</option>
                        {QUESTION_TYPES
                            .iter()
                            .map(|(value, label)| view! { <option value=*value>{*label}</option> })
                            .collect_view()}
                    </select>
                </Show>
                <label class="form-label">"Difficulty (1-5)"</label>
                <input
                    class="form-input narrow"
                    type="number"
                    min="1"
                    max="5"
                    prop:value=move || draft.read().difficulty.clone()
                    on:input=move |ev| draft.update(|d| d.difficulty = event_target_value(&ev))
                />
                <label class="form-label">"Tags"</label>
                <input
                    class="form-input"
                    placeholder="Comma-separated"
                    prop:value=move || draft.read().tags.clone()
                    on:input=move |ev| draft.update(|d| d.tags = event_target_value(&ev))
                />
                <label class="form-label">"Analysis"</label>
                <textarea
                    class="form-textarea"
                    rows="5"
                    prop:value=move || draft.read().analysis.clone()
                    on:input=move |ev| draft.update(|d| d.analysis = event_target_value(&ev))
                ></textarea>
                {move || error.get().map(|msg| view! { <div class="form-error">{msg}</div> })}
                <div class="modal-footer">
                    <button class="btn" on:click=move |_| on_close.run(())>"Cancel"</button>
                    <button class="btn primary" disabled=move || saving.get() on:click=submit>"Save"</button>
                </div>
            </div>
        </Modal>
    }
}

#[component]
pub fn MaterialsDrawer(#[prop(into)] on_close: Callback<()>) -> impl IntoView {
    let auth = use_auth();
    let store = use_app_store();
    let toast = use_toast();

    let (materials, set_materials) = signal(Vec::<Material>::new());
    let (total, set_total) = signal(0u64);
    let (bound, set_bound) = signal(Vec::<i64>::new());
    let (loading, set_loading) = signal(true);
    let (bump, set_bump) = signal(0u32);
    let page = RwSignal::new(1u32);
    let resource_type = RwSignal::new(String::new());
    let question_type = RwSignal::new(String::new());
    let tags = RwSignal::new(String::new());
    let editing = RwSignal::new(None::<Option<Material>>);

    let node = Memo::new(move |_| selected_node(&store));
    let can_edit = move || auth.get().permissions().edit_documents;

    Effect::new(move |_| {
        let _ = bump.get();
        let params = MaterialListParams {
            page: Some(page.get()),
            size: Some(MATERIALS_PAGE_SIZE),
            resource_type: Some(resource_type.get()).filter(|t| !t.is_empty()),
            question_type: Some(question_type.get()).filter(|t| !t.is_empty()),
            tags: parse_tags(&tags.get()),
        };
        set_loading.set(true);
        spawn_local(async move {
            match api::materials::list(&params).await {
                Ok(result) => {
                    set_total.set(result.total);
                    set_materials.set(result.items);
                }
                Err(err) => toast.error(format!("Failed to load materials: {}", err)),
            }
            set_loading.set(false);
        });
    });

    Effect::new(move |_| {
        let _ = bump.get();
        let Some(node_id) = node.get() else {
            set_bound.set(Vec::new());
            return;
        };
        spawn_local(async move {
            match api::relationships::node_materials(node_id).await {
                Ok(list) => set_bound.set(list.into_iter().map(|r| r.document_id).collect()),
                Err(err) => log::warn!("[API] node materials unavailable: {}", err),
            }
        });
    });

    let reload = move || set_bump.update(|v| *v += 1);

    let remove = move |id: i64| {
        spawn_local(async move {
            match api::materials::delete(id).await {
                Ok(()) => {
                    toast.success("Material deleted");
                    reload();
                }
                Err(err) => toast.error(err.to_string()),
            }
        });
    };

    let toggle_binding = move |material_id: i64| {
        let Some(node_id) = node.get_untracked() else { return };
        let is_bound = bound.read_untracked().contains(&material_id);
        spawn_local(async move {
            let result = if is_bound {
                api::relationships::unbind(node_id, material_id).await
            } else {
                api::relationships::bind(node_id, material_id).await.map(|_| ())
            };
            match result {
                Ok(()) => reload(),
                Err(err) => toast.error(err.to_string()),
            }
        });
    };

    let pages = move || (total.get().div_ceil(MATERIALS_PAGE_SIZE as u64)).max(1) as u32;

    let filter_select = move |value: RwSignal<String>, options: Vec<(&'static str, &'static str)>| {
        view! {
            <select
                class="form-select narrow"
                prop:value=move || value.get()
                on:change=move |ev| {
                    value.set(event_target_value(&ev));
                    page.set(1);
                }
            >
                <option value="">"All"</option>
                {options.into_iter().map(|(v, label)| view! { <option value=v>{label}</option> }).collect_view()}
            </select>
        }
    };

    view! {
        <Drawer title="Materials" on_close=on_close width=960>
            <div class="table-toolbar">
                {filter_select(resource_type, MATERIAL_TYPES.iter().map(|(v, l, _)| (*v, *l)).collect())}
                {filter_select(question_type, QUESTION_TYPES.to_vec())}
                <input
                    class="form-input"
                    placeholder="Tags, comma-separated"
                    prop:value=move || tags.get()
                    on:change=move |ev| {
                        tags.set(event_target_value(&ev));
                        page.set(1);
                    }
                />
                <div class="spacer"></div>
                <Show when=can_edit>
                    <button class="btn primary" on:click=move |_| editing.set(Some(None))>"New material"</button>
                </Show>
            </div>
            {move || {
                node.get()
                    .map(|id| {
                        view! { <div class="muted">{format!("Binding to category #{}", id)}</div> }
                    })
            }}
            <Show when=move || !loading.get() fallback=|| view! { <Spinner /> }>
                <table class="data-table">
                    <thead>
                        <tr>
                            <th>"ID"</th>
                            <th>"Title"</th>
                            <th>"Type"</th>
                            <th>"Question"</th>
                            <th>"Tags"</th>
                            <th>"Updated"</th>
                            <th>"Actions"</th>
                        </tr>
                    </thead>
                    <tbody>
                        <For
                            each=move || materials.get()
                            key=|m| (m.id, m.updated_at.clone())
                            children=move |material| {
                                let id = material.id;
                                let meta = material.metadata.clone();
                                let for_edit = material.clone();
                                view! {
                                    <tr>
                                        <td>{id}</td>
                                        <td>{material.title.clone()}</td>
                                        <td>
                                            <span class=format!("tag {}", material_type_color(&meta.resource_type))>
                                                {material_type_label(&meta.resource_type).to_string()}
                                            </span>
                                        </td>
                                        <td>
                                            {meta.question_type.as_deref().map(question_type_label).unwrap_or("-").to_string()}
                                        </td>
                                        <td>{meta.tags.as_deref().map(|t| t.join(", ")).unwrap_or_default()}</td>
                                        <td>{format_timestamp(Some(material.updated_at.as_str()))}</td>
                                        <td class="actions">
                                            <Show when=move || node.get().is_some() && can_edit()>
                                                <button class="link-btn" on:click=move |_| toggle_binding(id)>
                                                    {move || if bound.read().contains(&id) { "Unbind" } else { "Bind" }}
                                                </button>
                                            </Show>
                                            <Show when=can_edit>
                                                <button
                                                    class="link-btn"
                                                    on:click={
                                                        let for_edit = for_edit.clone();
                                                        move |_| editing.set(Some(Some(for_edit.clone())))
                                                    }
                                                >
                                                    "Edit"
                                                </button>
                                            </Show>
                                            <Show when=move || auth.get().permissions().delete_documents>
                                                <DeleteConfirmButton label="Delete" on_confirm=move |_| remove(id) />
                                            </Show>
                                        </td>
                                    </tr>
                                }
                            }
                        />
                    </tbody>
                </table>
                <Show when=move || materials.read().is_empty()>
                    <div class="empty">"No materials"</div>
                </Show>
            </Show>
            <div class="pager">
                <button class="btn" disabled=move || page.get() <= 1 on:click=move |_| page.update(|p| *p -= 1)>
                    "Prev"
                </button>
                <span>{move || format!("{} / {}  ({} total)", page.get(), pages(), total.get())}</span>
                <button class="btn" disabled=move || page.get() >= pages() on:click=move |_| page.update(|p| *p += 1)>
                    "Next"
                </button>
            </div>

            {move || {
                editing
                    .get()
                    .map(|original| {
                        view! {
                            <MaterialFormModal
                                original=original
                                on_saved=move |_| reload()
                                on_close=move |_| editing.set(None)
                            />
                        }
                    })
            }}
        </Drawer>
    }
}
