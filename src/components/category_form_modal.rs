//! Category Form Modal
//!
//! Create a root/child category or rename one.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::components::Modal;
use crate::context::use_app_context;
use crate::forms::validate_category_name;
use crate::models::{CategoryCreatePayload, CategoryUpdatePayload};
use crate::store::{store_expand_all, store_select_only, use_app_store, AppStateStoreFields};
use crate::toast::use_toast;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryFormMode {
    CreateRoot,
    CreateChild(i64),
    Rename(i64),
}

impl CategoryFormMode {
    pub fn title(&self) -> &'static str {
        match self {
            CategoryFormMode::CreateRoot => "New root category",
            CategoryFormMode::CreateChild(_) => "New child category",
            CategoryFormMode::Rename(_) => "Rename category",
        }
    }
}

#[component]
pub fn CategoryFormModal(mode: CategoryFormMode, #[prop(into)] on_close: Callback<()>) -> impl IntoView {
    let store = use_app_store();
    let ctx = use_app_context();
    let toast = use_toast();

    let initial = match mode {
        CategoryFormMode::Rename(id) => store
            .lookups()
            .read_untracked()
            .get(id)
            .map(|c| c.name.clone())
            .unwrap_or_default(),
        _ => String::new(),
    };
    let name = RwSignal::new(initial);
    let (error, set_error) = signal(None::<&'static str>);
    let (saving, set_saving) = signal(false);

    let submit = move || {
        let value = match validate_category_name(&name.get_untracked()) {
            Ok(v) => v,
            Err(msg) => {
                set_error.set(Some(msg));
                return;
            }
        };
        if !ctx.begin_mutation() {
            return;
        }
        set_error.set(None);
        set_saving.set(true);
        spawn_local(async move {
            let result = match mode {
                CategoryFormMode::CreateRoot => api::categories::create(&CategoryCreatePayload {
                    name: value,
                    parent_id: None,
                })
                .await
                .map(|c| (c, "Category created")),
                CategoryFormMode::CreateChild(parent) => api::categories::create(&CategoryCreatePayload {
                    name: value,
                    parent_id: Some(parent),
                })
                .await
                .map(|c| (c, "Category created")),
                CategoryFormMode::Rename(id) => api::categories::update(id, &CategoryUpdatePayload { name: value })
                    .await
                    .map(|c| (c, "Category renamed")),
            };
            set_saving.set(false);
            ctx.end_mutation();
            match result {
                Ok((category, message)) => {
                    toast.success(message);
                    if let CategoryFormMode::CreateChild(parent) = mode {
                        store_expand_all(&store, [parent]);
                    }
                    store_select_only(&store, category.id, category.parent_id);
                    ctx.reload_tree();
                    on_close.run(());
                }
                Err(err) => toast.error(err.to_string()),
            }
        });
    };

    view! {
        <Modal title=mode.title() on_close=on_close width=420>
            <form
                class="form-vertical"
                on:submit=move |ev| {
                    ev.prevent_default();
                    submit();
                }
            >
                <label class="form-label">"Category name"</label>
                <input
                    type="text"
                    class="form-input"
                    placeholder="Enter a name"
                    maxlength="50"
                    prop:value=move || name.get()
                    on:input=move |ev| name.set(event_target_value(&ev))
                />
                {move || error.get().map(|msg| view! { <div class="form-error">{msg}</div> })}
                <div class="modal-footer">
                    <button type="button" class="btn" on:click=move |_| on_close.run(())>"Cancel"</button>
                    <button type="submit" class="btn primary" disabled=move || saving.get()>
                        {move || if saving.get() { "Saving..." } else { "OK" }}
                    </button>
                </div>
            </form>
        </Modal>
    }
}
