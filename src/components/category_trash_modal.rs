//! Category Recycle Bin
//!
//! Soft-deleted categories with single and bulk restore/purge.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::auth::use_auth;
use crate::components::{DeleteConfirmButton, Modal, Spinner};
use crate::context::use_app_context;
use crate::forms::format_timestamp;
use crate::models::Category;
use crate::toast::use_toast;

#[component]
pub fn CategoryTrashModal(#[prop(into)] on_close: Callback<()>) -> impl IntoView {
    let ctx = use_app_context();
    let auth = use_auth();
    let toast = use_toast();

    let (items, set_items) = signal(Vec::<Category>::new());
    let (loading, set_loading) = signal(true);
    let checked = RwSignal::new(Vec::<i64>::new());
    let (version, set_version) = signal(0u32);
    let can_purge = move || auth.get().permissions().purge;

    Effect::new(move |_| {
        let _ = version.get();
        set_loading.set(true);
        spawn_local(async move {
            match api::categories::trash().await {
                Ok(list) => {
                    checked.update(|ids| ids.retain(|id| list.iter().any(|c| c.id == *id)));
                    set_items.set(list);
                }
                Err(err) => toast.error(err.to_string()),
            }
            set_loading.set(false);
        });
    });

    let after_change = move |message: &'static str| {
        toast.success(message);
        set_version.update(|v| *v += 1);
        ctx.reload_all();
    };

    let restore = move |ids: Vec<i64>| {
        if ids.is_empty() {
            return;
        }
        spawn_local(async move {
            let result = match ids.as_slice() {
                [only] => api::categories::restore(*only).await.map(|_| ()),
                _ => api::categories::bulk_restore(ids).await,
            };
            match result {
                Ok(()) => after_change("Restored"),
                Err(err) => toast.error(err.to_string()),
            }
        });
    };

    let purge = move |ids: Vec<i64>| {
        if ids.is_empty() {
            return;
        }
        spawn_local(async move {
            let result = match ids.as_slice() {
                [only] => api::categories::purge(*only).await,
                _ => api::categories::bulk_purge(ids).await,
            };
            match result {
                Ok(()) => after_change("Permanently deleted"),
                Err(err) => toast.error(err.to_string()),
            }
        });
    };

    let toggle = move |id: i64, on: bool| {
        checked.update(|ids| {
            ids.retain(|x| *x != id);
            if on {
                ids.push(id);
            }
        });
    };

    view! {
        <Modal title="Recycle bin" on_close=on_close width=860>
            <div class="table-toolbar">
                <span>{move || format!("{} selected", checked.read().len())}</span>
                <button
                    class="btn"
                    disabled=move || checked.read().is_empty()
                    on:click=move |_| restore(checked.get_untracked())
                >
                    "Restore selected"
                </button>
                <Show when=can_purge>
                    <DeleteConfirmButton
                        label="Purge selected"
                        prompt="Purged categories cannot be recovered. Continue?"
                        disabled=Signal::derive(move || checked.read().is_empty())
                        on_confirm=move |_| purge(checked.get_untracked())
                    />
                </Show>
            </div>
            <Show when=move || !loading.get() fallback=|| view! { <Spinner /> }>
                <Show
                    when=move || !items.read().is_empty()
                    fallback=|| view! { <div class="empty">"The recycle bin is empty"</div> }
                >
                    <table class="data-table">
                        <thead>
                            <tr>
                                <th></th>
                                <th>"Name"</th>
                                <th>"Path"</th>
                                <th>"Deleted at"</th>
                                <th>"Actions"</th>
                            </tr>
                        </thead>
                        <tbody>
                            <For
                                each=move || items.get()
                                key=|c| c.id
                                children=move |category| {
                                    let id = category.id;
                                    view! {
                                        <tr>
                                            <td>
                                                <input
                                                    type="checkbox"
                                                    prop:checked=move || checked.read().contains(&id)
                                                    on:change=move |ev| toggle(id, event_target_checked(&ev))
                                                />
                                            </td>
                                            <td>
                                                {category.name.clone()}
                                                <span class="tag red">"Deleted"</span>
                                            </td>
                                            <td><code>{category.path.clone()}</code></td>
                                            <td>{format_timestamp(category.deleted_at.as_deref())}</td>
                                            <td class="actions">
                                                <button class="link-btn" on:click=move |_| restore(vec![id])>
                                                    "Restore"
                                                </button>
                                                <Show when=can_purge>
                                                    <DeleteConfirmButton
                                                        label="Purge"
                                                        prompt="Cannot be undone. Purge?"
                                                        on_confirm=move |_| purge(vec![id])
                                                    />
                                                </Show>
                                            </td>
                                        </tr>
                                    }
                                }
                            />
                        </tbody>
                    </table>
                </Show>
            </Show>
        </Modal>
    }
}
