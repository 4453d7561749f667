//! Document Recycle Bin
//!
//! Paged list of deleted documents with restore and purge.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::auth::use_auth;
use crate::components::{DeleteConfirmButton, Drawer, Spinner};
use crate::context::use_app_context;
use crate::documents::templates::type_label;
use crate::forms::format_timestamp;
use crate::models::Document;
use crate::toast::use_toast;

const TRASH_PAGE_SIZE: u32 = 20;

#[component]
pub fn DocumentTrashDrawer(#[prop(into)] on_close: Callback<()>) -> impl IntoView {
    let ctx = use_app_context();
    let auth = use_auth();
    let toast = use_toast();

    let page = RwSignal::new(1u32);
    let search = RwSignal::new(String::new());
    let applied_search = RwSignal::new(String::new());
    let (items, set_items) = signal(Vec::<Document>::new());
    let (total, set_total) = signal(0u64);
    let (loading, set_loading) = signal(true);
    let (bump, set_bump) = signal(0u32);

    Effect::new(move |_| {
        let _ = bump.get();
        let current = page.get();
        let query = applied_search.get();
        set_loading.set(true);
        spawn_local(async move {
            let query = query.trim();
            let query = (!query.is_empty()).then_some(query);
            match api::documents::trash(Some(current), Some(TRASH_PAGE_SIZE), query).await {
                Ok(resp) => {
                    set_total.set(resp.total);
                    set_items.set(resp.items);
                }
                Err(err) => toast.error(format!("Failed to load the recycle bin: {}", err)),
            }
            set_loading.set(false);
        });
    });

    let refresh = move |message: String| {
        toast.success(message);
        set_bump.update(|v| *v += 1);
        ctx.reload_documents();
    };

    let restore = move |id: i64| {
        spawn_local(async move {
            match api::documents::restore(id).await {
                Ok(doc) => refresh(format!("Restored \"{}\"", doc.title)),
                Err(err) => toast.error(err.to_string()),
            }
        });
    };

    let purge = move |id: i64| {
        spawn_local(async move {
            match api::documents::purge(id).await {
                Ok(()) => refresh("Permanently deleted".to_string()),
                Err(err) => toast.error(err.to_string()),
            }
        });
    };

    let page_count = move || (total.get().max(1) + TRASH_PAGE_SIZE as u64 - 1) / TRASH_PAGE_SIZE as u64;

    view! {
        <Drawer title="Document recycle bin" on_close=on_close>
            <form
                class="filter-form"
                on:submit=move |ev| {
                    ev.prevent_default();
                    page.set(1);
                    applied_search.set(search.get_untracked());
                }
            >
                <input
                    class="form-input"
                    placeholder="Search deleted documents"
                    prop:value=move || search.get()
                    on:input=move |ev| search.set(event_target_value(&ev))
                />
                <button type="submit" class="btn">"Search"</button>
            </form>
            <Show when=move || !loading.get() fallback=|| view! { <Spinner /> }>
                <table class="data-table">
                    <thead>
                        <tr>
                            <th>"ID"</th>
                            <th>"Title"</th>
                            <th>"Type"</th>
                            <th>"Deleted at"</th>
                            <th>"Actions"</th>
                        </tr>
                    </thead>
                    <tbody>
                        <For
                            each=move || items.get()
                            key=|d| d.id
                            children=move |doc| {
                                let id = doc.id;
                                view! {
                                    <tr>
                                        <td>{id}</td>
                                        <td>{doc.title.clone()}</td>
                                        <td>{type_label(doc.type_name()).to_string()}</td>
                                        <td>{format_timestamp(doc.deleted_at.as_deref())}</td>
                                        <td class="actions">
                                            <button class="link-btn" on:click=move |_| restore(id)>"Restore"</button>
                                            <Show when=move || auth.get().permissions().purge>
                                                <DeleteConfirmButton
                                                    label="Purge"
                                                    prompt="Cannot be undone. Purge?"
                                                    on_confirm=move |_| purge(id)
                                                />
                                            </Show>
                                        </td>
                                    </tr>
                                }
                            }
                        />
                    </tbody>
                </table>
                <Show when=move || items.read().is_empty()>
                    <div class="empty">"The recycle bin is empty"</div>
                </Show>
                <div class="pager">
                    <button
                        class="btn"
                        disabled=move || page.get() <= 1
                        on:click=move |_| page.update(|p| *p = p.saturating_sub(1).max(1))
                    >
                        "Previous"
                    </button>
                    <span>{move || format!("Page {} / {} ({} total)", page.get(), page_count(), total.get())}</span>
                    <button
                        class="btn"
                        disabled=move || u64::from(page.get()) >= page_count()
                        on:click=move |_| page.update(|p| *p += 1)
                    >
                        "Next"
                    </button>
                </div>
            </Show>
        </Drawer>
    }
}
