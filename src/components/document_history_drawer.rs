//! Document History Drawer
//!
//! Version list with preview and restore.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::auth::use_auth;
use crate::components::{DeleteConfirmButton, Drawer, PreviewView, Spinner};
use crate::context::use_app_context;
use crate::documents::preview::render_preview;
use crate::forms::format_timestamp;
use crate::models::{DocumentContent, DocumentVersion};
use crate::toast::use_toast;

const VERSIONS_PAGE_SIZE: u32 = 20;

fn version_preview(version: &DocumentVersion) -> impl IntoView {
    let body = version
        .content
        .clone()
        .and_then(|v| serde_json::from_value::<DocumentContent>(v).ok());
    let result = render_preview(
        body.as_ref().map(|c| c.data.as_str()).unwrap_or_default(),
        version.doc_type.as_deref(),
    );
    view! { <PreviewView result=result /> }
}

#[component]
pub fn DocumentHistoryDrawer(doc_id: i64, #[prop(into)] on_close: Callback<()>) -> impl IntoView {
    let ctx = use_app_context();
    let auth = use_auth();
    let toast = use_toast();

    let page = RwSignal::new(1u32);
    let (versions, set_versions) = signal(Vec::<DocumentVersion>::new());
    let (total, set_total) = signal(0u64);
    let (loading, set_loading) = signal(true);
    let previewing = RwSignal::new(None::<i64>);
    let (version_bump, set_version_bump) = signal(0u32);

    Effect::new(move |_| {
        let _ = version_bump.get();
        let current = page.get();
        set_loading.set(true);
        spawn_local(async move {
            match api::documents::versions(doc_id, Some(current), Some(VERSIONS_PAGE_SIZE)).await {
                Ok(resp) => {
                    set_total.set(resp.total);
                    set_versions.set(resp.versions);
                }
                Err(err) => toast.error(format!("Failed to load history: {}", err)),
            }
            set_loading.set(false);
        });
    });

    let restore = move |number: i64| {
        spawn_local(async move {
            match api::documents::restore_version(doc_id, number).await {
                Ok(_) => {
                    toast.success(format!("Restored version {}", number));
                    set_version_bump.update(|v| *v += 1);
                    ctx.reload_documents();
                }
                Err(err) => toast.error(err.to_string()),
            }
        });
    };

    let page_count = move || (total.get().max(1) + VERSIONS_PAGE_SIZE as u64 - 1) / VERSIONS_PAGE_SIZE as u64;

    view! {
        <Drawer title=format!("History of document #{}", doc_id) on_close=on_close>
            <Show when=move || !loading.get() fallback=|| view! { <Spinner /> }>
                <Show
                    when=move || !versions.read().is_empty()
                    fallback=|| view! { <div class="empty">"No versions recorded"</div> }
                >
                    <ul class="version-list">
                        <For
                            each=move || versions.get()
                            key=|v| v.version_number
                            children=move |version| {
                                let number = version.version_number;
                                let detail = version.clone();
                                view! {
                                    <li class="version-row">
                                        <div class="version-head">
                                            <strong>{format!("v{}", number)}</strong>
                                            <span>{version.title.clone()}</span>
                                            <span class="muted">{version.created_by.clone()}</span>
                                            <span class="muted">{format_timestamp(Some(version.created_at.as_str()))}</span>
                                        </div>
                                        {version
                                            .change_message
                                            .clone()
                                            .map(|m| view! { <div class="version-message">{m}</div> })}
                                        <div class="actions">
                                            <button
                                                class="link-btn"
                                                on:click=move |_| {
                                                    previewing.update(|p| {
                                                        *p = if *p == Some(number) { None } else { Some(number) };
                                                    })
                                                }
                                            >
                                                {move || if previewing.get() == Some(number) { "Hide" } else { "Preview" }}
                                            </button>
                                            <Show when=move || auth.get().permissions().restore_versions>
                                                <DeleteConfirmButton
                                                    label="Restore"
                                                    prompt="Replace the current content with this version?"
                                                    on_confirm=move |_| restore(number)
                                                />
                                            </Show>
                                        </div>
                                        <Show when=move || previewing.get() == Some(number)>
                                            {version_preview(&detail)}
                                        </Show>
                                    </li>
                                }
                            }
                        />
                    </ul>
                    <div class="pager">
                        <button
                            class="btn"
                            disabled=move || page.get() <= 1
                            on:click=move |_| page.update(|p| *p = p.saturating_sub(1).max(1))
                        >
                            "Previous"
                        </button>
                        <span>{move || format!("Page {} / {}", page.get(), page_count())}</span>
                        <button
                            class="btn"
                            disabled=move || u64::from(page.get()) >= page_count()
                            on:click=move |_| page.update(|p| *p += 1)
                        >
                            "Next"
                        </button>
                    </div>
                </Show>
            </Show>
        </Drawer>
    }
}
