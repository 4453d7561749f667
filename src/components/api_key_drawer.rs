//! API Key Management
//!
//! Stats, key list with revoke/delete/edit and the create flow that
//! reveals the secret once.

use chrono::Utc;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::components::{DeleteConfirmButton, Drawer, Modal, Spinner};
use crate::forms::{expiry_from_date, format_timestamp, validate_api_key_name, FieldResult};
use crate::models::{
    ApiKey, ApiKeyEnvironment, ApiKeyStats, CreateApiKeyPayload, CreateApiKeyResponse, UpdateApiKeyPayload, User,
};
use crate::toast::use_toast;

async fn copy_to_clipboard(text: String) -> bool {
    let Some(window) = web_sys::window() else { return false };
    let promise = window.navigator().clipboard().write_text(&text);
    wasm_bindgen_futures::JsFuture::from(promise).await.is_ok()
}

#[component]
fn SecretReveal(created: CreateApiKeyResponse, #[prop(into)] on_close: Callback<()>) -> impl IntoView {
    let toast = use_toast();
    let secret = created.api_key.clone();
    let copy = move |_| {
        let secret = secret.clone();
        spawn_local(async move {
            if copy_to_clipboard(secret).await {
                toast.success("Copied to clipboard");
            } else {
                toast.warning("Copy failed, select the key and copy it manually");
            }
        });
    };

    view! {
        <Modal title="API key created" on_close=on_close width=560>
            <div class="alert warning">"This is the only time the full key is shown. Store it somewhere safe."</div>
            <div class="secret-box">
                <code>{created.api_key.clone()}</code>
                <button class="btn" on:click=copy>"Copy"</button>
            </div>
            <div class="muted">{format!("Prefix: {}  ·  Name: {}", created.key_prefix, created.key_info.name)}</div>
            <div class="modal-footer">
                <button class="btn primary" on:click=move |_| on_close.run(())>"Done"</button>
            </div>
        </Modal>
    }
}

#[component]
fn CreateApiKeyModal(
    #[prop(into)] on_created: Callback<CreateApiKeyResponse>,
    #[prop(into)] on_close: Callback<()>,
) -> impl IntoView {
    let toast = use_toast();
    let (users, set_users) = signal(Vec::<User>::new());
    let name = RwSignal::new(String::new());
    let user_id = RwSignal::new(String::new());
    let environment = RwSignal::new(ApiKeyEnvironment::Dev);
    let expiry = RwSignal::new(String::new());
    let (error, set_error) = signal(None::<&'static str>);
    let (saving, set_saving) = signal(false);

    spawn_local(async move {
        match api::users::list().await {
            Ok(list) => set_users.set(list.users),
            Err(err) => toast.error(format!("Failed to load users: {}", err)),
        }
    });

    let build = move || -> FieldResult<CreateApiKeyPayload> {
        Ok(CreateApiKeyPayload {
            name: validate_api_key_name(&name.get_untracked())?,
            user_id: user_id.get_untracked().parse::<i64>().map_err(|_| "Select a user")?,
            environment: environment.get_untracked(),
            expires_at: expiry_from_date(&expiry.get_untracked(), Utc::now().date_naive())?,
        })
    };

    let submit = move |_| {
        let payload = match build() {
            Ok(p) => p,
            Err(msg) => {
                set_error.set(Some(msg));
                return;
            }
        };
        set_error.set(None);
        set_saving.set(true);
        spawn_local(async move {
            match api::apikeys::create(&payload).await {
                Ok(created) => on_created.run(created),
                Err(err) => toast.error(err.to_string()),
            }
            set_saving.set(false);
        });
    };

    view! {
        <Modal title="New API key" on_close=on_close width=480>
            <div class="form-vertical">
                <label class="form-label">"Name"</label>
                <input
                    class="form-input"
                    placeholder="e.g. import pipeline"
                    prop:value=move || name.get()
                    on:input=move |ev| name.set(event_target_value(&ev))
                />
                <label class="form-label">"Acts as user"</label>
                <select
                    class="form-select"
                    prop:value=move || user_id.get()
                    on:change=move |ev| user_id.set(event_target_value(&ev))
                >
                    <option value="">"Select a user"</option>
                    {move || {
                        users
                            .get()
                            .into_iter()
                            .map(|u| {
                                view! {
                                    <option value=u.id.to_string()>
                                        {format!("{} ({})", u.shown_name(), u.role.label())}
                                    </option>
                                }
                            })
                            .collect_view()
                    }}
                </select>
                <label class="form-label">"Environment"</label>
                <select
                    class="form-select"
                    prop:value=move || environment.get().as_str()
                    on:change=move |ev| {
                        if let Some(env) = ApiKeyEnvironment::parse(&event_target_value(&ev)) {
                            environment.set(env);
                        }
                    }
                >
                    {ApiKeyEnvironment::ALL
                        .iter()
                        .map(|e| view! { <option value=e.as_str()>{e.as_str()}</option> })
                        .collect_view()}
                </select>
                <label class="form-label">"Expires on (optional)"</label>
                <input
                    class="form-input"
                    type="date"
                    prop:value=move || expiry.get()
                    on:input=move |ev| expiry.set(event_target_value(&ev))
                />
                {move || error.get().map(|msg| view! { <div class="form-error">{msg}</div> })}
                <div class="modal-footer">
                    <button class="btn" on:click=move |_| on_close.run(())>"Cancel"</button>
                    <button class="btn primary" disabled=move || saving.get() on:click=submit>"Create"</button>
                </div>
            </div>
        </Modal>
    }
}

#[component]
fn EditApiKeyModal(api_key: ApiKey, #[prop(into)] on_saved: Callback<()>, #[prop(into)] on_close: Callback<()>) -> impl IntoView {
    let toast = use_toast();
    let key_id = api_key.id;
    let name = RwSignal::new(api_key.name.clone());
    let expiry = RwSignal::new(
        api_key.expires_at
            .as_deref()
            .and_then(|raw| raw.get(..10))
            .unwrap_or_default()
            .to_string(),
    );
    let (error, set_error) = signal(None::<&'static str>);

    let build = move || -> FieldResult<UpdateApiKeyPayload> {
        Ok(UpdateApiKeyPayload {
            name: Some(validate_api_key_name(&name.get_untracked())?),
            expires_at: Some(expiry_from_date(&expiry.get_untracked(), Utc::now().date_naive())?),
        })
    };

    let submit = move |_| {
        let payload = match build() {
            Ok(p) => p,
            Err(msg) => {
                set_error.set(Some(msg));
                return;
            }
        };
        spawn_local(async move {
            match api::apikeys::update(key_id, &payload).await {
                Ok(_) => {
                    toast.success("API key updated");
                    on_saved.run(());
                    on_close.run(());
                }
                Err(err) => toast.error(err.to_string()),
            }
        });
    };

    view! {
        <Modal title=format!("Edit {}", api_key.name) on_close=on_close width=440>
            <div class="form-vertical">
                <label class="form-label">"Name"</label>
                <input
                    class="form-input"
                    prop:value=move || name.get()
                    on:input=move |ev| name.set(event_target_value(&ev))
                />
                <label class="form-label">"Expires on (blank for never)"</label>
                <input
                    class="form-input"
                    type="date"
                    prop:value=move || expiry.get()
                    on:input=move |ev| expiry.set(event_target_value(&ev))
                />
                {move || error.get().map(|msg| view! { <div class="form-error">{msg}</div> })}
                <div class="modal-footer">
                    <button class="btn" on:click=move |_| on_close.run(())>"Cancel"</button>
                    <button class="btn primary" on:click=submit>"Save"</button>
                </div>
            </div>
        </Modal>
    }
}

#[component]
pub fn ApiKeyDrawer(#[prop(into)] on_close: Callback<()>) -> impl IntoView {
    let toast = use_toast();

    let (keys, set_keys) = signal(Vec::<ApiKey>::new());
    let (stats, set_stats) = signal(ApiKeyStats::default());
    let (loading, set_loading) = signal(true);
    let (bump, set_bump) = signal(0u32);
    let include_deleted = RwSignal::new(false);
    let show_create = RwSignal::new(false);
    let revealed = RwSignal::new(None::<CreateApiKeyResponse>);
    let editing = RwSignal::new(None::<ApiKey>);

    Effect::new(move |_| {
        let _ = bump.get();
        let with_deleted = include_deleted.get();
        set_loading.set(true);
        spawn_local(async move {
            match api::apikeys::list(None, with_deleted).await {
                Ok(list) => set_keys.set(list.api_keys),
                Err(err) => toast.error(format!("Failed to load API keys: {}", err)),
            }
            match api::apikeys::stats().await {
                Ok(s) => set_stats.set(s),
                Err(err) => log::warn!("[API] key stats unavailable: {}", err),
            }
            set_loading.set(false);
        });
    });

    let reload = move || set_bump.update(|v| *v += 1);

    let revoke = move |id: i64| {
        spawn_local(async move {
            match api::apikeys::revoke(id).await {
                Ok(_) => {
                    toast.success("API key revoked");
                    reload();
                }
                Err(err) => toast.error(err.to_string()),
            }
        });
    };

    let remove = move |id: i64| {
        spawn_local(async move {
            match api::apikeys::delete(id).await {
                Ok(()) => {
                    toast.success("API key deleted");
                    reload();
                }
                Err(err) => toast.error(err.to_string()),
            }
        });
    };

    let stat_card = move |label: &'static str, value: fn(&ApiKeyStats) -> u64, class: &'static str| {
        view! {
            <div class=format!("stat-card {}", class)>
                <div class="stat-value">{move || value(&stats.get())}</div>
                <div class="stat-label">{label}</div>
            </div>
        }
    };

    view! {
        <Drawer title="API keys" on_close=on_close width=980>
            <div class="stat-cards">
                {stat_card("Total", |s| s.total, "")}
                {stat_card("Active", |s| s.active, "status-active")}
                {stat_card("Expired", |s| s.expired, "status-expired")}
                {stat_card("Revoked", |s| s.revoked, "status-revoked")}
            </div>
            <div class="table-toolbar">
                <label>
                    <input
                        type="checkbox"
                        prop:checked=move || include_deleted.get()
                        on:change=move |ev| include_deleted.set(event_target_checked(&ev))
                    />
                    "Show revoked"
                </label>
                <div class="spacer"></div>
                <button class="btn primary" on:click=move |_| show_create.set(true)>"New API key"</button>
            </div>
            <Show when=move || !loading.get() fallback=|| view! { <Spinner /> }>
                <table class="data-table">
                    <thead>
                        <tr>
                            <th>"Name"</th>
                            <th>"Prefix"</th>
                            <th>"User"</th>
                            <th>"Status"</th>
                            <th>"Expires"</th>
                            <th>"Last used"</th>
                            <th>"Created"</th>
                            <th>"Actions"</th>
                        </tr>
                    </thead>
                    <tbody>
                        <For
                            each=move || keys.get()
                            key=|k| (k.id, k.updated_at.clone(), k.deleted_at.clone())
                            children=move |key| {
                                let id = key.id;
                                let status = key.status_at(Utc::now());
                                let owner = key
                                    .user
                                    .as_ref()
                                    .map(|u| u.display_name.clone().unwrap_or_else(|| u.username.clone()))
                                    .unwrap_or_else(|| format!("#{}", key.user_id));
                                let revoked = key.deleted_at.is_some();
                                let for_edit = key.clone();
                                view! {
                                    <tr>
                                        <td>{key.name.clone()}</td>
                                        <td><code>{key.key_prefix.clone()}</code></td>
                                        <td>{owner}</td>
                                        <td><span class=format!("tag {}", status.css_class())>{status.label()}</span></td>
                                        <td>{format_timestamp(key.expires_at.as_deref())}</td>
                                        <td>{format_timestamp(key.last_used_at.as_deref())}</td>
                                        <td>{format_timestamp(Some(key.created_at.as_str()))}</td>
                                        <td class="actions">
                                            {(!revoked)
                                                .then(|| {
                                                    let for_edit = for_edit.clone();
                                                    view! {
                                                        <button
                                                            class="link-btn"
                                                            on:click=move |_| editing.set(Some(for_edit.clone()))
                                                        >
                                                            "Edit"
                                                        </button>
                                                        <DeleteConfirmButton
                                                            label="Revoke"
                                                            prompt="Revoke this key? Clients using it stop working."
                                                            on_confirm=move |_| revoke(id)
                                                        />
                                                    }
                                                })}
                                            <DeleteConfirmButton
                                                label="Delete"
                                                prompt="Delete this key permanently?"
                                                on_confirm=move |_| remove(id)
                                            />
                                        </td>
                                    </tr>
                                }
                            }
                        />
                    </tbody>
                </table>
                <Show when=move || keys.read().is_empty()>
                    <div class="empty">"No API keys"</div>
                </Show>
            </Show>

            <Show when=move || show_create.get()>
                <CreateApiKeyModal
                    on_created=move |created: CreateApiKeyResponse| {
                        show_create.set(false);
                        revealed.set(Some(created));
                        reload();
                    }
                    on_close=move |_| show_create.set(false)
                />
            </Show>
            {move || {
                revealed
                    .get()
                    .map(|created| view! { <SecretReveal created=created on_close=move |_| revealed.set(None) /> })
            }}
            {move || {
                editing
                    .get()
                    .map(|key| {
                        view! { <EditApiKeyModal api_key=key on_saved=move |_| reload() on_close=move |_| editing.set(None) /> }
                    })
            }}
        </Drawer>
    }
}
