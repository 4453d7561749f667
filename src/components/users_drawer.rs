//! User Management
//!
//! User list with create/delete, course grants and the course catalogue.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::auth::use_auth;
use crate::components::{DeleteConfirmButton, Drawer, Modal, Spinner, UserPermissionsModal};
use crate::forms::{
    format_timestamp, validate_display_name, validate_password_pair, validate_username, FieldResult,
};
use crate::models::{Course, CreateCoursePayload, CreateUserPayload, User, UserRole};
use crate::permissions::{can_delete_user, can_manage_course_grants};
use crate::toast::use_toast;

#[component]
fn CreateUserModal(#[prop(into)] on_created: Callback<()>, #[prop(into)] on_close: Callback<()>) -> impl IntoView {
    let toast = use_toast();
    let username = RwSignal::new(String::new());
    let display_name = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let confirm = RwSignal::new(String::new());
    let role = RwSignal::new(UserRole::Proofreader);
    let (error, set_error) = signal(None::<&'static str>);
    let (saving, set_saving) = signal(false);

    let build = move || -> FieldResult<CreateUserPayload> {
        Ok(CreateUserPayload {
            username: validate_username(&username.get_untracked())?,
            password: validate_password_pair(&password.get_untracked(), &confirm.get_untracked())?,
            role: role.get_untracked(),
            display_name: validate_display_name(&display_name.get_untracked())?,
        })
    };

    let submit = move || {
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
            match api::users::create(&payload).await {
                Ok(user) => {
                    toast.success(format!("Created user {}", user.username));
                    on_created.run(());
                    on_close.run(());
                }
                Err(err) => toast.error(err.to_string()),
            }
            set_saving.set(false);
        });
    };

    let text_field = move |label: &'static str, kind: &'static str, value: RwSignal<String>| {
        view! {
            <label class="form-label">{label}</label>
            <input
                class="form-input"
                type=kind
                prop:value=move || value.get()
                on:input=move |ev| value.set(event_target_value(&ev))
            />
        }
    };

    view! {
        <Modal title="New user" on_close=on_close width=460>
            <form
                class="form-vertical"
                on:submit=move |ev| {
                    ev.prevent_default();
                    submit();
                }
            >
                {text_field("Username", "text", username)}
                {text_field("Display name", "text", display_name)}
                {text_field("Password", "password", password)}
                {text_field("Confirm password", "password", confirm)}
                <label class="form-label">"Role"</label>
                <select
                    class="form-select"
                    prop:value=move || role.get().as_str()
                    on:change=move |ev| {
                        if let Some(next) = UserRole::parse(&event_target_value(&ev)) {
                            role.set(next);
                        }
                    }
                >
                    {UserRole::ALL
                        .iter()
                        .map(|r| view! { <option value=r.as_str()>{r.label()}</option> })
                        .collect_view()}
                </select>
                {move || error.get().map(|msg| view! { <div class="form-error">{msg}</div> })}
                <div class="modal-footer">
                    <button type="button" class="btn" on:click=move |_| on_close.run(())>"Cancel"</button>
                    <button type="submit" class="btn primary" disabled=move || saving.get()>"Create"</button>
                </div>
            </form>
        </Modal>
    }
}

/// Course catalogue
#[component]
fn CoursesSection() -> impl IntoView {
    let toast = use_toast();
    let (courses, set_courses) = signal(Vec::<Course>::new());
    let (bump, set_bump) = signal(0u32);
    let name = RwSignal::new(String::new());
    let slug = RwSignal::new(String::new());

    Effect::new(move |_| {
        let _ = bump.get();
        spawn_local(async move {
            match api::courses::list().await {
                Ok(list) => set_courses.set(list.courses),
                Err(err) => toast.error(format!("Failed to load courses: {}", err)),
            }
        });
    });

    let create = move |_| {
        let course_name = name.get_untracked().trim().to_string();
        if course_name.is_empty() {
            toast.warning("Course name is required");
            return;
        }
        let course_slug = slug.get_untracked().trim().to_string();
        let payload = CreateCoursePayload {
            name: course_name,
            slug: (!course_slug.is_empty()).then_some(course_slug),
        };
        spawn_local(async move {
            match api::courses::create(&payload).await {
                Ok(course) => {
                    toast.success(format!("Course \"{}\" created", course.name));
                    name.set(String::new());
                    slug.set(String::new());
                    set_bump.update(|v| *v += 1);
                }
                Err(err) => toast.error(err.to_string()),
            }
        });
    };

    let remove = move |id: i64| {
        spawn_local(async move {
            match api::courses::delete(id).await {
                Ok(()) => {
                    toast.success("Course deleted");
                    set_bump.update(|v| *v += 1);
                }
                Err(err) => toast.error(err.to_string()),
            }
        });
    };

    view! {
        <section class="drawer-section">
            <h4>"Courses"</h4>
            <div class="inline-form">
                <input
                    class="form-input"
                    placeholder="Course name"
                    prop:value=move || name.get()
                    on:input=move |ev| name.set(event_target_value(&ev))
                />
                <input
                    class="form-input narrow"
                    placeholder="Slug (optional)"
                    prop:value=move || slug.get()
                    on:input=move |ev| slug.set(event_target_value(&ev))
                />
                <button class="btn" on:click=create>"Add course"</button>
            </div>
            <table class="data-table">
                <tbody>
                    <For
                        each=move || courses.get()
                        key=|c| c.id
                        children=move |course| {
                            let id = course.id;
                            view! {
                                <tr>
                                    <td>{id}</td>
                                    <td>{course.name.clone()}</td>
                                    <td><code>{course.slug.clone().unwrap_or_default()}</code></td>
                                    <td class="actions">
                                        <DeleteConfirmButton label="Delete" on_confirm=move |_| remove(id) />
                                    </td>
                                </tr>
                            }
                        }
                    />
                </tbody>
            </table>
        </section>
    }
}

#[component]
pub fn UsersDrawer(#[prop(into)] on_close: Callback<()>) -> impl IntoView {
    let auth = use_auth();
    let toast = use_toast();

    let (users, set_users) = signal(Vec::<User>::new());
    let (loading, set_loading) = signal(true);
    let (bump, set_bump) = signal(0u32);
    let show_create = RwSignal::new(false);
    let granting = RwSignal::new(None::<User>);

    Effect::new(move |_| {
        let _ = bump.get();
        set_loading.set(true);
        spawn_local(async move {
            match api::users::list().await {
                Ok(list) => set_users.set(list.users),
                Err(err) => toast.error(format!("Failed to load users: {}", err)),
            }
            set_loading.set(false);
        });
    });

    let reload = move || set_bump.update(|v| *v += 1);

    let delete_user = move |id: i64| {
        spawn_local(async move {
            match api::users::delete(id).await {
                Ok(()) => {
                    toast.success("User deleted");
                    reload();
                }
                Err(err) => toast.error(err.to_string()),
            }
        });
    };

    view! {
        <Drawer title="Users" on_close=on_close width=860>
            <div class="table-toolbar">
                <span class="muted">{move || format!("{} user(s)", users.read().len())}</span>
                <div class="spacer"></div>
                <button class="btn primary" on:click=move |_| show_create.set(true)>"New user"</button>
            </div>
            <Show when=move || !loading.get() fallback=|| view! { <Spinner /> }>
                <table class="data-table">
                    <thead>
                        <tr>
                            <th>"ID"</th>
                            <th>"Username"</th>
                            <th>"Display name"</th>
                            <th>"Role"</th>
                            <th>"Created"</th>
                            <th>"Actions"</th>
                        </tr>
                    </thead>
                    <tbody>
                        <For
                            each=move || users.get()
                            key=|u| (u.id, u.role, u.display_name.clone())
                            children=move |user| {
                                let id = user.id;
                                let row = user.clone();
                                let row_for_delete = user.clone();
                                let can_grant = move || {
                                    auth.with(|a| can_manage_course_grants(a.user.as_ref(), &row))
                                };
                                let can_delete = move || {
                                    auth.with(|a| can_delete_user(a.user.as_ref(), &row_for_delete))
                                };
                                let for_grant = user.clone();
                                view! {
                                    <tr>
                                        <td>{id}</td>
                                        <td>{user.username.clone()}</td>
                                        <td>{user.display_name.clone().unwrap_or_else(|| "-".to_string())}</td>
                                        <td>
                                            <span class="tag" style=format!("color: {};", user.role.color())>
                                                {user.role.label()}
                                            </span>
                                        </td>
                                        <td>{format_timestamp(Some(user.created_at.as_str()))}</td>
                                        <td class="actions">
                                            <Show when=can_grant.clone()>
                                                <button
                                                    class="link-btn"
                                                    on:click={
                                                        let for_grant = for_grant.clone();
                                                        move |_| granting.set(Some(for_grant.clone()))
                                                    }
                                                >
                                                    "Course permissions"
                                                </button>
                                            </Show>
                                            <Show when=can_delete.clone()>
                                                <DeleteConfirmButton
                                                    label="Delete"
                                                    prompt="Delete this user?"
                                                    on_confirm=move |_| delete_user(id)
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
            <Show when=move || auth.get().permissions().manage_courses>
                <CoursesSection />
            </Show>

            <Show when=move || show_create.get()>
                <CreateUserModal on_created=move |_| reload() on_close=move |_| show_create.set(false) />
            </Show>
            {move || {
                granting
                    .get()
                    .map(|user| view! { <UserPermissionsModal user=user on_close=move |_| granting.set(None) /> })
            }}
        </Drawer>
    }
}
