//! Course Permissions Modal
//!
//! Grant or revoke root categories (courses) for one user.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::components::{Modal, Spinner};
use crate::error::ApiResult;
use crate::models::{Category, User};
use crate::permissions::course_grant_diff;
use crate::toast::use_toast;

async fn apply_grants(user_id: i64, grant: Vec<i64>, revoke: Vec<i64>) -> ApiResult<()> {
    for root in grant {
        api::users::grant_course(user_id, root).await?;
    }
    for root in revoke {
        api::users::revoke_course(user_id, root).await?;
    }
    Ok(())
}

#[component]
pub fn UserPermissionsModal(user: User, #[prop(into)] on_close: Callback<()>) -> impl IntoView {
    let toast = use_toast();
    let user_id = user.id;

    let (roots, set_roots) = signal(Vec::<Category>::new());
    let (current, set_current) = signal(Vec::<i64>::new());
    let checked = RwSignal::new(Vec::<i64>::new());
    let (loading, set_loading) = signal(true);
    let (saving, set_saving) = signal(false);

    spawn_local(async move {
        let tree = api::categories::tree(false).await;
        let granted = api::users::courses(user_id).await;
        match (tree, granted) {
            (Ok(tree), Ok(granted)) => {
                set_roots.set(tree);
                checked.set(granted.course_ids.clone());
                set_current.set(granted.course_ids);
            }
            (Err(err), _) | (_, Err(err)) => toast.error(format!("Failed to load course permissions: {}", err)),
        }
        set_loading.set(false);
    });

    let save = move |_| {
        let (grant, revoke) = course_grant_diff(&current.get_untracked(), &checked.get_untracked());
        if grant.is_empty() && revoke.is_empty() {
            on_close.run(());
            return;
        }
        set_saving.set(true);
        spawn_local(async move {
            match apply_grants(user_id, grant, revoke).await {
                Ok(()) => {
                    toast.success("Course permissions updated");
                    on_close.run(());
                }
                Err(err) => toast.error(err.to_string()),
            }
            set_saving.set(false);
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
        <Modal title=format!("Course permissions: {}", user.shown_name()) on_close=on_close width=480>
            <Show when=move || !loading.get() fallback=|| view! { <Spinner /> }>
                <ul class="checkbox-list">
                    {move || {
                        roots
                            .get()
                            .into_iter()
                            .map(|root| {
                                let id = root.id;
                                view! {
                                    <li>
                                        <label>
                                            <input
                                                type="checkbox"
                                                prop:checked=move || checked.read().contains(&id)
                                                on:change=move |ev| toggle(id, event_target_checked(&ev))
                                            />
                                            {root.name}
                                        </label>
                                    </li>
                                }
                            })
                            .collect_view()
                    }}
                </ul>
                <Show when=move || roots.read().is_empty()>
                    <div class="empty">"No courses yet"</div>
                </Show>
            </Show>
            <div class="modal-footer">
                <button class="btn" on:click=move |_| on_close.run(())>"Cancel"</button>
                <button class="btn primary" disabled=move || saving.get() || loading.get() on:click=save>
                    "Save"
                </button>
            </div>
        </Modal>
    }
}
