//! Change Password Modal

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::components::Modal;
use crate::forms::validate_password_pair;
use crate::models::ChangePasswordPayload;
use crate::toast::use_toast;

#[component]
pub fn ChangePasswordModal(#[prop(into)] on_close: Callback<()>) -> impl IntoView {
    let toast = use_toast();
    let old_password = RwSignal::new(String::new());
    let new_password = RwSignal::new(String::new());
    let confirm = RwSignal::new(String::new());
    let (error, set_error) = signal(None::<&'static str>);
    let (saving, set_saving) = signal(false);

    let submit = move || {
        let old = old_password.get_untracked();
        if old.is_empty() {
            set_error.set(Some("Enter the current password"));
            return;
        }
        let new = match validate_password_pair(&new_password.get_untracked(), &confirm.get_untracked()) {
            Ok(p) => p,
            Err(msg) => {
                set_error.set(Some(msg));
                return;
            }
        };
        set_error.set(None);
        set_saving.set(true);
        spawn_local(async move {
            let payload = ChangePasswordPayload {
                old_password: old,
                new_password: new,
            };
            match api::auth::change_password(&payload).await {
                Ok(()) => {
                    toast.success("Password changed");
                    on_close.run(());
                }
                Err(err) => toast.error(err.to_string()),
            }
            set_saving.set(false);
        });
    };

    let field = move |label: &'static str, value: RwSignal<String>| {
        view! {
            <label class="form-label">{label}</label>
            <input
                class="form-input"
                type="password"
                prop:value=move || value.get()
                on:input=move |ev| value.set(event_target_value(&ev))
            />
        }
    };

    view! {
        <Modal title="Change password" on_close=on_close width=420>
            <form
                class="form-vertical"
                on:submit=move |ev| {
                    ev.prevent_default();
                    submit();
                }
            >
                {field("Current password", old_password)}
                {field("New password", new_password)}
                {field("Confirm new password", confirm)}
                {move || error.get().map(|msg| view! { <div class="form-error">{msg}</div> })}
                <div class="modal-footer">
                    <button type="button" class="btn" on:click=move |_| on_close.run(())>"Cancel"</button>
                    <button type="submit" class="btn primary" disabled=move || saving.get()>"Change"</button>
                </div>
            </form>
        </Modal>
    }
}
