//! First-run setup: create the super admin

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;
use leptos_router::NavigateOptions;

use crate::auth::{self, use_auth, AuthGate};
use crate::forms::{validate_password_pair, validate_username, FieldResult};
use crate::models::Credentials;

#[component]
pub fn InitializePage() -> impl IntoView {
    let auth = use_auth();
    let navigate = use_navigate();
    let username = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let confirm = RwSignal::new(String::new());
    let (error, set_error) = signal(None::<String>);
    let (submitting, set_submitting) = signal(false);

    Effect::new(move || {
        let state = auth.get();
        if state.loading {
            return;
        }
        match state.gate() {
            AuthGate::Allow => navigate("/", NavigateOptions::default()),
            AuthGate::Login => navigate("/login", NavigateOptions::default()),
            AuthGate::Loading | AuthGate::Initialize => {}
        }
    });

    let build = move || -> FieldResult<Credentials> {
        Ok(Credentials {
            username: validate_username(&username.get_untracked())?,
            password: validate_password_pair(&password.get_untracked(), &confirm.get_untracked())?,
        })
    };

    let submit = move || {
        let credentials = match build() {
            Ok(c) => c,
            Err(msg) => {
                set_error.set(Some(msg.to_string()));
                return;
            }
        };
        set_error.set(None);
        set_submitting.set(true);
        spawn_local(async move {
            match auth::initialize(auth, credentials).await {
                Ok(()) => log::info!("[AUTH] system initialized"),
                Err(err) => set_error.set(Some(err.to_string())),
            }
            set_submitting.set(false);
        });
    };

    let field = move |label: &'static str, kind: &'static str, value: RwSignal<String>| {
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
        <div class="auth-page">
            <form
                class="auth-card"
                on:submit=move |ev| {
                    ev.prevent_default();
                    submit();
                }
            >
                <h1>"Set up YDMS"</h1>
                <p class="muted">"Create the super administrator account"</p>
                {field("Username", "text", username)}
                {field("Password", "password", password)}
                {field("Confirm password", "password", confirm)}
                {move || error.get().map(|msg| view! { <div class="form-error">{msg}</div> })}
                <button type="submit" class="btn primary block" disabled=move || submitting.get()>
                    "Create and sign in"
                </button>
            </form>
        </div>
    }
}
