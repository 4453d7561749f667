//! Sign-in page

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::{use_navigate, use_query_map};
use leptos_router::NavigateOptions;

use crate::auth::{self, post_login_target, use_auth, AuthGate};
use crate::models::Credentials;

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = use_auth();
    let navigate = use_navigate();
    let query = use_query_map();
    let username = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let (error, set_error) = signal(None::<String>);
    let (submitting, set_submitting) = signal(false);

    // Signed-in users and uninitialized systems have nothing to do here
    Effect::new(move || match auth.get().gate() {
        AuthGate::Allow => {
            let target = post_login_target(query.read_untracked().get("redirect").as_deref());
            navigate(&target, NavigateOptions::default());
        }
        AuthGate::Initialize => navigate("/initialize", NavigateOptions::default()),
        AuthGate::Loading | AuthGate::Login => {}
    });

    let submit = move || {
        let credentials = Credentials {
            username: username.get_untracked().trim().to_string(),
            password: password.get_untracked(),
        };
        if credentials.username.is_empty() || credentials.password.is_empty() {
            set_error.set(Some("Enter username and password".to_string()));
            return;
        }
        set_error.set(None);
        set_submitting.set(true);
        spawn_local(async move {
            if let Err(err) = auth::login(auth, credentials).await {
                log::warn!("[AUTH] sign-in failed: {}", err);
                set_error.set(Some(err.to_string()));
            }
            set_submitting.set(false);
        });
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
                <h1>"YDMS"</h1>
                <p class="muted">"Sign in to the document console"</p>
                <label class="form-label">"Username"</label>
                <input
                    class="form-input"
                    autocomplete="username"
                    prop:value=move || username.get()
                    on:input=move |ev| username.set(event_target_value(&ev))
                />
                <label class="form-label">"Password"</label>
                <input
                    class="form-input"
                    type="password"
                    autocomplete="current-password"
                    prop:value=move || password.get()
                    on:input=move |ev| password.set(event_target_value(&ev))
                />
                {move || error.get().map(|msg| view! { <div class="form-error">{msg}</div> })}
                <button type="submit" class="btn primary block" disabled=move || submitting.get()>
                    {move || if submitting.get() { "Signing in..." } else { "Sign in" }}
                </button>
            </form>
        </div>
    }
}
