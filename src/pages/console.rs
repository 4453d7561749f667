//! Main console: category tree on the left, documents on the right.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::{use_location, use_navigate};
use leptos_router::NavigateOptions;

use crate::auth::{self, login_path_for, use_auth, AuthGate};
use crate::components::{
    ApiKeyDrawer, CategoryBreadcrumb, CategoryDetailCard, CategoryTreePanel, ChangePasswordModal, DocumentPanel,
    MaterialsDrawer, ResizableSider, Spinner, UsersDrawer,
};

/// Renders `children` only for a signed-in user; others go to sign-in or setup
#[component]
pub fn RequireAuth(children: ChildrenFn) -> impl IntoView {
    let auth = use_auth();
    let navigate = use_navigate();
    let location = use_location();
    let gate = Memo::new(move |_| auth.read().gate());

    Effect::new(move || match gate.get() {
        AuthGate::Initialize => navigate("/initialize", NavigateOptions::default()),
        AuthGate::Login => {
            let search = location.search.get_untracked();
            let search = search.trim_start_matches('?');
            let mut requested = location.pathname.get_untracked();
            if !search.is_empty() {
                requested = format!("{}?{}", requested, search);
            }
            navigate(&login_path_for(&requested), NavigateOptions::default());
        }
        AuthGate::Loading | AuthGate::Allow => {}
    });

    view! {
        <Show
            when=move || gate.get() == AuthGate::Allow
            fallback=|| view! { <div class="page-loading"><Spinner /></div> }
        >
            {children()}
        </Show>
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Overlay {
    Users,
    ApiKeys,
    Materials,
    Password,
}

#[component]
fn ConsoleHeader(overlay: RwSignal<Option<Overlay>>) -> impl IntoView {
    let auth = use_auth();
    let permissions = Memo::new(move |_| auth.read().permissions());
    let user_label = move || {
        auth.with(|a| {
            a.user
                .as_ref()
                .map(|u| format!("{} · {}", u.shown_name(), u.role.label()))
                .unwrap_or_default()
        })
    };

    let logout = move |_| {
        spawn_local(async move {
            auth::logout(auth).await;
        });
    };

    view! {
        <header class="console-header">
            <div class="brand">"YDMS"</div>
            <div class="spacer"></div>
            <Show when=move || permissions.get().manage_users>
                <button class="btn" on:click=move |_| overlay.set(Some(Overlay::Users))>"Users"</button>
            </Show>
            <Show when=move || permissions.get().manage_api_keys>
                <button class="btn" on:click=move |_| overlay.set(Some(Overlay::ApiKeys))>"API keys"</button>
            </Show>
            <button class="btn" on:click=move |_| overlay.set(Some(Overlay::Materials))>"Materials"</button>
            <span class="user-label">{user_label}</span>
            <button class="link-btn" on:click=move |_| overlay.set(Some(Overlay::Password))>"Change password"</button>
            <button class="link-btn" on:click=logout>"Sign out"</button>
        </header>
    }
}

#[component]
pub fn ConsolePage() -> impl IntoView {
    let overlay = RwSignal::new(None::<Overlay>);
    let close = Callback::new(move |_| overlay.set(None));

    view! {
        <div class="console-layout">
            <ConsoleHeader overlay=overlay />
            <div class="console-body">
                <ResizableSider>
                    <CategoryTreePanel />
                    <CategoryDetailCard />
                </ResizableSider>
                <main class="console-main">
                    <CategoryBreadcrumb />
                    <DocumentPanel />
                </main>
            </div>
            {move || match overlay.get() {
                Some(Overlay::Users) => view! { <UsersDrawer on_close=close /> }.into_any(),
                Some(Overlay::ApiKeys) => view! { <ApiKeyDrawer on_close=close /> }.into_any(),
                Some(Overlay::Materials) => view! { <MaterialsDrawer on_close=close /> }.into_any(),
                Some(Overlay::Password) => view! { <ChangePasswordModal on_close=close /> }.into_any(),
                None => ().into_any(),
            }}
        </div>
    }
}
