//! YDMS Console App
//!
//! Provides the shared context and store, then routes between the
//! sign-in pages, the console and the document editor.

use leptos::prelude::*;
use leptos_router::components::{Route, Router, Routes};
use leptos_router::hooks::use_navigate;
use leptos_router::{NavigateOptions, ParamSegment, StaticSegment};
use reactive_stores::Store;

use crate::auth::provide_auth;
use crate::components::ToastHost;
use crate::context::{use_app_context, AppContext};
use crate::pages::{ConsolePage, DocumentEditorPage, InitializePage, LoginPage, RequireAuth};
use crate::store::AppState;
use crate::toast::ToastService;

/// Follows `AppContext::navigate` requests from components outside a route
#[component]
fn NavigationBridge() -> impl IntoView {
    let ctx = use_app_context();
    let navigate = use_navigate();

    Effect::new(move || {
        if let Some(path) = ctx.pending_route.get() {
            log::debug!("[APP] navigate to {}", path);
            ctx.pending_route.set(None);
            navigate(&path, NavigateOptions::default());
        }
    });
}

#[component]
pub fn App() -> impl IntoView {
    provide_context(AppContext::new(signal(0u32), signal(0u32), signal(false)));
    provide_context(Store::new(AppState::default()));
    provide_context(ToastService::new());
    provide_auth();

    view! {
        <Router>
            <NavigationBridge />
            <Routes fallback=|| view! { <div class="not-found">"Page not found."</div> }>
                <Route path=StaticSegment("login") view=LoginPage />
                <Route path=StaticSegment("initialize") view=InitializePage />
                <Route
                    path=StaticSegment("")
                    view=|| view! { <RequireAuth><ConsolePage /></RequireAuth> }
                />
                <Route
                    path=(StaticSegment("documents"), StaticSegment("new"))
                    view=|| view! { <RequireAuth><DocumentEditorPage /></RequireAuth> }
                />
                <Route
                    path=(StaticSegment("documents"), ParamSegment("doc_id"), StaticSegment("edit"))
                    view=|| view! { <RequireAuth><DocumentEditorPage /></RequireAuth> }
                />
            </Routes>
        </Router>
        <ToastHost />
    }
}
