//! Authentication State
//!
//! Current user and token, provided as `RwSignal<AuthState>`.
//! The token lives in local storage; any 401 clears it through the
//! window-level unauthorized event.

use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

use crate::api;
use crate::api::http::{clear_token, form_encode, load_token, store_token};
use crate::config::UNAUTHORIZED_EVENT;
use crate::error::ApiResult;
use crate::models::{Credentials, LoginResponse, User};
use crate::permissions::Permissions;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuthState {
    pub user: Option<User>,
    pub token: Option<String>,
    /// Startup checks still running
    pub loading: bool,
    /// Whether the system has a super admin; `None` when the check failed
    pub initialized: Option<bool>,
}

/// What a protected page should do right now
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthGate {
    Loading,
    Initialize,
    Login,
    Allow,
}

impl AuthState {
    pub fn starting(token: Option<String>) -> Self {
        Self {
            user: None,
            token,
            loading: true,
            initialized: None,
        }
    }

    pub fn signed_in(&mut self, response: LoginResponse) {
        self.token = Some(response.token);
        self.user = Some(response.user);
        self.loading = false;
    }

    pub fn signed_out(&mut self) {
        self.token = None;
        self.user = None;
    }

    /// A loaded user always passes; setup is only forced when the server said so
    pub fn gate(&self) -> AuthGate {
        if self.loading {
            AuthGate::Loading
        } else if self.user.is_some() {
            AuthGate::Allow
        } else if self.initialized == Some(false) {
            AuthGate::Initialize
        } else {
            AuthGate::Login
        }
    }

    pub fn permissions(&self) -> Permissions {
        Permissions::for_user(self.user.as_ref())
    }
}

/// Sign-in page URL that remembers the route the user asked for
pub fn login_path_for(requested: &str) -> String {
    if requested.is_empty() || requested == "/" {
        "/login".to_string()
    } else {
        format!("/login?redirect={}", form_encode(requested))
    }
}

/// Where to land after sign-in: an in-app path other than the auth pages, else `/`
pub fn post_login_target(requested: Option<&str>) -> String {
    let Some(path) = requested.map(str::trim) else {
        return "/".to_string();
    };
    let route = path.split(['?', '#']).next().unwrap_or_default();
    let in_app = path.starts_with('/') && !path.starts_with("//");
    if in_app && route != "/login" && route != "/initialize" {
        path.to_string()
    } else {
        "/".to_string()
    }
}

pub fn use_auth() -> RwSignal<AuthState> {
    expect_context::<RwSignal<AuthState>>()
}

/// Create the auth signal, run the startup checks and listen for 401s
pub fn provide_auth() -> RwSignal<AuthState> {
    let auth = RwSignal::new(AuthState::starting(load_token()));
    provide_context(auth);
    bind_unauthorized_listener(auth);
    spawn_local(bootstrap(auth));
    auth
}

async fn bootstrap(auth: RwSignal<AuthState>) {
    let initialized = match api::auth::init_status().await {
        Ok(status) => Some(status.initialized),
        Err(err) => {
            log::error!("[AUTH] init status check failed: {}", err);
            None
        }
    };
    auth.update(|s| s.initialized = initialized);

    if auth.get_untracked().token.is_some() {
        match api::auth::current_user().await {
            Ok(user) => auth.update(|s| s.user = Some(user)),
            Err(err) => {
                log::warn!("[AUTH] stored token rejected: {}", err);
                clear_token();
                auth.update(AuthState::signed_out);
            }
        }
    }
    auth.update(|s| s.loading = false);
}

fn bind_unauthorized_listener(auth: RwSignal<AuthState>) {
    let on_unauthorized = Closure::<dyn FnMut(web_sys::Event)>::new(move |_ev: web_sys::Event| {
        log::info!("[AUTH] session expired");
        auth.update(AuthState::signed_out);
    });
    if let Some(win) = web_sys::window() {
        let _ = win.add_event_listener_with_callback(UNAUTHORIZED_EVENT, on_unauthorized.as_ref().unchecked_ref());
    }
    on_unauthorized.forget();
}

pub async fn login(auth: RwSignal<AuthState>, credentials: Credentials) -> ApiResult<()> {
    let response = api::auth::login(&credentials).await?;
    store_token(&response.token);
    log::info!("[AUTH] signed in as {}", response.user.username);
    auth.update(|s| s.signed_in(response));
    Ok(())
}

/// Create the first super admin and sign in as it
pub async fn initialize(auth: RwSignal<AuthState>, credentials: Credentials) -> ApiResult<()> {
    let response = api::auth::initialize(&credentials).await?;
    store_token(&response.token);
    auth.update(|s| {
        s.signed_in(response);
        s.initialized = Some(true);
    });
    Ok(())
}

/// Server logout is best-effort; local state is always cleared
pub async fn logout(auth: RwSignal<AuthState>) {
    if let Err(err) = api::auth::logout().await {
        log::warn!("[AUTH] logout request failed: {}", err);
    }
    clear_token();
    auth.update(AuthState::signed_out);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserRole;

    fn make_user(role: UserRole) -> User {
        User {
            id: 1,
            username: "root".to_string(),
            display_name: None,
            role,
            created_at: String::new(),
        }
    }

    #[test]
    fn test_gate_order() {
        let mut state = AuthState::starting(None);
        assert_eq!(state.gate(), AuthGate::Loading);

        state.loading = false;
        state.initialized = Some(false);
        assert_eq!(state.gate(), AuthGate::Initialize);

        state.initialized = Some(true);
        assert_eq!(state.gate(), AuthGate::Login);

        state.signed_in(LoginResponse {
            token: "t".to_string(),
            user: make_user(UserRole::Proofreader),
        });
        assert_eq!(state.gate(), AuthGate::Allow);
        assert_eq!(state.token.as_deref(), Some("t"));
    }

    #[test]
    fn test_failed_init_check_never_forces_setup() {
        let mut state = AuthState {
            user: Some(make_user(UserRole::CourseAdmin)),
            token: Some("t".to_string()),
            loading: false,
            initialized: None,
        };
        assert_eq!(state.gate(), AuthGate::Allow);

        state.signed_out();
        assert_eq!(state.gate(), AuthGate::Login);
    }

    #[test]
    fn test_loaded_user_wins_over_uninitialized_flag() {
        let state = AuthState {
            user: Some(make_user(UserRole::Proofreader)),
            token: Some("t".to_string()),
            loading: false,
            initialized: Some(false),
        };
        assert_eq!(state.gate(), AuthGate::Allow);
    }

    #[test]
    fn test_login_redirect_round_trip() {
        assert_eq!(login_path_for("/"), "/login");
        assert_eq!(login_path_for("/documents/5/edit"), "/login?redirect=%2Fdocuments%2F5%2Fedit");

        assert_eq!(post_login_target(Some("/documents/5/edit")), "/documents/5/edit");
        assert_eq!(post_login_target(Some("/documents/new?node_id=3")), "/documents/new?node_id=3");
        assert_eq!(post_login_target(None), "/");
    }

    #[test]
    fn test_post_login_target_rejects_foreign_and_auth_routes() {
        assert_eq!(post_login_target(Some("https://evil.example")), "/");
        assert_eq!(post_login_target(Some("//evil.example/x")), "/");
        assert_eq!(post_login_target(Some("/login")), "/");
        assert_eq!(post_login_target(Some("/initialize?x=1")), "/");
        assert_eq!(post_login_target(Some("")), "/");
    }

    #[test]
    fn test_signed_out_keeps_initialized() {
        let mut state = AuthState {
            user: Some(make_user(UserRole::SuperAdmin)),
            token: Some("t".to_string()),
            loading: false,
            initialized: Some(true),
        };
        assert!(state.permissions().manage_users);
        state.signed_out();
        assert_eq!(state.gate(), AuthGate::Login);
        assert_eq!(state.permissions(), Permissions::NONE);
    }
}
