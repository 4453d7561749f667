//! Auth API
//!
//! Login, session and first-run setup endpoints.

use gloo_net::http::Method;

use super::http::{request, request_json, request_json_unit, request_unit};
use super::API_PREFIX;
use crate::error::ApiResult;
use crate::models::{ChangePasswordPayload, Credentials, InitStatus, LoginResponse, User};

pub async fn login(credentials: &Credentials) -> ApiResult<LoginResponse> {
    request_json(Method::POST, &format!("{}/auth/login", API_PREFIX), credentials).await
}

pub async fn logout() -> ApiResult<()> {
    request_unit(Method::POST, &format!("{}/auth/logout", API_PREFIX)).await
}

pub async fn current_user() -> ApiResult<User> {
    request(Method::GET, &format!("{}/auth/me", API_PREFIX)).await
}

pub async fn change_password(payload: &ChangePasswordPayload) -> ApiResult<()> {
    request_json_unit(Method::POST, &format!("{}/auth/change-password", API_PREFIX), payload).await
}

/// Whether the first super admin has been created
pub async fn init_status() -> ApiResult<InitStatus> {
    request(Method::GET, &format!("{}/init/status", API_PREFIX)).await
}

/// Create the first super admin; logs in on success
pub async fn initialize(credentials: &Credentials) -> ApiResult<LoginResponse> {
    request_json(Method::POST, &format!("{}/init/setup", API_PREFIX), credentials).await
}
