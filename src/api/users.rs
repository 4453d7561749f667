//! Users API
//!
//! User administration and per-course grants.

use gloo_net::http::Method;

use super::http::{request, request_json, request_json_unit, request_unit};
use super::API_PREFIX;
use crate::error::ApiResult;
use crate::models::{CreateUserPayload, GrantCoursePayload, User, UserCourses, UsersList};

fn user_path(user_id: i64) -> String {
    format!("{}/users/{}", API_PREFIX, user_id)
}

pub async fn list() -> ApiResult<UsersList> {
    request(Method::GET, &format!("{}/users", API_PREFIX)).await
}

pub async fn get(user_id: i64) -> ApiResult<User> {
    request(Method::GET, &user_path(user_id)).await
}

pub async fn create(payload: &CreateUserPayload) -> ApiResult<User> {
    request_json(Method::POST, &format!("{}/users", API_PREFIX), payload).await
}

pub async fn delete(user_id: i64) -> ApiResult<()> {
    request_unit(Method::DELETE, &user_path(user_id)).await
}

/// Root node ids the user may work on
pub async fn courses(user_id: i64) -> ApiResult<UserCourses> {
    request(Method::GET, &format!("{}/courses", user_path(user_id))).await
}

pub async fn grant_course(user_id: i64, root_node_id: i64) -> ApiResult<()> {
    let payload = GrantCoursePayload { root_node_id };
    request_json_unit(Method::POST, &format!("{}/courses", user_path(user_id)), &payload).await
}

pub async fn revoke_course(user_id: i64, root_node_id: i64) -> ApiResult<()> {
    request_unit(Method::DELETE, &format!("{}/courses/{}", user_path(user_id), root_node_id)).await
}
