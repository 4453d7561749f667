//! Courses API

use gloo_net::http::Method;

use super::http::{request, request_json, request_unit};
use super::API_PREFIX;
use crate::error::ApiResult;
use crate::models::{Course, CoursesList, CreateCoursePayload};

/// Courses visible to the current user
pub async fn list() -> ApiResult<CoursesList> {
    request(Method::GET, &format!("{}/courses", API_PREFIX)).await
}

pub async fn create(payload: &CreateCoursePayload) -> ApiResult<Course> {
    request_json(Method::POST, &format!("{}/courses", API_PREFIX), payload).await
}

pub async fn delete(course_id: i64) -> ApiResult<()> {
    request_unit(Method::DELETE, &format!("{}/courses/{}", API_PREFIX, course_id)).await
}
