//! REST API
//!
//! One typed async function per backend call, grouped by resource.

pub mod apikeys;
pub mod auth;
pub mod categories;
pub mod courses;
pub mod documents;
pub mod http;
pub mod materials;
pub mod relationships;
pub mod users;

/// Versioned prefix shared by every endpoint
pub const API_PREFIX: &str = "/api/v1";
