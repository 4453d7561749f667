//! Build Configuration
//!
//! Values baked in at compile time plus the local-storage keys the console uses.

/// Local-storage key holding the bearer token
pub const TOKEN_STORAGE_KEY: &str = "ydms_auth_token";

/// Local-storage keys for the category sider
pub const TREE_WIDTH_STORAGE_KEY: &str = "ydms_category_tree_width";
pub const TREE_COLLAPSED_STORAGE_KEY: &str = "ydms_category_tree_collapsed";

/// Window event dispatched when any request comes back 401
pub const UNAUTHORIZED_EVENT: &str = "auth:unauthorized";

/// Sider geometry (px)
pub const SIDER_DEFAULT_WIDTH: f64 = 320.0;
pub const SIDER_MIN_WIDTH: f64 = 240.0;
pub const SIDER_MAX_WIDTH: f64 = 640.0;
pub const SIDER_CONTENT_MIN_WIDTH: f64 = 480.0;

/// Page size used when loading the documents of a node
pub const NODE_DOCUMENTS_PAGE_SIZE: u32 = 100;

/// How long a toast stays on screen (ms)
pub const TOAST_DURATION_MS: u32 = 3000;

/// REST base URL from `YDMS_API_BASE_URL` at build time. Empty means same origin.
pub fn api_base_url() -> String {
    normalize_base_url(option_env!("YDMS_API_BASE_URL"))
}

/// Verbose `[DND]` logging for tree drops
pub fn drag_debug_enabled() -> bool {
    flag_enabled(option_env!("YDMS_DRAG_DEBUG"))
}

/// Verbose `[MENU]` logging for the tree context menu
pub fn menu_debug_enabled() -> bool {
    flag_enabled(option_env!("YDMS_MENU_DEBUG"))
}

pub fn normalize_base_url(raw: Option<&str>) -> String {
    match raw.map(str::trim) {
        Some(value) if !value.is_empty() => value.trim_end_matches('/').to_string(),
        _ => String::new(),
    }
}

fn flag_enabled(raw: Option<&str>) -> bool {
    matches!(raw.map(str::trim), Some("1") | Some("true") | Some("yes"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_base_url() {
        assert_eq!(normalize_base_url(None), "");
        assert_eq!(normalize_base_url(Some("   ")), "");
        assert_eq!(normalize_base_url(Some("http://api.local/")), "http://api.local");
        assert_eq!(normalize_base_url(Some(" http://api.local/// ")), "http://api.local");
        assert_eq!(normalize_base_url(Some("https://x.y/prefix")), "https://x.y/prefix");
    }

    #[test]
    fn test_flag_enabled() {
        assert!(flag_enabled(Some("1")));
        assert!(flag_enabled(Some("true")));
        assert!(!flag_enabled(Some("0")));
        assert!(!flag_enabled(None));
    }
}
