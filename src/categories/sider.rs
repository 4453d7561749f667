//! Resizable Tree Sider
//!
//! Width clamping and persistence for the category panel.

use crate::config::{
    SIDER_CONTENT_MIN_WIDTH, SIDER_DEFAULT_WIDTH, SIDER_MAX_WIDTH, SIDER_MIN_WIDTH, TREE_COLLAPSED_STORAGE_KEY,
    TREE_WIDTH_STORAGE_KEY,
};

/// Clamp into `[min, min(max, layout - content_min)]`, never below `min`
pub fn clamp_width(candidate: f64, layout_width: Option<f64>) -> f64 {
    let layout = layout_width.unwrap_or(SIDER_MAX_WIDTH);
    let max_allowed = SIDER_MIN_WIDTH.max(SIDER_MAX_WIDTH.min(layout - SIDER_CONTENT_MIN_WIDTH));
    candidate.max(SIDER_MIN_WIDTH).min(max_allowed).round()
}

/// Stored width, clamped to the static bounds; default on garbage
pub fn parse_width(raw: Option<&str>) -> f64 {
    raw.and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|w| w.is_finite())
        .map(|w| w.trunc().clamp(SIDER_MIN_WIDTH, SIDER_MAX_WIDTH))
        .unwrap_or(SIDER_DEFAULT_WIDTH)
}

pub fn parse_collapsed(raw: Option<&str>) -> bool {
    raw == Some("true")
}

fn storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

fn read(key: &str) -> Option<String> {
    storage()?.get_item(key).ok().flatten()
}

pub fn load_width() -> f64 {
    parse_width(read(TREE_WIDTH_STORAGE_KEY).as_deref())
}

pub fn load_collapsed() -> bool {
    parse_collapsed(read(TREE_COLLAPSED_STORAGE_KEY).as_deref())
}

pub fn save_width(width: f64) {
    if let Some(s) = storage() {
        let _ = s.set_item(TREE_WIDTH_STORAGE_KEY, &format!("{}", width as i64));
    }
}

pub fn save_collapsed(collapsed: bool) {
    if let Some(s) = storage() {
        let _ = s.set_item(TREE_COLLAPSED_STORAGE_KEY, if collapsed { "true" } else { "false" });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_width_bounds() {
        assert_eq!(clamp_width(100.0, Some(2000.0)), SIDER_MIN_WIDTH);
        assert_eq!(clamp_width(900.0, Some(2000.0)), SIDER_MAX_WIDTH);
        assert_eq!(clamp_width(300.4, Some(2000.0)), 300.0);
    }

    #[test]
    fn test_clamp_width_narrow_layout() {
        // 900 - 480 leaves 420 for the tree
        assert_eq!(clamp_width(600.0, Some(900.0)), 420.0);
        // Never below the minimum even when the layout is tiny
        assert_eq!(clamp_width(600.0, Some(500.0)), SIDER_MIN_WIDTH);
    }

    #[test]
    fn test_parse_width() {
        assert_eq!(parse_width(None), SIDER_DEFAULT_WIDTH);
        assert_eq!(parse_width(Some("abc")), SIDER_DEFAULT_WIDTH);
        assert_eq!(parse_width(Some("400")), 400.0);
        assert_eq!(parse_width(Some("10")), SIDER_MIN_WIDTH);
        assert_eq!(parse_width(Some("9999")), SIDER_MAX_WIDTH);
    }

    #[test]
    fn test_parse_collapsed() {
        assert!(parse_collapsed(Some("true")));
        assert!(!parse_collapsed(Some("false")));
        assert!(!parse_collapsed(None));
    }
}
