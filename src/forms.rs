//! Form Rules
//!
//! Input validation shared by the modals, plus timestamp display.
//! Each validator returns the cleaned value or the message to show.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

pub const CATEGORY_NAME_MAX: usize = 50;
pub const DISPLAY_NAME_MAX: usize = 50;
pub const USERNAME_MIN: usize = 3;
pub const PASSWORD_MIN: usize = 8;
pub const API_KEY_NAME_MIN: usize = 3;
pub const API_KEY_NAME_MAX: usize = 100;

pub type FieldResult<T> = Result<T, &'static str>;

pub fn validate_category_name(raw: &str) -> FieldResult<String> {
    let name = raw.trim();
    if name.is_empty() {
        return Err("Enter a category name");
    }
    if name.chars().count() > CATEGORY_NAME_MAX {
        return Err("Name must be at most 50 characters");
    }
    Ok(name.to_string())
}

/// Letters, digits, `_` and `-`, at least three of them
pub fn validate_username(raw: &str) -> FieldResult<String> {
    let name = raw.trim();
    if name.is_empty() {
        return Err("Enter a username");
    }
    if name.chars().count() < USERNAME_MIN {
        return Err("Username must be at least 3 characters");
    }
    if !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-') {
        return Err("Username may only contain letters, digits, underscores and hyphens");
    }
    Ok(name.to_string())
}

pub fn validate_password(raw: &str) -> FieldResult<String> {
    if raw.is_empty() {
        return Err("Enter a password");
    }
    if raw.chars().count() < PASSWORD_MIN {
        return Err("Password must be at least 8 characters");
    }
    Ok(raw.to_string())
}

pub fn validate_password_pair(password: &str, confirm: &str) -> FieldResult<String> {
    let password = validate_password(password)?;
    if confirm.is_empty() {
        return Err("Confirm the password");
    }
    if password != confirm {
        return Err("The two passwords do not match");
    }
    Ok(password)
}

/// Optional; blank means none
pub fn validate_display_name(raw: &str) -> FieldResult<Option<String>> {
    let name = raw.trim();
    if name.chars().count() > DISPLAY_NAME_MAX {
        return Err("Display name must be at most 50 characters");
    }
    Ok((!name.is_empty()).then(|| name.to_string()))
}

pub fn validate_api_key_name(raw: &str) -> FieldResult<String> {
    let name = raw.trim();
    if name.is_empty() {
        return Err("Enter an API key name");
    }
    let len = name.chars().count();
    if len < API_KEY_NAME_MIN {
        return Err("Name must be at least 3 characters");
    }
    if len > API_KEY_NAME_MAX {
        return Err("Name must be at most 100 characters");
    }
    Ok(name.to_string())
}

/// `YYYY-MM-DD` from a date input to the end of that day (UTC).
/// Blank means no expiry; a date before `today` is refused.
pub fn expiry_from_date(raw: &str, today: NaiveDate) -> FieldResult<Option<String>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| "Invalid expiry date")?;
    if date < today {
        return Err("Expiry must not be in the past");
    }
    let end_of_day = NaiveTime::from_hms_opt(23, 59, 59).ok_or("Invalid expiry date")?;
    let at = date.and_time(end_of_day).and_utc();
    Ok(Some(at.to_rfc3339_opts(chrono::SecondsFormat::Secs, true)))
}

/// RFC 3339 to `YYYY-MM-DD HH:MM` (UTC); `-` for blank, raw text when unparseable
pub fn format_timestamp(raw: Option<&str>) -> String {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return "-".to_string();
    };
    match DateTime::parse_from_rfc3339(raw) {
        Ok(at) => at.with_timezone(&Utc).format("%Y-%m-%d %H:%M").to_string(),
        Err(_) => raw.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_name() {
        assert_eq!(validate_category_name("  Unit 1 "), Ok("Unit 1".to_string()));
        assert!(validate_category_name("   ").is_err());
        assert!(validate_category_name(&"x".repeat(50)).is_ok());
        assert!(validate_category_name(&"x".repeat(51)).is_err());
    }

    #[test]
    fn test_username() {
        assert_eq!(validate_username("ab_c-1"), Ok("ab_c-1".to_string()));
        assert!(validate_username("ab").is_err());
        assert!(validate_username("bad name").is_err());
        assert!(validate_username("").is_err());
    }

    #[test]
    fn test_password_pair() {
        assert_eq!(validate_password_pair("secret123", "secret123"), Ok("secret123".to_string()));
        assert_eq!(validate_password_pair("short", "short"), Err("Password must be at least 8 characters"));
        assert_eq!(validate_password_pair("secret123", "secret124"), Err("The two passwords do not match"));
        assert_eq!(validate_password_pair("secret123", ""), Err("Confirm the password"));
    }

    #[test]
    fn test_display_name() {
        assert_eq!(validate_display_name("  "), Ok(None));
        assert_eq!(validate_display_name(" Ann "), Ok(Some("Ann".to_string())));
        assert!(validate_display_name(&"y".repeat(51)).is_err());
    }

    #[test]
    fn test_api_key_name() {
        assert!(validate_api_key_name("ci").is_err());
        assert_eq!(validate_api_key_name(" ci-bot "), Ok("ci-bot".to_string()));
        assert!(validate_api_key_name(&"k".repeat(101)).is_err());
    }

    #[test]
    fn test_expiry_from_date() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        assert_eq!(expiry_from_date("", today), Ok(None));
        assert_eq!(
            expiry_from_date("2025-06-30", today),
            Ok(Some("2025-06-30T23:59:59Z".to_string()))
        );
        assert_eq!(expiry_from_date("2025-06-01", today).map(|v| v.is_some()), Ok(true));
        assert!(expiry_from_date("2025-05-31", today).is_err());
        assert!(expiry_from_date("06/30/2025", today).is_err());
    }

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_timestamp(None), "-");
        assert_eq!(format_timestamp(Some(" ")), "-");
        assert_eq!(format_timestamp(Some("2025-01-02T03:04:05Z")), "2025-01-02 03:04");
        assert_eq!(format_timestamp(Some("2025-01-02T08:04:05+05:00")), "2025-01-02 03:04");
        assert_eq!(format_timestamp(Some("yesterday")), "yesterday");
    }
}
