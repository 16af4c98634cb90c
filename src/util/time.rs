use chrono::{DateTime, Local};

/// Render a server RFC 3339 timestamp as local "YYYY-MM-DD HH:MM".
/// Anything unparseable is shown as-is.
pub fn short_timestamp(raw: &str) -> String {
    match DateTime::parse_from_rfc3339(raw) {
        Ok(dt) => dt.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string(),
        Err(_) => raw.to_string(),
    }
}
