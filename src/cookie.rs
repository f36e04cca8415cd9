//! Cookie access for the session marker
//!
//! Parsing and formatting are kept as pure functions so they can be tested
//! off-browser; only the thin wrappers at the bottom touch `document.cookie`.

use chrono::{DateTime, Duration, Utc};
use wasm_bindgen::JsCast;

/// Expiry date format cookies require (RFC 7231 IMF-fixdate).
const EXPIRES_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// Returns the value stored under `name`, or the empty string when the
/// cookie is absent.
pub fn read(name: &str) -> String {
    value_from(&raw_cookies(), name)
}

/// Writes `name=value` scoped to the root path, expiring `ttl_days` from
/// now.
pub fn write(name: &str, value: &str, ttl_days: i64) {
    set_raw(&entry(name, value, Utc::now() + Duration::days(ttl_days)));
}

/// Overwrites `name` with an already-expired entry so the browser drops it.
pub fn clear(name: &str) {
    set_raw(&entry(name, "", Utc::now() - Duration::days(1)));
}

/// Looks `name` up in a raw cookie header: split on `;`, trim leading
/// spaces, first segment carrying a `name=` prefix wins.
fn value_from(header: &str, name: &str) -> String {
    let prefix = format!("{}=", name);
    header
        .split(';')
        .map(|segment| segment.trim_start_matches(' '))
        .find_map(|segment| segment.strip_prefix(prefix.as_str()))
        .unwrap_or_default()
        .to_string()
}

/// Formats a settable cookie entry: `name=value; expires=<date>; path=/`.
fn entry(name: &str, value: &str, expires: DateTime<Utc>) -> String {
    format!(
        "{}={}; expires={}; path=/",
        name,
        value,
        expires.format(EXPIRES_FORMAT)
    )
}

fn html_document() -> Option<web_sys::HtmlDocument> {
    web_sys::window()?
        .document()?
        .dyn_into::<web_sys::HtmlDocument>()
        .ok()
}

fn raw_cookies() -> String {
    html_document()
        .and_then(|doc| doc.cookie().ok())
        .unwrap_or_default()
}

fn set_raw(entry: &str) {
    if let Some(doc) = html_document() {
        let _ = doc.set_cookie(entry);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_value_from_finds_named_cookie() {
        let header = "theme=dark; ec_id=alice@example.com; sidebar=collapsed";
        assert_eq!(value_from(header, "ec_id"), "alice@example.com");
    }

    #[test]
    fn test_value_from_trims_leading_spaces_only() {
        // Browsers join cookies with "; ", so only leading spaces may appear.
        assert_eq!(value_from("a=1;  ec_id=x", "ec_id"), "x");
    }

    #[test]
    fn test_value_from_matches_whole_name() {
        let header = "xec_id=wrong; ec_id=right";
        assert_eq!(value_from(header, "ec_id"), "right");
    }

    #[test]
    fn test_value_from_first_match_wins() {
        let header = "ec_id=first; ec_id=second";
        assert_eq!(value_from(header, "ec_id"), "first");
    }

    #[test]
    fn test_value_from_missing_name_yields_empty() {
        assert_eq!(value_from("theme=dark", "ec_id"), "");
        assert_eq!(value_from("", "ec_id"), "");
    }

    #[test]
    fn test_value_from_keeps_equals_signs_in_value() {
        // Base64-ish values carry '='; everything after the first one is the
        // value.
        assert_eq!(value_from("ec_id=YWxpY2U=", "ec_id"), "YWxpY2U=");
    }

    #[test]
    fn test_entry_formats_expiry_as_imf_fixdate() {
        let expires = Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap();
        assert_eq!(
            entry("ec_id", "alice@example.com", expires),
            "ec_id=alice@example.com; expires=Thu, 02 Jan 2025 03:04:05 GMT; path=/"
        );
    }

    #[test]
    fn test_entry_is_readable_back_through_value_from() {
        let expires = Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap();
        let written = entry("ec_id", "alice@example.com", expires);
        assert_eq!(value_from(&written, "ec_id"), "alice@example.com");
    }

    #[test]
    fn test_cleared_entry_has_empty_value_and_past_expiry() {
        let past = Utc.with_ymd_and_hms(2020, 6, 1, 0, 0, 0).unwrap();
        let written = entry("ec_id", "", past);
        assert_eq!(written, "ec_id=; expires=Mon, 01 Jun 2020 00:00:00 GMT; path=/");
        assert_eq!(value_from(&written, "ec_id"), "");
    }
}
