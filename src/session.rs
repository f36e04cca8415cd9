//! Session marker persistence
//!
//! A successful sign-in is remembered in two places under the same key: the
//! tab-scoped session storage and a short-lived cookie. The server keeps its
//! own http-only auth cookie; the marker here only drives client-side
//! routing.

use gloo_storage::{SessionStorage, Storage};

use crate::cookie;

/// Key the marker lives under in both stores.
pub const MARKER_KEY: &str = "ec_id";

/// Cookie lifetime in days.
const MARKER_TTL_DAYS: i64 = 1;

/// Records `identifier` in both stores.
pub fn remember(identifier: &str) {
    let _ = SessionStorage::set(MARKER_KEY, identifier);
    cookie::write(MARKER_KEY, identifier, MARKER_TTL_DAYS);
}

/// Returns the current marker, preferring the tab-scoped store.
pub fn current() -> Option<String> {
    let stored: Option<String> = SessionStorage::get(MARKER_KEY).ok();
    stored.or_else(|| {
        let value = cookie::read(MARKER_KEY);
        (!value.is_empty()).then_some(value)
    })
}

/// Drops the marker from both stores.
pub fn clear() {
    SessionStorage::delete(MARKER_KEY);
    cookie::clear(MARKER_KEY);
}
