//! Global application state

use leptos::prelude::*;

use crate::session;

/// API origin used until configuration overrides it.
const DEFAULT_API_BASE: &str = "http://localhost:8000";

/// Global application state
#[derive(Clone)]
pub struct AppState {
    /// Identifier of the signed-in user, mirrored from the session marker
    pub identity: RwSignal<Option<String>>,
    /// API base URL
    pub api_base: RwSignal<String>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            // Rehydrate from whatever marker an earlier visit left behind
            identity: RwSignal::new(session::current()),
            api_base: RwSignal::new(DEFAULT_API_BASE.to_string()),
        }
    }

    /// Persists the session marker and mirrors it into the reactive state.
    pub fn sign_in(&self, identifier: &str) {
        session::remember(identifier);
        self.identity.set(Some(identifier.to_string()));
    }

    /// Drops the session marker everywhere.
    pub fn sign_out(&self) {
        session::clear();
        self.identity.set(None);
    }

    pub fn is_authenticated(&self) -> bool {
        self.identity.get().is_some()
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
