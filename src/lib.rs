//! Lockbox web console - Leptos frontend
//!
//! A small client for the Lockbox vault API: sign in, then list, create,
//! reveal and delete secrets.

pub mod api;
pub mod components;
pub mod cookie;
pub mod pages;
pub mod session;
pub mod state;
pub mod types;

use leptos::prelude::*;
use leptos_meta::{provide_meta_context, Title};
use leptos_router::{
    components::{Route, Router, Routes},
    hooks::use_navigate,
    path,
};

use components::{Toaster, Toasts};
use pages::{console::ConsolePage, login::LoginPage};
use state::AppState;

/// Main application component
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    // Initialize global state
    let app_state = AppState::new();
    provide_context(app_state);
    provide_context(Toasts::new());

    view! {
        <Title text="Lockbox" />
        <Router>
            <main class="min-h-screen bg-[var(--bg-primary)] text-[var(--text-primary)]">
                <Routes fallback=|| view! { <NotFound /> }>
                    <Route path=path!("/") view=RootRedirect />
                    <Route path=path!("/login") view=LoginPage />
                    <Route path=path!("/console") view=ConsolePage />
                </Routes>
            </main>
            <Toaster />
        </Router>
    }
}

/// Sends the visitor to the console or to sign-in, depending on whether a
/// session marker survives from an earlier visit.
#[component]
fn RootRedirect() -> impl IntoView {
    let state = expect_context::<AppState>();
    let navigate = use_navigate();

    Effect::new(move |_| {
        let target = if state.is_authenticated() {
            "/console"
        } else {
            "/login"
        };
        navigate(target, Default::default());
    });

    view! { <div class="min-h-screen"></div> }
}

/// 404 Not Found page
#[component]
fn NotFound() -> impl IntoView {
    view! {
        <div class="min-h-screen flex items-center justify-center">
            <div class="text-center">
                <h1 class="text-6xl font-bold text-[var(--text-muted)] mb-4">"404"</h1>
                <p class="text-xl text-[var(--text-secondary)] mb-8">"Page not found"</p>
                <a
                    href="/"
                    class="btn btn-primary px-6 py-3"
                >
                    "Go Home"
                </a>
            </div>
        </div>
    }
}
