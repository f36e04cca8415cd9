//! Sign-in page
//!
//! The submission flow is separated from the component behind `LoginDeps`
//! so the branching (validation, re-entry gate, the three outcomes) is
//! testable without a browser. `BrowserDeps` is the production wiring.

use async_trait::async_trait;
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_meta::Title;
use leptos_router::hooks::use_navigate;
use leptos_router::NavigateOptions;

use crate::api::{self, ApiError};
use crate::components::{Header, ToastLevel, Toasts};
use crate::state::AppState;
use crate::types::{Credentials, StatusResponse};

/// Delay before navigating away, so the success toast gets a frame to
/// render first.
const REDIRECT_DELAY_MS: u32 = 100;

const MSG_MISSING_FIELDS: &str = "Please enter email and password";
const MSG_LOGIN_OK: &str = "Login successful, redirecting...";

/// Signal bundle backing the credential form.
#[derive(Clone, Copy)]
pub struct LoginForm {
    pub email: RwSignal<String>,
    pub password: RwSignal<String>,
    /// At most one submission may be in flight; this flag gates re-entry.
    pub busy: RwSignal<bool>,
}

impl LoginForm {
    pub fn new() -> Self {
        Self {
            email: RwSignal::new(String::new()),
            password: RwSignal::new(String::new()),
            busy: RwSignal::new(false),
        }
    }
}

impl Default for LoginForm {
    fn default() -> Self {
        Self::new()
    }
}

/// Everything the submission flow needs from the outside world.
#[async_trait(?Send)]
trait LoginDeps {
    async fn authenticate(&self, credentials: &Credentials) -> Result<StatusResponse, ApiError>;
    fn remember_identity(&self, identifier: &str);
    fn notify(&self, text: &str, level: ToastLevel);
    fn schedule_console_redirect(&self);
}

/// Runs one submission end to end.
///
/// Empty fields raise a warning without touching the network. A submission
/// that arrives while another is in flight is dropped silently. Otherwise
/// the busy flag is held for the whole request and released on every exit.
async fn submit_login<D: LoginDeps>(form: LoginForm, deps: &D) {
    let email = form.email.get_untracked();
    let password = form.password.get_untracked();

    if email.is_empty() || password.is_empty() {
        deps.notify(MSG_MISSING_FIELDS, ToastLevel::Warning);
        return;
    }
    if form.busy.get_untracked() {
        return;
    }
    form.busy.set(true);

    let credentials = Credentials {
        email: email.clone(),
        password,
    };
    match deps.authenticate(&credentials).await {
        Ok(_ack) => {
            deps.remember_identity(&email);
            deps.notify(MSG_LOGIN_OK, ToastLevel::Success);
            deps.schedule_console_redirect();
        }
        Err(ApiError::Rejected(message)) => {
            deps.notify(&message, ToastLevel::Error);
        }
        Err(e) => {
            tracing::error!("Auth request failed: {}", e);
            deps.notify(&e.to_string(), ToastLevel::Error);
        }
    }
    form.busy.set(false);
}

/// Production wiring for [`LoginDeps`].
struct BrowserDeps<N> {
    state: AppState,
    toasts: Toasts,
    navigate: N,
}

#[async_trait(?Send)]
impl<N> LoginDeps for BrowserDeps<N>
where
    N: Fn(&str, NavigateOptions) + Clone + 'static,
{
    async fn authenticate(&self, credentials: &Credentials) -> Result<StatusResponse, ApiError> {
        let base_url = self.state.api_base.get_untracked();
        api::login(&base_url, credentials).await
    }

    fn remember_identity(&self, identifier: &str) {
        self.state.sign_in(identifier);
    }

    fn notify(&self, text: &str, level: ToastLevel) {
        self.toasts.show(text, level);
    }

    fn schedule_console_redirect(&self) {
        let navigate = self.navigate.clone();
        spawn_local(async move {
            TimeoutFuture::new(REDIRECT_DELAY_MS).await;
            navigate("/console", NavigateOptions::default());
        });
    }
}

/// Sign-in page, with a create-account mode for first-time setup
#[component]
pub fn LoginPage() -> impl IntoView {
    let state = expect_context::<AppState>();
    let toasts = expect_context::<Toasts>();
    let navigate = use_navigate();

    // Form state
    let form = LoginForm::new();
    let is_setup = RwSignal::new(false);

    // Redirect if already signed in
    let navigate_for_redirect = navigate.clone();
    Effect::new(move |_| {
        if state.identity.get().is_some() {
            navigate_for_redirect("/console", Default::default());
        }
    });

    // Handle form submission
    let navigate_for_submit = navigate.clone();
    let state_for_submit = state.clone();
    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();

        let state = state_for_submit.clone();

        if is_setup.get_untracked() {
            let email = form.email.get_untracked();
            let password = form.password.get_untracked();
            if email.is_empty() || password.is_empty() {
                toasts.show(MSG_MISSING_FIELDS, ToastLevel::Warning);
                return;
            }
            if form.busy.get_untracked() {
                return;
            }
            form.busy.set(true);
            spawn_local(async move {
                let base_url = state.api_base.get_untracked();
                match api::setup(&base_url, &Credentials { email, password }).await {
                    Ok(ack) => {
                        let text = ack
                            .message
                            .unwrap_or_else(|| "Account created".to_string());
                        toasts.show(text, ToastLevel::Success);
                        is_setup.set(false);
                    }
                    Err(ApiError::Rejected(message)) => {
                        toasts.show(message, ToastLevel::Error);
                    }
                    Err(e) => {
                        tracing::error!("Setup request failed: {}", e);
                        toasts.show(e.to_string(), ToastLevel::Error);
                    }
                }
                form.busy.set(false);
            });
        } else {
            let deps = BrowserDeps {
                state,
                toasts,
                navigate: navigate_for_submit.clone(),
            };
            spawn_local(async move {
                submit_login(form, &deps).await;
            });
        }
    };

    view! {
        <Title text="Sign In | Lockbox" />
        <div class="min-h-screen flex flex-col bg-[var(--bg-primary)]">
            <Header />

            <main class="auth-container flex-1">
                <div class="w-full max-w-md px-4">
                    // Card
                    <div class="auth-card">
                        // Header
                        <div class="auth-header">
                            <h1 class="auth-title text-gradient">
                                {move || if is_setup.get() { "Create Account" } else { "Welcome Back" }}
                            </h1>
                            <p class="auth-subtitle">
                                {move || if is_setup.get() {
                                    "Set up the account that owns this vault"
                                } else {
                                    "Sign in to open your vault"
                                }}
                            </p>
                        </div>

                        // Form. Validation is handled in the submit flow so
                        // the feedback matches the toast path.
                        <form on:submit=on_submit novalidate=true class="auth-form">
                            // Email field
                            <div class="auth-input-group">
                                <label class="auth-label">"Email"</label>
                                <input
                                    type="email"
                                    prop:value=move || form.email.get()
                                    on:input=move |ev| form.email.set(event_target_value(&ev))
                                    placeholder="you@example.com"
                                    class="input"
                                />
                            </div>

                            // Password field
                            <div class="auth-input-group">
                                <label class="auth-label">"Password"</label>
                                <input
                                    type="password"
                                    prop:value=move || form.password.get()
                                    on:input=move |ev| form.password.set(event_target_value(&ev))
                                    placeholder="••••••••"
                                    class="input"
                                />
                            </div>

                            // Submit button
                            <button
                                type="submit"
                                disabled=move || form.busy.get()
                                class="btn btn-primary w-full py-3"
                            >
                                <Show when=move || form.busy.get()>
                                    <div class="loading-spinner"></div>
                                </Show>
                                {move || if is_setup.get() { "Create Account" } else { "Sign In" }}
                            </button>
                        </form>

                        // Toggle sign-in/setup
                        <div class="auth-footer">
                            {move || if is_setup.get() {
                                "Already have an account? "
                            } else {
                                "First time here? "
                            }}
                            <button
                                on:click=move |_| is_setup.update(|v| *v = !*v)
                                class="auth-link"
                            >
                                {move || if is_setup.get() { "Sign in" } else { "Create one" }}
                            </button>
                        </div>
                    </div>
                </div>
            </main>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use futures::task::noop_waker;
    use std::cell::{Cell, RefCell};
    use std::future::Future;
    use std::pin::pin;
    use std::task::{Context, Poll};

    /// What the mock answers from `authenticate`.
    #[derive(Clone, Copy)]
    enum AuthBehavior {
        Succeed,
        Reject(&'static str),
        FailTransport(&'static str),
        NeverResolve,
    }

    struct MockDeps {
        behavior: AuthBehavior,
        auth_calls: Cell<usize>,
        remembered: RefCell<Vec<String>>,
        notices: RefCell<Vec<(String, ToastLevel)>>,
        redirects: Cell<usize>,
    }

    impl MockDeps {
        fn new(behavior: AuthBehavior) -> Self {
            Self {
                behavior,
                auth_calls: Cell::new(0),
                remembered: RefCell::new(Vec::new()),
                notices: RefCell::new(Vec::new()),
                redirects: Cell::new(0),
            }
        }
    }

    #[async_trait(?Send)]
    impl LoginDeps for MockDeps {
        async fn authenticate(
            &self,
            _credentials: &Credentials,
        ) -> Result<StatusResponse, ApiError> {
            self.auth_calls.set(self.auth_calls.get() + 1);
            match self.behavior {
                AuthBehavior::Succeed => Ok(StatusResponse {
                    status: 200,
                    message: Some("t0k3n".to_string()),
                }),
                AuthBehavior::Reject(message) => Err(ApiError::Rejected(message.to_string())),
                AuthBehavior::FailTransport(message) => {
                    Err(ApiError::Transport(message.to_string()))
                }
                AuthBehavior::NeverResolve => futures::future::pending().await,
            }
        }

        fn remember_identity(&self, identifier: &str) {
            self.remembered.borrow_mut().push(identifier.to_string());
        }

        fn notify(&self, text: &str, level: ToastLevel) {
            self.notices.borrow_mut().push((text.to_string(), level));
        }

        fn schedule_console_redirect(&self) {
            self.redirects.set(self.redirects.get() + 1);
        }
    }

    fn filled_form(email: &str, password: &str) -> LoginForm {
        let form = LoginForm::new();
        form.email.set(email.to_string());
        form.password.set(password.to_string());
        form
    }

    #[test]
    fn test_empty_email_warns_without_network_call() {
        let form = filled_form("", "hunter2");
        let deps = MockDeps::new(AuthBehavior::Succeed);

        block_on(submit_login(form, &deps));

        assert_eq!(deps.auth_calls.get(), 0, "no request for an empty email");
        assert_eq!(
            *deps.notices.borrow(),
            [(MSG_MISSING_FIELDS.to_string(), ToastLevel::Warning)]
        );
        assert!(deps.remembered.borrow().is_empty());
        assert_eq!(deps.redirects.get(), 0);
        assert!(!form.busy.get_untracked(), "flag never raised");
    }

    #[test]
    fn test_empty_password_warns_without_network_call() {
        let form = filled_form("alice@example.com", "");
        let deps = MockDeps::new(AuthBehavior::Succeed);

        block_on(submit_login(form, &deps));

        assert_eq!(deps.auth_calls.get(), 0, "no request for an empty password");
        assert_eq!(deps.notices.borrow().len(), 1);
    }

    #[test]
    fn test_success_remembers_identity_notifies_and_redirects() {
        let form = filled_form("alice@example.com", "hunter2");
        let deps = MockDeps::new(AuthBehavior::Succeed);

        block_on(submit_login(form, &deps));

        assert_eq!(deps.auth_calls.get(), 1);
        assert_eq!(*deps.remembered.borrow(), ["alice@example.com"]);
        assert_eq!(
            *deps.notices.borrow(),
            [(MSG_LOGIN_OK.to_string(), ToastLevel::Success)]
        );
        assert_eq!(deps.redirects.get(), 1);
        assert!(!form.busy.get_untracked(), "flag released after completion");
    }

    #[test]
    fn test_rejection_shows_server_message_and_stays_put() {
        let form = filled_form("alice@example.com", "wrong");
        let deps = MockDeps::new(AuthBehavior::Reject("Invalid email or password"));

        block_on(submit_login(form, &deps));

        assert_eq!(
            *deps.notices.borrow(),
            [("Invalid email or password".to_string(), ToastLevel::Error)]
        );
        assert!(deps.remembered.borrow().is_empty(), "no marker on rejection");
        assert_eq!(deps.redirects.get(), 0, "no redirect on rejection");
        assert!(!form.busy.get_untracked(), "flag released after rejection");
    }

    #[test]
    fn test_transport_failure_shows_error_and_stays_put() {
        let form = filled_form("alice@example.com", "hunter2");
        let deps = MockDeps::new(AuthBehavior::FailTransport(
            "Network error: connection refused",
        ));

        block_on(submit_login(form, &deps));

        assert_eq!(
            *deps.notices.borrow(),
            [(
                "Network error: connection refused".to_string(),
                ToastLevel::Error
            )]
        );
        assert!(deps.remembered.borrow().is_empty());
        assert_eq!(deps.redirects.get(), 0);
        assert!(!form.busy.get_untracked());
    }

    #[test]
    fn test_submission_while_in_flight_is_dropped() {
        let form = filled_form("alice@example.com", "hunter2");
        let deps = MockDeps::new(AuthBehavior::NeverResolve);

        let waker = noop_waker();
        let mut cx = Context::from_waker(&waker);

        let mut first = pin!(submit_login(form, &deps));
        assert!(
            matches!(first.as_mut().poll(&mut cx), Poll::Pending),
            "first submission parks on the request"
        );
        assert!(form.busy.get_untracked(), "flag held while in flight");

        let mut second = pin!(submit_login(form, &deps));
        assert!(
            matches!(second.as_mut().poll(&mut cx), Poll::Ready(())),
            "second submission returns immediately"
        );

        assert_eq!(deps.auth_calls.get(), 1, "no second request");
        assert!(deps.notices.borrow().is_empty(), "dropped silently");
        assert!(
            form.busy.get_untracked(),
            "flag still owned by the first submission"
        );
    }
}
