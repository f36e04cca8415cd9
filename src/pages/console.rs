//! Vault console page - list, create, reveal and delete secrets

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_meta::Title;
use leptos_router::hooks::use_navigate;

use crate::api::{self, ApiError};
use crate::components::{Header, LoadingSpinner, ToastLevel, Toasts};
use crate::state::AppState;
use crate::types::{NewSecret, VaultEntry};

/// Main console page
#[component]
pub fn ConsolePage() -> impl IntoView {
    let state = expect_context::<AppState>();
    let toasts = expect_context::<Toasts>();
    let navigate = use_navigate();

    let api_base = state.api_base;

    // Local state
    let entries = RwSignal::new(Vec::<VaultEntry>::new());
    let is_loading = RwSignal::new(true);
    let new_key = RwSignal::new(String::new());
    let new_value = RwSignal::new(String::new());
    let is_saving = RwSignal::new(false);
    // At most one secret value is shown at a time: (entry id, value)
    let revealed = RwSignal::new(Option::<(String, String)>::None);

    // Redirect if not authenticated
    let navigate_clone = navigate.clone();
    Effect::new(move |_| {
        if state.identity.get().is_none() {
            navigate_clone("/login", Default::default());
        }
    });

    // Fetch the entry list; also reused after every mutation
    let load_entries = move || {
        is_loading.set(true);
        spawn_local(async move {
            let base_url = api_base.get_untracked();
            match api::fetch_entries(&base_url).await {
                Ok(list) => entries.set(list),
                Err(e) => {
                    tracing::error!("Failed to load vault entries: {}", e);
                    toasts.show(e.to_string(), ToastLevel::Error);
                }
            }
            is_loading.set(false);
        });
    };

    // Load on mount
    Effect::new(move |_| {
        load_entries();
    });

    // Create a new entry
    let on_create = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();

        let key = new_key.get_untracked().trim().to_string();
        let value = new_value.get_untracked();
        if key.is_empty() || value.is_empty() {
            toasts.show("Please provide both a key and a value", ToastLevel::Warning);
            return;
        }
        if is_saving.get_untracked() {
            return;
        }
        is_saving.set(true);

        spawn_local(async move {
            let base_url = api_base.get_untracked();
            match api::create_entry(&base_url, &NewSecret { key, value }).await {
                Ok(ack) => {
                    let text = ack
                        .message
                        .unwrap_or_else(|| "Vault entry created successfully".to_string());
                    toasts.show(text, ToastLevel::Success);
                    new_key.set(String::new());
                    new_value.set(String::new());
                    load_entries();
                }
                Err(ApiError::Rejected(message)) => {
                    toasts.show(message, ToastLevel::Error);
                }
                Err(e) => {
                    tracing::error!("Failed to create vault entry: {}", e);
                    toasts.show(e.to_string(), ToastLevel::Error);
                }
            }
            is_saving.set(false);
        });
    };

    // Reveal a secret value, or conceal it on a second click
    let on_reveal = move |id: String| {
        let showing = revealed
            .get_untracked()
            .map(|(rid, _)| rid == id)
            .unwrap_or(false);
        if showing {
            revealed.set(None);
            return;
        }

        spawn_local(async move {
            let base_url = api_base.get_untracked();
            match api::reveal_entry(&base_url, &id).await {
                Ok(value) => revealed.set(Some((id, value))),
                Err(ApiError::Rejected(message)) => {
                    toasts.show(message, ToastLevel::Error);
                }
                Err(e) => {
                    tracing::error!("Failed to reveal vault entry: {}", e);
                    toasts.show(e.to_string(), ToastLevel::Error);
                }
            }
        });
    };

    // Delete an entry
    let on_delete = move |id: String| {
        spawn_local(async move {
            let base_url = api_base.get_untracked();
            match api::delete_entry(&base_url, &id).await {
                Ok(ack) => {
                    let text = ack
                        .message
                        .unwrap_or_else(|| "Vault entry deleted successfully.".to_string());
                    toasts.show(text, ToastLevel::Success);
                    let was_revealed = revealed
                        .get_untracked()
                        .map(|(rid, _)| rid == id)
                        .unwrap_or(false);
                    if was_revealed {
                        revealed.set(None);
                    }
                    load_entries();
                }
                Err(ApiError::Rejected(message)) => {
                    toasts.show(message, ToastLevel::Error);
                }
                Err(e) => {
                    tracing::error!("Failed to delete vault entry: {}", e);
                    toasts.show(e.to_string(), ToastLevel::Error);
                }
            }
        });
    };

    view! {
        <Title text="Console | Lockbox" />
        <div class="min-h-screen flex flex-col bg-[var(--bg-primary)]">
            <Header />

            <main class="flex-1 w-full max-w-5xl mx-auto px-4 py-8">
                // Page header
                <div class="mb-8">
                    <h1 class="text-2xl font-bold text-[var(--text-primary)]">"Vault"</h1>
                    <p class="text-sm text-[var(--text-muted)] mt-1">
                        {move || {
                            state
                                .identity
                                .get()
                                .map(|who| format!("Signed in as {}", who))
                                .unwrap_or_default()
                        }}
                    </p>
                </div>

                // New entry form
                <div class="card p-6 mb-8">
                    <h2 class="font-medium text-[var(--text-primary)] mb-4">"New entry"</h2>
                    <form on:submit=on_create novalidate=true class="flex flex-col sm:flex-row gap-3">
                        <input
                            type="text"
                            prop:value=move || new_key.get()
                            on:input=move |ev| new_key.set(event_target_value(&ev))
                            placeholder="Key, e.g. prod-db-password"
                            class="input flex-1"
                        />
                        <input
                            type="password"
                            prop:value=move || new_value.get()
                            on:input=move |ev| new_value.set(event_target_value(&ev))
                            placeholder="Secret value"
                            class="input flex-1"
                        />
                        <button
                            type="submit"
                            disabled=move || is_saving.get()
                            class="btn btn-primary px-6"
                        >
                            <Show when=move || is_saving.get()>
                                <div class="loading-spinner"></div>
                            </Show>
                            "Add Entry"
                        </button>
                    </form>
                </div>

                // Entry list
                <div class="card">
                    <div class="px-6 py-4 border-b border-[var(--border-default)] flex items-center justify-between">
                        <h2 class="font-medium text-[var(--text-primary)]">"Entries"</h2>
                        <span class="text-xs text-[var(--text-muted)]">
                            {move || {
                                let count = entries.get().len();
                                if count == 1 {
                                    "1 entry".to_string()
                                } else {
                                    format!("{} entries", count)
                                }
                            }}
                        </span>
                    </div>

                    <Show when=move || is_loading.get()>
                        <div class="flex justify-center py-12">
                            <LoadingSpinner size="w-8 h-8" />
                        </div>
                    </Show>

                    {move || {
                        if !is_loading.get() && entries.get().is_empty() {
                            view! { <EmptyVault /> }.into_any()
                        } else {
                            view! {}.into_any()
                        }
                    }}

                    // Rows
                    {move || {
                        entries
                            .get()
                            .into_iter()
                            .map(|entry| {
                                let id = entry.id.oid.clone();

                                let reveal_label = {
                                    let id = id.clone();
                                    move || {
                                        let showing = revealed
                                            .get()
                                            .map(|(rid, _)| rid == id)
                                            .unwrap_or(false);
                                        if showing { "Hide" } else { "Reveal" }
                                    }
                                };
                                let value_cell = {
                                    let id = id.clone();
                                    move || {
                                        revealed
                                            .get()
                                            .filter(|(rid, _)| rid == &id)
                                            .map(|(_, value)| {
                                                view! {
                                                    <div class="entry-value mt-2">
                                                        <code>{value}</code>
                                                    </div>
                                                }
                                            })
                                    }
                                };
                                let id_for_reveal = id.clone();
                                let id_for_delete = id;

                                view! {
                                    <div class="entry-row px-6 py-4 border-b border-[var(--border-default)] last:border-b-0">
                                        <div class="flex items-center justify-between gap-4">
                                            <div class="min-w-0">
                                                <div class="font-medium text-[var(--text-primary)] truncate">
                                                    {entry.key.clone()}
                                                </div>
                                                <div class="text-xs text-[var(--text-muted)] mt-0.5">
                                                    {format!(
                                                        "{} by {}",
                                                        entry.created_at_display(),
                                                        entry.created_by
                                                    )}
                                                </div>
                                            </div>
                                            <div class="flex items-center gap-2 shrink-0">
                                                <button
                                                    on:click=move |_| on_reveal(id_for_reveal.clone())
                                                    class="btn btn-ghost"
                                                >
                                                    {reveal_label}
                                                </button>
                                                <button
                                                    on:click=move |_| on_delete(id_for_delete.clone())
                                                    class="btn btn-ghost text-[var(--accent-error)]"
                                                >
                                                    "Delete"
                                                </button>
                                            </div>
                                        </div>
                                        {value_cell}
                                    </div>
                                }
                            })
                            .collect::<Vec<_>>()
                    }}
                </div>
            </main>
        </div>
    }
}

/// Empty state when the vault has no entries
#[component]
fn EmptyVault() -> impl IntoView {
    view! {
        <div class="empty-state py-12">
            <span class="empty-state-icon">"🔐"</span>
            <h2 class="empty-state-title">"No secrets yet"</h2>
            <p class="empty-state-description">
                "Entries you add above show up here. Values stay hidden until you reveal them."
            </p>
        </div>
    }
}
