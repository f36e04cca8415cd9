//! Transient toast notifications
//!
//! A fixed stack in the top-right corner. Every toast lives for the same
//! fixed duration and removes itself afterwards.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use uuid::Uuid;

/// How long a toast stays on screen.
pub const TOAST_DURATION_MS: u32 = 3000;

/// Accent of a toast. Decides the background color only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToastLevel {
    /// Default accent, used for success and neutral feedback.
    #[default]
    Success,
    Warning,
    Error,
}

impl ToastLevel {
    pub fn background(self) -> &'static str {
        match self {
            ToastLevel::Success => "#ffa07a",
            ToastLevel::Warning => "#f5a524",
            ToastLevel::Error => "#e5484d",
        }
    }
}

/// One visible notification.
#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: Uuid,
    pub text: String,
    pub level: ToastLevel,
}

impl Toast {
    pub fn new(text: impl Into<String>, level: ToastLevel) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
            level,
        }
    }
}

/// Context handle for raising toasts from anywhere in the tree.
#[derive(Clone, Copy)]
pub struct Toasts {
    items: RwSignal<Vec<Toast>>,
}

impl Toasts {
    pub fn new() -> Self {
        Self {
            items: RwSignal::new(Vec::new()),
        }
    }

    /// Shows `text` for the fixed duration, then drops it.
    pub fn show(&self, text: impl Into<String>, level: ToastLevel) {
        let toast = Toast::new(text, level);
        let id = toast.id;
        self.items.update(|items| items.push(toast));

        let items = self.items;
        spawn_local(async move {
            TimeoutFuture::new(TOAST_DURATION_MS).await;
            items.update(|items| items.retain(|toast| toast.id != id));
        });
    }
}

impl Default for Toasts {
    fn default() -> Self {
        Self::new()
    }
}

/// Renders the active toasts in the top-right corner
#[component]
pub fn Toaster() -> impl IntoView {
    let toasts = expect_context::<Toasts>();

    view! {
        <div class="fixed top-4 right-4 z-50 flex flex-col items-end gap-2">
            {move || {
                toasts
                    .items
                    .get()
                    .into_iter()
                    .map(|toast| {
                        view! {
                            <div
                                class="toast"
                                style=format!("background: {};", toast.level.background())
                            >
                                {toast.text}
                            </div>
                        }
                    })
                    .collect::<Vec<_>>()
            }}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_level_is_the_salmon_accent() {
        assert_eq!(ToastLevel::default(), ToastLevel::Success);
        assert_eq!(ToastLevel::default().background(), "#ffa07a");
    }

    #[test]
    fn test_levels_map_to_distinct_backgrounds() {
        let backgrounds = [
            ToastLevel::Success.background(),
            ToastLevel::Warning.background(),
            ToastLevel::Error.background(),
        ];
        assert!(backgrounds.iter().all(|b| b.starts_with('#')));
        assert_ne!(backgrounds[0], backgrounds[1]);
        assert_ne!(backgrounds[1], backgrounds[2]);
        assert_ne!(backgrounds[0], backgrounds[2]);
    }

    #[test]
    fn test_toasts_get_unique_ids() {
        let a = Toast::new("first", ToastLevel::Success);
        let b = Toast::new("first", ToastLevel::Success);
        assert_ne!(a.id, b.id, "equal texts must still be removable independently");
    }
}
