//! Reusable UI components

pub mod header;
pub mod loading;
pub mod toast;

pub use header::Header;
pub use loading::LoadingSpinner;
pub use toast::{Toaster, ToastLevel, Toasts};
