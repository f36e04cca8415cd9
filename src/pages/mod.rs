//! Application pages

pub mod console;
pub mod login;
