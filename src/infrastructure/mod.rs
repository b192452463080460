//! Sandbox filesystem conventions.
//!
//! Zellij mounts the host filesystem under `/host` inside the plugin sandbox,
//! so every user-facing path has to be translated before it is opened.

pub mod paths;

pub use paths::{expand_tilde, get_data_dir};
