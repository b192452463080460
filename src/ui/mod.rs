//! User interface rendering layer.
//!
//! ```text
//! AppState → compute_viewmodel → UIViewModel → render → ANSI Output
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: display-ready data computed from state
//! - [`renderer`]: top-level rendering entry point
//! - [`components`]: section renderers
//! - [`helpers`]: cursor positioning, padding, verdict markers
//! - [`theme`]: color schemes and ANSI escape generation

pub mod components;
pub mod helpers;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use renderer::render;
pub use theme::{Theme, ThemeColors};
pub use viewmodel::{
    EmptyState, FooterInfo, HeaderInfo, HistoryRow, InputBoxInfo, ResultPanel, StatusInfo,
    UIViewModel,
};
