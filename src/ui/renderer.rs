//! Top-level rendering coordinator.
//!
//! Rendering is two steps:
//!
//! 1. **View model computation**: `AppState` → `UIViewModel`
//! 2. **Component rendering**: the view model is printed section by section

use crate::app::AppState;
use crate::ui::components;

/// Renders the plugin UI to stdout.
///
/// Relative timestamps in the history table are computed against the current
/// wall clock. Does not clear the screen; every line is padded instead.
pub fn render(state: &AppState, rows: usize, cols: usize) {
    let now = chrono::Utc::now().timestamp();
    let viewmodel = state.compute_viewmodel(rows, cols, now);

    components::render_layout(&viewmodel, &state.theme, cols, rows);
}
