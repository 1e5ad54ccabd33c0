//! Top-level rendering coordinator.
//!
//! Rendering is two steps: compute the [`UIViewModel`] from state, then hand
//! it to the layout for the current screen.

use crate::app::AppState;
use crate::ui::components;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{Body, UIViewModel};

/// Renders the plugin UI to stdout.
///
/// Prints ANSI-styled output positioned with cursor escapes; Zellij clears
/// the pane before each render.
pub fn render(state: &AppState, rows: usize, cols: usize) {
    let viewmodel = state.compute_viewmodel(rows, cols);

    render_viewmodel(&viewmodel, &state.theme, rows, cols);
}

fn render_viewmodel(vm: &UIViewModel, theme: &Theme, rows: usize, cols: usize) {
    match &vm.body {
        Body::List(list) => components::render_list_view(vm, list, theme, cols, rows),
        Body::Detail(detail) => components::render_detail_view(vm, detail, theme, cols, rows),
    }
}
