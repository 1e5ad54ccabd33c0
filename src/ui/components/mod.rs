//! Composable UI component renderers.
//!
//! # Components
//!
//! - [`header`]: Title bar
//! - [`footer`]: Keybinding hints and the status line
//! - [`search`]: Search box and go-to prompt
//! - [`table`]: Collection table (NO, NAME, TYPES)
//! - [`empty`]: Empty state message
//! - [`detail`]: Single record view
//!
//! # Layouts
//!
//! ```text
//! row 1          blank
//! row 2          [Header]
//! row 3          [Border]
//!                [Search box or go-to prompt, 3 rows, when open]
//!                [Table headers]
//!                [Table rows | empty state | detail body]
//! rows - 3       [Status line]
//! rows - 2       [Border]
//! rows - 1       [Footer]
//! ```

mod detail;
mod empty;
mod footer;
mod header;
mod search;
mod table;

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{DetailView, ListView, UIViewModel};

use detail::render_detail;
use empty::render_empty_state;
use footer::{render_footer, render_status};
use header::render_header;
use search::{render_prompt, render_search_bar};
use table::{render_table_headers, render_table_rows};

/// Renders a horizontal border line at `row`. Returns the next row.
fn render_border(row: usize, color: &str, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::fg(color));
    print!("{}", "─".repeat(cols));
    print!("{}", Theme::reset());
    row + 1
}

/// Renders header and first border. Returns the first body row.
fn render_top(vm: &UIViewModel, theme: &Theme, cols: usize) -> usize {
    let current_row = render_header(2, &vm.header, theme, cols);
    render_border(current_row, &theme.colors.border, cols)
}

/// Renders status line, bottom border and footer. Returns the last row the
/// body may use.
fn render_bottom(vm: &UIViewModel, theme: &Theme, cols: usize, rows: usize) -> usize {
    let footer_row = rows.saturating_sub(1);
    let border_row = footer_row.saturating_sub(1);
    let status_row = border_row.saturating_sub(1);

    if let Some(status) = &vm.status {
        render_status(status_row, status, theme, cols);
    }
    render_border(border_row, &theme.colors.border, cols);
    render_footer(footer_row, &vm.footer, theme, cols);
    status_row.saturating_sub(1)
}

/// Renders the list screen.
pub fn render_list_view(vm: &UIViewModel, list: &ListView, theme: &Theme, cols: usize, rows: usize) {
    let mut current_row = render_top(vm, theme, cols);

    if let Some(search) = &list.search_bar {
        current_row = render_search_bar(current_row, search, theme, cols);
    } else if let Some(prompt) = &list.prompt {
        current_row = render_prompt(current_row, prompt, theme, cols);
    }

    if let Some(empty) = &list.empty_state {
        render_empty_state(current_row, empty, theme, cols);
    } else {
        current_row = render_table_headers(current_row, theme);
        render_table_rows(current_row, &list.display_items, theme, cols);
    }

    render_bottom(vm, theme, cols, rows);
}

/// Renders the detail screen.
pub fn render_detail_view(vm: &UIViewModel, detail: &DetailView, theme: &Theme, cols: usize, rows: usize) {
    let body_row = render_top(vm, theme, cols);
    let last_row = render_bottom(vm, theme, cols, rows);
    render_detail(body_row, last_row, detail, theme, cols);
}
