//! Table component renderer.
//!
//! Renders the collection as three columns (NO, NAME, TYPES) with selection
//! and search match highlighting.

use crate::app::state::{NAME_COLUMN_WIDTH, NUMBER_COLUMN_WIDTH};
use crate::ui::helpers::{self, position_cursor, text_width};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::DisplayItem;

/// Renders the column headers at `row`. Returns the next available row.
pub fn render_table_headers(row: usize, theme: &Theme) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.header_fg));
    print!(" {:<nw$}{:<mw$}{}", "NO", "NAME", "TYPES", nw = NUMBER_COLUMN_WIDTH - 1, mw = NAME_COLUMN_WIDTH);
    print!("{}", Theme::reset());
    row + 1
}

/// Renders every item starting at `row`. Returns the next available row.
pub fn render_table_rows(row: usize, items: &[DisplayItem], theme: &Theme, cols: usize) -> usize {
    let mut current_row = row;
    for item in items {
        current_row = render_table_row(current_row, item, theme, cols);
    }
    current_row
}

/// Renders one row padded to the full width, so the selection background
/// spans the line.
fn render_table_row(row: usize, item: &DisplayItem, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);

    if item.is_selected {
        print!("{}", Theme::fg(&theme.colors.selection_fg));
        print!("{}", Theme::bg(&theme.colors.selection_bg));
    } else {
        print!("{}", Theme::fg(&theme.colors.text_dim));
    }

    print!(" {:<w$}", item.number, w = NUMBER_COLUMN_WIDTH - 1);

    if !item.is_selected {
        print!("{}", Theme::fg(&theme.colors.text_normal));
    }
    helpers::render_highlighted_text(&item.name, &item.highlight_ranges, theme, item.is_selected);
    print!("{}", " ".repeat(NAME_COLUMN_WIDTH.saturating_sub(text_width(&item.name))));

    if !item.is_selected {
        print!("{}", Theme::fg(&theme.colors.accent_fg));
    }
    print!("{}", item.types);

    let line_len = NUMBER_COLUMN_WIDTH.max(text_width(&item.number) + 1)
        + NAME_COLUMN_WIDTH.max(text_width(&item.name))
        + text_width(&item.types);
    print!("{}", " ".repeat(cols.saturating_sub(line_len)));

    print!("{}", Theme::reset());
    row + 1
}
