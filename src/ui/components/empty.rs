//! Empty state component renderer.

use crate::ui::helpers::print_centered;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::EmptyState;

/// Renders the two-line empty state message, centred, starting two rows
/// below `row`.
///
/// Shown while the first page loads, after a failed first page, and when the
/// search term matches nothing.
pub fn render_empty_state(row: usize, empty: &EmptyState, theme: &Theme, cols: usize) -> usize {
    print!("{}", Theme::fg(&theme.colors.empty_state_fg));
    print_centered(row + 2, &empty.message, cols);
    print!("{}", Theme::reset());

    print!("{}", Theme::dim());
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print_centered(row + 3, &empty.subtitle, cols);
    print!("{}", Theme::reset());

    row + 4
}
