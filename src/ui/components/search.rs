//! Boxed input renderers: the search bar and the go-to prompt.

use crate::ui::helpers::{position_cursor, text_width};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{PromptInfo, SearchBarInfo};

/// Horizontal margin for input boxes (spaces on left and right).
const INPUT_BOX_MARGIN: usize = 5;

/// Renders the search box at `row`. Uses three rows.
pub fn render_search_bar(row: usize, search: &SearchBarInfo, theme: &Theme, cols: usize) -> usize {
    render_input_box(row, &format!(" Search: {}", search.query), theme, cols)
}

/// Renders the go-to prompt at `row`. Uses three rows.
pub fn render_prompt(row: usize, prompt: &PromptInfo, theme: &Theme, cols: usize) -> usize {
    render_input_box(row, &format!(" Go to #/name: {}", prompt.input), theme, cols)
}

/// Draws a bordered single-line box:
///
/// ```text
/// [margin] ┌─────────────┐ [margin]
/// [margin] │ Search: ... │ [margin]
/// [margin] └─────────────┘ [margin]
/// ```
fn render_input_box(row: usize, text: &str, theme: &Theme, cols: usize) -> usize {
    let box_width = cols.saturating_sub(INPUT_BOX_MARGIN * 2);
    let inner_width = box_width.saturating_sub(2);
    let text: String = text.chars().take(inner_width).collect();

    position_cursor(row, 1);
    print!("{}", " ".repeat(INPUT_BOX_MARGIN));
    print!("{}", Theme::fg(&theme.colors.search_bar_border));
    print!("┌{}┐", "─".repeat(inner_width));
    print!("{}", Theme::reset());

    let padding = inner_width.saturating_sub(text_width(&text));

    position_cursor(row + 1, 1);
    print!("{}", " ".repeat(INPUT_BOX_MARGIN));
    print!("{}", Theme::fg(&theme.colors.search_bar_border));
    print!("│");
    print!("{}", Theme::fg(&theme.colors.text_normal));
    print!("{text}");
    print!("{}", " ".repeat(padding));
    print!("{}", Theme::fg(&theme.colors.search_bar_border));
    print!("│");
    print!("{}", Theme::reset());

    position_cursor(row + 2, 1);
    print!("{}", " ".repeat(INPUT_BOX_MARGIN));
    print!("{}", Theme::fg(&theme.colors.search_bar_border));
    print!("└{}┘", "─".repeat(inner_width));
    print!("{}", Theme::reset());

    row + 3
}
