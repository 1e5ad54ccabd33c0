//! Footer and status line renderers.

use crate::ui::helpers::{position_cursor, print_centered};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{FooterInfo, StatusKind, StatusLine};

/// Renders the keybinding hints centred at `row`.
///
/// Text wider than the terminal is cut so the layout does not wrap.
///
/// # Example
///
/// ```rust,ignore
/// let footer = FooterInfo { keybindings: "q: quit  /: search".to_string() };
/// let next_row = render_footer(23, &footer, &Theme::default(), 80);
/// ```
pub fn render_footer(row: usize, footer: &FooterInfo, theme: &Theme, cols: usize) -> usize {
    let help_text: String = footer.keybindings.chars().take(cols).collect();

    print!("{}", Theme::fg(&theme.colors.text_dim));
    print_centered(row, &help_text, cols);
    print!("{}", Theme::reset());
    row + 1
}

/// Renders the status line at `row`, left-aligned with a one-cell margin.
pub fn render_status(row: usize, status: &StatusLine, theme: &Theme, cols: usize) -> usize {
    let color = match status.kind {
        StatusKind::Info => &theme.colors.text_dim,
        StatusKind::Error => &theme.colors.error_fg,
    };
    let message: String = status.message.chars().take(cols.saturating_sub(1)).collect();

    position_cursor(row, 1);
    print!("{}", Theme::fg(color));
    if status.kind == StatusKind::Error {
        print!("{}", Theme::bold());
    }
    print!(" {message}");
    print!("{}", " ".repeat(cols.saturating_sub(message.chars().count() + 1)));
    print!("{}", Theme::reset());
    row + 1
}
