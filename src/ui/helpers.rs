//! Shared rendering utilities.
//!
//! Everything here measures text in characters rather than bytes, so names
//! such as `Flabébé` line up in the table.

use crate::ui::theme::Theme;

/// Positions the cursor at a 1-indexed row and column.
///
/// # Example
///
/// ```rust
/// use zpokedex::ui::helpers::position_cursor;
///
/// position_cursor(5, 1);
/// print!("Content at row 5");
/// ```
pub fn position_cursor(row: usize, col: usize) {
    print!("\u{1b}[{row};{col}H");
}

/// Display width of `text` in terminal cells, counted as characters.
#[must_use]
pub fn text_width(text: &str) -> usize {
    text.chars().count()
}

/// Left padding that centres `text` within `cols`.
#[must_use]
pub fn center_padding(text: &str, cols: usize) -> usize {
    cols.saturating_sub(text_width(text)) / 2
}

/// Prints `text` centred on `row`, padded to the full width.
pub fn print_centered(row: usize, text: &str, cols: usize) {
    let padding = center_padding(text, cols);
    position_cursor(row, 1);
    print!("{}", " ".repeat(padding));
    print!("{text}");
    print!("{}", " ".repeat(cols.saturating_sub(padding + text_width(text))));
}

/// Renders text with highlighted character ranges for search matches.
///
/// Ranges are `(start, end)` character indices, end exclusive. Selected rows
/// are printed plainly so the selection colours stay intact.
pub fn render_highlighted_text(
    text: &str,
    ranges: &[(usize, usize)],
    theme: &Theme,
    is_selected: bool,
) {
    if ranges.is_empty() || is_selected {
        print!("{text}");
        return;
    }

    let chars: Vec<char> = text.chars().collect();
    let mut current_pos = 0;

    for &(start, end) in ranges {
        let start = start.min(chars.len()).max(current_pos);
        let end = end.min(chars.len());
        if start >= end {
            continue;
        }

        if start > current_pos {
            let normal_section: String = chars[current_pos..start].iter().collect();
            print!("{normal_section}");
        }

        print!("{}", Theme::fg(&theme.colors.match_highlight_fg));
        print!("{}", Theme::bg(&theme.colors.match_highlight_bg));
        let highlighted_section: String = chars[start..end].iter().collect();
        print!("{highlighted_section}");
        print!("{}", Theme::reset());
        print!("{}", Theme::fg(&theme.colors.text_normal));

        current_pos = end;
    }

    if current_pos < chars.len() {
        let remaining: String = chars[current_pos..].iter().collect();
        print!("{remaining}");
    }
}

/// A horizontal bar `width` cells wide, filled in proportion to `value / max`.
///
/// # Example
///
/// ```rust
/// use zpokedex::ui::helpers::stat_bar;
///
/// assert_eq!(stat_bar(128, 255, 10), ("█████".to_string(), "░░░░░".to_string()));
/// ```
#[must_use]
pub fn stat_bar(value: u32, max: u32, width: usize) -> (String, String) {
    let max = max.max(1);
    let value = value.min(max);
    let filled = (u64::from(value) * width as u64 + u64::from(max) / 2) / u64::from(max);
    let filled = usize::try_from(filled).unwrap_or(width).min(width);
    ("█".repeat(filled), "░".repeat(width - filled))
}
