//! Detail view renderer.
//!
//! ```text
//!  #001  Bulbasaur
//!  Grass / Poison
//!  Height 0.7 m   Weight 6.9 kg
//!  Artwork https://...
//!
//!  ABILITIES
//!    Overgrow, Chlorophyll (Hidden)
//!
//!  BASE STATS
//!    Hp               45  ███░░░░░░░░░░░░░░░░░
//!
//!  MOVES (first 20)
//!    Razor Wind, Swords Dance, Cut, ...
//! ```
//!
//! Output stops at `last_row` so it never overwrites the status line or
//! footer on short panes.

use crate::domain::pokemon::MAX_MOVES_SHOWN;
use crate::ui::helpers::{position_cursor, print_centered, stat_bar, text_width};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{DetailInfo, DetailView};

/// Scale of the stat bars; no base stat exceeds it.
const STAT_MAX: u32 = 255;
const STAT_BAR_WIDTH: usize = 20;
const STAT_LABEL_WIDTH: usize = 16;
const INDENT: &str = "   ";

/// Hands out rows until `last_row` is reached.
struct Rows {
    next: usize,
    last: usize,
}

impl Rows {
    fn take(&mut self) -> Option<usize> {
        if self.next > self.last {
            return None;
        }
        let row = self.next;
        self.next += 1;
        Some(row)
    }

    fn skip(&mut self) {
        self.next += 1;
    }
}

/// Renders the detail body between `row` and `last_row` inclusive.
pub fn render_detail(row: usize, last_row: usize, detail: &DetailView, theme: &Theme, cols: usize) {
    match detail {
        DetailView::Loading { id } => {
            print!("{}", Theme::fg(&theme.colors.empty_state_fg));
            print_centered(row + 2, &format!("Loading {id}..."), cols);
            print!("{}", Theme::reset());
        }
        DetailView::NotFound { id } => {
            print!("{}{}", Theme::bold(), Theme::fg(&theme.colors.error_fg));
            print_centered(row + 2, "Pokemon not found", cols);
            print!("{}", Theme::reset());

            print!("{}", Theme::fg(&theme.colors.text_dim));
            print_centered(row + 3, &format!("Nothing could be loaded for \"{id}\". Press r to retry, b to go back."), cols);
            print!("{}", Theme::reset());
        }
        DetailView::Loaded(info) => {
            let mut rows = Rows { next: row + 1, last: last_row };
            render_loaded(&mut rows, info, theme, cols);
        }
    }
}

fn render_loaded(rows: &mut Rows, info: &DetailInfo, theme: &Theme, cols: usize) -> Option<()> {
    position_cursor(rows.take()?, 1);
    print!(" {}{}  ", Theme::fg(&theme.colors.text_dim), info.number);
    print!("{}{}{}{}", Theme::bold(), Theme::fg(&theme.colors.text_normal), info.name, Theme::reset());

    if !info.types.is_empty() {
        position_cursor(rows.take()?, 1);
        print!(" {}{}{}", Theme::fg(&theme.colors.accent_fg), info.types.join(" / "), Theme::reset());
    }

    position_cursor(rows.take()?, 1);
    print!(
        " {dim}Height{reset} {}   {dim}Weight{reset} {}",
        info.height,
        info.weight,
        dim = Theme::fg(&theme.colors.text_dim),
        reset = Theme::fg(&theme.colors.text_normal),
    );
    print!("{}", Theme::reset());

    if let Some(artwork) = &info.artwork {
        position_cursor(rows.take()?, 1);
        let room = cols.saturating_sub(10);
        let artwork: String = artwork.chars().take(room).collect();
        print!(" {}Artwork{} {artwork}", Theme::fg(&theme.colors.text_dim), Theme::reset());
    }

    if !info.abilities.is_empty() {
        rows.skip();
        section_title(rows.take()?, "ABILITIES", theme);
        for line in wrap_list(&info.abilities, cols.saturating_sub(INDENT.len() + 1)) {
            position_cursor(rows.take()?, 1);
            print!("{INDENT}{line}");
        }
    }

    if !info.stats.is_empty() {
        rows.skip();
        section_title(rows.take()?, "BASE STATS", theme);
        for stat in &info.stats {
            let (filled, empty) = stat_bar(stat.value, STAT_MAX, STAT_BAR_WIDTH);
            position_cursor(rows.take()?, 1);
            print!("{INDENT}{:<w$}{:>4}  ", stat.label, stat.value, w = STAT_LABEL_WIDTH);
            print!("{}{filled}", Theme::fg(&theme.colors.stat_bar_fg));
            print!("{}{empty}{}", Theme::fg(&theme.colors.border), Theme::reset());
        }
    }

    if !info.moves.is_empty() {
        rows.skip();
        section_title(rows.take()?, &format!("MOVES (first {MAX_MOVES_SHOWN})"), theme);
        for line in wrap_list(&info.moves, cols.saturating_sub(INDENT.len() + 1)) {
            position_cursor(rows.take()?, 1);
            print!("{INDENT}{line}");
        }
    }

    Some(())
}

fn section_title(row: usize, title: &str, theme: &Theme) {
    position_cursor(row, 1);
    print!(" {}{}{title}{}", Theme::bold(), Theme::fg(&theme.colors.accent_fg), Theme::reset());
}

/// Joins `items` with `", "` into lines no wider than `width`. An item wider
/// than `width` gets a line of its own.
fn wrap_list(items: &[String], width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for (i, item) in items.iter().enumerate() {
        let piece = if i + 1 < items.len() { format!("{item},") } else { item.clone() };
        let needed = if current.is_empty() { text_width(&piece) } else { text_width(&current) + 1 + text_width(&piece) };

        if !current.is_empty() && needed > width {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(&piece);
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}
