//! Application state management and view model computation.
//!
//! [`AppState`] is the single container for everything the plugin knows: the
//! list aggregator with its accumulated collection, the detail fetcher, the
//! armed request deadlines, and the transient UI state (search term, visible
//! subset, selection, modes).
//!
//! # Derived State
//!
//! The visible subset is stored as indices into the aggregator's collection
//! and recomputed from scratch by [`AppState::apply_search_filter`] whenever
//! the collection or the search term changes. The selection indexes into the
//! visible subset.
//!
//! # Example
//!
//! ```rust
//! use zpokedex::app::AppState;
//! use zpokedex::ui::theme::Theme;
//! use zpokedex::Config;
//!
//! let mut state = AppState::new(&Config::default(), Theme::default());
//! state.apply_search_filter();
//! let viewmodel = state.compute_viewmodel(24, 80);
//! assert!(viewmodel.status.is_some());
//! ```

use super::actions::Action;
use super::modes::{InputMode, SearchFocus, ViewMode};
use crate::catalog::aggregator::PAGE_ERROR_MESSAGE;
use crate::catalog::filter::match_range;
use crate::catalog::{filter_indices, Deadline, DeadlineQueue, DetailFetcher, DetailState, ListAggregator};
use crate::domain::pokemon::humanize;
use crate::domain::Pokemon;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    Body, DetailInfo, DetailView, DisplayItem, EmptyState, FooterInfo, HeaderInfo, ListView,
    PromptInfo, SearchBarInfo, StatLine, StatusKind, StatusLine, UIViewModel,
};
use crate::Config;

/// Width of the NAME column, including the gap before TYPES.
pub(crate) const NAME_COLUMN_WIDTH: usize = 26;

/// Width of the number column, including the gap before NAME.
pub(crate) const NUMBER_COLUMN_WIDTH: usize = 7;

/// Central application state container.
#[derive(Debug)]
pub struct AppState {
    /// Paged loader owning the accumulated collection.
    pub aggregator: ListAggregator,

    /// Loader for the detail view.
    pub detail: DetailFetcher,

    /// Deadlines waiting for their host timer.
    pub deadlines: DeadlineQueue,

    /// Seconds before an in-flight page or detail fetch is abandoned; `0`
    /// disables timeouts.
    pub request_timeout_secs: u64,

    /// Positions in the collection matching `search_query`, in collection order.
    pub visible: Vec<usize>,

    /// Zero-based index of the selected record within `visible`.
    ///
    /// Clamped by `apply_search_filter()`, wraps during navigation.
    pub selected_index: usize,

    /// Current input handling mode.
    pub input_mode: InputMode,

    /// Current search term. Kept while search mode is left for the detail view.
    pub search_query: String,

    /// Which screen is shown.
    pub view_mode: ViewMode,

    /// Color scheme for UI rendering.
    pub theme: Theme,

    /// Plugin-level problem shown in the status line (e.g. permission denied).
    pub notice: Option<String>,
}

impl AppState {
    /// Creates an empty state wired to the configured API.
    ///
    /// # Example
    ///
    /// ```rust
    /// use zpokedex::app::AppState;
    /// use zpokedex::ui::theme::Theme;
    /// use zpokedex::Config;
    ///
    /// let state = AppState::new(&Config::default(), Theme::default());
    /// assert_eq!(state.selected_index, 0);
    /// assert!(state.aggregator.records().is_empty());
    /// ```
    #[must_use]
    pub fn new(config: &Config, theme: Theme) -> Self {
        Self {
            aggregator: ListAggregator::new(&config.api_base, config.max_concurrent_requests),
            detail: DetailFetcher::new(&config.api_base),
            deadlines: DeadlineQueue::new(),
            request_timeout_secs: config.request_timeout_secs,
            visible: Vec::new(),
            selected_index: 0,
            input_mode: InputMode::Normal,
            search_query: String::new(),
            view_mode: ViewMode::List,
            theme,
            notice: None,
        }
    }

    /// Moves selection cursor down by one position, wrapping to top if at end.
    pub fn move_selection_down(&mut self) {
        if self.visible.is_empty() {
            return;
        }
        self.selected_index = (self.selected_index + 1) % self.visible.len();
    }

    /// Moves selection cursor up by one position, wrapping to bottom if at start.
    pub fn move_selection_up(&mut self) {
        if self.visible.is_empty() {
            return;
        }
        if self.selected_index == 0 {
            self.selected_index = self.visible.len() - 1;
        } else {
            self.selected_index -= 1;
        }
    }

    /// Returns the selected record, if any is visible.
    #[must_use]
    pub fn selected_record(&self) -> Option<&Pokemon> {
        self.visible
            .get(self.selected_index)
            .and_then(|&i| self.aggregator.records().get(i))
    }

    /// Records in the visible subset, in collection order.
    pub fn visible_records(&self) -> impl Iterator<Item = &Pokemon> {
        let records = self.aggregator.records();
        self.visible.iter().filter_map(move |&i| records.get(i))
    }

    /// Recomputes the visible subset from the collection and the search term,
    /// then clamps the selection.
    ///
    /// # Example
    ///
    /// ```rust
    /// # use zpokedex::app::AppState;
    /// # use zpokedex::ui::theme::Theme;
    /// # use zpokedex::Config;
    /// # let mut state = AppState::new(&Config::default(), Theme::default());
    /// state.search_query = "pika".to_string();
    /// state.apply_search_filter();
    /// assert!(state.visible.is_empty());
    /// ```
    pub fn apply_search_filter(&mut self) {
        self.visible = filter_indices(self.aggregator.records(), &self.search_query);

        if self.visible.is_empty() {
            self.selected_index = 0;
        } else {
            self.selected_index = self.selected_index.min(self.visible.len() - 1);
        }
    }

    /// Queues `deadline` and returns the timer action for it, unless timeouts
    /// are disabled.
    pub fn arm_deadline(&mut self, deadline: Deadline) -> Option<Action> {
        if self.request_timeout_secs == 0 {
            return None;
        }
        self.deadlines.arm(deadline);
        #[allow(clippy::cast_precision_loss)]
        let seconds = self.request_timeout_secs as f64;
        Some(Action::StartTimer { seconds })
    }

    /// Computes a renderable view model for a terminal of `rows` by `cols`.
    ///
    /// The list view shows a window of the visible subset centred on the
    /// selection; the detail view formats the current detail state.
    ///
    /// # Example
    ///
    /// ```rust
    /// # use zpokedex::app::AppState;
    /// # use zpokedex::ui::theme::Theme;
    /// # use zpokedex::ui::viewmodel::Body;
    /// # use zpokedex::Config;
    /// # let state = AppState::new(&Config::default(), Theme::default());
    /// let viewmodel = state.compute_viewmodel(24, 80);
    /// assert!(matches!(viewmodel.body, Body::List(_)));
    /// ```
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> UIViewModel {
        let body = match self.view_mode {
            ViewMode::List => Body::List(self.compute_list_view(rows, cols)),
            ViewMode::Detail => Body::Detail(self.compute_detail_view()),
        };

        UIViewModel {
            header: self.compute_header(),
            footer: self.compute_footer(),
            status: self.compute_status(),
            body,
        }
    }

    fn compute_list_view(&self, rows: usize, cols: usize) -> ListView {
        let search_bar = self.compute_search_bar();
        let prompt = match &self.input_mode {
            InputMode::GoTo(input) => Some(PromptInfo { input: input.clone() }),
            _ => None,
        };

        if self.visible.is_empty() {
            return ListView {
                display_items: vec![],
                selected_index: 0,
                empty_state: Some(self.compute_empty_state()),
                search_bar,
                prompt,
            };
        }

        let available_rows = self.calculate_available_rows(rows).max(1);

        let mut visible_start = self.selected_index.saturating_sub(available_rows / 2);
        let visible_end = (visible_start + available_rows).min(self.visible.len());

        if visible_end - visible_start < available_rows && self.visible.len() >= available_rows {
            visible_start = visible_end.saturating_sub(available_rows);
        }

        let highlight = matches!(self.input_mode, InputMode::Search(_)) && !self.search_query.is_empty();
        let records = self.aggregator.records();

        let display_items = self.visible[visible_start..visible_end]
            .iter()
            .enumerate()
            .filter_map(|(relative_idx, &record_idx)| {
                let pokemon = records.get(record_idx)?;
                let is_selected = visible_start + relative_idx == self.selected_index;
                Some(self.compute_display_item(pokemon, is_selected, highlight, cols))
            })
            .collect();

        ListView {
            display_items,
            selected_index: self.selected_index.saturating_sub(visible_start),
            empty_state: None,
            search_bar,
            prompt,
        }
    }

    fn compute_display_item(&self, pokemon: &Pokemon, is_selected: bool, highlight: bool, cols: usize) -> DisplayItem {
        let max_name = NAME_COLUMN_WIDTH - 2;
        let display_name = pokemon.display_name();
        let name = truncate(&display_name, max_name);

        let max_types = cols.saturating_sub(NUMBER_COLUMN_WIDTH + NAME_COLUMN_WIDTH);
        let types = pokemon
            .type_names()
            .into_iter()
            .map(humanize)
            .collect::<Vec<_>>()
            .join("/");

        // Ranges are computed on the raw name; they only line up with the
        // display name when humanizing kept every character. A truncated
        // name must not highlight its ellipsis.
        let shown = if name == display_name { max_name } else { max_name.saturating_sub(3) };
        let highlight_ranges = if highlight && display_name.chars().count() == pokemon.name.chars().count() {
            match_range(&pokemon.name, &self.search_query)
                .map(|(start, end)| (start.min(shown), end.min(shown)))
                .filter(|(start, end)| start < end)
                .into_iter()
                .collect()
        } else {
            vec![]
        };

        DisplayItem {
            number: pokemon.display_number(),
            name,
            types: truncate(&types, max_types),
            is_selected,
            highlight_ranges,
        }
    }

    fn compute_detail_view(&self) -> DetailView {
        match self.detail.state() {
            DetailState::Idle => DetailView::Loading { id: String::new() },
            DetailState::Loading { id, .. } => DetailView::Loading { id: id.clone() },
            DetailState::NotFound { id } => DetailView::NotFound { id: id.clone() },
            DetailState::Loaded(pokemon) => DetailView::Loaded(Box::new(detail_info(pokemon))),
        }
    }

    fn compute_empty_state(&self) -> EmptyState {
        if !self.aggregator.records().is_empty() {
            return EmptyState {
                message: "No Pokemon match".to_string(),
                subtitle: format!("Nothing loaded so far contains \"{}\"", self.search_query),
            };
        }

        if self.aggregator.is_busy() {
            EmptyState {
                message: "Loading Pokemon...".to_string(),
                subtitle: "Fetching the first page".to_string(),
            }
        } else if let Some(error) = self.aggregator.error() {
            EmptyState {
                message: error.to_string(),
                subtitle: "Press m to retry".to_string(),
            }
        } else if self.aggregator.is_exhausted() {
            EmptyState {
                message: "No Pokemon found".to_string(),
                subtitle: "The API returned no entries".to_string(),
            }
        } else {
            EmptyState {
                message: "No Pokemon loaded".to_string(),
                subtitle: "Press m to load a page".to_string(),
            }
        }
    }

    fn compute_header(&self) -> HeaderInfo {
        let title = match self.view_mode {
            ViewMode::List => {
                let total = self.aggregator.records().len();
                if self.search_query.is_empty() {
                    format!(" Pokedex ({total}) ")
                } else {
                    format!(" Pokedex ({}/{total}) ", self.visible.len())
                }
            }
            ViewMode::Detail => match self.detail.state() {
                DetailState::Loaded(pokemon) => {
                    format!(" Pokedex: {} {} ", pokemon.display_number(), pokemon.display_name())
                }
                _ => self
                    .detail
                    .current_id()
                    .map_or_else(|| " Pokedex ".to_string(), |id| format!(" Pokedex: {id} ")),
            },
        };
        HeaderInfo { title }
    }

    fn compute_footer(&self) -> FooterInfo {
        let keybindings = match (&self.view_mode, &self.input_mode) {
            (ViewMode::Detail, _) => "Esc/b: back  r: reload  q: quit",
            (ViewMode::List, InputMode::GoTo(_)) => "Type a name or number  Enter: open  ESC: cancel",
            (ViewMode::List, InputMode::Search(SearchFocus::Typing)) => {
                "ESC: exit search  Enter: results  Ctrl+n/p: navigate  Type to filter"
            }
            (ViewMode::List, InputMode::Search(SearchFocus::Navigating)) => {
                "ESC: exit search  /: edit query  j/k or Ctrl+n/p: navigate  Enter: open"
            }
            (ViewMode::List, InputMode::Normal) => {
                "j/k: navigate  Enter: open  /: search  #: go to  m: load more  q: quit"
            }
        };
        FooterInfo { keybindings: keybindings.to_string() }
    }

    fn compute_status(&self) -> Option<StatusLine> {
        if let Some(notice) = &self.notice {
            return Some(StatusLine { message: notice.clone(), kind: StatusKind::Error });
        }
        if self.view_mode == ViewMode::Detail {
            return None;
        }

        let loaded = self.aggregator.records().len();
        let status = if self.aggregator.is_busy() {
            let from = self.aggregator.cursor() + 1;
            let to = self.aggregator.cursor() + crate::catalog::PAGE_SIZE;
            StatusLine { message: format!("Loading entries {from}-{to}..."), kind: StatusKind::Info }
        } else if self.aggregator.error().is_some() {
            StatusLine {
                message: format!("{PAGE_ERROR_MESSAGE} Press m to retry."),
                kind: StatusKind::Error,
            }
        } else if self.aggregator.is_exhausted() {
            StatusLine { message: format!("All {loaded} Pokemon loaded."), kind: StatusKind::Info }
        } else {
            StatusLine { message: format!("{loaded} loaded. Press m to load more."), kind: StatusKind::Info }
        };
        Some(status)
    }

    fn compute_search_bar(&self) -> Option<SearchBarInfo> {
        if matches!(self.input_mode, InputMode::Search(_)) {
            Some(SearchBarInfo { query: self.search_query.clone() })
        } else {
            None
        }
    }

    /// Rows left for table entries after header, borders, table header,
    /// status line, footer, and a search or prompt box when open.
    const fn calculate_available_rows(&self, total_rows: usize) -> usize {
        match self.input_mode {
            InputMode::Normal => total_rows.saturating_sub(8),
            InputMode::Search(_) | InputMode::GoTo(_) => total_rows.saturating_sub(11),
        }
    }
}

fn detail_info(pokemon: &Pokemon) -> DetailInfo {
    DetailInfo {
        number: pokemon.display_number(),
        name: pokemon.display_name(),
        types: pokemon.type_names().into_iter().map(humanize).collect(),
        height: pokemon.height_label(),
        weight: pokemon.weight_label(),
        artwork: pokemon.artwork_url().map(str::to_string),
        abilities: pokemon
            .abilities
            .iter()
            .map(|a| {
                let label = humanize(&a.ability.name);
                if a.is_hidden { format!("{label} (Hidden)") } else { label }
            })
            .collect(),
        stats: pokemon
            .stats
            .iter()
            .map(|s| StatLine { label: humanize(&s.stat.name), value: s.base_stat })
            .collect(),
        moves: pokemon.shown_moves().map(|m| humanize(&m.entry.name)).collect(),
    }
}

/// Cuts `text` to `max` characters, ending with `...` when shortened.
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let keep = max.saturating_sub(3);
    let mut out: String = text.chars().take(keep).collect();
    out.push_str("...");
    out
}
