//! Event handling and state transition logic.
//!
//! [`handle_event`] is the only place state changes. It takes an [`Event`]
//! (user input already mapped by the plugin shim, a web response, or a timer
//! tick), mutates [`AppState`], and returns whether to re-render plus the
//! [`Action`]s the shim must execute.
//!
//! # Event Types
//!
//! - **Navigation**: `KeyDown`, `KeyUp`, `OpenSelected`, `Back`
//! - **Input**: `Char`, `Backspace`, `Escape`
//! - **Mode Switching**: `SearchMode`, `FocusSearchBar`, `FocusResults`,
//!   `ExitSearch`, `GoToMode`, `SubmitGoTo`
//! - **Loading**: `Start`, `LoadMore`, `Reload`
//! - **Host**: `Response`, `Timer`, `PermissionDenied`
//!
//! # Example
//!
//! ```rust
//! use zpokedex::app::{handle_event, Action, AppState, Event};
//! use zpokedex::ui::theme::Theme;
//! use zpokedex::Config;
//!
//! let mut state = AppState::new(&Config::default(), Theme::default());
//! let (should_render, actions) = handle_event(&mut state, &Event::Start)?;
//! assert!(should_render);
//! assert!(matches!(actions[0], Action::Fetch(_)));
//! # Ok::<(), zpokedex::PokedexError>(())
//! ```

use super::modes::{InputMode, SearchFocus, ViewMode};
use crate::app::{Action, AppState};
use crate::catalog::{Deadline, HttpResponse, PageStart, Progress, RequestTag};
use crate::domain::error::Result;

/// Events triggered by user input, web responses, or timers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Web access was granted; loads the first page.
    Start,
    /// Web access was refused; nothing can be fetched.
    PermissionDenied,

    /// Moves selection cursor down by one position (wraps to top).
    KeyDown,
    /// Moves selection cursor up by one position (wraps to bottom).
    KeyUp,
    /// Hides the plugin pane.
    CloseFocus,
    /// Opens the detail view for the selected record.
    OpenSelected,
    /// Leaves the detail view.
    Back,
    /// Loads the next page, or retries the page that failed.
    LoadMore,
    /// Fetches the shown detail record again.
    Reload,

    /// Enters search mode with typing focus.
    SearchMode,
    /// Focuses the search input field (from navigating mode).
    FocusSearchBar,
    /// Focuses the search results list (from typing mode).
    FocusResults,
    /// Exits search mode and clears the query.
    ExitSearch,

    /// Opens the go-to prompt.
    GoToMode,
    /// Opens the detail view for the identifier typed in the go-to prompt.
    SubmitGoTo,

    /// Appends a character to the search query or go-to input.
    Char(char),
    /// Removes the last character from the search query or go-to input.
    Backspace,
    /// Returns to normal mode, clearing any search.
    Escape,

    /// A web request issued by this plugin completed.
    Response {
        tag: RequestTag,
        response: HttpResponse,
    },
    /// A host timer armed for a request deadline fired.
    Timer,
}

/// Processes an event, mutates application state, and returns whether to
/// re-render along with the actions to execute.
///
/// # Errors
///
/// Reserved for failures that must reach the plugin shim; the loaders absorb
/// their own failures into state.
#[allow(clippy::too_many_lines)]
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?event_name(event)).entered();

    match event {
        Event::Start => {
            state.notice = None;
            if state.aggregator.is_busy() || !state.aggregator.records().is_empty() {
                return Ok((true, vec![]));
            }
            tracing::debug!("loading first page");
            Ok((true, load_next_page(state)))
        }
        Event::PermissionDenied => {
            tracing::warn!("web access denied");
            state.notice = Some("Web access was denied, nothing can be loaded.".to_string());
            Ok((true, vec![]))
        }
        Event::KeyDown => {
            if state.view_mode != ViewMode::List {
                return Ok((false, vec![]));
            }
            state.move_selection_down();
            Ok((true, vec![]))
        }
        Event::KeyUp => {
            if state.view_mode != ViewMode::List {
                return Ok((false, vec![]));
            }
            state.move_selection_up();
            Ok((true, vec![]))
        }
        Event::CloseFocus => Ok((false, vec![Action::CloseFocus])),
        Event::OpenSelected => {
            let Some(pokemon) = state.selected_record() else {
                tracing::debug!("no record selected");
                if matches!(state.input_mode, InputMode::Search(_)) {
                    tracing::debug!("exiting search mode (no selection)");
                    state.input_mode = InputMode::Normal;
                    state.search_query.clear();
                    state.apply_search_filter();
                    return Ok((true, vec![]));
                }
                return Ok((false, vec![]));
            };

            let id = pokemon.id.to_string();
            tracing::debug!(id = %id, name = %pokemon.name, "record selected");
            Ok((true, open_detail(state, &id)))
        }
        Event::Back => {
            if state.view_mode != ViewMode::Detail {
                return Ok((false, vec![]));
            }
            state.detail.reset();
            state.view_mode = ViewMode::List;
            Ok((true, vec![]))
        }
        Event::LoadMore => {
            if state.view_mode != ViewMode::List {
                return Ok((false, vec![]));
            }
            let actions = load_next_page(state);
            Ok((!actions.is_empty(), actions))
        }
        Event::Reload => {
            if state.view_mode != ViewMode::Detail {
                return Ok((false, vec![]));
            }
            let Some(id) = state.detail.current_id() else {
                return Ok((false, vec![]));
            };
            tracing::debug!(id = %id, "reloading detail");
            Ok((true, open_detail(state, &id)))
        }
        Event::SearchMode => {
            tracing::debug!("entering search mode");
            state.input_mode = InputMode::Search(SearchFocus::Typing);
            state.search_query.clear();
            state.apply_search_filter();
            Ok((true, vec![]))
        }
        Event::FocusSearchBar => {
            state.input_mode = InputMode::Search(SearchFocus::Typing);
            Ok((true, vec![]))
        }
        Event::FocusResults => {
            if state.search_query.is_empty() {
                state.input_mode = InputMode::Normal;
                state.apply_search_filter();
                return Ok((true, vec![]));
            }
            state.input_mode = InputMode::Search(SearchFocus::Navigating);
            Ok((true, vec![]))
        }
        Event::ExitSearch | Event::Escape => {
            tracing::debug!(query = %state.search_query, "returning to normal mode");
            state.input_mode = InputMode::Normal;
            state.search_query.clear();
            state.apply_search_filter();
            Ok((true, vec![]))
        }
        Event::GoToMode => {
            state.input_mode = InputMode::GoTo(String::new());
            Ok((true, vec![]))
        }
        Event::SubmitGoTo => {
            let InputMode::GoTo(input) = &state.input_mode else {
                return Ok((false, vec![]));
            };
            let id = input.trim().to_string();
            state.input_mode = InputMode::Normal;
            if id.is_empty() {
                return Ok((true, vec![]));
            }
            tracing::debug!(id = %id, "go-to submitted");
            Ok((true, open_detail(state, &id)))
        }
        Event::Char(c) => match &mut state.input_mode {
            InputMode::Search(_) => {
                state.search_query.push(*c);
                tracing::trace!(query = %state.search_query, char = %c, "search query updated");
                state.apply_search_filter();
                Ok((true, vec![]))
            }
            InputMode::GoTo(input) => {
                if !(c.is_ascii_alphanumeric() || *c == '-') {
                    return Ok((false, vec![]));
                }
                input.push(c.to_ascii_lowercase());
                Ok((true, vec![]))
            }
            InputMode::Normal => Ok((false, vec![])),
        },
        Event::Backspace => match &mut state.input_mode {
            InputMode::Search(_) => {
                state.search_query.pop();
                state.apply_search_filter();
                Ok((true, vec![]))
            }
            InputMode::GoTo(input) => Ok((input.pop().is_some(), vec![])),
            InputMode::Normal => Ok((false, vec![])),
        },
        Event::Response { tag, response } => match tag {
            RequestTag::Detail { seq } => Ok((state.detail.on_response(*seq, response), vec![])),
            RequestTag::Page { .. } | RequestTag::Item { .. } => {
                let progress = state.aggregator.on_response(tag, response);
                Ok(apply_progress(state, progress))
            }
        },
        Event::Timer => match state.deadlines.fire() {
            Some(Deadline::Page(generation)) => {
                let progress = state.aggregator.expire(generation);
                Ok(apply_progress(state, progress))
            }
            Some(Deadline::Detail(seq)) => Ok((state.detail.expire(seq), vec![])),
            None => {
                tracing::debug!("timer with no armed deadline");
                Ok((false, vec![]))
            }
        },
    }
}

/// Starts loading the page at the aggregator's cursor.
fn load_next_page(state: &mut AppState) -> Vec<Action> {
    match state.aggregator.load_page(state.aggregator.cursor()) {
        PageStart::Started(request) => {
            let mut actions = vec![];
            if let RequestTag::Page { generation, .. } = request.tag {
                actions.extend(state.arm_deadline(Deadline::Page(generation)));
            }
            actions.insert(0, Action::Fetch(request));
            actions
        }
        PageStart::Busy | PageStart::Exhausted => vec![],
    }
}

/// Switches to the detail view and starts fetching `id`.
fn open_detail(state: &mut AppState, id: &str) -> Vec<Action> {
    state.view_mode = ViewMode::Detail;
    let request = state.detail.fetch_by_id(id);
    let mut actions = vec![];
    if let RequestTag::Detail { seq } = request.tag {
        actions.extend(state.arm_deadline(Deadline::Detail(seq)));
    }
    actions.insert(0, Action::Fetch(request));
    actions
}

/// Turns aggregator progress into actions; a settled page refreshes the
/// visible subset.
fn apply_progress(state: &mut AppState, progress: Progress) -> (bool, Vec<Action>) {
    let actions = progress.requests.into_iter().map(Action::Fetch).collect();
    if progress.settled {
        state.apply_search_filter();
        tracing::debug!(
            records = state.aggregator.records().len(),
            visible = state.visible.len(),
            "page settled"
        );
    }
    (progress.settled, actions)
}

/// Short event label for spans; responses would otherwise log their bodies.
const fn event_name(event: &Event) -> &'static str {
    match event {
        Event::Start => "Start",
        Event::PermissionDenied => "PermissionDenied",
        Event::KeyDown => "KeyDown",
        Event::KeyUp => "KeyUp",
        Event::CloseFocus => "CloseFocus",
        Event::OpenSelected => "OpenSelected",
        Event::Back => "Back",
        Event::LoadMore => "LoadMore",
        Event::Reload => "Reload",
        Event::SearchMode => "SearchMode",
        Event::FocusSearchBar => "FocusSearchBar",
        Event::FocusResults => "FocusResults",
        Event::ExitSearch => "ExitSearch",
        Event::GoToMode => "GoToMode",
        Event::SubmitGoTo => "SubmitGoTo",
        Event::Char(_) => "Char",
        Event::Backspace => "Backspace",
        Event::Escape => "Escape",
        Event::Response { .. } => "Response",
        Event::Timer => "Timer",
    }
}
