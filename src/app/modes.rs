//! Input and view mode state types for the application.
//!
//! The plugin shows one of two views:
//! - **List**: the accumulated collection, optionally narrowed by search
//! - **Detail**: a single record reached from the list or the go-to prompt
//!
//! Input modes decide how keys are interpreted:
//! - **Normal**: navigation and commands
//! - **Search**: typing a filter term or navigating the filtered results
//! - **`GoTo`**: typing an identifier to open directly
//!
//! # Example
//!
//! ```rust
//! use zpokedex::app::modes::{InputMode, SearchFocus, ViewMode};
//!
//! let input_mode = InputMode::Search(SearchFocus::Typing);
//! let view_mode = ViewMode::List;
//! assert_ne!(input_mode, InputMode::Normal);
//! assert_eq!(view_mode, ViewMode::List);
//! ```

/// Focus state within search mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchFocus {
    /// User is typing in the search input field.
    ///
    /// Accepts character input, backspace, and enter (to switch to Navigating).
    Typing,

    /// User is navigating through filtered search results.
    ///
    /// Accepts j/k for movement, enter to open, and / to return to Typing.
    Navigating,
}

/// Current input handling mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputMode {
    /// Default navigation and command mode.
    Normal,

    /// Active search mode with focus state.
    Search(SearchFocus),

    /// Go-to prompt holding the identifier typed so far.
    GoTo(String),
}

/// Which screen is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    /// The paginated, searchable list.
    List,

    /// One record's details.
    Detail,
}
