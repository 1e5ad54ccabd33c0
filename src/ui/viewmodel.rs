//! View model types representing renderable UI state.
//!
//! View models are computed from application state by
//! `AppState::compute_viewmodel()` and consumed by the renderer. They hold
//! display-ready data only: formatted numbers, labels, highlight ranges and
//! the selection.
//!
//! # Example
//!
//! ```rust
//! use zpokedex::ui::viewmodel::{Body, DisplayItem, FooterInfo, HeaderInfo, ListView, UIViewModel};
//!
//! let vm = UIViewModel {
//!     header: HeaderInfo { title: " Pokedex (1) ".to_string() },
//!     footer: FooterInfo { keybindings: "q: quit".to_string() },
//!     status: None,
//!     body: Body::List(ListView {
//!         display_items: vec![DisplayItem {
//!             number: "#025".to_string(),
//!             name: "Pikachu".to_string(),
//!             types: "Electric".to_string(),
//!             is_selected: true,
//!             highlight_ranges: vec![(0, 2)],
//!         }],
//!         selected_index: 0,
//!         empty_state: None,
//!         search_bar: None,
//!         prompt: None,
//!     }),
//! };
//! assert!(matches!(vm.body, Body::List(_)));
//! ```

/// Complete UI view model for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UIViewModel {
    /// Header information (title, counts).
    pub header: HeaderInfo,

    /// Footer information (keybindings).
    pub footer: FooterInfo,

    /// Status line shown above the footer (loading, errors, end of data).
    pub status: Option<StatusLine>,

    /// Main content area.
    pub body: Body,
}

/// What fills the space between header and footer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Body {
    /// The collection table.
    List(ListView),
    /// A single record.
    Detail(DetailView),
}

/// The list screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListView {
    /// Rows visible in the current window.
    pub display_items: Vec<DisplayItem>,

    /// Index of the selected row within `display_items`.
    pub selected_index: usize,

    /// Shown instead of the table when there is nothing to list.
    pub empty_state: Option<EmptyState>,

    /// Present while search mode is active.
    pub search_bar: Option<SearchBarInfo>,

    /// Present while the go-to prompt is open.
    pub prompt: Option<PromptInfo>,
}

/// One row of the collection table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayItem {
    /// Catalog number (`#025`).
    pub number: String,

    /// Human-readable name.
    pub name: String,

    /// Type names joined with `/`.
    pub types: String,

    /// Whether this item is currently selected.
    pub is_selected: bool,

    /// Character ranges of `name` to highlight for the search term.
    ///
    /// Each tuple is `(start_index, end_index)` in UTF-8 character indices.
    pub highlight_ranges: Vec<(usize, usize)>,
}

/// Header display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    /// Title text to display in the header.
    pub title: String,
}

/// Footer display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterInfo {
    /// Keybinding help text.
    pub keybindings: String,
}

/// Severity of a status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Error,
}

/// One line of feedback about background work.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub message: String,
    pub kind: StatusKind,
}

/// Empty state message display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    /// Primary message (e.g., "No Pokemon match").
    pub message: String,

    /// Secondary explanatory text.
    pub subtitle: String,
}

/// Search bar display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchBarInfo {
    /// Current search query text.
    pub query: String,
}

/// Go-to prompt display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptInfo {
    /// Identifier typed so far.
    pub input: String,
}

/// The detail screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailView {
    /// Waiting for the record.
    Loading { id: String },
    /// The record could not be loaded.
    NotFound { id: String },
    /// The record, formatted for display.
    Loaded(Box<DetailInfo>),
}

/// Formatted fields of a loaded record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailInfo {
    pub number: String,
    pub name: String,
    pub types: Vec<String>,
    pub height: String,
    pub weight: String,
    /// Artwork locator, shown as text.
    pub artwork: Option<String>,
    /// Ability labels, hidden ones suffixed with `(Hidden)`.
    pub abilities: Vec<String>,
    pub stats: Vec<StatLine>,
    pub moves: Vec<String>,
}

/// One base stat with its label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatLine {
    pub label: String,
    pub value: u32,
}
