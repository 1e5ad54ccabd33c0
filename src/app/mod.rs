//! Application layer coordinating state, events, and actions.
//!
//! This layer sits between the plugin runtime (main.rs) and the catalog and
//! UI layers. Everything in it is pure: host effects leave as [`Action`]s and
//! host results come back as [`Event`]s.
//!
//! # Architecture
//!
//! ```text
//! User Input → Events → Event Handler → State Mutations → Actions → Host calls
//!                           ↑                                  ↓
//!                           └──── WebRequestResult / Timer ────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`handler`]: Event processing logic and state transition coordinator
//! - [`modes`]: Input and view mode state machine types
//! - [`state`]: Central application state container and view model computation
//!
//! # Example
//!
//! ```rust
//! use zpokedex::app::{handle_event, AppState, Event};
//! use zpokedex::ui::theme::Theme;
//! use zpokedex::Config;
//!
//! let mut state = AppState::new(&Config::default(), Theme::default());
//! let (_render, actions) = handle_event(&mut state, &Event::KeyDown)?;
//! assert!(actions.is_empty());
//! # Ok::<(), zpokedex::PokedexError>(())
//! ```

pub mod actions;
pub mod handler;
pub mod modes;
pub mod state;

pub use actions::Action;
pub use handler::{handle_event, Event};
pub use modes::{InputMode, SearchFocus, ViewMode};
pub use state::AppState;
