//! User interface rendering layer.
//!
//! ```text
//! AppState → compute_viewmodel → UIViewModel → render → ANSI Output
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: View model types representing renderable UI state
//! - [`renderer`]: Top-level rendering coordinator
//! - [`components`]: Composable UI component renderers
//! - [`helpers`]: Shared rendering utilities (highlighting, centring, bars)
//! - [`theme`]: Color schemes and ANSI escape sequence generation
//!
//! # Example
//!
//! ```rust
//! use zpokedex::app::AppState;
//! use zpokedex::ui::{render, Theme};
//! use zpokedex::Config;
//!
//! let state = AppState::new(&Config::default(), Theme::default());
//! render(&state, 24, 80);
//! ```

pub mod components;
pub mod helpers;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use renderer::render;
pub use theme::Theme;
pub use viewmodel::{Body, DetailView, DisplayItem, EmptyState, FooterInfo, HeaderInfo, ListView, SearchBarInfo, UIViewModel};
