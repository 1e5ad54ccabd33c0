//! zpokedex: a Zellij plugin for browsing the PokeAPI catalog.
//!
//! The plugin pages through `GET /pokemon?limit=50&offset=N`, fetches the full
//! record behind every summary with a bounded number of concurrent requests,
//! and shows the accumulated entries as a searchable table. Selecting a row
//! (or typing a name or number into the go-to prompt) opens a detail view
//! built from a fresh `GET /pokemon/{id}`.

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← keys, web requests, timers
//! └─────────────────────────────────────────────────────┘
//!                        │ Event ↓   ↑ Action
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← state machine
//! │  - Event handling, modes                            │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                                     │
//! ┌───────────────────────────┐   ┌───────────────────────────┐
//! │ Catalog (catalog/)        │   │ UI Layer (ui/)            │
//! │ - List aggregator         │   │ - Rendering               │
//! │ - Search filter           │   │ - Theming                 │
//! │ - Detail fetcher          │   │ - Components              │
//! │ - Request deadlines       │   │                           │
//! └───────────────────────────┘   └───────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain & Infrastructure                            │
//! │  - Record models, errors (domain/)                  │
//! │  - Sandbox paths (infrastructure/)                  │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │  ← optional
//! │  - tracing + OpenTelemetry, OTLP JSON file export   │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! The library never performs I/O for the catalog itself. Every request leaves
//! the state machine as an [`Action::Fetch`] carrying a
//! [`catalog::RequestTag`], and every answer comes back as an
//! [`Event::Response`] with the same tag. Tags carry a page generation or a
//! detail sequence number, so answers to superseded requests are dropped.
//!
//! # Modules
//!
//! - [`app`]: Application state machine with event/action model
//! - [`catalog`]: Paginated aggregation, search filtering, detail fetching
//! - [`domain`]: API record models and errors
//! - [`infrastructure`]: Sandbox path utilities
//! - [`ui`]: Terminal rendering with theme support
//! - [`observability`]: OpenTelemetry tracing to a local file
//!
//! # Configuration
//!
//! ```kdl
//! pane {
//!     plugin location="file:/path/to/zpokedex.wasm" {
//!         api_base "https://pokeapi.co/api/v2"
//!         max_concurrent_requests "10"
//!         request_timeout_secs "15"
//!         theme "catppuccin-mocha"
//!         trace_level "info"
//!     }
//! }
//! ```
//!
//! # Example
//!
//! ```rust
//! use zpokedex::{handle_event, initialize, Action, Config, Event};
//!
//! let mut state = initialize(&Config::default());
//!
//! let (_, actions) = handle_event(&mut state, &Event::Start)?;
//! assert!(matches!(actions.first(), Some(Action::Fetch(_))));
//! # Ok::<(), zpokedex::PokedexError>(())
//! ```

pub mod app;
pub mod catalog;
pub mod domain;
pub mod infrastructure;
pub mod observability;
pub mod ui;

pub use app::{handle_event, Action, AppState, Event, InputMode, SearchFocus, ViewMode};
pub use domain::{PokedexError, Result};
pub use ui::Theme;

use std::collections::BTreeMap;

/// Default PokeAPI endpoint.
pub const DEFAULT_API_BASE: &str = "https://pokeapi.co/api/v2";

/// Default per-page cap on in-flight item requests.
pub const DEFAULT_MAX_CONCURRENT_REQUESTS: usize = 10;

/// Default request deadline in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 15;

/// Plugin configuration parsed from Zellij's configuration system.
///
/// ```kdl
/// plugin location="file:/path/to/zpokedex.wasm" {
///     api_base "http://localhost:8000/api/v2"
///     max_concurrent_requests "4"
///     request_timeout_secs "0"
///     theme_file "~/.config/zpokedex/theme.toml"
///     trace_level "zpokedex=debug"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// API base URL without a trailing `/`.
    pub api_base: String,

    /// Maximum item requests in flight per page load. Always at least 1.
    pub max_concurrent_requests: usize,

    /// Seconds before a page or detail request is abandoned. `0` disables
    /// timeouts.
    pub request_timeout_secs: u64,

    /// Built-in theme name: `pokedex-red`, `catppuccin-mocha` or
    /// `catppuccin-latte`. Ignored if `theme_file` is set.
    pub theme_name: Option<String>,

    /// Path to a custom TOML theme file. See [`ui::theme`] for the format.
    pub theme_file: Option<String>,

    /// `EnvFilter` directive for tracing. Default: `"info"`.
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            max_concurrent_requests: DEFAULT_MAX_CONCURRENT_REQUESTS,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            theme_name: None,
            theme_file: None,
            trace_level: None,
        }
    }
}

impl Config {
    /// Parses configuration from Zellij's configuration map.
    ///
    /// Unparsable values fall back to their defaults:
    ///
    /// - `api_base`: trailing `/` trimmed; must be an `http(s)://` URL
    /// - `max_concurrent_requests`: `usize`, raised to at least 1
    /// - `request_timeout_secs`: `u64`
    /// - `theme`, `theme_file`, `trace_level`: taken as-is
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use zpokedex::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("api_base".to_string(), "http://localhost:8000/api/v2/".to_string());
    /// map.insert("max_concurrent_requests".to_string(), "0".to_string());
    ///
    /// let config = Config::from_zellij(&map);
    /// assert_eq!(config.api_base, "http://localhost:8000/api/v2");
    /// assert_eq!(config.max_concurrent_requests, 1);
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let api_base = config.get("api_base").map_or_else(
            || DEFAULT_API_BASE.to_string(),
            |raw| {
                parse_api_base(raw).unwrap_or_else(|e| {
                    tracing::debug!(error = %e, "ignoring api_base");
                    DEFAULT_API_BASE.to_string()
                })
            },
        );

        let max_concurrent_requests = config
            .get("max_concurrent_requests")
            .and_then(|s| s.trim().parse::<usize>().ok())
            .unwrap_or(DEFAULT_MAX_CONCURRENT_REQUESTS)
            .max(1);

        let request_timeout_secs = config
            .get("request_timeout_secs")
            .and_then(|s| s.trim().parse::<u64>().ok())
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS);

        Self {
            api_base,
            max_concurrent_requests,
            request_timeout_secs,
            theme_name: config.get("theme").cloned(),
            theme_file: config.get("theme_file").cloned(),
            trace_level: config.get("trace_level").cloned(),
        }
    }
}

/// Validates an API base URL and strips trailing slashes.
///
/// # Errors
///
/// Returns [`PokedexError::Config`] unless the value is an `http://` or
/// `https://` URL with a host part.
pub fn parse_api_base(raw: &str) -> Result<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    let host = trimmed
        .strip_prefix("https://")
        .or_else(|| trimmed.strip_prefix("http://"));

    match host {
        Some(rest) if !rest.is_empty() => Ok(trimmed.to_string()),
        _ => Err(PokedexError::Config(format!(
            "api_base must be an http(s) URL, got {raw:?}"
        ))),
    }
}

/// Builds the initial [`AppState`]: the configured theme (file first, then
/// name, then the default) and an empty catalog. Nothing is fetched until the
/// shim delivers [`Event::Start`].
///
/// # Example
///
/// ```rust
/// use zpokedex::{initialize, Config};
///
/// let config = Config {
///     theme_name: Some("catppuccin-latte".to_string()),
///     ..Default::default()
/// };
///
/// let state = initialize(&config);
/// assert_eq!(state.visible_records().count(), 0);
/// ```
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!(api_base = %config.api_base, "initializing zpokedex plugin");

    let theme = config.theme_file.as_ref().map_or_else(
        || {
            config.theme_name.as_ref().map_or_else(Theme::default, |theme_name| {
                Theme::from_name(theme_name).unwrap_or_else(|| {
                    tracing::debug!(theme_name = %theme_name, "unknown theme, using default");
                    Theme::default()
                })
            })
        },
        |theme_file| {
            Theme::from_file(infrastructure::expand_tilde(theme_file)).unwrap_or_else(|e| {
                tracing::debug!(theme_file = %theme_file, error = %e, "failed to load theme from file, using default");
                Theme::default()
            })
        },
    );

    AppState::new(config, theme)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn empty_map_gives_defaults() {
        assert_eq!(Config::from_zellij(&BTreeMap::new()), Config::default());
    }

    #[test]
    fn parses_numbers_and_falls_back_on_garbage() {
        let config = Config::from_zellij(&map(&[
            ("max_concurrent_requests", "4"),
            ("request_timeout_secs", "soon"),
        ]));
        assert_eq!(config.max_concurrent_requests, 4);
        assert_eq!(config.request_timeout_secs, DEFAULT_REQUEST_TIMEOUT_SECS);

        let config = Config::from_zellij(&map(&[("request_timeout_secs", "0")]));
        assert_eq!(config.request_timeout_secs, 0);
    }

    #[test]
    fn rejects_non_http_api_base() {
        let config = Config::from_zellij(&map(&[("api_base", "ftp://example.com")]));
        assert_eq!(config.api_base, DEFAULT_API_BASE);

        assert!(matches!(parse_api_base("https://"), Err(PokedexError::Config(_))));
        assert_eq!(parse_api_base(" https://pokeapi.co/api/v2// ").unwrap(), "https://pokeapi.co/api/v2");
    }

    #[test]
    fn unknown_theme_falls_back_to_default() {
        let config = Config {
            theme_name: Some("no-such-theme".to_string()),
            ..Default::default()
        };
        let state = initialize(&config);
        assert_eq!(state.theme.colors.header_fg, Theme::default().colors.header_fg);
    }
}
