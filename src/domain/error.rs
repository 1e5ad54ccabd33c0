//! Error types for the zpokedex plugin.
//!
//! This module defines the centralized error type [`PokedexError`] and a type alias
//! [`Result`] used throughout the plugin. All errors are implemented with the
//! `thiserror` crate.
//!
//! Most variants describe why a single web request produced no record. Callers in
//! the catalog layer decide how visible such a failure is: item failures are
//! absorbed, page and detail failures become view state.

use thiserror::Error;

/// The main error type for zpokedex operations.
///
/// # Examples
///
/// ```
/// use zpokedex::domain::PokedexError;
///
/// let err = PokedexError::Http { status: 404, url: "https://pokeapi.co/api/v2/pokemon/9999".into() };
/// assert_eq!(err.to_string(), "HTTP 404 from https://pokeapi.co/api/v2/pokemon/9999");
/// ```
#[derive(Debug, Error)]
pub enum PokedexError {
    /// The API answered with a non-success status code.
    #[error("HTTP {status} from {url}")]
    Http {
        /// Status code reported by the host.
        status: u16,
        /// Requested URL.
        url: String,
    },

    /// The host could not complete the request at all.
    ///
    /// Zellij reports transport failures as a response whose body carries the
    /// error text; the string holds that text.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The response body was not the JSON shape we expect.
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// No response arrived before the request deadline.
    #[error("Request timed out")]
    Timeout,

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Theme parsing or loading failed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// Configuration is invalid.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// A specialized `Result` type for zpokedex operations.
pub type Result<T> = std::result::Result<T, PokedexError>;
