//! Web request plumbing shared by the catalog components.
//!
//! Zellij performs web requests on the plugin's behalf and reports each result
//! later as an event carrying the context map that was attached to the request.
//! This module defines what we attach ([`RequestTag`]), what we ask the host to
//! fetch ([`FetchRequest`]), and what comes back ([`HttpResponse`]).

use crate::domain::error::{PokedexError, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Context key under which the serialized [`RequestTag`] travels.
pub const CONTEXT_KEY: &str = "zpokedex";

/// Identifies which component a response belongs to and whether it is still
/// wanted.
///
/// `generation` increases with every page load and `seq` with every detail
/// fetch. A response whose counter no longer matches the in-flight work is
/// stale and gets dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RequestTag {
    /// The list endpoint for one page.
    Page { generation: u64, offset: usize },
    /// One record of the page being resolved; `slot` is its position in the page.
    Item { generation: u64, slot: usize },
    /// The detail view's record.
    Detail { seq: u64 },
}

impl RequestTag {
    /// Serializes the tag into a Zellij request context.
    ///
    /// # Example
    ///
    /// ```
    /// use zpokedex::catalog::RequestTag;
    ///
    /// let tag = RequestTag::Detail { seq: 3 };
    /// let context = tag.to_context();
    /// assert_eq!(RequestTag::from_context(&context), Some(tag));
    /// ```
    #[must_use]
    pub fn to_context(&self) -> BTreeMap<String, String> {
        let mut context = BTreeMap::new();
        match serde_json::to_string(self) {
            Ok(json) => {
                context.insert(CONTEXT_KEY.to_string(), json);
            }
            Err(e) => {
                tracing::debug!(error = %e, "failed to serialize request tag");
            }
        }
        context
    }

    /// Recovers a tag from a response context. Returns `None` for responses
    /// that were not issued by this plugin or carry an unreadable tag.
    #[must_use]
    pub fn from_context(context: &BTreeMap<String, String>) -> Option<Self> {
        let raw = context.get(CONTEXT_KEY)?;
        serde_json::from_str(raw)
            .map_err(|e| tracing::debug!(error = %e, "unreadable request tag"))
            .ok()
    }
}

/// A GET request the plugin runtime should hand to the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub url: String,
    pub tag: RequestTag,
}

/// A completed web request as reported by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    #[must_use]
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self { status, body: body.into() }
    }

    /// Whether the status code is in the 2xx range.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// Decodes a successful JSON body.
    ///
    /// # Errors
    ///
    /// - [`PokedexError::Transport`] when the host reports status 0
    /// - [`PokedexError::Http`] for any other non-2xx status
    /// - [`PokedexError::Decode`] when the body is not the expected JSON
    pub fn json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        if self.status == 0 {
            return Err(PokedexError::Transport(
                String::from_utf8_lossy(&self.body).into_owned(),
            ));
        }
        if !self.is_success() {
            return Err(PokedexError::Http {
                status: self.status,
                url: url.to_string(),
            });
        }
        Ok(serde_json::from_slice(&self.body)?)
    }
}

/// Builds the list endpoint URL for one page.
///
/// # Example
///
/// ```
/// use zpokedex::catalog::request::page_url;
///
/// assert_eq!(
///     page_url("https://pokeapi.co/api/v2", 50, 100),
///     "https://pokeapi.co/api/v2/pokemon?limit=50&offset=100",
/// );
/// ```
#[must_use]
pub fn page_url(base: &str, limit: usize, offset: usize) -> String {
    format!("{base}/pokemon?limit={limit}&offset={offset}")
}

/// Builds the per-record endpoint URL.
#[must_use]
pub fn record_url(base: &str, id_or_name: &str) -> String {
    format!("{base}/pokemon/{id_or_name}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Pokemon;

    #[test]
    fn tags_survive_a_context_round_trip() {
        for tag in [
            RequestTag::Page { generation: 1, offset: 50 },
            RequestTag::Item { generation: 2, slot: 7 },
            RequestTag::Detail { seq: 9 },
        ] {
            assert_eq!(RequestTag::from_context(&tag.to_context()), Some(tag));
        }
    }

    #[test]
    fn foreign_context_is_ignored() {
        let mut context = BTreeMap::new();
        context.insert("other-plugin".to_string(), "x".to_string());
        assert_eq!(RequestTag::from_context(&context), None);

        context.insert(CONTEXT_KEY.to_string(), "not json".to_string());
        assert_eq!(RequestTag::from_context(&context), None);
    }

    #[test]
    fn non_success_status_is_an_http_error() {
        let response = HttpResponse::new(404, "Not Found");
        let err = response.json::<Pokemon>("u").unwrap_err();
        assert!(matches!(err, PokedexError::Http { status: 404, .. }));
    }

    #[test]
    fn non_json_body_is_a_decode_error() {
        let response = HttpResponse::new(200, "<html>");
        let err = response.json::<Pokemon>("u").unwrap_err();
        assert!(matches!(err, PokedexError::Decode(_)));
    }

    #[test]
    fn status_zero_is_a_transport_error() {
        let response = HttpResponse::new(0, "connection refused");
        let err = response.json::<Pokemon>("u").unwrap_err();
        assert!(matches!(err, PokedexError::Transport(ref msg) if msg == "connection refused"));
    }

    #[test]
    fn record_url_joins_identifier() {
        assert_eq!(record_url("http://api", "25"), "http://api/pokemon/25");
    }
}
