//! Single-record fetches for the detail view.
//!
//! Every failure (transport, non-success status, undecodable body, timeout)
//! collapses into one [`DetailState::NotFound`] outcome. Each fetch gets a new
//! sequence number; only the response matching the current `Loading` state is
//! applied, so results for a record the user already navigated away from are
//! dropped.

use super::request::{record_url, FetchRequest, HttpResponse, RequestTag};
use crate::domain::Pokemon;

/// What the detail view currently shows.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DetailState {
    /// No detail view is open.
    #[default]
    Idle,
    /// A fetch is in flight.
    Loading { id: String, seq: u64 },
    /// The record arrived.
    Loaded(Box<Pokemon>),
    /// The fetch failed for any reason.
    NotFound { id: String },
}

/// Fetches one record by identifier.
#[derive(Debug)]
pub struct DetailFetcher {
    base_url: String,
    seq: u64,
    state: DetailState,
}

impl DetailFetcher {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            seq: 0,
            state: DetailState::Idle,
        }
    }

    #[must_use]
    pub const fn state(&self) -> &DetailState {
        &self.state
    }

    /// Identifier of the record being shown or loaded.
    #[must_use]
    pub fn current_id(&self) -> Option<String> {
        match &self.state {
            DetailState::Idle => None,
            DetailState::Loading { id, .. } | DetailState::NotFound { id } => Some(id.clone()),
            DetailState::Loaded(pokemon) => Some(pokemon.id.to_string()),
        }
    }

    /// Starts fetching `id`, replacing whatever was shown before.
    ///
    /// # Example
    ///
    /// ```
    /// use zpokedex::catalog::{DetailFetcher, DetailState};
    ///
    /// let mut detail = DetailFetcher::new("https://pokeapi.co/api/v2");
    /// let request = detail.fetch_by_id("25");
    /// assert_eq!(request.url, "https://pokeapi.co/api/v2/pokemon/25");
    /// assert!(matches!(detail.state(), DetailState::Loading { .. }));
    /// ```
    pub fn fetch_by_id(&mut self, id: &str) -> FetchRequest {
        self.seq += 1;
        let id = id.trim().to_string();
        tracing::debug!(id = %id, seq = self.seq, "detail fetch started");

        let request = FetchRequest {
            url: record_url(&self.base_url, &id),
            tag: RequestTag::Detail { seq: self.seq },
        };
        self.state = DetailState::Loading { id, seq: self.seq };
        request
    }

    /// Sequence number of the in-flight fetch, used to arm its deadline.
    #[must_use]
    pub fn loading_seq(&self) -> Option<u64> {
        match &self.state {
            DetailState::Loading { seq, .. } => Some(*seq),
            _ => None,
        }
    }

    /// Applies a response. Returns `true` when the state changed.
    pub fn on_response(&mut self, seq: u64, response: &HttpResponse) -> bool {
        let id = match &self.state {
            DetailState::Loading { id, seq: current } if *current == seq => id.clone(),
            DetailState::Loading { seq: current, .. } => {
                tracing::debug!(seq, current = *current, "discarding stale detail response");
                return false;
            }
            _ => {
                tracing::debug!(seq, "detail response with no fetch in flight");
                return false;
            }
        };

        let url = record_url(&self.base_url, &id);
        self.state = match response.json::<Pokemon>(&url) {
            Ok(pokemon) => {
                tracing::debug!(id = %id, name = %pokemon.name, "detail loaded");
                DetailState::Loaded(Box::new(pokemon))
            }
            Err(e) => {
                tracing::debug!(id = %id, error = %e, "detail fetch failed");
                DetailState::NotFound { id }
            }
        };
        true
    }

    /// Applies the deadline of fetch `seq`. Returns `true` when it was still
    /// loading and is now not-found.
    pub fn expire(&mut self, seq: u64) -> bool {
        let id = match &self.state {
            DetailState::Loading { id, seq: current } if *current == seq => id.clone(),
            _ => return false,
        };
        tracing::debug!(id = %id, "detail fetch timed out");
        self.state = DetailState::NotFound { id };
        true
    }

    /// Closes the detail view. Any response still in flight becomes stale.
    pub fn reset(&mut self) {
        self.state = DetailState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loading_seq(detail: &DetailFetcher) -> u64 {
        detail.loading_seq().unwrap()
    }

    #[test]
    fn success_loads_the_record() {
        let mut detail = DetailFetcher::new("http://api");
        detail.fetch_by_id("25");
        let seq = loading_seq(&detail);

        assert!(detail.on_response(seq, &HttpResponse::new(200, r#"{"id":25,"name":"pikachu"}"#)));
        assert_eq!(detail.state(), &DetailState::Loaded(Box::new(Pokemon::new(25, "pikachu"))));
        assert_eq!(detail.current_id().as_deref(), Some("25"));
    }

    #[test]
    fn unknown_identifier_is_not_found() {
        let mut detail = DetailFetcher::new("http://api");
        detail.fetch_by_id("9999");
        let seq = loading_seq(&detail);

        assert!(detail.on_response(seq, &HttpResponse::new(404, "Not Found")));
        assert_eq!(detail.state(), &DetailState::NotFound { id: "9999".into() });
    }

    #[test]
    fn garbage_body_is_not_found() {
        let mut detail = DetailFetcher::new("http://api");
        detail.fetch_by_id("1");
        let seq = loading_seq(&detail);

        detail.on_response(seq, &HttpResponse::new(200, "{"));
        assert!(matches!(detail.state(), DetailState::NotFound { .. }));
    }

    #[test]
    fn response_for_a_previous_record_is_dropped() {
        let mut detail = DetailFetcher::new("http://api");
        detail.fetch_by_id("1");
        let first = loading_seq(&detail);
        detail.fetch_by_id("4");

        assert!(!detail.on_response(first, &HttpResponse::new(200, r#"{"id":1,"name":"bulbasaur"}"#)));
        assert!(matches!(detail.state(), DetailState::Loading { id, .. } if id == "4"));
    }

    #[test]
    fn response_after_reset_is_dropped() {
        let mut detail = DetailFetcher::new("http://api");
        detail.fetch_by_id("1");
        let seq = loading_seq(&detail);
        detail.reset();

        assert!(!detail.on_response(seq, &HttpResponse::new(200, r#"{"id":1,"name":"bulbasaur"}"#)));
        assert_eq!(detail.state(), &DetailState::Idle);
    }

    #[test]
    fn timeout_turns_loading_into_not_found() {
        let mut detail = DetailFetcher::new("http://api");
        detail.fetch_by_id("7");
        let seq = loading_seq(&detail);

        assert!(detail.expire(seq));
        assert_eq!(detail.state(), &DetailState::NotFound { id: "7".into() });
        assert!(!detail.expire(seq));
    }
}
