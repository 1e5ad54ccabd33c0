//! Incremental list loading.
//!
//! [`ListAggregator`] owns the accumulated collection and drives one page load
//! at a time through two phases:
//!
//! ```text
//! load_page(offset) ──► Listing ──page response──► Resolving ──all items settled──► idle
//!                         │  (empty page: exhausted)     │  (fan-out ≤ max_in_flight)
//!                         └─ failure/timeout: error,     └─ timeout: missing items absent
//!                            cursor unchanged
//! ```
//!
//! Item results are kept as `Result` slots in page order and filtered to
//! successes only at the join point, so out-of-order responses still append in
//! summary order and a failing item just lowers the page's yield.

use super::request::{page_url, record_url, FetchRequest, HttpResponse, RequestTag};
use crate::domain::error::{PokedexError, Result};
use crate::domain::{Pokemon, Summary, SummaryPage};
use std::collections::VecDeque;

/// Number of summaries requested per page.
pub const PAGE_SIZE: usize = 50;

/// Message shown for a page-level failure.
pub const PAGE_ERROR_MESSAGE: &str = "Failed to load Pokemon data.";

/// Outcome of asking the aggregator to load a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageStart {
    /// The list request for the page should be issued.
    Started(FetchRequest),
    /// A page is already in flight; nothing was issued.
    Busy,
    /// The source reported an empty page earlier; nothing was issued.
    Exhausted,
}

/// What a response or timeout did to the in-flight page.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Progress {
    /// Follow-up requests to issue (item fetches).
    pub requests: Vec<FetchRequest>,
    /// Whether the page load finished (appended, exhausted, or failed).
    pub settled: bool,
}

impl Progress {
    const fn idle() -> Self {
        Self { requests: Vec::new(), settled: false }
    }

    const fn settled() -> Self {
        Self { requests: Vec::new(), settled: true }
    }
}

#[derive(Debug)]
enum Phase {
    Listing,
    Resolving {
        urls: Vec<String>,
        slots: Vec<Option<Result<Pokemon>>>,
        queued: VecDeque<usize>,
        outstanding: usize,
    },
}

#[derive(Debug)]
struct PageLoad {
    generation: u64,
    offset: usize,
    phase: Phase,
}

/// Accumulates records page by page from the list endpoint.
#[derive(Debug)]
pub struct ListAggregator {
    base_url: String,
    max_in_flight: usize,
    records: Vec<Pokemon>,
    cursor: usize,
    exhausted: bool,
    error: Option<String>,
    generation: u64,
    in_flight: Option<PageLoad>,
}

impl ListAggregator {
    /// Creates an empty aggregator.
    ///
    /// `max_in_flight` caps concurrent item fetches within a page and is
    /// clamped to at least 1.
    #[must_use]
    pub fn new(base_url: impl Into<String>, max_in_flight: usize) -> Self {
        Self {
            base_url: base_url.into(),
            max_in_flight: max_in_flight.max(1),
            records: Vec::new(),
            cursor: 0,
            exhausted: false,
            error: None,
            generation: 0,
            in_flight: None,
        }
    }

    /// The accumulated collection, in insertion order.
    #[must_use]
    pub fn records(&self) -> &[Pokemon] {
        &self.records
    }

    /// Offset of the next page to load.
    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// Whether a page load is in flight.
    #[must_use]
    pub const fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Whether the source has run out of pages.
    #[must_use]
    pub const fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Page-level error from the last load, if it failed.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Generation of the in-flight page, used to arm its deadline.
    #[must_use]
    pub fn in_flight_generation(&self) -> Option<u64> {
        self.in_flight.as_ref().map(|load| load.generation)
    }

    /// Starts loading the page at `offset`.
    ///
    /// Clears any previous page error. The offset is taken as given; callers
    /// normally pass [`cursor`](Self::cursor).
    pub fn load_page(&mut self, offset: usize) -> PageStart {
        if self.exhausted {
            tracing::debug!(offset, "source exhausted, ignoring load");
            return PageStart::Exhausted;
        }
        if self.in_flight.is_some() {
            tracing::debug!(offset, "page load already in flight");
            return PageStart::Busy;
        }

        self.generation += 1;
        self.error = None;
        self.in_flight = Some(PageLoad {
            generation: self.generation,
            offset,
            phase: Phase::Listing,
        });

        tracing::debug!(offset, generation = self.generation, "page load started");

        PageStart::Started(FetchRequest {
            url: page_url(&self.base_url, PAGE_SIZE, offset),
            tag: RequestTag::Page { generation: self.generation, offset },
        })
    }

    /// Feeds the response of a `Page` or `Item` request into the in-flight load.
    ///
    /// Responses for a different generation, or with a tag of another kind, are
    /// ignored.
    pub fn on_response(&mut self, tag: &RequestTag, response: &HttpResponse) -> Progress {
        match *tag {
            RequestTag::Page { generation, offset } if self.is_current(generation) => {
                self.on_page(offset, response)
            }
            RequestTag::Item { generation, slot } if self.is_current(generation) => {
                self.on_item(slot, response)
            }
            RequestTag::Page { .. } | RequestTag::Item { .. } => {
                tracing::debug!(tag = ?tag, "discarding stale list response");
                Progress::idle()
            }
            RequestTag::Detail { .. } => Progress::idle(),
        }
    }

    /// Applies the deadline of page `generation`.
    ///
    /// A page still listing fails like a transport error. A page still
    /// resolving settles with every unfinished item treated as absent.
    pub fn expire(&mut self, generation: u64) -> Progress {
        if !self.is_current(generation) {
            return Progress::idle();
        }
        let Some(load) = self.in_flight.as_mut() else {
            return Progress::idle();
        };
        let offset = load.offset;

        let still_listing = match &mut load.phase {
            Phase::Listing => true,
            Phase::Resolving { slots, queued, outstanding, .. } => {
                let missing = slots.iter().filter(|s| s.is_none()).count();
                tracing::warn!(offset, missing, "page resolution timed out");
                for slot in slots.iter_mut().filter(|s| s.is_none()) {
                    *slot = Some(Err(PokedexError::Timeout));
                }
                queued.clear();
                *outstanding = 0;
                false
            }
        };

        if still_listing {
            tracing::error!(offset, "page listing timed out");
            self.fail_page();
        } else {
            self.finish_page();
        }
        Progress::settled()
    }

    fn is_current(&self, generation: u64) -> bool {
        self.in_flight.as_ref().is_some_and(|load| load.generation == generation)
    }

    fn on_page(&mut self, offset: usize, response: &HttpResponse) -> Progress {
        let url = page_url(&self.base_url, PAGE_SIZE, offset);
        let Some(load) = self.in_flight.as_mut() else {
            return Progress::idle();
        };
        if !matches!(load.phase, Phase::Listing) {
            tracing::debug!(offset, "duplicate page response ignored");
            return Progress::idle();
        }

        let page = match response.json::<SummaryPage>(&url) {
            Ok(page) => page,
            Err(e) => {
                tracing::error!(offset, error = %e, "page fetch failed");
                self.fail_page();
                return Progress::settled();
            }
        };

        if page.results.is_empty() {
            tracing::debug!(offset, "empty page, source exhausted");
            self.exhausted = true;
            self.in_flight = None;
            return Progress::settled();
        }

        tracing::debug!(offset, summaries = page.results.len(), "page listed, resolving records");

        let generation = load.generation;
        let urls: Vec<String> = page
            .results
            .iter()
            .map(|summary: &Summary| record_url(&self.base_url, summary.identifier()))
            .collect();
        let mut queued: VecDeque<usize> = (0..urls.len()).collect();
        let mut requests = Vec::new();
        while requests.len() < self.max_in_flight {
            let Some(slot) = queued.pop_front() else { break };
            requests.push(FetchRequest {
                url: urls[slot].clone(),
                tag: RequestTag::Item { generation, slot },
            });
        }

        load.phase = Phase::Resolving {
            slots: urls.iter().map(|_| None).collect(),
            urls,
            queued,
            outstanding: requests.len(),
        };

        Progress { requests, settled: false }
    }

    fn on_item(&mut self, slot: usize, response: &HttpResponse) -> Progress {
        let Some(load) = self.in_flight.as_mut() else {
            return Progress::idle();
        };
        let generation = load.generation;
        let Phase::Resolving { urls, slots, queued, outstanding } = &mut load.phase else {
            tracing::debug!(slot, "item response before listing completed");
            return Progress::idle();
        };
        let Some(entry) = slots.get_mut(slot) else {
            tracing::debug!(slot, "item slot out of range");
            return Progress::idle();
        };
        if entry.is_some() {
            tracing::debug!(slot, "duplicate item response ignored");
            return Progress::idle();
        }

        *entry = Some(response.json::<Pokemon>(&urls[slot]));
        *outstanding = outstanding.saturating_sub(1);

        let mut requests = Vec::new();
        if let Some(next) = queued.pop_front() {
            requests.push(FetchRequest {
                url: urls[next].clone(),
                tag: RequestTag::Item { generation, slot: next },
            });
            *outstanding += 1;
        }

        let done = *outstanding == 0 && queued.is_empty();
        if done {
            self.finish_page();
        }
        Progress { requests, settled: done }
    }

    fn fail_page(&mut self) {
        self.error = Some(PAGE_ERROR_MESSAGE.to_string());
        self.in_flight = None;
    }

    /// Join point: append every successful slot in page order and advance the
    /// cursor by a full page.
    fn finish_page(&mut self) {
        let Some(load) = self.in_flight.take() else {
            return;
        };
        let Phase::Resolving { slots, .. } = load.phase else {
            return;
        };

        let requested = slots.len();
        let mut appended = 0;
        for (slot, outcome) in slots.into_iter().enumerate() {
            match outcome {
                Some(Ok(pokemon)) => {
                    self.records.push(pokemon);
                    appended += 1;
                }
                Some(Err(e)) => {
                    tracing::warn!(offset = load.offset, slot, error = %e, "record fetch failed, skipping");
                }
                None => {}
            }
        }

        self.cursor = load.offset + PAGE_SIZE;

        tracing::debug!(
            offset = load.offset,
            requested,
            appended,
            total = self.records.len(),
            cursor = self.cursor,
            "page appended"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "http://api";

    fn page_body(names: &[(u32, &str)]) -> String {
        let results: Vec<String> = names
            .iter()
            .map(|(id, name)| format!(r#"{{"name":"{name}","url":"{BASE}/pokemon/{id}/"}}"#))
            .collect();
        format!(r#"{{"results":[{}]}}"#, results.join(","))
    }

    fn record_body(id: u32, name: &str) -> String {
        format!(r#"{{"id":{id},"name":"{name}"}}"#)
    }

    fn start(aggregator: &mut ListAggregator, offset: usize) -> RequestTag {
        match aggregator.load_page(offset) {
            PageStart::Started(request) => request.tag,
            other => panic!("expected page start, got {other:?}"),
        }
    }

    #[test]
    fn page_with_one_failing_item_appends_the_other() {
        let mut aggregator = ListAggregator::new(BASE, 10);
        let tag = start(&mut aggregator, 0);

        let progress = aggregator.on_response(&tag, &HttpResponse::new(200, page_body(&[(1, "bulbasaur"), (2, "ivysaur")])));
        assert_eq!(progress.requests.len(), 2);
        assert_eq!(progress.requests[0].url, "http://api/pokemon/1");

        let first = aggregator.on_response(&progress.requests[0].tag, &HttpResponse::new(500, "boom"));
        assert!(!first.settled);
        let second = aggregator.on_response(&progress.requests[1].tag, &HttpResponse::new(200, record_body(2, "ivysaur")));
        assert!(second.settled);

        assert_eq!(aggregator.records().len(), 1);
        assert_eq!(aggregator.records()[0].name, "ivysaur");
        assert_eq!(aggregator.cursor(), PAGE_SIZE);
        assert!(!aggregator.is_busy());
    }

    #[test]
    fn out_of_order_items_append_in_summary_order() {
        let mut aggregator = ListAggregator::new(BASE, 10);
        let tag = start(&mut aggregator, 0);
        let progress = aggregator.on_response(
            &tag,
            &HttpResponse::new(200, page_body(&[(1, "a"), (2, "b"), (3, "c")])),
        );

        let bodies = [record_body(1, "a"), record_body(2, "b"), record_body(3, "c")];
        for i in [2, 0, 1] {
            aggregator.on_response(&progress.requests[i].tag, &HttpResponse::new(200, bodies[i].clone()));
        }

        let names: Vec<&str> = aggregator.records().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[test]
    fn empty_page_exhausts_the_source() {
        let mut aggregator = ListAggregator::new(BASE, 10);
        let tag = start(&mut aggregator, 0);

        let progress = aggregator.on_response(&tag, &HttpResponse::new(200, r#"{"results":[]}"#));

        assert!(progress.settled);
        assert!(aggregator.is_exhausted());
        assert_eq!(aggregator.cursor(), 0);
        assert_eq!(aggregator.load_page(0), PageStart::Exhausted);
        assert_eq!(aggregator.load_page(50), PageStart::Exhausted);
    }

    #[test]
    fn page_failure_keeps_cursor_and_allows_retry() {
        let mut aggregator = ListAggregator::new(BASE, 10);
        let tag = start(&mut aggregator, 0);

        let progress = aggregator.on_response(&tag, &HttpResponse::new(200, "not json"));
        assert!(progress.settled);
        assert_eq!(aggregator.error(), Some(PAGE_ERROR_MESSAGE));
        assert_eq!(aggregator.cursor(), 0);
        assert!(!aggregator.is_busy());

        let cursor = aggregator.cursor();
        let retry = start(&mut aggregator, cursor);
        assert_eq!(aggregator.error(), None);
        assert!(matches!(retry, RequestTag::Page { offset: 0, .. }));
    }

    #[test]
    fn second_load_while_busy_is_refused() {
        let mut aggregator = ListAggregator::new(BASE, 10);
        start(&mut aggregator, 0);
        assert_eq!(aggregator.load_page(50), PageStart::Busy);
    }

    #[test]
    fn fan_out_respects_the_cap() {
        let mut aggregator = ListAggregator::new(BASE, 2);
        let tag = start(&mut aggregator, 0);
        let summaries: Vec<(u32, &str)> = vec![(1, "a"), (2, "b"), (3, "c"), (4, "d"), (5, "e")];

        let mut pending = aggregator
            .on_response(&tag, &HttpResponse::new(200, page_body(&summaries)))
            .requests;
        assert_eq!(pending.len(), 2);

        let mut settled = false;
        while let Some(request) = pending.pop() {
            let RequestTag::Item { slot, .. } = request.tag else { unreachable!() };
            let (id, name) = summaries[slot];
            let progress = aggregator.on_response(&request.tag, &HttpResponse::new(200, record_body(id, name)));
            pending.extend(progress.requests);
            assert!(pending.len() <= 2);
            settled = progress.settled;
        }

        assert!(settled);
        assert_eq!(aggregator.records().len(), 5);
        let ids: Vec<u32> = aggregator.records().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn stale_generation_is_discarded() {
        let mut aggregator = ListAggregator::new(BASE, 10);
        let stale = start(&mut aggregator, 0);
        aggregator.on_response(&stale, &HttpResponse::new(503, ""));

        let current = start(&mut aggregator, 0);
        let progress = aggregator.on_response(&stale, &HttpResponse::new(200, page_body(&[(1, "a")])));
        assert_eq!(progress, Progress::default());
        assert!(aggregator.is_busy());

        let progress = aggregator.on_response(&current, &HttpResponse::new(200, page_body(&[(1, "a")])));
        assert_eq!(progress.requests.len(), 1);
    }

    #[test]
    fn timeout_while_listing_fails_the_page() {
        let mut aggregator = ListAggregator::new(BASE, 10);
        start(&mut aggregator, 0);
        let generation = aggregator.in_flight_generation().unwrap();

        assert!(aggregator.expire(generation).settled);
        assert_eq!(aggregator.error(), Some(PAGE_ERROR_MESSAGE));
        assert_eq!(aggregator.cursor(), 0);
    }

    #[test]
    fn timeout_while_resolving_keeps_finished_items() {
        let mut aggregator = ListAggregator::new(BASE, 10);
        let tag = start(&mut aggregator, 0);
        let generation = aggregator.in_flight_generation().unwrap();
        let progress = aggregator.on_response(&tag, &HttpResponse::new(200, page_body(&[(1, "a"), (2, "b")])));
        aggregator.on_response(&progress.requests[1].tag, &HttpResponse::new(200, record_body(2, "b")));

        assert!(aggregator.expire(generation).settled);
        assert_eq!(aggregator.records().len(), 1);
        assert_eq!(aggregator.cursor(), PAGE_SIZE);

        let late = aggregator.on_response(&progress.requests[0].tag, &HttpResponse::new(200, record_body(1, "a")));
        assert_eq!(late, Progress::default());
        assert_eq!(aggregator.records().len(), 1);
    }

    #[test]
    fn expiring_an_old_generation_does_nothing() {
        let mut aggregator = ListAggregator::new(BASE, 10);
        start(&mut aggregator, 0);
        assert_eq!(aggregator.expire(99), Progress::default());
        assert!(aggregator.is_busy());
    }

    #[test]
    fn zero_cap_is_clamped() {
        let mut aggregator = ListAggregator::new(BASE, 0);
        let tag = start(&mut aggregator, 0);
        let progress = aggregator.on_response(&tag, &HttpResponse::new(200, page_body(&[(1, "a"), (2, "b")])));
        assert_eq!(progress.requests.len(), 1);
    }
}
