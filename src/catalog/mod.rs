//! Catalog layer: talking to the creature-data API.
//!
//! Nothing in here performs I/O. Components return [`FetchRequest`]s for the
//! plugin runtime to hand to Zellij and consume [`HttpResponse`]s fed back from
//! `WebRequestResult` events, which keeps every transition testable without a
//! host.
//!
//! # Modules
//!
//! - [`aggregator`]: paged list loading with per-item fan-out
//! - [`detail`]: single-record fetches for the detail view
//! - [`filter`]: case-insensitive name search over the collection
//! - [`request`]: request tags, responses and endpoint URLs
//! - [`deadline`]: pairing host timers with in-flight work

pub mod aggregator;
pub mod deadline;
pub mod detail;
pub mod filter;
pub mod request;

pub use aggregator::{ListAggregator, PageStart, Progress, PAGE_SIZE};
pub use deadline::{Deadline, DeadlineQueue};
pub use detail::{DetailFetcher, DetailState};
pub use filter::{filter, filter_indices};
pub use request::{FetchRequest, HttpResponse, RequestTag};
