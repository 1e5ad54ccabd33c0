//! Actions representing side effects to be executed by the plugin runtime.
//!
//! The event handler returns a `Vec<Action>` after processing each event. Actions
//! bridge pure state transitions and effectful host calls: issuing web requests,
//! arming timers and hiding the plugin pane.
//!
//! # Example
//!
//! ```rust
//! use zpokedex::app::Action;
//! use zpokedex::catalog::{FetchRequest, RequestTag};
//!
//! let actions = vec![
//!     Action::Fetch(FetchRequest {
//!         url: "https://pokeapi.co/api/v2/pokemon/25".to_string(),
//!         tag: RequestTag::Detail { seq: 1 },
//!     }),
//!     Action::StartTimer { seconds: 15.0 },
//! ];
//! assert_eq!(actions.len(), 2);
//! ```

use crate::catalog::FetchRequest;

/// Commands representing side effects to be executed by the plugin runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Hides the plugin pane.
    ///
    /// Sent when the user explicitly requests to exit (pressing 'q').
    CloseFocus,

    /// Issues a GET web request through the host.
    ///
    /// The request's tag travels in the request context and comes back with the
    /// `WebRequestResult` event.
    Fetch(FetchRequest),

    /// Arms a host timer that fires after `seconds`.
    ///
    /// Paired with a deadline recorded in the state's deadline queue.
    StartTimer {
        /// Delay before the host sends a `Timer` event.
        seconds: f64,
    },
}
