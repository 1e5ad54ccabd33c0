//! Zellij plugin wrapper and entry point.
//!
//! This is the thin integration layer between the zpokedex library and the
//! Zellij plugin system. It translates Zellij events into library
//! [`Event`]s, runs them through [`handle_event`], and executes the returned
//! [`Action`]s with host calls:
//!
//! ```text
//! Key / WebRequestResult / Timer ──► Event ──► handle_event ──► Action
//!                                                                │
//!            web_request / set_timeout / hide_self ◄─────────────┘
//! ```
//!
//! # Plugin Lifecycle
//!
//! 1. **Load**: Parse config, initialize tracing, create `AppState`, request
//!    `WebAccess`, subscribe to Key, `WebRequestResult`, Timer and
//!    `PermissionRequestResult`
//! 2. **Permission granted**: `Event::Start` loads the first page
//! 3. **Update**: each host event becomes at most one library event
//! 4. **Render**: the library draws the current view model
//!
//! # Keybindings
//!
//! List, normal mode:
//! - `j`/`Down`, `Ctrl+n`: Move down
//! - `k`/`Up`, `Ctrl+p`: Move up
//! - `Enter`: Open detail view
//! - `/`: Search
//! - `#`: Go to a number or name
//! - `m`: Load more (retries a failed page)
//! - `q`: Hide plugin
//!
//! Search mode:
//! - typing filters (`j`/`k` are typed while the input has focus)
//! - `Enter`: Focus results, or open the selected entry when navigating
//! - `/`: Return to the input
//! - `Esc`: Exit search
//!
//! Detail view:
//! - `Esc`/`Backspace`/`b`: Back to the list
//! - `r`: Reload
//! - `q`: Hide plugin

#![allow(clippy::multiple_crate_versions)]

use std::collections::BTreeMap;
use zellij_tile::prelude::*;

use zpokedex::catalog::{FetchRequest, HttpResponse, RequestTag};
use zpokedex::{handle_event, Action, Config, Event, InputMode, SearchFocus, ViewMode};

register_plugin!(State);

/// Plugin state wrapper around the library's `AppState`.
struct State {
    app: zpokedex::AppState,
}

impl Default for State {
    fn default() -> Self {
        Self {
            app: zpokedex::initialize(&Config::default()),
        }
    }
}

impl ZellijPlugin for State {
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let config = Config::from_zellij(&configuration);
        zpokedex::observability::init_tracing(&config);

        let span = tracing::debug_span!("plugin_load");
        let _guard = span.entered();

        tracing::debug!(
            api_base = %config.api_base,
            max_concurrent_requests = config.max_concurrent_requests,
            request_timeout_secs = config.request_timeout_secs,
            "parsed configuration"
        );
        self.app = zpokedex::initialize(&config);

        request_permission(&[PermissionType::WebAccess]);
        subscribe(&[
            EventType::Key,
            EventType::WebRequestResult,
            EventType::Timer,
            EventType::PermissionRequestResult,
        ]);

        tracing::debug!("plugin load complete - waiting for permissions");
    }

    /// Translates the Zellij event, handles it, and executes the resulting
    /// actions. Returns `true` if the UI should re-render.
    fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
        let event_name = Self::get_event_name(&event);
        let span = tracing::debug_span!("plugin_update_event", event_type = %event_name);
        let _guard = span.entered();

        let our_event = match event {
            zellij_tile::prelude::Event::Key(ref key) => match self.map_key_event(key) {
                Some(event) => event,
                None => return false,
            },
            zellij_tile::prelude::Event::WebRequestResult(status, _headers, body, context) => {
                match Self::map_web_response(status, body, &context) {
                    Some(event) => event,
                    None => return false,
                }
            }
            zellij_tile::prelude::Event::Timer(_) => Event::Timer,
            zellij_tile::prelude::Event::PermissionRequestResult(status) => match status {
                PermissionStatus::Granted => Event::Start,
                PermissionStatus::Denied => Event::PermissionDenied,
            },
            _ => return false,
        };

        match handle_event(&mut self.app, &our_event) {
            Ok((should_render, actions)) => {
                tracing::debug!(action_count = actions.len(), should_render, "event handled");
                for action in actions {
                    Self::execute_action(action);
                }
                should_render
            }
            Err(e) => {
                tracing::debug!(error = %e, "error handling event");
                false
            }
        }
    }

    fn render(&mut self, rows: usize, cols: usize) {
        zpokedex::ui::render(&self.app, rows, cols);
    }
}

impl State {
    fn get_event_name(event: &zellij_tile::prelude::Event) -> String {
        match event {
            zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
            zellij_tile::prelude::Event::WebRequestResult(status, ..) => {
                format!("WebRequestResult({status})")
            }
            zellij_tile::prelude::Event::Timer(_) => "Timer".to_string(),
            zellij_tile::prelude::Event::PermissionRequestResult(..) => {
                "PermissionRequestResult".to_string()
            }
            _ => "Other".to_string(),
        }
    }

    /// Maps keyboard events to application events, depending on the view and
    /// input mode.
    fn map_key_event(&self, key: &KeyWithModifier) -> Option<Event> {
        let ctrl = key.has_modifiers(&[KeyModifier::Ctrl]);

        if self.app.view_mode == ViewMode::Detail {
            return match key.bare_key {
                BareKey::Esc | BareKey::Backspace | BareKey::Char('b') => Some(Event::Back),
                BareKey::Char('r') => Some(Event::Reload),
                BareKey::Char('q') => Some(Event::CloseFocus),
                _ => None,
            };
        }

        if ctrl {
            return match key.bare_key {
                BareKey::Char('n') => Some(Event::KeyDown),
                BareKey::Char('p') => Some(Event::KeyUp),
                _ => None,
            };
        }

        match &self.app.input_mode {
            InputMode::GoTo(_) => match key.bare_key {
                BareKey::Enter => Some(Event::SubmitGoTo),
                BareKey::Esc => Some(Event::Escape),
                BareKey::Backspace => Some(Event::Backspace),
                BareKey::Char(c) => Some(Event::Char(c)),
                _ => None,
            },
            InputMode::Search(focus) => Some(match key.bare_key {
                BareKey::Esc => Event::ExitSearch,
                BareKey::Enter => match focus {
                    SearchFocus::Typing => Event::FocusResults,
                    SearchFocus::Navigating => Event::OpenSelected,
                },
                BareKey::Down => Event::KeyDown,
                BareKey::Up => Event::KeyUp,
                BareKey::Char('/') => Event::FocusSearchBar,
                BareKey::Char('j') if *focus == SearchFocus::Navigating => Event::KeyDown,
                BareKey::Char('k') if *focus == SearchFocus::Navigating => Event::KeyUp,
                BareKey::Backspace => Event::Backspace,
                BareKey::Char(c) => Event::Char(c),
                _ => return None,
            }),
            InputMode::Normal => Some(match key.bare_key {
                BareKey::Down | BareKey::Char('j') => Event::KeyDown,
                BareKey::Up | BareKey::Char('k') => Event::KeyUp,
                BareKey::Enter => Event::OpenSelected,
                BareKey::Char('/') => Event::SearchMode,
                BareKey::Char('#') => Event::GoToMode,
                BareKey::Char('m') => Event::LoadMore,
                BareKey::Char('q') => Event::CloseFocus,
                _ => return None,
            }),
        }
    }

    /// Maps a finished web request back to the request that issued it.
    /// Responses without a recognizable tag are dropped.
    fn map_web_response(
        status: u16,
        body: Vec<u8>,
        context: &BTreeMap<String, String>,
    ) -> Option<Event> {
        let Some(tag) = RequestTag::from_context(context) else {
            tracing::debug!(status, "web response without request tag");
            return None;
        };
        Some(Event::Response {
            tag,
            response: HttpResponse::new(status, body),
        })
    }

    fn execute_action(action: Action) {
        match action {
            Action::Fetch(FetchRequest { url, tag }) => {
                tracing::debug!(url = %url, ?tag, "web request");
                let headers = BTreeMap::from([("Accept".to_string(), "application/json".to_string())]);
                web_request(url, HttpVerb::Get, headers, vec![], tag.to_context());
            }
            Action::StartTimer { seconds } => set_timeout(seconds),
            Action::CloseFocus => hide_self(),
        }
    }
}
