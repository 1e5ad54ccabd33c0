//! End-to-end flows through `handle_event` against an in-memory API.
//!
//! The fake host answers every `Action::Fetch` synchronously, in request
//! order, and feeds the answer back as `Event::Response`. Timers are never
//! fired unless a test does so explicitly.

use std::collections::{HashSet, VecDeque};

use zpokedex::catalog::{DetailState, FetchRequest, HttpResponse};
use zpokedex::{handle_event, initialize, Action, AppState, Config, Event, InputMode, ViewMode};

const BASE: &str = "http://fake/api/v2";

struct FakeApi {
    names: Vec<String>,
    failing_id: Option<u32>,
    served: Vec<String>,
}

impl FakeApi {
    fn with_records(total: u32) -> Self {
        let names = (1..=total)
            .map(|id| match id {
                25 => "pikachu".to_string(),
                26 => "raichu".to_string(),
                16 => "pidgey".to_string(),
                _ => format!("mon-{id:03}"),
            })
            .collect();
        Self { names, failing_id: None, served: Vec::new() }
    }

    fn failing(mut self, id: u32) -> Self {
        self.failing_id = Some(id);
        self
    }

    fn respond(&mut self, url: &str) -> HttpResponse {
        self.served.push(url.to_string());
        let path = url.strip_prefix(BASE).unwrap_or(url);

        if let Some(query) = path.strip_prefix("/pokemon?") {
            let param = |key: &str| -> usize {
                query
                    .split('&')
                    .find_map(|pair| pair.strip_prefix(key))
                    .and_then(|v| v.parse().ok())
                    .unwrap()
            };
            let (limit, offset) = (param("limit="), param("offset="));
            let results: Vec<String> = self
                .names
                .iter()
                .enumerate()
                .skip(offset)
                .take(limit)
                .map(|(i, name)| format!(r#"{{"name":"{name}","url":"{BASE}/pokemon/{}/"}}"#, i + 1))
                .collect();
            return HttpResponse::new(200, format!(r#"{{"count":{},"results":[{}]}}"#, self.names.len(), results.join(",")));
        }

        let key = path.strip_prefix("/pokemon/").unwrap_or_default();
        let id = key
            .parse::<u32>()
            .ok()
            .or_else(|| self.names.iter().position(|n| n == key).and_then(|i| u32::try_from(i + 1).ok()));

        match id {
            Some(id) if Some(id) == self.failing_id => HttpResponse::new(500, "Internal Server Error"),
            Some(id) if id >= 1 && (id as usize) <= self.names.len() => {
                let name = &self.names[id as usize - 1];
                HttpResponse::new(
                    200,
                    format!(
                        r#"{{"id":{id},"name":"{name}","height":4,"weight":60,
                            "types":[{{"slot":1,"type":{{"name":"electric","url":""}}}}],
                            "stats":[{{"base_stat":35,"stat":{{"name":"hp","url":""}}}}]}}"#
                    ),
                )
            }
            _ => HttpResponse::new(404, "Not Found"),
        }
    }
}

fn config() -> Config {
    Config {
        api_base: BASE.to_string(),
        max_concurrent_requests: 4,
        ..Default::default()
    }
}

fn send(state: &mut AppState, event: Event) -> Vec<Action> {
    handle_event(state, &event).unwrap().1
}

fn fetches(actions: Vec<Action>) -> Vec<FetchRequest> {
    actions
        .into_iter()
        .filter_map(|action| match action {
            Action::Fetch(request) => Some(request),
            _ => None,
        })
        .collect()
}

/// Answers every fetch (and the fetches those answers trigger) until the
/// plugin goes quiet.
fn run(state: &mut AppState, api: &mut FakeApi, actions: Vec<Action>) {
    let mut pending: VecDeque<FetchRequest> = fetches(actions).into();
    while let Some(request) = pending.pop_front() {
        let response = api.respond(&request.url);
        let follow_up = send(state, Event::Response { tag: request.tag, response });
        pending.extend(fetches(follow_up));
    }
}

fn names(state: &AppState) -> Vec<String> {
    state.visible_records().map(|p| p.name.clone()).collect()
}

#[test]
fn two_pages_accumulate_every_record_once() {
    let mut api = FakeApi::with_records(80);
    let mut state = initialize(&config());

    let actions = send(&mut state, Event::Start);
    run(&mut state, &mut api, actions);
    assert_eq!(state.aggregator.records().len(), 50);
    assert_eq!(state.aggregator.cursor(), 50);

    let actions = send(&mut state, Event::LoadMore);
    run(&mut state, &mut api, actions);

    let records = state.aggregator.records();
    assert_eq!(records.len(), 80);
    let ids: Vec<u32> = records.iter().map(|p| p.id).collect();
    assert_eq!(ids, (1..=80).collect::<Vec<_>>());
    assert_eq!(ids.iter().collect::<HashSet<_>>().len(), 80);
    assert_eq!(state.visible.len(), 80);
}

#[test]
fn empty_page_exhausts_and_further_loads_are_noops() {
    let mut api = FakeApi::with_records(80);
    let mut state = initialize(&config());

    let actions = send(&mut state, Event::Start);
    run(&mut state, &mut api, actions);
    for _ in 0..2 {
        let actions = send(&mut state, Event::LoadMore);
        run(&mut state, &mut api, actions);
    }
    assert!(state.aggregator.is_exhausted());

    let served = api.served.len();
    assert!(send(&mut state, Event::LoadMore).is_empty());
    assert_eq!(api.served.len(), served);
    assert_eq!(state.aggregator.records().len(), 80);
}

#[test]
fn failing_item_is_skipped_silently() {
    let mut api = FakeApi::with_records(80).failing(7);
    let mut state = initialize(&config());

    let actions = send(&mut state, Event::Start);
    run(&mut state, &mut api, actions);

    let records = state.aggregator.records();
    assert_eq!(records.len(), 49);
    assert!(records.iter().all(|p| p.id != 7));
    assert!(state.aggregator.error().is_none());
    assert_eq!(state.aggregator.cursor(), 50);
}

#[test]
fn search_narrows_visible_records() {
    let mut api = FakeApi::with_records(80);
    let mut state = initialize(&config());
    let actions = send(&mut state, Event::Start);
    run(&mut state, &mut api, actions);

    send(&mut state, Event::SearchMode);
    for c in "PI".chars() {
        send(&mut state, Event::Char(c));
    }
    assert_eq!(names(&state), vec!["pidgey", "pikachu"]);

    send(&mut state, Event::Char('k'));
    assert_eq!(names(&state), vec!["pikachu"]);

    send(&mut state, Event::Backspace);
    send(&mut state, Event::Backspace);
    send(&mut state, Event::Backspace);
    assert_eq!(state.visible.len(), 50);

    send(&mut state, Event::Char('c'));
    send(&mut state, Event::Char('h'));
    send(&mut state, Event::Char('u'));
    assert_eq!(names(&state), vec!["pikachu", "raichu"]);

    send(&mut state, Event::ExitSearch);
    assert_eq!(state.input_mode, InputMode::Normal);
    assert_eq!(state.visible.len(), 50);
}

#[test]
fn opening_a_row_loads_its_detail() {
    let mut api = FakeApi::with_records(80);
    let mut state = initialize(&config());
    let actions = send(&mut state, Event::Start);
    run(&mut state, &mut api, actions);

    send(&mut state, Event::SearchMode);
    for c in "pikachu".chars() {
        send(&mut state, Event::Char(c));
    }
    send(&mut state, Event::FocusResults);
    let actions = send(&mut state, Event::OpenSelected);
    assert_eq!(state.view_mode, ViewMode::Detail);
    run(&mut state, &mut api, actions);

    match state.detail.state() {
        DetailState::Loaded(pokemon) => assert_eq!(pokemon.name, "pikachu"),
        other => panic!("expected loaded detail, got {other:?}"),
    }

    send(&mut state, Event::Back);
    assert_eq!(state.view_mode, ViewMode::List);
    assert_eq!(names(&state), vec!["pikachu"]);
}

#[test]
fn unknown_identifier_shows_not_found() {
    let mut api = FakeApi::with_records(80);
    let mut state = initialize(&config());

    send(&mut state, Event::GoToMode);
    for c in "9999".chars() {
        send(&mut state, Event::Char(c));
    }
    let actions = send(&mut state, Event::SubmitGoTo);
    run(&mut state, &mut api, actions);

    assert_eq!(state.view_mode, ViewMode::Detail);
    assert_eq!(
        state.detail.state(),
        &DetailState::NotFound { id: "9999".to_string() }
    );
}

#[test]
fn response_after_leaving_detail_is_ignored() {
    let mut api = FakeApi::with_records(80);
    let mut state = initialize(&config());

    send(&mut state, Event::GoToMode);
    send(&mut state, Event::Char('2'));
    send(&mut state, Event::Char('5'));
    let actions = send(&mut state, Event::SubmitGoTo);
    send(&mut state, Event::Back);
    run(&mut state, &mut api, actions);

    assert_eq!(state.detail.state(), &DetailState::Idle);
    assert_eq!(state.view_mode, ViewMode::List);
}

#[test]
fn older_detail_response_cannot_overwrite_newer_one() {
    let mut api = FakeApi::with_records(80);
    let mut state = initialize(&config());

    send(&mut state, Event::GoToMode);
    send(&mut state, Event::Char('1'));
    let first = fetches(send(&mut state, Event::SubmitGoTo));

    send(&mut state, Event::GoToMode);
    send(&mut state, Event::Char('2'));
    let second = fetches(send(&mut state, Event::SubmitGoTo));

    let answer = |api: &mut FakeApi, request: &FetchRequest| Event::Response {
        tag: request.tag,
        response: api.respond(&request.url),
    };
    let newer = answer(&mut api, &second[0]);
    let older = answer(&mut api, &first[0]);
    handle_event(&mut state, &newer).unwrap();
    handle_event(&mut state, &older).unwrap();

    match state.detail.state() {
        DetailState::Loaded(pokemon) => assert_eq!(pokemon.id, 2),
        other => panic!("expected record 2, got {other:?}"),
    }
}

#[test]
fn page_timeout_fails_the_page_and_retry_succeeds() {
    let mut api = FakeApi::with_records(80);
    let mut state = initialize(&config());

    let actions = send(&mut state, Event::Start);
    assert!(actions.contains(&Action::StartTimer { seconds: 15.0 }));
    let stale = fetches(actions);

    send(&mut state, Event::Timer);
    assert!(state.aggregator.error().is_some());
    assert!(!state.aggregator.is_busy());
    assert_eq!(state.aggregator.cursor(), 0);

    // the abandoned page answers late and is dropped
    run(&mut state, &mut api, stale.into_iter().map(Action::Fetch).collect());
    assert!(state.aggregator.records().is_empty());

    let actions = send(&mut state, Event::LoadMore);
    run(&mut state, &mut api, actions);
    assert!(state.aggregator.error().is_none());
    assert_eq!(state.aggregator.records().len(), 50);
}

#[test]
fn detail_timeout_becomes_not_found() {
    let mut state = initialize(&config());

    send(&mut state, Event::GoToMode);
    send(&mut state, Event::Char('7'));
    let actions = send(&mut state, Event::SubmitGoTo);
    assert_eq!(actions.len(), 2);

    send(&mut state, Event::Timer);
    assert_eq!(state.detail.state(), &DetailState::NotFound { id: "7".to_string() });
}

#[test]
fn permission_denial_is_reported() {
    let mut state = initialize(&config());

    let (render, actions) = handle_event(&mut state, &Event::PermissionDenied).unwrap();

    assert!(render);
    assert!(actions.is_empty());
    assert!(state.notice.is_some());
}
