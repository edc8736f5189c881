//! Drives the listing controller through events, executing its fetches
//! against a fake backend.

mod common;

use common::{anonymous_session, client, job_json, json_response, session_with_token, tag_json, FakeTransport};
use jobboard::app::{FetchPhase, JobType, Route, ViewContent};
use jobboard::gateway::{HttpRequest, HttpResponse, TransportError};
use jobboard::worker::{handle_message, WorkerMessage};
use jobboard::{handle_event, Action, AppState, Event, GatewayClient, Theme};
use serde_json::json;
use std::sync::Arc;

/// Answers `/tags/` with two tags and `/jobs/` with one job per request,
/// titled after the `search` parameter.
fn backend(request: &HttpRequest) -> Result<HttpResponse, TransportError> {
    match request.path.as_str() {
        "/tags/" => Ok(json_response(200, &json!([tag_json(1, "React"), tag_json(2, "Rust")]))),
        "/jobs/" => {
            let title = request.query.get("search").unwrap_or("Any Job");
            Ok(json_response(200, &json!([job_json(1, title)])))
        }
        _ => Ok(json_response(404, &json!({ "detail": "Not Found" }))),
    }
}

fn worker_messages(actions: Vec<Action>) -> Vec<WorkerMessage> {
    actions
        .into_iter()
        .filter_map(|action| match action {
            Action::PostToWorker(message) => Some(message),
            _ => None,
        })
        .collect()
}

/// Runs every message to completion, in order, and feeds the responses back.
async fn run_all(state: &mut AppState, client: &GatewayClient, messages: Vec<WorkerMessage>) {
    for message in messages {
        let response = handle_message(client, message).await;
        handle_event(state, &Event::WorkerResponse(response)).unwrap();
    }
}

#[tokio::test]
async fn mount_loads_listing_and_vocabulary() {
    let transport = FakeTransport::new(backend);
    let (client, _) = client(Arc::clone(&transport), anonymous_session());
    let mut state = AppState::new(Theme::monochrome());

    let (_, actions) = handle_event(&mut state, &Event::Mount).unwrap();
    let messages = worker_messages(actions);
    assert_eq!(messages.len(), 2);
    assert!(state.is_loading());

    run_all(&mut state, &client, messages).await;

    assert_eq!(state.jobs.len(), 1);
    assert_eq!(state.tags.len(), 2);
    assert_eq!(state.listing_phase(), FetchPhase::Succeeded);
    assert_eq!(state.tags_phase(), FetchPhase::Succeeded);
    assert!(transport.requests().iter().all(|r| r.query.is_empty()));
}

#[tokio::test]
async fn out_of_order_results_keep_the_latest_listing() {
    let (client, _) = client(FakeTransport::new(backend), anonymous_session());
    let mut state = AppState::new(Theme::monochrome());
    handle_event(&mut state, &Event::Mount).unwrap();

    let (_, first) = handle_event(&mut state, &Event::SetQuery("python".into())).unwrap();
    let (_, second) = handle_event(&mut state, &Event::SetQuery("rust".into())).unwrap();

    // The newer request completes first, then the older one straggles in.
    let mut newer = worker_messages(second);
    let mut older = worker_messages(first);
    let newer_response = handle_message(&client, newer.remove(0)).await;
    let older_response = handle_message(&client, older.remove(0)).await;

    assert!(handle_event(&mut state, &Event::WorkerResponse(newer_response)).unwrap().0);
    let (rendered, _) = handle_event(&mut state, &Event::WorkerResponse(older_response)).unwrap();

    assert!(!rendered);
    assert_eq!(state.jobs[0].title, "rust");
}

#[tokio::test]
async fn clearing_filters_always_refetches_unfiltered() {
    let transport = FakeTransport::new(backend);
    let (client, _) = client(Arc::clone(&transport), anonymous_session());
    let mut state = AppState::new(Theme::monochrome());
    let (_, mount) = handle_event(&mut state, &Event::Mount).unwrap();
    run_all(&mut state, &client, worker_messages(mount)).await;

    let (_, actions) = handle_event(&mut state, &Event::SetJobType(JobType::Contract)).unwrap();
    run_all(&mut state, &client, worker_messages(actions)).await;
    assert_eq!(transport.last_request().query.get("job_type"), Some("Contract"));

    let (_, actions) = handle_event(&mut state, &Event::ClearFilters).unwrap();
    assert_eq!(actions.len(), 1);
    run_all(&mut state, &client, worker_messages(actions)).await;

    assert!(transport.last_request().query.is_empty());
    assert_eq!(state.jobs[0].title, "Any Job");
}

#[tokio::test]
async fn tag_failure_leaves_the_listing_alone() {
    let transport = FakeTransport::new(|request| match request.path.as_str() {
        "/tags/" => Ok(json_response(500, &json!({ "detail": "tag service down" }))),
        _ => backend(request),
    });
    let (client, _) = client(transport, anonymous_session());
    let mut state = AppState::new(Theme::monochrome());

    let (_, actions) = handle_event(&mut state, &Event::Mount).unwrap();
    run_all(&mut state, &client, worker_messages(actions)).await;

    assert_eq!(state.jobs.len(), 1);
    assert_eq!(state.error, None);
    assert_eq!(state.tags_error.as_deref(), Some("tag service down"));
    assert_eq!(state.tags_phase(), FetchPhase::Failed);
}

#[tokio::test]
async fn listing_failure_keeps_previous_jobs_and_shows_message() {
    let transport = FakeTransport::new(|request| {
        if request.query.get("location").is_some() {
            Err(TransportError::Connection("connection refused".to_string()))
        } else {
            backend(request)
        }
    });
    let (client, _) = client(transport, anonymous_session());
    let mut state = AppState::new(Theme::monochrome());
    let (_, mount) = handle_event(&mut state, &Event::Mount).unwrap();
    run_all(&mut state, &client, worker_messages(mount)).await;

    let (_, actions) = handle_event(&mut state, &Event::SetLocation("Berlin".into())).unwrap();
    run_all(&mut state, &client, worker_messages(actions)).await;

    assert_eq!(state.jobs.len(), 1);
    assert_eq!(state.error.as_deref(), Some("Network error: connection refused"));
    assert_eq!(state.listing_phase(), FetchPhase::Failed);
}

#[tokio::test]
async fn expired_session_redirects_without_error_banner() {
    let transport = FakeTransport::new(|_| Ok(json_response(401, &json!({ "detail": "Token expired" }))));
    let session = session_with_token("stale");
    let (client, navigator) = client(transport, Arc::clone(&session));
    let mut state = AppState::new(Theme::monochrome());

    let (_, actions) = handle_event(&mut state, &Event::Mount).unwrap();
    let mut messages = worker_messages(actions);
    let listing = messages.remove(0);
    run_all(&mut state, &client, vec![listing]).await;

    assert_eq!(session.token(), None);
    assert_eq!(navigator.routes(), vec![Route::Login]);
    assert_eq!(state.error, None);
    assert!(!state.is_loading());

    for route in navigator.routes() {
        handle_event(&mut state, &Event::Navigate(route)).unwrap();
    }
    assert_eq!(state.route, Route::Login);
    assert!(!state.is_mounted());
}

#[tokio::test]
async fn detail_views_are_filled_by_the_worker_and_rendered_from_state() {
    let transport = FakeTransport::new(|request| match request.path.as_str() {
        "/jobs/7" => Ok(json_response(200, &job_json(7, "Staff Engineer"))),
        "/companies/" => Ok(json_response(500, &json!({ "detail": "catalog offline" }))),
        _ => backend(request),
    });
    let (client, _) = client(Arc::clone(&transport), anonymous_session());
    let mut state = AppState::new(Theme::monochrome());
    let (_, mount) = handle_event(&mut state, &Event::Mount).unwrap();
    run_all(&mut state, &client, worker_messages(mount)).await;

    let (_, actions) = handle_event(&mut state, &Event::Navigate(Route::JobDetail(7))).unwrap();
    run_all(&mut state, &client, worker_messages(actions)).await;
    assert!(matches!(&state.view, ViewContent::Job(job) if job.title == "Staff Engineer"));

    let requests_before_render = transport.requests().len();
    let mut out = Vec::new();
    jobboard::ui::render(&mut out, &state, chrono::Utc::now(), 80).unwrap();
    assert!(String::from_utf8_lossy(&out).contains("Staff Engineer"));
    handle_event(&mut state, &Event::Logout).unwrap();
    assert_eq!(transport.requests().len(), requests_before_render);

    let (_, actions) = handle_event(&mut state, &Event::Navigate(Route::Companies)).unwrap();
    run_all(&mut state, &client, worker_messages(actions)).await;
    assert_eq!(state.view, ViewContent::Failed("catalog offline".to_string()));
    assert_eq!(state.error, None);
}

#[tokio::test]
async fn vocabulary_from_a_previous_visit_does_not_override_the_current_one() {
    let (current, _) = client(FakeTransport::new(backend), anonymous_session());
    let mut state = AppState::new(Theme::monochrome());

    let (_, first_mount) = handle_event(&mut state, &Event::Mount).unwrap();
    handle_event(&mut state, &Event::Navigate(Route::Companies)).unwrap();
    let (_, second_mount) = handle_event(&mut state, &Event::Navigate(Route::Jobs)).unwrap();

    run_all(&mut state, &current, worker_messages(second_mount)).await;
    assert_eq!(state.tags.len(), 2);

    // The first visit's requests finish last, against a backend that now fails.
    let failing = FakeTransport::new(|_| Ok(json_response(500, &json!({ "detail": "tag service down" }))));
    let (failing_client, _) = client(failing, anonymous_session());
    run_all(&mut state, &failing_client, worker_messages(first_mount)).await;

    assert_eq!(state.tags.len(), 2);
    assert_eq!(state.tags_error, None);
    assert_eq!(state.tags_phase(), FetchPhase::Succeeded);
    assert_eq!(state.error, None);
}
