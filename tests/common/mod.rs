//! Test doubles shared by the integration suites.

#![allow(dead_code)]

use futures_util::future::BoxFuture;
use jobboard::app::{Navigator, Route};
use jobboard::gateway::{HttpRequest, HttpResponse, Transport, TransportError};
use jobboard::storage::{MemorySessionStore, SessionRecord};
use jobboard::{GatewayClient, SessionContext};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

type Responder = dyn Fn(&HttpRequest) -> Result<HttpResponse, TransportError> + Send + Sync;

/// Transport that records every request and answers from a closure.
pub struct FakeTransport {
    responder: Box<Responder>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl FakeTransport {
    pub fn new<F>(responder: F) -> Arc<Self>
    where
        F: Fn(&HttpRequest) -> Result<HttpResponse, TransportError> + Send + Sync + 'static,
    {
        Arc::new(Self { responder: Box::new(responder), requests: Mutex::new(Vec::new()) })
    }

    /// Answers every request with the same status and JSON body.
    pub fn always(status: u16, body: Value) -> Arc<Self> {
        Self::new(move |_| Ok(json_response(status, &body)))
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> HttpRequest {
        self.requests().pop().expect("no request was sent")
    }
}

impl Transport for FakeTransport {
    fn send(&self, request: HttpRequest) -> BoxFuture<'_, Result<HttpResponse, TransportError>> {
        let result = (self.responder)(&request);
        self.requests.lock().unwrap().push(request);
        Box::pin(std::future::ready(result))
    }
}

/// Navigator that remembers where it was sent.
#[derive(Default)]
pub struct RecordingNavigator {
    routes: Mutex<Vec<Route>>,
}

impl RecordingNavigator {
    pub fn routes(&self) -> Vec<Route> {
        self.routes.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, route: Route) {
        self.routes.lock().unwrap().push(route);
    }
}

pub fn json_response(status: u16, body: &Value) -> HttpResponse {
    HttpResponse { status, body: serde_json::to_vec(body).unwrap() }
}

pub fn raw_response(status: u16, body: &str) -> HttpResponse {
    HttpResponse { status, body: body.as_bytes().to_vec() }
}

/// Session holding only a token, as left behind by an earlier run.
pub fn session_with_token(token: &str) -> Arc<SessionContext> {
    let record = SessionRecord { token: Some(token.to_string()), user: None, user_type: None };
    Arc::new(SessionContext::rehydrate(Box::new(MemorySessionStore::with_record(record))))
}

pub fn anonymous_session() -> Arc<SessionContext> {
    Arc::new(SessionContext::in_memory())
}

pub fn client(
    transport: Arc<FakeTransport>,
    session: Arc<SessionContext>,
) -> (GatewayClient, Arc<RecordingNavigator>) {
    let navigator = Arc::new(RecordingNavigator::default());
    let client = GatewayClient::new(transport, session, Arc::clone(&navigator) as Arc<dyn Navigator>);
    (client, navigator)
}

pub fn job_json(id: i64, title: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "description": "Work on things",
        "location": "Remote",
        "job_type": "Remote",
        "job_level": "Senior",
        "salary_min": 90000,
        "salary_max": 140000,
        "is_active": true,
        "company_id": 1,
        "created_at": "2024-05-01T09:30:00",
        "updated_at": "2024-05-01T09:30:00",
    })
}

pub fn tag_json(id: i64, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "created_at": "2024-01-01T00:00:00",
        "updated_at": "2024-01-01T00:00:00",
    })
}
