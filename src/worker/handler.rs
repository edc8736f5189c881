//! Background fetch execution.
//!
//! Each [`WorkerMessage`] runs as its own tokio task so listing, tag and
//! detail fetches proceed concurrently and never block the event loop. Results come back as
//! [`Event::WorkerResponse`]. Tasks are never cancelled; the controller discards
//! results it no longer wants.

use crate::app::{Event, Route};
use crate::domain::error::JobBoardError;
use crate::gateway::GatewayClient;
use crate::worker::{ExpiredFetch, WorkerMessage, WorkerResponse};
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tracing::Instrument;
use tracing_opentelemetry::OpenTelemetrySpanExt;

/// Spawns gateway calls and posts their outcomes to the event loop.
#[derive(Debug, Clone)]
pub struct GatewayWorker {
    client: Arc<GatewayClient>,
    events: UnboundedSender<Event>,
}

impl GatewayWorker {
    #[must_use]
    pub const fn new(client: Arc<GatewayClient>, events: UnboundedSender<Event>) -> Self {
        Self { client, events }
    }

    /// Runs `message` on a new task. Must be called inside a tokio runtime.
    ///
    /// The task's span is parented to the trace context carried by the message,
    /// linking it to the event that issued the fetch.
    pub fn post(&self, message: WorkerMessage) -> JoinHandle<()> {
        let span = tracing::debug_span!("worker_handle_message", message_type = ?message);
        if let Some(parent) = message.trace_context().and_then(|ctx| ctx.to_otel_context()) {
            span.set_parent(parent);
        }

        let client = Arc::clone(&self.client);
        let events = self.events.clone();

        tokio::spawn(
            async move {
                let response = handle_message(&client, message).await;
                if events.send(Event::WorkerResponse(response)).is_err() {
                    tracing::debug!("event loop closed, dropping worker response");
                }
            }
            .instrument(span),
        )
    }
}

/// Executes one message against the gateway and converts the outcome.
///
/// A rejected session maps to [`WorkerResponse::SessionExpired`] so the
/// controller can skip the error banner; the gateway has already redirected.
pub async fn handle_message(client: &GatewayClient, message: WorkerMessage) -> WorkerResponse {
    match message {
        WorkerMessage::ListJobs { epoch, params, .. } => match client.list_jobs(&params).await {
            Ok(jobs) => {
                tracing::debug!(epoch = %epoch, job_count = jobs.len(), "listing fetched");
                WorkerResponse::JobsLoaded { epoch, jobs }
            }
            Err(JobBoardError::SessionExpired) => {
                WorkerResponse::SessionExpired { fetch: ExpiredFetch::Listing(epoch) }
            }
            Err(e) => {
                tracing::debug!(epoch = %epoch, error = %e, "listing fetch failed");
                WorkerResponse::JobsFailed { epoch, message: e.to_string() }
            }
        },
        WorkerMessage::ListTags { mount, .. } => match client.list_tags().await {
            Ok(tags) => {
                tracing::debug!(tag_count = tags.len(), mount = %mount, "tags fetched");
                WorkerResponse::TagsLoaded { mount, tags }
            }
            Err(JobBoardError::SessionExpired) => WorkerResponse::SessionExpired { fetch: ExpiredFetch::Tags(mount) },
            Err(e) => {
                tracing::debug!(error = %e, "tag fetch failed");
                WorkerResponse::TagsFailed { mount, message: e.to_string() }
            }
        },
        WorkerMessage::GetJob { id, .. } => match client.get_job(id).await {
            Ok(job) => WorkerResponse::JobLoaded { job: Box::new(job) },
            Err(e) => view_failure(Route::JobDetail(id), e),
        },
        WorkerMessage::ListCompanies { .. } => match client.list_companies().await {
            Ok(companies) => {
                tracing::debug!(company_count = companies.len(), "companies fetched");
                WorkerResponse::CompaniesLoaded { companies }
            }
            Err(e) => view_failure(Route::Companies, e),
        },
        WorkerMessage::GetCompany { id, .. } => match client.get_company(id).await {
            Ok(company) => WorkerResponse::CompanyLoaded { company: Box::new(company) },
            Err(e) => view_failure(Route::CompanyDetail(id), e),
        },
    }
}

fn view_failure(route: Route, error: JobBoardError) -> WorkerResponse {
    if error.is_session_expired() {
        return WorkerResponse::SessionExpired { fetch: ExpiredFetch::View(route) };
    }
    tracing::debug!(route = %route.path(), error = %error, "view fetch failed");
    WorkerResponse::ViewFailed { route, message: error.to_string() }
}
