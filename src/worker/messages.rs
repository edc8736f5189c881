//! Worker message types for handing backend requests to background tasks.
//!
//! This module defines the request and response protocol between the event loop
//! and the tasks that talk to the job-board API. It also carries distributed
//! tracing context across the task boundary.

use crate::app::fetch::{FetchEpoch, MountGeneration};
use crate::app::filters::QueryParameters;
use crate::app::routes::Route;
use crate::domain::{Company, Job, Tag};
use serde::{Deserialize, Serialize};

/// Distributed tracing context for cross-task span propagation.
///
/// Captures the current trace and span IDs from OpenTelemetry so spans opened
/// inside a spawned request task link back to the event that issued it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceContext {
    /// OpenTelemetry trace ID as a hex string.
    pub trace_id: String,

    /// Parent span ID for linking spans across tasks.
    pub parent_span_id: String,
}

impl TraceContext {
    /// Creates a trace context from the current tracing span.
    ///
    /// Returns `None` if the current span context is invalid or not sampled.
    #[must_use]
    pub fn from_current() -> Option<Self> {
        use opentelemetry::trace::TraceContextExt;
        use tracing_opentelemetry::OpenTelemetrySpanExt;

        let span = tracing::Span::current();

        let otel_context = span.context();
        let span_ref = otel_context.span();
        let span_context = span_ref.span_context();

        if span_context.is_valid() {
            let trace_id = format!("{:032x}", span_context.trace_id());
            let parent_span_id = format!("{:016x}", span_context.span_id());

            tracing::trace!(trace_id = %trace_id, parent_span_id = %parent_span_id, "capturing trace context");

            Some(Self { trace_id, parent_span_id })
        } else {
            None
        }
    }

    /// Rebuilds a remote OpenTelemetry parent context from the captured IDs.
    ///
    /// Returns `None` when either ID is malformed.
    #[must_use]
    pub fn to_otel_context(&self) -> Option<opentelemetry::Context> {
        use opentelemetry::trace::{SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState};

        let trace_id = TraceId::from_hex(&self.trace_id).ok()?;
        let span_id = SpanId::from_hex(&self.parent_span_id).ok()?;
        let span_context = SpanContext::new(trace_id, span_id, TraceFlags::SAMPLED, true, TraceState::default());

        Some(opentelemetry::Context::new().with_remote_span_context(span_context))
    }
}

/// Generates constructors for `WorkerMessage` variants that attach the current
/// trace context automatically.
macro_rules! worker_message_builders {
    (
        $(
            $builder_name:ident($variant:ident { $($field:ident: $ty:ty),* $(,)? })
        ),* $(,)?
    ) => {
        impl WorkerMessage {
            $(
                #[doc = concat!("Create a ", stringify!($variant), " message with current trace context")]
                #[must_use]
                pub fn $builder_name($($field: $ty),*) -> Self {
                    Self::$variant {
                        $($field,)*
                        trace_context: TraceContext::from_current(),
                    }
                }
            )*
        }
    };
}

worker_message_builders! {
    list_jobs(ListJobs { epoch: FetchEpoch, params: QueryParameters }),
    list_tags(ListTags { mount: MountGeneration }),
    get_job(GetJob { id: i64 }),
    list_companies(ListCompanies {}),
    get_company(GetCompany { id: i64 }),
}

/// Requests handed to a background task.
///
/// Trace context is ignored by equality so tests can compare messages built
/// inside and outside of a span.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum WorkerMessage {
    /// Fetch the job listing with the given filters.
    ListJobs {
        /// Epoch the result must be reconciled against.
        epoch: FetchEpoch,

        /// Projected filter parameters; empty for the unfiltered listing.
        params: QueryParameters,

        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    /// Fetch the skill tag vocabulary for the listing mounted as `mount`.
    ListTags {
        mount: MountGeneration,

        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    /// Fetch a single job for its detail view.
    GetJob {
        id: i64,

        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    /// Fetch the company catalog.
    ListCompanies {
        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    /// Fetch a single company with its jobs.
    GetCompany {
        id: i64,

        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },
}

impl WorkerMessage {
    #[must_use]
    pub const fn trace_context(&self) -> Option<&TraceContext> {
        match self {
            Self::ListJobs { trace_context, .. }
            | Self::ListTags { trace_context, .. }
            | Self::GetJob { trace_context, .. }
            | Self::ListCompanies { trace_context }
            | Self::GetCompany { trace_context, .. } => trace_context.as_ref(),
        }
    }
}

impl PartialEq for WorkerMessage {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (
                Self::ListJobs { epoch: a_epoch, params: a_params, .. },
                Self::ListJobs { epoch: b_epoch, params: b_params, .. },
            ) => a_epoch == b_epoch && a_params == b_params,
            (Self::ListTags { mount: a, .. }, Self::ListTags { mount: b, .. }) => a == b,
            (Self::GetJob { id: a, .. }, Self::GetJob { id: b, .. })
            | (Self::GetCompany { id: a, .. }, Self::GetCompany { id: b, .. }) => a == b,
            (Self::ListCompanies { .. }, Self::ListCompanies { .. }) => true,
            _ => false,
        }
    }
}

impl Eq for WorkerMessage {}

/// Results posted back to the event loop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkerResponse {
    /// Listing fetch for `epoch` succeeded.
    JobsLoaded { epoch: FetchEpoch, jobs: Vec<Job> },

    /// Listing fetch for `epoch` failed with a displayable message.
    JobsFailed { epoch: FetchEpoch, message: String },

    /// Tag vocabulary loaded for the listing mounted as `mount`.
    TagsLoaded { mount: MountGeneration, tags: Vec<Tag> },

    /// Tag vocabulary failed; the listing is unaffected.
    TagsFailed { mount: MountGeneration, message: String },

    /// Job detail loaded.
    JobLoaded { job: Box<Job> },

    /// Company catalog loaded.
    CompaniesLoaded { companies: Vec<Company> },

    /// Company detail loaded.
    CompanyLoaded { company: Box<Company> },

    /// The fetch behind `route` failed with a displayable message.
    ViewFailed { route: Route, message: String },

    /// The backend rejected the session. The gateway has already cleared it and
    /// requested the login view.
    SessionExpired { fetch: ExpiredFetch },
}

/// Which fetch ran into a rejected session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExpiredFetch {
    Listing(FetchEpoch),
    Tags(MountGeneration),
    View(Route),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_ignores_trace_context() {
        let built = WorkerMessage::list_jobs(FetchEpoch(3), QueryParameters::from([("search", "rust")]));
        let traced = WorkerMessage::ListJobs {
            epoch: FetchEpoch(3),
            params: QueryParameters::from([("search", "rust")]),
            trace_context: Some(TraceContext {
                trace_id: "0af7651916cd43dd8448eb211c80319c".into(),
                parent_span_id: "b7ad6b7169203331".into(),
            }),
        };
        assert_eq!(built, traced);
        assert_ne!(built, WorkerMessage::list_tags(MountGeneration(1)));
    }

    #[test]
    fn tag_requests_differ_by_mount() {
        assert_eq!(WorkerMessage::list_tags(MountGeneration(2)), WorkerMessage::list_tags(MountGeneration(2)));
        assert_ne!(WorkerMessage::list_tags(MountGeneration(1)), WorkerMessage::list_tags(MountGeneration(2)));
        assert_ne!(WorkerMessage::get_job(1), WorkerMessage::get_company(1));
    }

    #[test]
    fn malformed_trace_ids_yield_no_context() {
        let ctx = TraceContext { trace_id: "nope".into(), parent_span_id: "b7ad6b7169203331".into() };
        assert!(ctx.to_otel_context().is_none());

        let ctx = TraceContext {
            trace_id: "0af7651916cd43dd8448eb211c80319c".into(),
            parent_span_id: "b7ad6b7169203331".into(),
        };
        assert!(ctx.to_otel_context().is_some());
    }
}
