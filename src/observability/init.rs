//! Tracing initialization and subscriber setup.
//!
//! Wires `tracing` macros to two sinks: OpenTelemetry spans exported to a
//! rotating OTLP file, and warnings printed to stderr.

use super::tracer;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::resource::Resource;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Trace export file inside the data directory.
pub const TRACE_FILE_NAME: &str = "jobboard-otlp.json";

/// Keeps the tracer provider alive; dropping it flushes and shuts down export.
#[derive(Debug)]
pub struct TracingGuard {
    provider: Option<opentelemetry_sdk::trace::TracerProvider>,
}

impl Drop for TracingGuard {
    fn drop(&mut self) {
        if let Some(provider) = self.provider.take() {
            if let Err(e) = provider.shutdown() {
                eprintln!("failed to flush traces: {e}");
            }
        }
    }
}

/// Stderr sink for warnings and errors.
fn stderr_layer<S>() -> impl Layer<S>
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
{
    tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(false)
        .with_filter(LevelFilter::WARN)
}

/// Installs the global subscriber.
///
/// The span level comes from `config.trace_level` (an `EnvFilter` directive,
/// default `"info"`). Warnings and errors also go to stderr. If the data
/// directory cannot be created, only the stderr layer is installed.
///
/// Safe to call more than once; later calls leave the first subscriber in place.
///
/// # Example
///
/// ```rust
/// use jobboard::observability::init_tracing;
/// use jobboard::Config;
///
/// let config = Config { trace_level: Some("debug".to_string()), ..Default::default() };
/// let _guard = init_tracing(&config);
/// tracing::debug!("tracing is now active");
/// ```
#[must_use]
pub fn init_tracing(config: &Config) -> TracingGuard {
    let level = config.trace_level.clone().unwrap_or_else(|| "info".to_string());
    let filter = EnvFilter::try_new(&level).unwrap_or_else(|_| EnvFilter::new("info"));

    let data_dir = config.data_dir();
    if std::fs::create_dir_all(&data_dir).is_err() {
        let _ = tracing_subscriber::registry().with(stderr_layer()).try_init();
        return TracingGuard { provider: None };
    }

    let resource = Resource::new(vec![
        opentelemetry::KeyValue::new("service.name", "jobboard"),
        opentelemetry::KeyValue::new("service.version", env!("CARGO_PKG_VERSION")),
    ]);
    let provider = tracer::create_tracer_provider(data_dir.join(TRACE_FILE_NAME), resource);
    let otel_layer = OpenTelemetryLayer::new(provider.tracer(tracer::SCOPE_NAME)).with_filter(filter);

    let _ = tracing_subscriber::registry().with(otel_layer).with(stderr_layer()).try_init();

    TracingGuard { provider: Some(provider) }
}
