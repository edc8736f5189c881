//! OpenTelemetry-based observability with file-based trace export.
//!
//! ```text
//! tracing-opentelemetry → OpenTelemetry SDK → FileSpanExporter → JSON lines
//! ```
//!
//! # Features
//!
//! - **File-Based Export**: spans written to `<data dir>/jobboard-otlp.json`
//! - **Automatic Rotation**: files rotate at 10MB with 3 backups kept
//! - **OTLP Format**: standard OpenTelemetry Protocol JSON, one batch per line
//! - **Cross-task Context**: fetch tasks are parented to the event that issued
//!   them (see [`TraceContext`](crate::worker::TraceContext))
//!
//! # Configuration
//!
//! The level directive comes from `JOBBOARD_TRACE_LEVEL` (default `"info"`).
//! Warnings are always echoed to stderr.

mod file_writer;
mod init;
mod span_formatter;
mod tracer;

pub use init::{init_tracing, TracingGuard, TRACE_FILE_NAME};
