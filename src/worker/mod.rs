//! Background tasks for backend requests.
//!
//! The event loop never awaits the network directly. It posts a
//! [`WorkerMessage`] and later receives a [`WorkerResponse`] as an event,
//! with distributed tracing context carried across the task boundary.
//!
//! # Architecture
//!
//! - `messages`: Request/response protocol types with trace context propagation
//! - `handler`: Task spawning and message processing logic

pub mod handler;
pub mod messages;

pub use handler::{handle_message, GatewayWorker};
pub use messages::{ExpiredFetch, TraceContext, WorkerMessage, WorkerResponse};
