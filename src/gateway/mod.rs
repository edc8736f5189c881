//! Backend gateway: the only place that talks HTTP.
//!
//! - `transport`: [`Transport`] seam and the `reqwest` implementation
//! - `client`: [`GatewayClient`] with typed endpoint operations

pub mod client;
pub mod transport;

pub use client::GatewayClient;
pub use transport::{
    HttpRequest, HttpResponse, Method, RequestBody, ReqwestTransport, Transport, TransportError, DEFAULT_TIMEOUT,
};
