//! User directory library modules.
//!
//! Hexagonal layout: `domain` holds the service and its ports, `inbound`
//! the Actix handlers, `outbound` the Diesel and MiniJinja adapters, and
//! `middleware` the request tracing and latency metrics layers.

pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;
pub mod settings;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use domain::TraceId;
pub use middleware::{RequestMetrics, Trace};
