//! Request middleware.
//!
//! Purpose: Define middleware components for request lifecycle concerns such as
//! tracing and latency metrics.

pub mod metrics;
pub mod trace;

pub use metrics::{LatencyHistogram, REQUEST_DURATION_METRIC, RequestMetrics};
pub use trace::Trace;
