//! HTTP server configuration object and helpers.

use std::net::SocketAddr;
use std::sync::Arc;

use crate::domain::ports::{UserRepository, ViewRenderer};
use crate::middleware::LatencyHistogram;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) users: Arc<dyn UserRepository>,
    pub(crate) views: Arc<dyn ViewRenderer>,
    pub(crate) metrics: Option<LatencyHistogram>,
}

impl ServerConfig {
    /// Construct a configuration from the socket address and both adapters.
    #[must_use]
    pub fn new(
        bind_addr: SocketAddr,
        users: Arc<dyn UserRepository>,
        views: Arc<dyn ViewRenderer>,
    ) -> Self {
        Self {
            bind_addr,
            users,
            views,
            metrics: None,
        }
    }

    /// Enable request metrics; `None` leaves them disabled.
    #[must_use]
    pub fn with_metrics(mut self, metrics: Option<LatencyHistogram>) -> Self {
        self.metrics = metrics;
        self
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }

    /// Return the configured latency histogram, if any.
    #[must_use]
    pub fn metrics(&self) -> Option<&LatencyHistogram> {
        self.metrics.as_ref()
    }
}
