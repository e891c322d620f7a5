//! Server construction and middleware wiring.

mod config;
mod metrics;

pub use config::ServerConfig;

use metrics::MetricsLayer;

use actix_web::body::BoxBody;
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use pagination::DEFAULT_PAGE_SIZE;

use crate::Trace;
use crate::domain::UserDirectory;
use crate::inbound::http::routes;
use crate::inbound::http::state::HttpState;
use crate::middleware::LatencyHistogram;

/// Shared state cloned into every worker's application.
#[derive(Clone)]
pub struct AppDependencies {
    pub http_state: web::Data<HttpState>,
    pub metrics: Option<LatencyHistogram>,
}

impl AppDependencies {
    /// Wire the directory service over the configured adapters.
    pub fn from_config(config: &ServerConfig) -> Self {
        let directory = UserDirectory::new(config.users.clone(), DEFAULT_PAGE_SIZE);
        Self {
            http_state: web::Data::new(HttpState::new(directory, config.views.clone())),
            metrics: config.metrics.clone(),
        }
    }
}

/// Build the application: routes inside `Trace`, inside `RequestMetrics`.
///
/// Both middlewares therefore observe routing, handling, and rendering.
pub fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<BoxBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        http_state,
        metrics,
    } = deps;
    let metrics_layer = MetricsLayer::from_option(metrics.clone());

    App::new()
        .app_data(http_state)
        .configure(|cfg| routes::configure(cfg, metrics))
        .wrap(Trace)
        .wrap(metrics_layer)
}

/// Construct an Actix HTTP server from the provided configuration.
///
/// # Returns
/// A [`Server`] that must be awaited to drive the listener.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(config: ServerConfig) -> std::io::Result<Server> {
    let deps = AppDependencies::from_config(&config);
    let server = HttpServer::new(move || build_app(deps.clone()))
        .bind(config.bind_addr)?
        .run();
    Ok(server)
}
