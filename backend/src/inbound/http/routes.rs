//! Route table for the user directory.
//!
//! ```text
//! GET  /          landing page
//! GET  /user      fetch one user
//! POST /user      create a user
//! GET  /users     paginated listing
//! GET  /metrics   latency histogram (only when metrics are enabled)
//! ```
//!
//! Anything else falls through to Actix's default `404 Not Found`.

use actix_web::web;

use crate::inbound::http::landing::landing;
use crate::inbound::http::metrics::export_metrics;
use crate::inbound::http::users::{create_user, fetch_user, list_users};
use crate::middleware::LatencyHistogram;

/// Register the directory routes, plus `/metrics` when `histogram` is set.
pub fn configure(cfg: &mut web::ServiceConfig, histogram: Option<LatencyHistogram>) {
    cfg.service(landing)
        .service(fetch_user)
        .service(create_user)
        .service(list_users);

    if let Some(histogram) = histogram {
        cfg.app_data(web::Data::new(histogram))
            .service(export_metrics);
    }
}
