//! Prometheus exposition endpoint.

use actix_web::{HttpResponse, get, web};

use crate::domain::Error;
use crate::inbound::http::ApiResult;
use crate::middleware::LatencyHistogram;

/// Export the request latency histogram in the Prometheus text format.
#[get("/metrics")]
pub async fn export_metrics(histogram: web::Data<LatencyHistogram>) -> ApiResult<HttpResponse> {
    let body = histogram
        .encode()
        .map_err(|err| Error::internal(format!("failed to encode metrics: {err}")))?;
    Ok(HttpResponse::Ok()
        .content_type(histogram.content_type())
        .body(body))
}
