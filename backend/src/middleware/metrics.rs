//! Request latency histogram and the middleware that feeds it.
//!
//! The histogram is created once per process and shared between the
//! middleware and the `/metrics` handler; there is no global registry.

use std::task::{Context, Poll};
use std::time::Instant;

use actix_web::Error;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use prometheus::{Encoder, HistogramOpts, HistogramVec, Registry, TextEncoder};

/// Name of the exported latency histogram.
pub const REQUEST_DURATION_METRIC: &str = "http_request_duration_seconds";

/// Prometheus histogram of request durations labelled by method and path.
///
/// # Metric Specification
///
/// - **Name**: `http_request_duration_seconds`
/// - **Type**: Histogram
/// - **Labels**: `method`, `path` (the matched route pattern when routing
///   succeeded, the raw request path otherwise)
#[derive(Clone)]
pub struct LatencyHistogram {
    registry: Registry,
    durations: HistogramVec,
}

impl LatencyHistogram {
    /// Create the histogram and register it with `registry`.
    ///
    /// # Errors
    ///
    /// Returns an error if a metric with the same name is already registered.
    pub fn new(registry: Registry) -> Result<Self, prometheus::Error> {
        let durations = HistogramVec::new(
            HistogramOpts::new(REQUEST_DURATION_METRIC, "HTTP request latency in seconds"),
            &["method", "path"],
        )?;
        registry.register(Box::new(durations.clone()))?;
        Ok(Self {
            registry,
            durations,
        })
    }

    /// Record one request.
    pub fn observe(&self, method: &str, path: &str, seconds: f64) {
        self.durations
            .with_label_values(&[method, path])
            .observe(seconds);
    }

    /// Number of observations recorded for `method` and `path`.
    pub fn sample_count(&self, method: &str, path: &str) -> u64 {
        self.durations
            .get_metric_with_label_values(&[method, path])
            .map(|histogram| histogram.get_sample_count())
            .unwrap_or(0)
    }

    /// Content type of [`LatencyHistogram::encode`] output.
    pub fn content_type(&self) -> String {
        TextEncoder::new().format_type().to_owned()
    }

    /// Render every metric in the registry in the Prometheus text format.
    ///
    /// # Errors
    ///
    /// Returns an error when encoding fails.
    pub fn encode(&self) -> Result<String, prometheus::Error> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|err| prometheus::Error::Msg(err.to_string()))
    }
}

/// Middleware observing one latency sample per request, including failures.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use prometheus::Registry;
/// use userdir::RequestMetrics;
/// use userdir::middleware::LatencyHistogram;
///
/// let histogram = LatencyHistogram::new(Registry::new()).expect("register histogram");
/// let app = App::new().wrap(RequestMetrics::new(histogram));
/// ```
#[derive(Clone)]
pub struct RequestMetrics {
    histogram: LatencyHistogram,
}

impl RequestMetrics {
    pub fn new(histogram: LatencyHistogram) -> Self {
        Self { histogram }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequestMetrics
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = RequestMetricsMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequestMetricsMiddleware {
            service,
            histogram: self.histogram.clone(),
        }))
    }
}

/// Service wrapper produced by [`RequestMetrics`].
pub struct RequestMetricsMiddleware<S> {
    service: S,
    histogram: LatencyHistogram,
}

impl<S, B> Service<ServiceRequest> for RequestMetricsMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let method = req.method().to_string();
        let raw_path = req.path().to_owned();
        let histogram = self.histogram.clone();
        let started = Instant::now();
        let fut = self.service.call(req);

        Box::pin(async move {
            let outcome = fut.await;
            let path = outcome
                .as_ref()
                .ok()
                .and_then(|res| res.request().match_pattern())
                .unwrap_or(raw_path);
            histogram.observe(&method, &path, started.elapsed().as_secs_f64());
            outcome
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, HttpResponse, test as actix_test, web};

    fn histogram() -> LatencyHistogram {
        LatencyHistogram::new(Registry::new()).expect("metric registration should succeed")
    }

    #[test]
    fn registers_histogram_with_registry() {
        let registry = Registry::new();
        let histogram = LatencyHistogram::new(registry.clone()).expect("register");
        histogram.observe("GET", "/users", 0.01);

        assert_eq!(registry.gather().len(), 1, "metric should be registered");
        let text = histogram.encode().expect("encode");
        assert!(text.contains(&format!("# TYPE {REQUEST_DURATION_METRIC} histogram")));
    }

    #[test]
    fn rejects_double_registration() {
        let registry = Registry::new();
        let _first = LatencyHistogram::new(registry.clone()).expect("first registration");
        assert!(LatencyHistogram::new(registry).is_err());
    }

    #[test]
    fn encode_emits_text_exposition() {
        let histogram = histogram();
        histogram.observe("GET", "/", 0.002);
        let text = histogram.encode().expect("encode");
        assert!(text.contains("http_request_duration_seconds_count{method=\"GET\",path=\"/\"} 1"));
        assert!(histogram.content_type().starts_with("text/plain"));
    }

    #[actix_web::test]
    async fn observes_once_per_request_under_route_pattern() {
        let histogram = histogram();
        let app = actix_test::init_service(
            App::new()
                .wrap(RequestMetrics::new(histogram.clone()))
                .route("/users", web::get().to(|| async { HttpResponse::Ok().finish() })),
        )
        .await;

        for _ in 0..3 {
            let req = actix_test::TestRequest::get().uri("/users?page=2").to_request();
            let _res = actix_test::call_service(&app, req).await;
        }

        assert_eq!(histogram.sample_count("GET", "/users"), 3);
    }

    #[actix_web::test]
    async fn observes_unrouted_requests_under_raw_path() {
        let histogram = histogram();
        let app = actix_test::init_service(App::new().wrap(RequestMetrics::new(histogram.clone()))).await;

        let req = actix_test::TestRequest::get().uri("/nowhere").to_request();
        let res = actix_test::call_service(&app, req).await;

        assert_eq!(res.status(), actix_web::http::StatusCode::NOT_FOUND);
        assert_eq!(histogram.sample_count("GET", "/nowhere"), 1);
    }
}
