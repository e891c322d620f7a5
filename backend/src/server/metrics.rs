//! Optional request metrics middleware wrapper.
//!
//! Both variants produce the same boxed service type, so the application
//! type does not depend on whether metrics are enabled.

use actix_service::{
    Service, ServiceExt as _, Transform,
    boxed::{self, BoxService},
};
use actix_web::body::{BoxBody, MessageBody};
use actix_web::dev::{ServiceRequest, ServiceResponse};
use futures_util::future::LocalBoxFuture;

use crate::middleware::{LatencyHistogram, RequestMetrics};

#[derive(Clone)]
pub(crate) enum MetricsLayer {
    Enabled(RequestMetrics),
    Disabled,
}

impl MetricsLayer {
    #[must_use]
    pub(crate) fn from_option(histogram: Option<LatencyHistogram>) -> Self {
        match histogram {
            Some(histogram) => Self::Enabled(RequestMetrics::new(histogram)),
            None => Self::Disabled,
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for MetricsLayer
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = actix_web::Error;
    type InitError = ();
    type Transform = BoxService<ServiceRequest, ServiceResponse<BoxBody>, actix_web::Error>;
    type Future = LocalBoxFuture<'static, Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        match self.clone() {
            MetricsLayer::Enabled(metrics) => {
                let fut = metrics.new_transform(service);
                Box::pin(async move {
                    let svc = fut.await?;
                    let svc = svc.map(|res: ServiceResponse<B>| res.map_into_boxed_body());
                    Ok(boxed::service(svc))
                })
            }
            MetricsLayer::Disabled => Box::pin(async move {
                let svc = service.map(|res: ServiceResponse<B>| res.map_into_boxed_body());
                Ok(boxed::service(svc))
            }),
        }
    }
}
