//! Rendering helpers shared by the HTML handlers.

use actix_web::HttpResponse;
use actix_web::http::header::ContentType;
use serde::Serialize;
use serde_json::json;

use crate::domain::Error;
use crate::domain::ports::{RenderError, ViewRenderer};
use crate::inbound::http::ApiResult;

/// Map a view failure to a render error carrying the template name.
pub fn render_failure(error: RenderError) -> Error {
    let template = error.name().to_owned();
    Error::render_failed(error.to_string()).with_details(json!({ "template": template }))
}

/// Render `template` with `payload` into a `200 OK` HTML response.
///
/// Payload serialisation failures count as render failures.
pub fn render_html<T>(views: &dyn ViewRenderer, template: &str, payload: &T) -> ApiResult<HttpResponse>
where
    T: Serialize,
{
    let context = serde_json::to_value(payload).map_err(|err| {
        Error::render_failed(format!("failed to serialise payload for {template}: {err}"))
            .with_details(json!({ "template": template }))
    })?;
    let body = views.render(template, &context).map_err(render_failure)?;
    Ok(HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(body))
}
