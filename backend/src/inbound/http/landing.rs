//! Landing page handler.

use actix_web::http::header::ContentType;
use actix_web::{HttpResponse, get, web};

use crate::domain::Error;
use crate::domain::ports::RenderError;
use crate::domain::views::LANDING_PAGE;
use crate::inbound::http::ApiResult;
use crate::inbound::http::render::render_failure;
use crate::inbound::http::state::HttpState;

/// Serve the static landing page.
#[get("/")]
pub async fn landing(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let body = state.views.asset(LANDING_PAGE).map_err(|err| match err {
        RenderError::MissingTemplate { name, .. } => {
            Error::not_found(format!("{name} is not available"))
        }
        other => render_failure(other),
    })?;
    Ok(HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(body))
}
