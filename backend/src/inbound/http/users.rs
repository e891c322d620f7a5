//! User directory handlers.
//!
//! ```text
//! GET  /user?username=ada        Render one user
//! POST /user  username=ada&...   Register a user, 303 to its page
//! GET  /users?page=2             Render one page of the listing
//! ```

use actix_web::http::header;
use actix_web::{HttpRequest, HttpResponse, get, post, web};
use pagination::PageNumber;

use crate::domain::NewUser;
use crate::domain::views::{USER_LIST_PAGE, USER_PAGE};
use crate::inbound::http::ApiResult;
use crate::inbound::http::query::{first_value, user_location};
use crate::inbound::http::render::render_html;
use crate::inbound::http::state::HttpState;

/// Render the live user named by the `username` query parameter.
///
/// A missing parameter looks up the empty username. An unknown user still
/// renders `200 OK`, with `user: null` and the not-found message.
#[get("/user")]
pub async fn fetch_user(state: web::Data<HttpState>, req: HttpRequest) -> ApiResult<HttpResponse> {
    let username = first_value(req.query_string().as_bytes(), "username").unwrap_or_default();
    let lookup = state.directory.lookup(&username).await?;
    render_html(state.views.as_ref(), USER_PAGE, &lookup)
}

/// Register a user from an urlencoded form body.
///
/// Missing `username` or `email` fields are stored as empty strings. The
/// response redirects to the new user's page.
#[post("/user")]
pub async fn create_user(state: web::Data<HttpState>, body: web::Bytes) -> ApiResult<HttpResponse> {
    let username = first_value(&body, "username").unwrap_or_default();
    let email = first_value(&body, "email").unwrap_or_default();
    let location = user_location(&username);

    state
        .directory
        .register(NewUser::new(username, email))
        .await?;

    Ok(HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish())
}

/// Render one page of live users, ten per page, in id order.
///
/// Missing or malformed `page` values fall back to the first page.
#[get("/users")]
pub async fn list_users(state: web::Data<HttpState>, req: HttpRequest) -> ApiResult<HttpResponse> {
    let raw_page = first_value(req.query_string().as_bytes(), "page");
    let listing = state
        .directory
        .list_page(PageNumber::parse(raw_page.as_deref()))
        .await?;
    render_html(state.views.as_ref(), USER_LIST_PAGE, &listing)
}
