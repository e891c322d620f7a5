//! Lenient extraction of `application/x-www-form-urlencoded` values.
//!
//! Handlers never reject a request over a malformed or missing parameter;
//! absent values are reported as `None` and callers choose the fallback.

use url::form_urlencoded;

/// First value for `key` in an urlencoded query string or form body.
///
/// # Examples
/// ```
/// use userdir::inbound::http::query::first_value;
///
/// assert_eq!(first_value(b"page=2&page=3", "page").as_deref(), Some("2"));
/// assert_eq!(first_value(b"username=ada+l%C3%B6f", "username").as_deref(), Some("ada löf"));
/// assert_eq!(first_value(b"", "page"), None);
/// ```
pub fn first_value(input: &[u8], key: &str) -> Option<String> {
    form_urlencoded::parse(input)
        .find(|(name, _)| name == key)
        .map(|(_, value)| value.into_owned())
}

/// Query string pointing the fetch endpoint at `username`.
///
/// # Examples
/// ```
/// use userdir::inbound::http::query::user_location;
///
/// assert_eq!(user_location("ada lovelace"), "/user?username=ada+lovelace");
/// assert_eq!(user_location(""), "/user?username=");
/// ```
pub fn user_location(username: &str) -> String {
    let query = form_urlencoded::Serializer::new(String::new())
        .append_pair("username", username)
        .finish();
    format!("/user?{query}")
}
