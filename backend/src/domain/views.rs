//! Names of the templates and assets the HTTP adapter renders.

/// Static landing page served at `/`.
pub const LANDING_PAGE: &str = "index.html";
/// Template for a single-user lookup.
pub const USER_PAGE: &str = "user.html";
/// Template for the paginated listing.
pub const USER_LIST_PAGE: &str = "users.html";
