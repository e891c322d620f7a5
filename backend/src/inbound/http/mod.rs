//! HTTP inbound adapter serving the server-rendered user directory.

pub mod error;
pub mod landing;
pub mod metrics;
pub mod query;
pub mod render;
pub mod routes;
pub mod state;
pub mod users;

pub use error::ApiResult;
