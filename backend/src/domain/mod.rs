//! Domain types, services, and the ports they depend on.
//!
//! Nothing in this module depends on Actix or Diesel; adapters live under
//! `inbound` and `outbound`.

pub mod error;
pub mod ports;
pub mod trace_id;
pub mod user;
pub mod user_directory;
pub mod views;

pub use self::error::{Error, ErrorCode};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{NewUser, User, UserId, UserValidationError};
pub use self::user_directory::{
    STORE_UNAVAILABLE, USER_NOT_FOUND, UserDirectory, UserLookup, UserPage,
};
