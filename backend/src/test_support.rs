//! Test utilities for the userdir crate.
//!
//! This module provides shared helpers for both unit tests (in `src/`) and
//! integration tests (in `tests/`). It is only compiled for tests or with the
//! `test-support` feature.

mod captured_logs;
mod clock;
mod in_memory_users;
mod stub_views;

pub use captured_logs::CapturedLogs;
pub use clock::FixedClock;
pub use in_memory_users::InMemoryUserRepository;
pub use stub_views::StubViewRenderer;
