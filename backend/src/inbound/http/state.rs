//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on the domain service and the view port, and remain testable
//! without I/O.

use std::sync::Arc;

use crate::domain::UserDirectory;
use crate::domain::ports::ViewRenderer;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub directory: UserDirectory,
    pub views: Arc<dyn ViewRenderer>,
}

impl HttpState {
    pub fn new(directory: UserDirectory, views: Arc<dyn ViewRenderer>) -> Self {
        Self { directory, views }
    }
}
