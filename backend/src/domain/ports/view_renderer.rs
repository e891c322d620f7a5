//! Port abstraction for turning view payloads into response bodies.

use serde_json::Value;

use super::define_port_error;

define_port_error! {
    /// Failures raised while loading or executing a view.
    pub enum RenderError {
        /// The named template or asset does not exist.
        MissingTemplate { name: String, message: String } => "template {name} is missing: {message}",
        /// The template exists but could not be parsed or executed.
        Template { name: String, message: String } => "template {name} failed: {message}",
    }
    shared { name: str, message: str }
}

/// Renders named templates and serves static view assets.
#[cfg_attr(test, mockall::automock)]
pub trait ViewRenderer: Send + Sync {
    /// Render `template` with `payload` as its context.
    fn render(&self, template: &str, payload: &Value) -> Result<Vec<u8>, RenderError>;

    /// Raw bytes of a static view asset such as the landing page.
    fn asset(&self, name: &str) -> Result<Vec<u8>, RenderError>;
}
