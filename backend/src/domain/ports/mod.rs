//! Domain ports implemented by outbound adapters.

mod macros;
mod user_repository;
mod view_renderer;

pub(crate) use macros::define_port_error;

#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
#[cfg(test)]
pub use view_renderer::MockViewRenderer;
pub use view_renderer::{RenderError, ViewRenderer};
