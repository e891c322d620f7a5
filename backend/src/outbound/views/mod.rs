//! View rendering adapters.

mod minijinja_view_renderer;

pub use minijinja_view_renderer::MiniJinjaViewRenderer;
