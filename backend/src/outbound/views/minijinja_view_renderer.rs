//! MiniJinja-backed implementation of the `ViewRenderer` port.
//!
//! Templates are read from a capability-scoped directory on every render, so
//! edits on disk are picked up without a restart and paths cannot escape the
//! template root. HTML templates are auto-escaped.

use std::io;
use std::path::Path;

use cap_std::{ambient_authority, fs::Dir};
use minijinja::Environment;
use serde_json::Value;
use tracing::debug;

use crate::domain::ports::{RenderError, ViewRenderer};

/// Renders templates found under a single directory.
pub struct MiniJinjaViewRenderer {
    root: Dir,
}

impl MiniJinjaViewRenderer {
    /// Open `path` as the template root.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error when the directory cannot be opened.
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let root = Dir::open_ambient_dir(path.as_ref(), ambient_authority())?;
        Ok(Self { root })
    }

    /// Use an already opened directory as the template root.
    pub fn from_dir(root: Dir) -> Self {
        Self { root }
    }

    fn read(&self, name: &str) -> Result<Vec<u8>, RenderError> {
        self.root.read(name).map_err(|err| {
            debug!(template = name, error = %err, "failed to read view file");
            if err.kind() == io::ErrorKind::NotFound {
                RenderError::missing_template(name, err.to_string())
            } else {
                RenderError::template(name, err.to_string())
            }
        })
    }
}

impl ViewRenderer for MiniJinjaViewRenderer {
    fn render(&self, template: &str, payload: &Value) -> Result<Vec<u8>, RenderError> {
        let bytes = self.read(template)?;
        let source = String::from_utf8(bytes)
            .map_err(|err| RenderError::template(template, err.to_string()))?;

        let mut env = Environment::new();
        env.add_template(template, &source)
            .map_err(|err| RenderError::template(template, err.to_string()))?;
        let rendered = env
            .get_template(template)
            .and_then(|tmpl| tmpl.render(payload))
            .map_err(|err| RenderError::template(template, err.to_string()))?;
        Ok(rendered.into_bytes())
    }

    fn asset(&self, name: &str) -> Result<Vec<u8>, RenderError> {
        self.read(name)
    }
}
