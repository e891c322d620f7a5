//! View renderer double that echoes its payload as JSON.

use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard};

use serde_json::Value;

use crate::domain::ports::{RenderError, ViewRenderer};

#[derive(Default)]
struct Recorded {
    renders: Vec<(String, Value)>,
}

/// [`ViewRenderer`] that renders each payload as its JSON text.
///
/// Templates and assets can be marked missing to exercise failure paths.
/// Every successful render is recorded.
#[derive(Default)]
pub struct StubViewRenderer {
    missing: HashSet<String>,
    recorded: Mutex<Recorded>,
}

impl StubViewRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Treat `name` as absent from the template directory.
    pub fn with_missing(mut self, name: impl Into<String>) -> Self {
        self.missing.insert(name.into());
        self
    }

    /// Template names and payloads rendered so far.
    pub fn renders(&self) -> Vec<(String, Value)> {
        self.lock_recorded().renders.clone()
    }

    fn lock_recorded(&self) -> MutexGuard<'_, Recorded> {
        match self.recorded.lock() {
            Ok(guard) => guard,
            Err(_) => panic!("stub view renderer mutex"),
        }
    }

    fn ensure_present(&self, name: &str) -> Result<(), RenderError> {
        if self.missing.contains(name) {
            return Err(RenderError::missing_template(name, "marked missing"));
        }
        Ok(())
    }
}

impl ViewRenderer for StubViewRenderer {
    fn render(&self, template: &str, payload: &Value) -> Result<Vec<u8>, RenderError> {
        self.ensure_present(template)?;
        let body = serde_json::to_vec(payload)
            .map_err(|err| RenderError::template(template, err.to_string()))?;
        self.lock_recorded()
            .renders
            .push((template.to_owned(), payload.clone()));
        Ok(body)
    }

    fn asset(&self, name: &str) -> Result<Vec<u8>, RenderError> {
        self.ensure_present(name)?;
        Ok(format!("<!doctype html><title>{name}</title>").into_bytes())
    }
}
