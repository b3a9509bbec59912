//! Template engine collaborator.

use crate::error::TemplateError;
use serde_json::Value;
use std::sync::Arc;

/// The "render a named template with data" capability.
///
/// Markup substitution is entirely the collaborator's concern; this core
/// hands it a template name and a JSON data mapping and inserts the returned
/// markup verbatim, without escaping. Callers own the trust boundary for data
/// flowing into templates.
pub trait TemplateEngine: Send + Sync {
    /// Render `template` with `data`.
    fn render(&self, template: &str, data: &Value) -> Result<String, TemplateError>;
}

impl TemplateEngine for Box<dyn TemplateEngine> {
    fn render(&self, template: &str, data: &Value) -> Result<String, TemplateError> {
        self.as_ref().render(template, data)
    }
}

impl<T: TemplateEngine + ?Sized> TemplateEngine for Arc<T> {
    fn render(&self, template: &str, data: &Value) -> Result<String, TemplateError> {
        self.as_ref().render(template, data)
    }
}
