//! Testing utilities for Tabula.
//!
//! In-memory collaborator implementations with inspection hooks:
//!
//! - [`MemoryDataSource`]: records per model with offset/limit slicing
//! - [`SubstTemplateEngine`]: `{{key}}` substitution, call recording, and
//!   per-template failure injection
//! - [`StaticActions`] / [`StaticCrumbs`]: fixed page chrome
//! - [`record`]: field-list record constructor

use crate::render::page::{Action, Breadcrumb};
use crate::site::{ActionProvider, CrumbProvider};
use serde_json::{Map, Value};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use tabula_core::{
    BoxError, BoxRecord, DataSource, FilterParams, Model, PageRequest, TemplateEngine,
    TemplateError,
};

// ============================================================================
// Records
// ============================================================================

/// Build a record from (field, value) pairs.
pub fn record(fields: &[(&str, Value)]) -> Map<String, Value> {
    fields
        .iter()
        .map(|(name, value)| (name.to_string(), value.clone()))
        .collect()
}

// ============================================================================
// Memory Data Source
// ============================================================================

/// An in-memory data source keyed by model name.
///
/// `fetch_one` and filter parameters match on the textual form of field
/// values, which is what URL-extracted parameters give us anyway.
pub struct MemoryDataSource {
    records: Mutex<HashMap<String, Vec<Map<String, Value>>>>,
}

impl Default for MemoryDataSource {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDataSource {
    /// Create an empty data source.
    pub fn new() -> Self {
        Self {
            records: Mutex::new(HashMap::new()),
        }
    }

    /// Append a record for `model`.
    pub fn insert(&self, model: &str, record: Map<String, Value>) {
        self.records
            .lock()
            .unwrap()
            .entry(model.to_string())
            .or_default()
            .push(record);
    }

    /// Number of stored records for `model`.
    pub fn count(&self, model: &str) -> usize {
        self.records
            .lock()
            .unwrap()
            .get(model)
            .map(Vec::len)
            .unwrap_or(0)
    }
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

fn matches_filter(record: &Map<String, Value>, filter: &FilterParams) -> bool {
    filter.iter().all(|(field, expected)| {
        record
            .get(field)
            .map(|value| value_text(value) == *expected)
            .unwrap_or(false)
    })
}

impl DataSource for MemoryDataSource {
    async fn fetch_page(
        &self,
        model: &Model,
        offset: usize,
        limit: usize,
        filter: &FilterParams,
    ) -> Result<Vec<BoxRecord>, BoxError> {
        let records = self.records.lock().unwrap();
        Ok(records
            .get(model.name())
            .into_iter()
            .flatten()
            .filter(|record| matches_filter(record, filter))
            .skip(offset)
            .take(limit)
            .map(|record| Box::new(record.clone()) as BoxRecord)
            .collect())
    }

    async fn fetch_one(
        &self,
        model: &Model,
        filter: &FilterParams,
    ) -> Result<Option<BoxRecord>, BoxError> {
        let records = self.records.lock().unwrap();
        Ok(records
            .get(model.name())
            .into_iter()
            .flatten()
            .find(|record| matches_filter(record, filter))
            .map(|record| Box::new(record.clone()) as BoxRecord))
    }
}

// The shared-handle form (`Arc<MemoryDataSource>` as a `DataSource`) is
// provided by the blanket `impl<T: DataSource> DataSource for Arc<T>` in
// tabula-core, so tests can keep inspecting after the site takes ownership.

// ============================================================================
// Substituting Template Engine
// ============================================================================

/// A template engine doing flat `{{key}}` substitution.
///
/// Records every render call and can be told to fail specific templates, for
/// degradation tests.
pub struct SubstTemplateEngine {
    templates: Mutex<HashMap<String, String>>,
    failing: Mutex<HashSet<String>>,
    calls: Mutex<Vec<(String, Value)>>,
}

impl Default for SubstTemplateEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl SubstTemplateEngine {
    /// Create an engine with no templates.
    pub fn new() -> Self {
        Self {
            templates: Mutex::new(HashMap::new()),
            failing: Mutex::new(HashSet::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Define (or redefine) a template body.
    pub fn define(&self, name: &str, body: &str) {
        self.templates
            .lock()
            .unwrap()
            .insert(name.to_string(), body.to_string());
    }

    /// Make every render of `name` fail.
    pub fn fail(&self, name: &str) {
        self.failing.lock().unwrap().insert(name.to_string());
    }

    /// All (template, data) render calls so far.
    pub fn calls(&self) -> Vec<(String, Value)> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of renders of `name`.
    pub fn render_count(&self, name: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|(template, _)| template == name)
            .count()
    }
}

fn substitute(body: &str, data: &Value) -> String {
    let mut out = body.to_string();
    if let Value::Object(map) = data {
        for (key, value) in map {
            out = out.replace(&format!("{{{{{key}}}}}"), &value_text(value));
        }
    }
    out
}

impl TemplateEngine for SubstTemplateEngine {
    fn render(&self, template: &str, data: &Value) -> Result<String, TemplateError> {
        self.calls
            .lock()
            .unwrap()
            .push((template.to_string(), data.clone()));

        if self.failing.lock().unwrap().contains(template) {
            return Err(TemplateError::Render {
                template: template.to_string(),
                reason: "injected failure".to_string(),
            });
        }
        let body = self
            .templates
            .lock()
            .unwrap()
            .get(template)
            .cloned()
            .ok_or_else(|| TemplateError::NotFound(template.to_string()))?;
        Ok(substitute(&body, data))
    }
}

// The shared-handle form (`Arc<SubstTemplateEngine>` as a `TemplateEngine`) is
// provided by the blanket `impl<T: TemplateEngine> TemplateEngine for Arc<T>`
// in tabula-core.

// ============================================================================
// Static Page Chrome
// ============================================================================

/// An action rendering to fixed markup, or failing on demand.
pub struct StaticAction {
    markup: String,
    fail: bool,
}

impl StaticAction {
    /// An action that renders to `markup`.
    pub fn new(markup: impl Into<String>) -> Self {
        Self {
            markup: markup.into(),
            fail: false,
        }
    }

    /// An action whose render always fails.
    pub fn failing() -> Self {
        Self {
            markup: String::new(),
            fail: true,
        }
    }
}

impl Action for StaticAction {
    fn render(&self, _templates: &dyn TemplateEngine) -> Result<String, TemplateError> {
        if self.fail {
            return Err(TemplateError::Render {
                template: "action".to_string(),
                reason: "injected failure".to_string(),
            });
        }
        Ok(self.markup.clone())
    }
}

/// A provider returning a fixed list of [`StaticAction`] markups.
pub struct StaticActions(pub Vec<String>);

impl ActionProvider for StaticActions {
    fn actions(&self, _req: &PageRequest) -> Vec<Box<dyn Action>> {
        self.0
            .iter()
            .map(|markup| Box::new(StaticAction::new(markup.clone())) as Box<dyn Action>)
            .collect()
    }
}

/// A provider returning a fixed breadcrumb trail.
pub struct StaticCrumbs(pub Vec<Breadcrumb>);

impl CrumbProvider for StaticCrumbs {
    fn crumbs(&self, _req: &PageRequest) -> Vec<Breadcrumb> {
        self.0.clone()
    }
}
