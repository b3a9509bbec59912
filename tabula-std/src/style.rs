//! The style book: the rendering-side dispatch state of a site.
//!
//! One hierarchy serves every classification axis (page-kinds, table-styles,
//! cell-styles all live in the same tag namespace), and each rendering
//! operation gets its own dispatch table over it. The style book is assembled
//! by the site builder during declaration and is read-only while serving.

use crate::config::SiteConfig;
use crate::render::page::ShellRender;
use serde_json::Value;
use std::sync::Arc;
use tabula_core::{DispatchTable, Tag, TagHierarchy};

/// A value transform applied to a cell before its template renders.
pub type CellTransform = Arc<dyn Fn(Value) -> Value + Send + Sync>;

/// How a cell style renders: a template name plus an optional transform.
#[derive(Clone)]
pub struct CellSpec {
    /// Template rendered with the (transformed) cell value.
    pub template: String,
    /// Value transform; identity when absent.
    pub transform: Option<CellTransform>,
}

impl CellSpec {
    /// A spec rendering `template` with the untransformed value.
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            transform: None,
        }
    }

    /// Attach a value transform.
    pub fn with_transform(mut self, transform: CellTransform) -> Self {
        self.transform = Some(transform);
        self
    }

    /// Apply the transform, if any.
    pub fn apply(&self, value: Value) -> Value {
        match &self.transform {
            Some(transform) => transform(value),
            None => value,
        }
    }
}

/// The rendering-side dispatch state: hierarchy, style tables, defaults.
pub struct StyleBook {
    pub(crate) hierarchy: TagHierarchy,
    /// Page-kind specific full-page renderers.
    pub(crate) shells: DispatchTable<Arc<dyn ShellRender>>,
    /// Explicit column orderings, keyed by table-style.
    pub(crate) column_orders: DispatchTable<Vec<String>>,
    /// Cell-style tags, keyed by (table-style, column-name).
    pub(crate) cell_formats: DispatchTable<Tag>,
    /// Cell specs, keyed by cell-style (ancestor fallback applies).
    pub(crate) cell_specs: DispatchTable<CellSpec>,
    pub(crate) config: SiteConfig,
}

impl StyleBook {
    /// An empty style book with the given defaults.
    pub fn new(config: SiteConfig) -> Self {
        Self {
            hierarchy: TagHierarchy::new(),
            shells: DispatchTable::new(),
            column_orders: DispatchTable::new(),
            cell_formats: DispatchTable::new(),
            cell_specs: DispatchTable::new(),
            config,
        }
    }

    /// The shared tag hierarchy.
    pub fn hierarchy(&self) -> &TagHierarchy {
        &self.hierarchy
    }

    /// The site defaults.
    pub fn config(&self) -> &SiteConfig {
        &self.config
    }
}
