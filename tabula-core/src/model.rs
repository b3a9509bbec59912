//! Model descriptors and resolution.

use crate::error::ModelNotFoundError;

/// A data model exposed through the admin pages.
///
/// The core only needs an identifier and the declared column set; storage is
/// the data-source collaborator's concern. The declared column order is the
/// last-resort fallback when no records are available to infer from and no
/// explicit ordering is registered.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Model {
    name: String,
    columns: Vec<String>,
}

impl Model {
    /// Create a model descriptor.
    pub fn new(
        name: impl Into<String>,
        columns: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            name: name.into(),
            columns: columns.into_iter().map(Into::into).collect(),
        }
    }

    /// The model identifier, as used in URLs and dispatch type axes.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The declared columns, in declaration order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// The path prefix all of this model's routes are scoped under.
    pub fn path_prefix(&self) -> String {
        format!("/{}", self.name)
    }
}

/// Resolves a model identifier extracted from a URL to its descriptor.
pub trait ModelResolver: Send + Sync {
    /// Resolve `name`, failing with [`ModelNotFoundError`] for unknown models.
    fn resolve(&self, name: &str) -> Result<Model, ModelNotFoundError>;
}
