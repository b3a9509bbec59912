//! Error types for Tabula.
//!
//! A structured error hierarchy using `thiserror`:
//!
//! - [`PageError`] - Top-level error for page serving
//! - [`CycleError`] - A hierarchy edge would create a cycle (fatal at declaration)
//! - [`DispatchError`] - Dispatch resolution errors
//! - [`ModelNotFoundError`] - Unknown model identifier (becomes a 404)
//! - [`TemplateError`] - Template lookup/render failures

use crate::tag::Tag;
use thiserror::Error;

/// A boxed error type for dynamic error handling.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Top-level error type for page serving.
#[derive(Error, Debug)]
pub enum PageError {
    /// Dispatch resolution failed.
    #[error("dispatch error: {0}")]
    Dispatch(#[from] DispatchError),

    /// A model identifier could not be resolved.
    #[error(transparent)]
    Model(#[from] ModelNotFoundError),

    /// A required template failed to resolve or render.
    #[error("template error: {0}")]
    Template(#[from] TemplateError),

    /// Page options failed validation.
    #[error("invalid page options: {0}")]
    InvalidOptions(String),

    /// A collaborator failed.
    #[error(transparent)]
    Custom(BoxError),
}

/// A hierarchy edge would create an inheritance cycle.
///
/// This is a declaration conflict: it must stop startup, never be recovered
/// from at serving time.
#[derive(Error, Debug, PartialEq, Eq)]
#[error("deriving `{tag}` from `{parent}` would create an inheritance cycle")]
pub struct CycleError {
    /// The tag being declared.
    pub tag: Tag,
    /// The parent that would close the cycle.
    pub parent: Tag,
}

/// Errors from dispatch resolution.
#[derive(Error, Debug)]
pub enum DispatchError {
    /// Nothing matches the query and no fallback is registered.
    ///
    /// Recoverable: optional operations treat this as "no output", request
    /// handling surfaces it as a not-found response.
    #[error("no handler registered for {0}")]
    NoHandler(String),

    /// Two distinct keys are equally specific for the query.
    ///
    /// A declaration conflict; resolution refuses to pick one arbitrarily.
    #[error("ambiguous dispatch for {query}: {candidates} equally specific handlers")]
    Ambiguous {
        /// The query that hit the tie.
        query: String,
        /// Number of equally specific candidates.
        candidates: usize,
    },
}

/// An unknown model identifier.
#[derive(Error, Debug, PartialEq, Eq)]
#[error("no model registered under `{0}`")]
pub struct ModelNotFoundError(pub String);

/// Errors from the template engine collaborator.
#[derive(Error, Debug)]
pub enum TemplateError {
    /// No template is registered under the given name.
    #[error("template not found: {0}")]
    NotFound(String),

    /// The template exists but failed to render.
    #[error("failed to render template `{template}`: {reason}")]
    Render {
        /// The template that failed.
        template: String,
        /// Engine-reported reason.
        reason: String,
    },
}

impl From<BoxError> for PageError {
    fn from(err: BoxError) -> Self {
        PageError::Custom(err)
    }
}
