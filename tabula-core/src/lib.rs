//! # tabula-core
//!
//! Core types and dispatch machinery for the Tabula admin-page generator.
//!
//! This crate has minimal dependencies and is designed to be imported by
//! anything that plugs into the generator (custom handlers, style packs,
//! collaborator implementations) without pulling in the full `tabula-std`
//! serving stack.
//!
//! # Architecture
//!
//! The generator is built on three leaf-first layers:
//!
//! ## Layer 1: Classification ([`Tag`], [`TagHierarchy`])
//!
//! Symbolic tags classify page-kinds, table-styles and cell-styles. The
//! hierarchy is a mutable DAG with multiple inheritance, built during
//! declaration and read-only while serving. Cycles fail fast at declaration.
//!
//! ## Layer 2: Dispatch ([`DispatchTable`])
//!
//! Generic multi-key polymorphic resolution over tag and type axes. One table
//! per polymorphic operation; all of them resolve the same way: closest
//! registered ancestor wins, equal specificity is a declaration conflict, a
//! fully-wildcarded key is the fallback of last resort.
//!
//! ## Layer 3: Serving seams ([`PageHandler`], collaborator traits)
//!
//! Request handling consumes a "fetch records" capability ([`DataSource`]), a
//! "resolve model name" capability ([`ModelResolver`]) and a "render a named
//! template" capability ([`TemplateEngine`]), and exposes page handlers
//! dispatched per (page-kind, model-type). The async seams follow a
//! static-first pattern: native `async fn` traits for direct use, `Dyn*`
//! object-safe counterparts for storage in dispatch tables.
//!
//! # Error Types
//!
//! - [`PageError`] - Top-level serving error
//! - [`CycleError`] - Hierarchy cycle at declaration time
//! - [`DispatchError`] - Resolution errors (ambiguity, no handler)
//! - [`TemplateError`] / [`ModelNotFoundError`] - Collaborator failures

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod dispatch;
mod error;
mod handler;
mod hierarchy;
mod model;
mod record;
mod request;
mod response;
mod source;
mod tag;
mod templates;

// Re-exports
pub use dispatch::{DispatchKey, DispatchTable, DispatchValue, KeyPart};
pub use error::{
    BoxError, CycleError, DispatchError, ModelNotFoundError, PageError, TemplateError,
};
pub use handler::{DynPageHandler, PageHandler, PageRequest};
pub use hierarchy::TagHierarchy;
pub use model::{Model, ModelResolver};
pub use record::{BoxRecord, Record};
pub use request::{Method, Request};
pub use response::Response;
pub use source::{DataSource, DynDataSource, FilterParams};
pub use tag::Tag;
pub use templates::TemplateEngine;
