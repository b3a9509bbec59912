//! # tabula-std
//!
//! Standard implementations for the Tabula admin-page generator.
//!
//! This crate provides:
//! - **Routing**: [`RouteRegistry`] with its lazily compiled, atomically
//!   swapped router
//! - **Rendering**: [`TableRenderer`] and [`PageRenderer`]
//! - **Serving**: the [`Site`] context and its declaration builder
//! - **Built-in handlers**: paginated list and detail pages
//! - **Testing utilities**: in-memory collaborators with inspection hooks
//!
//! [`RouteRegistry`]: routing::RouteRegistry
//! [`TableRenderer`]: render::table::TableRenderer
//! [`PageRenderer`]: render::page::PageRenderer
//! [`Site`]: site::Site

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

// Re-export core types
pub use tabula_core;

// Modules
pub mod config;
pub mod handlers;
pub mod render;
pub mod routing;
pub mod site;
pub mod style;
pub mod testing;
