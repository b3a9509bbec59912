//! # tabula - Admin-Page Generation Framework
//!
//! `tabula` turns a set of data models into browsable list/detail admin pages,
//! with appearance and behavior overridable per page-kind and per model
//! through a **hierarchical polymorphic dispatch engine**: page-kinds,
//! table-styles and cell-styles form a multiple-inheritance tag hierarchy,
//! and every rendering decision resolves to the closest registered ancestor
//! with graceful fallback.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use tabula::prelude::*;
//!
//! let site = Site::builder(data_source, template_engine)
//!     .register_model(Model::new("widget", ["id", "name", "email"]))
//!     .declare_view("list", Method::Get, "", Some("widget"))
//!     .declare_view("detail", Method::Get, "/{id}", Some("widget"))
//!     .build();
//!
//! let response = site.handle(Request::get("/widget?page=2")).await;
//! ```
//!
//! Transport, persistence and template substitution stay outside: the site
//! consumes [`DataSource`], [`ModelResolver`] and [`TemplateEngine`]
//! collaborators and exposes `handle(request) -> response`.

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

pub use tabula_core::{
    // Records and models
    BoxRecord,
    // Error types
    BoxError,
    CycleError,
    // Collaborator seams
    DataSource,
    // Dispatch
    DispatchError,
    DispatchKey,
    DispatchTable,
    DispatchValue,
    DynDataSource,
    DynPageHandler,
    FilterParams,
    KeyPart,
    // Requests
    Method,
    Model,
    ModelNotFoundError,
    ModelResolver,
    PageError,
    // Handlers
    PageHandler,
    PageRequest,
    Record,
    Request,
    Response,
    // Classification
    Tag,
    TagHierarchy,
    TemplateEngine,
    TemplateError,
};

pub use tabula_std::config::SiteConfig;
pub use tabula_std::handlers::{DetailHandler, ListHandler};
pub use tabula_std::render::page::{Action, Breadcrumb, PageOptions, PageRenderer, ShellRender};
pub use tabula_std::render::table::{TableMarkup, TableRenderer, header_label};
pub use tabula_std::routing::{CompiledRouter, RouteEntry, RouteRegistry, RouteScope, RouteTarget};
pub use tabula_std::site::{ActionProvider, CrumbProvider, MapResolver, Site, SiteBuilder};
pub use tabula_std::style::{CellSpec, CellTransform, StyleBook};

/// Testing utilities.
pub mod testing {
    pub use tabula_std::testing::{
        MemoryDataSource, StaticAction, StaticActions, StaticCrumbs, SubstTemplateEngine, record,
    };
}

/// Prelude module - common imports for Tabula.
///
/// # Usage
///
/// ```rust,ignore
/// use tabula::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        Action,
        Breadcrumb,
        // Collaborators
        DataSource,
        DispatchError,
        // Dispatch
        DispatchTable,
        DispatchValue,
        KeyPart,
        // Requests
        Method,
        Model,
        ModelResolver,
        PageError,
        // Handlers
        PageHandler,
        PageOptions,
        PageRequest,
        Record,
        Request,
        Response,
        // Serving
        Site,
        SiteBuilder,
        SiteConfig,
        // Classification
        Tag,
        TagHierarchy,
        TemplateEngine,
    };
}
