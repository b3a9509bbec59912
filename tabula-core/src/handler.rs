//! # Page request handlers
//!
//! The terminal endpoint of request processing: once routing has produced a
//! (page-kind, model) pair and dispatch has selected a handler for it, the
//! handler fetches whatever it needs and produces the response.
//!
//! Handlers are generic over the serving context `Cx`, the object that owns
//! the hierarchy, the dispatch tables and the collaborator handles. Keeping
//! the context a type parameter keeps this crate free of any concrete serving
//! implementation while letting handlers be stored in a [`DispatchTable`] as
//! trait objects via [`DynPageHandler`].
//!
//! [`DispatchTable`]: crate::DispatchTable

use crate::error::PageError;
use crate::model::Model;
use crate::request::Request;
use crate::response::Response;
use crate::tag::Tag;
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;

/// The routed request a handler receives.
#[derive(Clone, Debug)]
pub struct PageRequest {
    /// The page-kind the route was declared for.
    pub page_kind: Tag,
    /// The resolved target model.
    pub model: Model,
    /// Parameters extracted from the matched path pattern.
    pub params: HashMap<String, String>,
    /// The original request.
    pub request: Request,
}

impl PageRequest {
    /// Look up a path parameter.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }
}

/// A page request handler, registered per (page-kind, model-type) pair.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot handle page requests with context `{Cx}`",
    label = "missing `PageHandler` implementation",
    note = "Page handlers must implement `handle` for the serving context `{Cx}`."
)]
pub trait PageHandler<Cx: Send + Sync>: Send + Sync + 'static {
    /// Produce the response for a routed request.
    fn handle(
        &self,
        cx: &Cx,
        req: PageRequest,
    ) -> impl Future<Output = Result<Response, PageError>> + Send;
}

/// Dynamic object-safe version of [`PageHandler`].
///
/// Use this trait when handlers of different concrete types live in one
/// dispatch table.
pub trait DynPageHandler<Cx: Send + Sync>: Send + Sync + 'static {
    /// Produce the response (dynamic dispatch version).
    fn handle_dyn<'a>(
        &'a self,
        cx: &'a Cx,
        req: PageRequest,
    ) -> Pin<Box<dyn Future<Output = Result<Response, PageError>> + Send + 'a>>;
}

// Blanket implementation: any PageHandler is usable as a DynPageHandler.
impl<Cx: Send + Sync, T: PageHandler<Cx>> DynPageHandler<Cx> for T {
    fn handle_dyn<'a>(
        &'a self,
        cx: &'a Cx,
        req: PageRequest,
    ) -> Pin<Box<dyn Future<Output = Result<Response, PageError>> + Send + 'a>> {
        Box::pin(self.handle(cx, req))
    }
}
