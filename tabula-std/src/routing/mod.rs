//! # Route registry
//!
//! Holds, per model, an ordered collection of (method, path pattern,
//! page-kind) route entries and derives a combined request router from them.
//! The derived router is expensive enough to build that it is compiled lazily
//! and cached: every registration bumps an epoch, and the next `route()` call
//! rebuilds the router for the current epoch and publishes it with an atomic
//! swap. In-flight requests always observe one complete snapshot, never a
//! router mid-construction, and a rebuild that loses the race against a newer
//! registration is simply discarded.

mod compiled;

pub use compiled::{CompiledRouter, RouteTarget};

use arc_swap::ArcSwapOption;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tabula_core::{Method, Request, Tag};

/// Which model a route declaration applies to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RouteScope {
    /// A single named model; its routes are scoped under `/{name}`.
    Model(String),
    /// The default list: applies to every model without its own declaration,
    /// with the model identifier extracted from the URL path.
    Default,
}

/// One (method, path pattern, page-kind) binding.
///
/// Patterns are relative to the model prefix: `""` for the collection root,
/// `"/{id}"` for a detail page. Entries are created at declaration and never
/// mutated.
#[derive(Clone, Debug)]
pub struct RouteEntry {
    /// Request method this entry responds to.
    pub method: Method,
    /// Path pattern relative to the model prefix.
    pub pattern: String,
    /// Page-kind dispatched for matching requests.
    pub page_kind: Tag,
}

#[derive(Clone, Default)]
pub(crate) struct RouteMap {
    pub(crate) per_model: BTreeMap<String, Vec<RouteEntry>>,
    pub(crate) fallback: Vec<RouteEntry>,
}

/// The mutable registry of route declarations with its compiled-router cache.
pub struct RouteRegistry {
    routes: Mutex<RouteMap>,
    epoch: AtomicU64,
    cache: ArcSwapOption<CompiledRouter>,
    rebuilds: AtomicUsize,
}

impl Default for RouteRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl RouteRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            routes: Mutex::new(RouteMap::default()),
            epoch: AtomicU64::new(0),
            cache: ArcSwapOption::from(None),
            rebuilds: AtomicUsize::new(0),
        }
    }

    /// Append a route entry and invalidate the compiled router.
    ///
    /// Safe to call concurrently with in-flight `route()` calls; requests keep
    /// observing the previous snapshot until the next rebuild.
    pub fn add_route(&self, method: Method, pattern: impl Into<String>, page_kind: Tag, scope: RouteScope) {
        let entry = RouteEntry {
            method,
            pattern: pattern.into(),
            page_kind,
        };
        let mut routes = self.routes.lock().unwrap();
        match scope {
            RouteScope::Model(model) => routes.per_model.entry(model).or_default().push(entry),
            RouteScope::Default => routes.fallback.push(entry),
        }
        // Bump while holding the lock so a concurrent rebuild pairs a map
        // snapshot with the epoch it was cloned at.
        self.epoch.fetch_add(1, Ordering::SeqCst);
    }

    /// Match a request against the compiled router, rebuilding it first if a
    /// registration has invalidated the cached snapshot.
    pub fn route(&self, request: &Request) -> Option<RouteTarget> {
        self.current().match_request(request)
    }

    /// Number of router rebuilds performed so far.
    ///
    /// Diagnostic: the lazy-rebuild contract promises at most one rebuild per
    /// invalidation cycle, which tests assert through this counter.
    pub fn rebuild_count(&self) -> usize {
        self.rebuilds.load(Ordering::SeqCst)
    }

    fn current(&self) -> Arc<CompiledRouter> {
        let target = self.epoch.load(Ordering::SeqCst);
        if let Some(cached) = self.cache.load_full() {
            if cached.epoch() == target {
                return cached;
            }
        }

        // Rebuild outside the lock from a consistent (snapshot, epoch) pair.
        let (snapshot, epoch) = {
            let routes = self.routes.lock().unwrap();
            (routes.clone(), self.epoch.load(Ordering::SeqCst))
        };
        let built = Arc::new(CompiledRouter::build(&snapshot, epoch));
        self.rebuilds.fetch_add(1, Ordering::SeqCst);
        tracing::debug!(epoch, "compiled router rebuilt");

        // Publish unless a newer registration superseded this build; the
        // stale result is discarded, not retried.
        if self.epoch.load(Ordering::SeqCst) == epoch {
            self.cache.store(Some(Arc::clone(&built)));
        }
        built
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry_with_widget() -> RouteRegistry {
        let registry = RouteRegistry::new();
        registry.add_route(
            Method::Get,
            "",
            Tag::new("list"),
            RouteScope::Model("widget".to_string()),
        );
        registry.add_route(
            Method::Get,
            "/{id}",
            Tag::new("detail"),
            RouteScope::Model("widget".to_string()),
        );
        registry
    }

    #[test]
    fn test_lazy_rebuild_is_memoized() {
        let registry = registry_with_widget();
        assert_eq!(registry.rebuild_count(), 0, "no build before first route()");

        registry.route(&Request::get("/widget"));
        registry.route(&Request::get("/widget/7"));
        assert_eq!(
            registry.rebuild_count(),
            1,
            "consecutive route() calls share one build"
        );
    }

    #[test]
    fn test_registration_invalidates() {
        let registry = registry_with_widget();
        registry.route(&Request::get("/widget"));

        registry.add_route(
            Method::Get,
            "",
            Tag::new("list"),
            RouteScope::Model("gadget".to_string()),
        );
        assert_eq!(registry.rebuild_count(), 1, "invalidation itself does not rebuild");

        let target = registry.route(&Request::get("/gadget")).unwrap();
        assert_eq!(target.model_name, "gadget");
        assert_eq!(registry.rebuild_count(), 2);
    }

    #[test]
    fn test_method_mismatch_is_no_match() {
        let registry = registry_with_widget();
        let request = Request::new(Method::Post, "/widget");
        assert!(registry.route(&request).is_none());
    }

    #[test]
    fn test_default_scope_extracts_model() {
        let registry = RouteRegistry::new();
        registry.add_route(Method::Get, "", Tag::new("list"), RouteScope::Default);

        let target = registry.route(&Request::get("/anything")).unwrap();
        assert_eq!(target.model_name, "anything");
        assert_eq!(target.page_kind, Tag::new("list"));
    }

    #[test]
    fn test_named_model_beats_default_scope() {
        let registry = RouteRegistry::new();
        registry.add_route(Method::Get, "", Tag::new("list"), RouteScope::Default);
        registry.add_route(
            Method::Get,
            "",
            Tag::new("audit-list"),
            RouteScope::Model("widget".to_string()),
        );

        let target = registry.route(&Request::get("/widget")).unwrap();
        assert_eq!(target.page_kind, Tag::new("audit-list"));
    }
}
