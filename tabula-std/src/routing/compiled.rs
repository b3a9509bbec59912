//! The compiled, read-only request router.

use super::RouteMap;
use std::collections::{BTreeMap, HashMap};
use tabula_core::{Method, Request, Tag};

/// The outcome of routing a request: which page-kind to dispatch, for which
/// model, with the parameters the path pattern extracted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RouteTarget {
    /// Page-kind the matched route was declared for.
    pub page_kind: Tag,
    /// Model identifier, either from the route's scope or extracted from the
    /// path. Resolution against the model registry happens at the serving
    /// layer so an unknown name becomes a structured not-found response.
    pub model_name: String,
    /// Parameters extracted from the path pattern.
    pub params: HashMap<String, String>,
}

#[derive(Clone, Debug)]
enum EntryScope {
    Named(String),
    FromPath,
}

#[derive(Clone, Debug)]
struct CompiledEntry {
    method: Method,
    page_kind: Tag,
    scope: EntryScope,
}

/// A derived, internally consistent snapshot of the route map.
///
/// Built from one clone of the map, published by atomic swap, never mutated
/// afterwards. Model-scoped routes sit under their `/{name}` prefix; default
/// routes carry a `{model}` parameter. `matchit` prefers static segments over
/// parameters, so a model's own routes shadow the default list.
pub struct CompiledRouter {
    epoch: u64,
    router: matchit::Router<Vec<CompiledEntry>>,
}

impl CompiledRouter {
    pub(crate) fn build(map: &RouteMap, epoch: u64) -> Self {
        let mut by_path: BTreeMap<String, Vec<CompiledEntry>> = BTreeMap::new();

        for (model, entries) in &map.per_model {
            for entry in entries {
                by_path
                    .entry(format!("/{}{}", model, entry.pattern))
                    .or_default()
                    .push(CompiledEntry {
                        method: entry.method,
                        page_kind: entry.page_kind.clone(),
                        scope: EntryScope::Named(model.clone()),
                    });
            }
        }
        for entry in &map.fallback {
            by_path
                .entry(format!("/{{model}}{}", entry.pattern))
                .or_default()
                .push(CompiledEntry {
                    method: entry.method,
                    page_kind: entry.page_kind.clone(),
                    scope: EntryScope::FromPath,
                });
        }

        let mut router = matchit::Router::new();
        for (path, entries) in by_path {
            if let Err(err) = router.insert(path.clone(), entries) {
                // First declaration wins; the page stays available.
                tracing::warn!(route = %path, error = %err, "conflicting route pattern dropped");
            }
        }
        Self { epoch, router }
    }

    pub(crate) fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Match a request, returning `None` when no path or method applies.
    pub fn match_request(&self, request: &Request) -> Option<RouteTarget> {
        let matched = self.router.at(&request.path).ok()?;
        let entry = matched
            .value
            .iter()
            .find(|entry| entry.method == request.method)?;

        let mut params: HashMap<String, String> = matched
            .params
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();

        let model_name = match &entry.scope {
            EntryScope::Named(name) => name.clone(),
            EntryScope::FromPath => params.remove("model")?,
        };

        Some(RouteTarget {
            page_kind: entry.page_kind.clone(),
            model_name,
            params,
        })
    }
}
