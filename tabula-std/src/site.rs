//! # The site context
//!
//! The explicitly constructed, passed-around object owning all declaration
//! state: the tag hierarchy, every dispatch table, the route registry and the
//! collaborator handles. Construction happens through [`SiteBuilder`] during
//! startup; the built [`Site`] is read-only while serving, with the one
//! deliberate exception of route declaration, which the registry's
//! invalidate-and-swap cache makes safe against in-flight requests.

use crate::config::SiteConfig;
use crate::handlers::{DetailHandler, ListHandler};
use crate::render::page::{Action, Breadcrumb, ShellRender};
use crate::routing::{RouteRegistry, RouteScope};
use crate::style::{CellSpec, CellTransform, StyleBook};
use std::collections::BTreeMap;
use std::sync::Arc;
use tabula_core::{
    CycleError, DataSource, DispatchError, DispatchKey, DispatchTable, DispatchValue,
    DynDataSource, DynPageHandler, KeyPart, Method, Model, ModelNotFoundError, ModelResolver,
    PageError, PageRequest, Request, Response, Tag, TagHierarchy, TemplateEngine,
};

/// Supplies the quick actions for a (page-kind, model) pair.
pub trait ActionProvider: Send + Sync {
    /// Actions for this request.
    fn actions(&self, req: &PageRequest) -> Vec<Box<dyn Action>>;
}

/// Supplies the breadcrumb trail for a (page-kind, model) pair.
pub trait CrumbProvider: Send + Sync {
    /// Crumbs for this request.
    fn crumbs(&self, req: &PageRequest) -> Vec<Breadcrumb>;
}

/// A model resolver backed by the models registered on the builder.
pub struct MapResolver {
    models: BTreeMap<String, Model>,
}

impl ModelResolver for MapResolver {
    fn resolve(&self, name: &str) -> Result<Model, ModelNotFoundError> {
        self.models
            .get(name)
            .cloned()
            .ok_or_else(|| ModelNotFoundError(name.to_string()))
    }
}

/// The serving context.
pub struct Site {
    styles: StyleBook,
    pages: DispatchTable<Arc<dyn DynPageHandler<Site>>>,
    table_styles: DispatchTable<Tag>,
    action_providers: DispatchTable<Arc<dyn ActionProvider>>,
    crumb_providers: DispatchTable<Arc<dyn CrumbProvider>>,
    routes: RouteRegistry,
    resolver: Arc<dyn ModelResolver>,
    data: Arc<dyn DynDataSource>,
    templates: Arc<dyn TemplateEngine>,
}

impl Site {
    /// Start declaring a site.
    pub fn builder(
        data: impl DataSource,
        templates: impl TemplateEngine + 'static,
    ) -> SiteBuilder {
        SiteBuilder::new(data, templates)
    }

    /// The rendering-side dispatch state.
    pub fn styles(&self) -> &StyleBook {
        &self.styles
    }

    /// The shared tag hierarchy.
    pub fn hierarchy(&self) -> &TagHierarchy {
        self.styles.hierarchy()
    }

    /// The site defaults.
    pub fn config(&self) -> &SiteConfig {
        self.styles.config()
    }

    /// The data source collaborator.
    pub fn data(&self) -> &dyn DynDataSource {
        self.data.as_ref()
    }

    /// The template engine collaborator.
    pub fn templates(&self) -> &dyn TemplateEngine {
        self.templates.as_ref()
    }

    /// The route registry.
    pub fn routes(&self) -> &RouteRegistry {
        &self.routes
    }

    /// Declare a view at serving time.
    ///
    /// Registration invalidates the compiled router; in-flight requests keep
    /// their snapshot.
    pub fn declare_view(
        &self,
        page_kind: impl Into<Tag>,
        method: Method,
        pattern: impl Into<String>,
        model: Option<&str>,
    ) {
        self.routes.add_route(
            method,
            pattern,
            page_kind.into(),
            scope_for(model),
        );
    }

    /// Handle one request end to end, translating recoverable failures into
    /// structured responses.
    pub async fn handle(&self, request: Request) -> Response {
        match self.serve(&request).await {
            Ok(response) => response,
            Err(PageError::Model(err)) => Response::not_found(err.to_string()),
            Err(PageError::Dispatch(DispatchError::NoHandler(query))) => {
                Response::not_found(format!("no page handler for {query}"))
            }
            Err(err) => {
                tracing::error!(method = %request.method, path = %request.path, error = %err, "request failed");
                Response::error(err.to_string())
            }
        }
    }

    async fn serve(&self, request: &Request) -> Result<Response, PageError> {
        let Some(target) = self.routes.route(request) else {
            return Ok(Response::not_found(format!(
                "{} {}",
                request.method, request.path
            )));
        };
        let model = self.resolver.resolve(&target.model_name)?;

        let query = [
            DispatchValue::Tag(target.page_kind.clone()),
            DispatchValue::ty(model.name()),
        ];
        let handler = Arc::clone(self.pages.resolve(self.hierarchy(), &query)?);

        let req = PageRequest {
            page_kind: target.page_kind,
            model,
            params: target.params,
            request: request.clone(),
        };
        handler.handle_dyn(self, req).await
    }

    /// The table style for a request: dispatched per (page-kind, model-type),
    /// defaulting to the configured global style.
    pub fn table_style(&self, req: &PageRequest) -> Result<Tag, DispatchError> {
        Ok(self
            .table_styles
            .resolve_opt(self.hierarchy(), &chrome_query(req))?
            .cloned()
            .unwrap_or_else(|| self.config().default_table_style.clone()))
    }

    /// Quick actions for a request; no registered provider means none.
    pub fn actions(&self, req: &PageRequest) -> Result<Vec<Box<dyn Action>>, DispatchError> {
        Ok(self
            .action_providers
            .resolve_opt(self.hierarchy(), &chrome_query(req))?
            .map(|provider| provider.actions(req))
            .unwrap_or_default())
    }

    /// Breadcrumbs for a request; no registered provider means none.
    pub fn crumbs(&self, req: &PageRequest) -> Result<Vec<Breadcrumb>, DispatchError> {
        Ok(self
            .crumb_providers
            .resolve_opt(self.hierarchy(), &chrome_query(req))?
            .map(|provider| provider.crumbs(req))
            .unwrap_or_default())
    }
}

fn chrome_query(req: &PageRequest) -> [DispatchValue; 2] {
    [
        DispatchValue::Tag(req.page_kind.clone()),
        DispatchValue::ty(req.model.name()),
    ]
}

fn scope_for(model: Option<&str>) -> RouteScope {
    match model {
        Some(name) => RouteScope::Model(name.to_string()),
        None => RouteScope::Default,
    }
}

fn pair_key(page_kind: impl Into<Tag>, model: Option<&str>) -> DispatchKey {
    let model_part = match model {
        Some(name) => KeyPart::ty(name),
        None => KeyPart::Any,
    };
    DispatchKey::of([KeyPart::Tag(page_kind.into()), model_part])
}

/// Builder for a [`Site`]: the declaration phase.
///
/// Declarations that can conflict (hierarchy edges) return `Result` so a bad
/// declaration stops startup; everything else chains.
pub struct SiteBuilder {
    styles: StyleBook,
    pages: DispatchTable<Arc<dyn DynPageHandler<Site>>>,
    table_styles: DispatchTable<Tag>,
    action_providers: DispatchTable<Arc<dyn ActionProvider>>,
    crumb_providers: DispatchTable<Arc<dyn CrumbProvider>>,
    routes: RouteRegistry,
    models: BTreeMap<String, Model>,
    resolver: Option<Arc<dyn ModelResolver>>,
    data: Arc<dyn DynDataSource>,
    templates: Arc<dyn TemplateEngine>,
}

impl SiteBuilder {
    /// Create a builder with the built-in `list` and `detail` page-kinds
    /// wired to their default handlers.
    pub fn new(data: impl DataSource, templates: impl TemplateEngine + 'static) -> Self {
        let mut pages: DispatchTable<Arc<dyn DynPageHandler<Site>>> = DispatchTable::new();
        pages.register(pair_key("list", None), Arc::new(ListHandler));
        pages.register(pair_key("detail", None), Arc::new(DetailHandler));

        Self {
            styles: StyleBook::new(SiteConfig::default()),
            pages,
            table_styles: DispatchTable::new(),
            action_providers: DispatchTable::new(),
            crumb_providers: DispatchTable::new(),
            routes: RouteRegistry::new(),
            models: BTreeMap::new(),
            resolver: None,
            data: Arc::new(data),
            templates: Arc::new(templates),
        }
    }

    /// Replace the default configuration.
    pub fn with_config(mut self, config: SiteConfig) -> Self {
        self.styles.config = config;
        self
    }

    /// Use a custom model resolver instead of the registered-model map.
    pub fn with_resolver(mut self, resolver: impl ModelResolver + 'static) -> Self {
        self.resolver = Some(Arc::new(resolver));
        self
    }

    /// Register a model (name and declared columns).
    pub fn register_model(mut self, model: Model) -> Self {
        self.models.insert(model.name().to_string(), model);
        self
    }

    /// Declare that `style` inherits from `parent` in the shared hierarchy.
    ///
    /// Page-kinds, table-styles and cell-styles share one tag namespace, so a
    /// single derivation operation covers all three.
    pub fn derive_style(
        mut self,
        style: impl Into<Tag>,
        parent: impl Into<Tag>,
    ) -> Result<Self, CycleError> {
        self.styles.hierarchy.derive(style, parent)?;
        Ok(self)
    }

    /// Declare how a cell style renders.
    pub fn declare_cell_style(
        mut self,
        style: impl Into<Tag>,
        template: impl Into<String>,
        transform: Option<CellTransform>,
    ) -> Self {
        let mut spec = CellSpec::new(template);
        if let Some(transform) = transform {
            spec = spec.with_transform(transform);
        }
        self.styles
            .cell_specs
            .register([KeyPart::Tag(style.into())], spec);
        self
    }

    /// Declare an explicit column order for a table style.
    pub fn declare_column_order(
        mut self,
        table_style: impl Into<Tag>,
        columns: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.styles.column_orders.register(
            [KeyPart::Tag(table_style.into())],
            columns.into_iter().map(Into::into).collect::<Vec<_>>(),
        );
        self
    }

    /// Bind a column to a cell style under a table style.
    pub fn declare_cell_format(
        mut self,
        table_style: impl Into<Tag>,
        column: impl Into<String>,
        cell_style: impl Into<Tag>,
    ) -> Self {
        self.styles.cell_formats.register(
            [KeyPart::Tag(table_style.into()), KeyPart::ty(column)],
            cell_style.into(),
        );
        self
    }

    /// Declare a route: (page-kind, method, pattern) for a model, or for the
    /// default list when `model` is `None`.
    pub fn declare_view(
        self,
        page_kind: impl Into<Tag>,
        method: Method,
        pattern: impl Into<String>,
        model: Option<&str>,
    ) -> Self {
        self.routes
            .add_route(method, pattern, page_kind.into(), scope_for(model));
        self
    }

    /// Register a page handler for a (page-kind, model) pair; `None` model
    /// makes it apply to every model of that page-kind.
    pub fn register_page_handler(
        mut self,
        page_kind: impl Into<Tag>,
        model: Option<&str>,
        handler: impl DynPageHandler<Site>,
    ) -> Self {
        self.pages
            .register(pair_key(page_kind, model), Arc::new(handler));
        self
    }

    /// Register a page-kind-specific full-page renderer.
    pub fn register_shell(
        mut self,
        page_kind: impl Into<Tag>,
        shell: impl ShellRender + 'static,
    ) -> Self {
        self.styles
            .shells
            .register([KeyPart::Tag(page_kind.into())], Arc::new(shell));
        self
    }

    /// Bind a table style to a (page-kind, model) pair.
    pub fn declare_table_style(
        mut self,
        page_kind: impl Into<Tag>,
        model: Option<&str>,
        table_style: impl Into<Tag>,
    ) -> Self {
        self.table_styles
            .register(pair_key(page_kind, model), table_style.into());
        self
    }

    /// Register a quick-action provider for a (page-kind, model) pair.
    pub fn register_actions(
        mut self,
        page_kind: impl Into<Tag>,
        model: Option<&str>,
        provider: impl ActionProvider + 'static,
    ) -> Self {
        self.action_providers
            .register(pair_key(page_kind, model), Arc::new(provider));
        self
    }

    /// Register a breadcrumb provider for a (page-kind, model) pair.
    pub fn register_crumbs(
        mut self,
        page_kind: impl Into<Tag>,
        model: Option<&str>,
        provider: impl CrumbProvider + 'static,
    ) -> Self {
        self.crumb_providers
            .register(pair_key(page_kind, model), Arc::new(provider));
        self
    }

    /// Finish declaration.
    pub fn build(self) -> Site {
        let resolver = self.resolver.unwrap_or_else(|| {
            Arc::new(MapResolver {
                models: self.models,
            })
        });
        Site {
            styles: self.styles,
            pages: self.pages,
            table_styles: self.table_styles,
            action_providers: self.action_providers,
            crumb_providers: self.crumb_providers,
            routes: self.routes,
            resolver,
            data: self.data,
            templates: self.templates,
        }
    }
}
