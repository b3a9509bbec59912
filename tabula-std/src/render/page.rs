//! # Page renderer
//!
//! Composes a page shell with a page-kind-specific content template, quick
//! actions and breadcrumbs. A page-kind can register its own full-page
//! renderer through the shell dispatch table; everything else goes through
//! the default composition, which isolates per-action failures the same way
//! the table renderer isolates per-cell failures.

use crate::style::StyleBook;
use serde_json::{Value, json};
use tabula_core::{DispatchValue, PageError, Tag, TemplateEngine, TemplateError};

/// A (title, URL) pair shown in the page's breadcrumb trail.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Breadcrumb {
    /// Display title.
    pub title: String,
    /// Link target.
    pub url: String,
}

impl Breadcrumb {
    /// Create a breadcrumb.
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
        }
    }

    fn to_value(&self) -> Value {
        json!({ "title": self.title, "url": self.url })
    }
}

/// A quick action: a small widget rendered to markup and attached to a page.
pub trait Action: Send + Sync {
    /// Render the action to markup.
    fn render(&self, templates: &dyn TemplateEngine) -> Result<String, TemplateError>;
}

/// Everything a page render needs besides the page-kind.
pub struct PageOptions {
    /// Page title.
    pub title: String,
    /// Content template name.
    pub contents_template: String,
    /// Data handed to the content template.
    pub contents_data: Value,
    /// Quick actions attached to the page.
    pub actions: Vec<Box<dyn Action>>,
    /// Breadcrumb trail.
    pub crumbs: Vec<Breadcrumb>,
}

impl PageOptions {
    /// Options with no actions or crumbs.
    pub fn new(
        title: impl Into<String>,
        contents_template: impl Into<String>,
        contents_data: Value,
    ) -> Self {
        Self {
            title: title.into(),
            contents_template: contents_template.into(),
            contents_data,
            actions: Vec::new(),
            crumbs: Vec::new(),
        }
    }

    fn validate(&self) -> Result<(), PageError> {
        if self.title.trim().is_empty() {
            return Err(PageError::InvalidOptions("title must be non-empty".into()));
        }
        if self.contents_template.trim().is_empty() {
            return Err(PageError::InvalidOptions(
                "contents template must be non-empty".into(),
            ));
        }
        for crumb in &self.crumbs {
            if crumb.title.trim().is_empty() || crumb.url.trim().is_empty() {
                return Err(PageError::InvalidOptions(format!(
                    "breadcrumb with blank title or url: {crumb:?}"
                )));
            }
        }
        Ok(())
    }
}

/// A page-kind-specific full-page renderer.
///
/// Registered against a page-kind tag (ancestor fallback applies); when none
/// matches, the default shell composition runs instead.
pub trait ShellRender: Send + Sync {
    /// Render the complete page.
    fn render(
        &self,
        styles: &StyleBook,
        templates: &dyn TemplateEngine,
        page_kind: &Tag,
        options: &PageOptions,
    ) -> Result<String, PageError>;
}

/// Renders pages under a page-kind tag.
pub struct PageRenderer<'a> {
    styles: &'a StyleBook,
    templates: &'a dyn TemplateEngine,
}

impl<'a> PageRenderer<'a> {
    /// Create a renderer over the given style book and template engine.
    pub fn new(styles: &'a StyleBook, templates: &'a dyn TemplateEngine) -> Self {
        Self { styles, templates }
    }

    /// Render a page, dispatching on the page-kind for a specific renderer
    /// and falling back to the default shell composition.
    pub fn render(&self, page_kind: &Tag, options: &PageOptions) -> Result<String, PageError> {
        options.validate()?;

        let query = [DispatchValue::Tag(page_kind.clone())];
        if let Some(shell) = self
            .styles
            .shells
            .resolve_opt(self.styles.hierarchy(), &query)?
        {
            return shell.render(self.styles, self.templates, page_kind, options);
        }
        self.render_default(options)
    }

    /// Default composition: content template, independently rendered actions,
    /// crumbs, all wrapped in the configured shell template.
    ///
    /// The content render is required and propagates failure; a failed action
    /// is logged and contributes empty markup. Nothing is escaped here;
    /// callers own what flows into action and content templates.
    fn render_default(&self, options: &PageOptions) -> Result<String, PageError> {
        let content = self
            .templates
            .render(&options.contents_template, &options.contents_data)?;

        let mut actions = Vec::with_capacity(options.actions.len());
        for action in &options.actions {
            match action.render(self.templates) {
                Ok(markup) => actions.push(markup),
                Err(err) => {
                    tracing::warn!(error = %err, "action render failed");
                    actions.push(String::new());
                }
            }
        }

        let crumbs: Vec<Value> = options.crumbs.iter().map(Breadcrumb::to_value).collect();
        let data = json!({
            "title": options.title,
            "content": content,
            "actions": actions,
            "crumbs": crumbs,
        });
        Ok(self
            .templates
            .render(&self.styles.config.shell_template, &data)?)
    }
}
