use serde_json::json;
use std::sync::Arc;
use tabula::testing::{MemoryDataSource, SubstTemplateEngine, record};
use tabula::{Method, Model, Site, SiteBuilder};

// ============================================================================
// Test Site Construction
// ============================================================================

pub struct TestSite {
    pub site: Site,
    pub data: Arc<MemoryDataSource>,
    pub templates: Arc<SubstTemplateEngine>,
}

pub fn widget_model() -> Model {
    Model::new("widget", ["id", "name", "email"])
}

/// Template set every test site starts from.
pub fn base_templates() -> Arc<SubstTemplateEngine> {
    let templates = Arc::new(SubstTemplateEngine::new());
    templates.define("page/shell", "<html><h1>{{title}}</h1>{{content}}</html>");
    templates.define("page/list", "<section data-model=\"{{model}}\">{{table}}</section>");
    templates.define("page/detail", "<article data-model=\"{{model}}\">{{id}}</article>");
    templates.define("cell/text", "<span>{{value}}</span>");
    templates
}

/// A builder preloaded with the widget model and its list/detail views.
pub fn widget_builder(
    data: &Arc<MemoryDataSource>,
    templates: &Arc<SubstTemplateEngine>,
) -> SiteBuilder {
    Site::builder(Arc::clone(data), Arc::clone(templates))
        .register_model(widget_model())
        .declare_view("list", Method::Get, "", Some("widget"))
        .declare_view("detail", Method::Get, "/{id}", Some("widget"))
}

/// A ready site over `count` seeded widget records.
pub fn widget_site(count: usize) -> TestSite {
    let data = Arc::new(MemoryDataSource::new());
    seed_widgets(&data, count);
    let templates = base_templates();
    let site = widget_builder(&data, &templates).build();
    TestSite {
        site,
        data,
        templates,
    }
}

pub fn seed_widgets(data: &Arc<MemoryDataSource>, count: usize) {
    for id in 1..=count {
        data.insert(
            "widget",
            record(&[
                ("id", json!(id)),
                ("name", json!(format!("Widget {id}"))),
                ("email", json!(format!("widget{id}@example.com"))),
            ]),
        );
    }
}

// ============================================================================
// Assertion Helpers
// ============================================================================

/// The data passed to the most recent render of `template`.
pub fn last_render_data(templates: &SubstTemplateEngine, template: &str) -> serde_json::Value {
    templates
        .calls()
        .into_iter()
        .rev()
        .find(|(name, _)| name == template)
        .map(|(_, data)| data)
        .unwrap_or_else(|| panic!("template `{template}` was never rendered"))
}

/// Row count of the table in the most recent list render.
pub fn last_list_row_count(templates: &SubstTemplateEngine) -> usize {
    last_render_data(templates, "page/list")["table"]["rows"]
        .as_array()
        .expect("list data carries table rows")
        .len()
}
