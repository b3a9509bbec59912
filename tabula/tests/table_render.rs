//! Table renderer: column order, style fallback, degradation.

mod common;
use common::{base_templates, widget_model};

use serde_json::{Value, json};
use std::sync::Arc;
use tabula::testing::{MemoryDataSource, record};
use tabula::{BoxRecord, CellTransform, Site, TableRenderer, Tag, header_label};

fn widget_records(count: usize) -> Vec<BoxRecord> {
    (1..=count)
        .map(|id| {
            Box::new(record(&[
                ("id", json!(id)),
                ("name", json!(format!("Widget {id}"))),
                ("email", json!(format!("widget{id}@example.com"))),
            ])) as BoxRecord
        })
        .collect()
}

fn bare_site() -> (Site, Arc<tabula::testing::SubstTemplateEngine>) {
    let templates = base_templates();
    let site = Site::builder(Arc::new(MemoryDataSource::new()), Arc::clone(&templates))
        .register_model(widget_model())
        .build();
    (site, templates)
}

#[test]
fn test_default_column_order_identifier_first_then_lexicographic() {
    let (site, templates) = bare_site();
    let renderer = TableRenderer::new(site.styles(), templates.as_ref());

    let table = renderer
        .render(&Tag::new("table"), &widget_model(), &widget_records(2))
        .unwrap();
    assert_eq!(table.columns, vec!["id", "email", "name"]);
    assert_eq!(table.headers, vec!["Id", "Email", "Name"]);
    assert_eq!(table.rows.len(), 2);
}

#[test]
fn test_explicit_column_order_wins() {
    let templates = base_templates();
    let site = Site::builder(Arc::new(MemoryDataSource::new()), Arc::clone(&templates))
        .register_model(widget_model())
        .declare_column_order("table", ["name", "id"])
        .build();

    let table = TableRenderer::new(site.styles(), templates.as_ref())
        .render(&Tag::new("table"), &widget_model(), &widget_records(1))
        .unwrap();
    assert_eq!(table.columns, vec!["name", "id"]);
}

#[test]
fn test_no_records_falls_back_to_declared_order() {
    let (site, templates) = bare_site();

    let table = TableRenderer::new(site.styles(), templates.as_ref())
        .render(&Tag::new("table"), &widget_model(), &[])
        .unwrap();
    // Raw declared order, not the inferred one; headers still present.
    assert_eq!(table.columns, vec!["id", "name", "email"]);
    assert_eq!(table.headers, vec!["Id", "Name", "Email"]);
    assert!(table.rows.is_empty());
}

#[test]
fn test_cell_style_falls_back_to_global_table_style() {
    let templates = base_templates();
    templates.define("cell/email-link", "<a href=\"mailto:{{value}}\">{{value}}</a>");

    // The binding lives on the global default style; `fancy` declares nothing.
    let site = Site::builder(Arc::new(MemoryDataSource::new()), Arc::clone(&templates))
        .register_model(widget_model())
        .declare_cell_style("cell/email", "cell/email-link", None)
        .declare_cell_format("table", "email", "cell/email")
        .build();

    let table = TableRenderer::new(site.styles(), templates.as_ref())
        .render(&Tag::new("fancy"), &widget_model(), &widget_records(3))
        .unwrap();

    assert_eq!(templates.render_count("cell/email-link"), 3);
    assert!(table.rows[0][1].contains("mailto:widget1@example.com"));
}

#[test]
fn test_cell_template_resolves_through_style_ancestors() {
    let templates = base_templates();
    templates.define("cell/link", "<a>{{value}}</a>");

    // cell/badge has no spec of its own; it inherits cell/link's.
    let site = Site::builder(Arc::new(MemoryDataSource::new()), Arc::clone(&templates))
        .register_model(widget_model())
        .derive_style("cell/badge", "cell/link-style")
        .unwrap()
        .declare_cell_style("cell/link-style", "cell/link", None)
        .declare_cell_format("table", "name", "cell/badge")
        .build();

    TableRenderer::new(site.styles(), templates.as_ref())
        .render(&Tag::new("table"), &widget_model(), &widget_records(2))
        .unwrap();
    assert_eq!(templates.render_count("cell/link"), 2);
}

#[test]
fn test_transform_applies_before_template() {
    let templates = base_templates();
    let shout: CellTransform = Arc::new(|value: Value| match value.as_str() {
        Some(text) => json!(text.to_uppercase()),
        None => value,
    });

    let site = Site::builder(Arc::new(MemoryDataSource::new()), Arc::clone(&templates))
        .register_model(widget_model())
        .declare_cell_style("cell/shout", "cell/text", Some(shout))
        .declare_cell_format("table", "name", "cell/shout")
        .build();

    let table = TableRenderer::new(site.styles(), templates.as_ref())
        .render(&Tag::new("table"), &widget_model(), &widget_records(1))
        .unwrap();
    assert_eq!(table.rows[0][2], "<span>WIDGET 1</span>");
}

#[test]
fn test_failed_cell_renders_empty_without_aborting() {
    let templates = base_templates();
    templates.define("cell/broken", "unused");
    templates.fail("cell/broken");

    let site = Site::builder(Arc::new(MemoryDataSource::new()), Arc::clone(&templates))
        .register_model(widget_model())
        .declare_cell_style("cell/bad", "cell/broken", None)
        .declare_cell_format("table", "email", "cell/bad")
        .build();

    let table = TableRenderer::new(site.styles(), templates.as_ref())
        .render(&Tag::new("table"), &widget_model(), &widget_records(2))
        .unwrap();

    for row in &table.rows {
        assert_eq!(row[1], "", "broken email cell renders empty");
        assert!(!row[0].is_empty(), "other cells still render");
    }
}

#[test]
fn test_header_labels_capitalize_and_split() {
    assert_eq!(header_label("created_at"), "Created At");
    assert_eq!(header_label("last-login"), "Last Login");
    assert_eq!(header_label("id"), "Id");
}
