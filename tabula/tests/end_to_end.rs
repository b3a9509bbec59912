//! End-to-end request handling: routing, dispatch, fetching, rendering.

mod common;
use common::{last_list_row_count, last_render_data, widget_site};

use std::sync::Arc;
use tabula::testing::MemoryDataSource;
use tabula::{Method, Request, Site};

#[tokio::test]
async fn test_first_page_has_twenty_rows_and_next_link() {
    let ts = widget_site(25);

    let response = ts.site.handle(Request::get("/widget")).await;
    assert!(response.is_success(), "list page should render: {response:?}");

    assert_eq!(last_list_row_count(&ts.templates), 20);
    let data = last_render_data(&ts.templates, "page/list");
    assert_eq!(data["next_url"], "/widget?page=2");
    assert!(
        data.get("prev_url").is_none(),
        "first page has no previous link"
    );
}

#[tokio::test]
async fn test_second_page_has_remainder_and_no_next_link() {
    let ts = widget_site(25);

    let response = ts.site.handle(Request::get("/widget?page=2")).await;
    assert!(response.is_success());

    assert_eq!(last_list_row_count(&ts.templates), 5);
    let data = last_render_data(&ts.templates, "page/list");
    assert!(data.get("next_url").is_none(), "no page past the records");
    assert_eq!(data["prev_url"], "/widget?page=1");
}

#[tokio::test]
async fn test_detail_page_renders_record() {
    let ts = widget_site(3);

    let response = ts.site.handle(Request::get("/widget/2")).await;
    assert!(response.is_success(), "{response:?}");

    let data = last_render_data(&ts.templates, "page/detail");
    assert_eq!(data["id"], "2");
    assert_eq!(
        data["fields"].as_array().unwrap().len(),
        3,
        "all three widget fields render"
    );
}

#[tokio::test]
async fn test_missing_record_is_structured_not_found() {
    let ts = widget_site(3);

    let response = ts.site.handle(Request::get("/widget/99")).await;
    assert_eq!(response.status, 404);
    assert!(response.body.contains("widget"), "{response:?}");
}

#[tokio::test]
async fn test_unrouted_path_is_not_found() {
    let ts = widget_site(1);

    let response = ts.site.handle(Request::get("/nowhere/at/all")).await;
    assert_eq!(response.status, 404);
}

#[tokio::test]
async fn test_default_route_resolves_model_from_path() {
    let data = Arc::new(MemoryDataSource::new());
    common::seed_widgets(&data, 2);
    let templates = common::base_templates();

    // No per-model routes at all; the default list covers every model.
    let site = Site::builder(Arc::clone(&data), Arc::clone(&templates))
        .register_model(common::widget_model())
        .declare_view("list", Method::Get, "", None)
        .build();

    let response = site.handle(Request::get("/widget")).await;
    assert!(response.is_success(), "{response:?}");
    assert_eq!(last_list_row_count(&templates), 2);
}

#[tokio::test]
async fn test_unknown_model_on_default_route_is_not_found() {
    let data = Arc::new(MemoryDataSource::new());
    let templates = common::base_templates();
    let site = Site::builder(Arc::clone(&data), Arc::clone(&templates))
        .declare_view("list", Method::Get, "", None)
        .build();

    let response = site.handle(Request::get("/gizmo")).await;
    assert_eq!(response.status, 404);
    assert!(response.body.contains("gizmo"), "{response:?}");
}

#[tokio::test]
async fn test_actions_and_crumbs_attach_per_page_kind_and_model() {
    let data = Arc::new(MemoryDataSource::new());
    common::seed_widgets(&data, 1);
    let templates = common::base_templates();

    let site = Site::builder(Arc::clone(&data), Arc::clone(&templates))
        .register_model(common::widget_model())
        .declare_view("list", Method::Get, "", Some("widget"))
        .register_actions(
            "list",
            Some("widget"),
            tabula::testing::StaticActions(vec!["<a>new widget</a>".to_string()]),
        )
        .register_crumbs(
            "list",
            Some("widget"),
            tabula::testing::StaticCrumbs(vec![tabula::Breadcrumb::new("Home", "/")]),
        )
        .build();

    let response = site.handle(Request::get("/widget")).await;
    assert!(response.is_success(), "{response:?}");

    let shell = last_render_data(&templates, "page/shell");
    assert_eq!(shell["actions"], serde_json::json!(["<a>new widget</a>"]));
    assert_eq!(
        shell["crumbs"],
        serde_json::json!([{ "title": "Home", "url": "/" }])
    );
}

#[tokio::test]
async fn test_table_style_binds_per_page_kind_and_model() {
    let data = Arc::new(MemoryDataSource::new());
    common::seed_widgets(&data, 2);
    let templates = common::base_templates();

    let site = Site::builder(Arc::clone(&data), Arc::clone(&templates))
        .register_model(common::widget_model())
        .declare_view("list", Method::Get, "", Some("widget"))
        .declare_table_style("list", Some("widget"), "compact")
        .declare_column_order("compact", ["name"])
        .build();

    let response = site.handle(Request::get("/widget")).await;
    assert!(response.is_success(), "{response:?}");

    let data_value = last_render_data(&templates, "page/list");
    assert_eq!(data_value["table"]["columns"], serde_json::json!(["name"]));
}

#[tokio::test]
async fn test_derived_page_kind_falls_back_to_list_handler() {
    let data = Arc::new(MemoryDataSource::new());
    common::seed_widgets(&data, 4);
    let templates = common::base_templates();

    // audit-list has no handler of its own; it inherits list's.
    let site = Site::builder(Arc::clone(&data), Arc::clone(&templates))
        .register_model(common::widget_model())
        .derive_style("audit-list", "list")
        .unwrap()
        .declare_view("audit-list", Method::Get, "", Some("widget"))
        .build();

    let response = site.handle(Request::get("/widget")).await;
    assert!(response.is_success(), "{response:?}");
    assert_eq!(last_list_row_count(&templates), 4);
}
