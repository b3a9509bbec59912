//! Route registry behavior: lazy compilation, invalidation, conflicts.

mod common;
use common::widget_site;

use tabula::{Method, Request, RouteRegistry, RouteScope, Tag};

#[tokio::test]
async fn test_exactly_one_rebuild_between_invalidations() {
    let ts = widget_site(2);
    assert_eq!(ts.site.routes().rebuild_count(), 0);

    ts.site.handle(Request::get("/widget")).await;
    ts.site.handle(Request::get("/widget/1")).await;
    ts.site.handle(Request::get("/widget?page=1")).await;
    assert_eq!(
        ts.site.routes().rebuild_count(),
        1,
        "requests without intervening registration share one compiled router"
    );
}

#[tokio::test]
async fn test_runtime_registration_invalidates_once() {
    let ts = widget_site(2);
    ts.site.handle(Request::get("/widget")).await;
    assert_eq!(ts.site.routes().rebuild_count(), 1);

    // Concurrent-with-serving declaration: rebuild happens lazily on the
    // next request, not at registration.
    ts.site
        .declare_view("list", Method::Get, "/archive", Some("widget"));
    assert_eq!(ts.site.routes().rebuild_count(), 1);

    let response = ts.site.handle(Request::get("/widget/archive")).await;
    assert!(response.is_success(), "{response:?}");
    assert_eq!(ts.site.routes().rebuild_count(), 2);

    ts.site.handle(Request::get("/widget")).await;
    assert_eq!(ts.site.routes().rebuild_count(), 2);
}

#[test]
fn test_conflicting_pattern_keeps_first_declaration() {
    let registry = RouteRegistry::new();
    let scope = RouteScope::Model("widget".to_string());
    registry.add_route(Method::Get, "/{id}", Tag::new("detail"), scope.clone());
    // Same position, different parameter name: matchit rejects the overlap
    // and the first declaration stays routable.
    registry.add_route(Method::Get, "/{key}", Tag::new("other"), scope);

    let target = registry.route(&Request::get("/widget/9")).unwrap();
    assert_eq!(target.page_kind, Tag::new("detail"));
    assert_eq!(target.params.get("id").map(String::as_str), Some("9"));
}

#[test]
fn test_same_path_different_methods_coexist() {
    let registry = RouteRegistry::new();
    let scope = RouteScope::Model("widget".to_string());
    registry.add_route(Method::Get, "", Tag::new("list"), scope.clone());
    registry.add_route(Method::Post, "", Tag::new("create"), scope);

    let get = registry.route(&Request::get("/widget")).unwrap();
    assert_eq!(get.page_kind, Tag::new("list"));

    let post = registry.route(&Request::new(Method::Post, "/widget")).unwrap();
    assert_eq!(post.page_kind, Tag::new("create"));
}

#[test]
fn test_path_params_are_extracted() {
    let registry = RouteRegistry::new();
    registry.add_route(
        Method::Get,
        "/{id}/history",
        Tag::new("history"),
        RouteScope::Model("widget".to_string()),
    );

    let target = registry.route(&Request::get("/widget/42/history")).unwrap();
    assert_eq!(target.model_name, "widget");
    assert_eq!(target.params.get("id").map(String::as_str), Some("42"));
}
