//! Built-in list and detail page handlers.
//!
//! These are the terminal endpoints the site registers as wildcard defaults
//! for the `list` and `detail` page-kinds; an operator overrides them per
//! (page-kind, model) through the page dispatch table.

use crate::render::page::{PageOptions, PageRenderer};
use crate::render::table::{TableRenderer, header_label};
use crate::site::Site;
use serde_json::{Map, Value, json};
use tabula_core::{FilterParams, PageError, PageHandler, PageRequest, Response};

/// Renders a paginated list page for the routed model.
pub struct ListHandler;

impl PageHandler<Site> for ListHandler {
    async fn handle(&self, site: &Site, req: PageRequest) -> Result<Response, PageError> {
        let page = req
            .request
            .query("page")
            .and_then(|raw| raw.parse::<usize>().ok())
            .filter(|page| *page >= 1)
            .unwrap_or(1);
        let page_size = site.config().page_size;
        let offset = (page - 1) * page_size;

        let mut filter: FilterParams = req.request.query.clone();
        filter.remove("page");

        // Fetch one past the page boundary to learn whether a next page exists.
        let mut records = site
            .data()
            .fetch_page_dyn(&req.model, offset, page_size + 1, &filter)
            .await
            .map_err(PageError::Custom)?;
        let has_next = records.len() > page_size;
        records.truncate(page_size);

        let table_style = site.table_style(&req)?;
        let table =
            TableRenderer::new(site.styles(), site.templates()).render(&table_style, &req.model, &records)?;

        let mut data = Map::new();
        data.insert("model".into(), json!(req.model.name()));
        data.insert("table".into(), table.to_value());
        data.insert("page".into(), json!(page));
        if has_next {
            data.insert("next_url".into(), json!(page_url(&req, page + 1)));
        }
        if page > 1 {
            data.insert("prev_url".into(), json!(page_url(&req, page - 1)));
        }

        let mut options = PageOptions::new(
            header_label(req.model.name()),
            site.config().list_template.clone(),
            Value::Object(data),
        );
        options.actions = site.actions(&req)?;
        options.crumbs = site.crumbs(&req)?;

        let body = PageRenderer::new(site.styles(), site.templates()).render(&req.page_kind, &options)?;
        Ok(Response::ok(body))
    }
}

/// Renders a single record's detail page, or a structured 404 when the
/// record does not exist.
pub struct DetailHandler;

impl PageHandler<Site> for DetailHandler {
    async fn handle(&self, site: &Site, req: PageRequest) -> Result<Response, PageError> {
        let Some(id) = req.param("id") else {
            return Ok(Response::not_found(format!(
                "{} detail route has no `id` parameter",
                req.model.name()
            )));
        };

        let mut filter = FilterParams::new();
        filter.insert("id".into(), id.into());
        let record = site
            .data()
            .fetch_one_dyn(&req.model, &filter)
            .await
            .map_err(PageError::Custom)?;
        let Some(record) = record else {
            return Ok(Response::not_found(format!("{} `{}`", req.model.name(), id)));
        };

        let table_style = site.table_style(&req)?;
        let fields = TableRenderer::new(site.styles(), site.templates())
            .render_fields(&table_style, &req.model, &record)?;
        let fields: Vec<Value> = fields
            .into_iter()
            .map(|(label, markup)| json!({ "label": label, "value": markup }))
            .collect();

        let data = json!({
            "model": req.model.name(),
            "id": id,
            "fields": fields,
        });
        let mut options = PageOptions::new(
            format!("{} {}", header_label(req.model.name()), id),
            site.config().detail_template.clone(),
            data,
        );
        options.actions = site.actions(&req)?;
        options.crumbs = site.crumbs(&req)?;

        let body = PageRenderer::new(site.styles(), site.templates()).render(&req.page_kind, &options)?;
        Ok(Response::ok(body))
    }
}

fn page_url(req: &PageRequest, page: usize) -> String {
    format!("{}?page={}", req.request.path, page)
}
