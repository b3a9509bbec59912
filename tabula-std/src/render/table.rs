//! # Table renderer
//!
//! Turns a sequence of records into rendered cell markup under a table-style
//! tag. Column order, per-column cell style and per-cell template/transform
//! are all dispatch lookups with graceful fallback; a single failing cell
//! renders empty rather than taking the page down.

use crate::style::{CellSpec, StyleBook};
use serde_json::{Value, json};
use tabula_core::{
    BoxRecord, DispatchError, DispatchValue, Model, PageError, Record, Tag, TemplateEngine,
};

/// The rendered output of a table: columns, header labels and cell markup.
///
/// Markup assembly into an actual `<table>` is the content template's job;
/// this struct is handed to it as data.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableMarkup {
    /// Column identifiers, in render order.
    pub columns: Vec<String>,
    /// Human-readable header labels, parallel to `columns`.
    pub headers: Vec<String>,
    /// Rendered cell markup, one inner vector per record.
    pub rows: Vec<Vec<String>>,
}

impl TableMarkup {
    /// The table as template data.
    pub fn to_value(&self) -> Value {
        json!({
            "columns": self.columns,
            "headers": self.headers,
            "rows": self.rows,
        })
    }
}

/// Renders record collections under a table-style tag.
pub struct TableRenderer<'a> {
    styles: &'a StyleBook,
    templates: &'a dyn TemplateEngine,
}

impl<'a> TableRenderer<'a> {
    /// Create a renderer over the given style book and template engine.
    pub fn new(styles: &'a StyleBook, templates: &'a dyn TemplateEngine) -> Self {
        Self { styles, templates }
    }

    /// Render `records` as a table.
    ///
    /// Dispatch conflicts (ambiguous declarations) propagate; per-cell render
    /// failures are logged and degrade to empty cells.
    pub fn render(
        &self,
        table_style: &Tag,
        model: &Model,
        records: &[BoxRecord],
    ) -> Result<TableMarkup, PageError> {
        let columns = self.column_order(table_style, model, records)?;
        let headers = columns.iter().map(|name| header_label(name)).collect();

        // Styles are per-column, so resolve each one once, not per cell.
        let mut specs = Vec::with_capacity(columns.len());
        for column in &columns {
            let style = self.cell_style(table_style, column)?;
            specs.push(self.cell_spec(style.as_ref())?);
        }

        let mut rows = Vec::with_capacity(records.len());
        for record in records {
            let row = columns
                .iter()
                .zip(&specs)
                .map(|(column, spec)| self.render_cell(spec, model, column, record.field(column)))
                .collect();
            rows.push(row);
        }

        Ok(TableMarkup {
            columns,
            headers,
            rows,
        })
    }

    /// Render a single record as (label, markup) pairs for a detail page,
    /// using the same column and cell resolution as table rows.
    pub fn render_fields(
        &self,
        table_style: &Tag,
        model: &Model,
        record: &BoxRecord,
    ) -> Result<Vec<(String, String)>, PageError> {
        let columns = self.column_order(table_style, model, std::slice::from_ref(record))?;
        let mut fields = Vec::with_capacity(columns.len());
        for column in &columns {
            let style = self.cell_style(table_style, column)?;
            let spec = self.cell_spec(style.as_ref())?;
            let markup = self.render_cell(&spec, model, column, record.field(column));
            fields.push((header_label(column), markup));
        }
        Ok(fields)
    }

    /// Column order: explicit declaration, else inferred from the first
    /// record (identifier first, remainder lexicographic), else the model's
    /// declared order.
    fn column_order(
        &self,
        table_style: &Tag,
        model: &Model,
        records: &[BoxRecord],
    ) -> Result<Vec<String>, DispatchError> {
        let query = [DispatchValue::Tag(table_style.clone())];
        if let Some(columns) = self
            .styles
            .column_orders
            .resolve_opt(self.styles.hierarchy(), &query)?
        {
            return Ok(columns.clone());
        }

        match records.first() {
            Some(first) => {
                let mut names = first.field_names();
                names.sort();
                if let Some(idx) = names.iter().position(|name| name == "id") {
                    let id = names.remove(idx);
                    names.insert(0, id);
                }
                Ok(names)
            }
            None => Ok(model.columns().to_vec()),
        }
    }

    /// Cell style for a column, with two-level fallback: the given
    /// table-style, then the global default table-style.
    fn cell_style(&self, table_style: &Tag, column: &str) -> Result<Option<Tag>, DispatchError> {
        let hierarchy = self.styles.hierarchy();
        let query = [
            DispatchValue::Tag(table_style.clone()),
            DispatchValue::ty(column),
        ];
        if let Some(style) = self.styles.cell_formats.resolve_opt(hierarchy, &query)? {
            return Ok(Some(style.clone()));
        }

        let global = &self.styles.config.default_table_style;
        if global != table_style {
            let query = [DispatchValue::Tag(global.clone()), DispatchValue::ty(column)];
            if let Some(style) = self.styles.cell_formats.resolve_opt(hierarchy, &query)? {
                return Ok(Some(style.clone()));
            }
        }
        Ok(None)
    }

    /// Template and transform for a cell style, with ancestor fallback; the
    /// configured default template when nothing applies.
    fn cell_spec(&self, cell_style: Option<&Tag>) -> Result<CellSpec, DispatchError> {
        if let Some(style) = cell_style {
            let query = [DispatchValue::Tag(style.clone())];
            if let Some(spec) = self
                .styles
                .cell_specs
                .resolve_opt(self.styles.hierarchy(), &query)?
            {
                return Ok(spec.clone());
            }
        }
        Ok(CellSpec::new(self.styles.config.default_cell_template.clone()))
    }

    fn render_cell(
        &self,
        spec: &CellSpec,
        model: &Model,
        column: &str,
        value: Option<Value>,
    ) -> String {
        let value = spec.apply(value.unwrap_or(Value::Null));
        let data = json!({
            "value": value,
            "column": column,
            "model": model.name(),
        });
        match self.templates.render(&spec.template, &data) {
            Ok(markup) => markup,
            Err(err) => {
                tracing::warn!(
                    template = %spec.template,
                    column,
                    model = model.name(),
                    error = %err,
                    "cell render failed"
                );
                String::new()
            }
        }
    }
}

/// Derive a header label from a column identifier: separators become spaces,
/// each word is capitalized.
pub fn header_label(column: &str) -> String {
    column
        .split(['_', '-', ' '])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
