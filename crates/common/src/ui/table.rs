//! Data tables

use super::escape_html;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Custom cell renderer: `(cell value, whole row) -> HTML`
pub type Renderer = Arc<dyn Fn(&Value, &Value) -> String + Send + Sync>;

#[derive(Clone)]
pub struct Column {
    pub label: String,
    pub key: String,
    pub render: Option<Renderer>,
}

impl fmt::Debug for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("label", &self.label)
            .field("key", &self.key)
            .field("render", &self.render.is_some())
            .finish()
    }
}

impl Column {
    pub fn new(label: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            key: key.into(),
            render: None,
        }
    }

    /// Render cells with `f`; its output is inserted unescaped.
    pub fn with_render<F>(mut self, f: F) -> Self
    where
        F: Fn(&Value, &Value) -> String + Send + Sync + 'static,
    {
        self.render = Some(Arc::new(f));
        self
    }

    fn cell(&self, row: &Value) -> String {
        let value = row.get(&self.key).unwrap_or(&Value::Null);
        match &self.render {
            Some(render) => render(value, row),
            None => escape_html(&plain_text(value)),
        }
    }
}

fn plain_text(value: &Value) -> String {
    match value {
        Value::Null | Value::Bool(false) => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[derive(Debug, Clone, Default)]
pub struct Table {
    columns: Vec<Column>,
}

impl Table {
    pub fn new(columns: Vec<Column>) -> Self {
        Self { columns }
    }

    /// Render `rows` in input order.
    pub fn render(&self, rows: &[Value]) -> String {
        let mut html = String::from(r#"<table class="data-table"><thead><tr>"#);
        for col in &self.columns {
            html.push_str(&format!("<th>{}</th>", escape_html(&col.label)));
        }
        html.push_str("</tr></thead><tbody>");
        for row in rows {
            html.push_str("<tr>");
            for col in &self.columns {
                html.push_str(&format!("<td>{}</td>", col.cell(row)));
            }
            html.push_str("</tr>");
        }
        html.push_str("</tbody></table>");
        html
    }
}

/// An element whose whole content gets swapped out on each render.
#[derive(Debug, Clone, Default)]
pub struct TableContainer {
    id: String,
    content: String,
}

impl TableContainer {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            content: String::new(),
        }
    }

    /// Replace the container content with `table` rendered over `rows`.
    pub fn replace(&mut self, table: &Table, rows: &[Value]) {
        self.content = table.render(rows);
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn render(&self) -> String {
        format!(r#"<div id="{}">{}</div>"#, escape_html(&self.id), self.content)
    }
}
