//! Breadcrumb navigation

use super::escape_html;

/// One breadcrumb entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Crumb {
    pub label: String,
    pub link: String,
}

impl Crumb {
    pub fn new(label: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            link: link.into(),
        }
    }
}

/// Render crumbs in order; every entry but the last becomes a link.
pub fn breadcrumb(items: &[Crumb]) -> String {
    let last = items.len().saturating_sub(1);
    items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            if i == last {
                format!("<span>{}</span>", escape_html(&item.label))
            } else {
                format!(
                    r#"<a href="{}">{}</a> <span>/</span>"#,
                    escape_html(&item.link),
                    escape_html(&item.label)
                )
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
