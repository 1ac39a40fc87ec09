//! UI components
//!
//! Server-rendered replacements for the portal's browser helpers. Each page
//! builds the components it needs and owns them; nothing is wired globally.

pub mod alert;
pub mod breadcrumb;
pub mod dropdown;
pub mod form;
pub mod modal;
pub mod overlay;
pub mod progress;
pub mod shell;
pub mod table;
pub mod tabs;

pub use alert::{Alert, AlertKind, AlertStack, ALERT_TTL};
pub use breadcrumb::{breadcrumb, Crumb};
pub use dropdown::DropdownSet;
pub use form::FormData;
pub use modal::ModalSet;
pub use overlay::{LoadingOverlay, OVERLAY_ID};
pub use progress::ProgressBar;
pub use shell::UiShell;
pub use table::{Column, Table, TableContainer};
pub use tabs::TabGroup;

/// Escape text for interpolation into HTML element content or attribute values.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// `class="a b"` value from a base class plus an optional `active` marker.
pub(crate) fn class_list(base: &str, active: bool) -> String {
    if active {
        format!("{} active", base)
    } else {
        base.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
        );
        assert_eq!(escape_html("plain"), "plain");
    }
}
