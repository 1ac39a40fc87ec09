//! Full-page loading overlay

use super::escape_html;

/// Element id of the overlay; at most one exists per page.
pub const OVERLAY_ID: &str = "loadingOverlay";

#[derive(Debug, Clone, Default)]
pub struct LoadingOverlay {
    message: Option<String>,
}

impl LoadingOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show the overlay. Showing again replaces the message.
    pub fn show(&mut self, message: impl Into<String>) {
        self.message = Some(message.into());
    }

    pub fn show_default(&mut self) {
        self.show("Loading...");
    }

    /// Remove the overlay; no-op when hidden.
    pub fn hide(&mut self) {
        self.message = None;
    }

    pub fn is_visible(&self) -> bool {
        self.message.is_some()
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn render(&self) -> String {
        match &self.message {
            Some(message) => format!(
                r#"<div class="loading-overlay" id="{id}"><div style="text-align: center;"><div class="loading-spinner"></div><p style="margin-top: 1rem; color: var(--text-primary);">{msg}</p></div></div>"#,
                id = OVERLAY_ID,
                msg = escape_html(message),
            ),
            None => String::new(),
        }
    }
}
