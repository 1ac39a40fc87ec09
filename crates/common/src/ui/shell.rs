//! Per-page UI shell
//!
//! Owns the cross-cutting components a page uses: overlay, alerts, modals,
//! dropdowns and tab groups. Pages construct their shell explicitly.

use super::{AlertKind, AlertStack, DropdownSet, LoadingOverlay, ModalSet, TabGroup};

#[derive(Debug, Clone, Default)]
pub struct UiShell {
    pub overlay: LoadingOverlay,
    pub alerts: AlertStack,
    pub modals: ModalSet,
    pub dropdowns: DropdownSet,
    tabs: Vec<TabGroup>,
}

impl UiShell {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tabs(mut self, group: TabGroup) -> Self {
        self.tabs.push(group);
        self
    }

    pub fn with_modal(mut self, id: &str, close_button: Option<&str>) -> Self {
        self.modals.register(id);
        if let Some(button) = close_button {
            self.modals.register_close_button(button, id);
        }
        self
    }

    pub fn with_dropdown(mut self, id: &str) -> Self {
        self.dropdowns.register(id);
        self
    }

    pub fn tabs(&self, container_id: &str) -> Option<&TabGroup> {
        self.tabs.iter().find(|t| t.container_id() == container_id)
    }

    pub fn tabs_mut(&mut self, container_id: &str) -> Option<&mut TabGroup> {
        self.tabs.iter_mut().find(|t| t.container_id() == container_id)
    }

    pub fn alert(&mut self, message: impl Into<String>, kind: AlertKind) -> u64 {
        self.alerts.show(message, kind)
    }

    /// Alerts followed by the overlay, for the top of the page body.
    pub fn render_chrome(&mut self) -> String {
        format!(
            r#"<div class="alerts">{}</div>{}"#,
            self.alerts.render(),
            self.overlay.render()
        )
    }
}
