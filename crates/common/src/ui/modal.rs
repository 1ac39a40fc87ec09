//! Modal visibility

use std::collections::BTreeMap;

/// Registered modals and whether each is open.
#[derive(Debug, Clone, Default)]
pub struct ModalSet {
    modals: BTreeMap<String, bool>,
    close_buttons: BTreeMap<String, String>,
}

impl ModalSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a closed modal.
    pub fn register(&mut self, id: impl Into<String>) -> &mut Self {
        self.modals.entry(id.into()).or_insert(false);
        self
    }

    /// Attach a close button to an already registered modal.
    pub fn register_close_button(&mut self, button_id: impl Into<String>, modal_id: &str) -> &mut Self {
        if self.modals.contains_key(modal_id) {
            self.close_buttons.insert(button_id.into(), modal_id.to_string());
        }
        self
    }

    /// Open `id`. Unknown ids are ignored.
    pub fn show(&mut self, id: &str) {
        if let Some(open) = self.modals.get_mut(id) {
            *open = true;
        }
    }

    /// Close `id`. Unknown ids are ignored.
    pub fn hide(&mut self, id: &str) {
        if let Some(open) = self.modals.get_mut(id) {
            *open = false;
        }
    }

    /// Click on a close button: closes the modal that owns it.
    pub fn close_button(&mut self, button_id: &str) {
        if let Some(modal) = self.close_buttons.get(button_id).cloned() {
            self.hide(&modal);
        }
    }

    pub fn is_open(&self, id: &str) -> bool {
        self.modals.get(id).copied().unwrap_or(false)
    }

    /// `class` attribute for the modal element.
    pub fn class(&self, id: &str) -> String {
        super::class_list("modal", self.is_open(id))
    }
}
