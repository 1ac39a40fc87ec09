//! Dropdown menus

use std::collections::BTreeMap;

/// Open/closed state of every dropdown on a page.
#[derive(Debug, Clone, Default)]
pub struct DropdownSet {
    open: BTreeMap<String, bool>,
}

impl DropdownSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, id: impl Into<String>) -> &mut Self {
        self.open.entry(id.into()).or_insert(false);
        self
    }

    /// Click on a dropdown toggle. The click does not propagate, so other
    /// open dropdowns stay open.
    pub fn toggle(&mut self, id: &str) {
        if let Some(open) = self.open.get_mut(id) {
            *open = !*open;
        }
    }

    /// Click anywhere outside a toggle: every dropdown closes.
    pub fn click_outside(&mut self) {
        for open in self.open.values_mut() {
            *open = false;
        }
    }

    pub fn is_open(&self, id: &str) -> bool {
        self.open.get(id).copied().unwrap_or(false)
    }

    pub fn class(&self, id: &str) -> String {
        super::class_list("dropdown", self.is_open(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dropdown_toggle_and_outside_click() {
        let mut dropdowns = DropdownSet::new();
        dropdowns.register("serviceMenu").register("userMenu");

        dropdowns.toggle("serviceMenu");
        dropdowns.toggle("userMenu");
        assert!(dropdowns.is_open("serviceMenu"));
        assert!(dropdowns.is_open("userMenu"));

        dropdowns.toggle("userMenu");
        assert!(!dropdowns.is_open("userMenu"));
        assert_eq!(dropdowns.class("serviceMenu"), "dropdown active");

        dropdowns.click_outside();
        assert!(!dropdowns.is_open("serviceMenu"));
    }
}
