//! Tab groups
//!
//! A group pairs tab buttons with content panes through a shared tab name
//! (`data-tab` on the button, `data-tab-content` on the pane). Names are
//! unique within a group. Exactly one button is active at a time, along with
//! its pane.

use super::{class_list, escape_html};
use tracing::warn;

#[derive(Debug, Clone)]
struct TabButton {
    name: String,
    label: String,
}

#[derive(Debug, Clone)]
pub struct TabGroup {
    container_id: String,
    buttons: Vec<TabButton>,
    panes: Vec<String>,
    active_button: Option<usize>,
    active_pane: Option<usize>,
}

impl TabGroup {
    pub fn new(container_id: impl Into<String>) -> Self {
        Self {
            container_id: container_id.into(),
            buttons: Vec::new(),
            panes: Vec::new(),
            active_button: None,
            active_pane: None,
        }
    }

    /// Add a button and its pane. The first tab added starts active; a name
    /// already in the group is ignored.
    pub fn tab(mut self, name: impl Into<String>, label: impl Into<String>) -> Self {
        let name = name.into();
        if self.has_button(&name) {
            return self;
        }
        self.buttons.push(TabButton {
            name: name.clone(),
            label: label.into(),
        });
        self.panes.push(name);
        if self.active_button.is_none() {
            self.active_button = Some(0);
            self.active_pane = Some(0);
        }
        self
    }

    /// Add a button with no pane behind it.
    pub fn button_only(mut self, name: impl Into<String>, label: impl Into<String>) -> Self {
        let name = name.into();
        if self.has_button(&name) {
            return self;
        }
        self.buttons.push(TabButton {
            name,
            label: label.into(),
        });
        if self.active_button.is_none() {
            self.active_button = Some(self.buttons.len() - 1);
        }
        self
    }

    fn has_button(&self, name: &str) -> bool {
        let taken = self.buttons.iter().any(|b| b.name == name);
        if taken {
            warn!(container = %self.container_id, tab = name, "duplicate tab name ignored");
        }
        taken
    }

    pub fn container_id(&self) -> &str {
        &self.container_id
    }

    /// Click on the button named `tab`. Returns false when no such button exists.
    pub fn click(&mut self, tab: &str) -> bool {
        let Some(idx) = self.buttons.iter().position(|b| b.name == tab) else {
            return false;
        };
        self.active_button = Some(idx);
        self.active_pane = self.panes.iter().position(|p| p == tab);
        true
    }

    pub fn active(&self) -> Option<&str> {
        self.active_button.map(|i| self.buttons[i].name.as_str())
    }

    pub fn is_button_active(&self, tab: &str) -> bool {
        self.active() == Some(tab)
    }

    pub fn is_pane_active(&self, tab: &str) -> bool {
        self.active_pane.map(|i| self.panes[i].as_str()) == Some(tab)
    }

    pub fn active_button_count(&self) -> usize {
        self.buttons.iter().filter(|b| self.is_button_active(&b.name)).count()
    }

    pub fn active_pane_count(&self) -> usize {
        self.panes.iter().filter(|p| self.is_pane_active(p)).count()
    }

    pub fn render_buttons(&self) -> String {
        self.buttons
            .iter()
            .map(|b| {
                format!(
                    r#"<button class="{}" data-tab="{name}" name="tab" value="{name}">{}</button>"#,
                    class_list("tab-button", self.is_button_active(&b.name)),
                    escape_html(&b.label),
                    name = escape_html(&b.name),
                )
            })
            .collect()
    }

    /// Wrap pre-rendered `body` in the pane for `tab`.
    pub fn render_pane(&self, tab: &str, body: &str) -> String {
        format!(
            r#"<div class="{}" data-tab-content="{}">{}</div>"#,
            class_list("tab-content", self.is_pane_active(tab)),
            escape_html(tab),
            body
        )
    }
}
