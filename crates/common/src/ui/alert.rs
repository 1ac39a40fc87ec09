//! Transient alert banners
//!
//! Alerts stack newest-first and drop out five seconds after they were
//! shown, whether or not anyone dismissed them.

use super::escape_html;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::time::Instant;

/// Lifetime of an alert banner
pub const ALERT_TTL: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertKind {
    #[default]
    Success,
    Error,
    Warning,
    Info,
}

impl AlertKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertKind::Success => "success",
            AlertKind::Error => "error",
            AlertKind::Warning => "warning",
            AlertKind::Info => "info",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Alert {
    pub id: u64,
    pub message: String,
    pub kind: AlertKind,
    expires_at: Instant,
}

impl Alert {
    pub fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

#[derive(Debug, Clone, Default)]
pub struct AlertStack {
    alerts: Vec<Alert>,
    next_id: u64,
}

impl AlertStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an alert at the top of the stack and return its id.
    pub fn show(&mut self, message: impl Into<String>, kind: AlertKind) -> u64 {
        self.next_id += 1;
        let alert = Alert {
            id: self.next_id,
            message: message.into(),
            kind,
            expires_at: Instant::now() + ALERT_TTL,
        };
        self.alerts.insert(0, alert);
        self.next_id
    }

    pub fn dismiss(&mut self, id: u64) {
        self.alerts.retain(|a| a.id != id);
    }

    /// Drop every expired alert.
    pub fn prune(&mut self) {
        let now = Instant::now();
        self.alerts.retain(|a| !a.is_expired(now));
    }

    /// Live alerts, newest first.
    pub fn active(&mut self) -> &[Alert] {
        self.prune();
        &self.alerts
    }

    pub fn render(&mut self) -> String {
        self.active()
            .iter()
            .map(|a| {
                format!(
                    r#"<div class="alert alert-{}" data-alert-id="{}">{}</div>"#,
                    a.kind.as_str(),
                    a.id,
                    escape_html(&a.message)
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn alerts_expire_after_five_seconds() {
        let mut alerts = AlertStack::new();
        alerts.show("Project created", AlertKind::Success);
        tokio::time::advance(Duration::from_secs(3)).await;
        alerts.show("Analytics stale", AlertKind::Warning);

        assert_eq!(alerts.active().len(), 2);

        tokio::time::advance(Duration::from_secs(2)).await;
        let live = alerts.active();
        assert_eq!(live.len(), 1);
        assert_eq!(live[0].message, "Analytics stale");

        tokio::time::advance(Duration::from_secs(3)).await;
        assert!(alerts.active().is_empty());
        assert_eq!(alerts.render(), "");
    }

    #[tokio::test(start_paused = true)]
    async fn alerts_stack_newest_first() {
        let mut alerts = AlertStack::new();
        alerts.show("first", AlertKind::Info);
        let second = alerts.show("<b>second</b>", AlertKind::Error);

        let html = alerts.render();
        let first_at = html.find("first").unwrap();
        let second_at = html.find("&lt;b&gt;second").unwrap();
        assert!(second_at < first_at);
        assert!(html.contains("alert alert-error"));

        alerts.dismiss(second);
        assert_eq!(alerts.active().len(), 1);
    }
}
