//! Core types for Veritas

use crate::validate::validate_url;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Project identifier as the backend reports it (string or numeric)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProjectId {
    Text(String),
    Number(i64),
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProjectId::Text(s) => f.write_str(s),
            ProjectId::Number(n) => write!(f, "{}", n),
        }
    }
}

/// Project as listed by `GET /api/projects`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    #[serde(default)]
    pub repository: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub created_at: String,
}

/// Treat an explicit `null` like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Body of `POST /api/projects`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProject {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repository: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl NewProject {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_repository(mut self, repository: impl Into<String>) -> Self {
        self.repository = Some(repository.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Trim every field and drop blank optional ones.
    pub fn normalized(self) -> Self {
        fn non_blank(v: Option<String>) -> Option<String> {
            v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
        }
        Self {
            name: self.name.trim().to_string(),
            repository: non_blank(self.repository),
            description: non_blank(self.description),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::Validation("project name is required".to_string()));
        }
        if let Some(repo) = &self.repository {
            if !validate_url(repo) {
                return Err(Error::Validation(format!(
                    "repository must be a valid URL, got {:?}",
                    repo
                )));
            }
        }
        Ok(())
    }
}

/// Aggregate numbers from `GET /api/analytics/dashboard`.
///
/// Owned by the backend and replaced wholesale on every load.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsSnapshot {
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_projects: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_executions: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_user_stories: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub success_rate: f64,
    #[serde(default)]
    pub active_projects: Option<u64>,
}

impl AnalyticsSnapshot {
    /// `80` for 80.0, `92.5` for 92.5.
    pub fn success_rate_display(&self) -> String {
        if self.success_rate.fract() == 0.0 {
            format!("{}%", self.success_rate as i64)
        } else {
            format!("{}%", self.success_rate)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn project_accepts_string_and_numeric_ids() {
        let p: Project = serde_json::from_value(json!({
            "id": "7", "name": "Checkout", "status": "active",
            "created_at": "2026-10-01T09:00:00"
        }))
        .unwrap();
        assert_eq!(p.id.to_string(), "7");
        assert_eq!(p.repository, None);

        let p: Project =
            serde_json::from_value(json!({"id": 12, "name": "Billing", "status": null})).unwrap();
        assert_eq!(p.id, ProjectId::Number(12));
        assert_eq!(p.status, "");
    }

    #[test]
    fn new_project_omits_blank_optionals() {
        let body = NewProject::new("  Foo ")
            .with_repository("")
            .with_description("  ")
            .normalized();
        assert_eq!(serde_json::to_value(&body).unwrap(), json!({"name": "Foo"}));
    }

    #[test]
    fn new_project_validation() {
        assert!(NewProject::new("Foo").validate().is_ok());
        assert!(NewProject::new("   ").validate().is_err());
        assert!(NewProject::new("Foo").with_repository("git@nowhere").validate().is_err());
        assert!(NewProject::new("Foo")
            .with_repository("https://github.com/ia-ops/veritas")
            .validate()
            .is_ok());
    }

    #[test]
    fn analytics_defaults_missing_fields() {
        let a: AnalyticsSnapshot = serde_json::from_value(json!({"total_projects": 3})).unwrap();
        assert_eq!(a.total_projects, 3);
        assert_eq!(a.total_executions, 0);
        assert_eq!(a.success_rate_display(), "0%");

        let a = AnalyticsSnapshot { success_rate: 92.5, ..Default::default() };
        assert_eq!(a.success_rate_display(), "92.5%");
    }

    #[test]
    fn analytics_null_counters_read_as_zero() {
        let a: AnalyticsSnapshot = serde_json::from_value(json!({
            "total_projects": null,
            "total_executions": 7,
            "total_user_stories": null,
            "success_rate": null,
            "active_projects": null
        }))
        .unwrap();
        assert_eq!(a.total_projects, 0);
        assert_eq!(a.total_executions, 7);
        assert_eq!(a.total_user_stories, 0);
        assert_eq!(a.success_rate_display(), "0%");
        assert_eq!(a.active_projects, None);
    }
}
