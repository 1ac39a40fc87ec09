//! Backend endpoints used by the dashboard

use veritas_common::{AnalyticsSnapshot, ApiClient, NewProject, Project, Result};

pub const PROJECTS_PATH: &str = "/api/projects";
pub const ANALYTICS_PATH: &str = "/api/analytics/dashboard";

/// Dashboard view of the REST backend rooted at `api_base_url`
#[derive(Clone)]
pub struct DashboardBackend {
    client: ApiClient,
    base_url: String,
}

impl DashboardBackend {
    pub fn new(client: ApiClient, base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn list_projects(&self) -> Result<Vec<Project>> {
        self.client.get_url(&self.url(PROJECTS_PATH)).await
    }

    pub async fn dashboard_analytics(&self) -> Result<AnalyticsSnapshot> {
        self.client.get_url(&self.url(ANALYTICS_PATH)).await
    }

    /// Create a project. The created record is not used.
    pub async fn create_project(&self, project: &NewProject) -> Result<()> {
        let _: serde_json::Value = self.client.post_url(&self.url(PROJECTS_PATH), project).await?;
        Ok(())
    }
}
