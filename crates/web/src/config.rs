//! Web console configuration

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use veritas_common::ServiceRegistry;

/// Web console configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WebConfig {
    /// HTTP listen address
    pub listen: String,

    /// REST root of the backend API (`/api/projects`, `/api/analytics/...`)
    pub api_base_url: String,

    /// Portal link target in the header
    pub portal_url: String,

    /// Client-side storage database; defaults to `~/.veritas/storage.db`
    pub storage_path: Option<PathBuf>,

    /// Outbound links rendered by the dashboard
    pub quick_links: QuickLinks,

    /// Service registry overrides, keyed by service name
    pub services: BTreeMap<String, String>,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            listen: "127.0.0.1:3000".to_string(),
            api_base_url: "http://localhost:8880".to_string(),
            portal_url: "http://localhost:8876".to_string(),
            storage_path: None,
            quick_links: QuickLinks::default(),
            services: BTreeMap::new(),
        }
    }
}

/// Quick-action and per-project link targets
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QuickLinks {
    pub test_results: String,
    pub minio_console: String,
    pub project_manager: String,
    pub repository_analyzer: String,
}

impl Default for QuickLinks {
    fn default() -> Self {
        Self {
            test_results: "http://localhost:8877".to_string(),
            minio_console: "http://localhost:9899".to_string(),
            project_manager: "http://localhost:8876/service/project_manager".to_string(),
            repository_analyzer: "http://localhost:8875".to_string(),
        }
    }
}

/// Links as the renderer sees them: portal plus the quick links.
#[derive(Debug, Clone)]
pub struct LinkTargets {
    pub portal: String,
    pub quick: QuickLinks,
}

impl Default for LinkTargets {
    fn default() -> Self {
        WebConfig::default().link_targets()
    }
}

impl WebConfig {
    /// Load configuration from file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Self = toml::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Check URLs before anything is started.
    pub fn validate(&self) -> anyhow::Result<()> {
        for (name, value) in [
            ("api_base_url", &self.api_base_url),
            ("portal_url", &self.portal_url),
        ] {
            if url::Url::parse(value).is_err() {
                anyhow::bail!("{} is not a valid URL: {:?}", name, value);
            }
        }
        self.listen
            .parse::<std::net::SocketAddr>()
            .map_err(|e| anyhow::anyhow!("listen address {:?}: {}", self.listen, e))?;
        Ok(())
    }

    pub fn registry(&self) -> veritas_common::Result<ServiceRegistry> {
        ServiceRegistry::default().with_overrides(self.services.iter())
    }

    pub fn storage_path(&self) -> PathBuf {
        self.storage_path
            .clone()
            .unwrap_or_else(veritas_common::default_storage_path)
    }

    pub fn link_targets(&self) -> LinkTargets {
        LinkTargets {
            portal: self.portal_url.clone(),
            quick: self.quick_links.clone(),
        }
    }
}
