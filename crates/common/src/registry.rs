//! Service registry
//!
//! Maps the named Veritas backend services to their base URLs. The registry
//! is an ordinary value: build one at startup and hand it to
//! [`ApiClient::new`](crate::api::ApiClient::new).

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Backend services addressable through the registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Service {
    Portal,
    ProjectManager,
    RepositoryAnalyzer,
    TestManager,
    ExecutionEngine,
    QualityAnalytics,
    EvidenceManager,
}

impl Service {
    pub const ALL: [Service; 7] = [
        Service::Portal,
        Service::ProjectManager,
        Service::RepositoryAnalyzer,
        Service::TestManager,
        Service::ExecutionEngine,
        Service::QualityAnalytics,
        Service::EvidenceManager,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Service::Portal => "portal",
            Service::ProjectManager => "project-manager",
            Service::RepositoryAnalyzer => "repository-analyzer",
            Service::TestManager => "test-manager",
            Service::ExecutionEngine => "execution-engine",
            Service::QualityAnalytics => "quality-analytics",
            Service::EvidenceManager => "evidence-manager",
        }
    }

    fn default_port(&self) -> u16 {
        match self {
            Service::Portal => 8869,
            Service::TestManager => 8870,
            Service::ExecutionEngine => 8871,
            Service::QualityAnalytics => 8872,
            Service::EvidenceManager => 8873,
            Service::ProjectManager => 8874,
            Service::RepositoryAnalyzer => 8875,
        }
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Service {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        // Accept kebab-case, snake_case and the camelCase names used by the portal pages.
        let normalized: String = s
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .collect::<String>()
            .to_ascii_lowercase();

        Service::ALL
            .iter()
            .copied()
            .find(|svc| svc.as_str().replace('-', "") == normalized)
            .ok_or_else(|| Error::UnknownService(s.to_string()))
    }
}

/// Immutable name -> base URL mapping
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceRegistry {
    urls: BTreeMap<Service, String>,
}

impl Default for ServiceRegistry {
    fn default() -> Self {
        let urls = Service::ALL
            .iter()
            .map(|svc| (*svc, format!("http://localhost:{}/api", svc.default_port())))
            .collect();
        Self { urls }
    }
}

impl ServiceRegistry {
    /// Registry with no entries, for callers that want to list every URL explicitly.
    pub fn empty() -> Self {
        Self { urls: BTreeMap::new() }
    }

    /// Return a copy of the registry with `service` pointed at `base_url`.
    pub fn with_override(mut self, service: Service, base_url: impl Into<String>) -> Self {
        self.urls.insert(service, base_url.into());
        self
    }

    /// Apply string-keyed overrides, as read from a config file.
    pub fn with_overrides<'a, I>(mut self, overrides: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a String, &'a String)>,
    {
        for (name, url) in overrides {
            let service: Service = name.parse()?;
            if url::Url::parse(url).is_err() {
                return Err(Error::InvalidConfig(format!(
                    "service {} has invalid base url {:?}",
                    service, url
                )));
            }
            self.urls.insert(service, url.clone());
        }
        Ok(self)
    }

    pub fn base_url(&self, service: Service) -> Result<&str> {
        self.urls
            .get(&service)
            .map(String::as_str)
            .ok_or_else(|| Error::UnknownService(service.to_string()))
    }

    /// Full URL for `endpoint` on `service`; the endpoint is appended verbatim.
    pub fn url(&self, service: Service, endpoint: &str) -> Result<String> {
        Ok(format!("{}{}", self.base_url(service)?, endpoint))
    }

    pub fn iter(&self) -> impl Iterator<Item = (Service, &str)> {
        self.urls.iter().map(|(svc, url)| (*svc, url.as_str()))
    }
}
