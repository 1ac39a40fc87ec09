//! Dashboard page session
//!
//! Holds the state of one dashboard page: `Loading` until the first mount
//! completes, then `Ready` with the fetched projects and analytics. Both
//! fetches run concurrently and the session becomes ready once both have
//! settled, whatever their outcome.
//!
//! For callers sharing the session behind a lock, fetching is split in
//! three: [`Dashboard::begin_mount`] or [`Dashboard::begin_reload`] hand out
//! the backend, [`Dashboard::fetch`] does the I/O and [`Dashboard::install`]
//! applies the result.

use crate::backend::DashboardBackend;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::{error, info};
use veritas_common::ui::{AlertKind, TabGroup, UiShell};
use veritas_common::{AnalyticsSnapshot, Error, LocalStorage, NewProject, Project, Result};

pub const TABS_ID: &str = "appTabs";
pub const CREATE_MODAL_ID: &str = "createProjectModal";
pub const CREATE_MODAL_CLOSE_ID: &str = "createProjectCancel";
pub const LOADING_MESSAGE: &str = "Loading IA-Ops Veritas...";

const ACTIVE_TAB_KEY: &str = "active_tab";

/// The two dashboard views
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    #[default]
    Dashboard,
    Projects,
}

impl Tab {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tab::Dashboard => "dashboard",
            Tab::Projects => "projects",
        }
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tab {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "dashboard" => Ok(Tab::Dashboard),
            "projects" => Ok(Tab::Projects),
            other => Err(Error::Validation(format!("unknown tab {:?}", other))),
        }
    }
}

/// Outcome of one backend fetch
#[derive(Debug, Clone, PartialEq)]
pub enum Fetch<T> {
    Loaded(T),
    Failed(String),
}

impl<T> Fetch<T> {
    fn from_result(what: &str, result: Result<T>) -> Self {
        match result {
            Ok(v) => Fetch::Loaded(v),
            Err(e) => {
                error!("Error loading {}: {}", what, e);
                Fetch::Failed(e.to_string())
            }
        }
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            Fetch::Loaded(v) => Some(v),
            Fetch::Failed(_) => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Fetch::Loaded(_) => None,
            Fetch::Failed(e) => Some(e),
        }
    }
}

/// Data of a mounted dashboard
#[derive(Debug, Clone, PartialEq)]
pub struct View {
    pub projects: Fetch<Vec<Project>>,
    pub analytics: Fetch<AnalyticsSnapshot>,
}

impl View {
    /// Projects, empty when the fetch failed.
    pub fn projects(&self) -> &[Project] {
        self.projects.value().map(Vec::as_slice).unwrap_or(&[])
    }

    /// Analytics, zeroed when the fetch failed.
    pub fn analytics(&self) -> AnalyticsSnapshot {
        self.analytics.value().cloned().unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PageState {
    Loading,
    Ready(View),
}

pub struct Dashboard {
    backend: DashboardBackend,
    state: PageState,
    shell: UiShell,
    storage: Option<LocalStorage>,
    mount_pending: bool,
}

impl Dashboard {
    pub fn new(backend: DashboardBackend) -> Self {
        let mut shell = UiShell::new()
            .with_tabs(
                TabGroup::new(TABS_ID)
                    .tab(Tab::Dashboard.as_str(), "Dashboard")
                    .tab(Tab::Projects.as_str(), "Projects"),
            )
            .with_modal(CREATE_MODAL_ID, Some(CREATE_MODAL_CLOSE_ID));
        shell.overlay.show(LOADING_MESSAGE);

        Self {
            backend,
            state: PageState::Loading,
            shell,
            storage: None,
            mount_pending: false,
        }
    }

    /// Remember the active tab across sessions in `storage`.
    pub fn with_storage(mut self, storage: LocalStorage) -> Self {
        if let Some(tab) = storage.load::<Tab>(ACTIVE_TAB_KEY) {
            self.click_tab(tab);
        }
        self.storage = Some(storage);
        self
    }

    pub fn state(&self) -> &PageState {
        &self.state
    }

    pub fn view(&self) -> Option<&View> {
        match &self.state {
            PageState::Ready(view) => Some(view),
            PageState::Loading => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, PageState::Loading)
    }

    pub fn shell(&self) -> &UiShell {
        &self.shell
    }

    pub fn shell_mut(&mut self) -> &mut UiShell {
        &mut self.shell
    }

    pub fn backend(&self) -> &DashboardBackend {
        &self.backend
    }

    /// Fetch projects and analytics concurrently and become ready.
    pub async fn mount(&mut self) {
        let view = Self::fetch(&self.backend).await;
        self.install(view);
    }

    /// Claim the first mount. Returns `None` once data is loaded or while
    /// another caller's mount is still in flight.
    pub fn begin_mount(&mut self) -> Option<DashboardBackend> {
        if !self.is_loading() || self.mount_pending {
            return None;
        }
        self.mount_pending = true;
        Some(self.backend.clone())
    }

    /// Claim a refetch, whatever the current state.
    pub fn begin_reload(&mut self) -> DashboardBackend {
        self.mount_pending = true;
        self.backend.clone()
    }

    /// Run both mount fetches against `backend`.
    pub async fn fetch(backend: &DashboardBackend) -> View {
        let (projects, analytics) =
            tokio::join!(backend.list_projects(), backend.dashboard_analytics());

        let view = View {
            projects: Fetch::from_result("projects", projects),
            analytics: Fetch::from_result("analytics", analytics),
        };
        info!(
            projects = view.projects().len(),
            projects_ok = view.projects.error().is_none(),
            analytics_ok = view.analytics.error().is_none(),
            "dashboard data loaded"
        );
        view
    }

    /// Become ready with freshly fetched data.
    pub fn install(&mut self, view: View) {
        self.state = PageState::Ready(view);
        self.mount_pending = false;
        self.shell.overlay.hide();
    }

    /// Mount if nothing has been loaded yet.
    pub async fn ensure_mounted(&mut self) {
        if self.is_loading() {
            self.mount().await;
        }
    }

    /// Re-run the mount fetches.
    pub async fn reload(&mut self) {
        self.mount().await;
    }

    /// Submit a new project, then reload both projects and analytics.
    ///
    /// Invalid input is rejected before any request is made. A failed POST
    /// is logged and leaves the page untouched.
    pub async fn create_project(&mut self, project: NewProject) -> Result<()> {
        let project = self.prepare_create(project)?;
        if let Err(e) = self.backend.create_project(&project).await {
            error!("Error creating project: {}", e);
            return Err(e);
        }
        self.project_created(&project);
        self.reload().await;
        Ok(())
    }

    /// Normalize and validate form input; invalid input raises an error alert.
    pub fn prepare_create(&mut self, project: NewProject) -> Result<NewProject> {
        let project = project.normalized();
        if let Err(e) = project.validate() {
            self.shell.alert(e.to_string(), AlertKind::Error);
            return Err(e);
        }
        Ok(project)
    }

    /// Local bookkeeping after a successful POST. The caller still reloads.
    pub fn project_created(&mut self, project: &NewProject) {
        info!(name = %project.name, "project created");
        self.close_create_form();
        self.shell
            .alert(format!("Project {} created", project.name), AlertKind::Success);
    }

    pub fn active_tab(&self) -> Tab {
        self.shell
            .tabs(TABS_ID)
            .and_then(|t| t.active())
            .and_then(|name| name.parse().ok())
            .unwrap_or_default()
    }

    /// Switch views. Local only, no backend traffic.
    pub fn set_tab(&mut self, tab: Tab) {
        self.click_tab(tab);
        if let Some(storage) = &self.storage {
            storage.save(ACTIVE_TAB_KEY, &tab);
        }
    }

    fn click_tab(&mut self, tab: Tab) {
        if let Some(tabs) = self.shell.tabs_mut(TABS_ID) {
            tabs.click(tab.as_str());
        }
    }

    pub fn show_create_form(&self) -> bool {
        self.shell.modals.is_open(CREATE_MODAL_ID)
    }

    pub fn open_create_form(&mut self) {
        self.shell.modals.show(CREATE_MODAL_ID);
    }

    pub fn close_create_form(&mut self) {
        self.shell.modals.close_button(CREATE_MODAL_CLOSE_ID);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use veritas_common::{ApiClient, ServiceRegistry};

    fn offline_dashboard() -> Dashboard {
        // Nothing listens on port 9; fetches fail fast.
        let backend = DashboardBackend::new(
            ApiClient::new(ServiceRegistry::default()),
            "http://127.0.0.1:9",
        );
        Dashboard::new(backend)
    }

    #[test]
    fn tab_parsing() {
        assert_eq!("projects".parse::<Tab>().unwrap(), Tab::Projects);
        assert_eq!("dashboard".parse::<Tab>().unwrap(), Tab::Dashboard);
        assert!("settings".parse::<Tab>().is_err());
    }

    #[test]
    fn starts_loading_on_dashboard_tab() {
        let dash = offline_dashboard();
        assert!(dash.is_loading());
        assert_eq!(dash.active_tab(), Tab::Dashboard);
        assert!(!dash.show_create_form());
        assert!(dash.shell().overlay.is_visible());
    }

    #[test]
    fn tab_and_form_state_are_local() {
        let mut dash = offline_dashboard();
        dash.set_tab(Tab::Projects);
        assert_eq!(dash.active_tab(), Tab::Projects);
        assert_eq!(dash.shell().tabs(TABS_ID).unwrap().active_button_count(), 1);

        dash.open_create_form();
        assert!(dash.show_create_form());
        dash.close_create_form();
        assert!(!dash.show_create_form());
        assert!(dash.is_loading());
    }

    #[test]
    fn active_tab_survives_sessions() {
        let storage = LocalStorage::ephemeral().unwrap();
        let mut first = offline_dashboard().with_storage(storage.clone());
        first.set_tab(Tab::Projects);

        let second = offline_dashboard().with_storage(storage);
        assert_eq!(second.active_tab(), Tab::Projects);
    }

    #[tokio::test]
    async fn failed_fetches_still_reach_ready() {
        let mut dash = offline_dashboard();
        dash.mount().await;

        let view = dash.view().expect("ready after mount");
        assert!(view.projects.error().is_some());
        assert!(view.analytics.error().is_some());
        assert!(view.projects().is_empty());
        assert_eq!(view.analytics(), AnalyticsSnapshot::default());
        assert!(!dash.shell().overlay.is_visible());
    }

    #[tokio::test]
    async fn only_one_mount_is_claimed_at_a_time() {
        let mut dash = offline_dashboard();
        let backend = dash.begin_mount().expect("first claim");
        assert!(dash.begin_mount().is_none());

        let view = Dashboard::fetch(&backend).await;
        assert!(dash.is_loading());
        dash.install(view);
        assert!(!dash.is_loading());
        assert!(!dash.shell().overlay.is_visible());
        assert!(dash.begin_mount().is_none());

        let _ = dash.begin_reload();
        assert!(dash.begin_mount().is_none());
    }

    #[tokio::test]
    async fn invalid_project_is_rejected_locally() {
        let mut dash = offline_dashboard();
        dash.mount().await;
        let before = dash.view().cloned();

        let err = dash.create_project(NewProject::new("  ")).await.unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        assert_eq!(dash.view().cloned(), before);
    }
}
