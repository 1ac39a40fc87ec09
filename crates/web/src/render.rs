//! HTML rendering for the dashboard page

use crate::config::LinkTargets;
use crate::dashboard::{Dashboard, Tab, View, CREATE_MODAL_ID, TABS_ID};
use veritas_common::format::format_short_date;
use veritas_common::ui::{breadcrumb, escape_html, Crumb};
use veritas_common::{AnalyticsSnapshot, Project};

const TITLE: &str = "IA-Ops Veritas";

/// Render the whole document for the current session state.
pub fn page(dash: &mut Dashboard, links: &LinkTargets) -> String {
    let chrome = dash.shell_mut().render_chrome();
    let body = match dash.view() {
        None => String::new(),
        Some(view) => {
            let tab = dash.active_tab();
            let main = match tab {
                Tab::Dashboard => dashboard_view(view, links),
                Tab::Projects => {
                    let modal_class = dash
                        .show_create_form()
                        .then(|| dash.shell().modals.class(CREATE_MODAL_ID));
                    projects_view(view, modal_class.as_deref(), links)
                }
            };
            let pane = dash
                .shell()
                .tabs(TABS_ID)
                .map(|tabs| tabs.render_pane(tab.as_str(), &main))
                .unwrap_or(main);
            let crumbs = [
                Crumb::new("Portal", links.portal.as_str()),
                Crumb::new(tab_label(tab), format!("/?tab={}", tab)),
            ];
            format!(
                r#"<div class="App">{header}<nav class="nav-breadcrumb">{crumbs}</nav><main class="app-main">{pane}</main></div>"#,
                header = header(dash, links),
                crumbs = breadcrumb(&crumbs),
                pane = pane,
            )
        }
    };
    document(&format!("{}{}", chrome, body))
}

fn tab_label(tab: Tab) -> &'static str {
    match tab {
        Tab::Dashboard => "Dashboard",
        Tab::Projects => "Projects",
    }
}

fn document(body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="es">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<link rel="stylesheet" href="/static/veritas.css">
</head>
<body>
{body}
</body>
</html>"#,
        title = TITLE,
        body = body
    )
}

fn header(dash: &Dashboard, links: &LinkTargets) -> String {
    let buttons = dash
        .shell()
        .tabs(TABS_ID)
        .map(|t| t.render_buttons())
        .unwrap_or_default();
    format!(
        r#"<header class="app-header"><div class="header-content"><h1>🧪 {title}</h1><p>Testing &amp; Quality Assurance Platform</p></div><form class="header-nav" method="get" action="/">{buttons}<a href="{portal}" target="_blank" rel="noopener noreferrer">Portal</a></form></header>"#,
        title = TITLE,
        buttons = buttons,
        portal = escape_html(&links.portal),
    )
}

fn error_banner(what: &str, err: Option<&str>) -> String {
    match err {
        Some(e) => format!(
            r#"<div class="alert alert-error fetch-error">Could not load {}: {}</div>"#,
            what,
            escape_html(e)
        ),
        None => String::new(),
    }
}

fn stat_card(value: &str, label: &str) -> String {
    format!(
        r#"<div class="stat-card"><div class="stat-value">{}</div><div class="stat-label">{}</div></div>"#,
        escape_html(value),
        label
    )
}

fn stats_grid(a: &AnalyticsSnapshot) -> String {
    [
        stat_card(&a.total_projects.to_string(), "Total Projects"),
        stat_card(&a.total_executions.to_string(), "Test Executions"),
        stat_card(&a.total_user_stories.to_string(), "User Stories"),
        stat_card(&a.success_rate_display(), "Success Rate"),
    ]
    .concat()
}

fn dashboard_view(view: &View, links: &LinkTargets) -> String {
    format!(
        r#"<div class="dashboard"><h2>📊 Dashboard</h2>{error}<div class="stats-grid">{stats}</div><div class="dashboard-actions"><h3>🚀 Quick Actions</h3><div class="action-buttons">{portal}{results}{minio}</div></div></div>"#,
        error = error_banner("analytics", view.analytics.error()),
        stats = stats_grid(&view.analytics()),
        portal = external_link(&links.portal, "📊 Open Portal"),
        results = external_link(&links.quick.test_results, "📋 Test Results"),
        minio = external_link(&links.quick.minio_console, "🗂️ MinIO Console"),
    )
}

fn external_link(href: &str, label: &str) -> String {
    format!(
        r#"<a class="button" href="{}" target="_blank" rel="noopener noreferrer">{}</a>"#,
        escape_html(href),
        label
    )
}

fn projects_view(view: &View, modal_class: Option<&str>, links: &LinkTargets) -> String {
    let cards: String = view
        .projects()
        .iter()
        .map(|p| project_card(p, links))
        .collect();
    format!(
        r#"<div class="projects"><div class="projects-header"><h2>📊 Projects</h2><a class="button" href="/projects/new">+ New Project</a></div>{error}{form}<div class="projects-grid">{cards}</div></div>"#,
        error = error_banner("projects", view.projects.error()),
        form = modal_class.map(create_form).unwrap_or_default(),
        cards = cards,
    )
}

fn project_card(p: &Project, links: &LinkTargets) -> String {
    format!(
        r#"<div class="project-card" data-project-id="{id}"><h3>{name}</h3><p>{description}</p><div class="project-meta"><span class="status">{status}</span><span class="date">{date}</span></div><div class="project-actions">{manage}{analyze}</div></div>"#,
        id = escape_html(&p.id.to_string()),
        name = escape_html(&p.name),
        description = escape_html(p.description.as_deref().unwrap_or_default()),
        status = escape_html(&p.status),
        date = format_short_date(&p.created_at),
        manage = external_link(&links.quick.project_manager, "📊 Manage"),
        analyze = external_link(&links.quick.repository_analyzer, "🔍 Analyze"),
    )
}

fn create_form(class: &str) -> String {
    format!(
        r#"<div class="{class}" id="{modal}"><div class="modal-content"><h3>Create New Project</h3><form method="post" action="/projects"><div class="form-group"><label for="name">Project Name:</label><input type="text" id="name" name="name" required></div><div class="form-group"><label for="repository">Repository URL:</label><input type="url" id="repository" name="repository"></div><div class="form-group"><label for="description">Description:</label><textarea id="description" name="description" rows="3"></textarea></div><div class="form-actions"><a class="button modal-close" href="/projects/cancel">Cancel</a><button type="submit">Create Project</button></div></form></div></div>"#,
        class = class,
        modal = CREATE_MODAL_ID
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::DashboardBackend;
    use crate::dashboard::{Fetch, PageState};
    use veritas_common::{ApiClient, ProjectId, ServiceRegistry};

    fn dash() -> Dashboard {
        Dashboard::new(DashboardBackend::new(
            ApiClient::new(ServiceRegistry::default()),
            "http://127.0.0.1:9",
        ))
    }

    #[test]
    fn loading_page_shows_overlay_only() {
        let mut d = dash();
        assert!(matches!(d.state(), PageState::Loading));
        let html = page(&mut d, &LinkTargets::default());
        assert!(html.contains("Loading IA-Ops Veritas..."));
        assert!(html.contains(r#"id="loadingOverlay""#));
        assert!(!html.contains("stats-grid"));
    }

    #[test]
    fn project_card_escapes_and_formats() {
        let p = Project {
            id: ProjectId::Number(4),
            name: "<Checkout>".to_string(),
            repository: None,
            description: Some("Cart & payments".to_string()),
            status: "active".to_string(),
            created_at: "2026-10-18T09:15:00".to_string(),
        };
        let html = project_card(&p, &LinkTargets::default());
        assert!(html.contains("<h3>&lt;Checkout&gt;</h3>"));
        assert!(html.contains("<p>Cart &amp; payments</p>"));
        assert!(html.contains(r#"<span class="date">18/10/2026</span>"#));
        assert!(html.contains(r#"data-project-id="4""#));
    }

    #[test]
    fn stats_render_analytics_values() {
        let a = AnalyticsSnapshot {
            total_projects: 3,
            total_executions: 10,
            total_user_stories: 5,
            success_rate: 80.0,
            active_projects: None,
        };
        let html = stats_grid(&a);
        for value in ["3", "10", "5", "80%"] {
            assert!(html.contains(&format!(r#"<div class="stat-value">{}</div>"#, value)));
        }
    }

    #[test]
    fn error_banner_only_for_failures() {
        let view = View {
            projects: Fetch::Loaded(vec![]),
            analytics: Fetch::Failed("HTTP error! status: 500".to_string()),
        };
        let html = dashboard_view(&view, &LinkTargets::default());
        assert!(html.contains("Could not load analytics"));
        assert!(html.contains(r#"<div class="stat-value">0</div>"#));

        let html = projects_view(&view, None, &LinkTargets::default());
        assert!(!html.contains("fetch-error"));
        assert!(!html.contains(CREATE_MODAL_ID));
        assert!(projects_view(&view, Some("modal active"), &LinkTargets::default())
            .contains(r#"<div class="modal active" id="createProjectModal">"#));
    }
}
