//! Veritas Web Console
//!
//! Server-rendered dashboard for the Veritas testing platform: aggregate
//! analytics plus the project list and creation form.

pub mod backend;
pub mod config;
pub mod dashboard;
pub mod render;
pub mod server;
pub mod static_files;

pub use backend::DashboardBackend;
pub use config::{LinkTargets, QuickLinks, WebConfig};
pub use dashboard::{Dashboard, Fetch, PageState, Tab, View};
pub use server::WebServer;
