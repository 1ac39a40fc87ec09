use std::path::PathBuf;

use clap::Parser;
use tracing::info;

use veritas_web::WebConfig;

#[derive(Parser, Debug)]
#[command(name = "veritas-web")]
#[command(about = "Veritas testing dashboard", version)]
struct Args {
    /// Path to a TOML configuration file
    #[arg(short, long, env = "VERITAS_CONFIG")]
    config: Option<PathBuf>,

    /// Listen address
    #[arg(long, env = "VERITAS_WEB_ADDR")]
    listen: Option<String>,

    /// REST root of the backend API
    #[arg(long, env = "VERITAS_API_URL")]
    api_url: Option<String>,

    /// Portal link target
    #[arg(long, env = "VERITAS_PORTAL_URL")]
    portal_url: Option<String>,

    /// Client-side storage database
    #[arg(long, env = "VERITAS_STORAGE_PATH")]
    storage_path: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut cfg = match &args.config {
        Some(path) => WebConfig::load(path)?,
        None => WebConfig::default(),
    };
    if let Some(listen) = args.listen {
        cfg.listen = listen;
    }
    if let Some(api_url) = args.api_url {
        cfg.api_base_url = api_url;
    }
    if let Some(portal_url) = args.portal_url {
        cfg.portal_url = portal_url;
    }
    if let Some(storage_path) = args.storage_path {
        cfg.storage_path = Some(storage_path);
    }

    info!(
        "Starting Veritas dashboard on http://{} (api: {})",
        cfg.listen, cfg.api_base_url
    );

    veritas_web::server::serve(cfg).await
}
