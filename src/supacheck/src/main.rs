//! Supacheck — Supabase account compliance auditing service.
//!
//! Main entry point that loads configuration and starts the HTTP server.

use clap::Parser;
use supacheck_api::ApiServer;
use supacheck_core::AppConfig;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(name = "supacheck")]
#[command(about = "Supabase account compliance auditing service")]
#[command(version)]
struct Cli {
    /// HTTP bind host (overrides config)
    #[arg(long, env = "SUPACHECK__API__HOST")]
    host: Option<String>,

    /// HTTP port (overrides config)
    #[arg(long, env = "SUPACHECK__API__PORT")]
    port: Option<u16>,

    /// Supabase management API base URL (overrides config)
    #[arg(long, env = "SUPACHECK__SUPABASE__BASE_URL")]
    base_url: Option<String>,

    /// Audit log path (overrides config)
    #[arg(long, env = "SUPACHECK__AUDIT__LOG_PATH")]
    audit_log: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "supacheck=info,tower_http=info".into()),
        )
        .json()
        .init();

    let cli = Cli::parse();

    info!("Supacheck starting up");

    // Load configuration
    let mut config = AppConfig::load().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Failed to load config, using defaults");
        AppConfig::default()
    });

    // Apply CLI overrides
    if let Some(host) = cli.host {
        config.api.host = host;
    }
    if let Some(port) = cli.port {
        config.api.port = port;
    }
    if let Some(base_url) = cli.base_url {
        config.supabase.base_url = base_url;
    }
    if let Some(audit_log) = cli.audit_log {
        config.audit.log_path = audit_log;
    }

    info!(
        host = %config.api.host,
        port = config.api.port,
        supabase_base_url = %config.supabase.base_url,
        audit_log = %config.audit.log_path,
        "Configuration loaded"
    );

    let server = ApiServer::new(config);

    // Start metrics exporter
    if let Err(e) = server.start_metrics().await {
        error!(error = %e, "Failed to start metrics exporter");
    }

    info!("Supacheck is ready to serve traffic");

    server.start_http().await
}
