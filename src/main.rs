use clap::Parser;
use tracing_subscriber::EnvFilter;

use meraki_proxy::{app, is_production, AppState};

#[derive(Parser)]
#[command(name = "meraki-proxy")]
#[command(about = "REST proxy in front of the Meraki Dashboard API")]
#[command(version)]
struct Cli {
    #[arg(long, help = "Address to bind (overrides SERVER_HOST)")]
    host: Option<String>,

    #[arg(long, help = "Port to listen on (overrides SERVER_PORT / PORT)")]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up VENDOR_BASE_URL, SERVER_PORT, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_ansi(!is_production!())
        .init();

    let cli = Cli::parse();

    // Initialize configuration (this loads the config singleton)
    let mut config = meraki_proxy::config::config().clone();
    if let Some(host) = cli.host {
        config.server.host = host;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    tracing::info!(
        "Starting Meraki proxy in {:?} mode against {}",
        config.environment,
        config.vendor.base_url
    );

    let bind_addr = format!("{}:{}", config.server.host, config.server.port);
    let app = app(AppState::from_config(config));

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .map_err(|e| anyhow::anyhow!("failed to bind {}: {}", bind_addr, e))?;

    tracing::info!("Listening on http://{}", bind_addr);

    axum::serve(listener, app).await?;
    Ok(())
}
