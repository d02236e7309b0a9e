use clap::Parser;
use flare_server::{AppState, Config, JwtValidator, SharedDirectory, router};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "flare-server", about = "WebRTC signaling relay")]
struct Cli {
    /// Port to listen on (overrides FLARE_PORT)
    #[arg(long)]
    port: Option<u16>,

    /// Keepalive ping interval in seconds
    #[arg(long)]
    ping_interval: Option<u64>,

    /// Reap connections with no inbound frames for this many seconds
    #[arg(long)]
    idle_timeout: Option<u64>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let mut config = Config::from_env();
    if let Some(port) = cli.port {
        config.port = port;
    }
    if let Some(secs) = cli.ping_interval {
        config.ping_interval = Duration::from_secs(secs);
    }
    if let Some(secs) = cli.idle_timeout {
        config.idle_timeout = Some(Duration::from_secs(secs));
    }

    let state = AppState {
        directory: Arc::new(SharedDirectory::new()),
        validator: Arc::new(JwtValidator::new(&config.jwt_secret)),
        ping_interval: config.ping_interval,
        idle_timeout: config.idle_timeout,
    };

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("flare signaling relay listening on {addr}");

    axum::serve(listener, router(state)).await?;
    Ok(())
}
