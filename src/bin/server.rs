//! Trendfeed HTTP server - trending-post search over the cache-aside service.

use clap::Parser;
use std::net::SocketAddr;
use tracing::info;
use trendfeed::api::{build_router, AppState};
use trendfeed::config::Config;
use trendfeed::trending::TrendingService;

#[derive(Parser)]
#[command(name = "trendfeed-server", version = trendfeed::VERSION, about = "Trendfeed HTTP server")]
struct Args {
    /// Bind address (defaults to server.bind)
    #[arg(long, env = "SERVER_BIND")]
    bind: Option<String>,

    /// Port (defaults to server.port)
    #[arg(long, short, env = "SERVER_PORT")]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Load config
    let config = Config::from_env()?;
    trendfeed::logging::init("trendfeed-server", &config.log);

    let service = TrendingService::from_config(&config).await?;
    info!(store = service.store_id(), "Cache store connected");

    // Build router
    let app = build_router(AppState::new(service));

    // Bind and serve
    let bind = args.bind.unwrap_or(config.server.bind);
    let port = args.port.unwrap_or(config.server.port);
    let addr: SocketAddr = format!("{}:{}", bind, port).parse()?;
    info!("Trendfeed listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
